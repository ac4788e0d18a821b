//! Turns a catalog into HTML fragments.
//!
//! Rendering is pure: the same catalog always produces the same strings.
//! Prose fields (`info.description`, endpoint descriptions, extras) go
//! through the markdown engine. Everything else (header values, tags,
//! parameter types, example code, type literals) is interpolated
//! byte-for-byte, because catalogs are trusted, author-controlled input.

use std::fmt::Write;

use crate::catalog::{ApiInfo, Catalog, EndpointDescriptor, TypeRegistry};
use crate::error::RenderError;
use crate::markdown::{to_html, to_inline_html};
use crate::status::reason_phrase;

/// The three values substituted into the shell template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub title: String,
    pub header: String,
    pub endpoints: String,
}

/// Anchor id for an endpoint: its path without the leading slash.
///
/// Only a leading slash is removed. A path without one is used as-is, so
/// `files/create` keeps its slash rather than becoming `filescreate`.
/// Distinct paths can map to colliding ids only if they differ solely in
/// that leading slash; no deduplication is attempted.
///
/// ## Examples
///
/// ```
/// use apidocs_lib::render::anchor_id;
///
/// assert_eq!(anchor_id("/files/create"), "files/create");
/// assert_eq!(anchor_id("ping"), "ping");
/// ```
pub fn anchor_id(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Renders the page title and introduction.
pub fn render_header(info: &ApiInfo) -> String {
    format!("<h1>{}</h1>\n{}", info.title, to_html(&info.description))
}

/// Renders one endpoint section.
///
/// ## Errors
///
/// Returns [`RenderError::UnknownStatus`] if an output status code has no
/// standard reason phrase, and [`RenderError::MissingType`] if an output
/// type is not in `types`.
pub fn render_endpoint(
    endpoint: &EndpointDescriptor,
    types: &TypeRegistry,
) -> Result<String, RenderError> {
    let mut out = String::new();

    // writing into a String cannot fail
    let _ = writeln!(
        out,
        r#"<h2 id="{}">{}</h2>"#,
        anchor_id(&endpoint.path),
        endpoint.path
    );
    out.push_str(&to_html(&endpoint.description));

    out.push_str("<div class=\"methods\">\n");
    for method in &endpoint.methods {
        let _ = writeln!(
            out,
            r#"<div class="method {}">{}</div>"#,
            method.css_class(),
            method
        );
    }
    if !endpoint.tags.is_empty() {
        out.push_str("<div class=\"vert\"></div>\n");
    }
    for tag in &endpoint.tags {
        let _ = writeln!(out, r#"<div class="tag">{tag}</div>"#);
    }
    out.push_str("</div>\n");

    if let Some(headers) = endpoint.headers.as_ref().filter(|h| !h.is_empty()) {
        out.push_str("<h3>Headers</h3>\n");
        for (name, value) in headers.iter() {
            let _ = writeln!(
                out,
                r#"<div class="header"><code class="key">{name}</code>: <span class="value">{value}</span></div>"#
            );
        }
    }

    if let Some(parameters) = &endpoint.parameters {
        out.push_str("<h3>Parameters</h3>\n");
        for (name, param) in parameters.iter() {
            let required = if param.required {
                r#"<span class="required">*</span>"#
            } else {
                ""
            };
            let _ = writeln!(
                out,
                r#"<div class="parameter"><code class="key">{name}</code>: <span class="value">{}</span>{required} - {}</div>"#,
                param.type_tag, param.description
            );
        }
    }

    for extra in &endpoint.extras {
        let _ = writeln!(
            out,
            r#"<blockquote class="{}">{}</blockquote>"#,
            extra.kind,
            to_inline_html(&extra.body)
        );
    }

    if let Some(examples) = &endpoint.examples {
        out.push_str("<h3>Examples</h3>\n");
        for example in examples {
            let _ = writeln!(
                out,
                "<details>\n<summary>{}</summary>\n<pre><code>{}</code></pre>\n</details>",
                example.language, example.code
            );
        }
    }

    if let Some(output) = &endpoint.output {
        out.push_str("<h3>Status Codes</h3>\n");
        for (&status, type_name) in output {
            let reason = reason_phrase(status).ok_or_else(|| RenderError::UnknownStatus {
                path: endpoint.path.clone(),
                status,
            })?;
            let body = types.get(type_name).ok_or_else(|| RenderError::MissingType {
                path: endpoint.path.clone(),
                type_name: type_name.clone(),
            })?;
            let _ = writeln!(
                out,
                "<details>\n<summary>{status} - {reason} (Type: {type_name})</summary>\n<pre><code>{body}</code></pre>\n</details>"
            );
        }
    }

    out.push_str("<hr/>\n");
    Ok(out)
}

/// Renders every endpoint, in catalog order, as one fragment.
///
/// ## Errors
///
/// Fails on the first endpoint that fails to render.
pub fn render_endpoints(catalog: &Catalog) -> Result<String, RenderError> {
    catalog
        .api
        .endpoints
        .iter()
        .map(|endpoint| render_endpoint(endpoint, &catalog.types))
        .collect()
}

/// Renders the title, header and endpoints fragments.
///
/// ## Errors
///
/// Fails if any endpoint fails to render; no partial page is returned.
pub fn render(catalog: &Catalog) -> Result<RenderedPage, RenderError> {
    Ok(RenderedPage {
        title: catalog.api.info.title.clone(),
        header: render_header(&catalog.api.info),
        endpoints: render_endpoints(catalog)?,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::catalog::{
        ApiDescription, Example, Extra, HttpMethod, OrderedMap, Parameter,
    };

    fn endpoint(path: &str) -> EndpointDescriptor {
        EndpointDescriptor {
            path: path.to_string(),
            methods: vec![HttpMethod::Get],
            headers: None,
            parameters: None,
            description: "Ping.".to_string(),
            extras: Vec::new(),
            tags: Vec::new(),
            examples: None,
            output: None,
        }
    }

    fn ping_catalog() -> Catalog {
        let mut ping = endpoint("/ping");
        ping.output = Some(BTreeMap::from([(200, "Pong".to_string())]));
        let api = ApiDescription {
            info: ApiInfo {
                title: "Ping API".to_string(),
                description: "Just *ping*.".to_string(),
            },
            endpoints: vec![ping],
        };
        Catalog::new(api, [("Pong", "pong")].into_iter().collect()).unwrap()
    }

    #[test]
    fn anchor_strips_only_the_leading_slash() {
        assert_eq!(anchor_id("/files/create"), "files/create");
        assert_eq!(anchor_id("/files/import/:bigid"), "files/import/:bigid");
        assert_eq!(anchor_id("files/create"), "files/create");
        assert_eq!(anchor_id("/"), "");
    }

    #[test]
    fn header_has_title_and_markdown() {
        let page = render(&ping_catalog()).unwrap();
        assert_eq!(page.title, "Ping API");
        assert_eq!(page.header, "<h1>Ping API</h1>\n<p>Just <em>ping</em>.</p>\n");
    }

    #[test]
    fn ping_endpoint_end_to_end() {
        let html = render_endpoints(&ping_catalog()).unwrap();
        assert!(html.starts_with(r#"<h2 id="ping">/ping</h2>"#));
        assert!(html.contains("<p>Ping.</p>"));
        assert!(html.contains(r#"<div class="method get">GET</div>"#));
        assert!(!html.contains(r#"class="tag""#));
        assert!(!html.contains(r#"class="vert""#));
        assert!(html.contains("<h3>Status Codes</h3>"));
        assert!(html.contains("<summary>200 - OK (Type: Pong)</summary>"));
        assert!(html.contains("<pre><code>pong</code></pre>"));
        assert!(html.ends_with("<hr/>\n"));
    }

    #[test]
    fn only_tagged_endpoint_renders_tag_badge() {
        let mut tagged = endpoint("/limited");
        tagged.tags = vec!["rate_limited".to_string()];
        let plain = endpoint("/plain");
        let types = TypeRegistry::default();

        let tagged_html = render_endpoint(&tagged, &types).unwrap();
        let plain_html = render_endpoint(&plain, &types).unwrap();

        assert!(tagged_html.contains(r#"<div class="vert"></div>"#));
        assert!(tagged_html.contains(r#"<div class="tag">rate_limited</div>"#));
        assert!(!plain_html.contains("rate_limited"));
        assert!(!plain_html.contains(r#"class="vert""#));
    }

    #[test]
    fn header_values_are_not_markdown_rendered() {
        let mut e = endpoint("/h");
        e.headers = Some(
            [("Authorization".to_string(), "[token](https://x.org)".to_string())]
                .into_iter()
                .collect(),
        );
        let html = render_endpoint(&e, &TypeRegistry::default()).unwrap();
        assert!(html.contains("<h3>Headers</h3>"));
        assert!(html.contains(
            r#"<code class="key">Authorization</code>: <span class="value">[token](https://x.org)</span>"#
        ));
    }

    #[test]
    fn empty_headers_render_no_section() {
        let mut e = endpoint("/h");
        e.headers = Some(OrderedMap::new());
        let html = render_endpoint(&e, &TypeRegistry::default()).unwrap();
        assert!(!html.contains("Headers"));
    }

    #[test]
    fn parameters_mark_required_and_keep_order() {
        let mut e = endpoint("/p");
        e.parameters = Some(
            [
                (
                    "pathname".to_string(),
                    Parameter {
                        type_tag: "string".to_string(),
                        required: true,
                        description: "The path.".to_string(),
                    },
                ),
                (
                    "recursive".to_string(),
                    Parameter {
                        type_tag: "boolean".to_string(),
                        required: false,
                        description: "Descend.".to_string(),
                    },
                ),
            ]
            .into_iter()
            .collect(),
        );
        let html = render_endpoint(&e, &TypeRegistry::default()).unwrap();
        assert!(html.contains(
            r#"<code class="key">pathname</code>: <span class="value">string</span><span class="required">*</span> - The path."#
        ));
        assert!(html.contains(
            r#"<code class="key">recursive</code>: <span class="value">boolean</span> - Descend."#
        ));
        let first = html.find("pathname").unwrap();
        let second = html.find("recursive").unwrap();
        assert!(first < second);
    }

    #[test]
    fn extras_render_inline_markdown_with_kind_class() {
        let mut e = endpoint("/x");
        e.extras = vec![Extra {
            kind: "info".to_string(),
            body: "Needs the `token` cookie.".to_string(),
        }];
        let html = render_endpoint(&e, &TypeRegistry::default()).unwrap();
        assert!(html.contains(
            r#"<blockquote class="info">Needs the <code>token</code> cookie.</blockquote>"#
        ));
    }

    #[test]
    fn example_code_is_verbatim() {
        let mut e = endpoint("/x");
        e.examples = Some(vec![Example {
            language: "JavaScript".to_string(),
            code: "if (a < b) console.log('<b>')".to_string(),
        }]);
        let html = render_endpoint(&e, &TypeRegistry::default()).unwrap();
        assert!(html.contains("<h3>Examples</h3>"));
        assert!(html.contains("<summary>JavaScript</summary>"));
        assert!(html.contains("<pre><code>if (a < b) console.log('<b>')</code></pre>"));
    }

    #[test]
    fn unknown_status_fails_render() {
        let mut e = endpoint("/odd");
        e.output = Some(BTreeMap::from([(299, "Pong".to_string())]));
        let types: TypeRegistry = [("Pong", "pong")].into_iter().collect();
        let err = render_endpoint(&e, &types).unwrap_err();
        assert!(matches!(err, RenderError::UnknownStatus { status: 299, .. }));
    }

    #[test]
    fn status_codes_render_in_ascending_order() {
        let mut e = endpoint("/multi");
        e.output = Some(BTreeMap::from([
            (404, "Err".to_string()),
            (200, "Ok".to_string()),
        ]));
        let types: TypeRegistry = [("Ok", "{}"), ("Err", "nope")].into_iter().collect();
        let html = render_endpoint(&e, &types).unwrap();
        let ok = html.find("200 - OK").unwrap();
        let not_found = html.find("404 - Not Found").unwrap();
        assert!(ok < not_found);
    }

    #[test]
    fn endpoints_render_in_catalog_order() {
        let api = ApiDescription {
            info: ApiInfo {
                title: "T".to_string(),
                description: String::new(),
            },
            endpoints: vec![endpoint("/b"), endpoint("/a"), endpoint("/c")],
        };
        let catalog = Catalog::new(api, TypeRegistry::default()).unwrap();
        let html = render_endpoints(&catalog).unwrap();
        let positions: Vec<usize> = ["id=\"b\"", "id=\"a\"", "id=\"c\""]
            .iter()
            .map(|needle| html.find(needle).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(html.matches("<hr/>").count(), 3);
    }
}
