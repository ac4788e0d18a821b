//! The HTML shell the rendered fragments are dropped into.

use std::path::Path;

use crate::error::BuildError;
use crate::render::RenderedPage;

/// Marker replaced with the API title.
pub const TITLE_MARKER: &str = "{{ title }}";
/// Marker replaced with the header fragment.
pub const HEADER_MARKER: &str = "{{ header }}";
/// Marker replaced with the endpoints fragment.
pub const ENDPOINTS_MARKER: &str = "{{ endpoints }}";

/// An HTML document containing the three substitution markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellTemplate {
    source: String,
}

impl ShellTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Reads the template from disk.
    ///
    /// ## Errors
    ///
    /// Returns [`BuildError::Template`] if the file is missing or unreadable.
    pub fn load(path: &Path) -> Result<Self, BuildError> {
        std::fs::read_to_string(path)
            .map(Self::new)
            .map_err(|source| BuildError::Template {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Substitutes the rendered page into the template.
    ///
    /// Only the first occurrence of each marker is replaced, in the order
    /// header, endpoints, title. Replacement text is inserted literally.
    ///
    /// ## Examples
    ///
    /// ```
    /// use apidocs_lib::render::RenderedPage;
    /// use apidocs_lib::template::ShellTemplate;
    ///
    /// let shell = ShellTemplate::new("<title>{{ title }}</title>{{ header }}{{ endpoints }}");
    /// let page = RenderedPage {
    ///     title: "T".into(),
    ///     header: "<h1>T</h1>".into(),
    ///     endpoints: "<h2>e</h2>".into(),
    /// };
    /// assert_eq!(shell.fill(&page), "<title>T</title><h1>T</h1><h2>e</h2>");
    /// ```
    pub fn fill(&self, page: &RenderedPage) -> String {
        self.source
            .replacen(HEADER_MARKER, &page.header, 1)
            .replacen(ENDPOINTS_MARKER, &page.endpoints, 1)
            .replacen(TITLE_MARKER, &page.title, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> RenderedPage {
        RenderedPage {
            title: "Nekoweb API".to_string(),
            header: "<h1>Nekoweb API</h1>".to_string(),
            endpoints: "<h2 id=\"ping\">/ping</h2>".to_string(),
        }
    }

    #[test]
    fn replaces_only_first_title_marker() {
        let shell = ShellTemplate::new("<title>{{ title }}</title><p>{{ title }}</p>");
        assert_eq!(
            shell.fill(&page()),
            "<title>Nekoweb API</title><p>{{ title }}</p>"
        );
    }

    #[test]
    fn passes_other_content_through() {
        let shell = ShellTemplate::new("<body>\n  {{ header }}\n  <main>{{ endpoints }}</main>\n</body>");
        assert_eq!(
            shell.fill(&page()),
            "<body>\n  <h1>Nekoweb API</h1>\n  <main><h2 id=\"ping\">/ping</h2></main>\n</body>"
        );
    }

    #[test]
    fn replacement_text_is_literal() {
        let mut page = page();
        page.title = "$& $1 costs $5".to_string();
        let shell = ShellTemplate::new("{{ title }}");
        assert_eq!(shell.fill(&page), "$& $1 costs $5");
    }

    #[test]
    fn missing_markers_leave_template_unchanged() {
        let shell = ShellTemplate::new("<p>static</p>");
        assert_eq!(shell.fill(&page()), "<p>static</p>");
    }

    #[test]
    fn load_missing_file_is_template_error() {
        let err = ShellTemplate::load(Path::new("/no/such/index.html")).unwrap_err();
        assert!(matches!(err, BuildError::Template { .. }));
    }
}
