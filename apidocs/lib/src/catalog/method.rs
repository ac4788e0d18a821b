//! HTTP verbs an endpoint can be documented with.

use serde::Deserialize;
use strum::{Display, EnumIter, EnumString};

/// HTTP methods accepted in an endpoint's `methods` list.
///
/// Catalogs spell them upper-case (`GET`, `POST`, ...); the rendered badge
/// uses the lower-case form as its CSS class.
///
/// ## Examples
///
/// ```rust
/// use apidocs_lib::HttpMethod;
///
/// let parsed: HttpMethod = "POST".parse().unwrap();
/// assert_eq!(parsed, HttpMethod::Post);
/// assert_eq!(parsed.to_string(), "POST");
/// assert_eq!(parsed.css_class(), "post");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Deserialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
}

impl HttpMethod {
    /// Lower-case token used as the badge's CSS class.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
            Self::Head => "head",
            Self::Options => "options",
            Self::Trace => "trace",
        }
    }
}
