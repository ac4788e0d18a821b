//! Reason phrases for numeric HTTP status codes.

use http::StatusCode;

/// Returns the standard reason phrase for `code`, if it has one.
///
/// The table is `http::StatusCode`'s, which only knows registered codes.
/// Unofficial codes such as 419 or 420 have no phrase, so an endpoint
/// listing one fails the build. The renderer turns `None` into
/// [`RenderError::UnknownStatus`](crate::RenderError::UnknownStatus).
///
/// ## Examples
///
/// ```
/// use apidocs_lib::status::reason_phrase;
///
/// assert_eq!(reason_phrase(200), Some("OK"));
/// assert_eq!(reason_phrase(404), Some("Not Found"));
/// assert_eq!(reason_phrase(299), None);
/// ```
pub fn reason_phrase(code: u16) -> Option<&'static str> {
    StatusCode::from_u16(code).ok()?.canonical_reason()
}
