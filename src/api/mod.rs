pub mod auth;
pub mod list;
pub mod resources;

/// Percent-encodes a caller supplied path segment (ids, regions, QR codes).
pub(crate) fn segment(value: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(value)
}
