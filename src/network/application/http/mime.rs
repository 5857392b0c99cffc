//! Content type lookup.

/// Content type used when a path has no extension.
pub const DEFAULT_CONTENT_TYPE: &str = "text/html";

/// Content type used for extensions missing from the table.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

const TYPES: [(&str, &str); 14] = [
    ("html", "text/html"),
    ("json", "application/json"),
    ("css", "text/css"),
    ("js", "text/javascript"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("gif", "image/gif"),
    ("txt", "text/plain"),
    ("mp3", "audio/mpeg3"),
    ("wav", "audio/wav"),
    ("flac", "audio/ogg"),
    ("pdf", "application/pdf"),
    ("ttf", "application/x-font-ttf"),
    ("ttc", "application/x-font-ttf"),
];

/// Content type for a file extension (without the dot), compared
/// case-insensitively.
pub fn from_extension(extension: &[u8]) -> &'static str {
    TYPES
        .iter()
        .find(|(ext, _)| ext.as_bytes().eq_ignore_ascii_case(extension))
        .map(|(_, content_type)| *content_type)
        .unwrap_or(FALLBACK_CONTENT_TYPE)
}

/// Content type for a request path.
///
/// Only a dot in the last path segment counts as an extension; paths without
/// one are served as [`DEFAULT_CONTENT_TYPE`].
pub fn from_path(path: &[u8]) -> &'static str {
    let name = match path.iter().rposition(|&b| b == b'/') {
        Some(slash) => &path[slash + 1..],
        None => path,
    };
    match name.iter().rposition(|&b| b == b'.') {
        Some(dot) => from_extension(&name[dot + 1..]),
        None => DEFAULT_CONTENT_TYPE,
    }
}
