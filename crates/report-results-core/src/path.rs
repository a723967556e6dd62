//! Flat-map paths.
//!
//! A path is the concatenation of `"/" + segment` for every object key or
//! array index between the document root and a leaf. The root itself is the
//! empty path `""`.
//!
//! Object keys are escaped as JSON Pointer reference tokens (`~` becomes `~0`,
//! `/` becomes `~1`), so a key containing a slash can never collide with a
//! nested path and every path is a valid pointer into the source document.

use std::borrow::Cow;

/// Separator between path segments.
pub const SEPARATOR: char = '/';

/// Escape an object key for use as a path segment.
///
/// Keys without `~` or `/` are returned unchanged.
pub fn escape_segment(key: &str) -> Cow<'_, str> {
    if key.contains(['~', '/']) {
        Cow::Owned(key.replace('~', "~0").replace('/', "~1"))
    } else {
        Cow::Borrowed(key)
    }
}

/// Reverse [`escape_segment`].
pub fn unescape_segment(segment: &str) -> Cow<'_, str> {
    if segment.contains('~') {
        Cow::Owned(segment.replace("~1", "/").replace("~0", "~"))
    } else {
        Cow::Borrowed(segment)
    }
}

/// Build a path from unescaped segments.
///
/// ```
/// use report_results_core::join_path;
///
/// assert_eq!(join_path(["errors", "0", "message"]), "/errors/0/message");
/// assert_eq!(join_path(["a/b"]), "/a~1b");
/// assert_eq!(join_path(Vec::<&str>::new()), "");
/// ```
pub fn join_path<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut path = String::new();
    for segment in segments {
        path.push(SEPARATOR);
        path.push_str(&escape_segment(segment.as_ref()));
    }
    path
}

/// Split a path into its unescaped segments.
///
/// Returns `None` if the path is neither empty nor starts with `/`.
pub fn split_path(path: &str) -> Option<Vec<String>> {
    if path.is_empty() {
        return Some(Vec::new());
    }
    let rest = path.strip_prefix(SEPARATOR)?;
    Some(
        rest.split(SEPARATOR)
            .map(|segment| unescape_segment(segment).into_owned())
            .collect(),
    )
}

/// If `path` has the form `/errors/<N>/message`, return `N`.
///
/// This is where a GraphQL response envelope places the message of its
/// `N`-th error once flattened. `N` must be written the way an array index
/// is flattened: decimal digits with no leading zero. An index too large for
/// `usize` still matches and is reported as `usize::MAX`.
pub fn error_message_index(path: &str) -> Option<usize> {
    let index = path.strip_prefix("/errors/")?.strip_suffix("/message")?;
    let digits_only = !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit());
    if !digits_only || (index.len() > 1 && index.starts_with('0')) {
        return None;
    }
    Some(index.parse().unwrap_or(usize::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain_key_is_borrowed() {
        assert!(matches!(escape_segment("message"), Cow::Borrowed("message")));
    }

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(escape_segment("a/b"), "a~1b");
        assert_eq!(escape_segment("a~b"), "a~0b");
        assert_eq!(escape_segment("~/"), "~0~1");
    }

    #[test]
    fn test_unescape_reverses_escape() {
        for key in ["plain", "a/b", "a~b", "~1", "~0/~1", ""] {
            assert_eq!(unescape_segment(&escape_segment(key)), key);
        }
    }

    #[test]
    fn test_split_path() {
        assert_eq!(split_path(""), Some(vec![]));
        assert_eq!(
            split_path("/data/report/0"),
            Some(vec!["data".to_string(), "report".to_string(), "0".to_string()])
        );
        assert_eq!(split_path("/a~1b"), Some(vec!["a/b".to_string()]));
        assert_eq!(split_path("/"), Some(vec![String::new()]));
        assert_eq!(split_path("no-leading-slash"), None);
    }

    #[test]
    fn test_error_message_index() {
        assert_eq!(error_message_index("/errors/0/message"), Some(0));
        assert_eq!(error_message_index("/errors/12/message"), Some(12));
        assert_eq!(error_message_index("/errors//message"), None);
        assert_eq!(error_message_index("/errors/x/message"), None);
        assert_eq!(error_message_index("/errors/0/locations/0/line"), None);
        assert_eq!(error_message_index("/data/errors/0/message"), None);
    }

    #[test]
    fn test_error_message_index_rejects_leading_zeros() {
        assert_eq!(error_message_index("/errors/00/message"), None);
        assert_eq!(error_message_index("/errors/07/message"), None);
        assert_eq!(error_message_index("/errors/10/message"), Some(10));
    }

    #[test]
    fn test_error_message_index_overflow_is_still_detected() {
        let path = format!("/errors/{}0/message", usize::MAX);
        assert_eq!(error_message_index(&path), Some(usize::MAX));
    }
}
