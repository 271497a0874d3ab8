//! Pure string transformations applied by the text elements

use std::fmt::Write;

/// Characters that are percent-encoded by the whitespace encoder
pub fn is_uri_whitespace(c: char) -> bool {
    c.is_ascii_control() || c == ' '
}

/// Characters that are percent-encoded by the URI characters encoder
pub fn is_uri_reserved(c: char) -> bool {
    is_uri_whitespace(c)
        || matches!(
            c,
            '%' | '!'
                | '#'
                | '$'
                | '&'
                | '\''
                | '('
                | ')'
                | '*'
                | '+'
                | ','
                | ';'
                | '='
                | '@'
                | '['
                | ']'
                | '^'
                | '`'
                | '{'
                | '}'
                | '|'
                | '<'
                | '>'
                | '"'
        )
}

pub fn quote(path: &mut String) {
    path.insert(0, '"');
    path.push('"');
}

/// Quote only paths containing a space
pub fn quote_if_spaced(path: &mut String) {
    if path.contains(' ') {
        quote(path);
    }
}

pub fn email_link(path: &mut String) {
    path.insert(0, '<');
    path.push('>');
}

/// Percent-encode the characters selected by `should_encode`
pub fn percent_encode(path: &mut String, should_encode: fn(char) -> bool) {
    if !path.chars().any(should_encode) {
        return;
    }
    let mut encoded = String::with_capacity(path.len() + 8);
    let mut buf = [0u8; 4];
    for c in path.chars() {
        if should_encode(c) {
            for byte in c.encode_utf8(&mut buf).bytes() {
                let _ = write!(encoded, "%{byte:02X}");
            }
        } else {
            encoded.push(c);
        }
    }
    *path = encoded;
}

pub fn replace_char(path: &mut String, from: char, to: char) {
    if path.contains(from) {
        *path = path.replace(from, &to.to_string());
    }
}

/// Drop the trailing `.ext` of the last path segment. A dot that belongs
/// to a directory name is left alone. The last dot always starts the
/// extension, so a dotfile such as `.bashrc` loses its whole name.
pub fn remove_file_ext(path: &mut String) {
    if let Some(dot) = path.rfind('.') {
        if !path[dot..].contains(['\\', '/']) {
            path.truncate(dot);
        }
    }
}

/// Replace every occurrence of `old_value`; an empty `old_value` is a no-op
pub fn find_replace(path: &mut String, old_value: &str, new_value: &str) {
    if old_value.is_empty() || !path.contains(old_value) {
        return;
    }
    *path = path.replace(old_value, new_value);
}

/// Keep the first or last `num_parts` non-empty segments of `path`.
///
/// Segments are split on both slash kinds and joined back with the first
/// separator found in the path (backslash if there is none). When the first
/// parts are kept, a leading separator run (root or UNC prefix) survives.
pub fn copy_n_path_parts(path: &mut String, num_parts: usize, first: bool) {
    let parts: Vec<&str> = path
        .split(['\\', '/'])
        .filter(|part| !part.is_empty())
        .collect();
    if parts.len() <= num_parts {
        return;
    }

    let separator = path
        .chars()
        .find(|c| matches!(c, '\\' | '/'))
        .unwrap_or('\\');
    let separator = separator.to_string();

    let result = if first {
        let root_len = path.len() - path.trim_start_matches(['\\', '/']).len();
        let mut kept = path[..root_len].to_string();
        kept.push_str(&parts[..num_parts].join(&separator));
        kept
    } else {
        parts[parts.len() - num_parts..].join(&separator)
    };
    *path = result;
}

/// Byte range of the characters `[begin, end)` of `text`, with `end`
/// clamped to the length. Returns `None` when `begin` is past the end.
pub fn char_range(text: &str, begin: usize, end: usize) -> Option<(usize, usize)> {
    let byte_at = |index: usize| {
        text.char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(text.len()))
            .nth(index)
    };
    let start = byte_at(begin)?;
    let stop = byte_at(end).unwrap_or(text.len());
    Some((start, stop.max(start)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(input: &str, f: impl Fn(&mut String)) -> String {
        let mut path = input.to_string();
        f(&mut path);
        path
    }

    #[test]
    fn test_quotes() {
        assert_eq!(apply(r"C:\a", quote), r#""C:\a""#);
        assert_eq!(apply(r"C:\a", quote_if_spaced), r"C:\a");
        assert_eq!(apply(r"C:\a b", quote_if_spaced), r#""C:\a b""#);
        assert_eq!(apply(r"\\srv\share", email_link), r"<\\srv\share>");
    }

    #[test]
    fn test_percent_encoding() {
        assert_eq!(
            apply("/my docs/a\tb", |p| percent_encode(p, is_uri_whitespace)),
            "/my%20docs/a%09b"
        );
        assert_eq!(
            apply("/a b/c#1&100%.txt", |p| percent_encode(p, is_uri_reserved)),
            "/a%20b/c%231%26100%25.txt"
        );
        // Path delimiters and non-ASCII characters are left alone
        assert_eq!(
            apply("C:/été/x", |p| percent_encode(p, is_uri_reserved)),
            "C:/été/x"
        );
    }

    #[test]
    fn test_percent_encoding_delete_and_encoded_input() {
        assert_eq!(apply("a\u{7f}b", |p| percent_encode(p, is_uri_whitespace)), "a%7Fb");
        assert_eq!(apply("a\u{7f}b", |p| percent_encode(p, is_uri_reserved)), "a%7Fb");

        // Input is never decoded first: the whitespace encoder keeps `%20`,
        // the characters encoder escapes its `%` again
        assert_eq!(apply("/a%20b", |p| percent_encode(p, is_uri_whitespace)), "/a%20b");
        assert_eq!(apply("/a%20b", |p| percent_encode(p, is_uri_reserved)), "/a%2520b");
    }

    #[test]
    fn test_slashes() {
        assert_eq!(apply(r"C:\a\b", |p| replace_char(p, '\\', '/')), "C:/a/b");
        assert_eq!(apply("a/b/c", |p| replace_char(p, '/', '\\')), r"a\b\c");
    }

    #[test]
    fn test_remove_file_ext() {
        assert_eq!(apply(r"C:\dir\report.txt", remove_file_ext), r"C:\dir\report");
        assert_eq!(apply(r"C:\dir\archive.tar.gz", remove_file_ext), r"C:\dir\archive.tar");
        assert_eq!(apply(r"C:\dir.v2\readme", remove_file_ext), r"C:\dir.v2\readme");
        assert_eq!(apply("/home/u.x/file", remove_file_ext), "/home/u.x/file");
        assert_eq!(apply(r"C:\dir\.bashrc", remove_file_ext), r"C:\dir\");
    }

    #[test]
    fn test_find_replace() {
        assert_eq!(apply("a-b-c", |p| find_replace(p, "-", "+")), "a+b+c");
        assert_eq!(apply("abc", |p| find_replace(p, "", "x")), "abc");
    }

    #[test]
    fn test_copy_n_path_parts() {
        assert_eq!(apply(r"C:\A\B\C\D.txt", |p| copy_n_path_parts(p, 2, false)), r"C\D.txt");
        assert_eq!(apply(r"C:\A\B\C\D.txt", |p| copy_n_path_parts(p, 2, true)), r"C:\A");
        assert_eq!(apply("/usr/local/bin/tool", |p| copy_n_path_parts(p, 2, true)), "/usr/local");
        assert_eq!(apply(r"\\srv\share\dir\f", |p| copy_n_path_parts(p, 2, true)), r"\\srv\share");
        assert_eq!(apply("a/b", |p| copy_n_path_parts(p, 2, false)), "a/b");
        assert_eq!(apply("a/b/c", |p| copy_n_path_parts(p, 0, false)), "");
    }

    #[test]
    fn test_char_range() {
        assert_eq!(char_range("abcdef", 1, 3), Some((1, 3)));
        assert_eq!(char_range("abc", 1, 10), Some((1, 3)));
        assert_eq!(char_range("abc", 3, 3), Some((3, 3)));
        assert_eq!(char_range("abc", 4, 5), None);
        assert_eq!(char_range("éa", 1, 2), Some((2, 3)));
    }
}
