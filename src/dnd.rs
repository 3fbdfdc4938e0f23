//! Drag-and-drop over a terminal.
//!
//! Terminals deliver a file dropped on the window as a bracketed paste of
//! its path: shell-quoted (`'/tmp/my file.txt'`), backslash-escaped
//! (`/tmp/my\ file.txt`) or as a `file://` URI, with several files
//! separated by spaces or newlines. A paste counts as a drop only when
//! every token in it looks like a path. A bare token with no quoting or
//! escaping is taken as a path only when it names an existing file, so
//! pasting `/etc/hosts` as text still inserts it.

use std::path::PathBuf;

use url::Url;

/// Paths carried by a paste payload, or an empty list when the payload
/// is ordinary text.
pub fn parse_drop_payload(payload: &str) -> Vec<PathBuf> {
    let tokens = split_tokens(payload.trim());
    if tokens.is_empty() {
        return Vec::new();
    }
    let mut paths = Vec::with_capacity(tokens.len());
    for token in &tokens {
        let Some(path) = token.to_path() else {
            return Vec::new();
        };
        paths.push(path);
    }
    paths
}

struct Token {
    text: String,
    /// Neither quoted nor backslash-escaped anywhere.
    bare: bool,
}

impl Token {
    fn to_path(&self) -> Option<PathBuf> {
        if self.text.starts_with("file://") {
            return Url::parse(&self.text).ok()?.to_file_path().ok();
        }
        let path = if let Some(rest) = self.text.strip_prefix("~/") {
            PathBuf::from(std::env::var_os("HOME")?).join(rest)
        } else {
            PathBuf::from(&self.text)
        };
        if !path.is_absolute() || (self.bare && !path.is_file()) {
            return None;
        }
        Some(path)
    }
}

fn split_tokens(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut bare = true;
    let mut quote: Option<char> = None;
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some('\''), c) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(ch);
                in_token = true;
                bare = false;
            }
            (_, '\\') if !cfg!(windows) => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
                in_token = true;
                bare = false;
            }
            (None, c) if c.is_whitespace() => {
                if in_token {
                    tokens.push(Token {
                        text: std::mem::take(&mut current),
                        bare,
                    });
                    in_token = false;
                    bare = true;
                }
            }
            (_, c) => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if in_token {
        tokens.push(Token {
            text: current,
            bare,
        });
    }
    tokens
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;
    use tempfile::tempdir;

    #[test]
    fn test_existing_absolute_path_is_a_drop() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.txt");
        std::fs::write(&file, "").unwrap();
        assert_eq!(
            parse_drop_payload(&format!("  {} \n", file.display())),
            vec![file]
        );
    }

    #[test]
    fn test_bare_path_that_is_not_a_file_is_text() {
        let dir = tempdir().unwrap();
        assert!(parse_drop_payload(&dir.path().join("absent.txt").display().to_string()).is_empty());
        assert!(parse_drop_payload(&dir.path().display().to_string()).is_empty());
    }

    #[test]
    fn test_quoted_path_keeps_spaces() {
        assert_eq!(
            parse_drop_payload("'/tmp/my notes.txt'"),
            vec![PathBuf::from("/tmp/my notes.txt")]
        );
        assert_eq!(
            parse_drop_payload("\"/tmp/my notes.txt\""),
            vec![PathBuf::from("/tmp/my notes.txt")]
        );
    }

    #[test]
    fn test_backslash_escaped_spaces() {
        assert_eq!(
            parse_drop_payload("/tmp/my\\ notes.txt"),
            vec![PathBuf::from("/tmp/my notes.txt")]
        );
    }

    #[test]
    fn test_file_uri_is_percent_decoded() {
        assert_eq!(
            parse_drop_payload("file:///tmp/my%20notes.txt"),
            vec![PathBuf::from("/tmp/my notes.txt")]
        );
        assert_eq!(
            parse_drop_payload("file://localhost/tmp/a.txt"),
            vec![PathBuf::from("/tmp/a.txt")]
        );
    }

    #[test]
    fn test_file_uri_keeps_non_utf8_bytes() {
        assert_eq!(
            parse_drop_payload("file:///tmp/caf%E9.txt"),
            vec![PathBuf::from(OsStr::from_bytes(b"/tmp/caf\xE9.txt"))]
        );
    }

    #[test]
    fn test_invalid_percent_escapes_are_kept_verbatim() {
        assert_eq!(
            parse_drop_payload("file:///tmp/a%+1.txt"),
            vec![PathBuf::from("/tmp/a%+1.txt")]
        );
        assert_eq!(
            parse_drop_payload("file:///tmp/100%zz.txt"),
            vec![PathBuf::from("/tmp/100%zz.txt")]
        );
    }

    #[test]
    fn test_file_uri_with_remote_host_is_not_a_drop() {
        assert!(parse_drop_payload("file://example.com/tmp/a.txt").is_empty());
    }

    #[test]
    fn test_several_files_keep_their_order() {
        assert_eq!(
            parse_drop_payload("'/tmp/a.txt' file:///tmp/b.txt\n'/tmp/c.txt'"),
            vec![
                PathBuf::from("/tmp/a.txt"),
                PathBuf::from("/tmp/b.txt"),
                PathBuf::from("/tmp/c.txt"),
            ]
        );
    }

    #[test]
    fn test_ordinary_text_is_not_a_drop() {
        assert!(parse_drop_payload("hello world").is_empty());
        assert!(parse_drop_payload("/usr/bin is where binaries live").is_empty());
        assert!(parse_drop_payload("relative/path.txt").is_empty());
        assert!(parse_drop_payload("'relative path.txt'").is_empty());
        assert!(parse_drop_payload("   ").is_empty());
    }
}
