//! Minimal reader for JSON-with-comments documents such as `tsconfig.json`.
//!
//! Comment candidates are found by pattern scanning. A candidate that starts
//! inside a string literal (`"src/**/*.ts"`, `"https://..."`) is string
//! content and is left in place.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static COMMENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)/\*.*?\*/|//[^\n]*").expect("comment pattern is valid")
});

/// Removes `//` line comments and `/* */` block comments outside string literals.
pub fn strip_json_comments(content: &str) -> Cow<'_, str> {
    let mut output = String::new();
    let mut scanner = StringScanner::default();
    let mut copied = 0;
    let mut scanned = 0;
    let mut search_from = 0;

    while let Some(found) = COMMENT_REGEX.find_at(content, search_from) {
        scanner.advance(&content.as_bytes()[scanned..found.start()]);
        scanned = found.start();
        if scanner.in_string {
            search_from = found.start() + 1;
            continue;
        }

        output.push_str(&content[copied..found.start()]);
        copied = found.end();
        scanned = found.end();
        search_from = found.end();
    }

    if copied == 0 {
        return Cow::Borrowed(content);
    }
    output.push_str(&content[copied..]);
    Cow::Owned(output)
}

/// Tracks whether a byte offset lies inside a JSON string literal.
#[derive(Default)]
struct StringScanner {
    in_string: bool,
    escaped: bool,
}

impl StringScanner {
    fn advance(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            if !self.in_string {
                self.in_string = byte == b'"';
            } else if self.escaped {
                self.escaped = false;
            } else if byte == b'\\' {
                self.escaped = true;
            } else if byte == b'"' {
                self.in_string = false;
            }
        }
    }
}

/// Strips comments and parses the remainder as strict JSON.
pub fn parse_jsonc(content: &str) -> serde_json::Result<Value> {
    serde_json::from_str(&strip_json_comments(content))
}
