// Copyright 2023 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Quoting of strings embedded in POT files.

/// Escape bare double quotes in `text`.
///
/// The text is scanned once from left to right. A backslash and the
/// character following it are copied as an already escaped pair, so
/// input which has been escaped before passes through unchanged. Only
/// quotes which are not part of such a pair are prefixed with a
/// backslash.
///
/// # Examples
///
/// ```
/// use hbs_xgettext::escape::escape_quotes;
///
/// assert_eq!(escape_quotes(r#"Say "hi""#), r#"Say \"hi\""#);
/// assert_eq!(escape_quotes(r#"Say \"hi\""#), r#"Say \"hi\""#);
/// ```
pub fn escape_quotes(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                escaped.push('\\');
                if let Some(next) = chars.next() {
                    escaped.push(next);
                }
            }
            '"' => escaped.push_str("\\\""),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_quotes_plain_text() {
        assert_eq!(escape_quotes("Hello, world!"), "Hello, world!");
    }

    #[test]
    fn test_escape_quotes_empty() {
        assert_eq!(escape_quotes(""), "");
    }

    #[test]
    fn test_escape_quotes_bare_quote() {
        assert_eq!(escape_quotes(r#"a "b" c"#), r#"a \"b\" c"#);
    }

    #[test]
    fn test_escape_quotes_pre_escaped() {
        let text = r#"a \"b\" c"#;
        assert_eq!(escape_quotes(text), text);
    }

    #[test]
    fn test_escape_quotes_other_escapes_untouched() {
        assert_eq!(escape_quotes(r"tab\there\n"), r"tab\there\n");
    }

    #[test]
    fn test_escape_quotes_escaped_backslash_before_quote() {
        // The `\\` pair is consumed first, so the quote is bare.
        assert_eq!(escape_quotes(r#"\\""#), r#"\\\""#);
    }

    #[test]
    fn test_escape_quotes_trailing_backslash() {
        assert_eq!(escape_quotes(r"foo\"), r"foo\");
    }

    #[test]
    fn test_escape_quotes_is_idempotent() {
        let once = escape_quotes(r#"He said "no" and \"yes\""#);
        assert_eq!(escape_quotes(&once), once);
    }

    #[test]
    fn test_escape_quotes_multibyte() {
        assert_eq!(escape_quotes("«ö\"ü»"), "«ö\\\"ü»");
    }
}
