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

//! Rendering of POT text.
//!
//! Everything here is pure: the functions take resolved values and
//! return lines of text. Lines are joined with `\n` by the caller.

use crate::config::Config;
use crate::escape::escape_quotes;
use crate::extract::TranslationCallRecord;
use crate::paths::{source_reference, unify_separators};

/// Plural rule written to every catalog.
pub const PLURAL_FORMS: &str = "nplurals=2; plural=(n != 1);";

/// A message as it is written to the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationEntry {
    /// Source references of the form `path:line`.
    pub sources: Vec<String>,
    pub msgid: String,
    pub msgid_plural: Option<String>,
    pub msgctxt: Option<String>,
}

impl TranslationEntry {
    /// Build an entry for a call found in the template at `path`.
    pub fn from_record(path: &str, record: TranslationCallRecord) -> Self {
        Self {
            sources: record
                .line_numbers
                .iter()
                .map(|&lineno| source_reference(path, lineno))
                .collect(),
            msgid: record.msgid,
            msgid_plural: record.msgid_plural,
            msgctxt: record.msgctxt,
        }
    }

    /// An empty plural counts as no plural.
    pub fn is_plural(&self) -> bool {
        self.msgid_plural.as_deref().is_some_and(|plural| !plural.is_empty())
    }

    /// The context, unless it is missing or empty.
    pub fn context(&self) -> Option<&str> {
        self.msgctxt.as_deref().filter(|msgctxt| !msgctxt.is_empty())
    }
}

/// The message fields which may span several lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Msgid,
    MsgidPlural,
}

impl Field {
    pub fn tag(self) -> &'static str {
        match self {
            Field::Msgid => "msgid",
            Field::MsgidPlural => "msgid_plural",
        }
    }
}

/// Render an escaped message field.
///
/// An empty value gives no lines at all. A value with newlines is
/// written as an empty first string followed by one string per line,
/// with a `\n` escape at the end of all but the last line.
///
/// # Examples
///
/// ```
/// use hbs_xgettext::pot::{field_lines, Field};
///
/// assert_eq!(field_lines(Field::Msgid, "Hello"), ["msgid \"Hello\""]);
/// assert_eq!(
///     field_lines(Field::Msgid, "Line1\nLine2"),
///     ["msgid \"\"", "\"Line1\\n\"", "\"Line2\""]
/// );
/// assert!(field_lines(Field::MsgidPlural, "").is_empty());
/// ```
pub fn field_lines(field: Field, value: &str) -> Vec<String> {
    let tag = field.tag();
    if value.is_empty() {
        return Vec::new();
    }
    if !value.contains('\n') {
        return vec![format!("{tag} \"{value}\"")];
    }

    let rows = value.split('\n').collect::<Vec<_>>();
    let last = rows.len() - 1;
    let mut lines = vec![format!("{tag} \"\"")];
    lines.extend(rows.iter().enumerate().map(|(idx, row)| {
        let line_break = if idx == last { "" } else { "\\n" };
        format!("\"{row}{line_break}\"")
    }));
    lines
}

/// Render the empty translation of a message, followed by a blank
/// line.
pub fn msgstr_lines(plural: bool) -> Vec<String> {
    let placeholders: &[&str] = if plural {
        &["msgstr[0] \"\"", "msgstr[1] \"\""]
    } else {
        &["msgstr \"\""]
    };
    placeholders
        .iter()
        .map(|line| String::from(*line))
        .chain(std::iter::once(String::new()))
        .collect()
}

/// Render a complete catalog entry.
pub fn entry_lines(entry: &TranslationEntry) -> Vec<String> {
    let mut lines = vec![format!(
        "#: {}",
        unify_separators(&entry.sources.join(", "))
    )];
    if let Some(msgctxt) = entry.context() {
        lines.push(format!("msgctxt \"{}\"", escape_quotes(msgctxt)));
    }
    lines.extend(field_lines(Field::Msgid, &escape_quotes(&entry.msgid)));
    if let Some(msgid_plural) = &entry.msgid_plural {
        lines.extend(field_lines(
            Field::MsgidPlural,
            &escape_quotes(msgid_plural),
        ));
    }
    lines.extend(msgstr_lines(entry.is_plural()));
    lines
}

fn header_field(key: &str, value: &str) -> String {
    format!("\"{key}: {}\\n\"", escape_quotes(value))
}

/// Render the catalog preamble: copyright comments and the header
/// entry, terminated by a blank line.
///
/// Additional headers are written sorted by key, between the fixed
/// MIME headers and the `Plural-Forms` header.
pub fn header(config: &Config, year: i32) -> String {
    let package = &config.package;
    let mut lines = vec![
        format!("# Copyright (C) {year} {package}"),
        format!("# This file is distributed under the same license as the {package} package."),
        String::from("msgid \"\""),
        String::from("msgstr \"\""),
        header_field("Project-Id-Version", package),
        header_field("MIME-Version", "1.0"),
        header_field("Content-Type", "text/plain; charset=UTF-8"),
        header_field("Content-Transfer-Encoding", "8bit"),
    ];
    if config.include_default_headers {
        // Sorted by key: `headers` is a `BTreeMap`.
        lines.extend(
            config
                .headers
                .iter()
                .map(|(key, value)| header_field(key, value)),
        );
    }
    lines.push(header_field("Plural-Forms", PLURAL_FORMS));

    let mut header = lines.join("\n");
    header.push_str("\n\n");
    header
}
