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

//! The interface between template parsing and catalog generation.
//!
//! An [`Extractor`] turns the text of one template into an
//! [`Extraction`]: the gettext calls found in the template, keyed by
//! call signature and kept in the order in which each signature was
//! first seen.

use crate::config::HelperRoles;
use std::collections::HashMap;

pub mod handlebars;

pub use handlebars::HandlebarsExtractor;

/// A gettext call found in a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationCallRecord {
    pub msgid: String,
    pub msgid_plural: Option<String>,
    pub msgctxt: Option<String>,
    /// Lines where the call occurs, 1-based. Never empty.
    pub line_numbers: Vec<usize>,
}

/// Gettext calls of one template, in first-seen order.
///
/// Inserting a record under a key which is already present replaces
/// its message fields, while the line numbers of both records are
/// merged. The key keeps the position of its first insertion.
///
/// # Examples
///
/// ```
/// use hbs_xgettext::extract::{Extraction, TranslationCallRecord};
///
/// let mut extraction = Extraction::new();
/// let hello = |line| TranslationCallRecord {
///     msgid: String::from("Hello"),
///     line_numbers: vec![line],
///     ..TranslationCallRecord::default()
/// };
/// extraction.insert(r#"_:"Hello""#, hello(3));
/// extraction.insert(r#"_:"Bye""#, TranslationCallRecord {
///     msgid: String::from("Bye"),
///     line_numbers: vec![4],
///     ..TranslationCallRecord::default()
/// });
/// extraction.insert(r#"_:"Hello""#, hello(7));
///
/// let keys = extraction.iter().map(|(key, _)| key).collect::<Vec<_>>();
/// assert_eq!(keys, [r#"_:"Hello""#, r#"_:"Bye""#]);
/// assert_eq!(extraction.get(r#"_:"Hello""#).unwrap().line_numbers, [3, 7]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    records: Vec<(String, TranslationCallRecord)>,
    positions: HashMap<String, usize>,
}

impl Extraction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `record` under `key`, merging with an earlier record.
    pub fn insert(&mut self, key: impl Into<String>, record: TranslationCallRecord) {
        let key = key.into();
        match self.positions.get(&key) {
            Some(&idx) => {
                let TranslationCallRecord {
                    msgid,
                    msgid_plural,
                    msgctxt,
                    line_numbers,
                } = record;
                let (_, existing) = &mut self.records[idx];
                for lineno in line_numbers {
                    if !existing.line_numbers.contains(&lineno) {
                        existing.line_numbers.push(lineno);
                    }
                }
                existing.msgid = msgid;
                existing.msgid_plural = msgid_plural;
                existing.msgctxt = msgctxt;
            }
            None => {
                self.positions.insert(key.clone(), self.records.len());
                self.records.push((key, record));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&TranslationCallRecord> {
        let idx = *self.positions.get(key)?;
        Some(&self.records[idx].1)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over the records in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TranslationCallRecord)> {
        self.records
            .iter()
            .map(|(key, record)| (key.as_str(), record))
    }
}

impl FromIterator<(String, TranslationCallRecord)> for Extraction {
    fn from_iter<I: IntoIterator<Item = (String, TranslationCallRecord)>>(iter: I) -> Self {
        let mut extraction = Extraction::new();
        for (key, record) in iter {
            extraction.insert(key, record);
        }
        extraction
    }
}

impl IntoIterator for Extraction {
    type Item = (String, TranslationCallRecord);
    type IntoIter = std::vec::IntoIter<(String, TranslationCallRecord)>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// Finds gettext calls in the text of a template.
///
/// Errors are fatal for the whole run: a catalog is never written
/// from a template which could not be parsed.
pub trait Extractor {
    fn extract(&self, source: &str, roles: &HelperRoles) -> anyhow::Result<Extraction>;
}

impl<F> Extractor for F
where
    F: Fn(&str, &HelperRoles) -> anyhow::Result<Extraction>,
{
    fn extract(&self, source: &str, roles: &HelperRoles) -> anyhow::Result<Extraction> {
        self(source, roles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(msgid: &str, line_numbers: &[usize]) -> TranslationCallRecord {
        TranslationCallRecord {
            msgid: String::from(msgid),
            line_numbers: line_numbers.to_vec(),
            ..TranslationCallRecord::default()
        }
    }

    #[test]
    fn test_extraction_keeps_first_seen_order() {
        let extraction = Extraction::from_iter([
            (String::from("b"), record("B", &[1])),
            (String::from("a"), record("A", &[2])),
            (String::from("c"), record("C", &[3])),
        ]);
        assert_eq!(
            extraction.iter().map(|(key, _)| key).collect::<Vec<_>>(),
            vec!["b", "a", "c"]
        );
    }

    #[test]
    fn test_extraction_merges_duplicate_lines() {
        let mut extraction = Extraction::new();
        extraction.insert("k", record("Foo", &[5, 2]));
        extraction.insert("other", record("Bar", &[3]));
        extraction.insert("k", record("Foo", &[2, 9]));

        assert_eq!(extraction.len(), 2);
        assert_eq!(extraction.get("k"), Some(&record("Foo", &[5, 2, 9])));
    }

    #[test]
    fn test_extraction_later_record_wins() {
        let mut extraction = Extraction::new();
        extraction.insert("k", record("Old", &[1]));
        extraction.insert(
            "k",
            TranslationCallRecord {
                msgid: String::from("New"),
                msgctxt: Some(String::from("menu")),
                line_numbers: vec![4],
                ..TranslationCallRecord::default()
            },
        );
        assert_eq!(
            extraction.into_iter().collect::<Vec<_>>(),
            vec![(
                String::from("k"),
                TranslationCallRecord {
                    msgid: String::from("New"),
                    msgid_plural: None,
                    msgctxt: Some(String::from("menu")),
                    line_numbers: vec![1, 4],
                }
            )]
        );
    }

    #[test]
    fn test_closure_extractor() -> anyhow::Result<()> {
        let extractor = |source: &str, _: &HelperRoles| -> anyhow::Result<Extraction> {
            Ok(Extraction::from_iter([(
                String::from(source),
                record(source, &[1]),
            )]))
        };
        let extraction = extractor.extract("Hi", &HelperRoles::new())?;
        assert_eq!(extraction.get("Hi"), Some(&record("Hi", &[1])));
        Ok(())
    }
}
