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

//! Assembly of the POT document from a sequence of templates.

use crate::config::Config;
use crate::extract::Extractor;
use crate::paths::normalize_path;
use crate::pot::{entry_lines, header, TranslationEntry};
use anyhow::{bail, Context};
use chrono::Datelike;
use std::fmt;
use std::io::Read;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

/// Where the catalog is placed. The directory does not exist: there
/// is one catalog per run, not one per template.
pub const SENTINEL_PATH: &str = "non-exist-dir/messages.pot";

/// The contents of a template handed to [`create_catalog`].
pub enum Contents {
    /// No contents at all, e.g. for a directory.
    Null,
    Buffer(String),
    /// A live stream. Not supported: the contents must be in memory.
    Stream(Box<dyn Read>),
}

impl fmt::Debug for Contents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Contents::Null => f.write_str("Null"),
            Contents::Buffer(text) => f.debug_tuple("Buffer").field(text).finish(),
            Contents::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// A template to extract messages from.
#[derive(Debug)]
pub struct SourceInput {
    pub path: String,
    pub contents: Contents,
}

impl SourceInput {
    pub fn buffer(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: Contents::Buffer(text.into()),
        }
    }

    /// Return the path and text of the template.
    fn into_text(self) -> Result<(String, String), InputError> {
        match self.contents {
            Contents::Buffer(text) if !text.is_empty() => Ok((self.path, text)),
            Contents::Null | Contents::Buffer(_) => Err(InputError::Empty { path: self.path }),
            Contents::Stream(_) => Err(InputError::Streaming { path: self.path }),
        }
    }
}

/// A template which was skipped. The rest of the run is not affected.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("{path}: empty file not supported")]
    Empty { path: String },
    #[error("{path}: streaming not supported")]
    Streaming { path: String },
}

/// The finished catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotArtifact {
    pub path: PathBuf,
    pub contents: String,
}

/// The result of a run: the catalog and the templates left out of it.
#[derive(Debug)]
pub struct CatalogOutput {
    pub artifact: PotArtifact,
    pub skipped: Vec<InputError>,
}

/// The catalog text while it is being built.
///
/// The document starts with the header and only ever grows at the
/// end. It is consumed by [`PotDocument::finish`].
#[derive(Debug)]
pub struct PotDocument {
    contents: String,
}

impl PotDocument {
    pub fn new(config: &Config, year: i32) -> Self {
        Self {
            contents: header(config, year),
        }
    }

    /// Append the entries of one template.
    ///
    /// A template with entries is terminated by a blank line; a
    /// template without entries leaves the document unchanged.
    pub fn append_file(mut self, entries: &[TranslationEntry]) -> Self {
        if entries.is_empty() {
            return self;
        }
        let lines = entries.iter().flat_map(entry_lines).collect::<Vec<_>>();
        self.contents.push_str(&lines.join("\n"));
        self.contents.push('\n');
        self
    }

    pub fn finish(self) -> PotArtifact {
        PotArtifact {
            path: PathBuf::from(SENTINEL_PATH),
            contents: self.contents,
        }
    }
}

/// Build a catalog from `inputs`, in order.
///
/// Templates without contents or given as streams are skipped and
/// reported in [`CatalogOutput::skipped`]. Any error from the
/// `extractor` aborts the run.
pub fn create_catalog<I, E>(
    config: &Config,
    extractor: &E,
    inputs: I,
) -> anyhow::Result<CatalogOutput>
where
    I: IntoIterator<Item = SourceInput>,
    E: Extractor + ?Sized,
{
    let year = chrono::Local::now().year();
    build_catalog(config, extractor, inputs, year)
}

fn build_catalog<I, E>(
    config: &Config,
    extractor: &E,
    inputs: I,
    year: i32,
) -> anyhow::Result<CatalogOutput>
where
    I: IntoIterator<Item = SourceInput>,
    E: Extractor + ?Sized,
{
    let mut skipped = Vec::new();
    let document = inputs
        .into_iter()
        .try_fold(PotDocument::new(config, year), |document, input| -> anyhow::Result<_> {
            let (path, text) = match input.into_text() {
                Ok(path_and_text) => path_and_text,
                Err(err) => {
                    warn!("Skipping {err}");
                    skipped.push(err);
                    return Ok(document);
                }
            };

            let extraction = extractor
                .extract(&text, &config.helper_roles)
                .with_context(|| format!("Extracting messages from {path}"))?;
            let relative_path = normalize_path(&path, &config.base_path);
            let entries = extraction
                .into_iter()
                .map(|(key, record)| {
                    if record.line_numbers.is_empty() {
                        bail!("No line numbers for {key} in {path}");
                    }
                    Ok(TranslationEntry::from_record(relative_path, record))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            debug!("Found {} messages in {relative_path}", entries.len());

            Ok(document.append_file(&entries))
        })?;

    Ok(CatalogOutput {
        artifact: document.finish(),
        skipped,
    })
}
