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

//! Extract translatable strings from Handlebars templates into a GNU
//! Gettext POT file.
//!
//! Templates mark translatable strings with helpers such as
//! `{{_ "Hello"}}`, `{{p_ "context" "Hello"}}`, `{{n_ "One" "Many"
//! count}}` and `{{np_ "context" "One" "Many" count}}`. An
//! [`Extractor`] finds these calls in each template and
//! [`create_catalog`] folds the results, template by template and in
//! the given order, into a single catalog.
//!
//! ```
//! use hbs_xgettext::{create_catalog, HandlebarsExtractor, Options, SourceInput};
//!
//! let config = Options {
//!     base_path: Some(String::from("/project/")),
//!     package: Some(String::from("Demo")),
//!     ..Options::default()
//! }
//! .resolve()?;
//! let inputs = [SourceInput::buffer(
//!     "/project/templates/a.hbs",
//!     "<p>\n\n{{_ \"Hello\"}}</p>\n",
//! )];
//!
//! let output = create_catalog(&config, &HandlebarsExtractor, inputs)?;
//! assert!(output
//!     .artifact
//!     .contents
//!     .ends_with("#: templates/a.hbs:3\nmsgid \"Hello\"\nmsgstr \"\"\n\n"));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod document;
pub mod escape;
pub mod extract;
pub mod paths;
pub mod pot;

pub use config::{Config, Options};
pub use document::{create_catalog, CatalogOutput, Contents, InputError, PotArtifact, SourceInput};
pub use extract::{Extraction, Extractor, HandlebarsExtractor, TranslationCallRecord};
