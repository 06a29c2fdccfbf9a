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

//! `xgettext` for Handlebars templates
//!
//! This program works like `xgettext`: it extracts translatable
//! strings from the given templates and writes them as a single GNU
//! Gettext POT file, to standard output or to the `--output` file.
//! Templates are processed in the order they are given.

use anyhow::Context;
use clap::Parser;
use hbs_xgettext::{create_catalog, Contents, HandlebarsExtractor, Options, SourceInput};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, Parser)]
#[command(
    name = "hbs-xgettext",
    about = "Extract translatable strings from Handlebars templates into a POT file"
)]
struct Args {
    /// Handlebars templates to extract messages from.
    #[arg(id = "template.hbs", required = true)]
    templates: Vec<PathBuf>,
    /// JSON file with catalog options.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// The POT file to write. Defaults to standard output.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Prefix removed from template paths in source references.
    #[arg(long)]
    base_path: Option<String>,
    #[arg(long)]
    package: Option<String>,
    /// Used as the package name if no package is given.
    #[arg(long)]
    domain: Option<String>,
    /// Address for the `Report-Msgid-Bugs-To` header.
    #[arg(long)]
    bug_report: Option<String>,
    #[arg(long)]
    last_translator: Option<String>,
    #[arg(long)]
    team: Option<String>,
    /// Leave out the additional headers.
    #[arg(long)]
    no_default_headers: bool,
}

/// Load the options file, if any, and apply the command line flags.
fn load_options(args: &Args) -> anyhow::Result<Options> {
    let mut options = match &args.config {
        Some(path) => Options::from_file(path)?,
        None => Options::default(),
    };
    let overrides = [
        (&mut options.base_path, &args.base_path),
        (&mut options.package, &args.package),
        (&mut options.domain, &args.domain),
        (&mut options.bug_report, &args.bug_report),
        (&mut options.last_translator, &args.last_translator),
        (&mut options.team, &args.team),
    ];
    for (option, flag) in overrides {
        if flag.is_some() {
            option.clone_from(flag);
        }
    }
    if args.no_default_headers {
        options.include_default_headers = Some(false);
    }
    Ok(options)
}

/// Read a template. Directories have no contents and `-` is standard
/// input, which cannot be used as a template.
fn read_input(path: &Path) -> anyhow::Result<SourceInput> {
    let name = path.to_string_lossy().into_owned();
    let contents = if name == "-" {
        Contents::Stream(Box::new(io::stdin()))
    } else if path.is_dir() {
        Contents::Null
    } else {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        Contents::Buffer(text)
    };
    Ok(SourceInput {
        path: name,
        contents,
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_options(&args)?
        .resolve()
        .context("Invalid configuration")?;
    let inputs = args
        .templates
        .iter()
        .map(|path| read_input(path))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let output =
        create_catalog(&config, &HandlebarsExtractor, inputs).context("Extracting messages")?;

    match &args.output {
        Some(path) => {
            if let Some(directory) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                fs::create_dir_all(directory)
                    .with_context(|| format!("Could not create {}", directory.display()))?;
            }
            fs::write(path, &output.artifact.contents)
                .with_context(|| format!("Writing messages to {}", path.display()))?;
        }
        None => io::stdout()
            .write_all(output.artifact.contents.as_bytes())
            .context("Writing messages to stdout")?,
    }

    Ok(())
}
