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

//! Configuration for building a catalog.
//!
//! [`Options`] is the loosely specified input, typically read from a
//! JSON file and amended with command line flags. It is turned into a
//! [`Config`] exactly once by [`Options::resolve`], which fills in
//! defaults and validates the result.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Package name used when neither a package nor a domain is given.
pub const UNNAMED_PACKAGE: &str = "unnamed project";

/// Positions of the gettext arguments of a template helper.
///
/// Positions are zero-based indices into the positional arguments of
/// the helper call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArgumentRoles {
    #[serde(default)]
    pub msgctxt: Option<usize>,
    pub msgid: usize,
    #[serde(default)]
    pub msgid_plural: Option<usize>,
}

impl ArgumentRoles {
    /// Roles for a helper taking only a message.
    pub const fn singular(msgid: usize) -> Self {
        Self {
            msgctxt: None,
            msgid,
            msgid_plural: None,
        }
    }

    /// The number of positional arguments the helper needs.
    pub fn arity(&self) -> usize {
        [self.msgctxt, Some(self.msgid), self.msgid_plural]
            .into_iter()
            .flatten()
            .max()
            .map_or(0, |position| position + 1)
    }
}

/// Mapping from helper name to its argument roles.
pub type HelperRoles = BTreeMap<String, ArgumentRoles>;

/// The helpers understood out of the box: `_` (gettext), `p_`
/// (pgettext), `n_` (ngettext), and `np_` (npgettext).
pub fn default_helper_roles() -> HelperRoles {
    HelperRoles::from([
        (String::from("_"), ArgumentRoles::singular(0)),
        (
            String::from("p_"),
            ArgumentRoles {
                msgctxt: Some(0),
                msgid: 1,
                msgid_plural: None,
            },
        ),
        (
            String::from("n_"),
            ArgumentRoles {
                msgctxt: None,
                msgid: 0,
                msgid_plural: Some(1),
            },
        ),
        (
            String::from("np_"),
            ArgumentRoles {
                msgctxt: Some(0),
                msgid: 1,
                msgid_plural: Some(2),
            },
        ),
    ])
}

/// Extra headers written when no `headers` are configured.
pub fn default_headers() -> BTreeMap<String, String> {
    [
        ("X-Poedit-Basepath", ".."),
        ("X-Poedit-SourceCharset", "UTF-8"),
        ("X-Poedit-SearchPath-0", "."),
        ("X-Poedit-SearchPathExcluded-0", "*.js"),
    ]
    .into_iter()
    .map(|(key, value)| (String::from(key), String::from(value)))
    .collect()
}

/// Unresolved catalog options.
///
/// All fields are optional. A configured `headers` map replaces the
/// default headers as a whole, it is not merged with them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Options {
    /// Prefix removed from template paths in `#:` comments.
    pub base_path: Option<String>,
    pub headers: Option<BTreeMap<String, String>>,
    pub include_default_headers: Option<bool>,
    pub package: Option<String>,
    /// Fallback for `package`.
    pub domain: Option<String>,
    /// Value of the `Report-Msgid-Bugs-To` header.
    pub bug_report: Option<String>,
    /// Value of the `Last-Translator` header.
    pub last_translator: Option<String>,
    /// Value of the `Language-Team` header.
    pub team: Option<String>,
    pub helper_roles: Option<HelperRoles>,
}

impl Options {
    /// Read options from a JSON file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Could not parse {}", path.display()))
    }

    /// Fill in defaults and validate the options.
    pub fn resolve(self) -> anyhow::Result<Config> {
        let package = self
            .package
            .filter(|package| !package.is_empty())
            .or(self.domain.filter(|domain| !domain.is_empty()))
            .unwrap_or_else(|| String::from(UNNAMED_PACKAGE));

        let mut headers = self.headers.unwrap_or_else(default_headers);
        let convenience_headers = [
            ("Report-Msgid-Bugs-To", self.bug_report),
            ("Last-Translator", self.last_translator),
            ("Language-Team", self.team),
        ];
        for (key, value) in convenience_headers {
            if let Some(value) = value.filter(|value| !value.is_empty()) {
                headers.insert(String::from(key), value);
            }
        }
        for (key, value) in &headers {
            if key.is_empty() || key.contains([':', '\n']) || value.contains('\n') {
                bail!("Invalid header {key:?}: {value:?}");
            }
        }

        let helper_roles = self.helper_roles.unwrap_or_else(default_helper_roles);
        for (helper, roles) in &helper_roles {
            if helper.is_empty() || helper.contains(char::is_whitespace) {
                bail!("Invalid helper name {helper:?}");
            }
            if roles.msgctxt == Some(roles.msgid)
                || roles.msgid_plural == Some(roles.msgid)
                || (roles.msgctxt.is_some() && roles.msgctxt == roles.msgid_plural)
            {
                bail!("Helper {helper:?} uses the same argument for several roles");
            }
        }

        Ok(Config {
            base_path: self.base_path.unwrap_or_default(),
            headers,
            include_default_headers: self.include_default_headers.unwrap_or(true),
            package,
            helper_roles,
        })
    }
}

/// Resolved configuration, read-only for the whole run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_path: String,
    /// Additional headers, including the convenience ones.
    pub headers: BTreeMap<String, String>,
    pub include_default_headers: bool,
    pub package: String,
    pub helper_roles: HelperRoles,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            headers: default_headers(),
            include_default_headers: true,
            package: String::from(UNNAMED_PACKAGE),
            helper_roles: default_helper_roles(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_defaults() -> anyhow::Result<()> {
        let config = Options::default().resolve()?;
        assert_eq!(config.base_path, "");
        assert_eq!(config.package, UNNAMED_PACKAGE);
        assert!(config.include_default_headers);
        assert_eq!(config.headers, default_headers());
        assert_eq!(config.helper_roles, default_helper_roles());
        Ok(())
    }

    #[test]
    fn test_default_config_matches_default_options() -> anyhow::Result<()> {
        assert_eq!(Config::default(), Options::default().resolve()?);
        Ok(())
    }

    #[test]
    fn test_resolve_package_falls_back_to_domain() -> anyhow::Result<()> {
        let options = Options {
            domain: Some(String::from("messages")),
            ..Options::default()
        };
        assert_eq!(options.resolve()?.package, "messages");

        let options = Options {
            package: Some(String::from("Demo")),
            domain: Some(String::from("messages")),
            ..Options::default()
        };
        assert_eq!(options.resolve()?.package, "Demo");
        Ok(())
    }

    #[test]
    fn test_resolve_headers_replace_defaults() -> anyhow::Result<()> {
        let options = Options {
            headers: Some(BTreeMap::from([(
                String::from("X-Generator"),
                String::from("hbs-xgettext"),
            )])),
            ..Options::default()
        };
        let config = options.resolve()?;
        assert_eq!(
            config.headers.keys().collect::<Vec<_>>(),
            vec!["X-Generator"]
        );
        Ok(())
    }

    #[test]
    fn test_resolve_convenience_headers() -> anyhow::Result<()> {
        let options = Options {
            headers: Some(BTreeMap::from([(
                String::from("Last-Translator"),
                String::from("Nobody"),
            )])),
            bug_report: Some(String::from("bugs@example.com")),
            last_translator: Some(String::from("Jane <jane@example.com>")),
            team: Some(String::from("French <fr@example.com>")),
            ..Options::default()
        };
        let config = options.resolve()?;
        assert_eq!(
            config.headers,
            BTreeMap::from([
                (
                    String::from("Language-Team"),
                    String::from("French <fr@example.com>")
                ),
                (
                    String::from("Last-Translator"),
                    String::from("Jane <jane@example.com>")
                ),
                (
                    String::from("Report-Msgid-Bugs-To"),
                    String::from("bugs@example.com")
                ),
            ])
        );
        Ok(())
    }

    #[test]
    fn test_resolve_rejects_overlapping_roles() {
        let options = Options {
            helper_roles: Some(HelperRoles::from([(
                String::from("t"),
                ArgumentRoles {
                    msgctxt: Some(0),
                    msgid: 0,
                    msgid_plural: None,
                },
            )])),
            ..Options::default()
        };
        assert!(options.resolve().is_err());
    }

    #[test]
    fn test_resolve_rejects_bad_header() {
        let options = Options {
            headers: Some(BTreeMap::from([(
                String::from("Bad: Key"),
                String::from("value"),
            )])),
            ..Options::default()
        };
        assert!(options.resolve().is_err());
    }

    #[test]
    fn test_arity() {
        assert_eq!(ArgumentRoles::singular(0).arity(), 1);
        assert_eq!(default_helper_roles()["np_"].arity(), 3);
    }

    #[test]
    fn test_options_from_file() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let path = tmpdir.path().join("xgettext.json");
        fs::write(
            &path,
            r#"{
                "base-path": "/project/",
                "package": "Demo",
                "include-default-headers": false,
                "helper-roles": {
                    "t": { "msgid": 0 },
                    "tn": { "msgid": 0, "msgid_plural": 1 }
                }
            }"#,
        )?;

        let config = Options::from_file(&path)?.resolve()?;
        assert_eq!(config.base_path, "/project/");
        assert_eq!(config.package, "Demo");
        assert!(!config.include_default_headers);
        assert_eq!(
            config.helper_roles,
            HelperRoles::from([
                (String::from("t"), ArgumentRoles::singular(0)),
                (
                    String::from("tn"),
                    ArgumentRoles {
                        msgctxt: None,
                        msgid: 0,
                        msgid_plural: Some(1),
                    }
                ),
            ])
        );
        Ok(())
    }

    #[test]
    fn test_options_from_file_unknown_field() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let path = tmpdir.path().join("xgettext.json");
        fs::write(&path, r#"{ "pakage": "Typo" }"#)?;
        assert!(Options::from_file(&path).is_err());
        Ok(())
    }
}
