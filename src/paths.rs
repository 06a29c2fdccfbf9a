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

//! Source paths as they appear in `#:` reference comments.

/// Strip `base_path` from the front of `path`.
///
/// If a single separator is left at the front after stripping, it is
/// removed too. The path is returned unchanged when it does not start
/// with `base_path`.
///
/// # Examples
///
/// ```
/// use hbs_xgettext::paths::normalize_path;
///
/// assert_eq!(normalize_path("/project/templates/a.hbs", "/project"), "templates/a.hbs");
/// assert_eq!(normalize_path("/elsewhere/a.hbs", "/project"), "/elsewhere/a.hbs");
/// ```
pub fn normalize_path<'a>(path: &'a str, base_path: &str) -> &'a str {
    let Some(relative) = path.strip_prefix(base_path) else {
        return path;
    };
    relative
        .strip_prefix(['/', '\\'])
        .unwrap_or(relative)
}

/// Build a `path:line` source reference.
pub fn source_reference(path: &str, lineno: usize) -> String {
    format!("{path}:{lineno}")
}

/// Replace Windows path separators with forward slashes.
pub fn unify_separators(path: &str) -> String {
    path.replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_path_strips_base_and_separator() {
        assert_eq!(
            normalize_path("/project/templates/a.hbs", "/project/"),
            "templates/a.hbs"
        );
        assert_eq!(
            normalize_path("/project/templates/a.hbs", "/project"),
            "templates/a.hbs"
        );
    }

    #[test]
    fn test_normalize_path_only_one_separator() {
        assert_eq!(normalize_path("/project//a.hbs", "/project"), "/a.hbs");
    }

    #[test]
    fn test_normalize_path_missing_base() {
        assert_eq!(normalize_path("/other/a.hbs", "/project/"), "/other/a.hbs");
    }

    #[test]
    fn test_normalize_path_empty_base() {
        // Without a base, only the leading separator goes away.
        assert_eq!(normalize_path("/a/b.hbs", ""), "a/b.hbs");
        assert_eq!(normalize_path("a/b.hbs", ""), "a/b.hbs");
    }

    #[test]
    fn test_normalize_path_windows() {
        assert_eq!(
            normalize_path(r"C:\work\site\views\index.hbs", r"C:\work\site"),
            r"views\index.hbs"
        );
    }

    #[test]
    fn test_source_reference() {
        assert_eq!(source_reference("a/b.hbs", 3), "a/b.hbs:3");
        assert_eq!(source_reference(r"views\index.hbs", 12), r"views\index.hbs:12");
    }

    #[test]
    fn test_unify_separators() {
        assert_eq!(unify_separators(r"views\partials\nav.hbs"), "views/partials/nav.hbs");
        assert_eq!(unify_separators("views/nav.hbs"), "views/nav.hbs");
    }
}
