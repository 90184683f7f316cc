//! Filesystem globbing relative to a base directory.

use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::debug;

use super::expand::expand;
use super::names::basename;
use crate::Result;

/// Hidden entries are filtered in [`glob_paths`]; the `glob` crate's own
/// leading-dot option rejects them even for `.*`.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Whether `text` contains glob metacharacters.
pub fn has_magic(text: &str) -> bool {
    text.contains(['*', '?', '['])
}

/// Expand `pattern` and glob it, resolving relative patterns against `base`.
///
/// Matches come back absolute and lexically normalized, sorted within each
/// directory. As in a shell, entries starting with `.` only match when the
/// last pattern component starts with `.` too. Unreadable entries are
/// skipped.
pub fn glob_paths(base: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let expanded = expand(pattern);
    let full = if Path::new(&expanded).is_absolute() {
        expanded
    } else {
        let base = Pattern::escape(&base.to_string_lossy());
        format!("{}/{}", base.trim_end_matches('/'), expanded)
    };

    let want_hidden = last_component(&full).starts_with('.');
    let mut matches = Vec::new();
    for entry in glob::glob_with(&full, MATCH_OPTIONS)? {
        match entry {
            Ok(path) if !want_hidden && is_hidden(&path) => {}
            Ok(path) => matches.push(normalize(&path)),
            Err(err) => debug!(error = %err, "skipping unreadable glob entry"),
        }
    }
    Ok(matches)
}

/// Base names of the entries matching `pattern`.
///
/// The order is whatever the `glob` crate yields (currently sorted per
/// directory); callers that need an order should sort.
pub fn bglob_in(base: &Path, pattern: &str) -> Result<Vec<String>> {
    Ok(glob_paths(base, pattern)?
        .iter()
        .map(|path| basename(&path.to_string_lossy()).to_string())
        .collect())
}

/// Absolute paths of the entries matching `pattern`, in the same order as
/// [`bglob_in`].
pub fn aglob_in(base: &Path, pattern: &str) -> Result<Vec<String>> {
    Ok(glob_paths(base, pattern)?
        .iter()
        .map(|path| path.to_string_lossy().into_owned())
        .collect())
}

/// Turn a command argument into the words a shell would pass: the matches
/// when it is a pattern that matches, the argument itself otherwise.
pub fn expand_word(base: &Path, word: &str) -> Result<Vec<String>> {
    let expanded = expand(word);
    if !has_magic(&expanded) {
        return Ok(vec![expanded]);
    }

    let matches = aglob_in(base, &expanded)?;
    if matches.is_empty() {
        return Ok(vec![expanded]);
    }
    Ok(matches)
}

fn last_component(pattern: &str) -> &str {
    let trimmed = pattern.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}

/// Resolve `.` and `..` components without touching the filesystem.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
