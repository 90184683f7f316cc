//! Leaf-name helpers.

use super::join::pjoin;

/// The component after the last `/`. Empty when `path` ends in `/`.
pub fn basename(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, leaf)| leaf)
}

/// The basename up to its first `.`.
///
/// Unlike [`std::path::Path::file_stem`], every suffix is dropped:
/// `foo.py.old` has stem `foo`.
pub fn stem(path: &str) -> &str {
    let name = basename(path);
    name.split_once('.').map_or(name, |(stem, _)| stem)
}

/// Prepend `root` to every entry of `files`. An empty root leaves the
/// entries unchanged.
pub fn root_files<I, S>(files: I, root: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let files = files.into_iter();
    if root.is_empty() {
        return files.map(|f| f.as_ref().to_string()).collect();
    }
    files.map(|f| pjoin([root, f.as_ref()])).collect()
}
