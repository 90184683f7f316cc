//! Path joining with trailing-separator normalization.

const SEPARATOR: char = '/';

/// Join path segments into a single path without a trailing separator.
///
/// Each non-empty segment is normalized to end in exactly one `/`; empty
/// segments are skipped. No filesystem access.
///
/// ```
/// use nix_shell_utils::paths::pjoin;
///
/// assert_eq!(pjoin(["/home/foo", "bar", "a.txt"]), "/home/foo/bar/a.txt");
/// assert_eq!(pjoin(["", "a", "", "b", ""]), "a/b");
/// ```
pub fn pjoin<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = pjoin_dir(segments);
    joined.pop();
    joined
}

/// Join path segments, keeping the trailing separator.
pub fn pjoin_dir<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = String::new();
    for segment in segments {
        let segment = segment.as_ref();
        if segment.is_empty() {
            continue;
        }
        joined.push_str(segment.trim_end_matches(SEPARATOR));
        joined.push(SEPARATOR);
    }
    joined
}
