//! Home directory and environment variable expansion.

use std::borrow::Cow;

/// Expand environment variables, then a leading `~`, in `input`.
///
/// `$NAME` and `${NAME}` are replaced with their values from the process
/// environment. Unset variables are left as written, and so are `$$` and
/// `${NAME:-default}` style forms. A leading `~` or `~/`
/// becomes the home directory; `~user` only does when `user` is the invoking
/// user. Never fails.
///
/// ```
/// use nix_shell_utils::paths::expand;
///
/// assert_eq!(expand("plain/path"), "plain/path");
/// assert_eq!(expand("$NSU_SURELY_UNSET_VAR/x"), "$NSU_SURELY_UNSET_VAR/x");
/// ```
pub fn expand(input: &str) -> String {
    if !input.contains(['~', '$']) {
        return input.to_string();
    }

    let escaped = escape_non_names(input);
    let vars = shellexpand::env_with_context_no_errors(&escaped, |name: &str| std::env::var(name).ok());
    expand_home(&vars).into_owned()
}

/// Expand every entry of `inputs`, preserving order.
pub fn expand_all<I, S>(inputs: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    inputs.into_iter().map(|s| expand(s.as_ref())).collect()
}

/// Double every `$` that does not start a plain `$NAME` or `${NAME}`
/// reference, so `$$` and `${NAME:-default}` come through verbatim.
fn escape_non_names(input: &str) -> Cow<'_, str> {
    if !input.contains("$$") && !input.contains("${") {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 4);
    let mut rest = input;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        if let Some(tail) = after.strip_prefix('$') {
            out.push_str("$$$$");
            rest = tail;
            continue;
        }
        let plain = match after.strip_prefix('{') {
            Some(body) => body.find('}').is_some_and(|end| is_var_name(&body[..end])),
            None => true,
        };
        out.push_str(if plain { "$" } else { "$$" });
        rest = after;
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn is_var_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn home_dir() -> Option<String> {
    dirs::home_dir().map(|path| path.to_string_lossy().into_owned())
}

fn expand_home(input: &str) -> Cow<'_, str> {
    if let Some(rest) = input.strip_prefix('~') {
        let (user, tail) = rest.split_at(rest.find('/').unwrap_or(rest.len()));
        if !user.is_empty() {
            if !is_invoking_user(user) {
                return Cow::Borrowed(input);
            }
            return Cow::Owned(shellexpand::tilde_with_context(&format!("~{tail}"), home_dir).into_owned());
        }
    }
    shellexpand::tilde_with_context(input, home_dir)
}

fn is_invoking_user(name: &str) -> bool {
    ["USER", "LOGNAME"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .any(|user| user == name)
}
