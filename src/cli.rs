//! Command-line interface for `nsu`.
//!
//! Uses lexopt for minimal binary size overhead. Options go before the
//! subcommand; everything after it is passed through untouched, so sed
//! expressions and paths starting with `-` need no escaping.

use std::ffi::OsString;
use std::path::PathBuf;

use serde::Serialize;

use crate::execution::{CommandResult, RunOptions};
use crate::paths;
use crate::shell::Shell;

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Directory to run in instead of the process working directory.
    pub dir: Option<PathBuf>,
    /// Capture command output instead of streaming it.
    pub quiet: bool,
    /// Report nonzero exits as results rather than errors.
    pub no_block: bool,
    /// Print results as JSON.
    pub json: bool,
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
    /// What to do.
    pub action: Option<Action>,
}

impl Args {
    /// Run options implied by `--quiet` and `--no-block`.
    pub fn run_options(&self) -> RunOptions {
        RunOptions::default()
            .blocking(!self.no_block)
            .with_quiet(self.quiet || self.json)
    }
}

/// A subcommand and its operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Run(String),
    Mkdir(Vec<String>),
    Cp { src: String, dests: Vec<String> },
    Rm(Vec<String>),
    Ln { src: String, dest: String },
    Sed { expr: String, file: String },
    Bglob(String),
    Aglob(String),
    Expand(Vec<String>),
    Pjoin(Vec<String>),
    Basename(String),
    Stem(String),
}

impl Action {
    fn parse(name: &str, mut operands: Vec<String>) -> Result<Self, ArgsError> {
        let exactly = |operands: Vec<String>, n: usize, what: &'static str| {
            if operands.len() == n {
                Ok(operands)
            } else {
                Err(ArgsError::Operands(name.to_string(), what))
            }
        };
        let at_least = |operands: Vec<String>, n: usize, what: &'static str| {
            if operands.len() >= n {
                Ok(operands)
            } else {
                Err(ArgsError::Operands(name.to_string(), what))
            }
        };

        let action = match name {
            "run" => Self::Run(at_least(operands, 1, "<LINE>...")?.join(" ")),
            "mkdir" => Self::Mkdir(at_least(operands, 1, "<PATH>...")?),
            "cp" => {
                operands = at_least(operands, 2, "<SRC> <DEST>...")?;
                let src = operands.remove(0);
                Self::Cp {
                    src,
                    dests: operands,
                }
            }
            "rm" => Self::Rm(at_least(operands, 1, "<PATH>...")?),
            "ln" => {
                let [src, dest]: [String; 2] = exactly(operands, 2, "<SRC> <DEST>")?
                    .try_into()
                    .map_err(|_| ArgsError::Operands(name.to_string(), "<SRC> <DEST>"))?;
                Self::Ln { src, dest }
            }
            "sed" => {
                let [expr, file]: [String; 2] = exactly(operands, 2, "<EXPR> <FILE>")?
                    .try_into()
                    .map_err(|_| ArgsError::Operands(name.to_string(), "<EXPR> <FILE>"))?;
                Self::Sed { expr, file }
            }
            "bglob" => Self::Bglob(single(exactly(operands, 1, "<PATTERN>")?)),
            "aglob" => Self::Aglob(single(exactly(operands, 1, "<PATTERN>")?)),
            "expand" => Self::Expand(at_least(operands, 1, "<TEXT>...")?),
            "pjoin" => Self::Pjoin(at_least(operands, 1, "<SEGMENT>...")?),
            "basename" => Self::Basename(single(exactly(operands, 1, "<PATH>")?)),
            "stem" => Self::Stem(single(exactly(operands, 1, "<PATH>")?)),
            other => return Err(ArgsError::UnknownCommand(other.to_string())),
        };
        Ok(action)
    }
}

fn single(mut operands: Vec<String>) -> String {
    operands.pop().unwrap_or_default()
}

/// What an action produced, ready for printing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Output {
    /// Nothing to print.
    Done,
    /// One command's outcome.
    Command(CommandResult),
    /// Text values, one per line.
    Lines(Vec<String>),
}

/// Carry out `action` in `sh`.
pub fn dispatch(action: &Action, sh: &Shell, options: RunOptions) -> crate::Result<Output> {
    let output = match action {
        Action::Run(line) => Output::Command(sh.run_with(line, options)?),
        Action::Mkdir(targets) => {
            sh.mkdir_all(targets)?;
            Output::Done
        }
        Action::Cp { src, dests } => {
            sh.cp_to_many(src, dests)?;
            Output::Done
        }
        Action::Rm(targets) => {
            targets.iter().try_for_each(|target| sh.rm(target))?;
            Output::Done
        }
        Action::Ln { src, dest } => {
            sh.ln(src, dest)?;
            Output::Done
        }
        Action::Sed { expr, file } => Output::Command(sh.sed_with(expr, file, options)?),
        Action::Bglob(pattern) => Output::Lines(sh.bglob(pattern)?),
        Action::Aglob(pattern) => Output::Lines(sh.aglob(pattern)?),
        Action::Expand(texts) => Output::Lines(paths::expand_all(texts)),
        Action::Pjoin(segments) => Output::Lines(vec![paths::pjoin(segments)]),
        Action::Basename(path) => Output::Lines(vec![paths::basename(path).to_string()]),
        Action::Stem(path) => Output::Lines(vec![paths::stem(path).to_string()]),
    };
    Ok(output)
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('C') | Long("dir") => {
                result.dir = Some(parser.value()?.parse()?);
            }
            Short('q') | Long("quiet") => {
                result.quiet = true;
            }
            Long("no-block") => {
                result.no_block = true;
            }
            Long("json") => {
                result.json = true;
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Value(val) => {
                let name = val
                    .into_string()
                    .map_err(|v| ArgsError::NotUnicode(v.to_string_lossy().into()))?;
                let mut operands = parser
                    .raw_args()?
                    .map(|raw| {
                        raw.into_string()
                            .map_err(|v| ArgsError::NotUnicode(v.to_string_lossy().into()))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                if operands.first().is_some_and(|first| first == "--") {
                    operands.remove(0);
                }
                result.action = Some(Action::parse(&name, operands)?);
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(result)
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"nsu {version}
Wrappers for common shell commands

USAGE:
    nsu [OPTIONS] <COMMAND> [OPERANDS...]

COMMANDS:
    run <LINE>...           Run a shell line (words are joined with spaces)
    mkdir <PATH>...         Create directories and missing parents
    cp <SRC> <DEST>...      Copy SRC to each DEST (SRC may be a glob)
    rm <PATH>...            Remove recursively; missing paths are fine
    ln <SRC> <DEST>         Create symbolic link DEST pointing to SRC
    sed <EXPR> <FILE>       Edit FILE in place with a sed expression
    bglob <PATTERN>         Print base names of matching files
    aglob <PATTERN>         Print absolute paths of matching files
    expand <TEXT>...        Expand ~ and $VARS
    pjoin <SEGMENT>...      Join path segments
    basename <PATH>         Print the last path component
    stem <PATH>             Print the basename up to its first dot

OPTIONS:
    -C, --dir <DIR>         Run in DIR
    -q, --quiet             Capture output, print it when the command ends
        --no-block          Do not treat a nonzero exit as an error
        --json              Print results as JSON
    -c, --config <FILE>     Path to configuration file (JSON)
    -l, --log-level <LVL>   Log level (error, warn, info, debug, trace)
    -h, --help              Print help
    -V, --version           Print version

ENVIRONMENT VARIABLES:
    NSU_SHELL               Shell used by `run` (overrides config)
    NSU_LOG_LEVEL           Log level (overrides config)
    RUST_LOG                Alternative log level setting

EXAMPLES:
    nsu mkdir build/docs build/dist
    nsu -C docs run make html
    nsu --json -q run git describe --tags
    nsu sed 's/0\.1\.0/0.2.0/g' Cargo.toml
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("nsu {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Lexopt parsing error.
    Lexopt(lexopt::Error),
    /// Unknown subcommand.
    UnknownCommand(String),
    /// Wrong number of operands for a subcommand.
    Operands(String, &'static str),
    /// Argument is not valid UTF-8.
    NotUnicode(String),
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexopt(e) => write!(f, "{}", e),
            Self::UnknownCommand(name) => write!(f, "unknown command: '{}'", name),
            Self::Operands(name, usage) => write!(f, "usage: nsu {} {}", name, usage),
            Self::NotUnicode(arg) => write!(f, "argument is not valid UTF-8: '{}'", arg),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(args: &[&str]) -> Vec<OsString> {
        std::iter::once("nsu")
            .chain(args.iter().copied())
            .map(OsString::from)
            .collect()
    }

    #[test]
    fn test_default_args() {
        let result = parse_args_from(args(&[])).unwrap();
        assert!(result.action.is_none());
        assert!(!result.quiet);
        assert!(!result.no_block);
        assert_eq!(result.run_options(), RunOptions::default());
    }

    #[test]
    fn test_run_joins_words() {
        let result = parse_args_from(args(&["run", "echo", "hello", "world"])).unwrap();
        assert_eq!(result.action, Some(Action::Run("echo hello world".into())));
    }

    #[test]
    fn test_options_before_command() {
        let result =
            parse_args_from(args(&["-C", "/tmp", "-q", "--no-block", "run", "false"])).unwrap();
        assert_eq!(result.dir, Some(PathBuf::from("/tmp")));
        assert!(result.quiet);
        assert_eq!(result.run_options(), RunOptions::quiet().blocking(false));
    }

    #[test]
    fn test_operands_are_not_options() {
        let result = parse_args_from(args(&["sed", "-n", "file"])).unwrap();
        assert_eq!(
            result.action,
            Some(Action::Sed {
                expr: "-n".into(),
                file: "file".into()
            })
        );
    }

    #[test]
    fn test_double_dash_is_dropped() {
        let result = parse_args_from(args(&["rm", "--", "-weird"])).unwrap();
        assert_eq!(result.action, Some(Action::Rm(vec!["-weird".into()])));
    }

    #[test]
    fn test_cp_multiple_destinations() {
        let result = parse_args_from(args(&["cp", "a", "b", "c"])).unwrap();
        assert_eq!(
            result.action,
            Some(Action::Cp {
                src: "a".into(),
                dests: vec!["b".into(), "c".into()]
            })
        );
    }

    #[test]
    fn test_wrong_operand_count() {
        assert!(matches!(
            parse_args_from(args(&["ln", "only-one"])),
            Err(ArgsError::Operands(_, _))
        ));
        assert!(matches!(
            parse_args_from(args(&["cp", "src"])),
            Err(ArgsError::Operands(_, _))
        ));
        assert!(matches!(
            parse_args_from(args(&["stem"])),
            Err(ArgsError::Operands(_, _))
        ));
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_args_from(args(&["frobnicate"])).unwrap_err();
        assert!(err.to_string().contains("frobnicate"));
    }

    #[test]
    fn test_help_and_version_flags() {
        assert!(parse_args_from(args(&["-h"])).unwrap().help);
        assert!(parse_args_from(args(&["--help"])).unwrap().help);
        assert!(parse_args_from(args(&["-V"])).unwrap().version);
    }

    #[test]
    fn test_unknown_option() {
        assert!(parse_args_from(args(&["--bogus"])).is_err());
    }

    #[test]
    fn test_json_implies_capture() {
        let result = parse_args_from(args(&["--json", "run", "true"])).unwrap();
        assert!(result.run_options().quiet);
    }

    #[test]
    fn test_dispatch_pure_actions() {
        let sh = Shell::at("/");
        assert_eq!(
            dispatch(&Action::Stem("/a/b.tar.gz".into()), &sh, RunOptions::default()).unwrap(),
            Output::Lines(vec!["b".into()])
        );
        assert_eq!(
            dispatch(
                &Action::Pjoin(vec!["a/".into(), "b".into()]),
                &sh,
                RunOptions::default()
            )
            .unwrap(),
            Output::Lines(vec!["a/b".into()])
        );
    }

    #[test]
    fn test_dispatch_run_captures() {
        let dir = tempfile::tempdir().unwrap();
        let sh = Shell::at(dir.path());
        let output = dispatch(&Action::Run("echo X".into()), &sh, RunOptions::quiet()).unwrap();
        match output {
            Output::Command(result) => assert_eq!(result.stdout.as_deref(), Some("X\n")),
            other => panic!("unexpected output: {other:?}"),
        }
    }
}
