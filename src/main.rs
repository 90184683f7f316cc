//! `nsu` binary entry point.

use std::io::Write;
use std::process::ExitCode;

use nix_shell_utils::cli::{self, Output};
use nix_shell_utils::config::Config;
use nix_shell_utils::logging;
use tracing::{debug, error};

fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Try 'nsu --help' for more information.");
            return ExitCode::from(2);
        }
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }
    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }
    let Some(action) = args.action.as_ref() else {
        cli::print_help();
        return ExitCode::from(2);
    };

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let _ = logging::init_with_filter(config.log_filter());
    debug!(version = env!("CARGO_PKG_VERSION"), ?action, "nsu starting");

    let shell = match config.to_shell(&args) {
        Ok(shell) => shell,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli::dispatch(action, &shell, args.run_options()) {
        Ok(output) => print_output(&output, args.json),
        Err(e) => {
            eprintln!("error: {}", e);
            exit_code(e.exit_code().unwrap_or(1))
        }
    }
}

fn print_output(output: &Output, json: bool) -> ExitCode {
    if json {
        match serde_json::to_string_pretty(output) {
            Ok(text) if !matches!(output, Output::Done) => println!("{}", text),
            Ok(_) => {}
            Err(e) => {
                eprintln!("error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    match output {
        Output::Done => ExitCode::SUCCESS,
        Output::Lines(lines) => {
            if !json {
                for line in lines {
                    println!("{}", line);
                }
            }
            ExitCode::SUCCESS
        }
        Output::Command(result) => {
            if !json {
                if let Some(ref stdout) = result.stdout {
                    print!("{}", stdout);
                    let _ = std::io::stdout().flush();
                }
                if let Some(ref stderr) = result.stderr {
                    eprint!("{}", stderr);
                }
            }
            exit_code(result.exit_code)
        }
    }
}

fn exit_code(code: i32) -> ExitCode {
    match u8::try_from(code) {
        Ok(code) => ExitCode::from(code),
        Err(_) => ExitCode::FAILURE,
    }
}
