//! External process execution.
//!
//! Only standard output is captured. There is no timeout and the exit code
//! is ignored: a tool that fails to start simply produces no output.

use std::process::{Command, Stdio};

/// Spawns a command line and returns everything it wrote to stdout.
pub trait ProcessRunner: Send + Sync {
    fn run(&self, args: &[String]) -> Vec<u8>;
}

#[derive(Debug, Default, Clone, Copy)]
/// Runner backed by `std::process::Command`.
///
/// On Windows the command goes through `cmd /C` so that `.bat` wrappers
/// (the usual way PHP tools are installed there) resolve like in a shell.
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, args: &[String]) -> Vec<u8> {
        let Some((program, rest)) = args.split_first() else {
            return Vec::new();
        };
        log::debug!("{}", args.join(" "));
        let mut cmd = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(program);
            c
        } else {
            Command::new(program)
        };
        cmd.args(rest).stdin(Stdio::null()).stderr(Stdio::null());
        match cmd.output() {
            Ok(out) => {
                log::debug!("{} wrote {} bytes", program, out.stdout.len());
                out.stdout
            }
            Err(e) => {
                log::debug!("failed to run {}: {}", program, e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_executable_yields_empty_output() {
        let out = SystemRunner.run(&["phpcheck-no-such-tool-4f1a".to_string()]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_command_line() {
        assert!(SystemRunner.run(&[]).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_stdout_and_ignores_exit_code() {
        let args: Vec<String> = ["sh", "-c", "printf 'x.php:3\tbad'; echo oops >&2; exit 3"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(SystemRunner.run(&args), b"x.php:3\tbad".to_vec());
    }
}
