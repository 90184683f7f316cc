//! Filesystem shims over coreutils.
//!
//! Each shim builds one argument vector and runs it blocking, with output
//! streamed to the terminal. Arguments never pass through a shell, so spaces
//! and metacharacters need no quoting; `~` and `$VAR` are still expanded, and
//! `cp` sources and `rm` targets are globbed the way a shell would.

use tracing::debug;

use super::context::Shell;
use crate::execution::{Command, CommandResult, RunOptions};
use crate::paths::{expand, expand_word};
use crate::Result;

impl Shell {
    /// `mkdir -p path`: create a directory and its missing ancestors.
    pub fn mkdir(&self, path: impl AsRef<str>) -> Result<()> {
        self.coreutil("mkdir", ["-p".to_string(), "--".to_string(), expand(path.as_ref())])
    }

    /// [`mkdir`](Shell::mkdir) each path in order. Stops at the first failure;
    /// directories already created stay.
    pub fn mkdir_all<I, S>(&self, paths: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        paths.into_iter().try_for_each(|path| self.mkdir(path))
    }

    /// `cp src dest`.
    pub fn cp(&self, src: impl AsRef<str>, dest: impl AsRef<str>) -> Result<()> {
        let mut args = vec!["--".to_string()];
        args.extend(expand_word(self.pwd(), src.as_ref())?);
        args.push(expand(dest.as_ref()));
        self.coreutil("cp", args)
    }

    /// Copy `src` to every destination.
    pub fn cp_to_many<I, S>(&self, src: impl AsRef<str>, dests: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let src = src.as_ref();
        dests.into_iter().try_for_each(|dest| self.cp(src, dest))
    }

    /// Copy sources to destinations pairwise. Pairing stops at the end of the
    /// shorter list; the rest of the longer one is ignored.
    pub fn cp_pairs<I, J, S, T>(&self, srcs: I, dests: J) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        srcs.into_iter()
            .zip(dests)
            .try_for_each(|(src, dest)| self.cp(src, dest))
    }

    /// `rm -rf path`. A missing path is not an error.
    pub fn rm(&self, path: impl AsRef<str>) -> Result<()> {
        let mut args = vec!["-rf".to_string(), "--".to_string()];
        args.extend(expand_word(self.pwd(), path.as_ref())?);
        self.coreutil("rm", args)
    }

    /// `ln -s src dest`: create a symbolic link at `dest` pointing to `src`.
    /// Fails if `dest` exists.
    pub fn ln(&self, src: impl AsRef<str>, dest: impl AsRef<str>) -> Result<()> {
        self.coreutil(
            "ln",
            [
                "-s".to_string(),
                "--".to_string(),
                expand(src.as_ref()),
                expand(dest.as_ref()),
            ],
        )
    }

    /// `sed -i expr file`, with output streamed.
    pub fn sed(&self, expr: &str, file: impl AsRef<str>) -> Result<CommandResult> {
        self.sed_with(expr, file, RunOptions::default())
    }

    /// `sed -i expr file` with explicit options.
    pub fn sed_with(
        &self,
        expr: &str,
        file: impl AsRef<str>,
        options: RunOptions,
    ) -> Result<CommandResult> {
        let args = [
            "-i".to_string(),
            "-e".to_string(),
            expr.to_string(),
            "--".to_string(),
            expand(file.as_ref()),
        ];
        self.exec(Command::exec("sed", args), options)
    }

    fn coreutil<I>(&self, program: &str, args: I) -> Result<()>
    where
        I: IntoIterator<Item = String>,
    {
        let result = self.exec(Command::exec(program, args), RunOptions::default())?;
        debug!(command = %result.command, "done");
        Ok(())
    }
}
