use crate::kernel::services::ports::vcs::{ProcessOutput, ProcessRunner};
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Spawns real child processes and waits for them.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> io::Result<ProcessOutput> {
        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .output()?;

        Ok(ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            success: output.status.success(),
        })
    }
}
