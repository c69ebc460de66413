//! Seam around the external compiler toolchain.

use std::io;
use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;

/// Result of one toolchain invocation: combined output plus whether the
/// process exited with status zero.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Captured stdout followed by stderr.
    pub output: Vec<u8>,
    pub success: bool,
}

/// Collaborator interface over the external compiler.
///
/// async_trait keeps this object safe; handlers hold an `Arc<dyn Toolchain>`
/// so tests can substitute a recording double for the real `tinygo` binary.
#[async_trait]
pub trait Toolchain: Send + Sync {
    /// Runs the toolchain with `args` in `workdir` and captures its output.
    async fn run(&self, args: &[String], workdir: &Path) -> io::Result<CommandOutput>;
}

/// The real TinyGo toolchain, resolved from `PATH`.
#[derive(Debug, Default)]
pub struct Tinygo;

#[async_trait]
impl Toolchain for Tinygo {
    async fn run(&self, args: &[String], workdir: &Path) -> io::Result<CommandOutput> {
        let result = Command::new("tinygo")
            .args(args)
            .current_dir(workdir)
            .output()
            .await?;

        let mut output = result.stdout;
        output.extend_from_slice(&result.stderr);
        Ok(CommandOutput {
            output,
            success: result.status.success(),
        })
    }
}
