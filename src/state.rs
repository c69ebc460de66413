//! Shared application state.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::toolchain::Toolchain;

/// Configuration and collaborators shared by all handlers, immutable after
/// startup.
pub struct AppState {
    /// Compiler seam; the shipped binary runs `tinygo` through this.
    pub toolchain: Arc<dyn Toolchain>,
    /// Directory requests are resolved against and builds run in.
    pub workdir: PathBuf,
    /// Package path handed to the compiler, `.` when none was given.
    pub target: String,
    /// Comma-separated build tags, empty for none.
    pub tags: String,
    /// Strip debug symbols from the produced binary.
    pub no_debug: bool,
    out_dir: OnceCell<PathBuf>,
}

impl AppState {
    pub fn new(
        toolchain: Arc<dyn Toolchain>,
        workdir: PathBuf,
        target: Option<String>,
        tags: String,
        no_debug: bool,
    ) -> Self {
        Self {
            toolchain,
            workdir,
            target: target.unwrap_or_else(|| String::from(".")),
            tags,
            no_debug,
            out_dir: OnceCell::new(),
        }
    }

    /// Returns the build output directory, creating it on first use.
    ///
    /// Every build in this process writes into the same directory. The cell
    /// serializes concurrent first requests, so exactly one directory is
    /// created, and `keep()` detaches it from tempfile's cleanup: the
    /// directory lives until the OS reclaims its temp space.
    pub async fn ensure_out_dir(&self) -> io::Result<&Path> {
        let dir = self
            .out_dir
            .get_or_try_init(|| async {
                tempfile::Builder::new()
                    .prefix("wasmserve")
                    .tempdir()
                    .map(|dir| dir.keep())
            })
            .await?;
        Ok(dir.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolchain::{CommandOutput, Toolchain};
    use async_trait::async_trait;

    struct NoopToolchain;

    #[async_trait]
    impl Toolchain for NoopToolchain {
        async fn run(&self, _args: &[String], _workdir: &Path) -> io::Result<CommandOutput> {
            Ok(CommandOutput {
                output: Vec::new(),
                success: true,
            })
        }
    }

    #[tokio::test]
    async fn out_dir_is_created_once_and_reused() {
        let state = AppState::new(
            Arc::new(NoopToolchain),
            PathBuf::from("."),
            None,
            String::new(),
            false,
        );

        let first = state.ensure_out_dir().await.unwrap().to_path_buf();
        let second = state.ensure_out_dir().await.unwrap().to_path_buf();
        assert_eq!(first, second);
        assert!(first.is_dir());
    }

    #[test]
    fn missing_target_defaults_to_current_directory() {
        let state = AppState::new(
            Arc::new(NoopToolchain),
            PathBuf::from("."),
            None,
            String::new(),
            false,
        );
        assert_eq!(state.target, ".");
    }
}
