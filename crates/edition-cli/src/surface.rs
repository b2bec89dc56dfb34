//! Share surface backed by an external program.

use std::path::PathBuf;

use edition_clip::{ClipError, SharePayload, ShareResponse, ShareSurface};
use tokio::process::Command;
use tracing::debug;

/// Writes the clip into a staging directory and runs a configured command
/// with the file path as its last argument.
///
/// The share title and text are passed as `SHARE_TITLE` and `SHARE_TEXT`. A
/// non-zero exit status counts as the user dismissing the share.
#[derive(Debug, Clone)]
pub struct CommandShareSurface {
    program: String,
    args: Vec<String>,
    staging_dir: PathBuf,
}

impl CommandShareSurface {
    /// `None` when `command` is empty.
    pub fn new(command: &[String], staging_dir: impl Into<PathBuf>) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
            staging_dir: staging_dir.into(),
        })
    }
}

impl ShareSurface for CommandShareSurface {
    fn supports_files(&self) -> bool {
        true
    }

    async fn share(&self, payload: SharePayload) -> edition_clip::Result<ShareResponse> {
        tokio::fs::create_dir_all(&self.staging_dir)
            .await
            .map_err(ClipError::Share)?;
        let path = self.staging_dir.join(&payload.file.file_name);
        tokio::fs::write(&path, &payload.file.bytes)
            .await
            .map_err(ClipError::Share)?;

        debug!(program = %self.program, file = %path.display(), "running share command");
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(&path)
            .env("SHARE_TITLE", &payload.title)
            .env("SHARE_TEXT", &payload.text)
            .status()
            .await
            .map_err(ClipError::Share)?;

        if status.success() {
            Ok(ShareResponse::Completed)
        } else {
            debug!(%status, "share command declined");
            Ok(ShareResponse::Dismissed)
        }
    }
}
