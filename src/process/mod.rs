use std::path::Path;
use std::process::{Command, Stdio};

use log::{debug, info, warn};

#[derive(Clone, Default)]
pub struct ProcessLauncher;

impl ProcessLauncher {
    pub fn new() -> Self {
        Self
    }

    /// Start the game client detached from the launcher.
    pub fn launch(&self, executable: Option<&Path>, args: &[String]) -> Result<(), String> {
        let Some(executable) = executable else {
            warn!("launch: no game executable configured");
            return Err("no game executable configured".into());
        };
        if !executable.exists() {
            warn!("launch: client not found at {}", executable.display());
            return Err(format!(
                "game client not found at {}",
                executable.display()
            ));
        }

        info!("launch: starting {}", executable.display());
        debug!("launch: args={:?}", args);

        let mut cmd = Command::new(executable);
        cmd.args(args);
        if let Some(dir) = executable.parent() {
            cmd.current_dir(dir);
        }

        #[cfg(target_os = "windows")]
        {
            use std::os::windows::process::CommandExt;
            // CREATE_NO_WINDOW | DETACHED_PROCESS
            cmd.creation_flags(0x08000000 | 0x00000008);
        }

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());

        cmd.spawn()
            .map_err(|e| format!("failed to start game process: {e}"))?;
        info!("launch: process started");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refuses_without_executable() {
        let err = ProcessLauncher::new().launch(None, &[]).unwrap_err();
        assert!(err.contains("no game executable"));
    }

    #[test]
    fn refuses_missing_executable() {
        let path = Path::new("/nonexistent/cafe-launcher/game");
        let err = ProcessLauncher::new().launch(Some(path), &[]).unwrap_err();
        assert!(err.contains("not found"));
    }
}
