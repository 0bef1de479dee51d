use log::{error, info};
use tokio::sync::mpsc;

use crate::engine::state::{AppState, UserAction};
use crate::process::ProcessLauncher;
use crate::storage::LauncherConfig;

pub mod state;

pub struct LauncherEngine {
    pub state: AppState,
    process: ProcessLauncher,
    config: LauncherConfig,
}

impl LauncherEngine {
    pub fn new(process: ProcessLauncher, config: LauncherConfig) -> Self {
        Self {
            state: AppState::Idle,
            process,
            config,
        }
    }

    pub fn handle_action(&mut self, action: UserAction, updates: &mpsc::UnboundedSender<AppState>) {
        match action {
            UserAction::ClickLaunch => {
                info!("action: ClickLaunch");
                self.set_state(AppState::Launching { progress: 0.0 }, updates);
                match self
                    .process
                    .launch(self.config.game_executable.as_deref(), &self.config.game_args)
                {
                    Ok(()) => {
                        self.set_state(AppState::Launching { progress: 100.0 }, updates);
                        info!("game launched successfully");
                    }
                    Err(err) => {
                        error!("launch failed: {err}");
                        self.set_state(AppState::Error(err), updates);
                    }
                }
            }
        }
    }

    fn set_state(&mut self, state: AppState, updates: &mpsc::UnboundedSender<AppState>) {
        self.state = state.clone();
        updates.send(state).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn drain(rx: &mut mpsc::UnboundedReceiver<AppState>) -> Vec<AppState> {
        let mut out = Vec::new();
        while let Ok(state) = rx.try_recv() {
            out.push(state);
        }
        out
    }

    #[test]
    fn launch_without_executable_reports_error() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut engine = LauncherEngine::new(ProcessLauncher::new(), LauncherConfig::default());

        engine.handle_action(UserAction::ClickLaunch, &tx);

        let states = drain(&mut rx);
        assert_eq!(states[0], AppState::Launching { progress: 0.0 });
        assert!(matches!(states.last(), Some(AppState::Error(_))));
        assert!(matches!(engine.state, AppState::Error(_)));
    }

    #[test]
    fn launch_with_missing_client_reports_error() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let config = LauncherConfig {
            game_executable: Some(PathBuf::from("/nonexistent/cafe-launcher/game")),
            ..LauncherConfig::default()
        };
        let mut engine = LauncherEngine::new(ProcessLauncher::new(), config);

        engine.handle_action(UserAction::ClickLaunch, &tx);

        match drain(&mut rx).last() {
            Some(AppState::Error(msg)) => assert!(msg.contains("not found")),
            other => panic!("expected error state, got {other:?}"),
        }
    }
}
