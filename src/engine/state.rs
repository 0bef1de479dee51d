// The central source of truth for the launch panel.
#[derive(Clone, Debug, PartialEq)]
pub enum AppState {
    Idle,
    Launching { progress: f32 },
    Error(String),
}

// Actions triggered by the user from the UI layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserAction {
    ClickLaunch,
}
