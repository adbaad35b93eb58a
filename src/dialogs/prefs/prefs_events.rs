//! Preferences/settings events.

#[derive(Clone, Debug)]
pub struct ResetSettingsEvent;

#[derive(Clone, Debug)]
pub struct ToggleSettingsEvent;

#[derive(Clone, Debug)]
pub struct ToggleFullscreenEvent;

/// Leave fullscreen if active (Esc)
#[derive(Clone, Debug)]
pub struct ExitFullscreenEvent;

#[derive(Clone, Debug)]
pub struct ToggleStatusBarEvent;
