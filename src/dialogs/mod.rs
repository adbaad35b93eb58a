//! Modal and floating windows.

pub mod prefs;
