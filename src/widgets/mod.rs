//! UI Widgets - modular, reusable UI components
//!
//! Each widget is self-contained and communicates via EventBus

pub mod cards;
pub mod file_dialogs;
pub mod form;
pub mod status;
