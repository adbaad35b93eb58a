pub mod status;

pub use status::StatusBar;
