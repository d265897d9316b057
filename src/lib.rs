//! mouse-storage library
//!
//! Named mouse positions stored per context (application, window title part
//! and mode) and resolved back to screen coordinates through a reference
//! frame: the screen, the active window, or a stored reference point.

pub mod commands;
pub mod config;
pub mod host;
pub mod session;
pub mod storage;
