//! Scene Outliner - a hierarchical outline view for scene graphs
//!
//! This crate provides functionality for:
//! - Rows with fold arrows, icons and labels laid out by depth
//! - Drag-and-drop reparenting with above/below/inside drop zones
//! - Context menus of object operations
//! - An interactive TUI and a plain-text outline printer

pub mod cli;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod scene;
pub mod tree;
pub mod tui;

// Re-export commonly used types
pub use config::Config;
pub use error::{OutlinerError, Result};
