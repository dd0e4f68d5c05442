// src/core/mod.rs
//! Configuration and file system services shared by the CLI and the web server

pub mod config_manager;
pub mod fs_ops;

pub use config_manager::ConfigManager;
pub use fs_ops::FsOps;
