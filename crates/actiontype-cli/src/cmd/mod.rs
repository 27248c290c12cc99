pub mod config;
pub mod create;
pub mod format;
pub mod list;
pub mod show;
