//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Database: SQLite joke store
//! - Adapters: Chat session implementations (console)
//! - Shutdown: Ctrl+C handling

pub mod config;
pub mod database;
pub mod adapters;
pub mod shutdown;
