//! Command implementations that live outside the CLI dispatch layer.

pub mod init;
