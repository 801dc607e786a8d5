//! Logger initialization.
//!
//! Centralizes `env_logger` setup behind the `log` facade so binaries only
//! call one function early in `main`.

mod init;

pub use init::{LoggingConfig, init_logging};
