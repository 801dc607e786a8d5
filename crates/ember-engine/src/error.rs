//! Fatal driver errors.
//!
//! Initialization and window-creation failures are fatal and surfaced to the
//! caller; there is no retry policy. A failure inside the frame callback is
//! also surfaced, but only after window + platform teardown has completed.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The windowing platform could not be initialized.
    #[error("platform initialization failed")]
    Init(#[source] anyhow::Error),

    /// The window or its graphics context could not be created.
    #[error("window creation failed")]
    WindowCreation(#[source] anyhow::Error),

    /// The graphics device failed irrecoverably while running.
    #[error("graphics device failure")]
    Device(#[source] anyhow::Error),

    /// The frame callback returned an error.
    ///
    /// Teardown has already run by the time this reaches the caller.
    #[error("frame callback failed")]
    Frame(#[source] anyhow::Error),
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
