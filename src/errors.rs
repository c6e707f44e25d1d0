use thiserror::Error;

/// Why a controller entry point did not complete.
/// Local rejections never reach the network.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControllerError {
    #[error("Search query is empty")]
    EmptyQuery,

    #[error("Please upload some resumes first!")]
    DatabaseNotReady,

    #[error("{0} is already in progress")]
    AlreadyInFlight(&'static str),

    #[error("No files selected")]
    NoFiles,

    #[error("Please enter job description text")]
    EmptyJobDescription,

    #[error("Unsupported file: {0}")]
    UnsupportedFile(String),

    #[error("No item at position {0}")]
    NoSuchItem(usize),

    #[error("{operation} failed: {message}")]
    Remote {
        operation: &'static str,
        message: String,
    },
}

impl ControllerError {
    /// Blocked before any request was made
    pub fn is_local(&self) -> bool {
        !matches!(self, ControllerError::Remote { .. })
    }
}
