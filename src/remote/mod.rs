//! Remote file sources.
//!
//! The download worker only talks to a [`RemoteSource`], so tests can drive
//! it with an in-memory implementation and the app uses [`FtpSource`].

pub mod ftp;

pub use ftp::FtpSource;

use thiserror::Error;

/// Credentials and location of the station's file share
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConnectionRequest {
    /// Hostname or IP, optionally with `:port`
    pub host: String,
    pub username: String,
    pub password: String,
    /// Directory holding the daily CSV files
    pub directory: String,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RemoteError {
    #[error("Could not reach {host}: {message}")]
    Connect { host: String, message: String },

    #[error("Login rejected: {0}")]
    Login(String),

    #[error("Cannot open directory {directory}: {message}")]
    ChangeDir { directory: String, message: String },

    #[error("Listing failed: {0}")]
    List(String),

    #[error("Failed to download {name}: {message}")]
    Fetch { name: String, message: String },

    #[error("{name} is not valid UTF-8")]
    Decode { name: String },

    #[error("Not connected")]
    NotConnected,
}

/// A directory of named text files on some remote host
pub trait RemoteSource {
    /// Open a session, authenticate and enter the request's directory
    fn connect(&mut self, request: &ConnectionRequest) -> Result<(), RemoteError>;

    /// Plain file names in the current directory
    fn list_files(&mut self) -> Result<Vec<String>, RemoteError>;

    /// Whole contents of one file, decoded as UTF-8
    fn fetch(&mut self, name: &str) -> Result<String, RemoteError>;

    /// Close the session. Never fails; errors are only logged.
    fn disconnect(&mut self);
}
