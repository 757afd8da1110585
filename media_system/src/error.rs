//! Error types for the media system
//!
//! This module defines the error types used throughout the system,
//! including resource tables, audio sources, devices and streaming.

use std::fmt;

/// Result type for media system operations
pub type Result<T> = std::result::Result<T, Error>;

/// Resource table a handle belongs to (used in diagnostics)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Texture,
    Image,
    Font,
    Wave,
}

impl ResourceKind {
    /// Capitalized name as used at the start of a diagnostic
    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::Texture => "Texture",
            ResourceKind::Image => "Image",
            ResourceKind::Font => "Font",
            ResourceKind::Wave => "Wave",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name().to_lowercase())
    }
}

/// Media system errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (Direct3D, DirectSound, etc.)
    BackendError(String),

    /// Invalid resource (descriptor, format, missing dependency)
    InvalidResource(String),

    /// Initialization failed (system, subsystems, configuration)
    InitializationFailed(String),

    /// Every id of a resource table is in use
    IdExceedsLimit { kind: ResourceKind, capacity: u32 },

    /// Id outside the range of its resource table
    InvalidId { kind: ResourceKind, id: u32 },

    /// Id in range but its slot holds no resource
    NullId { kind: ResourceKind, id: u32 },

    /// Missing or malformed audio/image source
    InvalidSource(String),

    /// The device was removed, reset or hung
    DeviceLost(String),

    /// A streaming session is already running
    StreamingActive,

    /// No streaming session is running (or it has nothing buffered)
    StreamingInactive,

    /// Invalid key, button or input parameter
    InvalidInput(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::IdExceedsLimit { kind, capacity } => {
                write!(f, "{} id exceeds limit (max: {})", kind.name(), capacity)
            }
            Error::InvalidId { kind, id } => write!(f, "Invalid {} id: {}", kind, id),
            Error::NullId { kind, id } => write!(f, "Null {} id: {}", kind, id),
            Error::InvalidSource(msg) => write!(f, "Invalid source: {}", msg),
            Error::DeviceLost(msg) => write!(f, "Device lost: {}", msg),
            Error::StreamingActive => write!(f, "Streaming is already active"),
            Error::StreamingInactive => write!(f, "Streaming is not active"),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::InvalidSource(err.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
