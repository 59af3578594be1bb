//! Error types for the damage engine.
//!
//! The computations themselves never fail. Errors only arise while turning
//! an external set file into typed build inputs.

/// Errors that can occur while loading build inputs.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// The set document does not have the expected shape.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// A snapshot declares a build type the engine does not know.
    #[error("unknown build type: \"{0}\"")]
    UnknownBuildType(String),

    /// The set document is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
