//! Error types shared by both demos.

use std::fmt;

/// Errors surfaced by map loading, asset loading and the position-update
/// collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// A texture could not be decoded. Fatal: the frame loop never starts.
    AssetLoad { path: String, reason: String },
    /// The map text had no usable rows.
    MapParse(String),
    /// Settings could not be read or deserialized.
    Config(String),
    /// The remote position service reported a failure.
    Service(String),
    /// The service answered with a different number of enemies than it was asked about.
    EnemyCountMismatch { expected: usize, got: usize },
    /// The response answers a request made for an enemy set that has since changed.
    StaleResponse { current: u64, got: u64 },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::AssetLoad { path, reason } => {
                write!(f, "failed to load asset '{}': {}", path, reason)
            }
            GameError::MapParse(msg) => write!(f, "invalid map: {}", msg),
            GameError::Config(msg) => write!(f, "invalid configuration: {}", msg),
            GameError::Service(msg) => write!(f, "position service failed: {}", msg),
            GameError::EnemyCountMismatch { expected, got } => write!(
                f,
                "position service returned {} enemies, expected {}",
                got, expected
            ),
            GameError::StaleResponse { current, got } => write!(
                f,
                "position update for generation {} is stale, current is {}",
                got, current
            ),
        }
    }
}

impl std::error::Error for GameError {}

impl From<config::ConfigError> for GameError {
    fn from(e: config::ConfigError) -> Self {
        GameError::Config(e.to_string())
    }
}

pub type GameResult<T> = Result<T, GameError>;
