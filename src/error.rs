//! Error types for configuration, persistence and the simulation core

/// Error type shared by the library and the terminal front end
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// High-score file could not be read or written
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Initials that are not exactly three letters
    #[error("Invalid initials: {0}")]
    InvalidInitials(String),

    /// Invalid or unreadable configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A tick left the session in a state that breaks its invariants
    #[error("Simulation fault: {0}")]
    SimulationFault(String),

    /// IO error from filesystem or terminal
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for game operations
pub type Result<T> = std::result::Result<T, GameError>;
