use shorebreak_core::GameError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutoplayError {
    #[error("game error: {0}")]
    Game(#[from] GameError),
    #[error("strategy for {player} returned a phase-illegal action: {detail}")]
    IllegalAction { player: String, detail: String },
    #[error("no strategy registered for {0}")]
    MissingStrategy(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("serialize error: {0}")]
    Serialize(String),
}

impl From<std::io::Error> for AutoplayError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<serde_json::Error> for AutoplayError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value.to_string())
    }
}
