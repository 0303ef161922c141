use thiserror::Error;

/// Errors raised while building or laying out a radar.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// A radar with no sectors has no angles to share out.
    #[error("no data: the radar has no sectors to lay out")]
    EmptyRadar,

    #[error("unknown ring index {0}")]
    UnknownRing(usize),

    #[error("unknown sector index {0}")]
    UnknownSector(usize),
}

/// Errors raised while reading radar input documents.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("could not read radar input: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse radar input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid colour value '{0}'")]
    InvalidColour(String),

    #[error("invalid sector colour override '{0}', expected <sector-id>=<colour>")]
    InvalidColourOverride(String),
}
