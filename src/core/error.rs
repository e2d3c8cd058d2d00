use std::fmt;

#[derive(Debug)]
pub enum ArcError {
    MalformedGrid(String),
    MissingKey(String),
    InvalidTask(String),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for ArcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedGrid(msg) => write!(f, "malformed grid: {}", msg),
            Self::MissingKey(key) => write!(f, "missing key: {}", key),
            Self::InvalidTask(msg) => write!(f, "invalid task: {}", msg),
            Self::Io(e) => write!(f, "io error: {}", e),
            Self::Json(e) => write!(f, "json error: {}", e),
        }
    }
}

impl std::error::Error for ArcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ArcError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ArcError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

pub type Result<T> = std::result::Result<T, ArcError>;
