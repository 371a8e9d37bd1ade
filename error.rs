/// Failure of the badge-creation collaborator.
#[derive(Debug)]
pub enum BadgeError {
    InvalidEvent(String),
    NotFound(String),
    Panicked(String),
}

impl BadgeError {
    pub fn kind(&self) -> &'static str {
        match self {
            BadgeError::InvalidEvent(_) => "invalid_event",
            BadgeError::NotFound(_) => "not_found",
            BadgeError::Panicked(_) => "panicked",
        }
    }
}

impl std::error::Error for BadgeError {}

impl std::fmt::Display for BadgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BadgeError::InvalidEvent(s) => write!(f, "invalid event: {}", s),
            BadgeError::NotFound(s) => write!(f, "not found: {}", s),
            BadgeError::Panicked(s) => write!(f, "badge creation panicked: {}", s),
        }
    }
}

impl From<serde_json::Error> for BadgeError {
    fn from(e: serde_json::Error) -> Self {
        BadgeError::InvalidEvent(e.to_string())
    }
}
