use thiserror::Error;

use crate::i18n::Text;

/// Failure of a read against the venue API (availability or game catalog).
///
/// These are recovered locally by substituting fixture data and are only
/// ever logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("server responded with status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            NetworkError::Decode(err.to_string())
        } else {
            NetworkError::Transport(err.to_string())
        }
    }
}

/// Reason a booking form was rejected before anything was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("full name is required")]
    NameRequired,

    #[error("an email address or phone number is required")]
    ContactRequired,

    #[error("no time slots selected")]
    NoSlotsSelected,

    #[error("email address is not valid")]
    InvalidEmail,
}

impl ValidationError {
    pub fn message(self) -> Text {
        match self {
            ValidationError::NameRequired => Text::NameRequired,
            ValidationError::ContactRequired => Text::ContactRequired,
            ValidationError::NoSlotsSelected => Text::SelectTimeSlots,
            ValidationError::InvalidEmail => Text::InvalidEmail,
        }
    }
}

/// The reservation endpoint did not confirm the booking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("reservation request failed: {0}")]
    Transport(String),

    #[error("reservation rejected with status {0}")]
    Status(u16),

    #[error("reservation was not confirmed by the server")]
    Rejected,
}

impl From<reqwest::Error> for BookingError {
    fn from(err: reqwest::Error) -> Self {
        BookingError::Transport(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("environment variable '{0}' not found")]
    MissingEnv(String),
}
