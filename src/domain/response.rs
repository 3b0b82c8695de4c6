use std::str::FromStr;

use crate::domain::error::DomainError;

/// Player reply to a yes/no prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Yes,
    No,
}

impl FromStr for Response {
    type Err = DomainError;

    /// Surrounding whitespace and case are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "yes" => Ok(Response::Yes),
            "no" => Ok(Response::No),
            _ => Err(DomainError::BadResponse(s.to_string())),
        }
    }
}

impl Response {
    /// Whether a reply to a guess confirms it. Anything but "yes" rejects.
    pub fn confirms(s: &str) -> bool {
        matches!(s.parse(), Ok(Response::Yes))
    }
}
