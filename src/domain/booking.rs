use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Status of a traveler's request to engage a guide.
///
/// `Pending` is the only non-terminal state. A guide decides exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("a booking cannot be moved back to {0}")]
    InvalidTarget(BookingStatus),

    #[error("booking is already {current}, cannot change it to {requested}")]
    AlreadyDecided {
        current: BookingStatus,
        requested: BookingStatus,
    },
}

#[derive(Debug, Error)]
#[error("unknown booking status `{0}`")]
pub struct UnknownStatus(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied(BookingStatus),
    /// The booking already had the requested terminal status.
    Unchanged,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, BookingStatus::Pending)
    }

    /// Statuses the owning guide may still move this booking to.
    pub fn actions(&self) -> Vec<BookingStatus> {
        match self {
            BookingStatus::Pending => vec![BookingStatus::Approved, BookingStatus::Rejected],
            BookingStatus::Approved | BookingStatus::Rejected => Vec::new(),
        }
    }

    pub fn transition(self, requested: BookingStatus) -> Result<Transition, TransitionError> {
        match (self, requested) {
            (_, BookingStatus::Pending) => Err(TransitionError::InvalidTarget(requested)),
            (BookingStatus::Pending, to) => Ok(Transition::Applied(to)),
            (current, to) if current == to => Ok(Transition::Unchanged),
            (current, to) => Err(TransitionError::AlreadyDecided {
                current,
                requested: to,
            }),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "approved" => Ok(BookingStatus::Approved),
            "rejected" => Ok(BookingStatus::Rejected),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_moves_to_either_decision() {
        assert_eq!(
            BookingStatus::Pending.transition(BookingStatus::Approved),
            Ok(Transition::Applied(BookingStatus::Approved))
        );
        assert_eq!(
            BookingStatus::Pending.transition(BookingStatus::Rejected),
            Ok(Transition::Applied(BookingStatus::Rejected))
        );
        assert_eq!(BookingStatus::Pending.actions().len(), 2);
    }

    #[test]
    fn terminal_states_expose_no_actions() {
        assert!(BookingStatus::Approved.actions().is_empty());
        assert!(BookingStatus::Rejected.actions().is_empty());
        assert!(BookingStatus::Rejected.is_terminal());
    }

    #[test]
    fn repeating_a_decision_is_harmless_but_flipping_it_is_refused() {
        assert_eq!(
            BookingStatus::Approved.transition(BookingStatus::Approved),
            Ok(Transition::Unchanged)
        );
        assert_eq!(
            BookingStatus::Approved.transition(BookingStatus::Rejected),
            Err(TransitionError::AlreadyDecided {
                current: BookingStatus::Approved,
                requested: BookingStatus::Rejected,
            })
        );
        assert_eq!(
            BookingStatus::Pending.transition(BookingStatus::Pending),
            Err(TransitionError::InvalidTarget(BookingStatus::Pending))
        );
    }

    #[test]
    fn parses_stored_strings() {
        assert_eq!("approved".parse::<BookingStatus>().ok(), Some(BookingStatus::Approved));
        assert!("cancelled".parse::<BookingStatus>().is_err());
    }
}
