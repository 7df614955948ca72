use std::fmt;

/// Lifecycle of a survey run.
///
/// Reviewing is not a separate state: a review pass is an ordinary
/// `InProgress` run that starts over at the first step with all earlier
/// responses still in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeState {
    /// The start screen is showing.
    NotStarted,

    /// A step is showing.
    InProgress,

    /// Every step was validated. The end screen and summary are showing.
    Completed,
}

impl RuntimeState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NotStarted => "not started",
            Self::InProgress => "in progress",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for RuntimeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
