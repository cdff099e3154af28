use thiserror::Error;

/// Input problems that abort an allocation before anything is scheduled.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AllocationError {
    #[error("No participants found for this event")]
    NoParticipants,
    #[error("No topics found for this event")]
    NoTopics,
    #[error("No active participants found (registered, confirmed or checked-in)")]
    NoActiveParticipants,
    #[error("No approved topics found")]
    NoApprovedTopics,
    #[error("Number of rounds must be at least 1")]
    NoRounds,
    #[error("Discussions per round must be at least 1")]
    NoDiscussions,
    #[error("Maximum group size must be at least 1")]
    ZeroMaxGroupSize,
    #[error(
        "Group sizes must satisfy minimum <= ideal <= maximum but are {min} / {ideal} / {max}"
    )]
    GroupSizeOrder {
        min: usize,
        ideal: usize,
        max: usize,
    },
    #[error("Repeat threshold must be between 0 and 1 but is {0}")]
    RepeatThreshold(f64),
}
