use core::fmt::{self, Display};

use crate::model::{ParticipantId, TopicId};

/// Non-fatal findings that are handed back together with the schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleWarning<'a> {
    InsufficientTopics {
        round: usize,
        available: usize,
        requested: usize,
    },
    RepeatsAllowed {
        round: usize,
        eligible: usize,
        active: usize,
    },
    Unassigned {
        round: usize,
        participant: &'a ParticipantId,
    },
    UndersizedGroup {
        round: usize,
        group: usize,
        topic: &'a TopicId,
        size: usize,
        min: usize,
    },
}

impl Display for ScheduleWarning<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientTopics {
                round,
                available,
                requested,
            } => write!(
                f,
                "Round {round}: Only {available} topics available, {requested} discussions \
                 requested"
            ),
            Self::RepeatsAllowed {
                round,
                eligible,
                active,
            } => write!(
                f,
                "Round {round}: Only {eligible} of {active} participants can join a new topic, \
                 allowing repeated topics"
            ),
            Self::Unassigned { round, participant } => write!(
                f,
                "Round {round}: Unable to assign participant {participant}"
            ),
            Self::UndersizedGroup {
                round,
                group,
                topic,
                size,
                min,
            } => write!(
                f,
                "Round {round}: Group {group} ({topic}) has {size} participants, below the \
                 minimum of {min}"
            ),
        }
    }
}
