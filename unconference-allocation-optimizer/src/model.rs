// these are snapshots handed over by the event, participant, topic and ranking stores.
// identifiers must be unique within one event.

use core::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::statistics::AllocationStatistics;

macro_rules! identifier {
    ($name:ident) => {
        #[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }
    };
}

identifier!(EventId);
identifier!(ParticipantId);
identifier!(TopicId);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub number_of_rounds: usize,
    pub discussions_per_round: usize,
    pub ideal_group_size: usize,
    pub min_group_size: usize,
    pub max_group_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParticipantStatus {
    Registered,
    Confirmed,
    CheckedIn,
    Cancelled,
}

impl ParticipantStatus {
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Registered | Self::Confirmed | Self::CheckedIn)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub status: ParticipantStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TopicStatus {
    Proposed,
    Approved,
    Scheduled,
    Completed,
    Rejected,
}

impl TopicStatus {
    #[must_use]
    pub const fn is_approved(self) -> bool {
        matches!(self, Self::Approved)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub status: TopicStatus,
}

/// The topics a participant wants to discuss, most preferred first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicRanking {
    pub participant_id: ParticipantId,
    pub topic_ids: Vec<TopicId>,
}

/// 1-based position of a topic in a ranking, lower is better.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rank(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssignmentMethod {
    Automatic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssignmentStatus {
    Assigned,
}

/// One participant in one group of one round. The caller assigns an id when persisting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub event_id: EventId,
    pub participant_id: ParticipantId,
    pub topic_id: TopicId,
    pub round_number: usize,
    pub group_number: usize,
    pub assignment_method: AssignmentMethod,
    pub status: AssignmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationInput {
    pub event: Event,
    pub participants: Vec<Participant>,
    pub topics: Vec<Topic>,
    pub rankings: Vec<TopicRanking>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationResult {
    pub assignments: Vec<Assignment>,
    pub statistics: AllocationStatistics,
    pub warnings: Vec<String>,
}
