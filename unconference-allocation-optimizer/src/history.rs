use alloc::collections::{BTreeMap, BTreeSet};

use crate::model::{ParticipantId, TopicId};

/// Topics every participant was placed into during the rounds scheduled so far.
#[derive(Debug, Default)]
pub struct AssignmentHistory<'a> {
    attended: BTreeMap<&'a ParticipantId, BTreeSet<&'a TopicId>>,
}

impl<'a> AssignmentHistory<'a> {
    pub fn record(&mut self, participant: &'a ParticipantId, topic: &'a TopicId) {
        self.attended.entry(participant).or_default().insert(topic);
    }

    pub fn has_attended(&self, participant: &ParticipantId, topic: &TopicId) -> bool {
        self.attended
            .get(participant)
            .is_some_and(|topics| topics.contains(topic))
    }

    pub fn has_attended_any<'t>(
        &self,
        participant: &ParticipantId,
        topics: impl IntoIterator<Item = &'t TopicId>,
    ) -> bool {
        self.attended.get(participant).is_some_and(|attended| {
            topics
                .into_iter()
                .any(|topic| attended.contains(topic))
        })
    }
}
