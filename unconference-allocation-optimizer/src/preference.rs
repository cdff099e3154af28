use alloc::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;

use crate::model::{ParticipantId, Rank, TopicId, TopicRanking};

/// participant -> (approved topic -> rank)
#[derive(Debug, Default)]
pub struct PreferenceIndex<'a> {
    preferences: BTreeMap<&'a ParticipantId, BTreeMap<&'a TopicId, Rank>>,
}

impl<'a> PreferenceIndex<'a> {
    /// Later rankings of the same participant replace earlier ones. Inside a ranking the first
    /// occurrence of a topic decides its rank.
    pub fn build(rankings: &'a [TopicRanking], approved: &BTreeSet<&'a TopicId>) -> Self {
        let mut preferences = BTreeMap::new();
        for ranking in rankings {
            let mut ranks = BTreeMap::new();
            for (index, topic_id) in ranking.topic_ids.iter().enumerate() {
                if approved.contains(topic_id) {
                    ranks.entry(topic_id).or_insert(Rank(index + 1));
                }
            }
            if !ranks.is_empty() {
                preferences.insert(&ranking.participant_id, ranks);
            }
        }
        Self { preferences }
    }

    /// The given topics that the participant ranked, most preferred first.
    pub fn ranked_among<'t>(
        &self,
        participant: &ParticipantId,
        topics: impl IntoIterator<Item = &'t TopicId>,
    ) -> Vec<&'t TopicId> {
        let Some(ranks) = self.preferences.get(participant) else {
            return Vec::new();
        };
        topics
            .into_iter()
            .filter_map(|topic| ranks.get(topic).map(|rank| (*rank, topic)))
            .sorted_by_key(|(rank, _)| *rank)
            .map(|(_, topic)| topic)
            .collect()
    }
}
