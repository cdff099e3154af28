use alloc::collections::BTreeMap;

use itertools::Itertools;

use crate::model::{Topic, TopicId, TopicRanking};

/// Rank weighted demand per approved topic. Fixed for a whole allocation run.
#[derive(Debug)]
pub struct PopularityScores<'a> {
    scores: BTreeMap<&'a TopicId, usize>,
}

impl<'a> PopularityScores<'a> {
    /// A topic at position `i` of a ranking of length `n` earns `n - i`.
    pub fn build(rankings: &[TopicRanking], topics: &[&'a Topic]) -> Self {
        let mut scores: BTreeMap<&'a TopicId, usize> =
            topics.iter().map(|topic| (&topic.id, 0)).collect();
        for ranking in rankings {
            let length = ranking.topic_ids.len();
            for (index, topic_id) in ranking.topic_ids.iter().enumerate() {
                if let Some(score) = scores.get_mut(topic_id) {
                    *score += length - index;
                }
            }
        }
        Self { scores }
    }

    pub fn score(&self, topic: &TopicId) -> usize {
        self.scores.get(topic).copied().unwrap_or_default()
    }

    /// Most popular first, equal scores keep the order of `topics`.
    pub fn most_popular(&self, topics: &[&'a Topic]) -> Vec<&'a Topic> {
        topics
            .iter()
            .copied()
            .sorted_by(|left, right| self.score(&right.id).cmp(&self.score(&left.id)))
            .collect()
    }
}
