use alloc::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::model::ParticipantId;
use crate::scheduler::Schedule;
use crate::validate::Roster;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundStatistics {
    pub round: usize,
    /// number of groups, one per scheduled topic
    pub topics: usize,
    pub participants: usize,
    pub group_sizes: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationStatistics {
    pub total_participants: usize,
    /// assigned in every round
    pub fully_assigned: usize,
    pub partially_assigned: usize,
    pub unassigned: usize,
    pub unassigned_participants: Vec<ParticipantId>,
    pub topics_used: usize,
    pub total_assignments: usize,
    /// total assignments divided by the number of planned groups
    pub average_group_size: f64,
    pub rounds: Vec<RoundStatistics>,
}

#[expect(clippy::cast_precision_loss, reason = "assignment counts are small")]
fn average(total: usize, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

impl AllocationStatistics {
    pub fn collect(roster: &Roster<'_>, schedule: &Schedule<'_>) -> Self {
        let event = roster.event;
        let mut per_participant: BTreeMap<&ParticipantId, usize> = BTreeMap::new();
        for assignment in &schedule.assignments {
            *per_participant.entry(&assignment.participant_id).or_default() += 1;
        }

        let mut fully_assigned = 0;
        let mut partially_assigned = 0;
        let mut unassigned_participants = Vec::new();
        for participant in &roster.participants {
            match per_participant.get(&participant.id).copied().unwrap_or_default() {
                0 => unassigned_participants.push(participant.id.clone()),
                count if count >= event.number_of_rounds => fully_assigned += 1,
                _ => partially_assigned += 1,
            }
        }

        let topics_used = schedule
            .assignments
            .iter()
            .map(|assignment| &assignment.topic_id)
            .collect::<BTreeSet<_>>()
            .len();

        let total_assignments = schedule.assignments.len();

        let rounds = schedule
            .rounds
            .iter()
            .map(|summary| RoundStatistics {
                round: summary.round,
                topics: summary.group_sizes.len(),
                participants: summary.group_sizes.iter().sum(),
                group_sizes: summary.group_sizes.clone(),
            })
            .collect();

        Self {
            total_participants: roster.participants.len(),
            fully_assigned,
            partially_assigned,
            unassigned: unassigned_participants.len(),
            unassigned_participants,
            topics_used,
            total_assignments,
            average_group_size: average(
                total_assignments,
                event.number_of_rounds * event.discussions_per_round,
            ),
            rounds,
        }
    }
}
