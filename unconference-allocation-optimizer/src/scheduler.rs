use tracing::{debug, info, warn};
use unconference_allocation_config::SchedulerConfig;

use crate::balancer::balance_groups;
use crate::history::AssignmentHistory;
use crate::model::{Assignment, AssignmentMethod, AssignmentStatus, Participant, Topic, TopicId};
use crate::popularity::PopularityScores;
use crate::preference::PreferenceIndex;
use crate::validate::Roster;
use crate::warning::ScheduleWarning;

/// The participants discussing one topic in one round.
#[derive(Debug)]
pub struct Group<'a> {
    pub topic: &'a Topic,
    pub members: Vec<&'a Participant>,
}

impl<'a> Group<'a> {
    pub const fn new(topic: &'a Topic) -> Self {
        Self {
            topic,
            members: Vec::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn has_room(&self, max_group_size: usize) -> bool {
        self.members.len() < max_group_size
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub round: usize,
    pub group_sizes: Vec<usize>,
}

#[derive(Debug)]
pub struct Schedule<'a> {
    pub assignments: Vec<Assignment>,
    pub rounds: Vec<RoundSummary>,
    pub warnings: Vec<ScheduleWarning<'a>>,
}

#[expect(clippy::cast_precision_loss, reason = "participant counts are small")]
fn below_threshold(eligible: usize, active: usize, threshold: f64) -> bool {
    (eligible as f64) < threshold * (active as f64)
}

/// Schedules the rounds one after another, never revisiting an earlier round.
pub struct RoundScheduler<'r, 'a> {
    roster: &'r Roster<'a>,
    preferences: &'r PreferenceIndex<'a>,
    config: &'r SchedulerConfig,
    /// approved topics, most popular first
    topic_order: Vec<&'a Topic>,
    history: AssignmentHistory<'a>,
    assignments: Vec<Assignment>,
    rounds: Vec<RoundSummary>,
    warnings: Vec<ScheduleWarning<'a>>,
}

impl<'r, 'a> RoundScheduler<'r, 'a> {
    pub fn new(
        roster: &'r Roster<'a>,
        preferences: &'r PreferenceIndex<'a>,
        popularity: &PopularityScores<'a>,
        config: &'r SchedulerConfig,
    ) -> Self {
        Self {
            roster,
            preferences,
            config,
            topic_order: popularity.most_popular(&roster.topics),
            history: AssignmentHistory::default(),
            assignments: Vec::new(),
            rounds: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn run(mut self) -> Schedule<'a> {
        for round in 1..=self.roster.event.number_of_rounds {
            self.schedule_round(round);
        }
        Schedule {
            assignments: self.assignments,
            rounds: self.rounds,
            warnings: self.warnings,
        }
    }

    fn warn(&mut self, warning: ScheduleWarning<'a>) {
        warn!("{warning}");
        self.warnings.push(warning);
    }

    fn schedule_round(&mut self, round: usize) {
        let selected = self.select_topics(round);
        let mut groups: Vec<Group<'a>> = selected.iter().copied().map(Group::new).collect();

        let (pool, repeats_allowed) = self.eligible_pool(round, &selected);
        let pending = self.assign_preferred(&pool, &mut groups);
        self.assign_fallback(round, pending, &mut groups, repeats_allowed);

        let moves = balance_groups(
            &mut groups,
            self.roster.event,
            self.config.balance_strategy,
            &self.history,
        );
        debug!("round {round}: balancing moved {moves} participants");

        self.finish_round(round, &groups);
    }

    /// The same most popular topics are picked every round, repeats are avoided per participant.
    fn select_topics(&mut self, round: usize) -> Vec<&'a Topic> {
        let requested = self.roster.event.discussions_per_round;
        let selected: Vec<&'a Topic> = self.topic_order.iter().copied().take(requested).collect();
        if selected.len() < requested {
            self.warn(ScheduleWarning::InsufficientTopics {
                round,
                available: selected.len(),
                requested,
            });
        }
        selected
    }

    /// Participants that attended none of the selected topics yet. Falls back to everybody, and
    /// thereby allows repeats, if too few of those are left.
    fn eligible_pool(
        &mut self,
        round: usize,
        selected: &[&'a Topic],
    ) -> (Vec<&'a Participant>, bool) {
        let roster = self.roster;
        let active = &roster.participants;
        let eligible: Vec<&'a Participant> = active
            .iter()
            .copied()
            .filter(|participant| {
                !self
                    .history
                    .has_attended_any(&participant.id, selected.iter().map(|topic| &topic.id))
            })
            .collect();

        if below_threshold(eligible.len(), active.len(), self.config.repeat_threshold) {
            let everybody = active.clone();
            self.warn(ScheduleWarning::RepeatsAllowed {
                round,
                eligible: eligible.len(),
                active: everybody.len(),
            });
            (everybody, true)
        } else {
            (eligible, false)
        }
    }

    /// First pass: the best ranked topic that still has room and was not attended before.
    /// Returns the participants that could not be placed this way.
    fn assign_preferred(
        &self,
        pool: &[&'a Participant],
        groups: &mut [Group<'a>],
    ) -> Vec<&'a Participant> {
        let max = self.roster.event.max_group_size;
        let topic_ids: Vec<&'a TopicId> = groups.iter().map(|group| &group.topic.id).collect();
        let mut pending = Vec::new();

        for &participant in pool {
            let candidates = self
                .preferences
                .ranked_among(&participant.id, topic_ids.iter().copied());
            let target = candidates.into_iter().find_map(|topic| {
                let index = topic_ids.iter().position(|&selected| selected == topic)?;
                (groups[index].has_room(max) && !self.history.has_attended(&participant.id, topic))
                    .then_some(index)
            });
            match target {
                Some(index) => {
                    debug!("{} gets preferred topic {}", participant.id, topic_ids[index]);
                    groups[index].members.push(participant);
                }
                None => pending.push(participant),
            }
        }
        pending
    }

    /// Second pass: the smallest group with room among the topics not attended before. Only
    /// when repeats are allowed this round a participant may end up in an attended topic.
    fn assign_fallback(
        &mut self,
        round: usize,
        pending: Vec<&'a Participant>,
        groups: &mut [Group<'a>],
        repeats_allowed: bool,
    ) {
        let max = self.roster.event.max_group_size;
        for participant in pending {
            let target = smallest_open_group(groups, max, |group| {
                !self.history.has_attended(&participant.id, &group.topic.id)
            })
            .or_else(|| {
                if repeats_allowed {
                    smallest_open_group(groups, max, |_| true)
                } else {
                    None
                }
            });
            if let Some(index) = target {
                debug!("{} falls back to topic {}", participant.id, groups[index].topic.id);
                groups[index].members.push(participant);
            } else {
                self.warn(ScheduleWarning::Unassigned {
                    round,
                    participant: &participant.id,
                });
            }
        }
    }

    fn finish_round(&mut self, round: usize, groups: &[Group<'a>]) {
        let min = self.roster.event.min_group_size;
        let mut group_sizes = Vec::with_capacity(groups.len());

        for (group_number, group) in (1..).zip(groups) {
            let topic: &'a Topic = group.topic;
            for participant in group.members.iter().copied() {
                self.assignments.push(Assignment {
                    event_id: self.roster.event.id.clone(),
                    participant_id: participant.id.clone(),
                    topic_id: topic.id.clone(),
                    round_number: round,
                    group_number,
                    assignment_method: AssignmentMethod::Automatic,
                    status: AssignmentStatus::Assigned,
                });
                self.history.record(&participant.id, &topic.id);
            }
            if group.size() < min {
                self.warn(ScheduleWarning::UndersizedGroup {
                    round,
                    group: group_number,
                    topic: &topic.id,
                    size: group.size(),
                    min,
                });
            }
            group_sizes.push(group.size());
        }

        info!(
            "round {round}: {} participants in {} groups",
            group_sizes.iter().sum::<usize>(),
            group_sizes.len()
        );
        self.rounds.push(RoundSummary { round, group_sizes });
    }
}

/// Ties go to the group that comes first, which is the more popular topic.
fn smallest_open_group(
    groups: &[Group<'_>],
    max_group_size: usize,
    filter: impl Fn(&Group<'_>) -> bool,
) -> Option<usize> {
    groups
        .iter()
        .enumerate()
        .filter(|(_, group)| group.has_room(max_group_size) && filter(*group))
        .min_by_key(|(_, group)| group.size())
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use unconference_allocation_config::SchedulerConfig;

    use crate::model::{
        AllocationInput, Event, Participant, ParticipantStatus, Topic, TopicRanking, TopicStatus,
    };
    use crate::popularity::PopularityScores;
    use crate::preference::PreferenceIndex;
    use crate::scheduler::{RoundScheduler, Schedule};
    use crate::validate::build_roster;
    use crate::warning::ScheduleWarning;

    fn input(
        participants: usize,
        topics: usize,
        rankings: &[(usize, Vec<usize>)],
        event: Event,
    ) -> AllocationInput {
        AllocationInput {
            event,
            participants: (0..participants)
                .map(|index| Participant {
                    id: format!("p{index}").as_str().into(),
                    status: ParticipantStatus::CheckedIn,
                })
                .collect(),
            topics: (0..topics)
                .map(|index| Topic {
                    id: format!("t{index}").as_str().into(),
                    status: TopicStatus::Approved,
                })
                .collect(),
            rankings: rankings
                .iter()
                .map(|(participant, topics)| TopicRanking {
                    participant_id: format!("p{participant}").as_str().into(),
                    topic_ids: topics
                        .iter()
                        .map(|topic| format!("t{topic}").as_str().into())
                        .collect(),
                })
                .collect(),
        }
    }

    fn event(rounds: usize, discussions: usize, min: usize, ideal: usize, max: usize) -> Event {
        Event {
            id: "event".into(),
            number_of_rounds: rounds,
            discussions_per_round: discussions,
            ideal_group_size: ideal,
            min_group_size: min,
            max_group_size: max,
        }
    }

    fn schedule<'a>(input: &'a AllocationInput, config: &SchedulerConfig) -> Schedule<'a> {
        let roster = build_roster(input).unwrap();
        let preferences = PreferenceIndex::build(&input.rankings, &roster.approved);
        let popularity = PopularityScores::build(&input.rankings, &roster.topics);
        RoundScheduler::new(&roster, &preferences, &popularity, config).run()
    }

    fn topics_of(schedule: &Schedule<'_>, round: usize) -> Vec<(String, String)> {
        schedule
            .assignments
            .iter()
            .filter(|assignment| assignment.round_number == round)
            .map(|assignment| {
                (
                    assignment.participant_id.0.clone(),
                    assignment.topic_id.0.clone(),
                )
            })
            .collect()
    }

    #[test]
    fn preferred_topics_win_when_there_is_room() {
        let input = input(
            4,
            2,
            &[
                (0, vec![1, 0]),
                (1, vec![0, 1]),
                (2, vec![1]),
                (3, vec![0]),
            ],
            event(1, 2, 1, 2, 3),
        );
        let schedule = schedule(&input, &SchedulerConfig::default());

        assert_eq!(
            topics_of(&schedule, 1),
            [
                ("p1".to_owned(), "t0".to_owned()),
                ("p3".to_owned(), "t0".to_owned()),
                ("p0".to_owned(), "t1".to_owned()),
                ("p2".to_owned(), "t1".to_owned()),
            ]
        );
        assert!(schedule.warnings.is_empty());
    }

    #[test]
    fn unranked_participants_go_to_the_smallest_group() {
        let input = input(
            5,
            2,
            &[(0, vec![0]), (1, vec![0]), (2, vec![0])],
            event(1, 2, 1, 3, 5),
        );
        let schedule = schedule(&input, &SchedulerConfig::default());

        let round = topics_of(&schedule, 1);
        let in_t1: Vec<&str> = round
            .iter()
            .filter(|(_, topic)| topic == "t1")
            .map(|(participant, _)| participant.as_str())
            .collect();
        assert_eq!(in_t1, ["p3", "p4"]);
        assert_eq!(schedule.rounds[0].group_sizes, [3, 2]);
    }

    #[test]
    fn full_groups_leave_participants_unassigned() {
        let input = input(5, 2, &[], event(1, 2, 1, 2, 2));
        let schedule = schedule(&input, &SchedulerConfig::default());

        assert_eq!(schedule.assignments.len(), 4);
        assert_eq!(
            schedule.warnings,
            [ScheduleWarning::Unassigned {
                round: 1,
                participant: &input.participants[4].id,
            }]
        );
    }

    #[test]
    fn warns_about_missing_topics_every_round() {
        let input = input(3, 1, &[], event(2, 2, 1, 2, 3));
        let schedule = schedule(&input, &SchedulerConfig::default());

        let missing: Vec<usize> = schedule
            .warnings
            .iter()
            .filter_map(|warning| match warning {
                ScheduleWarning::InsufficientTopics { round, .. } => Some(*round),
                _ => None,
            })
            .collect();
        assert_eq!(missing, [1, 2]);
    }

    #[test]
    fn restricted_pool_leaves_out_participants_that_attended_a_selected_topic() {
        // only p0 fits in round 1, so nine of ten participants stay eligible for round 2
        let input = input(10, 1, &[], event(2, 1, 1, 1, 1));
        let schedule = schedule(&input, &SchedulerConfig::default());

        assert_eq!(topics_of(&schedule, 1), [("p0".to_owned(), "t0".to_owned())]);
        assert_eq!(topics_of(&schedule, 2), [("p1".to_owned(), "t0".to_owned())]);
        assert!(schedule
            .warnings
            .iter()
            .all(|warning| !matches!(warning, ScheduleWarning::RepeatsAllowed { .. })));

        let unassigned_in_round_two: Vec<&str> = schedule
            .warnings
            .iter()
            .filter_map(|warning| match warning {
                ScheduleWarning::Unassigned {
                    round: 2,
                    participant,
                } => Some(participant.0.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            unassigned_in_round_two,
            ["p2", "p3", "p4", "p5", "p6", "p7", "p8", "p9"]
        );
    }

    #[test]
    fn repeats_are_allowed_below_the_threshold() {
        let input = input(4, 1, &[], event(2, 1, 1, 4, 4));
        let schedule = schedule(&input, &SchedulerConfig::default());

        assert_eq!(topics_of(&schedule, 2).len(), 4);
        assert!(schedule.warnings.contains(&ScheduleWarning::RepeatsAllowed {
            round: 2,
            eligible: 0,
            active: 4,
        }));
    }

    #[test]
    fn exactly_eighty_percent_eligible_keeps_the_restricted_pool() {
        // p0 and p1 fill t0 in round 1, leaving 8 of 10 eligible for round 2
        let input = input(10, 2, &[], event(2, 1, 1, 1, 2));
        let schedule = schedule(&input, &SchedulerConfig::default());

        assert_eq!(
            topics_of(&schedule, 2),
            [
                ("p2".to_owned(), "t0".to_owned()),
                ("p3".to_owned(), "t0".to_owned()),
            ]
        );
        assert!(schedule
            .warnings
            .iter()
            .all(|warning| !matches!(warning, ScheduleWarning::RepeatsAllowed { .. })));
    }

    #[test]
    fn fallback_ties_go_to_the_more_popular_topic() {
        // t1 is ranked by somebody outside the event, so it comes first despite the input order
        let input = input(2, 2, &[(5, vec![1])], event(1, 2, 1, 1, 3));
        let schedule = schedule(&input, &SchedulerConfig::default());

        assert_eq!(
            topics_of(&schedule, 1),
            [
                ("p0".to_owned(), "t1".to_owned()),
                ("p1".to_owned(), "t0".to_owned()),
            ]
        );
    }

    #[test]
    fn undersized_groups_are_kept_and_reported() {
        let input = input(4, 2, &[], event(1, 2, 3, 3, 4));
        let schedule = schedule(&input, &SchedulerConfig::default());

        assert_eq!(schedule.assignments.len(), 4);
        assert_eq!(
            schedule
                .warnings
                .iter()
                .filter(|warning| matches!(warning, ScheduleWarning::UndersizedGroup { .. }))
                .count(),
            2
        );
    }
}
