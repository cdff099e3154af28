use alloc::collections::BTreeSet;

use crate::error::AllocationError;
use crate::model::{AllocationInput, Event, Participant, Topic, TopicId};

/// The part of the input that takes part in scheduling, in input order.
#[derive(Debug)]
pub struct Roster<'a> {
    pub event: &'a Event,
    pub participants: Vec<&'a Participant>,
    pub topics: Vec<&'a Topic>,
    pub approved: BTreeSet<&'a TopicId>,
}

pub fn validate_event(event: &Event) -> Result<(), AllocationError> {
    if event.number_of_rounds == 0 {
        return Err(AllocationError::NoRounds);
    }
    if event.discussions_per_round == 0 {
        return Err(AllocationError::NoDiscussions);
    }
    if event.max_group_size == 0 {
        return Err(AllocationError::ZeroMaxGroupSize);
    }
    if !(event.min_group_size <= event.ideal_group_size
        && event.ideal_group_size <= event.max_group_size)
    {
        return Err(AllocationError::GroupSizeOrder {
            min: event.min_group_size,
            ideal: event.ideal_group_size,
            max: event.max_group_size,
        });
    }
    Ok(())
}

pub fn build_roster(input: &AllocationInput) -> Result<Roster<'_>, AllocationError> {
    validate_event(&input.event)?;

    if input.participants.is_empty() {
        return Err(AllocationError::NoParticipants);
    }
    if input.topics.is_empty() {
        return Err(AllocationError::NoTopics);
    }

    let participants: Vec<&Participant> = input
        .participants
        .iter()
        .filter(|participant| participant.status.is_active())
        .collect();
    if participants.is_empty() {
        return Err(AllocationError::NoActiveParticipants);
    }

    let topics: Vec<&Topic> = input
        .topics
        .iter()
        .filter(|topic| topic.status.is_approved())
        .collect();
    if topics.is_empty() {
        return Err(AllocationError::NoApprovedTopics);
    }

    let approved = topics.iter().map(|topic| &topic.id).collect();

    Ok(Roster {
        event: &input.event,
        participants,
        topics,
        approved,
    })
}
