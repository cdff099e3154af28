//! Places the participants of an unconference into one discussion group per round.
//!
//! Everything here is a pure computation over snapshots handed in by the caller, the caller
//! persists the returned assignments and has to make sure an event is not regenerated twice at
//! the same time.

extern crate alloc;

pub mod balancer;
pub mod error;
pub mod history;
pub mod model;
pub mod popularity;
pub mod preference;
pub mod scheduler;
pub mod statistics;
pub mod validate;
pub mod warning;

use tracing::info;
pub use unconference_allocation_config::{BalanceStrategy, SchedulerConfig};

pub use crate::error::AllocationError;
use crate::model::{AllocationInput, AllocationResult};
use crate::popularity::PopularityScores;
use crate::preference::PreferenceIndex;
use crate::scheduler::RoundScheduler;
use crate::statistics::AllocationStatistics;
use crate::validate::build_roster;

pub fn generate_assignments(input: &AllocationInput) -> Result<AllocationResult, AllocationError> {
    generate_assignments_with(input, &SchedulerConfig::default())
}

#[tracing::instrument(skip_all, fields(event = %input.event.id))]
pub fn generate_assignments_with(
    input: &AllocationInput,
    config: &SchedulerConfig,
) -> Result<AllocationResult, AllocationError> {
    config
        .validate()
        .map_err(|_| AllocationError::RepeatThreshold(config.repeat_threshold))?;
    let roster = build_roster(input)?;
    info!(
        "scheduling {} participants over {} approved topics in {} rounds",
        roster.participants.len(),
        roster.topics.len(),
        roster.event.number_of_rounds
    );

    let preferences = PreferenceIndex::build(&input.rankings, &roster.approved);
    let popularity = PopularityScores::build(&input.rankings, &roster.topics);
    let schedule = RoundScheduler::new(&roster, &preferences, &popularity, config).run();
    let statistics = AllocationStatistics::collect(&roster, &schedule);

    info!(
        "created {} assignments, {} participants fully assigned, {} warnings",
        statistics.total_assignments,
        statistics.fully_assigned,
        schedule.warnings.len()
    );

    Ok(AllocationResult {
        warnings: schedule.warnings.iter().map(ToString::to_string).collect(),
        assignments: schedule.assignments,
        statistics,
    })
}
