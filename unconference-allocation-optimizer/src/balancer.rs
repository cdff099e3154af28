use itertools::Itertools;
use tracing::debug;
use unconference_allocation_config::BalanceStrategy;

use crate::history::AssignmentHistory;
use crate::model::Event;
use crate::scheduler::Group;

/// Moves members out of groups above the ideal size into groups below it. This is a single
/// greedy sweep, groups may stay above or below the ideal size afterwards.
///
/// Returns the number of moved participants.
pub fn balance_groups(
    groups: &mut [Group<'_>],
    event: &Event,
    strategy: BalanceStrategy,
    history: &AssignmentHistory<'_>,
) -> usize {
    let ideal = event.ideal_group_size;
    let max = event.max_group_size;

    let large = groups
        .iter()
        .positions(|group| group.size() > ideal)
        .collect_vec();
    // a small group leaves this list once it reached the ideal size and never comes back
    let mut small = groups
        .iter()
        .positions(|group| group.size() < ideal && group.size() < max)
        .collect_vec();

    let mut moves = 0;
    for large_index in large {
        while groups[large_index].size() > ideal && !small.is_empty() {
            let Some((small_position, member_position)) =
                pick_move(groups, large_index, &small, strategy, history)
            else {
                break;
            };
            let small_index = small[small_position];
            let member = groups[large_index].members.remove(member_position);
            debug!(
                "moving {} from {} to {}",
                member.id, groups[large_index].topic.id, groups[small_index].topic.id
            );
            groups[small_index].members.push(member);
            moves += 1;
            if groups[small_index].size() >= ideal {
                small.remove(small_position);
            }
        }
    }
    moves
}

/// (position in `small`, position in the large group's members)
fn pick_move(
    groups: &[Group<'_>],
    large_index: usize,
    small: &[usize],
    strategy: BalanceStrategy,
    history: &AssignmentHistory<'_>,
) -> Option<(usize, usize)> {
    let members = &groups[large_index].members;
    match strategy {
        BalanceStrategy::Greedy => members.len().checked_sub(1).map(|last| (0, last)),
        BalanceStrategy::HistoryAware => {
            small.iter().enumerate().find_map(|(position, &small_index)| {
                let topic = &groups[small_index].topic.id;
                members
                    .iter()
                    .rposition(|member| !history.has_attended(&member.id, topic))
                    .map(|member| (position, member))
            })
        }
    }
}
