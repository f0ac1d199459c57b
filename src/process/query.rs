/*!
 * Table Queries
 * Ordered snapshots of the process table
 */

use super::types::SortBy;
use crate::core::types::Process;
use std::cmp::Ordering;

/// Order a snapshot by the selected key
///
/// `Id` and `CreationTime` are unique keys, so their orders are total. `Priority`
/// ties fall back to creation order, oldest first; `descending` only reverses the
/// primary key, never the tie-break.
pub fn sort_snapshot(
    mut snapshot: Vec<Process>,
    sort_by: SortBy,
    descending: bool,
) -> Vec<Process> {
    let direction = |ord: Ordering| if descending { ord.reverse() } else { ord };

    match sort_by {
        SortBy::Id => snapshot.sort_unstable_by(|a, b| direction(a.id.cmp(&b.id))),
        SortBy::CreationTime => {
            snapshot.sort_unstable_by(|a, b| direction(a.created.cmp(&b.created)))
        }
        SortBy::Priority => snapshot.sort_unstable_by(|a, b| {
            direction(a.priority.cmp(&b.priority)).then_with(|| a.created.cmp(&b.created))
        }),
    }

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::LogicalClock;
    use crate::core::types::Priority;

    fn sample() -> Vec<Process> {
        let clock = LogicalClock::new();
        vec![
            Process::with_clock(3, Priority::High, &clock),
            Process::with_clock(1, Priority::Low, &clock),
            Process::with_clock(2, Priority::Low, &clock),
            Process::with_clock(0, Priority::Medium, &clock),
        ]
    }

    fn ids(list: &[Process]) -> Vec<i64> {
        list.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_sort_by_id() {
        assert_eq!(ids(&sort_snapshot(sample(), SortBy::Id, false)), vec![0, 1, 2, 3]);
        assert_eq!(ids(&sort_snapshot(sample(), SortBy::Id, true)), vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_sort_by_creation_time() {
        assert_eq!(
            ids(&sort_snapshot(sample(), SortBy::CreationTime, false)),
            vec![3, 1, 2, 0]
        );
        assert_eq!(
            ids(&sort_snapshot(sample(), SortBy::CreationTime, true)),
            vec![0, 2, 1, 3]
        );
    }

    #[test]
    fn test_sort_by_priority_keeps_age_tie_break() {
        let ascending = sort_snapshot(sample(), SortBy::Priority, false);
        assert_eq!(ids(&ascending), vec![1, 2, 0, 3]);

        // Lows stay oldest-first even when descending
        let descending = sort_snapshot(sample(), SortBy::Priority, true);
        assert_eq!(ids(&descending), vec![3, 0, 1, 2]);
    }

    #[test]
    fn test_sort_empty() {
        assert!(sort_snapshot(Vec::new(), SortBy::Priority, true).is_empty());
    }
}
