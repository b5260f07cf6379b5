//! Batch Conflict Resolution
//!
//! A batch may address the same cell several times. Before touching the grid,
//! the batch is reduced to one net target state per distinct cell with a
//! single left-to-right pass:
//!
//! - an `on` stimulus marks its cell as activated and stages `on`;
//! - an `off` stimulus is dropped if its cell was activated earlier in the
//!   batch, otherwise it stages `off`.
//!
//! A later stimulus overwrites the staged target of an earlier one, so:
//!
//! ```text
//!   [on, off]       → on     (activation latches)
//!   [off, on]       → on     (last staged target)
//!   [off, off]      → off
//!   [on, off, on]   → on
//! ```
//!
//! Note this is not "last write wins": `[on, off]` ends on.

use std::collections::{HashMap, HashSet};

use crate::stimulus::Stimulus;

/// Reduce a batch to one net target per cell, in first-touch order.
pub fn resolve(stimuli: &[Stimulus]) -> Vec<Stimulus> {
    let mut targets: Vec<Stimulus> = Vec::with_capacity(stimuli.len());
    let mut slot: HashMap<(usize, usize), usize> = HashMap::with_capacity(stimuli.len());
    let mut activated: HashSet<(usize, usize)> = HashSet::new();

    for s in stimuli {
        let cell = s.cell();
        if s.state {
            activated.insert(cell);
        } else if activated.contains(&cell) {
            continue;
        }

        match slot.get(&cell) {
            Some(&idx) => targets[idx].state = s.state,
            None => {
                slot.insert(cell, targets.len());
                targets.push(*s);
            }
        }
    }

    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states(stimuli: &[Stimulus]) -> Vec<bool> {
        resolve(stimuli).iter().map(|s| s.state).collect()
    }

    #[test]
    fn test_activation_latches_over_later_deactivation() {
        let batch = [Stimulus::new(1, 1, true), Stimulus::new(1, 1, false)];
        assert_eq!(states(&batch), vec![true]);
    }

    #[test]
    fn test_deactivation_then_activation() {
        let batch = [Stimulus::new(1, 1, false), Stimulus::new(1, 1, true)];
        assert_eq!(states(&batch), vec![true]);
    }

    #[test]
    fn test_plain_deactivations_are_kept() {
        let batch = [Stimulus::new(0, 2, false), Stimulus::new(0, 2, false)];
        assert_eq!(resolve(&batch), vec![Stimulus::new(0, 2, false)]);
    }

    #[test]
    fn test_alternating_sequence_stays_on() {
        let batch = [
            Stimulus::new(3, 0, true),
            Stimulus::new(3, 0, false),
            Stimulus::new(3, 0, true),
            Stimulus::new(3, 0, false),
        ];
        assert_eq!(states(&batch), vec![true]);
    }

    #[test]
    fn test_distinct_cells_keep_first_touch_order() {
        let batch = [
            Stimulus::new(2, 2, false),
            Stimulus::new(0, 1, true),
            Stimulus::new(2, 2, true),
            Stimulus::new(5, 5, false),
            Stimulus::new(0, 1, false),
        ];
        let resolved = resolve(&batch);
        assert_eq!(
            resolved,
            vec![
                Stimulus::new(2, 2, true),
                Stimulus::new(0, 1, true),
                Stimulus::new(5, 5, false),
            ]
        );
    }

    #[test]
    fn test_empty_batch() {
        assert!(resolve(&[]).is_empty());
    }
}
