//! Pixel-State Events
//!
//! A [`Stimulus`] is one event from a sensor: "cell `(row, col)` is now on"
//! (or off). A [`Stimuli`] batch is an ordered list of such events that the
//! engine applies as one unit.
//!
//! ```rust
//! use efft_core::stimulus::{Stimuli, Stimulus};
//!
//! let mut s = Stimulus::at(1, 2);
//! assert!(s.state);
//! s.off();
//! assert_eq!(s.to_string(), "<Stimulus(row=1, col=2, state=off)>");
//!
//! let mut batch: Stimuli = vec![Stimulus::at(0, 0), Stimulus::at(3, 1)].into();
//! batch.toggle();
//! assert!(batch.iter().all(|s| !s.state));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::ops::{Index, IndexMut};

/// A single pixel-state change event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stimulus {
    pub row: usize,
    pub col: usize,
    /// `true` = on, `false` = off
    pub state: bool,
}

impl Stimulus {
    pub fn new(row: usize, col: usize, state: bool) -> Self {
        Self { row, col, state }
    }

    /// An activation event at `(row, col)`
    pub fn at(row: usize, col: usize) -> Self {
        Self::new(row, col, true)
    }

    pub fn on(&mut self) -> &mut Self {
        self.state = true;
        self
    }

    pub fn off(&mut self) -> &mut Self {
        self.state = false;
        self
    }

    pub fn set(&mut self, state: bool) -> &mut Self {
        self.state = state;
        self
    }

    pub fn toggle(&mut self) -> &mut Self {
        self.state = !self.state;
        self
    }

    /// Whether both events address the same cell, regardless of state.
    pub fn same_cell(&self, other: &Stimulus) -> bool {
        self.row == other.row && self.col == other.col
    }

    /// `(row, col)` pair
    #[inline]
    pub fn cell(&self) -> (usize, usize) {
        (self.row, self.col)
    }
}

impl Default for Stimulus {
    fn default() -> Self {
        Self::at(0, 0)
    }
}

impl fmt::Display for Stimulus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Stimulus(row={}, col={}, state={})>",
            self.row,
            self.col,
            if self.state { "on" } else { "off" }
        )
    }
}

impl From<(usize, usize)> for Stimulus {
    fn from((row, col): (usize, usize)) -> Self {
        Self::at(row, col)
    }
}

impl From<(usize, usize, bool)> for Stimulus {
    fn from((row, col, state): (usize, usize, bool)) -> Self {
        Self::new(row, col, state)
    }
}

/// Ordered batch of stimuli
///
/// Insertion order is preserved and duplicates are kept: the engine's batch
/// rule depends on both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stimuli {
    items: Vec<Stimulus>,
}

impl Stimuli {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Append a stimulus
    pub fn push(&mut self, stimulus: impl Into<Stimulus>) {
        self.items.push(stimulus.into());
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Stimulus> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Stimulus> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stimulus> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Stimulus> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[Stimulus] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Switch every member on
    pub fn on(&mut self) {
        self.set(true);
    }

    /// Switch every member off
    pub fn off(&mut self) {
        self.set(false);
    }

    pub fn set(&mut self, state: bool) {
        for s in &mut self.items {
            s.state = state;
        }
    }

    pub fn toggle(&mut self) {
        for s in &mut self.items {
            s.state = !s.state;
        }
    }

    /// Collapse duplicates to one stimulus per cell.
    ///
    /// Cells keep the position of their first occurrence. When a cell appears
    /// with both states, the `on` stimulus is kept.
    pub fn filter(&mut self) {
        let mut out: Vec<Stimulus> = Vec::with_capacity(self.items.len());
        let mut position: HashMap<(usize, usize), usize> = HashMap::with_capacity(self.items.len());

        for s in &self.items {
            match position.get(&s.cell()) {
                Some(&idx) => {
                    if s.state && !out[idx].state {
                        out[idx] = *s;
                    }
                }
                None => {
                    position.insert(s.cell(), out.len());
                    out.push(*s);
                }
            }
        }

        self.items = out;
    }
}

impl From<Vec<Stimulus>> for Stimuli {
    fn from(items: Vec<Stimulus>) -> Self {
        Self { items }
    }
}

impl From<Stimuli> for Vec<Stimulus> {
    fn from(stimuli: Stimuli) -> Self {
        stimuli.items
    }
}

impl AsRef<[Stimulus]> for Stimuli {
    fn as_ref(&self) -> &[Stimulus] {
        &self.items
    }
}

impl Index<usize> for Stimuli {
    type Output = Stimulus;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl IndexMut<usize> for Stimuli {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.items[index]
    }
}

impl<S: Into<Stimulus>> FromIterator<S> for Stimuli {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<Stimulus>> Extend<S> for Stimuli {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.items.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for Stimuli {
    type Item = Stimulus;
    type IntoIter = std::vec::IntoIter<Stimulus>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Stimuli {
    type Item = &'a Stimulus;
    type IntoIter = std::slice::Iter<'a, Stimulus>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a mut Stimuli {
    type Item = &'a mut Stimulus;
    type IntoIter = std::slice::IterMut<'a, Stimulus>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}
