//! Cell pools and resource-limited competition.
//!
//! A pool holds the cells of a single class. The trainer keeps one pool of
//! memory cells per class, plus a short-lived pool of candidate clones
//! (ARBs) while an antigen is being presented.

use airs_core::affinity::AffinityFunction;
use airs_core::cell::Cell;
use airs_core::error::Result;

/// Turn an affinity into a stimulation in `[0, 1]`. `scale` is the largest
/// affinity the feature space allows.
pub fn stimulation(affinity: f64, scale: f64) -> f64 {
    1.0 - normalised_affinity(affinity, scale)
}

/// Distance as a fraction of the widest distance in the feature space.
///
/// Affinities are sums of squared differences, so this is
/// `sqrt(affinity / scale)`, capped at 1.
pub fn normalised_affinity(affinity: f64, scale: f64) -> f64 {
    if scale <= 0.0 {
        return if affinity > 0.0 { 1.0 } else { 0.0 };
    }
    (affinity / scale).clamp(0.0, 1.0).sqrt()
}

/// Result of one round of resource competition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Competition {
    /// Cells removed this round.
    pub removed: usize,
    /// Resources held by the survivors.
    pub allocated: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellPool {
    class_value: usize,
    cells: Vec<Cell>,
}

impl CellPool {
    pub fn new(class_value: usize) -> Self {
        Self {
            class_value,
            cells: Vec::new(),
        }
    }

    pub fn class_value(&self) -> usize {
        self.class_value
    }

    pub fn push(&mut self, cell: Cell) {
        debug_assert_eq!(cell.class_value(), self.class_value);
        self.cells.push(cell);
    }

    pub fn extend(&mut self, cells: impl IntoIterator<Item = Cell>) {
        for cell in cells {
            self.push(cell);
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Remove a cell, keeping the order of the rest.
    pub fn remove(&mut self, index: usize) -> Option<Cell> {
        if index < self.cells.len() {
            Some(self.cells.remove(index))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    /// Score every cell against `antigen` on the fixed scale of the feature
    /// space.
    pub fn stimulate(&mut self, antigen: &[f64], affinity: &AffinityFunction, scale: f64) -> Result<()> {
        for cell in &mut self.cells {
            let a = affinity.affinity(cell.values(), antigen)?;
            cell.set_stimulation(stimulation(a, scale));
        }
        Ok(())
    }

    /// Score every cell against `antigen` relative to the affinities seen in
    /// this pool: the closest cell gets 1, the furthest 0. A pool whose cells
    /// are all equally close scores 1 throughout.
    pub fn stimulate_relative(&mut self, antigen: &[f64], affinity: &AffinityFunction) -> Result<()> {
        let affinities = self
            .cells
            .iter()
            .map(|cell| affinity.affinity(cell.values(), antigen))
            .collect::<Result<Vec<f64>>>()?;
        let (lo, hi) = affinities
            .iter()
            .fold((f64::MAX, f64::MIN), |(lo, hi), &a| (lo.min(a), hi.max(a)));

        for (cell, a) in self.cells.iter_mut().zip(affinities) {
            let s = if hi > lo { 1.0 - (a - lo) / (hi - lo) } else { 1.0 };
            cell.set_stimulation(s);
        }
        Ok(())
    }

    /// Indices of the `n` most stimulated cells, best first. Ties keep pool
    /// order.
    pub fn best_matches(&self, n: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.cells.len()).collect();
        order.sort_by(|&a, &b| {
            self.cells[b]
                .stimulation()
                .total_cmp(&self.cells[a].stimulation())
        });
        order.truncate(n);
        order
    }

    /// The most stimulated cell; the earliest one on ties.
    pub fn strongest(&self) -> Option<&Cell> {
        self.best_matches(1).first().map(|&i| &self.cells[i])
    }

    pub fn mean_stimulation(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        self.cells.iter().map(Cell::stimulation).sum::<f64>() / self.cells.len() as f64
    }

    /// Allocate resources by relative stimulation and remove the losers.
    ///
    /// Each cell receives `clonal_rate` scaled by its stimulation normalised
    /// over the pool's observed range (a pool of equals all get the full
    /// share). While the total exceeds `total_resources`, resources are
    /// taken from the weakest cells first and exhausted cells are removed.
    /// Survivors left with no resources, or with less than `prune_threshold`,
    /// are removed too. The strongest cell always survives.
    pub fn compete_for_resources(
        &mut self,
        total_resources: f64,
        clonal_rate: f64,
        prune_threshold: f64,
    ) -> Competition {
        if self.cells.is_empty() {
            return Competition {
                removed: 0,
                allocated: 0.0,
            };
        }

        let (lo, hi) = self.cells.iter().fold((f64::MAX, f64::MIN), |(lo, hi), c| {
            (lo.min(c.stimulation()), hi.max(c.stimulation()))
        });

        let mut allocation: Vec<(usize, f64)> = self
            .cells
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let share = if hi > lo {
                    (c.stimulation() - lo) / (hi - lo)
                } else {
                    1.0
                };
                (i, share * clonal_rate)
            })
            .collect();
        // weakest first
        allocation.sort_by(|a, b| a.1.total_cmp(&b.1));

        let mut removed = vec![false; self.cells.len()];
        let mut excess = allocation.iter().map(|(_, r)| r).sum::<f64>() - total_resources;
        for (index, resources) in allocation.iter_mut() {
            if excess <= 0.0 {
                break;
            }
            if *resources <= excess {
                excess -= *resources;
                *resources = 0.0;
                removed[*index] = true;
            } else {
                *resources -= excess;
                excess = 0.0;
            }
        }

        for (index, resources) in &allocation {
            if *resources <= 0.0 || *resources < prune_threshold {
                removed[*index] = true;
            }
        }
        if let Some((strongest, _)) = allocation.last() {
            removed[*strongest] = false;
        }

        let allocated = allocation
            .iter()
            .filter(|(i, _)| !removed[*i])
            .map(|(_, r)| r)
            .sum();
        let before = self.cells.len();
        let mut index = 0;
        self.cells.retain(|_| {
            let keep = !removed[index];
            index += 1;
            keep
        });

        Competition {
            removed: before - self.cells.len(),
            allocated,
        }
    }
}
