//! Selected-index bookkeeping with cyclic wraparound.

/// Holds the committed selection, the item count and the cyclic flag,
/// and performs all index normalization.
#[derive(Debug, Clone)]
pub(crate) struct PositionModel {
    selected: usize,
    count: usize,
    cyclic: bool,
}

impl PositionModel {
    pub fn new(count: usize, cyclic: bool) -> Self {
        Self {
            selected: 0,
            count,
            cyclic,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    pub fn set_cyclic(&mut self, cyclic: bool) {
        self.cyclic = cyclic;
    }

    /// Map a requested index to a valid one.
    ///
    /// In-range indices pass through. Out-of-range indices wrap modulo
    /// the count on cyclic wheels (negative values included) and are
    /// rejected on non-cyclic wheels. An empty wheel rejects everything.
    pub fn normalize(&self, index: i64) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as i64;
        if (0..n).contains(&index) {
            Some(index as usize)
        } else if self.cyclic {
            Some(index.rem_euclid(n) as usize)
        } else {
            None
        }
    }

    /// Change the item count, revalidating the selection.
    ///
    /// A selection that falls out of range wraps modulo the new count
    /// on cyclic wheels and clamps to the last item otherwise. Returns
    /// the `(old, new)` pair when the selection moved. `n == 0` is a
    /// no-op.
    pub fn set_count(&mut self, n: usize) -> Option<(usize, usize)> {
        if n == 0 {
            return None;
        }
        self.count = n;
        let old = self.selected;
        if self.selected >= n {
            self.selected = if self.cyclic { self.selected % n } else { n - 1 };
        }
        if self.selected != old {
            Some((old, self.selected))
        } else {
            None
        }
    }

    /// Store a selection the caller has already validated.
    pub fn commit(&mut self, index: usize) {
        self.selected = index;
    }
}
