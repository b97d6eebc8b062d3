//! HeightIndex - O(log n) prefix sums via Fenwick tree
//!
//! Holds the wrapped line count of every verse block so that block tops do
//! not rescan the whole chapter. Tail appends (the common
//! "extend the passage by one verse" case) cost O(log n) amortised.
//!
//! # Complexity
//!
//! - `prefix_sum` / `sum_before`: O(log n)
//! - `push`: O(log n) amortised
//! - `total`: O(log n)
//! - `len`: O(1)

/// Fenwick-backed cumulative counts over a growable sequence.
#[derive(Debug, Clone)]
pub struct HeightIndex {
    /// Fenwick tree backing storage (1-indexed internally, 0-indexed API).
    tree: Vec<isize>,
    /// Raw per-entry values, used to rebuild the tree when it grows.
    values: Vec<usize>,
}

impl HeightIndex {
    /// Creates a new HeightIndex with the given initial capacity.
    ///
    /// ```
    /// # use versecast::view_state::height_index::HeightIndex;
    /// let index = HeightIndex::new(100);
    /// assert_eq!(index.len(), 0);
    /// assert_eq!(index.total(), 0);
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self {
            tree: vec![0; capacity],
            values: Vec::with_capacity(capacity),
        }
    }

    /// Returns the cumulative value up to and including the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    ///
    /// ```
    /// # use versecast::view_state::height_index::HeightIndex;
    /// let mut index = HeightIndex::new(4);
    /// for lines in [3, 4, 5] {
    ///     index.push(lines);
    /// }
    /// assert_eq!(index.prefix_sum(0), 3);
    /// assert_eq!(index.prefix_sum(1), 7);
    /// assert_eq!(index.prefix_sum(2), 12);
    /// ```
    pub fn prefix_sum(&self, index: usize) -> usize {
        assert!(
            index < self.len(),
            "index {} out of bounds (len: {})",
            index,
            self.len()
        );

        fenwick::array::prefix_sum(&self.tree, index).max(0) as usize
    }

    /// Sum of all entries strictly before `index`; 0 for the first entry.
    ///
    /// Accepts `index == len()`, which yields the total.
    pub fn sum_before(&self, index: usize) -> usize {
        if index == 0 {
            0
        } else {
            self.prefix_sum(index - 1)
        }
    }

    /// Sum of all entries.
    pub fn total(&self) -> usize {
        self.sum_before(self.len())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the index contains no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Appends a new entry.
    ///
    /// Growing the backing storage rebuilds the tree: fresh Fenwick nodes
    /// cover ranges that already hold values and cannot start at zero.
    pub fn push(&mut self, value: usize) {
        let idx = self.values.len();
        self.values.push(value);

        if idx >= self.tree.len() {
            self.rebuild(self.tree.len().max(1) * 2);
        } else {
            fenwick::array::update(&mut self.tree, idx, value as isize);
        }
    }

    fn rebuild(&mut self, capacity: usize) {
        self.tree.clear();
        self.tree.resize(capacity.max(self.values.len()), 0);
        for (i, &value) in self.values.iter().enumerate() {
            fenwick::array::update(&mut self.tree, i, value as isize);
        }
    }
}
