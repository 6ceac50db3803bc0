use log::info;
use num_traits::PrimInt;

use crate::errors::SortedIntersectError;
use crate::interval::{is_overlapping, Interval};

/// Placeholder for `min_right` while no right anchor has been discovered.
const NO_ANCHOR: i64 = i64::MAX - 1;

/// A sweep-line overlap index over start-sorted intervals.
///
/// `SortedIntersect` answers the query "which stored intervals overlap
/// `[start, end]`?" for workloads where the reference intervals (and,
/// ideally, the queries) arrive in ascending start order. Instead of a
/// tree, indexing precomputes two neighbour tables that let a query hop
/// through the overlap set from a single binary-search anchor, and a
/// cursor remembers the previous query position so that monotone query
/// streams skip most of the binary search.
///
/// Intervals are closed on both ends: `[1, 5]` and `[5, 9]` overlap.
///
/// # Examples
///
/// ```
/// use sorted_intersect::SortedIntersect;
///
/// // Reference intervals must be added in ascending start order
/// let mut itv = SortedIntersect::new();
/// itv.add(1000u32, 2000, "GENE1").unwrap();
/// itv.add(1500, 2500, "GENE2").unwrap();
/// itv.add(5000, 6000, "GENE3").unwrap();
/// itv.index();
///
/// // Query for genes overlapping positions 1800-2200
/// let mut found = Vec::new();
/// itv.search_overlap(1800, 2200, &mut found);
/// assert_eq!(found.len(), 2); // GENE1 and GENE2
/// ```
///
/// # Concurrency
///
/// The cursor makes every query a mutation, so a single instance must not
/// be shared between threads for querying. Clone the index per worker; the
/// interval and neighbour tables are never modified after [`index`](Self::index).
#[derive(Debug, Clone)]
pub struct SortedIntersect<I, T>
where
    I: PrimInt + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    /// Stored records in insertion (ascending start) order.
    intervals: Vec<Interval<I, T>>,
    /// Dense projections of the interval coordinates, for the binary search.
    starts: Vec<I>,
    ends: Vec<I>,
    /// Neighbour tables, `-1` for "none". `branch_left[i]` is the
    /// start-latest overlapping neighbour whose end stays within
    /// interval `i`'s; `branch_right[i]` the start-latest one extending
    /// past it.
    branch_left: Vec<i64>,
    branch_right: Vec<i64>,
    /// Cursor position in `starts`, seeds the next binary search.
    idx: usize,
    /// Start of the most recent query, decides the search direction.
    last_q_start: I,
    /// Interval count frozen by `index()`.
    n_intervals: usize,
    sorted: bool,
}

impl<I, T> Default for SortedIntersect<I, T>
where
    I: PrimInt + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<I, T> SortedIntersect<I, T>
where
    I: PrimInt + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    /// Create an empty index.
    pub fn new() -> Self {
        SortedIntersect {
            intervals: Vec::new(),
            starts: Vec::new(),
            ends: Vec::new(),
            branch_left: Vec::new(),
            branch_right: Vec::new(),
            idx: 0,
            last_q_start: I::min_value(),
            n_intervals: 0,
            sorted: true,
        }
    }

    /// Create an empty index with room for `n` intervals.
    pub fn with_capacity(n: usize) -> Self {
        let mut itv = Self::new();
        itv.reserve(n);
        itv
    }

    /// Hint the expected number of intervals to avoid reallocation while
    /// loading.
    pub fn reserve(&mut self, n: usize) {
        self.intervals.reserve(n);
        self.starts.reserve(n);
        self.ends.reserve(n);
    }

    /// Number of intervals currently held.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Returns `true` if no intervals have been added.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Returns `false` once an out-of-order `add` has been rejected.
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// The stored record at `idx`, if any.
    pub fn get(&self, idx: usize) -> Option<&Interval<I, T>> {
        self.intervals.get(idx)
    }

    /// Iterate over the stored records in start order.
    pub fn iter(&self) -> std::slice::Iter<'_, Interval<I, T>> {
        self.intervals.iter()
    }

    /// Append one interval with its payload.
    ///
    /// Starts must be non-decreasing; an out-of-order start is rejected
    /// without being stored and the index is flagged unsorted. Callers
    /// should [`clear`](Self::clear) and reload sorted input after that.
    ///
    /// ```
    /// use sorted_intersect::SortedIntersect;
    ///
    /// let mut itv = SortedIntersect::new();
    /// itv.add(10u32, 20, ()).unwrap();
    /// assert!(itv.add(5, 8, ()).is_err());
    /// assert_eq!(itv.len(), 1);
    /// ```
    pub fn add(&mut self, start: I, end: I, val: T) -> Result<(), SortedIntersectError> {
        if let Some(last) = self.intervals.last() {
            if start < last.start {
                self.sorted = false;
                return Err(SortedIntersectError::UnsortedInput {
                    index: self.intervals.len(),
                });
            }
        }
        self.intervals.push(Interval { start, end, val });
        self.starts.push(start);
        self.ends.push(end);
        Ok(())
    }

    /// Append `(start, end, payload)` triples from an iterator.
    pub fn add_from_iter<It>(&mut self, iter: It) -> Result<(), SortedIntersectError>
    where
        It: IntoIterator<Item = (I, I, T)>,
    {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for (start, end, val) in iter {
            self.add(start, end, val)?;
        }
        Ok(())
    }

    /// Reset to the pre-`add` state. The index can be reloaded and
    /// re-indexed afterwards.
    pub fn clear(&mut self) {
        self.intervals.clear();
        self.starts.clear();
        self.ends.clear();
        self.branch_left.clear();
        self.branch_right.clear();
        self.idx = 0;
        self.last_q_start = I::min_value();
        self.n_intervals = 0;
        self.sorted = true;
    }

    /// Locate the highest position with `starts[idx] <= pos` and leave it
    /// in the cursor. The previous query start picks which side of the
    /// cursor to search.
    fn binary_search(&mut self, pos: I) {
        let starts = &self.starts[..self.n_intervals];
        let mut lower = if self.last_q_start < pos {
            self.idx + starts[self.idx..].partition_point(|&s| s < pos)
        } else {
            starts[..self.idx].partition_point(|&s| s < pos)
        };
        if lower != 0 && (lower == starts.len() || starts[lower] > pos) {
            lower -= 1;
        }
        self.idx = lower;
    }

    /// Build the neighbour tables. Call once after loading; calling again
    /// rebuilds from scratch.
    ///
    /// For each interval `i`, a backward sweep from the last interval
    /// starting within `i`'s span records the start-latest overlapping
    /// neighbour on each side: `branch_left[i]` for neighbours ending at
    /// or before `i`'s end, `branch_right[i]` for neighbours ending past
    /// it. Queries later walk `branch_right` chains to reach overlaps the
    /// contiguous backward sweep would miss.
    pub fn index(&mut self) {
        self.n_intervals = self.intervals.len();
        self.branch_left.clear();
        self.branch_right.clear();
        self.branch_left.resize(self.n_intervals, -1);
        self.branch_right.resize(self.n_intervals, -1);
        if self.n_intervals < 2 {
            self.idx = 0;
            return;
        }
        self.idx = 0;
        for i in (0..self.n_intervals).rev() {
            let start = self.starts[i];
            let end = self.ends[i];
            self.binary_search(end);
            self.last_q_start = start;
            for j in (0..=self.idx).rev() {
                if j == i {
                    continue;
                }
                let q_start = self.starts[j];
                let q_end = self.ends[j];
                if !is_overlapping(start, end, q_start, q_end) {
                    // starts are sorted, nothing further left can overlap
                    break;
                }
                if q_end > end {
                    if self.branch_right[i] < 0
                        || q_start > self.starts[self.branch_right[i] as usize]
                    {
                        self.branch_right[i] = j as i64;
                    }
                    if self.branch_left[j] < 0
                        || q_start > self.starts[self.branch_left[j] as usize]
                    {
                        self.branch_left[j] = i as i64;
                    }
                } else {
                    if self.branch_left[i] < 0
                        || q_start > self.starts[self.branch_left[i] as usize]
                    {
                        self.branch_left[i] = j as i64;
                    }
                    if self.branch_right[j] < 0
                        || q_start > self.starts[self.branch_right[j] as usize]
                    {
                        // i must not keep j as its right anchor once j anchors to i
                        if self.branch_right[i] == j as i64 {
                            self.branch_right[i] = -1;
                        }
                        self.branch_right[j] = i as i64;
                    }
                }
            }
        }
        self.idx = 0;
        info!("indexed {} intervals", self.n_intervals);
    }

    /// Collect into `found` the indices of every stored interval that
    /// overlaps `[start, end]`. The order of results is unspecified and
    /// `found` is cleared on entry. Before [`index`](Self::index) has run
    /// (or on an empty store) the call returns without touching `found`.
    ///
    /// Queries issued in ascending start order reuse the cursor and skip
    /// most of the binary search; any other order is still answered
    /// correctly.
    ///
    /// ```
    /// use sorted_intersect::SortedIntersect;
    ///
    /// let mut itv = SortedIntersect::new();
    /// itv.add(0u32, 10, 'a').unwrap();
    /// itv.add(5, 15, 'b').unwrap();
    /// itv.index();
    ///
    /// let mut found = Vec::new();
    /// itv.search_overlap(8, 12, &mut found);
    /// found.sort_unstable();
    /// assert_eq!(found, vec![0, 1]);
    /// ```
    pub fn search_overlap(&mut self, start: I, end: I, found: &mut Vec<usize>) {
        if self.n_intervals == 0 {
            return;
        }
        found.clear();

        self.binary_search(end);
        let bl = self.branch_left[self.idx];
        let mut max_right = self.branch_right[self.idx];
        let mut min_right = if max_right < 0 { NO_ANCHOR } else { max_right };
        let start_idx = if bl >= 0 && self.starts[bl as usize] <= end {
            bl.max(self.idx as i64)
        } else {
            self.idx as i64
        };
        let mut i = start_idx as usize;

        // Sweep backward until a right anchor turns up
        if max_right < 0 {
            while i > 0 {
                let br = self.branch_right[i];
                if br >= 0 {
                    max_right = max_right.max(br);
                    min_right = min_right.min(br);
                    break;
                }
                if is_overlapping(start, end, self.starts[i], self.ends[i]) {
                    found.push(i);
                } else if self.ends[i] < start {
                    break;
                }
                i -= 1;
            }
        }
        // With an anchor in hand the remaining run is contiguous
        if max_right >= 0 {
            while i > 0 {
                if is_overlapping(start, end, self.starts[i], self.ends[i]) {
                    found.push(i);
                } else if self.ends[i] < start {
                    break;
                }
                i -= 1;
            }
        }
        if i == 0 && is_overlapping(start, end, self.starts[0], self.ends[0]) {
            found.push(0);
        }

        // Walk the right-anchor chains
        if max_right > start_idx {
            while max_right >= 0 {
                let m = max_right as usize;
                if is_overlapping(start, end, self.starts[m], self.ends[m]) {
                    found.push(m);
                    min_right = min_right.min(self.branch_right[m]);
                }
                max_right = self.branch_right[m];
            }
        } else if min_right < start_idx {
            let i_right = i as i64;
            while min_right >= 0 && min_right < i_right {
                let m = min_right as usize;
                if is_overlapping(start, end, self.starts[m], self.ends[m]) {
                    found.push(m);
                }
                min_right = self.branch_right[m];
            }
        }
        self.last_q_start = start;
    }

    /// Collect into `found` the indices of every stored interval covering
    /// `pos`.
    ///
    /// ```
    /// use sorted_intersect::SortedIntersect;
    ///
    /// let mut itv = SortedIntersect::new();
    /// itv.add(2i32, 4, 'a').unwrap();
    /// itv.add(6, 8, 'b').unwrap();
    /// itv.index();
    ///
    /// let mut found = Vec::new();
    /// itv.search_point(3, &mut found);
    /// assert_eq!(found, vec![0]);
    /// ```
    pub fn search_point(&mut self, pos: I, found: &mut Vec<usize>) {
        self.search_overlap(pos, pos, found);
    }

    /// Clone out every stored record overlapping `[start, end]`.
    ///
    /// ```
    /// use sorted_intersect::SortedIntersect;
    ///
    /// let mut itv = SortedIntersect::new();
    /// itv.add(0u32, 10, 1).unwrap();
    /// itv.add(5, 15, 2).unwrap();
    /// itv.index();
    ///
    /// let hits = itv.find(8, 12);
    /// assert_eq!(hits.len(), 2);
    /// ```
    pub fn find(&mut self, start: I, end: I) -> Vec<Interval<I, T>> {
        let mut found = Vec::new();
        self.search_overlap(start, end, &mut found);
        found.iter().map(|&i| self.intervals[i].clone()).collect()
    }
}

impl<I, T> IntoIterator for SortedIntersect<I, T>
where
    I: PrimInt + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    type Item = Interval<I, T>;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.into_iter()
    }
}

impl<'a, I, T> IntoIterator for &'a SortedIntersect<I, T>
where
    I: PrimInt + Send + Sync,
    T: Eq + Clone + Send + Sync + 'a,
{
    type Item = &'a Interval<I, T>;
    type IntoIter = std::slice::Iter<'a, Interval<I, T>>;

    fn into_iter(self) -> std::slice::Iter<'a, Interval<I, T>> {
        self.intervals.iter()
    }
}
