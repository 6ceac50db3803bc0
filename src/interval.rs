use std::fmt;

use num_traits::PrimInt;

/// Represent a range from [start, end]
/// Inclusive of both start and end
#[derive(Eq, Debug, Clone)]
pub struct Interval<I, T>
where
    I: PrimInt + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    pub start: I,
    pub end: I,
    pub val: T,
}

impl<I, T> Interval<I, T>
where
    I: PrimInt + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    /// Check if the interval overlaps a closed query range
    #[inline]
    pub fn overlap(&self, start: I, end: I) -> bool {
        is_overlapping(self.start, self.end, start, end)
    }
}

impl<I, T> PartialEq for Interval<I, T>
where
    I: PrimInt + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    #[inline]
    fn eq(&self, other: &Interval<I, T>) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl<I, T> fmt::Display for Interval<I, T>
where
    I: PrimInt + Send + Sync + fmt::Display,
    T: Eq + Clone + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}-{})", self.start, self.end)
    }
}

/// Check if two closed ranges share at least one position.
///
/// ```
/// use sorted_intersect::is_overlapping;
///
/// assert!(is_overlapping(1, 5, 5, 9));
/// assert!(!is_overlapping(1, 4, 5, 9));
/// ```
#[inline]
pub fn is_overlapping<I: PrimInt>(x1: I, x2: I, y1: I, y2: I) -> bool {
    x1.max(y1) <= x2.min(y2)
}
