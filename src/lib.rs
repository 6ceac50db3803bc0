//! A sweep-line interval overlap index for start-sorted interval streams.
//!
//! This crate answers the query "which stored intervals overlap `[start, end]`?"
//! for workloads where the reference intervals arrive (or can be pre-sorted)
//! in ascending start order. Instead of descending a tree per query, indexing
//! precomputes two directional neighbour tables so a query seeded by a single
//! binary search can hop through its whole overlap set, and a per-instance
//! cursor makes streams of ascending queries nearly free of binary searches.
//!
//! ## Features
//!
//! - **Sorted-input builder**: intervals load in ascending start order with an
//!   opaque payload per interval; out-of-order input is rejected.
//! - **One-shot indexing**: [`SortedIntersect::index`] computes the neighbour
//!   tables in a single backward sweep.
//! - **Cursor-accelerated queries**: monotone query streams cost amortized
//!   O(1 + output) per query; arbitrary orders stay correct at
//!   O(log n + output).
//!
//! ## Quick Start
//!
//! ```rust
//! use sorted_intersect::SortedIntersect;
//!
//! // load some intervals (e.g., aligned reads), sorted by start
//! let mut itv = SortedIntersect::new();
//! itv.add(100u32, 200, "read1").unwrap();
//! itv.add(150, 300, "read2").unwrap();
//! itv.add(400, 500, "read3").unwrap();
//!
//! // one-shot index, then query as often as needed
//! itv.index();
//!
//! let mut found = Vec::new();
//! itv.search_overlap(180, 250, &mut found);
//! assert_eq!(found.len(), 2); // read1 and read2
//!
//! // indices resolve back to the stored records
//! for i in found {
//!     println!("hit: {}", itv.get(i).unwrap());
//! }
//! ```
//!
//! ## Semantics
//!
//! Intervals are closed on both ends: two intervals overlap iff
//! `max(a.start, b.start) <= min(a.end, b.end)`. Queries mutate the cursor,
//! so an instance is not shareable across threads for querying; clone per
//! worker instead. The interval and neighbour tables are immutable after
//! [`SortedIntersect::index`].

/// The stored interval record and overlap predicates.
pub mod interval;

/// Error types for this crate.
pub mod errors;

/// The sweep-line overlap index.
///
/// See [`SortedIntersect`] for details.
pub mod sorted_intersect;

// re-exports
pub use self::errors::SortedIntersectError;
pub use self::interval::{is_overlapping, Interval};
pub use self::sorted_intersect::SortedIntersect;
