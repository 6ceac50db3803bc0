use thiserror::Error;

#[derive(Error, Debug)]
pub enum SortedIntersectError {
    #[error("interval {index} starts before its predecessor; intervals must be added in ascending start order")]
    UnsortedInput { index: usize },
}
