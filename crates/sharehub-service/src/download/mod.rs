//! Bounded download counting.

pub mod counter;

pub use counter::DownloadCounter;
