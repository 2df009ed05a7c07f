// dimsort/src/processors/mod.rs
mod classifier;
mod prober;
mod reporter;
mod sorter;

pub use classifier::Classifier;
pub use prober::Prober;
pub use reporter::{print_report, write_report, write_sort_summary, EMPTY_REPORT};
pub use sorter::Sorter;
