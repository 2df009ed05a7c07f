pub mod cli;
mod core;
mod processors;
mod utils;

pub use cli::{Cli, Commands};
pub use self::core::{
    DimSortError, DimensionBucket, Dimensions, ImageInfo, RelocateAction, Result, SortConfig,
    SortStats,
};
pub use processors::{
    print_report, write_report, write_sort_summary, Classifier, Prober, Sorter, EMPTY_REPORT,
};
pub use utils::{bucket_directory, format_file_size};

pub mod prelude {
    pub use crate::{Classifier, DimensionBucket, Dimensions, Prober, SortConfig, Sorter};
}

/// Buckets the images directly inside `directory` (or below it when
/// `recursive`) and prints the report to stdout.
pub fn dry_run(directory: &std::path::Path, recursive: bool) -> Result<Vec<DimensionBucket>> {
    let buckets = Classifier::new(recursive).classify(directory)?;
    print_report(&buckets)?;
    Ok(buckets)
}
