// dimsort/src/processors/classifier.rs
use crate::core::{DimSortError, DimensionBucket, Result};
use crate::processors::Prober;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Groups the images of a directory by dimensions without touching them.
pub struct Classifier {
    prober: Prober,
    recursive: bool,
}

impl Classifier {
    pub fn new(recursive: bool) -> Self {
        Self {
            prober: Prober::new(),
            recursive,
        }
    }

    /// Buckets every image in `directory`, in first-seen order.
    pub fn classify(&self, directory: &Path) -> Result<Vec<DimensionBucket>> {
        if !directory.is_dir() {
            return Err(DimSortError::InvalidParameter(format!(
                "Input path is not a directory: {}",
                directory.display()
            )));
        }

        let mut buckets: Vec<DimensionBucket> = Vec::new();

        for path in self.collect_files(directory) {
            let dimensions = match self.prober.probe(&path) {
                Ok(dimensions) => dimensions,
                Err(e) => {
                    log::debug!("Skipping {}", e);
                    continue;
                }
            };
            let file_size = std::fs::metadata(&path)?.len();

            match buckets
                .iter_mut()
                .find(|bucket| bucket.matches(dimensions.width, dimensions.height))
            {
                Some(bucket) => {
                    bucket.record(file_size);
                    bucket.push_path(&path);
                }
                None => {
                    let mut bucket =
                        DimensionBucket::new(dimensions.width, dimensions.height, file_size);
                    bucket.push_path(&path);
                    buckets.push(bucket);
                }
            }
        }

        log::info!(
            "Found {} dimension groups in {}",
            buckets.len(),
            directory.display()
        );

        Ok(buckets)
    }

    fn collect_files(&self, directory: &Path) -> Vec<PathBuf> {
        let walker = if self.recursive {
            WalkDir::new(directory)
        } else {
            WalkDir::new(directory).max_depth(1)
        };

        walker
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Cannot read entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .collect()
    }
}
