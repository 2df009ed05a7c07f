// dimsort/src/core/bucket.rs
use super::Dimensions;
use std::path::{Path, PathBuf};

/// All images of one run that share the same width and height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionBucket {
    width: u32,
    height: u32,
    count: usize,
    total_bytes: u64,
    paths: Vec<PathBuf>,
}

impl DimensionBucket {
    pub fn new(width: u32, height: u32, initial_file_size: u64) -> Self {
        Self {
            width,
            height,
            count: 1,
            total_bytes: initial_file_size,
            paths: Vec::new(),
        }
    }

    pub fn matches(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }

    /// Accounts for one more image of this size.
    pub fn record(&mut self, file_size: u64) {
        self.count += 1;
        self.total_bytes += file_size;
    }

    pub fn push_path(&mut self, path: &Path) {
        self.paths.push(path.to_path_buf());
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn average_bytes(&self) -> u64 {
        self.total_bytes / self.count as u64
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}
