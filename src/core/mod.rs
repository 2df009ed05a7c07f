// dimsort/src/core/mod.rs
mod bucket;

pub use bucket::DimensionBucket;

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Name of the destination subdirectory for images of this size.
    pub fn dir_name(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelocateAction {
    Move,
    Copy,
}

impl RelocateAction {
    pub fn label(&self) -> &'static str {
        match self {
            RelocateAction::Move => "MOVE",
            RelocateAction::Copy => "COPY",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SortConfig {
    pub recursive: bool,
    pub copy: bool,
    pub verbose: bool,
}

#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub dimensions: Dimensions,
    pub format: String,
    pub file_size: u64,
}

#[derive(Debug, Default)]
pub struct SortStats {
    pub relocated_count: usize,
    pub relocated_bytes: u64,
    pub skipped: Vec<PathBuf>,
    pub failures: Vec<(PathBuf, String)>,
}

impl SortConfig {
    pub fn action(&self) -> RelocateAction {
        if self.copy {
            RelocateAction::Copy
        } else {
            RelocateAction::Move
        }
    }

    pub fn validate(&self, destination: &Path) -> Result<()> {
        if destination.as_os_str().is_empty() {
            return Err(DimSortError::InvalidParameter(
                "Destination directory must not be empty".to_string(),
            ));
        }

        if destination.exists() && !destination.is_dir() {
            return Err(DimSortError::InvalidParameter(format!(
                "Destination exists but is not a directory: {}",
                destination.display()
            )));
        }

        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum DimSortError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("\"{}\": is not image ({reason})", .path.display())]
    NotAnImage { path: PathBuf, reason: String },

    #[error("Destination path '{}' already exists", .destination.display())]
    RelocationConflict { path: PathBuf, destination: PathBuf },

    #[error("Cannot create directory {}: {source}", .path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File name not found for {}", .0.display())]
    MissingFileName(PathBuf),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, DimSortError>;
