// dimsort/src/processors/prober.rs
use crate::core::{DimSortError, Dimensions, ImageInfo, Result};
use crate::utils::image_format_to_string;
use image::ImageReader;
use std::path::Path;

/// Reads image headers to find pixel dimensions without decoding pixel data.
#[derive(Clone, Default)]
pub struct Prober;

impl Prober {
    pub fn new() -> Self {
        Self
    }

    /// Returns the dimensions of the image at `path`, or `NotAnImage` for
    /// anything that cannot be read as one.
    pub fn probe(&self, path: &Path) -> Result<Dimensions> {
        self.read_header(path)
            .map(|(dimensions, _)| dimensions)
            .map_err(|e| not_an_image(path, e))
    }

    pub fn probe_info(&self, path: &Path) -> Result<ImageInfo> {
        let (dimensions, format) = self.read_header(path).map_err(|e| not_an_image(path, e))?;
        let file_size = std::fs::metadata(path)?.len();

        Ok(ImageInfo {
            dimensions,
            format,
            file_size,
        })
    }

    fn read_header(&self, path: &Path) -> Result<(Dimensions, String)> {
        if !path.is_file() {
            return Err(DimSortError::InvalidParameter(
                "not a regular file".to_string(),
            ));
        }

        // The reader and its file handle are dropped once the header is read.
        let reader = ImageReader::open(path)?.with_guessed_format()?;
        let format = reader
            .format()
            .map(image_format_to_string)
            .ok_or_else(|| DimSortError::InvalidParameter("unrecognized format".to_string()))?;
        let dimensions = reader.into_dimensions()?;

        log::debug!(
            "Probed {}: {}x{} {}",
            path.display(),
            dimensions.0,
            dimensions.1,
            format
        );

        Ok((dimensions.into(), format))
    }
}

fn not_an_image(path: &Path, error: DimSortError) -> DimSortError {
    let reason = match error {
        DimSortError::InvalidParameter(reason) => reason,
        other => other.to_string(),
    };

    DimSortError::NotAnImage {
        path: path.to_path_buf(),
        reason,
    }
}
