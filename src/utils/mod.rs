// dimsort/src/utils/mod.rs
use crate::core::{DimSortError, Dimensions, Result};
use std::path::{Path, PathBuf};

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let bytes_f64 = bytes as f64;
    let exponent = ((bytes_f64.log10() / base.log10()).floor() as usize).min(UNITS.len() - 1);
    let size = bytes_f64 / base.powi(exponent as i32);

    format!("{:.2} {}", size, UNITS[exponent])
}

/// `destination/{width}x{height}`
pub fn bucket_directory(destination: &Path, dimensions: Dimensions) -> PathBuf {
    destination.join(dimensions.dir_name())
}

/// Creates `directory` and any missing parents. An existing directory is fine.
pub fn create_dir(directory: &Path) -> Result<()> {
    std::fs::create_dir_all(directory).map_err(|source| DimSortError::DirectoryCreation {
        path: directory.to_path_buf(),
        source,
    })
}

pub fn target_path(source: &Path, target_dir: &Path) -> Result<PathBuf> {
    let file_name = source
        .file_name()
        .ok_or_else(|| DimSortError::MissingFileName(source.to_path_buf()))?;

    Ok(target_dir.join(file_name))
}

/// Immediate entries of `directory`, joined onto it and sorted by name.
pub fn list_entries(directory: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = std::fs::read_dir(directory)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();

    Ok(entries)
}

pub fn image_format_to_string(format: image::ImageFormat) -> String {
    match format {
        image::ImageFormat::Jpeg => "JPEG",
        image::ImageFormat::Png => "PNG",
        image::ImageFormat::Gif => "GIF",
        image::ImageFormat::WebP => "WebP",
        image::ImageFormat::Pnm => "PNM",
        image::ImageFormat::Tiff => "TIFF",
        image::ImageFormat::Tga => "TGA",
        image::ImageFormat::Dds => "DDS",
        image::ImageFormat::Bmp => "BMP",
        image::ImageFormat::Ico => "ICO",
        image::ImageFormat::Hdr => "HDR",
        image::ImageFormat::OpenExr => "OpenEXR",
        image::ImageFormat::Farbfeld => "Farbfeld",
        image::ImageFormat::Avif => "AVIF",
        image::ImageFormat::Qoi => "QOI",
        _ => "Unknown",
    }
    .to_string()
}
