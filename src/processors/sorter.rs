// dimsort/src/processors/sorter.rs
use crate::core::{DimSortError, RelocateAction, Result, SortConfig, SortStats};
use crate::processors::Prober;
use crate::utils::{bucket_directory, create_dir, list_entries, target_path};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Moves or copies images into `destination/{width}x{height}/`.
pub struct Sorter {
    config: SortConfig,
    prober: Prober,
}

impl Sorter {
    pub fn new(config: SortConfig) -> Self {
        Self {
            config,
            prober: Prober::new(),
        }
    }

    /// Sorts `inputs` and prints verbose action records to stdout.
    pub fn sort<P: AsRef<Path>>(&self, inputs: &[P], destination: &Path) -> Result<SortStats> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.sort_with_output(inputs, destination, &mut out)
    }

    /// Per-file failures are collected in the returned stats. Only a
    /// destination subdirectory that cannot be created aborts the run.
    pub fn sort_with_output<P: AsRef<Path>, W: Write>(
        &self,
        inputs: &[P],
        destination: &Path,
        out: &mut W,
    ) -> Result<SortStats> {
        self.config.validate(destination)?;

        let inputs: Vec<PathBuf> = inputs.iter().map(|p| p.as_ref().to_path_buf()).collect();
        let pb = self.create_progress_bar();
        let mut stats = SortStats::default();

        let result = self.sort_paths(&inputs, destination, out, &pb, &mut stats);
        pb.finish_and_clear();
        result?;

        log::info!(
            "{} images relocated, {} skipped, {} failed",
            stats.relocated_count,
            stats.skipped.len(),
            stats.failures.len()
        );

        Ok(stats)
    }

    fn sort_paths<W: Write>(
        &self,
        paths: &[PathBuf],
        destination: &Path,
        out: &mut W,
        pb: &ProgressBar,
        stats: &mut SortStats,
    ) -> Result<()> {
        for path in paths {
            pb.set_message(path.display().to_string());
            pb.tick();

            match self.prober.probe(path) {
                Ok(dimensions) => {
                    let target_dir = bucket_directory(destination, dimensions);
                    create_dir(&target_dir)?;

                    match self.relocate(path, &target_dir) {
                        Ok(bytes) => {
                            stats.relocated_count += 1;
                            stats.relocated_bytes += bytes;
                            if self.config.verbose {
                                if let Err(e) = writeln!(
                                    out,
                                    "{}: \"{}\"\nTO:   \"{}\"",
                                    self.config.action().label(),
                                    path.display(),
                                    target_dir.display()
                                ) {
                                    log::warn!("Cannot write action record: {}", e);
                                }
                            }
                        }
                        Err(e) => {
                            log::error!("{}", e);
                            stats.failures.push((path.clone(), e.to_string()));
                        }
                    }
                }
                Err(_) if self.config.recursive && path.is_dir() => {
                    if is_same_dir(path, destination) {
                        log::debug!("Not descending into destination {}", path.display());
                        continue;
                    }

                    match list_entries(path) {
                        Ok(entries) => self.sort_paths(&entries, destination, out, pb, stats)?,
                        Err(e) => {
                            log::error!("Cannot list {}: {}", path.display(), e);
                            stats.failures.push((path.clone(), e.to_string()));
                        }
                    }
                }
                Err(e) => {
                    log::warn!("\"{}\": is not image", path.display());
                    log::debug!("{}", e);
                    stats.skipped.push(path.clone());
                }
            }
        }

        Ok(())
    }

    /// Returns the number of bytes relocated.
    fn relocate(&self, source: &Path, target_dir: &Path) -> Result<u64> {
        let target = target_path(source, target_dir)?;

        if target.exists() {
            return Err(DimSortError::RelocationConflict {
                path: source.to_path_buf(),
                destination: target,
            });
        }

        let bytes = fs::metadata(source)?.len();

        match self.config.action() {
            RelocateAction::Copy => {
                if let Err(e) = fs::copy(source, &target) {
                    discard_partial(&target);
                    return Err(e.into());
                }
            }
            RelocateAction::Move => move_file(source, &target)?,
        }

        Ok(bytes)
    }

    fn create_progress_bar(&self) -> ProgressBar {
        if self.config.verbose {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb
    }
}

fn move_file(source: &Path, target: &Path) -> Result<()> {
    move_with(source, target, |from, to| fs::rename(from, to))
}

fn move_with<F>(source: &Path, target: &Path, rename: F) -> Result<()>
where
    F: FnOnce(&Path, &Path) -> io::Result<()>,
{
    match rename(source, target) {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device(&e) => {
            log::debug!("{} is on another filesystem, copying instead", source.display());
            copy_then_remove(source, target)
        }
        Err(e) => Err(e.into()),
    }
}

/// Leaves no partial or duplicate target behind when either step fails.
fn copy_then_remove(source: &Path, target: &Path) -> Result<()> {
    let result = fs::copy(source, target).and_then(|_| fs::remove_file(source));

    if let Err(e) = result {
        discard_partial(target);
        return Err(e.into());
    }

    Ok(())
}

fn discard_partial(target: &Path) {
    if target.exists() {
        if let Err(e) = fs::remove_file(target) {
            log::error!("Cannot remove {}: {}", target.display(), e);
        }
    }
}

#[cfg(unix)]
fn is_cross_device(e: &io::Error) -> bool {
    // EXDEV
    e.raw_os_error() == Some(18)
}

#[cfg(windows)]
fn is_cross_device(e: &io::Error) -> bool {
    // ERROR_NOT_SAME_DEVICE
    e.raw_os_error() == Some(17)
}

#[cfg(not(any(unix, windows)))]
fn is_cross_device(_e: &io::Error) -> bool {
    false
}

fn is_same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn save_image(path: &Path, width: u32, height: u32) {
        image::RgbImage::new(width, height).save(path).unwrap();
    }

    fn config(recursive: bool, copy: bool, verbose: bool) -> SortConfig {
        SortConfig {
            recursive,
            copy,
            verbose,
        }
    }

    #[test]
    fn verbose_move_prints_action_record() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let image = src.path().join("pic.png");
        save_image(&image, 3, 2);

        let mut out = Vec::new();
        let stats = Sorter::new(config(false, false, true))
            .sort_with_output(&[&image], dest.path(), &mut out)
            .unwrap();

        assert_eq!(stats.relocated_count, 1);
        let expected = format!(
            "MOVE: \"{}\"\nTO:   \"{}\"\n",
            image.display(),
            dest.path().join("3x2").display()
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
        assert!(dest.path().join("3x2").join("pic.png").is_file());
        assert!(!image.exists());
    }

    #[test]
    fn quiet_copy_prints_nothing() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let image = src.path().join("pic.png");
        save_image(&image, 1, 1);

        let mut out = Vec::new();
        Sorter::new(config(false, true, false))
            .sort_with_output(&[&image], dest.path(), &mut out)
            .unwrap();

        assert!(out.is_empty());
        assert!(image.exists());
    }

    #[test]
    fn directory_without_recursion_is_skipped() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        save_image(&src.path().join("pic.png"), 2, 2);

        let mut out = Vec::new();
        let stats = Sorter::new(config(false, false, false))
            .sort_with_output(&[src.path()], dest.path(), &mut out)
            .unwrap();

        assert_eq!(stats.relocated_count, 0);
        assert_eq!(stats.skipped, vec![src.path().to_path_buf()]);
        assert!(src.path().join("pic.png").exists());
    }

    #[test]
    fn recursion_descends_into_nested_directories() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let nested = src.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        save_image(&src.path().join("top.png"), 2, 2);
        save_image(&nested.join("deep.png"), 6, 1);

        let mut out = Vec::new();
        let stats = Sorter::new(config(true, false, false))
            .sort_with_output(&[src.path()], dest.path(), &mut out)
            .unwrap();

        assert_eq!(stats.relocated_count, 2);
        assert!(dest.path().join("2x2").join("top.png").is_file());
        assert!(dest.path().join("6x1").join("deep.png").is_file());
    }

    #[test]
    fn recursion_skips_destination_inside_input() {
        let src = tempfile::tempdir().unwrap();
        let dest = src.path().join("sorted");
        let existing = dest.join("2x2");
        fs::create_dir_all(&existing).unwrap();
        save_image(&existing.join("old.png"), 2, 2);
        save_image(&src.path().join("new.png"), 2, 2);

        let mut out = Vec::new();
        let stats = Sorter::new(config(true, false, false))
            .sort_with_output(&[src.path()], &dest, &mut out)
            .unwrap();

        assert_eq!(stats.relocated_count, 1);
        assert!(stats.failures.is_empty());
        assert!(existing.join("old.png").is_file());
        assert!(existing.join("new.png").is_file());
    }

    #[test]
    fn unwritable_bucket_directory_is_fatal() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        fs::write(dest.path().join("4x4"), b"in the way").unwrap();
        let image = src.path().join("pic.png");
        save_image(&image, 4, 4);

        let mut out = Vec::new();
        let result = Sorter::new(config(false, false, false)).sort_with_output(
            &[&image],
            dest.path(),
            &mut out,
        );

        assert!(matches!(result, Err(DimSortError::DirectoryCreation { .. })));
        assert!(image.exists());
    }

    #[test]
    fn file_destination_is_rejected() {
        let src = tempfile::tempdir().unwrap();
        let dest = src.path().join("dest");
        fs::write(&dest, b"").unwrap();

        let result = Sorter::new(SortConfig::default()).sort(&[src.path()], &dest);
        assert!(matches!(result, Err(DimSortError::InvalidParameter(_))));
    }

    #[test]
    fn verbose_copy_prints_action_record() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let image = src.path().join("pic.png");
        save_image(&image, 5, 4);

        let mut out = Vec::new();
        Sorter::new(config(false, true, true))
            .sort_with_output(&[&image], dest.path(), &mut out)
            .unwrap();

        let expected = format!(
            "COPY: \"{}\"\nTO:   \"{}\"\n",
            image.display(),
            dest.path().join("5x4").display()
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
        assert!(image.exists());
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn unwritable_output_does_not_stop_the_batch() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let first = src.path().join("a.png");
        let second = src.path().join("b.png");
        save_image(&first, 2, 2);
        save_image(&second, 3, 3);

        let stats = Sorter::new(config(false, false, true))
            .sort_with_output(&[&first, &second], dest.path(), &mut ClosedPipe)
            .unwrap();

        assert_eq!(stats.relocated_count, 2);
        assert!(stats.failures.is_empty());
        assert!(dest.path().join("3x3").join("b.png").is_file());
    }

    #[cfg(unix)]
    #[test]
    fn cross_device_rename_falls_back_to_copy() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let source = src.path().join("pic.png");
        let target = dest.path().join("pic.png");
        fs::write(&source, b"pixels").unwrap();

        move_with(&source, &target, |_, _| Err(io::Error::from_raw_os_error(18))).unwrap();

        assert!(!source.exists());
        assert_eq!(fs::read(&target).unwrap(), b"pixels");
    }

    #[test]
    fn other_rename_errors_do_not_copy() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let source = src.path().join("pic.png");
        let target = dest.path().join("pic.png");
        fs::write(&source, b"pixels").unwrap();

        let result = move_with(&source, &target, |_, _| {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "busy"))
        });

        assert!(matches!(result, Err(DimSortError::Io(_))));
        assert!(source.exists());
        assert!(!target.exists());
    }

    #[test]
    fn failed_fallback_leaves_no_target() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let target = dest.path().join("pic.png");

        assert!(copy_then_remove(src.path(), &target).is_err());
        assert!(!target.exists());
        assert!(src.path().is_dir());
    }

    #[test]
    fn move_file_renames_within_a_filesystem() {
        let temp = tempfile::tempdir().unwrap();
        let source = temp.path().join("pic.png");
        let target = temp.path().join("moved.png");
        fs::write(&source, b"pixels").unwrap();

        move_file(&source, &target).unwrap();

        assert!(!source.exists());
        assert_eq!(fs::read(&target).unwrap(), b"pixels");
    }
}
