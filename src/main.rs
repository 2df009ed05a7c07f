use anyhow::Context;
use clap::Parser;
use dimsort::{
    bucket_directory, dry_run, format_file_size, write_sort_summary, Cli, Commands, Prober,
    SortConfig, Sorter,
};
use log::LevelFilter;
use std::path::{Path, PathBuf};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    env_logger::Builder::new()
        .filter_level(if cli.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    match cli.command {
        Commands::Sort {
            inputs,
            destination,
            recursive,
            copy,
            verbose,
        } => {
            process_sort(
                inputs,
                destination,
                SortConfig {
                    recursive,
                    copy,
                    verbose,
                },
            )?;
        }
        Commands::DryRun {
            directory,
            recursive,
        } => {
            process_dry_run(&directory, recursive)?;
        }
        Commands::Info { input } => {
            process_info(&input)?;
        }
    }

    Ok(())
}

fn process_sort(
    inputs: Vec<PathBuf>,
    destination: PathBuf,
    config: SortConfig,
) -> anyhow::Result<()> {
    let sorter = Sorter::new(config);

    let stats = sorter
        .sort(inputs.as_slice(), &destination)
        .with_context(|| format!("Sorting into {} failed", destination.display()))?;

    let stdout = std::io::stdout();
    write_sort_summary(&stats, &destination, &mut stdout.lock())?;

    Ok(())
}

fn process_dry_run(directory: &Path, recursive: bool) -> anyhow::Result<()> {
    dry_run(directory, recursive)
        .with_context(|| format!("Cannot classify {}", directory.display()))?;

    Ok(())
}

fn process_info(input: &Path) -> anyhow::Result<()> {
    let info = Prober::new()
        .probe_info(input)
        .with_context(|| format!("Cannot read {}", input.display()))?;

    println!("=== Image Information ===");
    println!("File: {}", input.display());
    println!("Size: {}", format_file_size(info.file_size));
    println!(
        "Dimensions: {} x {} pixels",
        info.dimensions.width, info.dimensions.height
    );
    println!("Format: {}", info.format);
    println!(
        "Sorts into: {}",
        bucket_directory(Path::new("<destination>"), info.dimensions).display()
    );

    Ok(())
}
