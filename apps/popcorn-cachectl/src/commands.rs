use anyhow::Context;
use clap::Subcommand;
use popcorn_core::{clear_all, CacheManager, ClearReport};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::task;

#[derive(Subcommand)]
pub enum Commands {
    /// Print the directory of every cache category
    Paths,
    /// Create any missing cache folder
    Init,
    /// Show disk usage per category
    Usage {
        #[arg(long)]
        json: bool,
    },
    /// Show the size of an arbitrary directory
    Size { path: PathBuf },
    /// Empty downloads and subtitles
    Clear {
        /// Also empty the assets folder
        #[arg(long)]
        all: bool,
        #[arg(long)]
        json: bool,
    },
}

pub async fn handle_command(command: Commands, manager: Arc<CacheManager>) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Paths => {
            for (category, path) in manager.root().iter() {
                println!("{category:<24} {}", path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Init => {
            task::spawn_blocking(move || manager.ensure_folders_exist())
                .await
                .context("init task panicked")??;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Usage { json } => {
            let usage = task::spawn_blocking(move || manager.usage())
                .await
                .context("usage task panicked")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&usage)?);
            } else {
                for entry in &usage.categories {
                    println!("{:<24} {:>10}", entry.category, format_bytes(entry.bytes));
                }
                println!("{:<24} {:>10}", "total", format_bytes(usage.total_bytes));
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Size { path } => {
            let bytes = task::spawn_blocking(move || manager.directory_size(&path))
                .await
                .context("size task panicked")?;
            println!("{}", format_bytes(bytes));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Clear { all, json } => {
            let report = task::spawn_blocking(move || clear(&manager, all))
                .await
                .context("clear task panicked")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_clear_report(&report);
            }
            Ok(if report.is_clean() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn clear(manager: &CacheManager, all: bool) -> ClearReport {
    if all {
        clear_all(manager)
    } else {
        manager.clear_folders(false)
    }
}

fn print_clear_report(report: &ClearReport) {
    for folder in &report.folders {
        let name = folder
            .category
            .map(|category| category.to_string())
            .unwrap_or_else(|| folder.path.display().to_string());
        if !folder.existed {
            println!("{name:<24} absent");
            continue;
        }
        println!(
            "{name:<24} {} files, {} folders removed",
            folder.files_removed, folder.dirs_removed
        );
        for failure in &folder.failures {
            println!("  ! {} ({})", failure.path.display(), failure.message);
        }
    }
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use popcorn_core::{CacheCategory, CacheRoot};
    use std::fs;

    #[test]
    fn full_clear_runs_when_a_folder_cannot_be_created() {
        let dir = tempfile::tempdir().unwrap();
        let manager = CacheManager::new(CacheRoot::new(dir.path()).unwrap());
        let logo = manager.path(CacheCategory::Assets).join("logo.png");
        fs::create_dir_all(manager.path(CacheCategory::Assets)).unwrap();
        fs::write(&logo, b"png").unwrap();
        fs::write(dir.path().join("Downloads"), b"not a dir").unwrap();

        let report = clear(&manager, true);
        assert_eq!(report.files_removed(), 1);
        assert!(report.is_clean());
        assert!(!logo.exists());
    }

    #[test]
    fn plain_clear_keeps_assets() {
        let dir = tempfile::tempdir().unwrap();
        let manager = CacheManager::new(CacheRoot::new(dir.path()).unwrap());
        manager.ensure_folders_exist().unwrap();
        let logo = manager.path(CacheCategory::Assets).join("logo.png");
        fs::write(&logo, b"png").unwrap();
        fs::write(manager.path(CacheCategory::Subtitles).join("en.srt"), b"1").unwrap();

        let report = clear(&manager, false);
        assert_eq!(report.files_removed(), 1);
        assert!(logo.exists());
    }

    #[test]
    fn formats_binary_units() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1536), "1.5 KiB");
        assert_eq!(format_bytes(5 * 1024 * 1024 * 1024), "5.0 GiB");
    }
}
