//! Batch lyrics download command.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use tokio::runtime::Runtime;

use super::config::load_config;
use crate::config::Options;
use crate::error::{Error, Result};
use crate::lookup::LrclibClient;
use crate::metadata::LoftyReader;
use crate::pipeline::{BatchPipeline, FileReport};
use crate::scanner::{self, ExtensionFilter};
use crate::sink::ArtifactSink;

/// Arguments of `fetch`
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Audio files or folders to process
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Configuration file (default: the user config file)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Folder receiving the batch archive
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Write artifacts into the scanned folder instead of an archive
    #[arg(long, conflicts_with = "write_to")]
    pub in_place: bool,

    /// Write artifacts into this folder instead of an archive
    #[arg(long)]
    pub write_to: Option<PathBuf>,

    /// Also save one archive per matched track into this folder
    #[arg(long)]
    pub per_track_archives: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: OptionOverrides,
}

/// Per-run overrides of the `[options]` config section
#[derive(Args, Debug, Default)]
pub struct OptionOverrides {
    /// Require an album tag before querying
    #[arg(long, value_name = "BOOL")]
    pub send_album: Option<bool>,
    /// Require an artist tag before querying
    #[arg(long, value_name = "BOOL")]
    pub send_artist: Option<bool>,
    /// Require a readable duration before querying
    #[arg(long, value_name = "BOOL")]
    pub send_duration: Option<bool>,
    /// Fall back to the file name when tags are insufficient
    #[arg(long, value_name = "BOOL")]
    pub use_file_name: Option<bool>,
    /// Always query by file name
    #[arg(long, value_name = "BOOL")]
    pub force_file_name: Option<bool>,
    /// Duration tolerance in seconds
    #[arg(long, value_name = "SECS")]
    pub second_difference: Option<u32>,
    /// Treat files without a duration match as not found
    #[arg(long, value_name = "BOOL")]
    pub enforce_seconds: Option<bool>,
    /// Send one free-text `q` parameter
    #[arg(long, value_name = "BOOL")]
    pub use_q: Option<bool>,
    /// Save the raw JSON response
    #[arg(long, value_name = "BOOL")]
    pub keep_json: Option<bool>,
    /// Save the plain lyrics
    #[arg(long, value_name = "BOOL")]
    pub keep_txt: Option<bool>,
    /// Save the synced lyrics
    #[arg(long, value_name = "BOOL")]
    pub keep_lrc: Option<bool>,
    /// Minimum wait after each request (ms)
    #[arg(long, value_name = "MS")]
    pub min_wait: Option<u64>,
    /// Maximum wait after each request (ms)
    #[arg(long, value_name = "MS")]
    pub max_wait: Option<u64>,
    /// Comma-separated list of accepted suffixes (e.g. ".mp3,.flac")
    #[arg(long, value_name = "LIST")]
    pub allowed_extensions: Option<String>,
    /// Skip tracks that already have a .lrc file in the batch
    #[arg(long, value_name = "BOOL")]
    pub check_lrc: Option<bool>,
    /// Match existing .lrc files by name anywhere in the batch
    #[arg(long, value_name = "BOOL")]
    pub check_only_lrc_file_name: Option<bool>,
}

impl OptionOverrides {
    /// Overwrite every option that was given on the command line.
    pub fn apply(&self, options: &mut Options) {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *target = v.clone();
            }
        }

        set(&mut options.send_album, &self.send_album);
        set(&mut options.send_artist, &self.send_artist);
        set(&mut options.send_duration, &self.send_duration);
        set(&mut options.use_file_name, &self.use_file_name);
        set(&mut options.force_file_name, &self.force_file_name);
        set(&mut options.second_difference, &self.second_difference);
        set(&mut options.enforce_seconds, &self.enforce_seconds);
        set(&mut options.use_q, &self.use_q);
        set(&mut options.keep_json, &self.keep_json);
        set(&mut options.keep_txt, &self.keep_txt);
        set(&mut options.keep_lrc, &self.keep_lrc);
        set(&mut options.min_wait, &self.min_wait);
        set(&mut options.max_wait, &self.max_wait);
        set(&mut options.allowed_extensions, &self.allowed_extensions);
        set(&mut options.check_lrc, &self.check_lrc);
        set(&mut options.check_only_lrc_file_name, &self.check_only_lrc_file_name);
    }
}

/// Fetch lyrics for every file of the inputs
pub fn cmd_fetch(rt: &Runtime, args: &FetchArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    args.overrides.apply(&mut config.options);
    let options = config.options.clone().normalized();

    let filter = ExtensionFilter::parse(&options.allowed_extensions);
    let files = scanner::collect(&args.paths, &filter);
    if files.is_empty() {
        println!("No files found.");
        return Ok(());
    }

    let sink = choose_sink(args, &options)?;
    let client = LrclibClient::new(
        &config.service.base_url,
        Duration::from_secs(config.service.timeout_secs),
    )
    .context("Failed to create HTTP client")?;

    println!("Fetching lyrics for {} file(s) into {}...\n", files.len(), sink.describe());

    rt.block_on(async {
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("\nStopping after the current file...");
                flag.store(true, Ordering::Relaxed);
            }
        });

        let pipeline =
            BatchPipeline::new(Arc::new(client), Arc::new(LoftyReader), options).with_cancel(cancel);

        let total = files.len();
        let mut index = 0;
        let summary = pipeline
            .run(&files, sink, |mut report| {
                index += 1;
                print_report(index, total, &report);
                if let Some(dir) = &args.per_track_archives {
                    save_track_archive(&mut report, dir);
                }
            })
            .await
            .context("Failed to finish the batch")?;

        println!();
        if summary.cancelled {
            println!("Cancelled.");
        }
        println!(
            "Done: {} succeeded, {} failed, {} skipped",
            summary.succeeded, summary.failed, summary.skipped
        );
        if let Some(log) = &summary.error_log {
            println!("Error log: {}", log);
        }
        if let Some(archive) = &summary.archive {
            let path = archive
                .save(&args.output)
                .context("Failed to save the archive")?;
            println!("Archive: {}", path.display());
        }

        Ok::<(), anyhow::Error>(())
    })
}

/// `--write-to` wins, then in-place writing, then an archive.
fn choose_sink(args: &FetchArgs, options: &Options) -> Result<ArtifactSink> {
    if let Some(dir) = &args.write_to {
        return Ok(ArtifactSink::directory(dir));
    }

    let single_dir = match args.paths.as_slice() {
        [dir] if dir.is_dir() => Some(dir),
        _ => None,
    };

    if args.in_place {
        return match single_dir {
            Some(dir) => Ok(ArtifactSink::directory(dir)),
            None if args.paths.len() == 1 && !args.paths[0].exists() => {
                Err(Error::not_found(&args.paths[0]))
            }
            None => Err(Error::invalid_arguments("--in-place needs exactly one folder")),
        };
    }

    if options.write_in_place {
        match single_dir {
            Some(dir) => return Ok(ArtifactSink::directory(dir)),
            None => tracing::warn!("write_in_place needs exactly one folder, writing an archive"),
        }
    }

    Ok(ArtifactSink::archive())
}

fn print_report(index: usize, total: usize, report: &FileReport) {
    if report.outcome.is_success() {
        println!(
            "[{}/{}] {}... ✓ {} ({})",
            index,
            total,
            report.file_name,
            report.info.track,
            report.info.album_display()
        );
    } else {
        println!("[{}/{}] {}... ✗ {}", index, total, report.file_name, report.outcome);
    }
}

fn save_track_archive(report: &mut FileReport, dir: &Path) {
    let Some(bundle) = report.bundle.as_mut() else {
        return;
    };
    match bundle.download(dir) {
        Ok(Some(path)) => tracing::debug!("Saved {:?}", path),
        Ok(None) => {}
        Err(e) => eprintln!("  (track archive failed: {})", e),
    }
}
