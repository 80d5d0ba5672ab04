//! Batch pipeline - matches a collection of audio files to lyrics.
//!
//! Files are processed one at a time, in input order:
//! 1. Skip the file if the batch already holds its `.lrc`
//! 2. Probe tags and duration
//! 3. Build a query; without one the file is reported as missing information
//! 4. Search, choose a candidate and write its artifacts
//! 5. Report, then wait the pacing delay if a request was made
//!
//! Every failure stays scoped to its file. Failed files are collected into an
//! error log which is written as one more artifact when the batch ends.

mod outcome;
pub mod pacing;
mod skip;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub use outcome::{ArchiveBundle, BatchSummary, ErrorLog, FileOutcome, FileReport};
pub use pacing::{PacingPolicy, Scheduler, TokioScheduler};
pub use skip::LrcIndex;

use crate::config::Options;
use crate::lookup::{LookupError, LookupQuery, LyricsApi, Selection, build_query, select_candidate};
use crate::metadata::{self, ProbeResult, TagReader};
use crate::model::{AudioFile, Tags, TrackInfo};
use crate::paths;
use crate::sink::{ArtifactSink, SinkError, TrackBundle};

/// Sequential matcher over one batch of files.
pub struct BatchPipeline {
    api: Arc<dyn LyricsApi>,
    reader: Arc<dyn TagReader>,
    scheduler: Arc<dyn Scheduler>,
    options: Options,
    pacing: PacingPolicy,
    cancel: Option<Arc<AtomicBool>>,
}

impl BatchPipeline {
    /// A pipeline pacing requests in real time.
    pub fn new(api: Arc<dyn LyricsApi>, reader: Arc<dyn TagReader>, options: Options) -> Self {
        let pacing = PacingPolicy::from_options(&options);
        Self {
            api,
            reader,
            scheduler: Arc::new(TokioScheduler),
            options,
            pacing,
            cancel: None,
        }
    }

    /// Replace the scheduler used for pacing delays.
    pub fn with_scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Stop before the next file once `flag` is set.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Process `files` into `sink`, calling `on_report` once per processed file.
    ///
    /// Only finalizing the sink can fail the batch as a whole.
    pub async fn run(
        &self,
        files: &[AudioFile],
        mut sink: ArtifactSink,
        mut on_report: impl FnMut(FileReport),
    ) -> Result<BatchSummary, SinkError> {
        let root = paths::batch_root(files);
        let lrc_index = LrcIndex::build(files, &self.options);
        let mut log = ErrorLog::new();
        let mut summary = BatchSummary::default();

        tracing::info!("Processing {} files from {:?} into {}", files.len(), root, sink.describe());

        for file in files {
            if self.is_cancelled() {
                tracing::warn!("Batch cancelled, {} files left", files.len() - summary.processed - summary.skipped);
                summary.cancelled = true;
                break;
            }

            if lrc_index.covers(file) {
                tracing::debug!("Skipping {}: lyrics already present", file.label());
                summary.skipped += 1;
                continue;
            }

            let report = self.process(file, &mut sink).await;
            log.record(file, &report.outcome);
            summary.processed += 1;
            if report.outcome.is_success() {
                summary.succeeded += 1;
            } else {
                summary.failed += 1;
                tracing::warn!("{}: {}", file.label(), report.outcome);
            }
            on_report(report);
        }

        let stamp = chrono::Utc::now().timestamp_millis();

        if !log.is_empty() {
            let name = format!("LRCLib-Get-{}-Errors-{}.txt", root, stamp);
            match sink.write(&name, log.as_str()).await {
                Ok(()) => summary.error_log = Some(name),
                Err(e) => tracing::warn!("Failed to write error log {}: {}", name, e),
            }
        }

        if let Some(bytes) = sink.finalize()? {
            summary.archive = Some(ArchiveBundle {
                name: format!("LyricsDownload-{}-{}.zip", root, stamp),
                bytes,
            });
        }

        tracing::info!(
            "Batch done: {} processed, {} succeeded, {} failed, {} skipped",
            summary.processed,
            summary.succeeded,
            summary.failed,
            summary.skipped
        );
        Ok(summary)
    }

    /// Probe, query, select and persist a single file.
    async fn process(&self, file: &AudioFile, sink: &mut ArtifactSink) -> FileReport {
        let path = paths::resolve(file);

        let tags = metadata::probe_tags(self.reader.as_ref(), file, &self.options).await;
        let duration = metadata::probe_duration(self.reader.as_ref(), file, &self.options).await;
        if let Err(e) = &tags {
            tracing::debug!("{}: no tags ({})", file.label(), e);
        }
        if let Err(e) = &duration {
            tracing::debug!("{}: no duration ({})", file.label(), e);
        }

        let info = track_info(file, &tags, &duration);
        let query = build_query(&tags, &duration, &file.name, &self.options);

        let (outcome, bundle) = if query.is_empty() {
            (FileOutcome::MissingInformation, None)
        } else {
            tracing::debug!("{}: searching {}", file.label(), query);
            let result = self.lookup(&query, duration.ok(), &path, sink).await;

            let delay = self.pacing.next_delay();
            tracing::debug!("Pacing {:?}", delay);
            self.scheduler.suspend(delay).await;
            result
        };

        FileReport {
            file_name: file.name.clone(),
            original_path: file.original_path.clone(),
            path,
            info,
            outcome,
            bundle,
        }
    }

    async fn lookup(
        &self,
        query: &LookupQuery,
        local_duration: Option<f64>,
        path: &str,
        sink: &mut ArtifactSink,
    ) -> (FileOutcome, Option<TrackBundle>) {
        let response = match self.api.search(query).await {
            Ok(response) if !response.records.is_empty() => response,
            Ok(_) | Err(LookupError::NotFound) => return (FileOutcome::NotFound, None),
            Err(LookupError::Server { status }) => return (FileOutcome::ServerError { status }, None),
            Err(e) => {
                return (
                    FileOutcome::RequestFailed {
                        message: e.to_string(),
                    },
                    None,
                );
            }
        };

        let chosen = match select_candidate(&response.records, local_duration, &self.options) {
            Selection::Chosen(index) => &response.records[index],
            Selection::NotFound => return (FileOutcome::NotFound, None),
        };

        let plain = chosen.plain().map(str::to_string);
        let synced = chosen.synced().map(str::to_string);

        match self
            .persist(sink, path, &response.body, plain.as_deref(), synced.as_deref())
            .await
        {
            Ok(written) => (
                FileOutcome::Success { written },
                Some(TrackBundle::new(path, response.body.clone(), plain, synced)),
            ),
            Err(e) => (
                FileOutcome::WriteFailed {
                    message: e.to_string(),
                },
                None,
            ),
        }
    }

    /// Write the kept artifacts; the first failure stops the rest.
    async fn persist(
        &self,
        sink: &mut ArtifactSink,
        path: &str,
        json: &str,
        plain: Option<&str>,
        synced: Option<&str>,
    ) -> Result<Vec<String>, SinkError> {
        let artifacts = [
            (self.options.keep_json, format!("json/{}.json", path), Some(json)),
            (self.options.keep_txt, format!("plain/{}.txt", path), plain),
            (self.options.keep_lrc, format!("synced/{}.lrc", path), synced),
        ];

        let mut written = Vec::new();
        for (keep, target, content) in artifacts {
            let Some(content) = content.filter(|c| keep && !c.is_empty()) else {
                continue;
            };
            sink.write(&target, content).await?;
            written.push(target);
        }
        Ok(written)
    }
}

/// The display row of a file, filled from whatever the probes returned.
fn track_info(file: &AudioFile, tags: &ProbeResult<Tags>, duration: &ProbeResult<f64>) -> TrackInfo {
    let mut info = TrackInfo {
        track: paths::file_stem(&file.name).to_string(),
        duration: duration.as_ref().ok().copied(),
        ..Default::default()
    };

    if let Ok(tags) = tags {
        if let Some(title) = &tags.title {
            info.track = title.clone();
        }
        info.artist = tags.artist.clone();
        info.album = tags.album.clone();
    }

    if info.track.is_empty() {
        info.track = file.name.clone();
    }
    info
}
