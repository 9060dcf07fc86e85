//! Background download of every daily file from a [`RemoteSource`].
//!
//! The worker owns its own [`SeriesStore`] and reports through a stream of
//! [`DownloadEvent`]s: any number of `Progress` events with non-decreasing
//! percentages, then exactly one `Complete` or `Failed`.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

use crate::parsers::Source;
use crate::remote::{ConnectionRequest, RemoteSource};
use crate::store::{classify_filename, SeriesStore};

/// What a finished download hands back to the UI thread
#[derive(Clone, Debug, Default)]
pub struct DownloadSummary {
    pub store: SeriesStore,
    pub indoor_files: usize,
    pub outdoor_files: usize,
    /// Files that matched the naming scheme but could not be fetched
    pub failed_files: Vec<String>,
}

#[derive(Clone, Debug)]
pub enum DownloadEvent {
    Progress { percent: u8, message: String },
    Complete(Box<DownloadSummary>),
    Failed(String),
}

impl DownloadEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, DownloadEvent::Progress { .. })
    }
}

fn progress(percent: u8, message: impl Into<String>) -> DownloadEvent {
    DownloadEvent::Progress {
        percent,
        message: message.into(),
    }
}

/// Run a complete download on the current thread, reporting through `emit`.
///
/// Returns the terminal event after also emitting it.
pub fn run_download<R, F>(source: &mut R, request: &ConnectionRequest, mut emit: F) -> DownloadEvent
where
    R: RemoteSource + ?Sized,
    F: FnMut(DownloadEvent),
{
    let finish = |event: DownloadEvent, emit: &mut F| {
        emit(event.clone());
        event
    };

    emit(progress(0, "Connecting to FTP server..."));
    if let Err(e) = source.connect(request) {
        tracing::error!("Connection failed: {}", e);
        return finish(
            DownloadEvent::Failed(format!("Failed to connect to FTP server: {}", e)),
            &mut emit,
        );
    }

    emit(progress(0, "Listing CSV files..."));
    let mut names: Vec<String> = match source.list_files() {
        Ok(names) => names
            .into_iter()
            .filter(|name| classify_filename(name).is_some())
            .collect(),
        Err(e) => {
            tracing::error!("Listing failed: {}", e);
            Vec::new()
        }
    };
    names.sort();
    names.dedup();

    if names.is_empty() {
        source.disconnect();
        return finish(
            DownloadEvent::Failed("No CSV files found on the server".to_string()),
            &mut emit,
        );
    }

    let total = names.len();
    tracing::info!("Found {} station files", total);
    emit(progress(0, format!("Found {} files. Downloading...", total)));

    let mut summary = DownloadSummary::default();
    for (i, name) in names.iter().enumerate() {
        let percent = (i * 100 / total) as u8;
        emit(progress(percent, format!("Downloading {}...", name)));

        match source.fetch(name) {
            Ok(contents) => match summary.store.insert_file(name, contents) {
                Some((_, Source::Indoor)) => summary.indoor_files += 1,
                Some((_, Source::Outdoor)) => summary.outdoor_files += 1,
                None => {}
            },
            Err(e) => {
                tracing::warn!("Skipping {}: {}", name, e);
                summary.failed_files.push(name.clone());
            }
        }
    }

    source.disconnect();

    tracing::info!(
        "Download complete: {} indoor, {} outdoor, {} failed",
        summary.indoor_files,
        summary.outdoor_files,
        summary.failed_files.len()
    );
    emit(progress(100, "Download complete"));
    finish(DownloadEvent::Complete(Box::new(summary)), &mut emit)
}

/// Start a download on a background thread and return the event receiver
pub fn spawn_download<R>(mut source: R, request: ConnectionRequest) -> Receiver<DownloadEvent>
where
    R: RemoteSource + Send + 'static,
{
    let (sender, receiver): (Sender<DownloadEvent>, Receiver<DownloadEvent>) = channel();

    thread::spawn(move || {
        run_download(&mut source, &request, |event| {
            // Receiver gone means the app is shutting down
            let _ = sender.send(event);
        });
    });

    receiver
}
