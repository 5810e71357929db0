//! QR capture. Decoding is delegated to a `FrameSource` (a keyboard-wedge
//! scanner on stdin, or any external decoder); the scanner only polls it on a
//! fixed interval and forwards what it yields.

use crate::errors::AppError;
use std::{future::Future, time::Duration};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin},
    sync::mpsc,
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tracing::{debug, instrument};

pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_millis(250);

const EVENT_BUFFER: usize = 16;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanEvent {
    Decoded(String),
    Error(String),
}

/// Something that yields decoded QR payloads.
///
/// `Ok(None)` means the source is exhausted and closes the scanner. An empty
/// payload means nothing was decoded in this frame.
pub trait FrameSource: Send + 'static {
    fn next_frame(&mut self) -> impl Future<Output = Result<Option<String>, AppError>> + Send;
}

/// Line-oriented source: one decoded payload per line.
#[derive(Debug)]
pub struct LineSource<R> {
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin + Send + 'static> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

impl LineSource<BufReader<Stdin>> {
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin + Send + 'static> FrameSource for LineSource<R> {
    async fn next_frame(&mut self) -> Result<Option<String>, AppError> {
        self.lines
            .next_line()
            .await
            .map_err(|err| AppError::Scanner(format!("Failed to read from scanner: {err}")))
    }
}

/// Background poller. Dropping the scanner stops polling.
#[derive(Debug)]
pub struct Scanner {
    events: mpsc::Receiver<ScanEvent>,
    task: JoinHandle<()>,
}

impl Scanner {
    /// Starts polling `source` every `every`. There is no retry or debounce:
    /// each non-empty payload is forwarded once, each failure becomes an
    /// `ScanEvent::Error`.
    #[instrument(skip(source))]
    pub fn spawn<S: FrameSource>(mut source: S, every: Duration) -> Self {
        let (tx, events) = mpsc::channel(EVENT_BUFFER);

        let task = tokio::spawn(async move {
            let mut ticker = interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let event = match source.next_frame().await {
                    Ok(Some(payload)) => {
                        let payload = payload.trim();
                        if payload.is_empty() {
                            continue;
                        }
                        ScanEvent::Decoded(payload.to_string())
                    }
                    Ok(None) => {
                        debug!("scanner source exhausted");
                        break;
                    }
                    Err(err) => ScanEvent::Error(err.user_message()),
                };

                if tx.send(event).await.is_err() {
                    debug!("scanner receiver dropped");
                    break;
                }
            }
        });

        Self { events, task }
    }

    /// Event stream; `None` once the source is exhausted.
    pub fn events(&mut self) -> &mut mpsc::Receiver<ScanEvent> {
        &mut self.events
    }

    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for Scanner {
    fn drop(&mut self) {
        self.task.abort();
    }
}
