//! Background model loading. Each request runs on its own worker
//! thread and is polled once per frame; a single-slot cell keeps only
//! the newest result so slow loads can never clobber later ones.

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;

use crate::loader::{load_model, LoadError, ModelFormat, ModelGraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestId(u64);

#[derive(Debug)]
pub struct CompletedLoad {
    pub request: RequestId,
    pub format: ModelFormat,
    pub path: PathBuf,
    pub result: Result<ModelGraph, LoadError>,
}

/// Single-slot mailbox between load workers and the frame loop. Only
/// the most recently issued request may publish into the slot.
#[derive(Debug, Default)]
pub struct ResultCell {
    newest: u64,
    slot: Option<CompletedLoad>,
}

impl ResultCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RequestId {
        self.newest += 1;
        RequestId(self.newest)
    }

    pub fn newest(&self) -> RequestId {
        RequestId(self.newest)
    }

    pub fn publish(&mut self, completed: CompletedLoad) {
        if completed.request.0 != self.newest {
            log::debug!(
                "discarding stale result for {} (request {} superseded by {})",
                completed.path.display(),
                completed.request.0,
                self.newest
            );
            return;
        }

        self.slot = Some(completed);
    }

    pub fn take(&mut self) -> Option<CompletedLoad> {
        self.slot.take()
    }
}

struct InFlight {
    request: RequestId,
    format: ModelFormat,
    path: PathBuf,
    receiver: Receiver<Result<ModelGraph, LoadError>>,
}

/// Spawns a worker thread per load request and surfaces finished loads
/// through a [`ResultCell`].
#[derive(Default)]
pub struct ModelLoader {
    cell: ResultCell,
    in_flight: Vec<InFlight>,
}

impl ModelLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, path: impl Into<PathBuf>, format: ModelFormat) -> RequestId {
        let path = path.into();
        let request = self.cell.issue();
        let (sender, receiver) = channel();

        let worker_path = path.clone();
        thread::spawn(move || {
            let result = load_model(&worker_path, format);
            // The main loop may have been torn down already.
            let _ = sender.send(result);
        });

        log::info!("loading {} as {}", path.display(), format);
        self.in_flight.push(InFlight {
            request,
            format,
            path,
            receiver,
        });

        request
    }

    /// Drains finished workers into the cell, then hands out the newest
    /// completed load if one arrived. Called once per frame.
    pub fn poll(&mut self) -> Option<CompletedLoad> {
        let mut finished = Vec::new();

        self.in_flight.retain(|pending| match pending.receiver.try_recv() {
            Ok(result) => {
                finished.push(CompletedLoad {
                    request: pending.request,
                    format: pending.format,
                    path: pending.path.clone(),
                    result,
                });
                false
            }
            Err(TryRecvError::Empty) => true,
            Err(TryRecvError::Disconnected) => {
                finished.push(CompletedLoad {
                    request: pending.request,
                    format: pending.format,
                    path: pending.path.clone(),
                    result: Err(LoadError::WorkerPanicked),
                });
                false
            }
        });

        for completed in finished {
            self.cell.publish(completed);
        }

        self.cell.take()
    }

    pub fn newest_request(&self) -> RequestId {
        self.cell.newest()
    }

    pub fn has_pending(&self) -> bool {
        !self.in_flight.is_empty()
    }
}
