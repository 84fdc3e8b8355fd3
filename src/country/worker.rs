use super::resolver::CountryResolution;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

type Tagged = (u64, CountryResolution);

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Polled {
    pub ready: Option<CountryResolution>,
    pub discarded: usize,
}

/// Runs lookups on background threads. Every job is tagged with a
/// generation; [`LookupWorker::cancel`] bumps it so late results from a
/// superseded job are dropped instead of applied.
#[derive(Debug)]
pub struct LookupWorker {
    generation: u64,
    pending: bool,
    tx: Sender<Tagged>,
    rx: Receiver<Tagged>,
}

impl Default for LookupWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupWorker {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            generation: 0,
            pending: false,
            tx,
            rx,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn spawn<F>(&mut self, job: F) -> u64
    where
        F: FnOnce() -> CountryResolution + Send + 'static,
    {
        self.generation += 1;
        self.pending = true;
        let generation = self.generation;
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = job();
            let _ = tx.send((generation, result));
        });
        generation
    }

    pub fn cancel(&mut self) {
        if self.pending {
            self.generation += 1;
            self.pending = false;
        }
    }

    pub fn poll(&mut self) -> Polled {
        let mut polled = Polled::default();
        loop {
            match self.rx.try_recv() {
                Ok(tagged) => {
                    if let Some(ready) = self.accept(tagged, &mut polled.discarded) {
                        polled.ready = Some(ready);
                        return polled;
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return polled,
            }
        }
    }

    /// Blocks until the current job reports or `timeout` elapses.
    pub fn wait(&mut self, timeout: Duration) -> Polled {
        let mut polled = Polled::default();
        if !self.pending {
            return polled;
        }
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(tagged) => {
                    if let Some(ready) = self.accept(tagged, &mut polled.discarded) {
                        polled.ready = Some(ready);
                        return polled;
                    }
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return polled
                }
            }
        }
    }

    fn accept(
        &mut self,
        (generation, result): Tagged,
        discarded: &mut usize,
    ) -> Option<CountryResolution> {
        if self.pending && generation == self.generation {
            self.pending = false;
            return Some(result);
        }
        *discarded += 1;
        None
    }
}
