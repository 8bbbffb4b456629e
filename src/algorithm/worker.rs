//! Background solve worker with message streaming and cooperative cancellation

use log::{debug, error};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::algorithm::solver::{SolveRequest, Solver};
use crate::analysis::statistics::{AggregateStatistics, Termination};
use crate::io::configuration::WORKER_POLL_INTERVAL;
use crate::io::error::{MinesetterError, Result};
use crate::io::wire::SolverMessage;

/// Shared flag that asks running work to stop
///
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that has not fired
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every holder of this token to stop
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether [`CancellationToken::cancel`] was called on any clone
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Launches solves on dedicated threads
#[derive(Debug, Clone, Copy)]
pub struct SolveWorker;

impl SolveWorker {
    /// Start solving `request` on a new thread
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned
    pub fn spawn(request: SolveRequest) -> Result<SolveHandle> {
        let (sender, receiver) = mpsc::channel();
        let token = CancellationToken::new();
        let worker_token = token.clone();

        let thread = thread::Builder::new()
            .name("minesetter-solver".to_string())
            .spawn(move || run_worker(request, &worker_token, &sender))
            .map_err(|e| MinesetterError::Worker {
                reason: format!("failed to spawn solver thread: {e}"),
            })?;

        Ok(SolveHandle {
            receiver,
            token,
            thread: Some(thread),
        })
    }
}

fn run_worker(request: SolveRequest, token: &CancellationToken, sender: &Sender<SolverMessage>) {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| -> Result<AggregateStatistics> {
        let solver = Solver::new(request)?.with_cancellation(token.clone());
        Ok(solver.run(|event| {
            let _ = sender.send(SolverMessage::from(event));
        }))
    }));

    let message = match outcome {
        Ok(Ok(stats)) => {
            if stats.termination == Termination::Cancelled || token.is_cancelled() {
                debug!("Dropping results of cancelled solve");
                return;
            }
            SolverMessage::Done(Box::new(stats))
        }
        Ok(Err(err)) => SolverMessage::Error {
            message: err.to_string(),
        },
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!("Solver panicked: {message}");
            SolverMessage::Error { message }
        }
    };
    let _ = sender.send(message);
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|text| (*text).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "solver panicked".to_string())
}

/// Caller side of one running solve
///
/// Dropping the handle cancels the solve and waits for its thread to stop.
#[derive(Debug)]
pub struct SolveHandle {
    receiver: Receiver<SolverMessage>,
    token: CancellationToken,
    thread: Option<JoinHandle<()>>,
}

impl SolveHandle {
    /// Take the next message if one is ready
    ///
    /// # Errors
    ///
    /// Returns a worker error once the solve ended without a terminal message
    pub fn try_recv(&self) -> Result<Option<SolverMessage>> {
        match self.receiver.try_recv() {
            Ok(message) => Ok(Some(message)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(self.disconnected()),
        }
    }

    /// Wait up to `timeout` for the next message
    ///
    /// # Errors
    ///
    /// Returns a worker error once the solve ended without a terminal message
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<SolverMessage>> {
        match self.receiver.recv_timeout(timeout) {
            Ok(message) => Ok(Some(message)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(self.disconnected()),
        }
    }

    /// Block until the next message
    ///
    /// # Errors
    ///
    /// Returns a worker error once the solve ended without a terminal message
    pub fn recv(&self) -> Result<SolverMessage> {
        match self.receiver.recv() {
            Ok(message) => Ok(message),
            Err(mpsc::RecvError) => Err(self.disconnected()),
        }
    }

    /// Ask the solve to stop; no `done` message follows
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Token controlling this solve
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Block until the solve finishes, forwarding progress messages
    ///
    /// # Errors
    ///
    /// Returns the worker's error message, [`MinesetterError::Cancelled`] if
    /// the solve was cancelled, or a worker error if it vanished
    pub fn wait<F>(self, on_message: F) -> Result<AggregateStatistics>
    where
        F: FnMut(&SolverMessage),
    {
        self.wait_until(&CancellationToken::new(), on_message)
    }

    /// Like [`SolveHandle::wait`], also stopping when `cancel` fires
    ///
    /// # Errors
    ///
    /// Same as [`SolveHandle::wait`]
    pub fn wait_until<F>(
        &self,
        cancel: &CancellationToken,
        mut on_message: F,
    ) -> Result<AggregateStatistics>
    where
        F: FnMut(&SolverMessage),
    {
        loop {
            if cancel.is_cancelled() {
                self.cancel();
                return Err(MinesetterError::Cancelled);
            }
            let Some(message) = self.recv_timeout(WORKER_POLL_INTERVAL)? else {
                continue;
            };
            match message {
                SolverMessage::Done(stats) => return Ok(*stats),
                SolverMessage::Error { message } => {
                    return Err(MinesetterError::Worker { reason: message });
                }
                progress => on_message(&progress),
            }
        }
    }

    fn disconnected(&self) -> MinesetterError {
        if self.token.is_cancelled() {
            MinesetterError::Cancelled
        } else {
            MinesetterError::Worker {
                reason: "solver worker disconnected".to_string(),
            }
        }
    }
}

impl Drop for SolveHandle {
    fn drop(&mut self) {
        self.token.cancel();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Owner of at most one running solve
///
/// Submitting a new solve terminates the previous one first, so messages of
/// a superseded solve are never observed.
#[derive(Debug, Default)]
pub struct WorkerManager {
    active: Option<SolveHandle>,
}

impl WorkerManager {
    /// Create a manager with no running solve
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a solve is in flight
    pub const fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Start `request`, terminating any previous solve
    ///
    /// # Errors
    ///
    /// Returns an error if the worker thread cannot be spawned
    pub fn submit(&mut self, request: SolveRequest) -> Result<&SolveHandle> {
        self.terminate();
        let handle = SolveWorker::spawn(request)?;
        Ok(self.active.insert(handle))
    }

    /// Solve `request` to completion, polling `cancel` while waiting
    ///
    /// # Errors
    ///
    /// Returns [`MinesetterError::Cancelled`] when `cancel` fires, or the
    /// worker's failure
    pub fn run<F>(
        &mut self,
        request: SolveRequest,
        cancel: &CancellationToken,
        on_message: F,
    ) -> Result<AggregateStatistics>
    where
        F: FnMut(&SolverMessage),
    {
        let outcome = self.submit(request)?.wait_until(cancel, on_message);
        self.terminate();
        outcome
    }

    /// Stop the running solve, if any
    pub fn terminate(&mut self) {
        if let Some(handle) = self.active.take() {
            handle.cancel();
            debug!("Terminated active solve");
        }
    }
}
