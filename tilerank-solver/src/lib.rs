//! tilerank-solver - Asynchronous, cancellable placement search
//!
//! The exhaustive rating in `tilerank-core` is O(open positions x 6) with
//! a speculative place/remove per candidate, too slow to run on an
//! interactive caller's path once the board grows. This crate runs it on
//! one long-lived worker thread:
//! - each request carries an exclusively owned board snapshot, so the
//!   caller may keep mutating its own board while a search runs;
//! - results stream over a channel, one update per fully evaluated open
//!   position, so a UI can show partial rankings;
//! - cancellation is a cooperative flag checked between positions, and a
//!   new request supersedes any in-flight one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;

use rustc_hash::FxHashSet;
use tilerank_core::{Board, Pos, Score, Tile};

/// One fully evaluated open position.
#[derive(Clone, Debug)]
pub struct SolveUpdate {
    /// Sequence number, 0-based, dense.
    pub index: usize,
    pub pos: Pos,
    /// Scored orientations that are valid here; may be empty.
    pub scores: Vec<(u8, Score)>,
}

struct Request {
    board: Board,
    tile: Tile,
    cancel: Arc<AtomicBool>,
    updates: Sender<SolveUpdate>,
}

/// Handle to a streaming search.
///
/// Updates already received stay valid after cancellation; the stream
/// simply ends early.
pub struct SolveHandle {
    updates: Receiver<SolveUpdate>,
    cancel: Arc<AtomicBool>,
}

impl SolveHandle {
    /// Ask the worker to stop after the position it is evaluating.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Blocking iterator over updates until the search ends or is
    /// cancelled.
    pub fn updates(&self) -> impl Iterator<Item = SolveUpdate> + '_ {
        self.updates.iter()
    }

    /// Next update, or `None` once the stream is closed.
    pub fn recv(&self) -> Option<SolveUpdate> {
        self.updates.recv().ok()
    }

    /// Drain the stream and reduce it to the tied-best placement set.
    /// Equals `Board::suggest_placements` when the search ran to
    /// completion.
    pub fn into_best(self) -> FxHashSet<(Pos, u8)> {
        let mut best: Option<Score> = None;
        let mut winners = FxHashSet::default();

        for update in self.updates.iter() {
            for (ori, score) in update.scores {
                match best {
                    Some(b) if score > b => {}
                    Some(b) if score == b => {
                        winners.insert((update.pos, ori));
                    }
                    _ => {
                        best = Some(score);
                        winners.clear();
                        winners.insert((update.pos, ori));
                    }
                }
            }
        }

        winners
    }
}

/// Owns the worker thread. At most one search is active at a time: a new
/// `solve` call cancels the previous one cooperatively, never forcibly.
pub struct Solver {
    requests: Option<Sender<Request>>,
    worker: Option<JoinHandle<()>>,
    last_cancel: Option<Arc<AtomicBool>>,
}

impl Solver {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel::<Request>();
        let worker = std::thread::spawn(move || {
            while let Ok(request) = rx.recv() {
                run_request(request);
            }
        });

        Solver {
            requests: Some(tx),
            worker: Some(worker),
            last_cancel: None,
        }
    }

    /// Start a search over a snapshot of `board`. Supersedes any search
    /// still in flight.
    pub fn solve(&mut self, board: &Board, tile: Tile) -> SolveHandle {
        if let Some(previous) = self.last_cancel.take() {
            previous.store(true, Ordering::Relaxed);
        }

        let cancel = Arc::new(AtomicBool::new(false));
        self.last_cancel = Some(cancel.clone());

        let (tx, rx) = mpsc::channel();
        let request = Request {
            board: board.clone(),
            tile,
            cancel: cancel.clone(),
            updates: tx,
        };

        self.requests
            .as_ref()
            .expect("solver worker already shut down")
            .send(request)
            .expect("solver worker exited unexpectedly");

        SolveHandle {
            updates: rx,
            cancel,
        }
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Solver {
    fn drop(&mut self) {
        if let Some(cancel) = self.last_cancel.take() {
            cancel.store(true, Ordering::Relaxed);
        }
        // Closing the request channel ends the worker loop.
        self.requests.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn run_request(request: Request) {
    let Request {
        mut board,
        tile,
        cancel,
        updates,
    } = request;

    // Sorted for a reproducible emission order.
    let mut positions: Vec<Pos> = board.open_positions().collect();
    positions.sort_unstable();
    let total = positions.len();

    for (index, pos) in positions.into_iter().enumerate() {
        // Checked between positions, never mid-evaluation.
        if cancel.load(Ordering::Relaxed) {
            tracing::debug!(index, total, "search cancelled");
            return;
        }

        let scores = board.rate_position(pos, tile);
        if updates.send(SolveUpdate { index, pos, scores }).is_err() {
            // Receiver dropped; nobody is listening anymore.
            return;
        }
    }

    tracing::debug!(total, "search complete");
}
