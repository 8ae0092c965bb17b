//! The serialization core: one worker thread, one queue, one query in flight.
//!
//! # Design
//! Every call a `Client` makes is wrapped in a `Pending` record together with
//! a private reply channel and pushed onto a single unbounded queue. One
//! background thread owns the `Executor` (and through it the transport); it
//! takes records off the queue one at a time, runs each to completion and
//! replies before looking at the next. That gives a strict total order of
//! service and at most one request against the remote service at any moment,
//! without a lock around the transport.
//!
//! Callers block on their own reply channel, so they wake exactly once, with
//! their own result.
//!
//! Shutdown drops the only sender. The worker keeps draining what is already
//! queued, sees the disconnect, and exits; `close` joins it. The sender lives
//! behind a mutex so a submit racing `close` either gets its record queued
//! (and answered) or sees `Error::Closed`, never a panic or a hang. If the
//! worker itself dies, pending and later callers get `Error::WorkerExited`.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::executor::Executor;
use crate::http::HttpMethod;
use crate::params::Params;
use crate::types::VenueResponse;

/// One pending call: where to send it, with what, and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub url: String,
    pub params: Params,
    pub method: HttpMethod,
}

impl Query {
    pub fn get(url: impl Into<String>, params: Params) -> Self {
        Self {
            url: url.into(),
            params,
            method: HttpMethod::Get,
        }
    }

    /// A POST query. Accepted by `submit` but always answered with
    /// `Error::UnsupportedMethod`; write endpoints are not implemented.
    pub fn post(url: impl Into<String>, params: Params) -> Self {
        Self {
            url: url.into(),
            params,
            method: HttpMethod::Post,
        }
    }
}

struct Pending {
    query: Query,
    reply: Sender<Result<VenueResponse>>,
}

/// Owns the submission queue and the worker thread that drains it.
#[derive(Debug)]
pub struct Dispatcher {
    queue: Mutex<Option<Sender<Pending>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Dispatcher {
    /// Start the worker thread. It owns `executor` until the dispatcher is
    /// closed.
    pub fn spawn(executor: Executor) -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("foursquare-worker".to_string())
            .spawn(move || run(executor, rx))?;
        Ok(Self {
            queue: Mutex::new(Some(tx)),
            worker: Mutex::new(Some(handle)),
        })
    }

    /// Queue `query` behind everything already submitted and block until the
    /// worker has run it.
    pub fn submit(&self, query: Query) -> Result<VenueResponse> {
        let (reply, response) = mpsc::channel();
        {
            let queue = lock(&self.queue);
            let sender = queue.as_ref().ok_or(Error::Closed)?;
            trace!(method = %query.method, url = %query.url, "queueing query");
            // The receiver only goes away early if the worker thread died.
            sender
                .send(Pending { query, reply })
                .map_err(|_| Error::WorkerExited)?;
        }
        // The worker always replies before dropping a record it received, so
        // a disconnect here means it died mid-query.
        response.recv().map_err(|_| Error::WorkerExited)?
    }

    /// Stop accepting submissions, let the worker drain the queue, and wait
    /// for it to exit. Safe to call more than once.
    pub fn close(&self) {
        let sender = lock(&self.queue).take();
        if sender.is_none() {
            return;
        }
        drop(sender);
        if let Some(handle) = lock(&self.worker).take() {
            if handle.join().is_err() {
                debug!("worker thread panicked before shutdown");
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        lock(&self.queue).is_none()
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.close();
    }
}

fn run(executor: Executor, queue: Receiver<Pending>) {
    debug!(base_url = %executor.config().base_url, "worker started");
    let mut served: u64 = 0;
    for Pending { query, reply } in queue {
        let result = executor.execute(query);
        served += 1;
        trace!(served, ok = result.is_ok(), "query finished");
        // A caller that stopped waiting is not an error for the worker.
        let _ = reply.send(result);
    }
    debug!(served, "worker stopped");
}

// A poisoned lock only means another caller panicked while holding it; the
// `Option` inside is still consistent.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
