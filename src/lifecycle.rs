//! One-shot graceful shutdown.
//!
//! [`Lifecycle`] moves `Running -> Draining -> Stopped` exactly once. Every
//! request registers through [`Lifecycle::enter`]; once draining starts no new
//! registration succeeds, and [`Lifecycle::drain`] waits for the registered
//! ones up to the configured bound.

use std::io;
use std::process::ExitCode;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShutdownState {
    Running,
    Draining,
    Stopped,
}

/// How the drain phase ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrainOutcome {
    /// Every in-flight request finished within the bound.
    Clean,
    /// The bound elapsed with requests still running.
    Forced { abandoned: usize },
}

impl DrainOutcome {
    pub const fn is_clean(self) -> bool {
        matches!(self, DrainOutcome::Clean)
    }
}

#[derive(Debug)]
pub struct Lifecycle {
    state: Mutex<ShutdownState>,
    in_flight: watch::Sender<usize>,
    drain_timeout: Duration,
}

/// Registration of one in-flight request; completes on drop.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    lifecycle: &'a Lifecycle,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.lifecycle
            .in_flight
            .send_modify(|count| *count = count.saturating_sub(1));
    }
}

impl Lifecycle {
    pub fn new(drain_timeout: Duration) -> Self {
        let (in_flight, _) = watch::channel(0);
        Self {
            state: Mutex::new(ShutdownState::Running),
            in_flight,
            drain_timeout,
        }
    }

    pub fn state(&self) -> ShutdownState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn in_flight(&self) -> usize {
        *self.in_flight.borrow()
    }

    /// Registers a request. Returns `None` once the server is no longer running.
    pub fn enter(&self) -> Option<InFlightGuard<'_>> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state != ShutdownState::Running {
            return None;
        }
        // Incremented under the state lock so a drain cannot observe zero
        // between the check and the registration.
        self.in_flight.send_modify(|count| *count += 1);
        Some(InFlightGuard { lifecycle: self })
    }

    /// Stops admitting new requests. Returns `false` if draining had already begun.
    pub fn begin_drain(&self) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state != ShutdownState::Running {
            return false;
        }
        *state = ShutdownState::Draining;
        true
    }

    /// Drains in-flight requests for at most the configured timeout and moves
    /// to [`ShutdownState::Stopped`]. Begins draining if that has not happened yet.
    pub async fn drain(&self) -> DrainOutcome {
        self.begin_drain();
        log::info!(
            "Draining {} in-flight request(s), waiting up to {:?}",
            self.in_flight(),
            self.drain_timeout
        );

        let mut idle = self.in_flight.subscribe();
        let finished = tokio::time::timeout(self.drain_timeout, idle.wait_for(|count| *count == 0))
            .await
            .is_ok();

        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = ShutdownState::Stopped;

        if finished {
            DrainOutcome::Clean
        } else {
            DrainOutcome::Forced {
                abandoned: self.in_flight(),
            }
        }
    }
}

/// Process exit status for how the server stopped. Only a clean drain succeeds.
pub fn exit_code(result: &io::Result<DrainOutcome>) -> ExitCode {
    match result {
        Ok(DrainOutcome::Clean) => {
            log::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Ok(DrainOutcome::Forced { .. }) => ExitCode::FAILURE,
        Err(err) => {
            log::error!("Server failed: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Resolves on the first interrupt or termination request.
pub async fn wait_for_termination() {
    let interrupt = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for interrupt signal: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                log::error!("Failed to listen for termination signal: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => log::info!("Received interrupt, shutting down"),
        () = terminate => log::info!("Received termination request, shutting down"),
    }
}
