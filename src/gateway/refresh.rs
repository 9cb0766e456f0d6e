use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::{info, warn};

use super::SessionControl;
use crate::error::ApiError;

type InFlight = Shared<BoxFuture<'static, Result<(), ApiError>>>;

/// Single-flight guard around the session refresh.
///
/// The first caller installs the refresh future; everyone arriving while it is
/// pending awaits a clone of the same future and receives the same outcome.
/// `generation` counts successful refreshes so callers can tell that the
/// credential they were sent with has already been renewed.
#[derive(Default)]
pub struct RefreshCoordinator {
    in_flight: Mutex<Option<InFlight>>,
    generation: AtomicU64,
    refreshes_started: AtomicU64,
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Number of refresh calls actually issued since creation.
    pub fn refreshes_started(&self) -> u64 {
        self.refreshes_started.load(Ordering::SeqCst)
    }

    pub fn is_refreshing(&self) -> bool {
        self.slot().is_some()
    }

    /// Join the in-flight refresh, or start one.
    ///
    /// On failure the session is logged out once, by the refresh itself, before
    /// any waiter sees the error. The in-flight marker is cleared on both outcomes.
    pub async fn refresh(self: &Arc<Self>, session: Arc<dyn SessionControl>) -> Result<(), ApiError> {
        let in_flight = {
            let mut slot = self.slot();
            match slot.as_ref() {
                Some(existing) => existing.clone(),
                None => {
                    let started = self.start(session);
                    *slot = Some(started.clone());
                    started
                }
            }
        };
        in_flight.await
    }

    /// The refresh runs as its own task, so it settles and clears the slot
    /// even when every waiter has been cancelled.
    fn start(self: &Arc<Self>, session: Arc<dyn SessionControl>) -> InFlight {
        let this = Arc::clone(self);
        let attempt = self.refreshes_started.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            event_name = "gateway.refresh.start",
            event_domain = "gateway",
            attempt,
            "refreshing session credentials"
        );

        let task = tokio::spawn(async move {
            let outcome = session.refresh_token().await;
            match &outcome {
                Ok(()) => {
                    let generation = this.generation.fetch_add(1, Ordering::SeqCst) + 1;
                    info!(
                        event_name = "gateway.refresh.success",
                        event_domain = "gateway",
                        generation,
                        "session credentials refreshed"
                    );
                }
                Err(e) => {
                    warn!(
                        event_name = "gateway.refresh.failure",
                        event_domain = "gateway",
                        error = %e,
                        "session refresh failed; logging out"
                    );
                    session.logout().await;
                }
            }
            *this.slot() = None;
            outcome
        });

        task.map(|joined| {
            joined.unwrap_or_else(|e| Err(ApiError::Network(format!("refresh task failed: {}", e))))
        })
        .boxed()
        .shared()
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<InFlight>> {
        // The guard is never held across an await, so poisoning only follows a
        // panic in this module; the slot content is still usable then.
        self.in_flight.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
