use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use super::chain::{resolve_chain, NavigationError, Resolution};
use crate::guard::RouteGuard;
use crate::models::RouteLocation;
use crate::routing::RouteTable;
use crate::session::{SessionState, TokenStore};

/// Client-side router state: the committed location plus guarded navigation.
///
/// Overlapping navigations are resolved newest-wins with cancellation: when
/// a navigation starts, any older one still waiting on a role lookup is
/// dropped at that await point and reports [`NavigationError::Superseded`].
/// Only the newest navigation can commit its location.
pub struct Navigator {
    guard: Arc<RouteGuard>,
    table: Arc<RouteTable>,
    store: Arc<dyn TokenStore>,
    generation: AtomicU64,
    latest: watch::Sender<u64>,
    current: Mutex<Option<RouteLocation>>,
}

impl Navigator {
    pub fn new(guard: Arc<RouteGuard>, table: Arc<RouteTable>, store: Arc<dyn TokenStore>) -> Self {
        let (latest, _) = watch::channel(0);
        Navigator {
            guard,
            table,
            store,
            generation: AtomicU64::new(0),
            latest,
            current: Mutex::new(None),
        }
    }

    /// The last committed location, `None` before the first navigation.
    pub fn current(&self) -> Option<RouteLocation> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Navigate to `raw` (`path?query#hash`), following guard redirects.
    pub async fn navigate(&self, raw: &str) -> Result<Resolution, NavigationError> {
        let mut newer = self.latest.subscribe();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.latest.send_modify(|latest| *latest = (*latest).max(generation));

        let span = info_span!("navigation", id = %Uuid::new_v4(), to = raw);
        let work = async {
            // Session is read fresh for every navigation.
            let session = SessionState::load(self.store.as_ref()).await;
            let from = self.current();
            let target = self.table.resolve(raw);
            resolve_chain(&self.guard, &self.table, &session, from.as_ref(), target).await
        };

        let resolution = tokio::select! {
            biased;
            result = work.instrument(span.clone()) => result?,
            _ = superseded(&mut newer, generation) => {
                span.in_scope(|| debug!("Navigation cancelled by a newer one"));
                return Err(NavigationError::Superseded(raw.to_string()));
            }
        };

        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if self.generation.load(Ordering::SeqCst) != generation {
            return Err(NavigationError::Superseded(raw.to_string()));
        }
        span.in_scope(|| info!("Navigated to {}", resolution.location.full_path));
        *current = Some(resolution.location.clone());
        Ok(resolution)
    }
}

/// Completes once a navigation newer than `generation` has started.
async fn superseded(newer: &mut watch::Receiver<u64>, generation: u64) {
    while newer.changed().await.is_ok() {
        if *newer.borrow_and_update() > generation {
            return;
        }
    }
    // Sender gone: nothing can supersede us any more.
    std::future::pending::<()>().await
}
