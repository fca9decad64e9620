use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::api::{ApiError, RoleLookup};
use crate::models::Role;
use crate::session::SessionState;

/// Role lookup double that counts calls and can stall or fail.
pub(crate) struct StubRoles {
    answer: Result<Option<&'static str>, ()>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StubRoles {
    pub(crate) fn role(role: &'static str) -> Self {
        Self::answering(Ok(Some(role)))
    }

    pub(crate) fn failing() -> Self {
        Self::answering(Err(()))
    }

    fn answering(answer: Result<Option<&'static str>, ()>) -> Self {
        StubRoles {
            answer,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoleLookup for StubRoles {
    async fn current_role(&self, _session: &SessionState) -> Result<Option<Role>, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.answer {
            Ok(role) => Ok(role.map(Role::new)),
            Err(()) => Err(ApiError::MissingData),
        }
    }
}
