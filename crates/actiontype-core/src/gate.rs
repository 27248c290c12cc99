use crate::error::{AdminError, Result};
use crate::transport::Transport;
use crate::types::ActionTypeRecord;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// GateStatus
// ---------------------------------------------------------------------------

/// Observable "submitting" flag. Cloned handles see the same state, so the
/// rest of the UI can disable buttons while a commit is in flight.
#[derive(Debug, Clone, Default)]
pub struct GateStatus(Arc<AtomicBool>);

impl GateStatus {
    pub fn is_pending(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Clears the pending flag when dropped: on success, on error, on panic in
/// the transport, and when the confirm future itself is dropped.
struct PendingGuard<'a>(&'a AtomicBool);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// ConfirmationGate
// ---------------------------------------------------------------------------

/// Read-only review step between building a record and committing it.
#[derive(Debug)]
pub struct ConfirmationGate {
    record: ActionTypeRecord,
    status: GateStatus,
}

impl ConfirmationGate {
    pub fn open(record: ActionTypeRecord) -> Self {
        debug!(name = %record.name, "confirmation gate opened");
        Self {
            record,
            status: GateStatus::default(),
        }
    }

    pub fn record(&self) -> &ActionTypeRecord {
        &self.record
    }

    /// The record as it will be sent, pretty-printed.
    pub fn preview(&self) -> Result<String> {
        self.record.to_pretty_json()
    }

    pub fn status(&self) -> GateStatus {
        self.status.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    /// Both confirm and dismiss are disabled while a commit is in flight.
    pub fn actions_enabled(&self) -> bool {
        !self.is_pending()
    }

    /// Hand the record to `transport`.
    ///
    /// The record stays in the gate whatever the outcome, so a failed commit
    /// can be retried as is. A second call while one is in flight is
    /// rejected with [`AdminError::ConfirmPending`].
    pub async fn confirm(&self, transport: &dyn Transport) -> Result<()> {
        if self.status.0.swap(true, Ordering::SeqCst) {
            return Err(AdminError::ConfirmPending);
        }
        let _guard = PendingGuard(&self.status.0);

        debug!(name = %self.record.name, transport = %transport.describe(), "confirming");
        transport.commit(&self.record).await.map_err(|reason| {
            warn!(name = %self.record.name, %reason, "commit failed");
            AdminError::TransportFailure(reason)
        })
    }

    /// Take the record out, typically after a successful confirm.
    pub fn into_record(self) -> ActionTypeRecord {
        self.record
    }

    /// Discard the record without committing.
    pub fn dismiss(self) {
        debug!(name = %self.record.name, "confirmation dismissed");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use crate::transport::{StubTransport, TransportError};
    use async_trait::async_trait;
    use std::time::Duration;

    fn gate() -> ConfirmationGate {
        ConfirmationGate::open(seed::demo_records().remove(1))
    }

    struct PanickingTransport;

    #[async_trait]
    impl Transport for PanickingTransport {
        async fn commit(
            &self,
            _record: &ActionTypeRecord,
        ) -> std::result::Result<(), TransportError> {
            panic!("transport blew up");
        }

        fn describe(&self) -> String {
            "panicking".to_string()
        }
    }

    #[test]
    fn preview_shows_record() {
        let g = gate();
        let preview = g.preview().unwrap();
        assert!(preview.contains("Order Processing"));
        assert!(g.actions_enabled());
    }

    #[tokio::test]
    async fn confirm_success_clears_pending() {
        let g = gate();
        g.confirm(&StubTransport::succeeding(Duration::ZERO)).await.unwrap();
        assert!(!g.is_pending());
        assert_eq!(g.into_record().name, "Order Processing");
    }

    #[tokio::test]
    async fn failure_keeps_record_for_retry() {
        let g = gate();
        let err = g.confirm(&StubTransport::failing("backend down")).await.unwrap_err();
        assert!(matches!(err, AdminError::TransportFailure(ref r) if r == "backend down"));
        assert!(g.actions_enabled());
        assert_eq!(g.record().name, "Order Processing");

        g.confirm(&StubTransport::succeeding(Duration::ZERO)).await.unwrap();
    }

    #[tokio::test]
    async fn double_submit_is_rejected_while_pending() {
        let g = gate();
        let slow = StubTransport::succeeding(Duration::from_millis(50));
        let fast = StubTransport::succeeding(Duration::ZERO);
        let status = g.status();

        let (first, second) = tokio::join!(g.confirm(&slow), async {
            assert!(status.is_pending());
            g.confirm(&fast).await
        });
        assert!(first.is_ok());
        assert!(matches!(second, Err(AdminError::ConfirmPending)));
        assert!(!status.is_pending());
    }

    #[tokio::test]
    async fn dropped_confirm_releases_pending() {
        let g = gate();
        let slow = StubTransport::succeeding(Duration::from_secs(5));
        let res = tokio::time::timeout(Duration::from_millis(10), g.confirm(&slow)).await;
        assert!(res.is_err());
        assert!(g.actions_enabled());
    }

    #[tokio::test]
    async fn panicking_transport_releases_pending() {
        let g = Arc::new(gate());
        let status = g.status();
        let task = {
            let g = Arc::clone(&g);
            tokio::spawn(async move { g.confirm(&PanickingTransport).await })
        };
        assert!(task.await.is_err());
        assert!(!status.is_pending());
    }
}
