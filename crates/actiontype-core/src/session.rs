//! The single owner of admin state.
//!
//! The session holds the registry, the creation flow and the transport, so
//! a committed record goes straight from the flow into the registry. The
//! order is fixed: the transport resolves, the registry absorbs the record,
//! then the view switches back to the list.

use crate::config::{Config, FormConfig};
use crate::error::{AdminError, Result};
use crate::flow::CreationFlow;
use crate::gate::ConfirmationGate;
use crate::registry::{ActionTypeRegistry, PendingRecord};
use crate::transport::{self, Transport};
use crate::types::ActionTypeRecord;
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    List,
    Create,
}

pub struct AdminSession {
    form: FormConfig,
    registry: ActionTypeRegistry,
    pending: PendingRecord,
    flow: Option<CreationFlow>,
    view: View,
    transport: Box<dyn Transport>,
}

impl AdminSession {
    pub fn new(
        form: FormConfig,
        registry: ActionTypeRegistry,
        transport: Box<dyn Transport>,
    ) -> Self {
        Self {
            form,
            registry,
            pending: PendingRecord::new(),
            flow: None,
            view: View::List,
            transport,
        }
    }

    /// Session over the demonstration seed, with the configured transport.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.form.clone(),
            ActionTypeRegistry::seeded(),
            transport::from_config(&config.transport),
        )
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn registry(&self) -> &ActionTypeRegistry {
        &self.registry
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    // -----------------------------------------------------------------------
    // List view
    // -----------------------------------------------------------------------

    pub fn select(&mut self, id: &str) -> bool {
        self.registry.select(id)
    }

    /// Make sure any committed record waiting in the handoff slot is in the
    /// registry. Safe to call any number of times.
    pub fn refresh_list(&mut self) -> Option<&ActionTypeRecord> {
        self.registry.absorb(&mut self.pending)
    }

    // -----------------------------------------------------------------------
    // Create view
    // -----------------------------------------------------------------------

    /// Switch to the create form, keeping an unfinished flow if there is one.
    pub fn open_create(&mut self) -> &mut CreationFlow {
        self.view = View::Create;
        let form = &self.form;
        self.flow.get_or_insert_with(|| CreationFlow::new(form.clone()))
    }

    /// Leave the create form without committing anything.
    pub fn cancel_create(&mut self) {
        if self.flow.take().is_some() {
            debug!("create form discarded");
        }
        self.view = View::List;
        self.refresh_list();
    }

    pub fn flow(&self) -> Option<&CreationFlow> {
        self.flow.as_ref()
    }

    pub fn flow_mut(&mut self) -> Option<&mut CreationFlow> {
        self.flow.as_mut()
    }

    fn require_flow(&mut self) -> Result<&mut CreationFlow> {
        self.flow.as_mut().ok_or(AdminError::NothingToConfirm)
    }

    pub fn submit(&mut self) -> Result<&ConfirmationGate> {
        self.require_flow()?.submit()
    }

    pub fn dismiss(&mut self) -> bool {
        self.flow.as_mut().is_some_and(CreationFlow::dismiss)
    }

    /// Commit the reviewed record and return to the list with it selected.
    pub async fn confirm(&mut self) -> Result<&ActionTypeRecord> {
        let flow = self.flow.as_mut().ok_or(AdminError::NothingToConfirm)?;
        let record = flow.confirm(self.transport.as_ref()).await?;

        self.pending.put(record);
        self.flow = None;
        self.view = View::List;
        let added = self
            .registry
            .absorb(&mut self.pending)
            .ok_or(AdminError::NothingToConfirm)?;
        info!(id = %added.id, "returned to list");
        Ok(added)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::Field;
    use crate::transport::StubTransport;
    use std::time::Duration;

    fn session(transport: StubTransport) -> AdminSession {
        AdminSession::new(
            FormConfig::default(),
            ActionTypeRegistry::seeded(),
            Box::new(transport),
        )
    }

    fn fill(s: &mut AdminSession, name: &str) {
        let flow = s.open_create();
        flow.edit(Field::Name, name).unwrap();
        flow.edit(Field::Version, "2").unwrap();
        flow.edit(Field::Destinations, r#"[{"destination":"audit"}]"#).unwrap();
    }

    #[tokio::test]
    async fn create_end_to_end() {
        let mut s = session(StubTransport::succeeding(Duration::ZERO));
        let n = s.registry().len();
        fill(&mut s, "Shipment Dispatched");
        assert_eq!(s.view(), View::Create);

        s.submit().unwrap();
        let id = s.confirm().await.unwrap().id.clone();

        assert_eq!(id, (n + 1).to_string());
        assert_eq!(s.view(), View::List);
        assert_eq!(s.registry().len(), n + 1);
        assert_eq!(s.registry().selected_id(), Some(id.as_str()));
        assert!(s.flow().is_none());

        assert!(s.refresh_list().is_none());
        assert_eq!(s.registry().len(), n + 1);
    }

    #[tokio::test]
    async fn transport_failure_stays_on_form() {
        let mut s = session(StubTransport::failing("backend down"));
        fill(&mut s, "Retry Me");
        s.submit().unwrap();

        let err = s.confirm().await.unwrap_err();
        assert!(matches!(err, AdminError::TransportFailure(_)));
        assert_eq!(s.view(), View::Create);
        assert_eq!(s.registry().len(), 3);
        let flow = s.flow().unwrap();
        assert!(flow.gate().is_some());
        assert_eq!(flow.fields().name, "Retry Me");
    }

    #[tokio::test]
    async fn validation_error_blocks_gate() {
        let mut s = session(StubTransport::succeeding(Duration::ZERO));
        let flow = s.open_create();
        flow.edit(Field::Name, "X").unwrap();
        flow.edit(Field::SchemaPayload, "{bad json").unwrap();

        assert!(s.submit().unwrap_err().is_validation());
        assert!(s.flow().unwrap().gate().is_none());
        assert!(matches!(s.confirm().await, Err(AdminError::NothingToConfirm)));
        assert_eq!(s.flow().unwrap().fields().schema_payload.text(), "{bad json");
    }

    #[test]
    fn dismiss_returns_to_form_and_cancel_to_list() {
        let mut s = session(StubTransport::default());
        fill(&mut s, "Draft");
        s.submit().unwrap();
        assert!(s.dismiss());
        assert_eq!(s.view(), View::Create);
        assert_eq!(s.flow().unwrap().fields().name, "Draft");

        s.cancel_create();
        assert_eq!(s.view(), View::List);
        assert!(s.flow().is_none());
        assert_eq!(s.registry().len(), 3);
    }

    #[test]
    fn reopening_create_keeps_unfinished_flow() {
        let mut s = session(StubTransport::default());
        fill(&mut s, "Half done");
        let flow = s.open_create();
        assert_eq!(flow.fields().name, "Half done");

        s.flow_mut().unwrap().edit(Field::Name, "Done").unwrap();
        assert_eq!(s.flow().unwrap().fields().name, "Done");
        assert_eq!(s.transport().describe(), "stub");
    }

    #[test]
    fn select_from_list() {
        let mut s = session(StubTransport::default());
        assert!(s.select("3"));
        assert!(!s.select("nope"));
        assert_eq!(s.registry().selected_id(), Some("3"));
    }
}
