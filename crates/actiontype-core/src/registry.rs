use crate::error::Result;
use crate::seed;
use crate::types::{ActionTypeRecord, ActionTypeSummary};
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// PendingRecord
// ---------------------------------------------------------------------------

/// Single-slot handoff between the creation flow and the registry.
///
/// Not a queue: a second `put` before a `take` replaces the first record.
/// `take` empties the slot, so draining it twice adds at most one record.
#[derive(Debug, Default)]
pub struct PendingRecord {
    slot: Option<ActionTypeRecord>,
}

impl PendingRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deposit a committed record. Returns the record it displaced, if any.
    pub fn put(&mut self, record: ActionTypeRecord) -> Option<ActionTypeRecord> {
        self.slot.replace(record)
    }

    pub fn take(&mut self) -> Option<ActionTypeRecord> {
        self.slot.take()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}

// ---------------------------------------------------------------------------
// ActionTypeRegistry
// ---------------------------------------------------------------------------

/// Ordered collection of committed records plus the current selection.
#[derive(Debug, Clone)]
pub struct ActionTypeRegistry {
    records: Vec<ActionTypeRecord>,
    selected: Option<String>,
    /// Lower bound for the next id; only ever grows, so ids are never reused.
    next_seq: u64,
}

impl ActionTypeRegistry {
    /// Start from `seed`, selecting its first record.
    pub fn new(seed: Vec<ActionTypeRecord>) -> Self {
        let selected = seed.first().map(|r| r.id.clone());
        let next_seq = seed.len() as u64 + 1;
        Self {
            records: seed,
            selected,
            next_seq,
        }
    }

    /// Registry holding the demonstration records.
    pub fn seeded() -> Self {
        Self::new(seed::demo_records())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn records(&self) -> &[ActionTypeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ActionTypeRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn selected(&self) -> Option<&ActionTypeRecord> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Rows for the master list, in insertion order.
    pub fn summaries(&self) -> Vec<ActionTypeSummary> {
        self.records
            .iter()
            .map(|r| ActionTypeSummary {
                id: r.id.clone(),
                name: r.name.clone(),
                version: r.version().to_string(),
                schema_payload_type: r.payload_type(),
                selected: self.selected.as_deref() == Some(r.id.as_str()),
            })
            .collect()
    }

    /// Pretty JSON of the selected record for the detail panel.
    pub fn detail_json(&self) -> Result<Option<String>> {
        self.selected().map(|r| r.to_pretty_json()).transpose()
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Select the record with `id`. Unknown ids leave the selection as is;
    /// the return value says whether `id` exists.
    pub fn select(&mut self, id: &str) -> bool {
        if self.get(id).is_none() {
            debug!(id, "select ignored: unknown action type");
            return false;
        }
        self.selected = Some(id.to_string());
        true
    }

    /// Append `record` under a fresh id and select it.
    pub fn add(&mut self, mut record: ActionTypeRecord) -> &ActionTypeRecord {
        let mut seq = self.next_seq.max(self.records.len() as u64 + 1);
        while self.get(&seq.to_string()).is_some() {
            seq += 1;
        }
        self.next_seq = seq + 1;

        if record.is_committed() {
            debug!(previous = %record.id, "reassigning id of a committed record");
        }
        record.id = seq.to_string();
        record.name = record.action_type.name.clone();
        info!(id = %record.id, name = %record.name, "action type added");

        self.selected = Some(record.id.clone());
        self.records.push(record);
        let last = self.records.len() - 1;
        &self.records[last]
    }

    /// Drain `pending` into the registry. A second call without a new
    /// deposit is a no-op.
    pub fn absorb(&mut self, pending: &mut PendingRecord) -> Option<&ActionTypeRecord> {
        let record = pending.take()?;
        Some(self.add(record))
    }
}

impl Default for ActionTypeRegistry {
    fn default() -> Self {
        Self::seeded()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormConfig;
    use crate::payload::{FormFields, PayloadBuilder};
    use crate::types::PLACEHOLDER_ID;

    fn built(name: &str) -> ActionTypeRecord {
        let mut f = FormFields::new(&FormConfig::default());
        f.name = name.to_string();
        PayloadBuilder::build(&f).unwrap()
    }

    #[test]
    fn seeded_selects_first() {
        let reg = ActionTypeRegistry::seeded();
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.selected_id(), Some("1"));
    }

    #[test]
    fn empty_registry_has_no_selection() {
        let reg = ActionTypeRegistry::new(Vec::new());
        assert!(reg.is_empty());
        assert!(reg.selected().is_none());
        assert_eq!(reg.detail_json().unwrap(), None);
    }

    #[test]
    fn select_unknown_is_noop() {
        let mut reg = ActionTypeRegistry::seeded();
        assert!(reg.select("2"));
        assert!(!reg.select("99"));
        assert_eq!(reg.selected_id(), Some("2"));
    }

    #[test]
    fn add_assigns_next_id_and_selects() {
        let mut reg = ActionTypeRegistry::seeded();
        let n = reg.len();
        let added = reg.add(built("Shipment Dispatched"));
        assert_eq!(added.id, (n + 1).to_string());
        assert_ne!(added.id, PLACEHOLDER_ID);
        assert_eq!(reg.len(), n + 1);
        assert_eq!(reg.selected().map(|r| r.name.as_str()), Some("Shipment Dispatched"));
        assert_eq!(reg.records().last().map(|r| r.id.as_str()), Some("4"));
    }

    #[test]
    fn add_preserves_insertion_order() {
        let mut reg = ActionTypeRegistry::new(Vec::new());
        reg.add(built("a"));
        reg.add(built("b"));
        reg.add(built("c"));
        let ids: Vec<&str> = reg.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
        let names: Vec<&str> = reg.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn add_never_collides_with_existing_ids() {
        let mut seed = seed::demo_records();
        seed[0].id = "4".to_string();
        let mut reg = ActionTypeRegistry::new(seed);
        let id = reg.add(built("x")).id.clone();
        assert_eq!(id, "5");
    }

    #[test]
    fn add_reassigns_id_of_committed_record() {
        let mut reg = ActionTypeRegistry::seeded();
        let copy = reg.get("2").cloned().unwrap();
        assert!(copy.is_committed());
        let added = reg.add(copy);
        assert_eq!(added.id, "4");
        assert_eq!(added.name, "Order Processing");
        assert_eq!(reg.get("2").map(|r| r.name.as_str()), Some("Order Processing"));
    }

    #[test]
    fn absorb_consumes_signal_once() {
        let mut reg = ActionTypeRegistry::seeded();
        let mut pending = PendingRecord::new();
        pending.put(built("Once"));

        assert!(reg.absorb(&mut pending).is_some());
        assert!(pending.is_empty());
        assert!(reg.absorb(&mut pending).is_none());
        assert_eq!(reg.len(), 4);
        assert_eq!(reg.selected_id(), Some("4"));
    }

    #[test]
    fn pending_is_single_slot() {
        let mut pending = PendingRecord::new();
        assert!(pending.put(built("first")).is_none());
        let displaced = pending.put(built("second")).unwrap();
        assert_eq!(displaced.name, "first");
        assert_eq!(pending.take().unwrap().name, "second");
        assert!(pending.take().is_none());
    }

    #[test]
    fn summaries_mark_selection() {
        let mut reg = ActionTypeRegistry::seeded();
        reg.select("3");
        let rows = reg.summaries();
        assert_eq!(rows.len(), 3);
        assert!(rows[2].selected);
        assert!(!rows[0].selected);
        assert_eq!(rows[1].version_badge(), "v2");
    }

    #[test]
    fn detail_json_is_pretty() {
        let reg = ActionTypeRegistry::seeded();
        let json = reg.detail_json().unwrap().unwrap();
        assert!(json.contains("\n  \"actionType\""));
        assert!(json.contains("\"User Registration\""));
    }
}
