use crate::config::FormConfig;
use crate::error::{AdminError, Result};
use crate::gate::ConfirmationGate;
use crate::payload::{sanitize_digits, Field, FormFields, PayloadBuilder};
use crate::structured::StructuredTextField;
use crate::transport::Transport;
use crate::types::ActionTypeRecord;
use tracing::{debug, info};

/// State of one "create action type" form: field values, and the review
/// gate once the form has been submitted.
///
/// Field values survive validation errors, dismissal and transport
/// failures. Only a successful confirm resets them.
#[derive(Debug)]
pub struct CreationFlow {
    form: FormConfig,
    fields: FormFields,
    gate: Option<ConfirmationGate>,
}

impl CreationFlow {
    pub fn new(form: FormConfig) -> Self {
        let fields = FormFields::new(&form);
        Self {
            form,
            fields,
            gate: None,
        }
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn version_options(&self) -> &[String] {
        &self.form.versions
    }

    pub fn gate(&self) -> Option<&ConfirmationGate> {
        self.gate.as_ref()
    }

    // -----------------------------------------------------------------------
    // Field edits
    // -----------------------------------------------------------------------

    /// Apply a user edit to `field`.
    ///
    /// Selects (`version`, `schemaPayloadType`) reject values outside their
    /// option set and keep the previous value. Numeric fields drop
    /// non-digits. Structured fields store the text and flag bad JSON.
    pub fn edit(&mut self, field: Field, text: &str) -> Result<()> {
        debug!(%field, "edit");
        let f = &mut self.fields;
        match field {
            Field::Name => f.name = text.to_string(),
            Field::Description => f.description = text.to_string(),
            Field::SchemaArn => f.schema_arn = text.to_string(),
            Field::ApplicationName => f.application_name = text.to_string(),
            Field::Version => {
                if !self.form.allows_version(text) {
                    return Err(AdminError::InvalidVersion(text.to_string()));
                }
                f.version = text.to_string();
            }
            Field::SchemaPayloadType => f.schema_payload_type = text.parse()?,
            Field::SealId => f.seal_id = sanitize_digits(text),
            Field::DeploymentId => f.deployment_id = sanitize_digits(text),
            Field::SchemaPayload => f.schema_payload.on_edit(text),
            Field::Destinations => f.destinations.on_edit(text),
        }
        Ok(())
    }

    fn structured_mut(&mut self, field: Field) -> Option<&mut StructuredTextField> {
        match field {
            Field::SchemaPayload => Some(&mut self.fields.schema_payload),
            Field::Destinations => Some(&mut self.fields.destinations),
            _ => None,
        }
    }

    /// Pretty-print a structured field in place. Returns `false` if `field`
    /// is not structured or its text does not parse.
    pub fn format(&mut self, field: Field) -> bool {
        self.structured_mut(field).is_some_and(|f| f.format())
    }

    // -----------------------------------------------------------------------
    // Submit / confirm / dismiss
    // -----------------------------------------------------------------------

    /// Validate and assemble the record, then open the review gate.
    pub fn submit(&mut self) -> Result<&ConfirmationGate> {
        if self.gate.as_ref().is_some_and(|g| g.is_pending()) {
            return Err(AdminError::ConfirmPending);
        }
        let record = PayloadBuilder::build(&self.fields)?;
        Ok(&*self.gate.insert(ConfirmationGate::open(record)))
    }

    /// Commit the record under review.
    ///
    /// On success the gate closes, the form resets to its defaults and the
    /// committed record is returned for the registry. On failure the gate
    /// and the form are kept for a retry.
    pub async fn confirm(&mut self, transport: &dyn Transport) -> Result<ActionTypeRecord> {
        match &self.gate {
            None => return Err(AdminError::NothingToConfirm),
            Some(gate) => gate.confirm(transport).await?,
        }
        let record = self
            .gate
            .take()
            .map(ConfirmationGate::into_record)
            .ok_or(AdminError::NothingToConfirm)?;
        self.reset();
        info!(name = %record.name, "action type confirmed");
        Ok(record)
    }

    /// Close the review gate without committing. Returns `false` when there
    /// was nothing to dismiss or a commit is in flight.
    pub fn dismiss(&mut self) -> bool {
        match self.gate.take() {
            Some(gate) if gate.is_pending() => {
                self.gate = Some(gate);
                false
            }
            Some(gate) => {
                gate.dismiss();
                true
            }
            None => false,
        }
    }

    /// Clear every field back to the configured defaults.
    pub fn reset(&mut self) {
        self.fields = FormFields::new(&self.form);
        self.gate = None;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
