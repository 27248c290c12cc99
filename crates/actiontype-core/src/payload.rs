//! Form state and the form-to-record builder.
//!
//! Validation order is fixed and the first failure wins:
//! required fields, `schemaPayload`, `destinations`, `sealId`, `deploymentId`.

use crate::config::FormConfig;
use crate::error::{AdminError, Result};
use crate::structured::StructuredTextField;
use crate::types::{
    ActionTypeDefinition, ActionTypeProducer, ActionTypeRecord, SchemaPayloadType, PLACEHOLDER_ID,
};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use tracing::debug;

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Description,
    Version,
    SchemaPayloadType,
    SchemaPayload,
    SchemaArn,
    SealId,
    DeploymentId,
    ApplicationName,
    Destinations,
}

impl Field {
    pub fn all() -> &'static [Field] {
        &[
            Field::Name,
            Field::Description,
            Field::Version,
            Field::SchemaPayloadType,
            Field::SchemaPayload,
            Field::SchemaArn,
            Field::SealId,
            Field::DeploymentId,
            Field::ApplicationName,
            Field::Destinations,
        ]
    }

    /// Key used on the wire and in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Description => "description",
            Field::Version => "version",
            Field::SchemaPayloadType => "schemaPayloadType",
            Field::SchemaPayload => "schemaPayload",
            Field::SchemaArn => "schemaArn",
            Field::SealId => "sealId",
            Field::DeploymentId => "deploymentId",
            Field::ApplicationName => "applicationName",
            Field::Destinations => "destinations",
        }
    }

    pub fn is_structured(self) -> bool {
        matches!(self, Field::SchemaPayload | Field::Destinations)
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Field::SealId | Field::DeploymentId)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Digit sanitizing
// ---------------------------------------------------------------------------

static NON_DIGIT_RE: OnceLock<Regex> = OnceLock::new();

fn non_digit_re() -> &'static Regex {
    NON_DIGIT_RE.get_or_init(|| Regex::new(r"[^0-9]").expect("static regex"))
}

/// Strip everything but ASCII digits, as numeric inputs do on entry.
pub fn sanitize_digits(text: &str) -> String {
    non_digit_re().replace_all(text, "").into_owned()
}

// ---------------------------------------------------------------------------
// FormFields
// ---------------------------------------------------------------------------

/// Raw values of the create form, exactly as entered.
#[derive(Debug, Clone, PartialEq)]
pub struct FormFields {
    pub name: String,
    pub description: String,
    pub version: String,
    pub schema_payload_type: SchemaPayloadType,
    pub schema_payload: StructuredTextField,
    pub schema_arn: String,
    pub seal_id: String,
    pub deployment_id: String,
    pub application_name: String,
    pub destinations: StructuredTextField,
}

impl FormFields {
    /// A blank form with the configured defaults preselected.
    pub fn new(form: &FormConfig) -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            version: form.default_version.clone(),
            schema_payload_type: form.default_payload_type,
            schema_payload: StructuredTextField::new(),
            schema_arn: String::new(),
            seal_id: String::new(),
            deployment_id: String::new(),
            application_name: String::new(),
            destinations: StructuredTextField::new(),
        }
    }

    /// Current text of `field`.
    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Description => &self.description,
            Field::Version => &self.version,
            Field::SchemaPayloadType => self.schema_payload_type.as_str(),
            Field::SchemaPayload => self.schema_payload.text(),
            Field::SchemaArn => &self.schema_arn,
            Field::SealId => &self.seal_id,
            Field::DeploymentId => &self.deployment_id,
            Field::ApplicationName => &self.application_name,
            Field::Destinations => self.destinations.text(),
        }
    }
}

// ---------------------------------------------------------------------------
// PayloadBuilder
// ---------------------------------------------------------------------------

pub struct PayloadBuilder;

impl PayloadBuilder {
    /// Assemble a record from the form, or report the first validation
    /// failure. The returned record carries [`PLACEHOLDER_ID`]; the registry
    /// assigns the real id on commit.
    pub fn build(fields: &FormFields) -> Result<ActionTypeRecord> {
        let missing: Vec<&str> = [
            (Field::Name, &fields.name),
            (Field::Version, &fields.version),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field.as_str())
        .collect();
        if !missing.is_empty() {
            return Err(AdminError::MissingRequiredField(missing.join(", ")));
        }

        let schema_payload = structured(Field::SchemaPayload, &fields.schema_payload)?;
        let consumers = structured(Field::Destinations, &fields.destinations)?;
        let seal_id = numeric(Field::SealId, &fields.seal_id)?;
        let deployment_id = numeric(Field::DeploymentId, &fields.deployment_id)?;

        let record = ActionTypeRecord {
            id: PLACEHOLDER_ID.to_string(),
            name: fields.name.clone(),
            action_type: ActionTypeDefinition {
                name: fields.name.clone(),
                description: optional_text(&fields.description),
                version: fields.version.clone(),
                schema_payload_type: fields.schema_payload_type,
                schema_payload,
                schema_arn: optional_text(&fields.schema_arn),
            },
            action_type_producer: ActionTypeProducer {
                seal_id,
                deployment_id,
                application_name: optional_text(&fields.application_name),
            },
            action_type_consumers: consumers,
        };
        debug!(name = %record.name, version = %record.version(), "built action type payload");
        Ok(record)
    }
}

fn structured(field: Field, text: &StructuredTextField) -> Result<Option<serde_json::Value>> {
    text.document()
        .map_err(|_| AdminError::InvalidStructuredField(field.as_str().to_string()))
}

fn numeric(field: Field, text: &str) -> Result<Option<u64>> {
    let digits = sanitize_digits(text);
    if digits.is_empty() {
        return Ok(None);
    }
    digits
        .parse::<u64>()
        .map(Some)
        .map_err(|_| AdminError::InvalidNumericField(field.as_str().to_string()))
}

fn optional_text(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
