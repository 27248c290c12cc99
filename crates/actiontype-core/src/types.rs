use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Id carried by a record that has been built but not yet committed.
pub const PLACEHOLDER_ID: &str = "0";

// ---------------------------------------------------------------------------
// SchemaPayloadType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaPayloadType {
    #[serde(rename = "JSON")]
    Json,
    #[serde(rename = "AVRO")]
    Avro,
    #[serde(rename = "ProtoBuf")]
    ProtoBuf,
}

impl SchemaPayloadType {
    pub fn all() -> &'static [SchemaPayloadType] {
        &[
            SchemaPayloadType::Json,
            SchemaPayloadType::Avro,
            SchemaPayloadType::ProtoBuf,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SchemaPayloadType::Json => "JSON",
            SchemaPayloadType::Avro => "AVRO",
            SchemaPayloadType::ProtoBuf => "ProtoBuf",
        }
    }
}

impl fmt::Display for SchemaPayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SchemaPayloadType {
    type Err = crate::error::AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "JSON" => Ok(SchemaPayloadType::Json),
            "AVRO" => Ok(SchemaPayloadType::Avro),
            "ProtoBuf" => Ok(SchemaPayloadType::ProtoBuf),
            _ => Err(crate::error::AdminError::InvalidPayloadType(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ActionTypeDefinition / ActionTypeProducer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionTypeDefinition {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Serialized as `Version` to stay compatible with existing consumers.
    #[serde(rename = "Version", alias = "version")]
    pub version: String,
    pub schema_payload_type: SchemaPayloadType,
    #[serde(default)]
    pub schema_payload: Option<Value>,
    #[serde(default)]
    pub schema_arn: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionTypeProducer {
    #[serde(default)]
    pub seal_id: Option<u64>,
    #[serde(default)]
    pub deployment_id: Option<u64>,
    #[serde(default)]
    pub application_name: Option<String>,
}

// ---------------------------------------------------------------------------
// ActionTypeRecord
// ---------------------------------------------------------------------------

/// The unit held by the registry and sent over the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionTypeRecord {
    pub id: String,
    pub name: String,
    pub action_type: ActionTypeDefinition,
    #[serde(default)]
    pub action_type_producer: ActionTypeProducer,
    #[serde(default)]
    pub action_type_consumers: Option<Value>,
}

impl ActionTypeRecord {
    pub fn is_committed(&self) -> bool {
        self.id != PLACEHOLDER_ID
    }

    pub fn version(&self) -> &str {
        &self.action_type.version
    }

    pub fn payload_type(&self) -> SchemaPayloadType {
        self.action_type.schema_payload_type
    }

    /// Pretty-printed JSON, as shown in the review dialog and detail panel.
    pub fn to_pretty_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ---------------------------------------------------------------------------
// ActionTypeSummary
// ---------------------------------------------------------------------------

/// One row of the master list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionTypeSummary {
    pub id: String,
    pub name: String,
    pub version: String,
    pub schema_payload_type: SchemaPayloadType,
    pub selected: bool,
}

impl ActionTypeSummary {
    pub fn version_badge(&self) -> String {
        format!("v{}", self.version)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
