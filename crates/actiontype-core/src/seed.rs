//! Demonstration records the list view starts with until a backend exists.

use crate::types::{ActionTypeDefinition, ActionTypeProducer, ActionTypeRecord, SchemaPayloadType};
use serde_json::json;

pub fn demo_records() -> Vec<ActionTypeRecord> {
    vec![
        demo(
            "1",
            "User Registration",
            "Action type for user registration events",
            "1",
            SchemaPayloadType::Json,
            json!({ "userId": "string", "email": "string" }),
            "user-registration",
            (112200, 1, "UserService"),
            json!([{ "destination": "email-service" }, { "destination": "analytics" }]),
        ),
        demo(
            "2",
            "Order Processing",
            "Action type for order processing events",
            "2",
            SchemaPayloadType::Avro,
            json!({ "orderId": "string", "amount": "number" }),
            "order-processing",
            (112201, 2, "OrderService"),
            json!([{ "destination": "payment-service" }, { "destination": "inventory" }]),
        ),
        demo(
            "3",
            "Payment Notification",
            "Action type for payment notification events",
            "1",
            SchemaPayloadType::ProtoBuf,
            json!({ "paymentId": "string", "status": "string" }),
            "payment-notification",
            (112202, 3, "PaymentService"),
            json!([{ "destination": "notification-service" }]),
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn demo(
    id: &str,
    name: &str,
    description: &str,
    version: &str,
    payload_type: SchemaPayloadType,
    schema: serde_json::Value,
    arn_suffix: &str,
    (seal_id, deployment_id, app): (u64, u64, &str),
    consumers: serde_json::Value,
) -> ActionTypeRecord {
    ActionTypeRecord {
        id: id.to_string(),
        name: name.to_string(),
        action_type: ActionTypeDefinition {
            name: name.to_string(),
            description: Some(description.to_string()),
            version: version.to_string(),
            schema_payload_type: payload_type,
            schema_payload: Some(schema),
            schema_arn: Some(format!("arn:aws:schemas:us-east-1:123456789012:{arn_suffix}")),
        },
        action_type_producer: ActionTypeProducer {
            seal_id: Some(seal_id),
            deployment_id: Some(deployment_id),
            application_name: Some(app.to_string()),
        },
        action_type_consumers: Some(consumers),
    }
}
