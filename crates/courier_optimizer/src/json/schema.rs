use schemars::schema_for;
use serde_json::json;

use crate::{json::types, problem::order::Order};

/// Schemas of every public document, keyed by document.
pub fn generate_json_schemas() -> Result<serde_json::Value, serde_json::Error> {
    Ok(json!({
        "order": serde_json::to_value(schema_for!(Order))?,
        "network": serde_json::to_value(schema_for!(types::JsonDeliveryNetwork))?,
        "quote": serde_json::to_value(schema_for!(types::JsonQuote))?,
    }))
}
