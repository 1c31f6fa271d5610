use crate::errors::CoreError;
use crate::models::snapshot::PersistedSnapshot;

/// Encode a snapshot into the stored JSON blob.
///
/// Layout:
/// ```text
/// {"timestamp":1710000000000,
///  "expensesList":[{"date":"2024-03-09","amount":30,"note":"lunch"}],
///  "incomeList":[{"date":"2024-03-01","amount":100}]}
/// ```
pub fn encode(snapshot: &PersistedSnapshot) -> Result<String, CoreError> {
    serde_json::to_string(snapshot)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize snapshot: {e}")))
}

/// Decode a stored JSON blob. Missing lists decode as empty, a `null` note as absent.
pub fn decode(blob: &str) -> Result<PersistedSnapshot, CoreError> {
    serde_json::from_str(blob)
        .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize snapshot: {e}")))
}
