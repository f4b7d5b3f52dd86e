use serde_json::Value;

use crate::models::RecordId;

/// Records a state-changing action on the `audit` tracing target.
///
/// The REST store has no audit collection, so audit trails go to the log
/// pipeline instead.
pub fn log_audit(
    user_id: Option<&RecordId>,
    action: &str,
    resource: Option<&str>,
    metadata: Option<Value>,
) {
    let metadata = metadata.unwrap_or(Value::Null).to_string();
    tracing::info!(
        target: "audit",
        user_id = user_id.map(RecordId::as_str).unwrap_or("-"),
        action,
        resource = resource.unwrap_or("-"),
        metadata = %metadata,
        "audit"
    );
}
