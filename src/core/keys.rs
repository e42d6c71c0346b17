use chrono::Utc;
use uuid::Uuid;

/// Generates a row key of the form `<prefix>_<random hex>_<millis hex>`.
pub fn fresh_key(prefix: &str) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!(
        "{}_{}_{:x}",
        prefix,
        &random[..12],
        Utc::now().timestamp_millis()
    )
}
