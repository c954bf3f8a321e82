use chrono::Local;

/// Timestamp layout shared by the credential table's date columns.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn current_timestamp() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}
