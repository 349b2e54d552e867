use chrono::Utc;
use serde_json::json;
use worker::{console_error, console_log, console_warn};

/// Structured logger scoped to a single request.
///
/// Emits one JSON object per line so log drains can index on level,
/// request id, and the free-form `data` fields.
pub struct Logger {
    request_id: String,
}

impl Logger {
    pub fn new(request_id: String) -> Self {
        Self { request_id }
    }

    pub fn info(&self, message: &str, data: Option<serde_json::Value>) {
        self.log("INFO", message, data);
    }

    pub fn warn(&self, message: &str, data: Option<serde_json::Value>) {
        self.log("WARN", message, data);
    }

    pub fn error(&self, message: &str, data: Option<serde_json::Value>) {
        self.log("ERROR", message, data);
    }

    fn log(&self, level: &str, message: &str, data: Option<serde_json::Value>) {
        let entry = json!({
            "timestamp": Utc::now().to_rfc3339(),
            "level": level,
            "requestId": self.request_id,
            "message": message,
            "data": data,
        });

        match level {
            "WARN" => console_warn!("{}", entry),
            "ERROR" => console_error!("{}", entry),
            _ => console_log!("{}", entry),
        }
    }
}

/// Builds the optional `data` argument of the [`Logger`] methods.
///
/// Usage: `log_data!("key" => "a.txt", "partNumber" => 3)`
#[macro_export]
macro_rules! log_data {
    ($($key:expr => $value:expr),* $(,)?) => {
        Some(serde_json::json!({ $($key: $value),* }))
    };
}
