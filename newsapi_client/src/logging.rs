//! Logger sink consumed by the client, and the records it is fed.
//!
//! The client never reads anything back from a [`Logger`]; sinks are
//! write-only and infallible from the caller's point of view.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::http::ResponseEnvelope;

/// Severity of a log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Debug,
    Info,
    Error,
    Fault,
    #[default]
    Default,
}

/// Which part of the system a sink is logging for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingCategory {
    Network,
    Decoding,
}

impl LoggingCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Decoding => "decoding",
        }
    }
}

impl fmt::Display for LoggingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Write-only log sink.
///
/// `log_sensitive` takes a label that may be shown as-is and a value that a
/// sink must never expose in plaintext. Redaction is the sink's job.
pub trait Logger: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);

    fn log_sensitive(&self, insensitive: &str, sensitive: &str);

    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    fn fault(&self, message: &str) {
        self.log(LogLevel::Fault, message);
    }

    /// Writes a structured record. The default renders it line by line.
    fn record(&self, record: &LogRecord) {
        for (level, line) in record.render() {
            self.log(level, &line);
        }
    }
}

impl<L: Logger> Logger for Arc<L> {
    fn log(&self, level: LogLevel, message: &str) {
        (**self).log(level, message)
    }

    fn log_sensitive(&self, insensitive: &str, sensitive: &str) {
        (**self).log_sensitive(insensitive, sensitive)
    }

    fn record(&self, record: &LogRecord) {
        (**self).record(record)
    }
}

impl<L: Logger> Logger for &L {
    fn log(&self, level: LogLevel, message: &str) {
        (**self).log(level, message)
    }

    fn log_sensitive(&self, insensitive: &str, sensitive: &str) {
        (**self).log_sensitive(insensitive, sensitive)
    }

    fn record(&self, record: &LogRecord) {
        (**self).record(record)
    }
}

/// One request, response or error event, with its fields already rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogRecord {
    Request {
        method: String,
        url: String,
        /// Rendered header map, or `"None"` when there are no headers.
        headers: String,
        /// Body text, or `"None"` when absent or not valid UTF-8.
        body: String,
    },
    Response {
        status: u16,
        /// Body text, or `"Empty"` when empty or not valid UTF-8.
        body: String,
    },
    Error {
        description: String,
        failure_reason: Option<String>,
    },
}

impl LogRecord {
    pub fn request(
        method: &str,
        url: &str,
        headers: &BTreeMap<String, String>,
        body: Option<&[u8]>,
    ) -> Self {
        let headers = if headers.is_empty() {
            "None".to_string()
        } else {
            format!("{:?}", headers)
        };
        let body = body
            .and_then(|b| std::str::from_utf8(b).ok())
            .unwrap_or("None")
            .to_string();
        Self::Request {
            method: method.to_string(),
            url: url.to_string(),
            headers,
            body,
        }
    }

    pub fn response(envelope: &ResponseEnvelope) -> Self {
        let body = match envelope.body_text() {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => "Empty".to_string(),
        };
        Self::Response {
            status: envelope.status,
            body,
        }
    }

    pub fn error(description: impl Into<String>, failure_reason: Option<String>) -> Self {
        Self::Error {
            description: description.into(),
            failure_reason,
        }
    }

    /// The lines a plain-text sink should write for this record.
    pub fn render(&self) -> Vec<(LogLevel, String)> {
        match self {
            Self::Request {
                method,
                url,
                headers,
                body,
            } => vec![
                (LogLevel::Debug, format!("Request: [{}] {}", method, url)),
                (LogLevel::Debug, format!("Request Headers: {}", headers)),
                (LogLevel::Debug, format!("Request Body: {}", body)),
            ],
            Self::Response { status, body } => vec![
                (LogLevel::Debug, format!("Response Status Code: {}", status)),
                (LogLevel::Debug, format!("Response Body: {}", body)),
            ],
            Self::Error {
                description,
                failure_reason,
            } => {
                let mut lines = vec![(LogLevel::Error, format!("Response Error: {}", description))];
                if let Some(reason) = failure_reason {
                    lines.push((LogLevel::Error, format!("Failure Reason: {}", reason)));
                }
                lines
            }
        }
    }
}
