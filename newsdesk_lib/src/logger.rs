//! [`Logger`] sink that forwards to `tracing`.

use newsapi_client::{LogLevel, Logger, LoggingCategory};

/// Placeholder written instead of sensitive values.
pub const REDACTED: &str = "<private>";

/// Writes client log lines as `tracing` events tagged with a category.
#[derive(Debug, Clone, Copy)]
pub struct TracingLogger {
    category: LoggingCategory,
}

impl TracingLogger {
    pub fn new(category: LoggingCategory) -> Self {
        Self { category }
    }

    pub fn network() -> Self {
        Self::new(LoggingCategory::Network)
    }

    pub fn category(&self) -> LoggingCategory {
        self.category
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::network()
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        let category = self.category.as_str();
        match level {
            LogLevel::Debug => tracing::debug!(category, "{}", message),
            LogLevel::Info | LogLevel::Default => tracing::info!(category, "{}", message),
            LogLevel::Error => tracing::error!(category, "{}", message),
            LogLevel::Fault => tracing::error!(category, fault = true, "{}", message),
        }
    }

    fn log_sensitive(&self, insensitive: &str, _sensitive: &str) {
        tracing::info!(category = self.category.as_str(), "{}", redact(insensitive));
    }
}

/// The line written for a sensitive value: the label and a placeholder.
pub fn redact(insensitive: &str) -> String {
    format!("{}: {}", insensitive, REDACTED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redaction_keeps_label_only() {
        assert_eq!(redact("API key"), "API key: <private>");
    }

    #[test]
    fn default_category_is_network() {
        assert_eq!(TracingLogger::default().category(), LoggingCategory::Network);
    }

    #[test]
    fn logging_without_subscriber_is_harmless() {
        let logger = TracingLogger::new(LoggingCategory::Decoding);
        logger.debug("debug");
        logger.fault("fault");
        logger.log_sensitive("API key", "hunter2");
    }
}
