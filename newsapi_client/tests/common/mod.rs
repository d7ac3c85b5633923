use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use newsapi_client::{
    LogLevel, LogRecord, Logger, RequestDescriptor, ResponseEnvelope, Transport, TransportError,
};
use tokio_util::sync::CancellationToken;

/// Replies by URL path; unknown paths get a 404. Counts every call.
#[derive(Default)]
pub struct MockTransport {
    routes: HashMap<String, Result<ResponseEnvelope, TransportError>>,
    delays: HashMap<String, Duration>,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, path: &str, status: u16, body: &str) -> Self {
        self.routes.insert(
            path.to_string(),
            Ok(ResponseEnvelope::new(status, body.as_bytes().to_vec())),
        );
        self
    }

    pub fn fail(mut self, path: &str, err: TransportError) -> Self {
        self.routes.insert(path.to_string(), Err(err));
        self
    }

    pub fn delay(mut self, path: &str, delay: Duration) -> Self {
        self.delays.insert(path.to_string(), delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    async fn send(
        &self,
        request: &RequestDescriptor,
        cancel: &CancellationToken,
    ) -> Result<ResponseEnvelope, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(request.url().to_string());

        let path = request.url().path().to_string();
        if let Some(delay) = self.delays.get(&path) {
            tokio::select! {
                _ = cancel.cancelled() => return Err(TransportError::Cancelled),
                _ = tokio::time::sleep(*delay) => {}
            }
        }
        self.routes
            .get(&path)
            .cloned()
            .unwrap_or_else(|| Ok(ResponseEnvelope::new(404, b"not found".to_vec())))
    }
}

/// Keeps every structured record and every rendered line.
#[derive(Default)]
pub struct RecordingLogger {
    records: Mutex<Vec<LogRecord>>,
    lines: Mutex<Vec<(LogLevel, String)>>,
}

#[allow(dead_code)]
impl RecordingLogger {
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub fn count_requests(&self) -> usize {
        self.records()
            .iter()
            .filter(|r| matches!(r, LogRecord::Request { .. }))
            .count()
    }

    pub fn count_errors(&self) -> usize {
        self.records()
            .iter()
            .filter(|r| matches!(r, LogRecord::Error { .. }))
            .count()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        self.lines.lock().unwrap().push((level, message.to_string()));
    }

    fn log_sensitive(&self, insensitive: &str, _sensitive: &str) {
        self.log(LogLevel::Default, &format!("{}: <private>", insensitive));
    }

    fn record(&self, record: &LogRecord) {
        self.records.lock().unwrap().push(record.clone());
        for (level, line) in record.render() {
            self.log(level, &line);
        }
    }
}
