//! Generic typed HTTP client: transport call, status validation, decoding.

use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::{
    decode::decode,
    errors::TransportError,
    http::RequestDescriptor,
    logging::{LogRecord, Logger},
    transport::Transport,
    Error,
};

/// Sends [`RequestDescriptor`]s through a [`Transport`] and decodes the
/// successful bodies into the caller's type.
///
/// The client holds only its transport and logger and keeps no per-call
/// state, so one instance can serve any number of concurrent calls (wrap it
/// in an `Arc` to share it across spawned tasks). It never retries and never
/// imposes a timeout.
///
/// Every call writes one request record, then a response record once an
/// HTTP-shaped envelope arrives, and an error record if the call fails.
pub struct NetworkClient<T, L> {
    transport: T,
    logger: L,
}

impl<T: Transport, L: Logger> NetworkClient<T, L> {
    pub fn new(transport: T, logger: L) -> Self {
        Self { transport, logger }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn logger(&self) -> &L {
        &self.logger
    }

    /// Performs `request` and decodes a 2xx body into `R`.
    ///
    /// Cancelling `cancel` before the transport answers fails the call with
    /// [`TransportError::Cancelled`]; no status check or decode happens then.
    pub async fn request<R>(
        &self,
        request: &RequestDescriptor,
        cancel: &CancellationToken,
    ) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        self.logger.record(&LogRecord::request(
            request.method().as_str(),
            request.url().as_str(),
            request.headers(),
            request.body(),
        ));

        let result = self.exchange(request, cancel).await;
        if let Err(ref e) = result {
            self.logger
                .record(&LogRecord::error(e.to_string(), e.failure_reason()));
        }
        result
    }

    /// [`request`](Self::request) for callers with nothing to cancel.
    pub async fn request_uncancellable<R>(&self, request: &RequestDescriptor) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        self.request(request, &CancellationToken::new()).await
    }

    async fn exchange<R>(
        &self,
        request: &RequestDescriptor,
        cancel: &CancellationToken,
    ) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(TransportError::Cancelled),
            res = self.transport.send(request, cancel) => res,
        };
        let envelope = outcome?;

        if !envelope.is_http_shaped() {
            return Err(Error::InvalidResponseShape);
        }

        self.logger.record(&LogRecord::response(&envelope));

        if !envelope.is_success() {
            return Err(Error::InvalidStatusCode {
                code: envelope.status,
                body: envelope.body,
            });
        }

        decode::<R>(&envelope.body).map_err(Error::from)
    }
}
