//! The transport seam: whatever actually moves bytes over the network.
//!
//! The client only ever talks to [`Transport`]. Retries, timeouts, pooling and
//! authentication belong to implementations of this trait, not to the client.

use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::errors::TransportError;
use crate::http::{RequestDescriptor, ResponseEnvelope};

/// Performs a single request and returns the raw envelope.
///
/// Implementations must be safe to share between tasks. The cancellation
/// token is the caller's; a transport should stop work and return
/// [`TransportError::Cancelled`] once it fires.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: &RequestDescriptor,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<ResponseEnvelope, TransportError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn send(
        &self,
        request: &RequestDescriptor,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<ResponseEnvelope, TransportError>> + Send {
        (**self).send(request, cancel)
    }
}

impl<T: Transport> Transport for &T {
    fn send(
        &self,
        request: &RequestDescriptor,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<ResponseEnvelope, TransportError>> + Send {
        (**self).send(request, cancel)
    }
}
