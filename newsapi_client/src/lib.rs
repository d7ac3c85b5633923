mod client;
mod decode;
mod endpoint;
mod errors;
mod http;
mod logging;
mod service;
mod transport;
pub mod types;
pub use self::client::NetworkClient;
pub use self::decode::{decode, DecodeFailure};
pub use self::endpoint::{Endpoint, EndpointConfig, NewsEndpoint, NewsRoute};
pub use self::errors::{Error, TransportError};
pub use self::http::{RequestDescriptor, ResponseEnvelope};
pub use self::logging::{LogLevel, LogRecord, Logger, LoggingCategory};
pub use self::service::NewsApiService;
pub use self::transport::Transport;
