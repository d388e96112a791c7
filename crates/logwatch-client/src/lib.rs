//! HTTP and live-channel client for the log API

mod api;
mod error;
mod poller;
mod sse;
mod stream;

pub use api::{LogApiClient, MAX_TAIL, MAX_WATCH_TAIL};
pub use error::{ClientError, Result};
pub use poller::{DEFAULT_INFO_INTERVAL, InfoPoller, InfoResult};
pub use sse::SseDecoder;
pub use stream::{LogStreamManager, StreamMessage, StreamUpdate, decode_event};
