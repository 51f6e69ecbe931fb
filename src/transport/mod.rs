//! Transport seam: the request object handed to a transport and the events it reports back
//!
//! A transport executes one request asynchronously and reports through an
//! [`EventSender`]:
//! - any number of upload or download progress events
//! - then one of load, error or abort
//!
//! Events sent after the first terminal one are ignored by the receiving side.

mod config;
mod fake;
mod http;

pub use config::HttpTransportConfig;
pub use fake::FakeTransport;
pub use http::HttpTransport;

use crate::error::{AbortEvent, TransportError};
use crate::form::FormData;
use crate::progress::ProgressEvent;
use crate::response::ResponseType;
use reqwest::Method;
use tokio::sync::mpsc;

/// An opened, not yet sent, request.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub with_credentials: bool,
    pub response_type: ResponseType,
    pub body: Option<FormData>,
}

impl TransportRequest {
    /// Open a request. Defaults: no credentials, text responses, no headers.
    pub fn open(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            with_credentials: false,
            response_type: ResponseType::Text,
            body: None,
        }
    }

    pub fn set_with_credentials(&mut self, with_credentials: bool) {
        self.with_credentials = with_credentials;
    }

    pub fn set_response_type(&mut self, response_type: ResponseType) {
        self.response_type = response_type;
    }

    /// Append a header. Values are not validated here.
    pub fn set_request_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Response as received, before interpretation by response type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    UploadProgress(ProgressEvent),
    DownloadProgress(ProgressEvent),
    Load(RawResponse),
    Error(TransportError),
    Abort(AbortEvent),
}

/// Sending half of a request's event channel.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<TransportEvent>,
}

pub type EventReceiver = mpsc::UnboundedReceiver<TransportEvent>;

pub fn event_channel() -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender { tx }, rx)
}

impl EventSender {
    /// Send an event; a receiver that already settled is not an error.
    pub fn emit(&self, event: TransportEvent) {
        let _ = self.tx.send(event);
    }

    pub fn upload_progress(&self, loaded: u64, total: Option<u64>) {
        self.emit(TransportEvent::UploadProgress(ProgressEvent::new(loaded, total)));
    }

    pub fn download_progress(&self, loaded: u64, total: Option<u64>) {
        self.emit(TransportEvent::DownloadProgress(ProgressEvent::new(loaded, total)));
    }

    pub fn load(&self, response: RawResponse) {
        self.emit(TransportEvent::Load(response));
    }

    pub fn error(&self, error: TransportError) {
        self.emit(TransportEvent::Error(error));
    }

    pub fn abort(&self, event: AbortEvent) {
        self.emit(TransportEvent::Abort(event));
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Platform primitive that carries out a single request.
///
/// `send` must not block: it starts the exchange and returns, reporting through `events`.
pub trait Transport: Send + Sync {
    fn send(&self, request: TransportRequest, events: EventSender);
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn send(&self, request: TransportRequest, events: EventSender) {
        (**self).send(request, events)
    }
}
