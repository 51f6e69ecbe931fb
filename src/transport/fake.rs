//! In-memory transport that records requests and replays scripted events

use super::{EventSender, RawResponse, Transport, TransportEvent, TransportRequest};
use crate::error::{AbortEvent, TransportError};
use log::debug;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// Records every request it is given and answers each one with the next
/// queued script. A request with no script left is aborted.
#[derive(Debug, Clone, Default)]
pub struct FakeTransport {
    requests: Arc<Mutex<Vec<TransportRequest>>>,
    scripts: Arc<Mutex<VecDeque<Vec<TransportEvent>>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an arbitrary event sequence for the next request.
    pub fn respond_with(&self, events: Vec<TransportEvent>) -> &Self {
        self.scripts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(events);
        self
    }

    /// Queue a completed response for the next request.
    pub fn respond(&self, status: u16, content_type: Option<&str>, body: impl Into<Vec<u8>>) -> &Self {
        self.respond_with(vec![TransportEvent::Load(RawResponse {
            status,
            content_type: content_type.map(str::to_string),
            body: body.into(),
        })])
    }

    pub fn respond_json(&self, status: u16, body: &serde_json::Value) -> &Self {
        self.respond(status, Some("application/json"), body.to_string())
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.respond_with(vec![TransportEvent::Error(TransportError::new(message))])
    }

    pub fn abort(&self, reason: &str) -> &Self {
        self.respond_with(vec![TransportEvent::Abort(AbortEvent::new(reason))])
    }

    /// Snapshot of the requests sent so far, in order.
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Transport for FakeTransport {
    fn send(&self, request: TransportRequest, events: EventSender) {
        debug!("fake_send: {} {}", request.method, request.url);
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        let script = self
            .scripts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match script {
            Some(script) => script.into_iter().for_each(|event| events.emit(event)),
            None => events.abort(AbortEvent::new("No scripted response")),
        }
    }
}
