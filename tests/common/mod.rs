//! Shared helpers for HTTP transport integration tests.

use blob_transfer::ProgressEvent;
use std::sync::{Arc, Mutex};

/// Progress observer that records every event it receives.
#[derive(Clone, Default)]
pub struct ProgressLog(Arc<Mutex<Vec<ProgressEvent>>>);

impl ProgressLog {
    pub fn observer(&self) -> impl Fn(&ProgressEvent) + Send + Sync + 'static {
        let events = Arc::clone(&self.0);
        move |ev: &ProgressEvent| events.lock().unwrap().push(*ev)
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.0.lock().unwrap().clone()
    }

    pub fn assert_monotonic(&self) {
        let events = self.events();
        assert!(
            events.windows(2).all(|w| w[0].loaded <= w[1].loaded),
            "progress went backwards: {:?}",
            events
        );
    }
}

/// An address on which nothing is listening.
pub fn closed_address() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/files", port)
}
