//! Event-to-future adaptation: drain one request's events until it settles

use crate::error::{AbortEvent, TransferError};
use crate::progress::ProgressCallback;
use crate::response::{ResponseType, TransferResult};
use crate::transport::{EventReceiver, TransportEvent};
use log::{debug, warn};

/// Which progress channel the observer listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Upload,
    Download,
}

/// Wait for the first terminal event and turn it into the call's single outcome.
///
/// Progress events on `direction` go to `on_progress` as they arrive; the other
/// direction is ignored. The receiver is consumed, so nothing after the terminal
/// event is observed. A channel that closes without settling is an abort.
pub(crate) async fn settle(
    mut events: EventReceiver,
    direction: Direction,
    response_type: ResponseType,
    on_progress: Option<&ProgressCallback>,
) -> Result<TransferResult, TransferError> {
    while let Some(event) = events.recv().await {
        match event {
            TransportEvent::UploadProgress(progress) if direction == Direction::Upload => {
                if let Some(callback) = on_progress {
                    callback(&progress);
                }
            }
            TransportEvent::DownloadProgress(progress) if direction == Direction::Download => {
                if let Some(callback) = on_progress {
                    callback(&progress);
                }
            }
            TransportEvent::UploadProgress(_) | TransportEvent::DownloadProgress(_) => {}
            TransportEvent::Load(response) => {
                debug!("settled: status={}", response.status);
                let body = response_type.interpret(response.body, response.content_type.as_deref());
                return Ok(TransferResult::new(body, response.status));
            }
            TransportEvent::Error(err) => {
                warn!("settled with error: {}", err);
                return Err(TransferError::Transport(err));
            }
            TransportEvent::Abort(abort) => {
                warn!("settled with abort: {}", abort);
                return Err(TransferError::Aborted(abort));
            }
        }
    }
    Err(TransferError::Aborted(AbortEvent::new(
        "Transport closed without completing",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::progress::ProgressEvent;
    use crate::response::ResponseBody;
    use crate::transport::{event_channel, RawResponse};
    use std::sync::{Arc, Mutex};

    fn recorder() -> (ProgressCallback, Arc<Mutex<Vec<u64>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: ProgressCallback =
            Arc::new(move |ev: &ProgressEvent| sink.lock().unwrap().push(ev.loaded));
        (callback, seen)
    }

    fn load(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            content_type: None,
            body: body.as_bytes().to_vec(),
        }
    }

    #[tokio::test]
    async fn forwards_matching_progress_then_resolves() {
        let (events, rx) = event_channel();
        events.upload_progress(1, Some(3));
        events.download_progress(99, None);
        events.upload_progress(3, Some(3));
        events.load(load(201, "done"));

        let (callback, seen) = recorder();
        let result = settle(rx, Direction::Upload, ResponseType::Text, Some(&callback))
            .await
            .unwrap();

        assert_eq!(result.status, 201);
        assert!(result.ok);
        assert_eq!(result.body, ResponseBody::Text("done".to_string()));
        assert_eq!(*seen.lock().unwrap(), vec![1, 3]);
    }

    #[tokio::test]
    async fn events_after_settlement_are_ignored() {
        let (events, rx) = event_channel();
        events.error(TransportError::new("offline"));
        events.load(load(200, "late"));
        events.download_progress(10, None);

        let (callback, seen) = recorder();
        let err = settle(rx, Direction::Download, ResponseType::Text, Some(&callback))
            .await
            .unwrap_err();

        assert!(matches!(err, TransferError::Transport(e) if e.message == "offline"));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn abort_event_rejects() {
        let (events, rx) = event_channel();
        events.abort(AbortEvent::new("cancelled"));
        let err = settle(rx, Direction::Download, ResponseType::Blob, None)
            .await
            .unwrap_err();
        assert!(matches!(err, TransferError::Aborted(a) if a.reason == "cancelled"));
    }

    #[tokio::test]
    async fn dropped_sender_rejects_as_abort() {
        let (events, rx) = event_channel();
        events.download_progress(5, None);
        drop(events);
        let err = settle(rx, Direction::Download, ResponseType::Blob, None)
            .await
            .unwrap_err();
        assert!(err.is_abort());
    }

    #[tokio::test]
    async fn non_2xx_resolves_with_ok_false() {
        let (events, rx) = event_channel();
        events.load(load(404, r#"{"error":"missing"}"#));
        let result = settle(rx, Direction::Download, ResponseType::Json, None)
            .await
            .unwrap();
        assert_eq!(result.status, 404);
        assert!(!result.ok);
        assert_eq!(result.body, ResponseBody::Json(serde_json::json!({"error": "missing"})));
    }
}
