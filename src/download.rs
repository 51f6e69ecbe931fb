//! Single-shot GET download

use crate::error::TransferError;
use crate::headers::apply_headers;
use crate::options::DownloadOptions;
use crate::response::TransferResult;
use crate::settle::{settle, Direction};
use crate::transport::{event_channel, Transport, TransportRequest};
use log::info;
use reqwest::Method;

/// GET `address`, reporting receive progress.
///
/// Resolves on any completed response, 2xx or not.
pub async fn download_with<T: Transport + ?Sized>(
    transport: &T,
    address: &str,
    options: DownloadOptions,
) -> Result<TransferResult, TransferError> {
    let mut request = TransportRequest::open(Method::GET, address);
    request.set_with_credentials(options.credentials_flag());
    request.set_response_type(options.response_type);
    apply_headers(&mut request, options.headers.as_ref());

    let (events, rx) = event_channel();
    info!("download: {} response_type={}", address, options.response_type);
    transport.send(request, events);

    settle(
        rx,
        Direction::Download,
        options.response_type,
        options.on_progress.as_ref(),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::CredentialsMode;
    use crate::progress::ProgressEvent;
    use crate::response::{ResponseBody, ResponseType};
    use crate::transport::{FakeTransport, RawResponse, TransportEvent};
    use std::sync::{Arc, Mutex};

    const URL: &str = "http://localhost:3000/files/foo.png";
    const BODY: &str = r#"{"ok":true}"#;

    #[tokio::test]
    async fn downloads_a_blob_by_default() {
        let fake = FakeTransport::new();
        fake.respond(200, Some("image/png"), "png-bytes");

        let res = download_with(&fake, URL, DownloadOptions::new()).await.unwrap();
        assert!(res.ok);
        assert_eq!(res.status, 200);
        let blob = res.body.as_blob().unwrap();
        assert_eq!(blob.bytes(), b"png-bytes");
        assert_eq!(blob.content_type(), "image/png");

        let request = &fake.requests()[0];
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.url, URL);
        assert_eq!(request.response_type, ResponseType::Blob);
        assert!(!request.with_credentials);
        assert!(request.headers.is_empty());
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn text_response_type() {
        let fake = FakeTransport::new();
        fake.respond(200, Some("application/json"), BODY);

        let res = download_with(&fake, URL, DownloadOptions::new().response_type(ResponseType::Text))
            .await
            .unwrap();
        assert_eq!(res.body, ResponseBody::Text(BODY.to_string()));
    }

    #[tokio::test]
    async fn custom_headers_and_credentials() {
        let fake = FakeTransport::new();
        fake.respond(200, None, BODY).respond(200, None, BODY);

        download_with(
            &fake,
            URL,
            DownloadOptions::new().header("X-Foo", "bar").with_credentials(true),
        )
        .await
        .unwrap();
        download_with(
            &fake,
            URL,
            DownloadOptions::new().credentials(CredentialsMode::Include),
        )
        .await
        .unwrap();

        let requests = fake.requests();
        assert_eq!(requests[0].header("X-Foo"), Some("bar"));
        assert!(requests[0].with_credentials);
        assert!(requests[1].headers.is_empty());
        assert!(requests[1].with_credentials);
    }

    #[tokio::test]
    async fn not_found_resolves() {
        let fake = FakeTransport::new();
        fake.respond(404, Some("text/plain"), "missing");

        let res = download_with(&fake, URL, DownloadOptions::new()).await.unwrap();
        assert_eq!(res.status, 404);
        assert!(!res.ok);
    }

    #[tokio::test]
    async fn progress_is_monotonic_and_precedes_settlement() {
        let fake = FakeTransport::new();
        fake.respond_with(vec![
            TransportEvent::UploadProgress(ProgressEvent::new(1, None)),
            TransportEvent::DownloadProgress(ProgressEvent::new(4, Some(8))),
            TransportEvent::DownloadProgress(ProgressEvent::new(8, Some(8))),
            TransportEvent::Load(RawResponse {
                status: 200,
                content_type: None,
                body: vec![0u8; 8],
            }),
        ]);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        download_with(
            &fake,
            URL,
            DownloadOptions::new().on_progress(move |ev| sink.lock().unwrap().push(*ev)),
        )
        .await
        .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![ProgressEvent::new(4, Some(8)), ProgressEvent::new(8, Some(8))]
        );
        assert!(seen.windows(2).all(|w| w[0].loaded <= w[1].loaded));
    }

    #[tokio::test]
    async fn abort_rejects() {
        let fake = FakeTransport::new();
        fake.abort("user navigated away");

        let err = download_with(&fake, URL, DownloadOptions::new()).await.unwrap_err();
        assert!(err.is_abort());
    }
}
