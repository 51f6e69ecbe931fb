//! Single-shot multipart POST upload

use crate::error::TransferError;
use crate::headers::apply_headers;
use crate::options::UploadOptions;
use crate::response::TransferResult;
use crate::settle::{settle, Direction};
use crate::transport::{event_channel, Transport, TransportRequest};
use log::{debug, info};
use reqwest::Method;

/// POST `options.file` (merged into `options.payload`) to `address`.
///
/// Resolves on any completed response, 2xx or not; rejects only when the
/// transport reports an error or abort.
pub async fn upload_with<T: Transport + ?Sized>(
    transport: &T,
    address: &str,
    options: UploadOptions,
) -> Result<TransferResult, TransferError> {
    let with_credentials = options.credentials_flag();
    let UploadOptions {
        file,
        field_name,
        payload,
        headers,
        response_type,
        on_progress,
        ..
    } = options;

    let mut payload = payload.unwrap_or_default();
    if !payload.has(&field_name) {
        match file {
            Some(file) => {
                debug!(
                    "upload_attach: {} as field {} ({} bytes)",
                    file.name(),
                    field_name,
                    file.size()
                );
                payload.append(field_name, file);
            }
            None => debug!("upload_attach: no file for field {}", field_name),
        }
    }

    let mut request = TransportRequest::open(Method::POST, address);
    request.set_with_credentials(with_credentials);
    request.set_response_type(response_type);
    apply_headers(&mut request, headers.as_ref());
    request.body = Some(payload);

    let (events, rx) = event_channel();
    info!(
        "upload: {} fields={} payload_bytes={}",
        address,
        request.body.as_ref().map_or(0, |p| p.len()),
        request.body.as_ref().map_or(0, |p| p.payload_len())
    );
    transport.send(request, events);

    settle(rx, Direction::Upload, response_type, on_progress.as_ref()).await
}
