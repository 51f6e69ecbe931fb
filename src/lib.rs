//! Future-based file upload and download helpers
//!
//! Each call performs one request/response exchange and settles exactly once:
//! - any completed response resolves, with `ok` true for 2xx statuses
//! - a transport error or abort rejects
//!
//! Progress observers see byte counts for the send side (uploads) or the
//! receive side (downloads) before the call settles.
//!
//! The crate-level functions run on a shared [`HttpTransport`] and must be called
//! from within a tokio runtime. Use [`TransferClient`] to pick another transport.

mod blob;
mod client;
mod download;
mod error;
mod fetched;
mod form;
mod headers;
mod options;
mod progress;
mod response;
mod settle;
pub mod transport;
mod upload;

pub use blob::{Blob, File, FileOptions};
pub use client::TransferClient;
pub use download::download_with;
pub use error::{AbortEvent, TransferError, TransportError};
pub use fetched::upload_from_fetched_blob_with;
pub use form::{FormData, FormValue};
pub use headers::{apply_headers, Headers};
pub use options::{
    CredentialsMode, DownloadOptions, FetchedBlobOptions, UploadOptions, DEFAULT_FIELD_NAME,
};
pub use progress::{ProgressCallback, ProgressEvent};
pub use response::{ResponseBody, ResponseType, TransferResult};
pub use transport::{HttpTransport, HttpTransportConfig, Transport};
pub use upload::upload_with;

use client::DEFAULT_CLIENT;

/// POST a file as multipart form data to `address`.
pub async fn upload(address: &str, options: UploadOptions) -> Result<TransferResult, TransferError> {
    DEFAULT_CLIENT.upload(address, options).await
}

/// GET `address`.
pub async fn download(
    address: &str,
    options: DownloadOptions,
) -> Result<TransferResult, TransferError> {
    DEFAULT_CLIENT.download(address, options).await
}

/// Fetch `source` and upload its body to `target` as a file named `options.filename`.
pub async fn upload_from_fetched_blob(
    target: &str,
    source: &str,
    options: FetchedBlobOptions,
) -> Result<TransferResult, TransferError> {
    DEFAULT_CLIENT
        .upload_from_fetched_blob(target, source, options)
        .await
}
