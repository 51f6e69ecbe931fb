//! Transfer entry points bound to a transport

use crate::download::download_with;
use crate::error::TransferError;
use crate::fetched::upload_from_fetched_blob_with;
use crate::options::{DownloadOptions, FetchedBlobOptions, UploadOptions};
use crate::response::TransferResult;
use crate::transport::{HttpTransport, Transport};
use crate::upload::upload_with;

/// Upload/download operations over a chosen transport.
///
/// Calls share nothing but the transport; each one builds its own request and payload.
#[derive(Debug, Clone, Default)]
pub struct TransferClient<T = HttpTransport> {
    transport: T,
}

impl<T: Transport> TransferClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn upload(
        &self,
        address: &str,
        options: UploadOptions,
    ) -> Result<TransferResult, TransferError> {
        upload_with(&self.transport, address, options).await
    }

    pub async fn download(
        &self,
        address: &str,
        options: DownloadOptions,
    ) -> Result<TransferResult, TransferError> {
        download_with(&self.transport, address, options).await
    }

    pub async fn upload_from_fetched_blob(
        &self,
        target: &str,
        source: &str,
        options: FetchedBlobOptions,
    ) -> Result<TransferResult, TransferError> {
        upload_from_fetched_blob_with(&self.transport, target, source, options).await
    }
}

// Process-wide client used by the crate-level functions
lazy_static::lazy_static! {
    pub(crate) static ref DEFAULT_CLIENT: TransferClient<HttpTransport> = TransferClient::default();
}
