//! Re-upload a fetched blob as a named file

use crate::blob::{File, FileOptions};
use crate::download::download_with;
use crate::error::TransferError;
use crate::options::{DownloadOptions, FetchedBlobOptions};
use crate::response::TransferResult;
use crate::transport::Transport;
use crate::upload::upload_with;
use log::debug;

/// Download `source` with default options, wrap the body as a file and upload it to `target`.
///
/// Headers and credentials in `options.upload` apply to the upload only. A failed
/// download is returned as is and nothing is uploaded.
pub async fn upload_from_fetched_blob_with<T: Transport + ?Sized>(
    transport: &T,
    target: &str,
    source: &str,
    options: FetchedBlobOptions,
) -> Result<TransferResult, TransferError> {
    let fetched = download_with(transport, source, DownloadOptions::default()).await?;
    debug!(
        "fetched_blob: {} status={} -> {}",
        source, fetched.status, target
    );

    let file = File::from_blob(
        fetched.body.into_blob(),
        options.filename,
        FileOptions {
            content_type: Some(options.content_type.unwrap_or_default()),
            last_modified: options.last_modified,
        },
    );

    upload_with(transport, target, options.upload.file(file)).await
}
