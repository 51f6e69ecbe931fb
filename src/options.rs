//! Per-call transfer options with explicit defaults

use crate::blob::File;
use crate::form::FormData;
use crate::headers::Headers;
use crate::progress::{ProgressCallback, ProgressEvent};
use crate::response::ResponseType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Field name the file is attached under when none is given
pub const DEFAULT_FIELD_NAME: &str = "file";

/// Credentials policy, named after the fetch API's `credentials` option.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum CredentialsMode {
    #[serde(rename = "omit")]
    Omit,
    #[default]
    #[serde(rename = "same-origin")]
    SameOrigin,
    #[serde(rename = "include")]
    Include,
}

/// `with_credentials` and `credentials == Include` each turn the flag on.
pub(crate) fn credentials_flag(with_credentials: bool, credentials: CredentialsMode) -> bool {
    with_credentials || credentials == CredentialsMode::Include
}

#[derive(Clone)]
pub struct DownloadOptions {
    pub headers: Option<Headers>,
    pub response_type: ResponseType,
    pub with_credentials: bool,
    pub credentials: CredentialsMode,
    pub on_progress: Option<ProgressCallback>,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            headers: None,
            response_type: ResponseType::Blob,
            with_credentials: false,
            credentials: CredentialsMode::default(),
            on_progress: None,
        }
    }
}

impl DownloadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Headers::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    pub fn with_credentials(mut self, with_credentials: bool) -> Self {
        self.with_credentials = with_credentials;
        self
    }

    pub fn credentials(mut self, credentials: CredentialsMode) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn on_progress(mut self, f: impl Fn(&ProgressEvent) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Arc::new(f));
        self
    }

    pub(crate) fn credentials_flag(&self) -> bool {
        credentials_flag(self.with_credentials, self.credentials)
    }
}

#[derive(Clone)]
pub struct UploadOptions {
    pub file: Option<File>,
    pub field_name: String,
    /// Pre-built payload. `None` means a fresh, empty one for this call.
    pub payload: Option<FormData>,
    pub headers: Option<Headers>,
    pub response_type: ResponseType,
    pub with_credentials: bool,
    pub credentials: CredentialsMode,
    pub on_progress: Option<ProgressCallback>,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            file: None,
            field_name: DEFAULT_FIELD_NAME.to_string(),
            payload: None,
            headers: None,
            response_type: ResponseType::Json,
            with_credentials: false,
            credentials: CredentialsMode::default(),
            on_progress: None,
        }
    }
}

impl UploadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, file: File) -> Self {
        self.file = Some(file);
        self
    }

    pub fn field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = field_name.into();
        self
    }

    pub fn payload(mut self, payload: FormData) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Headers::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    pub fn with_credentials(mut self, with_credentials: bool) -> Self {
        self.with_credentials = with_credentials;
        self
    }

    pub fn credentials(mut self, credentials: CredentialsMode) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn on_progress(mut self, f: impl Fn(&ProgressEvent) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Arc::new(f));
        self
    }

    pub(crate) fn credentials_flag(&self) -> bool {
        credentials_flag(self.with_credentials, self.credentials)
    }
}

/// Options for re-uploading a fetched blob as a named file.
///
/// `upload` carries the options of the final upload; its `file` is replaced.
#[derive(Clone)]
pub struct FetchedBlobOptions {
    pub filename: String,
    /// Defaults to the time the file is built.
    pub last_modified: Option<DateTime<Utc>>,
    /// Defaults to an empty type.
    pub content_type: Option<String>,
    pub upload: UploadOptions,
}

impl FetchedBlobOptions {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            last_modified: None,
            content_type: None,
            upload: UploadOptions::default(),
        }
    }

    pub fn last_modified(mut self, last_modified: DateTime<Utc>) -> Self {
        self.last_modified = Some(last_modified);
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn upload(mut self, upload: UploadOptions) -> Self {
        self.upload = upload;
        self
    }
}
