//! In-memory binary values: `Blob` and named `File`

use chrono::{DateTime, Utc};

/// Raw binary content with a MIME type (empty string when unknown).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blob {
    data: Vec<u8>,
    content_type: String,
}

impl Blob {
    pub fn new(data: impl Into<Vec<u8>>, content_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            content_type: content_type.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

impl From<Vec<u8>> for Blob {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data, "")
    }
}

/// Metadata used when wrapping a blob as a file.
#[derive(Debug, Clone, Default)]
pub struct FileOptions {
    /// Overrides the blob's MIME type when set.
    pub content_type: Option<String>,
    /// Defaults to the time of construction.
    pub last_modified: Option<DateTime<Utc>>,
}

/// A named blob with a last-modified timestamp, as attached to multipart payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    blob: Blob,
    name: String,
    last_modified: DateTime<Utc>,
}

impl File {
    pub fn new(data: impl Into<Vec<u8>>, name: impl Into<String>, options: FileOptions) -> Self {
        Self::from_blob(Blob::from(data.into()), name, options)
    }

    pub fn from_blob(blob: Blob, name: impl Into<String>, options: FileOptions) -> Self {
        let content_type = options
            .content_type
            .unwrap_or_else(|| blob.content_type.clone());
        Self {
            blob: Blob::new(blob.data, content_type),
            name: name.into(),
            last_modified: options.last_modified.unwrap_or_else(Utc::now),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> &str {
        self.blob.content_type()
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    pub fn size(&self) -> u64 {
        self.blob.size()
    }

    pub fn bytes(&self) -> &[u8] {
        self.blob.bytes()
    }

    pub fn as_blob(&self) -> &Blob {
        &self.blob
    }

    pub fn into_blob(self) -> Blob {
        self.blob
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn file_inherits_blob_type_unless_overridden() {
        let blob = Blob::new(b"foobar".to_vec(), "image/png");

        let inherited = File::from_blob(blob.clone(), "a.png", FileOptions::default());
        assert_eq!(inherited.content_type(), "image/png");
        assert_eq!(inherited.size(), 6);

        let overridden = File::from_blob(
            blob,
            "a.jpg",
            FileOptions {
                content_type: Some("image/jpeg".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(overridden.content_type(), "image/jpeg");
        assert_eq!(overridden.bytes(), b"foobar");
    }

    #[test]
    fn file_keeps_explicit_last_modified() {
        let stamp = Utc.timestamp_millis_opt(1_500_000_000_000).unwrap();
        let file = File::new(
            b"x".to_vec(),
            "x.bin",
            FileOptions {
                last_modified: Some(stamp),
                ..Default::default()
            },
        );
        assert_eq!(file.last_modified(), stamp);
        assert_eq!(file.name(), "x.bin");
        assert_eq!(file.content_type(), "");
    }
}
