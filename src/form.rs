//! Multipart payload container

use crate::blob::File;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(File),
}

impl FormValue {
    /// Size of the field's payload, excluding multipart framing.
    pub fn len(&self) -> u64 {
        match self {
            FormValue::Text(text) => text.len() as u64,
            FormValue::File(file) => file.size(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<File> for FormValue {
    fn from(file: File) -> Self {
        FormValue::File(file)
    }
}

impl From<String> for FormValue {
    fn from(text: String) -> Self {
        FormValue::Text(text)
    }
}

impl From<&str> for FormValue {
    fn from(text: &str) -> Self {
        FormValue::Text(text.to_string())
    }
}

/// Ordered list of named fields. Names may repeat, as in an HTML form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, FormValue)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<FormValue>) {
        self.entries.push((name.into(), value.into()));
    }

    pub fn append_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.append(name, FormValue::Text(value.into()));
    }

    pub fn get_all(&self, name: &str) -> Vec<&FormValue> {
        self.entries
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all field payload sizes.
    pub fn payload_len(&self) -> u64 {
        self.entries.iter().map(|(_, v)| v.len()).sum()
    }

    pub fn into_entries(self) -> Vec<(String, FormValue)> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::FileOptions;

    #[test]
    fn has_and_get_all_track_repeated_names() {
        let mut form = FormData::new();
        assert!(!form.has("file"));

        form.append_text("tag", "a");
        form.append_text("tag", "b");
        form.append("file", File::new(b"abc".to_vec(), "a.txt", FileOptions::default()));

        assert!(form.has("file"));
        assert_eq!(form.get_all("tag").len(), 2);
        assert_eq!(form.len(), 3);
        assert_eq!(form.payload_len(), 5);
    }
}
