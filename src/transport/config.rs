use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HttpTransportConfig {
    pub user_agent: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    /// `Authorization` value, sent only on credentialed requests.
    pub authorization: Option<String>,
    /// Keep a cookie jar, consulted and updated only on credentialed requests.
    pub cookie_store: bool,
}
