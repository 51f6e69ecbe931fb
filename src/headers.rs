//! Custom request headers

use crate::transport::TransportRequest;
use log::debug;
use std::collections::BTreeMap;

/// Header name to value mapping supplied by the caller.
pub type Headers = BTreeMap<String, String>;

/// Set every header of `headers` on the request. `None` leaves the request untouched.
///
/// Names and values are passed through as given; the transport rejects illegal ones.
pub fn apply_headers(request: &mut TransportRequest, headers: Option<&Headers>) {
    let Some(headers) = headers else {
        return;
    };
    for (name, value) in headers {
        request.set_request_header(name.as_str(), value.as_str());
    }
    debug!("applied {} custom header(s) to {}", headers.len(), request.url);
}
