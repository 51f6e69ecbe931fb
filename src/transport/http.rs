//! reqwest-backed transport with streamed progress in both directions

use super::{EventSender, HttpTransportConfig, RawResponse, Transport, TransportRequest};
use crate::error::{TransferError, TransportError};
use crate::form::{FormData, FormValue};
use futures_util::{stream, StreamExt};
use log::{debug, info, warn};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, Url};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Upload bodies are fed to the connection in chunks of this size (64 KB),
/// one upload-progress event per chunk.
const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// Content type sent for file parts whose type is unknown
const DEFAULT_FILE_MIME: &str = "application/octet-stream";

/// HTTP transport. Requests run on the ambient tokio runtime.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    authorization: Option<HeaderValue>,
    cookies: Option<Arc<Jar>>,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("authorization", &self.authorization.is_some())
            .field("cookie_store", &self.cookies.is_some())
            .finish()
    }
}

impl HttpTransport {
    pub fn new(config: HttpTransportConfig) -> Result<Self, TransferError> {
        let mut builder = Client::builder();
        if let Some(user_agent) = config.user_agent {
            builder = builder.user_agent(user_agent);
        }
        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        let authorization = match config.authorization {
            Some(value) => Some(HeaderValue::from_str(&value).map_err(|e| {
                TransferError::Config(format!("Invalid authorization value: {}", e))
            })?),
            None => None,
        };

        Ok(Self {
            client,
            authorization,
            cookies: config.cookie_store.then(|| Arc::new(Jar::default())),
        })
    }

    /// Wrap an existing client; no stored credentials.
    pub fn from_client(client: Client) -> Self {
        Self {
            client,
            authorization: None,
            cookies: None,
        }
    }
}

/// Plain client with a cookie jar, so credentialed requests carry cookies.
impl Default for HttpTransport {
    fn default() -> Self {
        Self {
            client: Client::new(),
            authorization: None,
            cookies: Some(Arc::new(Jar::default())),
        }
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: TransportRequest, events: EventSender) {
        let transport = self.clone();
        tokio::spawn(async move {
            let method = request.method.clone();
            let url = request.url.clone();
            info!("transfer_start: {} {}", method, url);
            match transport.execute(request, &events).await {
                Ok(response) => {
                    debug!(
                        "transfer_done: {} {} status={} bytes={}",
                        method,
                        url,
                        response.status,
                        response.body.len()
                    );
                    events.load(response);
                }
                Err(err) => {
                    warn!("transfer_error: {} {} error={}", method, url, err);
                    events.error(err);
                }
            }
        });
    }
}

impl HttpTransport {
    async fn execute(
        &self,
        request: TransportRequest,
        events: &EventSender,
    ) -> Result<RawResponse, TransportError> {
        let url = Url::parse(&request.url)
            .map_err(|e| TransportError::new(format!("Invalid address {}: {}", request.url, e)))?;

        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| TransportError::new(format!("Invalid header name {}: {}", name, e)))?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                TransportError::new(format!("Invalid value for header {}: {}", name, e))
            })?;
            headers.append(header_name, header_value);
        }

        if request.with_credentials {
            if let Some(authorization) = &self.authorization {
                if !headers.contains_key(AUTHORIZATION) {
                    headers.insert(AUTHORIZATION, authorization.clone());
                }
            }
            if let Some(jar) = &self.cookies {
                if let Some(cookie) = jar.cookies(&url) {
                    headers.insert(COOKIE, cookie);
                }
            }
        }

        let mut builder = self
            .client
            .request(request.method.clone(), url.clone())
            .headers(headers);
        if let Some(form) = request.body {
            builder = builder.multipart(progress_form(form, events)?);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();

        if request.with_credentials {
            if let Some(jar) = &self.cookies {
                let mut set_cookies = response.headers().get_all(SET_COOKIE).iter();
                jar.set_cookies(&mut set_cookies, &url);
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let total = response.content_length();

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            body.extend_from_slice(&chunk);
            if events.is_closed() {
                return Err(TransportError::new("Receiver dropped before completion"));
            }
            events.download_progress(body.len() as u64, total);
        }

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Build a multipart form whose fields report upload progress as they are read.
///
/// `loaded`/`total` count field payload bytes, not multipart framing.
fn progress_form(form: FormData, events: &EventSender) -> Result<Form, TransportError> {
    let total = form.payload_len();
    let sent = Arc::new(AtomicU64::new(0));
    let mut multipart = Form::new();

    for (name, value) in form.into_entries() {
        let part = match value {
            FormValue::Text(text) => {
                let len = text.len() as u64;
                Part::stream_with_length(
                    counted_body(text.into_bytes(), total, &sent, events),
                    len,
                )
            }
            FormValue::File(file) => {
                let mime = if file.content_type().is_empty() {
                    DEFAULT_FILE_MIME.to_string()
                } else {
                    file.content_type().to_string()
                };
                let file_name = file.name().to_string();
                let len = file.size();
                Part::stream_with_length(
                    counted_body(file.into_blob().into_bytes(), total, &sent, events),
                    len,
                )
                .file_name(file_name)
                .mime_str(&mime)?
            }
        };
        multipart = multipart.part(name, part);
    }

    Ok(multipart)
}

fn counted_body(data: Vec<u8>, total: u64, sent: &Arc<AtomicU64>, events: &EventSender) -> Body {
    Body::wrap_stream(counted_chunks(data, total, sent, events))
}

/// Split `data` into chunks as they are polled, reporting the running total per chunk.
fn counted_chunks(
    data: Vec<u8>,
    total: u64,
    sent: &Arc<AtomicU64>,
    events: &EventSender,
) -> impl futures_util::Stream<Item = Result<Vec<u8>, std::io::Error>> + Send + 'static {
    let sent = Arc::clone(sent);
    let events = events.clone();
    let len = data.len();
    stream::iter((0..len).step_by(UPLOAD_CHUNK_SIZE)).map(move |offset| {
        let end = (offset + UPLOAD_CHUNK_SIZE).min(len);
        let chunk = data[offset..end].to_vec();
        let chunk_len = chunk.len() as u64;
        let loaded = sent.fetch_add(chunk_len, Ordering::SeqCst) + chunk_len;
        events.upload_progress(loaded, Some(total));
        Ok(chunk)
    })
}
