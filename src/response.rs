//! In-memory response writer.
//!
//! [`Response`] is a plain transport: it collects what a handler writes and
//! hands the result to hyper as an [`http::Response`]. Wrap it in a
//! [`TappingWriter`](crate::TappingWriter) to observe the writes, or inspect
//! it directly in tests.

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use http_body_util::Full;
use tracing::debug;

use crate::error::Error;
use crate::writer::ResponseWriter;

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response, built by writing into it.
///
/// Follows the usual server rules: the first status wins, body writes append,
/// and writing a body before any status commits `200 OK`.
///
/// ```rust
/// use tapresp::{Response, ResponseWriter};
///
/// let mut res = Response::new();
/// res.write_header(201);
/// res.write(b"created").unwrap();
///
/// assert_eq!(res.status(), 201);
/// assert_eq!(res.body(), b"created");
/// ```
#[derive(Debug, Default)]
pub struct Response {
    body: Vec<u8>,
    headers: HeaderMap,
    status: Option<u16>,
}

impl Response {
    /// An empty response with no status committed.
    pub fn new() -> Self {
        Self::default()
    }

    /// The committed status, or `200` if none was written yet.
    pub fn status(&self) -> u16 {
        self.status.unwrap_or(StatusCode::OK.as_u16())
    }

    /// Everything written to the body so far.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Whether a status has been committed, explicitly or by a body write.
    pub fn wrote_header(&self) -> bool {
        self.status.is_some()
    }

    /// Converts into the value a hyper service returns.
    pub fn into_http(self) -> Result<http::Response<Full<Bytes>>, Error> {
        let status = self.status();
        build_http(status, self.headers, Bytes::from(self.body))
    }
}

impl ResponseWriter for Response {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_header(&mut self, status: u16) {
        if let Some(committed) = self.status {
            debug!(committed, ignored = status, "superfluous write_header call");
            return;
        }
        self.status = Some(status);
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Error> {
        if self.status.is_none() {
            self.status = Some(StatusCode::OK.as_u16());
        }
        self.body.extend_from_slice(data);
        Ok(data.len())
    }
}

// ── Conversion ───────────────────────────────────────────────────────────────

/// Assembles an [`http::Response`]. `0` means "never set" and becomes `200`.
pub(crate) fn build_http(
    status: u16,
    headers: HeaderMap,
    body: Bytes,
) -> Result<http::Response<Full<Bytes>>, Error> {
    let status = match status {
        0 => StatusCode::OK,
        code => StatusCode::from_u16(code).map_err(|_| Error::InvalidStatus(code))?,
    };

    let mut res = http::Response::new(Full::new(body));
    *res.status_mut() = status;
    *res.headers_mut() = headers;
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::CONTENT_TYPE;

    #[test]
    fn first_status_wins() {
        let mut res = Response::new();
        res.write_header(404);
        res.write_header(500);
        assert_eq!(res.status(), 404);
    }

    #[test]
    fn body_write_commits_ok() {
        let mut res = Response::new();
        assert!(!res.wrote_header());
        res.write(b"hi").unwrap();
        assert!(res.wrote_header());

        res.write_header(418);
        assert_eq!(res.status(), 200);
    }

    #[test]
    fn writes_append() {
        let mut res = Response::new();
        assert_eq!(res.write(b"foo").unwrap(), 3);
        assert_eq!(res.write(b"bar").unwrap(), 3);
        assert_eq!(res.body(), b"foobar");
    }

    #[test]
    fn into_http_carries_everything() {
        let mut res = Response::new();
        res.headers_mut()
            .insert(CONTENT_TYPE, "application/json".parse().unwrap());
        res.write_header(202);
        res.write(br#"{"ok":true}"#).unwrap();

        let out = res.into_http().unwrap();
        assert_eq!(out.status(), StatusCode::ACCEPTED);
        assert_eq!(out.headers()[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn unrepresentable_status_is_rejected() {
        let mut res = Response::new();
        res.write_header(42);
        assert!(matches!(res.into_http(), Err(Error::InvalidStatus(42))));
    }

    #[test]
    fn unset_status_converts_to_ok() {
        let out = build_http(0, HeaderMap::new(), Bytes::new()).unwrap();
        assert_eq!(out.status(), StatusCode::OK);
    }
}
