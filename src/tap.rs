//! The tapping decorator.
//!
//! ```text
//! handler ──write_header/write──▶ TappingWriter ──same calls──▶ transport
//!                                      │
//!                                      └─ keeps: status, last body write
//! ```
//!
//! The tap records the **latest** write only. Each `write` replaces the
//! buffered body rather than appending to it, so after a chunked response the
//! tap holds the final chunk, not the whole stream.

use std::io::Write;

use bytes::Bytes;
use http::HeaderMap;
use tracing::{trace, warn};

use crate::error::Error;
use crate::snapshot::Snapshot;
use crate::writer::ResponseWriter;

/// Status code reported before any status has been written.
pub const UNSET_STATUS: u16 = 0;

/// A [`ResponseWriter`] that forwards everything to `W` and remembers the
/// status and the last body it saw.
///
/// ```rust
/// use tapresp::{Response, ResponseWriter, TappingWriter};
///
/// let mut tap = TappingWriter::new(Response::new());
/// tap.write_header(200);
/// tap.write(b"success").unwrap();
///
/// assert_eq!(tap.status_code(), 200);
/// assert_eq!(tap.body(), b"success");
/// assert_eq!(tap.get_ref().body(), b"success");
/// ```
#[derive(Debug)]
pub struct TappingWriter<W> {
    status: u16,
    body: Vec<u8>,
    inner: W,
}

impl<W: ResponseWriter> TappingWriter<W> {
    /// Wraps `inner` with nothing tapped yet.
    pub fn new(inner: W) -> Self {
        Self { status: UNSET_STATUS, body: Vec::new(), inner }
    }

    /// The last status written through the tap, or [`UNSET_STATUS`].
    pub fn status_code(&self) -> u16 {
        self.status
    }

    /// A copy of the last body write. Changing it does not touch the tap.
    pub fn body(&self) -> Vec<u8> {
        self.body.clone()
    }

    /// Copies status, headers and body into a [`Snapshot`].
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            status: self.status,
            headers: self.inner.headers().clone(),
            body: Bytes::copy_from_slice(&self.body),
        }
    }

    /// The wrapped writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// The wrapped writer, mutably. Writes made through it bypass the tap.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Drops the tap and returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: ResponseWriter> ResponseWriter for TappingWriter<W> {
    fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        self.inner.headers_mut()
    }

    fn write_header(&mut self, status: u16) {
        trace!(status, "tapped status");
        self.status = status;
        self.inner.write_header(status);
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Error> {
        self.body.clear();
        let written = self.body.write(data)?;
        if written != data.len() {
            warn!(expected = data.len(), written, "short write into tap buffer");
            return Err(Error::ShortBufferWrite { expected: data.len(), written });
        }
        trace!(len = written, "tapped body write");

        // The tap is already updated: a failing transport still leaves a
        // record of what the handler tried to send.
        self.inner.write(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Response;

    #[test]
    fn status_is_unset_until_written() {
        let tap = TappingWriter::new(Response::new());
        assert_eq!(tap.status_code(), UNSET_STATUS);
    }

    #[test]
    fn repeated_status_overwrites_the_tap() {
        let mut tap = TappingWriter::new(Response::new());
        tap.write_header(200);
        tap.write_header(500);

        assert_eq!(tap.status_code(), 500);
        // The in-memory transport keeps its first status.
        assert_eq!(tap.get_ref().status(), 200);
    }

    #[test]
    fn each_write_replaces_the_body() {
        let mut tap = TappingWriter::new(Response::new());
        tap.write(b"first").unwrap();
        tap.write(b"second").unwrap();

        assert_eq!(tap.body(), b"second");
        assert_eq!(tap.get_ref().body(), b"firstsecond");
    }

    #[test]
    fn empty_write_clears_the_body() {
        let mut tap = TappingWriter::new(Response::new());
        tap.write(b"something").unwrap();
        assert_eq!(tap.write(b"").unwrap(), 0);
        assert!(tap.body().is_empty());
    }

    #[test]
    fn buffer_takes_large_writes_whole() {
        let mut tap = TappingWriter::new(Response::new());
        let data = vec![0xa5; 1 << 20];

        assert_eq!(tap.write(&data).unwrap(), data.len());
        assert_eq!(tap.body().len(), data.len());
    }

    #[test]
    fn body_returns_an_owned_copy() {
        let mut tap = TappingWriter::new(Response::new());
        tap.write(b"success").unwrap();

        let mut body = tap.body();
        body[0] = b'X';
        body.push(b'!');

        assert_eq!(tap.body(), b"success");
    }

    #[test]
    fn borrowed_transport_sees_every_call() {
        let mut res = Response::new();
        {
            let mut tap = TappingWriter::new(&mut res);
            tap.write_header(204);
            tap.headers_mut().insert("x-tapped", "yes".parse().unwrap());
        }
        assert_eq!(res.status(), 204);
        assert_eq!(res.headers()["x-tapped"], "yes");
    }
}
