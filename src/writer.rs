//! The response-writer capability.
//!
//! Anything that can emit an HTTP response implements [`ResponseWriter`]: the
//! real transport, the in-memory [`Response`](crate::Response), and the
//! [`TappingWriter`](crate::TappingWriter) that decorates either. Handlers
//! written against the trait cannot tell them apart.

use http::HeaderMap;

use crate::error::Error;

/// Headers, status and body: the operation set a handler uses to produce a
/// response.
pub trait ResponseWriter {
    /// The header map that will be sent with the response.
    fn headers(&self) -> &HeaderMap;

    /// Mutable access to the same header map.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Sends the status line. Whether a second call has any effect is up to
    /// the implementation.
    fn write_header(&mut self, status: u16);

    /// Writes `data` to the response body and returns how many bytes were
    /// accepted.
    ///
    /// Follows [`std::io::Write::write`]: a short count is reported as
    /// `Ok(n)` and a failure as `Err`, never both. A transport that accepts
    /// part of the data and then fails should return `Ok(n)` for the part and
    /// surface the failure on the next call.
    fn write(&mut self, data: &[u8]) -> Result<usize, Error>;
}

impl<W: ResponseWriter + ?Sized> ResponseWriter for &mut W {
    fn headers(&self) -> &HeaderMap {
        (**self).headers()
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        (**self).headers_mut()
    }

    fn write_header(&mut self, status: u16) {
        (**self).write_header(status)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Error> {
        (**self).write(data)
    }
}

impl<W: ResponseWriter + ?Sized> ResponseWriter for Box<W> {
    fn headers(&self) -> &HeaderMap {
        (**self).headers()
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        (**self).headers_mut()
    }

    fn write_header(&mut self, status: u16) {
        (**self).write_header(status)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Error> {
        (**self).write(data)
    }
}
