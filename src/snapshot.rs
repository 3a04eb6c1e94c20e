//! Point-in-time copies of a tapped response.

use bytes::buf::Reader;
use bytes::{Buf, Bytes};
use http::HeaderMap;
use http_body_util::Full;

use crate::error::Error;
use crate::response::build_http;

/// A frozen view of a response as a [`TappingWriter`](crate::TappingWriter)
/// saw it.
///
/// Every part is an independent copy. Changing the snapshot never reaches the
/// writer, and later writes never reach an existing snapshot.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub(crate) status: u16,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
}

impl Snapshot {
    /// The tapped status code, `0` if none was set.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// A copy of the headers as they were when the snapshot was taken.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable access to the copied headers. The writer is unaffected.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// The body from the last tapped write.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// A fresh reader over the body. Each call starts from the beginning.
    pub fn reader(&self) -> Reader<Bytes> {
        self.body.clone().reader()
    }

    /// Converts into an [`http::Response`], treating an unset status as `200`.
    pub fn into_http(self) -> Result<http::Response<Full<Bytes>>, Error> {
        build_http(self.status, self.headers, self.body)
    }
}
