//! # tapresp
//!
//! Tap an HTTP response on its way out.
//!
//! [`TappingWriter`] decorates any [`ResponseWriter`]. Every status and body
//! write passes straight through to the real transport; the tap keeps the
//! status and the **most recent** body write so middleware can log, test,
//! cache or rewrite based on what a handler actually produced.
//!
//! ## What the tap keeps
//!
//! - **Status** — the last code written, `0` until one is.
//! - **Body** — the last `write` call only. A second write replaces the
//!   first; it does not append.
//! - **Headers** — nothing. They are read live from the wrapped writer.
//!
//! [`TappingWriter::body`] and [`TappingWriter::snapshot`] hand out copies, so
//! nothing you do with them changes the tap, and nothing the tap sees later
//! changes them.
//!
//! ## Quick start
//!
//! ```rust
//! use tapresp::{Response, ResponseWriter, TappingWriter};
//!
//! fn handler(w: &mut dyn ResponseWriter) {
//!     w.headers_mut().insert("content-type", "application/json".parse().unwrap());
//!     w.write_header(200);
//!     w.write(br#"{"id":1}"#).unwrap();
//! }
//!
//! let mut tap = TappingWriter::new(Response::new());
//! handler(&mut tap);
//!
//! let snap = tap.snapshot();
//! assert_eq!(snap.status(), 200);
//! assert_eq!(snap.headers()["content-type"], "application/json");
//! assert_eq!(&snap.body()[..], br#"{"id":1}"#);
//!
//! // The client still gets the untouched response.
//! let res = tap.into_inner().into_http().unwrap();
//! assert_eq!(res.status(), 200);
//! ```

mod error;
mod response;
mod snapshot;
mod tap;
mod writer;

pub use error::Error;
pub use response::Response;
pub use snapshot::Snapshot;
pub use tap::{TappingWriter, UNSET_STATUS};
pub use writer::ResponseWriter;
