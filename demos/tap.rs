//! Serve a couple of handlers behind a tap and log what they produced.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example tap [addr]
//!
//! Try:
//!   curl http://localhost:3000/users/42
//!   curl http://localhost:3000/users/abc     # 400, ids are numeric
//!   curl http://localhost:3000/missing

use std::convert::Infallible;
use std::net::SocketAddr;

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http_body_util::Full;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tapresp::{Response, ResponseWriter, TappingWriter};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let addr: SocketAddr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:3000".to_owned())
        .parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "tap demo listening");

    let mut tasks = tokio::task::JoinSet::new();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            _ = &mut shutdown => {
                info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                break;
            }

            res = listener.accept() => {
                let (stream, peer) = match res {
                    Ok(v) => v,
                    Err(e) => {
                        error!("accept error: {e}");
                        continue;
                    }
                };

                tasks.spawn(async move {
                    let svc = service_fn(|req| async move { dispatch(req) });
                    if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                        .serve_connection(TokioIo::new(stream), svc)
                        .await
                    {
                        error!(%peer, "connection error: {e}");
                    }
                });
            }

            Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
        }
    }

    while tasks.join_next().await.is_some() {}
    Ok(())
}

// ── Dispatch ─────────────────────────────────────────────────────────────────

fn dispatch(
    req: hyper::Request<hyper::body::Incoming>,
) -> Result<http::Response<Full<Bytes>>, Infallible> {
    let path = req.uri().path().to_owned();

    let mut tap = TappingWriter::new(Response::new());
    match path.strip_prefix("/users/") {
        Some(id) => get_user(&mut tap, id),
        None => not_found(&mut tap),
    }

    let content_type = tap
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_owned();
    info!(
        method = %req.method(),
        path = %path,
        status = tap.status_code(),
        content_type = %content_type,
        body_len = tap.body().len(),
        "response tapped"
    );

    match tap.into_inner().into_http() {
        Ok(res) => Ok(res),
        Err(e) => {
            error!("handler produced an unsendable response: {e}");
            let mut res = http::Response::new(Full::new(Bytes::new()));
            *res.status_mut() = http::StatusCode::INTERNAL_SERVER_ERROR;
            Ok(res)
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────
//
// Written against the trait: they neither know nor care that they are tapped.

fn get_user(w: &mut dyn ResponseWriter, id: &str) {
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return bad_request(w, "user id must be numeric");
    }

    w.headers_mut()
        .insert(CONTENT_TYPE, http::HeaderValue::from_static("application/json"));
    w.write_header(200);
    if let Err(e) = w.write(format!(r#"{{"id":"{id}","name":"alice"}}"#).as_bytes()) {
        error!("write failed: {e}");
    }
}

fn not_found(w: &mut dyn ResponseWriter) {
    w.headers_mut()
        .insert(CONTENT_TYPE, http::HeaderValue::from_static("text/plain; charset=utf-8"));
    w.write_header(404);
    if let Err(e) = w.write(b"not found") {
        error!("write failed: {e}");
    }
}

fn bad_request(w: &mut dyn ResponseWriter, reason: &str) {
    w.headers_mut()
        .insert(CONTENT_TYPE, http::HeaderValue::from_static("text/plain; charset=utf-8"));
    w.write_header(400);
    if let Err(e) = w.write(reason.as_bytes()) {
        error!("write failed: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_are_served_as_json() {
        let mut tap = TappingWriter::new(Response::new());
        get_user(&mut tap, "42");

        assert_eq!(tap.status_code(), 200);
        assert_eq!(tap.body(), br#"{"id":"42","name":"alice"}"#);
    }

    #[test]
    fn ids_that_would_break_json_are_rejected() {
        for id in ["", "a\"b", "42}", "4 2"] {
            let mut tap = TappingWriter::new(Response::new());
            get_user(&mut tap, id);

            assert_eq!(tap.status_code(), 400, "id {id:?}");
            assert_eq!(tap.headers()[CONTENT_TYPE], "text/plain; charset=utf-8");
        }
    }
}
