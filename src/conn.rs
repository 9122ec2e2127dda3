//! Per-connection read, parse, respond pipeline.
use std::{io, sync::Arc};

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::{
    http::StatusCode,
    parser::h1::{ParseError, ParseState},
    response::Response,
    service::Service,
};

const READ_BUFFER_CAP: usize = 1024;

/// Drive one connection to completion.
///
/// Connection-scoped failures are recovered here; they never propagate past
/// the task boundary or affect other connections.
pub(crate) async fn serve<IO, S>(io: IO, service: Arc<S>)
where
    IO: AsyncRead + AsyncWrite + Unpin,
    S: Service,
{
    if let Err(err) = drive(io, service).await {
        log::debug!("connection closed: {err}");
    }
}

async fn drive<IO, S>(mut io: IO, service: Arc<S>) -> io::Result<()>
where
    IO: AsyncRead + AsyncWrite + Unpin,
    S: Service,
{
    let mut state = ParseState::new();
    let mut buf = BytesMut::with_capacity(READ_BUFFER_CAP);

    let request = loop {
        if io.read_buf(&mut buf).await? == 0 {
            // peer closed before a full request arrived
            return Ok(());
        }

        match state.parse(&buf.split()) {
            Ok(Some((request, _))) => break request,
            Ok(None) => continue,
            Err(err) => {
                log::debug!("invalid request: {err}");
                return reject(io, err).await;
            }
        }
    };

    let mut response = service.call(request).await;
    io.write_all(&response.serialize()).await?;
    response.mark_sent();

    io.shutdown().await
}

/// Answer a malformed stream with `400 Bad Request` and close.
async fn reject<IO>(mut io: IO, err: ParseError) -> io::Result<()>
where
    IO: AsyncWrite + Unpin,
{
    let mut response = Response::new();
    response
        .status(StatusCode::BAD_REQUEST)
        .header("Connection", "close")
        .text(&err.to_string());

    io.write_all(&response.serialize()).await?;
    io.shutdown().await
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{request::Request, service::from_fn};

    fn echo() -> Arc<impl Service> {
        Arc::new(from_fn(|req: Request| async move {
            let mut res = Response::new();
            res.header("x-method", req.method.as_str())
                .body(&req.body);
            res
        }))
    }

    async fn talk(input: &[u8]) -> String {
        let (mut client, server) = tokio::io::duplex(1024);

        let task = tokio::spawn(serve(server, echo()));

        client.write_all(input).await.unwrap();
        let mut out = Vec::new();
        client.read_to_end(&mut out).await.unwrap();
        task.await.unwrap();

        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_round_trip() {
        let out = talk(b"POST /echo HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello").await;

        assert!(out.starts_with("HTTP/1.1 200 OK\r\n"), "{out}");
        assert!(out.contains("x-method: POST\r\n"));
        assert!(out.contains("content-length: 5\r\n"));
        assert!(out.ends_with("\r\n\r\nhello"));
    }

    #[tokio::test]
    async fn test_request_split_across_writes() {
        let (mut client, server) = tokio::io::duplex(1024);
        let task = tokio::spawn(serve(server, echo()));

        for chunk in [&b"GET /a HT"[..], b"TP/1.1\r\nHost", b": x\r\n\r\n"] {
            client.write_all(chunk).await.unwrap();
            client.flush().await.unwrap();
        }

        let mut out = Vec::new();
        client.read_to_end(&mut out).await.unwrap();
        task.await.unwrap();

        assert!(out.starts_with(b"HTTP/1.1 200 OK\r\n"));
    }

    #[tokio::test]
    async fn test_invalid_request_answered_with_400() {
        let out = talk(b"GET /a\r\n\r\n").await;

        assert!(out.starts_with("HTTP/1.1 400 Bad Request\r\n"), "{out}");
        assert!(out.contains("connection: close\r\n"));
    }

    #[tokio::test]
    async fn test_chunked_framing_rejected() {
        let out = talk(b"POST / HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n").await;

        assert!(out.starts_with("HTTP/1.1 400 Bad Request\r\n"), "{out}");
    }

    #[tokio::test]
    async fn test_peer_close_before_request_is_quiet() {
        let (client, server) = tokio::io::duplex(1024);
        let task = tokio::spawn(serve(server, echo()));

        drop(client);
        task.await.unwrap();
    }
}
