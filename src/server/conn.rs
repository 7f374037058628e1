//! Connection handling module
//!
//! Reads one request head off the wire, hands the descriptor to the
//! dispatcher, then writes the head and drains the body chunk by chunk.
//! Any error here is the caller's signal to reset the connection.

use crate::app::App;
use crate::http::{Header, Request};
use log::debug;
use std::io::{self, BufRead, BufReader, Write};
use std::net::TcpStream;

/// What one connection served, for access logging
pub struct ServedRequest {
    pub method: String,
    pub path: String,
    pub status: String,
    pub body_bytes: usize,
}

/// Serve a single request/response exchange on `stream`
///
/// The connection is not kept alive; the response carries `Connection: close`
/// and the caller drops the stream afterwards. A storage failure while the
/// body is draining propagates from here with the response head already sent.
pub fn serve_connection(stream: &mut TcpStream, app: &mut App) -> io::Result<ServedRequest> {
    let req = read_request(&mut BufReader::new(&*stream))?;
    debug!("request: {} {}", req.method, req.path);

    let mut head: Option<(String, Vec<Header>)> = None;
    let body = app.handle(&req, |status, headers| {
        head = Some((status.to_string(), headers.to_vec()));
    });
    let (status, headers) = head.unwrap_or_default();

    // Emit whatever status the dispatcher produced, including the empty
    // fallthrough triple.
    write!(stream, "HTTP/1.1 {status}\r\n")?;
    for (name, value) in &headers {
        write!(stream, "{name}: {value}\r\n")?;
    }
    write!(stream, "Connection: close\r\n\r\n")?;

    let mut body_bytes = 0;
    for chunk in body {
        let chunk = chunk?;
        stream.write_all(&chunk)?;
        body_bytes += chunk.len();
    }
    stream.flush()?;

    Ok(ServedRequest {
        method: req.method,
        path: req.path,
        status,
        body_bytes,
    })
}

/// Parse a request head: request line plus headers, up to the blank line
///
/// The body, if any, is left unread; no registered handler consumes one and
/// the connection closes after the response.
fn read_request<R: BufRead>(reader: &mut R) -> io::Result<Request> {
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;

    let mut parts = request_line.split_whitespace();
    let (Some(method), Some(target)) = (parts.next(), parts.next()) else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("malformed request line: {:?}", request_line.trim_end()),
        ));
    };
    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path, query),
        None => (target, ""),
    };

    let mut req = Request::new(method, path);
    req.query = query.to_string();

    let mut line = String::new();
    loop {
        line.clear();
        reader.read_line(&mut line)?;
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            break;
        }
        if let Some((name, value)) = trimmed.split_once(':') {
            req.headers
                .push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    Ok(req)
}
