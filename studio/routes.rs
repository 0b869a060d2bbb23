use std::io::Cursor;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use ferrite_digits::Model;

use crate::handlers;
use crate::handlers::draw::DrawAction;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn response(status: u16, content_type: &[u8], body: Vec<u8>) -> Response<Cursor<Vec<u8>>> {
    let len = body.len();
    let headers = Header::from_bytes(&b"Content-Type"[..], content_type)
        .map(|h| vec![h])
        .unwrap_or_default();
    Response::new(StatusCode(status), headers, Cursor::new(body), Some(len), None)
}

pub fn html_response(body: String) -> Response<Cursor<Vec<u8>>> {
    response(200, b"text/html; charset=utf-8", body.into_bytes())
}

pub fn json_response(status: u16, body: String) -> Response<Cursor<Vec<u8>>> {
    response(status, b"application/json", body.into_bytes())
}

pub fn not_found() -> Response<Cursor<Vec<u8>>> {
    response(404, b"text/plain", b"404 Not Found".to_vec())
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Routes one canvas request, responds to it, and reports what the drawing
/// session should do next.
pub fn dispatch(mut request: Request, model: &Model) -> DrawAction {
    let method = request.method().clone();
    let path = request
        .url()
        .split('?')
        .next()
        .unwrap_or("")
        .to_owned();

    let (response, action) = match (method, path.as_str()) {
        (Method::Get, "/") => (handlers::draw::handle_page(), DrawAction::Continue),
        (Method::Post, "/commit") => handlers::draw::handle_commit(&mut request, model),
        (Method::Post, "/cancel") => handlers::draw::handle_cancel(),
        _ => (not_found(), DrawAction::Continue),
    };

    if let Err(e) = request.respond(response) {
        log::warn!("failed to answer canvas request {}: {}", path, e);
    }
    action
}
