use std::io::{self, Cursor, Read};

use log::{debug, info};
use tiny_http::{Request, Response, Server};

use ferrite_digits::{predict, Model, Prediction};

use crate::canvas::{parse_ops, Canvas, MAX_BRUSH};
use crate::render::canvas_page;
use crate::routes::{html_response, json_response};
use crate::util::form::{form_get, parse_form};

/// On-screen pixels per grid cell.
const SCALE: usize = 10;

/// A committed drawing and what the model made of it.
pub struct DrawOutcome {
    pub pixels: Vec<u8>,
    pub prediction: Prediction,
}

/// What the drawing session does after a request.
pub enum DrawAction {
    Continue,
    Commit(DrawOutcome),
    Cancel,
}

/// Serves the canvas on `addr` until the user commits (Enter) or cancels
/// (Escape). Returns `None` on cancel.
pub fn serve_until_commit(addr: &str, model: &Model) -> ferrite_digits::Result<Option<DrawOutcome>> {
    let server = Server::http(addr).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    info!("canvas ready at http://{}", addr);

    for request in server.incoming_requests() {
        debug!("{} {}", request.method(), request.url());
        match crate::routes::dispatch(request, model) {
            DrawAction::Continue => {}
            DrawAction::Commit(outcome) => return Ok(Some(outcome)),
            DrawAction::Cancel => return Ok(None),
        }
    }
    Ok(None)
}

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

pub fn handle_page() -> Response<Cursor<Vec<u8>>> {
    html_response(canvas_page(SCALE, MAX_BRUSH))
}

// ---------------------------------------------------------------------------
// POST /commit
// ---------------------------------------------------------------------------

pub fn handle_commit(request: &mut Request, model: &Model) -> (Response<Cursor<Vec<u8>>>, DrawAction) {
    let mut body = String::new();
    if let Err(e) = request.as_reader().read_to_string(&mut body) {
        return (error_json(&e.to_string()), DrawAction::Continue);
    }
    let pairs = parse_form(&body);
    let ops = match parse_ops(form_get(&pairs, "ops").unwrap_or("")) {
        Ok(ops) => ops,
        Err(msg) => return (error_json(&msg), DrawAction::Continue),
    };

    let mut canvas = Canvas::new();
    for op in ops {
        canvas.apply(op);
    }
    let pixels = canvas.to_buffer();

    match predict(model, &pixels) {
        Ok(prediction) => {
            let body = serde_json::to_string(&prediction).unwrap_or_else(|_| "{}".into());
            (
                json_response(200, body),
                DrawAction::Commit(DrawOutcome { pixels, prediction }),
            )
        }
        Err(e) => (error_json(&e.to_string()), DrawAction::Continue),
    }
}

// ---------------------------------------------------------------------------
// POST /cancel
// ---------------------------------------------------------------------------

pub fn handle_cancel() -> (Response<Cursor<Vec<u8>>>, DrawAction) {
    (json_response(200, r#"{"cancelled":true}"#.into()), DrawAction::Cancel)
}

fn error_json(msg: &str) -> Response<Cursor<Vec<u8>>> {
    let body = serde_json::json!({ "error": msg }).to_string();
    json_response(400, body)
}
