/// Text renderers for the studio: Unicode-shaded digit images, the confidence
/// bar graph, and the canvas page served to the browser.
///
/// Everything here returns a `String`; printing is left to the caller.

use ferrite_digits::Prediction;

const CANVAS_TEMPLATE: &str = include_str!("assets/canvas.html");

/// Cells in a full-confidence bar.
const MAX_BARS: usize = 40;
/// Side length of a rendered image.
const SIDE: usize = 28;

pub const BOLD: &str = "\x1b[1m";
pub const BLUE: &str = "\x1b[1;34m";
pub const GREEN: &str = "\x1b[0;32m";
pub const RED: &str = "\x1b[0;31m";
pub const RESET: &str = "\x1b[0m";

/// Two characters per pixel so the 28×28 image keeps a square aspect.
fn shade(p: u8) -> &'static str {
    match p {
        221..=255 => "██",
        151..=220 => "▓▓",
        81..=150 => "▒▒",
        21..=80 => "░░",
        _ => "  ",
    }
}

/// Renders a row-major 28×28 buffer, one text line per pixel row.
pub fn ascii_image(pixels: &[u8]) -> String {
    let mut out = String::with_capacity(pixels.len() * 7);
    for row in pixels.chunks(SIDE) {
        for &p in row {
            out.push_str(shade(p));
        }
        out.push('\n');
    }
    out
}

/// `[4] : ■■■■■■■■■■■■■■■■■■■  99.99%` for each class.
pub fn confidence_graph(probabilities: &[f32]) -> String {
    let mut out = format!("\n{}IA trust:{}\n", BOLD, RESET);
    for (class, &p) in probabilities.iter().enumerate() {
        let bars = ((p * MAX_BARS as f32) as usize).min(MAX_BARS);
        out.push_str(&format!(
            "[{}] : {}{} {:.2}%\n",
            class,
            "■".repeat(bars),
            " ".repeat(MAX_BARS - bars),
            p * 100.0
        ));
    }
    out
}

/// Graph plus the highlighted verdict line.
pub fn prediction_report(prediction: &Prediction, heading: &str) -> String {
    format!(
        "{}\n{}{}: {}{}\n",
        confidence_graph(&prediction.probabilities),
        BLUE,
        heading,
        prediction.class,
        RESET
    )
}

/// Canvas page with the grid constants filled in.
pub fn canvas_page(scale: usize, max_brush: i32) -> String {
    CANVAS_TEMPLATE
        .replace("{{GRID}}", &SIDE.to_string())
        .replace("{{SCALE}}", &scale.to_string())
        .replace("{{MAX_BRUSH}}", &max_brush.to_string())
}
