//! Drawing session for the interactive canvas.
//!
//! One `Canvas` exists per committed drawing: the browser sends its action
//! list, the actions are replayed here with the same circular brush the page
//! uses, and `to_buffer()` produces the 784-byte input handed to inference.

/// Cells per side of the drawing grid.
pub const GRID: usize = 28;
pub const MIN_BRUSH: i32 = 1;
pub const MAX_BRUSH: i32 = 4;

/// One action recorded by the page: a brush stamp or a full clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasOp {
    Stamp { x: i32, y: i32, value: u8, brush: i32 },
    Clear,
}

pub struct Canvas {
    cells: [[u8; GRID]; GRID],
    brush_size: i32,
}

impl Canvas {
    pub fn new() -> Canvas {
        Canvas {
            cells: [[0; GRID]; GRID],
            brush_size: MIN_BRUSH,
        }
    }

    pub fn clear(&mut self) {
        self.cells = [[0; GRID]; GRID];
    }

    pub fn set_brush_size(&mut self, size: i32) {
        self.brush_size = size.clamp(MIN_BRUSH, MAX_BRUSH);
    }

    /// Paints every cell within `brush_size` (Euclidean) of `(gx, gy)`,
    /// clipped to the grid.
    pub fn draw_brush(&mut self, gx: i32, gy: i32, value: u8) {
        let r = self.brush_size;
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy > r * r {
                    continue;
                }
                let (x, y) = (gx + dx, gy + dy);
                if (0..GRID as i32).contains(&x) && (0..GRID as i32).contains(&y) {
                    self.cells[y as usize][x as usize] = value;
                }
            }
        }
    }

    pub fn apply(&mut self, op: CanvasOp) {
        match op {
            CanvasOp::Stamp { x, y, value, brush } => {
                self.set_brush_size(brush);
                self.draw_brush(x, y, value);
            }
            CanvasOp::Clear => self.clear(),
        }
    }

    /// Row-major copy of the grid.
    pub fn to_buffer(&self) -> Vec<u8> {
        self.cells.iter().flat_map(|row| row.iter().copied()).collect()
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas::new()
    }
}

/// Parses `x,y,value,brush;c;x,y,value,brush;...` where `c` is a clear.
/// An empty string is an empty drawing. Stamp centres must lie on the grid.
pub fn parse_ops(raw: &str) -> Result<Vec<CanvasOp>, String> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|item| {
            if item == "c" {
                return Ok(CanvasOp::Clear);
            }
            let fields: Vec<&str> = item.split(',').map(str::trim).collect();
            if fields.len() != 4 {
                return Err(format!("stroke '{}' must have 4 fields", item));
            }
            let int = |s: &str| s.parse::<i32>().map_err(|_| format!("bad number '{}' in stroke '{}'", s, item));
            let value = fields[2]
                .parse::<u8>()
                .map_err(|_| format!("bad value '{}' in stroke '{}'", fields[2], item))?;
            let (x, y) = (int(fields[0])?, int(fields[1])?);
            if !(0..GRID as i32).contains(&x) || !(0..GRID as i32).contains(&y) {
                return Err(format!("stroke '{}' is outside the {}x{} grid", item, GRID, GRID));
            }
            Ok(CanvasOp::Stamp {
                x,
                y,
                value,
                brush: int(fields[3])?,
            })
        })
        .collect()
}
