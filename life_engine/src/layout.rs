// layout.rs - Pixel <-> cell index mapping for a drawing surface
//
// Pure arithmetic over the surface size and the cell pitch. Nothing here
// touches the simulation.

/// Size of one drawn cell and the gap that follows it, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPitch {
    pub size: f32,
    pub margin: f32,
}

impl CellPitch {
    pub const fn new(size: f32, margin: f32) -> Self {
        Self { size, margin }
    }

    /// Distance from one cell's origin to the next.
    pub fn stride(&self) -> f32 {
        self.size + self.margin
    }
}

impl Default for CellPitch {
    fn default() -> Self {
        Self::new(30.0, 2.0)
    }
}

/// Screen rectangle of a single cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    pub left: f32,
    pub top: f32,
    pub size: f32,
}

/// How many cells fit on a surface, and where each one is drawn.
///
/// Leftover pixels on each axis are split evenly on both sides, so the grid
/// sits centred on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pitch: CellPitch,
    columns: usize,
    rows: usize,
    excess_x: f32,
    excess_y: f32,
}

impl GridLayout {
    pub fn fit(surface_width: f32, surface_height: f32, pitch: CellPitch) -> Self {
        let (columns, excess_x) = fit_axis(surface_width, pitch);
        let (rows, excess_y) = fit_axis(surface_height, pitch);
        Self {
            pitch,
            columns,
            rows,
            excess_x,
            excess_y,
        }
    }

    pub fn pitch(&self) -> CellPitch {
        self.pitch
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// No whole cell fits on the surface.
    pub fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }

    /// Top-left pixel of cell (x, y), truncated to whole pixels.
    pub fn cell_origin(&self, x: usize, y: usize) -> (f32, f32) {
        (
            axis_origin(x, self.excess_x, self.pitch),
            axis_origin(y, self.excess_y, self.pitch),
        )
    }

    pub fn cell_rect(&self, x: usize, y: usize) -> CellRect {
        let (left, top) = self.cell_origin(x, y);
        CellRect {
            left,
            top,
            size: self.pitch.size,
        }
    }

    /// Cell under a surface pixel, clamped into the grid.
    ///
    /// Points in the margins resolve to the nearest cell the way a click on
    /// the border of the canvas would. Returns `None` when the layout is
    /// empty or the point lies above or left of the surface.
    pub fn index_at(&self, px: f32, py: f32) -> Option<(usize, usize)> {
        if self.is_empty() || px < 0.0 || py < 0.0 {
            return None;
        }
        Some((
            axis_index(px, self.excess_x, self.pitch, self.columns),
            axis_index(py, self.excess_y, self.pitch, self.rows),
        ))
    }
}

fn fit_axis(extent: f32, pitch: CellPitch) -> (usize, f32) {
    let usable = extent - pitch.margin;
    if !(usable > 0.0) || !(pitch.stride() > 0.0) {
        return (0, 0.0);
    }
    let count = (usable / pitch.stride()).floor() as usize;
    let excess = usable - count as f32 * pitch.stride();
    (count, excess.max(0.0))
}

fn axis_origin(index: usize, excess: f32, pitch: CellPitch) -> f32 {
    (excess / 2.0 + index as f32 * pitch.stride() + pitch.margin).floor()
}

fn axis_index(pixel: f32, excess: f32, pitch: CellPitch, count: usize) -> usize {
    let raw = ((pixel - excess / 2.0 - pitch.margin) / pitch.stride()).trunc();
    if raw <= 0.0 {
        0
    } else {
        (raw as usize).min(count - 1)
    }
}
