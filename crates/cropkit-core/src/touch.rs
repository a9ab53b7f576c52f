//! Pointer-down classification: move, resize by corner, or ignore.
//!
//! The inner zone (the crop rect shrunk by the edge margin) starts a move.
//! Outside of it, each corner owns a square hit box of `2 * edge_margin`
//! centered on the corner. Corners are tested bottom-right, bottom-left,
//! top-right, top-left; the first hit wins when boxes overlap on small rects.

use crate::geometry::{Point, Rect};

/// One of the four resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Hit-test priority order for overlapping corner zones.
    pub const PRIORITY: [Corner; 4] = [
        Corner::BottomRight,
        Corner::BottomLeft,
        Corner::TopRight,
        Corner::TopLeft,
    ];

    /// Whether this corner sits on the left edge (dragging it moves `x`).
    #[inline]
    pub fn on_left_edge(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    /// Whether this corner sits on the top edge (dragging it moves `y`).
    #[inline]
    pub fn on_top_edge(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }

    /// Position of this corner on `rect`.
    pub fn position(self, rect: &Rect) -> Point {
        match self {
            Corner::TopLeft => rect.top_left,
            Corner::TopRight => rect.top_right(),
            Corner::BottomLeft => rect.bottom_left(),
            Corner::BottomRight => rect.bottom_right(),
        }
    }
}

/// What the current gesture does to the crop rect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragMode {
    /// No gesture, or the gesture started outside every zone.
    #[default]
    None,
    /// Translate the whole rect.
    Move,
    /// Resize anchored at the corner opposite to the one held.
    ResizeCorner(Corner),
}

impl DragMode {
    pub fn is_active(&self) -> bool {
        !matches!(self, DragMode::None)
    }
}

/// Classify a pointer-down `point` against `rect`.
///
/// # Arguments
///
/// * `point` - Pointer-down position in canvas coordinates
/// * `rect` - Current crop rect
/// * `edge_margin` - Inner inset of the move zone and half-size of each corner box
///
/// # Returns
///
/// `Move` inside the inner zone, `ResizeCorner` for the first corner box (in
/// [`Corner::PRIORITY`] order) containing the point, `None` otherwise.
pub fn classify(point: Point, rect: &Rect, edge_margin: f32) -> DragMode {
    if rect.shrink(edge_margin).contains(point) {
        return DragMode::Move;
    }

    Corner::PRIORITY
        .into_iter()
        .find(|corner| corner_zone(*corner, rect, edge_margin).contains(point))
        .map_or(DragMode::None, DragMode::ResizeCorner)
}

fn corner_zone(corner: Corner, rect: &Rect, edge_margin: f32) -> Rect {
    Rect::around(corner.position(rect), edge_margin)
}
