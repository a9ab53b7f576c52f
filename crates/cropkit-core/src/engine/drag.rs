//! Per-frame drag math: translating and corner-resizing the crop rect.

use crate::aspect::{constrain, min_candidate, CropMode, POST_RATIO};
use crate::geometry::{Point, Rect, Size};
use crate::touch::Corner;

/// Canvas edge a translated rect can cross.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Top,
    Left,
    Right,
    Bottom,
}

impl Edge {
    /// Correction order when the translated rect leaves the canvas.
    const ORDER: [Edge; 4] = [Edge::Top, Edge::Left, Edge::Right, Edge::Bottom];

    fn is_crossed_by(self, rect: &Rect, canvas: Size) -> bool {
        match self {
            Edge::Top => rect.y() < 0.0,
            Edge::Left => rect.x() < 0.0,
            Edge::Right => rect.right() > canvas.width,
            Edge::Bottom => rect.bottom() > canvas.height,
        }
    }

    /// Pin `rect` against this edge, leaving the other axis untouched.
    fn pin(self, rect: &Rect, canvas: Size) -> Rect {
        let Point { x, y } = rect.top_left;
        let origin = match self {
            Edge::Top => Point::new(x, 0.0),
            Edge::Left => Point::new(0.0, y),
            Edge::Right => Point::new(canvas.width - rect.width(), y),
            Edge::Bottom => Point::new(x, canvas.height - rect.height()),
        };
        rect.with_origin(origin)
    }
}

/// Translate `rect` by `delta`, sliding along at most one canvas edge.
///
/// Crossed edges are tried top, left, right, bottom; the first edge whose
/// pinned rect fits the canvas wins.
///
/// # Arguments
///
/// * `rect` - Current crop rect, inside the canvas
/// * `delta` - Pointer movement since the last frame
/// * `canvas` - Canvas size the rect must stay within
///
/// # Returns
///
/// The moved rect with its size unchanged, or `None` when the move has to be
/// dropped: the translated rect crosses edges and pinning any single one of
/// them still leaves it outside the canvas (typically a diagonal push into a
/// corner).
pub fn translate(rect: &Rect, delta: Point, canvas: Size) -> Option<Rect> {
    let moved = rect.offset(delta);
    if moved.fits_within(canvas) {
        return Some(moved);
    }

    Edge::ORDER
        .into_iter()
        .filter(|edge| edge.is_crossed_by(&moved, canvas))
        .map(|edge| edge.pin(&moved, canvas))
        .find(|candidate| candidate.fits_within(canvas))
}

/// Resize `rect` by dragging `corner` by `delta`, anchored at the opposite
/// corner.
///
/// Dragging away from the rect grows it, towards it shrinks it. The candidate
/// size is clamped between the mode's minimum and the room left between the
/// anchored edge and the canvas border, then constrained to the crop mode.
///
/// # Arguments
///
/// * `rect` - Current crop rect, inside the canvas
/// * `corner` - Handle being dragged
/// * `delta` - Pointer movement since the last frame
/// * `canvas` - Canvas size the rect must stay within
/// * `mode` - Active crop mode (`Reset` behaves as free)
/// * `min_size` - Smallest allowed width and height
///
/// # Returns
///
/// The resized rect. It stays inside the canvas, keeps the mode's aspect and
/// is at least `min_size` on both sides unless the canvas is smaller than
/// that.
pub fn resize_corner(
    rect: &Rect,
    corner: Corner,
    delta: Point,
    canvas: Size,
    mode: CropMode,
    min_size: f32,
) -> Rect {
    let min = min_candidate(mode, min_size);
    let (width, max_width) = axis_candidate(
        rect.x(),
        rect.width(),
        delta.x,
        corner.on_left_edge(),
        canvas.width,
    );
    let (height, max_height) = axis_candidate(
        rect.y(),
        rect.height(),
        delta.y,
        corner.on_top_edge(),
        canvas.height,
    );

    let (width, height) = constrain(
        clamp_soft(width, min.width, max_width),
        clamp_soft(height, min.height, max_height),
        mode,
    );
    let width = lift_post_floor(width, height, mode, min.width, max_width);

    let x = if corner.on_left_edge() {
        rect.right() - width
    } else {
        rect.x()
    };
    let y = if corner.on_top_edge() {
        rect.bottom() - height
    } else {
        rect.y()
    };

    let x = shift_into(x, width, canvas.width);
    let y = shift_into(y, height, canvas.height);
    Rect::new(x, y, width, height)
}

/// Candidate length and the largest length allowed on one axis.
///
/// `on_origin_side` is true when the dragged corner sits on the left (or top)
/// edge, so the far edge stays anchored.
fn axis_candidate(
    origin: f32,
    length: f32,
    delta: f32,
    on_origin_side: bool,
    canvas_length: f32,
) -> (f32, f32) {
    if on_origin_side {
        (length - delta, origin + length)
    } else {
        (length + delta, canvas_length - origin)
    }
}

/// `height * POST_RATIO` can round to just under the width floor when the
/// height sits on its own floor. Put the width back on the floor; the ratio
/// moves by a rounding step at most.
fn lift_post_floor(
    width: f32,
    height: f32,
    mode: CropMode,
    min_width: f32,
    max_width: f32,
) -> f32 {
    if mode != CropMode::FixedRatioPost || width >= min_width || min_width > max_width {
        return width;
    }
    // Only a rounding gap is closed; a canvas-limited height stays as is.
    let on_floor = height * POST_RATIO >= min_width * (1.0 - 4.0 * f32::EPSILON);
    if on_floor {
        min_width
    } else {
        width
    }
}

/// Clamp where the upper bound wins if the bounds cross (canvas smaller than
/// the minimum size).
#[inline]
fn clamp_soft(value: f32, lo: f32, hi: f32) -> f32 {
    value.max(lo).min(hi)
}

/// Move `origin` back by whatever `origin + length` overflows the canvas.
/// Never resizes.
fn shift_into(origin: f32, length: f32, canvas_length: f32) -> f32 {
    let overflow = origin + length - canvas_length;
    let shifted = if overflow > 0.0 { origin - overflow } else { origin };
    shifted.max(0.0)
}
