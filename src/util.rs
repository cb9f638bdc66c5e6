//! Geometry helpers shared by rendering, hit-testing and the input state machine.
//!
//! This module provides:
//! - [`Point`] in image-pixel space
//! - Arrowhead geometry calculations
//! - Point-to-segment distance and drag-rectangle normalization
//! - [`Viewport`] mapping from host screen coordinates to image pixels

// ============================================================================
// Points
// ============================================================================

/// A position in untransformed source-image pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

// ============================================================================
// Arrowhead Geometry
// ============================================================================

/// Calculates the two base corners of a filled arrowhead.
///
/// The head sits on the terminal point `(x2, y2)` and points away from `(x1, y1)`.
/// The corners are placed `length` pixels back along the shaft, spread by
/// `angle_degrees` on either side of it.
///
/// # Arguments
/// * `x1`, `y1` - Arrow tail (anchor)
/// * `x2`, `y2` - Arrow tip (terminal point)
/// * `length` - Arrowhead length in pixels
/// * `angle_degrees` - Half-angle between each head edge and the shaft
///
/// # Returns
/// `[(left_x, left_y), (right_x, right_y)]`. A zero-length shaft points along +X.
pub fn arrowhead_points(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    length: f64,
    angle_degrees: f64,
) -> [(f64, f64); 2] {
    let angle = (y2 - y1).atan2(x2 - x1);
    let spread = angle_degrees.to_radians();

    let left = (
        x2 - length * (angle - spread).cos(),
        y2 - length * (angle - spread).sin(),
    );
    let right = (
        x2 - length * (angle + spread).cos(),
        y2 - length * (angle + spread).sin(),
    );

    [left, right]
}

// ============================================================================
// Segment and Rectangle Utilities
// ============================================================================

/// Distance from `point` to the finite segment `a`-`b`.
///
/// The projection parameter is clamped to `[0, 1]` so points beyond either end
/// measure to the nearest endpoint. Returns `None` for a zero-length segment.
pub fn distance_to_segment(point: Point, a: Point, b: Point) -> Option<f64> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return None;
    }

    let t = (((point.x - a.x) * dx + (point.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    let closest = Point::new(a.x + t * dx, a.y + t * dy);
    Some(point.distance_to(closest))
}

/// Normalizes a drag span along one axis into `(origin, extent)` with a non-negative extent.
pub fn normalize_span(start: f64, end: f64) -> (f64, f64) {
    (start.min(end), (end - start).abs())
}

/// Axis-aligned rectangle in image pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

// ============================================================================
// Viewport
// ============================================================================

/// Where the composite bitmap is displayed on the host's screen.
///
/// Hosts usually scale the bitmap to fit; pointer events arrive in screen
/// coordinates and must be mapped back to image pixels before reaching the editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Screen X of the displayed bitmap's left edge
    pub left: f64,
    /// Screen Y of the displayed bitmap's top edge
    pub top: f64,
    /// Displayed width on screen
    pub display_width: f64,
    /// Displayed height on screen
    pub display_height: f64,
}

impl Viewport {
    /// A viewport showing the image unscaled at the screen origin.
    pub fn identity(image_width: u32, image_height: u32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            display_width: image_width as f64,
            display_height: image_height as f64,
        }
    }

    /// Maps a screen-space pointer position into image-pixel space.
    ///
    /// A viewport with zero display extent maps without scaling.
    pub fn to_image(&self, screen_x: f64, screen_y: f64, image_width: u32, image_height: u32) -> Point {
        let scale_x = if self.display_width > 0.0 {
            image_width as f64 / self.display_width
        } else {
            1.0
        };
        let scale_y = if self.display_height > 0.0 {
            image_height as f64 / self.display_height
        } else {
            1.0
        };
        Point::new(
            (screen_x - self.left) * scale_x,
            (screen_y - self.top) * scale_y,
        )
    }
}
