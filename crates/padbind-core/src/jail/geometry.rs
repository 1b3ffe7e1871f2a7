//! Screen-space value types shared by the jail geometry.

/// A floating-point screen-space coordinate. The y axis grows downward, as
/// in window coordinates, so "north" means a smaller y.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Snapshot of the render window's geometry in screen pixels.
///
/// Recomputed whenever the window moves or resizes; the jail never queries
/// the OS itself, the host's windowing layer supplies the bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExtendedWindowInfo {
    /// Opaque native handle; `None` while no render window exists.
    pub handle: Option<u64>,
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl ExtendedWindowInfo {
    pub fn from_bounds(handle: u64, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            handle: Some(handle),
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Aspect ratio, 0.0 when the height is zero.
    pub fn ratio(&self) -> f64 {
        let height = self.height();
        if height == 0.0 {
            0.0
        } else {
            self.width() / height
        }
    }

    pub fn center(&self) -> Point {
        Point::new((self.left + self.right) / 2.0, (self.top + self.bottom) / 2.0)
    }

    /// A window the jail must pass through untouched: no handle yet, or a
    /// zero-area rectangle whose geometry would divide by zero.
    pub fn is_degenerate(&self) -> bool {
        self.handle.is_none() || self.width() <= 0.0 || self.height() <= 0.0
    }
}
