//! The octagonal gate itself: vertex generation and point-in-polygon testing.
//!
//! The octagon is not regular. Cardinal vertices (N/E/S/W) sit at the full
//! jail extent on one axis; diagonal vertices sit at [`CORNER_REDUCTION`]
//! (70%) of that extent on both axes, which makes the corners "softer" than
//! a true regular octagon — matching the physical octagonal gate around a
//! GameCube controller's analog stick.

use super::geometry::{ExtendedWindowInfo, Point};

/// Fraction of the cardinal extent at which diagonal vertices sit.
pub const CORNER_REDUCTION: f64 = 0.7;

/// Below this horizontal run an edge is treated as vertical rather than
/// risking a division by a near-zero slope denominator.
const VERTICAL_RUN_EPSILON: f64 = 1e-9;

/// Compass-direction index into the octagon's vertex array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum Compass {
    South = 0,
    SouthEast = 1,
    East = 2,
    NorthEast = 3,
    North = 4,
    NorthWest = 5,
    West = 6,
    SouthWest = 7,
}

impl Compass {
    pub const ALL: [Compass; 8] = [
        Compass::South,
        Compass::SouthEast,
        Compass::East,
        Compass::NorthEast,
        Compass::North,
        Compass::NorthWest,
        Compass::West,
        Compass::SouthWest,
    ];
}

/// Axis compared by the edge-selection table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Edge-selection adjacency table.
///
/// Given the vertex nearest to an out-of-gate point, the snapped edge is the
/// one between that vertex and one of its two neighbours. Entry layout:
/// `(axis, neighbour when p is below the vertex on that axis, neighbour when
/// at-or-above)`. Replaces a nested direction switch with data.
const EDGE_NEIGHBORS: [(Axis, Compass, Compass); 8] = [
    (Axis::X, Compass::SouthWest, Compass::SouthEast), // South
    (Axis::Y, Compass::East, Compass::South),          // SouthEast
    (Axis::Y, Compass::NorthEast, Compass::SouthEast), // East
    (Axis::Y, Compass::North, Compass::East),          // NorthEast
    (Axis::X, Compass::NorthWest, Compass::NorthEast), // North
    (Axis::Y, Compass::North, Compass::West),          // NorthWest
    (Axis::Y, Compass::NorthWest, Compass::SouthWest), // West
    (Axis::Y, Compass::West, Compass::South),          // SouthWest
];

/// The eight gate vertices, indexed by [`Compass`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Octagon {
    points: [Point; 8],
}

impl Octagon {
    /// Derives the gate from the window snapshot and the sensitivity scalar.
    ///
    /// Cardinal vertices are floor/ceil-rounded *outward* (North and West
    /// floor, East and South ceil) so regeneration at the same window size
    /// is idempotent and reachability is slightly favoured over precision.
    pub fn generate(window: &ExtendedWindowInfo, sensitivity: f64) -> Self {
        let center = window.center();
        let extent_x = window.width() / 2.0 / sensitivity;
        let extent_y = window.height() / 2.0 / sensitivity;
        let corner_x = extent_x * CORNER_REDUCTION;
        let corner_y = extent_y * CORNER_REDUCTION;

        let mut points = [Point::default(); 8];
        points[Compass::South as usize] = Point::new(center.x, (center.y + extent_y).ceil());
        points[Compass::SouthEast as usize] = Point::new(center.x + corner_x, center.y + corner_y);
        points[Compass::East as usize] = Point::new((center.x + extent_x).ceil(), center.y);
        points[Compass::NorthEast as usize] = Point::new(center.x + corner_x, center.y - corner_y);
        points[Compass::North as usize] = Point::new(center.x, (center.y - extent_y).floor());
        points[Compass::NorthWest as usize] = Point::new(center.x - corner_x, center.y - corner_y);
        points[Compass::West as usize] = Point::new((center.x - extent_x).floor(), center.y);
        points[Compass::SouthWest as usize] = Point::new(center.x - corner_x, center.y + corner_y);
        Self { points }
    }

    pub fn vertex(&self, direction: Compass) -> Point {
        self.points[direction as usize]
    }

    pub fn vertices(&self) -> &[Point; 8] {
        &self.points
    }

    /// The compass direction of the vertex nearest to `p`.
    pub fn nearest_vertex(&self, p: Point) -> Compass {
        let mut nearest = Compass::South;
        let mut best = f64::INFINITY;
        for direction in Compass::ALL {
            let distance = p.distance_to(self.vertex(direction));
            if distance < best {
                best = distance;
                nearest = direction;
            }
        }
        nearest
    }

    /// The neighbour of `nearest` forming the gate edge closest to `p`,
    /// chosen by the direction test in [`EDGE_NEIGHBORS`].
    pub fn edge_neighbor(&self, nearest: Compass, p: Point) -> Compass {
        let (axis, below, at_or_above) = EDGE_NEIGHBORS[nearest as usize];
        let vertex = self.vertex(nearest);
        let is_below = match axis {
            Axis::X => p.x < vertex.x,
            Axis::Y => p.y < vertex.y,
        };
        if is_below {
            below
        } else {
            at_or_above
        }
    }

    /// Jordan-curve containment test.
    ///
    /// Casts a horizontal ray from `p` toward +x and counts edge crossings.
    /// Crossings use a half-open y-interval rule, so a ray passing exactly
    /// through a shared vertex is counted against exactly one of the two
    /// edges meeting there, never both. Near-vertical edges use the edge's x
    /// directly instead of dividing by a vanishing run.
    pub fn contains(&self, p: Point) -> bool {
        let mut crossings = 0u32;
        for i in 0..8 {
            let a = self.points[i];
            let b = self.points[(i + 1) % 8];

            // The edge spans p's scanline iff exactly one endpoint is below it.
            if (a.y > p.y) == (b.y > p.y) {
                continue;
            }

            let run = b.x - a.x;
            let cross_x = if run.abs() < VERTICAL_RUN_EPSILON {
                a.x
            } else {
                let slope = (b.y - a.y) / run;
                a.x + (p.y - a.y) / slope
            };

            if cross_x >= p.x {
                crossings += 1;
            }
        }
        crossings % 2 == 1
    }
}
