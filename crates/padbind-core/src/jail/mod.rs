//! Octagonal mouse jail geometry.
//!
//! Emulated analog sticks driven by a mouse need the cursor constrained to
//! the stick's reachable region: an octagonal gate inscribed in the render
//! window, shrunk by a sensitivity scalar. These modules are pure geometry
//! over [`Point`] and window snapshots; reading the OS cursor, warping it,
//! and deciding when clamping is appropriate at all belong to the host.

pub mod geometry;
pub mod mouse_jail;
pub mod octagon;

pub use geometry::{ExtendedWindowInfo, Point};
pub use mouse_jail::{JailSettings, OctagonalMouseJail};
pub use octagon::{Compass, Octagon};
