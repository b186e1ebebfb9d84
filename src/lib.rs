//! # tinsweep
//! Delaunay triangulations of scattered samples, built for
//! [triangulated irregular networks](https://en.wikipedia.org/wiki/Triangulated_irregular_network).
//!
//! # Features
//! * A one-shot 2D Delaunay triangulation of an unordered point set: [Triangulation::bulk_load]
//!   * Incremental sweep over the points sorted by x coordinate, starting from an enclosing
//!     sentinel triangle
//!   * Supports integral and floating point coordinates as input
//!   * Arbitrary per-point payloads (e.g. elevations) are carried through untouched, see
//!     [PointWithData]
//!   * Collinear candidate triangles are skipped according to a configurable tolerance, see
//!     [TriangulationParameters]
//! * Conversion of a GeoJSON point collection into a collection of TIN polygons: [tin]
//!   (requires the `geojson` feature, enabled by default)
//!
//! The triangulation uses plain floating point arithmetic. Nearly degenerate input (e.g. many
//! cocircular points) is handled deterministically but without exact geometric predicates.
//!
//! # Cargo features
//! * `geojson` (default): enables [tin]
//! * `serde`: (de)serialization of points, faces and triangulations

#![warn(missing_docs)]

mod edges;
mod hull;
mod math;
mod parameters;
mod point;
mod sweep;
mod triangle;
mod triangulation;

#[cfg(feature = "geojson")]
mod tin;

#[cfg(test)]
mod test_utilities;

pub use math::{
    validate_coordinate, validate_vertex, Circumcircle, DegenerateTriangle, InsertionError,
};
pub use parameters::{TriangulationParameters, DEFAULT_EPSILON};
pub use point::{HasPosition, Point2, PointWithData, TinNum};
pub use sweep::SweepStatistics;
pub use triangle::FixedVertexHandle;
pub use triangulation::{Face, FaceHandle, Triangulation};

#[cfg(feature = "geojson")]
pub use tin::{tin, tin_with_parameters, TinError};
