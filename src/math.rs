use std::{error::Error, fmt::Display};

use crate::{HasPosition, Point2, TinNum};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The error type used when creating a triangulation from invalid input.
///
/// Errors can only originate from an invalid vertex position. Vertices can
/// be checked for validity by using [crate::validate_vertex].
#[derive(Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Debug, Hash)]
pub enum InsertionError {
    /// A coordinate value was NaN.
    NAN,

    /// A coordinate value was infinite.
    Infinite,
}

impl Display for InsertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Debug>::fmt(self, f)
    }
}

impl Error for InsertionError {}

/// Returned when three positions do not span a usable triangle.
///
/// This happens if they are collinear within the tolerance or so far apart that their
/// circumcircle overflows `f64`. Either way, the circumcircle is undefined or numerically
/// meaningless.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct DegenerateTriangle {
    /// The signed cross product `(b - a) x (c - a)` that fell below the tolerance.
    pub cross_product: f64,
}

impl Display for DegenerateTriangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "degenerate triangle (cross product {:e})",
            self.cross_product
        )
    }
}

impl Error for DegenerateTriangle {}

/// Checks if a coordinate value is suitable for triangulation.
///
/// Will return an error if and only if the coordinate is NaN or infinite.
pub fn validate_coordinate<S: TinNum>(value: S) -> Result<(), InsertionError> {
    let as_f64: f64 = value.into();
    if as_f64.is_nan() {
        Err(InsertionError::NAN)
    } else if as_f64.is_infinite() {
        Err(InsertionError::Infinite)
    } else {
        Ok(())
    }
}

/// Checks if a vertex is suitable for triangulation.
///
/// A vertex is considered suitable if all of its coordinates are valid. See [validate_coordinate]
/// for more information.
pub fn validate_vertex<V: HasPosition>(vertex: &V) -> Result<(), InsertionError> {
    let position = vertex.position();
    validate_coordinate(position.x)?;
    validate_coordinate(position.y)?;
    Ok(())
}

/// The circle passing through all three corners of a triangle.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Circumcircle {
    center: Point2<f64>,
    radius_2: f64,
}

impl Circumcircle {
    /// Calculates the circumcircle of three positions.
    ///
    /// The center is the intersection of the perpendicular bisectors of `ab` and `ac`. The
    /// denominator of that intersection is twice the cross product of `b - a` and `c - a`;
    /// positions whose cross product does not exceed `epsilon` in magnitude are rejected, as
    /// are positions whose circumcircle is not finite.
    pub fn new(positions: [Point2<f64>; 3], epsilon: f64) -> Result<Self, DegenerateTriangle> {
        let [a, b, c] = positions;
        let cross_product = cross(a, b, c);
        if cross_product.is_nan() || cross_product.abs() <= epsilon {
            return Err(DegenerateTriangle { cross_product });
        }

        let ab = b.sub(a);
        let ac = c.sub(a);
        let e = ab.x * (a.x + b.x) + ab.y * (a.y + b.y);
        let f = ac.x * (a.x + c.x) + ac.y * (a.y + c.y);
        let g = 2.0 * (ab.x * (c.y - b.y) - ab.y * (c.x - b.x));

        let center = Point2::new((ac.y * e - ab.y * f) / g, (ab.x * f - ac.x * e) / g);
        let radius_2 = center.distance_2(a);
        if !(center.x.is_finite() && center.y.is_finite() && radius_2.is_finite()) {
            return Err(DegenerateTriangle { cross_product });
        }

        Ok(Self { center, radius_2 })
    }

    /// Returns the circle's center.
    pub fn center(&self) -> Point2<f64> {
        self.center
    }

    /// Returns the circle's squared radius.
    pub fn radius_2(&self) -> f64 {
        self.radius_2
    }

    /// Returns `true` if a position lies inside the circle or exactly on its boundary.
    ///
    /// Boundary positions count as contained: a vertex cocircular with a triangle
    /// invalidates that triangle during the sweep.
    #[inline]
    pub fn contains(&self, position: Point2<f64>) -> bool {
        self.center.distance_2(position) <= self.radius_2
    }

    /// Returns `true` if the whole circle lies strictly left of the vertical line at `x`.
    #[inline]
    pub fn is_left_of(&self, x: f64) -> bool {
        let dx = x - self.center.x;
        dx > 0.0 && dx * dx > self.radius_2
    }
}

/// Returns the cross product `(b - a) x (c - a)`, twice the signed area of triangle `abc`.
///
/// Positive for counterclockwise, negative for clockwise and zero for collinear positions.
#[inline]
pub fn cross(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Returns `true` if `a`, `b` and `c` are collinear within `epsilon`.
#[inline]
pub fn is_collinear(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>, epsilon: f64) -> bool {
    cross(a, b, c).abs() <= epsilon
}

pub fn triangle_area(positions: [Point2<f64>; 3]) -> f64 {
    let [a, b, c] = positions;
    cross(a, b, c).abs() * 0.5
}

#[cfg(test)]
mod test {
    use super::{validate_coordinate, Circumcircle, InsertionError};
    use crate::{Point2, DEFAULT_EPSILON};
    use approx::assert_relative_eq;

    #[test]
    fn test_validate_coordinate() {
        assert_eq!(validate_coordinate(f64::NAN), Err(InsertionError::NAN));
        assert_eq!(
            validate_coordinate(f64::INFINITY),
            Err(InsertionError::Infinite)
        );
        assert_eq!(
            validate_coordinate(f32::NEG_INFINITY),
            Err(InsertionError::Infinite)
        );
        assert_eq!(validate_coordinate(f64::MAX), Ok(()));
        assert_eq!(validate_coordinate(f64::MIN_POSITIVE), Ok(()));
        assert_eq!(validate_coordinate(0.0), Ok(()));
        assert_eq!(validate_coordinate(-3i32), Ok(()));
    }

    #[test]
    fn test_circumcircle() {
        let circle = Circumcircle::new(
            [
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(0.0, 1.0),
            ],
            DEFAULT_EPSILON,
        )
        .unwrap();
        assert_eq!(circle.center(), Point2::new(0.5, 0.5));
        assert_eq!(circle.radius_2(), 0.5);
    }

    #[test]
    fn test_circumcircle_passes_through_corners() {
        let corners = [
            Point2::new(-3.25, 1.5),
            Point2::new(7.0, -2.125),
            Point2::new(0.5, 9.75),
        ];
        for positions in [
            corners,
            [corners[1], corners[2], corners[0]],
            [corners[2], corners[1], corners[0]],
        ] {
            let circle = Circumcircle::new(positions, DEFAULT_EPSILON).unwrap();
            for corner in corners {
                assert_relative_eq!(
                    circle.center().distance_2(corner),
                    circle.radius_2(),
                    max_relative = 1.0e-12
                );
            }
        }
    }

    #[test]
    fn test_collinear_is_degenerate() {
        let result = Circumcircle::new(
            [
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(3.0, 3.0),
            ],
            DEFAULT_EPSILON,
        );
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().cross_product, 0.0);

        let almost_collinear = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 1.0e-13),
        ];
        assert!(Circumcircle::new(almost_collinear, DEFAULT_EPSILON).is_err());
        assert!(Circumcircle::new(almost_collinear, 1.0e-14).is_ok());
    }

    #[test]
    fn test_overflowing_circumcircle_is_degenerate() {
        let huge = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0e160, 0.0),
            Point2::new(0.0, 1.0e160),
        ];
        assert!(Circumcircle::new(huge, DEFAULT_EPSILON).is_err());

        let overflowing_cross = [
            Point2::new(-4.0e161, -1.0e160),
            Point2::new(0.0, 2.0e161),
            Point2::new(4.0e161, -1.0e160),
        ];
        let result = Circumcircle::new(overflowing_cross, DEFAULT_EPSILON);
        assert!(result.unwrap_err().cross_product.is_infinite());

        let nan = [
            Point2::new(0.0, 0.0),
            Point2::new(f64::NAN, 0.0),
            Point2::new(0.0, 1.0),
        ];
        assert!(Circumcircle::new(nan, DEFAULT_EPSILON).is_err());
    }

    #[test]
    fn test_boundary_counts_as_contained() {
        let circle = Circumcircle::new(
            [
                Point2::new(0.0, 0.0),
                Point2::new(0.0, 1.0),
                Point2::new(1.0, 0.0),
            ],
            DEFAULT_EPSILON,
        )
        .unwrap();
        assert!(circle.contains(Point2::new(1.0, 1.0)));
        assert!(circle.contains(Point2::new(0.5, 0.5)));
        assert!(!circle.contains(Point2::new(1.0, 1.01)));
    }

    #[test]
    fn test_is_left_of() {
        let circle = Circumcircle::new(
            [
                Point2::new(-1.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(0.0, 1.0),
            ],
            DEFAULT_EPSILON,
        )
        .unwrap();
        assert!(!circle.is_left_of(-2.0));
        assert!(!circle.is_left_of(0.5));
        assert!(!circle.is_left_of(1.0));
        assert!(circle.is_left_of(1.0 + 1.0e-9));
    }

    #[test]
    fn test_triangle_area() {
        let area = super::triangle_area([
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 2.0),
            Point2::new(3.0, 0.0),
        ]);
        assert_relative_eq!(area, 3.0);
    }
}
