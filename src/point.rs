use num_traits::{Num, Signed};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A coordinate type that can be used as input for a triangulation.
///
/// All sweep calculations are performed after converting the type into a `f64`.
///
/// This type should usually be either `f32` or `f64`, signed integer types like `i32` work as well.
pub trait TinNum: Num + PartialOrd + Into<f64> + Copy + Signed + std::fmt::Debug {}

impl<T> TinNum for T where T: Num + PartialOrd + Into<f64> + Copy + Signed + std::fmt::Debug {}

/// A two dimensional point.
///
/// This is the basic type used for defining positions.
#[derive(Debug, PartialEq, Eq, PartialOrd, Clone, Copy, Default, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Point2<S> {
    /// The point's x coordinate
    pub x: S,
    /// The point's y coordinate
    pub y: S,
}

impl<S> Point2<S> {
    /// Creates a new point.
    #[inline]
    pub const fn new(x: S, y: S) -> Self {
        Point2 { x, y }
    }
}

impl<S: TinNum> Point2<S> {
    /// Returns the squared distance of this point and another point.
    #[inline]
    pub fn distance_2(&self, other: Self) -> S {
        self.sub(other).length2()
    }

    pub(crate) fn to_f64(self) -> Point2<f64> {
        Point2::new(self.x.into(), self.y.into())
    }

    pub(crate) fn length2(&self) -> S {
        self.x * self.x + self.y * self.y
    }

    pub(crate) fn sub(&self, other: Self) -> Self {
        Point2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl<S: TinNum> From<Point2<S>> for [S; 2] {
    #[inline]
    fn from(point: Point2<S>) -> Self {
        [point.x, point.y]
    }
}

impl<S: TinNum> From<Point2<S>> for (S, S) {
    #[inline]
    fn from(point: Point2<S>) -> (S, S) {
        (point.x, point.y)
    }
}

impl<S: TinNum> From<[S; 2]> for Point2<S> {
    #[inline]
    fn from(source: [S; 2]) -> Self {
        Self::new(source[0], source[1])
    }
}

impl<S: TinNum> From<(S, S)> for Point2<S> {
    #[inline]
    fn from(source: (S, S)) -> Self {
        Self::new(source.0, source.1)
    }
}

/// An object with position.
///
/// Vertices need to implement this trait to be triangulated. The vertex itself is treated as
/// an opaque payload: it is moved into the resulting [Triangulation](crate::Triangulation)
/// without being inspected beyond its position.
pub trait HasPosition {
    /// The number type used by this coordinate type.
    type Scalar: TinNum;

    /// Returns the position of this object.
    ///
    /// **Note**: It is assumed that the position doesn't change during triangulation.
    fn position(&self) -> Point2<Self::Scalar>;
}

impl<S: TinNum> HasPosition for Point2<S> {
    type Scalar = S;

    fn position(&self) -> Point2<S> {
        *self
    }
}

/// A position bundled with an arbitrary payload, e.g. an elevation sample.
///
/// Two `PointWithData` values at the same position are still distinct vertices of a
/// triangulation; identity is determined by their index in the input, not by their
/// coordinates.
#[derive(Debug, PartialEq, Clone, Copy, Default, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct PointWithData<S, D> {
    /// The point's position
    pub position: Point2<S>,
    /// The payload carried through the triangulation unexamined
    pub data: D,
}

impl<S, D> PointWithData<S, D> {
    /// Creates a new point with a payload.
    pub const fn new(x: S, y: S, data: D) -> Self {
        Self {
            position: Point2::new(x, y),
            data,
        }
    }
}

impl<S: TinNum, D> HasPosition for PointWithData<S, D> {
    type Scalar = S;

    fn position(&self) -> Point2<S> {
        self.position
    }
}
