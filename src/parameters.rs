#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The collinearity tolerance used by [TriangulationParameters::default].
pub const DEFAULT_EPSILON: f64 = 1.0e-12;

/// Controls how a [Triangulation](crate::Triangulation) is created.
///
/// Currently, the only tunable value is the collinearity tolerance `epsilon`: a candidate
/// triangle whose corners `a`, `b` and `c` satisfy `|(b - a) x (c - a)| <= epsilon` is
/// considered degenerate and is never created. Its circumcircle would either be undefined or
/// dominated by rounding errors.
///
/// The tolerance is absolute. Inputs with very small coordinate extents (e.g. geographic degrees
/// spanning less than `1e-6`) may need a smaller value.
///
/// # Example
/// ```
/// use tinsweep::{Point2, Triangulation, TriangulationParameters};
///
/// # fn main() -> Result<(), tinsweep::InsertionError> {
/// let parameters = TriangulationParameters::new().with_epsilon(1.0e-20);
///
/// let vertices = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0e-7, 0.0),
///     Point2::new(0.0, 1.0e-7),
/// ];
/// let triangulation = Triangulation::bulk_load_with_parameters(vertices, &parameters)?;
/// assert_eq!(triangulation.num_faces(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct TriangulationParameters {
    epsilon: f64,
}

impl Default for TriangulationParameters {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl TriangulationParameters {
    /// Creates a new set of `TriangulationParameters`.
    ///
    /// Refer to the [struct definition](Self) for more information.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specifies the collinearity tolerance.
    ///
    /// Defaults to [DEFAULT_EPSILON]. Negative values are treated like their absolute value.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon.abs();
        self
    }

    /// Returns the collinearity tolerance.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}
