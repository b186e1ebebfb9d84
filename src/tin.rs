//! Conversion of GeoJSON point collections into triangulated irregular networks.

use std::{error::Error, fmt::Display};

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};

use crate::{InsertionError, PointWithData, Triangulation, TriangulationParameters};

/// Property names of the three corner values attached to each TIN polygon.
const CORNER_PROPERTIES: [&str; 3] = ["a", "b", "c"];

/// The error type used by [tin].
#[derive(Clone, PartialEq, Debug)]
pub enum TinError {
    /// The feature at this index has no geometry.
    MissingGeometry {
        /// Index of the feature in the input collection
        feature: usize,
    },

    /// The feature at this index is not a point with at least two coordinates.
    NotAPoint {
        /// Index of the feature in the input collection
        feature: usize,
    },

    /// The feature at this index lacks the requested z property.
    MissingProperty {
        /// Index of the feature in the input collection
        feature: usize,
        /// The requested property name
        name: String,
    },

    /// A point coordinate was NaN or infinite.
    InvalidCoordinate(InsertionError),
}

impl Display for TinError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TinError::MissingGeometry { feature } => {
                write!(f, "feature {} has no geometry", feature)
            }
            TinError::NotAPoint { feature } => {
                write!(f, "feature {} is not a two dimensional point", feature)
            }
            TinError::MissingProperty { feature, name } => {
                write!(f, "feature {} has no property {:?}", feature, name)
            }
            TinError::InvalidCoordinate(error) => write!(f, "invalid coordinate: {}", error),
        }
    }
}

impl Error for TinError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TinError::InvalidCoordinate(error) => Some(error),
            _ => None,
        }
    }
}

impl From<InsertionError> for TinError {
    fn from(error: InsertionError) -> Self {
        TinError::InvalidCoordinate(error)
    }
}

/// Creates a [triangulated irregular network](https://en.wikipedia.org/wiki/Triangulated_irregular_network)
/// from a collection of point features.
///
/// Every face of the Delaunay triangulation of the points becomes one polygon feature whose
/// ring lists the three corners and repeats the first one. If `z` names a property, each polygon
/// receives the properties `a`, `b` and `c` holding that property's value at the three corners.
/// Otherwise, the polygons carry no properties.
///
/// Fewer than three points result in an empty collection.
///
/// # Example
/// ```
/// use geojson::FeatureCollection;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let points: FeatureCollection = r#"{
///     "type": "FeatureCollection",
///     "features": [
///         { "type": "Feature", "properties": { "z": 1 },
///           "geometry": { "type": "Point", "coordinates": [13.40, 52.52] } },
///         { "type": "Feature", "properties": { "z": 2 },
///           "geometry": { "type": "Point", "coordinates": [13.41, 52.52] } },
///         { "type": "Feature", "properties": { "z": 3 },
///           "geometry": { "type": "Point", "coordinates": [13.40, 52.53] } }
///     ]
/// }"#.parse()?;
///
/// let network = tinsweep::tin(&points, Some("z"))?;
/// assert_eq!(network.features.len(), 1);
/// # Ok(())
/// # }
/// ```
pub fn tin(points: &FeatureCollection, z: Option<&str>) -> Result<FeatureCollection, TinError> {
    tin_with_parameters(points, z, &TriangulationParameters::default())
}

/// Creates a triangulated irregular network with custom triangulation parameters.
///
/// *See also [tin]*
pub fn tin_with_parameters(
    points: &FeatureCollection,
    z: Option<&str>,
    parameters: &TriangulationParameters,
) -> Result<FeatureCollection, TinError> {
    let samples = points
        .features
        .iter()
        .enumerate()
        .map(|(index, feature)| to_sample(index, feature, z))
        .collect::<Result<Vec<_>, _>>()?;

    let triangulation = Triangulation::bulk_load_with_parameters(samples, parameters)?;
    log::debug!(
        "Created TIN with {} polygons from {} points",
        triangulation.num_faces(),
        triangulation.num_vertices()
    );

    let features = triangulation
        .faces()
        .map(|face| {
            let corners = face.vertices();
            let [a, b, c] = corners.map(|corner| vec![corner.position.x, corner.position.y]);
            let ring = vec![a.clone(), b, c, a];

            let properties = z.map(|_| {
                CORNER_PROPERTIES
                    .iter()
                    .zip(corners)
                    .map(|(name, corner)| (name.to_string(), corner.data.clone()))
                    .collect::<JsonObject>()
            });

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
                id: None,
                properties,
                foreign_members: None,
            }
        })
        .collect();

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

fn to_sample(
    index: usize,
    feature: &Feature,
    z: Option<&str>,
) -> Result<PointWithData<f64, JsonValue>, TinError> {
    let geometry = feature
        .geometry
        .as_ref()
        .ok_or(TinError::MissingGeometry { feature: index })?;

    let position = match &geometry.value {
        Value::Point(position) if position.len() >= 2 => position,
        _ => return Err(TinError::NotAPoint { feature: index }),
    };

    let data = match z {
        Some(name) => feature
            .property(name)
            .cloned()
            .ok_or_else(|| TinError::MissingProperty {
                feature: index,
                name: name.to_string(),
            })?,
        None => JsonValue::Null,
    };

    Ok(PointWithData::new(position[0], position[1], data))
}
