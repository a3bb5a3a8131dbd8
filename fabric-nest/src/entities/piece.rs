use crate::error::InvalidGeometryError;
use crate::geometry;
use crate::geometry::primitives::Point;
use crate::util::FPA;

/// A raw piece to be nested: an id and its polygon in fabric coordinates.
/// The polygon does not need to be convex.
#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    pub id: String,
    pub vertices: Vec<Point>,
}

impl Piece {
    pub fn new(id: impl Into<String>, vertices: Vec<Point>) -> Self {
        Self {
            id: id.into(),
            vertices,
        }
    }
}

/// Preprocessed representation of a [`Piece`], shared by all heuristics.
#[derive(Clone, Debug, PartialEq)]
pub struct PieceMeta {
    pub id: String,
    /// Width of the vertex bounding box
    pub width: f64,
    /// Height of the vertex bounding box
    pub height: f64,
    /// Area of the polygon (not of its bounding box), independent of the winding direction
    pub area: f64,
    /// The vertices translated so the bounding box has its minimum corner at (0, 0)
    pub normalized_vertices: Vec<Point>,
}

impl PieceMeta {
    /// Builds the metadata of `piece`, failing on polygons that cannot be nested.
    pub fn try_from_piece(piece: &Piece) -> Result<Self, InvalidGeometryError> {
        let vertices = &piece.vertices;
        if vertices.len() < 3 {
            return Err(InvalidGeometryError::TooFewVertices {
                id: piece.id.clone(),
                n_vertices: vertices.len(),
            });
        }
        if !vertices.iter().all(Point::is_finite) {
            return Err(InvalidGeometryError::NonFiniteVertex {
                id: piece.id.clone(),
            });
        }
        if geometry::is_collinear(vertices) {
            return Err(InvalidGeometryError::Collinear {
                id: piece.id.clone(),
            });
        }

        // computed on the original vertices, translation does not affect it
        let area = geometry::calculate_area(vertices);
        if FPA(area) == FPA(0.0) {
            return Err(InvalidGeometryError::ZeroArea {
                id: piece.id.clone(),
            });
        }

        let bbox = geometry::bounding_box(vertices).expect("at least 3 vertices present");
        let Point(x_min, y_min) = bbox.min_corner();
        let normalized_vertices = vertices
            .iter()
            .map(|p| p.translate(-x_min, -y_min))
            .collect();

        Ok(PieceMeta {
            id: piece.id.clone(),
            width: bbox.width(),
            height: bbox.height(),
            area,
            normalized_vertices,
        })
    }

    pub fn longest_side(&self) -> f64 {
        f64::max(self.width, self.height)
    }

    pub fn shortest_side(&self) -> f64 {
        f64::min(self.width, self.height)
    }

    /// Whether rotating the piece by 90° changes its bounding box
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Width and height of the bounding box in the requested orientation
    pub fn dims(&self, rotated: bool) -> (f64, f64) {
        match rotated {
            false => (self.width, self.height),
            true => (self.height, self.width),
        }
    }

    /// The normalized vertices in the requested orientation.
    /// Rotation transposes the vertices, which keeps them origin-anchored.
    pub fn vertices(&self, rotated: bool) -> Vec<Point> {
        match rotated {
            false => self.normalized_vertices.clone(),
            true => self
                .normalized_vertices
                .iter()
                .map(|p| p.transpose())
                .collect(),
        }
    }
}
