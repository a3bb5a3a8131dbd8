use thiserror::Error;

/// Raised when a raw piece cannot be turned into [`PieceMeta`](crate::entities::PieceMeta).
///
/// The engine only reports the problem; whether the piece is dropped or the whole run
/// is aborted is decided by the caller (see [`InvalidPiecePolicy`](crate::io::import::InvalidPiecePolicy)).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidGeometryError {
    #[error("piece '{id}' has {n_vertices} vertices, at least 3 are required")]
    TooFewVertices { id: String, n_vertices: usize },

    #[error("piece '{id}' contains a non-finite vertex coordinate")]
    NonFiniteVertex { id: String },

    #[error("all vertices of piece '{id}' are collinear")]
    Collinear { id: String },

    #[error("piece '{id}' has zero area")]
    ZeroArea { id: String },
}

impl InvalidGeometryError {
    /// Id of the offending piece
    pub fn piece_id(&self) -> &str {
        match self {
            InvalidGeometryError::TooFewVertices { id, .. }
            | InvalidGeometryError::NonFiniteVertex { id }
            | InvalidGeometryError::Collinear { id }
            | InvalidGeometryError::ZeroArea { id } => id,
        }
    }
}
