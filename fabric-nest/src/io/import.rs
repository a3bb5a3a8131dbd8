use std::collections::HashSet;

use crate::entities::{Fabric, Piece, PieceMeta};
use crate::geometry::primitives::Point;
use crate::io::ext_repr::{ExtInput, ExtPiece};
use anyhow::{Context, Result, bail};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// What to do with a piece whose geometry cannot be nested
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidPiecePolicy {
    /// Log a warning and leave the piece out of the run
    #[default]
    Skip,
    /// Fail the whole import
    Abort,
}

/// Converts external representations of the fabric and pieces into internal ones.
#[derive(Clone, Debug, Copy, Default)]
pub struct Importer {
    pub invalid_piece_policy: InvalidPiecePolicy,
}

impl Importer {
    pub fn new(invalid_piece_policy: InvalidPiecePolicy) -> Importer {
        Importer {
            invalid_piece_policy,
        }
    }

    pub fn import_fabric(&self, ext_input: &ExtInput) -> Result<Fabric> {
        Fabric::try_new(
            ext_input.fabric_width,
            ext_input.fabric_length,
            ext_input.fabric_margin,
        )
        .context("invalid fabric")
    }

    pub fn import_piece(&self, ext_piece: &ExtPiece) -> Piece {
        let vertices = ext_piece.vertices.iter().map(|&v| Point::from(v)).collect();
        Piece::new(ext_piece.id.clone(), vertices)
    }

    /// Builds the metadata of every piece, in input order.
    /// Invalid pieces are handled according to the [`InvalidPiecePolicy`], duplicate ids always fail.
    pub fn import_pieces(&self, ext_pieces: &[ExtPiece]) -> Result<Vec<PieceMeta>> {
        let mut ids = HashSet::new();
        let mut metas = Vec::with_capacity(ext_pieces.len());
        let mut skipped = vec![];

        for ext_piece in ext_pieces {
            if !ids.insert(ext_piece.id.as_str()) {
                bail!("duplicate piece id '{}'", ext_piece.id);
            }
            match PieceMeta::try_from_piece(&self.import_piece(ext_piece)) {
                Ok(meta) => metas.push(meta),
                Err(err) => match self.invalid_piece_policy {
                    InvalidPiecePolicy::Skip => {
                        warn!("[IMPORT] skipping piece: {err}");
                        skipped.push(err.piece_id().to_string());
                    }
                    InvalidPiecePolicy::Abort => {
                        return Err(err).context("invalid piece geometry");
                    }
                },
            }
        }

        if !skipped.is_empty() {
            info!(
                "[IMPORT] {}/{} pieces remain after validation, skipped: [{}]",
                metas.len(),
                ext_pieces.len(),
                skipped.join(", ")
            );
        }

        Ok(metas)
    }

    pub fn import(&self, ext_input: &ExtInput) -> Result<(Fabric, Vec<PieceMeta>)> {
        let fabric = self.import_fabric(ext_input)?;
        let pieces = self.import_pieces(&ext_input.pieces)?;
        Ok((fabric, pieces))
    }
}
