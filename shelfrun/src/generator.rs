use std::f64::consts::TAU;

use fabric_nest::io::ext_repr::{ExtInput, ExtPiece};
use fabric_nest::util::round_to;
use itertools::Itertools;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Parameters of a random nesting instance
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InstanceSpec {
    pub n_pieces: usize,
    pub fabric_width: f64,
    pub fabric_length: f64,
    pub margin: f64,
    /// Range of the bounding box widths of the generated pieces
    pub piece_width: (f64, f64),
    /// Range of the bounding box heights of the generated pieces
    pub piece_height: (f64, f64),
}

impl Default for InstanceSpec {
    fn default() -> Self {
        Self {
            n_pieces: 400,
            fabric_width: 500.0,
            fabric_length: 700.0,
            margin: 0.0,
            piece_width: (5.0, 50.0),
            piece_height: (5.0, 100.0),
        }
    }
}

/// Generates an instance of star-shaped polygons with 3 to 6 vertices.
pub fn generate_instance(spec: &InstanceSpec, rng: &mut impl Rng) -> ExtInput {
    let pieces = (1..=spec.n_pieces)
        .map(|i| {
            let w = rng.random_range(spec.piece_width.0..=spec.piece_width.1);
            let h = rng.random_range(spec.piece_height.0..=spec.piece_height.1);
            let n_vertices = rng.random_range(3..=6);
            ExtPiece {
                id: format!("piece_{i:04}"),
                vertices: star_polygon(w, h, n_vertices, rng),
            }
        })
        .collect_vec();

    ExtInput {
        fabric_width: spec.fabric_width,
        fabric_length: spec.fabric_length,
        fabric_margin: spec.margin,
        pieces,
    }
}

/// Polygon with vertices at sorted random angles around the center of a `w` x `h` box,
/// each at a random fraction (between 0.5 and 1) of the box radius. Anchored at the origin.
pub fn star_polygon(w: f64, h: f64, n_vertices: usize, rng: &mut impl Rng) -> Vec<(f64, f64)> {
    let (rx, ry) = (w / 2.0, h / 2.0);
    let angles = (0..n_vertices)
        .map(|_| rng.random_range(0.0..TAU))
        .sorted_by(f64::total_cmp)
        .collect_vec();

    let points = angles
        .into_iter()
        .map(|a| {
            let x = rx + rx * a.cos() * rng.random_range(0.5..=1.0);
            let y = ry + ry * a.sin() * rng.random_range(0.5..=1.0);
            (x, y)
        })
        .collect_vec();

    let min_x = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let min_y = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    points
        .into_iter()
        .map(|(x, y)| (round_to(x - min_x, 2), round_to(y - min_y, 2)))
        .collect()
}
