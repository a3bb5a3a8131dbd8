use std::collections::HashSet;

use crate::entities::{Fabric, PackingResult, PieceMeta, Placement};
use crate::heuristics::PackingHeuristic;
use crate::util::FPA;
use log::{debug, warn};

/// A rectangle to be packed, identified by its index in the request list
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectRequest {
    pub index: usize,
    pub width: f64,
    pub height: f64,
}

/// A rectangle placed by a [`RectOracle`], in the coordinate system of the bin.
/// `width` and `height` are in the orientation the rectangle was placed in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PackedRect {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Packs rectangles into a single `bin_width` x `bin_length` bin, free to rotate them by 90°.
/// Rectangles which could not be packed are left out of the returned list.
pub trait RectOracle {
    fn pack(&self, requests: &[RectRequest], bin_width: f64, bin_length: f64) -> Vec<PackedRect>;
}

/// Rectangle bin-packing delegate: packs the bounding boxes of the pieces with a [`RectOracle`].
///
/// The oracle works on the fabric minus the margin along all four edges.
/// No margin is kept between pieces, only the oracle decides where they go.
/// Placements are numbered in the order the oracle returns them.
#[derive(Clone, Debug)]
pub struct RectDelegate<O> {
    oracle: O,
}

impl<O: RectOracle> RectDelegate<O> {
    pub fn new(oracle: O) -> Self {
        RectDelegate { oracle }
    }
}

impl<O: RectOracle> PackingHeuristic for RectDelegate<O> {
    fn name(&self) -> &'static str {
        "Rect Delegate"
    }

    fn pack(&self, pieces: &[PieceMeta], fabric: &Fabric) -> PackingResult {
        let name = self.name();
        let usable_width = fabric.width - 2.0 * fabric.margin;
        let usable_length = fabric.length - 2.0 * fabric.margin;

        if usable_width <= 0.0 || usable_length <= 0.0 {
            warn!(
                "[{name}] margin {} leaves no usable area on a {}x{} fabric",
                fabric.margin, fabric.width, fabric.length
            );
            return PackingResult::assemble(name, fabric, pieces, vec![], vec![]);
        }

        let requests = pieces
            .iter()
            .enumerate()
            .map(|(index, p)| RectRequest {
                index,
                width: p.width,
                height: p.height,
            })
            .collect::<Vec<_>>();

        let packed = self.oracle.pack(&requests, usable_width, usable_length);
        debug!(
            "[{name}] oracle packed {}/{} rectangles",
            packed.len(),
            requests.len()
        );

        let mut seen = HashSet::new();
        let mut placements: Vec<Placement> = vec![];
        for rect in packed {
            let Some(meta) = pieces.get(rect.index) else {
                warn!("[{name}] oracle returned unknown index {}, ignoring", rect.index);
                continue;
            };
            if !seen.insert(rect.index) {
                warn!("[{name}] oracle returned '{}' twice, ignoring", meta.id);
                continue;
            }
            let within_bin = FPA(rect.x) >= FPA(0.0)
                && FPA(rect.y) >= FPA(0.0)
                && FPA(rect.x + rect.width) <= FPA(usable_width)
                && FPA(rect.y + rect.height) <= FPA(usable_length);
            if !within_bin {
                warn!("[{name}] oracle placed '{}' outside the bin, ignoring", meta.id);
                continue;
            }

            let rotated = (rect.width, rect.height) != (meta.width, meta.height);
            let pos = (rect.x + fabric.margin, rect.y + fabric.margin);
            placements.push(Placement::new(meta, pos, rotated, placements.len() + 1, None));
        }

        PackingResult::assemble(name, fabric, pieces, placements, vec![])
    }
}

/// [`RectOracle`] backed by [`crunch`], an integer rectangle packer.
///
/// Dimensions are scaled by `resolution` (grid cells per fabric unit).
/// Rectangles are rounded up and the bin is rounded down, so every packing found is also
/// feasible in real coordinates.
///
/// [`crunch::pack`] stops at the first rectangle it cannot place. Rectangles larger than the bin are
/// filtered out beforehand, any other rectangle without room is dropped and the rest repacked.
#[cfg(feature = "rect-delegate")]
#[derive(Clone, Copy, Debug)]
pub struct CrunchOracle {
    resolution: f64,
}

#[cfg(feature = "rect-delegate")]
impl CrunchOracle {
    pub fn new(resolution: f64) -> Self {
        debug_assert!(resolution.is_finite() && resolution > 0.0);
        CrunchOracle { resolution }
    }

    fn scale_up(&self, v: f64) -> usize {
        (v * self.resolution).ceil() as usize
    }

    fn scale_down(&self, v: f64) -> usize {
        (v * self.resolution).floor() as usize
    }
}

#[cfg(feature = "rect-delegate")]
impl RectOracle for CrunchOracle {
    fn pack(&self, requests: &[RectRequest], bin_width: f64, bin_length: f64) -> Vec<PackedRect> {
        let (bin_w, bin_h) = (self.scale_down(bin_width), self.scale_down(bin_length));
        if bin_w == 0 || bin_h == 0 {
            return vec![];
        }

        let mut items = requests
            .iter()
            .map(|r| {
                crunch::Item::new(
                    *r,
                    self.scale_up(r.width),
                    self.scale_up(r.height),
                    crunch::Rotation::Allowed,
                )
            })
            .filter(|item| {
                let fits = (item.w <= bin_w && item.h <= bin_h)
                    || (item.h <= bin_w && item.w <= bin_h);
                if !fits {
                    debug!(
                        "[CRUNCH] request {} exceeds the bin in both orientations",
                        item.data.index
                    );
                }
                fits
            })
            .collect::<Vec<_>>();

        //same order crunch packs in: descending area plus longest side, stable on ties
        items.sort_by_key(|item| std::cmp::Reverse(item.w * item.h + item.w.max(item.h)));

        //crunch gives up at the first item without room, leave that one out and repack the rest
        let packed = loop {
            match crunch::pack(crunch::Rect::of_size(bin_w, bin_h), items.iter().cloned()) {
                Ok(all) => break all,
                Err(partial) if partial.len() < items.len() => {
                    let failed = items.remove(partial.len());
                    debug!(
                        "[CRUNCH] no room left for request {}, repacking",
                        failed.data.index
                    );
                }
                Err(partial) => break partial,
            }
        };

        packed
            .into_iter()
            .map(|item| {
                let request = item.data;
                let rotated = item.rect.w != self.scale_up(request.width);
                let (width, height) = match rotated {
                    false => (request.width, request.height),
                    true => (request.height, request.width),
                };
                PackedRect {
                    index: request.index,
                    x: item.rect.x as f64 / self.resolution,
                    y: item.rect.y as f64 / self.resolution,
                    width,
                    height,
                }
            })
            .collect()
    }
}
