use crate::entities::ShelfRecord;

/// A horizontal strip of the fabric, filled from its floor (left to right).
/// `y` and `height` are fixed at creation; the height is that of the first piece placed on it.
#[derive(Clone, Debug, PartialEq)]
pub struct Shelf {
    pub y: f64,
    pub height: f64,
    pub margin: f64,
    floor_cursor: f64,
}

impl Shelf {
    pub fn new(y: f64, height: f64, margin: f64) -> Self {
        Shelf {
            y,
            height,
            margin,
            floor_cursor: 0.0,
        }
    }

    /// x-coordinate of the next free floor slot
    pub fn floor_cursor(&self) -> f64 {
        self.floor_cursor
    }

    /// y-coordinate of the first shelf that could be stacked on top of this one
    pub fn next_y(&self) -> f64 {
        self.y + self.height + self.margin
    }

    /// Width left on the floor after placing a `width` x `height` piece,
    /// `None` if the piece does not fit on this shelf.
    pub fn floor_leftover(&self, width: f64, height: f64, fabric_width: f64) -> Option<f64> {
        let leftover = fabric_width - (self.floor_cursor + width);
        match height <= self.height && leftover >= 0.0 {
            true => Some(leftover),
            false => None,
        }
    }

    /// Allocates `width` on the floor, returns the x-coordinate of the allocated slot.
    pub fn place_on_floor(&mut self, width: f64) -> f64 {
        let x = self.floor_cursor;
        self.floor_cursor += width + self.margin;
        x
    }
}

impl From<&Shelf> for ShelfRecord {
    fn from(shelf: &Shelf) -> Self {
        ShelfRecord {
            y: shelf.y,
            height: shelf.height,
            margin: shelf.margin,
            floor_cursor: shelf.floor_cursor,
            ceiling_cursor: None,
            closed: None,
        }
    }
}

/// Allocation state of a [`FcShelf`].
/// Floor allocation only exists in the `Open` state, closing a shelf is irreversible.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FcShelfState {
    Open {
        floor_cursor: f64,
    },
    Closed {
        floor_cursor: f64,
        ceiling_cursor: f64,
    },
}

/// Shelf of the floor-ceiling heuristic.
/// While open, it grows from its floor. Once closed, the headroom left above shorter floor pieces
/// is filled from its ceiling (right to left, top-aligned) for as long as the two sides do not meet.
#[derive(Clone, Debug, PartialEq)]
pub struct FcShelf {
    pub y: f64,
    pub height: f64,
    pub margin: f64,
    state: FcShelfState,
}

impl FcShelf {
    pub fn new(y: f64, height: f64, margin: f64) -> Self {
        FcShelf {
            y,
            height,
            margin,
            state: FcShelfState::Open { floor_cursor: 0.0 },
        }
    }

    pub fn state(&self) -> FcShelfState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, FcShelfState::Open { .. })
    }

    pub fn next_y(&self) -> f64 {
        self.y + self.height + self.margin
    }

    /// Allocates a `width` x `height` slot on the floor.
    /// Returns the lower-left corner, or `None` if the shelf is closed or the piece does not fit.
    pub fn try_place_on_floor(
        &mut self,
        width: f64,
        height: f64,
        fabric_width: f64,
    ) -> Option<(f64, f64)> {
        match &mut self.state {
            FcShelfState::Open { floor_cursor }
                if height <= self.height && *floor_cursor + width <= fabric_width =>
            {
                let x = *floor_cursor;
                *floor_cursor += width + self.margin;
                Some((x, self.y))
            }
            _ => None,
        }
    }

    /// Permanently disables floor allocation, the ceiling cursor starts at the fabric's right edge.
    pub fn close(&mut self, fabric_width: f64) {
        if let FcShelfState::Open { floor_cursor } = self.state {
            self.state = FcShelfState::Closed {
                floor_cursor,
                // the last floor slot may end exactly at the edge, its trailing margin pushing past it
                ceiling_cursor: fabric_width.max(floor_cursor),
            };
        }
    }

    /// Allocates a `width` x `height` slot against the ceiling.
    /// Returns the lower-left corner, or `None` if the shelf is open or the piece does not fit.
    pub fn try_place_on_ceiling(&mut self, width: f64, height: f64) -> Option<(f64, f64)> {
        match &mut self.state {
            FcShelfState::Closed {
                floor_cursor,
                ceiling_cursor,
            } if height <= self.height && *ceiling_cursor - width >= *floor_cursor => {
                let x = *ceiling_cursor - width;
                let y = self.y + self.height - height;
                *ceiling_cursor = (x - self.margin).max(*floor_cursor);
                Some((x, y))
            }
            _ => None,
        }
    }
}

impl From<&FcShelf> for ShelfRecord {
    fn from(shelf: &FcShelf) -> Self {
        let (floor_cursor, ceiling_cursor, closed) = match shelf.state {
            FcShelfState::Open { floor_cursor } => (floor_cursor, None, false),
            FcShelfState::Closed {
                floor_cursor,
                ceiling_cursor,
            } => (floor_cursor, Some(ceiling_cursor), true),
        };
        ShelfRecord {
            y: shelf.y,
            height: shelf.height,
            margin: shelf.margin,
            floor_cursor,
            ceiling_cursor,
            closed: Some(closed),
        }
    }
}
