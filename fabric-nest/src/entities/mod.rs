mod fabric;
mod piece;
mod placement;
mod result;
mod shelf;

#[doc(inline)]
pub use fabric::Fabric;
#[doc(inline)]
pub use piece::Piece;
#[doc(inline)]
pub use piece::PieceMeta;
#[doc(inline)]
pub use placement::Placement;
#[doc(inline)]
pub use placement::ShelfSide;
#[doc(inline)]
pub use placement::ShelfSlot;
#[doc(inline)]
pub use result::PackingResult;
#[doc(inline)]
pub use result::ShelfRecord;
#[doc(inline)]
pub use shelf::FcShelf;
#[doc(inline)]
pub use shelf::FcShelfState;
#[doc(inline)]
pub use shelf::Shelf;
