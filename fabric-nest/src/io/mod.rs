/// External (serializable) representations of inputs and results.
pub mod ext_repr;

/// All logic for converting external representations into internal ones
pub mod import;

/// All logic for exporting internal representations into external ones
pub mod export;

/// All logic for creating SVG from [`PackingResult`](crate::entities::PackingResult)s
pub mod svg;
