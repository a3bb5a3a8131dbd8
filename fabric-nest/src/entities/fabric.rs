use anyhow::{Result, ensure};

/// The rectangular sheet pieces are nested onto.
/// Width is measured along x (the shelf direction), length along y.
#[derive(Clone, Debug, Copy, PartialEq)]
pub struct Fabric {
    pub width: f64,
    pub length: f64,
    /// Uniform gap kept between pieces (and between shelves)
    pub margin: f64,
}

impl Fabric {
    pub fn try_new(width: f64, length: f64, margin: f64) -> Result<Self> {
        ensure!(
            width.is_finite() && width > 0.0,
            "fabric width must be positive, got {width}"
        );
        ensure!(
            length.is_finite() && length > 0.0,
            "fabric length must be positive, got {length}"
        );
        ensure!(
            margin.is_finite() && margin >= 0.0,
            "fabric margin must be non-negative, got {margin}"
        );
        Ok(Fabric {
            width,
            length,
            margin,
        })
    }

    pub fn area(&self) -> f64 {
        self.width * self.length
    }
}
