use crate::geometry::primitives::{Point, Rect};

/// Maximum sine of the angle between two spokes for points to still be considered collinear
const COLLINEAR_SINE_TOLERANCE: f64 = 1e-12;

//https://en.wikipedia.org/wiki/Shoelace_formula
//counterclockwise = positive area, clockwise = negative area
pub fn calculate_signed_area(points: &[Point]) -> f64 {
    let mut sigma: f64 = 0.0;
    for i in 0..points.len() {
        //next point
        let j = (i + 1) % points.len();

        let (x_i, y_i) = points[i].into();
        let (x_j, y_j) = points[j].into();

        sigma += x_i * y_j - x_j * y_i;
    }

    0.5 * sigma
}

/// Area enclosed by the polygon, independent of its winding direction.
pub fn calculate_area(points: &[Point]) -> f64 {
    calculate_signed_area(points).abs()
}

/// Axis-aligned bounding box of the points, `None` if there are none.
pub fn bounding_box(points: &[Point]) -> Option<Rect> {
    Rect::bounding(points)
}

/// Whether all points lie on a single line (identical points included).
pub fn is_collinear(points: &[Point]) -> bool {
    let Some(origin) = points.first() else {
        return true;
    };
    // any point distinct from the origin defines the reference direction
    let Some(reference) = points.iter().find(|p| *p != origin) else {
        return true;
    };
    let ref_len = origin.sq_distance(reference).sqrt();

    points.iter().all(|p| {
        let len = origin.sq_distance(p).sqrt();
        origin.cross(reference, p).abs() <= COLLINEAR_SINE_TOLERANCE * ref_len * len
    })
}
