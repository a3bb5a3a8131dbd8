use crate::geometry::primitives::Point;
use crate::util::FPA;

///Axis-aligned rectangle
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Rect {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Rect {
    /// Rectangle with its lower-left corner at `(x, y)`
    pub fn from_origin_and_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x_min: x,
            y_min: y,
            x_max: x + width,
            y_max: y + height,
        }
    }

    /// Smallest rectangle containing all `points`, may be degenerate (zero width or height).
    /// Returns `None` for an empty set of points.
    pub fn bounding(points: &[Point]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let (mut x_min, mut y_min) = (f64::MAX, f64::MAX);
        let (mut x_max, mut y_max) = (f64::MIN, f64::MIN);

        for point in points.iter() {
            x_min = x_min.min(point.0);
            y_min = y_min.min(point.1);
            x_max = x_max.max(point.0);
            y_max = y_max.max(point.1);
        }
        Some(Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn min_corner(&self) -> Point {
        Point(self.x_min, self.y_min)
    }

    /// Returns the largest rectangle that is contained in both `a` and `b`.
    /// Rectangles which only touch do not have an intersection.
    pub fn intersection(a: Rect, b: Rect) -> Option<Rect> {
        let x_min = f64::max(a.x_min, b.x_min);
        let y_min = f64::max(a.y_min, b.y_min);
        let x_max = f64::min(a.x_max, b.x_max);
        let y_max = f64::min(a.y_max, b.y_max);
        if x_min < x_max && y_min < y_max {
            Some(Rect {
                x_min,
                y_min,
                x_max,
                y_max,
            })
        } else {
            None
        }
    }

    /// Whether the interiors of `self` and `other` overlap, with a tolerance for floating point precision.
    pub fn almost_overlaps(&self, other: &Rect) -> bool {
        FPA(f64::max(self.x_min, other.x_min)) < FPA(f64::min(self.x_max, other.x_max))
            && FPA(f64::max(self.y_min, other.y_min)) < FPA(f64::min(self.y_max, other.y_max))
    }

    /// Whether `other` lies entirely inside `self`, with a tolerance for floating point precision.
    pub fn almost_contains(&self, other: &Rect) -> bool {
        FPA(self.x_min) <= FPA(other.x_min)
            && FPA(self.y_min) <= FPA(other.y_min)
            && FPA(self.x_max) >= FPA(other.x_max)
            && FPA(self.y_max) >= FPA(other.y_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_of_points() {
        let points = [Point(3.0, -1.0), Point(7.5, 2.0), Point(4.0, 6.0)];
        let bbox = Rect::bounding(&points).unwrap();
        assert_eq!(bbox.min_corner(), Point(3.0, -1.0));
        assert_eq!(bbox.width(), 4.5);
        assert_eq!(bbox.height(), 7.0);
        assert!(Rect::bounding(&[]).is_none());
    }

    #[test]
    fn touching_rectangles_do_not_overlap() {
        let a = Rect::from_origin_and_size(0.0, 0.0, 10.0, 5.0);
        let b = Rect::from_origin_and_size(10.0, 0.0, 4.0, 5.0);
        assert!(!a.almost_overlaps(&b));
        assert!(Rect::intersection(a, b).is_none());

        let c = Rect::from_origin_and_size(9.0, 4.0, 4.0, 5.0);
        assert!(a.almost_overlaps(&c));
        assert_eq!(Rect::intersection(a, c).unwrap().area(), 1.0);
    }
}
