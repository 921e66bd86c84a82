use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Angle, Distance, Pt2D};

/// A straight line segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line(Pt2D, Pt2D);

impl Line {
    /// The endpoints may be equal; callers that care about degenerate lines check `length()`.
    pub fn new(pt1: Pt2D, pt2: Pt2D) -> Line {
        Line(pt1, pt2)
    }

    pub fn pt1(&self) -> Pt2D {
        self.0
    }

    pub fn pt2(&self) -> Pt2D {
        self.1
    }

    pub fn points(&self) -> Vec<Pt2D> {
        vec![self.0, self.1]
    }

    pub fn length(&self) -> Distance {
        self.0.dist_to(self.1)
    }

    pub fn angle(&self) -> Angle {
        self.0.angle_to(self.1)
    }

    pub fn middle(&self) -> Pt2D {
        self.percent_along(0.5)
    }

    pub fn percent_along(&self, percent: f64) -> Pt2D {
        self.0.lerp(self.1, percent)
    }

    /// Shifts the line sideways along its left-hand unit normal `(-dy, dx) / len`. Negative widths
    /// shift to the right. Returns `None` for a zero-length line, which has no normal.
    pub fn shift_either_direction(&self, width: Distance) -> Option<Line> {
        let len = self.length().inner_meters();
        if len == 0.0 {
            return None;
        }
        let dx = self.1.x() - self.0.x();
        let dy = self.1.y() - self.0.y();
        let (nx, ny) = (-dy / len, dx / len);
        let w = width.inner_meters();
        Some(Line(
            self.0.offset(nx * w, ny * w),
            self.1.offset(nx * w, ny * w),
        ))
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Line::new(")?;
        writeln!(f, "  Pt2D::new({}, {}),", self.0.x(), self.0.y())?;
        writeln!(f, "  Pt2D::new({}, {}),", self.1.x(), self.1.y())?;
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_both_ways() {
        let line = Line::new(Pt2D::new(0.0, 0.0), Pt2D::new(10.0, 0.0));
        let left = line.shift_either_direction(Distance::meters(4.25)).unwrap();
        let right = line.shift_either_direction(Distance::meters(-4.25)).unwrap();
        assert_eq!(left.middle(), Pt2D::new(5.0, 4.25));
        assert_eq!(right.middle(), Pt2D::new(5.0, -4.25));
        assert_eq!(left.length(), line.length());

        let degenerate = Line::new(Pt2D::new(1.0, 1.0), Pt2D::new(1.0, 1.0));
        assert!(degenerate.shift_either_direction(Distance::meters(1.0)).is_none());
    }

    #[test]
    fn percent_along_vertical() {
        let line = Line::new(Pt2D::new(0.0, 0.0), Pt2D::new(0.0, 20.0));
        assert_eq!(line.percent_along(0.25), Pt2D::new(0.0, 5.0));
        assert_eq!(line.middle(), Pt2D::new(0.0, 10.0));
        assert!(line.angle().approx_eq(Angle::degrees(90.0), 1e-9));
    }
}
