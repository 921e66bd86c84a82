use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Angle, Distance};

/// A point in the local metric frame, in meters. x is east, y is north.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pt2D {
    x: f64,
    y: f64,
}

impl Pt2D {
    pub fn new(x: f64, y: f64) -> Pt2D {
        if !x.is_finite() || !y.is_finite() {
            panic!("Bad Pt2D {}, {}", x, y);
        }
        Pt2D { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn dist_to(self, to: Pt2D) -> Distance {
        Distance::meters(((self.x - to.x).powi(2) + (self.y - to.y).powi(2)).sqrt())
    }

    pub fn angle_to(self, to: Pt2D) -> Angle {
        Angle::from_vector(to.x - self.x, to.y - self.y)
    }

    pub fn offset(self, dx: f64, dy: f64) -> Pt2D {
        Pt2D::new(self.x + dx, self.y + dy)
    }

    /// Moves `dist` along the direction `theta`. A negative distance moves the opposite way.
    pub fn project_away(self, dist: Distance, theta: Angle) -> Pt2D {
        let (sin, cos) = theta.normalized_radians().sin_cos();
        self.offset(dist.inner_meters() * cos, dist.inner_meters() * sin)
    }

    /// Linear interpolation; `pct` 0 is `self` and 1 is `to`.
    pub fn lerp(self, to: Pt2D, pct: f64) -> Pt2D {
        Pt2D::new(
            self.x + pct * (to.x - self.x),
            self.y + pct * (to.y - self.y),
        )
    }

    /// The arithmetic mean of the points. Not an area-weighted centroid.
    pub fn center(pts: &[Pt2D]) -> Option<Pt2D> {
        if pts.is_empty() {
            return None;
        }
        let mut x = 0.0;
        let mut y = 0.0;
        for pt in pts {
            x += pt.x;
            y += pt.y;
        }
        let len = pts.len() as f64;
        Some(Pt2D::new(x / len, y / len))
    }

    pub fn approx_eq(self, other: Pt2D, threshold: Distance) -> bool {
        self.dist_to(other) < threshold
    }
}

impl fmt::Display for Pt2D {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Pt2D({0}, {1})", self.x, self.y)
    }
}

impl From<Pt2D> for geo::Point<f64> {
    fn from(pt: Pt2D) -> Self {
        geo::Point::new(pt.x, pt.y)
    }
}

impl From<geo::Point<f64>> for Pt2D {
    fn from(pt: geo::Point<f64>) -> Self {
        Pt2D::new(pt.x(), pt.y())
    }
}
