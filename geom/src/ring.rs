use std::fmt;

use anyhow::{bail, Result};
use geo::{Area, Centroid};
use serde::{Deserialize, Serialize};

use crate::Pt2D;

/// A simple closed polygon boundary. The points are stored open: the last point is never a repeat
/// of the first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pts: Vec<Pt2D>,
}

impl Ring {
    /// Accepts the points either open or explicitly closed. Needs at least three distinct points.
    pub fn new(mut pts: Vec<Pt2D>) -> Result<Ring> {
        if pts.len() >= 2 && pts[0] == pts[pts.len() - 1] {
            pts.pop();
        }
        let distinct = pts
            .iter()
            .enumerate()
            .filter(|(idx, pt)| !pts[..*idx].contains(*pt))
            .count();
        if distinct < 3 {
            bail!(
                "Can't make a ring with {} distinct points out of {}",
                distinct,
                pts.len()
            );
        }
        Ok(Ring { pts })
    }

    pub fn points(&self) -> &Vec<Pt2D> {
        &self.pts
    }

    pub fn into_points(self) -> Vec<Pt2D> {
        self.pts
    }

    /// Always non-negative, regardless of winding order.
    pub fn area(&self) -> f64 {
        self.to_geo().unsigned_area()
    }

    /// The area-weighted centroid. Falls back to the mean of the vertices for a degenerate
    /// (zero-area) ring.
    pub fn centroid(&self) -> Pt2D {
        match self.to_geo().centroid() {
            Some(pt) if pt.x().is_finite() && pt.y().is_finite() => pt.into(),
            _ => Pt2D::center(&self.pts).unwrap_or_else(|| self.pts[0]),
        }
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Ring {
        Ring {
            pts: self.pts.iter().map(|pt| pt.offset(dx, dy)).collect(),
        }
    }

    pub fn to_geo(&self) -> geo::Polygon<f64> {
        let exterior: Vec<(f64, f64)> = self.pts.iter().map(|pt| (pt.x(), pt.y())).collect();
        geo::Polygon::new(exterior.into(), Vec::new())
    }
}

impl fmt::Display for Ring {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Ring::new(vec![")?;
        for pt in &self.pts {
            writeln!(f, "  Pt2D::new({}, {}),", pt.x(), pt.y())?;
        }
        write!(f, "])")
    }
}
