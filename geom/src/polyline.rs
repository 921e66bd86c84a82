use std::fmt;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::{Distance, Line, Pt2D};

/// An ordered sequence of at least two points. Unlike a rendering polyline, consecutive duplicate
/// points are allowed here, since they come straight from map data; walking code skips the
/// zero-length spans.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolyLine {
    pts: Vec<Pt2D>,
    length: Distance,
}

impl PolyLine {
    pub fn new(pts: Vec<Pt2D>) -> Result<PolyLine> {
        if pts.len() < 2 {
            bail!("Need at least two points for a PolyLine, got {}", pts.len());
        }
        let length: Distance = pts
            .windows(2)
            .map(|pair| pair[0].dist_to(pair[1]))
            .sum();
        Ok(PolyLine { pts, length })
    }

    pub fn points(&self) -> &Vec<Pt2D> {
        &self.pts
    }

    pub fn into_points(self) -> Vec<Pt2D> {
        self.pts
    }

    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        self.pts.windows(2).map(|pair| Line::new(pair[0], pair[1]))
    }

    pub fn length(&self) -> Distance {
        self.length
    }

    /// Arc length at each vertex, starting with 0. The last entry equals `length()`.
    pub fn cumulative_lengths(&self) -> Vec<Distance> {
        let mut result = Vec::with_capacity(self.pts.len());
        let mut so_far = Distance::ZERO;
        result.push(so_far);
        for line in self.lines() {
            so_far += line.length();
            result.push(so_far);
        }
        result
    }

    /// Finds the point `dist` along the polyline. Out-of-range distances clamp to the endpoints.
    /// The span containing `dist` is the first vertex whose arc length reaches it; zero-length
    /// spans are skipped.
    pub fn interpolate(&self, dist: Distance) -> Pt2D {
        self.interpolate_with(&self.cumulative_lengths(), dist)
    }

    /// Same as `interpolate`, reusing precomputed `cumulative_lengths()`.
    pub fn interpolate_with(&self, cumulative: &[Distance], dist: Distance) -> Pt2D {
        if dist <= Distance::ZERO {
            return self.first_pt();
        }
        if dist >= self.length {
            return self.last_pt();
        }
        for idx in 1..self.pts.len() {
            if dist <= cumulative[idx] {
                let span = cumulative[idx] - cumulative[idx - 1];
                if span == Distance::ZERO {
                    continue;
                }
                let ratio = (dist - cumulative[idx - 1]) / span;
                return self.pts[idx - 1].lerp(self.pts[idx], ratio);
            }
        }
        self.last_pt()
    }

    pub fn middle(&self) -> Pt2D {
        self.interpolate(self.length / 2.0)
    }

    pub fn first_pt(&self) -> Pt2D {
        self.pts[0]
    }

    pub fn last_pt(&self) -> Pt2D {
        self.pts[self.pts.len() - 1]
    }

    pub fn first_line(&self) -> Line {
        Line::new(self.pts[0], self.pts[1])
    }

    pub fn last_line(&self) -> Line {
        Line::new(self.pts[self.pts.len() - 2], self.pts[self.pts.len() - 1])
    }
}

impl fmt::Display for PolyLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "PolyLine::new(vec![")?;
        for (idx, pt) in self.pts.iter().enumerate() {
            writeln!(f, "  Pt2D::new({}, {}), // {}", pt.x(), pt.y(), idx)?;
        }
        write!(f, "])")
    }
}
