use serde::{Deserialize, Serialize};

use geom::{Distance, PolyLine, Pt2D};
use osm_topology::WayID;

use crate::{Centerline, CityConfig, IdCounter};

/// Pieces whose endpoints end up closer than this are artifacts of duplicate points.
const MIN_PIECE_CHORD: Distance = Distance::const_meters(1.0);

/// A straight, bounded-length slice of a centerline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadSegment {
    pub id: String,
    pub start: Pt2D,
    pub end: Pt2D,
    pub width: f64,
    pub height: f64,
    pub way_id: WayID,
}

impl RoadSegment {
    pub fn length(&self) -> f64 {
        self.start.dist_to(self.end).inner_meters()
    }

    pub fn yaw(&self) -> f64 {
        self.start.angle_to(self.end).yaw()
    }

    pub fn midpoint(&self) -> Pt2D {
        self.start.lerp(self.end, 0.5)
    }
}

/// Cuts a polyline into (start, end) pieces whose arc length lies in [min, max) wherever the total
/// length allows. Pieces are never shorter than `min` unless the whole polyline is, and the true
/// endpoints are always kept.
pub fn slice_polyline(pl: &PolyLine, min: Distance, max: Distance) -> Vec<(Pt2D, Pt2D)> {
    let total = pl.length();
    if total < min {
        return vec![(pl.first_pt(), pl.last_pt())];
    }

    let mut count = ((total / max).ceil() as usize).max(1);
    while count > 1 && total / (count as f64) < min {
        count -= 1;
    }
    let step = total / (count as f64);

    let cumulative = pl.cumulative_lengths();
    let mut cuts: Vec<Distance> = (0..count).map(|i| step * (i as f64)).collect();
    cuts.push(total);

    let mut pieces: Vec<(Pt2D, Pt2D)> = Vec::new();
    for pair in cuts.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let end_pt = pl.interpolate_with(&cumulative, end);
        if end - start < min && !pieces.is_empty() {
            // Merge a short tail into the previous piece
            if let Some(last) = pieces.last_mut() {
                last.1 = end_pt;
            }
        } else {
            pieces.push((pl.interpolate_with(&cumulative, start), end_pt));
        }
    }
    pieces
}

/// Slices every centerline in order. Degenerate pieces are dropped before they get an ID.
pub fn make_segments(
    centerlines: &[Centerline],
    config: &CityConfig,
    ids: &mut IdCounter,
) -> Vec<RoadSegment> {
    let min = Distance::meters(config.min_segment_length);
    let max = Distance::meters(config.max_segment_length);
    let mut segments = Vec::new();
    for centerline in centerlines {
        for (start, end) in slice_polyline(&centerline.polyline, min, max) {
            if start.dist_to(end) < MIN_PIECE_CHORD {
                continue;
            }
            segments.push(RoadSegment {
                id: format!("segment_{:05}", ids.next()),
                start,
                end,
                width: centerline.width,
                height: config.road_height,
                way_id: centerline.way_id,
            });
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight(length: f64) -> PolyLine {
        PolyLine::new(vec![Pt2D::new(0.0, 0.0), Pt2D::new(length, 0.0)]).unwrap()
    }

    fn slice(pl: &PolyLine) -> Vec<(Pt2D, Pt2D)> {
        slice_polyline(pl, Distance::meters(50.0), Distance::meters(100.0))
    }

    #[test]
    fn piece_counts() {
        for (length, expected_pieces) in [
            (30.0, 1),
            (50.0, 1),
            (99.0, 1),
            (100.0, 1),
            (101.0, 2),
            (250.0, 3),
            (300.0, 3),
            (301.0, 4),
        ] {
            let pieces = slice(&straight(length));
            assert_eq!(pieces.len(), expected_pieces, "for {}m", length);
            assert_eq!(pieces[0].0, Pt2D::new(0.0, 0.0));
            assert_eq!(pieces.last().unwrap().1, Pt2D::new(length, 0.0));
        }
    }

    #[test]
    fn two_fifty_meters() {
        let pieces = slice(&straight(250.0));
        for (start, end) in &pieces {
            let len = start.dist_to(*end).inner_meters();
            assert!((len - 250.0 / 3.0).abs() < 1e-9, "got {}", len);
        }
        // Pieces chain together
        for pair in pieces.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
    }

    #[test]
    fn short_roads_are_not_sliced() {
        let pl = PolyLine::new(vec![
            Pt2D::new(0.0, 0.0),
            Pt2D::new(10.0, 0.0),
            Pt2D::new(10.0, 20.0),
        ])
        .unwrap();
        assert_eq!(
            slice(&pl),
            vec![(Pt2D::new(0.0, 0.0), Pt2D::new(10.0, 20.0))]
        );
    }

    #[test]
    fn arc_length_is_preserved() {
        // Along a bendy line, each piece covers step arc length, so the pieces' arc lengths sum
        // to the total.
        let pl = PolyLine::new(vec![
            Pt2D::new(0.0, 0.0),
            Pt2D::new(120.0, 0.0),
            Pt2D::new(120.0, 0.0),
            Pt2D::new(120.0, 90.0),
            Pt2D::new(40.0, 90.0),
        ])
        .unwrap();
        assert_eq!(pl.length(), Distance::meters(290.0));
        let pieces = slice(&pl);
        assert_eq!(pieces.len(), 3);
        let step = 290.0 / 3.0;
        assert!(pieces[0]
            .1
            .approx_eq(Pt2D::new(step, 0.0), Distance::meters(1e-9)));
        assert!(pieces[1]
            .1
            .approx_eq(Pt2D::new(120.0, 2.0 * step - 120.0), Distance::meters(1e-9)));
        assert_eq!(pieces[2].1, Pt2D::new(40.0, 90.0));
    }

    #[test]
    fn ids_and_degenerate_pieces() {
        let config = CityConfig::default();
        let mut ids = IdCounter::starting_at(1);
        let centerline = |id: i64, pl: PolyLine| Centerline {
            way_id: WayID(id),
            nodes: Vec::new(),
            polyline: pl,
            name: String::new(),
            highway_type: "residential".to_string(),
            lanes: 1,
            width: 7.0,
            sidewalk: None,
        };
        let degenerate = PolyLine::new(vec![Pt2D::new(5.0, 5.0), Pt2D::new(5.0, 5.5)]).unwrap();
        let segments = make_segments(
            &[
                centerline(1, straight(250.0)),
                centerline(2, degenerate),
                centerline(3, straight(30.0)),
            ],
            &config,
            &mut ids,
        );
        assert_eq!(
            segments.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
            vec!["segment_00001", "segment_00002", "segment_00003", "segment_00004"]
        );
        assert_eq!(segments[3].way_id, WayID(3));
        assert_eq!(segments[3].length(), 30.0);
        assert_eq!(segments[0].height, 0.12);
        assert_eq!(segments[0].width, 7.0);
    }
}
