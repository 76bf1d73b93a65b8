// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boundary-representation stair model: solids → faces → loops → segments.
//!
//! The model is loaded once and treated as immutable. Everything derived from
//! it (classification results, measurements) lives outside these types.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bounds::BoundingBox;

/// A 3D point (simplified for serialization)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub const ORIGIN: Point = Point {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_nalgebra(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    pub fn from_nalgebra(p: &Point3<f64>) -> Self {
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.to_nalgebra() - self.to_nalgebra()).norm()
    }

    /// Distance in the XY plane, ignoring height.
    pub fn planar_distance_to(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn translated(&self, offset: &Vector3<f64>) -> Point {
        Point::from_nalgebra(&(self.to_nalgebra() + offset))
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<Point3<f64>> for Point {
    fn from(p: Point3<f64>) -> Self {
        Point::from_nalgebra(&p)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4}, {:.4})", self.x, self.y, self.z)
    }
}

/// Directed straight edge from `start` to `end`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Unnormalized direction `end - start`.
    pub fn direction(&self) -> Vector3<f64> {
        self.end.to_nalgebra() - self.start.to_nalgebra()
    }

    pub fn midpoint(&self) -> Point {
        Point::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
            (self.start.z + self.end.z) / 2.0,
        )
    }

    pub fn reversed(&self) -> Segment {
        Segment::new(self.end, self.start)
    }
}

/// Ordered sequence of segments outlining a planar polygon.
///
/// Circuit closure (`segments[i].end == segments[i + 1].start`) is expected
/// but not enforced; real exports contain broken loops and the pipeline
/// classifies rather than rejects them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Loop {
    pub segments: Vec<Segment>,
}

impl Loop {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Builds a closed loop through `points`, wrapping the last point back to
    /// the first.
    pub fn from_points(points: &[Point]) -> Self {
        let n = points.len();
        let segments = (0..n)
            .map(|i| Segment::new(points[i], points[(i + 1) % n]))
            .collect();
        Self { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Start point of every segment, in loop order.
    pub fn start_points(&self) -> Vec<Point> {
        self.segments.iter().map(|s| s.start).collect()
    }

    /// Every segment endpoint (start and end), in loop order.
    pub fn endpoints(&self) -> impl Iterator<Item = &Point> {
        self.segments.iter().flat_map(|s| [&s.start, &s.end])
    }
}

/// Face of a solid; extra loops describe holes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Face {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub loops: Vec<Loop>,
}

impl Face {
    pub fn new(loops: Vec<Loop>) -> Self {
        Self { name: None, loops }
    }

    pub fn named(name: impl Into<String>, loops: Vec<Loop>) -> Self {
        Self {
            name: Some(name.into()),
            loops,
        }
    }
}

/// One physically contiguous volume (a stair assembly, or one step)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Solid {
    pub faces: Vec<Face>,
}

impl Solid {
    pub fn new(faces: Vec<Face>) -> Self {
        Self { faces }
    }
}

/// Position of a loop inside its model: solid, face and loop indices.
///
/// Ordering follows the source traversal (solid, then face, then loop).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LoopId {
    pub solid: usize,
    pub face: usize,
    #[serde(rename = "loop")]
    pub loop_index: usize,
}

impl LoopId {
    pub fn new(solid: usize, face: usize, loop_index: usize) -> Self {
        Self {
            solid,
            face,
            loop_index,
        }
    }
}

impl fmt::Display for LoopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.solid, self.face, self.loop_index)
    }
}

/// A complete stair model as delivered by the exporter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StairModel {
    pub id: String,
    pub name: String,
    pub bounding_box: BoundingBox,
    pub solids: Vec<Solid>,
}

impl StairModel {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        bounding_box: BoundingBox,
        solids: Vec<Solid>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            bounding_box,
            solids,
        }
    }

    /// Builds a model whose bounding box is computed from its own geometry.
    ///
    /// A model without any points gets a degenerate box at the origin.
    pub fn from_solids(id: impl Into<String>, name: impl Into<String>, solids: Vec<Solid>) -> Self {
        let bounding_box = BoundingBox::from_solids(&solids)
            .unwrap_or_else(|| BoundingBox::new(Point::ORIGIN, Point::ORIGIN));
        Self::new(id, name, bounding_box, solids)
    }

    /// Every loop in source order: solid → face → loop.
    ///
    /// Stages that depend on enumeration order (footprint grouping) rely on
    /// this being the only traversal.
    pub fn loops(&self) -> impl Iterator<Item = (LoopId, &Loop)> {
        self.solids.iter().enumerate().flat_map(|(si, solid)| {
            solid.faces.iter().enumerate().flat_map(move |(fi, face)| {
                face.loops
                    .iter()
                    .enumerate()
                    .map(move |(li, lp)| (LoopId::new(si, fi, li), lp))
            })
        })
    }

    pub fn loop_by_id(&self, id: LoopId) -> Option<&Loop> {
        self.solids
            .get(id.solid)?
            .faces
            .get(id.face)?
            .loops
            .get(id.loop_index)
    }

    pub fn loop_count(&self) -> usize {
        self.solids
            .iter()
            .flat_map(|s| &s.faces)
            .map(|f| f.loops.len())
            .sum()
    }

    pub fn face_count(&self) -> usize {
        self.solids.iter().map(|s| s.faces.len()).sum()
    }

    /// Vector that moves the bounding box centre to the origin.
    pub fn recentre_offset(&self) -> Vector3<f64> {
        self.bounding_box.recentre_offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square(z: f64) -> Loop {
        Loop::from_points(&[
            Point::new(0.0, 0.0, z),
            Point::new(1.0, 0.0, z),
            Point::new(1.0, 1.0, z),
            Point::new(0.0, 1.0, z),
        ])
    }

    fn two_solid_model() -> StairModel {
        let first = Solid::new(vec![
            Face::new(vec![unit_square(0.0)]),
            Face::new(vec![unit_square(1.0), unit_square(2.0)]),
        ]);
        let second = Solid::new(vec![Face::named("top", vec![unit_square(3.0)])]);
        StairModel::from_solids("m1", "Two solids", vec![first, second])
    }

    #[test]
    fn from_points_closes_the_circuit() {
        let lp = unit_square(0.0);
        assert_eq!(lp.len(), 4);
        assert_eq!(lp.segments[3].end, lp.segments[0].start);
        for i in 0..3 {
            assert_eq!(lp.segments[i].end, lp.segments[i + 1].start);
        }
    }

    #[test]
    fn loops_enumerate_in_source_order() {
        let model = two_solid_model();
        let ids: Vec<LoopId> = model.loops().map(|(id, _)| id).collect();
        assert_eq!(
            ids,
            vec![
                LoopId::new(0, 0, 0),
                LoopId::new(0, 1, 0),
                LoopId::new(0, 1, 1),
                LoopId::new(1, 0, 0),
            ]
        );
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn loop_by_id_matches_traversal() {
        let model = two_solid_model();
        for (id, lp) in model.loops() {
            assert_eq!(model.loop_by_id(id), Some(lp));
        }
        assert!(model.loop_by_id(LoopId::new(5, 0, 0)).is_none());
        assert!(model.loop_by_id(LoopId::new(0, 1, 2)).is_none());
    }

    #[test]
    fn counts() {
        let model = two_solid_model();
        assert_eq!(model.loop_count(), 4);
        assert_eq!(model.face_count(), 3);
    }

    #[test]
    fn from_solids_computes_bounds() {
        let model = two_solid_model();
        assert_eq!(model.bounding_box.min, Point::new(0.0, 0.0, 0.0));
        assert_eq!(model.bounding_box.max, Point::new(1.0, 1.0, 3.0));
    }

    #[test]
    fn segment_helpers() {
        let seg = Segment::new(Point::new(0.0, 0.0, 0.0), Point::new(3.0, 4.0, 0.0));
        assert_eq!(seg.length(), 5.0);
        assert_eq!(seg.midpoint(), Point::new(1.5, 2.0, 0.0));
        assert_eq!(seg.direction(), Vector3::new(3.0, 4.0, 0.0));
        assert_eq!(seg.reversed().start, seg.end);
    }

    #[test]
    fn planar_distance_ignores_height() {
        let a = Point::new(0.0, 0.0, 0.0);
        let b = Point::new(3.0, 4.0, 100.0);
        assert_eq!(a.planar_distance_to(&b), 5.0);
    }
}
