// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned model bounds
//!
//! The bounding box travels with every model so presentation code can
//! recentre coordinates. Classification never reads it.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::model::{Point, Solid};

/// Axis-aligned bounding box in model units
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every finite point, or `None` if there is none.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut bounds: Option<BoundingBox> = None;
        for p in points.into_iter().filter(|p| p.is_finite()) {
            match bounds.as_mut() {
                Some(b) => b.expand(p),
                None => bounds = Some(BoundingBox::new(*p, *p)),
            }
        }
        bounds
    }

    /// Bounds of every segment endpoint in `solids`.
    pub fn from_solids(solids: &[Solid]) -> Option<Self> {
        Self::from_points(
            solids
                .iter()
                .flat_map(|s| &s.faces)
                .flat_map(|f| &f.loops)
                .flat_map(|l| l.endpoints()),
        )
    }

    /// Expand bounds to include a point
    #[inline]
    pub fn expand(&mut self, p: &Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Centre of the box
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }

    /// Extent along each axis
    #[inline]
    pub fn size(&self) -> Vector3<f64> {
        self.max.to_nalgebra() - self.min.to_nalgebra()
    }

    #[inline]
    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Translation that moves the centre of the box to the origin
    #[inline]
    pub fn recentre_offset(&self) -> Vector3<f64> {
        -self.center().to_nalgebra().coords
    }
}
