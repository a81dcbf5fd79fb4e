/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use kurbo::{BezPath, Point, Rect};

/// Geometry of a scratch stroke: the starting point followed by every dragged point.
#[derive(Clone, Copy)]
pub struct ScratchMask<'a> {
    pub starting_point: Point,
    pub points: &'a [Point],
}

impl<'a> ScratchMask<'a> {
    pub fn new(starting_point: Point, points: &'a [Point]) -> Self {
        Self {
            starting_point,
            points,
        }
    }

    /// Polyline through all points, meant to be stroked rather than filled.
    pub fn path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.starting_point);
        for point in self.points {
            path.line_to(*point);
        }
        path
    }

    pub fn bounding_rect(&self) -> Rect {
        self.points
            .iter()
            .fold(Rect::from_points(self.starting_point, self.starting_point), |rect, p| {
                rect.union_pt(*p)
            })
    }

    pub fn bounding_area(&self) -> f64 {
        self.bounding_rect().area()
    }
}
