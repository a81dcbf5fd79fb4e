/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use kurbo::Point;
use log::debug;

pub const DEFAULT_MINIMUM_DISTANCE: f64 = 10.0;

pub type PointerId = u64;

/// Raw pointer input, in the widget's local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down { id: PointerId, location: Point },
    Moved { id: PointerId, location: Point },
    Up { id: PointerId, location: Point },
    Cancelled { id: PointerId },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragValue {
    pub start_location: Point,
    pub location: Point,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    DragChanged(DragValue),
    DragEnded,
    DragCancelled,
}

#[derive(Clone, Copy, Debug)]
struct Tracked {
    id: PointerId,
    start_location: Point,
    active: bool,
}

/// Recognizes a single-pointer drag.
///
/// A drag only starts once the pointer has travelled `minimum_distance` from where it went
/// down; releasing before that is a tap and produces nothing. While one pointer is tracked
/// every other pointer is ignored. Cancelling an active drag reports `DragCancelled`, not
/// `DragEnded`.
#[derive(Debug)]
pub struct DragRecognizer {
    minimum_distance: f64,
    tracked: Option<Tracked>,
}

impl Default for DragRecognizer {
    fn default() -> Self {
        DragRecognizer::new(DEFAULT_MINIMUM_DISTANCE)
    }
}

impl DragRecognizer {
    pub fn new(minimum_distance: f64) -> Self {
        Self {
            minimum_distance: minimum_distance.max(0.0),
            tracked: None,
        }
    }

    pub fn handle(&mut self, event: PointerEvent) -> Option<Gesture> {
        match event {
            PointerEvent::Down { id, location } => {
                if self.tracked.is_none() {
                    self.tracked = Some(Tracked {
                        id,
                        start_location: location,
                        active: false,
                    });
                }
                None
            }
            PointerEvent::Moved { id, location } => {
                let minimum_distance = self.minimum_distance;
                let tracked = self.tracked.as_mut().filter(|t| t.id == id)?;
                if !tracked.active && tracked.start_location.distance(location) < minimum_distance
                {
                    return None;
                }
                tracked.active = true;
                Some(Gesture::DragChanged(DragValue {
                    start_location: tracked.start_location,
                    location,
                }))
            }
            PointerEvent::Up { id, .. } => {
                let tracked = self.tracked.filter(|t| t.id == id)?;
                self.tracked = None;
                tracked.active.then_some(Gesture::DragEnded)
            }
            PointerEvent::Cancelled { id } => {
                let tracked = self.tracked.filter(|t| t.id == id)?;
                debug!("drag of pointer {id} cancelled");
                self.tracked = None;
                tracked.active.then_some(Gesture::DragCancelled)
            }
        }
    }
}
