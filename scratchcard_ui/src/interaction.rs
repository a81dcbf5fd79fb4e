/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use scratchcard_core::{kurbo::Point, PointerEvent};
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, Touch, TouchPhase, WindowEvent},
};

const MOUSE_POINTER: u64 = u64::MAX;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Interaction {
    /// Pointer input in logical window coordinates.
    Pointer(PointerEvent),
    Reset,
}

/// Turns window mouse and touch events into pointer events.
#[derive(Debug)]
pub struct PointerTracker {
    scale_factor: f64,
    cursor: Point,
    pressed: bool,
}

impl PointerTracker {
    pub fn new(scale_factor: f64) -> Self {
        Self {
            scale_factor,
            cursor: Point::ZERO,
            pressed: false,
        }
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
    }

    pub fn handle(&mut self, event: &WindowEvent) -> Option<Interaction> {
        match event {
            WindowEvent::CursorMoved { position, .. } => self.cursor_moved(*position),
            WindowEvent::MouseInput { state, button, .. } => self.mouse_input(*state, *button),
            WindowEvent::Touch(Touch {
                phase, location, id, ..
            }) => self.touch(*phase, *id, *location),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.set_scale_factor(*scale_factor);
                None
            }
            _ => None,
        }
    }

    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>) -> Option<Interaction> {
        self.cursor = self.logical(position);
        self.pressed.then_some(Interaction::Pointer(PointerEvent::Moved {
            id: MOUSE_POINTER,
            location: self.cursor,
        }))
    }

    pub fn mouse_input(&mut self, state: ElementState, button: MouseButton) -> Option<Interaction> {
        let location = self.cursor;
        match (button, state) {
            (MouseButton::Left, ElementState::Pressed) => {
                self.pressed = true;
                Some(Interaction::Pointer(PointerEvent::Down {
                    id: MOUSE_POINTER,
                    location,
                }))
            }
            (MouseButton::Left, ElementState::Released) => {
                self.pressed = false;
                Some(Interaction::Pointer(PointerEvent::Up {
                    id: MOUSE_POINTER,
                    location,
                }))
            }
            (MouseButton::Right, ElementState::Released) => Some(Interaction::Reset),
            _ => None,
        }
    }

    pub fn touch(
        &mut self,
        phase: TouchPhase,
        id: u64,
        position: PhysicalPosition<f64>,
    ) -> Option<Interaction> {
        let location = self.logical(position);
        let event = match phase {
            TouchPhase::Started => PointerEvent::Down { id, location },
            TouchPhase::Moved => PointerEvent::Moved { id, location },
            TouchPhase::Ended => PointerEvent::Up { id, location },
            TouchPhase::Cancelled => PointerEvent::Cancelled { id },
        };
        Some(Interaction::Pointer(event))
    }

    fn logical(&self, position: PhysicalPosition<f64>) -> Point {
        Point::new(
            position.x / self.scale_factor,
            position.y / self.scale_factor,
        )
    }
}
