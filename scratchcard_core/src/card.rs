/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::{Duration, Instant};

use kurbo::{BezPath, Point, Rect, Size};
use log::{debug, info};

use crate::{
    animation::{Easing, Transition},
    binding::Binding,
    dispatch::Dispatcher,
    gesture::{DragRecognizer, DragValue, Gesture, PointerEvent, DEFAULT_MINIMUM_DISTANCE},
    mask::ScratchMask,
};

#[derive(Clone, Debug)]
pub struct ScratchCardConfig {
    pub cursor_size: f64,
    pub size: Size,
    pub minimum_distance: f64,
    pub clear_duration: Duration,
    pub reveal_duration: Duration,
}

impl Default for ScratchCardConfig {
    fn default() -> Self {
        Self {
            cursor_size: 50.0,
            size: Size::new(300.0, 200.0),
            minimum_distance: DEFAULT_MINIMUM_DISTANCE,
            clear_duration: Duration::from_millis(350),
            reveal_duration: Duration::from_millis(350),
        }
    }
}

impl ScratchCardConfig {
    pub fn new(cursor_size: f64, size: impl Into<Size>) -> Self {
        Self {
            cursor_size,
            size: size.into(),
            ..Default::default()
        }
    }

    pub fn with_minimum_distance(mut self, minimum_distance: f64) -> Self {
        self.minimum_distance = minimum_distance;
        self
    }

    pub fn with_clear_duration(mut self, duration: Duration) -> Self {
        self.clear_duration = duration;
        self
    }

    pub fn with_reveal_duration(mut self, duration: Duration) -> Self {
        self.reveal_duration = duration;
        self
    }

    pub fn bounds(&self) -> Rect {
        self.size.to_rect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Dragging,
    Revealed,
}

#[derive(Clone, Debug, PartialEq)]
pub enum MaskShape {
    Stroke { path: BezPath, width: f64 },
    Full(Rect),
}

/// One shape of the content mask. The content is visible wherever any layer covers it.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskLayer {
    pub shape: MaskShape,
    pub alpha: f64,
}

struct FadingStroke {
    path: BezPath,
    opacity: Transition,
}

/// The reveal surface: tracks the scratch path and decides when the content is uncovered.
///
/// Pointer input goes through [`ScratchCard::handle_pointer`]. Recognized drags are queued
/// and only applied by [`ScratchCard::process_activations`], which the host calls on the
/// next turn of its event loop. Host writes to the reveal binding are picked up by
/// [`ScratchCard::update`], which every drag handler runs first.
pub struct ScratchCard {
    config: ScratchCardConfig,
    revealed: Binding<bool>,
    phase: Phase,

    starting_point: Option<Point>,
    points: Vec<Point>,

    recognizer: DragRecognizer,
    dispatcher: Dispatcher<Gesture>,

    overlay_opacity: Transition,
    reveal_progress: Transition,
    fading: Vec<FadingStroke>,

    on_reveal: Option<Box<dyn FnMut()>>,
}

impl ScratchCard {
    pub fn new(config: ScratchCardConfig, revealed: Binding<bool>) -> Self {
        let (phase, covered) = if revealed.get() {
            (Phase::Revealed, 0.0)
        } else {
            (Phase::Idle, 1.0)
        };
        Self {
            recognizer: DragRecognizer::new(config.minimum_distance),
            config,
            revealed,
            phase,
            starting_point: None,
            points: Vec::new(),
            dispatcher: Dispatcher::new(),
            overlay_opacity: Transition::settled(covered),
            reveal_progress: Transition::settled(1.0 - covered),
            fading: Vec::new(),
            on_reveal: None,
        }
    }

    /// Called once each time a drag uncovers the card.
    pub fn on_reveal(&mut self, f: impl FnMut() + 'static) {
        self.on_reveal = Some(Box::new(f));
    }

    pub fn config(&self) -> &ScratchCardConfig {
        &self.config
    }

    pub fn binding(&self) -> &Binding<bool> {
        &self.revealed
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed.get()
    }

    pub fn starting_point(&self) -> Option<Point> {
        self.starting_point
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if let Some(gesture) = self.recognizer.handle(event) {
            self.dispatcher.emit(gesture);
        }
    }

    pub fn pending_activations(&self) -> usize {
        self.dispatcher.pending()
    }

    /// Applies one queued gesture. Returns false once the queue is empty.
    pub fn process_next_activation(&mut self, now: Instant) -> bool {
        let Some(gesture) = self.dispatcher.next_activation() else {
            return false;
        };
        match gesture {
            Gesture::DragChanged(value) => self.drag_changed(value, now),
            Gesture::DragEnded => self.drag_ended(now),
            Gesture::DragCancelled => self.drag_cancelled(now),
        }
        true
    }

    pub fn process_activations(&mut self, now: Instant) -> usize {
        let mut processed = 0;
        while self.process_next_activation(now) {
            processed += 1;
        }
        processed
    }

    pub fn drag_changed(&mut self, value: DragValue, now: Instant) {
        self.update(now);
        if self.phase == Phase::Revealed {
            return;
        }
        if self.starting_point.is_none() {
            debug!(
                "scratch started at {:?} (pressed at {:?})",
                value.location, value.start_location
            );
            self.starting_point = Some(value.location);
        }
        self.points.push(value.location);
        self.phase = Phase::Dragging;
    }

    pub fn drag_ended(&mut self, now: Instant) {
        self.update(now);
        if self.phase == Phase::Revealed {
            return;
        }
        if self.should_reveal() {
            info!(
                "card revealed after {} points ({:.0} of {:.0} px²)",
                self.points.len(),
                self.covered_area(),
                self.config.size.area()
            );
            self.revealed.set(true);
            self.phase = Phase::Revealed;
            self.animate_reveal(now);
            if let Some(on_reveal) = self.on_reveal.as_mut() {
                on_reveal();
            }
        } else {
            debug!(
                "scratch of {:.0} px² too small, clearing",
                self.covered_area()
            );
            self.clear_path(now, Easing::EaseIn);
        }
    }

    /// The drag stopped without ending. Points already scratched stay in place.
    pub fn drag_cancelled(&mut self, now: Instant) {
        self.update(now);
        if self.phase == Phase::Dragging {
            self.phase = Phase::Idle;
        }
    }

    /// Reacts to writes the host made to the reveal binding.
    pub fn update(&mut self, now: Instant) {
        let shown = self.phase == Phase::Revealed;
        if let Some(revealed) = self.revealed.changed_since(shown) {
            if revealed {
                debug!("card revealed by host");
                self.phase = Phase::Revealed;
                self.animate_reveal(now);
            } else {
                info!("card reset");
                self.phase = Phase::Idle;
                self.overlay_opacity
                    .retarget(1.0, now, self.config.clear_duration, Easing::EaseOut);
                self.reveal_progress
                    .retarget(0.0, now, self.config.clear_duration, Easing::EaseOut);
                if !self.points.is_empty() {
                    self.clear_path(now, Easing::EaseOut);
                }
            }
        }
        self.fading.retain(|stroke| !stroke.opacity.is_finished(now));
    }

    /// Sets the reveal binding back to false and covers the card again.
    pub fn reset(&mut self, now: Instant) {
        self.revealed.set(false);
        self.update(now);
    }

    /// Bounding box of the scratch against half of the surface. Deliberately coarse.
    pub fn should_reveal(&self) -> bool {
        self.covered_area() >= self.config.size.area() / 2.0
    }

    pub fn covered_area(&self) -> f64 {
        self.scratch_mask()
            .map_or(0.0, |mask| mask.bounding_area())
    }

    pub fn scratch_mask(&self) -> Option<ScratchMask<'_>> {
        self.starting_point
            .map(|start| ScratchMask::new(start, &self.points))
    }

    pub fn overlay_opacity(&self, now: Instant) -> f64 {
        self.overlay_opacity.value_at(now)
    }

    pub fn mask(&self, now: Instant) -> Vec<MaskLayer> {
        let mut layers = Vec::new();
        let reveal = self.reveal_progress.value_at(now);
        if reveal > 0.0 {
            layers.push(MaskLayer {
                shape: MaskShape::Full(self.config.bounds()),
                alpha: reveal,
            });
        }
        if reveal < 1.0 {
            if let Some(mask) = self.scratch_mask() {
                layers.push(MaskLayer {
                    shape: MaskShape::Stroke {
                        path: mask.path(),
                        width: self.config.cursor_size,
                    },
                    alpha: 1.0,
                });
            }
        }
        for stroke in &self.fading {
            let alpha = stroke.opacity.value_at(now);
            if alpha > 0.0 {
                layers.push(MaskLayer {
                    shape: MaskShape::Stroke {
                        path: stroke.path.clone(),
                        width: self.config.cursor_size,
                    },
                    alpha,
                });
            }
        }
        layers
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        !self.overlay_opacity.is_finished(now)
            || !self.reveal_progress.is_finished(now)
            || self.fading.iter().any(|s| !s.opacity.is_finished(now))
    }

    fn animate_reveal(&mut self, now: Instant) {
        self.overlay_opacity
            .retarget(0.0, now, self.config.reveal_duration, Easing::EaseInOut);
        self.reveal_progress
            .retarget(1.0, now, self.config.reveal_duration, Easing::EaseInOut);
    }

    fn clear_path(&mut self, now: Instant, easing: Easing) {
        let path = self.scratch_mask().map(|mask| mask.path());
        if let Some(path) = path {
            self.fading.push(FadingStroke {
                path,
                opacity: Transition::new(1.0, 0.0, now, self.config.clear_duration, easing),
            });
        }
        self.points.clear();
        self.starting_point = None;
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(card: &mut ScratchCard, points: &[(f64, f64)]) {
        for &(x, y) in points {
            let value = DragValue {
                start_location: Point::new(points[0].0, points[0].1),
                location: Point::new(x, y),
            };
            card.drag_changed(value, Instant::now());
        }
    }

    fn card() -> ScratchCard {
        ScratchCard::new(ScratchCardConfig::new(20.0, (100.0, 100.0)), Binding::new(false))
    }

    #[test]
    fn first_change_sets_starting_point() {
        let mut card = card();
        assert_eq!(card.phase(), Phase::Idle);
        drag(&mut card, &[(10.0, 10.0), (20.0, 30.0)]);
        assert_eq!(card.phase(), Phase::Dragging);
        assert_eq!(card.starting_point(), Some(Point::new(10.0, 10.0)));
        assert_eq!(card.points().len(), 2);
    }

    #[test]
    fn on_reveal_fires_once() {
        use std::{cell::Cell, rc::Rc};

        let fired = Rc::new(Cell::new(0));
        let mut card = card();
        let counter = Rc::clone(&fired);
        card.on_reveal(move || counter.set(counter.get() + 1));

        let now = Instant::now();
        drag(&mut card, &[(0.0, 0.0), (100.0, 100.0)]);
        card.drag_ended(now);
        drag(&mut card, &[(0.0, 0.0), (100.0, 100.0)]);
        card.drag_ended(now);
        assert_eq!(fired.get(), 1);
        assert_eq!(card.phase(), Phase::Revealed);
    }

    #[test]
    fn revealed_card_ignores_drags() {
        let mut card = card();
        let now = Instant::now();
        drag(&mut card, &[(0.0, 0.0), (100.0, 100.0)]);
        card.drag_ended(now);
        let before = card.points().len();
        drag(&mut card, &[(5.0, 5.0)]);
        assert_eq!(card.points().len(), before);
    }

    #[test]
    fn queued_drags_apply_in_order() {
        let mut card = ScratchCard::new(
            ScratchCardConfig::new(20.0, (100.0, 100.0)).with_minimum_distance(0.0),
            Binding::new(false),
        );
        card.handle_pointer(PointerEvent::Down {
            id: 0,
            location: Point::new(1.0, 1.0),
        });
        for x in [2.0, 3.0, 4.0] {
            card.handle_pointer(PointerEvent::Moved {
                id: 0,
                location: Point::new(x, 1.0),
            });
        }
        assert_eq!(card.pending_activations(), 3);
        assert!(card.points().is_empty());

        assert_eq!(card.process_activations(Instant::now()), 3);
        let xs: Vec<f64> = card.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
        assert_eq!(card.starting_point(), Some(Point::new(2.0, 1.0)));
    }

    #[test]
    fn mask_goes_full_after_reveal() {
        let mut card = card();
        let now = Instant::now();
        drag(&mut card, &[(0.0, 0.0), (100.0, 60.0)]);
        assert!(matches!(card.mask(now)[0].shape, MaskShape::Stroke { .. }));
        card.drag_ended(now);

        let later = now + Duration::from_secs(1);
        let layers = card.mask(later);
        assert_eq!(
            layers,
            vec![MaskLayer {
                shape: MaskShape::Full(Rect::new(0.0, 0.0, 100.0, 100.0)),
                alpha: 1.0,
            }]
        );
        assert_eq!(card.overlay_opacity(later), 0.0);
        assert!(!card.is_animating(later));
    }

    #[test]
    fn cleared_stroke_fades_out() {
        let mut card = card();
        let now = Instant::now();
        drag(&mut card, &[(0.0, 0.0), (10.0, 10.0)]);
        card.drag_ended(now);
        assert!(card.points().is_empty());

        let layers = card.mask(now);
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].alpha, 1.0);
        assert!(card.is_animating(now));

        let later = now + Duration::from_secs(1);
        card.update(later);
        assert!(card.mask(later).is_empty());
        assert_eq!(card.overlay_opacity(later), 1.0);
    }

    #[test]
    fn host_reveal_skips_callback() {
        use std::{cell::Cell, rc::Rc};

        let fired = Rc::new(Cell::new(false));
        let mut card = card();
        let flag = Rc::clone(&fired);
        card.on_reveal(move || flag.set(true));
        card.binding().set(true);
        card.update(Instant::now());
        assert_eq!(card.phase(), Phase::Revealed);
        assert!(!fired.get());
    }

    #[test]
    fn host_reset_accepts_the_next_scratch_immediately() {
        let mut card = ScratchCard::new(
            ScratchCardConfig::new(20.0, (100.0, 100.0)).with_minimum_distance(0.0),
            Binding::new(false),
        );
        let now = Instant::now();
        drag(&mut card, &[(0.0, 0.0), (100.0, 100.0)]);
        card.drag_ended(now);
        assert!(card.is_revealed());

        // host writes the binding, nothing calls update() before the next gesture
        card.binding().set(false);
        card.handle_pointer(PointerEvent::Down {
            id: 0,
            location: Point::new(0.0, 0.0),
        });
        for (x, y) in [(0.0, 0.0), (50.0, 50.0), (100.0, 100.0)] {
            card.handle_pointer(PointerEvent::Moved {
                id: 0,
                location: Point::new(x, y),
            });
        }
        card.handle_pointer(PointerEvent::Up {
            id: 0,
            location: Point::new(100.0, 100.0),
        });
        card.process_activations(now);

        assert!(card.is_revealed());
        assert_eq!(card.phase(), Phase::Revealed);
        assert_eq!(card.starting_point(), Some(Point::new(0.0, 0.0)));
    }

    #[test]
    fn scratch_after_host_reveal_skips_callback() {
        use std::{cell::Cell, rc::Rc};

        let fired = Rc::new(Cell::new(0));
        let mut card = card();
        let counter = Rc::clone(&fired);
        card.on_reveal(move || counter.set(counter.get() + 1));

        card.binding().set(true);
        drag(&mut card, &[(0.0, 0.0), (100.0, 100.0)]);
        card.drag_ended(Instant::now());

        assert_eq!(fired.get(), 0);
        assert!(card.points().is_empty());
        assert_eq!(card.phase(), Phase::Revealed);
    }

    #[test]
    fn cancelled_drag_is_idle_with_lingering_points() {
        let mut card = ScratchCard::new(
            ScratchCardConfig::new(20.0, (100.0, 100.0)).with_minimum_distance(0.0),
            Binding::new(false),
        );
        card.handle_pointer(PointerEvent::Down {
            id: 0,
            location: Point::new(5.0, 5.0),
        });
        card.handle_pointer(PointerEvent::Moved {
            id: 0,
            location: Point::new(20.0, 5.0),
        });
        card.handle_pointer(PointerEvent::Cancelled { id: 0 });
        assert_eq!(card.process_activations(Instant::now()), 2);

        assert_eq!(card.phase(), Phase::Idle);
        assert_eq!(card.points(), &[Point::new(20.0, 5.0)]);
    }
}
