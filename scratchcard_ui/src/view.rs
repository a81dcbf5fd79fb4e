/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::Instant;

use scratchcard_core::{
    kurbo::{Point, Rect, RoundedRect, Size},
    Binding, MaskLayer, MaskShape, PointerEvent, ScratchCard, ScratchCardConfig,
};
use vello::{
    kurbo::Affine,
    peniko::{BlendMode, Cap, Color, Compose, Fill, Join, Mix, Stroke},
    SceneBuilder,
};

const CORNER_RADIUS: f64 = 20.0;

/// Something that draws itself into a `size` sized box at the origin of `transform`.
pub trait View {
    fn render(&self, builder: &mut SceneBuilder<'_>, transform: Affine, size: Size);
}

impl View for Color {
    fn render(&self, builder: &mut SceneBuilder<'_>, transform: Affine, size: Size) {
        builder.fill(Fill::NonZero, transform, *self, None, &size.to_rect());
    }
}

/// A scratch card placed in a window: covered by `overlay`, hiding `content`.
pub struct ScratchCardView<C: View, O: View> {
    card: ScratchCard,
    origin: Point,
    content: C,
    overlay: O,
}

impl<C: View, O: View> ScratchCardView<C, O> {
    pub fn new(
        cursor_size: f64,
        size: impl Into<Size>,
        on_finish: Binding<bool>,
        content: impl FnOnce() -> C,
        overlay: impl FnOnce() -> O,
    ) -> Self {
        Self::with_config(
            ScratchCardConfig::new(cursor_size, size),
            on_finish,
            content,
            overlay,
        )
    }

    pub fn with_config(
        config: ScratchCardConfig,
        on_finish: Binding<bool>,
        content: impl FnOnce() -> C,
        overlay: impl FnOnce() -> O,
    ) -> Self {
        Self {
            card: ScratchCard::new(config, on_finish),
            origin: Point::ZERO,
            content: content(),
            overlay: overlay(),
        }
    }

    pub fn at(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn card(&self) -> &ScratchCard {
        &self.card
    }

    pub fn card_mut(&mut self) -> &mut ScratchCard {
        &mut self.card
    }

    /// Bounds in window coordinates.
    pub fn frame(&self) -> Rect {
        self.card.config().bounds() + self.origin.to_vec2()
    }

    /// Feeds window-space pointer input. Drags may only start inside the card.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        let offset = self.origin.to_vec2();
        let local = match event {
            PointerEvent::Down { id, location } => {
                if !self.frame().contains(location) {
                    return;
                }
                PointerEvent::Down {
                    id,
                    location: location - offset,
                }
            }
            PointerEvent::Moved { id, location } => PointerEvent::Moved {
                id,
                location: location - offset,
            },
            PointerEvent::Up { id, location } => PointerEvent::Up {
                id,
                location: location - offset,
            },
            PointerEvent::Cancelled { id } => PointerEvent::Cancelled { id },
        };
        self.card.handle_pointer(local);
    }

    pub fn render(&self, builder: &mut SceneBuilder<'_>, root: Affine, now: Instant) {
        let transform = root * Affine::translate(self.origin.to_vec2());
        let size = self.card.config().size;
        let bounds = size.to_rect();

        builder.push_layer(
            Mix::Clip,
            1.0,
            transform,
            &RoundedRect::from_rect(bounds, CORNER_RADIUS),
        );

        let overlay_opacity = self.card.overlay_opacity(now);
        if overlay_opacity > 0.0 {
            builder.push_layer(Mix::Normal, overlay_opacity as f32, transform, &bounds);
            self.overlay.render(builder, transform, size);
            builder.pop_layer();
        }

        let mask = self.card.mask(now);
        if !mask.is_empty() {
            builder.push_layer(Mix::Normal, 1.0, transform, &bounds);
            self.content.render(builder, transform, size);
            builder.push_layer(
                BlendMode::new(Mix::Normal, Compose::DestIn),
                1.0,
                transform,
                &bounds,
            );
            for layer in &mask {
                render_mask_layer(builder, transform, layer);
            }
            builder.pop_layer();
            builder.pop_layer();
        }

        builder.pop_layer();
    }
}

fn render_mask_layer(builder: &mut SceneBuilder<'_>, transform: Affine, layer: &MaskLayer) {
    let brush = Color::WHITE.with_alpha_factor(layer.alpha as f32);
    match &layer.shape {
        MaskShape::Stroke { path, width } => {
            let style = Stroke::new(*width as f32)
                .with_caps(Cap::Round)
                .with_join(Join::Round);
            builder.stroke(&style, transform, brush, None, path);
        }
        MaskShape::Full(rect) => builder.fill(Fill::NonZero, transform, brush, None, rect),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed_view() -> ScratchCardView<Color, Color> {
        ScratchCardView::with_config(
            ScratchCardConfig::new(20.0, (100.0, 100.0)).with_minimum_distance(0.0),
            Binding::new(false),
            || Color::BLACK,
            || Color::WHITE,
        )
        .at(Point::new(50.0, 30.0))
    }

    #[test]
    fn frame_is_offset_by_origin() {
        assert_eq!(placed_view().frame(), Rect::new(50.0, 30.0, 150.0, 130.0));
    }

    #[test]
    fn window_points_land_in_card_space() {
        let mut view = placed_view();
        view.handle_pointer(PointerEvent::Down {
            id: 1,
            location: Point::new(60.0, 40.0),
        });
        view.handle_pointer(PointerEvent::Moved {
            id: 1,
            location: Point::new(70.0, 50.0),
        });
        // drags may leave the frame once started
        view.handle_pointer(PointerEvent::Moved {
            id: 1,
            location: Point::new(200.0, 10.0),
        });
        view.card_mut().process_activations(Instant::now());

        assert_eq!(
            view.card().points(),
            &[Point::new(20.0, 20.0), Point::new(150.0, -20.0)]
        );
        assert_eq!(view.card().starting_point(), Some(Point::new(20.0, 20.0)));
    }

    #[test]
    fn press_outside_frame_is_ignored() {
        let mut view = placed_view();
        view.handle_pointer(PointerEvent::Down {
            id: 1,
            location: Point::new(10.0, 10.0),
        });
        view.handle_pointer(PointerEvent::Moved {
            id: 1,
            location: Point::new(80.0, 80.0),
        });
        view.handle_pointer(PointerEvent::Up {
            id: 1,
            location: Point::new(80.0, 80.0),
        });

        assert_eq!(view.card().pending_activations(), 0);
        assert!(view.card().points().is_empty());
    }
}
