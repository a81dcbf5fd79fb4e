/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::f64::consts::PI;

use log::{error, info};
use scratchcard_core::{
    kurbo::{BezPath, Point, Size, Vec2},
    Binding,
};
use scratchcard_ui::{ScratchCardView, View};
use vello::{
    kurbo::{Affine, Line},
    peniko::{Color, Fill, Stroke},
    SceneBuilder,
};
use winit::dpi::LogicalSize;

struct Foil;

impl View for Foil {
    fn render(&self, builder: &mut SceneBuilder<'_>, transform: Affine, size: Size) {
        builder.fill(
            Fill::NonZero,
            transform,
            Color::rgb8(0xb8, 0xbc, 0xc4),
            None,
            &size.to_rect(),
        );
        let stripe = Stroke::new(6.0);
        let mut x = -size.height;
        while x < size.width {
            let line = Line::new((x, size.height), (x + size.height, 0.0));
            builder.stroke(&stripe, transform, Color::rgb8(0xa4, 0xa8, 0xb0), None, &line);
            x += 24.0;
        }
    }
}

struct Prize;

impl View for Prize {
    fn render(&self, builder: &mut SceneBuilder<'_>, transform: Affine, size: Size) {
        builder.fill(
            Fill::NonZero,
            transform,
            Color::rgb8(0xff, 0xd7, 0x40),
            None,
            &size.to_rect(),
        );
        let center = Point::new(size.width / 2.0, size.height / 2.0);
        let radius = size.width.min(size.height) * 0.35;
        builder.fill(
            Fill::NonZero,
            transform,
            Color::rgb8(0xe0, 0x40, 0x30),
            None,
            &star(center, radius, radius * 0.45),
        );
    }
}

fn star(center: Point, outer: f64, inner: f64) -> BezPath {
    let mut path = BezPath::new();
    for i in 0..10 {
        let r = if i % 2 == 0 { outer } else { inner };
        let angle = PI * i as f64 / 5.0 - PI / 2.0;
        let p = center + Vec2::new(r * angle.cos(), r * angle.sin());
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path.close_path();
    path
}

fn main() {
    pretty_env_logger::init();

    let window = LogicalSize::new(512.0, 512.0);
    let card = Size::new(300.0, 200.0);

    let revealed = Binding::new(false);
    let mut view = ScratchCardView::new(40.0, card, revealed, || Prize, || Foil).at(Point::new(
        (window.width - card.width) / 2.0,
        (window.height - card.height) / 2.0,
    ));
    view.card_mut()
        .on_reveal(|| info!("prize uncovered, right click to cover it again"));

    if let Err(e) = scratchcard_ui::run(view, "Scratch card", window) {
        error!("{e}");
        std::process::exit(1);
    }
}
