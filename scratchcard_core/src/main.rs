/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::Instant;

use log::info;
use scratchcard_core::{kurbo::Point, Binding, PointerEvent, ScratchCard, ScratchCardConfig};

// Replays two scripted drags against a headless card.
fn main() {
    pretty_env_logger::init();

    let revealed = Binding::new(false);
    let mut card = ScratchCard::new(ScratchCardConfig::new(30.0, (100.0, 100.0)), revealed.clone());
    card.on_reveal(|| info!("scratch card uncovered"));

    fn scratch(card: &mut ScratchCard, points: &[(f64, f64)]) {
        let mut points = points.iter().map(|&(x, y)| Point::new(x, y));
        let Some(first) = points.next() else { return };
        card.handle_pointer(PointerEvent::Down { id: 0, location: first });
        let mut last = first;
        for location in points {
            card.handle_pointer(PointerEvent::Moved { id: 0, location });
            last = location;
        }
        card.handle_pointer(PointerEvent::Up { id: 0, location: last });
        let processed = card.process_activations(Instant::now());
        info!("processed {processed} gestures, revealed = {}", card.is_revealed());
    }

    scratch(&mut card, &[(20.0, 20.0), (50.0, 40.0), (80.0, 80.0)]);
    scratch(&mut card, &[(5.0, 5.0), (15.0, 15.0), (60.0, 40.0), (95.0, 95.0)]);

    revealed.set(false);
    card.update(Instant::now());
    info!("after reset: phase = {:?}", card.phase());
}
