/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

pub mod animation;
pub mod binding;
mod card;
pub mod dispatch;
pub mod gesture;
pub mod mask;

pub use kurbo;

pub use crate::binding::Binding;
pub use crate::card::{MaskLayer, MaskShape, Phase, ScratchCard, ScratchCardConfig};
pub use crate::gesture::{DragValue, Gesture, PointerEvent};
pub use crate::mask::ScratchMask;
