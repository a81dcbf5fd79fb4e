/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt::{self, Display};

/// Failures while bringing up the window and the GPU renderer.
#[derive(Debug)]
pub enum Error {
    EventLoop(String),
    Window(String),
    Context(String),
    NoDevice,
    Surface(String),
    Renderer(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EventLoop(s) => write!(f, "event loop error: {s}"),
            Error::Window(s) => write!(f, "window creation failed: {s}"),
            Error::Context(s) => write!(f, "render context error: {s}"),
            Error::NoDevice => write!(f, "no compatible GPU device found"),
            Error::Surface(s) => write!(f, "surface creation failed: {s}"),
            Error::Renderer(s) => write!(f, "renderer creation failed: {s}"),
        }
    }
}

impl std::error::Error for Error {}
