/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::Instant;

use log::{error, warn};
use vello::{
    kurbo::Affine,
    peniko::Color,
    util::RenderContext,
    RendererOptions, Scene, SceneBuilder,
};
use winit::{
    dpi::LogicalSize,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use pollster::FutureExt;

use crate::interaction::{Interaction, PointerTracker};

mod error;
pub mod interaction;
pub mod view;

pub use crate::error::Error;
pub use crate::view::{ScratchCardView, View};

pub fn run<C, O>(mut view: ScratchCardView<C, O>, title: &str, size: LogicalSize<f64>) -> Result<(), Error>
where
    C: View + 'static,
    O: View + 'static,
{
    let event_loop = EventLoop::new().map_err(|e| Error::EventLoop(e.to_string()))?;

    let window = WindowBuilder::new()
        .with_title(title)
        .with_inner_size(size)
        .build(&event_loop)
        .map_err(|e| Error::Window(e.to_string()))?;

    let mut physical = window.inner_size();
    let mut context = RenderContext::new().map_err(|e| Error::Context(e.to_string()))?;
    let device_id = context.device(None).block_on().ok_or(Error::NoDevice)?;
    let mut surface = context
        .create_surface(&window, physical.width, physical.height)
        .block_on()
        .map_err(|e| Error::Surface(e.to_string()))?;
    let mut renderer = {
        let device_handle = &mut context.devices[device_id];
        vello::Renderer::new(
            &device_handle.device,
            &RendererOptions {
                surface_format: Some(surface.format),
                timestamp_period: device_handle.queue.get_timestamp_period(),
            },
        )
        .map_err(|e| Error::Renderer(e.to_string()))?
    };

    let mut tracker = PointerTracker::new(window.scale_factor());

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Wait);

            match event {
                Event::WindowEvent { event, window_id } if window_id == window.id() => match event {
                    WindowEvent::Resized(s) => {
                        physical = s;
                        context.resize_surface(&mut surface, physical.width, physical.height);
                        window.request_redraw();
                    }
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::RedrawRequested => {
                        let now = Instant::now();
                        view.card_mut().update(now);

                        let mut scene = Scene::new();
                        {
                            let mut builder = SceneBuilder::for_scene(&mut scene);
                            view.render(&mut builder, Affine::scale(window.scale_factor()), now);
                        }

                        let device_handle = &context.devices[surface.dev_id];
                        let render_params = vello::RenderParams {
                            base_color: Color::WHITE,
                            width: physical.width,
                            height: physical.height,
                        };

                        let surface_texture = match surface.surface.get_current_texture() {
                            Ok(texture) => texture,
                            Err(e) => {
                                warn!("failed to get surface texture: {e}");
                                return;
                            }
                        };

                        if let Err(e) = vello::block_on_wgpu(
                            &device_handle.device,
                            renderer.render_to_surface_async(
                                &device_handle.device,
                                &device_handle.queue,
                                &scene,
                                &surface_texture,
                                &render_params,
                            ),
                        ) {
                            error!("failed to render to surface: {e}");
                        }

                        surface_texture.present();
                        device_handle.device.poll(wgpu::Maintain::Poll);

                        if view.card().is_animating(Instant::now()) {
                            window.request_redraw();
                        }
                    }
                    event => match tracker.handle(&event) {
                        Some(Interaction::Pointer(pointer)) => view.handle_pointer(pointer),
                        Some(Interaction::Reset) => {
                            view.card_mut().reset(Instant::now());
                            window.request_redraw();
                        }
                        None => (),
                    },
                },
                Event::AboutToWait => {
                    let now = Instant::now();
                    view.card_mut().update(now);
                    if view.card_mut().process_activations(now) > 0 {
                        window.request_redraw();
                    }
                    if view.card().is_animating(now) {
                        window.request_redraw();
                    }
                }
                _ => (),
            }
        })
        .map_err(|e| Error::EventLoop(e.to_string()))
}
