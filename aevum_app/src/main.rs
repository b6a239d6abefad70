// Copyright 2025 the Aevum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interactive civilization prosperity dashboard.
//!
//! The shell loads the dataset once at startup, then drives the pure frame
//! builder from window events: resize re-arranges layout, pointer movement
//! maps to hover highlight + tooltips, clicks hit the side-panel toggles.
//! Frames are reconciled through `aevum_core::Scene`, so only changed marks
//! are re-uploaded to the renderer's retained store.

mod store;
mod svg;
mod text;

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use kurbo::{Affine, Point, Rect, Stroke};
use peniko::Brush;
use peniko::color::palette::css;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vello::peniko::Fill;
use vello::util::{RenderContext, RenderSurface};
use vello::{AaConfig, AaSupport, RenderParams, Renderer, RendererOptions, Scene as VelloScene};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use aevum_charts::Size;
use aevum_core::{Mark, MarkId, MarkPayload, Scene, TextAnchor, TextBaseline};
use aevum_dashboard::{Dashboard, Frame, InteractionEvent, InteractionState, PanelAction};
use aevum_data::{DatasetError, load_csv_path, normalize};

use store::MarkStore;
use text::{ParleyTextMeasurer, TextEngine};

const SVG_DUMP_PATH: &str = "aevum_frame.svg";
const ID_MESSAGE: u64 = 0x90_000;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Interactive chart of historical civilizations' prosperity over time"
)]
struct Cli {
    /// Dataset path (CSV with a header row).
    #[arg(short, long, default_value = "data/civilizations.csv")]
    data: PathBuf,
}

/// What the window shows: the dashboard, or a full-screen error.
enum Content {
    Dashboard(Box<Dashboard>),
    Error {
        heading: String,
        lines: Vec<String>,
    },
}

struct App {
    content: Content,
    state: InteractionState,
    frame: Option<Frame>,
    cursor: Option<Point>,

    window: Option<Arc<Window>>,
    window_id: Option<WindowId>,
    render_cx: RenderContext,
    surface: Option<RenderSurface<'static>>,
    renderer: Option<Renderer>,
    vello_scene: VelloScene,

    scene: Scene,
    store: MarkStore,
    text: TextEngine,
    measurer: ParleyTextMeasurer,
}

impl App {
    fn new(content: Content, state: InteractionState) -> Self {
        Self {
            content,
            state,
            frame: None,
            cursor: None,
            window: None,
            window_id: None,
            render_cx: RenderContext::new(),
            surface: None,
            renderer: None,
            vello_scene: VelloScene::new(),
            scene: Scene::new(),
            store: MarkStore::default(),
            text: TextEngine::new(),
            measurer: ParleyTextMeasurer::new(),
        }
    }

    fn view_size(&self) -> Size {
        match self.surface.as_ref() {
            Some(surface) => Size {
                width: f64::from(surface.config.width.max(1)),
                height: f64::from(surface.config.height.max(1)),
            },
            None => Size {
                width: 1400.0,
                height: 900.0,
            },
        }
    }

    fn view_rect(&self) -> Rect {
        let size = self.view_size();
        Rect::new(0.0, 0.0, size.width, size.height)
    }

    /// Rebuilds the frame from current content/state and reconciles it.
    fn rebuild_frame(&mut self) {
        let view = self.view_size();
        let marks = match &self.content {
            Content::Dashboard(dashboard) if !dashboard.is_empty() => {
                let frame = dashboard.build_frame(view, &self.state, &self.measurer);
                let marks = frame.marks.clone();
                self.frame = Some(frame);
                marks
            }
            Content::Dashboard(_) => {
                self.frame = None;
                message_marks(view, "Loading data...", &[])
            }
            Content::Error { heading, lines } => {
                self.frame = None;
                message_marks(view, heading, lines)
            }
        };

        let diffs = self.scene.tick(marks);
        self.store.apply_diffs(&diffs);
        self.repaint();
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    /// Repaints the retained store into the Vello scene.
    fn repaint(&mut self) {
        self.vello_scene.reset();
        for snapshot in self.store.sorted() {
            match &snapshot.payload {
                MarkPayload::Rect(r) => {
                    if brush_is_transparent(&r.fill) {
                        continue;
                    }
                    self.vello_scene
                        .fill(Fill::NonZero, Affine::IDENTITY, &r.fill, None, &r.rect);
                }
                MarkPayload::Path(p) => {
                    if !brush_is_transparent(&p.fill) {
                        self.vello_scene.fill(
                            Fill::NonZero,
                            Affine::IDENTITY,
                            &p.fill,
                            None,
                            &p.path,
                        );
                    }
                    if p.stroke_width > 0.0 && !brush_is_transparent(&p.stroke) {
                        let mut stroke = Stroke::new(p.stroke_width);
                        if !p.dash_pattern.is_empty() {
                            stroke = stroke.with_dashes(0.0, p.dash_pattern.clone());
                        }
                        self.vello_scene.stroke(
                            &stroke,
                            Affine::IDENTITY,
                            &p.stroke,
                            None,
                            &p.path,
                        );
                    }
                }
                MarkPayload::Text(t) => {
                    if brush_is_transparent(&t.fill) {
                        continue;
                    }
                    self.text.draw(&mut self.vello_scene, Affine::IDENTITY, t);
                }
            }
        }
    }

    /// Applies one interaction event; rebuilds only when the state changed.
    fn dispatch(&mut self, event: InteractionEvent) {
        let next = match (&self.content, &self.frame) {
            (Content::Dashboard(dashboard), Some(frame)) => self.state.apply(
                &event,
                dashboard.records(),
                dashboard.entities(),
                &frame.scales,
            ),
            _ => return,
        };
        if next != self.state {
            self.state = next;
            self.rebuild_frame();
        }
    }

    fn handle_cursor_moved(&mut self, p: Point) {
        self.cursor = Some(p);
        let hovered: Option<String> = self
            .frame
            .as_ref()
            .and_then(|f| f.hover_at(p))
            .map(str::to_owned);
        if hovered == self.state.highlighted {
            return;
        }
        match hovered {
            Some(entity) => self.dispatch(InteractionEvent::HoverEnter(entity)),
            None => self.dispatch(InteractionEvent::HoverLeave),
        }
    }

    fn handle_click(&mut self) {
        let Some(p) = self.cursor else {
            return;
        };
        let action = self
            .frame
            .as_ref()
            .and_then(|f| f.click_at(p))
            .cloned();
        let Some(action) = action else {
            return;
        };
        let event = match action {
            PanelAction::Toggle(entity) => InteractionEvent::Toggle(entity),
            PanelAction::ShowAll => InteractionEvent::ShowAll,
            PanelAction::HideAll => InteractionEvent::HideAll,
        };
        self.dispatch(event);
    }

    fn dump_svg(&self) {
        let svg = svg::to_svg_string(&self.store.sorted(), self.view_rect());
        match std::fs::write(SVG_DUMP_PATH, svg) {
            Ok(()) => info!(path = SVG_DUMP_PATH, "wrote frame snapshot"),
            Err(err) => warn!(%err, "failed to write frame snapshot"),
        }
    }
}

fn brush_is_transparent(brush: &Brush) -> bool {
    match brush {
        Brush::Solid(c) => c.components[3] <= 0.0,
        _ => false,
    }
}

/// Full-screen message marks (load errors, empty dataset placeholder).
fn message_marks(view: Size, heading: &str, lines: &[String]) -> Vec<Mark> {
    let cx = 0.5 * view.width;
    let cy = 0.5 * view.height;
    let line_height = 18.0;
    let mut out = vec![
        Mark::text(
            MarkId::from_raw(ID_MESSAGE),
            Point::new(cx, cy - 0.5 * lines.len() as f64 * line_height - 24.0),
            heading,
            22.0,
        )
        .with_anchor(TextAnchor::Middle)
        .with_baseline(TextBaseline::Middle)
        .with_fill(css::BLACK),
    ];
    for (i, line) in lines.iter().enumerate() {
        out.push(
            Mark::text(
                MarkId::from_raw(ID_MESSAGE + 1 + i as u64),
                Point::new(
                    cx,
                    cy - 0.5 * lines.len() as f64 * line_height + i as f64 * line_height,
                ),
                line.clone(),
                12.0,
            )
            .with_anchor(TextAnchor::Middle)
            .with_baseline(TextBaseline::Middle)
            .with_fill(css::DARK_GRAY),
        );
    }
    out
}

fn error_content(err: &DatasetError) -> Content {
    let heading = match err {
        DatasetError::Io { .. } => "Failed to load data",
        DatasetError::Malformed(_) => "CSV parsing errors",
    };
    let lines = match err {
        DatasetError::Malformed(detail) => {
            detail.split("; ").map(str::to_owned).collect()
        }
        other => vec![other.to_string()],
    };
    Content::Error {
        heading: heading.to_owned(),
        lines,
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title("Aevum — civilization prosperity")
                        .with_inner_size(PhysicalSize::new(1400_u32, 900_u32)),
                )
                .expect("create window"),
        );
        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        let surface = pollster::block_on(self.render_cx.create_surface(
            window.clone(),
            width,
            height,
            wgpu::PresentMode::AutoVsync,
        ))
        .expect("create surface");

        let device_handle = &self.render_cx.devices[surface.dev_id];
        let renderer = Renderer::new(
            &device_handle.device,
            RendererOptions {
                antialiasing_support: AaSupport::all(),
                num_init_threads: NonZeroUsize::new(1),
                ..RendererOptions::default()
            },
        )
        .expect("create vello renderer");

        self.window_id = Some(window.id());
        self.window = Some(window);
        self.surface = Some(surface);
        self.renderer = Some(renderer);

        self.rebuild_frame();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if Some(id) != self.window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if width == 0 || height == 0 {
                    return;
                }
                if let Some(surface) = self.surface.as_mut() {
                    self.render_cx.resize_surface(surface, width, height);
                }
                // Same records and domains, new ranges.
                self.rebuild_frame();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Character(ref c),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } if c.as_str() == "s" => self.dump_svg(),
            WindowEvent::CursorMoved { position, .. } => {
                self.handle_cursor_moved(Point::new(position.x, position.y));
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.dispatch(InteractionEvent::HoverLeave);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.handle_click(),
            WindowEvent::RedrawRequested => {
                let Some(surface) = self.surface.as_mut() else {
                    return;
                };
                let Some(renderer) = self.renderer.as_mut() else {
                    return;
                };
                let device_handle = &self.render_cx.devices[surface.dev_id];

                let surface_texture = match surface.surface.get_current_texture() {
                    Ok(tex) => tex,
                    Err(_) => {
                        self.render_cx.resize_surface(
                            surface,
                            surface.config.width,
                            surface.config.height,
                        );
                        return;
                    }
                };
                let surface_view = surface_texture
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                renderer
                    .render_to_texture(
                        &device_handle.device,
                        &device_handle.queue,
                        &self.vello_scene,
                        &surface.target_view,
                        &RenderParams {
                            base_color: css::WHITE,
                            width: surface.config.width,
                            height: surface.config.height,
                            antialiasing_method: AaConfig::Msaa16,
                        },
                    )
                    .expect("render");

                let mut encoder =
                    device_handle
                        .device
                        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("blit"),
                        });
                surface.blitter.copy(
                    &device_handle.device,
                    &mut encoder,
                    &surface.target_view,
                    &surface_view,
                );
                device_handle.queue.submit([encoder.finish()]);
                surface_texture.present();
            }
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let (content, state) = match load_csv_path(&cli.data) {
        Ok(outcome) => {
            info!(
                rows = outcome.records.len(),
                dropped = outcome.warnings.len(),
                "dataset loaded"
            );
            let dashboard = Dashboard::new(normalize(&outcome.records), outcome.warnings);
            let state = dashboard.initial_state();
            (Content::Dashboard(Box::new(dashboard)), state)
        }
        Err(err) => {
            warn!(%err, "dataset load failed");
            (error_content(&err), InteractionState::default())
        }
    };

    let event_loop = EventLoop::new().context("create event loop")?;
    let mut app = App::new(content, state);
    event_loop.run_app(&mut app).context("run event loop")?;
    Ok(())
}
