// File: crates/window-demo/src/main.rs
// Summary: Windowed viewer: spinner while the feed loads, then the interactive streamgraph blitted (CPU) via winit + softbuffer.

use std::num::NonZeroU32;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use stream_core::feed::{fetch_records, read_records};
use stream_core::{theme, ChartEvent, Config, Dashboard, DoseRecord, RenderOptions, Scene, Spinner, Surface, Theme};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, MouseButton, MouseScrollDelta, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy};
use winit::window::WindowBuilder;

/// Spinner frame interval while loading.
const FRAME: Duration = Duration::from_millis(33);
/// Wheel notches are converted to pixel deltas like a browser does.
const LINE_HEIGHT_PX: f64 = 40.0;

#[derive(Debug, Parser)]
#[command(name = "dosestream-window", version, about = "Interactive vaccine dose streamgraph")]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    url: Option<String>,
    /// Read a local CSV instead of fetching
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    theme: Option<String>,
}

enum AppEvent {
    Loaded(Result<Vec<DoseRecord>>),
}

enum View {
    Loading { started: Instant },
    Ready(Dashboard),
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();
    let mut cfg = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(v) = &args.url { cfg.feed_url = v.clone(); }
    if let Some(v) = &args.location { cfg.location = v.clone(); }
    if let Some(v) = &args.theme { cfg.theme = v.clone(); }
    let theme = theme::find(&cfg.theme);

    let event_loop = EventLoopBuilder::<AppEvent>::with_user_event().build();
    let window = WindowBuilder::new()
        .with_title("Dose Stream")
        .with_inner_size(PhysicalSize::new(cfg.viewport_width, cfg.viewport_height))
        .build(&event_loop)
        .context("building window")?;

    let context = unsafe { softbuffer::Context::new(&window) }
        .map_err(|e| anyhow::anyhow!("softbuffer context: {e}"))?;
    let mut surface = unsafe { softbuffer::Surface::new(&context, &window) }
        .map_err(|e| anyhow::anyhow!("softbuffer surface: {e}"))?;

    spawn_loader(event_loop.create_proxy(), cfg.feed_url.clone(), args.input.clone());

    let spinner = Spinner::default();
    let mut view = View::Loading { started: Instant::now() };
    let mut size = window.inner_size();
    let mut cursor: Option<(f64, f64)> = None;
    let mut dragging = false;

    event_loop.run(move |event, _, cf| {
        match event {
            Event::UserEvent(AppEvent::Loaded(result)) => match result {
                Ok(records) => {
                    let surf = Surface::for_viewport(size.width, size.height, cfg.margin);
                    let dash = Dashboard::load(records, &cfg.location, surf, theme);
                    window.set_title(&title(&dash));
                    view = View::Ready(dash);
                    window.request_redraw();
                }
                // the spinner keeps running; there is no in-chart diagnostic
                Err(e) => error!(error = %format!("{e:#}"), "loading feed failed"),
            },
            Event::WindowEvent { event, .. } => {
                if let WindowEvent::CloseRequested = event {
                    *cf = ControlFlow::Exit;
                    return;
                }
                if let WindowEvent::Resized(new_size) = event {
                    size = new_size;
                }
                if let WindowEvent::CursorMoved { position, .. } = event {
                    cursor = Some((position.x, position.y));
                }
                if let View::Ready(dash) = &mut view {
                    if handle_window_event(dash, &event, cursor, &mut dragging) {
                        window.set_title(&title(dash));
                        window.request_redraw();
                    }
                }
            }
            Event::MainEventsCleared => match &view {
                View::Loading { .. } => {
                    window.request_redraw();
                    *cf = ControlFlow::WaitUntil(Instant::now() + FRAME);
                }
                View::Ready(_) => *cf = ControlFlow::Wait,
            },
            Event::RedrawRequested(_) => {
                let loading;
                let scene = match &view {
                    View::Loading { started } => {
                        let elapsed = started.elapsed().as_secs_f64();
                        let s = Surface::for_viewport(size.width, size.height, cfg.margin);
                        loading = spinner.scene(s.width, s.height, elapsed, &theme);
                        &loading
                    }
                    View::Ready(dash) => dash.context().scene(),
                };
                if let Err(e) = present(&mut surface, size, scene, &theme) {
                    error!(error = %format!("{e:#}"), "present failed");
                }
            }
            _ => {}
        }
    })
}

/// Load the dataset off the UI thread and hand it back through the event loop.
fn spawn_loader(proxy: EventLoopProxy<AppEvent>, url: String, input: Option<PathBuf>) {
    std::thread::spawn(move || {
        let result = match input {
            Some(path) => read_records(path),
            None => tokio::runtime::Runtime::new()
                .context("starting tokio runtime")
                .and_then(|rt| rt.block_on(fetch_records(&reqwest::Client::new(), &url))),
        };
        if proxy.send_event(AppEvent::Loaded(result)).is_err() {
            info!("window closed before the feed finished loading");
        }
    });
}

/// Map a window event onto the dashboard. Returns true when a redraw is needed.
fn handle_window_event(dash: &mut Dashboard, event: &WindowEvent, cursor: Option<(f64, f64)>, dragging: &mut bool) -> bool {
    match *event {
        WindowEvent::Resized(s) => {
            dash.dispatch(ChartEvent::Resized { viewport_width: s.width, viewport_height: s.height });
            true
        }
        WindowEvent::CursorMoved { position, .. } => {
            if *dragging {
                dash.dispatch(ChartEvent::DragMoved { x: position.x });
            }
            dash.dispatch(ChartEvent::PointerMoved { x: position.x, y: position.y });
            true
        }
        WindowEvent::CursorLeft { .. } => {
            dash.dispatch(ChartEvent::PointerLeft);
            true
        }
        WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
            *dragging = state == ElementState::Pressed;
            match (state, cursor) {
                (ElementState::Pressed, Some((x, _))) => dash.dispatch(ChartEvent::DragStarted { x }),
                (ElementState::Released, _) => dash.dispatch(ChartEvent::DragEnded),
                _ => {}
            }
            false
        }
        WindowEvent::MouseWheel { delta, .. } => {
            let Some((x, _)) = cursor else { return false };
            let delta_y = match delta {
                MouseScrollDelta::LineDelta(_, y) => -(y as f64) * LINE_HEIGHT_PX,
                MouseScrollDelta::PixelDelta(p) => -p.y,
            };
            dash.dispatch(ChartEvent::Wheel { x, delta_y });
            true
        }
        WindowEvent::ReceivedCharacter(c) if !c.is_control() => {
            dash.selector_mut().push_query(c);
            true
        }
        WindowEvent::KeyboardInput { input, .. } if input.state == ElementState::Pressed => {
            match input.virtual_keycode {
                Some(VirtualKeyCode::Down) | Some(VirtualKeyCode::Tab) => dash.step(true),
                Some(VirtualKeyCode::Up) => dash.step(false),
                Some(VirtualKeyCode::Back) => {
                    dash.selector_mut().pop_query();
                    true
                }
                Some(VirtualKeyCode::Escape) => {
                    dash.selector_mut().set_query("");
                    true
                }
                Some(VirtualKeyCode::Return) => {
                    let first = dash.selector().matches().first().map(|m| m.to_string());
                    match first {
                        Some(location) => {
                            dash.select(&location);
                            dash.selector_mut().set_query("");
                            true
                        }
                        None => false,
                    }
                }
                _ => false,
            }
        }
        _ => false,
    }
}

/// Window title doubles as the location selector readout.
fn title(dash: &Dashboard) -> String {
    let sel = dash.selector();
    if sel.query().is_empty() {
        format!("Dose Stream - {}", sel.value())
    } else {
        let matches = sel.matches();
        let shown: Vec<&str> = matches.iter().take(5).copied().collect();
        format!("Dose Stream - {} | search \"{}\": {}", sel.value(), sel.query(), shown.join(", "))
    }
}

fn present(
    surface: &mut softbuffer::Surface,
    size: PhysicalSize<u32>,
    scene: &Scene,
    theme: &Theme,
) -> Result<()> {
    let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
        return Ok(());
    };
    surface.resize(w, h).map_err(|e| anyhow::anyhow!("resize: {e}"))?;
    let (rgba, sw, sh, stride) = scene.render_to_rgba8(&RenderOptions::default())?;
    let mut frame = surface.buffer_mut().map_err(|e| anyhow::anyhow!("buffer: {e}"))?;
    let bg = theme.background;
    blit(
        &mut frame,
        size.width as usize,
        &rgba,
        (sw as usize, sh as usize, stride),
        pack(bg.r(), bg.g(), bg.b()),
    );
    frame.present().map_err(|e| anyhow::anyhow!("present: {e}"))?;
    Ok(())
}

/// Softbuffer pixel: `0RGB` in a u32.
fn pack(r: u8, g: u8, b: u8) -> u32 {
    (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// Copy an RGBA8 image into the top-left of a `frame_width`-wide frame; the rest gets `fill`.
fn blit(frame: &mut [u32], frame_width: usize, rgba: &[u8], (w, h, stride): (usize, usize, usize), fill: u32) {
    frame.fill(fill);
    if frame_width == 0 {
        return;
    }
    let rows = h.min(frame.len() / frame_width);
    let cols = w.min(frame_width);
    for y in 0..rows {
        let src = &rgba[y * stride..y * stride + cols * 4];
        let dst = &mut frame[y * frame_width..y * frame_width + cols];
        for (d, px) in dst.iter_mut().zip(src.chunks_exact(4)) {
            *d = pack(px[0], px[1], px[2]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blit_copies_into_top_left_and_fills_the_rest() {
        // 2x1 image into a 3x2 frame
        let rgba = [255, 0, 0, 255, 0, 0, 255, 255];
        let mut frame = vec![0u32; 6];
        blit(&mut frame, 3, &rgba, (2, 1, 8), 7);
        assert_eq!(frame, vec![0x00ff_0000, 0x0000_00ff, 7, 7, 7, 7]);
    }

    #[test]
    fn blit_crops_to_the_frame() {
        let rgba = [1u8; 4 * 4 * 4];
        let mut frame = vec![0u32; 2 * 2];
        blit(&mut frame, 2, &rgba, (4, 4, 16), 0);
        assert!(frame.iter().all(|&p| p == pack(1, 1, 1)));
    }
}
