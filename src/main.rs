mod app;
mod config;
mod content;
mod features;
mod gfx;
mod layout;
mod motion;
mod wayland;

use anyhow::{Context, Result};
use app::{App, Effect};
use config::Config;
use content::Portfolio;
use gfx::{draw::DrawContext, gl::load_ui_program};
use log::{info, warn};
use std::process::Command;
use std::time::{Duration, Instant};
use time::OffsetDateTime;
use wayland::egl::EglContext;
use wayland::WaylandState;
use wayland_client::{Connection, Proxy};

fn main() -> Result<()> {
    env_logger::init();
    info!("Starting folio");

    let config = Config::load().unwrap_or_else(|e| {
        warn!("Using default config: {:#}", e);
        Config::default()
    });
    let content_path = config.content_path();
    let content = Portfolio::load(content_path.as_deref()).unwrap_or_else(|e| {
        warn!("Using built-in content: {:#}", e);
        Portfolio::default()
    });
    let fps_cap = config.fps_cap.max(1);
    let mut app = App::new(config, content);

    info!("Connecting to Wayland");
    let conn = Connection::connect_to_env().context("connecting to the Wayland display")?;
    let display = conn.display();
    let mut event_queue = conn.new_event_queue();
    let qh = event_queue.handle();
    let _registry = display.get_registry(&qh, ());

    let mut state = WaylandState::new();
    event_queue.roundtrip(&mut state)?;
    state.create_layer_surface(&qh)?;

    while !state.configured {
        event_queue.blocking_dispatch(&mut state)?;
    }

    let display_ptr = display.id().as_ptr() as *mut _;
    let mut egl = EglContext::new(display_ptr)?;
    let surface = state
        .surface
        .clone()
        .context("layer surface vanished before configure")?;
    egl.create_surface(&surface, state.size[0] as i32, state.size[1] as i32)?;

    let gl = unsafe { glow::Context::from_loader_function(|s| egl.get_proc_address(s)) };
    let program = load_ui_program(&gl)?;
    let mut draw = DrawContext::new(gl, program)?;
    let features = features::stack(0x5eed);
    info!(
        "Renderers: {}",
        features.iter().map(|f| f.name()).collect::<Vec<_>>().join(", ")
    );

    let year = OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .year();
    let frame_budget = Duration::from_secs_f32(1.0 / fps_cap as f32);
    let mut last_frame = Instant::now();
    let mut egl_size = state.size;

    while state.running && app.running {
        // sync with the compositor so input queued since the last frame is read
        event_queue.roundtrip(&mut state)?;

        for ev in state.pending_events.drain(..) {
            app.handle_event(ev);
        }
        for effect in app.take_effects() {
            run_effect(effect);
        }

        if state.size != egl_size {
            egl.resize(state.size[0] as i32, state.size[1] as i32);
            egl_size = state.size;
        }

        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;
        app.update(dt);

        egl.make_current()?;
        app.render(&mut draw, &features, year);
        egl.swap_buffers()?;
        surface.commit();

        let spent = now.elapsed();
        if spent < frame_budget {
            std::thread::sleep(frame_budget - spent);
        }
    }

    info!("Shutting down");
    // GL objects go before the context that owns them
    drop(draw);
    drop(egl);
    if let Some(layer) = state.layer_surface.take() {
        layer.destroy();
    }
    surface.destroy();
    conn.flush()?;
    Ok(())
}

fn run_effect(effect: Effect) {
    match effect {
        Effect::OpenUrl(url) => {
            info!("Opening {}", url);
            if let Err(e) = Command::new("xdg-open").arg(&url).spawn() {
                warn!("Could not open {}: {}", url, e);
            }
        }
    }
}
