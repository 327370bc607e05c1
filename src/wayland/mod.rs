pub mod egl;

use crate::app::{Key, UiEvent};
use crate::gfx::math::Vec2;
use anyhow::{anyhow, Result};
use log::{debug, info, warn};
use wayland_client::{
    protocol::{wl_compositor, wl_keyboard, wl_output, wl_pointer, wl_registry, wl_seat, wl_surface},
    Connection, Dispatch, QueueHandle, WEnum,
};
use wayland_protocols_wlr::layer_shell::v1::client::{zwlr_layer_shell_v1, zwlr_layer_surface_v1};
use xkbcommon::xkb::{self, keysyms};

pub struct WaylandState {
    pub running: bool,
    pub configured: bool,
    /// Last size from the layer surface configure.
    pub size: [u32; 2],
    pub compositor: Option<wl_compositor::WlCompositor>,
    pub layer_shell: Option<zwlr_layer_shell_v1::ZwlrLayerShellV1>,
    pub surface: Option<wl_surface::WlSurface>,
    pub layer_surface: Option<zwlr_layer_surface_v1::ZwlrLayerSurfaceV1>,
    pub seat: Option<wl_seat::WlSeat>,
    pub output: Option<wl_output::WlOutput>,
    pub output_size: Option<[u32; 2]>,
    pub pointer: Option<wl_pointer::WlPointer>,
    pub keyboard: Option<wl_keyboard::WlKeyboard>,
    pub surface_pos: Vec2,
    pub pending_events: Vec<UiEvent>,
    xkb_context: xkb::Context,
    xkb_state: Option<xkb::State>,
}

impl WaylandState {
    pub fn new() -> Self {
        Self {
            running: true,
            configured: false,
            size: [0, 0],
            compositor: None,
            layer_shell: None,
            surface: None,
            layer_surface: None,
            seat: None,
            output: None,
            output_size: None,
            pointer: None,
            keyboard: None,
            surface_pos: Vec2::ZERO,
            pending_events: Vec::new(),
            xkb_context: xkb::Context::new(xkb::CONTEXT_NO_FLAGS),
            xkb_state: None,
        }
    }

    /// Creates the page surface covering the whole output, with keyboard
    /// focus so scrolling and quit keys work.
    pub fn create_layer_surface(&mut self, qh: &QueueHandle<Self>) -> Result<()> {
        let compositor = self
            .compositor
            .as_ref()
            .ok_or_else(|| anyhow!("Compositor does not advertise wl_compositor"))?;
        let layer_shell = self
            .layer_shell
            .as_ref()
            .ok_or_else(|| anyhow!("Compositor does not support zwlr_layer_shell_v1"))?;

        let surface = compositor.create_surface(qh, ());
        let layer_surface = layer_shell.get_layer_surface(
            &surface,
            self.output.as_ref(),
            zwlr_layer_shell_v1::Layer::Overlay,
            "folio".to_string(),
            qh,
            (),
        );
        layer_surface.set_anchor(
            zwlr_layer_surface_v1::Anchor::Top
                | zwlr_layer_surface_v1::Anchor::Bottom
                | zwlr_layer_surface_v1::Anchor::Left
                | zwlr_layer_surface_v1::Anchor::Right,
        );
        layer_surface.set_exclusive_zone(-1);
        layer_surface.set_size(0, 0);
        layer_surface.set_keyboard_interactivity(zwlr_layer_surface_v1::KeyboardInteractivity::Exclusive);
        surface.commit();

        self.surface = Some(surface);
        self.layer_surface = Some(layer_surface);
        Ok(())
    }

    fn push(&mut self, event: UiEvent) {
        self.pending_events.push(event);
    }
}

impl Default for WaylandState {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps an xkb keysym to the keys the page understands.
pub fn map_keysym(sym: u32) -> Option<Key> {
    match sym {
        keysyms::KEY_Up | keysyms::KEY_k => Some(Key::Up),
        keysyms::KEY_Down | keysyms::KEY_j => Some(Key::Down),
        keysyms::KEY_Page_Up => Some(Key::PageUp),
        keysyms::KEY_Page_Down => Some(Key::PageDown),
        keysyms::KEY_space => Some(Key::Space),
        keysyms::KEY_Home => Some(Key::Home),
        keysyms::KEY_End => Some(Key::End),
        keysyms::KEY_Escape => Some(Key::Escape),
        keysyms::KEY_q => Some(Key::Quit),
        _ => None,
    }
}

impl Dispatch<wl_registry::WlRegistry, ()> for WaylandState {
    fn event(
        state: &mut Self,
        registry: &wl_registry::WlRegistry,
        event: wl_registry::Event,
        _: &(),
        _: &Connection,
        qh: &QueueHandle<Self>,
    ) {
        if let wl_registry::Event::Global {
            name,
            interface,
            version,
        } = event
        {
            match &interface[..] {
                "wl_compositor" => {
                    state.compositor =
                        Some(registry.bind::<wl_compositor::WlCompositor, _, _>(name, version.min(4), qh, ()));
                }
                "zwlr_layer_shell_v1" => {
                    state.layer_shell = Some(registry.bind::<zwlr_layer_shell_v1::ZwlrLayerShellV1, _, _>(
                        name,
                        version.min(4),
                        qh,
                        (),
                    ));
                }
                "wl_seat" => {
                    state.seat = Some(registry.bind::<wl_seat::WlSeat, _, _>(name, version.min(5), qh, ()));
                }
                "wl_output" if state.output.is_none() => {
                    state.output = Some(registry.bind::<wl_output::WlOutput, _, _>(name, version.min(2), qh, ()));
                }
                _ => {}
            }
        }
    }
}

impl Dispatch<wl_compositor::WlCompositor, ()> for WaylandState {
    fn event(_: &mut Self, _: &wl_compositor::WlCompositor, _: wl_compositor::Event, _: &(), _: &Connection, _: &QueueHandle<Self>) {}
}

impl Dispatch<wl_surface::WlSurface, ()> for WaylandState {
    fn event(_: &mut Self, _: &wl_surface::WlSurface, _: wl_surface::Event, _: &(), _: &Connection, _: &QueueHandle<Self>) {}
}

impl Dispatch<wl_pointer::WlPointer, ()> for WaylandState {
    fn event(
        state: &mut Self,
        pointer: &wl_pointer::WlPointer,
        event: wl_pointer::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
        match event {
            wl_pointer::Event::Enter {
                serial,
                surface_x,
                surface_y,
                ..
            } => {
                // the page draws its own cursor
                pointer.set_cursor(serial, None, 0, 0);
                state.surface_pos = Vec2::new(surface_x as f32, surface_y as f32);
                state.push(UiEvent::PointerEnter { pos: state.surface_pos });
            }
            wl_pointer::Event::Leave { .. } => {
                state.push(UiEvent::PointerLeave);
            }
            wl_pointer::Event::Motion { surface_x, surface_y, .. } => {
                state.surface_pos = Vec2::new(surface_x as f32, surface_y as f32);
                state.push(UiEvent::PointerMove { pos: state.surface_pos });
            }
            wl_pointer::Event::Button {
                button,
                state: btn_state,
                ..
            } => {
                let ev = match btn_state {
                    WEnum::Value(wl_pointer::ButtonState::Pressed) => UiEvent::PointerDown {
                        pos: state.surface_pos,
                        button,
                    },
                    WEnum::Value(wl_pointer::ButtonState::Released) => UiEvent::PointerUp,
                    _ => return,
                };
                state.push(ev);
            }
            wl_pointer::Event::Axis { axis, value, .. } => {
                // positive is downward
                if let WEnum::Value(wl_pointer::Axis::VerticalScroll) = axis {
                    state.push(UiEvent::Scroll { delta: value as f32 });
                }
            }
            _ => {}
        }
    }
}

impl Dispatch<wl_seat::WlSeat, ()> for WaylandState {
    fn event(
        state: &mut Self,
        seat: &wl_seat::WlSeat,
        event: wl_seat::Event,
        _: &(),
        _: &Connection,
        qh: &QueueHandle<Self>,
    ) {
        if let wl_seat::Event::Capabilities {
            capabilities: WEnum::Value(caps),
        } = event
        {
            if caps.contains(wl_seat::Capability::Pointer) && state.pointer.is_none() {
                state.pointer = Some(seat.get_pointer(qh, ()));
            }
            if caps.contains(wl_seat::Capability::Keyboard) && state.keyboard.is_none() {
                state.keyboard = Some(seat.get_keyboard(qh, ()));
            }
        }
    }
}

impl Dispatch<wl_keyboard::WlKeyboard, ()> for WaylandState {
    fn event(
        state: &mut Self,
        _: &wl_keyboard::WlKeyboard,
        event: wl_keyboard::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
        match event {
            wl_keyboard::Event::Keymap { format, fd, size } => {
                if format != WEnum::Value(wl_keyboard::KeymapFormat::XkbV1) {
                    warn!("Unsupported keymap format {:?}", format);
                    return;
                }
                let keymap = unsafe {
                    xkb::Keymap::new_from_fd(
                        &state.xkb_context,
                        fd,
                        size as usize,
                        xkb::KEYMAP_FORMAT_TEXT_V1,
                        xkb::KEYMAP_COMPILE_NO_FLAGS,
                    )
                };
                match keymap {
                    Ok(Some(keymap)) => {
                        state.xkb_state = Some(xkb::State::new(&keymap));
                        debug!("Keymap loaded");
                    }
                    Ok(None) => warn!("Compositor sent an unparsable keymap"),
                    Err(e) => warn!("Could not read keymap: {}", e),
                }
            }
            wl_keyboard::Event::Modifiers {
                mods_depressed,
                mods_latched,
                mods_locked,
                group,
                ..
            } => {
                if let Some(xkb_state) = state.xkb_state.as_mut() {
                    xkb_state.update_mask(mods_depressed, mods_latched, mods_locked, 0, 0, group);
                }
            }
            wl_keyboard::Event::Key {
                key,
                state: WEnum::Value(wl_keyboard::KeyState::Pressed),
                ..
            } => {
                let Some(xkb_state) = state.xkb_state.as_ref() else {
                    return;
                };
                // evdev to xkb keycode
                let sym = xkb_state.key_get_one_sym(xkb::Keycode::new(key + 8));
                if let Some(key) = map_keysym(sym.raw()) {
                    state.push(UiEvent::Key(key));
                }
            }
            _ => {}
        }
    }
}

impl Dispatch<wl_output::WlOutput, ()> for WaylandState {
    fn event(
        state: &mut Self,
        _: &wl_output::WlOutput,
        event: wl_output::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
        if let wl_output::Event::Mode { width, height, .. } = event {
            state.output_size = Some([width as u32, height as u32]);
        }
    }
}

impl Dispatch<zwlr_layer_shell_v1::ZwlrLayerShellV1, ()> for WaylandState {
    fn event(_: &mut Self, _: &zwlr_layer_shell_v1::ZwlrLayerShellV1, _: zwlr_layer_shell_v1::Event, _: &(), _: &Connection, _: &QueueHandle<Self>) {}
}

impl Dispatch<zwlr_layer_surface_v1::ZwlrLayerSurfaceV1, ()> for WaylandState {
    fn event(
        state: &mut Self,
        surface: &zwlr_layer_surface_v1::ZwlrLayerSurfaceV1,
        event: zwlr_layer_surface_v1::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
        match event {
            zwlr_layer_surface_v1::Event::Configure { serial, width, height } => {
                surface.ack_configure(serial);
                // 0 means "your choice"; fall back to the output mode
                let size = if width > 0 && height > 0 {
                    [width, height]
                } else {
                    state.output_size.unwrap_or([1920, 1080])
                };
                if size != state.size || !state.configured {
                    info!("Layer surface configured: {}x{}", size[0], size[1]);
                    state.size = size;
                    state.push(UiEvent::Resize {
                        width: size[0],
                        height: size[1],
                    });
                }
                state.configured = true;
            }
            zwlr_layer_surface_v1::Event::Closed => {
                info!("Layer surface closed by compositor");
                state.running = false;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(keysyms::KEY_Escape, Some(Key::Escape))]
    #[case(keysyms::KEY_q, Some(Key::Quit))]
    #[case(keysyms::KEY_Page_Down, Some(Key::PageDown))]
    #[case(keysyms::KEY_space, Some(Key::Space))]
    #[case(keysyms::KEY_j, Some(Key::Down))]
    #[case(keysyms::KEY_a, None)]
    fn keysyms_map_to_page_keys(#[case] sym: u32, #[case] key: Option<Key>) {
        assert_eq!(map_keysym(sym), key);
    }
}
