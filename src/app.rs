use crate::config::{Config, Palette};
use crate::content::Portfolio;
use crate::features::{chat::ChatWidget, Feature, Scene};
use crate::gfx::{anim::Transition, draw::DrawContext, math::Vec2};
use crate::layout::{Action, LinkTarget, PageLayout, Role};
use crate::motion::{
    parallax::BackdropVisual,
    pointer::PointerTracker,
    scroll::{PageScroll, ScrollProgressMapper},
    tilt::CardTilt,
    timeline::{entry_style, TimelineRenderer},
    VisualState,
};
use log::{debug, info};

pub const BTN_LEFT: u32 = 0x110;

/// Keys the page reacts to, already resolved from the keymap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    PageUp,
    PageDown,
    Space,
    Home,
    End,
    Escape,
    Quit,
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    PointerEnter { pos: Vec2 },
    PointerLeave,
    PointerMove { pos: Vec2 },
    PointerDown { pos: Vec2, button: u32 },
    PointerUp,
    /// Vertical wheel axis value, positive downward.
    Scroll { delta: f32 },
    Key(Key),
    Resize { width: u32, height: u32 },
}

/// Work the shell carries out on the app's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    OpenUrl(String),
}

pub struct App {
    pub config: Config,
    pub palette: Palette,
    pub content: Portfolio,
    pub chat: ChatWidget,
    pub viewport: [f32; 2],
    pub time: f32,
    pub running: bool,

    layout: Option<PageLayout>,
    pointer: PointerTracker,
    scroll: PageScroll,
    mapper: ScrollProgressMapper,
    progress: f32,
    timeline: TimelineRenderer,

    // displayed reveal amounts, one per experience entry
    cards: Vec<Transition>,
    markers: Vec<Transition>,
    indicator: Transition,

    effects: Vec<Effect>,
}

impl App {
    pub fn new(config: Config, content: Portfolio) -> Self {
        let palette = config.palette();
        let total = content.experiences.len();
        let motion = &config.motion;
        let cards = vec![Transition::new(0.0, motion.card_duration); total];
        let markers = vec![Transition::new(0.0, motion.marker_duration); total];
        let indicator = Transition::new(0.0, motion.indicator_duration);
        let mapper = ScrollProgressMapper::new(motion.start_offset);
        Self {
            palette,
            content,
            chat: ChatWidget::new(),
            viewport: [0.0, 0.0],
            time: 0.0,
            running: true,
            layout: None,
            pointer: PointerTracker::new(),
            scroll: PageScroll::new(),
            mapper,
            progress: 0.0,
            timeline: TimelineRenderer::new(total),
            cards,
            markers,
            indicator,
            effects: Vec::new(),
            config,
        }
    }

    pub fn layout(&self) -> Option<&PageLayout> {
        self.layout.as_ref()
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll.offset()
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn hovered(&self) -> bool {
        self.pointer.hovered()
    }

    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Resize { width, height } => self.resize(width, height),
            UiEvent::PointerEnter { pos } => {
                self.pointer.on_enter(pos, &self.config.cursor);
                self.refresh_hover();
            }
            UiEvent::PointerMove { pos } => {
                self.pointer.on_move(pos);
                self.refresh_hover();
            }
            UiEvent::PointerLeave => self.pointer.on_leave(),
            UiEvent::PointerDown { pos, button } => {
                if button == BTN_LEFT {
                    self.click(pos);
                }
            }
            UiEvent::PointerUp => {}
            UiEvent::Scroll { delta } => {
                if self.scroll.scroll_by(delta * self.config.scroll.wheel_multiplier) {
                    self.on_scrolled();
                }
            }
            UiEvent::Key(key) => self.key(key),
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        let viewport = [width as f32, height as f32];
        if viewport == self.viewport && self.layout.is_some() {
            return;
        }
        info!("Viewport {}x{}", width, height);
        self.viewport = viewport;
        let layout = PageLayout::build(&self.content, viewport);
        self.scroll.set_extent(layout.document_height, viewport[1]);
        self.layout = Some(layout);
        self.on_scrolled();
    }

    fn key(&mut self, key: Key) {
        let page = self.viewport[1] * 0.9;
        let line = self.config.scroll.line_step;
        let moved = match key {
            Key::Escape | Key::Quit => {
                info!("Quit requested");
                self.running = false;
                false
            }
            Key::Up => self.scroll.scroll_by(-line),
            Key::Down => self.scroll.scroll_by(line),
            Key::PageUp => self.scroll.scroll_by(-page),
            Key::PageDown | Key::Space => self.scroll.scroll_by(page),
            Key::Home => self.scroll.jump_to(0.0),
            Key::End => self.scroll.jump_to(self.scroll.max()),
        };
        if moved {
            self.on_scrolled();
        }
    }

    fn click(&mut self, pos: Vec2) {
        if self.covered_by_chat(pos) {
            return;
        }
        let Some(layout) = &self.layout else {
            return;
        };
        let Some(id) = layout.hit_test(pos, self.scroll.offset()) else {
            return;
        };
        match layout.block(id).role.clone() {
            Role::Link(LinkTarget::Section(section)) => {
                let target = layout.section_top(section);
                debug!("Scrolling to {:?} at {}", section, target);
                if self.config.animations_enabled {
                    self.scroll
                        .animate_to(target, self.time, self.config.scroll.anchor_duration);
                } else if self.scroll.jump_to(target) {
                    self.on_scrolled();
                }
            }
            Role::Link(LinkTarget::External(href)) => {
                if href.is_empty() || href == "#" {
                    debug!("Ignoring placeholder link");
                } else {
                    self.effects.push(Effect::OpenUrl(href));
                }
            }
            Role::Button(Action::ToggleChat) => {
                self.chat.toggle(self.time, self.config.animations_enabled);
                self.refresh_hover();
            }
            Role::Static | Role::Clickable => {}
        }
    }

    fn covered_by_chat(&self, pos: Vec2) -> bool {
        self.chat.is_open()
            && self
                .layout
                .as_ref()
                .is_some_and(|layout| layout.chat.panel.contains(pos))
    }

    /// Every scroll is a fresh read of the tracked container, then a new
    /// hover test since the content moved under the pointer.
    fn on_scrolled(&mut self) {
        let geometry = self
            .layout
            .as_ref()
            .map(|layout| layout.timeline_geometry(self.scroll.offset()));
        self.mapper
            .on_scroll(geometry, self.viewport[1], &mut self.progress);
        self.refresh_hover();
    }

    fn refresh_hover(&mut self) {
        if !self.pointer.is_present() {
            return;
        }
        let pos = self.pointer.sample();
        let interactive = !self.covered_by_chat(pos)
            && self
                .layout
                .as_ref()
                .is_some_and(|layout| layout.interactive_at(pos, self.scroll.offset()));
        self.pointer.on_over(interactive);
    }

    pub fn update(&mut self, dt: f32) {
        self.time += dt;

        if self.scroll.update(self.time) {
            self.on_scrolled();
        }
        self.pointer.update(dt, &self.config.cursor);
        self.chat.update(self.time);

        let revealed = self.timeline.reveal_states(self.progress);
        let animate = self.config.animations_enabled;
        for ((card, marker), shown) in self.cards.iter_mut().zip(&mut self.markers).zip(revealed) {
            let target = if shown { 1.0 } else { 0.0 };
            for t in [card, marker] {
                if animate {
                    t.set_target(target);
                    t.step(dt);
                } else {
                    t.snap(target);
                }
            }
        }
        if animate {
            self.indicator.set_target(self.progress);
            self.indicator.step(dt);
        } else {
            self.indicator.snap(self.progress);
        }
    }

    pub fn visual_state(&self) -> VisualState {
        let container_height = self
            .layout
            .as_ref()
            .map(|layout| layout.timeline.container.height)
            .unwrap_or(0.0);
        let entries = self
            .cards
            .iter()
            .zip(&self.markers)
            .enumerate()
            .map(|(i, (card, marker))| entry_style(i, card.value(), marker.value(), &self.config.motion))
            .collect();

        let sample = self.pointer.sample();
        let present = self.pointer.is_present();
        let hero = if present {
            CardTilt::hero(sample, self.viewport)
        } else {
            CardTilt::REST
        };
        let tilted = match (&self.layout, present && !self.covered_by_chat(sample)) {
            (Some(layout), true) => {
                let scroll = self.scroll.offset();
                layout.tilt_target(sample, scroll).map(|id| {
                    let pointer = Vec2::new(sample.x, sample.y + scroll);
                    (id, CardTilt::toward(layout.block(id).rect, pointer))
                })
            }
            _ => None,
        };

        VisualState {
            cursor: self.pointer.visual(&self.config.cursor),
            progress: self.progress,
            timeline: self.timeline.visual(self.progress, container_height),
            entries,
            indicator_length: self.indicator.value() * container_height,
            backdrop: BackdropVisual::from_pointer(sample),
            hero,
            tilted,
            chat_open: self.chat.openness(),
        }
    }

    pub fn render(&self, draw: &mut DrawContext, features: &[Box<dyn Feature>], year: i32) {
        draw.begin(self.viewport, self.palette.background);
        if let Some(layout) = &self.layout {
            let visual = self.visual_state();
            let scene = Scene {
                content: &self.content,
                layout,
                palette: &self.palette,
                visual: &visual,
                scroll: self.scroll.offset(),
                year,
            };
            for feature in features {
                feature.render(draw, &scene);
            }
        }
        draw.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SectionId;

    fn app() -> App {
        let mut app = App::new(Config::default(), Portfolio::default());
        app.handle_event(UiEvent::Resize {
            width: 1440,
            height: 900,
        });
        app
    }

    fn click(app: &mut App, pos: Vec2) {
        app.handle_event(UiEvent::PointerDown {
            pos,
            button: BTN_LEFT,
        });
        app.handle_event(UiEvent::PointerUp);
    }

    #[test]
    fn events_before_first_configure_are_harmless() {
        let mut app = App::new(Config::default(), Portfolio::default());
        app.handle_event(UiEvent::Scroll { delta: 50.0 });
        app.handle_event(UiEvent::PointerMove {
            pos: Vec2::new(10.0, 10.0),
        });
        app.update(0.016);
        assert_eq!(app.progress(), 0.0);
        assert!(!app.hovered());
    }

    #[test]
    fn moving_onto_a_button_sets_hover() {
        let mut app = app();
        let button = app.layout().unwrap().screen_rect(app.layout().unwrap().chat.button, 0.0);
        app.handle_event(UiEvent::PointerEnter {
            pos: Vec2::new(2.0, 450.0),
        });
        assert!(!app.hovered());
        app.handle_event(UiEvent::PointerMove { pos: button.center() });
        assert!(app.hovered());
        assert_eq!(app.visual_state().cursor.follower_scale, 1.5);
        app.handle_event(UiEvent::PointerLeave);
        assert!(!app.hovered());
        assert!(!app.visual_state().cursor.visible);
    }

    #[test]
    fn wheel_drives_progress() {
        let mut app = app();
        assert_eq!(app.progress(), 0.0);
        let container = app.layout().unwrap().timeline.container;
        let notches = container.y / app.config.scroll.wheel_multiplier;
        app.handle_event(UiEvent::Scroll { delta: notches });
        assert!((app.scroll_offset() - container.y).abs() < 1e-2);
        let expected = 900.0 * 0.7 / container.height;
        assert!((app.progress() - expected).abs() < 1e-3);

        app.handle_event(UiEvent::Key(Key::End));
        assert_eq!(app.progress(), 1.0);
        app.handle_event(UiEvent::Key(Key::Home));
        assert_eq!(app.progress(), 0.0);
    }

    fn wheel_for(app: &App, offset: f32) -> f32 {
        offset / app.config.scroll.wheel_multiplier
    }

    #[test]
    fn scrolling_re_evaluates_hover() {
        let mut app = app();
        let layout = app.layout().unwrap();
        let card = layout.block(layout.skills.cards[0]).rect;
        let skills_top = layout.section_top(SectionId::Skills);
        // where the card will be once the skills section is at the top
        let pos = Vec2::new(card.center().x, card.center().y - skills_top);
        app.handle_event(UiEvent::PointerEnter { pos });
        assert!(!app.hovered());
        app.handle_event(UiEvent::Scroll {
            delta: wheel_for(&app, skills_top),
        });
        assert!(app.hovered());
    }

    #[test]
    fn nav_link_tweens_to_section() {
        let mut app = app();
        let (_, about) = app.layout().unwrap().nav.links[0].clone();
        let link = app.layout().unwrap().screen_rect(about, 0.0);
        let target = app.layout().unwrap().section_top(SectionId::About);
        click(&mut app, link.center());
        assert!(app.take_effects().is_empty());
        app.update(0.1);
        let midway = app.scroll_offset();
        assert!(midway > 0.0 && midway < target);
        for _ in 0..20 {
            app.update(0.1);
        }
        assert!((app.scroll_offset() - target).abs() < 1e-2);
    }

    #[test]
    fn external_link_emits_effect() {
        let mut app = app();
        let layout = app.layout().unwrap();
        let linkedin = layout.screen_rect(layout.hero.linkedin, 0.0);
        let expected = app.content.personal.linkedin.clone();
        click(&mut app, linkedin.center());
        assert_eq!(app.take_effects(), vec![Effect::OpenUrl(expected)]);
        assert!(app.take_effects().is_empty());
    }

    #[test]
    fn placeholder_link_is_ignored() {
        let mut app = app();
        let layout = app.layout().unwrap();
        let source = layout.projects.cards[0].source.unwrap();
        let rect = layout.block(source).rect;
        app.handle_event(UiEvent::Scroll {
            delta: wheel_for(&app, rect.y - 100.0),
        });
        let pos = Vec2::new(rect.center().x, rect.center().y - app.scroll_offset());
        click(&mut app, pos);
        assert!(app.take_effects().is_empty());
    }

    #[test]
    fn escape_stops_the_loop() {
        let mut app = app();
        assert!(app.running);
        app.handle_event(UiEvent::Key(Key::Escape));
        assert!(!app.running);
    }

    #[test]
    fn chat_button_toggles_panel() {
        let mut app = app();
        let button = app.layout().unwrap().screen_rect(app.layout().unwrap().chat.button, 0.0);
        click(&mut app, button.center());
        assert!(app.chat.is_open());
        app.update(0.2);
        assert_eq!(app.visual_state().chat_open, 1.0);
        click(&mut app, button.center());
        assert!(!app.chat.is_open());
    }

    #[test]
    fn entries_reveal_as_progress_passes_thresholds() {
        let mut config = Config::default();
        config.animations_enabled = false;
        let mut app = App::new(config, Portfolio::default());
        app.handle_event(UiEvent::Resize {
            width: 1440,
            height: 900,
        });
        app.update(0.016);
        let hidden = app.visual_state();
        // entry 0 has threshold 0 and is revealed from the start
        assert_eq!(hidden.entries[0].opacity, 1.0);
        assert_eq!(hidden.entries[1].opacity, 0.0);
        assert_eq!(hidden.entries[1].offset, Vec2::new(-80.0, 40.0));

        app.handle_event(UiEvent::Key(Key::End));
        app.update(0.016);
        let shown = app.visual_state();
        assert!(shown.entries.iter().all(|e| e.opacity == 1.0));
        assert!(shown.entries.iter().all(|e| e.marker_rotation_deg == 135.0));
        let height = app.layout().unwrap().timeline.container.height;
        assert_eq!(shown.indicator_length, height);
    }

    #[test]
    fn transitions_ease_in_over_their_duration() {
        let mut app = app();
        app.handle_event(UiEvent::Key(Key::End));
        app.update(0.5);
        let halfway = app.visual_state();
        assert!((halfway.entries[1].opacity - 0.5).abs() < 1e-3);
        app.update(0.6);
        assert_eq!(app.visual_state().entries[1].opacity, 1.0);
    }

    #[test]
    fn hovered_card_tilts() {
        let mut app = app();
        let layout = app.layout().unwrap();
        let id = layout.skills.cards[0];
        let card = layout.block(id).rect;
        app.handle_event(UiEvent::Scroll {
            delta: wheel_for(&app, card.y - 100.0),
        });
        let corner = Vec2::new(card.x + 1.0, card.y + 1.0 - app.scroll_offset());
        app.handle_event(UiEvent::PointerEnter { pos: corner });
        let (tilted, tilt) = app.visual_state().tilted.unwrap();
        assert_eq!(tilted, id);
        assert!(tilt.rotate_x < 0.0 && tilt.rotate_y > 0.0);
        assert_eq!(tilt.scale, 1.02);
    }
}
