use super::{transform, Feature, Scene};
use crate::gfx::{
    anim::{ease_in_out, Timeline},
    draw::DrawContext,
    font,
    math::Vec2,
};
use crate::layout::text;
use log::debug;

const TOGGLE_SECONDS: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChatMode {
    Closed,
    Opening,
    Open,
    Closing,
}

/// Open/close state of the chat panel. There is no conversation behind it.
#[derive(Debug, Clone)]
pub struct ChatWidget {
    pub mode: ChatMode,
    timeline: Timeline,
}

impl ChatWidget {
    pub fn new() -> Self {
        Self {
            mode: ChatMode::Closed,
            timeline: Timeline::new(TOGGLE_SECONDS),
        }
    }

    pub fn toggle(&mut self, now: f32, animate: bool) {
        let opening = !self.is_open();
        let from = self.openness();
        if !animate {
            self.mode = if opening { ChatMode::Open } else { ChatMode::Closed };
            return;
        }
        self.mode = if opening { ChatMode::Opening } else { ChatMode::Closing };
        // a reversal mid-flight continues from the current amount
        let done = if opening { from } else { 1.0 - from };
        self.timeline.start(now - TOGGLE_SECONDS * done);
        self.timeline.update(now);
        debug!("chat {:?}", self.mode);
    }

    pub fn update(&mut self, now: f32) {
        if matches!(self.mode, ChatMode::Opening | ChatMode::Closing) {
            self.timeline.update(now);
            if self.timeline.is_complete() {
                self.mode = match self.mode {
                    ChatMode::Opening => ChatMode::Open,
                    _ => ChatMode::Closed,
                };
            }
        }
    }

    /// 0 closed, 1 open.
    pub fn openness(&self) -> f32 {
        match self.mode {
            ChatMode::Closed => 0.0,
            ChatMode::Open => 1.0,
            ChatMode::Opening => self.timeline.progress(),
            ChatMode::Closing => 1.0 - self.timeline.progress(),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.mode, ChatMode::Open | ChatMode::Opening)
    }
}

impl Default for ChatWidget {
    fn default() -> Self {
        Self::new()
    }
}

/// The round chat button and, while open, its panel.
pub struct ChatPanel;

impl Feature for ChatPanel {
    fn name(&self) -> &'static str {
        "chat"
    }

    fn render(&self, draw: &mut DrawContext, scene: &Scene) {
        let palette = scene.palette;
        let chat = &scene.layout.chat;
        let copy = &scene.content.chat;

        let button = scene.layout.screen_rect(chat.button, 0.0);
        let center = button.center();
        draw.disc(center, button.width / 2.0 + 8.0, palette.accent.with_alpha(0.2));
        draw.disc(center, button.width / 2.0, palette.accent);
        let glyph = if scene.visual.chat_open > 0.5 { "X" } else { "\"\"" };
        draw.text_centered(glyph, center.x, center.y - 7.0, 2.0, 0.0, palette.foreground);

        let amount = ease_in_out(scene.visual.chat_open);
        if amount <= 0.0 {
            return;
        }
        let panel = chat.panel;
        transform(draw, None, Vec2::new(0.0, (1.0 - amount) * 16.0), amount);
        draw.rect(panel.x, panel.y, panel.width, panel.height, palette.surface);
        draw.frame(panel, 1.0, palette.foreground.with_alpha(0.1));

        let x = panel.x + 20.0;
        let inner = panel.width - 40.0;
        let mut y = panel.y + 20.0;
        draw.text(&copy.title.to_uppercase(), x, y, text::LABEL, text::WIDE_TRACKING, palette.accent);
        y += font::line_height(text::LABEL) + 16.0;
        for row in font::wrap(&copy.greeting, inner, 2.0, 0.0) {
            draw.text(&row, x, y, 2.0, 0.0, palette.foreground);
            y += font::line_height(2.0);
        }
        y += 16.0;
        for row in font::wrap(&copy.offline_note, inner, text::LABEL, 0.0) {
            draw.text(&row, x, y, text::LABEL, 0.0, palette.muted);
            y += font::line_height(text::LABEL);
        }
        draw.reset_transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_over_toggle_duration() {
        let mut chat = ChatWidget::new();
        assert_eq!(chat.openness(), 0.0);
        chat.toggle(1.0, true);
        assert_eq!(chat.mode, ChatMode::Opening);
        chat.update(1.075);
        assert!((chat.openness() - 0.5).abs() < 1e-3);
        chat.update(1.2);
        assert_eq!(chat.mode, ChatMode::Open);
        assert_eq!(chat.openness(), 1.0);
    }

    #[test]
    fn closes_after_second_toggle() {
        let mut chat = ChatWidget::new();
        chat.toggle(0.0, true);
        chat.update(1.0);
        chat.toggle(2.0, true);
        assert_eq!(chat.mode, ChatMode::Closing);
        assert!(!chat.is_open());
        chat.update(2.5);
        assert_eq!(chat.mode, ChatMode::Closed);
    }

    #[test]
    fn reversing_mid_flight_keeps_position() {
        let mut chat = ChatWidget::new();
        chat.toggle(0.0, true);
        chat.update(0.1);
        let before = chat.openness();
        chat.toggle(0.1, true);
        assert_eq!(chat.mode, ChatMode::Closing);
        assert!((chat.openness() - before).abs() < 1e-3);
    }

    #[test]
    fn snaps_without_animation() {
        let mut chat = ChatWidget::new();
        chat.toggle(0.0, false);
        assert_eq!(chat.mode, ChatMode::Open);
        chat.toggle(0.0, false);
        assert_eq!(chat.mode, ChatMode::Closed);
    }
}
