pub mod backdrop;
pub mod chat;
pub mod chrome;
pub mod cursor;
pub mod page;
pub mod timeline;

use crate::config::Palette;
use crate::content::Portfolio;
use crate::gfx::{
    draw::{DrawContext, Transform, Warp},
    font,
    math::{Color, Rect, Vec2},
};
use crate::layout::{text, BlockId, HeadingLayout, PageLayout};
use crate::motion::VisualState;

/// Read-only view of one frame handed to every renderer.
pub struct Scene<'a> {
    pub content: &'a Portfolio,
    pub layout: &'a PageLayout,
    pub palette: &'a Palette,
    pub visual: &'a VisualState,
    pub scroll: f32,
    pub year: i32,
}

impl Scene<'_> {
    pub fn width(&self) -> f32 {
        self.layout.viewport[0]
    }

    pub fn height(&self) -> f32 {
        self.layout.viewport[1]
    }

    /// Whether a document-space span is at least partly on screen.
    pub fn visible(&self, top: f32, bottom: f32) -> bool {
        bottom - self.scroll > 0.0 && top - self.scroll < self.height()
    }

    /// Screen rect of a block plus the warp of its tilt, if it is the
    /// tilted card.
    pub fn card(&self, id: BlockId) -> (Rect, Option<Warp>) {
        let rect = self.layout.screen_rect(id, self.scroll);
        let warp = match self.visual.tilted {
            Some((tilted, tilt)) if tilted == id && !tilt.is_rest() => Some(Warp {
                source: rect,
                target: tilt.project(rect),
            }),
            _ => None,
        };
        (rect, warp)
    }
}

pub trait Feature {
    fn name(&self) -> &'static str;
    fn render(&self, draw: &mut DrawContext, scene: &Scene);
}

/// Renderers in paint order, back to front.
pub fn stack(seed: u64) -> Vec<Box<dyn Feature>> {
    vec![
        Box::new(backdrop::Backdrop::new(seed)),
        Box::new(page::Page),
        Box::new(timeline::Timeline),
        Box::new(chrome::Chrome),
        Box::new(chat::ChatPanel),
        Box::new(cursor::Cursor),
    ]
}

/// Draws a section title and subtitle, already in screen space.
pub(crate) fn heading(draw: &mut DrawContext, heading: &HeadingLayout, scroll: f32, palette: &Palette) {
    let line = |draw: &mut DrawContext, row: &str, y: f32, size: f32, color: Color| {
        if heading.centered {
            draw.text_centered(row, heading.x + heading.width / 2.0, y, size, 0.0, color);
        } else {
            draw.text(row, heading.x, y, size, 0.0, color);
        };
    };
    let mut y = heading.title_y - scroll;
    for row in &heading.title_lines {
        line(draw, row, y, heading.title_size, palette.foreground);
        y += font::line_height(heading.title_size);
    }
    let mut y = heading.subtitle_y - scroll;
    for row in &heading.subtitle_lines {
        line(draw, row, y, text::SUBTITLE, palette.muted);
        y += font::line_height(text::SUBTITLE);
    }
}

/// Sets a transform that warps, offsets and fades everything drawn until the
/// next reset.
pub(crate) fn transform(draw: &mut DrawContext, warp: Option<Warp>, offset: Vec2, opacity: f32) {
    draw.set_transform(Transform { offset, opacity, warp });
}
