use super::{Feature, Scene};
use crate::gfx::{draw::DrawContext, font, math::Rect};
use crate::layout::text;

const PROGRESS_HEIGHT: f32 = 3.0;

/// Fixed top chrome: the reading progress bar and the nav bar.
pub struct Chrome;

/// Width of the progress bar for a given progress.
pub fn progress_width(progress: f32, viewport_width: f32) -> f32 {
    progress.clamp(0.0, 1.0) * viewport_width
}

impl Feature for Chrome {
    fn name(&self) -> &'static str {
        "chrome"
    }

    fn render(&self, draw: &mut DrawContext, scene: &Scene) {
        let palette = scene.palette;
        let nav = &scene.layout.nav;

        let bar = nav.bar;
        draw.rect(bar.x, bar.y, bar.width, bar.height, palette.surface.with_alpha(0.8));
        draw.frame(bar, 1.0, palette.foreground.with_alpha(0.08));
        draw.text(
            &scene.content.personal.initials(),
            nav.brand.x,
            nav.brand.y,
            3.0,
            0.0,
            palette.foreground,
        );

        for (label, id) in &nav.links {
            let r = scene.layout.screen_rect(*id, 0.0);
            let y = r.y + (r.height - font::GLYPH_ROWS as f32 * text::LABEL) / 2.0;
            draw.text(label, r.x, y, text::LABEL, text::WIDE_TRACKING, palette.muted);
        }
        if let Some(id) = nav.connect {
            let r: Rect = scene.layout.screen_rect(id, 0.0);
            draw.rect(r.x, r.y, r.width, r.height, palette.foreground);
            let y = r.y + (r.height - font::GLYPH_ROWS as f32 * text::LABEL) / 2.0;
            draw.text_centered("LET'S CONNECT", r.center().x, y, text::LABEL, text::WIDE_TRACKING, palette.background);
        }

        let width = progress_width(scene.visual.progress, scene.width());
        if width > 0.0 {
            draw.rect(0.0, 0.0, width, PROGRESS_HEIGHT, palette.accent);
        }
    }
}
