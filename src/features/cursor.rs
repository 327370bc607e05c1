use super::{Feature, Scene};
use crate::gfx::{draw::DrawContext, math::Vec2};

/// The custom cursor: a small dot on the pointer and a trailing ring that
/// grows over clickable things.
pub struct Cursor;

impl Feature for Cursor {
    fn name(&self) -> &'static str {
        "cursor"
    }

    fn render(&self, draw: &mut DrawContext, scene: &Scene) {
        let cursor = &scene.visual.cursor;
        if !cursor.visible {
            return;
        }
        let palette = scene.palette;

        let half = cursor.follower_size / 2.0;
        let center = cursor.follower + Vec2::new(half, half);
        let radius = half * cursor.follower_scale;
        if cursor.hovered {
            draw.disc(center, radius, palette.foreground.with_alpha(0.1));
            draw.ring(center, radius, palette.accent);
        } else {
            draw.ring(center, radius, palette.foreground.with_alpha(0.5));
        }

        let dot_half = cursor.dot_size / 2.0;
        draw.disc(cursor.dot + Vec2::new(dot_half, dot_half), dot_half, palette.foreground);
    }
}
