use super::{Feature, Scene};
use crate::gfx::{
    draw::DrawContext,
    math::{Rect, Vec2},
};
use rand::{rngs::StdRng, Rng, SeedableRng};

const GRID_SPACING: f32 = 60.0;
const GRAIN_SPECKS: usize = 600;

/// Fixed background: a faint grid, two glow blobs and film grain. Grid and
/// blobs drift with the pointer.
pub struct Backdrop {
    // (x, y) as fractions of the viewport, plus brightness
    grain: Vec<(Vec2, f32)>,
}

impl Backdrop {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let grain = (0..GRAIN_SPECKS)
            .map(|_| {
                let pos = Vec2::new(rng.gen::<f32>(), rng.gen::<f32>());
                (pos, rng.gen_range(0.3f32..1.0))
            })
            .collect();
        Self { grain }
    }
}

impl Feature for Backdrop {
    fn name(&self) -> &'static str {
        "backdrop"
    }

    fn render(&self, draw: &mut DrawContext, scene: &Scene) {
        let (w, h) = (scene.width(), scene.height());
        let palette = scene.palette;
        let backdrop = &scene.visual.backdrop;

        // Blobs first so the grid sits over them
        let blob = w.max(h) * 0.6;
        let a_center = Vec2::new(w * 0.25, h * 0.25) + backdrop.blob_a;
        draw.glow(
            Rect::new(a_center.x - blob / 2.0, a_center.y - blob / 2.0, blob, blob),
            palette.accent.with_alpha(0.10),
        );
        let b_center = Vec2::new(w * 0.75, h * 0.75) + backdrop.blob_b;
        draw.glow(
            Rect::new(b_center.x - blob / 2.0, b_center.y - blob / 2.0, blob, blob),
            palette.accent_alt.with_alpha(0.10),
        );

        let line = palette.foreground.with_alpha(0.03);
        let shift = backdrop.grid_shift_x.rem_euclid(GRID_SPACING);
        let mut x = shift - GRID_SPACING;
        while x < w {
            draw.rect(x, 0.0, 1.0, h, line);
            x += GRID_SPACING;
        }
        let mut y = 0.0;
        while y < h {
            draw.rect(0.0, y, w, 1.0, line);
            y += GRID_SPACING;
        }

        for (pos, brightness) in &self.grain {
            draw.rect(
                pos.x * w,
                pos.y * h,
                1.0,
                1.0,
                palette.foreground.with_alpha(0.05 * brightness),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grain_is_reproducible_per_seed() {
        let a = Backdrop::new(7);
        let b = Backdrop::new(7);
        assert_eq!(a.grain, b.grain);
        assert_eq!(a.grain.len(), GRAIN_SPECKS);
        assert!(a
            .grain
            .iter()
            .all(|(p, v)| (0.0..1.0).contains(&p.x) && (0.0..1.0).contains(&p.y) && *v >= 0.3));
    }
}
