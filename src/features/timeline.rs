use super::{transform, Feature, Scene};
use crate::gfx::{
    draw::{DrawContext, Fill},
    font,
    math::{Rect, Vec2},
};
use crate::layout::text;
use crate::motion::timeline::EntryStyle;

const MARKER_HALF: f32 = 8.0;

/// Experience entries along the center line, revealed by scroll progress.
pub struct Timeline;

/// The marker square's corners, rotated and scaled about its center.
pub fn marker_corners(center: Vec2, style: &EntryStyle) -> [Vec2; 4] {
    let (sin, cos) = style.marker_rotation_deg.to_radians().sin_cos();
    let half = MARKER_HALF * style.marker_scale;
    [
        Vec2::new(-half, -half),
        Vec2::new(half, -half),
        Vec2::new(half, half),
        Vec2::new(-half, half),
    ]
    .map(|p| center + Vec2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos))
}

impl Feature for Timeline {
    fn name(&self) -> &'static str {
        "timeline"
    }

    fn render(&self, draw: &mut DrawContext, scene: &Scene) {
        let timeline = &scene.layout.timeline;
        let container = timeline.container;
        if !scene.visible(container.y, container.bottom()) {
            return;
        }
        let palette = scene.palette;
        let scroll = scene.scroll;
        let top = container.y - scroll;

        draw.rect(timeline.line_x - 1.0, top, 2.0, container.height, palette.foreground.with_alpha(0.08));
        let length = scene.visual.indicator_length.clamp(0.0, container.height);
        if length > 0.0 {
            draw.rect(timeline.line_x - 1.0, top, 2.0, length, palette.accent);
            // soft head at the tip
            let tip = Vec2::new(timeline.line_x, top + length);
            draw.disc(tip, 6.0, palette.accent.with_alpha(0.6));
        }

        let hidden = EntryStyle {
            opacity: 0.0,
            offset: Vec2::ZERO,
            marker_rotation_deg: 45.0,
            marker_scale: 1.0,
            marker_glow: 0.0,
        };
        for (i, (entry, exp)) in timeline.entries.iter().zip(&scene.content.experiences).enumerate() {
            let style = scene.visual.entries.get(i).copied().unwrap_or(hidden);

            let marker = Vec2::new(entry.marker.x, entry.marker.y - scroll);
            if style.marker_glow > 0.0 {
                let g = 28.0 * style.marker_scale;
                draw.glow(
                    Rect::new(marker.x - g, marker.y - g, g * 2.0, g * 2.0),
                    palette.accent.with_alpha(0.5 * style.marker_glow),
                );
            }
            let idle = palette.background.mix(palette.foreground, 0.2);
            let fill = idle.mix(palette.accent, style.marker_glow);
            draw.quad(marker_corners(marker, &style), fill, Fill::Solid);

            let (r, warp) = scene.card(entry.card);
            if r.bottom() + style.offset.y < 0.0 || r.y + style.offset.y > scene.height() {
                continue;
            }
            transform(draw, warp, style.offset, style.opacity);
            draw.rect(r.x, r.y, r.width, r.height, palette.surface);
            draw.frame(r, 1.0, palette.foreground.with_alpha(0.06));

            let pad = if scene.width() < 768.0 { 32.0 } else { 48.0 };
            let x = r.x + pad;
            let mut y = r.y + pad;
            for row in &entry.role_lines {
                draw.text(row, x, y, text::CARD_TITLE, 0.0, palette.foreground);
                y += font::line_height(text::CARD_TITLE);
            }
            let company = if exp.location.is_empty() {
                exp.company.to_uppercase()
            } else {
                format!("{} - {}", exp.company, exp.location).to_uppercase()
            };
            draw.text(&company, x, y + 4.0, text::LABEL, text::WIDE_TRACKING, palette.accent);
            y += 48.0;

            let pill_w = font::measure(&exp.duration, text::LABEL, 0.0) + 32.0;
            draw.rect(x, y, pill_w, 32.0, palette.foreground.with_alpha(0.05));
            draw.frame(Rect::new(x, y, pill_w, 32.0), 1.0, palette.foreground.with_alpha(0.1));
            draw.text(&exp.duration, x + 16.0, y + (32.0 - 7.0 * text::LABEL) / 2.0, text::LABEL, 0.0, palette.muted);
            y += 44.0 + 32.0;

            for detail in &entry.detail_lines {
                draw.disc(Vec2::new(x + 4.0, y + 3.5 * text::BODY), 3.0, palette.accent);
                for row in detail {
                    draw.text(row, x + 24.0, y, text::BODY, 0.0, palette.muted);
                    y += font::line_height(text::BODY);
                }
                y += 16.0;
            }
            draw.reset_transform();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(rotation: f32, scale: f32) -> EntryStyle {
        EntryStyle {
            opacity: 1.0,
            offset: Vec2::ZERO,
            marker_rotation_deg: rotation,
            marker_scale: scale,
            marker_glow: 1.0,
        }
    }

    #[test]
    fn diamond_at_45_degrees() {
        let corners = marker_corners(Vec2::ZERO, &style(45.0, 1.0));
        let reach = MARKER_HALF * std::f32::consts::SQRT_2;
        // top-left corner swings up to the top
        assert!(corners[0].x.abs() < 1e-4);
        assert!((corners[0].y + reach).abs() < 1e-4);
    }

    #[test]
    fn scale_grows_the_marker() {
        let small = marker_corners(Vec2::ZERO, &style(135.0, 1.0));
        let large = marker_corners(Vec2::ZERO, &style(135.0, 1.1));
        let len = |p: Vec2| (p.x * p.x + p.y * p.y).sqrt();
        assert!((len(large[0]) / len(small[0]) - 1.1).abs() < 1e-4);
    }
}
