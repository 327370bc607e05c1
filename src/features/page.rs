use super::{heading, transform, Feature, Scene};
use crate::gfx::{
    draw::{DrawContext, Fill, Warp},
    font,
    math::{Color, Rect, Vec2},
};
use crate::layout::{certification_label, text};

/// The scrolled document: hero, about, skills, projects, contact and footer.
/// The experience timeline has its own renderer.
pub struct Page;

impl Feature for Page {
    fn name(&self) -> &'static str {
        "page"
    }

    fn render(&self, draw: &mut DrawContext, scene: &Scene) {
        let layout = scene.layout;
        if scene.visible(layout.hero.section.y, layout.hero.section.bottom()) {
            render_hero(draw, scene);
        }
        if scene.visible(layout.about.section.y, layout.about.section.bottom()) {
            render_about(draw, scene);
        }
        if scene.visible(layout.skills.section.y, layout.skills.section.bottom()) {
            render_skills(draw, scene);
        }
        let timeline = &layout.timeline;
        if scene.visible(timeline.section.y, timeline.container.y) {
            heading(draw, &timeline.heading, scene.scroll, scene.palette);
        }
        if scene.visible(layout.projects.section.y, layout.projects.section.bottom()) {
            render_projects(draw, scene);
        }
        if scene.visible(layout.contact.section.y, layout.footer.bottom()) {
            render_contact(draw, scene);
            render_footer(draw, scene);
        }
    }
}

/// Pill outline with centered label.
fn pill(draw: &mut DrawContext, r: Rect, label: &str, border: Color, fg: Color) {
    draw.rect(r.x, r.y, r.width, r.height, border.with_alpha(border.a * 0.15));
    draw.frame(r, 1.0, border);
    let y = r.y + (r.height - font::GLYPH_ROWS as f32 * text::LABEL) / 2.0;
    draw.text_centered(label, r.center().x, y, text::LABEL, text::WIDE_TRACKING, fg);
}

fn filled_button(draw: &mut DrawContext, r: Rect, label: &str, bg: Color, fg: Color) {
    draw.fill_rect(r, bg, Fill::Solid);
    let y = r.y + (r.height - font::GLYPH_ROWS as f32 * text::LABEL) / 2.0;
    draw.text_centered(label, r.center().x, y, text::LABEL, text::WIDE_TRACKING, fg);
}

fn lines(draw: &mut DrawContext, rows: &[String], x: f32, mut y: f32, size: f32, color: Color) -> f32 {
    for row in rows {
        draw.text(row, x, y, size, 0.0, color);
        y += font::line_height(size);
    }
    y
}

fn render_hero(draw: &mut DrawContext, scene: &Scene) {
    let hero = &scene.layout.hero;
    let palette = scene.palette;
    let personal = &scene.content.personal;
    let scroll = scene.scroll;
    let center_x = scene.width() / 2.0;

    let content = hero.content.translate(Vec2::new(0.0, -scroll));
    let tilt = scene.visual.hero;
    let warp = (!tilt.is_rest()).then(|| Warp {
        source: content,
        target: tilt.project(content),
    });
    transform(draw, warp, Vec2::ZERO, 1.0);

    let badge = hero.badge.translate(Vec2::new(0.0, -scroll));
    pill(draw, badge, &personal.badge.to_uppercase(), palette.accent.with_alpha(0.4), palette.accent);

    let (first, rest) = personal.name_lines();
    draw.text_centered(&first, center_x, hero.name_y[0] - scroll, hero.name_size, 0.0, palette.foreground);
    if !rest.is_empty() {
        let rest_color = palette.accent.mix(palette.accent_alt, 0.5);
        draw.text_centered(&rest, center_x, hero.name_y[1] - scroll, hero.name_size, 0.0, rest_color);
    }

    let mut y = hero.headline_y - scroll;
    for row in &hero.headline_lines {
        draw.text_centered(row, center_x, y, text::SUBTITLE, 0.0, palette.muted);
        y += font::line_height(text::SUBTITLE);
    }

    let explore = scene.layout.screen_rect(hero.explore, scroll);
    filled_button(draw, explore, "EXPLORE PORTFOLIO  >", palette.foreground, palette.background);
    for (id, glyph) in [(hero.linkedin, "IN"), (hero.mail, "@")] {
        let r = scene.layout.screen_rect(id, scroll);
        draw.rect(r.x, r.y, r.width, r.height, palette.foreground.with_alpha(0.05));
        draw.frame(r, 1.0, palette.foreground.with_alpha(0.1));
        let gy = r.y + (r.height - font::GLYPH_ROWS as f32 * 2.0) / 2.0;
        draw.text_centered(glyph, r.center().x, gy, 2.0, 0.0, palette.foreground);
    }

    draw.reset_transform();
}

fn render_about(draw: &mut DrawContext, scene: &Scene) {
    let about = &scene.layout.about;
    let palette = scene.palette;
    let scroll = scene.scroll;
    heading(draw, &about.heading, scroll, palette);

    lines(
        draw,
        &about.summary_lines,
        about.heading.x,
        about.summary_y - scroll,
        text::BODY,
        palette.muted,
    );

    for (id, edu) in about.education.iter().zip(&scene.content.education) {
        let r = scene.layout.screen_rect(*id, scroll);
        draw.rect(r.x, r.y, r.width, r.height, palette.surface);
        draw.frame(r, 1.0, palette.foreground.with_alpha(0.08));
        let x = r.x + 24.0;
        let max_w = r.width - 48.0;
        let mut y = r.y + 24.0;
        let title = font::wrap(&edu.degree, max_w, 3.0, 0.0);
        if let Some(first) = title.first() {
            draw.text(first, x, y, 3.0, 0.0, palette.foreground);
        }
        y += font::line_height(3.0) + 4.0;
        draw.text(&edu.institution.to_uppercase(), x, y, text::LABEL, text::WIDE_TRACKING, palette.accent);
        y += font::line_height(text::LABEL) + 12.0;
        let meta = format!("{}  {}", edu.duration, edu.location);
        draw.text(&meta, x, y, text::LABEL, 0.0, palette.muted);
        y += font::line_height(text::LABEL) + 8.0;
        draw.text(&edu.score, x, y, text::LABEL, 0.0, palette.muted);
    }

    for (id, cert) in about.certifications.iter().zip(&scene.content.certifications) {
        let r = scene.layout.screen_rect(*id, scroll);
        pill(
            draw,
            r,
            &certification_label(cert),
            palette.foreground.with_alpha(0.15),
            palette.foreground,
        );
    }
}

fn render_skills(draw: &mut DrawContext, scene: &Scene) {
    let skills = &scene.layout.skills;
    let palette = scene.palette;
    heading(draw, &skills.heading, scene.scroll, palette);

    for (id, skill) in skills.cards.iter().zip(&scene.content.skills) {
        let (r, warp) = scene.card(*id);
        if r.bottom() < 0.0 || r.y > scene.height() {
            continue;
        }
        let lifted = warp.is_some();
        transform(draw, warp, Vec2::ZERO, 1.0);
        let bg = if lifted {
            palette.foreground.with_alpha(0.06)
        } else {
            palette.foreground.with_alpha(0.03)
        };
        draw.rect(r.x, r.y, r.width, r.height, bg);
        draw.frame(r, 1.0, palette.foreground.with_alpha(0.06));

        let icon_size = 4.0;
        let icon_y = r.y + r.height * 0.3;
        draw.text_centered(skill.icon.glyphs(), r.center().x, icon_y, icon_size, 0.0, palette.accent);
        let label = skill.name.to_uppercase();
        let label_y = r.bottom() - 24.0 - font::GLYPH_ROWS as f32 * text::LABEL;
        let fitted = font::wrap(&label, r.width - 16.0, text::LABEL, text::WIDE_TRACKING);
        if let Some(first) = fitted.first() {
            draw.text_centered(first, r.center().x, label_y, text::LABEL, text::WIDE_TRACKING, palette.muted);
        }
        draw.reset_transform();
    }
}

fn render_projects(draw: &mut DrawContext, scene: &Scene) {
    let projects = &scene.layout.projects;
    let palette = scene.palette;
    let scroll = scene.scroll;
    heading(draw, &projects.heading, scroll, palette);

    for (card, project) in projects.cards.iter().zip(&scene.content.projects) {
        let (r, warp) = scene.card(card.card);
        if r.bottom() < 0.0 || r.y > scene.height() {
            continue;
        }
        transform(draw, warp, Vec2::ZERO, 1.0);
        draw.rect(r.x, r.y, r.width, r.height, palette.surface);
        draw.frame(r, 1.0, palette.foreground.with_alpha(0.06));

        let banner = card.banner.translate(Vec2::new(0.0, -scroll));
        draw.rect(banner.x, banner.y, banner.width, banner.height, palette.accent.with_alpha(0.12));
        draw.glow(banner.scale(0.9), palette.accent_alt.with_alpha(0.25));
        let initial: String = project.title.chars().take(1).collect();
        draw.text_centered(
            &initial.to_uppercase(),
            banner.center().x,
            banner.center().y - 3.5 * 12.0,
            12.0,
            0.0,
            palette.foreground.with_alpha(0.2),
        );

        for (tag, tech) in card.tags.iter().zip(&project.tech_stack) {
            let t = tag.translate(Vec2::new(0.0, -scroll));
            pill(draw, t, &tech.to_uppercase(), palette.accent.with_alpha(0.3), palette.accent);
        }

        let x = r.x + 40.0;
        draw.text(&project.title, x, card.title_y - scroll, text::CARD_TITLE + 1.0, 0.0, palette.foreground);
        lines(
            draw,
            &card.description_lines,
            x,
            card.description_y - scroll,
            text::BODY,
            palette.muted,
        );

        if let Some(source) = card.source {
            let s = scene.layout.screen_rect(source, scroll);
            draw.frame(s, 1.0, palette.foreground.with_alpha(0.15));
            let y = s.y + (s.height - font::GLYPH_ROWS as f32 * text::LABEL) / 2.0;
            draw.text_centered("VIEW SOURCE", s.center().x, y, text::LABEL, text::WIDE_TRACKING, palette.foreground);
        }
        draw.reset_transform();
    }
}

fn render_contact(draw: &mut DrawContext, scene: &Scene) {
    let contact = &scene.layout.contact;
    let palette = scene.palette;
    let scroll = scene.scroll;
    heading(draw, &contact.heading, scroll, palette);

    let email = scene.layout.screen_rect(contact.email, scroll);
    filled_button(draw, email, "START A CONVERSATION", palette.foreground, palette.background);
    let linkedin = scene.layout.screen_rect(contact.linkedin, scroll);
    draw.frame(linkedin, 1.0, palette.foreground.with_alpha(0.2));
    let y = linkedin.y + (linkedin.height - font::GLYPH_ROWS as f32 * text::LABEL) / 2.0;
    draw.text_centered("LINKEDIN PROFILE", linkedin.center().x, y, text::LABEL, text::WIDE_TRACKING, palette.foreground);
}

fn render_footer(draw: &mut DrawContext, scene: &Scene) {
    let footer = scene.layout.footer.translate(Vec2::new(0.0, -scene.scroll));
    let palette = scene.palette;
    let personal = &scene.content.personal;

    draw.rect(footer.x, footer.y, footer.width, 1.0, palette.foreground.with_alpha(0.05));
    let center_x = footer.center().x;
    draw.text_centered(&personal.initials(), center_x, footer.y + 60.0, 4.0, 0.0, palette.foreground);
    let notice = format!("© {} {}. All rights reserved.", scene.year, personal.name);
    draw.text_centered(&notice, center_x, footer.y + 120.0, text::LABEL, 0.0, palette.muted);
}
