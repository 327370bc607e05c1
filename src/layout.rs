//! Page geometry. Everything scrolled with the page lives in document
//! coordinates (origin at the page top); fixed chrome lives in viewport
//! coordinates. Rebuilt whenever the viewport or the content changes.

use crate::content::{Certification, Portfolio};
use crate::gfx::font;
use crate::gfx::math::{Rect, Vec2};
use crate::motion::scroll::ContainerGeometry;
use crate::motion::timeline::Side;

/// Font cell sizes.
pub mod text {
    pub const LABEL: f32 = 1.6;
    pub const BODY: f32 = 2.4;
    pub const SUBTITLE: f32 = 3.0;
    pub const CARD_TITLE: f32 = 4.0;
    pub const SECTION_TITLE: f32 = 8.0;
    pub const SECTION_TITLE_NARROW: f32 = 5.0;
    /// Extra cells between letters of uppercase labels.
    pub const WIDE_TRACKING: f32 = 1.0;
}

const MAX_CONTENT_WIDTH: f32 = 1200.0;
const SIDE_PADDING: f32 = 24.0;
const SECTION_PADDING: f32 = 128.0;
const NAV_HEIGHT: f32 = 64.0;
const MD: f32 = 768.0;

pub type BlockId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Hero,
    About,
    Skills,
    Experience,
    Projects,
    Contact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    Section(SectionId),
    External(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleChat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Static,
    Link(LinkTarget),
    Button(Action),
    /// Marks itself and everything inside it as clickable.
    Clickable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Space {
    Document,
    Viewport,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub rect: Rect,
    pub role: Role,
    pub parent: Option<BlockId>,
    pub space: Space,
    /// Leans toward the pointer while hovered.
    pub tilts: bool,
}

#[derive(Debug, Clone, Default)]
pub struct HeadingLayout {
    pub x: f32,
    pub width: f32,
    /// Lines are centered within `width` instead of left aligned.
    pub centered: bool,
    pub title_lines: Vec<String>,
    pub title_y: f32,
    pub title_size: f32,
    pub subtitle_lines: Vec<String>,
    pub subtitle_y: f32,
}

#[derive(Debug, Clone)]
pub struct NavLayout {
    pub bar: Rect,
    pub brand: Vec2,
    /// Empty on narrow viewports.
    pub links: Vec<(String, BlockId)>,
    pub connect: Option<BlockId>,
}

#[derive(Debug, Clone)]
pub struct HeroLayout {
    pub section: Rect,
    pub content: Rect,
    pub badge: Rect,
    pub name_size: f32,
    pub name_y: [f32; 2],
    pub headline_lines: Vec<String>,
    pub headline_y: f32,
    pub explore: BlockId,
    pub linkedin: BlockId,
    pub mail: BlockId,
}

#[derive(Debug, Clone)]
pub struct AboutLayout {
    pub section: Rect,
    pub heading: HeadingLayout,
    pub summary_lines: Vec<String>,
    pub summary_y: f32,
    pub education: Vec<BlockId>,
    pub certifications: Vec<BlockId>,
}

#[derive(Debug, Clone)]
pub struct SkillsLayout {
    pub section: Rect,
    pub heading: HeadingLayout,
    pub columns: usize,
    pub cards: Vec<BlockId>,
}

#[derive(Debug, Clone)]
pub struct EntryLayout {
    pub card: BlockId,
    pub side: Side,
    pub marker: Vec2,
    pub role_lines: Vec<String>,
    pub detail_lines: Vec<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct TimelineLayout {
    pub section: Rect,
    pub heading: HeadingLayout,
    /// The tracked container.
    pub container: Rect,
    pub line_x: f32,
    pub entries: Vec<EntryLayout>,
}

#[derive(Debug, Clone)]
pub struct ProjectLayout {
    pub card: BlockId,
    pub banner: Rect,
    pub tags: Vec<Rect>,
    pub title_y: f32,
    pub description_lines: Vec<String>,
    pub description_y: f32,
    pub source: Option<BlockId>,
}

#[derive(Debug, Clone)]
pub struct ProjectsLayout {
    pub section: Rect,
    pub heading: HeadingLayout,
    pub cards: Vec<ProjectLayout>,
}

#[derive(Debug, Clone)]
pub struct ContactLayout {
    pub section: Rect,
    pub heading: HeadingLayout,
    pub email: BlockId,
    pub linkedin: BlockId,
}

#[derive(Debug, Clone)]
pub struct ChatLayout {
    pub button: BlockId,
    pub panel: Rect,
}

#[derive(Debug, Clone)]
pub struct PageLayout {
    pub viewport: [f32; 2],
    pub blocks: Vec<Block>,
    pub nav: NavLayout,
    pub hero: HeroLayout,
    pub about: AboutLayout,
    pub skills: SkillsLayout,
    pub timeline: TimelineLayout,
    pub projects: ProjectsLayout,
    pub contact: ContactLayout,
    pub footer: Rect,
    pub chat: ChatLayout,
    pub document_height: f32,
}

struct Builder {
    blocks: Vec<Block>,
}

impl Builder {
    fn push(&mut self, rect: Rect, role: Role, parent: Option<BlockId>, space: Space, tilts: bool) -> BlockId {
        self.blocks.push(Block {
            rect,
            role,
            parent,
            space,
            tilts,
        });
        self.blocks.len() - 1
    }

    fn doc(&mut self, rect: Rect, role: Role) -> BlockId {
        self.push(rect, role, None, Space::Document, false)
    }
}

fn heading(title: &str, subtitle: &str, x: f32, x_width: f32, y: f32, narrow: bool) -> (HeadingLayout, f32) {
    let title_size = if narrow {
        text::SECTION_TITLE_NARROW
    } else {
        text::SECTION_TITLE
    };
    let title_lines = font::wrap(title, x_width, title_size, 0.0);
    let title_y = y;
    let subtitle_y = title_y + title_lines.len() as f32 * font::line_height(title_size) + 16.0;
    let subtitle_lines = font::wrap(subtitle, x_width.min(720.0), text::SUBTITLE, 0.0);
    let bottom = subtitle_y + subtitle_lines.len() as f32 * font::line_height(text::SUBTITLE) + 64.0;
    (
        HeadingLayout {
            x,
            width: x_width,
            centered: false,
            title_lines,
            title_y,
            title_size,
            subtitle_lines,
            subtitle_y,
        },
        bottom,
    )
}

fn grid_columns(width: f32) -> usize {
    match width {
        w if w < 640.0 => 2,
        w if w < 768.0 => 3,
        w if w < 1024.0 => 4,
        _ => 6,
    }
}

/// Text of a certification pill.
pub fn certification_label(cert: &Certification) -> String {
    format!("{} - {}", cert.name, cert.issuer).to_uppercase()
}

fn external(href: &str) -> Role {
    Role::Link(LinkTarget::External(href.to_string()))
}

impl PageLayout {
    pub fn build(content: &Portfolio, viewport: [f32; 2]) -> Self {
        let [w, h] = viewport;
        let narrow = w < MD;
        let content_w = (w - SIDE_PADDING * 2.0).clamp(0.0, MAX_CONTENT_WIDTH);
        let x0 = (w - content_w) / 2.0;
        let mut b = Builder { blocks: Vec::new() };

        // Nav (fixed)
        let bar_w = (w - 32.0).clamp(0.0, 1280.0);
        let bar = Rect::new((w - bar_w) / 2.0, 16.0, bar_w, NAV_HEIGHT);
        let brand = Vec2::new(bar.x + 24.0, bar.y + (NAV_HEIGHT - 7.0 * 3.0) / 2.0);
        let mut links = Vec::new();
        let mut connect = None;
        if !narrow {
            let labels = [
                ("About", SectionId::About),
                ("Skills", SectionId::Skills),
                ("Experience", SectionId::Experience),
                ("Projects", SectionId::Projects),
            ];
            let connect_label = "Let's Connect";
            let connect_w = font::measure(connect_label, text::LABEL, text::WIDE_TRACKING) + 48.0;
            let connect_rect = Rect::new(bar.right() - 16.0 - connect_w, bar.y + 12.0, connect_w, NAV_HEIGHT - 24.0);
            let mut x = connect_rect.x - 32.0;
            for (label, target) in labels.iter().rev() {
                let lw = font::measure(label, text::LABEL, text::WIDE_TRACKING);
                x -= lw;
                let id = b.push(
                    Rect::new(x, bar.y + 20.0, lw, NAV_HEIGHT - 40.0),
                    Role::Link(LinkTarget::Section(*target)),
                    None,
                    Space::Viewport,
                    false,
                );
                links.push((label.to_uppercase(), id));
                x -= 32.0;
            }
            links.reverse();
            connect = Some(b.push(
                connect_rect,
                Role::Link(LinkTarget::Section(SectionId::Contact)),
                None,
                Space::Viewport,
                false,
            ));
        }
        let nav = NavLayout {
            bar,
            brand,
            links,
            connect,
        };

        // Hero
        let personal = &content.personal;
        let hero_section = Rect::new(0.0, 0.0, w, h);
        let (first, rest) = personal.name_lines();
        let longest = first.chars().count().max(rest.chars().count()).max(1) as f32;
        let name_size = ((content_w * 0.8) / (longest * font::ADVANCE)).clamp(4.0, 22.0);
        let name_h = font::line_height(name_size) * if rest.is_empty() { 1.0 } else { 2.0 };
        let headline_w = content_w.min(720.0);
        let headline_lines = font::wrap(&personal.headline, headline_w, text::SUBTITLE, 0.0);
        let headline_h = headline_lines.len() as f32 * font::line_height(text::SUBTITLE);
        let badge_h = 36.0;
        let buttons_h = 64.0;
        let stack_h = badge_h + 32.0 + name_h + 32.0 + headline_h + 40.0 + buttons_h;
        let stack_top = ((h - stack_h) / 2.0).max(NAV_HEIGHT + 32.0);
        let hero_content = Rect::new(x0, stack_top, content_w, stack_h);

        let badge_w = font::measure(&personal.badge.to_uppercase(), text::LABEL, text::WIDE_TRACKING) + 48.0;
        let badge = Rect::new(w / 2.0 - badge_w / 2.0, stack_top, badge_w, badge_h);
        b.doc(badge, Role::Static);
        let name_top = stack_top + badge_h + 32.0;
        let name_y = [name_top, name_top + font::line_height(name_size)];
        let headline_y = name_top + name_h + 32.0;

        let buttons_y = headline_y + headline_h + 40.0;
        let explore_w = font::measure("Explore Portfolio  >", text::LABEL, text::WIDE_TRACKING) + 64.0;
        let icon_w = buttons_h;
        let row_w = explore_w + 24.0 + icon_w * 2.0 + 16.0;
        let row_x = w / 2.0 - row_w / 2.0;
        let explore = b.doc(
            Rect::new(row_x, buttons_y, explore_w, buttons_h),
            Role::Link(LinkTarget::Section(SectionId::Projects)),
        );
        let linkedin = b.doc(
            Rect::new(row_x + explore_w + 24.0, buttons_y, icon_w, buttons_h),
            external(&personal.linkedin),
        );
        let mail = b.doc(
            Rect::new(row_x + explore_w + 24.0 + icon_w + 16.0, buttons_y, icon_w, buttons_h),
            external(&personal.mailto()),
        );
        let hero = HeroLayout {
            section: hero_section,
            content: hero_content,
            badge,
            name_size,
            name_y,
            headline_lines,
            headline_y,
            explore,
            linkedin,
            mail,
        };

        // About
        let mut y = hero_section.bottom();
        let about_top = y;
        let (about_heading, mut cy) = heading(
            &content.headings.about.title,
            &content.headings.about.subtitle,
            x0,
            content_w,
            y + SECTION_PADDING,
            narrow,
        );
        let summary_lines = font::wrap(&personal.summary, content_w.min(900.0), text::BODY, 0.0);
        let summary_y = cy;
        cy += summary_lines.len() as f32 * font::line_height(text::BODY) + 48.0;
        let edu_cols = if narrow { 1 } else { 2 };
        let edu_w = (content_w - 24.0 * (edu_cols - 1) as f32) / edu_cols as f32;
        let edu_h = 160.0;
        let mut education = Vec::new();
        for (i, _) in content.education.iter().enumerate() {
            let col = i % edu_cols;
            let row = i / edu_cols;
            let r = Rect::new(x0 + col as f32 * (edu_w + 24.0), cy + row as f32 * (edu_h + 24.0), edu_w, edu_h);
            education.push(b.doc(r, Role::Static));
        }
        if !content.education.is_empty() {
            let rows = content.education.len().div_ceil(edu_cols);
            cy += rows as f32 * (edu_h + 24.0) + 24.0;
        }
        let mut certifications = Vec::new();
        let mut cx = x0;
        for cert in &content.certifications {
            let label = certification_label(cert);
            let cw = font::measure(&label, text::LABEL, text::WIDE_TRACKING) + 40.0;
            if cx + cw > x0 + content_w && cx > x0 {
                cx = x0;
                cy += 52.0;
            }
            certifications.push(b.doc(Rect::new(cx, cy, cw, 40.0), Role::Static));
            cx += cw + 16.0;
        }
        if !content.certifications.is_empty() {
            cy += 40.0;
        }
        y = cy + SECTION_PADDING;
        let about = AboutLayout {
            section: Rect::new(0.0, about_top, w, y - about_top),
            heading: about_heading,
            summary_lines,
            summary_y,
            education,
            certifications,
        };

        // Skills
        let skills_top = y;
        let (skills_heading, cy) = heading(
            &content.headings.skills.title,
            &content.headings.skills.subtitle,
            x0,
            content_w,
            y + SECTION_PADDING,
            narrow,
        );
        let columns = grid_columns(w);
        let gap = 24.0;
        let card_w = (content_w - gap * (columns - 1) as f32) / columns as f32;
        let card_h = 160.0;
        let mut cards = Vec::new();
        for i in 0..content.skills.len() {
            let col = i % columns;
            let row = i / columns;
            let r = Rect::new(x0 + col as f32 * (card_w + gap), cy + row as f32 * (card_h + gap), card_w, card_h);
            cards.push(b.push(r, Role::Clickable, None, Space::Document, true));
        }
        let rows = content.skills.len().div_ceil(columns);
        y = cy + rows as f32 * (card_h + gap) + SECTION_PADDING;
        let skills = SkillsLayout {
            section: Rect::new(0.0, skills_top, w, y - skills_top),
            heading: skills_heading,
            columns,
            cards,
        };

        // Experience timeline
        let exp_top = y;
        let (exp_heading, cy) = heading(
            &content.headings.experience.title,
            &content.headings.experience.subtitle,
            x0,
            content_w,
            y + SECTION_PADDING,
            narrow,
        );
        let container_top = cy;
        let line_x = if narrow { x0 + 24.0 } else { x0 + content_w / 2.0 };
        let entry_w = if narrow { content_w - 72.0 } else { content_w / 2.0 - 48.0 };
        let pad = if narrow { 32.0 } else { 48.0 };
        let inner_w = (entry_w - pad * 2.0).max(1.0);
        let mut ey = container_top + 48.0;
        let mut entries = Vec::new();
        for (i, exp) in content.experiences.iter().enumerate() {
            let side = Side::for_index(i);
            let role_lines = font::wrap(&exp.role, inner_w, text::CARD_TITLE, 0.0);
            let detail_lines: Vec<Vec<String>> = exp
                .details
                .iter()
                .map(|d| font::wrap(d, inner_w - 24.0, text::BODY, 0.0))
                .collect();
            let mut card_h = pad
                + role_lines.len() as f32 * font::line_height(text::CARD_TITLE)
                + 24.0 // company line
                + 24.0
                + 44.0 // duration pill
                + 32.0;
            for lines in &detail_lines {
                card_h += lines.len() as f32 * font::line_height(text::BODY) + 16.0;
            }
            card_h += pad;
            let card_x = match (narrow, side) {
                (true, _) => x0 + 72.0,
                (false, Side::Right) => line_x + 48.0,
                (false, Side::Left) => x0,
            };
            let card = b.push(Rect::new(card_x, ey, entry_w, card_h), Role::Static, None, Space::Document, true);
            let marker = if narrow {
                Vec2::new(line_x, ey + 24.0)
            } else {
                Vec2::new(line_x, ey + card_h / 2.0)
            };
            entries.push(EntryLayout {
                card,
                side,
                marker,
                role_lines,
                detail_lines,
            });
            ey += card_h + 128.0;
        }
        let container = Rect::new(x0, container_top, content_w, ey - container_top);
        y = container.bottom() + SECTION_PADDING;
        let timeline = TimelineLayout {
            section: Rect::new(0.0, exp_top, w, y - exp_top),
            heading: exp_heading,
            container,
            line_x,
            entries,
        };

        // Projects
        let projects_top = y;
        let (projects_heading, cy) = heading(
            &content.headings.projects.title,
            &content.headings.projects.subtitle,
            x0,
            content_w,
            y + SECTION_PADDING,
            narrow,
        );
        let pcols = if narrow { 1 } else { 2 };
        let pgap = 40.0;
        let pw = (content_w - pgap * (pcols - 1) as f32) / pcols as f32;
        let mut project_cards = Vec::new();
        let mut row_top = cy;
        let mut row_h: f32 = 0.0;
        for (i, project) in content.projects.iter().enumerate() {
            let col = i % pcols;
            if col == 0 && i > 0 {
                row_top += row_h + pgap;
                row_h = 0.0;
            }
            let px = x0 + col as f32 * (pw + pgap);
            let banner = Rect::new(px, row_top, pw, 256.0);
            let body_x = px + 40.0;
            let body_w = (pw - 80.0).max(1.0);
            let mut by = banner.bottom() + 40.0;

            let mut tags = Vec::new();
            let mut tx = body_x;
            for tech in &project.tech_stack {
                let tw = font::measure(&tech.to_uppercase(), text::LABEL, text::WIDE_TRACKING) + 32.0;
                if tx + tw > body_x + body_w && tx > body_x {
                    tx = body_x;
                    by += 38.0;
                }
                tags.push(Rect::new(tx, by, tw, 30.0));
                tx += tw + 8.0;
            }
            if !project.tech_stack.is_empty() {
                by += 30.0 + 24.0;
            }
            let title_y = by;
            by += font::line_height(text::CARD_TITLE + 1.0) + 8.0;
            let description_lines = font::wrap(&project.description, body_w, text::BODY, 0.0);
            let description_y = by;
            by += description_lines.len() as f32 * font::line_height(text::BODY) + 32.0;
            let source_h = 56.0;
            let has_source = project.github_link.is_some();
            let card_bottom = if has_source { by + source_h + 40.0 } else { by + 8.0 };
            let card_rect = Rect::new(px, row_top, pw, card_bottom - row_top);
            let card = b.push(card_rect, Role::Static, None, Space::Document, true);
            let source = project.github_link.as_ref().map(|href| {
                let sw = font::measure("VIEW SOURCE", text::LABEL, text::WIDE_TRACKING) + 96.0;
                b.push(
                    Rect::new(body_x, by, sw, source_h),
                    external(href),
                    Some(card),
                    Space::Document,
                    false,
                )
            });
            row_h = row_h.max(card_rect.height);
            project_cards.push(ProjectLayout {
                card,
                banner,
                tags,
                title_y,
                description_lines,
                description_y,
                source,
            });
        }
        let grid_bottom = if content.projects.is_empty() { cy } else { row_top + row_h };
        y = grid_bottom + SECTION_PADDING;
        let projects = ProjectsLayout {
            section: Rect::new(0.0, projects_top, w, y - projects_top),
            heading: projects_heading,
            cards: project_cards,
        };

        // Contact
        let contact_top = y;
        let contact_w = content_w.min(900.0);
        let (mut contact_heading, cy) = heading(
            &content.headings.contact.title,
            &content.headings.contact.subtitle,
            (w - contact_w) / 2.0,
            contact_w,
            y + SECTION_PADDING,
            narrow,
        );
        contact_heading.centered = true;
        let button_h = 72.0;
        let email_w = font::measure("START A CONVERSATION", text::LABEL, text::WIDE_TRACKING) + 120.0;
        let linkedin_w = font::measure("LINKEDIN PROFILE", text::LABEL, text::WIDE_TRACKING) + 120.0;
        let (email_rect, linkedin_rect, buttons_bottom) = if narrow {
            let email = Rect::new(w / 2.0 - email_w / 2.0, cy, email_w, button_h);
            let linkedin = Rect::new(w / 2.0 - linkedin_w / 2.0, cy + button_h + 32.0, linkedin_w, button_h);
            (email, linkedin, linkedin.bottom())
        } else {
            let row = email_w + 32.0 + linkedin_w;
            let left = w / 2.0 - row / 2.0;
            let email = Rect::new(left, cy, email_w, button_h);
            let linkedin = Rect::new(left + email_w + 32.0, cy, linkedin_w, button_h);
            (email, linkedin, cy + button_h)
        };
        let email = b.doc(email_rect, external(&personal.mailto()));
        let linkedin_contact = b.doc(linkedin_rect, external(&personal.linkedin));
        y = buttons_bottom + SECTION_PADDING;
        let contact = ContactLayout {
            section: Rect::new(0.0, contact_top, w, y - contact_top),
            heading: contact_heading,
            email,
            linkedin: linkedin_contact,
        };

        let footer = Rect::new(0.0, y, w, 200.0);
        let document_height = footer.bottom();

        // Chat (fixed)
        let chat_button = b.push(
            Rect::new(w - 24.0 - 56.0, h - 24.0 - 56.0, 56.0, 56.0),
            Role::Button(Action::ToggleChat),
            None,
            Space::Viewport,
            false,
        );
        let panel_w = (w - 48.0).min(340.0);
        let panel_h = 240.0;
        let chat = ChatLayout {
            button: chat_button,
            panel: Rect::new(w - 24.0 - panel_w, h - 24.0 - 56.0 - 16.0 - panel_h, panel_w, panel_h),
        };

        Self {
            viewport,
            blocks: b.blocks,
            nav,
            hero,
            about,
            skills,
            timeline,
            projects,
            contact,
            footer,
            chat,
            document_height,
        }
    }

    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id]
    }

    /// Top of a section in document coordinates, the anchor-scroll target.
    pub fn section_top(&self, id: SectionId) -> f32 {
        match id {
            SectionId::Hero => self.hero.section.y,
            SectionId::About => self.about.section.y,
            SectionId::Skills => self.skills.section.y,
            SectionId::Experience => self.timeline.section.y,
            SectionId::Projects => self.projects.section.y,
            SectionId::Contact => self.contact.section.y,
        }
    }

    /// Tracked container relative to the viewport.
    pub fn timeline_geometry(&self, scroll: f32) -> ContainerGeometry {
        ContainerGeometry {
            top: self.timeline.container.y - scroll,
            height: self.timeline.container.height,
        }
    }

    /// Rect of a block in viewport coordinates.
    pub fn screen_rect(&self, id: BlockId, scroll: f32) -> Rect {
        let block = &self.blocks[id];
        match block.space {
            Space::Document => block.rect.translate(Vec2::new(0.0, -scroll)),
            Space::Viewport => block.rect,
        }
    }

    /// Topmost block under a viewport point. Fixed chrome wins over the
    /// document; later blocks win over earlier ones.
    pub fn hit_test(&self, point: Vec2, scroll: f32) -> Option<BlockId> {
        let doc_point = Vec2::new(point.x, point.y + scroll);
        let fixed = self
            .blocks
            .iter()
            .enumerate()
            .rev()
            .find(|(_, b)| b.space == Space::Viewport && b.rect.contains(point));
        if let Some((id, _)) = fixed {
            return Some(id);
        }
        self.blocks
            .iter()
            .enumerate()
            .rev()
            .find(|(_, b)| b.space == Space::Document && b.rect.contains(doc_point))
            .map(|(id, _)| id)
    }

    fn ancestors(&self, id: BlockId) -> impl Iterator<Item = BlockId> + '_ {
        std::iter::successors(Some(id), move |&current| self.blocks[current].parent)
    }

    /// Links and buttons are interactive themselves; `Clickable` makes the
    /// whole subtree interactive.
    pub fn is_interactive(&self, id: BlockId) -> bool {
        if matches!(self.blocks[id].role, Role::Link(_) | Role::Button(_)) {
            return true;
        }
        self.ancestors(id)
            .any(|a| self.blocks[a].role == Role::Clickable)
    }

    pub fn interactive_at(&self, point: Vec2, scroll: f32) -> bool {
        self.hit_test(point, scroll)
            .map(|id| self.is_interactive(id))
            .unwrap_or(false)
    }

    /// The tilting card under the pointer, if any.
    pub fn tilt_target(&self, point: Vec2, scroll: f32) -> Option<BlockId> {
        let hit = self.hit_test(point, scroll)?;
        self.ancestors(hit).find(|&a| self.blocks[a].tilts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn layout(w: f32, h: f32) -> PageLayout {
        PageLayout::build(&Portfolio::default(), [w, h])
    }

    #[rstest]
    #[case(500.0, 2)]
    #[case(700.0, 3)]
    #[case(900.0, 4)]
    #[case(1920.0, 6)]
    fn skill_columns_follow_breakpoints(#[case] width: f32, #[case] columns: usize) {
        assert_eq!(layout(width, 900.0).skills.columns, columns);
    }

    #[test]
    fn sections_are_stacked_in_order() {
        let l = layout(1440.0, 900.0);
        let tops = [
            l.section_top(SectionId::Hero),
            l.section_top(SectionId::About),
            l.section_top(SectionId::Skills),
            l.section_top(SectionId::Experience),
            l.section_top(SectionId::Projects),
            l.section_top(SectionId::Contact),
        ];
        for pair in tops.windows(2) {
            assert!(pair[0] < pair[1], "{tops:?}");
        }
        assert!(l.document_height > l.section_top(SectionId::Contact));
        assert_eq!(l.about.section.y, 900.0);
    }

    #[test]
    fn timeline_container_holds_every_entry() {
        let l = layout(1440.0, 900.0);
        assert_eq!(l.timeline.entries.len(), 3);
        let container = l.timeline.container;
        for entry in &l.timeline.entries {
            let card = l.block(entry.card).rect;
            assert!(card.y >= container.y && card.bottom() <= container.bottom());
        }
    }

    #[test]
    fn timeline_geometry_follows_scroll() {
        let l = layout(1440.0, 900.0);
        let g0 = l.timeline_geometry(0.0);
        let g1 = l.timeline_geometry(500.0);
        assert_eq!(g0.top - g1.top, 500.0);
        assert_eq!(g0.height, g1.height);
        assert!(g0.height > 0.0);
    }

    #[test]
    fn cards_alternate_around_the_line() {
        let l = layout(1440.0, 900.0);
        let line = l.timeline.line_x;
        let first = l.block(l.timeline.entries[0].card).rect;
        let second = l.block(l.timeline.entries[1].card).rect;
        assert!(first.x > line);
        assert!(second.right() < line);
    }

    #[test]
    fn narrow_timeline_stacks_cards_right_of_line() {
        let l = layout(600.0, 900.0);
        for entry in &l.timeline.entries {
            assert!(l.block(entry.card).rect.x > l.timeline.line_x);
        }
        assert!(l.nav.links.is_empty());
        assert!(l.nav.connect.is_none());
    }

    #[test]
    fn skill_cards_are_clickable_and_tilt() {
        let l = layout(1440.0, 900.0);
        let card = l.block(l.skills.cards[0]).rect;
        let scroll = card.y - 100.0;
        let point = Vec2::new(card.center().x, card.center().y - scroll);
        assert_eq!(l.hit_test(point, scroll), Some(l.skills.cards[0]));
        assert!(l.interactive_at(point, scroll));
        assert_eq!(l.tilt_target(point, scroll), Some(l.skills.cards[0]));
    }

    #[test]
    fn project_card_is_not_clickable_but_its_link_is() {
        let l = layout(1440.0, 900.0);
        let project = &l.projects.cards[0];
        let card = l.block(project.card).rect;
        let source = l.block(project.source.unwrap()).rect;
        let scroll = card.y;

        let on_banner = Vec2::new(card.center().x, project.banner.center().y - scroll);
        assert!(!l.interactive_at(on_banner, scroll));
        assert_eq!(l.tilt_target(on_banner, scroll), Some(project.card));

        let on_link = Vec2::new(source.center().x, source.center().y - scroll);
        assert!(l.interactive_at(on_link, scroll));
        // the link sits inside the tilting card
        assert_eq!(l.tilt_target(on_link, scroll), Some(project.card));
    }

    #[test]
    fn fixed_chrome_wins_over_document() {
        let l = layout(1440.0, 900.0);
        let button = l.block(l.chat.button).rect;
        let point = button.center();
        assert_eq!(l.hit_test(point, 0.0), Some(l.chat.button));
        assert!(l.interactive_at(point, 1234.0));
    }

    #[test]
    fn nav_links_target_sections() {
        let l = layout(1440.0, 900.0);
        let labels: Vec<&str> = l.nav.links.iter().map(|(label, _)| label.as_str()).collect();
        assert_eq!(labels, vec!["ABOUT", "SKILLS", "EXPERIENCE", "PROJECTS"]);
        let (_, about) = &l.nav.links[0];
        assert_eq!(
            l.block(*about).role,
            Role::Link(LinkTarget::Section(SectionId::About))
        );
    }

    #[test]
    fn empty_space_is_not_interactive() {
        let l = layout(1440.0, 900.0);
        assert!(l.hit_test(Vec2::new(2.0, 450.0), 0.0).is_none());
        assert!(!l.interactive_at(Vec2::new(2.0, 450.0), 0.0));
    }

    #[test]
    fn empty_timeline_still_has_a_container() {
        let mut content = Portfolio::default();
        content.experiences.clear();
        let l = PageLayout::build(&content, [1440.0, 900.0]);
        assert!(l.timeline.entries.is_empty());
        assert_eq!(l.timeline.container.height, 48.0);
    }
}
