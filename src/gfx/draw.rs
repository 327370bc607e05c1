use super::font;
use super::math::{Color, Rect, Vec2};
use anyhow::Result;
use glow::HasContext;

#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
}

/// How the fragment shader fills a quad, matched by `uEffectMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Solid = 0,
    Disc = 1,
    Ring = 2,
    Glow = 3,
}

/// Maps a source rect onto an arbitrary quad by bilinear interpolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Warp {
    pub source: Rect,
    /// Clockwise from top-left.
    pub target: [Vec2; 4],
}

impl Warp {
    pub fn apply(&self, p: Vec2) -> Vec2 {
        let s = self.source;
        if s.width <= 0.0 || s.height <= 0.0 {
            return p;
        }
        let u = (p.x - s.x) / s.width;
        let v = (p.y - s.y) / s.height;
        let [tl, tr, br, bl] = self.target;
        let top = tl.lerp(tr, u);
        let bottom = bl.lerp(br, u);
        top.lerp(bottom, v)
    }
}

/// Applied to every quad until reset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub offset: Vec2,
    pub opacity: f32,
    pub warp: Option<Warp>,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        offset: Vec2::ZERO,
        opacity: 1.0,
        warp: None,
    };

    pub fn apply(&self, p: Vec2) -> Vec2 {
        let p = match &self.warp {
            Some(warp) => warp.apply(p),
            None => p,
        };
        p + self.offset
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

pub struct DrawContext {
    gl: glow::Context,
    program: glow::Program,
    vbo: glow::Buffer,
    vertices: Vec<Vertex>,
    viewport: [f32; 2],
    batch: Option<(Color, Fill)>,
    transform: Transform,

    // Uniform locations
    u_viewport: Option<glow::UniformLocation>,
    u_color: Option<glow::UniformLocation>,
    u_effect_mode: Option<glow::UniformLocation>,
}

impl DrawContext {
    pub fn new(gl: glow::Context, program: glow::Program) -> Result<Self> {
        let vbo = unsafe {
            gl.create_buffer()
                .map_err(|e| anyhow::anyhow!("Failed to create buffer: {}", e))?
        };

        let u_viewport = unsafe { gl.get_uniform_location(program, "uViewport") };
        let u_color = unsafe { gl.get_uniform_location(program, "uColor") };
        let u_effect_mode = unsafe { gl.get_uniform_location(program, "uEffectMode") };

        Ok(Self {
            gl,
            program,
            vbo,
            vertices: Vec::with_capacity(4096),
            viewport: [800.0, 600.0],
            batch: None,
            transform: Transform::IDENTITY,
            u_viewport,
            u_color,
            u_effect_mode,
        })
    }

    pub fn viewport(&self) -> [f32; 2] {
        self.viewport
    }

    pub fn begin(&mut self, viewport_px: [f32; 2], clear: Color) {
        self.viewport = viewport_px;
        self.vertices.clear();
        self.batch = None;
        self.transform = Transform::IDENTITY;

        unsafe {
            self.gl.viewport(0, 0, viewport_px[0] as i32, viewport_px[1] as i32);
            self.gl.clear_color(clear.r, clear.g, clear.b, clear.a);
            self.gl.clear(glow::COLOR_BUFFER_BIT);

            self.gl.enable(glow::BLEND);
            self.gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);

            self.gl.use_program(Some(self.program));
            if let Some(loc) = self.u_viewport {
                self.gl.uniform_2_f32(Some(&loc), viewport_px[0], viewport_px[1]);
            }
        }
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    pub fn reset_transform(&mut self) {
        self.transform = Transform::IDENTITY;
    }

    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.fill_rect(Rect::new(x, y, w, h), color, Fill::Solid);
    }

    pub fn fill_rect(&mut self, r: Rect, color: Color, fill: Fill) {
        self.quad(r.corners(), color, fill);
    }

    /// Arbitrary quad, corners in clockwise order starting top-left.
    pub fn quad(&mut self, corners: [Vec2; 4], color: Color, fill: Fill) {
        let color = color.fade(self.transform.opacity);
        if color.a <= 0.0 {
            return;
        }
        self.use_batch(color, fill);

        let [a, b, c, d] = corners.map(|p| self.transform.apply(p));
        let v = |p: Vec2, u: f32, w: f32| Vertex { pos: [p.x, p.y], uv: [u, w] };
        self.vertices.extend_from_slice(&[
            v(a, 0.0, 0.0),
            v(b, 1.0, 0.0),
            v(c, 1.0, 1.0),
            v(a, 0.0, 0.0),
            v(c, 1.0, 1.0),
            v(d, 0.0, 1.0),
        ]);
    }

    pub fn disc(&mut self, center: Vec2, radius: f32, color: Color) {
        let r = Rect::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0);
        self.fill_rect(r, color, Fill::Disc);
    }

    pub fn ring(&mut self, center: Vec2, radius: f32, color: Color) {
        let r = Rect::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0);
        self.fill_rect(r, color, Fill::Ring);
    }

    pub fn glow(&mut self, r: Rect, color: Color) {
        self.fill_rect(r, color, Fill::Glow);
    }

    /// Outline drawn as four thin rects inside `r`.
    pub fn frame(&mut self, r: Rect, thickness: f32, color: Color) {
        self.rect(r.x, r.y, r.width, thickness, color);
        self.rect(r.x, r.bottom() - thickness, r.width, thickness, color);
        self.rect(r.x, r.y + thickness, thickness, r.height - thickness * 2.0, color);
        self.rect(r.right() - thickness, r.y + thickness, thickness, r.height - thickness * 2.0, color);
    }

    /// Draws one line of bitmap text and returns its width.
    pub fn text(&mut self, text: &str, x: f32, y: f32, size: f32, tracking: f32, color: Color) -> f32 {
        let advance = (font::ADVANCE + tracking) * size;
        let mut pen = x;
        for c in text.chars() {
            let rows = font::glyph(c);
            for (row, bits) in rows.iter().enumerate() {
                // merge horizontal runs into single rects
                let mut col = 0;
                while col < font::GLYPH_COLS {
                    if bits & (1 << (font::GLYPH_COLS - 1 - col)) == 0 {
                        col += 1;
                        continue;
                    }
                    let start = col;
                    while col < font::GLYPH_COLS && bits & (1 << (font::GLYPH_COLS - 1 - col)) != 0 {
                        col += 1;
                    }
                    self.rect(
                        pen + start as f32 * size,
                        y + row as f32 * size,
                        (col - start) as f32 * size,
                        size,
                        color,
                    );
                }
            }
            pen += advance;
        }
        font::measure(text, size, tracking)
    }

    pub fn text_centered(&mut self, text: &str, center_x: f32, y: f32, size: f32, tracking: f32, color: Color) {
        let w = font::measure(text, size, tracking);
        self.text(text, center_x - w * 0.5, y, size, tracking, color);
    }

    fn use_batch(&mut self, color: Color, fill: Fill) {
        if self.batch == Some((color, fill)) {
            return;
        }
        self.flush_batch();
        unsafe {
            if let Some(loc) = self.u_color {
                self.gl.uniform_4_f32(Some(&loc), color.r, color.g, color.b, color.a);
            }
            if let Some(loc) = self.u_effect_mode {
                self.gl.uniform_1_i32(Some(&loc), fill as i32);
            }
        }
        self.batch = Some((color, fill));
    }

    fn flush_batch(&mut self) {
        if self.vertices.is_empty() {
            return;
        }

        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));

            let data = bytemuck::cast_slice(&self.vertices);
            self.gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, data, glow::DYNAMIC_DRAW);

            let a_pos = self.gl.get_attrib_location(self.program, "aPos");
            let a_uv = self.gl.get_attrib_location(self.program, "aUV");

            if let Some(a_pos) = a_pos {
                self.gl.enable_vertex_attrib_array(a_pos);
                self.gl.vertex_attrib_pointer_f32(
                    a_pos,
                    2,
                    glow::FLOAT,
                    false,
                    std::mem::size_of::<Vertex>() as i32,
                    0,
                );
            }

            if let Some(a_uv) = a_uv {
                self.gl.enable_vertex_attrib_array(a_uv);
                self.gl.vertex_attrib_pointer_f32(
                    a_uv,
                    2,
                    glow::FLOAT,
                    false,
                    std::mem::size_of::<Vertex>() as i32,
                    8,
                );
            }

            self.gl.draw_arrays(glow::TRIANGLES, 0, self.vertices.len() as i32);
        }

        self.vertices.clear();
    }

    pub fn flush(&mut self) {
        self.flush_batch();
        self.batch = None;
    }
}

impl Drop for DrawContext {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.vbo);
            self.gl.delete_program(self.program);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_warp_keeps_points() {
        let source = Rect::new(10.0, 10.0, 100.0, 50.0);
        let warp = Warp {
            source,
            target: source.corners(),
        };
        let p = Vec2::new(35.0, 42.0);
        let q = warp.apply(p);
        assert!((q.x - p.x).abs() < 1e-4 && (q.y - p.y).abs() < 1e-4);
    }

    #[test]
    fn warp_maps_corners_and_center() {
        let source = Rect::new(0.0, 0.0, 100.0, 100.0);
        let target = [
            Vec2::new(10.0, 0.0),
            Vec2::new(90.0, 0.0),
            Vec2::new(100.0, 100.0),
            Vec2::new(0.0, 100.0),
        ];
        let warp = Warp { source, target };
        assert_eq!(warp.apply(Vec2::new(0.0, 0.0)), target[0]);
        assert_eq!(warp.apply(Vec2::new(100.0, 100.0)), target[2]);
        assert_eq!(warp.apply(Vec2::new(50.0, 50.0)), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn transform_offsets_after_warp() {
        let t = Transform {
            offset: Vec2::new(5.0, -5.0),
            ..Transform::IDENTITY
        };
        assert_eq!(t.apply(Vec2::new(1.0, 1.0)), Vec2::new(6.0, -4.0));
    }

    #[test]
    fn degenerate_source_is_ignored() {
        let warp = Warp {
            source: Rect::new(0.0, 0.0, 0.0, 10.0),
            target: [Vec2::ZERO; 4],
        };
        assert_eq!(warp.apply(Vec2::new(3.0, 4.0)), Vec2::new(3.0, 4.0));
    }
}
