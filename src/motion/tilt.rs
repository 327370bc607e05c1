use crate::gfx::math::{Rect, Vec2};

/// Perspective distance used when projecting tilted cards.
pub const PERSPECTIVE: f32 = 1000.0;

/// A card's 3D tilt in degrees, plus its uniform scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTilt {
    pub rotate_x: f32,
    pub rotate_y: f32,
    pub scale: f32,
}

impl CardTilt {
    pub const REST: CardTilt = CardTilt {
        rotate_x: 0.0,
        rotate_y: 0.0,
        scale: 1.0,
    };

    /// Tilt toward the pointer: the card leans away from where it is
    /// pressed, ten pixels per degree.
    pub fn toward(card: Rect, pointer: Vec2) -> Self {
        let x = pointer.x - card.x;
        let y = pointer.y - card.y;
        let center_x = card.width / 2.0;
        let center_y = card.height / 2.0;
        CardTilt {
            rotate_x: (y - center_y) / 10.0,
            rotate_y: (center_x - x) / 10.0,
            scale: 1.02,
        }
    }

    /// Hero block tilt, driven by the pointer's distance from the viewport
    /// center.
    pub fn hero(pointer: Vec2, viewport: [f32; 2]) -> Self {
        CardTilt {
            rotate_x: (pointer.y - viewport[1] / 2.0) / 100.0,
            rotate_y: (viewport[0] / 2.0 - pointer.x) / 100.0,
            scale: 1.0,
        }
    }

    pub fn is_rest(&self) -> bool {
        *self == Self::REST
    }

    /// Projects the tilted card outline back onto the screen. Corners are
    /// returned clockwise from top-left.
    pub fn project(&self, card: Rect) -> [Vec2; 4] {
        let center = card.center();
        let (sin_x, cos_x) = self.rotate_x.to_radians().sin_cos();
        let (sin_y, cos_y) = self.rotate_y.to_radians().sin_cos();

        card.corners().map(|corner| {
            let x = (corner.x - center.x) * self.scale;
            let y = (corner.y - center.y) * self.scale;
            // rotateY
            let x1 = x * cos_y;
            let z1 = -x * sin_y;
            // rotateX
            let y2 = y * cos_x - z1 * sin_x;
            let z2 = y * sin_x + z1 * cos_x;
            let w = PERSPECTIVE / (PERSPECTIVE - z2).max(1.0);
            Vec2::new(center.x + x1 * w, center.y + y2 * w)
        })
    }
}

impl Default for CardTilt {
    fn default() -> Self {
        Self::REST
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_at_center_does_not_rotate() {
        let card = Rect::new(100.0, 100.0, 200.0, 160.0);
        let tilt = CardTilt::toward(card, Vec2::new(200.0, 180.0));
        assert_eq!(tilt.rotate_x, 0.0);
        assert_eq!(tilt.rotate_y, 0.0);
        assert_eq!(tilt.scale, 1.02);
    }

    #[test]
    fn pointer_at_corner() {
        let card = Rect::new(0.0, 0.0, 200.0, 100.0);
        let tilt = CardTilt::toward(card, Vec2::new(0.0, 0.0));
        assert_eq!(tilt.rotate_x, -5.0);
        assert_eq!(tilt.rotate_y, 10.0);
    }

    #[test]
    fn hero_tilt_from_viewport_center() {
        let tilt = CardTilt::hero(Vec2::new(0.0, 1000.0), [1600.0, 1000.0]);
        assert_eq!(tilt.rotate_x, 5.0);
        assert_eq!(tilt.rotate_y, 8.0);
    }

    #[test]
    fn rest_projection_is_identity() {
        let card = Rect::new(10.0, 20.0, 30.0, 40.0);
        let projected = CardTilt::REST.project(card);
        for (p, c) in projected.iter().zip(card.corners()) {
            assert!((p.x - c.x).abs() < 1e-4 && (p.y - c.y).abs() < 1e-4);
        }
    }

    #[test]
    fn rotate_y_brings_one_edge_closer() {
        let card = Rect::new(0.0, 0.0, 200.0, 100.0);
        let tilt = CardTilt {
            rotate_x: 0.0,
            rotate_y: 10.0,
            scale: 1.0,
        };
        let [tl, tr, br, bl] = tilt.project(card);
        // left edge comes toward the viewer and grows
        assert!((bl.y - tl.y) > (br.y - tr.y));
    }
}
