use crate::gfx::math::Vec2;

/// Background offsets derived from the pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackdropVisual {
    pub grid_shift_x: f32,
    pub blob_a: Vec2,
    pub blob_b: Vec2,
}

impl BackdropVisual {
    pub fn from_pointer(pointer: Vec2) -> Self {
        Self {
            grid_shift_x: pointer.x / 50.0,
            blob_a: Vec2::new(pointer.x / 20.0, pointer.y / 20.0),
            blob_b: Vec2::new(-pointer.x / 25.0, -pointer.y / 25.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_move_at_different_rates() {
        let v = BackdropVisual::from_pointer(Vec2::new(500.0, 250.0));
        assert_eq!(v.grid_shift_x, 10.0);
        assert_eq!(v.blob_a, Vec2::new(25.0, 12.5));
        assert_eq!(v.blob_b, Vec2::new(-20.0, -10.0));
    }

    #[test]
    fn origin_is_neutral() {
        let v = BackdropVisual::from_pointer(Vec2::ZERO);
        assert_eq!(v.grid_shift_x, 0.0);
        assert_eq!(v.blob_a, Vec2::ZERO);
    }
}
