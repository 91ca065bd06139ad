use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Offsets applied to each edge when pinning a view to a target.
///
/// `left` is applied to the leading edge and `right` to the trailing edge.
/// Bottom and trailing offsets are negated when turned into constraint
/// constants, so positive insets always move the view inwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeInsets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl EdgeInsets {
    /// All four insets set to zero
    pub const ZERO: EdgeInsets = EdgeInsets {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    /// Create insets from explicit top/left/bottom/right values
    pub fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        EdgeInsets {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Same inset on every edge
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Horizontal and vertical insets
    pub fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }
}

impl From<f32> for EdgeInsets {
    fn from(value: f32) -> Self {
        EdgeInsets::uniform(value)
    }
}

impl fmt::Display for EdgeInsets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{top: {}, left: {}, bottom: {}, right: {}}}",
            self.top, self.left, self.bottom, self.right
        )
    }
}

/// Axis-aligned rectangle describing where the engine last placed a view.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    pub fn max(&self) -> Vec2 {
        self.origin + self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insets_constructors() {
        assert_eq!(EdgeInsets::uniform(4.0), EdgeInsets::new(4.0, 4.0, 4.0, 4.0));
        assert_eq!(
            EdgeInsets::symmetric(2.0, 6.0),
            EdgeInsets::new(6.0, 2.0, 6.0, 2.0)
        );
        assert_eq!(EdgeInsets::default(), EdgeInsets::ZERO);
        assert_eq!(EdgeInsets::from(3.0), EdgeInsets::uniform(3.0));
    }

    #[test]
    fn test_rect_center() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.center(), Vec2::new(60.0, 45.0));
        assert_eq!(rect.max(), Vec2::new(110.0, 70.0));
    }
}
