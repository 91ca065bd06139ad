use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A layout attribute a constraint can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Anchor {
    Top,
    Bottom,
    Leading,
    Trailing,
    Left,
    Right,
    Width,
    Height,
    CenterX,
    CenterY,
    FirstBaseline,
    LastBaseline,
}

/// Layout axis an anchor belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Anchor {
    /// Edge anchors, in the order pin operations create them
    pub const EDGES: [Anchor; 4] = [Anchor::Top, Anchor::Leading, Anchor::Bottom, Anchor::Trailing];

    /// Center anchors
    pub const CENTERS: [Anchor; 2] = [Anchor::CenterX, Anchor::CenterY];

    /// Dimension anchors
    pub const DIMENSIONS: [Anchor; 2] = [Anchor::Width, Anchor::Height];

    pub fn axis(self) -> Axis {
        match self {
            Anchor::Leading
            | Anchor::Trailing
            | Anchor::Left
            | Anchor::Right
            | Anchor::Width
            | Anchor::CenterX => Axis::Horizontal,
            Anchor::Top
            | Anchor::Bottom
            | Anchor::Height
            | Anchor::CenterY
            | Anchor::FirstBaseline
            | Anchor::LastBaseline => Axis::Vertical,
        }
    }

    /// Width and height can be constrained against a literal value.
    pub fn is_dimension(self) -> bool {
        matches!(self, Anchor::Width | Anchor::Height)
    }

    pub fn name(self) -> &'static str {
        match self {
            Anchor::Top => "top",
            Anchor::Bottom => "bottom",
            Anchor::Leading => "leading",
            Anchor::Trailing => "trailing",
            Anchor::Left => "left",
            Anchor::Right => "right",
            Anchor::Width => "width",
            Anchor::Height => "height",
            Anchor::CenterX => "centerX",
            Anchor::CenterY => "centerY",
            Anchor::FirstBaseline => "firstBaseline",
            Anchor::LastBaseline => "lastBaseline",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One edge of a view that can take part in a pin operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Trailing,
    Bottom,
    Leading,
}

impl Side {
    /// Pin order: top, leading, bottom, trailing
    pub const ALL: [Side; 4] = [Side::Top, Side::Leading, Side::Bottom, Side::Trailing];

    pub fn anchor(self) -> Anchor {
        match self {
            Side::Top => Anchor::Top,
            Side::Trailing => Anchor::Trailing,
            Side::Bottom => Anchor::Bottom,
            Side::Leading => Anchor::Leading,
        }
    }
}

bitflags! {
    /// Set of sides selecting which edges a pin operation touches.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Sides: u8 {
        const TOP = 1 << 0;
        const TRAILING = 1 << 1;
        const BOTTOM = 1 << 2;
        const LEADING = 1 << 3;
        const HORIZONTAL = Self::LEADING.bits() | Self::TRAILING.bits();
        const VERTICAL = Self::TOP.bits() | Self::BOTTOM.bits();
        const ALL = Self::HORIZONTAL.bits() | Self::VERTICAL.bits();
    }
}

impl Sides {
    pub fn contains_side(self, side: Side) -> bool {
        self.contains(Sides::from(side))
    }

    /// Requested sides in pin order
    pub fn sides(self) -> impl Iterator<Item = Side> {
        Side::ALL.into_iter().filter(move |side| self.contains_side(*side))
    }
}

impl Default for Sides {
    fn default() -> Self {
        Sides::ALL
    }
}

impl From<Side> for Sides {
    fn from(side: Side) -> Self {
        match side {
            Side::Top => Sides::TOP,
            Side::Trailing => Sides::TRAILING,
            Side::Bottom => Sides::BOTTOM,
            Side::Leading => Sides::LEADING,
        }
    }
}

/// Named sub-region of a view usable as a pinning target.
///
/// The rectangles are supplied by the engine; the facade only refers to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutGuide {
    Margins,
    SafeArea,
    ReadableContent,
}

impl fmt::Display for LayoutGuide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutGuide::Margins => write!(f, "layoutMargins"),
            LayoutGuide::SafeArea => write!(f, "safeArea"),
            LayoutGuide::ReadableContent => write!(f, "readableContent"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sides_iterate_in_pin_order() {
        let sides: Vec<Side> = Sides::ALL.sides().collect();
        assert_eq!(sides, vec![Side::Top, Side::Leading, Side::Bottom, Side::Trailing]);

        let horizontal: Vec<Side> = Sides::HORIZONTAL.sides().collect();
        assert_eq!(horizontal, vec![Side::Leading, Side::Trailing]);
    }

    #[test]
    fn test_default_sides_is_all() {
        assert_eq!(Sides::default(), Sides::ALL);
        assert!(Sides::default().contains_side(Side::Bottom));
    }

    #[test]
    fn test_anchor_axis() {
        assert_eq!(Anchor::CenterX.axis(), Axis::Horizontal);
        assert_eq!(Anchor::LastBaseline.axis(), Axis::Vertical);
        assert!(Anchor::Height.is_dimension());
        assert!(!Anchor::Top.is_dimension());
    }
}
