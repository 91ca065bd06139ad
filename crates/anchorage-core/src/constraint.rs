use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Anchor, LayoutGuide, Priority, ViewId};

/// Relation between the two sides of a constraint equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Relation {
    #[default]
    Equal,
    LessOrEqual,
    GreaterOrEqual,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Equal => write!(f, "=="),
            Relation::LessOrEqual => write!(f, "<="),
            Relation::GreaterOrEqual => write!(f, ">="),
        }
    }
}

/// The thing an anchor belongs to: a view or one of its layout guides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Item {
    View(ViewId),
    Guide(ViewId, LayoutGuide),
}

impl Item {
    /// View the item lives on
    pub fn view(&self) -> ViewId {
        match self {
            Item::View(view) | Item::Guide(view, _) => *view,
        }
    }
}

impl From<ViewId> for Item {
    fn from(view: ViewId) -> Self {
        Item::View(view)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::View(view) => write!(f, "{}", view),
            Item::Guide(view, guide) => write!(f, "{}.{}", view, guide),
        }
    }
}

/// An anchor on a specific item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnchorRef {
    pub item: Item,
    pub anchor: Anchor,
}

impl AnchorRef {
    pub fn new(item: impl Into<Item>, anchor: Anchor) -> Self {
        AnchorRef {
            item: item.into(),
            anchor,
        }
    }
}

impl fmt::Display for AnchorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.item, self.anchor)
    }
}

/// One linear equation between two anchors:
/// `first <relation> second * multiplier + constant`.
///
/// When `second` is `None` the constraint pins a dimension to `constant`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub first: AnchorRef,
    pub relation: Relation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second: Option<AnchorRef>,
    pub multiplier: f32,
    pub constant: f32,
    pub priority: Priority,
}

impl Constraint {
    /// `first == second`, multiplier 1, constant 0, required
    pub fn equal(first: AnchorRef, second: AnchorRef) -> Self {
        Self::relate(first, Relation::Equal, second)
    }

    pub fn relate(first: AnchorRef, relation: Relation, second: AnchorRef) -> Self {
        Constraint {
            first,
            relation,
            second: Some(second),
            multiplier: 1.0,
            constant: 0.0,
            priority: Priority::REQUIRED,
        }
    }

    /// `first == constant`, for width and height anchors
    pub fn equal_to_constant(first: AnchorRef, constant: f32) -> Self {
        Constraint {
            first,
            relation: Relation::Equal,
            second: None,
            multiplier: 1.0,
            constant,
            priority: Priority::REQUIRED,
        }
    }

    pub fn with_relation(mut self, relation: Relation) -> Self {
        self.relation = relation;
        self
    }

    pub fn with_constant(mut self, constant: f32) -> Self {
        self.constant = constant;
        self
    }

    pub fn with_multiplier(mut self, multiplier: f32) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Whether `view` appears on either side of the equation
    pub fn involves(&self, view: ViewId) -> bool {
        self.first.item.view() == view
            || self.second.map(|s| s.item.view() == view).unwrap_or(false)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.first, self.relation)?;
        match self.second {
            Some(second) => {
                write!(f, "{}", second)?;
                if self.multiplier != 1.0 {
                    write!(f, " * {}", self.multiplier)?;
                }
                if self.constant != 0.0 {
                    let sign = if self.constant < 0.0 { '-' } else { '+' };
                    write!(f, " {} {}", sign, self.constant.abs())?;
                }
            }
            None => write!(f, "{}", self.constant)?,
        }
        if !self.priority.is_required() {
            write!(f, " @{}", self.priority)?;
        }
        Ok(())
    }
}

/// Handle to a constraint registered with an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstraintId(pub u32);

impl fmt::Display for ConstraintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "constraint#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_display() {
        let a = ViewId::from_raw(1);
        let b = ViewId::from_raw(2);

        let pin = Constraint::equal(AnchorRef::new(a, Anchor::Bottom), AnchorRef::new(b, Anchor::Bottom))
            .with_constant(-8.0);
        assert_eq!(pin.to_string(), "view#1.bottom == view#2.bottom - 8");

        let guide = Constraint::equal(
            AnchorRef::new(a, Anchor::Top),
            AnchorRef::new(Item::Guide(b, LayoutGuide::SafeArea), Anchor::Top),
        );
        assert_eq!(guide.to_string(), "view#1.top == view#2.safeArea.top");

        let width = Constraint::equal_to_constant(AnchorRef::new(a, Anchor::Width), 100.0)
            .with_priority(Priority::DEFAULT_HIGH);
        assert_eq!(width.to_string(), "view#1.width == 100 @750");
    }

    #[test]
    fn test_constraint_involves() {
        let a = ViewId::from_raw(1);
        let b = ViewId::from_raw(2);
        let c = ViewId::from_raw(3);

        let constraint =
            Constraint::equal(AnchorRef::new(a, Anchor::Top), AnchorRef::new(b, Anchor::Top));
        assert!(constraint.involves(a));
        assert!(constraint.involves(b));
        assert!(!constraint.involves(c));
    }
}
