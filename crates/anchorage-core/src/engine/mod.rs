//! The seam between the facade and whatever actually lays views out.

pub mod memory;

use crate::vfl::FormatOptions;
use crate::{Constraint, ConstraintId, Metrics, ViewDictionary, ViewId};

/// A constraint-based layout engine.
///
/// Implementations own the view hierarchy, layout guides and solving. The
/// facade only reads parent links, toggles implicit sizing and hands over
/// constraint objects.
pub trait LayoutEngine {
    /// Error raised while expanding visual format strings
    type Error: std::error::Error + 'static;

    /// Immediate parent of `view`, if it is attached to one
    fn parent(&self, view: ViewId) -> Option<ViewId>;

    /// Toggle the engine's implicit sizing translation for `view`.
    ///
    /// When enabled, the engine derives constraints from the view's frame,
    /// which conflicts with explicit constraints on the same view.
    fn set_translates_autoresizing_mask(&mut self, view: ViewId, enabled: bool);

    /// Register and activate a single constraint
    fn activate(&mut self, constraint: Constraint) -> ConstraintId;

    /// Add constraints to `owner`'s constraint list, activating them
    fn add_constraints(&mut self, owner: ViewId, constraints: Vec<Constraint>) -> Vec<ConstraintId>;

    /// Expand one visual format string into constraints without adding them
    fn constraints_with_visual_format(
        &self,
        format: &str,
        options: FormatOptions,
        metrics: &Metrics,
        views: &ViewDictionary,
    ) -> Result<Vec<Constraint>, Self::Error>;

    /// Look up a previously created constraint
    fn constraint(&self, id: ConstraintId) -> Option<Constraint>;

    /// Change the constant of a created constraint
    fn set_constant(&mut self, id: ConstraintId, constant: f32);

    /// Activate or deactivate a created constraint
    fn set_active(&mut self, id: ConstraintId, active: bool);
}
