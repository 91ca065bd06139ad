//! In-memory layout engine.
//!
//! Keeps a view tree and a registry of constraint objects. It performs no
//! solving: frames are whatever the caller last assigned, and constraints are
//! only recorded. Useful as a stand-in host in tests and for applications that
//! forward recorded constraints to their own solver.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use super::LayoutEngine;
use crate::vfl::{Expansion, FormatOptions, VflError, VisualFormat};
use crate::{Constraint, ConstraintId, Metrics, Rect, ViewDictionary, ViewId};

/// A view in the memory engine's tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<ViewId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ViewId>,
    pub frame: Rect,
    /// Fresh views derive constraints from their frame until told otherwise
    pub translates_autoresizing_mask: bool,
    /// Constraints added to this view's own list
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<ConstraintId>,
}

impl ViewNode {
    fn new(name: Option<String>) -> Self {
        ViewNode {
            name,
            parent: None,
            children: Vec::new(),
            frame: Rect::default(),
            translates_autoresizing_mask: true,
            constraints: Vec::new(),
        }
    }
}

/// A registered constraint and its activation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintRecord {
    pub constraint: Constraint,
    pub active: bool,
    /// View whose constraint list holds this constraint, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<ViewId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryEngine {
    views: Vec<ViewNode>,
    constraints: Vec<ConstraintRecord>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached view
    pub fn create_view(&mut self) -> ViewId {
        self.push_view(ViewNode::new(None))
    }

    /// Create a detached view with a debug name
    pub fn create_named_view(&mut self, name: impl Into<String>) -> ViewId {
        self.push_view(ViewNode::new(Some(name.into())))
    }

    fn push_view(&mut self, node: ViewNode) -> ViewId {
        let id = ViewId::from_raw(self.views.len() as u32);
        self.views.push(node);
        id
    }

    pub fn node(&self, view: ViewId) -> Option<&ViewNode> {
        self.views.get(view.raw() as usize)
    }

    fn node_mut(&mut self, view: ViewId) -> Option<&mut ViewNode> {
        self.views.get_mut(view.raw() as usize)
    }

    /// Attach `child` to `parent`, detaching it from any previous parent.
    ///
    /// Returns `false` and leaves the tree untouched if either view is
    /// unknown or the move would create a cycle.
    pub fn add_subview(&mut self, parent: ViewId, child: ViewId) -> bool {
        if self.node(parent).is_none() || self.node(child).is_none() || self.is_ancestor(child, parent) {
            warn!(%parent, %child, "rejected subview insertion");
            return false;
        }
        self.remove_from_parent(child);
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
        true
    }

    /// Create a view and attach it to `parent` in one step
    pub fn create_subview(&mut self, parent: ViewId, name: impl Into<String>) -> ViewId {
        let child = self.create_named_view(name);
        self.add_subview(parent, child);
        child
    }

    pub fn remove_from_parent(&mut self, child: ViewId) {
        let Some(parent) = self.node_mut(child).and_then(|node| node.parent.take()) else {
            return;
        };
        if let Some(node) = self.node_mut(parent) {
            node.children.retain(|c| *c != child);
        }
    }

    /// Whether `ancestor` is `view` or one of its ancestors
    pub fn is_ancestor(&self, ancestor: ViewId, view: ViewId) -> bool {
        let mut current = Some(view);
        while let Some(v) = current {
            if v == ancestor {
                return true;
            }
            current = self.parent(v);
        }
        false
    }

    pub fn children(&self, view: ViewId) -> &[ViewId] {
        self.node(view).map(|node| node.children.as_slice()).unwrap_or(&[])
    }

    pub fn set_frame(&mut self, view: ViewId, frame: Rect) {
        if let Some(node) = self.node_mut(view) {
            node.frame = frame;
        }
    }

    pub fn frame(&self, view: ViewId) -> Option<Rect> {
        self.node(view).map(|node| node.frame)
    }

    pub fn translates_autoresizing_mask(&self, view: ViewId) -> bool {
        self.node(view).map(|node| node.translates_autoresizing_mask).unwrap_or(false)
    }

    pub fn record(&self, id: ConstraintId) -> Option<&ConstraintRecord> {
        self.constraints.get(id.0 as usize)
    }

    /// Every constraint ever created, active or not
    pub fn records(&self) -> impl Iterator<Item = (ConstraintId, &ConstraintRecord)> {
        self.constraints
            .iter()
            .enumerate()
            .map(|(index, record)| (ConstraintId(index as u32), record))
    }

    pub fn active_constraints(&self) -> impl Iterator<Item = (ConstraintId, &Constraint)> {
        self.records()
            .filter(|(_, record)| record.active)
            .map(|(id, record)| (id, &record.constraint))
    }

    /// Active constraints with `view` on either side
    pub fn constraints_involving(&self, view: ViewId) -> Vec<Constraint> {
        self.active_constraints()
            .filter(|(_, constraint)| constraint.involves(view))
            .map(|(_, constraint)| *constraint)
            .collect()
    }

    /// Constraints held in `view`'s own constraint list
    pub fn owned_constraints(&self, view: ViewId) -> Vec<Constraint> {
        self.node(view)
            .map(|node| {
                node.constraints
                    .iter()
                    .filter_map(|id| self.record(*id).map(|record| record.constraint))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Snapshot of the whole tree and constraint registry
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn register(&mut self, constraint: Constraint, owner: Option<ViewId>) -> ConstraintId {
        let id = ConstraintId(self.constraints.len() as u32);
        trace!(%id, %constraint, "activated");
        self.constraints.push(ConstraintRecord {
            constraint,
            active: true,
            owner,
        });
        id
    }
}

impl LayoutEngine for MemoryEngine {
    type Error = VflError;

    fn parent(&self, view: ViewId) -> Option<ViewId> {
        self.node(view).and_then(|node| node.parent)
    }

    fn set_translates_autoresizing_mask(&mut self, view: ViewId, enabled: bool) {
        match self.node_mut(view) {
            Some(node) => node.translates_autoresizing_mask = enabled,
            None => warn!(%view, "unknown view"),
        }
    }

    fn activate(&mut self, constraint: Constraint) -> ConstraintId {
        self.register(constraint, None)
    }

    fn add_constraints(&mut self, owner: ViewId, constraints: Vec<Constraint>) -> Vec<ConstraintId> {
        let ids: Vec<ConstraintId> = constraints
            .into_iter()
            .map(|constraint| self.register(constraint, Some(owner)))
            .collect();
        if let Some(node) = self.node_mut(owner) {
            node.constraints.extend_from_slice(&ids);
        }
        ids
    }

    fn constraints_with_visual_format(
        &self,
        format: &str,
        options: FormatOptions,
        metrics: &Metrics,
        views: &ViewDictionary,
    ) -> Result<Vec<Constraint>, VflError> {
        let parsed = VisualFormat::parse(format)?;
        Expansion {
            format,
            options,
            metrics,
            views,
            superview: &|view| self.parent(view),
        }
        .expand(&parsed)
    }

    fn constraint(&self, id: ConstraintId) -> Option<Constraint> {
        self.record(id).map(|record| record.constraint)
    }

    fn set_constant(&mut self, id: ConstraintId, constant: f32) {
        if let Some(record) = self.constraints.get_mut(id.0 as usize) {
            record.constraint.constant = constant;
        }
    }

    fn set_active(&mut self, id: ConstraintId, active: bool) {
        if let Some(record) = self.constraints.get_mut(id.0 as usize) {
            record.active = active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Anchor, AnchorRef};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_view_tree() {
        let mut engine = MemoryEngine::new();
        let root = engine.create_named_view("root");
        let a = engine.create_subview(root, "a");
        let b = engine.create_subview(root, "b");

        assert_eq!(engine.parent(a), Some(root));
        assert_eq!(engine.children(root), &[a, b]);
        assert!(engine.translates_autoresizing_mask(a));

        // Moving `b` under `a` detaches it from root
        assert!(engine.add_subview(a, b));
        assert_eq!(engine.children(root), &[a]);
        assert_eq!(engine.parent(b), Some(a));

        // Cycles are rejected
        assert!(!engine.add_subview(b, root));
        assert_eq!(engine.parent(root), None);
    }

    #[test]
    fn test_owned_and_active_constraints() {
        let mut engine = MemoryEngine::new();
        let root = engine.create_view();
        let child = engine.create_subview(root, "child");

        let top = Constraint::equal(AnchorRef::new(child, Anchor::Top), AnchorRef::new(root, Anchor::Top));
        let loose = engine.activate(top);
        let owned = engine.add_constraints(root, vec![top.with_constant(4.0)]);

        assert_eq!(engine.owned_constraints(root), vec![top.with_constant(4.0)]);
        assert_eq!(engine.record(owned[0]).and_then(|r| r.owner), Some(root));
        assert_eq!(engine.record(loose).and_then(|r| r.owner), None);

        engine.set_active(loose, false);
        engine.set_constant(owned[0], 9.0);
        assert_eq!(engine.constraints_involving(child), vec![top.with_constant(9.0)]);
        assert_eq!(engine.constraint_count(), 2);
    }

    #[test]
    fn test_json_snapshot_roundtrip() {
        let mut engine = MemoryEngine::new();
        let root = engine.create_named_view("root");
        let child = engine.create_subview(root, "child");
        engine.set_frame(child, Rect::new(0.0, 0.0, 10.0, 10.0));
        engine.activate(Constraint::equal_to_constant(AnchorRef::new(child, Anchor::Width), 10.0));

        let json = engine.to_json().unwrap();
        assert!(json.contains("\"name\": \"child\""));

        let restored = MemoryEngine::from_json(&json).unwrap();
        assert_eq!(restored, engine);
    }

    #[test]
    fn test_visual_format_uses_parent_as_superview() {
        let mut engine = MemoryEngine::new();
        let root = engine.create_view();
        let label = engine.create_subview(root, "label");
        let views = ViewDictionary::new().with("label", label);

        let constraints = engine
            .constraints_with_visual_format("H:|[label]|", FormatOptions::empty(), &Metrics::new(), &views)
            .unwrap();

        assert_eq!(
            constraints,
            vec![
                Constraint::equal(AnchorRef::new(label, Anchor::Leading), AnchorRef::new(root, Anchor::Leading)),
                Constraint::equal(AnchorRef::new(root, Anchor::Trailing), AnchorRef::new(label, Anchor::Trailing)),
            ]
        );
        // Expansion alone registers nothing
        assert_eq!(engine.constraint_count(), 0);
    }
}
