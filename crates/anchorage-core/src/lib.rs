//! # Anchorage Core
//!
//! Constraint model shared by the Anchorage facade and its backends.
//!
//! A layout engine owns views, layout guides and constraint solving. This
//! crate describes the constraint objects handed to such an engine, the
//! [`LayoutEngine`] trait a backend implements, the visual format language,
//! and [`MemoryEngine`], a backend that records constraints without solving
//! them.

pub mod anchor;
pub mod constraint;
pub mod engine;
pub mod geometry;
pub mod priority;
pub mod vfl;
pub mod view;

pub use anchor::{Anchor, Axis, LayoutGuide, Side, Sides};
pub use constraint::{AnchorRef, Constraint, ConstraintId, Item, Relation};
pub use engine::memory::{ConstraintRecord, MemoryEngine, ViewNode};
pub use engine::LayoutEngine;
pub use geometry::{EdgeInsets, Rect};
pub use priority::Priority;
pub use vfl::{FormatOptions, VflError};
pub use view::{strip_storage_prefix, Metrics, Subviews, ViewDictionary, ViewId, DEFAULT_STORAGE_PREFIXES};
