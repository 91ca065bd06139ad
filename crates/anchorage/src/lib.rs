//! # Anchorage
//!
//! Chainable constraint building on top of an auto-layout engine.
//!
//! Attach a [`Layout`] to a view and pin its edges, center it, fix its size
//! or apply visual format strings. Each call turns directly into constraint
//! objects on the engine; solving is entirely the engine's job.
//!
//! ## Example
//!
//! ```rust
//! use anchorage::prelude::*;
//!
//! #[derive(Subviews)]
//! struct Header {
//!     icon: ViewId,
//!     title: ViewId,
//!     badge: Option<ViewId>,
//! }
//!
//! let mut engine = MemoryEngine::new();
//! let window = engine.create_named_view("window");
//! let root = engine.create_subview(window, "header");
//! let header = Header {
//!     icon: engine.create_subview(root, "icon"),
//!     title: engine.create_subview(root, "title"),
//!     badge: None,
//! };
//!
//! let mut layout = engine.layout(root);
//! layout.pin_to_safe_area(PinOptions::new().sides(Sides::HORIZONTAL | Sides::TOP)).unwrap();
//! layout.set_height(64.0, Priority::REQUIRED);
//! layout
//!     .visual_format_with_subviews(
//!         &header,
//!         FormatBatch::new(["H:|-[icon(32)]-[title]-|"]).options(FormatOptions::ALIGN_ALL_CENTER_Y),
//!     )
//!     .unwrap();
//! ```

pub mod config;
pub mod error;
pub mod layout;

pub use anchorage_core::{
    Anchor, AnchorRef, Axis, Constraint, ConstraintId, EdgeInsets, FormatOptions, Item, LayoutEngine, LayoutGuide,
    MemoryEngine, Metrics, Priority, Rect, Relation, Side, Sides, Subviews, ViewDictionary, ViewId, VflError,
};

pub use config::LayoutConfig;
pub use error::{ConfigError, LayoutError};
pub use layout::{CenterConstraints, EdgeConstraints, FormatBatch, Layout, LayoutExt, PinOptions, SizeConstraints};

// Re-export procedural macros
pub use anchorage_macros::Subviews;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::layout::{FormatBatch, Layout, LayoutExt, PinOptions};
    pub use crate::{
        Anchor, EdgeInsets, FormatOptions, LayoutConfig, LayoutEngine, LayoutError, LayoutGuide, MemoryEngine,
        Priority, Sides, Subviews, ViewDictionary, ViewId,
    };
}
