use anchorage_core::{
    Anchor, AnchorRef, Constraint, ConstraintId, EdgeInsets, FormatOptions, Item, LayoutEngine, LayoutGuide,
    Metrics, Priority, Side, Sides, Subviews, ViewDictionary, ViewId,
};
use tracing::{debug, warn};

use crate::config::LayoutConfig;
use crate::error::{LayoutError, Result};

/// Which edges to pin, to what, and how far inside.
///
/// The defaults pin all four sides flush to the parent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PinOptions {
    /// Reference view; the parent when `None`
    pub target: Option<ViewId>,
    pub insets: EdgeInsets,
    pub sides: Sides,
}

impl PinOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to(mut self, target: ViewId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn insets(mut self, insets: impl Into<EdgeInsets>) -> Self {
        self.insets = insets.into();
        self
    }

    pub fn sides(mut self, sides: impl Into<Sides>) -> Self {
        self.sides = sides.into();
        self
    }
}

/// Constraints created by a pin operation, one per requested side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeConstraints {
    pub top: Option<ConstraintId>,
    pub leading: Option<ConstraintId>,
    pub bottom: Option<ConstraintId>,
    pub trailing: Option<ConstraintId>,
}

impl EdgeConstraints {
    pub fn get(&self, side: Side) -> Option<ConstraintId> {
        match side {
            Side::Top => self.top,
            Side::Leading => self.leading,
            Side::Bottom => self.bottom,
            Side::Trailing => self.trailing,
        }
    }

    fn set(&mut self, side: Side, id: ConstraintId) {
        match side {
            Side::Top => self.top = Some(id),
            Side::Leading => self.leading = Some(id),
            Side::Bottom => self.bottom = Some(id),
            Side::Trailing => self.trailing = Some(id),
        }
    }

    /// Created constraints in pin order
    pub fn iter(&self) -> impl Iterator<Item = ConstraintId> + '_ {
        Side::ALL.into_iter().filter_map(move |side| self.get(side))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CenterConstraints {
    pub x: ConstraintId,
    pub y: ConstraintId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeConstraints {
    pub width: ConstraintId,
    pub height: ConstraintId,
}

/// A batch of visual format strings applied in one call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatBatch {
    formats: Vec<String>,
    options: FormatOptions,
    metrics: Metrics,
    views: Option<ViewDictionary>,
}

impl FormatBatch {
    pub fn new<I, S>(formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FormatBatch {
            formats: formats.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }

    pub fn metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metric(mut self, name: impl Into<String>, value: f32) -> Self {
        self.metrics.insert(name.into(), value);
        self
    }

    /// Use an explicit mapping instead of a generated one
    pub fn views(mut self, views: ViewDictionary) -> Self {
        self.views = Some(views);
        self
    }
}

/// Constraint facade for one view.
///
/// Each call creates its constraints and activates them immediately. The
/// facade keeps no state besides the view, its config and the borrowed
/// engine, and it disables the view's implicit sizing translation before
/// adding anything.
///
/// ```rust
/// use anchorage::prelude::*;
///
/// let mut engine = MemoryEngine::new();
/// let root = engine.create_view();
/// let card = engine.create_subview(root, "card");
///
/// let mut layout = engine.layout(card);
/// layout.pin(PinOptions::new().insets(EdgeInsets::uniform(16.0))).unwrap();
/// layout.set_height(120.0, Priority::DEFAULT_HIGH);
/// ```
pub struct Layout<'e, E: LayoutEngine> {
    engine: &'e mut E,
    view: ViewId,
    config: LayoutConfig,
}

impl<'e, E: LayoutEngine> Layout<'e, E> {
    pub fn new(engine: &'e mut E, view: ViewId) -> Self {
        Self::with_config(engine, view, LayoutConfig::default())
    }

    pub fn with_config(engine: &'e mut E, view: ViewId, config: LayoutConfig) -> Self {
        Layout { engine, view, config }
    }

    pub fn view(&self) -> ViewId {
        self.view
    }

    pub fn engine(&self) -> &E {
        &*self.engine
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    fn prepare(&mut self) {
        self.engine.set_translates_autoresizing_mask(self.view, false);
    }

    fn resolve_target(&self, target: Option<ViewId>) -> Result<ViewId> {
        match target.or_else(|| self.engine.parent(self.view)) {
            Some(target) => Ok(target),
            None => {
                warn!(view = %self.view, "no target and no parent");
                Err(LayoutError::MissingTarget { view: self.view })
            }
        }
    }

    /// `view.anchor == item.anchor + constant`, activated
    fn attach(&mut self, anchor: Anchor, item: Item, constant: f32) -> ConstraintId {
        let constraint = Constraint::equal(AnchorRef::new(self.view, anchor), AnchorRef::new(item, anchor))
            .with_constant(constant);
        self.engine.activate(constraint)
    }

    /// Pin the requested edges to the target (the parent by default).
    pub fn pin(&mut self, options: PinOptions) -> Result<EdgeConstraints> {
        self.pin_edges(options, None)
    }

    /// Pin all four edges flush to the parent
    pub fn pin_to_parent(&mut self) -> Result<EdgeConstraints> {
        self.pin(PinOptions::default())
    }

    /// Pin the requested edges to one of the target's layout guides.
    pub fn pin_to_guide(&mut self, guide: LayoutGuide, options: PinOptions) -> Result<EdgeConstraints> {
        self.pin_edges(options, Some(guide))
    }

    pub fn pin_to_margins(&mut self, options: PinOptions) -> Result<EdgeConstraints> {
        self.pin_to_guide(LayoutGuide::Margins, options)
    }

    pub fn pin_to_safe_area(&mut self, options: PinOptions) -> Result<EdgeConstraints> {
        self.pin_to_guide(LayoutGuide::SafeArea, options)
    }

    pub fn pin_to_readable_content(&mut self, options: PinOptions) -> Result<EdgeConstraints> {
        self.pin_to_guide(LayoutGuide::ReadableContent, options)
    }

    fn pin_edges(&mut self, options: PinOptions, guide: Option<LayoutGuide>) -> Result<EdgeConstraints> {
        self.prepare();
        let target = self.resolve_target(options.target)?;
        let item = match guide {
            Some(guide) => Item::Guide(target, guide),
            None => Item::View(target),
        };

        let insets = options.insets;
        let mut edges = EdgeConstraints::default();
        for side in options.sides.sides() {
            // Bottom and trailing anchors grow away from the target's interior.
            let constant = match side {
                Side::Top => insets.top,
                Side::Leading => insets.left,
                Side::Bottom => -insets.bottom,
                Side::Trailing => -insets.right,
            };
            let id = self.attach(side.anchor(), item, constant);
            edges.set(side, id);
        }

        debug!(view = %self.view, target = %item, %insets, count = edges.len(), "pinned");
        Ok(edges)
    }

    /// Center on both axes relative to the target (the parent by default)
    pub fn center(&mut self, target: Option<ViewId>, offset: f32) -> Result<CenterConstraints> {
        let x = self.center_x(target, offset)?;
        let y = self.center_y(target, offset)?;
        Ok(CenterConstraints { x, y })
    }

    pub fn center_x(&mut self, target: Option<ViewId>, offset: f32) -> Result<ConstraintId> {
        self.center_on(Anchor::CenterX, target, offset)
    }

    pub fn center_y(&mut self, target: Option<ViewId>, offset: f32) -> Result<ConstraintId> {
        self.center_on(Anchor::CenterY, target, offset)
    }

    fn center_on(&mut self, anchor: Anchor, target: Option<ViewId>, offset: f32) -> Result<ConstraintId> {
        self.prepare();
        let target = self.resolve_target(target)?;
        let id = self.attach(anchor, Item::View(target), offset);
        debug!(view = %self.view, %target, %anchor, offset, "centered");
        Ok(id)
    }

    /// Fix the width to a literal value
    pub fn set_width(&mut self, width: f32, priority: Priority) -> ConstraintId {
        self.set_dimension(Anchor::Width, width, priority)
    }

    /// Fix the height to a literal value
    pub fn set_height(&mut self, height: f32, priority: Priority) -> ConstraintId {
        self.set_dimension(Anchor::Height, height, priority)
    }

    pub fn set_size(&mut self, width: f32, height: f32, priority: Priority) -> SizeConstraints {
        SizeConstraints {
            width: self.set_width(width, priority),
            height: self.set_height(height, priority),
        }
    }

    /// [`set_size`](Self::set_size) at the configured default priority
    pub fn size(&mut self, width: f32, height: f32) -> SizeConstraints {
        let priority = self.config.default_priority;
        self.set_size(width, height, priority)
    }

    fn set_dimension(&mut self, anchor: Anchor, value: f32, priority: Priority) -> ConstraintId {
        self.prepare();
        let constraint = Constraint::equal_to_constant(AnchorRef::new(self.view, anchor), value).with_priority(priority);
        let id = self.engine.activate(constraint);
        debug!(view = %self.view, %anchor, value, %priority, "sized");
        id
    }

    /// Equate each requested anchor with the same anchor on `target`.
    pub fn anchor<I>(&mut self, anchors: I, target: ViewId) -> Vec<ConstraintId>
    where
        I: IntoIterator<Item = Anchor>,
    {
        self.prepare();
        let ids: Vec<ConstraintId> = anchors
            .into_iter()
            .map(|anchor| self.attach(anchor, Item::View(target), 0.0))
            .collect();
        debug!(view = %self.view, %target, count = ids.len(), "anchored");
        ids
    }

    /// Name -> view mapping built from `source`, plus this view under the
    /// configured self key.
    pub fn view_dictionary<T: Subviews + ?Sized>(&self, source: &T) -> ViewDictionary {
        ViewDictionary::from_subviews(source, self.view, &self.config.self_key, &self.config.storage_prefixes)
    }

    /// Expand and add every format string in `batch`.
    ///
    /// Without an explicit mapping the only name available is the configured
    /// self key; use [`visual_format_with_subviews`](Self::visual_format_with_subviews)
    /// to generate one from named child views. Engine errors are returned as
    /// is. Formats before a failing one stay applied.
    pub fn visual_format(&mut self, batch: FormatBatch) -> std::result::Result<Vec<ConstraintId>, E::Error> {
        let FormatBatch {
            formats,
            options,
            metrics,
            views,
        } = batch;
        let views = views.unwrap_or_else(|| ViewDictionary::new().with(self.config.self_key.clone(), self.view));

        for view in views.views() {
            self.engine.set_translates_autoresizing_mask(view, false);
        }
        self.prepare();

        let mut ids = Vec::new();
        for format in &formats {
            let constraints = self
                .engine
                .constraints_with_visual_format(format, options, &metrics, &views)?;
            debug!(view = %self.view, format = %format, count = constraints.len(), "applied visual format");
            ids.extend(self.engine.add_constraints(self.view, constraints));
        }
        Ok(ids)
    }

    /// [`visual_format`](Self::visual_format) with the mapping generated from
    /// `source`, unless the batch carries an explicit one.
    pub fn visual_format_with_subviews<T: Subviews + ?Sized>(
        &mut self,
        source: &T,
        batch: FormatBatch,
    ) -> std::result::Result<Vec<ConstraintId>, E::Error> {
        let batch = match batch.views {
            Some(_) => batch,
            None => {
                let views = self.view_dictionary(source);
                batch.views(views)
            }
        };
        self.visual_format(batch)
    }
}

/// Attach a [`Layout`] facade to any view of an engine.
pub trait LayoutExt: LayoutEngine + Sized {
    fn layout(&mut self, view: ViewId) -> Layout<'_, Self> {
        Layout::new(self, view)
    }

    fn layout_with_config(&mut self, view: ViewId, config: LayoutConfig) -> Layout<'_, Self> {
        Layout::with_config(self, view, config)
    }
}

impl<E: LayoutEngine> LayoutExt for E {}

#[cfg(test)]
mod tests {
    use super::*;
    use anchorage_core::MemoryEngine;

    #[test]
    fn test_edge_constraints_order() {
        let mut edges = EdgeConstraints::default();
        edges.set(Side::Trailing, ConstraintId(3));
        edges.set(Side::Top, ConstraintId(1));

        assert_eq!(edges.iter().collect::<Vec<_>>(), vec![ConstraintId(1), ConstraintId(3)]);
        assert_eq!(edges.len(), 2);
        assert_eq!(edges.get(Side::Leading), None);
    }

    #[test]
    fn test_pin_options_builder() {
        let target = ViewId::from_raw(7);
        let options = PinOptions::new().to(target).insets(4.0_f32).sides(Side::Top);

        assert_eq!(options.target, Some(target));
        assert_eq!(options.insets, EdgeInsets::uniform(4.0));
        assert_eq!(options.sides, Sides::TOP);
        assert_eq!(PinOptions::default().sides, Sides::ALL);
    }

    #[test]
    fn test_size_uses_configured_priority() {
        let mut engine = MemoryEngine::new();
        let view = engine.create_view();
        let config = LayoutConfig::default().with_default_priority(Priority::DEFAULT_LOW);

        let size = engine.layout_with_config(view, config).size(10.0, 20.0);

        assert_eq!(engine.constraint(size.width).map(|c| c.priority), Some(Priority::DEFAULT_LOW));
        assert_eq!(engine.constraint(size.height).map(|c| c.constant), Some(20.0));
    }

    #[test]
    fn test_missing_target_leaves_no_constraints() {
        let mut engine = MemoryEngine::new();
        let orphan = engine.create_view();

        let result = engine.layout(orphan).center(None, 0.0);

        assert_eq!(result, Err(LayoutError::MissingTarget { view: orphan }));
        assert_eq!(engine.constraint_count(), 0);
    }
}
