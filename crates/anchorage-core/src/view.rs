use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to a view owned by a layout engine.
///
/// Handles are plain copyable ids; the facade never owns the view behind one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(u32);

impl ViewId {
    /// Wrap an engine-specific raw id
    pub const fn from_raw(raw: u32) -> Self {
        ViewId(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// Named metrics referenced from visual format strings
pub type Metrics = IndexMap<String, f32>;

/// Prefixes stripped from field names by default when building a
/// dictionary from [`Subviews`].
pub const DEFAULT_STORAGE_PREFIXES: [&str; 2] = ["$__lazy_storage_$_", "_"];

/// Strip the first matching storage-wrapper prefix from a field name.
///
/// A prefix that would leave an empty name is not stripped.
pub fn strip_storage_prefix<'a, S: AsRef<str>>(name: &'a str, prefixes: &[S]) -> &'a str {
    for prefix in prefixes {
        if let Some(stripped) = name.strip_prefix(prefix.as_ref()) {
            if !stripped.is_empty() {
                return stripped;
            }
        }
    }
    name
}

/// Types that expose their child views by name.
///
/// Implement by hand or with `#[derive(Subviews)]`. Unset optional fields
/// report `None` and are left out of any dictionary built from them.
pub trait Subviews {
    fn subviews(&self) -> Vec<(&'static str, Option<ViewId>)>;
}

/// Ordered name -> view mapping used to resolve names in visual format
/// strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewDictionary {
    views: IndexMap<String, ViewId>,
}

impl ViewDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary from named child views, adding `self_view` under
    /// `self_key`.
    pub fn from_subviews<T, S>(source: &T, self_view: ViewId, self_key: &str, prefixes: &[S]) -> Self
    where
        T: Subviews + ?Sized,
        S: AsRef<str>,
    {
        let mut dictionary = ViewDictionary::new();
        for (name, view) in source.subviews() {
            dictionary.insert_optional(strip_storage_prefix(name, prefixes), view);
        }
        dictionary.insert(self_key, self_view);
        dictionary
    }

    /// Add a view, chainable
    pub fn with(mut self, name: impl Into<String>, view: ViewId) -> Self {
        self.insert(name, view);
        self
    }

    /// Add a view, replacing any previous entry under the same name
    pub fn insert(&mut self, name: impl Into<String>, view: ViewId) -> Option<ViewId> {
        self.views.insert(name.into(), view)
    }

    /// Add a view if it is set
    pub fn insert_optional(&mut self, name: impl Into<String>, view: Option<ViewId>) {
        if let Some(view) = view {
            self.insert(name, view);
        }
    }

    pub fn get(&self, name: &str) -> Option<ViewId> {
        self.views.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.views.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.views.keys().map(String::as_str)
    }

    pub fn views(&self) -> impl Iterator<Item = ViewId> + '_ {
        self.views.values().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ViewId)> {
        self.views.iter().map(|(name, view)| (name.as_str(), *view))
    }
}

impl<N: Into<String>> FromIterator<(N, ViewId)> for ViewDictionary {
    fn from_iter<I: IntoIterator<Item = (N, ViewId)>>(iter: I) -> Self {
        ViewDictionary {
            views: iter.into_iter().map(|(name, view)| (name.into(), view)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Card {
        title: ViewId,
        subtitle: Option<ViewId>,
        icon: Option<ViewId>,
    }

    impl Subviews for Card {
        fn subviews(&self) -> Vec<(&'static str, Option<ViewId>)> {
            vec![
                ("title", Some(self.title)),
                ("_subtitle", self.subtitle),
                ("$__lazy_storage_$_icon", self.icon),
            ]
        }
    }

    #[test]
    fn test_strip_storage_prefix() {
        let prefixes = DEFAULT_STORAGE_PREFIXES;
        assert_eq!(strip_storage_prefix("$__lazy_storage_$_avatar", &prefixes), "avatar");
        assert_eq!(strip_storage_prefix("_label", &prefixes), "label");
        assert_eq!(strip_storage_prefix("label", &prefixes), "label");
        assert_eq!(strip_storage_prefix("_", &prefixes), "_");
    }

    #[test]
    fn test_from_subviews_skips_unset_fields() {
        let card = Card {
            title: ViewId::from_raw(2),
            subtitle: Some(ViewId::from_raw(3)),
            icon: None,
        };
        let owner = ViewId::from_raw(1);

        let dictionary = ViewDictionary::from_subviews(&card, owner, "self", &DEFAULT_STORAGE_PREFIXES);

        assert_eq!(dictionary.names().collect::<Vec<_>>(), vec!["title", "subtitle", "self"]);
        assert_eq!(dictionary.get("self"), Some(owner));
        assert!(!dictionary.contains("icon"));
    }

    #[test]
    fn test_insert_replaces() {
        let mut dictionary = ViewDictionary::new().with("a", ViewId::from_raw(1));
        let previous = dictionary.insert("a", ViewId::from_raw(2));
        assert_eq!(previous, Some(ViewId::from_raw(1)));
        assert_eq!(dictionary.len(), 1);
    }
}
