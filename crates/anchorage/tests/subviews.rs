use anchorage::prelude::*;
use anchorage::{Anchor as A, AnchorRef, Constraint};
use pretty_assertions::assert_eq;

#[derive(Subviews)]
struct ProfileCell {
    avatar: ViewId,
    #[subviews(rename = "name")]
    name_label: ViewId,
    _subtitle: Option<ViewId>,
    badge: Option<ViewId>,
    #[subviews(skip)]
    spinner: ViewId,
    #[allow(dead_code)]
    title: String,
}

#[derive(Subviews)]
#[subviews(crate = "anchorage_core")]
struct Toolbar {
    back: ViewId,
    _title: ViewId,
}

fn cell(engine: &mut MemoryEngine, root: ViewId) -> ProfileCell {
    ProfileCell {
        avatar: engine.create_subview(root, "avatar"),
        name_label: engine.create_subview(root, "name"),
        _subtitle: Some(engine.create_subview(root, "subtitle")),
        badge: None,
        spinner: engine.create_subview(root, "spinner"),
        title: "Ada".to_string(),
    }
}

#[test]
fn dictionary_skips_unset_fields_and_adds_self() {
    let mut engine = MemoryEngine::new();
    let root = engine.create_view();
    let profile = cell(&mut engine, root);

    let dictionary = engine.layout(root).view_dictionary(&profile);

    // Three set fields plus the reserved self entry
    assert_eq!(dictionary.len(), 4);
    assert_eq!(
        dictionary.names().collect::<Vec<_>>(),
        vec!["avatar", "name", "subtitle", "self"]
    );
    assert_eq!(dictionary.get("self"), Some(root));
    assert!(!dictionary.contains("badge"));
    assert!(!dictionary.contains("spinner"));
}

#[test]
fn generated_dictionary_feeds_visual_format() {
    let mut engine = MemoryEngine::new();
    let root = engine.create_view();
    let profile = cell(&mut engine, root);

    let ids = engine
        .layout(root)
        .visual_format_with_subviews(
            &profile,
            FormatBatch::new(["H:|-[avatar(40)]-[name]-|", "V:|-[avatar]-(>=8)-[subtitle]"])
                .options(FormatOptions::empty()),
        )
        .unwrap();

    assert_eq!(ids.len(), 6);
    for view in [profile.avatar, profile.name_label] {
        assert!(!engine.translates_autoresizing_mask(view));
    }
    let subtitle = profile._subtitle.unwrap();
    assert!(!engine.translates_autoresizing_mask(subtitle));
    // Not part of the dictionary, so untouched
    assert!(engine.translates_autoresizing_mask(profile.spinner));

    assert_eq!(
        engine.constraint(ids[1]),
        Some(Constraint::equal_to_constant(AnchorRef::new(profile.avatar, A::Width), 40.0))
    );
}

#[test]
fn explicit_views_win_over_generated_ones() {
    let mut engine = MemoryEngine::new();
    let root = engine.create_view();
    let profile = cell(&mut engine, root);
    let views = ViewDictionary::new().with("solo", profile.avatar);

    let result = engine.layout(root).visual_format_with_subviews(
        &profile,
        FormatBatch::new(["H:[avatar]"]).views(views),
    );

    assert!(result.is_err());
}

#[test]
fn derive_accepts_crate_path_override() {
    let mut engine = MemoryEngine::new();
    let root = engine.create_view();
    let toolbar = Toolbar {
        back: engine.create_subview(root, "back"),
        _title: engine.create_subview(root, "title"),
    };

    let dictionary = engine.layout(root).view_dictionary(&toolbar);

    assert_eq!(dictionary.names().collect::<Vec<_>>(), vec!["back", "title", "self"]);
    assert_eq!(dictionary.get("title"), Some(toolbar._title));
}
