use anchorage::prelude::*;

#[derive(Subviews)]
struct Card {
    thumbnail: ViewId,
    title: ViewId,
    caption: Option<ViewId>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut engine = MemoryEngine::new();
    let screen = engine.create_named_view("screen");
    let root = engine.create_subview(screen, "card");

    let card = Card {
        thumbnail: engine.create_subview(root, "thumbnail"),
        title: engine.create_subview(root, "title"),
        caption: Some(engine.create_subview(root, "caption")),
    };

    let mut layout = engine.layout(root);
    if let Err(err) = layout.pin_to_readable_content(PinOptions::new().sides(Sides::HORIZONTAL)) {
        eprintln!("pin failed: {err}");
        return;
    }
    layout.set_height(160.0, Priority::DEFAULT_HIGH);

    let batches = [
        FormatBatch::new(["H:|-[thumbnail(64)]-[title]-|"]).options(FormatOptions::ALIGN_ALL_TOP),
        FormatBatch::new(["V:|-[title]-[caption]-(>=pad)-|"])
            .metric("pad", 12.0)
            .options(FormatOptions::ALIGN_ALL_LEADING),
    ];
    for batch in batches {
        match layout.visual_format_with_subviews(&card, batch) {
            Ok(ids) => println!("{} constraints from visual formats", ids.len()),
            Err(err) => {
                eprintln!("visual format failed: {err}");
                return;
            }
        }
    }

    engine.layout(card.thumbnail).anchor([Anchor::Height], card.title);

    for (id, constraint) in engine.active_constraints() {
        println!("{id}: {constraint}");
    }
    match engine.to_json() {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("snapshot failed: {err}"),
    }
}
