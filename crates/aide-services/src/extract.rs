//! Plain-text extraction from fetched HTML pages.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

/// Content containers tried in order; `body` is the last resort.
static CONTAINERS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    ["#mw-content-text", "article", "main", "[role=main]", "body"]
        .iter()
        .map(|s| Selector::parse(s).expect("Invalid container selector"))
        .collect()
});

const BLOCK_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "blockquote", "pre",
];

static BLOCKS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(&BLOCK_TAGS.join(", ")).expect("Invalid block selector")
});

static BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("Invalid body selector"));

/// Elements whose text is never visible.
const HIDDEN: &[&str] = &["script", "style", "noscript", "template", "head"];

/// Extract the readable text of an HTML document.
///
/// Block-level text from the first content container that has any is joined
/// with newlines. Pages without block elements fall back to all visible text
/// in `<body>`. Returns an empty string when nothing readable is found.
pub fn readable_text(html: &str) -> String {
    let document = Html::parse_document(html);

    for container in CONTAINERS.iter() {
        let parts: Vec<String> = document
            .select(container)
            .flat_map(|el| {
                el.select(&BLOCKS)
                    .filter(move |block| !inside_block(*block, el))
            })
            .map(block_text)
            .filter(|t| !t.is_empty())
            .collect();
        if !parts.is_empty() {
            return parts.join("\n");
        }
    }

    document
        .select(&BODY)
        .next()
        .map(visible_text)
        .unwrap_or_default()
}

/// Whether `block` sits in another block below `container`. The outer block's
/// text already covers it.
fn inside_block(block: ElementRef<'_>, container: ElementRef<'_>) -> bool {
    block
        .ancestors()
        .take_while(|node| node.id() != container.id())
        .filter_map(|node| node.value().as_element())
        .any(|el| BLOCK_TAGS.contains(&el.name()))
}

fn block_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn visible_text(root: ElementRef<'_>) -> String {
    let mut words = Vec::new();
    for node in root.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|e| HIDDEN.contains(&e.name()))
        });
        if !hidden {
            words.extend(text.split_whitespace());
        }
    }
    words.join(" ")
}
