use ego_tree::{NodeId, NodeRef};
use scraper::{ElementRef, Node};

/// Serialized text content of an element with inline markup unwrapped,
/// except `<sup>`/`<sub>` which are kept verbatim so exponents and chemical
/// formulas survive formatting. Whitespace is collapsed to single spaces.
///
/// `skip` excludes one subtree, used to drop the title element from a
/// fragment before serializing the rest as the description.
pub fn inline_text(el: ElementRef<'_>, skip: Option<NodeId>) -> String {
    let mut out = String::new();
    collect(*el, skip, &mut out);
    collapse_whitespace(&out)
}

fn collect(node: NodeRef<'_, Node>, skip: Option<NodeId>, out: &mut String) {
    for child in node.children() {
        if Some(child.id()) == skip {
            continue;
        }
        match child.value() {
            Node::Text(text) => out.push_str(&text),
            Node::Element(element) if matches!(element.name(), "sup" | "sub") => {
                out.push('<');
                out.push_str(element.name());
                out.push('>');
                collect(child, skip, out);
                out.push_str("</");
                out.push_str(element.name());
                out.push('>');
            }
            Node::Element(_) => collect(child, skip, out),
            _ => {}
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

// ── Tests ──
