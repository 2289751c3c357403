use anyhow::{bail, Result};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use super::fragment;
use crate::fact::Fact;
use crate::format::FactFormatter;

/// Science Focus listicles put the facts in `div.article-body` list items,
/// each opening with a bolded lead sentence. The lead becomes the fact title
/// and the remaining item content the description.
pub fn parse(html: &str, formatter: &dyn FactFormatter) -> Result<Vec<Fact>> {
    let doc = Html::parse_document(html);
    let item_sel = Selector::parse("div.article-body ul > li, div.article-body ol > li").unwrap();

    let items: Vec<_> = doc.select(&item_sel).collect();
    if items.is_empty() {
        bail!("no fact list in article body");
    }

    let mut facts = Vec::new();
    for (index, item) in items.into_iter().enumerate() {
        debug!("Processing fact #{index}");
        facts.push(transform(item, formatter));
    }
    Ok(facts)
}

fn transform(item: ElementRef<'_>, formatter: &dyn FactFormatter) -> Fact {
    let lead_sel = Selector::parse("b, strong").unwrap();

    match item.select(&lead_sel).next() {
        Some(lead) => {
            let raw_title = fragment::inline_text(lead, None);
            let raw_description = fragment::inline_text(item, Some(lead.id()));
            let (title, description) = formatter.format(&raw_title, &raw_description);
            Fact::new(title, description)
        }
        None => {
            // Degraded but valid: the whole item becomes the title.
            let raw_title = fragment::inline_text(item, None);
            warn!("No lead text in item '{raw_title}'. Using full text as title.");
            Fact::new(formatter.format_fact(&raw_title), String::new())
        }
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::DefaultFormatter;

    fn parse_fixture() -> Vec<Fact> {
        let html = std::fs::read_to_string("tests/fixtures/sciencefocus.html").unwrap();
        parse(&html, &DefaultFormatter).unwrap()
    }

    #[test]
    fn facts_in_document_order() {
        let facts = parse_fixture();
        assert_eq!(facts.len(), 3);
        assert_eq!(facts[0].identifier, "bananas-are-berries");
        assert_eq!(facts[1].identifier, "a-day-on-venus-is-longer-than-its-year");
    }

    #[test]
    fn lead_removed_from_description() {
        let facts = parse_fixture();
        assert_eq!(facts[0].fact, "Bananas are berries");
        assert!(!facts[0].description.contains("Bananas are berries"));
        assert!(facts[0].description.starts_with("Botanically speaking"));
        assert!(facts[0].description.ends_with('.'));
    }

    #[test]
    fn superscript_survives_description() {
        let facts = parse_fixture();
        assert!(facts[1].description.contains("<sup>"));
    }

    #[test]
    fn item_without_lead_falls_back_to_full_text() {
        let facts = parse_fixture();
        assert_eq!(facts[2].fact, "Wombat poop is cube-shaped");
        assert_eq!(facts[2].description, "");
    }

    #[test]
    fn list_outside_article_body_ignored() {
        let html = "<html><body><ul><li><b>Nope.</b></li></ul></body></html>";
        assert!(parse(html, &DefaultFormatter).is_err());
    }
}
