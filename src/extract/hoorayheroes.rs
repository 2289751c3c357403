use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use super::fragment;
use crate::fact::Fact;
use crate::format::FactFormatter;

/// HoorayHeroes fact pages keep the list inside `section.cms-content`: each
/// fact is an `h2` heading followed by a `p` description. Everything outside
/// that section (nav, related posts) is ignored.
pub fn parse(
    html: &str,
    formatter: &dyn FactFormatter,
    title_prefix: Option<&str>,
) -> Result<Vec<Fact>> {
    let doc = Html::parse_document(html);
    let section_sel = Selector::parse("section.cms-content").unwrap();
    let heading_sel = Selector::parse("h2").unwrap();

    let section = doc
        .select(&section_sel)
        .next()
        .ok_or_else(|| anyhow!("no cms-content section in page"))?;

    let mut facts = Vec::new();
    for (index, heading) in section.select(&heading_sel).enumerate() {
        debug!("Processing fact #{index}");
        facts.push(transform(heading, formatter, title_prefix));
    }
    Ok(facts)
}

fn transform(
    heading: ElementRef<'_>,
    formatter: &dyn FactFormatter,
    title_prefix: Option<&str>,
) -> Fact {
    let raw_title = fragment::inline_text(heading, None);

    let raw_description = match next_paragraph(heading) {
        Some(p) => fragment::inline_text(p, None),
        None => {
            warn!("No description found for '{raw_title}'. Using empty description.");
            String::new()
        }
    };

    let (title, description) = formatter.format(&raw_title, &raw_description);
    let mut fact = Fact::new(title, description);
    if let Some(prefix) = title_prefix {
        // Label is display-only; the identifier stays keyed to the base title
        // so re-scrapes keep matching existing rows.
        fact.fact = format!("{prefix}{}", fact.fact);
    }
    fact
}

/// First `p` among the heading's following siblings, skipping figures and
/// other non-paragraph elements in between.
fn next_paragraph(heading: ElementRef<'_>) -> Option<ElementRef<'_>> {
    heading
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "p")
}

// ── Tests ──
