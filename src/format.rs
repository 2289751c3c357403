use std::sync::LazyLock;

use regex::Regex;

/// Text normalization strategy for scraped titles and descriptions.
/// Formatting is total: any string input (including empty) is valid.
pub trait FactFormatter {
    fn format_fact(&self, title: &str) -> String;
    fn format_description(&self, description: &str) -> String;

    fn format(&self, title: &str, description: &str) -> (String, String) {
        (self.format_fact(title), self.format_description(description))
    }
}

/// Quote-like markers stripped from the edges when they appear as
/// `"<marker> "` at the start or `" <marker>"` at the end.
const EDGE_MARKERS: [char; 4] = ['\'', '’', '.', '…'];

/// Shared edge cleanup:
/// - trim whitespace at both ends
/// - single pass over the marker set, stripping each as prefix and suffix
/// - re-trim after the pass
fn strip_edge_markers(text: &str) -> String {
    let mut text = text.trim().to_string();
    for marker in EDGE_MARKERS {
        let prefix = format!("{marker} ");
        let suffix = format!(" {marker}");
        if let Some(rest) = text.strip_prefix(&prefix) {
            text = rest.to_string();
        }
        if let Some(rest) = text.strip_suffix(&suffix) {
            text = rest.to_string();
        }
    }
    text.trim().to_string()
}

/// Default rules:
/// - titles never end with a period
/// - non-blank descriptions end with exactly one period
/// - empty/whitespace-only descriptions stay empty (no synthetic punctuation)
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFormatter;

impl FactFormatter for DefaultFormatter {
    fn format_fact(&self, title: &str) -> String {
        let mut text = strip_edge_markers(title);
        while text.ends_with('.') {
            text.pop();
            let len = text.trim_end().len();
            text.truncate(len);
        }
        text
    }

    fn format_description(&self, description: &str) -> String {
        if description.trim().is_empty() {
            return String::new();
        }
        let mut text = strip_edge_markers(description);
        let len = text
            .trim_end_matches(|c: char| c == '.' || c.is_whitespace())
            .len();
        text.truncate(len);
        text.push('.');
        text
    }
}

static LEADING_INDEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\s*-\s*").unwrap());
static TRAILING_DOTS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.…]+\s*$").unwrap());
// Broad unicode ranges covering the common emoji blocks
static EMOJI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x{1F300}-\x{1FAFF}\x{2700}-\x{27BF}\x{1F900}-\x{1F9FF}\x{2600}-\x{26FF}]+")
        .unwrap()
});

/// HoorayHeroes pages number their facts ("4 -  ...") and decorate them with
/// emoji and trailing ellipses. Strips those, then applies the default rules.
#[derive(Debug, Default, Clone, Copy)]
pub struct HoorayHeroesFormatter {
    base: DefaultFormatter,
}

impl HoorayHeroesFormatter {
    fn preprocess(&self, text: &str) -> String {
        let text = LEADING_INDEX_RE.replace(text, "");
        let text = TRAILING_DOTS_RE.replace(&text, "");
        EMOJI_RE.replace_all(text.trim_end(), "").into_owned()
    }
}

impl FactFormatter for HoorayHeroesFormatter {
    fn format_fact(&self, title: &str) -> String {
        self.base.format_fact(&self.preprocess(title))
    }

    fn format_description(&self, description: &str) -> String {
        if description.trim().is_empty() {
            return String::new();
        }
        self.base.format_description(&self.preprocess(description))
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fact::slugify;

    #[test]
    fn fact_never_ends_with_period() {
        let f = DefaultFormatter;
        for title in [
            "Bees can fly upside down.",
            "Bees can fly upside down...",
            "Bees can fly upside down . .",
            "Bees can fly upside down",
        ] {
            assert!(!f.format_fact(title).ends_with('.'), "input: {title:?}");
        }
    }

    #[test]
    fn fact_edge_markers_stripped() {
        let f = DefaultFormatter;
        assert_eq!(
            f.format_fact(" ' Bees can fly upside down... "),
            "Bees can fly upside down"
        );
        assert_eq!(
            slugify(&f.format_fact(" ' Bees can fly upside down... ")),
            "bees-can-fly-upside-down"
        );
    }

    #[test]
    fn fact_idempotent_on_clean_input() {
        let f = DefaultFormatter;
        let once = f.format_fact("Hot water can freeze faster than cold");
        assert_eq!(f.format_fact(&once), once);
    }

    #[test]
    fn description_empty_stays_empty() {
        let f = DefaultFormatter;
        assert_eq!(f.format_description(""), "");
        assert_eq!(f.format_description("   \t "), "");
    }

    #[test]
    fn description_single_trailing_period() {
        let f = DefaultFormatter;
        assert_eq!(f.format_description("Bees sleep at night"), "Bees sleep at night.");
        assert_eq!(f.format_description("Bees sleep at night."), "Bees sleep at night.");
        assert_eq!(f.format_description("Bees sleep at night.."), "Bees sleep at night.");
        assert_eq!(f.format_description("Bees sleep at night. . "), "Bees sleep at night.");
    }

    #[test]
    fn description_never_double_period() {
        let f = DefaultFormatter;
        for desc in ["a.", "a..", "a...", "a . .", "a"] {
            let out = f.format_description(desc);
            assert!(out.ends_with('.'));
            assert!(!out.ends_with(".."), "input: {desc:?} out: {out:?}");
        }
    }

    #[test]
    fn hoorayheroes_strips_index_dots_emoji() {
        let f = HoorayHeroesFormatter::default();
        assert_eq!(
            f.format_fact("4 -  Octopuses have three hearts 🐙..."),
            "Octopuses have three hearts"
        );
    }

    #[test]
    fn hoorayheroes_ellipsis_stripped() {
        let f = HoorayHeroesFormatter::default();
        assert_eq!(f.format_fact("12 - Sharks never stop moving… "), "Sharks never stop moving");
    }

    #[test]
    fn hoorayheroes_description_delegates() {
        let f = HoorayHeroesFormatter::default();
        assert_eq!(
            f.format_description("1 - They hatch from eggs 🥚.."),
            "They hatch from eggs."
        );
        assert_eq!(f.format_description("  "), "");
    }

    #[test]
    fn different_raw_titles_same_identifier() {
        let f = DefaultFormatter;
        let a = f.format_fact("Bananas are berries.");
        let b = f.format_fact(" ' Bananas are berries ");
        assert_eq!(slugify(&a), slugify(&b));
    }
}
