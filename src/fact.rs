/// Normalized fact record produced by an extractor. Purely in-memory until a
/// storage backend persists it; `identifier` is the sole deduplication key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
    pub fact: String,
    pub identifier: String,
    pub description: String,
}

impl Fact {
    /// Build a fact from already-formatted title and description. The
    /// identifier is derived from the formatted title, so it stays stable
    /// under re-formatting of the same source text.
    pub fn new(fact: impl Into<String>, description: impl Into<String>) -> Self {
        let fact = fact.into();
        let identifier = slugify(&fact);
        Fact {
            fact,
            identifier,
            description: description.into(),
        }
    }
}

/// URL-safe slug: ASCII alphanumerics lowercased, runs of
/// whitespace/hyphens/underscores collapsed to a single `-`, everything else
/// dropped. No leading or trailing `-`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_sep = false;
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_sep = true;
        }
    }
    slug
}

// ── Tests ──
