pub mod fetch;
pub mod fragment;
pub mod hoorayheroes;
pub mod sciencefocus;

use anyhow::Result;
use clap::ValueEnum;

use crate::fact::Fact;
use crate::format::{DefaultFormatter, FactFormatter, HoorayHeroesFormatter};

const HOORAYHEROES_BASE_URL: &str = "https://hoorayheroes.com/";

/// Supported source sites. Closed set: adding a site means adding a variant
/// plus its parse rules, selected on the command line by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Site {
    /// hoorayheroes.com — 30 fun facts about animals
    HoorayheroesAnimals,
    /// hoorayheroes.com — myth-busting fun facts
    HoorayheroesMythBusting,
    /// sciencefocus.com — fun facts listicle
    SciencefocusFunFacts,
}

impl Site {
    pub fn url(self) -> String {
        match self {
            Site::HoorayheroesAnimals => {
                format!("{HOORAYHEROES_BASE_URL}30-fun-facts-about-animals/")
            }
            Site::HoorayheroesMythBusting => {
                format!("{HOORAYHEROES_BASE_URL}myth-busting-fun-facts/")
            }
            Site::SciencefocusFunFacts => {
                "https://www.sciencefocus.com/science/fun-facts".to_string()
            }
        }
    }

    /// Selector that only matches once the fact list has actually loaded;
    /// the rendered fetch waits for it before accepting a page.
    fn content_marker(self) -> &'static str {
        match self {
            Site::HoorayheroesAnimals | Site::HoorayheroesMythBusting => {
                "section.cms-content h2"
            }
            Site::SciencefocusFunFacts => "div.article-body li",
        }
    }

    fn default_formatter(self) -> Box<dyn FactFormatter> {
        match self {
            Site::HoorayheroesAnimals | Site::HoorayheroesMythBusting => {
                Box::new(HoorayHeroesFormatter::default())
            }
            Site::SciencefocusFunFacts => Box::new(DefaultFormatter),
        }
    }
}

/// Site adapter: fetch the source page, parse the fact fragments in document
/// order, transform each into a normalized [`Fact`].
pub struct SiteExtractor {
    site: Site,
    formatter: Box<dyn FactFormatter>,
}

impl SiteExtractor {
    pub fn new(site: Site) -> Self {
        Self::with_formatter(site, site.default_formatter())
    }

    pub fn with_formatter(site: Site, formatter: Box<dyn FactFormatter>) -> Self {
        SiteExtractor { site, formatter }
    }

    pub fn url(&self) -> String {
        self.site.url()
    }

    pub async fn run(&self) -> Result<Vec<Fact>> {
        let html = fetch::fetch_page(&self.site.url(), self.site.content_marker()).await?;
        self.parse(&html)
    }

    fn parse(&self, html: &str) -> Result<Vec<Fact>> {
        match self.site {
            Site::HoorayheroesAnimals => hoorayheroes::parse(html, self.formatter.as_ref(), None),
            Site::HoorayheroesMythBusting => {
                hoorayheroes::parse(html, self.formatter.as_ref(), Some("Myth busting: "))
            }
            Site::SciencefocusFunFacts => sciencefocus::parse(html, self.formatter.as_ref()),
        }
    }
}

// ── Tests ──
