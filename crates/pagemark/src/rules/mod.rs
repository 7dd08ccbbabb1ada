//! Rule system for HTML to Markdown conversion.
//!
//! A conversion is an ordered list of named [`Rule`]s, each rewriting the whole buffer
//! before the next one runs. The order is part of the output contract: headings are
//! rewritten before paragraphs, link text is tag-stripped before images are converted,
//! and so on.

mod block;
mod inline;
mod rule;
mod sanitize;

pub use block::block_rules;
pub use inline::inline_rules;
pub use rule::{ReplacementFn, Rule, Stage};
pub use sanitize::sanitize_rules;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use pagemark_core::Options;
use regex::Regex;
use tracing::trace;

use crate::utilities::TAG_PATTERN;

static STANDARD: Lazy<Rules> = Lazy::new(Rules::new);

/// Ordered collection of rewrite rules, keyed by name
pub struct Rules {
    rules: IndexMap<&'static str, Rule>,
}

impl Rules {
    /// Create the standard pipeline: sanitizer, block, inline, then tag stripper
    pub fn new() -> Self {
        let mut rules = IndexMap::new();

        for rule in sanitize_rules()
            .into_iter()
            .chain(block_rules())
            .chain(inline_rules())
            .chain(std::iter::once(tag_strip_rule()))
        {
            rules.insert(rule.name(), rule);
        }

        Self { rules }
    }

    /// The shared standard pipeline, compiled on first use
    pub fn standard() -> &'static Rules {
        &STANDARD
    }

    /// Get a rule by name
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// Iterate rules in execution order
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    /// Rule names in execution order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule in order
    pub fn apply(&self, html: &str, options: &Options) -> String {
        run(self.rules.values(), html, options)
    }

    /// Run rules in order up to and including `last`.
    ///
    /// An unknown name runs the whole pipeline.
    pub fn apply_until(&self, html: &str, options: &Options, last: &str) -> String {
        let end = self
            .rules
            .get_index_of(last)
            .map_or(self.rules.len(), |i| i + 1);
        run(self.rules.values().take(end), html, options)
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}

fn run<'a>(rules: impl Iterator<Item = &'a Rule>, html: &str, options: &Options) -> String {
    rules.fold(html.to_string(), |buffer, rule| {
        let output = rule.apply(&buffer, options);
        trace!(
            rule = rule.name(),
            stage = %rule.stage(),
            before = buffer.len(),
            after = output.len(),
            "applied rule"
        );
        output
    })
}

/// Terminal fallback: any tag still present is removed, its text survives
fn tag_strip_rule() -> Rule {
    Rule::remove(
        "tags",
        Stage::Strip,
        Regex::new(TAG_PATTERN).expect("valid regex"),
    )
}
