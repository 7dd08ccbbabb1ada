//! Rule type for HTML rewriting.

use std::fmt;

use pagemark_core::Options;
use regex::{Captures, Regex};

/// Type alias for replacement functions
pub type ReplacementFn = Box<dyn Fn(&Captures<'_>, &Options) -> String + Send + Sync>;

/// Pipeline stage a rule belongs to, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Drops scripts, styles and comments
    Sanitize,
    /// Headings, paragraphs, lists, blockquotes, code blocks, rules
    Block,
    /// Links, images, emphasis, strong, inline code, line breaks
    Inline,
    /// Removes whatever markup is left
    Strip,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Sanitize => "sanitize",
            Stage::Block => "block",
            Stage::Inline => "inline",
            Stage::Strip => "strip",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule rewrites every match of its pattern across the whole buffer
pub struct Rule {
    name: &'static str,
    stage: Stage,
    pattern: Regex,
    replacement: ReplacementFn,
}

impl Rule {
    /// Create a new rule
    pub fn new<F>(name: &'static str, stage: Stage, pattern: Regex, replacement: F) -> Self
    where
        F: Fn(&Captures<'_>, &Options) -> String + Send + Sync + 'static,
    {
        Self {
            name,
            stage,
            pattern,
            replacement: Box::new(replacement),
        }
    }

    /// Create a rule that deletes every match
    pub fn remove(name: &'static str, stage: Stage, pattern: Regex) -> Self {
        Self::new(name, stage, pattern, |_, _| String::new())
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Apply this rule to the whole buffer, returning the rewritten buffer
    pub fn apply(&self, input: &str, options: &Options) -> String {
        self.pattern
            .replace_all(input, |caps: &Captures<'_>| (self.replacement)(caps, options))
            .into_owned()
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("stage", &self.stage)
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}
