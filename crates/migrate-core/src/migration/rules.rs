/*!
# Rule Tables

A [`Rule`] pairs a matcher with its replacement text; a [`RuleTable`] is an
ordered sequence of rules that the applier tries strictly in table order.

Ordering is the one correctness-critical policy of the engine: a rule whose
matcher fits inside the text of a later rule would rewrite part of that text
first and leave a malformed remainder. Every rule therefore carries a sample
of the text it targets, and [`RuleTable::new`] refuses any ordering in which
an earlier rule matches inside a later rule's sample.
*/

use regex::{Captures, Regex};

use crate::{MigrationError, Result};

/// A single pattern → replacement mapping
#[derive(Debug, Clone)]
pub struct Rule {
    key: String,
    matcher: Regex,
    replacement: String,
    sample: String,
    expands_captures: bool,
}

impl Rule {
    /// Rule matching `text` verbatim.
    pub fn literal(key: impl Into<String>, text: &str, replacement: impl Into<String>) -> Result<Self> {
        let matcher = Regex::new(&regex::escape(text))?;
        Ok(Self {
            key: key.into(),
            matcher,
            replacement: replacement.into(),
            sample: text.to_string(),
            expands_captures: false,
        })
    }

    /// Rule with a regular-expression matcher.
    ///
    /// `sample` must be a text the pattern matches; it is what the table's
    /// ordering check tests earlier rules against. The replacement is only
    /// treated as a `$n` template when the pattern has capture groups.
    pub fn pattern(
        key: impl Into<String>,
        pattern: &str,
        replacement: impl Into<String>,
        sample: impl Into<String>,
    ) -> Result<Self> {
        let matcher = Regex::new(pattern)?;
        let expands_captures = matcher.captures_len() > 1;
        Ok(Self {
            key: key.into(),
            matcher,
            replacement: replacement.into(),
            sample: sample.into(),
            expands_captures,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn matcher(&self) -> &Regex {
        &self.matcher
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn sample(&self) -> &str {
        &self.sample
    }

    pub fn expands_captures(&self) -> bool {
        self.expands_captures
    }

    /// Replacement text for one match
    pub fn replacement_for(&self, captures: &Captures<'_>) -> String {
        if self.expands_captures {
            let mut expanded = String::new();
            captures.expand(&self.replacement, &mut expanded);
            expanded
        } else {
            self.replacement.clone()
        }
    }
}

/// Ordered rules for one migration concern
#[derive(Debug, Clone)]
pub struct RuleTable {
    name: &'static str,
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Build a table, rejecting orderings where an earlier rule shadows a later one.
    pub fn new(name: &'static str, rules: Vec<Rule>) -> Result<Self> {
        for (index, later) in rules.iter().enumerate() {
            if let Some(earlier) = rules[..index]
                .iter()
                .find(|earlier| earlier.matcher.is_match(&later.sample))
            {
                return Err(MigrationError::ShadowedRule {
                    table: name.to_string(),
                    earlier: earlier.matcher.as_str().to_string(),
                    later: later.matcher.as_str().to_string(),
                });
            }
        }

        Ok(Self { name, rules })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Sort a numeric suffix set largest first, dropping duplicates.
///
/// Numeric getter families are generated from this order so that
/// `getSize100` is always tried before `getSize10` and `getSize1`.
pub fn descending(values: &[u32]) -> Vec<u32> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.dedup();
    sorted
}

/// Literal getter-call rules `{legacy_prefix}{n}()` → `{canonical_prefix}{n}`
/// for each `n`, largest first.
pub fn numeric_getters(legacy_prefix: &str, canonical_prefix: &str, values: &[u32]) -> Result<Vec<Rule>> {
    descending(values)
        .into_iter()
        .map(|n| {
            Rule::literal(
                format!("{legacy_prefix}{n}"),
                &format!("{legacy_prefix}{n}()"),
                format!("{canonical_prefix}{n}"),
            )
        })
        .collect()
}
