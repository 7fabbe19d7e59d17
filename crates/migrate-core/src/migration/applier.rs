/*!
# Substitution Applier

Runs rule families over one file's text. Pure: no I/O, no shared state.

For every rule, in table order, all non-overlapping matches in the current
text are recorded and then replaced before the next rule runs, so each rule
sees the output of the ones before it.
*/

use tracing::debug;

use super::families::{standard_families, Category, RuleFamily};
use super::rules::Rule;
use super::stats::ReplacementRecord;
use super::FileContext;
use crate::Result;

/// Text after substitution plus what happened to it
#[derive(Debug, Clone)]
pub struct Substitution {
    pub text: String,
    pub records: Vec<ReplacementRecord>,
    /// A replacement introduced a reference that needs the canonical import
    pub needs_canonical_import: bool,
}

impl Substitution {
    pub fn count(&self) -> usize {
        self.records.len()
    }
}

pub struct SubstitutionApplier {
    families: Vec<Box<dyn RuleFamily>>,
}

impl SubstitutionApplier {
    pub fn new(families: Vec<Box<dyn RuleFamily>>) -> Self {
        Self { families }
    }

    /// Applier over every family, in the standard order
    pub fn standard() -> Result<Self> {
        Ok(Self::new(standard_families()?))
    }

    pub fn families(&self) -> &[Box<dyn RuleFamily>] {
        &self.families
    }

    pub fn apply(&self, text: &str, context: &FileContext) -> Substitution {
        let mut current = text.to_string();
        let mut records = Vec::new();
        let mut needs_canonical_import = false;

        for family in self.families.iter().filter(|family| family.applies_to(context)) {
            let before = records.len();
            for rule in family.table() {
                if let Some(rewritten) = apply_rule(&current, rule, family.category(), &mut records) {
                    current = rewritten;
                }
            }

            let hits = records.len() - before;
            if hits > 0 {
                debug!(file = context.label(), family = family.name(), hits, "rules applied");
                if family.requires_canonical_import() {
                    needs_canonical_import = true;
                }
            }
        }

        Substitution {
            text: current,
            records,
            needs_canonical_import,
        }
    }
}

/// Replace every match of `rule` in `text`, appending one record per match.
/// Returns `None` when the rule does not match at all.
fn apply_rule(
    text: &str,
    rule: &Rule,
    category: Category,
    records: &mut Vec<ReplacementRecord>,
) -> Option<String> {
    let mut output = String::new();
    let mut last_end = 0;
    let mut line = 1;
    let mut counted_to = 0;
    let mut matched = false;

    for captures in rule.matcher().captures_iter(text) {
        let Some(found) = captures.get(0) else {
            continue;
        };
        matched = true;
        line += text[counted_to..found.start()].matches('\n').count();
        counted_to = found.start();

        let replacement = rule.replacement_for(&captures);
        output.push_str(&text[last_end..found.start()]);
        output.push_str(&replacement);
        last_end = found.end();

        records.push(ReplacementRecord {
            line,
            original: found.as_str().to_string(),
            replacement,
            key: rule.key().to_string(),
            category,
        });
    }

    if !matched {
        return None;
    }
    output.push_str(&text[last_end..]);
    Some(output)
}
