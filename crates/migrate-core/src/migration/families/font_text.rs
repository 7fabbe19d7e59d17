/*!
# Font Weight, Text Alignment and Border Rules
*/

use crate::migration::families::{Category, RuleFamily};
use crate::migration::rules::{numeric_getters, Rule, RuleTable};
use crate::Result;

const WEIGHTS: &[u32] = &[700, 600, 500, 400];

const NAMED: &[(&str, &str)] = &[
    ("getTextbold", "FontWeights.bold"),
    ("getTextnormal", "FontWeights.normal"),
    ("getTextcenter", "TextAligns.center"),
    ("getTextright", "TextAligns.right"),
    ("getTextleft", "TextAligns.left"),
    ("getTextradius6", "Borders.rounded10"),
    ("getTextRadius6Direct", "Borders.radius10"),
];

pub struct FontTextFamily {
    table: RuleTable,
}

impl FontTextFamily {
    pub fn new() -> Result<Self> {
        let mut rules = numeric_getters("getText", "FontWeights.w", WEIGHTS)?;
        for (legacy, canonical) in NAMED {
            rules.push(Rule::literal(*legacy, &format!("{legacy}()"), *canonical)?);
        }

        Ok(Self {
            table: RuleTable::new("font_text", rules)?,
        })
    }
}

impl RuleFamily for FontTextFamily {
    fn name(&self) -> &'static str {
        "FontTextFamily"
    }

    fn description(&self) -> &'static str {
        "Replaces getText*() helpers with FontWeights, TextAligns and Borders constants"
    }

    fn category(&self) -> Category {
        Category::FontText
    }

    fn table(&self) -> &RuleTable {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_and_aligns() {
        let family = FontTextFamily::new().unwrap();
        let text = "Text(style: TextStyle(fontWeight: getText700()), textAlign: getTextcenter())";
        let migrated = family.table().iter().fold(text.to_string(), |acc, rule| {
            rule.matcher().replace_all(&acc, rule.replacement()).into_owned()
        });
        assert_eq!(
            migrated,
            "Text(style: TextStyle(fontWeight: FontWeights.w700), textAlign: TextAligns.center)"
        );
    }

    #[test]
    fn test_radius_variants_are_distinct() {
        let family = FontTextFamily::new().unwrap();
        let radius: Vec<&str> = family
            .table()
            .iter()
            .filter(|rule| rule.key().to_lowercase().starts_with("gettextradius6"))
            .map(Rule::replacement)
            .collect();
        assert_eq!(radius, vec!["Borders.rounded10", "Borders.radius10"]);
    }
}
