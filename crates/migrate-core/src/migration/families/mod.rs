/*!
# Rule Families

Collection of rule families, one per migration concern. The order returned by
[`standard_families`] is the order the applier runs them in.
*/

use std::fmt;

use serde::Serialize;

use super::rules::RuleTable;
use super::FileContext;
use crate::Result;

pub mod api_url;
pub mod class_rename;
pub mod colors;
pub mod font_text;
pub mod sizes;

// Re-export the families
pub use api_url::{ApiUrlFamily, EntryPointFixFamily};
pub use class_rename::ClassRenameFamily;
pub use colors::ColorFamily;
pub use font_text::FontTextFamily;
pub use sizes::SizeFamily;

/// Reporting bucket a replacement is counted under
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    ApiUrl,
    Colors,
    FontText,
    Sizes,
    Validation,
    ApiClass,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::ApiUrl => "API URL",
            Category::Colors => "Colors",
            Category::FontText => "Font/Text",
            Category::Sizes => "Sizes",
            Category::Validation => "Validation",
            Category::ApiClass => "API Config",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One migration concern: a named, ordered rule table plus its policies
pub trait RuleFamily: Send + Sync {
    /// Human-readable name for this family
    fn name(&self) -> &'static str;

    /// What this family rewrites
    fn description(&self) -> &'static str;

    /// Statistics bucket for its replacements
    fn category(&self) -> Category;

    /// The ordered rules
    fn table(&self) -> &RuleTable;

    /// Whether this family runs on the given file
    fn applies_to(&self, context: &FileContext) -> bool {
        let _ = context;
        true
    }

    /// Whether a replacement made by this family needs the canonical import
    fn requires_canonical_import(&self) -> bool {
        false
    }
}

/// All families in application order: legacy URLs, entry-point fix-ups,
/// colors, font/text, sizes, validation, API classes.
pub fn standard_families() -> Result<Vec<Box<dyn RuleFamily>>> {
    Ok(vec![
        Box::new(ApiUrlFamily::new()?),
        Box::new(EntryPointFixFamily::new()?),
        Box::new(ColorFamily::new()?),
        Box::new(FontTextFamily::new()?),
        Box::new(SizeFamily::new()?),
        Box::new(ClassRenameFamily::validation()?),
        Box::new(ClassRenameFamily::api_class()?),
    ])
}
