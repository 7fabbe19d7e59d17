/*!
# Size Getter Rules

`getSize{n}()` → `AppSizes.s{n}` and `getSizeInt{n}()` → `AppSizes.i{n}`.

The rules are generated from [`SIZES`] in descending numeric order, so a
longer number is always claimed by its own rule before any rule for a
shorter number sharing its leading digits gets a chance.
*/

use crate::migration::families::{Category, RuleFamily};
use crate::migration::rules::{descending, Rule, RuleTable};
use crate::Result;

/// Every size the legacy helpers exposed
pub const SIZES: &[u32] = &[
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 18, 20, 21, 24, 25, 26, 28, 29, 30,
    32, 34, 35, 36, 37, 40, 41, 44, 45, 48, 50, 52, 54, 56, 60, 65, 70, 80, 92, 96, 100, 120, 133,
    134, 150, 160, 170, 180, 206, 266, 300, 312, 330, 350, 400, 520, 550, 580,
];

pub struct SizeFamily {
    table: RuleTable,
}

impl SizeFamily {
    pub fn new() -> Result<Self> {
        let mut rules = Vec::with_capacity(SIZES.len() * 2 + 1);
        for n in descending(SIZES) {
            rules.push(Rule::literal(
                format!("getSize{n}"),
                &format!("getSize{n}()"),
                format!("AppSizes.s{n}"),
            )?);
            rules.push(Rule::literal(
                format!("getSizeInt{n}"),
                &format!("getSizeInt{n}()"),
                format!("AppSizes.i{n}"),
            )?);
        }
        rules.push(Rule::literal("getSize1_333", "getSize1_333()", "AppSizes.s1_333")?);

        Ok(Self {
            table: RuleTable::new("sizes", rules)?,
        })
    }
}

impl RuleFamily for SizeFamily {
    fn name(&self) -> &'static str {
        "SizeFamily"
    }

    fn description(&self) -> &'static str {
        "Replaces getSize*() and getSizeInt*() helpers with AppSizes constants"
    }

    fn category(&self) -> Category {
        Category::Sizes
    }

    fn table(&self) -> &RuleTable {
        &self.table
    }
}
