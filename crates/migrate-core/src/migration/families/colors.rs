/*!
# Color Getter Rules

`getColor…()` helpers → `AppColors.…` constants.
*/

use crate::migration::families::{Category, RuleFamily};
use crate::migration::rules::{numeric_getters, Rule, RuleTable};
use crate::Result;

/// Numbered palette families: legacy prefix, canonical prefix, numbers
const NUMBERED: &[(&str, &str, &[u32])] = &[
    ("getColorWhiteType", "AppColors.whiteType", &[1]),
    ("getColorBlackType", "AppColors.blackType", &[1, 2, 3, 4]),
    (
        "getColorGrayType",
        "AppColors.grayType",
        &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14],
    ),
    ("getColorRedType", "AppColors.redType", &[1, 2, 3]),
    ("getColorSkyType", "AppColors.skyType", &[1, 2, 3]),
    ("getColorMainType", "AppColors.mainType", &[1]),
    ("getColorGreenType", "AppColors.greenType", &[1]),
    ("getColorYellowType", "AppColors.yellowType", &[1, 2]),
    (
        "getColorEmergencyRed",
        "AppColors.emergencyRed",
        &[700, 600, 500, 400, 200, 100, 50],
    ),
    ("getColorEmergencyBlue", "AppColors.emergencyBlue", &[200, 50]),
];

/// One-off getters whose canonical names do not follow the legacy ones
const NAMED: &[(&str, &str)] = &[
    ("getColorEmergencyRed", "AppColors.emergencyRed"),
    ("getColorEmergencyOrange", "AppColors.emergencyOrange"),
    ("getColorEmergencyGreenAccent", "AppColors.emergencyGreenAccent"),
    ("getColorEmergencyGreen", "AppColors.emergencyGreen"),
    ("getColorEmergencyWhite80", "AppColors.white80"),
    ("getColorEmergencyWhite70", "AppColors.white70"),
    ("getColorEmergencyRedOpacity40", "AppColors.emergencyRed40"),
    ("getColorEmergencyRedOpacity30", "AppColors.emergencyRed30"),
    ("getColorEmergencyBlackOpacity30", "AppColors.black30"),
    ("getColorEmergencyBlackOpacity05", "AppColors.black05"),
];

pub struct ColorFamily {
    table: RuleTable,
}

impl ColorFamily {
    pub fn new() -> Result<Self> {
        let mut rules = Vec::new();
        for (legacy, canonical, numbers) in NUMBERED {
            rules.extend(numeric_getters(legacy, canonical, numbers)?);
        }
        for (legacy, canonical) in NAMED {
            rules.push(Rule::literal(*legacy, &format!("{legacy}()"), *canonical)?);
        }

        Ok(Self {
            table: RuleTable::new("colors", rules)?,
        })
    }
}

impl RuleFamily for ColorFamily {
    fn name(&self) -> &'static str {
        "ColorFamily"
    }

    fn description(&self) -> &'static str {
        "Replaces getColor*() helpers with AppColors constants"
    }

    fn category(&self) -> Category {
        Category::Colors
    }

    fn table(&self) -> &RuleTable {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(family: &ColorFamily, text: &str) -> String {
        family.table().iter().fold(text.to_string(), |acc, rule| {
            rule.matcher().replace_all(&acc, rule.replacement()).into_owned()
        })
    }

    #[test]
    fn test_gray_types_largest_first() {
        let family = ColorFamily::new().unwrap();
        let keys: Vec<&str> = family
            .table()
            .iter()
            .map(Rule::key)
            .filter(|key| key.starts_with("getColorGrayType"))
            .collect();
        assert_eq!(keys.first(), Some(&"getColorGrayType14"));
        assert_eq!(keys.last(), Some(&"getColorGrayType1"));
    }

    #[test]
    fn test_emergency_shades_do_not_collide() {
        let family = ColorFamily::new().unwrap();
        assert_eq!(
            rewrite(&family, "a(getColorEmergencyRed700(), getColorEmergencyRed(), getColorEmergencyRed50())"),
            "a(AppColors.emergencyRed700, AppColors.emergencyRed, AppColors.emergencyRed50)"
        );
    }

    #[test]
    fn test_opacity_names() {
        let family = ColorFamily::new().unwrap();
        assert_eq!(
            rewrite(&family, "getColorEmergencyBlackOpacity05() getColorEmergencyWhite80()"),
            "AppColors.black05 AppColors.white80"
        );
        assert_eq!(
            rewrite(&family, "getColorEmergencyGreenAccent() getColorEmergencyGreen()"),
            "AppColors.emergencyGreenAccent AppColors.emergencyGreen"
        );
    }
}
