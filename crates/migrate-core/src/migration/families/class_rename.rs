/*!
# Class Rename Rules

Folds retired constant classes into their replacements: the import of the old
file is pointed at the new file and `OldClass.` member accesses become
`NewClass.`.
*/

use crate::migration::families::{Category, RuleFamily};
use crate::migration::rules::{Rule, RuleTable};
use crate::Result;

const PACKAGE_PREFIX: &str = "import 'package:vms_app/core/constants/";

/// A retired class and the file that declared it
struct Retired {
    class: &'static str,
    file: &'static str,
}

/// Renames retired classes (and their imports) to one surviving class
pub struct ClassRenameFamily {
    name: &'static str,
    description: &'static str,
    category: Category,
    table: RuleTable,
}

impl ClassRenameFamily {
    /// `ValidationConstants` / `ValidationPatterns` → `ValidationRules`
    pub fn validation() -> Result<Self> {
        Self::build(
            "ValidationFamily",
            "Merges ValidationConstants and ValidationPatterns into ValidationRules",
            Category::Validation,
            &[
                Retired {
                    class: "ValidationConstants",
                    file: "validation_constants.dart",
                },
                Retired {
                    class: "ValidationPatterns",
                    file: "validation_patterns.dart",
                },
            ],
            "ValidationRules",
            "validation_rules.dart",
        )
    }

    /// `EnvKeys` / `ApiEndpoints` → `ApiConfig`
    pub fn api_class() -> Result<Self> {
        Self::build(
            "ApiClassFamily",
            "Merges EnvKeys and ApiEndpoints into ApiConfig",
            Category::ApiClass,
            &[
                Retired {
                    class: "EnvKeys",
                    file: "env_keys.dart",
                },
                Retired {
                    class: "ApiEndpoints",
                    file: "api_endpoints.dart",
                },
            ],
            "ApiConfig",
            "api_config.dart",
        )
    }

    fn build(
        name: &'static str,
        description: &'static str,
        category: Category,
        retired: &[Retired],
        target_class: &str,
        target_file: &str,
    ) -> Result<Self> {
        let target_import = format!("{PACKAGE_PREFIX}{target_file}'");
        let mut rules = Vec::with_capacity(retired.len() * 2);

        // Imports first so the class rules never see a half-rewritten import.
        for old in retired {
            rules.push(Rule::literal(
                old.file,
                &format!("{PACKAGE_PREFIX}{}'", old.file),
                target_import.clone(),
            )?);
        }
        for old in retired {
            rules.push(Rule::literal(
                old.class,
                &format!("{}.", old.class),
                format!("{target_class}."),
            )?);
        }

        Ok(Self {
            name,
            description,
            category,
            table: RuleTable::new(name, rules)?,
        })
    }
}

impl RuleFamily for ClassRenameFamily {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn category(&self) -> Category {
        self.category
    }

    fn table(&self) -> &RuleTable {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(family: &ClassRenameFamily, text: &str) -> String {
        family.table().iter().fold(text.to_string(), |acc, rule| {
            rule.matcher().replace_all(&acc, rule.replacement()).into_owned()
        })
    }

    #[test]
    fn test_validation_import_and_usage() {
        let family = ClassRenameFamily::validation().unwrap();
        let text = "import 'package:vms_app/core/constants/validation_patterns.dart';\n\
                    final re = ValidationPatterns.email;\n";
        assert_eq!(
            rewrite(&family, text),
            "import 'package:vms_app/core/constants/validation_rules.dart';\n\
             final re = ValidationRules.email;\n"
        );
    }

    #[test]
    fn test_api_class_rename() {
        let family = ClassRenameFamily::api_class().unwrap();
        assert_eq!(
            rewrite(&family, "get(EnvKeys.baseUrl + ApiEndpoints.login)"),
            "get(ApiConfig.baseUrl + ApiConfig.login)"
        );
        assert_eq!(family.category(), Category::ApiClass);
    }

    #[test]
    fn test_class_rule_needs_member_access() {
        let family = ClassRenameFamily::api_class().unwrap();
        assert_eq!(rewrite(&family, "class EnvKeys {}"), "class EnvKeys {}");
    }
}
