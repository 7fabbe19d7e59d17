/*!
# Legacy API URL Rules

Rewrites direct environment lookups (`dotenv.env['KEY']`, with or without a
`??` fallback clause) into the matching `ApiConfig` getter.
*/

use crate::migration::families::{Category, RuleFamily};
use crate::migration::rules::{Rule, RuleTable};
use crate::migration::FileContext;
use crate::Result;

/// Environment key → `ApiConfig` getter
pub const API_MAPPINGS: &[(&str, &str)] = &[
    // Auth
    ("kdn_loginForm_key", "ApiConfig.authLogin"),
    ("kdn_usm_select_role_data_key", "ApiConfig.authRole"),
    ("kdn_usm_insert_membership_key", "ApiConfig.authRegister"),
    // Member
    ("kdn_usm_select_member_info_data", "ApiConfig.memberInfo"),
    ("kdn_usm_update_membership_key", "ApiConfig.updateMember"),
    ("kdn_usm_select_membership_search_key", "ApiConfig.memberSearch"),
    // Terms
    ("kdn_usm_select_cmd_key", "ApiConfig.termsList"),
    // Vessel
    ("kdn_gis_select_vessel_List", "ApiConfig.vesselList"),
    ("kdn_gis_select_vessel_Route", "ApiConfig.vesselRoute"),
    // Weather
    ("kdn_wid_select_weather_Info", "ApiConfig.weatherInfo"),
    // Navigation
    ("kdn_ros_select_navigation_Info", "ApiConfig.navigationHistory"),
    ("kdn_ros_select_visibility_Info", "ApiConfig.navigationVisibility"),
    ("kdn_ros_select_navigation_warn_Info", "ApiConfig.navigationWarnings"),
    // Public data
    ("kdn_load_date", "ApiConfig.holidayInfo"),
    // Base URLs
    ("BASE_URL", "ApiConfig.baseUrl"),
    ("GEOSERVER_URL", "ApiConfig.geoserverUrl"),
];

/// The `getter` an environment key maps to, if it is a known key
pub fn getter_for(env_key: &str) -> Option<&'static str> {
    API_MAPPINGS
        .iter()
        .find(|(key, _)| *key == env_key)
        .map(|(_, getter)| *getter)
}

/// `dotenv.env[...]` lookups of known keys → `ApiConfig.*`
pub struct ApiUrlFamily {
    table: RuleTable,
}

impl ApiUrlFamily {
    pub fn new() -> Result<Self> {
        let mut rules = Vec::with_capacity(API_MAPPINGS.len() * 5);
        for (env_key, getter) in API_MAPPINGS {
            rules.extend(lookup_variants(env_key, getter)?);
        }

        Ok(Self {
            table: RuleTable::new("api_url", rules)?,
        })
    }
}

/// The five spellings of one lookup, fallback clauses before bare lookups.
fn lookup_variants(env_key: &str, getter: &str) -> Result<Vec<Rule>> {
    let key = regex::escape(env_key);
    Ok(vec![
        Rule::pattern(
            env_key,
            &format!(r"dotenv\.env\['{key}'\]\s*\?\?\s*''"),
            getter,
            format!("dotenv.env['{env_key}'] ?? ''"),
        )?,
        Rule::pattern(
            env_key,
            &format!(r#"dotenv\.env\["{key}"\]\s*\?\?\s*"""#),
            getter,
            format!(r#"dotenv.env["{env_key}"] ?? """#),
        )?,
        Rule::pattern(
            env_key,
            &format!(r"dotenv\.env\['{key}'\]\s*\?\?\s*StringConstants\.emptyString"),
            getter,
            format!("dotenv.env['{env_key}'] ?? StringConstants.emptyString"),
        )?,
        Rule::literal(env_key, &format!("dotenv.env['{env_key}']"), getter)?,
        Rule::literal(env_key, &format!(r#"dotenv.env["{env_key}"]"#), getter)?,
    ])
}

impl RuleFamily for ApiUrlFamily {
    fn name(&self) -> &'static str {
        "ApiUrlFamily"
    }

    fn description(&self) -> &'static str {
        "Replaces dotenv.env lookups of known keys with ApiConfig getters"
    }

    fn category(&self) -> Category {
        Category::ApiUrl
    }

    fn table(&self) -> &RuleTable {
        &self.table
    }

    fn requires_canonical_import(&self) -> bool {
        true
    }
}

/// Repairs half-migrated lookups in the app entry point
///
/// An earlier manual pass left `dotenv.env[ApiConfig.x]` in `main.dart`,
/// indexing the environment with a getter. These rules unwrap them.
pub struct EntryPointFixFamily {
    table: RuleTable,
}

impl EntryPointFixFamily {
    pub const FILE_NAME: &'static str = "main.dart";
    pub const RULE_KEY: &'static str = "main.dart_fix";

    pub fn new() -> Result<Self> {
        let rules = vec![
            Rule::pattern(
                Self::RULE_KEY,
                r"dotenv\.env\[ApiConfig\.loginUrl\]\s*\?\?\s*StringConstants\.emptyString",
                "ApiConfig.authLogin",
                "dotenv.env[ApiConfig.loginUrl] ?? StringConstants.emptyString",
            )?,
            Rule::pattern(
                Self::RULE_KEY,
                r"dotenv\.env\[ApiConfig\.userRoleUrl\]\s*\?\?\s*StringConstants\.emptyString",
                "ApiConfig.authRole",
                "dotenv.env[ApiConfig.userRoleUrl] ?? StringConstants.emptyString",
            )?,
            Rule::pattern(
                Self::RULE_KEY,
                r"dotenv\.env\[ApiConfig\.(\w+)\]",
                "ApiConfig.${1}",
                "dotenv.env[ApiConfig.baseUrl]",
            )?,
        ];

        Ok(Self {
            table: RuleTable::new("main_dart_fix", rules)?,
        })
    }
}

impl RuleFamily for EntryPointFixFamily {
    fn name(&self) -> &'static str {
        "EntryPointFixFamily"
    }

    fn description(&self) -> &'static str {
        "Unwraps dotenv.env[ApiConfig.x] lookups left behind in main.dart"
    }

    fn category(&self) -> Category {
        Category::ApiUrl
    }

    fn table(&self) -> &RuleTable {
        &self.table
    }

    fn applies_to(&self, context: &FileContext) -> bool {
        context.is_named(Self::FILE_NAME)
    }

    fn requires_canonical_import(&self) -> bool {
        true
    }
}
