//! Optional TOML configuration.
//!
//! ```toml
//! [pipeline]
//! rule_set = "permissive"
//! derivation = "never"
//! default_facility = "Clinical Laboratory"
//!
//! [output]
//! suffix = "labfhir"
//! ```
//!
//! Every key is optional. Command-line flags override file values.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use labfhir_model::{DerivationPolicy, PipelineOptions, RuleSet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub pipeline: PipelineSection,
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineSection {
    pub rule_set: Option<RuleSet>,
    pub derivation: Option<DerivationPolicy>,
    pub default_facility: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    /// Output file suffix; the executable name when unset.
    pub suffix: Option<String>,
}

impl CliConfig {
    /// Reads and parses a configuration file. A path that does not exist is
    /// an error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config =
            toml::from_str(&content).with_context(|| format!("parse config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Defaults when no path is given.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Pipeline options from the file, with per-invocation overrides applied
    /// on top.
    pub fn pipeline_options(
        &self,
        rule_set: Option<RuleSet>,
        derivation: Option<DerivationPolicy>,
    ) -> PipelineOptions {
        let mut options = PipelineOptions::strict();
        if let Some(rule_set) = rule_set.or(self.pipeline.rule_set) {
            options = options.with_rule_set(rule_set);
        }
        if let Some(derivation) = derivation.or(self.pipeline.derivation) {
            options = options.with_derivation(derivation);
        }
        if let Some(facility) = &self.pipeline.default_facility {
            options = options.with_default_facility(facility.clone());
        }
        options
    }

    /// The flag value, else the file value, else `fallback`.
    pub fn output_suffix(&self, flag: Option<&str>, fallback: &str) -> String {
        flag.or(self.output.suffix.as_deref())
            .filter(|suffix| !suffix.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[pipeline]
rule_set = "permissive"
derivation = "legacy"
default_facility = "Ward 4 Lab"

[output]
suffix = "fhir_regex"
"#;

    #[test]
    fn test_parse_full_config() {
        let config: CliConfig = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.pipeline.rule_set, Some(RuleSet::Permissive));
        assert_eq!(config.pipeline.derivation, Some(DerivationPolicy::Legacy));
        let options = config.pipeline_options(None, None);
        assert_eq!(options.rule_set, RuleSet::Permissive);
        assert_eq!(options.derivation, DerivationPolicy::Legacy);
        assert_eq!(options.default_facility, "Ward 4 Lab");
        assert_eq!(config.output_suffix(None, "labfhir"), "fhir_regex");
    }

    #[test]
    fn test_flags_override_file() {
        let config: CliConfig = toml::from_str(SAMPLE).unwrap();
        let options = config.pipeline_options(Some(RuleSet::Strict), Some(DerivationPolicy::Never));
        assert_eq!(options.rule_set, RuleSet::Strict);
        assert_eq!(options.derivation, DerivationPolicy::Never);
        assert_eq!(config.output_suffix(Some("x"), "labfhir"), "x");
    }

    #[test]
    fn test_empty_config_is_strict() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.pipeline_options(None, None), PipelineOptions::strict());
        assert_eq!(config.output_suffix(None, "labfhir"), "labfhir");
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(toml::from_str::<CliConfig>("[pipeline]\nrules = \"strict\"\n").is_err());
        assert!(toml::from_str::<CliConfig>("[pipeline]\nrule_set = \"fuzzy\"\n").is_err());
    }
}
