//! Configuration options for the extraction pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Facility name used when no laboratory name is recognized.
pub const DEFAULT_FACILITY: &str = "Clinical Laboratory";

/// Which recognition rules the extraction engine applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSet {
    /// Exact report labels; mass measurements must carry an mg/dl unit.
    #[default]
    Strict,
    /// Case-insensitive labels with alternatives, optional units and
    /// reference ranges.
    Permissive,
}

impl RuleSet {
    pub const fn as_str(&self) -> &'static str {
        match self {
            RuleSet::Strict => "strict",
            RuleSet::Permissive => "permissive",
        }
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether values absent from the document may be derived.
///
/// `Never` emits only what the text states. `Legacy` reproduces the older
/// behavior: an approximate birth date (`current year - age`, January 1st) and
/// today's date when the report date is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DerivationPolicy {
    #[default]
    Never,
    Legacy,
}

impl DerivationPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DerivationPolicy::Never => "never",
            DerivationPolicy::Legacy => "legacy",
        }
    }

    pub const fn derives_birth_date(&self) -> bool {
        matches!(self, DerivationPolicy::Legacy)
    }

    pub const fn falls_back_to_today(&self) -> bool {
        matches!(self, DerivationPolicy::Legacy)
    }
}

impl fmt::Display for DerivationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options controlling extraction, normalization, and assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Recognition rules used for raw text.
    pub rule_set: RuleSet,

    /// Whether birth dates and report dates may be fabricated.
    pub derivation: DerivationPolicy,

    /// Performer display name when no laboratory is recognized.
    pub default_facility: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::strict()
    }
}

impl PipelineOptions {
    /// Exact labels, nothing derived.
    pub fn strict() -> Self {
        Self {
            rule_set: RuleSet::Strict,
            derivation: DerivationPolicy::Never,
            default_facility: DEFAULT_FACILITY.to_string(),
        }
    }

    /// Exact labels with the older birth-date and today-fallback derivations.
    pub fn legacy() -> Self {
        Self {
            derivation: DerivationPolicy::Legacy,
            ..Self::strict()
        }
    }

    pub fn with_rule_set(mut self, rule_set: RuleSet) -> Self {
        self.rule_set = rule_set;
        self
    }

    pub fn with_derivation(mut self, derivation: DerivationPolicy) -> Self {
        self.derivation = derivation;
        self
    }

    pub fn with_default_facility(mut self, name: impl Into<String>) -> Self {
        self.default_facility = name.into();
        self
    }
}
