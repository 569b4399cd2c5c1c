//! Compiler configuration.
//!
//! Deserializable so a project loader can pass its `nexema.yaml` section
//! straight through; every key is optional.

use serde::{Deserialize, Serialize};

use crate::analyze::RuleKind;
use crate::diagnostics::Severity;
use crate::{Error, Result};

/// Version written into snapshots unless configured otherwise.
pub const DEFAULT_SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompilerConfig {
    /// Rule keys that are not run.
    pub disabled_rules: Vec<String>,
    /// Rule keys whose diagnostics are reported as warnings.
    pub warning_rules: Vec<String>,
    /// Treat warnings as blocking.
    pub deny_warnings: bool,
    pub snapshot_version: u32,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            disabled_rules: Vec::new(),
            warning_rules: Vec::new(),
            deny_warnings: false,
            snapshot_version: DEFAULT_SNAPSHOT_VERSION,
        }
    }
}

impl CompilerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn disable_rule(mut self, rule: RuleKind) -> Self {
        self.disabled_rules.push(rule.key().to_string());
        self
    }

    pub fn warn_rule(mut self, rule: RuleKind) -> Self {
        self.warning_rules.push(rule.key().to_string());
        self
    }

    pub fn deny_warnings(mut self, value: bool) -> Self {
        self.deny_warnings = value;
        self
    }

    pub fn snapshot_version(mut self, version: u32) -> Self {
        self.snapshot_version = version;
        self
    }

    /// Reject rule keys that do not name a rule, and keys naming a
    /// [required](RuleKind::is_required) rule.
    pub fn validate(&self) -> Result<()> {
        let keys = || self.disabled_rules.iter().chain(&self.warning_rules);
        if let Some(key) = keys().find(|key| RuleKind::from_key(key).is_none()) {
            return Err(Error::UnknownRule(key.clone()));
        }
        let required =
            keys().find(|key| RuleKind::from_key(key).is_some_and(RuleKind::is_required));
        match required {
            Some(key) => Err(Error::RequiredRule(key.clone())),
            None => Ok(()),
        }
    }

    pub fn is_enabled(&self, rule: RuleKind) -> bool {
        !self.disabled_rules.iter().any(|key| key == rule.key())
    }

    pub fn severity_of(&self, rule: RuleKind) -> Severity {
        if self.warning_rules.iter().any(|key| key == rule.key()) {
            Severity::Warning
        } else {
            Severity::Error
        }
    }
}
