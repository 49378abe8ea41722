//! Select the platform entry that applies to a host
//!
//! Hosts are described by `os` and `arch` labels using Go-style names
//! (`darwin`, `amd64`, ...), which is the vocabulary manifests are written in.

use std::collections::BTreeMap;

use crate::types::{Platform, Selector, SelectorOperator};

/// Overrides the detected operating system label.
pub const OS_ENV_VAR: &str = "PLUGCTL_OS";

/// Overrides the detected architecture label.
pub const ARCH_ENV_VAR: &str = "PLUGCTL_ARCH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformTarget {
    pub os: String,
    pub arch: String,
}

impl PlatformTarget {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// The host this process runs on, honoring the override variables
    pub fn current() -> Self {
        let os = std::env::var(OS_ENV_VAR)
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| os_label(std::env::consts::OS).to_string());
        let arch = std::env::var(ARCH_ENV_VAR)
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| arch_label(std::env::consts::ARCH).to_string());
        Self { os, arch }
    }

    pub fn labels(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("os".to_string(), self.os.clone()),
            ("arch".to_string(), self.arch.clone()),
        ])
    }
}

fn os_label(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

fn arch_label(arch: &str) -> &str {
    match arch {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "x86" => "386",
        other => other,
    }
}

impl Selector {
    /// Whether every label and expression of the selector holds for `labels`
    ///
    /// An empty selector matches everything.
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        let labels_match = self
            .match_labels
            .iter()
            .all(|(key, value)| labels.get(key) == Some(value));

        labels_match
            && self.match_expressions.iter().all(|req| {
                let actual = labels.get(&req.key);
                match req.operator {
                    SelectorOperator::In => actual.is_some_and(|v| req.values.contains(v)),
                    SelectorOperator::NotIn => actual.map_or(true, |v| !req.values.contains(v)),
                    SelectorOperator::Exists => actual.is_some(),
                    SelectorOperator::DoesNotExist => actual.is_none(),
                }
            })
    }
}

/// First platform, in declaration order, whose selector matches `target`
///
/// Entries without a selector never match.
pub fn matching_platform<'a>(
    platforms: &'a [Platform],
    target: &PlatformTarget,
) -> Option<&'a Platform> {
    let labels = target.labels();
    platforms.iter().find(|platform| {
        platform
            .selector
            .as_ref()
            .is_some_and(|selector| selector.matches(&labels))
    })
}
