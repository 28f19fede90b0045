use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::config::PublishingSettings;
use crate::content::PublishingConfig;

static SLUG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern is a valid regex")
});

/// Outcome of a readiness check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True iff `errors` is empty
    pub is_publishable: bool,
    /// Blocking problems
    pub errors: Vec<String>,
    /// Informational problems; never block
    pub warnings: Vec<String>,
}

/// UI emphasis for a validation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Clean,
}

/// Which readiness rule a finding came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessRule {
    Slug,
    Seo,
    Geo,
    Faq,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingLevel {
    Blocking,
    Advisory,
}

/// One rule violation, before it is flattened into a `ValidationResult`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub rule: ReadinessRule,
    pub level: FindingLevel,
    pub message: String,
}

impl Finding {
    fn blocking(rule: ReadinessRule, message: String) -> Self {
        Self { rule, level: FindingLevel::Blocking, message }
    }

    fn advisory(rule: ReadinessRule, message: String) -> Self {
        Self { rule, level: FindingLevel::Advisory, message }
    }
}

/// Readiness validator with configurable thresholds. Pure: no hidden state.
#[derive(Debug, Clone)]
pub struct PublishingValidator {
    seo_description_min_len: usize,
    geo_min_key_points: usize,
    seo_title_max_len: usize,
}

impl Default for PublishingValidator {
    fn default() -> Self {
        Self::from_settings(&PublishingSettings::default())
    }
}

impl PublishingValidator {
    pub fn from_settings(settings: &PublishingSettings) -> Self {
        Self {
            seo_description_min_len: settings.seo_description_min_len,
            geo_min_key_points: settings.geo_min_key_points,
            seo_title_max_len: settings.seo_title_max_len,
        }
    }

    pub fn seo_description_min_len(&self) -> usize {
        self.seo_description_min_len
    }

    pub fn geo_min_key_points(&self) -> usize {
        self.geo_min_key_points
    }

    /// Evaluate every rule independently and report all findings
    pub fn check(&self, config: &PublishingConfig) -> Vec<Finding> {
        let mut findings = Vec::new();

        let slug = config.slug.trim();
        if slug.is_empty() {
            findings.push(Finding::blocking(
                ReadinessRule::Slug,
                "Slug is required".to_string(),
            ));
        } else if !SLUG_PATTERN.is_match(slug) {
            findings.push(Finding::advisory(
                ReadinessRule::Slug,
                format!("Slug '{slug}' should use lowercase letters, digits and single hyphens"),
            ));
        }

        let mut seo_problems = Vec::new();
        let seo_title_len = char_len(&config.seo.title);
        if seo_title_len == 0 {
            seo_problems.push("title is missing".to_string());
        }
        let description_len = char_len(&config.seo.description);
        if description_len < self.seo_description_min_len {
            seo_problems.push(format!(
                "description has {description_len} of {} required characters",
                self.seo_description_min_len
            ));
        }
        if !seo_problems.is_empty() {
            findings.push(Finding::blocking(
                ReadinessRule::Seo,
                format!("SEO incomplete: {}", seo_problems.join("; ")),
            ));
        }
        if seo_title_len > self.seo_title_max_len {
            findings.push(Finding::advisory(
                ReadinessRule::Seo,
                format!(
                    "SEO title is {seo_title_len} characters; search results usually truncate after {}",
                    self.seo_title_max_len
                ),
            ));
        }

        let mut geo_problems = Vec::new();
        if char_len(&config.geo.snippet) == 0 {
            geo_problems.push("snippet is missing".to_string());
        }
        let key_points = config
            .geo
            .key_points
            .iter()
            .filter(|point| !point.trim().is_empty())
            .count();
        if key_points < self.geo_min_key_points {
            geo_problems.push(format!(
                "{key_points} of {} required key points",
                self.geo_min_key_points
            ));
        }
        if !geo_problems.is_empty() {
            findings.push(Finding::blocking(
                ReadinessRule::Geo,
                format!("GEO incomplete: {}", geo_problems.join("; ")),
            ));
        }

        if config.faq.is_empty() {
            findings.push(Finding::advisory(
                ReadinessRule::Faq,
                "FAQ is empty; consider adding common learner questions".to_string(),
            ));
        }

        findings
    }

    pub fn validate(&self, config: &PublishingConfig) -> ValidationResult {
        let mut result = ValidationResult::default();
        for finding in self.check(config) {
            match finding.level {
                FindingLevel::Blocking => result.errors.push(finding.message),
                FindingLevel::Advisory => result.warnings.push(finding.message),
            }
        }
        result.is_publishable = result.errors.is_empty();
        result
    }
}

/// Validate with the default thresholds
pub fn validate(config: &PublishingConfig) -> ValidationResult {
    PublishingValidator::default().validate(config)
}

/// Emphasis level for display; carries no business rule of its own
pub fn severity(result: &ValidationResult) -> Severity {
    if !result.errors.is_empty() {
        Severity::Error
    } else if !result.warnings.is_empty() {
        Severity::Warning
    } else {
        Severity::Clean
    }
}

fn char_len(value: &str) -> usize {
    value.trim().chars().count()
}
