//! Additive heuristic risk classifier.

use std::collections::BTreeSet;

use super::patterns::{
    any_match, count_matches, CONFIG_FILES, CREDENTIAL_KEYWORDS, DATABASE_KEYWORDS,
    DIRECTORY_LISTING_PHRASES, ERROR_KEYWORDS, LOGIN_CONTENT_PATTERNS, LOGIN_TITLE_PATTERNS,
    LOGIN_URL_PATTERNS,
};
use super::weights::ScoringWeights;
use crate::models::{AnalyzedResult, FindingCategory, RawResult, RiskLevel};

/// Independent sub-scores for one result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub login: f64,
    pub sensitive: f64,
    pub config: f64,
    pub directory_listing: bool,
    pub error_page: bool,
}

pub struct RiskClassifier {
    weights: ScoringWeights,
}

impl RiskClassifier {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Computes sub-scores against the lowercased title, URL, and snippet.
    pub fn score(&self, result: &RawResult) -> ScoreBreakdown {
        let w = &self.weights;
        let title = result.title.to_lowercase();
        let url = result.url.to_lowercase();
        let snippet = result.snippet.to_lowercase();
        let anywhere = |keyword: &&str| {
            title.contains(*keyword) || url.contains(*keyword) || snippet.contains(*keyword)
        };

        let login = w.login_url * count_matches(&url, LOGIN_URL_PATTERNS) as f64
            + w.login_title * count_matches(&title, LOGIN_TITLE_PATTERNS) as f64
            + w.login_content * count_matches(&snippet, LOGIN_CONTENT_PATTERNS) as f64;

        let sensitive = w.credential
            * CREDENTIAL_KEYWORDS.iter().filter(|k| anywhere(k)).count() as f64
            + w.database * DATABASE_KEYWORDS.iter().filter(|k| anywhere(k)).count() as f64;

        let config = w.config_file
            * CONFIG_FILES
                .iter()
                .filter(|f| url.contains(*f) || title.contains(*f))
                .count() as f64;

        ScoreBreakdown {
            login,
            sensitive,
            config,
            directory_listing: any_match(&title, DIRECTORY_LISTING_PHRASES)
                || any_match(&snippet, DIRECTORY_LISTING_PHRASES),
            error_page: any_match(&title, ERROR_KEYWORDS) || any_match(&snippet, ERROR_KEYWORDS),
        }
    }

    /// Scores a result and assigns categories, tier, and confidence.
    pub fn classify(&self, result: RawResult) -> AnalyzedResult {
        let w = &self.weights;
        let score = self.score(&result);

        let mut categories = BTreeSet::new();
        let mut confidence = 0.0;
        if score.login > 0.0 {
            categories.insert(FindingCategory::LoginPage);
            confidence += score.login;
        }
        if score.sensitive > 0.0 {
            categories.insert(FindingCategory::SensitiveFile);
            confidence += score.sensitive;
        }
        if score.config > 0.0 {
            categories.insert(FindingCategory::ConfigExposure);
            confidence += score.config;
        }
        if score.directory_listing {
            categories.insert(FindingCategory::DirectoryListing);
            confidence += w.directory_listing;
        }
        if score.error_page {
            categories.insert(FindingCategory::ErrorPage);
            confidence += w.error_page;
        }

        let risk_level = if score.login >= w.login_high
            || score.sensitive >= w.sensitive_high
            || score.config >= w.config_high
            || score.directory_listing
        {
            RiskLevel::High
        } else if score.login >= w.login_medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        AnalyzedResult {
            raw: result,
            risk_level,
            categories,
            confidence_score: confidence,
        }
    }
}

impl Default for RiskClassifier {
    fn default() -> Self {
        Self::new(ScoringWeights::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Query;

    fn raw(title: &str, url: &str, snippet: &str) -> RawResult {
        RawResult {
            title: title.to_string(),
            url: url.to_string(),
            snippet: snippet.to_string(),
            source_backend: "google".to_string(),
            query: Query::new("q", "login_admin", "example.com"),
        }
    }

    #[test]
    fn test_wp_login_is_login_page_at_least_medium() {
        let analyzed = RiskClassifier::default().classify(raw(
            "Log in ‹ Site",
            "https://example.com/wp-login.php",
            "",
        ));
        assert!(analyzed.categories.contains(&FindingCategory::LoginPage));
        assert!(analyzed.risk_level >= RiskLevel::Medium);
        // "/wp-login" in the URL and "log in" in the title
        assert!((analyzed.confidence_score - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_plain_blog_post_is_low_with_no_categories() {
        let analyzed = RiskClassifier::default().classify(raw(
            "Spring recipes",
            "https://example.com/blog/post-1",
            "Seasonal baking ideas for the whole family",
        ));
        assert_eq!(analyzed.risk_level, RiskLevel::Low);
        assert!(analyzed.categories.is_empty());
        assert_eq!(analyzed.confidence_score, 0.0);
    }

    #[test]
    fn test_medium_login_threshold() {
        // one URL pattern only: 2.0
        let analyzed = RiskClassifier::default().classify(raw(
            "Welcome",
            "https://example.com/portal/home",
            "",
        ));
        assert_eq!(analyzed.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_config_exposure_is_high() {
        let analyzed = RiskClassifier::default().classify(raw(
            "Index",
            "https://example.com/.env",
            "",
        ));
        assert!(analyzed.categories.contains(&FindingCategory::ConfigExposure));
        assert_eq!(analyzed.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_directory_listing_is_high() {
        let analyzed = RiskClassifier::default().classify(raw(
            "Index of /files",
            "https://example.com/files/",
            "Parent Directory",
        ));
        assert!(analyzed.categories.contains(&FindingCategory::DirectoryListing));
        assert_eq!(analyzed.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_error_page_tag_does_not_raise_tier() {
        let analyzed = RiskClassifier::default().classify(raw(
            "Fatal exception",
            "https://example.com/page",
            "",
        ));
        assert!(analyzed.categories.contains(&FindingCategory::ErrorPage));
        assert_eq!(analyzed.risk_level, RiskLevel::Low);
        assert_eq!(analyzed.confidence_score, 1.0);
    }

    #[test]
    fn test_multiple_categories_accumulate() {
        let analyzed = RiskClassifier::default().classify(raw(
            "Admin login",
            "https://example.com/admin/backup.sql",
            "password reset",
        ));
        assert!(analyzed.categories.contains(&FindingCategory::LoginPage));
        assert!(analyzed.categories.contains(&FindingCategory::SensitiveFile));
        assert_eq!(analyzed.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_sensitive_keywords_counted_across_fields() {
        let w = ScoringWeights::default();
        let breakdown = RiskClassifier::default().score(&raw(
            "secret notes",
            "https://example.com/files/mysql",
            "token rotation",
        ));
        // "secret" + "token"; "mysql" + "sql"
        let expected = 2.0 * w.credential + 2.0 * w.database;
        assert!((breakdown.sensitive - expected).abs() < 1e-9);
    }

    #[test]
    fn test_custom_weights_change_tier() {
        let weights = ScoringWeights {
            login_url: 0.5,
            ..ScoringWeights::default()
        };
        let analyzed = RiskClassifier::new(weights).classify(raw(
            "Welcome",
            "https://example.com/portal/home",
            "",
        ));
        assert_eq!(analyzed.risk_level, RiskLevel::Low);
        assert!(analyzed.categories.contains(&FindingCategory::LoginPage));
    }
}
