//! Scoring weights and tier thresholds.

/// Weight of each matched login URL pattern.
pub const LOGIN_URL_WEIGHT: f64 = 2.0;
/// Weight of each matched login title pattern.
pub const LOGIN_TITLE_WEIGHT: f64 = 1.5;
/// Weight of each matched login content pattern.
pub const LOGIN_CONTENT_WEIGHT: f64 = 1.0;
/// Weight of each matched credential keyword.
pub const CREDENTIAL_WEIGHT: f64 = 1.5;
/// Weight of each matched database keyword.
pub const DATABASE_WEIGHT: f64 = 1.0;
/// Weight of each config filename found in the URL or title.
pub const CONFIG_FILE_WEIGHT: f64 = 2.0;
/// Fixed contribution of a directory listing.
pub const DIRECTORY_LISTING_WEIGHT: f64 = 2.0;
/// Fixed contribution of error disclosure.
pub const ERROR_PAGE_WEIGHT: f64 = 1.0;

/// Login score at or above which a result is high risk.
pub const LOGIN_HIGH_THRESHOLD: f64 = 3.0;
/// Login score at or above which a result is medium risk.
pub const LOGIN_MEDIUM_THRESHOLD: f64 = 2.0;
/// Sensitive-content score at or above which a result is high risk.
pub const SENSITIVE_HIGH_THRESHOLD: f64 = 2.0;
/// Config-exposure score at or above which a result is high risk.
pub const CONFIG_HIGH_THRESHOLD: f64 = 2.0;

/// Every tunable number the classifier uses, in one place.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringWeights {
    pub login_url: f64,
    pub login_title: f64,
    pub login_content: f64,
    pub credential: f64,
    pub database: f64,
    pub config_file: f64,
    pub directory_listing: f64,
    pub error_page: f64,
    pub login_high: f64,
    pub login_medium: f64,
    pub sensitive_high: f64,
    pub config_high: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            login_url: LOGIN_URL_WEIGHT,
            login_title: LOGIN_TITLE_WEIGHT,
            login_content: LOGIN_CONTENT_WEIGHT,
            credential: CREDENTIAL_WEIGHT,
            database: DATABASE_WEIGHT,
            config_file: CONFIG_FILE_WEIGHT,
            directory_listing: DIRECTORY_LISTING_WEIGHT,
            error_page: ERROR_PAGE_WEIGHT,
            login_high: LOGIN_HIGH_THRESHOLD,
            login_medium: LOGIN_MEDIUM_THRESHOLD,
            sensitive_high: SENSITIVE_HIGH_THRESHOLD,
            config_high: CONFIG_HIGH_THRESHOLD,
        }
    }
}
