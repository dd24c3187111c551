//! Pattern tables for the risk classifier. Matched as lowercase substrings.

pub const LOGIN_URL_PATTERNS: &[&str] = &[
    "/login",
    "/signin",
    "/sign-in",
    "/auth",
    "/authentication",
    "/admin",
    "/administrator",
    "/dashboard",
    "/control",
    "/panel",
    "/console",
    "/manager",
    "/portal",
    "/wp-admin",
    "/wp-login",
    "/user",
    "/account",
    "/secure",
    "/private",
    "/restricted",
];

pub const LOGIN_TITLE_PATTERNS: &[&str] = &[
    "login",
    "sign in",
    "sign-in",
    "log in",
    "log-in",
    "admin",
    "administrator",
    "dashboard",
    "control panel",
    "management",
    "manager",
    "portal",
    "console",
    "authentication",
    "auth",
    "access",
    "secure area",
];

pub const LOGIN_CONTENT_PATTERNS: &[&str] = &[
    "username",
    "password",
    "email",
    "login form",
    "sign in",
    "log in",
    "admin panel",
    "dashboard",
    "authentication required",
    "please login",
    "login page",
    "member login",
    "user login",
    "admin login",
];

pub const CREDENTIAL_KEYWORDS: &[&str] = &[
    "password",
    "passwd",
    "api_key",
    "secret",
    "token",
    "auth_token",
    "access_token",
];

pub const DATABASE_KEYWORDS: &[&str] = &[
    "mysql",
    "postgresql",
    "mongodb",
    "database",
    "sql",
    "db",
    "dump",
    "backup",
];

pub const CONFIG_FILES: &[&str] = &[
    ".env",
    "config.php",
    "web.config",
    ".htaccess",
    "database.yml",
    "settings.yml",
    "app.config",
];

pub const DIRECTORY_LISTING_PHRASES: &[&str] =
    &["index of", "directory listing", "parent directory"];

pub const ERROR_KEYWORDS: &[&str] = &[
    "error",
    "exception",
    "warning",
    "fatal",
    "stack trace",
    "debug",
    "mysql error",
];

/// Number of `patterns` found in `text`.
pub fn count_matches(text: &str, patterns: &[&str]) -> usize {
    patterns.iter().filter(|p| text.contains(*p)).count()
}

/// Whether any of `patterns` occurs in `text`.
pub fn any_match(text: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| text.contains(p))
}
