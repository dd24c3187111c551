//! Category → dork template table.
//!
//! Static configuration data. Every template carries a `{domain}` placeholder
//! that is replaced with the target hostname when queries are built.

/// Placeholder substituted with the target hostname.
pub const DOMAIN_PLACEHOLDER: &str = "{domain}";

/// A named group of dork templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryCategory {
    /// Stable machine name used on the command line and in reports.
    pub key: &'static str,
    /// Human-readable name.
    pub label: &'static str,
    /// Templates, most effective first.
    pub templates: &'static [&'static str],
}

pub static CATEGORIES: &[QueryCategory] = &[
    QueryCategory {
        key: "login_admin",
        label: "Login & Admin Pages",
        templates: &[
            "site:{domain} inurl:login",
            "site:{domain} inurl:admin",
            "site:{domain} inurl:dashboard",
            "site:{domain} \"admin panel\"",
            "site:{domain} \"login page\"",
        ],
    },
    QueryCategory {
        key: "file_types",
        label: "File Types & Directories",
        templates: &[
            "site:{domain} filetype:pdf",
            "site:{domain} filetype:doc OR filetype:docx",
            "site:{domain} intitle:\"index of\"",
            "site:{domain} filetype:xls OR filetype:xlsx",
        ],
    },
    QueryCategory {
        key: "config_files",
        label: "Configuration Files",
        templates: &[
            "site:{domain} filetype:conf OR filetype:config",
            "site:{domain} filetype:env",
            "site:{domain} \".htaccess\" OR \".htpasswd\"",
            "site:{domain} filetype:xml",
        ],
    },
    QueryCategory {
        key: "database_files",
        label: "Database Files",
        templates: &[
            "site:{domain} filetype:sql",
            "site:{domain} filetype:db",
            "site:{domain} \"mysql\" OR \"database\"",
        ],
    },
    QueryCategory {
        key: "error_messages",
        label: "Error Messages & Debug Info",
        templates: &[
            "site:{domain} \"error\" OR \"warning\"",
            "site:{domain} \"debug\" OR \"stack trace\"",
            "site:{domain} \"exception\" OR \"fatal\"",
        ],
    },
];
