//! Page analysis for the direct probe: login links on a homepage and login
//! evidence on a fetched path.

use scraper::Html;
use url::Url;

use crate::config::HTTP_STATUS_TOO_MANY_REQUESTS;
use crate::error_handling::{find_block_marker, FailureKind};
use crate::utils::{collapse_whitespace, element_text, first_text, parse_selector_with_fallback};

/// Markers of a WAF or bot-check interstitial served instead of the page.
pub const BLOCK_PAGE_MARKERS: &[&str] = &[
    "captcha",
    "verify you are human",
    "unusual traffic",
    "attention required",
    "access denied",
];

/// Well-known paths checked on every target.
pub const LOGIN_PATHS: &[&str] = &[
    "/login",
    "/signin",
    "/sign-in",
    "/account/login",
    "/account",
    "/admin",
    "/administrator",
    "/dashboard",
    "/wp-admin",
    "/wp-login.php",
    "/user/login",
    "/auth",
    "/authentication",
    "/portal",
    "/member",
    "/customer/login",
    "/client/login",
];

/// Homepage anchor text/href keywords that mark a login link.
pub const LOGIN_LINK_KEYWORDS: &[&str] = &[
    "login",
    "log in",
    "log-in",
    "signin",
    "sign in",
    "sign-in",
    "account",
    "my account",
    "member",
    "member login",
    "admin",
    "administrator",
    "dashboard",
    "portal",
];

/// Visible-text tokens that suggest a login page.
pub const LOGIN_BODY_INDICATORS: &[&str] = &[
    "password",
    "username",
    "email",
    "sign in",
    "log in",
    "login",
    "authentication",
    "admin",
    "dashboard",
];

/// Input `name`s that mark a credential form.
const CREDENTIAL_INPUT_NAMES: &[&str] = &["password", "username", "email", "user"];

/// A homepage anchor that looks like a way into an account area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginLink {
    pub url: Url,
    pub text: String,
    pub keyword: &'static str,
}

/// Finds anchors whose text or href contains a login keyword, resolved against
/// `base`. Only http(s) destinations are kept.
pub fn find_login_links(html: &str, base: &Url) -> Vec<LoginLink> {
    let document = Html::parse_document(html);
    let anchors = parse_selector_with_fallback("a[href]", "homepage login links");

    document
        .select(&anchors)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?.trim();
            let text = collapse_whitespace(&element_text(&anchor));
            let haystack = format!("{} {}", text, href).to_lowercase();
            let keyword = LOGIN_LINK_KEYWORDS
                .iter()
                .copied()
                .find(|k| haystack.contains(k))?;
            let url = base.join(href).ok()?;
            if !matches!(url.scheme(), "http" | "https") {
                return None;
            }
            Some(LoginLink { url, text, keyword })
        })
        .collect()
}

/// What a fetched path revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEvidence {
    pub status: u16,
    pub page_title: Option<String>,
    pub indicators: Vec<&'static str>,
    pub has_login_form: bool,
}

impl PathEvidence {
    /// Auth-gated statuses count on their own; a 200 needs indicators or a
    /// credential form.
    pub fn is_hit(&self) -> bool {
        match self.status {
            401 | 403 => true,
            200 => !self.indicators.is_empty() || self.has_login_form,
            _ => false,
        }
    }

    /// Short human-readable account of the evidence.
    pub fn describe(&self) -> String {
        let indicators = if self.indicators.is_empty() {
            "none".to_string()
        } else {
            self.indicators
                .iter()
                .take(3)
                .copied()
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!(
            "Direct path check: HTTP {}, indicators: {}, login form: {}",
            self.status,
            indicators,
            if self.has_login_form { "yes" } else { "no" }
        )
    }
}

/// Inspects a path response. Bodies are only examined for 200/401/403.
pub fn inspect_path_response(status: u16, body: &str) -> PathEvidence {
    if !matches!(status, 200 | 401 | 403) || body.trim().is_empty() {
        return PathEvidence {
            status,
            page_title: None,
            indicators: Vec::new(),
            has_login_form: false,
        };
    }

    let document = Html::parse_document(body);
    let title_sel = parse_selector_with_fallback("title", "path title");
    let body_sel = parse_selector_with_fallback("body", "path body");
    let input_sel = parse_selector_with_fallback("form input", "path form inputs");

    let page_title = first_text(&document.root_element(), &title_sel)
        .map(|t| collapse_whitespace(&t))
        .filter(|t| !t.is_empty());
    let visible = document
        .select(&body_sel)
        .next()
        .map(|b| element_text(&b))
        .unwrap_or_default()
        .to_lowercase();
    let indicators = LOGIN_BODY_INDICATORS
        .iter()
        .copied()
        .filter(|token| visible.contains(token))
        .collect();
    let has_login_form = document.select(&input_sel).any(|input| {
        let attrs = input.value();
        let input_type = attrs.attr("type").unwrap_or_default().to_lowercase();
        let name = attrs.attr("name").unwrap_or_default().to_lowercase();
        input_type == "password" || CREDENTIAL_INPUT_NAMES.contains(&name.as_str())
    });

    PathEvidence {
        status,
        page_title,
        indicators,
        has_login_form,
    }
}

/// Whether a probe response means the target is throttling us.
///
/// 429 is rate limiting. A non-2xx page carrying a block marker is a WAF
/// block. Everything else, including a bare 401/403, is a normal answer.
pub fn throttle_signal(status: u16, body: &str) -> Option<FailureKind> {
    if status == HTTP_STATUS_TOO_MANY_REQUESTS {
        return Some(FailureKind::RateLimited);
    }
    if !(200..300).contains(&status) && find_block_marker(body, BLOCK_PAGE_MARKERS).is_some() {
        return Some(FailureKind::Blocked);
    }
    None
}
