//! Search engine profiles: endpoint, request parameters, extraction
//! strategies, block signatures, and redirect/host rules.

use url::Url;

use super::extract::{ContainerStrategy, ExtractionStrategy, HeadingAnchorStrategy};
use crate::config::MAX_RESULTS_PER_REQUEST;

/// Supported HTML search engines, in default fallback priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    Google,
    Bing,
    DuckDuckGo,
}

impl Engine {
    pub const ALL: [Engine; 3] = [Engine::Google, Engine::Bing, Engine::DuckDuckGo];

    pub fn name(&self) -> &'static str {
        match self {
            Engine::Google => "google",
            Engine::Bing => "bing",
            Engine::DuckDuckGo => "duckduckgo",
        }
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Engine::Google => "https://www.google.com/search",
            Engine::Bing => "https://www.bing.com/search",
            Engine::DuckDuckGo => "https://html.duckduckgo.com/html/",
        }
    }

    /// Query-string parameters for one results page.
    pub fn params(&self, query: &str, max_results: usize) -> Vec<(&'static str, String)> {
        let count = max_results.clamp(1, MAX_RESULTS_PER_REQUEST).to_string();
        match self {
            Engine::Google => vec![
                ("q", query.to_string()),
                ("num", count),
                ("hl", "en".to_string()),
                ("safe", "off".to_string()),
            ],
            Engine::Bing => vec![
                ("q", query.to_string()),
                ("count", count),
                ("FORM", "PERE".to_string()),
            ],
            Engine::DuckDuckGo => vec![("q", query.to_string())],
        }
    }

    /// Case-insensitive body markers meaning the engine refused the request.
    pub fn block_markers(&self) -> &'static [&'static str] {
        match self {
            Engine::Google => &[
                "captcha",
                "unusual traffic",
                "automated queries",
                "blocked",
                "verify you are human",
                "sorry, but your computer or network",
                "distil_r_blocked",
                "access denied",
            ],
            Engine::Bing => &[
                "captcha",
                "unusual traffic",
                "verify you are human",
                "access denied",
            ],
            Engine::DuckDuckGo => &[
                "anomaly-modal",
                "captcha",
                "unusual traffic",
                "verify you are human",
            ],
        }
    }

    /// Query parameters that carry the real destination in engine redirects
    /// (`/url?q=` on Google, `/l/?uddg=` on DuckDuckGo).
    pub fn redirect_params(&self) -> &'static [&'static str] {
        match self {
            Engine::Google => &["q", "url"],
            Engine::Bing => &[],
            Engine::DuckDuckGo => &["uddg"],
        }
    }

    /// Results on these hosts (or their subdomains) are the engine's own
    /// pages and are discarded.
    pub fn excluded_hosts(&self) -> &'static [&'static str] {
        match self {
            Engine::Google => &["google.com", "googleusercontent.com"],
            Engine::Bing => &["bing.com", "microsoft.com"],
            Engine::DuckDuckGo => &["duckduckgo.com"],
        }
    }

    /// Extraction strategies, most specific first.
    pub fn strategies(&self) -> Vec<Box<dyn ExtractionStrategy>> {
        match self {
            Engine::Google => vec![
                Box::new(ContainerStrategy::new(
                    "google-g",
                    "div.g",
                    &["h3", "h2", "h1"],
                    "a[href]",
                    &["div.VwiC3b", "span.aCOpRe", "span.st", "span.hgKElc", "div.IsZvec"],
                )),
                Box::new(ContainerStrategy::new(
                    "google-tF2Cxc",
                    "div.tF2Cxc",
                    &["h3"],
                    "a[href]",
                    &["div.VwiC3b", "span.aCOpRe", "div.IsZvec"],
                )),
                Box::new(ContainerStrategy::new(
                    "google-rc",
                    "div.rc",
                    &["h3"],
                    "a[href]",
                    &["span.st", "div.s"],
                )),
                Box::new(HeadingAnchorStrategy::new()),
            ],
            Engine::Bing => vec![
                Box::new(ContainerStrategy::new(
                    "bing-algo",
                    "li.b_algo",
                    &["h2"],
                    "h2 a[href]",
                    &["p", "div.b_caption"],
                )),
                Box::new(HeadingAnchorStrategy::new()),
            ],
            Engine::DuckDuckGo => vec![
                Box::new(ContainerStrategy::new(
                    "ddg-result",
                    "div.result",
                    &["a.result__a"],
                    "a.result__a[href]",
                    &["a.result__snippet", ".result__snippet"],
                )),
                Box::new(HeadingAnchorStrategy::new()),
            ],
        }
    }
}

/// Resolves a raw result `href` to an absolute destination URL.
///
/// Relative links are joined against `base`. Links pointing back at the engine
/// (same host as `base`, or one of `excluded_hosts`) are unwrapped through
/// `redirect_params`, or dropped if they carry none. Returns `None` for
/// non-http(s) URLs, unresolvable links, and destinations on `excluded_hosts`.
pub fn resolve_result_url(
    href: &str,
    base: &Url,
    redirect_params: &[&str],
    excluded_hosts: &[&str],
) -> Option<Url> {
    let joined = base.join(href).ok()?;

    let engine_owned = is_same_host(&joined, base) || host_is_excluded(&joined, excluded_hosts);
    let destination = if engine_owned {
        let target = joined
            .query_pairs()
            .find(|(key, _)| redirect_params.contains(&key.as_ref()))
            .map(|(_, value)| value.into_owned())?;
        Url::parse(&target).ok()?
    } else {
        joined
    };

    if !matches!(destination.scheme(), "http" | "https") || destination.host_str().is_none() {
        return None;
    }
    if host_is_excluded(&destination, excluded_hosts) {
        return None;
    }
    Some(destination)
}

fn is_same_host(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str() && a.port_or_known_default() == b.port_or_known_default()
}

fn host_is_excluded(url: &Url, excluded_hosts: &[&str]) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();
    excluded_hosts
        .iter()
        .any(|ex| host == *ex || host.ends_with(&format!(".{}", ex)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn google_base() -> Url {
        Url::parse(Engine::Google.default_endpoint()).unwrap()
    }

    #[test]
    fn test_google_redirect_unwrapped() {
        let url = resolve_result_url(
            "/url?q=https://portal.example.com/login%3Fnext%3D1&sa=U&ved=x",
            &google_base(),
            Engine::Google.redirect_params(),
            Engine::Google.excluded_hosts(),
        )
        .unwrap();
        assert_eq!(url.as_str(), "https://portal.example.com/login?next=1");
    }

    #[test]
    fn test_ddg_protocol_relative_redirect_unwrapped() {
        let base = Url::parse(Engine::DuckDuckGo.default_endpoint()).unwrap();
        let url = resolve_result_url(
            "//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fadmin&rut=abc",
            &base,
            Engine::DuckDuckGo.redirect_params(),
            Engine::DuckDuckGo.excluded_hosts(),
        )
        .unwrap();
        assert_eq!(url.as_str(), "https://example.com/admin");
    }

    #[test]
    fn test_engine_hosts_and_bad_schemes_discarded() {
        let base = google_base();
        let redirects = Engine::Google.redirect_params();
        let excluded = Engine::Google.excluded_hosts();
        assert!(resolve_result_url("/search?tbm=isch", &base, redirects, excluded).is_none());
        assert!(
            resolve_result_url("https://maps.google.com/x", &base, redirects, excluded).is_none()
        );
        assert!(resolve_result_url("javascript:void(0)", &base, redirects, excluded).is_none());
        assert!(resolve_result_url("https://example.com/", &base, redirects, excluded).is_some());
    }

    #[test]
    fn test_params_clamp_result_count() {
        let params = Engine::Google.params("site:example.com", 50);
        assert!(params.contains(&("num", "10".to_string())));
        let params = Engine::Bing.params("site:example.com", 3);
        assert!(params.contains(&("count", "3".to_string())));
    }
}
