//! Validation of citation source URLs.
//!
//! Source URLs are maintained by hand, so each one is checked before the
//! updater is allowed to fetch it:
//! - the URL must parse
//! - only `http` and `https` are accepted
//! - the host must be on the configured allowlist (subdomains included)

use url::Url;

/// Hosts accepted when the configuration does not name any.
pub const DEFAULT_ALLOWED_HOSTS: &[&str] = &["scholar.google.com"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlValidationError {
    /// URL is malformed or cannot be parsed
    InvalidUrl(String),
    /// Scheme other than http/https
    UnsupportedScheme(String),
    /// URL has no host part
    MissingHost,
    /// Host is not in the allowlist
    HostNotAllowed(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrlValidationError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            UrlValidationError::UnsupportedScheme(scheme) => {
                write!(f, "Unsupported URL scheme: {}", scheme)
            }
            UrlValidationError::MissingHost => write!(f, "URL has no host"),
            UrlValidationError::HostNotAllowed(host) => {
                write!(f, "Host not in allowlist: {}", host)
            }
        }
    }
}

impl std::error::Error for UrlValidationError {}

/// Check whether `host` equals an allowlisted host or is a subdomain of one.
pub fn is_host_allowed<S: AsRef<str>>(host: &str, allowed: &[S]) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    allowed.iter().any(|entry| {
        let entry = entry.as_ref().to_ascii_lowercase();
        host == entry || host.ends_with(&format!(".{}", entry))
    })
}

/// Validate a citation source URL against an allowlist of hosts.
pub fn validate_source_url<S: AsRef<str>>(
    raw: &str,
    allowed: &[S],
) -> Result<Url, UrlValidationError> {
    let url = Url::parse(raw.trim()).map_err(|e| UrlValidationError::InvalidUrl(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(UrlValidationError::UnsupportedScheme(other.to_string())),
    }

    let host = url.host_str().ok_or(UrlValidationError::MissingHost)?;
    if !is_host_allowed(host, allowed) {
        return Err(UrlValidationError::HostNotAllowed(host.to_string()));
    }

    Ok(url)
}
