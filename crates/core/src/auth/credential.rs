//! Credential extraction from the three request channels.

/// Scheme prefix carried by header and cookie credentials.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Name of the cookie holding the admin credential.
pub const AUTH_COOKIE: &str = "Authorization";

/// Where a credential was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// `Authorization: Bearer ...` header.
    Header,
    /// `Authorization` cookie.
    Cookie,
    /// `?token=...` query parameter.
    Query,
    /// Nothing supplied.
    Missing,
}

/// A credential pulled from a request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    value: String,
    source: CredentialSource,
}

impl Credential {
    /// Pick the credential by precedence: header, cookie, query.
    ///
    /// `header` is the raw `Authorization` header value. Only the `Bearer`
    /// scheme counts; any other scheme falls through to the cookie. `cookie`
    /// is the decoded cookie value, with or without the `Bearer ` prefix.
    /// Values are taken byte for byte, whitespace included. Empty values are
    /// skipped at every level.
    #[must_use]
    pub fn extract(header: Option<&str>, cookie: Option<&str>, query: Option<&str>) -> Self {
        if let Some(token) = header.and_then(|h| h.strip_prefix(BEARER_PREFIX)) {
            if !token.is_empty() {
                return Self::new(token, CredentialSource::Header);
            }
        }

        if let Some(raw) = cookie {
            let token = raw.strip_prefix(BEARER_PREFIX).unwrap_or(raw);
            if !token.is_empty() {
                return Self::new(token, CredentialSource::Cookie);
            }
        }

        if let Some(token) = query.filter(|q| !q.is_empty()) {
            return Self::new(token, CredentialSource::Query);
        }

        Self::missing()
    }

    /// The empty credential.
    #[must_use]
    pub fn missing() -> Self {
        Self::new("", CredentialSource::Missing)
    }

    fn new(value: &str, source: CredentialSource) -> Self {
        Self {
            value: value.to_string(),
            source,
        }
    }

    /// Raw credential text; empty when missing.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Channel the credential came from.
    #[must_use]
    pub fn source(&self) -> CredentialSource {
        self.source
    }
}

// Never print the secret itself.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("source", &self.source)
            .field("len", &self.value.len())
            .finish()
    }
}

/// Build the cookie value for a token.
#[must_use]
pub fn bearer_value(token: &str) -> String {
    format!("{BEARER_PREFIX}{token}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("Bearer h"), Some("Bearer c"), Some("q"), "h", CredentialSource::Header)]
    #[case(None, Some("Bearer c"), Some("q"), "c", CredentialSource::Cookie)]
    #[case(None, Some("c"), Some("q"), "c", CredentialSource::Cookie)]
    #[case(None, None, Some("q"), "q", CredentialSource::Query)]
    #[case(Some("Basic abc"), Some("Bearer c"), None, "c", CredentialSource::Cookie)]
    #[case(Some("Basic abc"), None, Some("q"), "q", CredentialSource::Query)]
    #[case(Some("Bearer "), None, Some("q"), "q", CredentialSource::Query)]
    #[case(Some("Bearer   tok\t"), None, None, "  tok\t", CredentialSource::Header)]
    #[case(None, Some("Bearer  tok "), None, " tok ", CredentialSource::Cookie)]
    #[case(None, None, Some(" tok"), " tok", CredentialSource::Query)]
    #[case(None, Some(""), Some(""), "", CredentialSource::Missing)]
    #[case(None, None, None, "", CredentialSource::Missing)]
    fn test_extraction_precedence(
        #[case] header: Option<&str>,
        #[case] cookie: Option<&str>,
        #[case] query: Option<&str>,
        #[case] expected: &str,
        #[case] source: CredentialSource,
    ) {
        let credential = Credential::extract(header, cookie, query);
        assert_eq!(credential.as_str(), expected);
        assert_eq!(credential.source(), source);
    }

    #[test]
    fn test_scheme_is_case_sensitive() {
        let credential = Credential::extract(Some("bearer tok"), None, None);
        assert_eq!(credential.source(), CredentialSource::Missing);
    }

    #[test]
    fn test_debug_hides_value() {
        let credential = Credential::extract(Some("Bearer s3cret"), None, None);
        assert!(!format!("{credential:?}").contains("s3cret"));
    }

    #[test]
    fn test_bearer_value() {
        assert_eq!(bearer_value("abc"), "Bearer abc");
    }
}
