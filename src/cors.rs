/// Origin allow-list used to answer CORS requests
///
/// An allowed request origin is echoed back; anything else gets the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsPolicy {
    allowed_origins: Vec<String>,
    default_origin: String,
}

impl CorsPolicy {
    pub fn new(allowed_origins: Vec<String>, default_origin: impl Into<String>) -> Self {
        Self {
            allowed_origins,
            default_origin: default_origin.into(),
        }
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|allowed| allowed == origin)
    }

    /// Pick the `Access-Control-Allow-Origin` value for a request origin
    pub fn resolve<'a>(&'a self, request_origin: Option<&'a str>) -> &'a str {
        match request_origin {
            Some(origin) if self.is_allowed(origin) => origin,
            _ => &self.default_origin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> CorsPolicy {
        CorsPolicy::new(
            vec![
                "http://localhost:5173".to_string(),
                "https://app.example.com".to_string(),
            ],
            "http://localhost:5173",
        )
    }

    #[test]
    fn test_allowed_origin_is_echoed() {
        assert_eq!(
            policy().resolve(Some("https://app.example.com")),
            "https://app.example.com"
        );
    }

    #[test]
    fn test_disallowed_origin_falls_back_to_default() {
        assert_eq!(
            policy().resolve(Some("http://malicious.com")),
            "http://localhost:5173"
        );
    }

    #[test]
    fn test_missing_origin_falls_back_to_default() {
        assert_eq!(policy().resolve(None), "http://localhost:5173");
    }

    #[test]
    fn test_origin_match_is_exact() {
        let policy = policy();
        assert!(!policy.is_allowed("https://app.example.com/"));
        assert!(!policy.is_allowed("HTTPS://APP.EXAMPLE.COM"));
    }

    #[test]
    fn test_default_need_not_be_in_allow_list() {
        let policy = CorsPolicy::new(vec![], "https://fallback.example");
        assert_eq!(policy.resolve(Some("https://fallback.example")), "https://fallback.example");
        assert_eq!(policy.resolve(Some("https://other.example")), "https://fallback.example");
    }
}
