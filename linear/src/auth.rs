use std::fmt;

/// Personal API keys issued by Linear carry this prefix; anything else is
/// treated as an OAuth access token.
pub const API_KEY_PREFIX: &str = "lin_api_";

#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    ApiKey(String),
    OAuth(String),
}

impl Credentials {
    pub fn from_token(token: impl Into<String>) -> Self {
        let token = token.into();
        if token.starts_with(API_KEY_PREFIX) {
            Self::ApiKey(token)
        } else {
            Self::OAuth(token)
        }
    }

    pub fn is_oauth(&self) -> bool {
        matches!(self, Self::OAuth(_))
    }

    /// Value for the `Authorization` header. API keys are sent as-is,
    /// OAuth tokens as bearer tokens.
    pub fn as_authorization_header(&self) -> String {
        match self {
            Self::ApiKey(key) => key.clone(),
            Self::OAuth(token) => format!("Bearer {}", token),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("Credentials::ApiKey(***)"),
            Self::OAuth(_) => f.write_str("Credentials::OAuth(***)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_prefix_selects_api_key_mode() {
        let credentials = Credentials::from_token("lin_api_abc123");
        assert_eq!(credentials, Credentials::ApiKey("lin_api_abc123".to_string()));
        assert!(!credentials.is_oauth());
        assert_eq!(credentials.as_authorization_header(), "lin_api_abc123");
    }

    #[test]
    fn other_tokens_are_bearer_tokens() {
        let credentials = Credentials::from_token("oauth-token");
        assert!(credentials.is_oauth());
        assert_eq!(credentials.as_authorization_header(), "Bearer oauth-token");
    }

    #[test]
    fn debug_output_hides_secret() {
        let credentials = Credentials::from_token("lin_api_secret");
        assert!(!format!("{:?}", credentials).contains("secret"));
    }
}
