pub const DEFAULT_API_URL: &str = "https://api.linear.app/graphql";

#[derive(Debug, Clone)]
pub struct LinearURL(String);

impl AsRef<str> for LinearURL {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Default for LinearURL {
    fn default() -> Self {
        Self(DEFAULT_API_URL.to_string())
    }
}

impl LinearURL {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into().trim_end_matches('/').to_string())
    }
}
