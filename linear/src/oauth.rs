use std::time::Duration;

use oauth2::{
    basic::{
        BasicErrorResponse, BasicRevocationErrorResponse, BasicTokenIntrospectionResponse,
        BasicTokenType,
    },
    reqwest::async_http_client,
    AccessToken, AuthType, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken,
    RedirectUrl, RefreshToken, Scope, StandardRevocableToken, TokenResponse, TokenUrl,
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{domain::Viewer, Credentials, LinearClient, LinearError};

pub const DEFAULT_AUTH_URL: &str = "https://linear.app/oauth/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://api.linear.app/oauth/token";

type LinearOAuthClient = oauth2::Client<
    BasicErrorResponse,
    LinearTokenResponse,
    BasicTokenType,
    BasicTokenIntrospectionResponse,
    StandardRevocableToken,
    BasicRevocationErrorResponse,
>;

#[derive(Debug, Clone)]
pub struct OAuthSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
    pub auth_url: String,
    pub token_url: String,
}

/// Authorization-code flow against Linear's OAuth app endpoints.
#[derive(Debug, Clone)]
pub struct LinearOAuth {
    client: LinearOAuthClient,
}

/// Result of a successful code exchange. The token has already been checked
/// against the viewer endpoint.
#[derive(Debug, Clone)]
pub struct TokenGrant {
    pub access_token: String,
    pub expires_in: Option<Duration>,
    pub viewer: Viewer,
}

impl LinearOAuth {
    pub fn new(settings: OAuthSettings) -> Result<Self, LinearError> {
        let auth_url = AuthUrl::new(settings.auth_url)
            .map_err(|e| LinearError::OAuth(format!("Invalid authorization URL: {}", e)))?;
        let token_url = TokenUrl::new(settings.token_url)
            .map_err(|e| LinearError::OAuth(format!("Invalid token URL: {}", e)))?;
        let redirect_url = RedirectUrl::new(settings.redirect_url)
            .map_err(|e| LinearError::OAuth(format!("Invalid redirect URL: {}", e)))?;

        let client = LinearOAuthClient::new(
            ClientId::new(settings.client_id),
            Some(ClientSecret::new(settings.client_secret)),
            auth_url,
            Some(token_url),
        )
        .set_auth_type(AuthType::RequestBody)
        .set_redirect_uri(redirect_url);

        Ok(Self { client })
    }

    /// The provider URL the browser is sent to. `state` is passed through
    /// verbatim and comes back on the callback.
    pub fn authorize_url(&self, state: &str) -> String {
        let state = state.to_string();
        let (url, _) = self
            .client
            .authorize_url(move || CsrfToken::new(state))
            .add_scope(Scope::new("read".to_string()))
            .url();
        url.to_string()
    }

    /// Exchanges an authorization code and verifies the resulting token by
    /// fetching the viewer with it.
    pub async fn exchange_code(
        &self,
        code: &str,
        api_url: &str,
    ) -> Result<TokenGrant, LinearError> {
        let token = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(async_http_client)
            .await
            .map_err(|e| LinearError::OAuth(e.to_string()))?;

        let access_token = token.access_token().secret().to_string();
        let viewer = LinearClient::new(Credentials::OAuth(access_token.clone()))
            .with_api_url(api_url)
            .viewer()
            .await?;

        tracing::info!("linear token verified for viewer {}", viewer.id);

        Ok(TokenGrant {
            access_token,
            expires_in: token.expires_in(),
            viewer,
        })
    }
}

/// Linear's token payload. `scope` arrives as a JSON array rather than the
/// space-delimited string of RFC 6749, so the stock response type can't be used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearTokenResponse {
    access_token: AccessToken,
    token_type: BasicTokenType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_in: Option<u64>,
    #[serde(
        rename = "scope",
        default,
        deserialize_with = "deserialize_scopes",
        skip_serializing_if = "Option::is_none"
    )]
    scopes: Option<Vec<Scope>>,
}

impl TokenResponse<BasicTokenType> for LinearTokenResponse {
    fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    fn token_type(&self) -> &BasicTokenType {
        &self.token_type
    }

    fn expires_in(&self) -> Option<Duration> {
        self.expires_in.map(Duration::from_secs)
    }

    fn refresh_token(&self) -> Option<&RefreshToken> {
        None
    }

    fn scopes(&self) -> Option<&Vec<Scope>> {
        self.scopes.as_ref()
    }
}

fn deserialize_scopes<'de, D>(deserializer: D) -> Result<Option<Vec<Scope>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawScopes {
        List(Vec<String>),
        Delimited(String),
    }

    let raw = Option::<RawScopes>::deserialize(deserializer)?;
    Ok(raw.map(|raw| {
        let scopes: Vec<String> = match raw {
            RawScopes::List(list) => list,
            RawScopes::Delimited(s) => s.split_whitespace().map(str::to_string).collect(),
        };
        scopes.into_iter().map(Scope::new).collect()
    }))
}
