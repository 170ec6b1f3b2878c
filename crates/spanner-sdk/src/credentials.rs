// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Credentials for authenticating calls to the service.
//!
//! Service-account keys are exchanged for OAuth access tokens using a
//! signed JWT assertion. Authorized-user files written by
//! `gcloud auth application-default login` are exchanged using their
//! refresh token. Either token is cached until shortly before it expires.

use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, instrument};

use crate::error::{Result, SdkError};

/// Default OAuth token endpoint.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// File name of the gcloud application default credentials.
pub const WELL_KNOWN_CREDENTIALS_FILE: &str = "application_default_credentials.json";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const REFRESH_TOKEN_GRANT: &str = "refresh_token";
const AUTHORIZED_USER_TYPE: &str = "authorized_user";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const MAX_TOKEN_LIFETIME_SECS: u64 = 3600;
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Where credentials come from.
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialsSource {
    /// No credentials (emulator or plaintext channel).
    Insecure,
    /// Application default credentials: `GOOGLE_APPLICATION_CREDENTIALS`,
    /// then the gcloud well-known file.
    Default,
    /// A pre-issued OAuth access token.
    AccessToken(String),
    /// Path to a service-account or authorized-user JSON file.
    Keyfile(PathBuf),
    /// Service-account or authorized-user JSON contents.
    KeyJson(String),
}

impl fmt::Debug for CredentialsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialsSource::Insecure => f.write_str("Insecure"),
            CredentialsSource::Default => f.write_str("Default"),
            CredentialsSource::AccessToken(_) => f.write_str("AccessToken(<redacted>)"),
            CredentialsSource::Keyfile(path) => f.debug_tuple("Keyfile").field(path).finish(),
            CredentialsSource::KeyJson(_) => f.write_str("KeyJson(<redacted>)"),
        }
    }
}

/// Service-account key file contents.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default)]
    pub token_uri: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .field("project_id", &self.project_id)
            .finish()
    }
}

impl ServiceAccountKey {
    /// Parse a key from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| SdkError::Credentials(format!("invalid service account key: {}", e)))
    }

    pub fn token_uri(&self) -> &str {
        self.token_uri.as_deref().unwrap_or(DEFAULT_TOKEN_URI)
    }
}

/// Authorized-user credentials, as written by `gcloud auth application-default login`.
#[derive(Clone, Deserialize)]
pub struct AuthorizedUserKey {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    #[serde(default)]
    pub token_uri: Option<String>,
    #[serde(default)]
    pub quota_project_id: Option<String>,
}

impl fmt::Debug for AuthorizedUserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizedUserKey")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("token_uri", &self.token_uri)
            .field("quota_project_id", &self.quota_project_id)
            .finish()
    }
}

impl AuthorizedUserKey {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| SdkError::Credentials(format!("invalid authorized user credentials: {}", e)))
    }

    pub fn token_uri(&self) -> &str {
        self.token_uri.as_deref().unwrap_or(DEFAULT_TOKEN_URI)
    }
}

#[derive(Deserialize)]
struct KeyKind {
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: Instant,
}

#[derive(Default)]
struct TokenCache {
    cached: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    /// Return the cached token, or the result of `fetch` once it is within
    /// the refresh margin of its expiry.
    async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<CachedToken>>,
    {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() + REFRESH_MARGIN < token.expires_at {
                return Ok(token.token.clone());
            }
        }

        let fresh = fetch().await?;
        let token = fresh.token.clone();
        *cached = Some(fresh);
        Ok(token)
    }
}

/// POST `form` to the token endpoint and parse the issued token.
async fn request_token(
    http: &reqwest::Client,
    token_uri: &str,
    form: &[(&str, &str)],
) -> Result<CachedToken> {
    debug!(token_uri, "requesting access token");

    let response = http.post(token_uri).form(form).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SdkError::Credentials(format!(
            "token endpoint returned {}: {}",
            status, body
        )));
    }

    let body: TokenResponse = response.json().await?;
    let lifetime = Duration::from_secs(
        body.expires_in
            .unwrap_or(MAX_TOKEN_LIFETIME_SECS)
            .min(MAX_TOKEN_LIFETIME_SECS),
    );

    debug!(expires_in = lifetime.as_secs(), "received access token");

    Ok(CachedToken {
        token: body.access_token,
        expires_at: Instant::now() + lifetime,
    })
}

/// Exchanges a service-account key for access tokens.
pub struct ServiceAccount {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    scopes: Vec<String>,
    http: reqwest::Client,
    cache: TokenCache,
}

impl ServiceAccount {
    pub fn new(key: ServiceAccountKey, scopes: Vec<String>) -> Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| SdkError::Credentials(format!("invalid private key: {}", e)))?;
        Ok(Self {
            key,
            encoding_key,
            scopes,
            http: reqwest::Client::new(),
            cache: TokenCache::default(),
        })
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    /// Build the signed JWT assertion sent to the token endpoint.
    pub fn assertion(&self) -> Result<String> {
        let iat = chrono::Utc::now().timestamp();
        let claims = Claims {
            iss: &self.key.client_email,
            scope: self.scopes.join(" "),
            aud: self.key.token_uri(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        Ok(jsonwebtoken::encode(&header, &claims, &self.encoding_key)?)
    }

    /// Return a valid access token, fetching a new one when needed.
    pub async fn access_token(&self) -> Result<String> {
        self.cache.get_or_fetch(|| self.fetch_token()).await
    }

    #[instrument(skip(self), fields(client_email = %self.key.client_email))]
    async fn fetch_token(&self) -> Result<CachedToken> {
        let assertion = self.assertion()?;
        request_token(
            &self.http,
            self.key.token_uri(),
            &[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())],
        )
        .await
    }
}

/// Exchanges an authorized-user refresh token for access tokens.
pub struct AuthorizedUser {
    key: AuthorizedUserKey,
    http: reqwest::Client,
    cache: TokenCache,
}

impl AuthorizedUser {
    pub fn new(key: AuthorizedUserKey) -> Self {
        Self {
            key,
            http: reqwest::Client::new(),
            cache: TokenCache::default(),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.key.client_id
    }

    /// Return a valid access token, refreshing it when needed.
    pub async fn access_token(&self) -> Result<String> {
        self.cache.get_or_fetch(|| self.fetch_token()).await
    }

    #[instrument(skip(self), fields(client_id = %self.key.client_id))]
    async fn fetch_token(&self) -> Result<CachedToken> {
        request_token(
            &self.http,
            self.key.token_uri(),
            &[
                ("grant_type", REFRESH_TOKEN_GRANT),
                ("client_id", self.key.client_id.as_str()),
                ("client_secret", self.key.client_secret.as_str()),
                ("refresh_token", self.key.refresh_token.as_str()),
            ],
        )
        .await
    }
}

/// Location of the gcloud application default credentials file.
///
/// `CLOUDSDK_CONFIG` overrides the gcloud configuration directory.
pub fn well_known_credentials_file<F>(lookup: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    let dir = match var("CLOUDSDK_CONFIG") {
        Some(dir) => PathBuf::from(dir),
        None if cfg!(windows) => PathBuf::from(var("APPDATA")?).join("gcloud"),
        None => PathBuf::from(var("HOME")?).join(".config").join("gcloud"),
    };
    Some(dir.join(WELL_KNOWN_CREDENTIALS_FILE))
}

/// Resolved credentials shared by every call.
#[derive(Clone)]
pub enum Credentials {
    Insecure,
    Static(String),
    ServiceAccount(Arc<ServiceAccount>),
    AuthorizedUser(Arc<AuthorizedUser>),
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Insecure => f.write_str("Insecure"),
            Credentials::Static(_) => f.write_str("Static(<redacted>)"),
            Credentials::ServiceAccount(account) => f
                .debug_tuple("ServiceAccount")
                .field(&account.client_email())
                .finish(),
            Credentials::AuthorizedUser(user) => f
                .debug_tuple("AuthorizedUser")
                .field(&user.client_id())
                .finish(),
        }
    }
}

impl Credentials {
    /// Resolve a credentials source, reading and parsing keys as needed.
    pub async fn resolve(source: &CredentialsSource, scopes: &[String]) -> Result<Self> {
        match source {
            CredentialsSource::Insecure => Ok(Credentials::Insecure),
            CredentialsSource::Default => {
                Self::resolve_default(scopes, |key| std::env::var(key).ok()).await
            }
            CredentialsSource::AccessToken(token) => Ok(Credentials::Static(token.clone())),
            CredentialsSource::Keyfile(path) => Self::from_keyfile(path, scopes).await,
            CredentialsSource::KeyJson(json) => Self::from_key_json(json, scopes),
        }
    }

    /// Resolve application default credentials with a custom variable lookup.
    pub async fn resolve_default<F>(scopes: &[String], lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("GOOGLE_APPLICATION_CREDENTIALS").filter(|v| !v.trim().is_empty())
        {
            return Self::from_keyfile(Path::new(&path), scopes).await;
        }

        let path = well_known_credentials_file(&lookup).ok_or_else(|| {
            SdkError::Credentials("no default credentials: HOME is not set".to_string())
        })?;
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(SdkError::Credentials(format!(
                "no default credentials: set GOOGLE_APPLICATION_CREDENTIALS or run \
                 `gcloud auth application-default login` (looked for {})",
                path.display()
            )));
        }

        info!(path = %path.display(), "using gcloud application default credentials");
        Self::from_keyfile(&path, scopes).await
    }

    async fn from_keyfile(path: &Path, scopes: &[String]) -> Result<Self> {
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            SdkError::Credentials(format!("cannot read keyfile {}: {}", path.display(), e))
        })?;
        Self::from_key_json(&json, scopes)
    }

    fn from_key_json(json: &str, scopes: &[String]) -> Result<Self> {
        let kind: KeyKind = serde_json::from_str(json)
            .map_err(|e| SdkError::Credentials(format!("invalid credentials file: {}", e)))?;
        if kind.kind.as_deref() == Some(AUTHORIZED_USER_TYPE) {
            let key = AuthorizedUserKey::from_json(json)?;
            return Ok(Credentials::AuthorizedUser(Arc::new(AuthorizedUser::new(key))));
        }

        let key = ServiceAccountKey::from_json(json)?;
        let account = ServiceAccount::new(key, scopes.to_vec())?;
        Ok(Credentials::ServiceAccount(Arc::new(account)))
    }

    /// Value of the `authorization` header, if any.
    pub async fn authorization_header(&self) -> Result<Option<String>> {
        let token = match self {
            Credentials::Insecure => return Ok(None),
            Credentials::Static(token) => token.clone(),
            Credentials::ServiceAccount(account) => account.access_token().await?,
            Credentials::AuthorizedUser(user) => user.access_token().await?,
        };
        Ok(Some(format!("Bearer {}", token)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_debug_redacts_secrets() {
        let source = CredentialsSource::AccessToken("ya29.secret".into());
        assert!(!format!("{:?}", source).contains("secret"));
        let creds = Credentials::Static("ya29.secret".into());
        assert!(!format!("{:?}", creds).contains("secret"));
    }

    #[test]
    fn test_key_debug_redacts_secrets() {
        let key = ServiceAccountKey::from_json(
            r#"{"client_email":"sa@p.iam.gserviceaccount.com","private_key":"PEM-SECRET"}"#,
        )
        .unwrap();
        let text = format!("{:?}", key);
        assert!(text.contains("sa@p.iam.gserviceaccount.com"));
        assert!(!text.contains("PEM-SECRET"));

        let user = AuthorizedUserKey::from_json(
            r#"{"client_id":"cid","client_secret":"shh","refresh_token":"1//refresh"}"#,
        )
        .unwrap();
        let text = format!("{:?}", user);
        assert!(text.contains("cid"));
        assert!(!text.contains("shh"));
        assert!(!text.contains("1//refresh"));
    }

    #[test]
    fn test_key_defaults() {
        let key = ServiceAccountKey::from_json(
            r#"{"client_email":"sa@p.iam.gserviceaccount.com","private_key":"x"}"#,
        )
        .unwrap();
        assert_eq!(key.token_uri(), DEFAULT_TOKEN_URI);
        assert!(key.private_key_id.is_none());
    }

    #[test]
    fn test_key_missing_fields() {
        let err = ServiceAccountKey::from_json(r#"{"client_email":"x"}"#).unwrap_err();
        assert!(matches!(err, SdkError::Credentials(_)));
    }

    #[test]
    fn test_authorized_user_file_is_detected() {
        let json = r#"{"type":"authorized_user","client_id":"cid","client_secret":"s","refresh_token":"r"}"#;
        let creds = Credentials::from_key_json(json, &[]).unwrap();
        assert!(matches!(creds, Credentials::AuthorizedUser(_)));

        let err = Credentials::from_key_json(r#"{"type":"authorized_user"}"#, &[]).unwrap_err();
        assert!(matches!(err, SdkError::Credentials(m) if m.contains("authorized user")));
    }

    #[test]
    fn test_well_known_file_location() {
        let lookup = |key: &str| match key {
            "HOME" => Some("/home/dev".to_string()),
            "APPDATA" => Some("C:\\Users\\dev\\AppData\\Roaming".to_string()),
            _ => None,
        };
        let path = well_known_credentials_file(lookup).unwrap();
        assert!(path.ends_with(Path::new("gcloud").join(WELL_KNOWN_CREDENTIALS_FILE)));

        let path = well_known_credentials_file(|key: &str| {
            (key == "CLOUDSDK_CONFIG").then(|| "/etc/gcloud".to_string())
        })
        .unwrap();
        assert_eq!(path, Path::new("/etc/gcloud").join(WELL_KNOWN_CREDENTIALS_FILE));

        assert!(well_known_credentials_file(|_: &str| None).is_none());
    }

    #[tokio::test]
    async fn test_static_header() {
        let creds = Credentials::resolve(&CredentialsSource::AccessToken("abc".into()), &[])
            .await
            .unwrap();
        assert_eq!(
            creds.authorization_header().await.unwrap().as_deref(),
            Some("Bearer abc")
        );

        let creds = Credentials::resolve(&CredentialsSource::Insecure, &[]).await.unwrap();
        assert!(creds.authorization_header().await.unwrap().is_none());
    }
}
