//! Client of the identity provider's REST interface
//! (Firebase Identity Toolkit and Secure Token service).

use gloo_net::http::{Request, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use vm_boundary::{Credentials, ProfileUpdate, Session, User};

use crate::{encode, Result};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Sign in is not configured")]
    Unavailable,
    #[error("This email is already registered")]
    EmailExists,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("This account has been disabled")]
    UserDisabled,
    #[error("Too many attempts, please try again later")]
    TooManyAttempts,
    #[error("Password must be at least 6 characters")]
    WeakPassword,
    #[error("Your session has expired, please sign in again")]
    SessionExpired,
    #[error("Could not sign in: {0}")]
    Other(String),
}

impl IdentityError {
    /// Maps the error code returned by the provider.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        // Codes may carry details, e.g. "WEAK_PASSWORD : Password should be ..."
        let code = code.split([' ', ':']).next().unwrap_or_default();
        match code {
            "EMAIL_EXISTS" => Self::EmailExists,
            "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS"
            | "INVALID_EMAIL" => Self::InvalidCredentials,
            "USER_DISABLED" => Self::UserDisabled,
            "TOO_MANY_ATTEMPTS_TRY_LATER" => Self::TooManyAttempts,
            "WEAK_PASSWORD" => Self::WeakPassword,
            "TOKEN_EXPIRED" | "INVALID_ID_TOKEN" | "INVALID_REFRESH_TOKEN" | "USER_NOT_FOUND"
            | "CREDENTIAL_TOO_OLD_LOGIN_AGAIN" => Self::SessionExpired,
            other => Self::Other(other.to_lowercase().replace('_', " ")),
        }
    }
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

/// Attribute name the provider expects to remove the photo.
const PHOTO_URL_ATTRIBUTE: &str = "PHOTO_URL";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRequest<'a> {
    id_token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    photo_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    delete_attribute: Vec<&'static str>,
    return_secure_token: bool,
}

impl<'a> UpdateRequest<'a> {
    fn new(id_token: &'a str, update: &'a ProfileUpdate) -> Self {
        let mut delete_attribute = vec![];
        let photo_url = match &update.photo_url {
            Some(Some(url)) => Some(url.as_str()),
            Some(None) => {
                delete_attribute.push(PHOTO_URL_ATTRIBUTE);
                None
            }
            None => None,
        };
        Self {
            id_token,
            display_name: update.display_name.as_deref(),
            photo_url,
            delete_attribute,
            return_secure_token: true,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    grant_type: &'static str,
    refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    id_token: String,
    refresh_token: String,
    /// Seconds as a string, e.g. "3600".
    #[serde(default)]
    expires_in: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<AccountInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountInfo {
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
    #[serde(default)]
    email_verified: bool,
    #[serde(default)]
    provider_user_info: Vec<ProviderInfo>,
    /// Milliseconds since the unix epoch as a string.
    #[serde(default)]
    created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderInfo {
    provider_id: String,
}

impl From<AccountInfo> for User {
    fn from(from: AccountInfo) -> Self {
        let AccountInfo {
            local_id,
            email,
            display_name,
            photo_url,
            email_verified,
            provider_user_info,
            created_at,
        } = from;
        Self {
            uid: local_id,
            email,
            display_name: display_name.filter(|s| !s.is_empty()),
            photo_url: photo_url.filter(|s| !s.is_empty()),
            email_verified,
            providers: provider_user_info
                .into_iter()
                .map(|p| p.provider_id)
                .collect(),
            created_at: created_at.and_then(|ms| ms.parse().ok()),
        }
    }
}

/// Identity provider API
#[derive(Clone, Copy)]
pub struct IdentityApi {
    url: &'static str,
    token_url: &'static str,
    api_key: &'static str,
}

impl IdentityApi {
    #[must_use]
    pub const fn new(url: &'static str, token_url: &'static str, api_key: &'static str) -> Self {
        Self {
            url,
            token_url,
            api_key,
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn endpoint(&self, method: &str) -> Result<String> {
        if !self.is_available() {
            return Err(IdentityError::Unavailable.into());
        }
        Ok(format!(
            "{}/accounts:{method}?key={}",
            self.url,
            encode(self.api_key)
        ))
    }

    async fn post<D, T>(&self, url: &str, data: &D) -> Result<T>
    where
        D: Serialize,
        T: DeserializeOwned,
    {
        let response = Request::post(url).json(data)?.send().await?;
        into_identity_json(response).await
    }

    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session> {
        let url = self.endpoint("signInWithPassword")?;
        let tokens: TokenResponse = self
            .post(&url, &password_request(credentials))
            .await?;
        self.session(tokens.id_token, tokens.refresh_token, tokens.expires_in)
            .await
    }

    pub async fn sign_up(&self, credentials: &Credentials) -> Result<Session> {
        let url = self.endpoint("signUp")?;
        let tokens: TokenResponse = self
            .post(&url, &password_request(credentials))
            .await?;
        self.session(tokens.id_token, tokens.refresh_token, tokens.expires_in)
            .await
    }

    /// Changes display name and photo URL of the signed in user.
    pub async fn update_profile(&self, session: &Session, update: &ProfileUpdate) -> Result<Session> {
        let url = self.endpoint("update")?;
        let req = UpdateRequest::new(&session.id_token, update);
        let tokens: TokenResponse = self.post(&url, &req).await?;
        self.session(tokens.id_token, tokens.refresh_token, tokens.expires_in)
            .await
    }

    /// Exchanges the refresh token of a persisted session for a fresh one.
    pub async fn refresh(&self, refresh_token: &str) -> Result<Session> {
        if !self.is_available() {
            return Err(IdentityError::Unavailable.into());
        }
        let url = format!("{}/token?key={}", self.token_url, encode(self.api_key));
        let req = RefreshRequest {
            grant_type: "refresh_token",
            refresh_token,
        };
        let tokens: RefreshResponse = self.post(&url, &req).await?;
        self.session(tokens.id_token, tokens.refresh_token, tokens.expires_in)
            .await
    }

    pub async fn lookup(&self, id_token: &str) -> Result<User> {
        let url = self.endpoint("lookup")?;
        let res: LookupResponse = self.post(&url, &LookupRequest { id_token }).await?;
        res.users
            .into_iter()
            .next()
            .map(User::from)
            .ok_or_else(|| IdentityError::SessionExpired.into())
    }

    async fn session(
        &self,
        id_token: String,
        refresh_token: String,
        expires_in: Option<String>,
    ) -> Result<Session> {
        let user = self.lookup(&id_token).await?;
        log::debug!("Identity of {} confirmed", user.uid);
        Ok(Session {
            user,
            id_token,
            refresh_token,
            expires_in: expires_in.as_deref().and_then(token_lifetime),
        })
    }
}

fn token_lifetime(expires_in: &str) -> Option<u64> {
    expires_in.trim().parse().ok()
}

fn password_request(credentials: &Credentials) -> PasswordRequest<'_> {
    PasswordRequest {
        email: &credentials.email,
        password: &credentials.password,
        return_secure_token: true,
    }
}

async fn into_identity_json<T>(response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    if response.ok() {
        Ok(response.json().await?)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(identity_error(&body).into())
    }
}

fn identity_error(body: &str) -> IdentityError {
    serde_json::from_str::<ErrorResponse>(body).map_or_else(
        |_| IdentityError::Other("unexpected response".to_owned()),
        |res| IdentityError::from_code(&res.error.message),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_error_codes() {
        assert_eq!(IdentityError::from_code("EMAIL_EXISTS"), IdentityError::EmailExists);
        assert_eq!(
            IdentityError::from_code("INVALID_LOGIN_CREDENTIALS"),
            IdentityError::InvalidCredentials
        );
        assert_eq!(
            IdentityError::from_code("WEAK_PASSWORD : Password should be at least 6 characters"),
            IdentityError::WeakPassword
        );
        assert_eq!(
            IdentityError::from_code("OPERATION_NOT_ALLOWED"),
            IdentityError::Other("operation not allowed".into())
        );
    }

    #[test]
    fn read_error_body() {
        let body = r#"{"error":{"code":400,"message":"EMAIL_EXISTS","errors":[]}}"#;
        assert_eq!(identity_error(body), IdentityError::EmailExists);
        assert!(matches!(identity_error("bad gateway"), IdentityError::Other(_)));
    }

    #[test]
    fn read_account_info() {
        let json = r#"{"users":[{
            "localId":"abc",
            "email":"jane@example.com",
            "emailVerified":true,
            "displayName":"Jane",
            "photoUrl":"",
            "providerUserInfo":[{"providerId":"password"}],
            "createdAt":"1704067200000"
        }]}"#;
        let res: LookupResponse = serde_json::from_str(json).unwrap();
        let user = User::from(res.users.into_iter().next().unwrap());
        assert_eq!(user.uid, "abc");
        assert_eq!(user.display_name.as_deref(), Some("Jane"));
        assert_eq!(user.photo_url, None);
        assert!(user.email_verified);
        assert_eq!(user.providers, vec!["password".to_string()]);
        assert_eq!(user.created_at, Some(1_704_067_200_000));
    }

    #[test]
    fn read_token_lifetime() {
        let json = r#"{"idToken":"a","refreshToken":"b","expiresIn":"3600","localId":"u"}"#;
        let tokens: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(tokens.expires_in.as_deref().and_then(token_lifetime), Some(3600));

        let json = r#"{"id_token":"a","refresh_token":"b","expires_in":"3600","user_id":"u"}"#;
        let tokens: RefreshResponse = serde_json::from_str(json).unwrap();
        assert_eq!(tokens.expires_in.as_deref().and_then(token_lifetime), Some(3600));

        let json = r#"{"id_token":"a","refresh_token":"b"}"#;
        let tokens: RefreshResponse = serde_json::from_str(json).unwrap();
        assert_eq!(tokens.expires_in, None);
        assert_eq!(token_lifetime("soon"), None);
    }

    #[test]
    fn removing_the_photo_sends_delete_attribute() {
        let update = ProfileUpdate {
            display_name: Some("Jane".into()),
            photo_url: Some(None),
        };
        let json = serde_json::to_value(UpdateRequest::new("t", &update)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "idToken": "t",
                "displayName": "Jane",
                "deleteAttribute": ["PHOTO_URL"],
                "returnSecureToken": true
            })
        );
    }

    #[test]
    fn changing_the_photo_sends_the_url() {
        let update = ProfileUpdate {
            display_name: None,
            photo_url: Some(Some("https://example.com/me.png".into())),
        };
        let json = serde_json::to_value(UpdateRequest::new("t", &update)).unwrap();
        assert_eq!(json["photoUrl"], "https://example.com/me.png");
        assert!(json.get("deleteAttribute").is_none());
        assert!(json.get("displayName").is_none());

        let keep = ProfileUpdate::default();
        let json = serde_json::to_value(UpdateRequest::new("t", &keep)).unwrap();
        assert!(json.get("photoUrl").is_none());
        assert!(json.get("deleteAttribute").is_none());
    }

    #[test]
    fn unavailable_without_api_key() {
        let api = IdentityApi::new("https://id", "https://token", "");
        assert!(!api.is_available());
        assert!(matches!(
            api.endpoint("signUp"),
            Err(crate::Error::Identity(IdentityError::Unavailable))
        ));
        let api = IdentityApi::new("https://id", "https://token", "k");
        assert_eq!(
            api.endpoint("signUp").unwrap(),
            "https://id/accounts:signUp?key=k"
        );
    }
}
