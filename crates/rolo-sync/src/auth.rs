#[cfg(feature = "remote")]
mod imp {
    use crate::error::{Result, SyncError};
    use reqwest::blocking::Client;
    use serde::{Deserialize, Serialize};
    use std::time::Duration;
    use url::Url;

    /// Password-grant client for a Supabase-style auth endpoint. The backend
    /// is an external collaborator with a fixed contract; all rolo needs back
    /// is an opaque user id and an access token.
    #[derive(Debug, Clone)]
    pub struct AuthClient {
        base_url: Url,
        anon_key: String,
        client: Client,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct AuthSession {
        pub user_id: String,
        pub email: String,
        pub access_token: String,
    }

    #[derive(Debug, Serialize)]
    struct Credentials<'a> {
        email: &'a str,
        password: &'a str,
    }

    #[derive(Debug, Deserialize)]
    struct UserBody {
        id: String,
        email: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    struct SignUpBody {
        id: Option<String>,
        user: Option<UserBody>,
    }

    #[derive(Debug, Deserialize)]
    struct TokenBody {
        access_token: String,
        user: UserBody,
    }

    #[derive(Debug, Deserialize, Default)]
    struct ErrorBody {
        error_description: Option<String>,
        msg: Option<String>,
        message: Option<String>,
    }

    impl ErrorBody {
        fn into_message(self, status: u16) -> String {
            self.error_description
                .or(self.msg)
                .or(self.message)
                .unwrap_or_else(|| format!("auth request failed with status {status}"))
        }
    }

    impl AuthClient {
        pub fn new(base_url: &str, anon_key: &str) -> Result<Self> {
            let base_url = Url::parse(base_url)?;
            if base_url.scheme() != "https" {
                return Err(SyncError::Parse("remote url must use https".to_string()));
            }
            let client = Client::builder()
                .user_agent("rolo")
                .timeout(Duration::from_secs(30))
                .connect_timeout(Duration::from_secs(10))
                .build()?;
            Ok(Self {
                base_url,
                anon_key: anon_key.to_string(),
                client,
            })
        }

        /// Registers a new account and returns the user id. Depending on the
        /// backend's confirmation policy the account may still need email
        /// verification before `sign_in` succeeds.
        pub fn sign_up(&self, email: &str, password: &str) -> Result<String> {
            let url = self.base_url.join("auth/v1/signup")?;
            let response = self
                .client
                .post(url)
                .header("apikey", &self.anon_key)
                .json(&Credentials { email, password })
                .send()?;

            let status = response.status();
            if !status.is_success() {
                let body: ErrorBody = response.json().unwrap_or_default();
                return Err(SyncError::Auth(body.into_message(status.as_u16())));
            }

            let body: SignUpBody = response.json()?;
            body.id
                .or(body.user.map(|user| user.id))
                .ok_or_else(|| SyncError::Parse("signup response missing user id".to_string()))
        }

        pub fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
            let url = self.base_url.join("auth/v1/token?grant_type=password")?;
            let response = self
                .client
                .post(url)
                .header("apikey", &self.anon_key)
                .json(&Credentials { email, password })
                .send()?;

            let status = response.status();
            if !status.is_success() {
                let body: ErrorBody = response.json().unwrap_or_default();
                return Err(SyncError::Auth(body.into_message(status.as_u16())));
            }

            let body: TokenBody = response.json()?;
            Ok(AuthSession {
                user_id: body.user.id,
                email: body.user.email.unwrap_or_else(|| email.to_string()),
                access_token: body.access_token,
            })
        }
    }
}

#[cfg(feature = "remote")]
pub use imp::{AuthClient, AuthSession};
