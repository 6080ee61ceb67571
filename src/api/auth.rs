//! Authentication artifacts: bearer token and anti-forgery token.

use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::sync::OnceLock;

use crate::types::{Credentials, Error, Result};

/// OAuth token lifetime requested from the password grant, in seconds.
pub const TOKEN_DURATION: &str = "60000";

/// Name of the anti-forgery header and hidden form field.
pub const VERIFICATION_TOKEN_NAME: &str = "__RequestVerificationToken";

static TOKEN_PATTERN: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();

/// Bearer token from `/oauth2/token`.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

/// Anti-forgery token scraped from the login page.
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationToken(String);

macro_rules! secret_token {
    ($name:ident) => {
        impl $name {
            pub fn new(token: impl Into<String>) -> Self {
                Self(token.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "(<redacted>)"))
            }
        }
    };
}

secret_token!(BearerToken);
secret_token!(VerificationToken);

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
}

/// Form body for the password grant.
pub(crate) fn password_grant_form(credentials: &Credentials) -> [(&'static str, &str); 4] {
    [
        ("grant_type", "password"),
        ("username", credentials.username.as_str()),
        ("password", credentials.password.as_str()),
        ("duration", TOKEN_DURATION),
    ]
}

/// Form body posted to `Login.aspx`.
pub(crate) fn login_form(credentials: &Credentials) -> [(&'static str, &str); 7] {
    [
        ("ImpersonationEnabled", "False"),
        ("IsSingleSignOnEnabled", "False"),
        ("Login", "Login"),
        ("Password", credentials.password.as_str()),
        ("ResetPasswordEnabled", "True"),
        ("ReturnUrl", ""),
        ("UserName", credentials.username.as_str()),
    ]
}

/// Find the first `name="__RequestVerificationToken" ... value="..."` pair.
///
/// Name must come before value, on the same line.
pub fn extract_verification_token(html: &str) -> Result<VerificationToken> {
    let pattern = TOKEN_PATTERN
        .get_or_init(|| Regex::new(r#"name="__RequestVerificationToken".*?value="([^"]+)""#))
        .as_ref()
        .map_err(|e| Error::config(format!("token pattern: {e}")))?;

    pattern
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| VerificationToken::new(m.as_str()))
        .ok_or(Error::TokenNotFound)
}
