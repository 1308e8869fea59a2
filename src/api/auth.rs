//! One-time JWT authentication

use tracing::{info, warn};

use crate::common::config::Credentials;
use crate::common::Result;

use super::protocol::{ApiRequest, LoginRequest, LoginResponse, Method, LOGIN_PATH};
use super::transport::Transport;

/// Request a token, propagating transport and parse failures
///
/// A well-formed response without `accessToken` yields an empty token.
pub async fn fetch_token<T: Transport + ?Sized>(
    transport: &T,
    credentials: &Credentials,
) -> Result<String> {
    let request = ApiRequest::new(Method::Post, LOGIN_PATH).json(&LoginRequest {
        username: &credentials.username,
        password: &credentials.password,
    })?;

    let response = transport.execute(&request, None).await?;
    let login: LoginResponse = response.json()?;
    Ok(login.access_token.unwrap_or_default())
}

/// Obtain a bearer token, degrading to an empty token on any failure
///
/// An empty token makes every later request fail its assertions, which
/// surfaces the login problem without aborting the run.
pub async fn authenticate<T: Transport + ?Sized>(transport: &T, credentials: &Credentials) -> String {
    match fetch_token(transport, credentials).await {
        Ok(token) if token.is_empty() => {
            warn!(
                username = %credentials.username,
                "login response carried no accessToken, continuing unauthenticated"
            );
            token
        }
        Ok(token) => {
            info!(username = %credentials.username, "authenticated");
            token
        }
        Err(e) => {
            warn!(
                username = %credentials.username,
                error = %e,
                "authentication failed, continuing unauthenticated"
            );
            String::new()
        }
    }
}
