//! OAuth strategy sub-contract.
//!
//! Connectors that opt into the built-in strategy-based flow return an
//! [`OAuthStrategy`] describing their provider's endpoints. The
//! authentication collaborator drives the actual authorization-code flow;
//! this crate only carries the configuration and builds the authorization
//! URL.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Extra query parameters merged into the authorization request.
pub type AuthorizationParams = HashMap<String, String>;

/// OAuth 2.0 strategy configuration for the built-in flow.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OAuthStrategy {
    /// OAuth authorization endpoint URL
    pub auth_url: String,

    /// OAuth token exchange endpoint URL
    pub token_url: String,

    /// Client ID registered with the provider
    pub client_id: String,

    /// Client secret registered with the provider
    pub client_secret: String,

    /// Required OAuth scopes for this connector
    pub scopes: Vec<String>,
}

impl OAuthStrategy {
    /// Build the authorization URL with state, redirect_uri, and any
    /// connector-supplied extra parameters.
    pub fn build_authorization_url(
        &self,
        state: &str,
        redirect_uri: &str,
        extra_params: &AuthorizationParams,
    ) -> String {
        let scopes = self.scopes.join(" ");
        let mut url = format!(
            "{}?client_id={}&redirect_uri={}&scope={}&state={}&response_type=code",
            self.auth_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(redirect_uri),
            urlencoding::encode(&scopes),
            urlencoding::encode(state)
        );

        // Sorted for a deterministic query string
        let mut keys: Vec<&String> = extra_params.keys().collect();
        keys.sort();
        for key in keys {
            url.push_str(&format!(
                "&{}={}",
                urlencoding::encode(key),
                urlencoding::encode(&extra_params[key])
            ));
        }
        url
    }
}
