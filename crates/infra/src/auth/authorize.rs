//! Three-legged authorization URL builder

use forge_domain::{ResponseType, Scope};

/// Parameters of the `/authorize` redirect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    pub client_id: String,
    pub response_type: ResponseType,
    pub redirect_uri: String,
    pub scopes: Vec<Scope>,
    pub state: Option<String>,
}

impl AuthorizationRequest {
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        response_type: ResponseType,
        redirect_uri: impl Into<String>,
        scopes: &[Scope],
    ) -> Self {
        Self {
            client_id: client_id.into(),
            response_type,
            redirect_uri: redirect_uri.into(),
            scopes: scopes.to_vec(),
            state: None,
        }
    }

    /// Payload passed back verbatim to the callback URL
    #[must_use]
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }
}

/// URL to send the end user to for consent
///
/// `auth_base_url` is the authentication service base, e.g.
/// `https://developer.api.autodesk.com/authentication/v1`. Every value is
/// percent-encoded and scopes are joined with `%20`.
#[must_use]
pub fn authorization_url(auth_base_url: &str, request: &AuthorizationRequest) -> String {
    let scope = request
        .scopes
        .iter()
        .map(|scope| urlencoding::encode(scope.as_str()).into_owned())
        .collect::<Vec<_>>()
        .join("%20");

    let mut url = format!(
        "{}/authorize?response_type={}&client_id={}&redirect_uri={}&scope={}",
        auth_base_url.trim_end_matches('/'),
        urlencoding::encode(request.response_type.as_str()),
        urlencoding::encode(&request.client_id),
        urlencoding::encode(&request.redirect_uri),
        scope,
    );
    if let Some(state) = &request.state {
        url.push_str("&state=");
        url.push_str(&urlencoding::encode(state));
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://developer.api.autodesk.com/authentication/v1";

    #[test]
    fn builds_code_flow_url() {
        let request = AuthorizationRequest::new(
            "my-app",
            ResponseType::Code,
            "http://localhost:3000/callback",
            &[Scope::ViewablesRead, Scope::DataRead],
        );

        assert_eq!(
            authorization_url(BASE, &request),
            "https://developer.api.autodesk.com/authentication/v1/authorize\
             ?response_type=code&client_id=my-app\
             &redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fcallback\
             &scope=viewables%3Aread%20data%3Aread"
        );
    }

    #[test]
    fn appends_encoded_state() {
        let scopes = [Scope::UserRead];
        let request = AuthorizationRequest::new("app", ResponseType::Token, "https://x/cb", &scopes)
            .state("a b&c");

        let url = authorization_url(BASE, &request);
        assert!(url.contains("response_type=token"));
        assert!(url.ends_with("&state=a%20b%26c"));
    }

    #[test]
    fn omits_state_when_absent() {
        let request = AuthorizationRequest::new("app", ResponseType::Code, "https://x/cb", &[]);
        assert!(!authorization_url(BASE, &request).contains("state="));
    }
}
