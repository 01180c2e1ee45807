//! Auth flow tests against a mock token endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use sonata_client::{AuthFlow, AuthorizationPrompt, CatalogClientError, ClientConfig, Credentials};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token_config(mock_server: &MockServer) -> ClientConfig {
    ClientConfig::new()
        .with_token_url(format!("{}/api/token", mock_server.uri()))
        .with_authorize_url(format!("{}/authorize", mock_server.uri()))
}

fn token_body(refresh_token: Option<&str>, scope: Option<&str>) -> serde_json::Value {
    let mut body = serde_json::json!({
        "access_token": "access123",
        "token_type": "Bearer",
        "expires_in": 3600
    });
    if let Some(refresh_token) = refresh_token {
        body["refresh_token"] = refresh_token.into();
    }
    if let Some(scope) = scope {
        body["scope"] = scope.into();
    }
    body
}

// base64("client1:secret1")
const BASIC_CLIENT1: &str = "Basic Y2xpZW50MTpzZWNyZXQx";

/// Prompt that approves consent: echoes back the state the flow generated.
struct AutoApprove;

#[async_trait]
impl AuthorizationPrompt for AutoApprove {
    async fn authorize(&self, authorize_url: &str) -> sonata_client::Result<String> {
        let url = url::Url::parse(authorize_url).expect("authorize URL should parse");
        let state = url
            .query_pairs()
            .find(|(key, _)| key == "state")
            .map(|(_, value)| value.into_owned())
            .expect("authorize URL should carry a state");
        Ok(format!(
            "https://app.example.com/callback?code=authcode1&state={state}"
        ))
    }
}

/// Prompt that returns a callback with a forged state.
struct ForgedState;

#[async_trait]
impl AuthorizationPrompt for ForgedState {
    async fn authorize(&self, _authorize_url: &str) -> sonata_client::Result<String> {
        Ok("https://app.example.com/callback?code=authcode1&state=forged".to_string())
    }
}

/// Prompt simulating the resource owner denying consent.
struct DenyConsent;

#[async_trait]
impl AuthorizationPrompt for DenyConsent {
    async fn authorize(&self, authorize_url: &str) -> sonata_client::Result<String> {
        let url = url::Url::parse(authorize_url).expect("authorize URL should parse");
        let state = url
            .query_pairs()
            .find(|(key, _)| key == "state")
            .map(|(_, value)| value.into_owned())
            .expect("authorize URL should carry a state");
        Ok(format!(
            "https://app.example.com/callback?error=access_denied&state={state}"
        ))
    }
}

mod client_credentials {
    use super::*;

    #[tokio::test]
    async fn authenticate_yields_token_without_refresh_or_scopes() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/token"))
            .and(header("Authorization", BASIC_CLIENT1))
            .and(body_string_contains("grant_type=client_credentials"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body(None, None)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let flow = AuthFlow::client_credentials("client1", "secret1");
        let token = flow
            .authenticate(&reqwest::Client::new(), &token_config(&mock_server))
            .await
            .unwrap();

        assert_eq!(token.access_token, "access123");
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 3600);
        assert!(token.refresh_token.is_none());
        assert!(token.scopes.is_empty());
    }

    #[tokio::test]
    async fn rejected_credentials_yield_auth_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_client",
                "error_description": "Invalid client secret"
            })))
            .mount(&mock_server)
            .await;

        let flow = AuthFlow::client_credentials("client1", "wrong-secret");
        let result = flow
            .authenticate(&reqwest::Client::new(), &token_config(&mock_server))
            .await;

        match result.unwrap_err() {
            CatalogClientError::Auth(err) => {
                assert_eq!(err.error, "invalid_client");
                assert_eq!(err.description.as_deref(), Some("Invalid client secret"));
            }
            e => panic!("Expected Auth error, got: {e:?}"),
        }
    }

    #[tokio::test]
    async fn refresh_fails_without_touching_the_network() {
        let mock_server = MockServer::start().await;

        // The fixed refusal must never become a request.
        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body(None, None)))
            .expect(0)
            .mount(&mock_server)
            .await;

        let flow = AuthFlow::client_credentials("client1", "secret1");
        let result = flow
            .request_refreshed_token(
                &reqwest::Client::new(),
                &token_config(&mock_server),
                "some-refresh-token",
            )
            .await;

        match result.unwrap_err() {
            CatalogClientError::Auth(err) => assert_eq!(err.error, "unsupported_grant_type"),
            e => panic!("Expected Auth error, got: {e:?}"),
        }
    }

    #[tokio::test]
    async fn transport_failure_is_normalized_into_auth_error() {
        let config = ClientConfig::new().with_token_url("http://127.0.0.1:9/api/token");

        let flow = AuthFlow::client_credentials("client1", "secret1");
        let result = flow.authenticate(&reqwest::Client::new(), &config).await;

        match result.unwrap_err() {
            CatalogClientError::Auth(err) => assert_eq!(err.error, "transport_error"),
            e => panic!("Expected Auth error, got: {e:?}"),
        }
    }
}

mod authorization_code {
    use super::*;

    #[tokio::test]
    async fn consent_roundtrip_exchanges_the_code() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/token"))
            .and(header("Authorization", BASIC_CLIENT1))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("code=authcode1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body(
                Some("refresh123"),
                Some("user-read-private playlist-modify-public"),
            )))
            .expect(1)
            .mount(&mock_server)
            .await;

        let flow = AuthFlow::authorization_code(
            Credentials::new("client1", "secret1"),
            "https://app.example.com/callback",
            vec![
                "user-read-private".to_string(),
                "playlist-modify-public".to_string(),
            ],
            Arc::new(AutoApprove),
        );

        let token = flow
            .authenticate(&reqwest::Client::new(), &token_config(&mock_server))
            .await
            .unwrap();

        assert_eq!(token.refresh_token.as_deref(), Some("refresh123"));
        assert_eq!(
            token.scopes,
            vec!["user-read-private", "playlist-modify-public"]
        );
    }

    #[tokio::test]
    async fn forged_state_aborts_before_the_token_exchange() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body(None, None)))
            .expect(0)
            .mount(&mock_server)
            .await;

        let flow = AuthFlow::authorization_code(
            Credentials::new("client1", "secret1"),
            "https://app.example.com/callback",
            vec![],
            Arc::new(ForgedState),
        );

        let result = flow
            .authenticate(&reqwest::Client::new(), &token_config(&mock_server))
            .await;

        match result.unwrap_err() {
            CatalogClientError::Auth(err) => {
                assert_eq!(err.error, "wrong_state");
                assert!(err.description.unwrap().contains("forged"));
            }
            e => panic!("Expected Auth error, got: {e:?}"),
        }
    }

    #[tokio::test]
    async fn denied_consent_aborts_before_the_token_exchange() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body(None, None)))
            .expect(0)
            .mount(&mock_server)
            .await;

        let flow = AuthFlow::authorization_code(
            Credentials::new("client1", "secret1"),
            "https://app.example.com/callback",
            vec![],
            Arc::new(DenyConsent),
        );

        let result = flow
            .authenticate(&reqwest::Client::new(), &token_config(&mock_server))
            .await;

        match result.unwrap_err() {
            CatalogClientError::Auth(err) => assert_eq!(err.error, "access_denied"),
            e => panic!("Expected Auth error, got: {e:?}"),
        }
    }

    #[tokio::test]
    async fn refresh_sends_the_refresh_grant_with_basic_auth() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/token"))
            .and(header("Authorization", BASIC_CLIENT1))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=refresh123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body(None, None)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let flow = AuthFlow::authorization_code(
            Credentials::new("client1", "secret1"),
            "https://app.example.com/callback",
            vec![],
            Arc::new(AutoApprove),
        );

        let token = flow
            .request_refreshed_token(
                &reqwest::Client::new(),
                &token_config(&mock_server),
                "refresh123",
            )
            .await
            .unwrap();

        assert_eq!(token.access_token, "access123");
    }
}

mod authorization_code_with_pkce {
    use super::*;

    fn pkce_flow() -> AuthFlow {
        AuthFlow::authorization_code_with_pkce(
            Credentials::new("client1", "secret1"),
            "https://app.example.com/callback",
            vec![],
        )
    }

    #[tokio::test]
    async fn interactive_authenticate_is_an_unimplemented_extension_point() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body(None, None)))
            .expect(0)
            .mount(&mock_server)
            .await;

        let result = pkce_flow()
            .authenticate(&reqwest::Client::new(), &token_config(&mock_server))
            .await;

        match result.unwrap_err() {
            CatalogClientError::Auth(err) => assert_eq!(err.error, "unsupported_flow"),
            e => panic!("Expected Auth error, got: {e:?}"),
        }
    }

    #[tokio::test]
    async fn refresh_identifies_with_client_id_instead_of_basic_auth() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("client_id=client1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body(None, None)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let token = pkce_flow()
            .request_refreshed_token(
                &reqwest::Client::new(),
                &token_config(&mock_server),
                "refresh123",
            )
            .await
            .unwrap();
        assert_eq!(token.access_token, "access123");

        // No client secret may cross the wire for this flow.
        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let has_auth_header = requests[0]
            .headers
            .iter()
            .any(|(name, _)| name.to_string().eq_ignore_ascii_case("authorization"));
        assert!(!has_auth_header);
    }
}
