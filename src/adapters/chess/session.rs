//! Session lifecycle
//!
//! ChessERP issues a `sessionId` at login and expects it back as a
//! `JSESSIONID` cookie. The token has no client-side expiry: a 401 on a data
//! call is the only signal, and it buys exactly one re-login and one retry.

use super::transport::{HttpRequest, HttpResponse, Transport};
use crate::config::InstanceConfig;
use crate::domain::{ChessError, Result};
use secrecy::ExposeSecret;
use serde_json::json;
use std::sync::Arc;

const UNAUTHORIZED: u16 = 401;
const OK: u16 = 200;

/// Owns the session token of one ChessERP instance
///
/// Each [`crate::adapters::chess::ChessClient`] owns its own manager, so two
/// tenants never share a token.
pub struct SessionManager {
    instance: InstanceConfig,
    transport: Arc<dyn Transport>,
    token: Option<String>,
}

impl SessionManager {
    pub fn new(instance: InstanceConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            instance,
            transport,
            token: None,
        }
    }

    /// Instance name used in log fields
    pub fn instance_name(&self) -> &str {
        &self.instance.name
    }

    pub fn instance(&self) -> &InstanceConfig {
        &self.instance
    }

    /// Current token, if a login has succeeded
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Posts the credentials and stores the returned `sessionId`
    pub async fn login(&mut self) -> Result<String> {
        let url = self.instance.login_url();
        tracing::info!(instance = %self.instance.name, url = %url, "Logging in to ChessERP");

        let body = json!({
            "usuario": self.instance.username,
            "password": self.instance.password.expose_secret().as_str(),
        });

        let response = self
            .transport
            .send(HttpRequest::post_json(&url, body))
            .await
            .map_err(|e| ChessError::Auth(format!("Login request failed: {e}")))?;

        if response.status != OK {
            return Err(ChessError::Auth(format!(
                "Login rejected with status {}: {}",
                response.status,
                response.text()
            )));
        }

        let token = response
            .json()
            .ok()
            .and_then(|v| v.get("sessionId").and_then(|s| s.as_str()).map(str::to_string))
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ChessError::Auth("No sessionId returned from API".to_string()))?;

        tracing::info!(instance = %self.instance.name, "Login successful");
        self.token = Some(token.clone());
        Ok(token)
    }

    /// Logs in when no token is held
    pub async fn ensure_session(&mut self) -> Result<()> {
        if self.token.is_none() {
            self.login().await?;
        }
        Ok(())
    }

    /// Drops the current token and logs in again
    pub async fn handle_unauthorized(&mut self) -> Result<()> {
        tracing::warn!(instance = %self.instance.name, "Session expired, re-authenticating");
        self.token = None;
        self.login().await.map(|_| ())
    }

    /// Sends an authenticated request
    ///
    /// A 401 triggers one re-login and one resend. Any status other than 200
    /// after that, including a second 401, is returned as [`ChessError::Api`].
    pub async fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse> {
        self.ensure_session().await?;

        let mut response = self.send_with_cookie(request.clone()).await?;
        if response.status == UNAUTHORIZED {
            tracing::warn!(
                instance = %self.instance.name,
                url = %request.url,
                "Request unauthorized (401)"
            );
            self.handle_unauthorized().await?;
            response = self.send_with_cookie(request.clone()).await?;
        }

        if response.status != OK {
            return Err(ChessError::api(
                Some(response.status),
                format!("Request to {} failed", request.url),
                Some(response.text()),
            ));
        }

        Ok(response)
    }

    async fn send_with_cookie(&self, mut request: HttpRequest) -> Result<HttpResponse> {
        if let Some(token) = &self.token {
            request.set_header("Cookie", cookie_value(token));
        }
        let url = request.url.clone();
        self.transport.send(request).await.map_err(|e| {
            tracing::error!(instance = %self.instance.name, url = %url, error = %e, "Transport failure");
            ChessError::api(None, format!("Connection error calling {url}"), Some(e.reason))
        })
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("instance", &self.instance.name)
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

/// Cookie header value for a token
fn cookie_value(token: &str) -> String {
    if token.contains("JSESSIONID=") {
        token.to_string()
    } else {
        format!("JSESSIONID={token}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::chess::transport::testing::ScriptedTransport;
    use crate::adapters::chess::transport::Method;

    fn instance() -> InstanceConfig {
        InstanceConfig::new("s", "http://erp.local", "api_user", "secret")
    }

    fn manager(transport: &Arc<ScriptedTransport>) -> SessionManager {
        SessionManager::new(instance(), transport.clone())
    }

    #[test]
    fn test_cookie_value() {
        assert_eq!(cookie_value("ABC123"), "JSESSIONID=ABC123");
        assert_eq!(cookie_value("JSESSIONID=XYZ"), "JSESSIONID=XYZ");
    }

    #[tokio::test]
    async fn test_login_posts_credentials() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(200, json!({"sessionId": "ABC123"}));

        let mut session = manager(&transport);
        let token = session.login().await.unwrap();
        assert_eq!(token, "ABC123");
        assert_eq!(session.token(), Some("ABC123"));

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(
            requests[0].url,
            "http://erp.local/web/api/chess/v1/auth/login"
        );
        assert_eq!(
            requests[0].json,
            Some(json!({"usuario": "api_user", "password": "secret"}))
        );
    }

    #[tokio::test]
    async fn test_login_missing_session_id_is_auth_error() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(200, json!({"status": "ok"}));

        let err = manager(&transport).login().await.unwrap_err();
        assert!(err.is_auth());
    }

    #[tokio::test]
    async fn test_login_rejected_status_is_auth_error() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_text(403, "forbidden");

        let err = manager(&transport).login().await.unwrap_err();
        assert!(err.is_auth());
        assert!(err.to_string().contains("403"));
    }

    #[tokio::test]
    async fn test_login_transport_failure_is_auth_error() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_failure("connection refused");

        let err = manager(&transport).login().await.unwrap_err();
        assert!(err.is_auth());
    }

    #[tokio::test]
    async fn test_execute_reuses_token() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .push_json(200, json!({"sessionId": "ABC123"}))
            .push_json(200, json!([]))
            .push_json(200, json!([]));

        let mut session = manager(&transport);
        session.execute(HttpRequest::get("http://erp.local/a")).await.unwrap();
        session.execute(HttpRequest::get("http://erp.local/b")).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1].header("Cookie"), Some("JSESSIONID=ABC123"));
        assert_eq!(requests[2].header("Cookie"), Some("JSESSIONID=ABC123"));
    }

    #[tokio::test]
    async fn test_execute_relogs_once_on_401() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .push_json(200, json!({"sessionId": "OLD"}))
            .push_text(401, "expired")
            .push_json(200, json!({"sessionId": "NEW"}))
            .push_json(200, json!({"ok": true}));

        let mut session = manager(&transport);
        let response = session
            .execute(HttpRequest::get("http://erp.local/ventas/"))
            .await
            .unwrap();
        assert_eq!(response.json().unwrap()["ok"], true);

        let requests = transport.requests();
        assert_eq!(requests.len(), 4);
        assert_eq!(requests[1].header("Cookie"), Some("JSESSIONID=OLD"));
        assert_eq!(requests[2].method, Method::Post);
        assert_eq!(requests[3].header("Cookie"), Some("JSESSIONID=NEW"));
    }

    #[tokio::test]
    async fn test_execute_second_401_is_api_error() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .push_json(200, json!({"sessionId": "A"}))
            .push_text(401, "expired")
            .push_json(200, json!({"sessionId": "B"}))
            .push_text(401, "still expired");

        let mut session = manager(&transport);
        let err = session
            .execute(HttpRequest::get("http://erp.local/ventas/"))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert_eq!(transport.requests().len(), 4);
    }

    #[tokio::test]
    async fn test_execute_non_success_is_api_error_without_retry() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .push_json(200, json!({"sessionId": "A"}))
            .push_text(500, "boom");

        let mut session = manager(&transport);
        let err = session
            .execute(HttpRequest::get("http://erp.local/ventas/"))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert!(err.to_string().contains("boom"));
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_execute_transport_failure_is_api_error() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .push_json(200, json!({"sessionId": "A"}))
            .push_failure("connection reset");

        let mut session = manager(&transport);
        let err = session
            .execute(HttpRequest::get("http://erp.local/ventas/"))
            .await
            .unwrap_err();

        assert!(matches!(err, ChessError::Api { status: None, .. }));
    }
}
