use std::{
    collections::BTreeMap,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::Mutex};
use tracing::{error, info};

pub const SEND_ROUTE: &str = "/api/v1.0/email/send";
pub const SENT_ROUTE: &str = "/api/v1.0/email/sent";

/// Sending a message with this `content` template parameter fails with an
/// internal server error.
pub const FAILING_CONTENT: &str = "fail";

/// The only account accepted by the testing server.
#[derive(Debug, Clone)]
pub struct EmailJsAccount {
    pub user_id: String,
    pub service_id: String,
    pub template_id: String,
    pub access_token: Option<String>,
}

/// An email accepted by the testing server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentEmail {
    pub service_id: String,
    pub template_id: String,
    pub template_params: BTreeMap<String, String>,
}

pub async fn start_server(host: IpAddr, port: u16, account: EmailJsAccount) -> anyhow::Result<()> {
    info!("Starting EmailJS testing server on {host}:{port}");
    info!("Send endpoint: http://{host}:{port}{SEND_ROUTE}");
    info!("Accepted emails can be listed at http://{host}:{port}{SENT_ROUTE}");
    info!("Account: {account:?}");
    info!("Emails with content {FAILING_CONTENT:?} are rejected with an internal server error");

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router(account))
        .await
        .context("Failed to start HTTP server")
}

/// Start the testing server on a random local port in the background.
pub async fn spawn(account: EmailJsAccount) -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
        .await
        .context("Failed to bind to a local port")?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, router(account)).await {
            error!("EmailJS testing server on {addr} failed: {err}");
        }
    });
    Ok(addr)
}

pub fn router(account: EmailJsAccount) -> Router {
    let state = Arc::new(ServerState {
        account,
        sent: Mutex::default(),
    });

    Router::new()
        .route(SEND_ROUTE, routing::post(send))
        .route(SENT_ROUTE, routing::get(list_sent).delete(clear_sent))
        .with_state(state)
}

#[derive(Debug)]
struct ServerState {
    account: EmailJsAccount,
    sent: Mutex<Vec<SentEmail>>,
}

#[derive(Deserialize)]
struct SendRequest {
    service_id: String,
    template_id: String,
    user_id: String,
    #[serde(rename = "accessToken")]
    access_token: Option<String>,
    #[serde(default)]
    template_params: BTreeMap<String, String>,
}

async fn send(state: State<Arc<ServerState>>, Json(request): Json<SendRequest>) -> Response {
    let account = &state.account;

    if request.user_id != account.user_id {
        return error(
            StatusCode::BAD_REQUEST,
            "The Public Key is invalid. To find this ID, visit https://dashboard.emailjs.com/admin/account",
        );
    }
    if account
        .access_token
        .as_ref()
        .is_some_and(|token| request.access_token.as_ref() != Some(token))
    {
        return error(StatusCode::FORBIDDEN, "The Private Key is invalid");
    }
    if request.service_id != account.service_id {
        return error(
            StatusCode::BAD_REQUEST,
            "The service ID is invalid. To find this ID, visit https://dashboard.emailjs.com/admin",
        );
    }
    if request.template_id != account.template_id {
        return error(
            StatusCode::BAD_REQUEST,
            "The template ID is invalid. To find this ID, visit https://dashboard.emailjs.com/admin/templates",
        );
    }
    if request.template_params.get("content").map(String::as_str) == Some(FAILING_CONTENT) {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
    }

    info!(params = ?request.template_params, "Accepted email");
    state.sent.lock().await.push(SentEmail {
        service_id: request.service_id,
        template_id: request.template_id,
        template_params: request.template_params,
    });

    "OK".into_response()
}

async fn list_sent(state: State<Arc<ServerState>>) -> Json<Vec<SentEmail>> {
    Json(state.sent.lock().await.clone())
}

async fn clear_sent(state: State<Arc<ServerState>>) -> StatusCode {
    state.sent.lock().await.clear();
    StatusCode::NO_CONTENT
}

fn error(status: StatusCode, reason: &'static str) -> Response {
    (status, reason).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> EmailJsAccount {
        EmailJsAccount {
            user_id: "public-key".into(),
            service_id: "service_test".into(),
            template_id: "template_test".into(),
            access_token: Some("private-key".into()),
        }
    }

    #[tokio::test]
    async fn send_and_list() {
        let addr = spawn(account()).await.unwrap();
        let client = reqwest::Client::new();

        let response = client
            .post(format!("http://{addr}{SEND_ROUTE}"))
            .json(&serde_json::json!({
                "service_id": "service_test",
                "template_id": "template_test",
                "user_id": "public-key",
                "accessToken": "private-key",
                "template_params": { "name": "Alice" },
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(response.text().await.unwrap(), "OK");

        let sent = client
            .get(format!("http://{addr}{SENT_ROUTE}"))
            .send()
            .await
            .unwrap()
            .json::<Vec<SentEmail>>()
            .await
            .unwrap();
        assert_eq!(
            sent,
            [SentEmail {
                service_id: "service_test".into(),
                template_id: "template_test".into(),
                template_params: BTreeMap::from([("name".into(), "Alice".into())]),
            }]
        );
    }

    #[tokio::test]
    async fn wrong_access_token() {
        let addr = spawn(account()).await.unwrap();

        let response = reqwest::Client::new()
            .post(format!("http://{addr}{SEND_ROUTE}"))
            .json(&serde_json::json!({
                "service_id": "service_test",
                "template_id": "template_test",
                "user_id": "public-key",
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::FORBIDDEN);
    }
}
