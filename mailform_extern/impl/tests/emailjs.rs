use std::time::Duration;

use mailform_extern_contracts::emailjs::{
    EmailJsApiService, EmailJsSendError, EmailJsTemplateParams,
};
use mailform_extern_impl::{
    emailjs::{EmailJsApiServiceConfig, EmailJsApiServiceImpl},
    http::HttpClient,
};
use mailform_models::emailjs::EmailJsCredentials;
use mailform_testing::emailjs::{
    EmailJsAccount, SentEmail, FAILING_CONTENT, SEND_ROUTE, SENT_ROUTE,
};
use mailform_utils::assert_matches;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn send() {
    let sut = TestServer::start(None).await;

    let result = sut.api.send(credentials(), params("Hello there")).await;

    result.unwrap();
    assert_eq!(
        sut.sent().await,
        [SentEmail {
            service_id: "service_test".into(),
            template_id: "template_test".into(),
            template_params: params("Hello there"),
        }]
    );
}

#[tokio::test]
async fn send_with_access_token() {
    let sut = TestServer::start(Some("private-key")).await;

    let result = sut
        .api
        .send(
            EmailJsCredentials {
                access_token: Some("private-key".to_owned().into()),
                ..credentials()
            },
            params("Hello there"),
        )
        .await;

    result.unwrap();
    assert_eq!(sut.sent().await.len(), 1);
}

#[tokio::test]
async fn invalid_public_key() {
    let sut = TestServer::start(None).await;

    let result = sut
        .api
        .send(
            EmailJsCredentials {
                user_id: "wrong".into(),
                ..credentials()
            },
            params("Hello there"),
        )
        .await;

    assert_matches!(
        result,
        Err(EmailJsSendError::Rejected { status: 400, reason })
            if reason.starts_with("The Public Key is invalid")
    );
    assert!(sut.sent().await.is_empty());
}

#[tokio::test]
async fn invalid_template() {
    let sut = TestServer::start(None).await;

    let result = sut
        .api
        .send(
            EmailJsCredentials {
                template_id: "template_other".into(),
                ..credentials()
            },
            params("Hello there"),
        )
        .await;

    assert_matches!(
        result,
        Err(EmailJsSendError::Rejected { status: 400, .. })
    );
}

#[tokio::test]
async fn server_error() {
    let sut = TestServer::start(None).await;

    let result = sut.api.send(credentials(), params(FAILING_CONTENT)).await;

    assert_matches!(
        result,
        Err(EmailJsSendError::Rejected { status: 500, .. })
    );
}

#[tokio::test]
async fn unreachable() {
    let api = EmailJsApiServiceImpl::new(
        EmailJsApiServiceConfig::new(Some("http://127.0.0.1:1/send".parse().unwrap())),
        HttpClient::new(Duration::from_secs(5)).unwrap(),
    );

    let result = api.send(credentials(), params("Hello there")).await;

    assert_matches!(result, Err(EmailJsSendError::Other(_)));
}

struct TestServer {
    api: EmailJsApiServiceImpl,
    base_url: String,
}

impl TestServer {
    async fn start(access_token: Option<&str>) -> Self {
        let addr = mailform_testing::emailjs::spawn(EmailJsAccount {
            user_id: "test-public-key".into(),
            service_id: "service_test".into(),
            template_id: "template_test".into(),
            access_token: access_token.map(Into::into),
        })
        .await
        .unwrap();
        let base_url = format!("http://{addr}");

        let config = EmailJsApiServiceConfig::new(Some(
            format!("{base_url}{SEND_ROUTE}").parse().unwrap(),
        ));
        let http = HttpClient::new(Duration::from_secs(5)).unwrap();
        let api = EmailJsApiServiceImpl::new(config, http);

        Self { api, base_url }
    }

    async fn sent(&self) -> Vec<SentEmail> {
        reqwest::get(format!("{}{SENT_ROUTE}", self.base_url))
            .await
            .unwrap()
            .error_for_status()
            .unwrap()
            .json()
            .await
            .unwrap()
    }
}

fn credentials() -> EmailJsCredentials {
    EmailJsCredentials {
        user_id: "test-public-key".into(),
        service_id: "service_test".into(),
        template_id: "template_test".into(),
        access_token: None,
    }
}

fn params(content: &str) -> EmailJsTemplateParams {
    EmailJsTemplateParams::from([
        ("name".into(), "Alice".into()),
        ("email".into(), "alice@example.com".into()),
        ("content".into(), content.into()),
    ])
}
