use crate::core::session::Session;
use crate::domain::forms::{EmployerRegistrationForm, LoginForm, StudentRegistrationForm};
use crate::domain::model::{
    AuthResponse, CreateEscrowRequest, Escrow, Job, JobQuery, Notification, PaymentReceipt,
    PaymentRequest, RefundEscrowRequest, Transaction, TransactionQuery, UnreadCount,
    WalletBalance,
};
use crate::domain::ports::{
    AuthGateway, ConfigProvider, EscrowGateway, JobGateway, NotificationGateway, PaymentGateway,
    WalletGateway,
};
use crate::utils::error::{PeerPayError, Result};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// PeerPay 後端的 HTTP client。所有請求共用同一個 `reqwest::Client`
#[derive(Debug, Clone)]
pub struct PeerPayClient {
    http_client: Client,
    base_url: String,
    timeout: Option<Duration>,
    session: Session,
}

impl PeerPayClient {
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        let base_url: String = base_url.into();
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: None,
            session,
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        validate_url("api.base_url", config.base_url())?;

        let session = match (config.user_id(), config.token()) {
            (Some(user_id), token) => Session::with_token(user_id, token.unwrap_or_default()),
            (None, Some(token)) => {
                tracing::warn!("⚠️ Token set without a user id; user commands will fail");
                Session::with_bearer(token)
            }
            (None, None) => Session::new(),
        };

        let client = Self::new(config.base_url(), session);
        Ok(match config.timeout_seconds() {
            Some(seconds) => client.with_timeout(Duration::from_secs(seconds)),
            None => client,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        tracing::debug!("{} {}", method, url);

        let mut request = self.http_client.request(method, url);
        if let Some(token) = self.session.token().await {
            request = request.bearer_auth(token);
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        request
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status.is_success() {
            Ok(response)
        } else {
            Err(Self::handle_error_response(status, response).await)
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// 把非 2xx 的回應轉成對應的錯誤，訊息優先取後端 JSON 的 `message`
    async fn handle_error_response(status: StatusCode, response: Response) -> PeerPayError {
        let body_text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body_text)
            .ok()
            .and_then(|json| {
                json.get("message")
                    .or_else(|| json.get("error"))
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| {
                if body_text.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("Request failed")
                        .to_string()
                } else {
                    body_text.clone()
                }
            });

        match status {
            StatusCode::UNAUTHORIZED => PeerPayError::Unauthorized { message },
            StatusCode::NOT_FOUND => PeerPayError::NotFound { message },
            _ => {
                if status.is_server_error() {
                    tracing::warn!("Server error {}: {}", status.as_u16(), body_text);
                }
                PeerPayError::ApiError {
                    status: status.as_u16(),
                    message,
                }
            }
        }
    }
}

#[async_trait]
impl AuthGateway for PeerPayClient {
    async fn login(&self, form: &LoginForm) -> Result<AuthResponse> {
        let request = self.request(Method::POST, "/auth/login").await.json(form);
        self.send_json(request).await
    }

    async fn register_student(&self, form: &StudentRegistrationForm) -> Result<AuthResponse> {
        let request = self
            .request(Method::POST, "/auth/register/student")
            .await
            .json(form);
        self.send_json(request).await
    }

    async fn register_employer(&self, form: &EmployerRegistrationForm) -> Result<AuthResponse> {
        let request = self
            .request(Method::POST, "/auth/register/employer")
            .await
            .json(form);
        self.send_json(request).await
    }
}

#[async_trait]
impl JobGateway for PeerPayClient {
    async fn list_jobs(&self, query: &JobQuery) -> Result<Vec<Job>> {
        let request = self.request(Method::GET, "/jobs").await.query(query);
        self.send_json(request).await
    }

    async fn get_job(&self, job_id: &str) -> Result<Job> {
        let request = self.request(Method::GET, &format!("/jobs/{}", job_id)).await;
        self.send_json(request).await
    }
}

#[async_trait]
impl EscrowGateway for PeerPayClient {
    async fn create_escrow(&self, body: &CreateEscrowRequest) -> Result<Escrow> {
        let request = self.request(Method::POST, "/escrow/create").await.json(body);
        self.send_json(request).await
    }

    async fn get_escrow(&self, escrow_id: &str) -> Result<Escrow> {
        let request = self
            .request(Method::GET, &format!("/escrow/{}", escrow_id))
            .await;
        self.send_json(request).await
    }

    async fn release_escrow(&self, escrow_id: &str) -> Result<Escrow> {
        let request = self
            .request(Method::POST, &format!("/escrow/{}/release", escrow_id))
            .await;
        self.send_json(request).await
    }

    async fn refund_escrow(&self, escrow_id: &str, reason: Option<&str>) -> Result<Escrow> {
        let body = RefundEscrowRequest {
            reason: reason.map(str::to_string),
        };
        let request = self
            .request(Method::POST, &format!("/escrow/{}/refund", escrow_id))
            .await
            .json(&body);
        self.send_json(request).await
    }
}

#[async_trait]
impl WalletGateway for PeerPayClient {
    async fn wallet_balance(&self, user_id: &str) -> Result<WalletBalance> {
        let request = self
            .request(Method::GET, &format!("/wallet/{}/balance", user_id))
            .await;
        self.send_json(request).await
    }

    async fn wallet_transactions(
        &self,
        user_id: &str,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>> {
        let request = self
            .request(Method::GET, &format!("/wallet/{}/transactions", user_id))
            .await
            .query(query);
        self.send_json(request).await
    }
}

#[async_trait]
impl NotificationGateway for PeerPayClient {
    async fn notifications(&self, user_id: &str) -> Result<Vec<Notification>> {
        let request = self
            .request(Method::GET, &format!("/notification/{}", user_id))
            .await;
        self.send_json(request).await
    }

    async fn unread_count(&self, user_id: &str) -> Result<u64> {
        let request = self
            .request(Method::GET, &format!("/notification/{}/unread-count", user_id))
            .await;
        let unread: UnreadCount = self.send_json(request).await?;
        Ok(unread.count)
    }

    async fn mark_read(&self, notification_id: &str) -> Result<()> {
        let request = self
            .request(Method::PUT, &format!("/notification/{}/read", notification_id))
            .await;
        self.send(request).await?;
        Ok(())
    }

    async fn mark_all_read(&self, user_id: &str) -> Result<()> {
        let request = self
            .request(Method::PUT, &format!("/notification/{}/read-all", user_id))
            .await;
        self.send(request).await?;
        Ok(())
    }
}

#[async_trait]
impl PaymentGateway for PeerPayClient {
    async fn deposit(&self, body: &PaymentRequest) -> Result<PaymentReceipt> {
        let request = self.request(Method::POST, "/payment/deposit").await.json(body);
        self.send_json(request).await
    }

    async fn withdraw(&self, body: &PaymentRequest) -> Result<PaymentReceipt> {
        let request = self.request(Method::POST, "/payment/withdraw").await.json(body);
        self.send_json(request).await
    }
}
