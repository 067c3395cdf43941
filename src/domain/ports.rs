use crate::domain::forms::{EmployerRegistrationForm, LoginForm, StudentRegistrationForm};
use crate::domain::model::{
    AuthResponse, CreateEscrowRequest, Escrow, Job, JobQuery, Notification, PaymentReceipt,
    PaymentRequest, Transaction, TransactionQuery, WalletBalance,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn timeout_seconds(&self) -> Option<u64>;
    fn token(&self) -> Option<&str>;
    fn user_id(&self) -> Option<&str>;
    fn poll_interval_seconds(&self) -> u64;
    fn currency(&self) -> &str;
}

#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, form: &LoginForm) -> Result<AuthResponse>;
    async fn register_student(&self, form: &StudentRegistrationForm) -> Result<AuthResponse>;
    async fn register_employer(&self, form: &EmployerRegistrationForm) -> Result<AuthResponse>;
}

#[async_trait]
pub trait JobGateway: Send + Sync {
    async fn list_jobs(&self, query: &JobQuery) -> Result<Vec<Job>>;
    async fn get_job(&self, job_id: &str) -> Result<Job>;
}

#[async_trait]
pub trait EscrowGateway: Send + Sync {
    async fn create_escrow(&self, request: &CreateEscrowRequest) -> Result<Escrow>;
    async fn get_escrow(&self, escrow_id: &str) -> Result<Escrow>;
    async fn release_escrow(&self, escrow_id: &str) -> Result<Escrow>;
    async fn refund_escrow(&self, escrow_id: &str, reason: Option<&str>) -> Result<Escrow>;
}

#[async_trait]
pub trait WalletGateway: Send + Sync {
    async fn wallet_balance(&self, user_id: &str) -> Result<WalletBalance>;
    async fn wallet_transactions(
        &self,
        user_id: &str,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>>;
}

#[async_trait]
pub trait NotificationGateway: Send + Sync {
    async fn notifications(&self, user_id: &str) -> Result<Vec<Notification>>;
    async fn unread_count(&self, user_id: &str) -> Result<u64>;
    async fn mark_read(&self, notification_id: &str) -> Result<()>;
    async fn mark_all_read(&self, user_id: &str) -> Result<()>;
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn deposit(&self, request: &PaymentRequest) -> Result<PaymentReceipt>;
    async fn withdraw(&self, request: &PaymentRequest) -> Result<PaymentReceipt>;
}
