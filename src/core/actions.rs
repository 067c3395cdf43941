//! User actions: validate the form locally, compute what the user sees, then
//! issue exactly one backend request. Callers turn the result into a
//! [`Toast`](crate::utils::toast::Toast); nothing here retries.

use crate::core::session::Session;
use crate::domain::escrow::{EscrowTotals, ReleaseTotals};
use crate::domain::forms::{
    EmployerRegistrationForm, EscrowDepositForm, EscrowRefundForm, EscrowReleaseForm, LoginForm,
    StudentRegistrationForm, WithdrawalForm,
};
use crate::domain::model::{
    AuthResponse, Escrow, PaymentReceipt, PaymentRequest, Transaction, TransactionQuery,
};
use crate::domain::ports::{AuthGateway, EscrowGateway, PaymentGateway, WalletGateway};
use crate::domain::wallet::BalanceSummary;
use crate::utils::error::{PeerPayError, Result};
use crate::utils::validation::Validate;
use rust_decimal::Decimal;

pub struct AccountActions<G: AuthGateway> {
    gateway: G,
    session: Session,
}

impl<G: AuthGateway> AccountActions<G> {
    pub fn new(gateway: G, session: Session) -> Self {
        Self { gateway, session }
    }

    pub async fn sign_in(&self, form: &LoginForm) -> Result<AuthResponse> {
        form.validate()?;
        let auth = self.gateway.login(form).await?;
        self.session.sign_in(&auth).await;
        Ok(auth)
    }

    pub async fn register_student(&self, form: &StudentRegistrationForm) -> Result<AuthResponse> {
        form.validate()?;
        let auth = self.gateway.register_student(form).await?;
        self.session.sign_in(&auth).await;
        Ok(auth)
    }

    pub async fn register_employer(&self, form: &EmployerRegistrationForm) -> Result<AuthResponse> {
        form.validate()?;
        let auth = self.gateway.register_employer(form).await?;
        self.session.sign_in(&auth).await;
        Ok(auth)
    }

    pub async fn sign_out(&self) {
        self.session.sign_out().await;
    }
}

pub struct EscrowActions<G: EscrowGateway> {
    gateway: G,
}

impl<G: EscrowGateway> EscrowActions<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn deposit(&self, form: &EscrowDepositForm) -> Result<(EscrowTotals, Escrow)> {
        form.validate()?;
        let totals = EscrowTotals::for_job_amount(form.amount)?;

        tracing::info!(
            "Creating escrow for job {}: amount {}, fee {}, total {}",
            form.job_id,
            totals.job_amount,
            totals.platform_fee,
            totals.total_to_deposit
        );
        let escrow = self.gateway.create_escrow(&form.to_request()).await?;
        Ok((totals, escrow))
    }

    pub async fn get(&self, escrow_id: &str) -> Result<Escrow> {
        self.gateway.get_escrow(escrow_id).await
    }

    pub async fn release(&self, form: &EscrowReleaseForm) -> Result<(ReleaseTotals, Escrow)> {
        form.validate()?;
        let totals = ReleaseTotals::new(form.escrowed_amount, form.platform_fee)?;

        tracing::info!(
            "Releasing escrow {}: student receives {}",
            form.escrow_id,
            totals.student_receives
        );
        let escrow = self.gateway.release_escrow(&form.escrow_id).await?;
        Ok((totals, escrow))
    }

    pub async fn refund(&self, form: &EscrowRefundForm) -> Result<Escrow> {
        form.validate()?;
        tracing::info!("Requesting refund for escrow {}", form.escrow_id);
        self.gateway
            .refund_escrow(&form.escrow_id, form.reason.as_deref())
            .await
    }
}

pub struct WalletActions<G: WalletGateway + PaymentGateway> {
    gateway: G,
}

impl<G: WalletGateway + PaymentGateway> WalletActions<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn summary(&self, user_id: &str) -> Result<BalanceSummary> {
        let balance = self.gateway.wallet_balance(user_id).await?;
        Ok(BalanceSummary::from(&balance))
    }

    pub async fn history(
        &self,
        user_id: &str,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>> {
        self.gateway.wallet_transactions(user_id, query).await
    }

    pub async fn top_up(
        &self,
        user_id: &str,
        amount: Decimal,
        method: &str,
    ) -> Result<PaymentReceipt> {
        if amount <= Decimal::ZERO {
            return Err(PeerPayError::InvalidAmount {
                message: "deposit amount must be greater than zero".to_string(),
            });
        }
        let request = PaymentRequest {
            user_id: user_id.to_string(),
            amount,
            method: method.to_string(),
        };
        self.gateway.deposit(&request).await
    }

    pub async fn withdraw(&self, form: &WithdrawalForm<'_>) -> Result<PaymentReceipt> {
        form.validate()?;
        self.gateway.withdraw(&form.to_request()).await
    }
}
