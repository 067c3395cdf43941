//! Client-side forms. Validation is local and synchronous: every form reports
//! all of its field errors at once, and a form with errors is never submitted.

use crate::domain::model::{CreateEscrowRequest, Escrow, PaymentRequest};
use crate::domain::wallet::BalanceSummary;
use crate::utils::error::Result;
use crate::utils::validation::{self as check, FieldError, FieldErrors, Validate};
use rust_decimal::Decimal;
use serde::Serialize;

/// Forms that can list every field error without short-circuiting.
pub trait FormErrors {
    fn field_errors(&self) -> FieldErrors;

    fn errors(&self) -> Vec<FieldError> {
        self.field_errors().into_vec()
    }
}

macro_rules! validate_via_field_errors {
    ($($form:ty),+ $(,)?) => {
        $(
            impl Validate for $form {
                fn validate(&self) -> Result<()> {
                    self.field_errors().into_result()
                }
            }
        )+
    };
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl FormErrors for LoginForm {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.check("email", check::email(&self.email));
        errors.check("password", check::required("Password", &self.password));
        errors
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRegistrationForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip)]
    pub confirm_password: String,
    pub university: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
}

impl FormErrors for StudentRegistrationForm {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.check("full_name", check::required("Full name", &self.full_name));
        errors.check("email", check::email(&self.email));
        errors.check("password", check::password(&self.password));
        errors.check(
            "confirm_password",
            check::password_confirmation(&self.password, &self.confirm_password),
        );
        errors.check("university", check::required("University", &self.university));
        errors
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerRegistrationForm {
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip)]
    pub confirm_password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl FormErrors for EmployerRegistrationForm {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.check("company_name", check::required("Company name", &self.company_name));
        errors.check("contact_name", check::required("Contact name", &self.contact_name));
        errors.check("email", check::email(&self.email));
        errors.check("password", check::password(&self.password));
        errors.check(
            "confirm_password",
            check::password_confirmation(&self.password, &self.confirm_password),
        );
        // 選填欄位：有填才檢查格式
        if let Some(phone) = self.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            errors.check("phone", check::phone(phone));
        }
        if let Some(website) = self.website.as_deref().filter(|w| !w.trim().is_empty()) {
            errors.check("website", check::website(website));
        }
        errors
    }
}

#[derive(Debug, Clone, Default)]
pub struct EscrowDepositForm {
    pub job_id: String,
    pub employer_id: String,
    pub student_id: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub agreed_to_terms: bool,
}

impl FormErrors for EscrowDepositForm {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.check("job_id", check::required("Job", &self.job_id));
        errors.check("employer_id", check::required("Employer", &self.employer_id));
        errors.check("student_id", check::required("Student", &self.student_id));
        errors.check("amount", check::non_negative_amount("Amount", self.amount));
        errors.check(
            "agreed_to_terms",
            check::checked(
                self.agreed_to_terms,
                "You must agree to the escrow terms before depositing",
            ),
        );
        errors
    }
}

impl EscrowDepositForm {
    pub fn to_request(&self) -> CreateEscrowRequest {
        CreateEscrowRequest {
            job_id: self.job_id.trim().to_string(),
            employer_id: self.employer_id.trim().to_string(),
            student_id: self.student_id.trim().to_string(),
            amount: self.amount,
            description: self.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EscrowReleaseForm {
    pub escrow_id: String,
    pub escrowed_amount: Decimal,
    pub platform_fee: Decimal,
    pub confirmed: bool,
}

impl EscrowReleaseForm {
    pub fn for_escrow(escrow: &Escrow, confirmed: bool) -> Self {
        Self {
            escrow_id: escrow.id.clone(),
            escrowed_amount: escrow.amount,
            platform_fee: escrow.platform_fee,
            confirmed,
        }
    }
}

impl FormErrors for EscrowReleaseForm {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.check("escrow_id", check::required("Escrow", &self.escrow_id));
        errors.check(
            "confirmed",
            check::checked(
                self.confirmed,
                "Confirm that the work is complete; releasing funds cannot be undone",
            ),
        );
        errors
    }
}

#[derive(Debug, Clone, Default)]
pub struct EscrowRefundForm {
    pub escrow_id: String,
    pub reason: Option<String>,
    pub confirmed: bool,
}

impl FormErrors for EscrowRefundForm {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.check("escrow_id", check::required("Escrow", &self.escrow_id));
        errors.check(
            "confirmed",
            check::checked(self.confirmed, "Confirm the refund request"),
        );
        errors
    }
}

/// 提領表單需要目前餘額才能檢查上限
#[derive(Debug, Clone)]
pub struct WithdrawalForm<'a> {
    pub user_id: String,
    pub amount: Decimal,
    pub method: String,
    pub balance: &'a BalanceSummary,
}

impl FormErrors for WithdrawalForm<'_> {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.check("method", check::required("Payout method", &self.method));
        if self.amount <= Decimal::ZERO {
            errors.push("amount", "Amount must be greater than zero");
        } else if !self.balance.can_withdraw(self.amount) {
            errors.push(
                "amount",
                format!(
                    "Amount exceeds available balance of {}",
                    self.balance.available
                ),
            );
        }
        errors
    }
}

impl WithdrawalForm<'_> {
    pub fn to_request(&self) -> PaymentRequest {
        PaymentRequest {
            user_id: self.user_id.clone(),
            amount: self.amount,
            method: self.method.trim().to_string(),
        }
    }
}

validate_via_field_errors!(
    LoginForm,
    StudentRegistrationForm,
    EmployerRegistrationForm,
    EscrowDepositForm,
    EscrowReleaseForm,
    EscrowRefundForm,
    WithdrawalForm<'_>,
);
