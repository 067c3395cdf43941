use httpmock::prelude::*;
use peerpay_client::domain::forms::{EscrowDepositForm, EscrowRefundForm, EscrowReleaseForm};
use peerpay_client::domain::model::EscrowStatus;
use peerpay_client::{EscrowActions, PeerPayClient, PeerPayError, Session, Toast};
use rust_decimal::Decimal;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn escrow_json(status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "esc-1",
        "jobId": "job-1",
        "employerId": "emp-1",
        "studentId": "stu-1",
        "amount": 1050.00,
        "platformFee": 50.00,
        "status": status,
        "createdAt": "2026-03-01T10:00:00Z"
    })
}

fn deposit_form(agreed: bool) -> EscrowDepositForm {
    EscrowDepositForm {
        job_id: "job-1".to_string(),
        employer_id: "emp-1".to_string(),
        student_id: "stu-1".to_string(),
        amount: dec("1000.00"),
        description: Some("Landing page redesign".to_string()),
        agreed_to_terms: agreed,
    }
}

#[tokio::test]
async fn test_create_escrow_end_to_end() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/escrow/create")
            .header("Authorization", "Bearer emp-token")
            .json_body_partial(
                r#"{"jobId": "job-1", "studentId": "stu-1", "employerId": "emp-1"}"#,
            );
        then.status(201)
            .header("Content-Type", "application/json")
            .json_body(escrow_json("held"));
    });

    let client = PeerPayClient::new(server.base_url(), Session::with_token("emp-1", "emp-token"));
    let actions = EscrowActions::new(client);

    let (totals, escrow) = actions.deposit(&deposit_form(true)).await.unwrap();

    api_mock.assert();
    assert_eq!(totals.platform_fee, dec("50.00"));
    assert_eq!(totals.total_to_deposit, dec("1050.00"));
    assert_eq!(escrow.status, EscrowStatus::Held);
    assert_eq!(escrow.amount, totals.total_to_deposit);
}

#[tokio::test]
async fn test_deposit_without_agreement_sends_nothing() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/escrow/create");
        then.status(201).json_body(escrow_json("held"));
    });

    let actions = EscrowActions::new(PeerPayClient::new(server.base_url(), Session::new()));
    let result = actions.deposit(&deposit_form(false)).await;

    let toast = Toast::surface("Create escrow", &result, |_| String::new());
    assert!(toast.is_error());
    assert_eq!(
        toast.message,
        "You must agree to the escrow terms before depositing"
    );
    api_mock.assert_hits(0);
}

#[tokio::test]
async fn test_backend_failure_is_surfaced_once_without_retry() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/escrow/create");
        then.status(500)
            .json_body(serde_json::json!({"message": "Payment processor unavailable"}));
    });

    let actions = EscrowActions::new(PeerPayClient::new(server.base_url(), Session::new()));
    let result = actions.deposit(&deposit_form(true)).await;

    assert!(matches!(
        result,
        Err(PeerPayError::ApiError { status: 500, .. })
    ));
    let toast = Toast::surface("Create escrow", &result, |_| String::new());
    assert_eq!(toast.message, "Payment processor unavailable");
    api_mock.assert_hits(1);
}

#[tokio::test]
async fn test_release_uses_fee_reported_by_backend() {
    let server = MockServer::start();
    let get_mock = server.mock(|when, then| {
        when.method(GET).path("/escrow/esc-1");
        then.status(200).json_body(escrow_json("held"));
    });
    let release_mock = server.mock(|when, then| {
        when.method(POST).path("/escrow/esc-1/release");
        then.status(200).json_body(escrow_json("released"));
    });

    let actions = EscrowActions::new(PeerPayClient::new(
        server.base_url(),
        Session::with_token("emp-1", "emp-token"),
    ));

    let escrow = actions.get("esc-1").await.unwrap();
    let form = EscrowReleaseForm::for_escrow(&escrow, true);
    let (totals, released) = actions.release(&form).await.unwrap();

    get_mock.assert();
    release_mock.assert();
    assert_eq!(totals.student_receives, dec("1000.00"));
    assert_eq!(released.status, EscrowStatus::Released);
}

#[tokio::test]
async fn test_unconfirmed_release_is_blocked_locally() {
    let server = MockServer::start();
    let release_mock = server.mock(|when, then| {
        when.method(POST).path("/escrow/esc-1/release");
        then.status(200).json_body(escrow_json("released"));
    });

    let actions = EscrowActions::new(PeerPayClient::new(server.base_url(), Session::new()));
    let form = EscrowReleaseForm {
        escrow_id: "esc-1".to_string(),
        escrowed_amount: dec("1050.00"),
        platform_fee: dec("50.00"),
        confirmed: false,
    };

    assert!(actions.release(&form).await.is_err());
    release_mock.assert_hits(0);
}

#[tokio::test]
async fn test_refund_sends_reason() {
    let server = MockServer::start();
    let refund_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/escrow/esc-1/refund")
            .json_body(serde_json::json!({"reason": "Student withdrew"}));
        then.status(200).json_body(escrow_json("refunded"));
    });

    let actions = EscrowActions::new(PeerPayClient::new(server.base_url(), Session::new()));
    let form = EscrowRefundForm {
        escrow_id: "esc-1".to_string(),
        reason: Some("Student withdrew".to_string()),
        confirmed: true,
    };

    let escrow = actions.refund(&form).await.unwrap();

    refund_mock.assert();
    assert_eq!(escrow.status, EscrowStatus::Refunded);
}
