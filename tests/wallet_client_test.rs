use httpmock::prelude::*;
use peerpay_client::core::{JobGateway, NotificationGateway};
use peerpay_client::domain::classify::{classify, DisplaySign};
use peerpay_client::domain::forms::WithdrawalForm;
use peerpay_client::domain::model::{TransactionKind, TransactionQuery, WalletBalance};
use peerpay_client::domain::wallet::BalanceSummary;
use peerpay_client::utils::format::render_transactions;
use peerpay_client::{spawn_unread_poller, PeerPayClient, Session, WalletActions};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn balance_json() -> serde_json::Value {
    serde_json::json!({
        "availableBalance": 1250.50,
        "escrowedBalance": 1050.00,
        "totalEarnings": 5000.00,
        "totalSpent": 1200.50,
        "currency": "USD"
    })
}

#[tokio::test]
async fn test_balance_summary_from_backend() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/wallet/stu-1/balance");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(balance_json());
    });

    let wallet = WalletActions::new(PeerPayClient::new(
        server.base_url(),
        Session::with_token("stu-1", "tok"),
    ));
    let summary = wallet.summary("stu-1").await.unwrap();

    api_mock.assert();
    assert_eq!(summary.available, dec("1250.50"));
    assert_eq!(summary.escrowed, dec("1050.00"));
    assert_eq!(summary.total, dec("2300.50"));
    assert_eq!(summary.net, dec("3799.50"));
}

#[tokio::test]
async fn test_transaction_history_with_mixed_kinds() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/wallet/stu-1/transactions")
            .query_param("limit", "20");
        then.status(200).json_body(serde_json::json!([
            {"id": "t1", "type": "ESCROW", "amount": 1050, "balanceAfter": 200,
             "timestamp": "2026-03-01T10:00:00Z", "relatedEntity": "esc-1"},
            {"id": "t2", "type": "RELEASE", "amount": 1000, "balanceAfter": 1200,
             "timestamp": "2026-03-05T10:00:00Z", "relatedEntity": "esc-1"},
            {"id": "t3", "type": "WITHDRAWAL", "amount": 200, "balanceAfter": 1000,
             "timestamp": "2026-03-06T10:00:00Z"},
            {"id": "t4", "type": "CASHBACK", "amount": 5, "balanceAfter": 1005,
             "timestamp": "2026-03-07T10:00:00Z"}
        ]));
    });

    let wallet = WalletActions::new(PeerPayClient::new(server.base_url(), Session::new()));
    let query = TransactionQuery {
        page: None,
        limit: Some(20),
    };
    let txs = wallet.history("stu-1", &query).await.unwrap();

    api_mock.assert();
    assert_eq!(txs.len(), 4);

    let signs: Vec<_> = txs.iter().map(|tx| classify(&tx.kind).sign).collect();
    assert_eq!(
        signs,
        vec![
            DisplaySign::Minus,
            DisplaySign::Plus,
            DisplaySign::Minus,
            DisplaySign::None
        ]
    );
    assert_eq!(txs[3].kind, TransactionKind::Other("CASHBACK".to_string()));

    let rendered = render_transactions(&txs, "USD", false);
    assert!(rendered.contains("-USD 1050.00"));
    assert!(rendered.contains("+USD 1000.00"));
    assert!(rendered.contains("CASHBACK"));
}

#[tokio::test]
async fn test_withdrawal_above_balance_never_reaches_backend() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/wallet/stu-1/balance");
        then.status(200).json_body(balance_json());
    });
    let withdraw_mock = server.mock(|when, then| {
        when.method(POST).path("/payment/withdraw");
        then.status(200).json_body(serde_json::json!({
            "transactionId": "pay-9", "status": "pending", "amount": 100
        }));
    });

    let wallet = WalletActions::new(PeerPayClient::new(server.base_url(), Session::new()));
    let summary = wallet.summary("stu-1").await.unwrap();

    let form = WithdrawalForm {
        user_id: "stu-1".to_string(),
        amount: dec("1250.51"),
        method: "bank".to_string(),
        balance: &summary,
    };
    assert!(wallet.withdraw(&form).await.is_err());
    withdraw_mock.assert_hits(0);

    let form = WithdrawalForm {
        amount: dec("100"),
        ..form
    };
    let receipt = wallet.withdraw(&form).await.unwrap();
    withdraw_mock.assert_hits(1);
    assert_eq!(receipt.transaction_id, "pay-9");
}

#[tokio::test]
async fn test_notification_endpoints() {
    let server = MockServer::start();
    let list_mock = server.mock(|when, then| {
        when.method(GET).path("/notification/stu-1");
        then.status(200).json_body(serde_json::json!([
            {"id": "n1", "userId": "stu-1", "title": "Escrow funded",
             "message": "Your job is funded", "type": "escrow", "isRead": false},
            {"id": "n2", "userId": "stu-1", "title": "Welcome", "isRead": true}
        ]));
    });
    let read_mock = server.mock(|when, then| {
        when.method(PUT).path("/notification/n1/read");
        then.status(204);
    });
    let read_all_mock = server.mock(|when, then| {
        when.method(PUT).path("/notification/stu-1/read-all");
        then.status(200).json_body(serde_json::json!({"success": true}));
    });

    let client = PeerPayClient::new(server.base_url(), Session::new());

    let notifications = client.notifications("stu-1").await.unwrap();
    assert_eq!(notifications.len(), 2);
    assert!(!notifications[0].is_read);
    assert_eq!(notifications[1].message, "");

    client.mark_read("n1").await.unwrap();
    client.mark_all_read("stu-1").await.unwrap();

    list_mock.assert();
    read_mock.assert();
    read_all_mock.assert();
}

#[tokio::test]
async fn test_unread_poller_keeps_polling_on_interval() {
    let server = MockServer::start();
    let count_mock = server.mock(|when, then| {
        when.method(GET).path("/notification/stu-1/unread-count");
        then.status(200).json_body(serde_json::json!({"count": 4}));
    });

    let client = Arc::new(PeerPayClient::new(server.base_url(), Session::new()));
    let handle =
        spawn_unread_poller(client, "stu-1".to_string(), Duration::from_millis(50)).unwrap();

    let mut updates = handle.subscribe();
    tokio::time::timeout(Duration::from_secs(5), updates.changed())
        .await
        .expect("poller should publish a count")
        .unwrap();
    assert_eq!(handle.latest(), Some(4));

    tokio::time::sleep(Duration::from_millis(300)).await;
    handle.stop();
    assert!(count_mock.hits() >= 2);
}

#[tokio::test]
async fn test_job_lookup_and_payment_requests() {
    let server = MockServer::start();
    let job_mock = server.mock(|when, then| {
        when.method(GET).path("/jobs/job-7");
        then.status(200).json_body(serde_json::json!({
            "id": "job-7", "title": "Logo design", "budget": "150.00",
            "employerId": "emp-1", "status": "open"
        }));
    });
    let deposit_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/payment/deposit")
            .header("Authorization", "Bearer tok")
            .json_body(serde_json::json!({"userId": "stu-1", "amount": 250.5, "method": "card"}));
        then.status(200).json_body(serde_json::json!({
            "transactionId": "pay-1", "status": "completed", "amount": 250.5
        }));
    });
    let withdraw_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/payment/withdraw")
            .json_body(serde_json::json!({"userId": "stu-1", "amount": 99.99, "method": "bank"}));
        then.status(200).json_body(serde_json::json!({
            "transactionId": "pay-2", "status": "pending", "amount": "99.99"
        }));
    });

    let client = PeerPayClient::new(server.base_url(), Session::with_token("stu-1", "tok"));
    let job = client.get_job("job-7").await.unwrap();
    assert_eq!(job.budget, dec("150.00"));
    assert!(job.description.is_empty());

    let wallet = WalletActions::new(client);
    let receipt = wallet.top_up("stu-1", dec("250.50"), "card").await.unwrap();
    assert_eq!(receipt.transaction_id, "pay-1");
    assert!(wallet.top_up("stu-1", Decimal::ZERO, "card").await.is_err());

    let summary = BalanceSummary::from(&WalletBalance {
        available_balance: dec("100.00"),
        escrowed_balance: Decimal::ZERO,
        total_earnings: dec("100.00"),
        total_spent: Decimal::ZERO,
        currency: "USD".to_string(),
    });
    let form = WithdrawalForm {
        user_id: "stu-1".to_string(),
        amount: dec("99.99"),
        method: "bank".to_string(),
        balance: &summary,
    };
    let receipt = wallet.withdraw(&form).await.unwrap();
    assert_eq!(receipt.amount, dec("99.99"));

    job_mock.assert();
    deposit_mock.assert();
    withdraw_mock.assert();
}
