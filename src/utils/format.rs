use crate::domain::classify::{classify, DisplaySign};
use crate::domain::escrow::{round2, EscrowTotals, ReleaseTotals};
use crate::domain::model::{Escrow, Job, Notification, Transaction};
use crate::domain::wallet::BalanceSummary;
use rust_decimal::Decimal;

/// 金額固定顯示兩位小數
pub fn format_money(amount: Decimal, currency: &str) -> String {
    format!("{} {:.2}", currency, round2(amount))
}

pub fn format_signed(amount: Decimal, currency: &str, sign: DisplaySign) -> String {
    format!("{}{}", sign.as_str(), format_money(amount.abs(), currency))
}

pub fn render_escrow_totals(totals: &EscrowTotals, currency: &str) -> String {
    [
        format!("Job amount:        {}", format_money(totals.job_amount, currency)),
        format!("Platform fee (5%): {}", format_money(totals.platform_fee, currency)),
        format!("Total to deposit:  {}", format_money(totals.total_to_deposit, currency)),
    ]
    .join("\n")
}

pub fn render_release_totals(totals: &ReleaseTotals, currency: &str) -> String {
    [
        format!("Escrowed amount:   {}", format_money(totals.escrowed_amount, currency)),
        format!("Platform fee:      {}", format_money(totals.platform_fee, currency)),
        format!("Student receives:  {}", format_money(totals.student_receives, currency)),
    ]
    .join("\n")
}

pub fn render_balance(summary: &BalanceSummary) -> String {
    let c = summary.currency.as_str();
    [
        format!("Available:       {}", format_money(summary.available, c)),
        format!("In escrow:       {}", format_money(summary.escrowed, c)),
        format!("Total:           {}", format_money(summary.total, c)),
        format!("Total earnings:  {}", format_money(summary.total_earnings, c)),
        format!("Total spent:     {}", format_money(summary.total_spent, c)),
    ]
    .join("\n")
}

pub fn render_transaction(tx: &Transaction, currency: &str, color: bool) -> String {
    let display = classify(&tx.kind);
    let amount = format_signed(tx.amount, currency, display.sign);
    let amount = if color {
        format!("\x1b[{}m{:>16}\x1b[0m", display.color.ansi_code(), amount)
    } else {
        format!("{:>16}", amount)
    };

    format!(
        "{}  {:<10} {}  balance {}  {}",
        tx.timestamp.format("%Y-%m-%d %H:%M"),
        tx.kind.to_string(),
        amount,
        format_money(tx.balance_after, currency),
        tx.related_entity.as_deref().unwrap_or("-"),
    )
}

pub fn render_transactions(txs: &[Transaction], currency: &str, color: bool) -> String {
    if txs.is_empty() {
        return "No transactions yet".to_string();
    }
    txs.iter()
        .map(|tx| render_transaction(tx, currency, color))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_escrow(escrow: &Escrow, currency: &str) -> String {
    format!(
        "Escrow {} [{}]\n  job {} | employer {} | student {}\n  amount {} | fee {}",
        escrow.id,
        escrow.status,
        escrow.job_id,
        escrow.employer_id,
        escrow.student_id,
        format_money(escrow.amount, currency),
        format_money(escrow.platform_fee, currency),
    )
}

pub fn render_job(job: &Job, currency: &str) -> String {
    let mut line = format!(
        "{}  {}  ({})",
        job.id,
        job.title,
        format_money(job.budget, currency)
    );
    if let Some(category) = &job.category {
        line.push_str(&format!("  [{}]", category));
    }
    if !job.skills.is_empty() {
        line.push_str(&format!("  skills: {}", job.skills.join(", ")));
    }
    line
}

pub fn render_notification(notification: &Notification) -> String {
    let marker = if notification.is_read { " " } else { "•" };
    format!(
        "{} {}  {}: {}",
        marker, notification.id, notification.title, notification.message
    )
}
