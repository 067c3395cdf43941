use clap::Parser;
use peerpay_client::config::cli::{
    Command, EscrowCommand, FeesCommand, JobsCommand, NotificationsCommand, PaymentCommand,
};
use peerpay_client::core::{JobGateway, NotificationGateway};
use peerpay_client::domain::forms::{
    EscrowDepositForm, EscrowRefundForm, EscrowReleaseForm, LoginForm, WithdrawalForm,
};
use peerpay_client::domain::model::{JobQuery, TransactionQuery};
use peerpay_client::domain::ports::ConfigProvider;
use peerpay_client::utils::error::ErrorSeverity;
use peerpay_client::utils::{format, logger, validation::Validate};
use peerpay_client::{
    spawn_unread_poller, AccountActions, CliConfig, EscrowActions, EscrowTotals, PeerPayClient,
    PeerPayError, ReleaseTotals, Result, Toast, TomlConfig, WalletActions,
};
use std::sync::Arc;
use std::time::Duration;

/// 合併後的執行設定：有 TOML 檔就以檔案為主，CLI 旗標覆蓋
struct Settings {
    provider: Box<dyn ConfigProvider>,
    color: bool,
}

fn load_settings(cli: &CliConfig) -> Result<Settings> {
    let Some(path) = &cli.config else {
        cli.validate()?;
        return Ok(Settings {
            provider: Box::new(cli.clone()),
            color: !cli.no_color,
        });
    };

    tracing::info!("📁 Loading configuration from: {}", path.display());
    let mut config = TomlConfig::from_file(path)?;

    // 應用命令列覆蓋設定
    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.api.timeout_seconds = Some(timeout);
    }
    if let Some(token) = &cli.token {
        config.session_mut().token = Some(token.clone());
    }
    if let Some(user_id) = &cli.user_id {
        config.session_mut().user_id = Some(user_id.clone());
    }
    if let Some(interval) = cli.poll_interval {
        config.notifications_mut().poll_interval_seconds = Some(interval);
    }
    if let Some(currency) = &cli.currency {
        config.display_mut().currency = Some(currency.clone());
    }

    config.validate()?;
    let color = !cli.no_color && config.color_enabled();
    Ok(Settings {
        provider: Box::new(config),
        color,
    })
}

/// 執行子命令；成功時回傳要顯示的通知訊息
async fn run(cli: CliConfig) -> Result<Option<String>> {
    // 手續費試算不需要連線
    if let Command::Fees { action } = &cli.command {
        let currency = cli.currency();
        match action {
            FeesCommand::Deposit { amount } => {
                let totals = EscrowTotals::for_job_amount(*amount)?;
                println!("{}", format::render_escrow_totals(&totals, currency));
            }
            FeesCommand::Release { escrowed, fee } => {
                let totals = ReleaseTotals::new(*escrowed, *fee)?;
                println!("{}", format::render_release_totals(&totals, currency));
            }
        }
        return Ok(None);
    }

    let settings = load_settings(&cli)?;
    let currency = settings.provider.currency().to_string();
    let client = PeerPayClient::from_config(settings.provider.as_ref())?;
    tracing::debug!("Using backend at {}", client.base_url());

    match cli.command {
        Command::Fees { .. } => Ok(None),

        Command::Login { email, password } => {
            let accounts = AccountActions::new(client.clone(), client.session().clone());
            let auth = accounts.sign_in(&LoginForm { email, password }).await?;
            println!("export PEERPAY_USER_ID={}", auth.user.id);
            println!("export PEERPAY_TOKEN={}", auth.token);
            Ok(Some(format!("Signed in as {}", auth.user.name)))
        }

        Command::Jobs { action } => {
            match action {
                JobsCommand::List {
                    search,
                    category,
                    page,
                    limit,
                } => {
                    let query = JobQuery {
                        search,
                        category,
                        page,
                        limit,
                    };
                    let jobs = client.list_jobs(&query).await?;
                    if jobs.is_empty() {
                        println!("No jobs found");
                    }
                    for job in &jobs {
                        println!("{}", format::render_job(job, &currency));
                    }
                }
                JobsCommand::Show { id } => {
                    let job = client.get_job(&id).await?;
                    println!("{}", format::render_job(&job, &currency));
                    if !job.description.is_empty() {
                        println!("\n{}", job.description);
                    }
                }
            }
            Ok(None)
        }

        Command::Balance => {
            let user_id = client.session().user_id().await?;
            let wallet = WalletActions::new(client);
            let summary = wallet.summary(&user_id).await?;
            println!("{}", format::render_balance(&summary));
            Ok(None)
        }

        Command::Transactions { page, limit } => {
            let user_id = client.session().user_id().await?;
            let wallet = WalletActions::new(client);
            let query = TransactionQuery {
                page,
                limit: Some(limit),
            };
            let txs = wallet.history(&user_id, &query).await?;
            println!("{}", format::render_transactions(&txs, &currency, settings.color));
            Ok(None)
        }

        Command::Escrow { action } => {
            let escrows = EscrowActions::new(client.clone());
            match action {
                EscrowCommand::Create {
                    job,
                    student,
                    employer,
                    amount,
                    description,
                    agree,
                } => {
                    let employer_id = match employer {
                        Some(id) => id,
                        None => client.session().user_id().await?,
                    };
                    let form = EscrowDepositForm {
                        job_id: job,
                        employer_id,
                        student_id: student,
                        amount,
                        description,
                        agreed_to_terms: agree,
                    };
                    let (totals, escrow) = escrows.deposit(&form).await?;
                    println!("{}", format::render_escrow_totals(&totals, &currency));
                    println!("{}", format::render_escrow(&escrow, &currency));
                    Ok(Some(format!("Escrow {} created", escrow.id)))
                }
                EscrowCommand::Show { id } => {
                    let escrow = escrows.get(&id).await?;
                    println!("{}", format::render_escrow(&escrow, &currency));
                    Ok(None)
                }
                EscrowCommand::Release { id, confirm } => {
                    let escrow = escrows.get(&id).await?;
                    let form = EscrowReleaseForm::for_escrow(&escrow, confirm);
                    let (totals, released) = escrows.release(&form).await?;
                    println!("{}", format::render_release_totals(&totals, &currency));
                    Ok(Some(format!("Escrow {} is now {}", released.id, released.status)))
                }
                EscrowCommand::Refund {
                    id,
                    reason,
                    confirm,
                } => {
                    let form = EscrowRefundForm {
                        escrow_id: id,
                        reason,
                        confirmed: confirm,
                    };
                    let refunded = escrows.refund(&form).await?;
                    Ok(Some(format!("Escrow {} is now {}", refunded.id, refunded.status)))
                }
            }
        }

        Command::Notifications { action } => {
            let user_id = client.session().user_id().await?;
            match action {
                NotificationsCommand::List => {
                    let notifications = client.notifications(&user_id).await?;
                    if notifications.is_empty() {
                        println!("No notifications");
                    }
                    for notification in &notifications {
                        println!("{}", format::render_notification(notification));
                    }
                    Ok(None)
                }
                NotificationsCommand::Unread => {
                    let count = client.unread_count(&user_id).await?;
                    println!("🔔 {} unread", count);
                    Ok(None)
                }
                NotificationsCommand::Read { id } => {
                    client.mark_read(&id).await?;
                    Ok(Some("Notification marked as read".to_string()))
                }
                NotificationsCommand::ReadAll => {
                    client.mark_all_read(&user_id).await?;
                    Ok(Some("All notifications marked as read".to_string()))
                }
                NotificationsCommand::Watch => {
                    let period = Duration::from_secs(settings.provider.poll_interval_seconds());
                    tracing::info!("🔍 Polling unread notifications every {:?}", period);
                    let handle = spawn_unread_poller(Arc::new(client), user_id, period)?;
                    let mut updates = handle.subscribe();
                    loop {
                        tokio::select! {
                            changed = updates.changed() => {
                                if changed.is_err() {
                                    break;
                                }
                                if let Some(count) = *updates.borrow_and_update() {
                                    println!("{}", Toast::info(format!("🔔 {} unread", count)));
                                }
                            }
                            _ = tokio::signal::ctrl_c() => break,
                        }
                    }
                    handle.stop();
                    Ok(None)
                }
            }
        }

        Command::Payment { action } => {
            let user_id = client.session().user_id().await?;
            let wallet = WalletActions::new(client);
            match action {
                PaymentCommand::Deposit { amount, method } => {
                    let receipt = wallet.top_up(&user_id, amount, &method).await?;
                    Ok(Some(format!(
                        "Deposit {} ({}): {}",
                        receipt.transaction_id,
                        format::format_money(receipt.amount, &currency),
                        receipt.status
                    )))
                }
                PaymentCommand::Withdraw { amount, method } => {
                    let summary = wallet.summary(&user_id).await?;
                    let form = WithdrawalForm {
                        user_id: user_id.clone(),
                        amount,
                        method,
                        balance: &summary,
                    };
                    let receipt = wallet.withdraw(&form).await?;
                    Ok(Some(format!(
                        "Withdrawal {} ({}): {}",
                        receipt.transaction_id,
                        format::format_money(receipt.amount, &currency),
                        receipt.status
                    )))
                }
            }
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("Running {} against {}", cli.command.label(), cli.base_url());
    let action = cli.command.label();

    let result = run(cli).await;
    let toast = Toast::surface(action, &result, |message| message.clone().unwrap_or_default());

    let err: PeerPayError = match result {
        Ok(_) => {
            if !toast.message.is_empty() {
                println!("{}", toast);
            }
            return;
        }
        Err(e) => e,
    };

    eprintln!("{}", toast);
    if let PeerPayError::FormValidation { errors } = &err {
        for field_error in errors.iter().skip(1) {
            eprintln!("   {}", field_error.message);
        }
    }
    eprintln!("💡 Suggestion: {}", err.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match err.severity() {
        ErrorSeverity::Low => 2,      // 輸入錯誤
        ErrorSeverity::Medium => 2,   // 連線問題
        ErrorSeverity::High => 1,     // 後端拒絕
        ErrorSeverity::Critical => 3, // 設定或系統錯誤
    };
    std::process::exit(exit_code);
}
