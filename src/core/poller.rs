use crate::domain::ports::NotificationGateway;
use crate::utils::error::{PeerPayError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Handle to a running unread-count poller. Dropping it stops the polling.
pub struct PollerHandle {
    receiver: watch::Receiver<Option<u64>>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// 最近一次成功取得的未讀數；尚未成功過則為 `None`
    pub fn latest(&self) -> Option<u64> {
        *self.receiver.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<u64>> {
        self.receiver.clone()
    }

    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Polls the unread-notification count every `period`.
///
/// Each tick fires its own request whether or not the previous one has
/// finished, so slow responses can overlap. Failed polls are logged and keep
/// the last published count. A zero `period` is rejected before anything
/// is spawned.
pub fn spawn_unread_poller<G>(
    gateway: Arc<G>,
    user_id: String,
    period: Duration,
) -> Result<PollerHandle>
where
    G: NotificationGateway + ?Sized + 'static,
{
    if period.is_zero() {
        return Err(PeerPayError::InvalidConfigValueError {
            field: "poll_interval".to_string(),
            value: format!("{:?}", period),
            reason: "must be greater than zero".to_string(),
        });
    }

    let (sender, receiver) = watch::channel(None);

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            if sender.is_closed() {
                break;
            }

            let gateway = Arc::clone(&gateway);
            let sender = sender.clone();
            let user_id = user_id.clone();
            tokio::spawn(async move {
                match gateway.unread_count(&user_id).await {
                    Ok(count) => {
                        tracing::debug!("Unread notifications for {}: {}", user_id, count);
                        sender.send_replace(Some(count));
                    }
                    Err(e) => {
                        tracing::warn!("Unread-count poll failed: {}", e);
                    }
                }
            });
        }
    });

    Ok(PollerHandle { receiver, task })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Notification;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU64, Ordering};

    struct CountingGateway {
        calls: AtomicU64,
        fail: bool,
    }

    #[async_trait]
    impl NotificationGateway for CountingGateway {
        async fn notifications(&self, _user_id: &str) -> Result<Vec<Notification>> {
            Ok(vec![])
        }

        async fn unread_count(&self, _user_id: &str) -> Result<u64> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail {
                Err(PeerPayError::ApiError {
                    status: 503,
                    message: "unavailable".to_string(),
                })
            } else {
                Ok(n)
            }
        }

        async fn mark_read(&self, _notification_id: &str) -> Result<()> {
            Ok(())
        }

        async fn mark_all_read(&self, _user_id: &str) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_poller_publishes_latest_count() {
        let gateway = Arc::new(CountingGateway {
            calls: AtomicU64::new(0),
            fail: false,
        });
        let handle =
            spawn_unread_poller(gateway.clone(), "stu-1".to_string(), Duration::from_millis(20))
                .unwrap();
        let mut updates = handle.subscribe();

        tokio::time::timeout(Duration::from_secs(2), async {
            while updates.borrow_and_update().unwrap_or(0) < 3 {
                updates.changed().await.unwrap();
            }
        })
        .await
        .expect("poller should publish at least three counts");

        assert!(handle.latest().is_some());
        assert!(gateway.calls.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test]
    async fn test_failed_polls_keep_previous_value_and_keep_polling() {
        let gateway = Arc::new(CountingGateway {
            calls: AtomicU64::new(0),
            fail: true,
        });
        let handle =
            spawn_unread_poller(gateway.clone(), "stu-1".to_string(), Duration::from_millis(10))
                .unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(handle.latest(), None);
        assert!(gateway.calls.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test]
    async fn test_stop_ends_polling() {
        let gateway = Arc::new(CountingGateway {
            calls: AtomicU64::new(0),
            fail: false,
        });
        let handle =
            spawn_unread_poller(gateway.clone(), "stu-1".to_string(), Duration::from_millis(10))
                .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.stop();

        tokio::time::sleep(Duration::from_millis(20)).await;
        let after_stop = gateway.calls.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(gateway.calls.load(Ordering::SeqCst), after_stop);
    }

    #[tokio::test]
    async fn test_zero_period_is_rejected_without_polling() {
        let gateway = Arc::new(CountingGateway {
            calls: AtomicU64::new(0),
            fail: false,
        });

        let result = spawn_unread_poller(gateway.clone(), "stu-1".to_string(), Duration::ZERO);

        assert!(matches!(
            result,
            Err(PeerPayError::InvalidConfigValueError { ref field, .. }) if field == "poll_interval"
        ));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }
}
