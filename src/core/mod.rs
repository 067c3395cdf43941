pub mod actions;
pub mod client;
pub mod poller;
pub mod session;

pub use crate::domain::ports::{
    AuthGateway, ConfigProvider, EscrowGateway, JobGateway, NotificationGateway, PaymentGateway,
    WalletGateway,
};
pub use crate::utils::error::Result;
