pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use crate::core::{
    actions::{AccountActions, EscrowActions, WalletActions},
    client::PeerPayClient,
    poller::{spawn_unread_poller, PollerHandle},
    session::Session,
};
pub use domain::escrow::{EscrowTotals, ReleaseTotals, PLATFORM_FEE_RATE};
pub use utils::error::{PeerPayError, Result};
pub use utils::toast::Toast;
