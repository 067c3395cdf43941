use crate::domain::model::WalletBalance;
use rust_decimal::Decimal;

/// 錢包顯示用的彙總數字
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceSummary {
    pub available: Decimal,
    pub escrowed: Decimal,
    pub total: Decimal,
    pub total_earnings: Decimal,
    pub total_spent: Decimal,
    pub net: Decimal,
    pub currency: String,
}

impl BalanceSummary {
    pub fn can_withdraw(&self, amount: Decimal) -> bool {
        amount > Decimal::ZERO && amount <= self.available
    }
}

impl From<&WalletBalance> for BalanceSummary {
    fn from(balance: &WalletBalance) -> Self {
        Self {
            available: balance.available_balance,
            escrowed: balance.escrowed_balance,
            total: balance.available_balance + balance.escrowed_balance,
            total_earnings: balance.total_earnings,
            total_spent: balance.total_spent,
            net: balance.total_earnings - balance.total_spent,
            currency: balance.currency.clone(),
        }
    }
}
