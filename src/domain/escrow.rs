//! Escrow fee model.
//!
//! The platform charges a flat 5% on top of the job amount when the employer
//! funds the escrow, and the same fee is withheld from the escrowed amount when
//! it is released to the student.

use crate::utils::error::{PeerPayError, Result};
use rust_decimal::{Decimal, RoundingStrategy};

/// 平台手續費率 5%
pub const PLATFORM_FEE_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Rounds to cents, half away from zero.
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Deposit-side view of an escrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscrowTotals {
    pub job_amount: Decimal,
    pub platform_fee: Decimal,
    pub total_to_deposit: Decimal,
}

impl EscrowTotals {
    pub fn for_job_amount(job_amount: Decimal) -> Result<Self> {
        if job_amount < Decimal::ZERO {
            return Err(PeerPayError::InvalidAmount {
                message: format!("job amount {} cannot be negative", job_amount),
            });
        }

        let platform_fee = round2(job_amount * PLATFORM_FEE_RATE);
        Ok(Self {
            job_amount,
            platform_fee,
            total_to_deposit: job_amount + platform_fee,
        })
    }
}

/// Release-side view. The fee is the one the backend charged at deposit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseTotals {
    pub escrowed_amount: Decimal,
    pub platform_fee: Decimal,
    pub student_receives: Decimal,
}

impl ReleaseTotals {
    pub fn new(escrowed_amount: Decimal, platform_fee: Decimal) -> Result<Self> {
        if escrowed_amount < Decimal::ZERO || platform_fee < Decimal::ZERO {
            return Err(PeerPayError::InvalidAmount {
                message: format!(
                    "escrowed amount {} and platform fee {} must not be negative",
                    escrowed_amount, platform_fee
                ),
            });
        }
        if platform_fee > escrowed_amount {
            return Err(PeerPayError::InvalidAmount {
                message: format!(
                    "platform fee {} exceeds escrowed amount {}",
                    platform_fee, escrowed_amount
                ),
            });
        }

        Ok(Self {
            escrowed_amount,
            platform_fee,
            student_receives: escrowed_amount - platform_fee,
        })
    }

    pub fn for_escrow(escrow: &crate::domain::model::Escrow) -> Result<Self> {
        Self::new(escrow.amount, escrow.platform_fee)
    }
}
