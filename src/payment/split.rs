use serde::Serialize;

use super::PaymentError;

pub const CURRENCY: &str = "INR";

/// Paise per rupee.
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Share of every order routed to the shop's linked account; the rest is platform commission.
pub const SHOP_SHARE_PERCENT: i64 = 90;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transfer {
    pub account: String,
    pub amount: i64,
    pub currency: &'static str,
    pub on_hold: u8,
}

/// Order body sent to the provider, amounts in minor units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRequest {
    pub amount: i64,
    pub currency: &'static str,
    pub transfers: Vec<Transfer>,
}

impl OrderRequest {
    pub fn split(amount: f64, shop_account_id: &str) -> Result<Self, PaymentError> {
        let minor = (amount * MINOR_UNITS_PER_MAJOR as f64).round();
        // `as i64` saturates, so anything outside the range must be refused before the cast.
        if !minor.is_finite() || minor >= i64::MAX as f64 || minor <= i64::MIN as f64 {
            return Err(PaymentError::InvalidAmount(amount));
        }

        let total = minor as i64;
        let shop_share = (i128::from(total) * i128::from(SHOP_SHARE_PERCENT) / 100) as i64;

        Ok(Self {
            amount: total,
            currency: CURRENCY,
            transfers: vec![Transfer {
                account: shop_account_id.to_string(),
                amount: shop_share,
                currency: CURRENCY,
                on_hold: 0,
            }],
        })
    }

    pub fn shop_share(&self) -> i64 {
        self.transfers.iter().map(|t| t.amount).sum()
    }

    /// What stays on the platform account once transfers settle.
    pub fn platform_share(&self) -> i64 {
        self.amount - self.shop_share()
    }
}
