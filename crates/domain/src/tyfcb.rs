// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! TYFCB ("Thank You For Closed Business") per-member referral-value
//! aggregates.
//!
//! Summaries are read-only reporting data: they carry no status lifecycle
//! and cannot be deleted from the console.

use serde::{Deserialize, Serialize};

/// Aggregated TYFCB figures for a single member over the queried period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TyfcbMemberSummary {
    /// Name of the member the figures are aggregated for.
    pub member_name: String,
    /// The chapter the member belongs to.
    pub chapter_name: String,
    /// Sum of all closed-business amounts, in INR.
    pub total_amount: f64,
    /// Number of closed-business transactions in the period.
    pub transaction_count: u64,
    /// Mean transaction amount, in INR.
    pub average_amount: f64,
    /// Date of the earliest transaction in the period, if any.
    pub first_transaction: Option<String>,
    /// Date of the latest transaction in the period, if any.
    pub last_transaction: Option<String>,
}

/// Formats an INR amount in compact Indian notation.
///
/// Amounts at or above one crore render as `₹x.xxCr`, above one lakh as
/// `₹x.xxL`, above one thousand as `₹x.xxK`, and smaller amounts as the
/// plain rupee value.
#[must_use]
pub fn compact_inr(amount: f64) -> String {
    if amount >= 10_000_000.0 {
        format!("₹{:.2}Cr", amount / 10_000_000.0)
    } else if amount >= 100_000.0 {
        format!("₹{:.2}L", amount / 100_000.0)
    } else if amount >= 1_000.0 {
        format!("₹{:.2}K", amount / 1_000.0)
    } else {
        format!("₹{amount:.0}")
    }
}
