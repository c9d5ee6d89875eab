// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod complaint;
mod error;
mod filter;
mod paged;
mod suggestion;
mod tyfcb;

pub use complaint::{Complaint, ComplaintCategory, ComplaintStatus};
pub use error::DomainError;
pub use filter::{DEFAULT_PAGE_SIZE, DateRange, FilterState};
pub use paged::PagedResult;
pub use suggestion::{Suggestion, SuggestionCategory, SuggestionStatus};
pub use tyfcb::{TyfcbMemberSummary, compact_inr};
