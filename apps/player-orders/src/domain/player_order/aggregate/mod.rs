//! Player Order Aggregate

mod player_order;

pub use player_order::{MAX_CANCEL_REASON_CHARS, OrderBudget, OrderGuarantees, PlayerOrder};
