//! Sizing and pricing calculations for solar estimates.
//!
//! The calculator turns a customer's consumption history, the selected
//! panel's price catalog and the estimate's line items into system size,
//! production figures and a subtotal. Final total and payback are separate
//! steps, since the form recomputes them on their own whenever the discount
//! or increase changes.

pub mod catalog;
pub mod common;
pub mod config;
pub mod estimate;
pub mod items;
pub mod payback;
pub mod totals;

pub use catalog::select_tier;
pub use config::{AveragingWindow, SizingConfig};
pub use estimate::{EstimateCalculator, EstimateError, calculate};
pub use items::{ItemSync, PricedItems, price_items, sync_inversor};
pub use payback::pay_back;
pub use totals::{Adjustment, calc_final_total};
