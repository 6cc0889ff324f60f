pub mod calculations;
pub mod models;
pub mod numeric;
pub mod session;

pub use calculations::{
    Adjustment, EstimateCalculator, EstimateError, ItemSync, SizingConfig, calc_final_total,
    calculate, pay_back,
};
pub use models::*;
pub use session::{EstimateOutcome, EstimateSession, SessionEvent};
