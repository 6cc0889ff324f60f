mod calc_result;
mod consumption;
mod line_item;
mod panel;

pub use calc_result::{CalcResult, Calculation, Payback};
pub use consumption::{ConsumptionInput, MONTHS, RawConsumption};
pub use line_item::{ItemKind, LineItem};
pub use panel::{Panel, PriceTier, RoofOrientation};
