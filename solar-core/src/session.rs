//! Estimate editing session.
//!
//! Holds the state an estimate form works on and decides, per event, what to
//! recompute. Consumption changes re-run the whole calculation and resync the
//! inversor line; item edits re-run it with the items as given; discount and
//! increase edits only redo the final total and payback.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::{
    Adjustment, EstimateCalculator, EstimateError, ItemSync, calc_final_total, pay_back,
};
use crate::models::{CalcResult, ConsumptionInput, LineItem, Payback};

/// Something the user (or a page load) did to the estimate.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A stored estimate was opened. Its items are priced as saved.
    Loaded {
        consumption: ConsumptionInput,
        items: Vec<LineItem>,
        discount: Adjustment,
        increase: Adjustment,
    },
    /// The consumption dialog was confirmed.
    ConsumptionChanged(ConsumptionInput),
    /// A line item was added, edited, reordered or removed.
    ItemsChanged(Vec<LineItem>),
    DiscountChanged(Adjustment),
    IncreaseChanged(Adjustment),
}

/// Everything the form shows after a successful calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimateOutcome {
    pub result: CalcResult,
    pub final_total: Decimal,
    pub payback: Payback,
}

#[derive(Debug, Clone, Default)]
pub struct EstimateSession {
    calculator: EstimateCalculator,
    consumption: Option<ConsumptionInput>,
    items: Vec<LineItem>,
    discount: Adjustment,
    increase: Adjustment,
    outcome: Option<EstimateOutcome>,
    error: Option<EstimateError>,
}

impl EstimateSession {
    pub fn new(calculator: EstimateCalculator) -> Self {
        Self {
            calculator,
            ..Default::default()
        }
    }

    /// Applies an event and recomputes whatever depends on it.
    pub fn apply(
        &mut self,
        event: SessionEvent,
    ) {
        match event {
            SessionEvent::Loaded {
                consumption,
                items,
                discount,
                increase,
            } => {
                self.consumption = Some(consumption);
                self.items = items;
                self.discount = discount;
                self.increase = increase;
                self.recalculate(ItemSync::Keep);
            }
            SessionEvent::ConsumptionChanged(consumption) => {
                self.consumption = Some(consumption);
                self.recalculate(ItemSync::Update);
            }
            SessionEvent::ItemsChanged(items) => {
                self.items = items;
                self.recalculate(ItemSync::Keep);
            }
            SessionEvent::DiscountChanged(discount) => {
                self.discount = discount;
                self.refresh_totals();
            }
            SessionEvent::IncreaseChanged(increase) => {
                self.increase = increase;
                self.refresh_totals();
            }
        }
    }

    fn recalculate(
        &mut self,
        sync: ItemSync,
    ) {
        let Some(consumption) = &self.consumption else {
            return;
        };

        match self.calculator.calculate(consumption, &self.items, sync) {
            Ok(calculation) => {
                self.items = calculation.items;
                self.error = None;
                self.outcome = Some(self.outcome_for(calculation.result));
            }
            Err(error) => {
                debug!(%error, "estimate calculation failed");
                self.error = Some(error);
            }
        }
    }

    fn refresh_totals(&mut self) {
        if let Some(outcome) = self.outcome.take() {
            self.outcome = Some(self.outcome_for(outcome.result));
        }
    }

    fn outcome_for(
        &self,
        result: CalcResult,
    ) -> EstimateOutcome {
        let final_total =
            calc_final_total(result.system_initial_price, self.discount, self.increase);
        let payback = pay_back(result.yearly_paid, final_total);
        EstimateOutcome {
            result,
            final_total,
            payback,
        }
    }

    pub fn consumption(&self) -> Option<&ConsumptionInput> {
        self.consumption.as_ref()
    }

    /// Items as they currently stand, including any synced inversor line.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn discount(&self) -> Adjustment {
        self.discount
    }

    pub fn increase(&self) -> Adjustment {
        self.increase
    }

    /// Last successful outcome. It is kept when a later calculation fails so
    /// the form keeps showing figures next to the error.
    pub fn outcome(&self) -> Option<&EstimateOutcome> {
        self.outcome.as_ref()
    }

    /// Error from the most recent calculation, if it failed.
    pub fn error(&self) -> Option<&EstimateError> {
        self.error.as_ref()
    }

    pub fn capacity_not_found(&self) -> bool {
        matches!(self.error, Some(EstimateError::CapacityNotFound { .. }))
    }

    /// An estimate can be saved once it has been calculated and the latest
    /// calculation succeeded.
    pub fn can_submit(&self) -> bool {
        self.outcome.is_some() && self.error.is_none()
    }
}
