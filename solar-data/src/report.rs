//! Plain-text rendering of a calculated estimate.

use std::fmt;

use rust_decimal::Decimal;
use solar_core::{
    Adjustment, EstimateCalculator, EstimateError, EstimateOutcome, EstimateSession, LineItem,
    Payback, SessionEvent,
};

use crate::estimate_loader::EstimateInput;

/// An estimate after it has been run through an [`EstimateSession`].
#[derive(Debug, Clone)]
pub struct EstimateReport {
    pub name: String,
    pub items: Vec<LineItem>,
    pub discount: Adjustment,
    pub increase: Adjustment,
    pub outcome: Option<EstimateOutcome>,
    pub error: Option<EstimateError>,
}

impl EstimateReport {
    /// Opens the estimate as stored, then re-confirms its consumption when
    /// `sync_inversor` is set so the inversor line follows the chosen tier.
    pub fn build(
        calculator: EstimateCalculator,
        input: &EstimateInput,
        items: Vec<LineItem>,
        sync_inversor: bool,
    ) -> Self {
        let mut session = EstimateSession::new(calculator);
        session.apply(SessionEvent::Loaded {
            consumption: input.consumption.clone(),
            items,
            discount: input.discount,
            increase: input.increase,
        });
        if sync_inversor {
            session.apply(SessionEvent::ConsumptionChanged(input.consumption.clone()));
        }

        Self {
            name: input.name.clone(),
            items: session.items().to_vec(),
            discount: session.discount(),
            increase: session.increase(),
            outcome: session.outcome().cloned(),
            error: session.error().cloned(),
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.error.is_some()
    }
}

fn adjustment(value: Adjustment) -> String {
    match value {
        Adjustment::Percent(rate) => format!("{rate}%"),
        Adjustment::Amount(amount) => format!("{amount:.2}"),
    }
}

fn line_label(item: &LineItem) -> String {
    if item.percent {
        format!("{} ({}%)", item.name, item.percentage)
    } else {
        format!("{} ({} x {:.2})", item.name, item.amount, item.price)
    }
}

impl fmt::Display for EstimateReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "== {} ==", self.name)?;

        if let Some(error) = &self.error {
            writeln!(f, "BLOCKED: {error}")?;
        }

        let Some(outcome) = &self.outcome else {
            return Ok(());
        };
        let result = &outcome.result;

        writeln!(f, "Average consumption:  {} kWh", result.months_average_kwh)?;
        writeln!(f, "Forecast consumption: {} kWh", result.final_average_kwh)?;
        writeln!(
            f,
            "Current bill:         {:.2} / month, {:.2} / year",
            result.monthly_paid, result.yearly_paid
        )?;
        writeln!(
            f,
            "System:               {} panels, {} kWp (required {} kWp)",
            result.panels_amount, result.final_system_capacity_kwp, result.system_capacity_kwp
        )?;
        writeln!(
            f,
            "Price tier:           {} kWp, {} at {:.2}",
            result.tier.potency_kwp, result.tier.inversor, result.tier.price
        )?;
        writeln!(
            f,
            "Generation:           {} kWh / month, {} kWh / year",
            result.monthly_generated_energy, result.yearly_generated_energy
        )?;
        writeln!(f, "CO2 reduction:        {} kg / year", result.co2_reduction)?;
        writeln!(f, "Area:                 {} m2", result.system_area)?;

        writeln!(f, "Items:")?;
        for (item, total) in self.items.iter().zip(&result.line_totals) {
            writeln!(f, "  {:<40} {:>12.2}", line_label(item), total)?;
        }

        writeln!(f, "Subtotal:             {:.2}", result.system_initial_price)?;
        if self.discount.value() != Decimal::ZERO {
            writeln!(f, "Discount:             {}", adjustment(self.discount))?;
        }
        if self.increase.value() != Decimal::ZERO {
            writeln!(f, "Increase:             {}", adjustment(self.increase))?;
        }
        writeln!(f, "Final total:          {:.2}", outcome.final_total)?;

        match outcome.payback {
            Payback::Period { months, years } => {
                writeln!(f, "Payback:              {months} months ({years} years)")
            }
            Payback::Undefined => writeln!(f, "Payback:              n/a"),
        }
    }
}
