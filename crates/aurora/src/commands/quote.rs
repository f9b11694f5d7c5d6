//! Offline price quotes.

use serde::Serialize;

use aurora_core::pricing::trip_days;
use aurora_core::{
    FlatRatePricing, Money, PriceQuote, PricedItem, PricingInput, PricingPolicy, TieredPricing,
};

use crate::cli::{GlobalOpts, PolicyArg, QuoteArgs, QuoteCommand, TripArgs};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Serialize)]
struct QuoteView {
    policy: &'static str,
    adults: u32,
    children: u32,
    #[serde(flatten)]
    quote: PriceQuote,
}

fn detail(view: &QuoteView) -> String {
    let factor = if view.quote.duration_factor_pct == 100 {
        String::new()
    } else {
        format!("{}%", view.quote.duration_factor_pct)
    };
    output::render_fields(&[
        ("Policy", view.policy.to_owned()),
        (
            "Days",
            view.quote.days.map(|d| d.to_string()).unwrap_or_default(),
        ),
        ("Duration factor", factor),
        (
            "Adults",
            format!("{} x {}", view.adults, view.quote.adult_price),
        ),
        (
            "Children",
            format!("{} x {}", view.children, view.quote.child_price),
        ),
        ("Total", view.quote.total.to_string()),
    ])
}

fn input(item: PricedItem, trip: &TripArgs) -> Result<PricingInput, CliError> {
    let start_date = util::parse_opt_date("start", trip.start.as_deref())?;
    let end_date = util::parse_opt_date("end", trip.end.as_deref())?;
    if trip_days(start_date, end_date).is_none() && start_date.is_some() && end_date.is_some() {
        tracing::warn!("end date precedes start date; pricing without a trip length");
    }
    Ok(PricingInput {
        item,
        start_date,
        end_date,
        adults: trip.adults,
        children: trip.children,
    })
}

pub fn handle(args: &QuoteArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let (item, trip) = match &args.command {
        QuoteCommand::Destination { trip } => (PricedItem::Destination, trip),
        QuoteCommand::Package { price, trip } => {
            let price = Money::from_major_f64(*price)
                .filter(|m| m.minor() >= 0)
                .ok_or_else(|| CliError::Validation {
                    field: "price".into(),
                    reason: "must be a non-negative amount".into(),
                })?;
            (PricedItem::Package { price }, trip)
        }
    };
    let input = input(item, trip)?;

    let (policy, quote) = match args.policy {
        PolicyArg::Checkout => ("checkout", TieredPricing::default().quote(&input)),
        PolicyArg::Form => ("form", FlatRatePricing::default().quote(&input)),
    };
    let quote = quote.map_err(|e| CliError::Validation {
        field: "party".into(),
        reason: e.to_string(),
    })?;
    let view = QuoteView {
        policy,
        adults: input.adults,
        children: input.children,
        quote,
    };

    let out = output::render_single(&global.output, &view, detail, |v| {
        v.quote.total.to_string()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
