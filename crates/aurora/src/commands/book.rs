//! One-shot booking form: price with the flat rate and submit as pending.

use aurora_core::{BookingDraft, FlatRatePricing, Storefront, TravelerInfo};

use crate::cli::{BookArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::{bookings, util};

/// Parse a `NAME,EMAIL[,PHONE]` traveler flag.
fn parse_traveler(raw: &str) -> Result<TravelerInfo, CliError> {
    let mut parts = raw.splitn(3, ',').map(str::trim);
    let (Some(name), Some(email)) = (parts.next(), parts.next()) else {
        return Err(CliError::Validation {
            field: "traveler".into(),
            reason: format!("expected NAME,EMAIL[,PHONE], got '{raw}'"),
        });
    };
    Ok(TravelerInfo {
        name: name.to_owned(),
        email: email.to_owned(),
        phone: parts.next().unwrap_or_default().to_owned(),
    })
}

fn fill_travelers(draft: &mut BookingDraft, raw: &[String]) -> Result<(), CliError> {
    for (index, entry) in raw.iter().enumerate() {
        let traveler = parse_traveler(entry)?;
        if index > 0 {
            draft.add_traveler();
        }
        if let Some(slot) = draft.traveler_mut(index) {
            *slot = traveler;
        }
    }
    Ok(())
}

pub async fn handle(
    store: &Storefront,
    args: BookArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let target = util::with_spinner(
        "Loading trip…",
        global,
        store.target(util::booking_type(args.kind), &args.id),
    )
    .await?;

    let mut draft = store.new_draft(target);
    draft.start_date = util::parse_opt_date("start", args.trip.start.as_deref())?;
    draft.end_date = util::parse_opt_date("end", args.trip.end.as_deref())?;
    draft.adults = args.trip.adults;
    draft.children = args.trip.children;
    draft.special_requests = args.requests.unwrap_or_default();
    fill_travelers(&mut draft, &args.travelers)?;

    // Reject before prompting.
    draft.validate_details().map_err(aurora_core::ValidationError::from)?;
    draft.validate_travelers()?;

    let quote = draft
        .quote(&FlatRatePricing::default())
        .map_err(aurora_core::ValidationError::from)?;
    let prompt = format!(
        "Book {} for {} adult(s) and {} child(ren), total {}?",
        draft.target().display_name(),
        draft.adults,
        draft.children,
        quote.total
    );
    if !util::confirm(&prompt, global.yes)? {
        eprintln!("Booking cancelled.");
        return Ok(());
    }

    let booking =
        util::with_spinner("Submitting booking…", global, store.quick_booking(&draft)).await?;

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &booking,
        |b| bookings::detail(b, color),
        |b| b.id.clone(),
    );
    output::print_output(&out, global.quiet);
    if !global.quiet {
        eprintln!("✓ Booking {} submitted (payment pending)", booking.id);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn traveler_flag_accepts_optional_phone() {
        let t = parse_traveler("Ada Lovelace, ada@example.com").unwrap();
        assert_eq!(t.name, "Ada Lovelace");
        assert_eq!(t.email, "ada@example.com");
        assert!(t.phone.is_empty());

        let t = parse_traveler("Ada,ada@example.com,+44 20 7946 0000").unwrap();
        assert_eq!(t.phone, "+44 20 7946 0000");

        assert!(parse_traveler("Ada").is_err());
    }
}
