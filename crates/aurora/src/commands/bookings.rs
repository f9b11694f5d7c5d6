//! Booking lookups and the shared booking detail view.

use tabled::Tabled;

use aurora_core::{Booking, Storefront, TravelerInfo};

use crate::cli::{BookingsArgs, BookingsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct TravelerRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
}

impl TravelerRow {
    fn new(index: usize, t: &TravelerInfo) -> Self {
        Self {
            index: index + 1,
            name: t.name.clone(),
            email: t.email.clone(),
            phone: t.phone.clone(),
        }
    }
}

/// Detail view of a booking, with its travelers as a table.
pub fn detail(b: &Booking, color: bool) -> String {
    let mut out = output::render_fields(&[
        ("ID", b.id.clone()),
        (
            "Booked",
            format!("{} ({})", b.reference.label(), b.reference.booking_type()),
        ),
        ("Dates", format!("{} to {}", b.start_date, b.end_date)),
        (
            "Party",
            format!("{} adult(s), {} child(ren)", b.adults, b.children),
        ),
        ("Total", b.total_price.to_string()),
        ("Payment", output::payment_status(b.payment_status, color)),
        ("Payment ID", b.payment_id.clone().unwrap_or_default()),
        ("Status", b.status.to_string()),
        ("Requests", b.special_requests.clone().unwrap_or_default()),
        (
            "Created",
            b.created_at
                .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
                .unwrap_or_default(),
        ),
    ]);

    if !b.travelers.is_empty() {
        let rows: Vec<TravelerRow> = b
            .travelers
            .iter()
            .enumerate()
            .map(|(i, t)| TravelerRow::new(i, t))
            .collect();
        out.push_str("\n\n");
        out.push_str(&output::heading("Travelers", color));
        out.push('\n');
        out.push_str(&output::render_table(&rows));
    }
    out
}

pub async fn handle(
    store: &Storefront,
    args: BookingsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        BookingsCommand::Show { id } => {
            let booking = store.booking(&id).await?;
            let color = output::should_color(&global.color);
            let out = output::render_single(
                &global.output,
                &booking,
                |b| detail(b, color),
                |b| b.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
