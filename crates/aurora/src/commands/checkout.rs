//! Interactive four-step checkout wizard.
//!
//! Drives an [`aurora_core::Checkout`] from the terminal. Every transition
//! error lands in the checkout's banner and the current screen is shown
//! again; only a payment that went through without being recorded ends
//! the wizard with an error.

use std::io::IsTerminal;

use chrono::NaiveDate;
use dialoguer::{Input, Select};
use secrecy::{ExposeSecret, SecretString};
use tabled::Tabled;
use tracing::debug;

use aurora_core::{
    BackOutcome, CardHandle, Checkout, CheckoutError, CheckoutStep, IntentStatus, PaymentConfirmation,
    PaymentIntent, PaymentMethodDetails, PaymentProvider, PaymentProviderError, Storefront,
    TravelerInfo,
};

use crate::cli::{CheckoutArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::{bookings, util};

// ── Payment provider ────────────────────────────────────────────────

/// Card payments confirmed by the operator at a payment terminal.
///
/// The operator charges the card out of band and reports back the payment
/// intent id and final status. An empty id aborts the payment.
struct ConsolePaymentProvider {
    public_key: Option<String>,
}

const INTENT_STATUSES: [IntentStatus; 7] = [
    IntentStatus::Succeeded,
    IntentStatus::Processing,
    IntentStatus::RequiresAction,
    IntentStatus::RequiresPaymentMethod,
    IntentStatus::RequiresConfirmation,
    IntentStatus::RequiresCapture,
    IntentStatus::Canceled,
];

fn provider_err(e: impl std::fmt::Display) -> PaymentProviderError {
    PaymentProviderError {
        message: e.to_string(),
    }
}

/// Only the intent id part of a client secret (`pi_xxx_secret_yyy`) is shown.
fn intent_reference(secret: &SecretString) -> &str {
    let raw = secret.expose_secret();
    raw.split_once("_secret_").map_or("(hidden)", |(id, _)| id)
}

impl PaymentProvider for ConsolePaymentProvider {
    async fn confirm_card_payment(
        &self,
        client_secret: &SecretString,
        details: &PaymentMethodDetails,
    ) -> Result<PaymentConfirmation, PaymentProviderError> {
        let Some(ref key) = self.public_key else {
            return Err(provider_err(
                "no payment key configured for this profile \
                 (aurora config set payment_public_key <key>)",
            ));
        };
        debug!(card = %details.card.0, key_len = key.len(), "confirming card payment");

        eprintln!("  Payment intent: {}", intent_reference(client_secret));
        if let Some(ref name) = details.billing.name {
            eprintln!("  Billing name:   {name}");
        }
        if let Some(ref email) = details.billing.email {
            eprintln!("  Billing email:  {email}");
        }

        let id: String = Input::new()
            .with_prompt("Payment intent ID from the terminal (empty to abort)")
            .allow_empty(true)
            .interact_text()
            .map_err(provider_err)?;
        let id = id.trim().to_owned();
        if id.is_empty() {
            return Ok(PaymentConfirmation::Failed {
                message: "The payment was cancelled at the terminal.".into(),
            });
        }

        let labels: Vec<String> = INTENT_STATUSES.iter().map(ToString::to_string).collect();
        let selection = Select::new()
            .with_prompt("Payment status")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(provider_err)?;

        Ok(PaymentConfirmation::Intent(PaymentIntent {
            id,
            status: INTENT_STATUSES[selection],
        }))
    }
}

// ── Screens ─────────────────────────────────────────────────────────

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

fn progress(current: CheckoutStep, color: bool) -> String {
    CheckoutStep::ALL
        .iter()
        .map(|step| {
            let label = format!("{}. {step}", step.number());
            if *step == current {
                output::heading(&label, color)
            } else {
                label
            }
        })
        .collect::<Vec<_>>()
        .join("  >  ")
}

fn prompt_date(label: &str, current: Option<NaiveDate>) -> Result<Option<NaiveDate>, CliError> {
    let raw: String = Input::new()
        .with_prompt(format!("{label} (YYYY-MM-DD)"))
        .with_initial_text(current.map(|d| d.to_string()).unwrap_or_default())
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), &'static str> {
            if input.trim().is_empty()
                || NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").is_ok()
            {
                Ok(())
            } else {
                Err("expected YYYY-MM-DD")
            }
        })
        .interact_text()
        .map_err(util::prompt_err)?;
    if raw.trim().is_empty() {
        Ok(None)
    } else {
        util::parse_date(label, &raw).map(Some)
    }
}

fn prompt_count(label: &str, current: u32) -> Result<u32, CliError> {
    Input::new()
        .with_prompt(label)
        .default(current)
        .interact_text()
        .map_err(util::prompt_err)
}

fn prompt_traveler(current: &TravelerInfo) -> Result<TravelerInfo, CliError> {
    let field = |label: &str, value: &str, allow_empty: bool| -> Result<String, CliError> {
        Input::new()
            .with_prompt(label)
            .with_initial_text(value)
            .allow_empty(allow_empty)
            .interact_text()
            .map_err(util::prompt_err)
    };
    Ok(TravelerInfo {
        name: field("Full name", &current.name, false)?,
        email: field("Email", &current.email, false)?,
        phone: field("Phone (optional)", &current.phone, true)?,
    })
}

fn choose(prompt: &str, items: &[&str]) -> Result<usize, CliError> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(util::prompt_err)
}

/// Outcome of one screen.
enum Nav {
    Stay,
    Back,
    Leave,
}

fn details_screen(checkout: &mut Checkout) -> Result<Nav, CliError> {
    if checkout.booking().is_none() {
        let draft = checkout.draft_mut()?;
        draft.start_date = prompt_date("Start date", draft.start_date)?;
        draft.end_date = prompt_date("End date", draft.end_date)?;
        draft.adults = prompt_count("Adults", draft.adults)?;
        draft.children = prompt_count("Children", draft.children)?;
        draft.special_requests = Input::new()
            .with_prompt("Special requests (optional)")
            .with_initial_text(draft.special_requests.clone())
            .allow_empty(true)
            .interact_text()
            .map_err(util::prompt_err)?;
    } else {
        eprintln!("Your booking has been created; trip details can no longer change.");
    }

    if let Some(quote) = checkout.quote() {
        eprintln!(
            "  Adult {}  Child {}  Total {}",
            quote.adult_price, quote.child_price, quote.total
        );
    }

    match choose(
        "Next",
        &["Continue to traveler information", "Edit details", "Leave checkout"],
    )? {
        0 => {
            let _ = checkout.advance_details();
            Ok(Nav::Stay)
        }
        1 => Ok(Nav::Stay),
        _ => Ok(Nav::Leave),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TravelerAction {
    Continue,
    /// 0-based traveler index.
    Edit(usize),
    Add,
    RemoveLast,
    Back,
}

impl TravelerAction {
    fn label(self) -> String {
        match self {
            Self::Continue => "Continue to payment".into(),
            Self::Edit(index) => format!("Edit traveler {}", index + 1),
            Self::Add => "Add traveler".into(),
            Self::RemoveLast => "Remove last traveler".into(),
            Self::Back => "Back".into(),
        }
    }
}

/// Traveler step menu, in display order. Only continue and back remain once
/// the booking exists.
fn traveler_menu(count: usize, locked: bool) -> Vec<TravelerAction> {
    let mut actions = vec![TravelerAction::Continue];
    if !locked {
        actions.extend((0..count).map(TravelerAction::Edit));
        actions.push(TravelerAction::Add);
        if count > 1 {
            actions.push(TravelerAction::RemoveLast);
        }
    }
    actions.push(TravelerAction::Back);
    actions
}

async fn travelers_screen(
    checkout: &mut Checkout,
    store: &Storefront,
    global: &GlobalOpts,
) -> Result<Nav, CliError> {
    let travelers: Vec<TravelerInfo> = checkout
        .draft()
        .map(|d| d.travelers().to_vec())
        .unwrap_or_default();
    let rows: Vec<TravelerRow> = travelers
        .iter()
        .enumerate()
        .map(|(i, t)| TravelerRow {
            index: i + 1,
            name: t.name.clone(),
            email: t.email.clone(),
            phone: t.phone.clone(),
        })
        .collect();
    eprintln!("{}", output::render_table(&rows));

    let locked = checkout.booking().is_some();
    if locked {
        eprintln!("Your booking has been created; travelers can no longer change.");
    }

    let actions = traveler_menu(travelers.len(), locked);
    let items: Vec<String> = actions.iter().copied().map(TravelerAction::label).collect();
    let labels: Vec<&str> = items.iter().map(String::as_str).collect();
    let selection = choose("Next", &labels)?;
    let Some(&action) = actions.get(selection) else {
        return Ok(Nav::Stay);
    };

    match action {
        TravelerAction::Continue => {
            let result = util::with_spinner(
                "Creating your booking…",
                global,
                checkout.submit_travelers(store.gateway()),
            )
            .await;
            if let Err(e) = result {
                debug!(error = %e, "traveler step rejected");
            }
            Ok(Nav::Stay)
        }
        TravelerAction::Edit(index) => {
            let draft = checkout.draft_mut()?;
            let Some(slot) = draft.traveler_mut(index) else {
                return Ok(Nav::Stay);
            };
            *slot = prompt_traveler(slot)?;
            Ok(Nav::Stay)
        }
        TravelerAction::Add => {
            checkout.add_traveler()?;
            Ok(Nav::Stay)
        }
        TravelerAction::RemoveLast => {
            checkout.remove_traveler(travelers.len().saturating_sub(1))?;
            Ok(Nav::Stay)
        }
        TravelerAction::Back => Ok(Nav::Back),
    }
}

async fn payment_screen(
    checkout: &mut Checkout,
    store: &Storefront,
    provider: &ConsolePaymentProvider,
) -> Result<Nav, CliError> {
    let total = checkout
        .booking()
        .map(|b| b.total_price.to_string())
        .unwrap_or_default();
    let pay = format!("Pay {total}");
    if choose("Payment", &[pay.as_str(), "Back"])? != 0 {
        return Ok(Nav::Back);
    }
    let card = CardHandle("console".into());
    match checkout
        .confirm_payment(store.gateway(), provider, card)
        .await
    {
        Err(e) if e.is_partial_failure() => Err(e.into()),
        _ => Ok(Nav::Stay),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    store: &Storefront,
    args: CheckoutArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NotInteractive {
            command: "checkout".into(),
        });
    }

    let target = util::with_spinner(
        "Loading trip…",
        global,
        store.target(util::booking_type(args.kind), &args.id),
    )
    .await?;
    let color = output::should_color(&global.color);
    eprintln!("{}", output::heading(target.display_name(), color));

    let provider = ConsolePaymentProvider {
        public_key: store.config().payment_public_key.clone(),
    };
    let mut checkout = store.start_checkout(target);

    loop {
        let step = checkout.step();
        eprintln!("\n{}", progress(step, color));
        if let Some(banner) = checkout.banner() {
            eprintln!("{}", output::warning(banner, color));
        }

        let nav = match step {
            CheckoutStep::Details => details_screen(&mut checkout)?,
            CheckoutStep::TravelerInfo => travelers_screen(&mut checkout, store, global).await?,
            CheckoutStep::Payment => payment_screen(&mut checkout, store, &provider).await?,
            CheckoutStep::Confirmation => break,
        };

        let leave = match nav {
            Nav::Stay => false,
            Nav::Back => checkout.back() == BackOutcome::LeaveFlow,
            Nav::Leave => true,
        };
        if leave {
            cancelled(&checkout);
            return Ok(());
        }
    }

    let Some(booking) = checkout.booking() else {
        return Err(CheckoutError::WrongStep {
            step: CheckoutStep::Confirmation,
            action: "Showing the booking",
        }
        .into());
    };
    let out = output::render_single(
        &global.output,
        booking,
        |b| bookings::detail(b, color),
        |b| b.id.clone(),
    );
    output::print_output(&out, global.quiet);
    eprintln!("✓ Booking {} confirmed and paid", booking.id);
    Ok(())
}

fn cancelled(checkout: &Checkout) {
    match checkout.booking() {
        Some(b) => eprintln!("Checkout left. Booking {} stays pending payment.", b.id),
        None => eprintln!("Checkout cancelled. Nothing was booked."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_intent_id_of_a_secret_is_shown() {
        let secret = SecretString::from("pi_123_secret_abc".to_string());
        assert_eq!(intent_reference(&secret), "pi_123");

        let opaque = SecretString::from("tok".to_string());
        assert_eq!(intent_reference(&opaque), "(hidden)");
    }

    #[test]
    fn traveler_menu_offers_edits_until_the_booking_exists() {
        use TravelerAction::{Add, Back, Continue, Edit, RemoveLast};

        assert_eq!(
            traveler_menu(2, false),
            vec![Continue, Edit(0), Edit(1), Add, RemoveLast, Back]
        );
        assert_eq!(traveler_menu(1, false), vec![Continue, Edit(0), Add, Back]);
        assert_eq!(traveler_menu(3, true), vec![Continue, Back]);
        assert_eq!(Edit(1).label(), "Edit traveler 2");
    }

    #[test]
    fn progress_lists_every_step() {
        let line = progress(CheckoutStep::Payment, false);
        assert_eq!(
            line,
            "1. Booking Details  >  2. Traveler Information  >  3. Payment  >  4. Confirmation"
        );
    }
}
