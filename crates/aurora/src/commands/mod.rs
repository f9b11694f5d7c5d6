//! Command handlers, one module per top-level command.

pub mod book;
pub mod bookings;
pub mod catalog;
pub mod checkout;
pub mod config_cmd;
pub mod quote;
pub mod util;

use aurora_core::Storefront;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a backend-bound command to its handler.
pub async fn dispatch(cmd: Command, store: &Storefront, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Packages(args) => catalog::handle_packages(store, args, global).await,
        Command::Destinations(args) => catalog::handle_destinations(store, args, global).await,
        Command::Bookings(args) => bookings::handle(store, args, global).await,
        Command::Book(args) => book::handle(store, args, global).await,
        Command::Checkout(args) => checkout::handle(store, args, global).await,
        Command::Quote(_) | Command::Config(_) | Command::Completions(_) => {
            unreachable!("handled before connecting")
        }
    }
}
