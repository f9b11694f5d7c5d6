//! Package and destination lookups.

use aurora_core::{Destination, Storefront, VacationPackage};

use crate::cli::{
    DestinationsArgs, DestinationsCommand, GlobalOpts, PackagesArgs, PackagesCommand,
};
use crate::error::CliError;
use crate::output;

fn package_detail(p: &VacationPackage) -> String {
    output::render_fields(&[
        ("ID", p.id.clone()),
        ("Title", p.title.clone()),
        ("Price", format!("{} per person", p.price)),
        (
            "Duration",
            p.duration_days.map(|d| format!("{d} days")).unwrap_or_default(),
        ),
        ("Destination", p.destination.clone().unwrap_or_default()),
        ("Description", p.description.clone().unwrap_or_default()),
    ])
}

fn destination_detail(d: &Destination) -> String {
    output::render_fields(&[
        ("ID", d.id.clone()),
        ("Name", d.name.clone()),
        ("Country", d.country.clone().unwrap_or_default()),
        ("Description", d.description.clone().unwrap_or_default()),
    ])
}

pub async fn handle_packages(
    store: &Storefront,
    args: PackagesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PackagesCommand::Show { id } => {
            let package = store.package(&id).await?;
            let out = output::render_single(&global.output, &package, package_detail, |p| {
                p.id.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

pub async fn handle_destinations(
    store: &Storefront,
    args: DestinationsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DestinationsCommand::Show { id } => {
            let destination = store.destination(&id).await?;
            let out = output::render_single(
                &global.output,
                &destination,
                destination_detail,
                |d| d.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
