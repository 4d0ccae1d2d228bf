//! Admin console: command parsing and plain-text rendering.
//!
//! The console runs one command per invocation against the persisted wizard
//! state. Rendering returns a `String` so the binary only has to print it.

use crate::{
    core::{
        booking::{Address, Booking, BookingStatus, TIME_SLOTS},
        catalog::{Catalog, ServiceCategory},
        persistence::SnapshotStore,
        report::{self, BookingFilter, BookingStats, RECENT_BOOKINGS_LIMIT},
        submission::{self, SubmissionGateway},
        wizard::BookingWizard,
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use std::fmt::Write as _;
use tracing::debug;

/// Usage line printed for unknown commands.
pub const USAGE: &str = "usage: service-booking [dashboard | list [term] [--status S] | show <id> | status <id> <status> | confirm | catalog [term]]";

/// One console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    /// Headline statistics and the most recent bookings
    Dashboard,
    /// Filtered booking list
    List(BookingFilter),
    /// Full detail of one booking
    Show { id: String },
    /// Change a booking's status
    SetStatus { id: String, status: BookingStatus },
    /// Submit the saved draft, which must be on the review step
    Confirm,
    /// Catalog categories, optionally filtered by a search term
    Catalog { search: String },
}

impl AdminCommand {
    /// Parses command-line arguments (without the program name).
    /// No arguments means [`AdminCommand::Dashboard`].
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
        let Some((command, rest)) = args.split_first() else {
            return Ok(Self::Dashboard);
        };

        match command.as_str() {
            "dashboard" => Ok(Self::Dashboard),
            "list" => Self::parse_list(rest),
            "show" => match rest {
                [id] => Ok(Self::Show { id: id.clone() }),
                _ => Err(Error::Command(format!("show takes one booking id\n{USAGE}"))),
            },
            "status" => match rest {
                [id, status] => Ok(Self::SetStatus {
                    id: id.clone(),
                    status: status.parse()?,
                }),
                _ => Err(Error::Command(format!(
                    "status takes a booking id and a status\n{USAGE}"
                ))),
            },
            "confirm" => Ok(Self::Confirm),
            "catalog" => Ok(Self::Catalog {
                search: rest.join(" "),
            }),
            other => Err(Error::Command(format!("unknown command '{other}'\n{USAGE}"))),
        }
    }

    fn parse_list(args: &[String]) -> Result<Self> {
        let mut filter = BookingFilter::default();
        let mut terms = Vec::new();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            if arg == "--status" {
                let value = iter
                    .next()
                    .ok_or_else(|| Error::Command("--status needs a value".to_string()))?;
                filter.status = Some(value.parse()?);
            } else {
                terms.push(arg.as_str());
            }
        }

        filter.search = terms.join(" ");
        Ok(Self::List(filter))
    }
}

/// Executes `command` and returns the text to print.
///
/// `gateway` receives the draft on `confirm`. `today` is the day counted by
/// the dashboard's "today" figure.
pub async fn run<B, G>(
    command: AdminCommand,
    wizard: &mut BookingWizard<B>,
    catalog: &Catalog,
    gateway: &G,
    today: NaiveDate,
) -> Result<String>
where
    B: SnapshotStore,
    G: SubmissionGateway,
{
    debug!(?command, "Running admin command");
    match command {
        AdminCommand::Dashboard => {
            let bookings = wizard.bookings();
            let stats = report::booking_stats(bookings, today);
            let recent = report::recent_bookings(bookings, RECENT_BOOKINGS_LIMIT);
            Ok(render_dashboard(&stats, &recent))
        }
        AdminCommand::List(filter) => {
            let matching = report::filter_bookings(wizard.bookings(), &filter);
            Ok(render_booking_list(&matching))
        }
        AdminCommand::Show { id } => Ok(wizard.state().booking(&id).map_or_else(
            || format!("No booking with id {id}"),
            render_booking_detail,
        )),
        AdminCommand::SetStatus { id, status } => {
            if wizard.set_booking_status(&id, status).await? {
                Ok(format!("Booking {id} is now {status}"))
            } else {
                Ok(format!("No booking with id {id}; nothing changed"))
            }
        }
        AdminCommand::Confirm => {
            let booking = submission::confirm_booking(wizard, catalog, gateway).await?;
            Ok(format!("Booking confirmed\n{}", render_booking_detail(&booking)))
        }
        AdminCommand::Catalog { search } => Ok(render_catalog(catalog, &search)),
    }
}

fn render_dashboard(stats: &BookingStats, recent: &[&Booking]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total bookings:     {}", stats.total_bookings);
    let _ = writeln!(out, "Pending:            {}", stats.pending_bookings);
    let _ = writeln!(out, "Completed:          {}", stats.completed_bookings);
    let _ = writeln!(out, "Revenue:            ₹{}", stats.total_revenue);
    let _ = writeln!(out, "Today's bookings:   {}", stats.today_bookings);
    out.push('\n');
    out.push_str("Recent bookings\n");
    out.push_str(&render_booking_list(recent));
    out
}

fn render_booking_list(bookings: &[&Booking]) -> String {
    if bookings.is_empty() {
        return "No bookings found\n".to_string();
    }

    let mut out = String::new();
    for booking in bookings {
        let _ = writeln!(
            out,
            "{}  {:<11}  {:<20}  {:<16}  {} {}  ₹{}",
            booking.id,
            booking.status,
            booking.service_name,
            booking.user_details.name,
            booking.date,
            booking.time,
            booking.total_amount,
        );
    }
    out
}

fn render_booking_detail(booking: &Booking) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Booking {}", booking.id);
    let _ = writeln!(out, "Status:    {}", booking.status);
    let _ = writeln!(
        out,
        "Service:   {} ({} / {})",
        booking.service_name,
        booking.category.map_or("", ServiceCategory::as_str),
        booking.sub_category
    );
    let _ = writeln!(out, "Schedule:  {} at {}", booking.date, booking.time);
    let _ = writeln!(
        out,
        "Customer:  {} (+91 {})",
        booking.user_details.name, booking.user_details.mobile
    );
    let _ = writeln!(out, "Address:   {}", format_address(&booking.address));
    let _ = writeln!(out, "Location:  {}", booking.location.address);
    let _ = writeln!(out, "Amount:    ₹{}", booking.total_amount);
    let _ = writeln!(out, "Created:   {}", booking.created_at.format("%Y-%m-%d %H:%M UTC"));
    out
}

fn format_address(address: &Address) -> String {
    format!(
        "{}, {}, {}, {} - {}",
        address.house, address.street, address.place, address.district, address.pincode
    )
}

fn render_catalog(catalog: &Catalog, search: &str) -> String {
    let categories = catalog.search(search);
    if categories.is_empty() {
        return format!("No services match '{}'\n", search.trim());
    }

    let mut out = String::new();
    for category in categories {
        let _ = writeln!(out, "{} [{}]", category.name, category.id);
        for service in &category.sub_services {
            let _ = writeln!(out, "  {:<24} ₹{:<6} {}", service.name, service.price, service.id);
        }
    }
    let _ = writeln!(out, "\nTime slots: {}", TIME_SLOTS.join(", "));
    out
}
