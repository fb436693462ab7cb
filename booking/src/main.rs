//! Demo walking one session through the full booking flow.

use cineease::catalog::Catalog;
use cineease::config::Config;
use cineease::error::BookingError;
use cineease::ledger::FileLedger;
use cineease::payment::PaymentCard;
use cineease::service::BookingService;
use cineease::types::UserProfile;
use cineease_core::environment::SystemClock;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), BookingError> {
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let service = BookingService::new(
        UserProfile::new("Alice", "9876543210")?,
        Arc::new(SystemClock),
        Arc::new(Catalog::seeded()),
        Arc::new(FileLedger::new(config.ledger_path)),
    );

    println!("Now showing:");
    for movie in service.list_movies() {
        println!(
            "  {} @ {} ({})",
            movie.name,
            movie.theater,
            movie.showtimes.join(", ")
        );
    }

    let details = service.movie_details("Shadow Realm")?;
    println!(
        "\n{}: {} (Silver {}, Gold {}, VIP {} seats left)",
        details.name,
        details.description,
        details.available.silver,
        details.available.gold,
        details.available.vip
    );

    service.select_movie("Shadow Realm").await?;
    service.select_showtime("10:00 AM").await?;
    service.toggle_seat("S1").await?;
    service.toggle_seat("S2").await?;
    service.begin_checkout().await?;

    // First attempt with a malformed card: rejected, retryable.
    if let Err(error) = service
        .submit_payment(PaymentCard::new("12345", "12/25", "123"))
        .await
    {
        println!("\nPayment rejected: {error}");
    }

    let record = service
        .submit_payment(PaymentCard::new("1234567890123456", "12/25", "123"))
        .await?;
    println!(
        "\nBooked {} x {} for {} at {}: {}",
        record.seat_count, record.tier, record.movie_name, record.showtime, record.total
    );

    let details = service.movie_details("Shadow Realm")?;
    println!("Silver seats left: {}", details.available.silver);

    Ok(())
}
