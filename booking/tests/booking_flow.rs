//! End-to-end booking flows through the service facade.

#![allow(clippy::unwrap_used)]

use cineease::catalog::Catalog;
use cineease::error::BookingError;
use cineease::ledger::{BookingLedger, LedgerResult, MemoryLedger};
use cineease::payment::PaymentCard;
use cineease::service::BookingService;
use cineease::types::{BookingRecord, SeatTier, UserProfile};
use cineease::workflow::Stage;
use cineease_core::environment::{Clock, FixedClock};
use chrono::{TimeZone, Utc};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock {
        time: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
    })
}

fn service(catalog: &Arc<Catalog>, ledger: Arc<dyn BookingLedger>) -> BookingService {
    BookingService::new(
        UserProfile::new("Alice", "9876543210").unwrap(),
        fixed_clock(),
        Arc::clone(catalog),
        ledger,
    )
}

/// Ledger whose appends always fail, for persistence-failure paths.
struct FailingLedger;

impl BookingLedger for FailingLedger {
    fn append(&self, _record: &BookingRecord) -> Pin<Box<dyn Future<Output = LedgerResult> + Send>> {
        Box::pin(async { Err(cineease::ledger::LedgerError("disk full".to_string())) })
    }
}

#[tokio::test]
async fn happy_path_books_two_silver_seats() {
    let catalog = Arc::new(Catalog::seeded());
    let ledger = MemoryLedger::new();
    let service = service(&catalog, Arc::new(ledger.clone()));

    service.select_movie("Shadow Realm").await.unwrap();
    service.select_showtime("10:00 AM").await.unwrap();
    assert_eq!(service.toggle_seat("S1").await.unwrap(), 1);
    assert_eq!(service.toggle_seat("S2").await.unwrap(), 2);
    service.begin_checkout().await.unwrap();

    let record = service
        .submit_payment(PaymentCard::new("1234567890123456", "12/25", "123"))
        .await
        .unwrap();

    assert_eq!(record.movie_name, "Shadow Realm");
    assert_eq!(record.tier, SeatTier::Silver);
    assert_eq!(record.total.units(), 300);
    assert_eq!(service.stage().await, Stage::Confirmed);

    assert_eq!(
        ledger.lines(),
        ["Alice,9876543210,Shadow Realm,10:00 AM,Silver,2,300"]
    );

    // Inventory decremented exactly once.
    let movie = catalog.lookup("Shadow Realm").unwrap();
    assert_eq!(movie.inventory.available(SeatTier::Silver), 12);
}

#[tokio::test]
async fn selling_out_a_tier_rejects_the_next_booking() {
    let catalog = Arc::new(Catalog::seeded());
    let ledger = MemoryLedger::new();

    // 14 silver seats: seven 2-seat bookings drain the tier.
    for _ in 0..7 {
        let service = service(&catalog, Arc::new(ledger.clone()));
        service.select_movie("Shadow Realm").await.unwrap();
        service.select_showtime("10:00 AM").await.unwrap();
        service.toggle_seat("S1").await.unwrap();
        service.toggle_seat("S2").await.unwrap();
        service.begin_checkout().await.unwrap();
        service
            .submit_payment(PaymentCard::new("1234567890123456", "12/25", "123"))
            .await
            .unwrap();
    }

    let movie = catalog.lookup("Shadow Realm").unwrap();
    assert_eq!(movie.inventory.available(SeatTier::Silver), 0);
    assert_eq!(ledger.lines().len(), 7);

    // The eighth attempt fails at settlement and adds no ledger line.
    let service = service(&catalog, Arc::new(ledger.clone()));
    service.select_movie("Shadow Realm").await.unwrap();
    service.select_showtime("10:00 AM").await.unwrap();
    service.toggle_seat("S1").await.unwrap();
    service.begin_checkout().await.unwrap();

    let error = service
        .submit_payment(PaymentCard::new("1234567890123456", "12/25", "123"))
        .await
        .unwrap_err();

    assert_eq!(
        error,
        BookingError::InsufficientSeats {
            tier: SeatTier::Silver,
            requested: 1,
            available: 0,
        }
    );
    assert_eq!(service.stage().await, Stage::Rejected);
    assert_eq!(ledger.lines().len(), 7);
}

#[tokio::test]
async fn malformed_card_leaves_inventory_untouched() {
    let catalog = Arc::new(Catalog::seeded());
    let ledger = MemoryLedger::new();
    let service = service(&catalog, Arc::new(ledger.clone()));

    service.select_movie("Mind Games").await.unwrap();
    service.select_showtime("2:00 PM").await.unwrap();
    service.toggle_seat("G1").await.unwrap();
    service.begin_checkout().await.unwrap();

    let error = service
        .submit_payment(PaymentCard::new("12345", "12/25", "123"))
        .await
        .unwrap_err();

    assert_eq!(error, BookingError::InvalidPaymentFormat);
    assert_eq!(service.stage().await, Stage::Rejected);
    assert!(ledger.lines().is_empty());

    let movie = catalog.lookup("Mind Games").unwrap();
    assert_eq!(movie.inventory.available(SeatTier::Gold), 14);

    // A corrected card on the rejected stage completes the booking.
    let record = service
        .submit_payment(PaymentCard::new("1234567890123456", "12/25", "123"))
        .await
        .unwrap();
    assert_eq!(record.tier, SeatTier::Gold);
    assert_eq!(movie.inventory.available(SeatTier::Gold), 13);
}

#[tokio::test]
async fn unknown_movie_and_showtime_are_rejected() {
    let catalog = Arc::new(Catalog::seeded());
    let service = service(&catalog, Arc::new(MemoryLedger::new()));

    let error = service.select_movie("Nonexistent").await.unwrap_err();
    assert_eq!(error, BookingError::MovieNotFound("Nonexistent".to_string()));
    assert_eq!(service.stage().await, Stage::Browsing);

    service.select_movie("Shadow Realm").await.unwrap();
    let error = service.select_showtime("9:00 PM").await.unwrap_err();
    assert_eq!(
        error,
        BookingError::InvalidShowtime {
            movie: "Shadow Realm".to_string(),
            showtime: "9:00 PM".to_string(),
        }
    );
}

#[tokio::test]
async fn ledger_failure_reports_persistence_error() {
    let catalog = Arc::new(Catalog::seeded());
    let service = service(&catalog, Arc::new(FailingLedger));

    service.select_movie("The Last Symphony").await.unwrap();
    service.select_showtime("11:30 AM").await.unwrap();
    service.toggle_seat("V1").await.unwrap();
    service.begin_checkout().await.unwrap();

    let error = service
        .submit_payment(PaymentCard::new("1234567890123456", "12/25", "123"))
        .await
        .unwrap_err();

    assert!(matches!(error, BookingError::PersistenceFailure(_)));
    assert_eq!(service.stage().await, Stage::Rejected);

    // The seats were taken before the append failed; the decrement stands.
    let movie = catalog.lookup("The Last Symphony").unwrap();
    assert_eq!(movie.inventory.available(SeatTier::Vip), 9);
}

#[tokio::test]
async fn two_sessions_share_one_inventory() {
    let catalog = Arc::new(Catalog::seeded());
    let ledger = MemoryLedger::new();

    let first = service(&catalog, Arc::new(ledger.clone()));
    let second = BookingService::new(
        UserProfile::new("Bob", "9123456780").unwrap(),
        fixed_clock(),
        Arc::clone(&catalog),
        Arc::new(ledger.clone()),
    );

    for session in [&first, &second] {
        session.select_movie("Shadow Realm").await.unwrap();
        session.select_showtime("1:00 PM").await.unwrap();
        session.toggle_seat("V1").await.unwrap();
        session.begin_checkout().await.unwrap();
        session
            .submit_payment(PaymentCard::new("1234567890123456", "12/25", "123"))
            .await
            .unwrap();
    }

    let movie = catalog.lookup("Shadow Realm").unwrap();
    assert_eq!(movie.inventory.available(SeatTier::Vip), 9);
    assert_eq!(
        ledger.lines(),
        [
            "Alice,9876543210,Shadow Realm,1:00 PM,VIP,1,150",
            "Bob,9123456780,Shadow Realm,1:00 PM,VIP,1,150",
        ]
    );
}
