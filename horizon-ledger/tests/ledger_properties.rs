use chrono::{NaiveDate, NaiveTime};
use horizon_core::{Actor, LedgerSnapshot, LedgerStore, MemoryStore};
use horizon_ledger::InventoryLedger;
use horizon_shared::{BookingPatch, BookingStatus, Flight, FlightPatch, FlightStatus, PassengerDetail};
use proptest::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

const USERS: [&str; 3] = ["alice", "bob", "carol"];

fn flight(number: &str, capacity: u32) -> Flight {
    Flight {
        id: Uuid::new_v4(),
        flight_number: number.to_string(),
        origin: "LHR".to_string(),
        destination: "JFK".to_string(),
        date: NaiveDate::from_ymd_opt(2026, 11, 20).unwrap(),
        departure_time: NaiveTime::from_hms_opt(9, 40, 0).unwrap(),
        arrival_time: NaiveTime::from_hms_opt(12, 55, 0).unwrap(),
        duration_minutes: 495,
        price_nuc: 45000,
        aircraft: "Boeing 787-9".to_string(),
        status: FlightStatus::OnTime,
        seat_capacity: capacity,
        available_seats: capacity,
        image: Some("/images/flights/lhr-jfk.jpg".to_string()),
        description: Some("Transatlantic daytime service".to_string()),
        amenities: vec!["Wi-Fi".to_string(), "Meals".to_string()],
    }
}

fn passengers(n: u32) -> Vec<PassengerDetail> {
    (0..n).map(|i| PassengerDetail::new(format!("Traveller {}", i), 40)).collect()
}

#[derive(Debug, Clone)]
enum Op {
    Book { user: usize, flight: usize, count: u32 },
    Cancel { booking: usize, user: usize },
    AdminStatus { booking: usize, cancel: bool },
    Resize { flight: usize, capacity: u32 },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..USERS.len(), 0..2usize, 0..8u32).prop_map(|(user, flight, count)| Op::Book { user, flight, count }),
        2 => (0..16usize, 0..USERS.len()).prop_map(|(booking, user)| Op::Cancel { booking, user }),
        2 => (0..16usize, any::<bool>()).prop_map(|(booking, cancel)| Op::AdminStatus { booking, cancel }),
        1 => (0..2usize, 0..30u32).prop_map(|(flight, capacity)| Op::Resize { flight, capacity }),
    ]
}

fn assert_seat_invariants(ledger: &InventoryLedger) {
    let everything = ledger.all_bookings(&Actor::admin("auditor"));
    for f in ledger.flights() {
        assert!(f.available_seats <= f.seat_capacity, "flight {} over capacity", f.flight_number);
        let confirmed: u32 = everything
            .iter()
            .filter(|b| b.flight_id == f.id && b.status == BookingStatus::Confirmed)
            .map(|b| b.passenger_count)
            .sum();
        assert_eq!(confirmed, f.seat_capacity - f.available_seats);
    }
    assert!(ledger.audit().is_empty());
}

async fn run(ops: Vec<Op>) {
    let flights = vec![flight("OH1", 12), flight("OH2", 5)];
    let flight_ids: Vec<Uuid> = flights.iter().map(|f| f.id).collect();
    let store = Arc::new(MemoryStore::new());
    let mut ledger = InventoryLedger::open(store, LedgerSnapshot { flights, bookings: vec![] })
        .await
        .unwrap();
    let admin = Actor::admin("ops");
    let mut booking_ids = Vec::new();

    for op in ops {
        match op {
            Op::Book { user, flight, count } => {
                let actor = Actor::customer(USERS[user]);
                if let Ok(b) = ledger
                    .create_booking(flight_ids[flight], &actor, count, passengers(count))
                    .await
                {
                    booking_ids.push(b.id);
                }
            }
            Op::Cancel { booking, user } => {
                if let Some(id) = booking_ids.get(booking) {
                    let owner = ledger.booking(*id).unwrap().user_id.clone();
                    let before = ledger.booking(*id).unwrap().status;
                    let result = ledger.cancel_booking(*id, &Actor::customer(USERS[user])).await;
                    if owner == USERS[user] {
                        assert_eq!(result.unwrap().status, BookingStatus::Cancelled);
                    } else {
                        assert!(result.is_err());
                        assert_eq!(ledger.booking(*id).unwrap().status, before);
                    }
                }
            }
            Op::AdminStatus { booking, cancel } => {
                if let Some(id) = booking_ids.get(booking) {
                    let status = if cancel { BookingStatus::Cancelled } else { BookingStatus::Confirmed };
                    let _ = ledger.update_booking(*id, BookingPatch::status(status), &admin).await;
                }
            }
            Op::Resize { flight, capacity } => {
                let patch = FlightPatch { seat_capacity: Some(capacity), ..Default::default() };
                let _ = ledger.update_flight(flight_ids[flight], patch, &admin).await;
            }
        }
        assert_seat_invariants(&ledger);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn seat_counts_follow_confirmed_bookings(ops in prop::collection::vec(op(), 1..40)) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(run(ops));
    }
}

#[tokio::test]
async fn scenario_walkthrough() {
    let f1 = flight("OH100", 180);
    let f1_id = f1.id;
    let price = f1.price_nuc;
    let mut ledger = InventoryLedger::open(
        Arc::new(MemoryStore::new()),
        LedgerSnapshot { flights: vec![f1], bookings: vec![] },
    )
    .await
    .unwrap();
    let alice = Actor::customer("alice");
    let bob = Actor::customer("bob");
    let admin = Actor::admin("ops");

    // A: two passengers
    let booking = ledger.create_booking(f1_id, &alice, 2, passengers(2)).await.unwrap();
    assert_eq!(ledger.flight(f1_id).unwrap().available_seats, 178);
    assert_eq!(booking.status, BookingStatus::Confirmed);
    assert_eq!(booking.total_price_nuc, 2 * price);

    // B: more than what is left
    let err = ledger.create_booking(f1_id, &alice, 200, passengers(200)).await.unwrap_err();
    assert_eq!(err.kind(), horizon_core::ErrorKind::CapacityExceeded);
    assert_eq!(ledger.flight(f1_id).unwrap().available_seats, 178);

    // E: delete blocked while the booking is live
    let err = ledger.delete_flight(f1_id, &admin).await.unwrap_err();
    assert_eq!(err.kind(), horizon_core::ErrorKind::Conflict);
    assert_eq!(err.to_string(), "Flight has 1 active booking(s)");
    assert!(ledger.flight(f1_id).is_some());

    // D: someone else's booking
    let err = ledger.cancel_booking(booking.id, &bob).await.unwrap_err();
    assert_eq!(err.kind(), horizon_core::ErrorKind::Unauthorized);
    assert_eq!(ledger.flight(f1_id).unwrap().available_seats, 178);
    assert!(ledger.bookings_for_user("bob").is_empty());

    // C: owner cancels
    let cancelled = ledger.cancel_booking(booking.id, &alice).await.unwrap();
    assert_eq!(cancelled.status, BookingStatus::Cancelled);
    assert_eq!(ledger.flight(f1_id).unwrap().available_seats, 180);
}

#[tokio::test]
async fn persisted_ledger_reloads_field_for_field() {
    let store = Arc::new(MemoryStore::new());
    let f1 = flight("OH300", 20);
    let f1_id = f1.id;
    let mut ledger = InventoryLedger::open(
        store.clone(),
        LedgerSnapshot { flights: vec![f1], bookings: vec![] },
    )
    .await
    .unwrap();
    let alice = Actor::customer("alice");

    let kept = ledger
        .create_booking(f1_id, &alice, 2, vec![
            PassengerDetail::new("Alice", 34).with_seat("3A"),
            PassengerDetail::new("Theo", 6).with_seat("3B"),
        ])
        .await
        .unwrap();
    let dropped = ledger.create_booking(f1_id, &alice, 1, passengers(1)).await.unwrap();
    ledger.cancel_booking(dropped.id, &alice).await.unwrap();

    let snapshot = store.load().await.unwrap();
    let reopened = InventoryLedger::open(store, LedgerSnapshot::default()).await.unwrap();

    assert_eq!(reopened.flights(), ledger.flights());
    assert_eq!(snapshot.bookings.len(), 2);
    assert_eq!(reopened.booking(kept.id), ledger.booking(kept.id));
    assert_eq!(reopened.booking(dropped.id), ledger.booking(dropped.id));
    assert_eq!(reopened.flight(f1_id).unwrap().available_seats, 18);
}
