//! Tests for the lease lifecycle

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{Currency, Money, PartyId, PropertyId, UnitId};
use domain_lease::{Lease, LeaseError, LeaseStatus, TenantUnit};

fn kes(amount: i64) -> Money {
    Money::new(amount.into(), Currency::KES)
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn periodic_tenancy_has_no_end_date() {
    let lease = Lease::draft(
        UnitId::new(),
        PartyId::new(),
        PartyId::new(),
        kes(15000),
        kes(30000),
        d(2025, 1, 1),
        None,
    )
    .unwrap();

    assert!(lease.end_date.is_none());
    assert_eq!(lease.status, LeaseStatus::Draft);
}

#[test]
fn expired_lease_cannot_be_terminated() {
    let mut lease = Lease::draft(
        UnitId::new(),
        PartyId::new(),
        PartyId::new(),
        kes(15000),
        kes(0),
        d(2025, 1, 1),
        Some(d(2025, 12, 31)),
    )
    .unwrap();

    lease.activate().unwrap();
    lease.expire().unwrap();

    assert!(matches!(
        lease.terminate(),
        Err(LeaseError::InvalidTransition(_))
    ));
    assert_eq!(lease.status, LeaseStatus::Expired);
}

#[test]
fn unit_occupancy_follows_lease_lifecycle() {
    let mut unit = TenantUnit::new(PropertyId::new(), "A4", kes(15000)).with_bedrooms(2);

    let mut lease = Lease::draft(
        unit.id,
        PartyId::new(),
        PartyId::new(),
        kes(15000),
        kes(30000),
        d(2025, 1, 1),
        None,
    )
    .unwrap();

    lease.activate().unwrap();
    unit.occupy();
    assert!(unit.is_occupied);

    lease.terminate().unwrap();
    unit.vacate();
    assert!(!unit.is_occupied);
}

#[test]
fn rent_must_be_positive() {
    let result = Lease::draft(
        UnitId::new(),
        PartyId::new(),
        PartyId::new(),
        Money::new(dec!(-15000), Currency::KES),
        kes(0),
        d(2025, 1, 1),
        None,
    );

    assert!(matches!(result, Err(LeaseError::Validation(_))));
}
