//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible
//! defaults. Tests specify only the relevant fields and rely on defaults
//! for everything else.

use chrono::{Days, NaiveDate};

use core_kernel::{LeaseId, Money, PartyId, UnitId};
use domain_lease::Lease;
use domain_ledger::entry::PaymentMethod;
use domain_ledger::settlement::CollectAdvance;
use domain_ledger::{AdvanceBalance, RentInvoice};

use crate::fixtures::{MoneyFixtures, StringFixtures, TemporalFixtures};

/// Builder for lease test data
pub struct LeaseBuilder {
    unit_id: UnitId,
    landlord_id: PartyId,
    tenant_id: PartyId,
    monthly_rent: Money,
    deposit: Money,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    active: bool,
}

impl Default for LeaseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LeaseBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            unit_id: UnitId::new(),
            landlord_id: PartyId::new(),
            tenant_id: PartyId::new(),
            monthly_rent: MoneyFixtures::monthly_rent(),
            deposit: MoneyFixtures::deposit(),
            start_date: TemporalFixtures::lease_start(),
            end_date: Some(TemporalFixtures::lease_end()),
            active: true,
        }
    }

    pub fn landlord(mut self, landlord_id: PartyId) -> Self {
        self.landlord_id = landlord_id;
        self
    }

    pub fn monthly_rent(mut self, rent: Money) -> Self {
        self.monthly_rent = rent;
        self
    }

    pub fn starting(mut self, start_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self
    }

    pub fn periodic(mut self) -> Self {
        self.end_date = None;
        self
    }

    pub fn draft_only(mut self) -> Self {
        self.active = false;
        self
    }

    /// Builds the lease, activating it unless `draft_only` was requested
    pub fn build(self) -> Lease {
        let mut lease = Lease::draft(
            self.unit_id,
            self.landlord_id,
            self.tenant_id,
            self.monthly_rent,
            self.deposit,
            self.start_date,
            self.end_date,
        )
        .expect("builder defaults are valid");

        if self.active {
            lease.activate().expect("drafted lease activates");
        }
        lease
    }

    /// Builds the lease and its empty advance balance together
    pub fn build_with_balance(self) -> (Lease, AdvanceBalance) {
        let lease = self.build();
        let balance = AdvanceBalance::open(lease.id, lease.monthly_rent, lease.start_date);
        (lease, balance)
    }
}

/// Builder for rent invoice test data
pub struct InvoiceBuilder {
    lease_id: LeaseId,
    invoice_date: NaiveDate,
    rent_amount: Money,
    late_fee: Money,
    due_days: u64,
}

impl InvoiceBuilder {
    /// Creates a builder for a given lease
    pub fn for_lease(lease_id: LeaseId) -> Self {
        Self {
            lease_id,
            invoice_date: TemporalFixtures::lease_start(),
            rent_amount: MoneyFixtures::monthly_rent(),
            late_fee: MoneyFixtures::zero(),
            due_days: 5,
        }
    }

    pub fn dated(mut self, invoice_date: NaiveDate) -> Self {
        self.invoice_date = invoice_date;
        self
    }

    pub fn rent(mut self, rent_amount: Money) -> Self {
        self.rent_amount = rent_amount;
        self
    }

    pub fn late_fee(mut self, late_fee: Money) -> Self {
        self.late_fee = late_fee;
        self
    }

    pub fn build(self) -> RentInvoice {
        RentInvoice::new(
            self.lease_id,
            self.invoice_date,
            self.invoice_date + Days::new(self.due_days),
            self.rent_amount,
            self.late_fee,
        )
    }
}

/// Builder for advance collection requests
pub struct CollectAdvanceBuilder {
    months: u32,
    amount: Money,
    transaction_date: NaiveDate,
    payment_method: PaymentMethod,
}

impl Default for CollectAdvanceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectAdvanceBuilder {
    /// Creates a builder for the standard three-month collection
    pub fn new() -> Self {
        Self {
            months: 3,
            amount: MoneyFixtures::three_months_advance(),
            transaction_date: TemporalFixtures::collection_date(),
            payment_method: PaymentMethod::MobileMoney,
        }
    }

    pub fn months(mut self, months: u32, amount: Money) -> Self {
        self.months = months;
        self.amount = amount;
        self
    }

    pub fn on(mut self, transaction_date: NaiveDate) -> Self {
        self.transaction_date = transaction_date;
        self
    }

    pub fn build(self) -> CollectAdvance {
        CollectAdvance {
            months: self.months,
            amount: self.amount,
            transaction_date: self.transaction_date,
            payment_method: self.payment_method,
            reference_number: Some(StringFixtures::payment_reference().to_string()),
            notes: Some(StringFixtures::advance_notes().to_string()),
        }
    }
}
