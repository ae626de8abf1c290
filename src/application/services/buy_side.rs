//! # Buy-Side Orchestrator
//!
//! Composes the two ledgers of a buy order and translates them to and
//! from the order shell.
//!
//! A buy order is funded from cash accounts and credit facilities (the
//! *funding* ledger, denominated in the order currency) and delivered
//! into portfolios (the *destination* ledger, denominated in shares).
//! Both ledgers fill toward the same order: the funding target is
//! `quantity x price`, computed exactly once at construction so the
//! displayed quantity and the stored amount cannot drift, and the
//! destination target is the quantity itself.
//!
//! # Examples
//!
//! ```
//! use order_alloc::application::services::buy_side::{BuySideOrchestrator, FundingScope};
//! use order_alloc::domain::entities::capacity_entity::CapacityEntity;
//! use order_alloc::domain::entities::order_shell::OrderShell;
//! use order_alloc::domain::value_objects::{
//!     AllocValue, CurrencyCode, EntityId, OrderId, Price, Quantity,
//! };
//! use order_alloc::infrastructure::catalog::InMemoryCapacityCatalog;
//! use rust_decimal_macros::dec;
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(InMemoryCapacityCatalog::with_entities([
//!     CapacityEntity::cash_account(
//!         EntityId::new("cash-1"),
//!         "Operating USD",
//!         CurrencyCode::new("USD").unwrap(),
//!         AllocValue::new(dec!(5000)),
//!     ),
//! ]));
//!
//! let mut orchestrator = BuySideOrchestrator::new(
//!     OrderId::new_v4(),
//!     catalog,
//!     Quantity::new(100.0).unwrap(),
//!     Price::new(10.0).unwrap(),
//!     CurrencyCode::new("USD").unwrap(),
//! )
//! .unwrap();
//!
//! let mut session = orchestrator.open_funding_session(FundingScope::All);
//! let max = session.suggest_max(&EntityId::new("cash-1")).unwrap();
//! session.set_working(&EntityId::new("cash-1"), max).unwrap();
//!
//! let mut shell = OrderShell::new();
//! orchestrator.commit_funding(session, &mut shell);
//! assert_eq!(shell.funding_allocations.len(), 1);
//! assert_eq!(shell.funding_allocations[0].amount, dec!(1000));
//! ```

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::catalog::CapacityCatalog;
use crate::domain::entities::ledger::{AllocationEntry, AllocationLedger};
use crate::domain::entities::order_shell::{DepositAllocation, FundingAllocation, OrderShell};
use crate::domain::entities::staged_session::{SessionCandidate, StagedEditSession};
use crate::domain::errors::DomainResult;
use crate::domain::events::session_events::{
    AllocationEvent, SessionCommitted, SessionDiscarded, SessionOpened,
};
use crate::domain::value_objects::{
    AllocValue, CheckedArithmetic, CurrencyCode, DestinationType, EntityId, EntityKind,
    LedgerUnit, OrderId, OrderSide, Price, Quantity, SourceType,
};
use rust_decimal::Decimal;
use std::fmt;
use std::sync::Arc;

/// Which funding entity kinds a session exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FundingScope {
    /// Cash accounts and credit facilities.
    All,
    /// Cash accounts only.
    Cash,
    /// Credit facilities only.
    Credit,
}

impl FundingScope {
    /// Returns true if the scope admits the given entity kind.
    #[must_use]
    pub const fn admits(self, kind: EntityKind) -> bool {
        match self {
            Self::All => kind.is_funding_source(),
            Self::Cash => matches!(kind, EntityKind::Cash),
            Self::Credit => matches!(kind, EntityKind::Credit),
        }
    }
}

impl fmt::Display for FundingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "ALL"),
            Self::Cash => write!(f, "CASH"),
            Self::Credit => write!(f, "CREDIT"),
        }
    }
}

/// Orchestrates the funding and destination ledgers of a buy order.
///
/// The order shell stays the source of truth: [`mount`](Self::mount)
/// rebuilds both ledgers from its arrays, and every commit flows back
/// into it through [`serialize`](Self::serialize)-style merge-safe
/// writes.
#[derive(Debug)]
pub struct BuySideOrchestrator {
    order_id: OrderId,
    catalog: Arc<dyn CapacityCatalog>,
    quantity: Quantity,
    price: Price,
    currency: CurrencyCode,
    /// `quantity x price`, computed once; the only multiplication point
    /// for the order-level target.
    target_amount: Decimal,
    funding: AllocationLedger,
    destination: AllocationLedger,
    events: Vec<AllocationEvent>,
}

impl BuySideOrchestrator {
    /// Creates the orchestrator with empty ledgers.
    ///
    /// # Errors
    ///
    /// Returns a domain error if `quantity x price` overflows.
    pub fn new(
        order_id: OrderId,
        catalog: Arc<dyn CapacityCatalog>,
        quantity: Quantity,
        price: Price,
        currency: CurrencyCode,
    ) -> DomainResult<Self> {
        let target_amount = quantity.get().safe_mul(price.get())?;
        let funding =
            AllocationLedger::new(target_amount, LedgerUnit::Currency(currency.clone()))?;
        let destination = AllocationLedger::new(quantity.get(), LedgerUnit::Shares)?;
        Ok(Self {
            order_id,
            catalog,
            quantity,
            price,
            currency,
            target_amount,
            funding,
            destination,
            events: Vec::new(),
        })
    }

    /// Rebuilds both ledgers from the order shell's arrays.
    ///
    /// Called on mount and whenever the shell changes externally (e.g.
    /// navigating back to a previous wizard step). Stale and malformed
    /// entries are dropped by decode; nothing fails.
    pub fn mount(&mut self, shell: &OrderShell) {
        self.funding = AllocationLedger::decode(
            self.target_amount,
            LedgerUnit::Currency(self.currency.clone()),
            shell
                .funding_allocations
                .iter()
                .map(|f| (f.source_id.clone(), f.amount)),
            self.catalog.as_ref(),
        );
        self.destination = AllocationLedger::decode(
            self.quantity.get(),
            LedgerUnit::Shares,
            shell
                .deposits_of(DestinationType::Portfolio)
                .filter_map(|d| d.quantity.map(|q| (d.destination_id.clone(), q))),
            self.catalog.as_ref(),
        );
    }

    /// Converts a share quantity entered in the funding UI into the
    /// amount the funding ledger stores.
    ///
    /// The only multiplication point for per-entity funding figures.
    #[must_use]
    pub fn funding_amount_for(&self, quantity: AllocValue) -> AllocValue {
        AllocValue::new(quantity.get().saturating_mul(self.price.get()))
    }

    /// Stages a funding edit typed as a share quantity, converting it to
    /// the amount the ledger stores and returning that amount.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::EntityNotFound` if the entity has
    /// vanished from the catalog, or a wrapped domain error if it is
    /// outside the session's scope.
    pub fn set_funding_quantity(
        &self,
        session: &mut StagedEditSession,
        entity_id: &EntityId,
        quantity: AllocValue,
    ) -> ApplicationResult<AllocValue> {
        if !self.catalog.contains(entity_id) {
            return Err(ApplicationError::entity_not_found(entity_id.as_str()));
        }
        let amount = self.funding_amount_for(quantity);
        session.set_working(entity_id, amount)?;
        Ok(amount)
    }

    /// Opens a staged session over the funding entities admitted by the
    /// scope.
    #[must_use]
    pub fn open_funding_session(&mut self, scope: FundingScope) -> StagedEditSession {
        let candidates: Vec<SessionCandidate> = self
            .catalog
            .all()
            .iter()
            .filter(|e| scope.admits(e.kind()))
            .map(SessionCandidate::from_entity)
            .collect();
        let session = StagedEditSession::open(&self.funding, candidates);
        self.events.push(AllocationEvent::Opened(SessionOpened::new(
            self.order_id,
            session.id(),
            OrderSide::Buy,
            session.candidates().len(),
        )));
        session
    }

    /// Opens a staged session over the destination portfolios.
    #[must_use]
    pub fn open_destination_session(&mut self) -> StagedEditSession {
        let candidates: Vec<SessionCandidate> = self
            .catalog
            .of_kind(EntityKind::Portfolio)
            .iter()
            .map(SessionCandidate::from_entity)
            .collect();
        let session = StagedEditSession::open(&self.destination, candidates);
        self.events.push(AllocationEvent::Opened(SessionOpened::new(
            self.order_id,
            session.id(),
            OrderSide::Buy,
            session.candidates().len(),
        )));
        session
    }

    /// Commits a funding session and writes the result into the shell.
    pub fn commit_funding(
        &mut self,
        session: StagedEditSession,
        shell: &mut OrderShell,
    ) -> Vec<AllocationEntry> {
        let session_id = session.id();
        let entries = session.commit(&mut self.funding);
        self.events
            .push(AllocationEvent::Committed(SessionCommitted::new(
                self.order_id,
                session_id,
                OrderSide::Buy,
                entries.clone(),
                self.funding.current_allocation(),
            )));
        self.write_funding(shell);
        entries
    }

    /// Commits a destination session and writes the result into the shell.
    pub fn commit_destination(
        &mut self,
        session: StagedEditSession,
        shell: &mut OrderShell,
    ) -> Vec<AllocationEntry> {
        let session_id = session.id();
        let entries = session.commit(&mut self.destination);
        self.events
            .push(AllocationEvent::Committed(SessionCommitted::new(
                self.order_id,
                session_id,
                OrderSide::Buy,
                entries.clone(),
                self.destination.current_allocation(),
            )));
        self.write_destination(shell);
        entries
    }

    /// Discards a session without touching any ledger.
    pub fn discard_session(&mut self, session: StagedEditSession) {
        self.events
            .push(AllocationEvent::Discarded(SessionDiscarded::new(
                self.order_id,
                session.id(),
                OrderSide::Buy,
                session.is_dirty(),
            )));
        session.discard();
    }

    /// Writes both ledgers into the shell.
    pub fn serialize(&self, shell: &mut OrderShell) {
        self.write_funding(shell);
        self.write_destination(shell);
    }

    fn write_funding(&self, shell: &mut OrderShell) {
        let mut records = Vec::with_capacity(self.funding.len());
        for entry in self.funding.encode() {
            // Source type comes from the catalog, never from the ledger.
            let Some(entity) = self.catalog.find_by_id(&entry.entity_id) else {
                tracing::warn!(entity_id = %entry.entity_id, "funding entity vanished from catalog; skipping");
                continue;
            };
            let Some(source_type) = SourceType::from_kind(entity.kind()) else {
                tracing::warn!(entity_id = %entry.entity_id, kind = %entity.kind(), "entity kind cannot fund an order; skipping");
                continue;
            };
            records.push(FundingAllocation::new(
                entry.entity_id,
                source_type,
                entry.value.get(),
                self.currency.clone(),
            ));
        }
        shell.replace_funding(records);
    }

    fn write_destination(&self, shell: &mut OrderShell) {
        let records: Vec<DepositAllocation> = self
            .destination
            .encode()
            .into_iter()
            .map(|entry| DepositAllocation::portfolio(entry.entity_id, entry.value.get()))
            .collect();
        shell.merge_deposits(DestinationType::Portfolio, records);
    }

    /// Entities allocated beyond their catalog capacity, across both
    /// ledgers. A warning, never a block: capacity figures are a
    /// snapshot that may be stale.
    #[must_use]
    pub fn capacity_warnings(&self) -> Vec<EntityId> {
        let mut warnings = Vec::new();
        for ledger in [&self.funding, &self.destination] {
            for (id, value) in ledger.iter() {
                if let Some(entity) = self.catalog.find_by_id(id) {
                    if value.get() > entity.available_capacity().get() {
                        warnings.push(id.clone());
                    }
                }
            }
        }
        warnings
    }

    /// Drains the accumulated session events.
    pub fn drain_events(&mut self) -> Vec<AllocationEvent> {
        std::mem::take(&mut self.events)
    }

    /// Returns the funding ledger.
    #[inline]
    #[must_use]
    pub const fn funding(&self) -> &AllocationLedger {
        &self.funding
    }

    /// Returns the destination ledger.
    #[inline]
    #[must_use]
    pub const fn destination(&self) -> &AllocationLedger {
        &self.destination
    }

    /// Returns the order id.
    #[inline]
    #[must_use]
    pub const fn order_id(&self) -> OrderId {
        self.order_id
    }

    /// Returns the order quantity.
    #[inline]
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Returns the order price.
    #[inline]
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Returns the order currency.
    #[inline]
    #[must_use]
    pub const fn currency(&self) -> &CurrencyCode {
        &self.currency
    }
}
