//! # Sell-Side Orchestrator
//!
//! Composes the two ledgers of a sell order and translates them to and
//! from the order shell.
//!
//! A sell order draws shares out of portfolios (the *source* ledger,
//! denominated in shares and capped per portfolio by its holding of the
//! instrument, not its whole balance) and deposits the proceeds into cash
//! accounts (the *destination* ledger, denominated in the order
//! currency). A destination account held in another currency is flagged
//! as conversion-required; the flag is informational only and no rate is
//! ever applied here.
//!
//! # Examples
//!
//! ```
//! use order_alloc::application::services::sell_side::SellSideOrchestrator;
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
//!     CapacityEntity::portfolio(
//!         EntityId::new("port-1"),
//!         "Growth Mandate",
//!         CurrencyCode::new("USD").unwrap(),
//!         AllocValue::new(dec!(100000)),
//!     ),
//! ]));
//!
//! let mut orchestrator = SellSideOrchestrator::new(
//!     OrderId::new_v4(),
//!     catalog,
//!     Quantity::new(50.0).unwrap(),
//!     Price::new(20.0).unwrap(),
//!     CurrencyCode::new("USD").unwrap(),
//!     [(EntityId::new("port-1"), AllocValue::new(dec!(80)))],
//! )
//! .unwrap();
//!
//! let session = orchestrator.open_source_session();
//! // The cap is the holding (80), not the portfolio balance.
//! assert_eq!(
//!     session.candidate(&EntityId::new("port-1")).unwrap().capacity().get(),
//!     dec!(80),
//! );
//! ```

use crate::domain::catalog::CapacityCatalog;
use crate::domain::entities::ledger::{AllocationEntry, AllocationLedger};
use crate::domain::entities::order_shell::{
    DepositAllocation, InstrumentAllocation, OrderShell,
};
use crate::domain::entities::staged_session::{SessionCandidate, StagedEditSession};
use crate::domain::errors::DomainResult;
use crate::domain::events::session_events::{
    AllocationEvent, SessionCommitted, SessionDiscarded, SessionOpened,
};
use crate::domain::value_objects::{
    AllocValue, CheckedArithmetic, CurrencyCode, DestinationType, EntityId, EntityKind,
    LedgerUnit, OrderId, OrderSide, Price, Quantity,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

/// One destination row as shown in the proceeds UI.
///
/// Carries the conversion-required flag next to the allocated amount;
/// the flag never reaches the wire (the order shell has no field for it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationLine {
    /// The receiving cash account.
    pub entity_id: EntityId,
    /// Amount allocated, in the order currency.
    pub amount: AllocValue,
    /// The account's own currency.
    pub account_currency: CurrencyCode,
    /// True when the account currency differs from the order currency.
    pub conversion_required: bool,
}

/// Orchestrates the source and destination ledgers of a sell order.
#[derive(Debug)]
pub struct SellSideOrchestrator {
    order_id: OrderId,
    catalog: Arc<dyn CapacityCatalog>,
    quantity: Quantity,
    price: Price,
    currency: CurrencyCode,
    /// Per-portfolio holdings of the instrument being sold.
    holdings: HashMap<EntityId, AllocValue>,
    /// `quantity x price`, computed once at construction.
    target_amount: Decimal,
    source: AllocationLedger,
    destination: AllocationLedger,
    events: Vec<AllocationEvent>,
}

impl SellSideOrchestrator {
    /// Creates the orchestrator with empty ledgers.
    ///
    /// `holdings` maps each portfolio to its holding of the instrument
    /// being sold; portfolios without an entry count as holding zero.
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
        holdings: impl IntoIterator<Item = (EntityId, AllocValue)>,
    ) -> DomainResult<Self> {
        let target_amount = quantity.get().safe_mul(price.get())?;
        let source = AllocationLedger::new(quantity.get(), LedgerUnit::Shares)?;
        let destination =
            AllocationLedger::new(target_amount, LedgerUnit::Currency(currency.clone()))?;
        Ok(Self {
            order_id,
            catalog,
            quantity,
            price,
            currency,
            holdings: holdings.into_iter().collect(),
            target_amount,
            source,
            destination,
            events: Vec::new(),
        })
    }

    /// Rebuilds both ledgers from the order shell's arrays.
    pub fn mount(&mut self, shell: &OrderShell) {
        self.source = AllocationLedger::decode(
            self.quantity.get(),
            LedgerUnit::Shares,
            shell
                .instrument_allocations
                .iter()
                .map(|i| (i.portfolio_id.clone(), i.quantity)),
            self.catalog.as_ref(),
        );
        self.destination = AllocationLedger::decode(
            self.target_amount,
            LedgerUnit::Currency(self.currency.clone()),
            shell
                .deposits_of(DestinationType::Cash)
                .filter_map(|d| d.amount.map(|a| (d.destination_id.clone(), a))),
            self.catalog.as_ref(),
        );
    }

    /// Returns the holding of the instrument in one portfolio.
    #[must_use]
    pub fn holding_for(&self, entity_id: &EntityId) -> AllocValue {
        self.holdings
            .get(entity_id)
            .copied()
            .unwrap_or(AllocValue::ZERO)
    }

    /// Opens a staged session over the source portfolios.
    ///
    /// Each candidate's effective capacity is
    /// `min(available_capacity, holding)`: a portfolio cannot sensibly
    /// contribute more of the instrument than it holds.
    #[must_use]
    pub fn open_source_session(&mut self) -> StagedEditSession {
        let candidates: Vec<SessionCandidate> = self
            .catalog
            .of_kind(EntityKind::Portfolio)
            .iter()
            .map(|entity| {
                let cap = entity.available_capacity().min(self.holding_for(entity.id()));
                SessionCandidate::from_entity(entity).with_capacity(cap)
            })
            .collect();
        let session = StagedEditSession::open(&self.source, candidates);
        self.events.push(AllocationEvent::Opened(SessionOpened::new(
            self.order_id,
            session.id(),
            OrderSide::Sell,
            session.candidates().len(),
        )));
        session
    }

    /// Opens a staged session over the destination cash accounts.
    #[must_use]
    pub fn open_destination_session(&mut self) -> StagedEditSession {
        let candidates: Vec<SessionCandidate> = self
            .catalog
            .of_kind(EntityKind::Cash)
            .iter()
            .map(SessionCandidate::from_entity)
            .collect();
        let session = StagedEditSession::open(&self.destination, candidates);
        self.events.push(AllocationEvent::Opened(SessionOpened::new(
            self.order_id,
            session.id(),
            OrderSide::Sell,
            session.candidates().len(),
        )));
        session
    }

    /// Commits a source session and writes the result into the shell.
    pub fn commit_source(
        &mut self,
        session: StagedEditSession,
        shell: &mut OrderShell,
    ) -> Vec<AllocationEntry> {
        let session_id = session.id();
        let entries = session.commit(&mut self.source);
        self.events
            .push(AllocationEvent::Committed(SessionCommitted::new(
                self.order_id,
                session_id,
                OrderSide::Sell,
                entries.clone(),
                self.source.current_allocation(),
            )));
        self.write_source(shell);
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
                OrderSide::Sell,
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
                OrderSide::Sell,
                session.is_dirty(),
            )));
        session.discard();
    }

    /// Writes both ledgers into the shell.
    pub fn serialize(&self, shell: &mut OrderShell) {
        self.write_source(shell);
        self.write_destination(shell);
    }

    fn write_source(&self, shell: &mut OrderShell) {
        let records: Vec<InstrumentAllocation> = self
            .source
            .encode()
            .into_iter()
            .map(|entry| InstrumentAllocation::new(entry.entity_id, entry.value.get()))
            .collect();
        shell.replace_instrument(records);
    }

    fn write_destination(&self, shell: &mut OrderShell) {
        let records: Vec<DepositAllocation> = self
            .destination
            .encode()
            .into_iter()
            .map(|entry| {
                DepositAllocation::cash(entry.entity_id, entry.value.get(), self.currency.clone())
            })
            .collect();
        shell.merge_deposits(DestinationType::Cash, records);
    }

    /// Returns true if depositing into this account would require a
    /// currency conversion downstream. Informational only; no rate is
    /// computed here.
    #[must_use]
    pub fn conversion_required(&self, entity_id: &EntityId) -> bool {
        self.catalog
            .find_by_id(entity_id)
            .is_some_and(|entity| *entity.currency() != self.currency)
    }

    /// Returns the destination rows with their conversion flags, in
    /// ledger insertion order.
    #[must_use]
    pub fn destination_lines(&self) -> Vec<DestinationLine> {
        self.destination
            .iter()
            .filter_map(|(id, value)| {
                let entity = self.catalog.find_by_id(id)?;
                Some(DestinationLine {
                    entity_id: id.clone(),
                    amount: value,
                    account_currency: entity.currency().clone(),
                    conversion_required: *entity.currency() != self.currency,
                })
            })
            .collect()
    }

    /// Entities allocated beyond their effective capacity, across both
    /// ledgers. For source portfolios the effective capacity is the
    /// holding-capped figure. A warning, never a block.
    #[must_use]
    pub fn capacity_warnings(&self) -> Vec<EntityId> {
        let mut warnings = Vec::new();
        for (id, value) in self.source.iter() {
            if let Some(entity) = self.catalog.find_by_id(id) {
                let cap = entity.available_capacity().min(self.holding_for(id));
                if value.get() > cap.get() {
                    warnings.push(id.clone());
                }
            }
        }
        for (id, value) in self.destination.iter() {
            if let Some(entity) = self.catalog.find_by_id(id) {
                if value.get() > entity.available_capacity().get() {
                    warnings.push(id.clone());
                }
            }
        }
        warnings
    }

    /// Drains the accumulated session events.
    pub fn drain_events(&mut self) -> Vec<AllocationEvent> {
        std::mem::take(&mut self.events)
    }

    /// Returns the source ledger.
    #[inline]
    #[must_use]
    pub const fn source(&self) -> &AllocationLedger {
        &self.source
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
