//! In-memory ledger of clients, reservations and payments
//!
//! The store is an explicit object: construct one at startup and hand it to
//! whatever layer needs it. All operations are synchronous and either apply
//! completely or leave the ledger untouched.

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::hash::Hash;
use tracing::{debug, info, warn};

use core_kernel::{ClientId, IdGenerator, Money, PaymentId, ReservationId};
use crate::billing;
use crate::client::{Client, NewClient};
use crate::config::LedgerConfig;
use crate::error::LodgingError;
use crate::payment::{Payment, PaymentMethod};
use crate::report::{self, ReportRow};
use crate::reservation::{self, Reservation, ReservationStatus, StayAction};

/// How a reservation names its client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientRef {
    /// An existing client, by identifier
    Id(ClientId),
    /// Best-effort lookup by exact name
    ///
    /// No match registers a new client with that name. More than one match
    /// is rejected as ambiguous.
    Name(String),
}

impl ClientRef {
    pub fn by_name(name: impl Into<String>) -> Self {
        ClientRef::Name(name.into())
    }
}

impl From<ClientId> for ClientRef {
    fn from(id: ClientId) -> Self {
        ClientRef::Id(id)
    }
}

/// Keyed collection that remembers insertion order
#[derive(Debug)]
struct Registry<K, V> {
    items: HashMap<K, V>,
    order: Vec<K>,
}

impl<K: Eq + Hash + Clone, V> Registry<K, V> {
    fn new() -> Self {
        Self {
            items: HashMap::new(),
            order: Vec::new(),
        }
    }

    fn insert(&mut self, key: K, value: V) {
        if self.items.insert(key.clone(), value).is_none() {
            self.order.push(key);
        }
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        let value = self.items.remove(key)?;
        self.order.retain(|k| k != key);
        Some(value)
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.items.get(key)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.items.get_mut(key)
    }

    fn contains(&self, key: &K) -> bool {
        self.items.contains_key(key)
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn values(&self) -> impl Iterator<Item = &V> {
        self.order.iter().filter_map(move |k| self.items.get(k))
    }
}

/// Draws an identifier not yet present in `registry`
fn allocate_id<K, V>(
    ids: &mut IdGenerator,
    max_attempts: u32,
    registry: &Registry<K, V>,
    kind: &'static str,
) -> Result<K, LodgingError>
where
    K: Eq + Hash + Clone + From<String>,
{
    ids.new_unique_id(max_attempts, |candidate| {
        let taken = registry.contains(&K::from(candidate.to_string()));
        if taken {
            debug!(kind, candidate, "identifier collision, drawing again");
        }
        taken
    })
    .map(K::from)
    .ok_or(LodgingError::IdSpaceExhausted(kind))
}

/// The authoritative store of clients, reservations and payments
///
/// # Invariants
///
/// - Identifiers are unique within each collection
/// - Reservation state only moves Booked -> CheckedIn -> CheckedOut
/// - Deletes never cascade; references resolve to `None` once the target is gone
#[derive(Debug)]
pub struct LedgerStore {
    config: LedgerConfig,
    ids: IdGenerator,
    clients: Registry<ClientId, Client>,
    reservations: Registry<ReservationId, Reservation>,
    payments: Registry<PaymentId, Payment>,
}

impl LedgerStore {
    /// Creates an empty ledger
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid
    pub fn new(config: LedgerConfig) -> Result<Self, LodgingError> {
        config.validate()?;

        let ids = match config.id_seed {
            Some(seed) => IdGenerator::seeded(config.id_space, seed)?,
            None => IdGenerator::new(config.id_space)?,
        };

        info!(
            rate_per_night = %config.rate_per_night,
            currency = %config.currency,
            id_space = ?config.id_space,
            "ledger opened"
        );

        Ok(Self {
            config,
            ids,
            clients: Registry::new(),
            reservations: Registry::new(),
            payments: Registry::new(),
        })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// The configured nightly rate
    pub fn rate_per_night(&self) -> Money {
        self.config.rate()
    }

    // ------------------------------------------------------------------
    // Clients
    // ------------------------------------------------------------------

    /// Registers a client
    ///
    /// # Errors
    ///
    /// - `Validation` if the name is blank
    /// - `IdSpaceExhausted` if no free identifier could be drawn
    pub fn create_client(&mut self, details: NewClient) -> Result<Client, LodgingError> {
        details.validate()?;
        let id = allocate_id(
            &mut self.ids,
            self.config.max_id_attempts,
            &self.clients,
            ClientId::kind(),
        )?;

        let client = Client::register(id, details);
        info!(client_id = %client.id, name = %client.name, "client registered");
        self.clients.insert(client.id.clone(), client.clone());
        Ok(client)
    }

    /// Removes a client; reservations naming it are kept
    pub fn delete_client(&mut self, id: &ClientId) -> bool {
        match self.clients.remove(id) {
            Some(client) => {
                info!(client_id = %id, name = %client.name, "client deleted");
                true
            }
            None => {
                debug!(client_id = %id, "delete of unknown client ignored");
                false
            }
        }
    }

    pub fn client(&self, id: &ClientId) -> Option<&Client> {
        self.clients.get(id)
    }

    /// All clients whose name matches exactly, in registration order
    pub fn clients_named(&self, name: &str) -> Vec<&Client> {
        let name = name.trim();
        self.clients.values().filter(|c| c.name == name).collect()
    }

    pub fn list_clients(&self) -> Vec<&Client> {
        self.clients.values().collect()
    }

    // ------------------------------------------------------------------
    // Reservations
    // ------------------------------------------------------------------

    /// Books a room
    ///
    /// Dates are `YYYY-MM-DD` strings as entered by the caller. A client
    /// named but not yet registered is registered together with the
    /// reservation, and only if the reservation is created.
    ///
    /// # Errors
    ///
    /// - `InvalidDate` if either date cannot be parsed
    /// - `InvalidStayPeriod` unless check-out is after check-in
    /// - `ClientNotFound` for an unknown client identifier
    /// - `AmbiguousClient` if the name matches several clients
    /// - `Validation` for a blank room number or client name
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let reservation = store.create_reservation(
    ///     ClientRef::by_name("Alice"),
    ///     "101",
    ///     "2024-01-01",
    ///     "2024-01-04",
    /// )?;
    /// assert_eq!(reservation.nights(), 3);
    /// ```
    pub fn create_reservation(
        &mut self,
        client: ClientRef,
        room_number: &str,
        check_in: &str,
        check_out: &str,
    ) -> Result<Reservation, LodgingError> {
        let check_in_date = reservation::parse_stay_date("check_in", check_in)?;
        let check_out_date = reservation::parse_stay_date("check_out", check_out)?;
        reservation::validate_stay(room_number, check_in_date, check_out_date)?;

        let (client_id, new_client) = match client {
            ClientRef::Id(id) => {
                if !self.clients.contains(&id) {
                    return Err(LodgingError::ClientNotFound(id.to_string()));
                }
                (id, None)
            }
            ClientRef::Name(name) => self.resolve_client_name(name)?,
        };

        let reservation_id = allocate_id(
            &mut self.ids,
            self.config.max_id_attempts,
            &self.reservations,
            ReservationId::kind(),
        )?;
        let reservation = Reservation::book(
            reservation_id,
            client_id,
            room_number,
            check_in_date,
            check_out_date,
        )?;

        if let Some(client) = new_client {
            info!(client_id = %client.id, name = %client.name, "client registered with reservation");
            self.clients.insert(client.id.clone(), client);
        }

        info!(
            reservation_id = %reservation.id,
            client_id = %reservation.client_id,
            room = %reservation.room_number,
            nights = reservation.nights(),
            "reservation booked"
        );
        self.reservations
            .insert(reservation.id.clone(), reservation.clone());
        Ok(reservation)
    }

    /// Finds the client for a name, preparing (not inserting) a new one when none matches
    fn resolve_client_name(
        &mut self,
        name: String,
    ) -> Result<(ClientId, Option<Client>), LodgingError> {
        let matches: Vec<ClientId> = self
            .clients_named(&name)
            .into_iter()
            .map(|c| c.id.clone())
            .collect();

        match matches.as_slice() {
            [] => {
                let details = NewClient::new(name);
                details.validate()?;
                let id = allocate_id(
                    &mut self.ids,
                    self.config.max_id_attempts,
                    &self.clients,
                    ClientId::kind(),
                )?;
                let client = Client::register(id.clone(), details);
                Ok((id, Some(client)))
            }
            [only] => Ok((only.clone(), None)),
            several => {
                warn!(name = %name, matches = several.len(), "ambiguous client name");
                Err(LodgingError::AmbiguousClient {
                    name: name.trim().to_string(),
                    matches: several.len(),
                })
            }
        }
    }

    /// Removes a reservation in any state; its payments are kept
    pub fn delete_reservation(&mut self, id: &ReservationId) -> bool {
        match self.reservations.remove(id) {
            Some(reservation) => {
                info!(
                    reservation_id = %id,
                    status = %reservation.status(),
                    "reservation deleted"
                );
                true
            }
            None => {
                debug!(reservation_id = %id, "delete of unknown reservation ignored");
                false
            }
        }
    }

    pub fn reservation(&self, id: &ReservationId) -> Option<&Reservation> {
        self.reservations.get(id)
    }

    /// The client a reservation points at, if it still exists
    pub fn client_of(&self, reservation: &Reservation) -> Option<&Client> {
        self.clients.get(&reservation.client_id)
    }

    pub fn list_reservations(&self) -> Vec<&Reservation> {
        self.reservations.values().collect()
    }

    /// Reservations whose guest has not arrived
    pub fn pending_checkins(&self) -> Vec<&Reservation> {
        self.reservations_in(ReservationStatus::Booked)
    }

    /// Reservations whose guest is currently staying
    pub fn active_checkins(&self) -> Vec<&Reservation> {
        self.reservations_in(ReservationStatus::CheckedIn)
    }

    fn reservations_in(&self, status: ReservationStatus) -> Vec<&Reservation> {
        self.reservations
            .values()
            .filter(|r| r.status() == status)
            .collect()
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Checks a guest in
    ///
    /// # Errors
    ///
    /// - `ReservationNotFound` for an unknown identifier
    /// - `InvalidStateTransition` if already checked in or out
    pub fn checkin(&mut self, id: &ReservationId) -> Result<(), LodgingError> {
        let reservation = self
            .reservations
            .get_mut(id)
            .ok_or_else(|| LodgingError::ReservationNotFound(id.to_string()))?;

        if let Err(err) = reservation.apply(StayAction::CheckIn) {
            warn!(reservation_id = %id, status = %reservation.status(), "check-in refused");
            return Err(err);
        }

        info!(reservation_id = %id, room = %reservation.room_number, "guest checked in");
        Ok(())
    }

    /// Checks a guest out and returns the amount due
    ///
    /// # Errors
    ///
    /// - `ReservationNotFound` for an unknown identifier
    /// - `InvalidStateTransition` unless the guest is checked in
    pub fn checkout(&mut self, id: &ReservationId) -> Result<Money, LodgingError> {
        let rate = self.config.rate();
        let reservation = self
            .reservations
            .get_mut(id)
            .ok_or_else(|| LodgingError::ReservationNotFound(id.to_string()))?;

        if !reservation.can_apply(StayAction::CheckOut) {
            warn!(reservation_id = %id, status = %reservation.status(), "checkout refused");
            return Err(reservation.rejection(StayAction::CheckOut));
        }

        let amount_due = billing::reservation_charge(reservation, rate)?;
        reservation.apply(StayAction::CheckOut)?;

        info!(
            reservation_id = %id,
            room = %reservation.room_number,
            nights = reservation.nights(),
            amount_due = %amount_due,
            "guest checked out"
        );
        Ok(amount_due)
    }

    /// Checkout in flag form: `(true, amount_due)` or `(false, 0)`
    pub fn checkout_outcome(&mut self, id: &ReservationId) -> (bool, Money) {
        match self.checkout(id) {
            Ok(amount_due) => (true, amount_due),
            Err(_) => (false, Money::zero(self.config.currency)),
        }
    }

    // ------------------------------------------------------------------
    // Payments
    // ------------------------------------------------------------------

    /// Records a payment against a reservation in any lifecycle state
    ///
    /// # Errors
    ///
    /// - `ReservationNotFound` for an unknown identifier
    /// - `Money` if the amount is negative
    pub fn process_payment(
        &mut self,
        reservation_id: &ReservationId,
        method: PaymentMethod,
        amount: Decimal,
    ) -> Result<Payment, LodgingError> {
        if !self.reservations.contains(reservation_id) {
            return Err(LodgingError::ReservationNotFound(reservation_id.to_string()));
        }
        let amount = Money::non_negative(amount, self.config.currency)?;
        let id = allocate_id(
            &mut self.ids,
            self.config.max_id_attempts,
            &self.payments,
            PaymentId::kind(),
        )?;

        let payment = Payment::record(id, reservation_id.clone(), method, amount);
        info!(
            payment_id = %payment.id,
            reservation_id = %reservation_id,
            method = %payment.method,
            amount = %payment.amount,
            "payment recorded"
        );
        self.payments.insert(payment.id.clone(), payment.clone());
        Ok(payment)
    }

    pub fn payment(&self, id: &PaymentId) -> Option<&Payment> {
        self.payments.get(id)
    }

    /// Payments recorded against one reservation
    pub fn payments_for(&self, reservation_id: &ReservationId) -> Vec<&Payment> {
        self.payments
            .values()
            .filter(|p| &p.reservation_id == reservation_id)
            .collect()
    }

    pub fn list_payments(&self) -> Vec<&Payment> {
        self.payments.values().collect()
    }

    // ------------------------------------------------------------------
    // Reporting
    // ------------------------------------------------------------------

    /// Per-client billing report at the configured rate
    pub fn report(&self) -> Vec<ReportRow> {
        report::generate_report(self, self.config.rate_per_night)
    }

    /// Counts of clients, reservations and payments
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.clients.len(), self.reservations.len(), self.payments.len())
    }
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self {
            config: LedgerConfig::default(),
            ids: IdGenerator::default(),
            clients: Registry::new(),
            reservations: Registry::new(),
            payments: Registry::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::IdSpace;
    use rust_decimal_macros::dec;

    fn store() -> LedgerStore {
        LedgerStore::new(LedgerConfig::default().with_seed(1)).unwrap()
    }

    #[test]
    fn test_registry_keeps_insertion_order() {
        let mut registry = Registry::new();
        registry.insert("b", 2);
        registry.insert("a", 1);
        registry.insert("c", 3);
        registry.remove(&"a");
        let values: Vec<_> = registry.values().copied().collect();
        assert_eq!(values, vec![2, 3]);
    }

    #[test]
    fn test_registry_reinsert_keeps_position() {
        let mut registry = Registry::new();
        registry.insert("a", 1);
        registry.insert("b", 2);
        registry.insert("a", 10);
        let values: Vec<_> = registry.values().copied().collect();
        assert_eq!(values, vec![10, 2]);
    }

    #[test]
    fn test_checkout_bills_nights() {
        let mut store = store();
        let reservation = store
            .create_reservation(ClientRef::by_name("Alice"), "101", "2024-01-01", "2024-01-04")
            .unwrap();
        store.checkin(&reservation.id).unwrap();
        let due = store.checkout(&reservation.id).unwrap();
        assert_eq!(due.amount(), dec!(300));
    }

    #[test]
    fn test_tiny_id_space_stays_unique() {
        let config = LedgerConfig::default()
            .with_id_space(IdSpace::Numeric { digits: 1 })
            .with_seed(9);
        let mut store = LedgerStore::new(config).unwrap();

        let mut exhausted = false;
        for i in 0..50 {
            match store.create_client(NewClient::new(format!("Guest {}", i))) {
                Ok(_) => {}
                Err(LodgingError::IdSpaceExhausted(kind)) => {
                    assert_eq!(kind, "client");
                    exhausted = true;
                }
                Err(other) => panic!("unexpected error: {:?}", other),
            }
        }

        assert!(exhausted);
        assert!(store.list_clients().len() <= 9);
        let mut ids: Vec<_> = store.list_clients().iter().map(|c| c.id.clone()).collect();
        let before = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }
}
