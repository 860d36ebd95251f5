//! A ledger shared between concurrent callers
//!
//! Mutations take the write lock for their whole read-check-write sequence,
//! so two check-ins racing on one reservation cannot both succeed. Reads and
//! reports take the read lock and see a single consistent snapshot.

use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::RwLock;

use core_kernel::{ClientId, Money, ReservationId};
use crate::client::{Client, NewClient};
use crate::error::LodgingError;
use crate::ledger::{ClientRef, LedgerStore};
use crate::payment::{Payment, PaymentMethod};
use crate::report::ReportRow;
use crate::reservation::Reservation;

/// Cloneable handle to one [`LedgerStore`] behind a single-writer lock
#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<RwLock<LedgerStore>>,
}

impl SharedLedger {
    pub fn new(store: LedgerStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Runs a read-only closure against the store
    pub async fn read<R>(&self, f: impl FnOnce(&LedgerStore) -> R) -> R {
        let store = self.inner.read().await;
        f(&store)
    }

    /// Runs a closure holding the write lock, for multi-step updates
    ///
    /// Steps that succeeded before a failing one are kept.
    pub async fn write<R>(&self, f: impl FnOnce(&mut LedgerStore) -> R) -> R {
        let mut store = self.inner.write().await;
        f(&mut store)
    }

    pub async fn create_client(&self, details: NewClient) -> Result<Client, LodgingError> {
        self.inner.write().await.create_client(details)
    }

    pub async fn delete_client(&self, id: &ClientId) -> bool {
        self.inner.write().await.delete_client(id)
    }

    pub async fn create_reservation(
        &self,
        client: ClientRef,
        room_number: &str,
        check_in: &str,
        check_out: &str,
    ) -> Result<Reservation, LodgingError> {
        self.inner
            .write()
            .await
            .create_reservation(client, room_number, check_in, check_out)
    }

    pub async fn delete_reservation(&self, id: &ReservationId) -> bool {
        self.inner.write().await.delete_reservation(id)
    }

    pub async fn checkin(&self, id: &ReservationId) -> Result<(), LodgingError> {
        self.inner.write().await.checkin(id)
    }

    pub async fn checkout(&self, id: &ReservationId) -> Result<Money, LodgingError> {
        self.inner.write().await.checkout(id)
    }

    pub async fn process_payment(
        &self,
        reservation_id: &ReservationId,
        method: PaymentMethod,
        amount: Decimal,
    ) -> Result<Payment, LodgingError> {
        self.inner
            .write()
            .await
            .process_payment(reservation_id, method, amount)
    }

    pub async fn clients(&self) -> Vec<Client> {
        self.read(|store| store.list_clients().into_iter().cloned().collect())
            .await
    }

    pub async fn reservations(&self) -> Vec<Reservation> {
        self.read(|store| store.list_reservations().into_iter().cloned().collect())
            .await
    }

    pub async fn payments(&self) -> Vec<Payment> {
        self.read(|store| store.list_payments().into_iter().cloned().collect())
            .await
    }

    pub async fn pending_checkins(&self) -> Vec<Reservation> {
        self.read(|store| store.pending_checkins().into_iter().cloned().collect())
            .await
    }

    pub async fn active_checkins(&self) -> Vec<Reservation> {
        self.read(|store| store.active_checkins().into_iter().cloned().collect())
            .await
    }

    pub async fn report(&self) -> Vec<ReportRow> {
        self.read(|store| store.report()).await
    }
}

impl From<LedgerStore> for SharedLedger {
    fn from(store: LedgerStore) -> Self {
        Self::new(store)
    }
}
