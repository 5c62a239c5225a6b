//! Rental service — the start/end rental sagas and the plain rental
//! use-cases.
//!
//! Both sagas follow the same shape: preconditions are checked before any
//! mutation, the local rental row is committed first, and only then are the
//! external side effects issued — in parallel, all awaited. A failed side
//! effect never rolls back the committed row; it is logged and surfaced as a
//! warning in the result so monitoring can detect drift between local and
//! external state.

use std::future::Future;
use std::time::Duration;

use scootrent_domain::error::{ConflictError, NotFoundError, ScootRentError};
use scootrent_domain::id::{CardId, RentalId, ScooterSerial, UserId};
use scootrent_domain::payment::Charge;
use scootrent_domain::pricing;
use scootrent_domain::rental::{Rental, RentalDraft};
use scootrent_domain::scooter::{Availability, AvailabilityUpdate, Position};
use scootrent_domain::time::{Timestamp, now};

use crate::ports::{LockControl, PaymentGateway, RentalStore, ScooterRegistry, UserRegistry};

/// Pause before the single retry granted to idempotent upstream calls.
const RETRY_DELAY: Duration = Duration::from_millis(250);

/// Outcome of a successful [`RentalService::start_rental`].
#[derive(Debug)]
pub struct RentalStarted {
    /// The committed rental row.
    pub rental: Rental,
    /// Side effects that could not be confirmed; empty on full success.
    pub warnings: Vec<String>,
}

/// Outcome of a successful [`RentalService::end_rental`].
#[derive(Debug)]
pub struct RentalClosed {
    /// The rental row with `ended_at` and `amount` set.
    pub rental: Rental,
    /// The amount billed for the rental, also stored on the row.
    pub amount: f64,
    /// Side effects that could not be confirmed; empty on full success.
    pub warnings: Vec<String>,
}

/// Orchestrates rentals across the rental store and the external
/// collaborators. The sole writer of the rental store.
pub struct RentalService<R, S, U, L, P> {
    store: R,
    scooters: S,
    users: U,
    locks: L,
    payments: P,
}

impl<R, S, U, L, P> RentalService<R, S, U, L, P>
where
    R: RentalStore,
    S: ScooterRegistry,
    U: UserRegistry,
    L: LockControl,
    P: PaymentGateway,
{
    /// Create a new service with all collaborators injected.
    pub fn new(store: R, scooters: S, users: U, locks: L, payments: P) -> Self {
        Self {
            store,
            scooters,
            users,
            locks,
            payments,
        }
    }

    /// Start a rental: check preconditions, commit the rental row, then
    /// unlock the scooter and mark it in use.
    ///
    /// # Errors
    ///
    /// - [`ScootRentError::NotFound`] when the scooter or user does not exist
    /// - [`ScootRentError::Conflict`] when the scooter is not available
    /// - [`ScootRentError::Unavailable`] when a precondition lookup fails —
    ///   nothing has been mutated anywhere in that case
    /// - [`ScootRentError::Storage`] when the local insert fails
    pub async fn start_rental(
        &self,
        scooter_id: ScooterSerial,
        user_id: UserId,
        card: CardId,
    ) -> Result<RentalStarted, ScootRentError> {
        // The registries are independent services; look both up concurrently.
        let (scooter, user) = tokio::join!(
            self.scooters.get_scooter(scooter_id),
            self.users.get_user(user_id),
        );
        let scooter = scooter?.ok_or_else(|| NotFoundError {
            entity: "Scooter",
            id: scooter_id.to_string(),
        })?;
        user?.ok_or_else(|| NotFoundError {
            entity: "User",
            id: user_id.to_string(),
        })?;
        if !scooter.availability.is_available() {
            return Err(ConflictError::ScooterNotAvailable { serial: scooter_id }.into());
        }

        // The rental row is the source of truth; it must be committed before
        // any external effect is issued.
        let rental = self
            .store
            .insert(RentalDraft::new(scooter_id, user_id, card, now()))
            .await?;
        tracing::info!(rental = %rental.id, scooter = %scooter_id, user = %user_id, "rental opened");

        let (unlock, availability) = tokio::join!(
            retry_once("lock controller", || self.locks.set_lock(scooter_id, false)),
            retry_once("scooter registry", || {
                self.scooters
                    .set_availability(scooter_id, AvailabilityUpdate::to(Availability::InUse))
            }),
        );
        let mut warnings = Vec::new();
        note_failure(unlock, "scooter could not be confirmed unlocked", &mut warnings);
        note_failure(
            availability,
            "scooter could not be marked in use",
            &mut warnings,
        );

        Ok(RentalStarted { rental, warnings })
    }

    /// End a rental: compute the cost, close the row, then lock the scooter,
    /// mark it available at the drop-off position, and submit the payment.
    ///
    /// Closing an already-closed rental fails with
    /// [`ScootRentError::Conflict`] and never recomputes or resubmits the
    /// charge.
    ///
    /// # Errors
    ///
    /// - [`ScootRentError::NotFound`] when no rental with `id` exists
    /// - [`ScootRentError::Validation`] when `ended_at` is at or before the
    ///   rental's start
    /// - [`ScootRentError::Conflict`] when the rental is already closed
    /// - [`ScootRentError::Storage`] when the local update fails
    pub async fn end_rental(
        &self,
        id: RentalId,
        ended_at: Timestamp,
        position: Option<Position>,
    ) -> Result<RentalClosed, ScootRentError> {
        let rental = self.store.get_by_id(id).await?.ok_or_else(|| NotFoundError {
            entity: "Rental",
            id: id.to_string(),
        })?;
        if rental.is_closed() {
            return Err(ConflictError::RentalAlreadyClosed { id }.into());
        }

        let amount = pricing::rental_cost(rental.started_at, ended_at)?;

        let changed = self.store.close(id, ended_at, amount).await?;
        if changed == 0 {
            // Lost a race: the row was deleted or closed between the read and
            // the guarded update. Re-read to tell the two apart.
            return match self.store.get_by_id(id).await? {
                None => Err(NotFoundError {
                    entity: "Rental",
                    id: id.to_string(),
                }
                .into()),
                Some(_) => Err(ConflictError::RentalAlreadyClosed { id }.into()),
            };
        }
        tracing::info!(rental = %id, amount, "rental closed");

        let update = match position {
            Some(position) => AvailabilityUpdate::to(Availability::Available).at(position),
            None => AvailabilityUpdate::to(Availability::Available),
        };
        let charge = Charge {
            user: rental.user_id,
            amount,
            card: rental.card,
        };
        let (lock, availability, payment) = tokio::join!(
            retry_once("lock controller", || {
                self.locks.set_lock(rental.scooter_id, true)
            }),
            retry_once("scooter registry", || {
                self.scooters
                    .set_availability(rental.scooter_id, update.clone())
            }),
            // At-most-once: a failed charge is surfaced, never replayed.
            self.payments.submit(charge),
        );
        let mut warnings = Vec::new();
        note_failure(lock, "scooter could not be confirmed locked", &mut warnings);
        note_failure(
            availability,
            "scooter could not be marked available",
            &mut warnings,
        );
        note_failure(payment, "payment could not be submitted", &mut warnings);

        let rental = Rental {
            ended_at: Some(ended_at),
            amount: Some(amount),
            ..rental
        };
        Ok(RentalClosed {
            rental,
            amount,
            warnings,
        })
    }

    /// Look up a rental by id.
    ///
    /// # Errors
    ///
    /// Returns [`ScootRentError::NotFound`] when no rental with `id` exists,
    /// or a storage error from the store.
    pub async fn get_rental(&self, id: RentalId) -> Result<Rental, ScootRentError> {
        self.store.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Rental",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all rentals. An empty store is an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn list_rentals(&self) -> Result<Vec<Rental>, ScootRentError> {
        self.store.get_all().await
    }

    /// List all rentals taken by one user.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn list_by_user(&self, user: UserId) -> Result<Vec<Rental>, ScootRentError> {
        self.store.find_by_user(user).await
    }

    /// List all rentals of one scooter.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn list_by_scooter(
        &self,
        serial: ScooterSerial,
    ) -> Result<Vec<Rental>, ScootRentError> {
        self.store.find_by_scooter(serial).await
    }

    /// Administrative removal of a rental row. Unrelated to the saga; no
    /// external effect is issued.
    ///
    /// # Errors
    ///
    /// Returns [`ScootRentError::NotFound`] when no rental with `id` exists,
    /// or a storage error from the store.
    pub async fn delete_rental(&self, id: RentalId) -> Result<(), ScootRentError> {
        let changed = self.store.delete(id).await?;
        if changed == 0 {
            return Err(NotFoundError {
                entity: "Rental",
                id: id.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// Run an idempotent upstream call, granting it one retry after a short
/// pause. Never used for payment submission.
async fn retry_once<F, Fut>(upstream: &'static str, call: F) -> Result<(), ScootRentError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<(), ScootRentError>>,
{
    match call().await {
        Ok(()) => Ok(()),
        Err(err) => {
            tracing::warn!(error = %err, upstream, "upstream call failed, retrying once");
            tokio::time::sleep(RETRY_DELAY).await;
            call().await
        }
    }
}

fn note_failure(result: Result<(), ScootRentError>, warning: &str, warnings: &mut Vec<String>) {
    if let Err(err) = result {
        tracing::warn!(error = %err, "side effect failed after local commit");
        warnings.push(warning.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scootrent_domain::scooter::Scooter;
    use scootrent_domain::user::User;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct StoreInner {
        rows: Vec<Rental>,
        next_id: i64,
    }

    #[derive(Clone, Default)]
    struct InMemoryStore {
        inner: Arc<Mutex<StoreInner>>,
    }

    impl InMemoryStore {
        fn row_count(&self) -> usize {
            self.inner.lock().unwrap().rows.len()
        }

        fn remove(&self, id: RentalId) {
            let mut inner = self.inner.lock().unwrap();
            inner.rows.retain(|r| r.id != id);
        }
    }

    impl RentalStore for InMemoryStore {
        async fn insert(&self, draft: RentalDraft) -> Result<Rental, ScootRentError> {
            let mut inner = self.inner.lock().unwrap();
            inner.next_id += 1;
            let rental = draft.into_rental(RentalId::new(inner.next_id));
            inner.rows.push(rental.clone());
            Ok(rental)
        }

        async fn get_by_id(&self, id: RentalId) -> Result<Option<Rental>, ScootRentError> {
            let inner = self.inner.lock().unwrap();
            Ok(inner.rows.iter().find(|r| r.id == id).cloned())
        }

        async fn get_all(&self) -> Result<Vec<Rental>, ScootRentError> {
            Ok(self.inner.lock().unwrap().rows.clone())
        }

        async fn find_by_user(&self, user: UserId) -> Result<Vec<Rental>, ScootRentError> {
            let inner = self.inner.lock().unwrap();
            Ok(inner
                .rows
                .iter()
                .filter(|r| r.user_id == user)
                .cloned()
                .collect())
        }

        async fn find_by_scooter(
            &self,
            serial: ScooterSerial,
        ) -> Result<Vec<Rental>, ScootRentError> {
            let inner = self.inner.lock().unwrap();
            Ok(inner
                .rows
                .iter()
                .filter(|r| r.scooter_id == serial)
                .cloned()
                .collect())
        }

        async fn close(
            &self,
            id: RentalId,
            ended_at: Timestamp,
            amount: f64,
        ) -> Result<u64, ScootRentError> {
            let mut inner = self.inner.lock().unwrap();
            match inner
                .rows
                .iter_mut()
                .find(|r| r.id == id && !r.is_closed())
            {
                Some(row) => {
                    row.ended_at = Some(ended_at);
                    row.amount = Some(amount);
                    Ok(1)
                }
                None => Ok(0),
            }
        }

        async fn delete(&self, id: RentalId) -> Result<u64, ScootRentError> {
            let mut inner = self.inner.lock().unwrap();
            let before = inner.rows.len();
            inner.rows.retain(|r| r.id != id);
            Ok((before - inner.rows.len()) as u64)
        }
    }

    #[derive(Default)]
    struct RegistryInner {
        scooters: HashMap<i64, Scooter>,
        updates: Vec<(ScooterSerial, AvailabilityUpdate)>,
        fail_updates: usize,
    }

    #[derive(Clone, Default)]
    struct FakeScooterRegistry {
        inner: Arc<Mutex<RegistryInner>>,
    }

    impl FakeScooterRegistry {
        fn with_scooter(self, serial: i64, availability: Availability) -> Self {
            self.inner.lock().unwrap().scooters.insert(
                serial,
                Scooter {
                    serial: ScooterSerial::new(serial),
                    availability,
                    lat: -23.55,
                    lng: -46.63,
                },
            );
            self
        }

        fn fail_next_updates(&self, count: usize) {
            self.inner.lock().unwrap().fail_updates = count;
        }

        fn updates(&self) -> Vec<(ScooterSerial, AvailabilityUpdate)> {
            self.inner.lock().unwrap().updates.clone()
        }
    }

    impl ScooterRegistry for FakeScooterRegistry {
        async fn get_scooter(
            &self,
            serial: ScooterSerial,
        ) -> Result<Option<Scooter>, ScootRentError> {
            let inner = self.inner.lock().unwrap();
            Ok(inner.scooters.get(&serial.as_i64()).cloned())
        }

        async fn set_availability(
            &self,
            serial: ScooterSerial,
            update: AvailabilityUpdate,
        ) -> Result<(), ScootRentError> {
            let mut inner = self.inner.lock().unwrap();
            if inner.fail_updates > 0 {
                inner.fail_updates -= 1;
                return Err(scootrent_domain::error::UpstreamError {
                    service: "scooter registry",
                    detail: "injected failure".to_string(),
                }
                .into());
            }
            inner.updates.push((serial, update));
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct FakeUserRegistry {
        users: Arc<Mutex<HashMap<i64, User>>>,
    }

    impl FakeUserRegistry {
        fn with_user(self, id: i64) -> Self {
            self.users.lock().unwrap().insert(
                id,
                User {
                    cpf: UserId::new(id),
                    name: "Maria".to_string(),
                    email: "maria@example.com".to_string(),
                    phone: "+55 11 99999-0000".to_string(),
                },
            );
            self
        }
    }

    impl UserRegistry for FakeUserRegistry {
        async fn get_user(&self, id: UserId) -> Result<Option<User>, ScootRentError> {
            Ok(self.users.lock().unwrap().get(&id.as_i64()).cloned())
        }
    }

    #[derive(Default)]
    struct LocksInner {
        calls: Vec<(ScooterSerial, bool)>,
    }

    #[derive(Clone, Default)]
    struct FakeLockControl {
        inner: Arc<Mutex<LocksInner>>,
        fail_times: Arc<AtomicUsize>,
    }

    impl FakeLockControl {
        fn fail_next(&self, count: usize) {
            self.fail_times.store(count, Ordering::SeqCst);
        }

        fn calls(&self) -> Vec<(ScooterSerial, bool)> {
            self.inner.lock().unwrap().calls.clone()
        }
    }

    impl LockControl for FakeLockControl {
        async fn set_lock(
            &self,
            serial: ScooterSerial,
            engaged: bool,
        ) -> Result<(), ScootRentError> {
            self.inner.lock().unwrap().calls.push((serial, engaged));
            if self
                .fail_times
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err(scootrent_domain::error::UpstreamError {
                    service: "lock controller",
                    detail: "injected failure".to_string(),
                }
                .into());
            }
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct FakePaymentGateway {
        charges: Arc<Mutex<Vec<Charge>>>,
        attempts: Arc<AtomicUsize>,
        failing: Arc<AtomicUsize>,
    }

    impl FakePaymentGateway {
        fn fail_always(&self) {
            self.failing.store(usize::MAX, Ordering::SeqCst);
        }

        fn charges(&self) -> Vec<Charge> {
            self.charges.lock().unwrap().clone()
        }

        fn attempts(&self) -> usize {
            self.attempts.load(Ordering::SeqCst)
        }
    }

    impl PaymentGateway for FakePaymentGateway {
        async fn submit(&self, charge: Charge) -> Result<(), ScootRentError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) > 0 {
                return Err(scootrent_domain::error::UpstreamError {
                    service: "payment service",
                    detail: "injected failure".to_string(),
                }
                .into());
            }
            self.charges.lock().unwrap().push(charge);
            Ok(())
        }
    }

    struct Harness {
        store: InMemoryStore,
        scooters: FakeScooterRegistry,
        locks: FakeLockControl,
        payments: FakePaymentGateway,
        service: RentalService<
            InMemoryStore,
            FakeScooterRegistry,
            FakeUserRegistry,
            FakeLockControl,
            FakePaymentGateway,
        >,
    }

    fn harness(availability: Availability) -> Harness {
        let store = InMemoryStore::default();
        let scooters = FakeScooterRegistry::default().with_scooter(21, availability);
        let users = FakeUserRegistry::default().with_user(7);
        let locks = FakeLockControl::default();
        let payments = FakePaymentGateway::default();
        let service = RentalService::new(
            store.clone(),
            scooters.clone(),
            users,
            locks.clone(),
            payments.clone(),
        );
        Harness {
            store,
            scooters,
            locks,
            payments,
            service,
        }
    }

    fn scooter() -> ScooterSerial {
        ScooterSerial::new(21)
    }

    fn user() -> UserId {
        UserId::new(7)
    }

    fn card() -> CardId {
        CardId::new(5001)
    }

    #[tokio::test]
    async fn should_open_rental_and_request_unlock_and_in_use() {
        let h = harness(Availability::Available);

        let started = h.service.start_rental(scooter(), user(), card()).await.unwrap();

        assert!(started.warnings.is_empty());
        assert!(!started.rental.is_closed());
        assert_eq!(h.store.row_count(), 1);
        assert_eq!(h.locks.calls(), vec![(scooter(), false)]);
        let updates = h.scooters.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].1.availability, Some(Availability::InUse));
    }

    #[tokio::test]
    async fn should_reject_start_when_scooter_in_use() {
        let h = harness(Availability::InUse);

        let result = h.service.start_rental(scooter(), user(), card()).await;

        assert!(matches!(
            result,
            Err(ScootRentError::Conflict(
                ConflictError::ScooterNotAvailable { .. }
            ))
        ));
        assert_eq!(h.store.row_count(), 0);
        assert!(h.locks.calls().is_empty());
    }

    #[tokio::test]
    async fn should_reject_start_when_scooter_unknown() {
        let h = harness(Availability::Available);

        let result = h
            .service
            .start_rental(ScooterSerial::new(99), user(), card())
            .await;

        assert!(matches!(result, Err(ScootRentError::NotFound(_))));
        assert_eq!(h.store.row_count(), 0);
    }

    #[tokio::test]
    async fn should_reject_start_when_user_unknown() {
        let h = harness(Availability::Available);

        let result = h
            .service
            .start_rental(scooter(), UserId::new(99), card())
            .await;

        assert!(matches!(result, Err(ScootRentError::NotFound(_))));
        assert_eq!(h.store.row_count(), 0);
        assert!(h.locks.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn should_commit_rental_with_warning_when_unlock_keeps_failing() {
        let h = harness(Availability::Available);
        h.locks.fail_next(usize::MAX - 1);

        let started = h.service.start_rental(scooter(), user(), card()).await.unwrap();

        // Committed locally despite the side-effect failure.
        assert_eq!(h.store.row_count(), 1);
        assert_eq!(
            started.warnings,
            vec!["scooter could not be confirmed unlocked".to_string()]
        );
        // Initial attempt plus the single retry, no more.
        assert_eq!(h.locks.calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn should_recover_without_warning_when_retry_succeeds() {
        let h = harness(Availability::Available);
        h.locks.fail_next(1);

        let started = h.service.start_rental(scooter(), user(), card()).await.unwrap();

        assert!(started.warnings.is_empty());
        assert_eq!(h.locks.calls().len(), 2);
    }

    #[tokio::test]
    async fn should_close_rental_and_charge_computed_amount() {
        let h = harness(Availability::Available);
        let started = h.service.start_rental(scooter(), user(), card()).await.unwrap();
        let rental = started.rental;
        let ended_at = rental.started_at + chrono::Duration::minutes(10);

        let closed = h
            .service
            .end_rental(rental.id, ended_at, Some(Position { lat: 1.0, lng: 2.0 }))
            .await
            .unwrap();

        assert!(closed.warnings.is_empty());
        assert!((closed.amount - 6.50).abs() < 1e-9);
        assert_eq!(closed.rental.amount, Some(closed.amount));

        // Lock engaged, availability restored at the drop-off position.
        assert_eq!(h.locks.calls().last(), Some(&(scooter(), true)));
        let updates = h.scooters.updates();
        let last = &updates.last().unwrap().1;
        assert_eq!(last.availability, Some(Availability::Available));
        assert_eq!(last.lat, Some(1.0));

        // Exactly one charge, for the computed amount.
        let charges = h.payments.charges();
        assert_eq!(charges.len(), 1);
        assert!((charges[0].amount - 6.50).abs() < 1e-9);
        assert_eq!(charges[0].user, user());
        assert_eq!(charges[0].card, card());
    }

    #[tokio::test]
    async fn should_reject_second_close_without_second_charge() {
        let h = harness(Availability::Available);
        let started = h.service.start_rental(scooter(), user(), card()).await.unwrap();
        let ended_at = started.rental.started_at + chrono::Duration::minutes(10);
        h.service
            .end_rental(started.rental.id, ended_at, None)
            .await
            .unwrap();

        let result = h
            .service
            .end_rental(started.rental.id, ended_at + chrono::Duration::minutes(5), None)
            .await;

        assert!(matches!(
            result,
            Err(ScootRentError::Conflict(
                ConflictError::RentalAlreadyClosed { .. }
            ))
        ));
        assert_eq!(h.payments.attempts(), 1);
    }

    #[tokio::test]
    async fn should_reject_close_when_end_not_after_start() {
        let h = harness(Availability::Available);
        let started = h.service.start_rental(scooter(), user(), card()).await.unwrap();

        let result = h
            .service
            .end_rental(started.rental.id, started.rental.started_at, None)
            .await;

        assert!(matches!(result, Err(ScootRentError::Validation(_))));
        assert_eq!(h.payments.attempts(), 0);
        assert!(!h.store.inner.lock().unwrap().rows[0].is_closed());
    }

    #[tokio::test]
    async fn should_not_submit_payment_when_rental_unknown() {
        let h = harness(Availability::Available);

        let result = h.service.end_rental(RentalId::new(404), now(), None).await;

        assert!(matches!(result, Err(ScootRentError::NotFound(_))));
        assert_eq!(h.payments.attempts(), 0);
    }

    #[tokio::test]
    async fn should_report_not_found_when_row_deleted_during_close() {
        let h = harness(Availability::Available);
        let started = h.service.start_rental(scooter(), user(), card()).await.unwrap();
        // Simulate an administrative delete racing the close.
        h.store.remove(started.rental.id);

        let result = h
            .service
            .end_rental(
                started.rental.id,
                started.rental.started_at + chrono::Duration::minutes(1),
                None,
            )
            .await;

        assert!(matches!(result, Err(ScootRentError::NotFound(_))));
        assert_eq!(h.payments.attempts(), 0);
    }

    #[tokio::test]
    async fn should_close_with_warning_when_payment_fails_and_never_retry_it() {
        let h = harness(Availability::Available);
        h.payments.fail_always();
        let started = h.service.start_rental(scooter(), user(), card()).await.unwrap();

        let closed = h
            .service
            .end_rental(
                started.rental.id,
                started.rental.started_at + chrono::Duration::minutes(10),
                None,
            )
            .await
            .unwrap();

        // The close itself sticks; the charge failure is a warning.
        assert!(closed.rental.is_closed());
        assert!(
            closed
                .warnings
                .contains(&"payment could not be submitted".to_string())
        );
        // At-most-once: exactly one attempt even though it failed.
        assert_eq!(h.payments.attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn should_retry_availability_update_once_on_end() {
        let h = harness(Availability::Available);
        let started = h.service.start_rental(scooter(), user(), card()).await.unwrap();
        h.scooters.fail_next_updates(1);

        let closed = h
            .service
            .end_rental(
                started.rental.id,
                started.rental.started_at + chrono::Duration::minutes(10),
                None,
            )
            .await
            .unwrap();

        assert!(closed.warnings.is_empty());
        // First update from start, then the end-of-rental retry success.
        let updates = h.scooters.updates();
        assert_eq!(
            updates.last().unwrap().1.availability,
            Some(Availability::Available)
        );
    }

    #[tokio::test]
    async fn should_list_and_delete_rentals() {
        let h = harness(Availability::Available);
        let started = h.service.start_rental(scooter(), user(), card()).await.unwrap();

        assert_eq!(h.service.list_rentals().await.unwrap().len(), 1);
        assert_eq!(h.service.list_by_user(user()).await.unwrap().len(), 1);
        assert_eq!(h.service.list_by_scooter(scooter()).await.unwrap().len(), 1);
        assert!(
            h.service
                .list_by_user(UserId::new(99))
                .await
                .unwrap()
                .is_empty()
        );

        h.service.delete_rental(started.rental.id).await.unwrap();
        assert!(h.service.list_rentals().await.unwrap().is_empty());

        let result = h.service.delete_rental(started.rental.id).await;
        assert!(matches!(result, Err(ScootRentError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_return_empty_list_when_store_is_empty() {
        let h = harness(Availability::Available);
        assert!(h.service.list_rentals().await.unwrap().is_empty());
    }
}
