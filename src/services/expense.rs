//! Expense service
//!
//! Business logic for recording and listing expenses on behalf of an
//! explicitly supplied identity.

use tracing::debug;

use crate::aggregate::sort_newest_first;
use crate::error::{ExpensioError, ExpensioResult};
use crate::models::{Expense, Identity};
use crate::storage::RecordStore;
use crate::validation::ExpenseForm;

/// Service for expense management
pub struct ExpenseService<'a, S: RecordStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: RecordStore + ?Sized> ExpenseService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Record a new expense
    ///
    /// The form is validated before the identity is checked, and the store is
    /// only called once both pass.
    pub fn add(&self, identity: Option<&Identity>, form: &ExpenseForm) -> ExpensioResult<Expense> {
        let valid = form.validate()?;
        let identity = identity.ok_or(ExpensioError::Unauthenticated)?;

        let expense = self.store.create(valid.for_owner(identity.user_id))?;
        debug!(expense = %expense.id, amount = %expense.amount, "expense added");
        Ok(expense)
    }

    /// All expenses of the identity, newest first
    pub fn list(&self, identity: Option<&Identity>) -> ExpensioResult<Vec<Expense>> {
        let identity = identity.ok_or(ExpensioError::Unauthenticated)?;
        let mut records = self.store.query(&identity.user_id)?;
        sort_newest_first(&mut records);
        Ok(records)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{ExpenseId, Money, NewExpense, UserId};
    use crate::storage::{SubscriberRegistry, Subscription};
    use chrono::{Duration, TimeZone, Utc};
    use std::cell::{Cell, RefCell};
    use std::sync::Arc;

    /// In-memory store that counts calls and can be told to fail
    pub(crate) struct RecordingStore {
        pub records: RefCell<Vec<Expense>>,
        pub creates: Cell<usize>,
        pub fail_writes: Cell<bool>,
        pub registry: Arc<SubscriberRegistry>,
    }

    impl RecordingStore {
        pub fn new() -> Self {
            Self {
                records: RefCell::new(Vec::new()),
                creates: Cell::new(0),
                fail_writes: Cell::new(false),
                registry: SubscriberRegistry::new(),
            }
        }

        pub fn owned_by(&self, owner: &UserId) -> Vec<Expense> {
            self.records
                .borrow()
                .iter()
                .filter(|e| e.owner == *owner)
                .cloned()
                .collect()
        }
    }

    impl RecordStore for RecordingStore {
        fn create(&self, new: NewExpense) -> ExpensioResult<Expense> {
            self.creates.set(self.creates.get() + 1);
            let owner = new.owner;
            if self.fail_writes.get() {
                self.registry.publish_error(&owner, "write rejected")?;
                return Err(ExpensioError::Store("write rejected".into()));
            }

            // Deterministic, strictly increasing timestamps
            let base = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
            let created_at = base + Duration::minutes(self.records.borrow().len() as i64);
            let expense = new.into_expense(ExpenseId::new(), created_at);
            self.records.borrow_mut().push(expense.clone());

            self.registry.publish(&owner, &self.owned_by(&owner))?;
            Ok(expense)
        }

        fn query(&self, owner: &UserId) -> ExpensioResult<Vec<Expense>> {
            Ok(self.owned_by(owner))
        }

        fn subscribe(&self, owner: &UserId) -> ExpensioResult<Subscription> {
            self.registry.register(*owner, self.owned_by(owner))
        }
    }

    fn ada() -> Identity {
        Identity::new(UserId::new(), "ada@example.com", "Ada")
    }

    #[test]
    fn test_add_assigns_owner() {
        let store = RecordingStore::new();
        let service = ExpenseService::new(&store);
        let identity = ada();

        let expense = service
            .add(Some(&identity), &ExpenseForm::new("Coffee", "Food", "3.50"))
            .unwrap();

        assert_eq!(expense.owner, identity.user_id);
        assert_eq!(expense.amount, Money::from_minor(350));
        assert_eq!(store.creates.get(), 1);
    }

    #[test]
    fn test_invalid_form_never_reaches_store() {
        let store = RecordingStore::new();
        let service = ExpenseService::new(&store);
        let identity = ada();

        let err = service
            .add(Some(&identity), &ExpenseForm::new("Coffee", "Food", "0"))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.creates.get(), 0);
    }

    #[test]
    fn test_validation_runs_before_identity_check() {
        let store = RecordingStore::new();
        let service = ExpenseService::new(&store);

        let err = service.add(None, &ExpenseForm::new("", "Food", "1")).unwrap_err();
        assert!(err.is_validation());

        let err = service
            .add(None, &ExpenseForm::new("Coffee", "Food", "1"))
            .unwrap_err();
        assert!(err.is_unauthenticated());
        assert_eq!(store.creates.get(), 0);
    }

    #[test]
    fn test_oversized_amount_never_reaches_store() {
        let store = RecordingStore::new();
        let service = ExpenseService::new(&store);

        let err = service
            .add(Some(&ada()), &ExpenseForm::new("Lottery", "Misc", "92233720368547758"))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.creates.get(), 0);
    }

    #[test]
    fn test_store_failure_is_reported() {
        let store = RecordingStore::new();
        store.fail_writes.set(true);
        let service = ExpenseService::new(&store);

        let err = service
            .add(Some(&ada()), &ExpenseForm::new("Coffee", "Food", "1"))
            .unwrap_err();
        assert!(matches!(err, ExpensioError::Store(_)));
    }

    #[test]
    fn test_list_is_newest_first_and_owner_scoped() {
        let store = RecordingStore::new();
        let service = ExpenseService::new(&store);
        let identity = ada();
        let other = Identity::new(UserId::new(), "bob@example.com", "Bob");

        for title in ["first", "second", "third"] {
            service
                .add(Some(&identity), &ExpenseForm::new(title, "Misc", "1"))
                .unwrap();
        }
        service
            .add(Some(&other), &ExpenseForm::new("not mine", "Misc", "1"))
            .unwrap();

        let titles: Vec<String> = service
            .list(Some(&identity))
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["third", "second", "first"]);

        assert!(service.list(None).unwrap_err().is_unauthenticated());
    }
}
