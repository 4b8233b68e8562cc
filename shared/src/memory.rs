use crate::errors::UserError;
use crate::store::UserStore;
use crate::types::User;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

/// In-process [`UserStore`] test double. Enumerates users in email order and
/// counts writes so tests can assert a request never reached the table.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: Mutex<BTreeMap<String, User>>,
    writes: AtomicUsize,
}

impl MemoryUserStore {
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let users = users
            .into_iter()
            .map(|user| (user.email.clone(), user))
            .collect();
        Self {
            users: Mutex::new(users),
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of put and delete calls that reached the table.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn table(
        &self,
        on_poisoned: fn(String) -> UserError,
    ) -> Result<MutexGuard<'_, BTreeMap<String, User>>, UserError> {
        self.users
            .lock()
            .map_err(|_| on_poisoned("user table lock poisoned".to_string()))
    }
}

impl UserStore for MemoryUserStore {
    async fn fetch_user(&self, email: &str) -> Result<User, UserError> {
        self.table(UserError::GetItem)?
            .get(email)
            .cloned()
            .ok_or(UserError::UserDoesNotExist)
    }

    async fn fetch_users(&self) -> Result<Vec<User>, UserError> {
        Ok(self.table(UserError::ScanItems)?.values().cloned().collect())
    }

    async fn put_user(&self, user: &User) -> Result<(), UserError> {
        let mut users = self.table(UserError::PutItem)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        users.insert(user.email.clone(), user.clone());
        Ok(())
    }

    async fn delete_user(&self, email: &str) -> Result<User, UserError> {
        let mut users = self.table(UserError::DeleteItem)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        users.remove(email).ok_or(UserError::UserDoesNotExist)
    }
}
