use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::entities::User;
use crate::domain::ports::UserCache;

// Fixed key under which the single cached user lives.
const USER_CACHE_KEY: &str = "current_user";

// In-memory key-value cache adapter for the last observed user.
// Read-your-write within the process; no persistence.
pub struct InMemoryUserCache {
    entries: RwLock<HashMap<&'static str, User>>,
}

impl InMemoryUserCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryUserCache {
    fn default() -> Self {
        Self::new()
    }
}

impl UserCache for InMemoryUserCache {
    fn write(&self, user: &User) {
        let mut entries = self.entries.write().expect("user cache lock poisoned");
        entries.insert(USER_CACHE_KEY, user.clone());
    }

    fn read(&self) -> Option<User> {
        let entries = self.entries.read().expect("user cache lock poisoned");
        entries.get(USER_CACHE_KEY).cloned()
    }
}
