use crate::core::error::StoreError;
use crate::models::user::{User, UserId};
use crate::stores::record_table::{Record, RecordTable, SortDirection};
use crate::utils::text::non_blank;
use tracing::{debug, warn};

impl Record for User {
    const KIND: &'static str = "User";

    fn id(&self) -> u32 {
        self.id
    }
}

/// In-memory store of registered users
#[derive(Debug)]
pub struct UserStore {
    users: RecordTable<User>,
    unique_username_on_edit: bool,
}

impl UserStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            users: RecordTable::with_capacity(capacity),
            unique_username_on_edit: false,
        }
    }

    /// Reject edits that would rename a user onto another live user's name.
    /// Off by default: edits skip the uniqueness check that registration does.
    pub fn with_unique_username_on_edit(mut self, enabled: bool) -> Self {
        self.unique_username_on_edit = enabled;
        self
    }

    /// Register a user and return its id
    pub fn create_user(&mut self, username: &str, password: &str) -> Result<UserId, StoreError> {
        if let Err(e) = self.users.ensure_room() {
            warn!(username = username, max = self.users.capacity(), "User store is full");
            return Err(e);
        }

        if self.username_taken(username, None) {
            return Err(StoreError::DuplicateUsername(username.to_string()));
        }

        let id = self
            .users
            .insert_with(|id| User::new(id, username, password))?;

        debug!(user_id = id, username = username, "User created");
        Ok(id)
    }

    /// First exact (case-sensitive) username match
    pub fn find_by_username(&self, username: &str) -> Result<User, StoreError> {
        self.users
            .iter()
            .find(|user| user.username == username)
            .cloned()
            .ok_or_else(|| StoreError::UserNotFound(username.to_string()))
    }

    pub fn find_by_id(&self, id: UserId) -> Result<User, StoreError> {
        self.users.get(id).cloned()
    }

    /// All live users in id order
    pub fn list_all(&self) -> Vec<User> {
        self.users.snapshot()
    }

    pub fn search_by_username(&self, needle: &str) -> Result<Vec<User>, StoreError> {
        self.users.search(needle, |user| user.username.as_str())
    }

    pub fn sort_by_id(&self, direction: SortDirection) -> Vec<User> {
        self.users.sorted_by_id(direction)
    }

    /// Partial update: blank or missing fields keep their current value
    pub fn edit_user(
        &mut self,
        id: UserId,
        new_username: Option<&str>,
        new_password: Option<&str>,
    ) -> Result<(), StoreError> {
        let new_username = non_blank(new_username);
        let new_password = non_blank(new_password);

        self.users.get(id)?;
        if self.unique_username_on_edit {
            if let Some(username) = new_username {
                if self.username_taken(username, Some(id)) {
                    return Err(StoreError::DuplicateUsername(username.to_string()));
                }
            }
        }

        let user = self.users.get_mut(id)?;
        if let Some(username) = new_username {
            user.username = username.to_string();
        }
        if let Some(password) = new_password {
            user.password = password.to_string();
        }

        debug!(user_id = id, "User updated");
        Ok(())
    }

    pub fn delete_user(&mut self, id: UserId) -> Result<(), StoreError> {
        self.users.remove(id)?;
        debug!(user_id = id, "User deleted");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.users.capacity()
    }

    fn username_taken(&self, username: &str, except: Option<UserId>) -> bool {
        self.users
            .iter()
            .any(|user| user.username == username && Some(user.id) != except)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usernames(users: &[User]) -> Vec<&str> {
        users.iter().map(|u| u.username.as_str()).collect()
    }

    #[test]
    fn test_create_and_find_by_id() {
        let mut store = UserStore::with_capacity(255);

        let id = store.create_user("alice", "pw").unwrap();
        let user = store.find_by_id(id).unwrap();

        assert_eq!(user.username, "alice");
        assert_eq!(user.password, "pw");
    }

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let mut store = UserStore::with_capacity(255);
        assert_eq!(store.create_user("a", "p").unwrap(), 1);
        assert_eq!(store.create_user("b", "p").unwrap(), 2);
        assert_eq!(store.create_user("c", "p").unwrap(), 3);
    }

    #[test]
    fn test_capacity_exceeded_leaves_store_unchanged() {
        let mut store = UserStore::with_capacity(3);
        for name in ["a", "b", "c"] {
            store.create_user(name, "pw").unwrap();
        }
        let before = store.list_all();

        let result = store.create_user("d", "pw");

        assert_eq!(result, Err(StoreError::CapacityExceeded { max: 3 }));
        assert_eq!(store.len(), 3);
        assert_eq!(store.list_all(), before);
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let mut store = UserStore::with_capacity(255);
        store.create_user("alice", "pw").unwrap();

        let result = store.create_user("alice", "other");

        assert_eq!(result, Err(StoreError::DuplicateUsername("alice".into())));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_username_uniqueness_is_case_sensitive() {
        let mut store = UserStore::with_capacity(255);
        store.create_user("alice", "pw").unwrap();
        assert!(store.create_user("Alice", "pw").is_ok());
    }

    #[test]
    fn test_find_by_username_exact_match_only() {
        let mut store = UserStore::with_capacity(255);
        store.create_user("Alice", "pw").unwrap();

        assert_eq!(store.find_by_username("Alice").unwrap().id, 1);
        assert_eq!(
            store.find_by_username("alice"),
            Err(StoreError::UserNotFound("alice".into()))
        );
    }

    #[test]
    fn test_delete_then_find() {
        let mut store = UserStore::with_capacity(255);
        let a = store.create_user("a", "p").unwrap();
        let b = store.create_user("b", "p").unwrap();
        let c = store.create_user("c", "p").unwrap();

        store.delete_user(b).unwrap();

        assert!(matches!(store.find_by_id(b), Err(StoreError::NotFound { .. })));
        assert_eq!(store.find_by_id(a).unwrap().username, "a");
        assert_eq!(store.find_by_id(c).unwrap().username, "c");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_delete_missing_user() {
        let mut store = UserStore::with_capacity(255);
        assert_eq!(
            store.delete_user(9),
            Err(StoreError::NotFound { kind: "User", id: 9 })
        );
    }

    #[test]
    fn test_deleted_username_can_register_again_with_new_id() {
        let mut store = UserStore::with_capacity(255);
        let first = store.create_user("alice", "pw").unwrap();
        store.delete_user(first).unwrap();

        let second = store.create_user("alice", "pw").unwrap();
        assert_eq!(second, 2);
    }

    #[test]
    fn test_blank_edit_is_noop() {
        let mut store = UserStore::with_capacity(255);
        let id = store.create_user("alice", "pw").unwrap();

        store.edit_user(id, Some(""), Some("")).unwrap();
        store.edit_user(id, None, None).unwrap();

        let user = store.find_by_id(id).unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.password, "pw");
    }

    #[test]
    fn test_partial_edit_changes_only_given_field() {
        let mut store = UserStore::with_capacity(255);
        let id = store.create_user("alice", "pw").unwrap();

        store.edit_user(id, None, Some("new-pw")).unwrap();

        let user = store.find_by_id(id).unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.password, "new-pw");
    }

    #[test]
    fn test_edit_missing_user() {
        let mut store = UserStore::with_capacity(255);
        assert!(matches!(
            store.edit_user(4, Some("x"), None),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_edit_allows_duplicate_username_by_default() {
        let mut store = UserStore::with_capacity(255);
        store.create_user("alice", "pw").unwrap();
        let bob = store.create_user("bob", "pw").unwrap();

        store.edit_user(bob, Some("alice"), None).unwrap();

        assert_eq!(store.find_by_id(bob).unwrap().username, "alice");
        // first match wins
        assert_eq!(store.find_by_username("alice").unwrap().id, 1);
    }

    #[test]
    fn test_strict_edit_rejects_duplicate_username() {
        let mut store = UserStore::with_capacity(255).with_unique_username_on_edit(true);
        store.create_user("alice", "pw").unwrap();
        let bob = store.create_user("bob", "pw").unwrap();

        let result = store.edit_user(bob, Some("alice"), None);

        assert_eq!(result, Err(StoreError::DuplicateUsername("alice".into())));
        assert_eq!(store.find_by_id(bob).unwrap().username, "bob");
        // renaming onto its own name is fine
        assert!(store.edit_user(bob, Some("bob"), None).is_ok());
    }

    #[test]
    fn test_strict_edit_missing_user_is_not_found() {
        let mut store = UserStore::with_capacity(255).with_unique_username_on_edit(true);
        store.create_user("alice", "pw").unwrap();

        assert_eq!(
            store.edit_user(99, Some("alice"), None),
            Err(StoreError::NotFound { kind: "User", id: 99 })
        );
    }

    #[test]
    fn test_search_case_insensitive() {
        let mut store = UserStore::with_capacity(255);
        store.create_user("Alice", "pw").unwrap();
        store.create_user("bob", "pw").unwrap();

        let found = store.search_by_username("ALI").unwrap();

        assert_eq!(usernames(&found), vec!["Alice"]);
    }

    #[test]
    fn test_search_keeps_storage_order() {
        let mut store = UserStore::with_capacity(255);
        for name in ["anna", "bob", "hannah", "joanne"] {
            store.create_user(name, "pw").unwrap();
        }

        let found = store.search_by_username("ANN").unwrap();

        assert_eq!(usernames(&found), vec!["anna", "hannah", "joanne"]);
    }

    #[test]
    fn test_search_no_match_and_empty_store() {
        let mut store = UserStore::with_capacity(255);
        assert!(matches!(
            store.search_by_username("a"),
            Err(StoreError::EmptyResult(_))
        ));

        store.create_user("bob", "pw").unwrap();
        assert!(matches!(
            store.search_by_username("zed"),
            Err(StoreError::EmptyResult(_))
        ));
    }

    #[test]
    fn test_sort_by_id_after_delete() {
        let mut store = UserStore::with_capacity(255);
        for name in ["a", "b", "c"] {
            store.create_user(name, "pw").unwrap();
        }
        store.delete_user(2).unwrap();

        let asc: Vec<UserId> = store.sort_by_id(SortDirection::Ascending).iter().map(|u| u.id).collect();
        let desc: Vec<UserId> = store.sort_by_id(SortDirection::Descending).iter().map(|u| u.id).collect();

        assert_eq!(asc, vec![1, 3]);
        assert_eq!(desc, vec![3, 1]);
        assert_eq!(store.list_all().first().map(|u| u.id), Some(1));
    }
}
