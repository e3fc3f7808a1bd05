pub type UserId = u32;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    /// Sequential user ID, never reused
    pub id: UserId,
    /// Login name, unique among live users (case-sensitive)
    pub username: String,
    /// Stored as typed
    pub password: String,
}

impl User {
    pub fn new(id: UserId, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            password: password.into(),
        }
    }
}
