// Application state (AppState)

use crate::core::config::Config;
use crate::stores::{comment_store::CommentStore, user_store::UserStore};

/// State owned by the single console session.
///
/// Mutation goes through `&mut self` on the stores; nothing here is shared
/// across threads.
#[derive(Debug)]
pub struct AppState {
    /// Registered users
    pub users: UserStore,

    /// Sentiment comments
    pub comments: CommentStore,

    /// Configuration
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let max_records = config.store.max_records;

        Self {
            users: UserStore::with_capacity(max_records)
                .with_unique_username_on_edit(config.validation.unique_username_on_edit),
            comments: CommentStore::with_capacity(max_records),
            config,
        }
    }
}
