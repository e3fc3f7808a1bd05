//! Login and ownership checks that sit in front of the stores.

use crate::core::config::AdminConfig;
use crate::core::error::SessionError;
use crate::models::comment::{Comment, CommentId, ADMIN_AUTHOR_ID};
use crate::models::user::{User, UserId};
use crate::stores::comment_store::CommentStore;
use crate::stores::user_store::UserStore;
use crate::utils::auth::verify_secret;
use tracing::{info, warn};

/// Who is driving the current session
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Actor {
    Admin,
    Member(User),
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        matches!(self, Actor::Admin)
    }

    /// Id recorded as `author_id` on comments this actor writes
    pub fn author_id(&self) -> UserId {
        match self {
            Actor::Admin => ADMIN_AUTHOR_ID,
            Actor::Member(user) => user.id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Actor::Admin => "admin",
            Actor::Member(user) => user.username.as_str(),
        }
    }

    /// Admins may change any comment, members only their own
    pub fn can_modify(&self, comment: &Comment) -> bool {
        match self {
            Actor::Admin => true,
            Actor::Member(user) => comment.author_id == user.id,
        }
    }
}

/// Log a registered user in by username and password
pub fn authenticate_member(
    users: &UserStore,
    username: &str,
    password: &str,
) -> Result<Actor, SessionError> {
    let user = users.find_by_username(username)?;

    if user.password != password {
        warn!(user_id = user.id, "Login rejected: wrong password");
        return Err(SessionError::InvalidCredentials);
    }

    info!(user_id = user.id, "User logged in");
    Ok(Actor::Member(user))
}

/// Log in with the static admin credential from configuration
pub fn authenticate_admin(
    admin: &AdminConfig,
    username: &str,
    password: &str,
) -> Result<Actor, SessionError> {
    let username_ok = verify_secret(username, &admin.username);
    let password_ok = verify_secret(password, &admin.password);

    if !(username_ok && password_ok) {
        warn!("Admin login rejected");
        return Err(SessionError::AdminLoginRejected);
    }

    info!("Admin logged in");
    Ok(Actor::Admin)
}

pub fn ensure_can_modify(actor: &Actor, comment: &Comment) -> Result<(), SessionError> {
    if actor.can_modify(comment) {
        return Ok(());
    }

    warn!(
        actor_id = actor.author_id(),
        comment_id = comment.id,
        owner_id = comment.author_id,
        "Permission denied on comment"
    );
    Err(SessionError::PermissionDenied { comment_id: comment.id })
}

/// Comments the actor is allowed to edit or delete
pub fn editable_comments(actor: &Actor, comments: &CommentStore) -> Vec<Comment> {
    match actor {
        Actor::Admin => comments.list_all(),
        Actor::Member(user) => comments.list_by_owner(user.id),
    }
}

pub fn edit_comment_as(
    comments: &mut CommentStore,
    actor: &Actor,
    id: CommentId,
    new_text: Option<&str>,
    new_category: Option<&str>,
) -> Result<(), SessionError> {
    let comment = comments.find_by_id(id)?;
    ensure_can_modify(actor, &comment)?;
    comments.edit_comment(id, new_text, new_category)?;
    Ok(())
}

pub fn delete_comment_as(
    comments: &mut CommentStore,
    actor: &Actor,
    id: CommentId,
) -> Result<(), SessionError> {
    let comment = comments.find_by_id(id)?;
    ensure_can_modify(actor, &comment)?;
    comments.delete_comment(id)?;
    Ok(())
}
