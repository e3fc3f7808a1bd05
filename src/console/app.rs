//! Menu loop driving the stores through the session layer.

use crate::console::prompt::Prompt;
use crate::console::render;
use crate::core::error::{PromptError, SessionError};
use crate::core::state::AppState;
use crate::models::comment::CommentId;
use crate::security::session::{self, Actor};
use std::io::{BufRead, Write};
use tracing::info;

const WELCOME: &str = "Welcome to the Sentiment Analysis Comment Board";
const TRY_AGAIN: &str = "Do you want to try again?";

const MAIN_MENU: [&str; 4] = ["Login", "Register", "Admin", "Exit"];

const MEMBER_MENU: [&str; 8] = [
    "Add comment",
    "All comments",
    "My comments",
    "Search comments",
    "Sort comments",
    "Edit my comment",
    "Delete my comment",
    "Logout",
];

const ADMIN_MENU: [&str; 14] = [
    "List users",
    "Add user",
    "Edit user",
    "Delete user",
    "Search users",
    "Sort users",
    "List comments",
    "Search comments",
    "Sort comments",
    "Add comment",
    "Edit comment",
    "Delete comment",
    "Category statistics",
    "Logout",
];

/// A form result, or the message to show before offering another try
type Attempt<T> = Result<T, String>;

/// Turn bad input into a retryable message; closed or broken consoles still propagate
fn recover<T>(result: Result<T, PromptError>) -> Result<Attempt<T>, PromptError> {
    match result {
        Ok(value) => Ok(Ok(value)),
        Err(e) if e.is_recoverable() => Ok(Err(e.to_string())),
        Err(e) => Err(e),
    }
}

pub struct App<R, W> {
    state: AppState,
    prompt: Prompt<R, W>,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(state: AppState, input: R, output: W) -> Self {
        Self {
            state,
            prompt: Prompt::new(input, output),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn into_parts(self) -> (AppState, W) {
        (self.state, self.prompt.into_output())
    }

    /// Run until the user picks Exit or input ends
    pub fn run(&mut self) -> Result<(), PromptError> {
        match self.main_menu() {
            Err(PromptError::EndOfInput) => {
                info!("Input closed, exiting");
                Ok(())
            }
            other => other,
        }
    }

    fn main_menu(&mut self) -> Result<(), PromptError> {
        loop {
            render::print_title(self.prompt.output(), WELCOME)?;

            let choice = match recover(self.prompt.choose("Choose menu", &MAIN_MENU))? {
                Ok(choice) => choice,
                Err(message) => {
                    self.prompt.say(&message)?;
                    continue;
                }
            };

            match choice {
                1 => self.login_view()?,
                2 => self.register_view()?,
                3 => self.admin_login_view()?,
                _ => {
                    self.prompt.say("Goodbye!")?;
                    return Ok(());
                }
            }
        }
    }

    fn section(&mut self, links: &[&str], title: &str) -> Result<(), PromptError> {
        render::print_breadcrumbs(self.prompt.output(), links)?;
        render::print_title(self.prompt.output(), title)?;
        Ok(())
    }

    /// Repeat `attempt` while it fails and the user agrees to try again
    fn with_retry<T>(
        &mut self,
        mut attempt: impl FnMut(&mut Self) -> Result<Attempt<T>, PromptError>,
    ) -> Result<Option<T>, PromptError> {
        loop {
            match attempt(self)? {
                Ok(value) => return Ok(Some(value)),
                Err(message) => self.prompt.say(&message)?,
            }

            if !self.prompt.confirm(TRY_AGAIN)? {
                return Ok(None);
            }
        }
    }

    fn login_view(&mut self) -> Result<(), PromptError> {
        self.section(&["Login"], "LOGIN")?;

        let actor = self.with_retry(|app| {
            Ok(recover(app.prompt.login_form())?.and_then(|(username, password)| {
                session::authenticate_member(&app.state.users, &username, &password)
                    .map_err(|e| e.to_string())
            }))
        })?;

        if let Some(actor) = actor {
            self.prompt.say("Login successful!")?;
            self.member_menu(&actor)?;
        }
        Ok(())
    }

    fn register_view(&mut self) -> Result<(), PromptError> {
        self.section(&["Register"], "REGISTER")?;

        let registered = self.with_retry(|app| {
            Ok(recover(app.prompt.register_form())?.and_then(|(username, password)| {
                app.state
                    .users
                    .create_user(&username, &password)
                    .map_err(|e| e.to_string())
            }))
        })?;

        if let Some(user_id) = registered {
            info!(user_id = user_id, "User registered");
            self.prompt.say("Registration successful!")?;
        }
        Ok(())
    }

    fn admin_login_view(&mut self) -> Result<(), PromptError> {
        self.section(&["Admin"], "ADMIN LOGIN")?;

        let actor = self.with_retry(|app| {
            Ok(recover(app.prompt.login_form())?.and_then(|(username, password)| {
                session::authenticate_admin(&app.state.config.admin, &username, &password)
                    .map_err(|e| e.to_string())
            }))
        })?;

        if let Some(actor) = actor {
            self.prompt.say("Login successful!")?;
            self.admin_menu(&actor)?;
        }
        Ok(())
    }

    fn member_menu(&mut self, actor: &Actor) -> Result<(), PromptError> {
        loop {
            self.section(&["Member Menu"], "MEMBER MENU")?;

            let choice = match recover(self.prompt.choose("Choose menu", &MEMBER_MENU))? {
                Ok(choice) => choice,
                Err(message) => {
                    self.prompt.say(&message)?;
                    continue;
                }
            };

            match choice {
                1 => self.add_comment(actor)?,
                2 => self.list_comments()?,
                3 => self.list_own_comments(actor)?,
                4 => self.search_comments()?,
                5 => self.sort_comments()?,
                6 => self.edit_comment(actor)?,
                7 => self.delete_comment(actor)?,
                _ => return self.logout(actor),
            }
        }
    }

    fn admin_menu(&mut self, actor: &Actor) -> Result<(), PromptError> {
        loop {
            self.section(&["Admin Menu"], "ADMIN MENU")?;

            let choice = match recover(self.prompt.choose("Choose menu", &ADMIN_MENU))? {
                Ok(choice) => choice,
                Err(message) => {
                    self.prompt.say(&message)?;
                    continue;
                }
            };

            match choice {
                1 => self.list_users()?,
                2 => self.add_user()?,
                3 => self.edit_user()?,
                4 => self.delete_user()?,
                5 => self.search_users()?,
                6 => self.sort_users()?,
                7 => self.list_comments()?,
                8 => self.search_comments()?,
                9 => self.sort_comments()?,
                10 => self.add_comment(actor)?,
                11 => self.edit_comment(actor)?,
                12 => self.delete_comment(actor)?,
                13 => self.category_statistics()?,
                _ => return self.logout(actor),
            }
        }
    }

    fn logout(&mut self, actor: &Actor) -> Result<(), PromptError> {
        info!(actor = actor.display_name(), "Logged out");
        self.prompt.say("Logged out.")
    }

    /// Read an id; bad input is reported and yields `None`
    fn read_id(&mut self, label: &str) -> Result<Option<u32>, PromptError> {
        match recover(self.prompt.read_number(label))? {
            Ok(id) => Ok(Some(id)),
            Err(message) => {
                self.prompt.say(&message)?;
                Ok(None)
            }
        }
    }

    // Comments

    fn add_comment(&mut self, actor: &Actor) -> Result<(), PromptError> {
        self.section(&["Comments", "Add"], "ADD COMMENT")?;

        let Some((text, category)) = self.with_retry(|app| recover(app.prompt.comment_form()))? else {
            return Ok(());
        };

        match self
            .state
            .comments
            .create_comment(actor.author_id(), &text, category.as_str())
        {
            Ok(id) => self.prompt.say(&format!("Comment #{id} saved.")),
            Err(e) => self.prompt.say(&e.to_string()),
        }
    }

    fn list_comments(&mut self) -> Result<(), PromptError> {
        self.section(&["Comments"], "ALL COMMENTS")?;
        let comments = self.state.comments.list_all();
        render::print_comments(self.prompt.output(), &comments, &self.state.users)?;
        Ok(())
    }

    fn list_own_comments(&mut self, actor: &Actor) -> Result<(), PromptError> {
        self.section(&["Comments", "Mine"], "MY COMMENTS")?;
        let comments = self.state.comments.list_by_owner(actor.author_id());
        render::print_comments(self.prompt.output(), &comments, &self.state.users)?;
        Ok(())
    }

    fn search_comments(&mut self) -> Result<(), PromptError> {
        self.section(&["Comments", "Search"], "SEARCH COMMENTS")?;
        let needle = self.prompt.read_line("Search text: ")?;

        match self.state.comments.search_by_text(&needle) {
            Ok(found) => render::print_comments(self.prompt.output(), &found, &self.state.users)?,
            Err(e) => self.prompt.say(&e.to_string())?,
        }
        Ok(())
    }

    fn sort_comments(&mut self) -> Result<(), PromptError> {
        self.section(&["Comments", "Sort"], "SORT COMMENTS")?;

        let direction = match recover(self.prompt.sort_direction())? {
            Ok(direction) => direction,
            Err(message) => return self.prompt.say(&message),
        };
        let sorted = self.state.comments.sort_by_id(direction);
        render::print_comments(self.prompt.output(), &sorted, &self.state.users)?;
        Ok(())
    }

    /// Show what the actor may touch, read an id and check ownership
    fn pick_editable_comment(&mut self, actor: &Actor) -> Result<Option<CommentId>, PromptError> {
        let editable = session::editable_comments(actor, &self.state.comments);
        if editable.is_empty() {
            let message = if actor.is_admin() {
                "No comments yet."
            } else {
                "No comments you can change."
            };
            self.prompt.say(message)?;
            return Ok(None);
        }
        render::print_comments(self.prompt.output(), &editable, &self.state.users)?;

        let Some(id) = self.read_id("Comment id: ")? else {
            return Ok(None);
        };

        let allowed = self
            .state
            .comments
            .find_by_id(id)
            .map_err(SessionError::from)
            .and_then(|comment| session::ensure_can_modify(actor, &comment));

        match allowed {
            Ok(()) => Ok(Some(id)),
            Err(e) => {
                self.prompt.say(&e.to_string())?;
                Ok(None)
            }
        }
    }

    fn edit_comment(&mut self, actor: &Actor) -> Result<(), PromptError> {
        self.section(&["Comments", "Edit"], "EDIT COMMENT")?;

        let Some(id) = self.pick_editable_comment(actor)? else {
            return Ok(());
        };

        let strict = self.state.config.validation.strict_category_on_edit;
        let (text, category) = match recover(self.prompt.comment_edit_form(strict))? {
            Ok(values) => values,
            Err(message) => return self.prompt.say(&message),
        };

        let result = session::edit_comment_as(
            &mut self.state.comments,
            actor,
            id,
            text.as_deref(),
            category.as_deref(),
        );
        match result {
            Ok(()) => self.prompt.say("Comment updated."),
            Err(e) => self.prompt.say(&e.to_string()),
        }
    }

    fn delete_comment(&mut self, actor: &Actor) -> Result<(), PromptError> {
        self.section(&["Comments", "Delete"], "DELETE COMMENT")?;

        let Some(id) = self.pick_editable_comment(actor)? else {
            return Ok(());
        };

        if !self.prompt.confirm(&format!("Delete comment #{id}?"))? {
            return Ok(());
        }

        match session::delete_comment_as(&mut self.state.comments, actor, id) {
            Ok(()) => self.prompt.say("Comment deleted."),
            Err(e) => self.prompt.say(&e.to_string()),
        }
    }

    fn category_statistics(&mut self) -> Result<(), PromptError> {
        self.section(&["Admin Menu", "Statistics"], "CATEGORY STATISTICS")?;
        let counts = self.state.comments.category_counts();
        render::print_category_counts(self.prompt.output(), &counts)?;
        Ok(())
    }

    // Users

    fn list_users(&mut self) -> Result<(), PromptError> {
        self.section(&["Admin Menu", "Users"], "USERS")?;
        let users = self.state.users.list_all();
        render::print_users(self.prompt.output(), &users)?;
        Ok(())
    }

    fn add_user(&mut self) -> Result<(), PromptError> {
        self.section(&["Admin Menu", "Users", "Add"], "ADD USER")?;

        let created = self.with_retry(|app| {
            Ok(recover(app.prompt.login_form())?.and_then(|(username, password)| {
                app.state
                    .users
                    .create_user(&username, &password)
                    .map_err(|e| e.to_string())
            }))
        })?;

        if let Some(user_id) = created {
            self.prompt.say(&format!("User #{user_id} created."))?;
        }
        Ok(())
    }

    fn edit_user(&mut self) -> Result<(), PromptError> {
        self.section(&["Admin Menu", "Users", "Edit"], "EDIT USER")?;

        let users = self.state.users.list_all();
        render::print_users(self.prompt.output(), &users)?;

        let Some(id) = self.read_id("User id: ")? else {
            return Ok(());
        };
        if let Err(e) = self.state.users.find_by_id(id) {
            return self.prompt.say(&e.to_string());
        }

        let (username, password) = self.prompt.user_edit_form()?;
        match self
            .state
            .users
            .edit_user(id, username.as_deref(), password.as_deref())
        {
            Ok(()) => self.prompt.say("User updated."),
            Err(e) => self.prompt.say(&e.to_string()),
        }
    }

    fn delete_user(&mut self) -> Result<(), PromptError> {
        self.section(&["Admin Menu", "Users", "Delete"], "DELETE USER")?;

        let users = self.state.users.list_all();
        render::print_users(self.prompt.output(), &users)?;

        let Some(id) = self.read_id("User id: ")? else {
            return Ok(());
        };
        let user = match self.state.users.find_by_id(id) {
            Ok(user) => user,
            Err(e) => return self.prompt.say(&e.to_string()),
        };

        if !self.prompt.confirm(&format!("Delete user '{}'?", user.username))? {
            return Ok(());
        }

        match self.state.users.delete_user(id) {
            Ok(()) => self.prompt.say("User deleted."),
            Err(e) => self.prompt.say(&e.to_string()),
        }
    }

    fn search_users(&mut self) -> Result<(), PromptError> {
        self.section(&["Admin Menu", "Users", "Search"], "SEARCH USERS")?;
        let needle = self.prompt.read_line("Search username: ")?;

        match self.state.users.search_by_username(&needle) {
            Ok(found) => render::print_users(self.prompt.output(), &found)?,
            Err(e) => self.prompt.say(&e.to_string())?,
        }
        Ok(())
    }

    fn sort_users(&mut self) -> Result<(), PromptError> {
        self.section(&["Admin Menu", "Users", "Sort"], "SORT USERS")?;

        let direction = match recover(self.prompt.sort_direction())? {
            Ok(direction) => direction,
            Err(message) => return self.prompt.say(&message),
        };
        let sorted = self.state.users.sort_by_id(direction);
        render::print_users(self.prompt.output(), &sorted)?;
        Ok(())
    }
}
