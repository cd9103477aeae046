use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// A user identity as the authentication provider reports it.
///
/// [`TestUser::default`] is the canned identity every harness signs in
/// unless told otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestUser {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// All addresses on the account; the first one is the primary.
    pub emails: Vec<String>,
}

impl TestUser {
    /// Primary (first) email address, if any.
    pub fn email(&self) -> Option<&str> {
        self.emails.first().map(String::as_str)
    }
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            id: "test-user-id".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            emails: vec!["test@example.com".to_string()],
        }
    }
}

/// Session and identity seam.
pub trait AuthProvider: Send + Sync {
    /// The signed-in user, or `None` when signed out.
    fn current_user(&self) -> Option<TestUser>;

    /// Id of the signed-in user, or `None` when signed out.
    fn user_id(&self) -> Option<String>;

    /// Returns whether a user is signed in.
    fn is_signed_in(&self) -> bool;

    /// Returns whether the provider has finished loading.
    fn is_loaded(&self) -> bool;

    /// Directory lookup by user id.
    fn get_user(&self, id: &str) -> Option<TestUser>;
}

struct AuthState {
    user: Option<TestUser>,
    loaded: bool,
    directory: HashMap<String, TestUser>,
    lookups: Vec<String>,
}

/// Recording auth double: a seeded session plus a user directory whose
/// lookups are recorded for assertions.
pub struct StubAuth {
    state: Mutex<AuthState>,
}

impl StubAuth {
    /// Signed in as the canned [`TestUser::default`] identity.
    pub fn new() -> Self {
        Self::signed_in(TestUser::default())
    }

    /// Signed in as `user`, with the directory seeded with the same
    /// identity.
    pub fn signed_in(user: TestUser) -> Self {
        let auth = Self::signed_out();
        auth.sign_in(user);
        auth
    }

    /// Signed out and fully loaded, with an empty directory.
    pub fn signed_out() -> Self {
        Self {
            state: Mutex::new(AuthState {
                user: None,
                loaded: true,
                directory: HashMap::new(),
                lookups: Vec::new(),
            }),
        }
    }

    /// Signs `user` in and adds it to the directory.
    pub fn sign_in(&self, user: TestUser) {
        let mut state = self.state.lock().unwrap();
        state.directory.insert(user.id.clone(), user.clone());
        state.user = Some(user);
    }

    /// Signs the current user out. The directory keeps its entries.
    pub fn sign_out(&self) {
        self.state.lock().unwrap().user = None;
    }

    /// Flips the loaded flag, for tests that model a provider still
    /// loading.
    pub fn set_loaded(&self, loaded: bool) {
        self.state.lock().unwrap().loaded = loaded;
    }

    /// Adds `user` to the directory served by
    /// [`get_user`](AuthProvider::get_user).
    pub fn add_user(&self, user: TestUser) {
        self.state.lock().unwrap().directory.insert(user.id.clone(), user);
    }

    /// Ids passed to `get_user`, in call order.
    pub fn lookups(&self) -> Vec<String> {
        self.state.lock().unwrap().lookups.clone()
    }
}

impl Default for StubAuth {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthProvider for StubAuth {
    fn current_user(&self) -> Option<TestUser> {
        self.state.lock().unwrap().user.clone()
    }

    fn user_id(&self) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .user
            .as_ref()
            .map(|user| user.id.clone())
    }

    fn is_signed_in(&self) -> bool {
        self.state.lock().unwrap().user.is_some()
    }

    fn is_loaded(&self) -> bool {
        self.state.lock().unwrap().loaded
    }

    fn get_user(&self, id: &str) -> Option<TestUser> {
        let mut state = self.state.lock().unwrap();
        state.lookups.push(id.to_string());
        state.directory.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_in_by_default_with_the_canned_identity() {
        let auth = StubAuth::new();
        assert!(auth.is_signed_in());
        assert!(auth.is_loaded());
        assert_eq!(auth.user_id().as_deref(), Some("test-user-id"));

        let user = auth.current_user().expect("signed in");
        assert_eq!(user.first_name, "Test");
        assert_eq!(user.last_name, "User");
        assert_eq!(user.email(), Some("test@example.com"));
    }

    #[test]
    fn signed_out_reports_no_identity() {
        let auth = StubAuth::signed_out();
        assert!(!auth.is_signed_in());
        assert!(auth.current_user().is_none());
        assert!(auth.user_id().is_none());
        assert!(auth.is_loaded()); // loading finished, just nobody home
    }

    #[test]
    fn sign_in_and_out_flip_the_session() {
        let auth = StubAuth::signed_out();

        auth.sign_in(TestUser::default());
        assert!(auth.is_signed_in());

        auth.sign_out();
        assert!(!auth.is_signed_in());
        // the signed-out user is still in the directory
        assert!(auth.get_user("test-user-id").is_some());
    }

    #[test]
    fn directory_lookups_hit_seeded_users_and_are_recorded() {
        let auth = StubAuth::new();
        auth.add_user(TestUser {
            id: "admin-user-id".to_string(),
            first_name: "Admin".to_string(),
            ..Default::default()
        });

        assert_eq!(
            auth.get_user("admin-user-id").map(|user| user.first_name),
            Some("Admin".to_string())
        );
        assert!(auth.get_user("nobody").is_none());
        assert_eq!(
            auth.lookups(),
            vec!["admin-user-id".to_string(), "nobody".to_string()]
        );
    }

    #[test]
    fn set_loaded_models_a_provider_still_loading() {
        let auth = StubAuth::new();
        auth.set_loaded(false);
        assert!(!auth.is_loaded());
        assert!(auth.is_signed_in()); // the session itself is untouched
    }
}
