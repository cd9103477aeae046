use crate::auth::TestUser;

/// Env var the publishable payment key is seeded under.
pub const ENV_STRIPE_PUBLISHABLE_KEY: &str = "STRIPE_PUBLISHABLE_KEY";
/// Env var the secret payment key is seeded under.
pub const ENV_STRIPE_SECRET_KEY: &str = "STRIPE_SECRET_KEY";
/// Env var the admin user id is seeded under.
pub const ENV_ADMIN_USER_ID: &str = "ADMIN_USER_ID";

const DEFAULT_PUBLISHABLE_KEY: &str = "pk_test_mock";
const DEFAULT_SECRET_KEY: &str = "sk_test_mock";
const DEFAULT_ADMIN_USER_ID: &str = "admin-user-id";

/// Harness configuration: the identity, location, and environment every
/// double starts from.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Identity the auth double signs in (when `signed_in` is set).
    pub user: TestUser,
    /// Whether the auth double starts signed in.
    pub signed_in: bool,
    /// Pathname the router double reports.
    pub pathname: String,
    /// Query string for the router double; a leading `?` is tolerated.
    pub query: String,
    /// Publishable payment key seeded into the env double.
    pub publishable_key: String,
    /// Secret payment key seeded into the env double.
    pub secret_key: String,
    /// Admin user id seeded into the env double and the auth directory.
    pub admin_user_id: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            user: TestUser::default(),
            signed_in: true,
            pathname: "/".to_string(),
            query: String::new(),
            publishable_key: DEFAULT_PUBLISHABLE_KEY.to_string(),
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            admin_user_id: DEFAULT_ADMIN_USER_ID.to_string(),
        }
    }
}
