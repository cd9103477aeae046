use std::future::Future;
use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::auth::{AuthProvider, StubAuth, TestUser};
use crate::config::{
    ENV_ADMIN_USER_ID, ENV_STRIPE_PUBLISHABLE_KEY, ENV_STRIPE_SECRET_KEY, HarnessConfig,
};
use crate::env::{EnvSource, StubEnv};
use crate::fetch::{FetchProvider, StubFetch};
use crate::payments::{PaymentGateway, StubPayments};
use crate::router::{Router, StubRouter};

/// One bundle of every double, freshly constructed per test.
///
/// The harness replaces process-global substitution with explicit
/// injection: each test builds its own harness, hands the type-erased
/// `Arc<dyn Trait>` handles to the code under test, and scripts or asserts
/// through the concrete handles. Nothing is shared between harnesses, so
/// no test-order coupling exists. The only process-wide effect is the
/// idempotent logging init.
///
/// The harness owns its own Tokio runtime so synchronous test bodies can
/// drive the async seams via [`block_on`](TestHarness::block_on). Construct
/// it in ordinary (non-async) test functions; a runtime cannot be created
/// or dropped inside another runtime.
///
/// ```
/// use webstub::TestHarness;
/// use webstub::auth::AuthProvider;
///
/// let harness = TestHarness::new(None);
/// assert!(harness.auth().is_signed_in());
/// ```
pub struct TestHarness {
    config: HarnessConfig,
    fetch: Arc<StubFetch>,
    router: Arc<StubRouter>,
    auth: Arc<StubAuth>,
    payments: Arc<StubPayments>,
    env: Arc<StubEnv>,
    runtime: Arc<Runtime>,
}

impl TestHarness {
    /// Builds a harness. `None` uses [`HarnessConfig::default`].
    pub fn new(config: Option<HarnessConfig>) -> Self {
        // Tests race to initialize logging; only the first init wins.
        let _ = env_logger::builder().is_test(true).try_init();

        let config = config.unwrap_or_default();

        let runtime = Arc::new(
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .expect("Failed to create Tokio runtime"),
        );

        let env = Arc::new(StubEnv::new());
        env.set(ENV_STRIPE_PUBLISHABLE_KEY, &config.publishable_key);
        env.set(ENV_STRIPE_SECRET_KEY, &config.secret_key);
        env.set(ENV_ADMIN_USER_ID, &config.admin_user_id);

        let auth = Arc::new(if config.signed_in {
            StubAuth::signed_in(config.user.clone())
        } else {
            StubAuth::signed_out()
        });
        // Directory always knows the configured identity and the admin
        // user matching the seeded env value, signed in or not.
        auth.add_user(config.user.clone());
        auth.add_user(TestUser {
            id: config.admin_user_id.clone(),
            first_name: "Admin".to_string(),
            last_name: "User".to_string(),
            emails: vec!["admin@example.com".to_string()],
        });

        let router = Arc::new(StubRouter::with_location(&config.pathname, &config.query));

        Self {
            config,
            fetch: Arc::new(StubFetch::new()),
            router,
            auth,
            payments: Arc::new(StubPayments::new()),
            env,
            runtime,
        }
    }

    /// Entry point for builder-style construction.
    pub fn builder() -> HarnessBuilder {
        HarnessBuilder::default()
    }

    /// The configuration this harness was built from.
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// The concrete fetch double, for scripting and assertions.
    pub fn fetch(&self) -> Arc<StubFetch> {
        self.fetch.clone()
    }

    /// The concrete router double.
    pub fn router(&self) -> Arc<StubRouter> {
        self.router.clone()
    }

    /// The concrete auth double.
    pub fn auth(&self) -> Arc<StubAuth> {
        self.auth.clone()
    }

    /// The concrete payments double.
    pub fn payments(&self) -> Arc<StubPayments> {
        self.payments.clone()
    }

    /// The concrete env double.
    pub fn env(&self) -> Arc<StubEnv> {
        self.env.clone()
    }

    /// Type-erased fetch handle to inject into code under test.
    pub fn fetch_provider(&self) -> Arc<dyn FetchProvider> {
        self.fetch.clone()
    }

    /// Type-erased router handle to inject into code under test.
    pub fn router_handle(&self) -> Arc<dyn Router> {
        self.router.clone()
    }

    /// Type-erased auth handle to inject into code under test.
    pub fn auth_provider(&self) -> Arc<dyn AuthProvider> {
        self.auth.clone()
    }

    /// Type-erased payments handle to inject into code under test.
    pub fn payment_gateway(&self) -> Arc<dyn PaymentGateway> {
        self.payments.clone()
    }

    /// Type-erased env handle to inject into code under test.
    pub fn env_source(&self) -> Arc<dyn EnvSource> {
        self.env.clone()
    }

    /// Drives a future to completion on the harness runtime, so synchronous
    /// test bodies can call the async seams.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

/// Builder-style harness construction for tests that tweak a field or two.
#[derive(Default)]
pub struct HarnessBuilder {
    config: HarnessConfig,
    extra_env: Vec<(String, String)>,
}

impl HarnessBuilder {
    /// Signs in as `user` instead of the canned identity.
    pub fn user(mut self, user: TestUser) -> Self {
        self.config.user = user;
        self
    }

    /// Starts the auth double signed out.
    pub fn signed_out(mut self) -> Self {
        self.config.signed_in = false;
        self
    }

    /// Positions the router double.
    pub fn location(mut self, pathname: &str, query: &str) -> Self {
        self.config.pathname = pathname.to_string();
        self.config.query = query.to_string();
        self
    }

    /// Seeds an extra variable into the env double, on top of the defaults.
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.extra_env.push((key.to_string(), value.to_string()));
        self
    }

    pub fn build(self) -> TestHarness {
        let harness = TestHarness::new(Some(self.config));
        for (key, value) in &self.extra_env {
            harness.env().set(key, value);
        }
        harness
    }
}
