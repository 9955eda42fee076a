#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::HashParams;
use auth::TokenSettings;
use ecobucks_service::domain::disposal::service::DisposalService;
use ecobucks_service::domain::station::registry::StationRegistry;
use ecobucks_service::domain::user::models::User;
use ecobucks_service::domain::user::models::Username;
use ecobucks_service::domain::user::ports::UserRepository;
use ecobucks_service::domain::user::service::UserService;
use ecobucks_service::inbound::http::router::create_router;
use ecobucks_service::inbound::http::router::AppState;
use ecobucks_service::outbound::repositories::InMemoryDisposalRepository;
use ecobucks_service::outbound::repositories::InMemoryUserRepository;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Cheap Argon2id cost so tests do not spend seconds hashing.
pub fn test_hash_params() -> HashParams {
    HashParams {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
        ..HashParams::default()
    }
}

pub fn test_authenticator() -> Arc<Authenticator> {
    Arc::new(
        Authenticator::new(TEST_SECRET, test_hash_params(), TokenSettings::default())
            .expect("Failed to create authenticator"),
    )
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
    pub users: Arc<InMemoryUserRepository>,
}

impl TestApp {
    /// Spawn the application over in-memory storage
    pub async fn spawn() -> Self {
        let authenticator = test_authenticator();
        let users = Arc::new(InMemoryUserRepository::new());
        let disposals = Arc::new(InMemoryDisposalRepository::new(&users));

        let state = AppState {
            user_service: Arc::new(UserService::new(
                Arc::clone(&users),
                Arc::clone(&authenticator),
            )),
            disposal_service: Arc::new(DisposalService::new(disposals)),
            station_registry: Arc::new(StationRegistry::new(Duration::from_secs(300))),
            authenticator: Arc::clone(&authenticator),
        };

        let address = spawn_server(state).await;

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator,
            users,
        }
    }

    /// Store a user directly, bypassing registration.
    pub async fn seed_user(&self, username: &str, password: &str, is_operator: bool) -> User {
        let mut user = User::new(
            username.to_string(),
            Username::new(username.to_string()).expect("Invalid username"),
            self.authenticator
                .hash_password(password)
                .expect("Failed to hash password"),
        );
        user.is_operator = is_operator;

        self.users.create(user).await.expect("Failed to seed user")
    }

    /// Access token for a stored user.
    pub fn token_for(&self, user: &User) -> String {
        self.authenticator
            .issue_access_token(&user.id.to_string(), user.username.as_str())
            .expect("Failed to issue token")
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.put(path).bearer_auth(token)
    }
}

/// Serve `state` on a random local port and return its base URL.
pub async fn spawn_server(state: AppState) -> String {
    // Use random port (0 = OS assigns)
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let router = create_router(state);
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Server error");
    });

    format!("http://127.0.0.1:{}", port)
}
