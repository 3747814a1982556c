//! Test helpers.

use std::sync::Arc;

use jiff::SignedDuration;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use storefront::{
    Price, Quantity,
    products::{Product, ProductUuid},
    users::{Role, User, UserUuid},
};
use storefront_app::{
    auth::{
        Argon2PasswordHasher, JwtTokenGenerator, MockPasswordHasher, MockTokenGenerator,
        PasswordHasher, TokenSettings,
    },
    context::AppContext,
    store::MemoryStore,
};
use testresult::TestResult;

use crate::{auth::cookies::RefreshCookie, state::State};

fn refresh_cookie() -> RefreshCookie {
    RefreshCookie {
        name: "refresh_token".to_string(),
        secure: false,
        max_age: SignedDuration::from_hours(24 * 7),
    }
}

fn strict_passwords_mock() -> MockPasswordHasher {
    let mut passwords = MockPasswordHasher::new();

    passwords.expect_hash().never();
    passwords.expect_verify().never();

    passwords
}

/// State over an empty in-memory store with the given token mock.
pub(crate) fn state_with_tokens(tokens: MockTokenGenerator) -> Arc<State> {
    State::new(
        AppContext::new(
            Arc::new(MemoryStore::new()),
            Arc::new(strict_passwords_mock()),
            Arc::new(tokens),
        ),
        refresh_cookie(),
    )
}

/// State over an empty in-memory store with real hashing and signing.
pub(crate) fn test_state() -> TestResult<Arc<State>> {
    let settings = TokenSettings {
        secret: "test-secret-with-enough-entropy".to_string(),
        access_ttl: SignedDuration::from_mins(30),
        refresh_ttl: SignedDuration::from_hours(24 * 7),
    };

    Ok(State::new(
        AppContext::new(
            Arc::new(MemoryStore::new()),
            Arc::new(Argon2PasswordHasher::with_costs(8, 1, 1)?),
            Arc::new(JwtTokenGenerator::new(&settings)),
        ),
        refresh_cookie(),
    ))
}

pub(crate) fn service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}

/// Same as [`service`], but every route requires a bearer token.
pub(crate) fn authenticated_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(crate::auth::middleware::handler)
            .push(route),
    )
}

async fn create_user(
    state: &State,
    email: &str,
    password: &str,
    role: Role,
) -> TestResult<UserUuid> {
    let uow = state.app.begin().await?;

    let user = uow
        .users()
        .save(&User {
            id: UserUuid::new(),
            email: email.to_string(),
            name: "Test User".to_string(),
            hashed_password: state.app.passwords.hash(password)?,
            role,
        })
        .await?;

    uow.commit().await?;

    Ok(user.id)
}

/// Create a customer account directly in the store.
pub(crate) async fn register(state: &State, email: &str, password: &str) -> TestResult<UserUuid> {
    create_user(state, email, password, Role::Customer).await
}

/// Create an admin account directly in the store.
pub(crate) async fn register_admin(state: &State, email: &str) -> TestResult<UserUuid> {
    create_user(state, email, "admin-password", Role::Admin).await
}

/// `Authorization` header value for `user`.
pub(crate) fn bearer(state: &State, user: UserUuid) -> TestResult<String> {
    Ok(format!("Bearer {}", state.app.tokens.generate(user)?))
}

/// Insert a product priced at `cents`.
pub(crate) async fn add_product(
    state: &State,
    name: &str,
    cents: i64,
    category: &str,
    parent_category: &str,
) -> TestResult<Product> {
    let uow = state.app.begin().await?;

    let product = uow
        .products()
        .save(&Product {
            id: ProductUuid::new(),
            name: name.to_string(),
            description: format!("{name} description"),
            price: Price::new(Decimal::new(cents, 2))?,
            stock: Quantity::new(10),
            image_url: format!("https://images.example.com/{}.jpg", name.to_lowercase()),
            category: category.to_string(),
            parent_category: parent_category.to_string(),
            created_at: None,
        })
        .await?;

    uow.commit().await?;

    Ok(product)
}
