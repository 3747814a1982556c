//! In-memory store for tests.
//!
//! Each unit of work operates on a private copy of the data, which replaces the shared copy on
//! commit.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use jiff::Timestamp;
use rustc_hash::FxHashMap;
use storefront::{
    Quantity,
    carts::{Cart, CartItem, CartUuid},
    orders::{Order, OrderUuid},
    products::{Product, ProductUuid},
    users::{User, UserUuid},
};

use crate::{
    repositories::{
        CartRepository, Categories, OrderRepository, ProductRepository, RepositoryError,
        UserRepository,
    },
    store::{Store, UnitOfWork},
};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    users: FxHashMap<UserUuid, User>,
    products: Vec<Product>,
    carts: FxHashMap<UserUuid, StoredCart>,
    orders: Vec<Order>,
}

#[derive(Debug, Clone)]
struct StoredCart {
    id: CartUuid,
    items: Vec<(ProductUuid, Quantity)>,
}

impl MemoryState {
    fn product(&self, id: ProductUuid) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    fn cart(&self, user: UserUuid) -> Option<Cart> {
        let stored = self.carts.get(&user)?;

        Some(Cart {
            id: stored.id,
            user_id: user,
            items: stored
                .items
                .iter()
                .map(|&(product_id, quantity)| CartItem {
                    product_id,
                    product: self.product(product_id).cloned(),
                    quantity,
                })
                .collect(),
        })
    }
}

type SharedState = Arc<Mutex<MemoryState>>;

fn lock(state: &SharedState) -> MutexGuard<'_, MemoryState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Store keeping everything in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    committed: SharedState,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, RepositoryError> {
        let working: SharedState = Arc::new(Mutex::new(lock(&self.committed).clone()));

        Ok(Box::new(MemoryUnitOfWork {
            committed: Arc::clone(&self.committed),
            repositories: MemoryRepositories { state: working },
        }))
    }
}

#[derive(Debug)]
struct MemoryUnitOfWork {
    committed: SharedState,
    repositories: MemoryRepositories,
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    fn users(&self) -> &dyn UserRepository {
        &self.repositories
    }

    fn products(&self) -> &dyn ProductRepository {
        &self.repositories
    }

    fn carts(&self) -> &dyn CartRepository {
        &self.repositories
    }

    fn orders(&self) -> &dyn OrderRepository {
        &self.repositories
    }

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError> {
        let working = lock(&self.repositories.state).clone();

        *lock(&self.committed) = working;

        Ok(())
    }
}

#[derive(Debug)]
struct MemoryRepositories {
    state: SharedState,
}

#[async_trait]
impl UserRepository for MemoryRepositories {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(lock(&self.state)
            .users
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: UserUuid) -> Result<Option<User>, RepositoryError> {
        Ok(lock(&self.state).users.get(&id).cloned())
    }

    async fn save(&self, user: &User) -> Result<User, RepositoryError> {
        let mut state = lock(&self.state);

        if state
            .users
            .values()
            .any(|other| other.email == user.email && other.id != user.id)
        {
            return Err(RepositoryError::AlreadyExists);
        }

        state.users.insert(user.id, user.clone());

        Ok(user.clone())
    }
}

#[async_trait]
impl ProductRepository for MemoryRepositories {
    async fn find_all(
        &self,
        offset: u64,
        limit: Option<u64>,
    ) -> Result<Vec<Product>, RepositoryError> {
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = limit.map_or(usize::MAX, |limit| {
            usize::try_from(limit).unwrap_or(usize::MAX)
        });

        Ok(lock(&self.state)
            .products
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: ProductUuid) -> Result<Option<Product>, RepositoryError> {
        Ok(lock(&self.state).product(id).cloned())
    }

    async fn save(&self, product: &Product) -> Result<Product, RepositoryError> {
        let mut state = lock(&self.state);

        let existing = state.products.iter_mut().find(|other| other.id == product.id);

        let saved = match existing {
            Some(existing) => {
                *existing = Product {
                    created_at: existing.created_at,
                    ..product.clone()
                };

                existing.clone()
            }
            None => {
                let created = Product {
                    created_at: Some(product.created_at.unwrap_or_else(Timestamp::now)),
                    ..product.clone()
                };

                state.products.push(created.clone());

                created
            }
        };

        Ok(saved)
    }

    async fn get_categories(&self) -> Result<Categories, RepositoryError> {
        let mut categories = Categories::new();

        for product in &lock(&self.state).products {
            if product.parent_category.is_empty() || product.category.is_empty() {
                continue;
            }

            let children = categories
                .entry(product.parent_category.clone())
                .or_default();

            if !children.contains(&product.category) {
                children.push(product.category.clone());
            }
        }

        for children in categories.values_mut() {
            children.sort();
        }

        Ok(categories)
    }
}

#[async_trait]
impl CartRepository for MemoryRepositories {
    async fn find_by_user_id(&self, user: UserUuid) -> Result<Option<Cart>, RepositoryError> {
        Ok(lock(&self.state).cart(user))
    }

    async fn save(&self, cart: &Cart) -> Result<Cart, RepositoryError> {
        let mut state = lock(&self.state);

        let id = state.carts.get(&cart.user_id).map_or(cart.id, |stored| stored.id);

        state.carts.insert(
            cart.user_id,
            StoredCart {
                id,
                items: cart
                    .items
                    .iter()
                    .map(|item| (item.product_id, item.quantity))
                    .collect(),
            },
        );

        state.cart(cart.user_id).ok_or(RepositoryError::NotFound)
    }
}

#[async_trait]
impl OrderRepository for MemoryRepositories {
    async fn find_by_user_id(&self, user: UserUuid) -> Result<Vec<Order>, RepositoryError> {
        Ok(lock(&self.state)
            .orders
            .iter()
            .rev()
            .filter(|order| order.belongs_to(user))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: OrderUuid) -> Result<Option<Order>, RepositoryError> {
        Ok(lock(&self.state)
            .orders
            .iter()
            .find(|order| order.id == id)
            .cloned())
    }

    async fn save(&self, order: &Order) -> Result<Order, RepositoryError> {
        let mut state = lock(&self.state);

        let saved = Order {
            created_at: Some(order.created_at.unwrap_or_else(Timestamp::now)),
            ..order.clone()
        };

        match state.orders.iter_mut().find(|other| other.id == order.id) {
            Some(existing) => {
                *existing = Order {
                    created_at: existing.created_at,
                    ..saved.clone()
                };
            }
            None => state.orders.push(saved.clone()),
        }

        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use storefront::{Price, users::Role};
    use testresult::TestResult;

    use super::*;

    fn product(name: &str, parent: &str, category: &str) -> TestResult<Product> {
        Ok(Product {
            id: ProductUuid::new(),
            name: name.to_string(),
            description: String::new(),
            price: Price::new(Decimal::new(10_00, 2))?,
            stock: Quantity::new(5),
            image_url: String::new(),
            category: category.to_string(),
            parent_category: parent.to_string(),
            created_at: None,
        })
    }

    fn user(email: &str) -> User {
        User {
            id: UserUuid::new(),
            email: email.to_string(),
            name: "Shopper".to_string(),
            hashed_password: "hash".to_string(),
            role: Role::Customer,
        }
    }

    #[tokio::test]
    async fn uncommitted_writes_are_discarded() -> TestResult {
        let store = MemoryStore::new();

        let uow = store.begin().await?;
        uow.users().save(&user("a@example.com")).await?;
        drop(uow);

        let uow = store.begin().await?;

        assert!(uow.users().find_by_email("a@example.com").await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn committed_writes_are_visible_to_later_units_of_work() -> TestResult {
        let store = MemoryStore::new();

        let uow = store.begin().await?;
        uow.users().save(&user("a@example.com")).await?;
        uow.commit().await?;

        let uow = store.begin().await?;

        assert!(uow.users().find_by_email("a@example.com").await?.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() -> TestResult {
        let store = MemoryStore::new();
        let uow = store.begin().await?;

        uow.users().save(&user("a@example.com")).await?;

        let result = uow.users().save(&user("a@example.com")).await;

        assert!(
            matches!(result, Err(RepositoryError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn find_all_pages_in_insertion_order() -> TestResult {
        let store = MemoryStore::new();
        let uow = store.begin().await?;

        for name in ["a", "b", "c"] {
            uow.products().save(&product(name, "", "")?).await?;
        }

        let page: Vec<String> = uow
            .products()
            .find_all(1, Some(1))
            .await?
            .into_iter()
            .map(|product| product.name)
            .collect();

        assert_eq!(page, vec!["b".to_string()]);
        assert_eq!(uow.products().find_all(0, None).await?.len(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn categories_are_grouped_sorted_and_distinct() -> TestResult {
        let store = MemoryStore::new();
        let uow = store.begin().await?;

        uow.products().save(&product("a", "Tops", "T-Shirts")?).await?;
        uow.products().save(&product("b", "Tops", "Hoodies")?).await?;
        uow.products().save(&product("c", "Tops", "T-Shirts")?).await?;
        uow.products().save(&product("d", "", "Loose")?).await?;

        let categories = uow.products().get_categories().await?;

        assert_eq!(categories.len(), 1);
        assert_eq!(
            categories.get("Tops"),
            Some(&vec!["Hoodies".to_string(), "T-Shirts".to_string()])
        );

        Ok(())
    }

    #[tokio::test]
    async fn saved_cart_resolves_products() -> TestResult {
        let store = MemoryStore::new();
        let uow = store.begin().await?;

        let shirt = uow.products().save(&product("a", "Tops", "T-Shirts")?).await?;
        let mut cart = Cart::empty(UserUuid::new());

        cart.add_item(CartItem {
            product_id: shirt.id,
            product: None,
            quantity: Quantity::new(2),
        });

        let saved = uow.carts().save(&cart).await?;

        assert_eq!(
            saved.items.first().and_then(|item| item.product.clone()),
            Some(shirt)
        );

        Ok(())
    }

    #[tokio::test]
    async fn second_cart_for_a_user_keeps_the_first_id() -> TestResult {
        let store = MemoryStore::new();
        let uow = store.begin().await?;
        let user = UserUuid::new();

        let first = uow.carts().save(&Cart::empty(user)).await?;
        let second = uow.carts().save(&Cart::empty(user)).await?;

        assert_eq!(first.id, second.id);

        Ok(())
    }
}
