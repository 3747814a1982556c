//! Development data.
//!
//! Two accounts and a small clothing catalogue. Seeding is idempotent: users are matched by
//! email and products by name, and existing rows are left untouched.

use rust_decimal::Decimal;
use storefront::{
    Price, Quantity,
    products::{Product, ProductUuid},
    users::{Role, User, UserUuid},
};
use tracing::info;

use crate::{auth::PasswordHasher, store::Store, use_cases::UseCaseError};

struct SeedUser {
    email: &'static str,
    name: &'static str,
    password: &'static str,
    role: Role,
}

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    cents: i64,
    stock: u32,
    image: &'static str,
    category: &'static str,
    parent_category: &'static str,
}

const USERS: &[SeedUser] = &[
    SeedUser {
        email: "admin@storefront.test",
        name: "Admin",
        password: "admin123",
        role: Role::Admin,
    },
    SeedUser {
        email: "customer@storefront.test",
        name: "Test User",
        password: "test123",
        role: Role::Customer,
    },
];

const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Classic White T-Shirt",
        description: "Essential cotton t-shirt in classic white. Soft, breathable fabric for everyday wear.",
        cents: 29_99,
        stock: 100,
        image: "photo-1521572163474-6864f9cf17ab",
        category: "T-Shirts",
        parent_category: "Tops",
    },
    SeedProduct {
        name: "Black Graphic Tee",
        description: "Bold graphic print on premium black cotton.",
        cents: 34_99,
        stock: 75,
        image: "photo-1503342217505-b0a15ec3261c",
        category: "T-Shirts",
        parent_category: "Tops",
    },
    SeedProduct {
        name: "Slim Fit Jeans",
        description: "Slim fit jeans in indigo wash. Stretch denim.",
        cents: 59_99,
        stock: 60,
        image: "photo-1542272604-787c3835535d",
        category: "Pants",
        parent_category: "Bottoms",
    },
    SeedProduct {
        name: "Casual Hoodie",
        description: "Pullover hoodie in heather gray.",
        cents: 49_99,
        stock: 80,
        image: "photo-1556821840-3a63f95609a7",
        category: "Hoodies",
        parent_category: "Tops",
    },
    SeedProduct {
        name: "Leather Sneakers",
        description: "Leather sneakers with a cushioned sole.",
        cents: 89_99,
        stock: 45,
        image: "photo-1549298916-b41d501d3772",
        category: "Shoes",
        parent_category: "Footwear",
    },
    SeedProduct {
        name: "Denim Jacket",
        description: "Denim jacket with button closure and a vintage wash.",
        cents: 79_99,
        stock: 35,
        image: "photo-1576995853123-5a10305d93c0",
        category: "Jackets",
        parent_category: "Outerwear",
    },
    SeedProduct {
        name: "Striped Polo Shirt",
        description: "Navy and white striped polo in pique cotton.",
        cents: 39_99,
        stock: 90,
        image: "photo-1625910513413-5fc42f2aec71",
        category: "T-Shirts",
        parent_category: "Tops",
    },
    SeedProduct {
        name: "Chino Pants",
        description: "Tailored chino pants in khaki.",
        cents: 54_99,
        stock: 55,
        image: "photo-1473966968600-fa801b869a1a",
        category: "Pants",
        parent_category: "Bottoms",
    },
    SeedProduct {
        name: "Canvas Backpack",
        description: "Canvas backpack with leather accents.",
        cents: 69_99,
        stock: 40,
        image: "photo-1553062407-98eeb64c6a62",
        category: "Bags",
        parent_category: "Accessories",
    },
    SeedProduct {
        name: "Wool Beanie",
        description: "Merino wool beanie in charcoal.",
        cents: 24_99,
        stock: 120,
        image: "photo-1576871337632-b9aef4c17ab9",
        category: "Hats",
        parent_category: "Accessories",
    },
    SeedProduct {
        name: "Running Shoes",
        description: "Lightweight running shoes with a mesh upper.",
        cents: 109_99,
        stock: 50,
        image: "photo-1542291026-7eec264c27ff",
        category: "Shoes",
        parent_category: "Footwear",
    },
    SeedProduct {
        name: "Linen Summer Shirt",
        description: "Relaxed fit linen shirt in light blue.",
        cents: 44_99,
        stock: 65,
        image: "photo-1596755094514-f87e34085b2c",
        category: "Shirts",
        parent_category: "Tops",
    },
];

/// Rows created by one [`seed`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub products: usize,
}

/// Insert the development accounts and catalogue, skipping anything already present.
///
/// # Errors
///
/// Returns an error when hashing a password or any storage operation fails. Nothing is written
/// in that case.
pub async fn seed(
    store: &dyn Store,
    passwords: &dyn PasswordHasher,
) -> Result<SeedReport, UseCaseError> {
    let uow = store.begin().await?;
    let mut report = SeedReport::default();

    for seed in USERS {
        if uow.users().find_by_email(seed.email).await?.is_some() {
            continue;
        }

        uow.users()
            .save(&User {
                id: UserUuid::new(),
                email: seed.email.to_string(),
                name: seed.name.to_string(),
                hashed_password: passwords.hash(seed.password)?,
                role: seed.role,
            })
            .await?;

        info!(email = seed.email, role = %seed.role, "seeded user");

        report.users += 1;
    }

    let existing: Vec<String> = uow
        .products()
        .find_all(0, None)
        .await?
        .into_iter()
        .map(|product| product.name)
        .collect();

    for seed in PRODUCTS {
        if existing.iter().any(|name| name == seed.name) {
            continue;
        }

        uow.products().save(&product(seed)?).await?;

        info!(name = seed.name, "seeded product");

        report.products += 1;
    }

    uow.commit().await?;

    Ok(report)
}

fn product(seed: &SeedProduct) -> Result<Product, UseCaseError> {
    Ok(Product {
        id: ProductUuid::new(),
        name: seed.name.to_string(),
        description: seed.description.to_string(),
        price: Price::new(Decimal::new(seed.cents, 2))?,
        stock: Quantity::new(seed.stock),
        image_url: format!("https://images.unsplash.com/{}?w=400", seed.image),
        category: seed.category.to_string(),
        parent_category: seed.parent_category.to_string(),
        created_at: None,
    })
}
