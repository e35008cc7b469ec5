//! Seed the database with sample accounts, stores, and ratings.
//!
//! Idempotent: accounts are matched by email and skipped when present, and
//! rating writes go through the same keyed upsert the API uses, so running
//! the command twice changes nothing.

use tracing::info;

use ratestore_core::{Email, RatingValue, Role, UserId};
use ratestore_server::db::{
    self, ratings::RatingRepository, stores::StoreRepository, users::UserRepository,
};
use ratestore_server::models::{NewStore, NewUser, Store, User};

/// bcrypt work factor, matching the server's.
const BCRYPT_COST: u32 = 10;

/// Seed sample data.
///
/// # Errors
///
/// Returns an error if the environment is missing `RATESTORE_DATABASE_URL`
/// or a database operation fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let database_url = super::database_url()?;

    info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    let users = UserRepository::new(&pool);
    let stores = StoreRepository::new(&pool);
    let ratings = RatingRepository::new(&pool);

    ensure_user(
        &users,
        "System Administrator",
        "admin@storerating.com",
        "Admin@123",
        "123 Admin Street, Tech City, TC 12345",
        Role::SystemAdmin,
    )
    .await?;

    let store1 = ensure_store(
        &users,
        &stores,
        "John Store Owner One",
        "owner1@grocery.com",
        "Store@123",
        "Fresh Grocery Mart Store",
        "456 Market Avenue, Downtown, DT 67890",
    )
    .await?;

    let store2 = ensure_store(
        &users,
        &stores,
        "Jane Store Owner Two",
        "owner2@electronics.com",
        "Store@456",
        "TechWorld Electronics Store",
        "789 Tech Boulevard, Innovation Park, IP 11223",
    )
    .await?;

    let user1 = ensure_user(
        &users,
        "Alice Normal User One",
        "user1@example.com",
        "User@123",
        "321 Residential Lane, Suburb Area, SA 44556",
        Role::NormalUser,
    )
    .await?;

    let user2 = ensure_user(
        &users,
        "Bob Normal User Two",
        "user2@example.com",
        "User@456",
        "654 Community Drive, Neighborhood, NB 77889",
        Role::NormalUser,
    )
    .await?;

    seed_rating(&ratings, user1.id, &store1, 5).await?;
    seed_rating(&ratings, user2.id, &store1, 4).await?;
    seed_rating(&ratings, user1.id, &store2, 3).await?;

    info!("Seeding complete");
    info!("Admin: admin@storerating.com / Admin@123");
    info!("Store owner 1: owner1@grocery.com / Store@123");
    info!("Store owner 2: owner2@electronics.com / Store@456");
    info!("Normal user 1: user1@example.com / User@123");
    info!("Normal user 2: user2@example.com / User@456");
    Ok(())
}

/// Create an account unless one with this email already exists.
async fn ensure_user(
    users: &UserRepository<'_>,
    name: &str,
    email: &str,
    password: &str,
    address: &str,
    role: Role,
) -> Result<User, Box<dyn std::error::Error>> {
    let email = Email::parse(email)?;

    if let Some(existing) = users.get_by_email(&email).await? {
        info!(email = %existing.email, "Account exists, skipping");
        return Ok(existing);
    }

    let user = users
        .create(&NewUser {
            name: name.to_string(),
            email,
            password_hash: bcrypt::hash(password, BCRYPT_COST)?,
            address: address.to_string(),
            role,
        })
        .await?;

    info!(email = %user.email, role = %user.role, "Created account");
    Ok(user)
}

/// Create a store owner and their store unless the owner already exists.
///
/// The store's contact email matches the owner's, as in the sample data.
async fn ensure_store(
    users: &UserRepository<'_>,
    stores: &StoreRepository<'_>,
    owner_name: &str,
    owner_email: &str,
    owner_password: &str,
    store_name: &str,
    address: &str,
) -> Result<Store, Box<dyn std::error::Error>> {
    let email = Email::parse(owner_email)?;

    if let Some(owner) = users.get_by_email(&email).await? {
        let existing = stores
            .get_by_owner(owner.id)
            .await?
            .ok_or_else(|| format!("owner {owner_email} exists but has no store"))?;
        info!(store = %existing.store.name, "Store exists, skipping");
        return Ok(existing.store);
    }

    let owner = NewUser {
        name: owner_name.to_string(),
        email: email.clone(),
        password_hash: bcrypt::hash(owner_password, BCRYPT_COST)?,
        address: address.to_string(),
        role: Role::StoreOwner,
    };
    let store = NewStore {
        name: store_name.to_string(),
        email,
        address: address.to_string(),
    };

    let (owner, store) = stores.create_with_owner(&owner, &store).await?;
    info!(store = %store.name, owner = %owner.email, "Created store");
    Ok(store)
}

async fn seed_rating(
    ratings: &RatingRepository<'_>,
    user_id: UserId,
    store: &Store,
    value: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    let value = RatingValue::new(value)?;
    ratings.upsert(user_id, store.id, value).await?;
    info!(store = %store.name, value = value.get(), "Seeded rating");
    Ok(())
}
