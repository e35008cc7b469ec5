//! End-to-end API tests against the real router and an in-memory database.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chrono::Utc;
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::net::IpAddr;
use tower::ServiceExt;
use uuid::Uuid;

use ratestore_server::config::AppConfig;
use ratestore_server::db::MIGRATOR;
use ratestore_server::routes;
use ratestore_server::state::AppState;

async fn setup() -> (Router, SqlitePool) {
    // A single connection keeps every query on the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    MIGRATOR.run(&pool).await.unwrap();

    let config = AppConfig {
        database_url: SecretString::from("sqlite::memory:"),
        host: IpAddr::from([127, 0, 0, 1]),
        port: 0,
        jwt_secret: SecretString::from("integration-test-secret"),
        token_ttl_days: 7,
    };

    let app = routes::app(AppState::new(config, pool.clone()));
    (app, pool)
}

async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value, Option<String>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("token={token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string());

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body, set_cookie)
}

fn cookie_token(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .and_then(|pair| pair.strip_prefix("token="))
        .unwrap()
        .to_string()
}

/// Insert an account directly, bypassing signup's forced role. Low bcrypt
/// cost to keep the suite fast; login verification doesn't care.
async fn insert_user(pool: &SqlitePool, name: &str, email: &str, password: &str, role: &str) {
    let now = Utc::now();
    sqlx::query(
        "INSERT INTO users (id, name, email, password_hash, address, role, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(name)
    .bind(email)
    .bind(bcrypt::hash(password, 4).unwrap())
    .bind("1 Test Street")
    .bind(role)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .unwrap();
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, _, set_cookie) = request(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    cookie_token(&set_cookie.unwrap())
}

/// Seed an admin and have them create a store with an owner account.
/// Returns (admin token, store id).
async fn seed_store(app: &Router, pool: &SqlitePool) -> (String, String) {
    insert_user(pool, "Test Admin", "admin@test.com", "Admin@123", "SYSTEM_ADMIN").await;
    let admin = login(app, "admin@test.com", "Admin@123").await;

    let (status, body, _) = request(
        app,
        Method::POST,
        "/api/admin/stores",
        Some(&admin),
        Some(json!({
            "ownerName": "Grocery Owner",
            "ownerEmail": "owner@grocery.com",
            "ownerPassword": "Store@123",
            "ownerAddress": "2 Market Street",
            "storeName": "Fresh Grocery",
            "storeEmail": "contact@grocery.com",
            "storeAddress": "2 Market Street",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let store_id = body["store"]["id"].as_str().unwrap().to_string();
    (admin, store_id)
}

#[tokio::test]
async fn signup_forces_normal_user_role() {
    let (app, _pool) = setup().await;

    // The payload tries to claim a role; it must be ignored.
    let (status, body, _) = request(
        &app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({
            "name": "Johnathan Maxwell Doe",
            "email": "john@example.com",
            "password": "Abcdefg1!",
            "address": "xxxxxxxxxx",
            "role": "SYSTEM_ADMIN",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["user"]["role"], "NORMAL_USER");
    assert_eq!(body["user"]["email"], "john@example.com");
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn signup_rejects_short_names_and_weak_passwords() {
    let (app, _pool) = setup().await;

    let cases = [
        // Name below the 20-character signup minimum.
        json!({ "name": "Short Name", "email": "a@example.com",
                "password": "Abcdefg1!", "address": "x" }),
        // No uppercase letter.
        json!({ "name": "Johnathan Maxwell Doe", "email": "b@example.com",
                "password": "abcdefg1!", "address": "x" }),
        // No special character.
        json!({ "name": "Johnathan Maxwell Doe", "email": "c@example.com",
                "password": "Abcdefg12", "address": "x" }),
        // Too long (17 characters).
        json!({ "name": "Johnathan Maxwell Doe", "email": "d@example.com",
                "password": "Abcdefghijklmno1!", "address": "x" }),
        // Missing field.
        json!({ "name": "Johnathan Maxwell Doe", "email": "e@example.com",
                "password": "Abcdefg1!" }),
    ];

    for payload in cases {
        let (status, body, _) =
            request(&app, Method::POST, "/api/auth/signup", None, Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn duplicate_signup_email_conflicts() {
    let (app, pool) = setup().await;

    let payload = json!({
        "name": "Johnathan Maxwell Doe",
        "email": "dup@example.com",
        "password": "Abcdefg1!",
        "address": "xxxxxxxxxx",
    });

    let (status, _, _) =
        request(&app, Method::POST, "/api/auth/signup", None, Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body, _) =
        request(&app, Method::POST, "/api/auth/signup", None, Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "User with this email already exists");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn login_failures_use_one_generic_message() {
    let (app, pool) = setup().await;
    insert_user(&pool, "Some User", "user@test.com", "Right@123", "NORMAL_USER").await;

    // Wrong password for a real account.
    let (status, body, set_cookie) = request(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "user@test.com", "password": "Wrong@123" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid email or password");
    assert!(set_cookie.is_none());

    // Unknown email: byte-identical response.
    let (status, body, _) = request(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "nobody@test.com", "password": "Right@123" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid email or password");
}

#[tokio::test]
async fn me_returns_the_session_account() {
    let (app, pool) = setup().await;
    insert_user(&pool, "Some User", "user@test.com", "Right@123", "NORMAL_USER").await;
    let token = login(&app, "user@test.com", "Right@123").await;

    let (status, body, _) = request(&app, Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "user@test.com");
    assert_eq!(body["user"]["role"], "NORMAL_USER");

    // No cookie at all.
    let (status, _, _) = request(&app, Method::GET, "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // A garbage token.
    let (status, _, _) =
        request(&app, Method::GET, "/api/auth/me", Some("not-a-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_clears_the_session_cookie() {
    let (app, pool) = setup().await;
    insert_user(&pool, "Some User", "user@test.com", "Right@123", "NORMAL_USER").await;
    let token = login(&app, "user@test.com", "Right@123").await;

    let (status, _, set_cookie) =
        request(&app, Method::POST, "/api/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let set_cookie = set_cookie.unwrap();
    assert!(set_cookie.starts_with("token="));
    assert_eq!(cookie_token(&set_cookie), "");
}

#[tokio::test]
async fn rating_upsert_keeps_one_row_with_the_latest_value() {
    let (app, pool) = setup().await;
    let (_admin, store_id) = seed_store(&app, &pool).await;

    insert_user(&pool, "Rater One", "rater@test.com", "Rate@123", "NORMAL_USER").await;
    let token = login(&app, "rater@test.com", "Rate@123").await;

    let (status, body, _) = request(
        &app,
        Method::POST,
        "/api/ratings",
        Some(&token),
        Some(json!({ "storeId": store_id, "value": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["rating"]["value"], 4);

    // Rate the same store again with a different value.
    let (status, body, _) = request(
        &app,
        Method::POST,
        "/api/ratings",
        Some(&token),
        Some(json!({ "storeId": store_id, "value": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["rating"]["value"], 2);

    let (count, value): (i64, i64) =
        sqlx::query_as("SELECT COUNT(*), MAX(value) FROM ratings")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 1);
    assert_eq!(value, 2);
}

#[tokio::test]
async fn out_of_range_rating_writes_nothing() {
    let (app, pool) = setup().await;
    let (_admin, store_id) = seed_store(&app, &pool).await;

    insert_user(&pool, "Rater One", "rater@test.com", "Rate@123", "NORMAL_USER").await;
    let token = login(&app, "rater@test.com", "Rate@123").await;

    for value in [0, 6, -1] {
        let (status, body, _) = request(
            &app,
            Method::POST,
            "/api/ratings",
            Some(&token),
            Some(json!({ "storeId": store_id, "value": value })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    }

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ratings")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn rating_requires_a_session_and_an_existing_store() {
    let (app, pool) = setup().await;
    let (_admin, store_id) = seed_store(&app, &pool).await;

    // No session.
    let (status, _, _) = request(
        &app,
        Method::POST,
        "/api/ratings",
        None,
        Some(json!({ "storeId": store_id, "value": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    insert_user(&pool, "Rater One", "rater@test.com", "Rate@123", "NORMAL_USER").await;
    let token = login(&app, "rater@test.com", "Rate@123").await;

    // A well-formed ID that names no store.
    let missing = Uuid::new_v4().to_string();
    let (status, _, _) = request(
        &app,
        Method::POST,
        "/api/ratings",
        Some(&token),
        Some(json!({ "storeId": missing, "value": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // An unparseable ID.
    let (status, _, _) = request(
        &app,
        Method::POST,
        "/api/ratings",
        Some(&token),
        Some(json!({ "storeId": "not-a-uuid", "value": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn store_averages_round_and_report_null_when_unrated() {
    let (app, pool) = setup().await;
    let (admin, store_id) = seed_store(&app, &pool).await;

    // A second store that never gets rated.
    let (status, _, _) = request(
        &app,
        Method::POST,
        "/api/admin/stores",
        Some(&admin),
        Some(json!({
            "ownerName": "Bakery Owner",
            "ownerEmail": "owner@bakery.com",
            "ownerPassword": "Store@123",
            "ownerAddress": "3 Oven Lane",
            "storeName": "Corner Bakery",
            "storeEmail": "contact@bakery.com",
            "storeAddress": "3 Oven Lane",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Three raters: 1, 4, 5 -> mean 3.3333... -> 3.33.
    for (i, value) in [1, 4, 5].into_iter().enumerate() {
        let email = format!("rater{i}@test.com");
        insert_user(&pool, "Rater Person", &email, "Rate@123", "NORMAL_USER").await;
        let token = login(&app, &email, "Rate@123").await;
        let (status, _, _) = request(
            &app,
            Method::POST,
            "/api/ratings",
            Some(&token),
            Some(json!({ "storeId": store_id, "value": value })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body, _) = request(&app, Method::GET, "/api/stores", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let stores = body["stores"].as_array().unwrap();
    assert_eq!(stores.len(), 2);

    let rated = stores.iter().find(|s| s["id"] == store_id.as_str()).unwrap();
    assert_eq!(rated["ratingCount"], 3);
    assert_eq!(rated["averageRating"], 3.33);

    let unrated = stores.iter().find(|s| s["id"] != store_id.as_str()).unwrap();
    assert_eq!(unrated["ratingCount"], 0);
    assert!(unrated["averageRating"].is_null(), "unrated average must be null, not 0");
}

#[tokio::test]
async fn store_detail_includes_the_callers_own_rating() {
    let (app, pool) = setup().await;
    let (_admin, store_id) = seed_store(&app, &pool).await;

    insert_user(&pool, "Rater One", "rater@test.com", "Rate@123", "NORMAL_USER").await;
    let token = login(&app, "rater@test.com", "Rate@123").await;
    request(
        &app,
        Method::POST,
        "/api/ratings",
        Some(&token),
        Some(json!({ "storeId": store_id, "value": 5 })),
    )
    .await;

    // Anonymous: no userRating.
    let uri = format!("/api/stores/{store_id}");
    let (status, body, _) = request(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["store"]["userRating"].is_null());
    assert_eq!(body["store"]["ownerName"], "Grocery Owner");

    // The rater sees their own value.
    let (status, body, _) = request(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["store"]["userRating"], 5);

    // Unknown store.
    let missing = format!("/api/stores/{}", Uuid::new_v4());
    let (status, _, _) = request(&app, Method::GET, &missing, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn owner_dashboard_shows_recent_ratings_with_rater_names() {
    let (app, pool) = setup().await;
    let (_admin, store_id) = seed_store(&app, &pool).await;

    insert_user(&pool, "Alice Rater", "alice@test.com", "Rate@123", "NORMAL_USER").await;
    let token = login(&app, "alice@test.com", "Rate@123").await;
    request(
        &app,
        Method::POST,
        "/api/ratings",
        Some(&token),
        Some(json!({ "storeId": store_id, "value": 4 })),
    )
    .await;

    let owner = login(&app, "owner@grocery.com", "Store@123").await;
    let (status, body, _) = request(&app, Method::GET, "/api/store/info", Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["store"]["id"], store_id.as_str());
    assert_eq!(body["store"]["ratingCount"], 1);
    assert_eq!(body["store"]["averageRating"], 4.0);

    let recent = body["store"]["recentRatings"].as_array().unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0]["value"], 4);
    assert_eq!(recent[0]["raterName"], "Alice Rater");

    // A normal user is forbidden outright.
    let (status, _, _) = request(&app, Method::GET, "/api/store/info", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_routes_reject_other_roles() {
    let (app, pool) = setup().await;
    let (_admin, _store_id) = seed_store(&app, &pool).await;

    // Store owner on admin stats: 403, not 401. Roles are flat.
    let owner = login(&app, "owner@grocery.com", "Store@123").await;
    let (status, body, _) =
        request(&app, Method::GET, "/api/admin/stats", Some(&owner), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Forbidden");

    insert_user(&pool, "Normal Person", "np@test.com", "Rate@123", "NORMAL_USER").await;
    let normal = login(&app, "np@test.com", "Rate@123").await;
    for uri in ["/api/admin/users", "/api/admin/stores", "/api/admin/stats"] {
        let (status, _, _) = request(&app, Method::GET, uri, Some(&normal), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
    }

    // No session at all is 401.
    let (status, _, _) = request(&app, Method::GET, "/api/admin/stats", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_owner_email_leaves_no_partial_rows() {
    let (app, pool) = setup().await;
    let (admin, _store_id) = seed_store(&app, &pool).await;

    let users_before: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    let stores_before: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stores")
        .fetch_one(&pool)
        .await
        .unwrap();

    // Reuse the existing owner email with a brand-new store email.
    let (status, body, _) = request(
        &app,
        Method::POST,
        "/api/admin/stores",
        Some(&admin),
        Some(json!({
            "ownerName": "Second Owner",
            "ownerEmail": "owner@grocery.com",
            "ownerPassword": "Store@123",
            "ownerAddress": "9 Elsewhere",
            "storeName": "Second Store",
            "storeEmail": "second@store.com",
            "storeAddress": "9 Elsewhere",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    let users_after: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    let stores_after: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stores")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(users_after, users_before);
    assert_eq!(stores_after, stores_before);
}

#[tokio::test]
async fn admin_creates_users_with_any_role_and_short_names() {
    let (app, pool) = setup().await;
    insert_user(&pool, "Test Admin", "admin@test.com", "Admin@123", "SYSTEM_ADMIN").await;
    let admin = login(&app, "admin@test.com", "Admin@123").await;

    // Two characters is enough on the admin path.
    let (status, body, _) = request(
        &app,
        Method::POST,
        "/api/admin/users",
        Some(&admin),
        Some(json!({
            "name": "Al",
            "email": "al@test.com",
            "password": "Valid@12",
            "address": "5 Admin Road",
            "role": "STORE_OWNER",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["user"]["role"], "STORE_OWNER");

    // An unknown role string is a validation error.
    let (status, _, _) = request(
        &app,
        Method::POST,
        "/api/admin/users",
        Some(&admin),
        Some(json!({
            "name": "Bo",
            "email": "bo@test.com",
            "password": "Valid@12",
            "address": "5 Admin Road",
            "role": "SUPER_ADMIN",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The listing annotates owners with their store once they have one.
    let (status, body, _) = request(&app, Method::GET, "/api/admin/users", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn admin_stats_report_platform_totals() {
    let (app, pool) = setup().await;
    let (admin, store_id) = seed_store(&app, &pool).await;

    // No ratings yet: the platform-wide average reports 0.
    let (status, body, _) = request(&app, Method::GET, "/api/admin/stats", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["totalUsers"], 2); // admin + owner
    assert_eq!(body["stats"]["totalStores"], 1);
    assert_eq!(body["stats"]["totalRatings"], 0);
    assert_eq!(body["stats"]["averageRating"], 0.0);

    insert_user(&pool, "Rater One", "rater@test.com", "Rate@123", "NORMAL_USER").await;
    let token = login(&app, "rater@test.com", "Rate@123").await;
    request(
        &app,
        Method::POST,
        "/api/ratings",
        Some(&token),
        Some(json!({ "storeId": store_id, "value": 5 })),
    )
    .await;

    let (status, body, _) = request(&app, Method::GET, "/api/admin/stats", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["totalUsers"], 3);
    assert_eq!(body["stats"]["totalRatings"], 1);
    assert_eq!(body["stats"]["averageRating"], 5.0);
}

#[tokio::test]
async fn profile_update_validates_and_persists() {
    let (app, pool) = setup().await;
    insert_user(&pool, "Some User", "user@test.com", "Right@123", "NORMAL_USER").await;
    let token = login(&app, "user@test.com", "Right@123").await;

    // One character is below the profile minimum.
    let (status, _, _) = request(
        &app,
        Method::PUT,
        "/api/profile",
        Some(&token),
        Some(json!({ "name": "X", "address": "New Address" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body, _) = request(
        &app,
        Method::PUT,
        "/api/profile",
        Some(&token),
        Some(json!({ "name": "Renamed User", "address": "New Address" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["user"]["name"], "Renamed User");
    assert_eq!(body["user"]["address"], "New Address");

    // Oversized address.
    let (status, _, _) = request(
        &app,
        Method::PUT,
        "/api/profile",
        Some(&token),
        Some(json!({ "name": "Renamed User", "address": "x".repeat(401) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn change_password_reverifies_and_takes_effect() {
    let (app, pool) = setup().await;
    insert_user(&pool, "Some User", "user@test.com", "Right@123", "NORMAL_USER").await;
    let token = login(&app, "user@test.com", "Right@123").await;

    // Wrong current password.
    let (status, body, _) = request(
        &app,
        Method::POST,
        "/api/auth/change-password",
        Some(&token),
        Some(json!({ "currentPassword": "Wrong@123", "newPassword": "Fresh@123" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Current password is incorrect");

    // Weak new password.
    let (status, _, _) = request(
        &app,
        Method::POST,
        "/api/auth/change-password",
        Some(&token),
        Some(json!({ "currentPassword": "Right@123", "newPassword": "weak" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Success, and the new password is live.
    let (status, _, _) = request(
        &app,
        Method::POST,
        "/api/auth/change-password",
        Some(&token),
        Some(json!({ "currentPassword": "Right@123", "newPassword": "Fresh@123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    login(&app, "user@test.com", "Fresh@123").await;

    let (status, _, _) = request(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "user@test.com", "password": "Right@123" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_endpoints_respond() {
    let (app, _pool) = setup().await;

    let (status, body, _) = request(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body, _) = request(&app, Method::GET, "/health/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}
