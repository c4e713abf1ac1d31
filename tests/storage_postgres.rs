//! PostgreSQL store integration tests.
//!
//! Run with:
//!
//! ```bash
//! APP_DATABASE_URL=postgres://... cargo test --test storage_postgres -- --ignored --nocapture
//! ```
//!
//! Each test creates its own catalog options and removes what it wrote, so
//! they can share a database with a running server.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use bouquet_storefront::models::{
    CreateOrderRequest, OptionDraft, OrderColorInput, OrderFlowerInput,
};
use bouquet_storefront::store::{CatalogStore, OrderStore, PgStore, StoreError};

/// Connect using `APP_DATABASE_URL` and run migrations.
async fn connect_and_migrate() -> PgStore {
    let url = std::env::var("APP_DATABASE_URL").expect("APP_DATABASE_URL must be set");
    let store = PgStore::connect(&url, 5)
        .await
        .expect("Failed to connect to PostgreSQL");
    store.migrate().await.expect("Failed to run migrations");
    store
}

async fn create_flower(store: &PgStore, name: &str, cents: i64) -> Uuid {
    store
        .create_option(OptionDraft::Flower {
            name: name.to_string(),
            price: Decimal::new(cents, 2),
            active: true,
            display_order: 0,
        })
        .await
        .expect("Failed to create flower")
        .id()
}

async fn create_color(store: &PgStore, name: &str) -> Uuid {
    store
        .create_option(OptionDraft::Color {
            name: name.to_string(),
            hex_code: "#C8A2C8".to_string(),
            price: Decimal::ZERO,
            active: true,
            display_order: 0,
        })
        .await
        .expect("Failed to create color")
        .id()
}

async fn count(pool: &PgPool, sql: &str, key: impl ToString) -> i64 {
    sqlx::query_scalar::<_, i64>(sql)
        .bind(key.to_string())
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}

fn order_request(customer_name: &str, flowers: &[Uuid], color: Uuid) -> CreateOrderRequest {
    CreateOrderRequest {
        customer_name: customer_name.to_string(),
        customer_phone: "11999990000".to_string(),
        total_price: Decimal::new(4370, 2),
        notes: None,
        selected_size_id: None,
        flowers: flowers
            .iter()
            .map(|&flower_id| OrderFlowerInput {
                flower_id,
                quantity: 1,
                unit_price: None,
            })
            .collect(),
        colors: vec![OrderColorInput { color_id: color }],
        complements: vec![],
    }
}

async fn cleanup(store: &PgStore, options: &[Uuid]) {
    sqlx::query("DELETE FROM flowers WHERE id = ANY($1)")
        .bind(options)
        .execute(store.pool())
        .await
        .expect("Failed to delete flowers");
    sqlx::query("DELETE FROM colors WHERE id = ANY($1)")
        .bind(options)
        .execute(store.pool())
        .await
        .expect("Failed to delete colors");
}

#[tokio::test]
#[ignore = "requires APP_DATABASE_URL"]
async fn test_submit_order_writes_header_and_every_line() {
    let store = connect_and_migrate().await;
    let rose = create_flower(&store, "Rosa", 1290).await;
    let lily = create_flower(&store, "Lírio", 1590).await;
    let lilac = create_color(&store, "Lilás").await;

    let header = store
        .submit_order(order_request("Cliente Postgres", &[rose, lily], lilac))
        .await
        .expect("Failed to submit order");
    let pool = store.pool();

    assert_eq!(count(pool, "SELECT COUNT(*) FROM orders WHERE id::text = $1", header.id).await, 1);
    assert_eq!(
        count(pool, "SELECT COUNT(*) FROM order_flowers WHERE order_id::text = $1", header.id).await,
        2
    );
    assert_eq!(
        count(pool, "SELECT COUNT(*) FROM order_colors WHERE order_id::text = $1", header.id).await,
        1
    );
    assert_eq!(
        count(pool, "SELECT COUNT(*) FROM order_complements WHERE order_id::text = $1", header.id)
            .await,
        0
    );

    let order = store
        .get_order(header.id)
        .await
        .expect("Failed to load order")
        .expect("Order should exist");
    assert_eq!(order.flowers[0].flower_name, "Rosa");
    assert_eq!(order.colors[0].color_name, "Lilás");

    sqlx::query("DELETE FROM orders WHERE id = $1")
        .bind(header.id)
        .execute(pool)
        .await
        .expect("Failed to delete order");
    cleanup(&store, &[rose, lily, lilac]).await;
}

#[tokio::test]
#[ignore = "requires APP_DATABASE_URL"]
async fn test_failed_line_insert_rolls_back_header() {
    let store = connect_and_migrate().await;
    let pool = store.pool();

    // Colors named `failing-line-*` cannot be written as order lines.
    sqlx::query(
        r#"
        CREATE OR REPLACE FUNCTION reject_failing_color_line() RETURNS trigger AS $$
        BEGIN
            IF NEW.color_name LIKE 'failing-line-%' THEN
                RAISE EXCEPTION 'color line rejected';
            END IF;
            RETURN NEW;
        END;
        $$ LANGUAGE plpgsql
        "#,
    )
    .execute(pool)
    .await
    .expect("Failed to create trigger function");
    sqlx::query("DROP TRIGGER IF EXISTS reject_failing_color_line ON order_colors")
        .execute(pool)
        .await
        .expect("Failed to drop trigger");
    sqlx::query(
        r#"
        CREATE TRIGGER reject_failing_color_line BEFORE INSERT ON order_colors
        FOR EACH ROW EXECUTE FUNCTION reject_failing_color_line()
        "#,
    )
    .execute(pool)
    .await
    .expect("Failed to create trigger");

    let rose = create_flower(&store, "Rosa", 1290).await;
    let marked = create_color(&store, &format!("failing-line-{}", Uuid::new_v4())).await;
    let customer = format!("Cliente {}", Uuid::new_v4());

    let err = store
        .submit_order(order_request(&customer, &[rose], marked))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Database(_)), "unexpected error: {err}");

    assert_eq!(
        count(pool, "SELECT COUNT(*) FROM orders WHERE customer_name = $1", &customer).await,
        0
    );
    assert_eq!(
        count(
            pool,
            "SELECT COUNT(*) FROM order_flowers WHERE flower_id::text = $1",
            rose
        )
        .await,
        0
    );

    sqlx::query("DROP TRIGGER IF EXISTS reject_failing_color_line ON order_colors")
        .execute(pool)
        .await
        .expect("Failed to drop trigger");
    cleanup(&store, &[rose, marked]).await;
}
