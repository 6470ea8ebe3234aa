use axum_delivery_api::{config::AppConfig, db::create_pool};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let customer_id = ensure_user(&pool, "Demo Customer", "customer@example.com", "customer").await?;
    let rider_id = ensure_user(&pool, "Demo Rider", "rider@example.com", "delivery").await?;
    let owner_id = ensure_user(&pool, "Demo Owner", "owner@example.com", "restaurant").await?;
    let restaurant_id = seed_restaurant(&pool, owner_id).await?;

    println!(
        "Seed completed. Customer: {customer_id}, Rider: {rider_id}, Restaurant: {restaurant_id}"
    );
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    name: &str,
    email: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, name, email, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email)
    .bind(role)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

async fn seed_restaurant(pool: &sqlx::PgPool, owner_id: Uuid) -> anyhow::Result<Uuid> {
    if let Some((id,)) = sqlx::query_as::<_, (Uuid,)>(
        "SELECT id FROM restaurants WHERE owner_id = $1 LIMIT 1",
    )
    .bind(owner_id)
    .fetch_optional(pool)
    .await?
    {
        return Ok(id);
    }

    let id = Uuid::new_v4();
    let menu = serde_json::json!([
        {
            "id": Uuid::new_v4(),
            "name": "Margherita",
            "description": "Tomato, mozzarella, basil",
            "price": 900,
            "category": "pizza",
            "available": true
        },
        {
            "id": Uuid::new_v4(),
            "name": "Pad Thai",
            "description": null,
            "price": 1100,
            "category": "noodles",
            "available": true
        }
    ]);

    sqlx::query(
        r#"
        INSERT INTO restaurants (id, owner_id, name, cuisine, menu, lat, lng)
        VALUES ($1, $2, 'Demo Kitchen', 'fusion', $3, 52.37, 4.89)
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .bind(menu)
    .execute(pool)
    .await?;

    Ok(id)
}
