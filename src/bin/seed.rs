use locallens_api::{config::AppConfig, db::create_pool, services::auth_service::hash_password};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let admin_id = ensure_user(&pool, "admin@example.com", "admin12345", "admin", "Admin").await?;
    let traveler_id =
        ensure_user(&pool, "traveler@example.com", "traveler123", "user", "Asha Traveler").await?;
    let guide_id = ensure_user(&pool, "guide@example.com", "guide12345", "user", "Ravi Guide").await?;
    seed_guide(&pool, guide_id).await?;

    println!(
        "Seed completed. Admin ID: {admin_id}, Traveler ID: {traveler_id}, Guide ID: {guide_id}"
    );
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    email: &str,
    password: &str,
    role: &str,
    full_name: &str,
) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let (user_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, password_hash, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO profiles (id, full_name)
        VALUES ($1, $2)
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(full_name)
    .execute(pool)
    .await?;

    println!("Ensured user {email} (role={role})");
    Ok(user_id)
}

async fn seed_guide(pool: &sqlx::PgPool, guide_id: Uuid) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO guides (id, full_name, bio, location, specialties, languages, day_rate, verified)
        VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE)
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(guide_id)
    .bind("Ravi Guide")
    .bind("Born in Old Delhi, walking tours since 2012")
    .bind("Delhi")
    .bind(serde_json::json!(["history", "food"]))
    .bind(serde_json::json!(["English", "Hindi"]))
    .bind(4500_i64)
    .execute(pool)
    .await?;

    println!("Seeded guide {guide_id}");
    Ok(())
}
