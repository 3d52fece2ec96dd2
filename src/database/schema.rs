//! Schema bootstrap, run once at startup. Idempotent: existing tables,
//! triggers, and the seeded user are left alone.

use sqlx::PgPool;
use tracing::info;

use crate::auth::password;
use crate::database::pool::StorageError;

/// Seeded login so a fresh deployment is usable immediately; real users are
/// provisioned out-of-band.
pub const DEFAULT_USER_PHONE: &str = "7760873976";
pub const DEFAULT_USER_PASSWORD: &str = "to_share@123";

const CREATE_USERS_SQL: &str = "CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    phone_number VARCHAR(15) UNIQUE NOT NULL,
    password_hash VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
)";

const CREATE_FORMS_SQL: &str = "CREATE TABLE IF NOT EXISTS kpa_forms (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    employee_id VARCHAR(50) NOT NULL,
    employee_name VARCHAR(100) NOT NULL,
    department VARCHAR(100) NOT NULL,
    designation VARCHAR(100) NOT NULL,
    performance_period VARCHAR(50) NOT NULL,
    kpa_title VARCHAR(200) NOT NULL,
    kpa_description TEXT,
    target_value DECIMAL(10,2) NOT NULL,
    achieved_value DECIMAL(10,2) NOT NULL,
    weightage DECIMAL(5,2) NOT NULL,
    score DECIMAL(5,2),
    remarks TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    created_by UUID REFERENCES users(id)
)";

const CREATE_TOUCH_FN_SQL: &str = "CREATE OR REPLACE FUNCTION set_updated_at() RETURNS trigger AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql";

/// Create the tables and the updated_at triggers if missing. One statement
/// per round trip; CREATE TRIGGER has no IF NOT EXISTS, so triggers are
/// dropped and recreated.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), StorageError> {
    let statements = [
        CREATE_USERS_SQL,
        CREATE_FORMS_SQL,
        CREATE_TOUCH_FN_SQL,
        "DROP TRIGGER IF EXISTS users_set_updated_at ON users",
        "CREATE TRIGGER users_set_updated_at BEFORE UPDATE ON users \
         FOR EACH ROW EXECUTE FUNCTION set_updated_at()",
        "DROP TRIGGER IF EXISTS kpa_forms_set_updated_at ON kpa_forms",
        "CREATE TRIGGER kpa_forms_set_updated_at BEFORE UPDATE ON kpa_forms \
         FOR EACH ROW EXECUTE FUNCTION set_updated_at()",
    ];

    for statement in statements {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema is ready");
    Ok(())
}

/// Insert the default user unless the phone number is already taken.
pub async fn seed_default_user(pool: &PgPool) -> Result<(), StorageError> {
    let digest = password::hash_password(DEFAULT_USER_PASSWORD)
        .map_err(|e| StorageError::Query(format!("failed to hash seed password: {}", e)))?;

    let result = sqlx::query(
        "INSERT INTO users (phone_number, password_hash) VALUES ($1, $2) \
         ON CONFLICT (phone_number) DO NOTHING",
    )
    .bind(DEFAULT_USER_PHONE)
    .bind(digest.as_str())
    .execute(pool)
    .await?;

    if result.rows_affected() > 0 {
        info!("Seeded default user");
    }
    Ok(())
}
