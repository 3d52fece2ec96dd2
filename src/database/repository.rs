use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{compute_score, KpaForm, NewKpaForm, User};
use crate::database::pool::StorageError;
use crate::error::ValidationError;
use crate::filter::{FormFilter, Page};

#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<sqlx::Error> for FormError {
    fn from(err: sqlx::Error) -> Self {
        FormError::Storage(err.into())
    }
}

/// Lookup access to the `users` table.
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>, StorageError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE phone_number = $1")
            .bind(phone_number)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}

const INSERT_FORM_SQL: &str = "INSERT INTO kpa_forms (
        employee_id, employee_name, department, designation, performance_period,
        kpa_title, kpa_description, target_value, achieved_value, weightage,
        score, remarks, created_by
    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
    RETURNING *";

/// Create/read access to the `kpa_forms` table.
pub struct FormRepository {
    pool: PgPool,
}

impl FormRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Validate the payload, derive the score, persist, and return the stored
    /// row. Validation failures happen before the INSERT is attempted; the
    /// score always comes from `compute_score`, never from the client.
    pub async fn create(&self, input: &NewKpaForm, created_by: Uuid) -> Result<KpaForm, FormError> {
        input.validate()?;
        let score = compute_score(input.target_value, input.achieved_value, input.weightage)?;

        let form = sqlx::query_as::<_, KpaForm>(INSERT_FORM_SQL)
            .bind(input.employee_id.as_str())
            .bind(input.employee_name.as_str())
            .bind(input.department.as_str())
            .bind(input.designation.as_str())
            .bind(input.performance_period.as_str())
            .bind(input.kpa_title.as_str())
            .bind(input.kpa_description.as_deref())
            .bind(input.target_value)
            .bind(input.achieved_value)
            .bind(input.weightage)
            .bind(score)
            .bind(input.remarks.as_deref())
            .bind(created_by)
            .fetch_one(&self.pool)
            .await?;

        tracing::info!(form_id = %form.id, employee_id = %form.employee_id, "Created KPA form");
        Ok(form)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<KpaForm, StorageError> {
        sqlx::query_as::<_, KpaForm>("SELECT * FROM kpa_forms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StorageError::NotFound {
                entity: "KPA form",
                id: id.to_string(),
            })
    }

    /// Fetch one page of forms plus the total row count under the same
    /// filter. Ordered newest first with the id as tiebreak, so a fixed
    /// dataset always pages identically.
    pub async fn list(
        &self,
        filter: &FormFilter,
        page: &Page,
    ) -> Result<(Vec<KpaForm>, i64), StorageError> {
        let (where_clause, params) = filter.where_clause(1);

        let count_sql = format!("SELECT COUNT(*) FROM kpa_forms{}", where_clause);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        for param in &params {
            count_query = count_query.bind(param.clone());
        }
        let total = count_query.fetch_one(&self.pool).await?;

        let page_sql = format!(
            "SELECT * FROM kpa_forms{} ORDER BY created_at DESC, id DESC LIMIT ${} OFFSET ${}",
            where_clause,
            params.len() + 1,
            params.len() + 2
        );
        let mut page_query = sqlx::query_as::<_, KpaForm>(&page_sql);
        for param in &params {
            page_query = page_query.bind(param.clone());
        }
        let forms = page_query
            .bind(page.size())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((forms, total))
    }
}
