//! Drinks Repository
//!
//! PostgreSQL `drinks` 테이블 연산을 담당합니다. 레시피는 JSON 텍스트로
//! 저장됩니다.

use async_trait::async_trait;
use coffee_core::{decode_recipe, encode_recipe, Drink, Ingredient};
use sqlx::{FromRow, PgPool};
use tracing::{debug, info, warn};

use super::{DrinkRepository, RepositoryError};

// ================================================================================================
// Types
// ================================================================================================

/// 음료 레코드
#[derive(Debug, Clone, FromRow)]
struct DrinkRecord {
    id: i32,
    title: String,
    recipe: String,
}

impl TryFrom<DrinkRecord> for Drink {
    type Error = RepositoryError;

    fn try_from(record: DrinkRecord) -> Result<Self, Self::Error> {
        let recipe = decode_recipe(&record.recipe).map_err(|e| {
            warn!(drink_id = record.id, error = %e, "Stored recipe is corrupt");
            RepositoryError::from(e)
        })?;
        Ok(Drink::new(record.id, record.title, recipe))
    }
}

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS drinks (
        id SERIAL PRIMARY KEY,
        title VARCHAR(80) NOT NULL UNIQUE,
        recipe TEXT NOT NULL
    )
"#;

// ================================================================================================
// Repository
// ================================================================================================

/// PostgreSQL 음료 저장소
#[derive(Debug, Clone)]
pub struct PgDrinkRepository {
    pool: PgPool,
}

impl PgDrinkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 테이블을 준비합니다.
    ///
    /// `reset`이면 테이블을 삭제 후 다시 만들고 기본 음료("water")를 넣습니다.
    pub async fn setup_schema(&self, reset: bool) -> Result<(), RepositoryError> {
        if reset {
            warn!("Dropping drinks table");
            sqlx::query("DROP TABLE IF EXISTS drinks")
                .execute(&self.pool)
                .await?;
        }

        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;

        if reset {
            let water = self
                .create("water", &[Ingredient::new("blue", "water", 1)])
                .await?;
            info!(drink_id = water.id(), "Seeded default drink");
        }

        Ok(())
    }
}

#[async_trait]
impl DrinkRepository for PgDrinkRepository {
    async fn list_all(&self) -> Result<Vec<Drink>, RepositoryError> {
        let records = sqlx::query_as::<_, DrinkRecord>(
            r#"
            SELECT id, title, recipe
            FROM drinks
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        records.into_iter().map(Drink::try_from).collect()
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Drink>, RepositoryError> {
        let record = sqlx::query_as::<_, DrinkRecord>(
            r#"
            SELECT id, title, recipe
            FROM drinks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        record.map(Drink::try_from).transpose()
    }

    async fn create(&self, title: &str, recipe: &[Ingredient]) -> Result<Drink, RepositoryError> {
        let encoded = encode_recipe(recipe)?;

        let record = sqlx::query_as::<_, DrinkRecord>(
            r#"
            INSERT INTO drinks (title, recipe)
            VALUES ($1, $2)
            RETURNING id, title, recipe
            "#,
        )
        .bind(title)
        .bind(&encoded)
        .fetch_one(&self.pool)
        .await?;

        debug!(drink_id = record.id, "Drink inserted");
        Drink::try_from(record)
    }

    async fn update(&self, drink: &Drink) -> Result<Drink, RepositoryError> {
        let encoded = drink.encoded_recipe()?;

        let record = sqlx::query_as::<_, DrinkRecord>(
            r#"
            UPDATE drinks
            SET title = $2, recipe = $3
            WHERE id = $1
            RETURNING id, title, recipe
            "#,
        )
        .bind(drink.id())
        .bind(&drink.title)
        .bind(&encoded)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Drink::try_from(record)
    }

    async fn delete(&self, drink: &Drink) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM drinks WHERE id = $1")
            .bind(drink.id())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
