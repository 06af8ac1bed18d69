use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use sqlx::MySqlPool;
use tracing::debug;

use super::{FuncionarioStore, StoreError, StoreResult};
use crate::model::funcionario::{
    Funcionario, FuncionarioChanges, FuncionarioResumo, NovoFuncionario,
};
use crate::utils::db_utils::{SqlValue, build_update_sql, execute_update, funcionario_assignments};

#[derive(Clone)]
pub struct MySqlFuncionarioStore {
    pool: MySqlPool,
}

impl MySqlFuncionarioStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FuncionarioStore for MySqlFuncionarioStore {
    async fn list(&self) -> StoreResult<Vec<FuncionarioResumo>> {
        let rows = sqlx::query_as::<_, FuncionarioResumo>(
            r#"
            SELECT id, nome, salario, email, created_at
            FROM funcionarios
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find(&self, id: u64) -> StoreResult<Option<Funcionario>> {
        let row = sqlx::query_as::<_, Funcionario>(
            r#"
            SELECT id, nome, salario, email, created_at, updated_at
            FROM funcionarios
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn email_taken(&self, email: &str, except_id: Option<u64>) -> StoreResult<bool> {
        let count = match except_id {
            Some(id) => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM funcionarios WHERE email = ? AND id <> ?",
                )
                .bind(email)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM funcionarios WHERE email = ?")
                    .bind(email)
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        Ok(count > 0)
    }

    async fn insert(&self, novo: NovoFuncionario) -> StoreResult<Funcionario> {
        let now = Utc::now().trunc_subsecs(0);

        let result = sqlx::query(
            r#"
            INSERT INTO funcionarios
            (nome, salario, email, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&novo.nome)
        .bind(novo.salario)
        .bind(&novo.email)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id();
        debug!(id, "Inserted funcionario");

        self.find(id)
            .await?
            .ok_or_else(|| StoreError::Database(format!("inserted row {id} could not be read back")))
    }

    async fn update(
        &self,
        id: u64,
        changes: FuncionarioChanges,
    ) -> StoreResult<Option<Funcionario>> {
        let mut assignments = funcionario_assignments(changes);
        if !assignments.is_empty() {
            assignments.push(("updated_at", SqlValue::DateTime(Utc::now().trunc_subsecs(0))));
        }

        if let Some(update) = build_update_sql("funcionarios", assignments, "id", id) {
            debug!(sql = %update.sql, id, "Updating funcionario");
            // MySQL reports unchanged rows as unaffected, so existence is checked by the read below.
            execute_update(&self.pool, update).await?;
        }

        self.find(id).await
    }

    async fn delete(&self, id: u64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM funcionarios WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
