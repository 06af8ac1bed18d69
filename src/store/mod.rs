//! Persistence boundary for funcionário records.

use async_trait::async_trait;
use derive_more::Display;

use crate::model::funcionario::{
    Funcionario, FuncionarioChanges, FuncionarioResumo, NovoFuncionario,
};

#[cfg(test)]
pub mod memory;
pub mod mysql;

pub use mysql::MySqlFuncionarioStore;

#[derive(Debug, Display)]
pub enum StoreError {
    /// The unique constraint on `email` rejected the write.
    #[display(fmt = "email already registered")]
    DuplicateEmail,

    #[display(fmt = "{}", _0)]
    Database(String),
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return StoreError::DuplicateEmail;
            }
        }

        StoreError::Database(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait FuncionarioStore: Send + Sync {
    /// All records, newest `created_at` first.
    async fn list(&self) -> StoreResult<Vec<FuncionarioResumo>>;

    async fn find(&self, id: u64) -> StoreResult<Option<Funcionario>>;

    /// Whether another record already uses `email`; `except_id` is left out of the check.
    async fn email_taken(&self, email: &str, except_id: Option<u64>) -> StoreResult<bool>;

    async fn insert(&self, novo: NovoFuncionario) -> StoreResult<Funcionario>;

    /// Applies `changes` and returns the stored row, or `None` if `id` does not exist.
    async fn update(&self, id: u64, changes: FuncionarioChanges)
    -> StoreResult<Option<Funcionario>>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: u64) -> StoreResult<bool>;
}
