//! In-memory store used by the handler tests. Mirrors the MySQL unique
//! constraint on `email` and the listing order.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use super::{FuncionarioStore, StoreError, StoreResult};
use crate::model::funcionario::{
    Funcionario, FuncionarioChanges, FuncionarioResumo, NovoFuncionario,
};

#[derive(Default)]
pub struct MemoryFuncionarioStore {
    rows: Mutex<Vec<Funcionario>>,
    next_id: AtomicU64,
    failure: Mutex<Option<String>>,
    blind_precheck: AtomicBool,
}

impl MemoryFuncionarioStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every following call fails with a database error carrying `message`.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    /// Makes `email_taken` always answer `false`, as if a concurrent writer
    /// inserted the same email between the check and the write.
    pub fn blind_precheck(&self) {
        self.blind_precheck.store(true, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn count_email(&self, email: &str) -> usize {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.email == email)
            .count()
    }

    fn check_failure(&self) -> StoreResult<()> {
        match self.failure.lock().unwrap().as_ref() {
            Some(message) => Err(StoreError::Database(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl FuncionarioStore for MemoryFuncionarioStore {
    async fn list(&self) -> StoreResult<Vec<FuncionarioResumo>> {
        self.check_failure()?;

        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(rows.into_iter().map(FuncionarioResumo::from).collect())
    }

    async fn find(&self, id: u64) -> StoreResult<Option<Funcionario>> {
        self.check_failure()?;

        Ok(self.rows.lock().unwrap().iter().find(|f| f.id == id).cloned())
    }

    async fn email_taken(&self, email: &str, except_id: Option<u64>) -> StoreResult<bool> {
        self.check_failure()?;

        if self.blind_precheck.load(Ordering::SeqCst) {
            return Ok(false);
        }

        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|f| f.email == email && Some(f.id) != except_id))
    }

    async fn insert(&self, novo: NovoFuncionario) -> StoreResult<Funcionario> {
        self.check_failure()?;

        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|f| f.email == novo.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let now = Utc::now();
        let mut salario = novo.salario;
        salario.rescale(2);

        let funcionario = Funcionario {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            nome: novo.nome,
            salario,
            email: novo.email,
            created_at: now,
            updated_at: now,
        };
        rows.push(funcionario.clone());

        Ok(funcionario)
    }

    async fn update(
        &self,
        id: u64,
        changes: FuncionarioChanges,
    ) -> StoreResult<Option<Funcionario>> {
        self.check_failure()?;

        let mut rows = self.rows.lock().unwrap();
        if let Some(email) = &changes.email {
            if rows.iter().any(|f| &f.email == email && f.id != id) {
                return Err(StoreError::DuplicateEmail);
            }
        }

        let Some(row) = rows.iter_mut().find(|f| f.id == id) else {
            return Ok(None);
        };

        if changes.is_empty() {
            return Ok(Some(row.clone()));
        }
        if let Some(nome) = changes.nome {
            row.nome = nome;
        }
        if let Some(mut salario) = changes.salario {
            salario.rescale(2);
            row.salario = salario;
        }
        if let Some(email) = changes.email {
            row.email = email;
        }
        row.updated_at = Utc::now();

        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: u64) -> StoreResult<bool> {
        self.check_failure()?;

        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|f| f.id != id);

        Ok(rows.len() < before)
    }
}
