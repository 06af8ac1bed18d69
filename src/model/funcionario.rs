use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "nome": "Ana Silva",
        "salario": "3500.00",
        "email": "ana@ex.com",
        "created_at": "2024-01-01T12:00:00Z",
        "updated_at": "2024-01-01T12:00:00Z"
    })
)]
pub struct Funcionario {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "Ana Silva")]
    pub nome: String,

    #[schema(example = "3500.00", value_type = String)]
    pub salario: Decimal,

    #[schema(example = "ana@ex.com", format = "email")]
    pub email: String,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,

    #[schema(value_type = String, format = "date-time")]
    pub updated_at: DateTime<Utc>,
}

/// Listing projection, without `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct FuncionarioResumo {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "Ana Silva")]
    pub nome: String,

    #[schema(example = "3500.00", value_type = String)]
    pub salario: Decimal,

    #[schema(example = "ana@ex.com", format = "email")]
    pub email: String,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

impl From<Funcionario> for FuncionarioResumo {
    fn from(f: Funcionario) -> Self {
        Self {
            id: f.id,
            nome: f.nome,
            salario: f.salario,
            email: f.email,
            created_at: f.created_at,
        }
    }
}

/// The only fields a client may set on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NovoFuncionario {
    pub nome: String,
    pub salario: Decimal,
    pub email: String,
}

/// The only fields a client may change on update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FuncionarioChanges {
    pub nome: Option<String>,
    pub salario: Option<Decimal>,
    pub email: Option<String>,
}

impl FuncionarioChanges {
    pub fn is_empty(&self) -> bool {
        self.nome.is_none() && self.salario.is_none() && self.email.is_none()
    }
}
