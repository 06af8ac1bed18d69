use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde::Serialize;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::api::validation::{FieldErrors, MSG_EMAIL_TAKEN};
use crate::config::Config;
use crate::store::StoreError;

pub const MSG_INVALID_INPUT: &str = "Dados de entrada inválidos";
pub const MSG_NOT_FOUND: &str = "Funcionário não encontrado";
pub const MSG_MALFORMED_BODY: &str = "Corpo da requisição inválido";

/// The operation a request was performing, used to pick the 500 message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Show,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::List => "Erro ao listar funcionários",
            Operation::Show => "Erro ao buscar funcionário",
            Operation::Create => "Erro ao criar funcionário",
            Operation::Update => "Erro ao atualizar funcionário",
            Operation::Delete => "Erro ao deletar funcionário",
        }
    }
}

#[derive(Debug, Display)]
pub enum AppError {
    #[display(fmt = "{}", MSG_INVALID_INPUT)]
    Validation(FieldErrors),

    #[display(fmt = "{}", MSG_NOT_FOUND)]
    NotFound,

    #[display(fmt = "{}", MSG_MALFORMED_BODY)]
    MalformedBody,

    /// `detail` is only filled in when the deployment runs with `APP_DEBUG`.
    #[display(fmt = "{}", message)]
    Internal {
        message: &'static str,
        detail: Option<String>,
    },
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Validation(errors)
    }
}

#[derive(Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    #[schema(example = "Dados de entrada inválidos")]
    pub message: &'static str,
    #[schema(value_type = Object, example = json!({
        "email": ["Este email já está cadastrado."]
    }))]
    pub errors: FieldErrors,
}

#[derive(Serialize, ToSchema)]
pub struct FailureResponse {
    #[schema(example = false)]
    pub success: bool,
    #[schema(example = "Funcionário não encontrado")]
    pub message: &'static str,
}

#[derive(Serialize, ToSchema)]
pub struct InternalErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    #[schema(example = "Erro ao criar funcionário")]
    pub message: &'static str,
    /// Raw failure description, `null` unless debug mode is on.
    #[schema(nullable = true)]
    pub error: Option<String>,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MalformedBody => StatusCode::BAD_REQUEST,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut res = HttpResponse::build(self.status_code());

        match self {
            AppError::Validation(errors) => res.json(ValidationErrorResponse {
                success: false,
                message: MSG_INVALID_INPUT,
                errors: errors.clone(),
            }),
            AppError::NotFound => res.json(FailureResponse {
                success: false,
                message: MSG_NOT_FOUND,
            }),
            AppError::MalformedBody => res.json(FailureResponse {
                success: false,
                message: MSG_MALFORMED_BODY,
            }),
            AppError::Internal { message, detail } => res.json(InternalErrorResponse {
                success: false,
                message: *message,
                error: detail.clone(),
            }),
        }
    }
}

/// Translates store failures for one operation into [`AppError`].
#[derive(Debug, Clone, Copy)]
pub struct Failure {
    operation: Operation,
    expose_detail: bool,
}

impl Failure {
    pub fn new(operation: Operation, config: &Config) -> Self {
        Self {
            operation,
            expose_detail: config.app_debug,
        }
    }

    pub fn store(self, err: StoreError) -> AppError {
        match err {
            // Lost the race against a concurrent writer: same answer as the pre-check.
            StoreError::DuplicateEmail => {
                warn!(operation = ?self.operation, "Unique email constraint rejected write");
                AppError::Validation(FieldErrors::from([("email", vec![MSG_EMAIL_TAKEN])]))
            }
            StoreError::Database(detail) => {
                error!(error = %detail, operation = ?self.operation, "Store operation failed");
                AppError::Internal {
                    message: self.operation.failure_message(),
                    detail: self.expose_detail.then_some(detail),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use serde_json::{Value, json};

    async fn body_of(err: AppError) -> (StatusCode, Value) {
        let res = err.error_response();
        let status = res.status();
        let bytes = to_bytes(res.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn database_detail_is_hidden_without_debug() {
        let failure = Failure::new(Operation::Delete, &Config::for_tests(false));
        let (status, body) = body_of(failure.store(StoreError::Database("boom".into()))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"success": false, "message": "Erro ao deletar funcionário", "error": null})
        );
    }

    #[actix_web::test]
    async fn database_detail_is_exposed_in_debug() {
        let failure = Failure::new(Operation::List, &Config::for_tests(true));
        let (_, body) = body_of(failure.store(StoreError::Database("boom".into()))).await;

        assert_eq!(body["message"], "Erro ao listar funcionários");
        assert_eq!(body["error"], "boom");
    }

    #[actix_web::test]
    async fn duplicate_email_becomes_validation_error() {
        let failure = Failure::new(Operation::Update, &Config::for_tests(true));
        let (status, body) = body_of(failure.store(StoreError::DuplicateEmail)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body,
            json!({
                "success": false,
                "message": "Dados de entrada inválidos",
                "errors": {"email": ["Este email já está cadastrado."]}
            })
        );
    }

    #[test]
    fn every_operation_has_its_own_message() {
        let ops = [
            Operation::List,
            Operation::Show,
            Operation::Create,
            Operation::Update,
            Operation::Delete,
        ];
        let mut messages: Vec<_> = ops.iter().map(|op| op.failure_message()).collect();
        messages.dedup();
        assert_eq!(messages.len(), ops.len());
    }
}
