use crate::{
    api::validation::FuncionarioInput,
    config::Config,
    error::{AppError, Failure, Operation},
    model::funcionario::{Funcionario, FuncionarioResumo},
    store::FuncionarioStore,
};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

/// Accepted request body. Keys outside this set are ignored.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct FuncionarioPayload {
    #[schema(example = "Ana Silva", max_length = 255)]
    pub nome: String,
    #[schema(example = 3500.00, minimum = 0.0, maximum = 9999999.99)]
    pub salario: f64,
    #[schema(example = "ana@ex.com", format = "email")]
    pub email: String,
}

/// Update body: every field is optional, absent keys leave the column untouched.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct FuncionarioUpdatePayload {
    #[schema(example = "Ana Silva", max_length = 255, nullable = false)]
    pub nome: Option<String>,
    #[schema(example = 4000.00, minimum = 0.0, maximum = 9999999.99, nullable = false)]
    pub salario: Option<f64>,
    #[schema(example = "ana@ex.com", format = "email", nullable = false)]
    pub email: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct FuncionarioListResponse {
    #[schema(example = true)]
    pub success: bool,
    pub data: Vec<FuncionarioResumo>,
    #[schema(example = 1)]
    pub count: usize,
}

#[derive(Serialize, ToSchema)]
pub struct FuncionarioResponse {
    #[schema(example = true)]
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Funcionário criado com sucesso")]
    pub message: Option<&'static str>,
    pub data: Funcionario,
}

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "Funcionário deletado com sucesso")]
    pub message: &'static str,
}

/// List Funcionarios
#[utoipa::path(
    get,
    path = "/api/funcionarios",
    responses(
        (status = 200, description = "All funcionarios, newest first", body = FuncionarioListResponse),
        (status = 500, description = "Internal server error", body = InternalErrorResponse)
    ),
    tag = "Funcionario"
)]
pub async fn list_funcionarios(
    store: web::Data<dyn FuncionarioStore>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    let failure = Failure::new(Operation::List, &config);

    let data = store.list().await.map_err(|e| failure.store(e))?;

    Ok(HttpResponse::Ok().json(FuncionarioListResponse {
        success: true,
        count: data.len(),
        data,
    }))
}

/// Create Funcionario
#[utoipa::path(
    post,
    path = "/api/funcionarios",
    request_body = FuncionarioPayload,
    responses(
        (status = 201, description = "Funcionario created", body = FuncionarioResponse),
        (status = 400, description = "Body is not valid JSON", body = FailureResponse),
        (status = 422, description = "Invalid input", body = ValidationErrorResponse),
        (status = 500, description = "Internal server error", body = InternalErrorResponse)
    ),
    tag = "Funcionario"
)]
#[instrument(name = "create_funcionario", skip_all)]
pub async fn create_funcionario(
    store: web::Data<dyn FuncionarioStore>,
    config: web::Data<Config>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let failure = Failure::new(Operation::Create, &config);

    let mut input = FuncionarioInput::for_create(&body);
    if let Some(email) = input.email.as_deref() {
        if store
            .email_taken(email, None)
            .await
            .map_err(|e| failure.store(e))?
        {
            input.reject_taken_email();
        }
    }

    let novo = input.into_novo().map_err(|errors| {
        warn!(?errors, "Validation failed");
        AppError::from(errors)
    })?;

    let funcionario = store.insert(novo).await.map_err(|e| failure.store(e))?;
    info!(id = funcionario.id, "Funcionario created");

    Ok(HttpResponse::Created().json(FuncionarioResponse {
        success: true,
        message: Some("Funcionário criado com sucesso"),
        data: funcionario,
    }))
}

/// Get Funcionario by ID
#[utoipa::path(
    get,
    path = "/api/funcionarios/{id}",
    params(
        ("id", Path, description = "Funcionario ID")
    ),
    responses(
        (status = 200, description = "Funcionario found", body = FuncionarioResponse),
        (status = 404, description = "Funcionario not found", body = FailureResponse),
        (status = 500, description = "Internal server error", body = InternalErrorResponse)
    ),
    tag = "Funcionario"
)]
pub async fn get_funcionario(
    store: web::Data<dyn FuncionarioStore>,
    config: web::Data<Config>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let failure = Failure::new(Operation::Show, &config);

    let funcionario = store
        .find(id)
        .await
        .map_err(|e| failure.store(e))?
        .ok_or(AppError::NotFound)?;

    Ok(HttpResponse::Ok().json(FuncionarioResponse {
        success: true,
        message: None,
        data: funcionario,
    }))
}

/// Update Funcionario
#[utoipa::path(
    put,
    path = "/api/funcionarios/{id}",
    params(
        ("id", Path, description = "Funcionario ID")
    ),
    request_body(content = FuncionarioUpdatePayload, description = "Any subset of the fields"),
    responses(
        (status = 200, description = "Funcionario updated", body = FuncionarioResponse),
        (status = 400, description = "Body is not valid JSON", body = FailureResponse),
        (status = 404, description = "Funcionario not found", body = FailureResponse),
        (status = 422, description = "Invalid input", body = ValidationErrorResponse),
        (status = 500, description = "Internal server error", body = InternalErrorResponse)
    ),
    tag = "Funcionario"
)]
#[instrument(name = "update_funcionario", skip(store, config, body), fields(id = *path))]
pub async fn update_funcionario(
    store: web::Data<dyn FuncionarioStore>,
    config: web::Data<Config>,
    path: web::Path<u64>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let failure = Failure::new(Operation::Update, &config);

    if store.find(id).await.map_err(|e| failure.store(e))?.is_none() {
        return Err(AppError::NotFound);
    }

    let mut input = FuncionarioInput::for_update(&body);
    if let Some(email) = input.email.as_deref() {
        if store
            .email_taken(email, Some(id))
            .await
            .map_err(|e| failure.store(e))?
        {
            input.reject_taken_email();
        }
    }

    let changes = input.into_changes().map_err(|errors| {
        warn!(?errors, "Validation failed");
        AppError::from(errors)
    })?;

    // None here means the row was deleted after the lookup above.
    let funcionario = store
        .update(id, changes)
        .await
        .map_err(|e| failure.store(e))?
        .ok_or(AppError::NotFound)?;
    info!("Funcionario updated");

    Ok(HttpResponse::Ok().json(FuncionarioResponse {
        success: true,
        message: Some("Funcionário atualizado com sucesso"),
        data: funcionario,
    }))
}

/// Delete Funcionario
#[utoipa::path(
    delete,
    path = "/api/funcionarios/{id}",
    params(
        ("id", Path, description = "Funcionario ID")
    ),
    responses(
        (status = 200, description = "Funcionario deleted", body = MessageResponse),
        (status = 404, description = "Funcionario not found", body = FailureResponse),
        (status = 500, description = "Internal server error", body = InternalErrorResponse)
    ),
    tag = "Funcionario"
)]
#[instrument(name = "delete_funcionario", skip(store, config), fields(id = *path))]
pub async fn delete_funcionario(
    store: web::Data<dyn FuncionarioStore>,
    config: web::Data<Config>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let failure = Failure::new(Operation::Delete, &config);

    if !store.delete(id).await.map_err(|e| failure.store(e))? {
        return Err(AppError::NotFound);
    }
    info!("Funcionario deleted");

    Ok(HttpResponse::Ok().json(MessageResponse {
        success: true,
        message: "Funcionário deletado com sucesso",
    }))
}
