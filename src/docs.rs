use crate::api::funcionario::{
    FuncionarioListResponse, FuncionarioPayload, FuncionarioResponse, FuncionarioUpdatePayload,
    MessageResponse,
};
use crate::error::{FailureResponse, InternalErrorResponse, ValidationErrorResponse};
use crate::model::funcionario::{Funcionario, FuncionarioResumo};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Funcionários API",
        version = "1.0.0",
        description = r#"
## Cadastro de Funcionários

CRUD API for employee records (`nome`, `salario`, `email`).

### 📦 Response Format
- Every response is a JSON object with a boolean `success`
- Errors always carry a `message`
- Validation errors (422) add an `errors` map of field → messages
- Internal errors (500) add an `error` field, `null` unless the server runs with `APP_DEBUG`

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::funcionario::list_funcionarios,
        crate::api::funcionario::create_funcionario,
        crate::api::funcionario::get_funcionario,
        crate::api::funcionario::update_funcionario,
        crate::api::funcionario::delete_funcionario
    ),
    components(
        schemas(
            Funcionario,
            FuncionarioResumo,
            FuncionarioPayload,
            FuncionarioUpdatePayload,
            FuncionarioListResponse,
            FuncionarioResponse,
            MessageResponse,
            FailureResponse,
            ValidationErrorResponse,
            InternalErrorResponse
        )
    ),
    tags(
        (name = "Funcionario", description = "Funcionario management APIs"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::ApiDoc;
    use utoipa::OpenApi;
    use utoipa::openapi::{RefOr, Schema};

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/api/funcionarios"));
        assert!(paths.contains_key("/api/funcionarios/{id}"));
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn update_body_has_no_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components are declared").schemas;

        let required = |name: &str| match schemas.get(name) {
            Some(RefOr::T(Schema::Object(obj))) => obj.required.clone(),
            other => panic!("{name} is not an inline object schema: {other:?}"),
        };

        assert!(required("FuncionarioUpdatePayload").is_empty());
        assert_eq!(required("FuncionarioPayload").len(), 3);
    }
}
