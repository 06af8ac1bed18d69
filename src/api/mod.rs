pub mod funcionario;
pub mod validation;
