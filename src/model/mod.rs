pub mod funcionario;
