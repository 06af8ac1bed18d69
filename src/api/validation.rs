//! Field rules for funcionário payloads.
//!
//! Each field reports only its first failing rule. String inputs are trimmed
//! first and an empty string counts as missing.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::{Map, Value};
use validator::ValidateEmail;

use crate::model::funcionario::{FuncionarioChanges, NovoFuncionario};

pub const NOME_MAX_CHARS: usize = 255;

/// 9 999 999.99, the largest value a `DECIMAL(9,2)` column holds.
pub const SALARIO_MAX: Decimal = Decimal::from_parts(999_999_999, 0, 0, false, 2);

pub const MSG_NOME_REQUIRED: &str = "O campo nome é obrigatório.";
pub const MSG_NOME_STRING: &str = "O campo nome deve ser um texto.";
pub const MSG_NOME_MAX: &str = "O campo nome não pode ter mais de 255 caracteres.";
pub const MSG_SALARIO_REQUIRED: &str = "O campo salário é obrigatório.";
pub const MSG_SALARIO_NUMERIC: &str = "O salário deve ser um valor numérico.";
pub const MSG_SALARIO_MIN: &str = "O salário não pode ser negativo.";
pub const MSG_SALARIO_MAX: &str = "O salário não pode ser maior que 9999999.99.";
pub const MSG_EMAIL_REQUIRED: &str = "O campo email é obrigatório.";
pub const MSG_EMAIL_INVALID: &str = "Informe um email válido.";
pub const MSG_EMAIL_TAKEN: &str = "Este email já está cadastrado.";

/// Field name to the messages of the rules it failed.
pub type FieldErrors = BTreeMap<&'static str, Vec<&'static str>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    /// Missing keys fail the `required` rule.
    Required,
    /// Missing keys are skipped; present keys get the full rule set.
    WhenPresent,
}

enum Field<'a> {
    Absent,
    Blank,
    Given(&'a Value),
}

/// Validated (or partially rejected) funcionário input.
#[derive(Debug, Default)]
pub struct FuncionarioInput {
    pub nome: Option<String>,
    pub salario: Option<Decimal>,
    pub email: Option<String>,
    errors: FieldErrors,
}

impl FuncionarioInput {
    /// Every field is required.
    pub fn for_create(payload: &Value) -> Self {
        Self::parse(payload, Presence::Required)
    }

    /// Only the fields present in the payload are validated.
    pub fn for_update(payload: &Value) -> Self {
        Self::parse(payload, Presence::WhenPresent)
    }

    fn parse(payload: &Value, presence: Presence) -> Self {
        // Anything that is not a JSON object carries no fields.
        let obj = payload.as_object();
        let mut input = Self::default();

        match nome(field(obj, "nome"), presence) {
            Ok(v) => input.nome = v,
            Err(msg) => input.reject("nome", msg),
        }
        match salario(field(obj, "salario"), presence) {
            Ok(v) => input.salario = v,
            Err(msg) => input.reject("salario", msg),
        }
        match email(field(obj, "email"), presence) {
            Ok(v) => input.email = v,
            Err(msg) => input.reject("email", msg),
        }

        input
    }

    /// Records that the email belongs to another record.
    pub fn reject_taken_email(&mut self) {
        self.email = None;
        self.reject("email", MSG_EMAIL_TAKEN);
    }

    pub fn into_novo(self) -> Result<NovoFuncionario, FieldErrors> {
        if !self.errors.is_empty() {
            return Err(self.errors);
        }

        match (self.nome, self.salario, self.email) {
            (Some(nome), Some(salario), Some(email)) => Ok(NovoFuncionario {
                nome,
                salario,
                email,
            }),
            _ => Err(self.errors),
        }
    }

    pub fn into_changes(self) -> Result<FuncionarioChanges, FieldErrors> {
        if !self.errors.is_empty() {
            return Err(self.errors);
        }

        Ok(FuncionarioChanges {
            nome: self.nome,
            salario: self.salario,
            email: self.email,
        })
    }

    fn reject(&mut self, field: &'static str, message: &'static str) {
        self.errors.entry(field).or_default().push(message);
    }
}

fn field<'a>(obj: Option<&'a Map<String, Value>>, key: &str) -> Field<'a> {
    match obj.and_then(|o| o.get(key)) {
        None => Field::Absent,
        Some(Value::Null) => Field::Blank,
        Some(Value::String(s)) if s.trim().is_empty() => Field::Blank,
        Some(Value::Array(a)) if a.is_empty() => Field::Blank,
        Some(v) => Field::Given(v),
    }
}

fn nome(field: Field<'_>, presence: Presence) -> Result<Option<String>, &'static str> {
    let value = match field {
        Field::Absent if presence == Presence::WhenPresent => return Ok(None),
        Field::Absent | Field::Blank => return Err(MSG_NOME_REQUIRED),
        Field::Given(v) => v,
    };

    let text = value.as_str().ok_or(MSG_NOME_STRING)?.trim();
    if text.chars().count() > NOME_MAX_CHARS {
        return Err(MSG_NOME_MAX);
    }

    Ok(Some(text.to_string()))
}

fn salario(field: Field<'_>, presence: Presence) -> Result<Option<Decimal>, &'static str> {
    let value = match field {
        Field::Absent if presence == Presence::WhenPresent => return Ok(None),
        Field::Absent | Field::Blank => return Err(MSG_SALARIO_REQUIRED),
        Field::Given(v) => v,
    };

    let raw = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(MSG_SALARIO_NUMERIC),
    };

    let amount = match parse_decimal(&raw) {
        Some(d) => d,
        None => {
            // Numeric but beyond what Decimal holds: either huge or below one cent
            return match raw.parse::<f64>() {
                Ok(f) if f.is_finite() && f < 0.0 => Err(MSG_SALARIO_MIN),
                Ok(f) if f.is_finite() && f > 9_999_999.99 => Err(MSG_SALARIO_MAX),
                Ok(f) if f.is_finite() => {
                    let mut zero = Decimal::ZERO;
                    zero.rescale(2);
                    Ok(Some(zero))
                }
                _ => Err(MSG_SALARIO_NUMERIC),
            };
        }
    };

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(MSG_SALARIO_MIN);
    }
    if amount > SALARIO_MAX {
        return Err(MSG_SALARIO_MAX);
    }

    let mut amount = if amount.is_zero() {
        Decimal::ZERO
    } else {
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    };
    amount.rescale(2);

    Ok(Some(amount))
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

fn email(field: Field<'_>, presence: Presence) -> Result<Option<String>, &'static str> {
    let value = match field {
        Field::Absent if presence == Presence::WhenPresent => return Ok(None),
        Field::Absent | Field::Blank => return Err(MSG_EMAIL_REQUIRED),
        Field::Given(v) => v,
    };

    let address = value.as_str().ok_or(MSG_EMAIL_INVALID)?.trim().to_string();
    if !address.validate_email() {
        return Err(MSG_EMAIL_INVALID);
    }

    Ok(Some(address))
}
