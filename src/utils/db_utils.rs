use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::MySqlPool;

use crate::model::funcionario::FuncionarioChanges;

/// ===============================
/// SQL bindable value enum
/// ===============================
#[derive(Debug, PartialEq)]
pub enum SqlValue {
    String(String),
    U64(u64),
    Decimal(Decimal),
    DateTime(DateTime<Utc>),
}

/// ===============================
/// SQL update container
/// ===============================
#[derive(Debug)]
pub struct SqlUpdate {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

/// Column assignments for the fields present in `changes`, in table order.
///
/// Column names come from this fixed list, never from the request payload.
pub fn funcionario_assignments(changes: FuncionarioChanges) -> Vec<(&'static str, SqlValue)> {
    let mut assignments = Vec::with_capacity(3);

    if let Some(nome) = changes.nome {
        assignments.push(("nome", SqlValue::String(nome)));
    }
    if let Some(salario) = changes.salario {
        assignments.push(("salario", SqlValue::Decimal(salario)));
    }
    if let Some(email) = changes.email {
        assignments.push(("email", SqlValue::String(email)));
    }

    assignments
}

/// ===============================
/// Build dynamic UPDATE SQL
/// ===============================
///
/// Returns `None` when there is nothing to assign.
pub fn build_update_sql(
    table: &str,
    assignments: Vec<(&'static str, SqlValue)>,
    id_column: &str,
    id_value: u64,
) -> Option<SqlUpdate> {
    if assignments.is_empty() {
        return None;
    }

    let set_clause = assignments
        .iter()
        .map(|(column, _)| format!("{} = ?", column))
        .collect::<Vec<_>>()
        .join(", ");

    let sql = format!("UPDATE {} SET {} WHERE {} = ?", table, set_clause, id_column);

    let mut values: Vec<SqlValue> = assignments.into_iter().map(|(_, v)| v).collect();

    // WHERE id = ?
    values.push(SqlValue::U64(id_value));

    Some(SqlUpdate { sql, values })
}

/// ===============================
/// Execute the update
/// ===============================
pub async fn execute_update(pool: &MySqlPool, update: SqlUpdate) -> Result<u64, sqlx::Error> {
    let mut query = sqlx::query(&update.sql);

    for value in update.values {
        query = match value {
            SqlValue::String(v) => query.bind(v),
            SqlValue::U64(v) => query.bind(v),
            SqlValue::Decimal(v) => query.bind(v),
            SqlValue::DateTime(v) => query.bind(v),
        };
    }

    let result = query.execute(pool).await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn only_supplied_fields_are_assigned() {
        let changes = FuncionarioChanges {
            salario: Some(Decimal::new(400000, 2)),
            ..Default::default()
        };

        let update = build_update_sql("funcionarios", funcionario_assignments(changes), "id", 7)
            .expect("one field was supplied");

        assert_eq!(update.sql, "UPDATE funcionarios SET salario = ? WHERE id = ?");
        assert_eq!(
            update.values,
            vec![SqlValue::Decimal(Decimal::new(400000, 2)), SqlValue::U64(7)]
        );
    }

    #[test]
    fn assignments_keep_column_order_and_trailing_id() {
        let now = Utc::now();
        let changes = FuncionarioChanges {
            nome: Some("Ana".to_string()),
            salario: None,
            email: Some("ana@ex.com".to_string()),
        };
        let mut assignments = funcionario_assignments(changes);
        assignments.push(("updated_at", SqlValue::DateTime(now)));

        let update = build_update_sql("funcionarios", assignments, "id", 3).unwrap();

        assert_eq!(
            update.sql,
            "UPDATE funcionarios SET nome = ?, email = ?, updated_at = ? WHERE id = ?"
        );
        assert_eq!(update.values.len(), 4);
        assert_eq!(update.values[3], SqlValue::U64(3));
    }

    #[test]
    fn nothing_to_assign_builds_no_statement() {
        let assignments = funcionario_assignments(FuncionarioChanges::default());
        assert!(build_update_sql("funcionarios", assignments, "id", 1).is_none());
    }
}
