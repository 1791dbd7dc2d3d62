//! Schema DDL for the three tables. Foreign keys are named `fk_<table>_<column>_<referenced_table>`.
//! Tables are created in dependency order; every statement is idempotent.

use crate::error::AppError;
use sqlx::SqlitePool;

struct ColumnDef {
    name: &'static str,
    sql_type: &'static str,
    not_null: bool,
}

struct ForeignKeyDef {
    column: &'static str,
    references: &'static str,
}

struct CheckDef {
    name: &'static str,
    expression: &'static str,
}

struct TableDef {
    name: &'static str,
    columns: &'static [ColumnDef],
    foreign_keys: &'static [ForeignKeyDef],
    checks: &'static [CheckDef],
}

const fn col(name: &'static str, sql_type: &'static str, not_null: bool) -> ColumnDef {
    ColumnDef {
        name,
        sql_type,
        not_null,
    }
}

const TABLES: &[TableDef] = &[
    TableDef {
        name: "restaurants",
        columns: &[col("name", "TEXT", true), col("address", "TEXT", true)],
        foreign_keys: &[],
        checks: &[],
    },
    TableDef {
        name: "pizzas",
        columns: &[col("name", "TEXT", true), col("ingredients", "TEXT", true)],
        foreign_keys: &[],
        checks: &[],
    },
    TableDef {
        name: "restaurant_pizzas",
        columns: &[
            col("price", "INTEGER", true),
            col("restaurant_id", "INTEGER", true),
            col("pizza_id", "INTEGER", true),
        ],
        foreign_keys: &[
            ForeignKeyDef {
                column: "restaurant_id",
                references: "restaurants",
            },
            ForeignKeyDef {
                column: "pizza_id",
                references: "pizzas",
            },
        ],
        checks: &[CheckDef {
            name: "ck_restaurant_pizzas_price",
            expression: "price BETWEEN 1 AND 30",
        }],
    },
];

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Constraint name for a foreign key from `table.column` to `referenced`.
pub fn foreign_key_name(table: &str, column: &str, referenced: &str) -> String {
    format!("fk_{}_{}_{}", table, column, referenced)
}

fn create_table_sql(t: &TableDef) -> String {
    let mut col_defs = vec![format!("{} INTEGER PRIMARY KEY AUTOINCREMENT", quote("id"))];
    for c in t.columns {
        let mut def = format!("{} {}", quote(c.name), c.sql_type);
        if c.not_null {
            def.push_str(" NOT NULL");
        }
        col_defs.push(def);
    }
    for ch in t.checks {
        col_defs.push(format!(
            "CONSTRAINT {} CHECK ({})",
            quote(ch.name),
            ch.expression
        ));
    }
    for fk in t.foreign_keys {
        col_defs.push(format!(
            "CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
            quote(&foreign_key_name(t.name, fk.column, fk.references)),
            quote(fk.column),
            quote(fk.references),
            quote("id")
        ));
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
        quote(t.name),
        col_defs.join(",\n  ")
    )
}

fn create_index_sql(t: &TableDef) -> Vec<String> {
    t.foreign_keys
        .iter()
        .map(|fk| {
            format!(
                "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
                quote(&format!("ix_{}_{}", t.name, fk.column)),
                quote(t.name),
                quote(fk.column)
            )
        })
        .collect()
}

/// Create all tables and foreign-key indexes if they do not exist yet.
pub async fn apply_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    for t in TABLES {
        let sql = create_table_sql(t);
        tracing::debug!(sql = %sql, "migration");
        sqlx::query(&sql).execute(pool).await?;
        for sql in create_index_sql(t) {
            sqlx::query(&sql).execute(pool).await?;
        }
    }
    tracing::info!(tables = TABLES.len(), "migrations applied");
    Ok(())
}
