// Larder
// Copyright 2025 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Database abstraction in terms of the operations needed by the server.
//!
//! Every write issued by this layer is a single auto-committed statement, so there is no
//! transaction machinery: callers acquire a scoped executor, run one operation, and drop the
//! executor to release the connection.

use crate::db::sqlite::SqliteExecutor;
use crate::model::{
    format_expiry_date, parse_expiry_date, FoodItem, ItemId, ItemName, ModelError, Quantity,
};
use futures::TryStreamExt;
use sqlx::Row;
use time::Date;

pub mod sqlite;

/// Database errors.  Any unexpected errors that come from the database are classified as
/// `BackendError`, but errors we know about have more specific types.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum DbError {
    /// Catch-all error type for unexpected database errors.
    #[error("Database error: {0}")]
    BackendError(String),

    /// Indicates a failure processing the data that already exists in the database.
    #[error("Data integrity error: {0}")]
    DataIntegrityError(String),

    /// Indicates that a requested entry does not exist.
    #[error("Entity not found")]
    NotFound,
}

impl From<ModelError> for DbError {
    fn from(e: ModelError) -> Self {
        DbError::DataIntegrityError(e.to_string())
    }
}

/// Result type for this module.
pub type DbResult<T> = Result<T, DbError>;

/// Initializes the database schema if it is not present yet.
pub async fn init_schema(ex: &mut SqliteExecutor) -> DbResult<()> {
    sqlite::run_schema(ex, include_str!("sqlite.sql")).await
}

/// Stores a new food item and returns the identifier the database assigned to it.
pub(crate) async fn put_item(
    ex: &mut SqliteExecutor,
    name: &ItemName,
    quantity: &Quantity,
    expiry: Date,
) -> DbResult<ItemId> {
    let query_str = "INSERT INTO food_items (name, quantity, expiry_date) VALUES (?, ?, ?)";
    let done = sqlx::query(query_str)
        .bind(name.as_str())
        .bind(quantity.as_str())
        .bind(format_expiry_date(expiry))
        .execute(ex.conn())
        .await
        .map_err(sqlite::map_sqlx_error)?;
    if done.rows_affected() != 1 {
        return Err(DbError::BackendError(format!(
            "Insert created {} rows",
            done.rows_affected()
        )));
    }
    Ok(ItemId::new(done.last_insert_rowid()))
}

/// Gets every stored food item, ordered by ascending expiry date (most urgent first).
///
/// A stored row whose expiry date cannot be parsed back is reported as a data integrity
/// error instead of being silently dropped.
pub(crate) async fn get_items_by_expiry(ex: &mut SqliteExecutor) -> DbResult<Vec<FoodItem>> {
    let query_str =
        "SELECT item_id, name, quantity, expiry_date FROM food_items ORDER BY expiry_date ASC";
    let mut rows = sqlx::query(query_str).fetch(ex.conn());

    let mut items = vec![];
    while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
        let item_id: i64 = row.try_get("item_id").map_err(sqlite::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(sqlite::map_sqlx_error)?;
        let quantity: String = row.try_get("quantity").map_err(sqlite::map_sqlx_error)?;
        let expiry_date: String = row.try_get("expiry_date").map_err(sqlite::map_sqlx_error)?;

        items.push(FoodItem::new(
            ItemId::new(item_id),
            ItemName::new(name)?,
            Quantity::new(quantity)?,
            parse_expiry_date(&expiry_date)?,
        ));
    }
    Ok(items)
}

/// Deletes every stored food item unconditionally and returns how many were removed.
pub(crate) async fn delete_all_items(ex: &mut SqliteExecutor) -> DbResult<u64> {
    let done = sqlx::query("DELETE FROM food_items")
        .execute(ex.conn())
        .await
        .map_err(sqlite::map_sqlx_error)?;
    Ok(done.rows_affected())
}
