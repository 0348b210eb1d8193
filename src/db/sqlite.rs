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

//! Common utilities to interact with the SQLite database.

use crate::db::{DbError, DbResult};
use crate::env::get_optional_var;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{Sqlite, SqliteConnectOptions, SqliteConnection, SqlitePool};
use std::str::FromStr;

/// Default location of the database file when not overridden via the environment.
const DEFAULT_CONN_STR: &str = "food_tracker.db";

/// Takes a raw SQLx error `e` and converts it to our generic error type.
pub(crate) fn map_sqlx_error(e: sqlx::Error) -> DbError {
    match e {
        sqlx::Error::ColumnDecode { source, .. } => DbError::DataIntegrityError(source.to_string()),
        sqlx::Error::RowNotFound => DbError::NotFound,
        e => DbError::BackendError(e.to_string()),
    }
}

/// Options to establish a connection to the SQLite database.
#[derive(Clone, Debug, PartialEq)]
pub struct SqliteOptions {
    /// Path to the database file, or a full SQLite connection string.
    pub conn_str: String,
}

impl SqliteOptions {
    /// Initializes a set of options from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use the `<prefix>_DB` variable when present.
    pub fn from_env(prefix: &str) -> Result<SqliteOptions, String> {
        Ok(SqliteOptions {
            conn_str: get_optional_var::<String>(prefix, "DB")?
                .unwrap_or_else(|| DEFAULT_CONN_STR.to_owned()),
        })
    }
}

/// Creates a new connection pool against the database described by `opts`, creating the
/// database file if it does not yet exist.
pub async fn connect(opts: SqliteOptions) -> DbResult<SqliteDb> {
    let conn_opts =
        SqliteConnectOptions::from_str(&opts.conn_str).map_err(map_sqlx_error)?.create_if_missing(true);
    let pool = SqlitePool::connect_with(conn_opts).await.map_err(map_sqlx_error)?;
    Ok(SqliteDb { pool })
}

/// A database executor backed by a single pooled connection.
///
/// An executor is acquired for the duration of one logical operation and releases its
/// connection back to the pool when dropped, regardless of whether the operation succeeded.
pub struct SqliteExecutor(PoolConnection<Sqlite>);

impl SqliteExecutor {
    /// Returns the raw connection on which to run sqlx queries.
    pub(crate) fn conn(&mut self) -> &mut SqliteConnection {
        &mut *self.0
    }
}

/// A database instance backed by a SQLite database.
pub struct SqliteDb {
    /// Shared SQLite connection pool.  This is a cloneable type that all concurrent
    /// operations can use at the same time.
    pool: SqlitePool,
}

impl SqliteDb {
    /// Obtains an executor scoped to one operation.
    ///
    /// This would be better called `executor` but this method is used so frequently that it makes
    /// call sites too verbose.
    pub async fn ex(&self) -> DbResult<SqliteExecutor> {
        let conn = self.pool.acquire().await.map_err(map_sqlx_error)?;
        Ok(SqliteExecutor(conn))
    }
}

/// Helper function to initialize the database with a schema.
pub(crate) async fn run_schema(ex: &mut SqliteExecutor, schema: &str) -> DbResult<()> {
    sqlx::raw_sql(schema).execute(ex.conn()).await.map_err(map_sqlx_error)?;
    Ok(())
}
