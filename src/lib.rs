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

//! REST service that tracks perishable food items and their expiry dates.
//!
//! The service follows a layered architecture and the code is structured to
//! have one module per layer:
//!
//! 1.  `model`: The base layer, providing high-level data types that represent
//!     concepts in the domain of the application.  This layer also hosts the
//!     pure expiry status computation, which is the only real logic in the
//!     service.
//!
//! 1.  `db`: The persistence layer, offering the operations needed by the
//!     server as free functions over a database executor.
//!
//! 1.  `driver`: The business logic layer, coordinating access to the database
//!     and applying the domain mapping to stored records.
//!
//! 1.  `rest`: The HTTP layer, offering the REST APIs.  Every API is backed by
//!     a `Driver` instance.
//!
//! 1.  `main`: The app launcher, whose sole purpose is to gather configuration
//!     data from environment variables and call `serve`.
//!
//! There are result and error types in every layer, such as `DbResult` and
//! `DbError`.  Errors transparently float to the top of the app using the `?`
//! operator and are translated to HTTP status codes once returned from the
//! REST layer.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use crate::clocks::SystemClock;
use crate::db::sqlite::SqliteDb;
use crate::driver::Driver;
use crate::rest::app;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

pub mod clocks;
pub mod db;
mod driver;
pub mod env;
pub(crate) mod model;
mod rest;

/// Instantiates all resources to serve the application on `bind_addr`.
///
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose many
/// crate-internal types to the public, which in turn would make dead code detection harder.
pub async fn serve(bind_addr: impl Into<SocketAddr>, db: SqliteDb) -> Result<(), Box<dyn Error>> {
    let driver = Driver::new(Arc::from(db), Arc::from(SystemClock::default()));
    let app = app(driver);

    let listener = tokio::net::TcpListener::bind(bind_addr.into()).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
