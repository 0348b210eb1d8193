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

//! Test utilities for the business layer.

use crate::clocks::testutils::SettableClock;
use crate::db;
use crate::db::sqlite::{testutils, SqliteDb, SqliteExecutor};
use crate::driver::Driver;
use crate::model::{parse_expiry_date, ItemName, Quantity};
use std::sync::Arc;
use time::macros::datetime;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database the test runs against.
    db: Arc<SqliteDb>,

    /// The clock that the driver under test uses, exposed to let tests move the date.
    clock: Arc<SettableClock>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes the driver against an in-memory database and a settable clock that starts
    /// on 2025-06-15.
    pub(crate) async fn setup() -> Self {
        let db = Arc::from(testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let clock = Arc::from(SettableClock::new(datetime!(2025-06-15 12:00:00 UTC)));
        let driver = Driver::new(db.clone(), clock.clone());
        Self { db, clock, driver }
    }

    /// Returns a copy of the driver under test.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Returns the clock used by the driver under test.
    pub(crate) fn clock(&self) -> &SettableClock {
        &self.clock
    }

    /// Returns a raw executor against the test database.
    pub(crate) async fn ex(&self) -> SqliteExecutor {
        self.db.ex().await.unwrap()
    }

    /// Inserts an item directly into the database, bypassing the driver.
    pub(crate) async fn put_item(&self, name: &str, quantity: &str, expiry: &str) {
        db::put_item(
            &mut self.ex().await,
            &ItemName::new(name).unwrap(),
            &Quantity::new(quantity).unwrap(),
            parse_expiry_date(expiry).unwrap(),
        )
        .await
        .unwrap();
    }
}
