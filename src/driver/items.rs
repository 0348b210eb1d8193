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

//! Operations on the tracked food items.

use crate::db;
use crate::driver::{Driver, DriverResult};
use crate::model::{to_presentation, ItemId, ItemName, PresentedItem, Quantity};
use log::info;
use time::Date;

impl Driver {
    /// Stores a new food item and returns its storage-assigned identifier.
    pub(crate) async fn add_item(
        self,
        name: ItemName,
        quantity: Quantity,
        expiry: Date,
    ) -> DriverResult<ItemId> {
        let id = db::put_item(&mut self.db.ex().await?, &name, &quantity, expiry).await?;
        Ok(id)
    }

    /// Gets all stored items sorted by urgency, with their expiry status computed against
    /// the current date.
    pub(crate) async fn get_items(self) -> DriverResult<Vec<PresentedItem>> {
        let today = self.clock.now_utc().date();
        let items = db::get_items_by_expiry(&mut self.db.ex().await?).await?;
        Ok(items.into_iter().map(|item| to_presentation(item, today)).collect())
    }

    /// Deletes every stored item and returns how many were removed.
    pub(crate) async fn clear_items(self) -> DriverResult<u64> {
        let count = db::delete_all_items(&mut self.db.ex().await?).await?;
        info!("Cleared {} stored items", count);
        Ok(count)
    }
}
