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

//! High-level data types and the expiry status computation.

use derive_getters::Getters;
use derive_more::Constructor;
use serde::{Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

/// Format of the calendar dates persisted by the database and accepted by the API.
pub(crate) const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Errors raised when validating untrusted input data.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct ModelError(pub String);

/// Result type for this module.
pub type ModelResult<T> = Result<T, ModelError>;

/// Identifier of a food item, assigned by the database on insertion and stable for the
/// item's lifetime.
#[derive(Clone, Constructor, Copy, Eq, PartialEq, Serialize)]
#[cfg_attr(test, derive(Debug))]
#[serde(transparent)]
pub(crate) struct ItemId(i64);

/// Name of a tracked food item.
#[derive(Eq, PartialEq, Serialize)]
#[cfg_attr(test, derive(Debug))]
#[serde(transparent)]
pub(crate) struct ItemName(String);

impl ItemName {
    /// Creates a new item name from an untrusted string `s`, making sure it is not empty.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        if s.is_empty() {
            return Err(ModelError("Item name cannot be empty".to_owned()));
        }
        Ok(Self(s))
    }

    /// Returns a string view of the item name.
    pub(crate) fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Free-form description of the stored amount of an item.
///
/// The source data is untyped so this performs no unit validation: "2", "1L" and "half a bag"
/// are all acceptable quantities.
#[derive(Eq, PartialEq, Serialize)]
#[cfg_attr(test, derive(Debug))]
#[serde(transparent)]
pub(crate) struct Quantity(String);

impl Quantity {
    /// Creates a new quantity from an untrusted string `s`, making sure it is not empty.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        if s.is_empty() {
            return Err(ModelError("Quantity cannot be empty".to_owned()));
        }
        Ok(Self(s))
    }

    /// Returns a string view of the quantity.
    pub(crate) fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Parses an expiry date in `YYYY-MM-DD` form.
pub(crate) fn parse_expiry_date(s: &str) -> ModelResult<Date> {
    Date::parse(s, DATE_FORMAT)
        .map_err(|e| ModelError(format!("Invalid expiry date '{}': {}", s, e)))
}

/// Formats an expiry date in the `YYYY-MM-DD` form used by the database and the API.
pub(crate) fn format_expiry_date(date: Date) -> String {
    date.format(DATE_FORMAT).expect("The format only uses components that all dates carry")
}

/// A persisted food item.
#[derive(Constructor, Getters)]
#[cfg_attr(test, derive(Debug))]
pub(crate) struct FoodItem {
    /// Identifier assigned by the database on insertion.
    id: ItemId,

    /// Human-facing label of the item.
    name: ItemName,

    /// Free-form description of the stored amount.
    quantity: Quantity,

    /// Calendar date on which the item expires.
    expiry: Date,
}

/// Read-time classification of an item against its expiry date.
#[derive(Clone, Copy, Eq, PartialEq)]
#[cfg_attr(test, derive(Debug))]
pub(crate) enum ExpiryStatus {
    /// The item expires in the contained number of whole days, which is always positive.
    DaysLeft(i64),

    /// The item expires today or has already expired.
    Expired,
}

impl ExpiryStatus {
    /// Classifies `expiry` against `today` by counting whole calendar days.
    ///
    /// Both inputs are dates without a time component, so the subtraction yields an exact
    /// integer day count.  A non-positive count, which includes the expiry day itself, is
    /// reported as expired.
    pub(crate) fn compute(expiry: Date, today: Date) -> ExpiryStatus {
        let days_left = (expiry - today).whole_days();
        if days_left <= 0 {
            ExpiryStatus::Expired
        } else {
            ExpiryStatus::DaysLeft(days_left)
        }
    }
}

impl Serialize for ExpiryStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ExpiryStatus::DaysLeft(days) => serializer.serialize_i64(*days),
            ExpiryStatus::Expired => serializer.serialize_str("Expired"),
        }
    }
}

/// Wire representation of a food item, extending the stored fields with the expiry status
/// derived at read time.
///
/// This record has no lifecycle of its own: it is recomputed on every read and never stored.
#[derive(Serialize)]
#[cfg_attr(test, derive(Debug))]
pub(crate) struct PresentedItem {
    /// Identifier of the underlying stored item.
    id: ItemId,

    /// Human-facing label of the item.
    name: ItemName,

    /// Free-form description of the stored amount.
    quantity: Quantity,

    /// Expiry date rendered in `YYYY-MM-DD` form.
    expiry: String,

    /// Days until expiry, or the literal `"Expired"` marker.
    days_left: ExpiryStatus,
}

/// Maps a stored `item` to its wire representation relative to `today`.
pub(crate) fn to_presentation(item: FoodItem, today: Date) -> PresentedItem {
    let days_left = ExpiryStatus::compute(item.expiry, today);
    PresentedItem {
        id: item.id,
        name: item.name,
        quantity: item.quantity,
        expiry: format_expiry_date(item.expiry),
        days_left,
    }
}
