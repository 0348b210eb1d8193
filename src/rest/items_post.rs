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

//! API to add a new food item.

use crate::driver::Driver;
use crate::model::{parse_expiry_date, ItemName, Quantity};
use crate::rest::{MessageResponse, RestError};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

/// Request body for this API.
///
/// All fields are mandatory but are modeled as optional so that their presence is validated
/// here, with a descriptive error, instead of in the generic body deserializer.
#[derive(Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub(crate) struct AddItemRequest {
    /// Human-facing label of the new item.
    pub(crate) name: Option<String>,

    /// Free-form description of the stored amount.
    pub(crate) quantity: Option<String>,

    /// Expiry date of the new item in `YYYY-MM-DD` form.
    pub(crate) expiry: Option<String>,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Json(request): Json<AddItemRequest>,
) -> Result<(StatusCode, impl IntoResponse), RestError> {
    let name = ItemName::new(request.name.unwrap_or_default())?;
    let quantity = Quantity::new(request.quantity.unwrap_or_default())?;
    let expiry = parse_expiry_date(&request.expiry.unwrap_or_default())?;

    driver.add_item(name, quantity, expiry).await?;

    let response = MessageResponse { message: "Item added successfully".to_owned() };
    Ok((StatusCode::CREATED, Json(response)))
}
