use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use storefront_core::{
    build_product_summary, build_product_view, format_amount, PriceDisplay, ProductSummary,
    ProductView,
};

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

/// Pre-rendered price strings. `original` is the struck-through price and is
/// only present when the product is on sale.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub(super) struct PriceLabel {
    current: String,
    original: Option<String>,
}

impl PriceLabel {
    fn new(price: &PriceDisplay, currency_symbol: &str) -> Self {
        Self {
            current: format_amount(price.current_price(), currency_symbol),
            original: price
                .struck_price()
                .map(|p| format_amount(p, currency_symbol)),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ProductItem {
    id: i64,
    #[serde(flatten)]
    summary: ProductSummary,
    price_label: PriceLabel,
    availability_label: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ProductDetailItem {
    id: i64,
    #[serde(flatten)]
    view: ProductView,
    price_label: PriceLabel,
    availability_label: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProductQuery {
    pub category: Option<String>,
    pub limit: Option<i64>,
}

pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<ApiResponse<Vec<ProductItem>>>, ApiError> {
    let rows = storefront_db::list_products(
        &state.pool,
        storefront_db::ProductListFilters {
            category: query.category.as_deref(),
            limit: Some(normalize_limit(query.limit)),
        },
    )
    .await
    .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let now = Utc::now();
    let data = rows
        .into_iter()
        .filter_map(|row| {
            let id = row.id;
            match row.into_record() {
                Ok(record) => Some((id, record)),
                Err(e) => {
                    tracing::warn!(product_id = id, error = %e, "skipping invalid stored product");
                    None
                }
            }
        })
        .map(|(id, record)| {
            let summary = build_product_summary(&record, now);
            ProductItem {
                id,
                price_label: PriceLabel::new(&summary.price, &state.currency_symbol),
                availability_label: summary.availability.label(),
                summary,
            }
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<ProductDetailItem>>, ApiError> {
    let Ok(id) = raw_id.parse::<i64>() else {
        return Err(ApiError::not_found(req_id.0));
    };

    let row = storefront_db::get_product(&state.pool, id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;
    let record = row
        .into_record()
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let view = build_product_view(&record, Utc::now());
    let data = ProductDetailItem {
        id,
        price_label: PriceLabel::new(&view.price, &state.currency_symbol),
        availability_label: view.availability.label(),
        view,
    };

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
