use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roster_core::{RepoError, Sale, Seller, SellerDraft};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sellers", post(create_sellers))
        .route("/sellers/search", get(search_sellers))
        .route(
            "/sellers/{id}",
            get(get_seller).patch(update_seller).delete(delete_seller),
        )
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SaleInput {
    pub instrument_name: String,
    pub amount: f64,
    pub sale_date: String,
}

impl From<SaleInput> for Sale {
    fn from(s: SaleInput) -> Self {
        Sale::new(s.instrument_name, s.amount, s.sale_date)
    }
}

/// One seller in the create stream. Absent fields take their zero value
/// and fall through to validation, so a bad element never rejects the
/// whole batch.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SellerInput {
    pub name: String,
    pub email: String,
    pub age: u32,
    pub hire_date: String,
    pub phone: String,
    pub address: String,
    pub sales: Vec<SaleInput>,
}

impl SellerInput {
    fn into_draft(self) -> SellerDraft {
        SellerDraft {
            name: Some(self.name),
            email: Some(self.email),
            age: Some(self.age),
            hire_date: Some(self.hire_date),
            phone: Some(self.phone),
            address: Some(self.address),
            sales: Some(self.sales.into_iter().map(Into::into).collect()),
            total_sales: None,
        }
    }
}

/// Partial update body. A field that is absent stays untouched; supplying
/// `sales` as an empty list clears it.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSellerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
    pub hire_date: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub sales: Option<Vec<SaleInput>>,
}

impl UpdateSellerRequest {
    fn into_draft(self) -> SellerDraft {
        SellerDraft {
            name: self.name,
            email: self.email,
            age: self.age,
            hire_date: self.hire_date,
            phone: self.phone,
            address: self.address,
            sales: self
                .sales
                .map(|sales| sales.into_iter().map(Into::into).collect()),
            total_sales: None,
        }
    }
}

#[derive(Serialize)]
struct CreateSummary {
    count: usize,
    ids: Vec<String>,
    message: String,
}

#[derive(Serialize)]
struct SaleResponse {
    instrument_name: String,
    amount: f64,
    sale_date: String,
}

impl From<Sale> for SaleResponse {
    fn from(s: Sale) -> Self {
        Self {
            instrument_name: s.instrument_name,
            amount: s.amount,
            sale_date: s.sale_date,
        }
    }
}

#[derive(Serialize)]
struct SellerResponse {
    id: String,
    name: String,
    email: String,
    age: u32,
    hire_date: String,
    sales: Vec<SaleResponse>,
    phone: String,
    address: String,
    total_sales: f64,
    created_at: String,
    updated_at: String,
}

impl From<Seller> for SellerResponse {
    fn from(s: Seller) -> Self {
        Self {
            id: s.id.to_string(),
            name: s.name,
            email: s.email,
            age: s.age,
            hire_date: s.hire_date,
            sales: s.sales.into_iter().map(Into::into).collect(),
            phone: s.phone,
            address: s.address,
            total_sales: s.total_sales,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Serialize)]
struct DeleteResponse {
    success: bool,
    message: String,
}

/// Parse a path id, rejecting blank and malformed values.
fn parse_seller_id(raw: &str) -> Result<Uuid, Response> {
    if raw.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Seller ID is required").into_response());
    }
    Uuid::parse_str(raw.trim())
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid seller ID").into_response())
}

/// Map repository failures onto status codes.
fn repo_error_response(error: RepoError) -> Response {
    match &error {
        RepoError::NotFound(_) => (StatusCode::NOT_FOUND, error.to_string()).into_response(),
        RepoError::DuplicateEmail(_) | RepoError::DuplicateId(_) => {
            (StatusCode::CONFLICT, error.to_string()).into_response()
        }
        RepoError::Item(_) | RepoError::Store(_) => {
            tracing::error!("Storage failure: {}", error);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal error: {}", error),
            )
                .into_response()
        }
    }
}

/// POST /sellers - Batch create. The JSON array is the inbound stream;
/// elements are processed in order and failures only skip their element.
async fn create_sellers(
    State(state): State<AppState>,
    Json(inputs): Json<Vec<SellerInput>>,
) -> Response {
    let mut count = 0;
    let mut ids = Vec::new();
    let mut errors = Vec::new();

    for input in inputs {
        let display_name = input.name.clone();
        match input.into_draft().into_new() {
            Err(violations) => {
                let details = violations
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                errors.push(format!("Seller '{}': {}", display_name, details));
            }
            Ok(new) => match state.repository.create(new) {
                Ok(seller) => {
                    count += 1;
                    ids.push(seller.id.to_string());
                }
                Err(e @ (RepoError::DuplicateEmail(_) | RepoError::DuplicateId(_))) => {
                    errors.push(format!("Seller '{}': {}", display_name, e));
                }
                Err(e) => {
                    tracing::error!("Failed to create seller: {}", e);
                    errors.push(format!("Seller '{}': Unexpected error - {}", display_name, e));
                }
            },
        }
    }

    // Nothing made it in and at least one element failed
    if count == 0 && !errors.is_empty() {
        return (StatusCode::BAD_REQUEST, errors.join("; ")).into_response();
    }

    let mut message = format!("Successfully created {} seller(s)", count);
    if !errors.is_empty() {
        message.push_str(&format!(". Errors: {}", errors.join("; ")));
    }

    Json(CreateSummary {
        count,
        ids,
        message,
    })
    .into_response()
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    name: String,
}

/// GET /sellers/search?name= - Stream matches as NDJSON, one per line.
async fn search_sellers(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Response {
    if query.name.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "Name parameter is required").into_response();
    }

    let sellers = match state.repository.get_by_name(&query.name) {
        Ok(sellers) => sellers,
        Err(e) => return repo_error_response(e),
    };

    if sellers.is_empty() {
        return (
            StatusCode::NOT_FOUND,
            format!("No sellers found with name containing '{}'", query.name),
        )
            .into_response();
    }

    let mut body = String::new();
    for seller in sellers {
        match serde_json::to_string(&SellerResponse::from(seller)) {
            Ok(line) => {
                body.push_str(&line);
                body.push('\n');
            }
            Err(e) => {
                tracing::error!("Failed to encode seller: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Internal error: {}", e),
                )
                    .into_response();
            }
        }
    }

    ([(header::CONTENT_TYPE, "application/x-ndjson")], body).into_response()
}

/// GET /sellers/{id} - Point read.
async fn get_seller(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let seller_id = match parse_seller_id(&id) {
        Ok(u) => u,
        Err(resp) => return resp,
    };

    match state.repository.get_by_id(seller_id) {
        Ok(Some(seller)) => Json(SellerResponse::from(seller)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            format!("Seller with ID {} not found", seller_id),
        )
            .into_response(),
        Err(e) => repo_error_response(e),
    }
}

/// PATCH /sellers/{id} - Partial update.
async fn update_seller(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateSellerRequest>,
) -> Response {
    let seller_id = match parse_seller_id(&id) {
        Ok(u) => u,
        Err(resp) => return resp,
    };

    let draft = req.into_draft();
    if draft.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            "At least one field must be provided for update",
        )
            .into_response();
    }

    let violations = draft.validate(false);
    if !violations.is_empty() {
        let details = violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        return (StatusCode::BAD_REQUEST, details).into_response();
    }

    match state.repository.update(seller_id, draft) {
        Ok(seller) => Json(SellerResponse::from(seller)).into_response(),
        Err(e) => repo_error_response(e),
    }
}

/// DELETE /sellers/{id} - Every outcome carries a success flag and message.
async fn delete_seller(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let raw = id.trim();
    if raw.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(DeleteResponse {
                success: false,
                message: "Seller ID is required".to_string(),
            }),
        )
            .into_response();
    }
    let seller_id = match Uuid::parse_str(raw) {
        Ok(u) => u,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(DeleteResponse {
                    success: false,
                    message: "Invalid seller ID".to_string(),
                }),
            )
                .into_response();
        }
    };

    match state.repository.delete(seller_id) {
        Ok(true) => Json(DeleteResponse {
            success: true,
            message: format!("Seller with ID {} successfully deleted", seller_id),
        })
        .into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(DeleteResponse {
                success: false,
                message: format!("Seller with ID {} not found", seller_id),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to delete seller: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DeleteResponse {
                    success: false,
                    message: format!("Internal error: {}", e),
                }),
            )
                .into_response()
        }
    }
}
