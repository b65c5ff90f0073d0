use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};
use crate::repository::ProductRepository;
use crate::service::ProductService;

type CatalogState<R> = Arc<ProductService<R>>;

#[derive(OpenApi)]
#[openapi(
    paths(list, count, create, get_by_id, update_by_id, delete_by_id),
    components(
        schemas(Product, CreateProduct, UpdateProduct, ProductFilter),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Eyewear catalog CRUD backed by MongoDB")
    )
)]
pub struct ApiDoc;

/// Assembles the catalog routes on top of a [`ProductService`].
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let state: CatalogState<R> = Arc::new(service);

    Router::new()
        .route("/", get(list).post(create))
        .route("/count", get(count))
        .route("/{id}", get(get_by_id).put(update_by_id).delete(delete_by_id))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ProductFilter),
    responses(
        (status = 200, description = "Matching products, newest first", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list<R: ProductRepository>(
    State(service): State<CatalogState<R>>,
    Query(filter): Query<ProductFilter>,
) -> ProductResult<Json<Vec<Product>>> {
    service.list_products(filter).await.map(Json)
}

#[utoipa::path(
    get,
    path = "/count",
    tag = "Products",
    params(ProductFilter),
    responses(
        (status = 200, description = "Number of products matching the filter", body = u64),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn count<R: ProductRepository>(
    State(service): State<CatalogState<R>>,
    Query(filter): Query<ProductFilter>,
) -> ProductResult<Json<u64>> {
    service.count_products(filter).await.map(Json)
}

#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Stored product with generated id and timestamps", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create<R: ProductRepository>(
    State(service): State<CatalogState<R>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let stored = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "The requested product", body = Product),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_by_id<R: ProductRepository>(
    State(service): State<CatalogState<R>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<Product>> {
    service.get_product(id).await.map(Json)
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product identifier")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product after applying the partial update", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_by_id<R: ProductRepository>(
    State(service): State<CatalogState<R>>,
    UuidPath(id): UuidPath,
    ValidatedJson(changes): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<Product>> {
    service.update_product(id, changes).await.map(Json)
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product identifier")),
    responses(
        (status = 204, description = "Product removed"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_by_id<R: ProductRepository>(
    State(service): State<CatalogState<R>>,
    UuidPath(id): UuidPath,
) -> ProductResult<StatusCode> {
    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
