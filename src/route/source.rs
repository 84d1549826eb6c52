use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use axum_valid::Valid;
use validator::ValidateArgs;

use api::request::{CreateSource, CreateSourceQuery, Pagination, UpdateSource};
use api::response::Source;

use crate::service::error::StoreError;
use crate::service::sources::SourcesService;
use crate::{error::AppError, result::Result, route::AppState, utils};

pub fn route() -> Router<AppState> {
    Router::new()
        .route(api::path::SOURCES, get(list_sources).post(create_source))
        .route("/sources", get(list_sources).post(create_source))
        .route(
            "/sources/:id",
            get(get_source).patch(update_source).delete(delete_source),
        )
}

async fn list_sources(
    State(state): State<AppState>,
    Valid(Query(page)): Valid<Query<Pagination>>,
) -> Result<Json<Vec<Source>>> {
    let sources =
        SourcesService::list(state.database.get_connection(), page.skip, page.limit).await?;
    Ok(Json(sources.into_iter().map(Source::from).collect()))
}

/// Filenames are generated, so a filename collision is a server fault.
fn creation_error(err: StoreError) -> AppError {
    match err {
        e @ StoreError::AlreadyExists {
            field: "filename", ..
        } => AppError::InternalServerError(e.into()),
        e => e.into(),
    }
}

/// `display_name` is taken from the query string, else from a JSON body.
async fn create_source(
    State(state): State<AppState>,
    Query(qry): Query<CreateSourceQuery>,
    body: Option<Json<CreateSource>>,
) -> Result<(StatusCode, Json<Source>)> {
    let req = match (qry.display_name, body) {
        (Some(display_name), _) => CreateSource { display_name },
        (None, Some(Json(req))) => req,
        (None, None) => {
            return Err(AppError::InvalidField(
                "display_name is required".to_string(),
            ))
        }
    };
    req.validate_with_args(&state.config.validation.limits())?;

    let created = SourcesService::create(
        state.database.get_connection(),
        req.display_name,
        utils::random_filename(),
    )
    .await
    .map_err(creation_error)?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

async fn get_source(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Source>> {
    let source = SourcesService::get(state.database.get_connection(), id).await?;
    Ok(Json(source.into()))
}

async fn update_source(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateSource>,
) -> Result<Json<Source>> {
    req.validate_with_args(&state.config.validation.limits())?;

    let updated = SourcesService::update(state.database.get_connection(), id, req).await?;
    Ok(Json(updated.into()))
}

async fn delete_source(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode> {
    SourcesService::delete(state.database.get_connection(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
