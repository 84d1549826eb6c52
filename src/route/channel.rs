use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use axum_valid::Valid;
use validator::ValidateArgs;

use api::request::{CreateChannel, Pagination, UpdateChannel};
use api::response::Channel;

use crate::service::channels::ChannelsService;
use crate::service::error::{Kind, StoreError};
use crate::{error::AppError, result::Result, route::AppState};

pub fn route() -> Router<AppState> {
    Router::new()
        .route(api::path::CHANNELS, get(list_channels).post(create_channel))
        .route("/channels", get(list_channels).post(create_channel))
        .route(
            "/channels/:id",
            get(get_channel).patch(update_channel).delete(delete_channel),
        )
}

/// A dangling `source_id` is a bad request, not a missing channel.
fn reference_error(err: StoreError) -> AppError {
    match err {
        StoreError::NotFound {
            kind: Kind::Source,
            id,
        } => AppError::unknown_reference(format!("No source with source_id {} found", id)),
        e => e.into(),
    }
}

async fn list_channels(
    State(state): State<AppState>,
    Valid(Query(page)): Valid<Query<Pagination>>,
) -> Result<Json<Vec<Channel>>> {
    let channels =
        ChannelsService::list(state.database.get_connection(), page.skip, page.limit).await?;
    Ok(Json(channels.into_iter().map(Channel::from).collect()))
}

async fn create_channel(
    State(state): State<AppState>,
    Json(req): Json<CreateChannel>,
) -> Result<(StatusCode, Json<Channel>)> {
    req.validate_with_args(&state.config.validation.limits())?;

    let created =
        ChannelsService::create(state.database.get_connection(), req.stream_path, req.source_id)
            .await
            .map_err(reference_error)?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

async fn get_channel(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Channel>> {
    let channel = ChannelsService::get(state.database.get_connection(), id).await?;
    Ok(Json(channel.into()))
}

async fn update_channel(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateChannel>,
) -> Result<Json<Channel>> {
    req.validate_with_args(&state.config.validation.limits())?;

    let updated = ChannelsService::update(state.database.get_connection(), id, req)
        .await
        .map_err(reference_error)?;
    Ok(Json(updated.into()))
}

async fn delete_channel(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode> {
    ChannelsService::delete(state.database.get_connection(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
