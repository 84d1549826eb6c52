use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use tracing::{debug, info, warn};

use api::request::UpdateChannel;

use crate::entity::channel::{self, Entity as Channels};
use crate::service::error::{Kind, StoreError, StoreResult};
use crate::service::sources::SourcesService;

pub struct ChannelsService;

impl ChannelsService {
    pub async fn get(db: &DatabaseConnection, id: i32) -> StoreResult<channel::Model> {
        Channels::find_by_id(id).one(db).await?.ok_or_else(|| {
            debug!("Channel {} not found", id);
            StoreError::not_found(Kind::Channel, id)
        })
    }

    pub async fn get_by_stream_path(
        db: &DatabaseConnection,
        stream_path: &str,
    ) -> StoreResult<Option<channel::Model>> {
        Ok(Channels::find()
            .filter(channel::Column::StreamPath.eq(stream_path))
            .one(db)
            .await?)
    }

    pub async fn list(
        db: &DatabaseConnection,
        skip: u64,
        limit: u64,
    ) -> StoreResult<Vec<channel::Model>> {
        Ok(Channels::find()
            .order_by_asc(channel::Column::Id)
            .offset(skip)
            .limit(limit)
            .all(db)
            .await?)
    }

    /// New channels always start at position 0.
    pub async fn create(
        db: &DatabaseConnection,
        stream_path: String,
        source_id: Option<i32>,
    ) -> StoreResult<channel::Model> {
        if let Some(source_id) = source_id {
            SourcesService::get(db, source_id).await?;
        }
        if Self::get_by_stream_path(db, &stream_path).await?.is_some() {
            warn!("Channel stream_path '{}' already taken", stream_path);
            return Err(StoreError::already_exists(
                Kind::Channel,
                "stream_path",
                stream_path,
            ));
        }

        let created = channel::ActiveModel {
            stream_path: Set(stream_path),
            pos: Set(0),
            source_id: Set(source_id),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!("Created channel {} ({})", created.id, created.stream_path);
        Ok(created)
    }

    /// Applies only the fields present in `patch`, `is_playing` is dropped.
    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        patch: UpdateChannel,
    ) -> StoreResult<channel::Model> {
        let UpdateChannel {
            stream_path,
            source_id,
            pos,
            is_playing: _,
        } = patch;

        let current = Self::get(db, id).await?;

        if let Some(stream_path) = &stream_path {
            if let Some(other) = Self::get_by_stream_path(db, stream_path).await? {
                if other.id != id {
                    return Err(StoreError::already_exists(
                        Kind::Channel,
                        "stream_path",
                        stream_path,
                    ));
                }
            }
        }
        if let Some(Some(source_id)) = source_id {
            SourcesService::get(db, source_id).await?;
        }

        let mut active: channel::ActiveModel = current.clone().into();
        if let Some(stream_path) = stream_path {
            active.stream_path = Set(stream_path);
        }
        if let Some(source_id) = source_id {
            active.source_id = Set(source_id);
        }
        if let Some(pos) = pos {
            active.pos = Set(pos);
        }
        if !active.is_changed() {
            return Ok(current);
        }

        let updated = active.update(db).await?;
        info!("Updated channel {}", updated.id);
        Ok(updated)
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> StoreResult<()> {
        Self::get(db, id).await?;
        Channels::delete_by_id(id).exec(db).await?;
        info!("Deleted channel {}", id);
        Ok(())
    }
}
