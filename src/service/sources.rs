use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{debug, info, warn};

use api::request::UpdateSource;

use crate::entity::channel::{self, Entity as Channels};
use crate::entity::source::{self, Entity as Sources};
use crate::service::error::{Kind, StoreError, StoreResult};

pub struct SourcesService;

impl SourcesService {
    pub async fn get(db: &DatabaseConnection, id: i32) -> StoreResult<source::Model> {
        Sources::find_by_id(id).one(db).await?.ok_or_else(|| {
            debug!("Source {} not found", id);
            StoreError::not_found(Kind::Source, id)
        })
    }

    pub async fn get_by_filename(
        db: &DatabaseConnection,
        filename: &str,
    ) -> StoreResult<Option<source::Model>> {
        Ok(Sources::find()
            .filter(source::Column::Filename.eq(filename))
            .one(db)
            .await?)
    }

    pub async fn get_by_display_name(
        db: &DatabaseConnection,
        display_name: &str,
    ) -> StoreResult<Option<source::Model>> {
        Ok(Sources::find()
            .filter(source::Column::DisplayName.eq(display_name))
            .one(db)
            .await?)
    }

    pub async fn list(
        db: &DatabaseConnection,
        skip: u64,
        limit: u64,
    ) -> StoreResult<Vec<source::Model>> {
        Ok(Sources::find()
            .order_by_asc(source::Column::Id)
            .offset(skip)
            .limit(limit)
            .all(db)
            .await?)
    }

    /// Filename conflicts are reported before display name conflicts.
    pub async fn create(
        db: &DatabaseConnection,
        display_name: String,
        filename: String,
    ) -> StoreResult<source::Model> {
        if Self::get_by_filename(db, &filename).await?.is_some() {
            warn!("Source filename '{}' already taken", filename);
            return Err(StoreError::already_exists(
                Kind::Source,
                "filename",
                filename,
            ));
        }
        if Self::get_by_display_name(db, &display_name)
            .await?
            .is_some()
        {
            warn!("Source display_name '{}' already taken", display_name);
            return Err(StoreError::already_exists(
                Kind::Source,
                "display_name",
                display_name,
            ));
        }

        let created = source::ActiveModel {
            display_name: Set(display_name),
            filename: Set(filename),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!("Created source {} ({})", created.id, created.filename);
        Ok(created)
    }

    /// Applies only the fields present in `patch`.
    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        patch: UpdateSource,
    ) -> StoreResult<source::Model> {
        let current = Self::get(db, id).await?;

        if let Some(display_name) = &patch.display_name {
            if let Some(other) = Self::get_by_display_name(db, display_name).await? {
                if other.id != id {
                    return Err(StoreError::already_exists(
                        Kind::Source,
                        "display_name",
                        display_name,
                    ));
                }
            }
        }
        if let Some(filename) = &patch.filename {
            if let Some(other) = Self::get_by_filename(db, filename).await? {
                if other.id != id {
                    return Err(StoreError::already_exists(
                        Kind::Source,
                        "filename",
                        filename,
                    ));
                }
            }
        }

        let mut active: source::ActiveModel = current.clone().into();
        if let Some(display_name) = patch.display_name {
            active.display_name = Set(display_name);
        }
        if let Some(filename) = patch.filename {
            active.filename = Set(filename);
        }
        if !active.is_changed() {
            return Ok(current);
        }

        let updated = active.update(db).await?;
        info!("Updated source {}", updated.id);
        Ok(updated)
    }

    /// Looks up the source, clears every channel reference to it and removes it,
    /// all in one transaction.
    pub async fn delete(db: &DatabaseConnection, id: i32) -> StoreResult<()> {
        let txn = db.begin().await?;
        if Sources::find_by_id(id).one(&txn).await?.is_none() {
            debug!("Source {} not found", id);
            return Err(StoreError::not_found(Kind::Source, id));
        }
        let cleared = Channels::update_many()
            .col_expr(channel::Column::SourceId, Expr::value(Option::<i32>::None))
            .filter(channel::Column::SourceId.eq(id))
            .exec(&txn)
            .await?;
        Sources::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        info!(
            "Deleted source {}, cleared {} channel references",
            id, cleared.rows_affected
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::channels::ChannelsService;
    use crate::service::database::memory;

    #[tokio::test]
    async fn test_create_and_lookup() {
        let db = memory().await;
        let db = db.get_connection();

        let created = SourcesService::create(db, "Jazz FM".into(), "abcdefghij.mp3".into())
            .await
            .unwrap();
        assert_eq!("Jazz FM", created.display_name);

        assert_eq!(created, SourcesService::get(db, created.id).await.unwrap());
        assert_eq!(
            Some(created.clone()),
            SourcesService::get_by_filename(db, "abcdefghij.mp3")
                .await
                .unwrap()
        );
        assert_eq!(
            Some(created),
            SourcesService::get_by_display_name(db, "Jazz FM")
                .await
                .unwrap()
        );
        assert!(matches!(
            SourcesService::get(db, 999).await,
            Err(StoreError::NotFound {
                kind: Kind::Source,
                id: 999
            })
        ));
    }

    #[tokio::test]
    async fn test_create_conflicts_filename_first() {
        let db = memory().await;
        let db = db.get_connection();

        SourcesService::create(db, "Jazz FM".into(), "abcdefghij.mp3".into())
            .await
            .unwrap();

        let both = SourcesService::create(db, "Jazz FM".into(), "abcdefghij.mp3".into()).await;
        assert!(matches!(
            both,
            Err(StoreError::AlreadyExists {
                field: "filename",
                ..
            })
        ));

        let name = SourcesService::create(db, "Jazz FM".into(), "zyxwvutsrq.mp3".into()).await;
        assert!(matches!(
            name,
            Err(StoreError::AlreadyExists {
                field: "display_name",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_update_partial_and_empty() {
        let db = memory().await;
        let db = db.get_connection();

        let created = SourcesService::create(db, "Jazz FM".into(), "abcdefghij.mp3".into())
            .await
            .unwrap();

        let unchanged = SourcesService::update(db, created.id, UpdateSource::default())
            .await
            .unwrap();
        assert_eq!(created, unchanged);

        let renamed = SourcesService::update(
            db,
            created.id,
            UpdateSource {
                display_name: Some("Smooth Jazz".into()),
                filename: None,
            },
        )
        .await
        .unwrap();
        assert_eq!("Smooth Jazz", renamed.display_name);
        assert_eq!("abcdefghij.mp3", renamed.filename);

        // keeping its own name is not a conflict
        SourcesService::update(
            db,
            created.id,
            UpdateSource {
                display_name: Some("Smooth Jazz".into()),
                filename: None,
            },
        )
        .await
        .unwrap();

        assert!(matches!(
            SourcesService::update(db, 42, UpdateSource::default()).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_conflict_with_other() {
        let db = memory().await;
        let db = db.get_connection();

        SourcesService::create(db, "Jazz FM".into(), "aaaaaaaaaa.mp3".into())
            .await
            .unwrap();
        let rock = SourcesService::create(db, "Rock FM".into(), "bbbbbbbbbb.mp3".into())
            .await
            .unwrap();

        let result = SourcesService::update(
            db,
            rock.id,
            UpdateSource {
                display_name: None,
                filename: Some("aaaaaaaaaa.mp3".into()),
            },
        )
        .await;
        assert!(matches!(
            result,
            Err(StoreError::AlreadyExists {
                field: "filename",
                ..
            })
        ));
        assert_eq!(rock, SourcesService::get(db, rock.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_ordered_pages() {
        let db = memory().await;
        let db = db.get_connection();

        for i in 0..5 {
            SourcesService::create(db, format!("Station {}", i), format!("station{:04}.mp3", i))
                .await
                .unwrap();
        }

        let all = SourcesService::list(db, 0, 100).await.unwrap();
        assert_eq!(5, all.len());
        assert!(all.windows(2).all(|w| w[0].id < w[1].id));

        let page = SourcesService::list(db, 1, 2).await.unwrap();
        assert_eq!(
            vec!["Station 1", "Station 2"],
            page.iter()
                .map(|s| s.display_name.as_str())
                .collect::<Vec<_>>()
        );

        assert!(SourcesService::list(db, 10, 2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_clears_channel_references() {
        let db = memory().await;
        let db = db.get_connection();

        let jazz = SourcesService::create(db, "Jazz FM".into(), "aaaaaaaaaa.mp3".into())
            .await
            .unwrap();
        let rock = SourcesService::create(db, "Rock FM".into(), "bbbbbbbbbb.mp3".into())
            .await
            .unwrap();

        let mut jazz_channels = vec![];
        for path in ["/jazz", "/jazz-hd", "/jazz-mobile"] {
            jazz_channels.push(
                ChannelsService::create(db, path.into(), Some(jazz.id))
                    .await
                    .unwrap(),
            );
        }
        let rock_channel = ChannelsService::create(db, "/rock".into(), Some(rock.id))
            .await
            .unwrap();

        SourcesService::delete(db, jazz.id).await.unwrap();

        assert!(matches!(
            SourcesService::get(db, jazz.id).await,
            Err(StoreError::NotFound { .. })
        ));
        for c in jazz_channels {
            let c = ChannelsService::get(db, c.id).await.unwrap();
            assert_eq!(None, c.source_id);
        }
        let rock_channel = ChannelsService::get(db, rock_channel.id).await.unwrap();
        assert_eq!(Some(rock.id), rock_channel.source_id);

        assert!(matches!(
            SourcesService::delete(db, jazz.id).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_concurrent_deletes_succeed_once() {
        let db = memory().await;
        let db = db.get_connection();

        let jazz = SourcesService::create(db, "Jazz FM".into(), "aaaaaaaaaa.mp3".into())
            .await
            .unwrap();

        let (first, second) = tokio::join!(
            SourcesService::delete(db, jazz.id),
            SourcesService::delete(db, jazz.id)
        );
        let deleted = [&first, &second].iter().filter(|r| r.is_ok()).count();
        assert_eq!(1, deleted);
        assert!(matches!(
            [first, second].into_iter().find(|r| r.is_err()),
            Some(Err(StoreError::NotFound { .. }))
        ));
    }
}
