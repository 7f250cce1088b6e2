//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the source and post
//! repositories. The connection sits behind a mutex so one store can be
//! shared between workflows; every operation runs in its own transaction.

use crate::model::{PostStatus, Source, SourceType};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{PostStorage, SourceStorage, StorageError, StorageResult};
use crate::storage::{
    NewPost, PostFilter, PostRecord, PostUpdate, SourceFilter, SourceRecord, SourceUpdate,
};
use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};
use rusqlite::types::Type;
use rusqlite::{ffi, params, params_from_iter, Connection, ErrorCode, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

const SOURCE_COLUMNS: &str = "id, name, code_name, type, url, created_at, updated_at";

const POST_COLUMNS: &str = "id, title, content, summary, canonical_url, status, source_id, \
                            published_at, created_at, updated_at";

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn connection(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Database("connection lock poisoned".to_string()))
    }

    /// Runs `work` inside a transaction, rolling back if it fails
    fn transaction<T>(
        &self,
        work: impl FnOnce(&Connection) -> StorageResult<T>,
    ) -> StorageResult<T> {
        let mut conn = self.connection()?;
        let tx = conn.transaction()?;
        let value = work(&tx)?;
        tx.commit()?;
        Ok(value)
    }
}

// ===== Column helpers =====

fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn conversion_error(idx: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, message.into())
}

fn uuid_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(idx)?;
    Uuid::parse_str(&raw).map_err(|e| conversion_error(idx, format!("invalid uuid {}: {}", raw, e)))
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| conversion_error(idx, format!("invalid timestamp {}: {}", raw, e)))
}

fn row_to_source(row: &Row<'_>) -> rusqlite::Result<SourceRecord> {
    let raw_type: String = row.get(3)?;
    let source_type = SourceType::from_db_string(&raw_type)
        .ok_or_else(|| conversion_error(3, format!("unknown source type {}", raw_type)))?;

    Ok(SourceRecord {
        id: uuid_column(row, 0)?,
        source: Source {
            name: row.get(1)?,
            code_name: row.get(2)?,
            source_type,
            url: row.get(4)?,
        },
        created_at: timestamp_column(row, 5)?,
        updated_at: timestamp_column(row, 6)?,
    })
}

fn row_to_post(row: &Row<'_>) -> rusqlite::Result<PostRecord> {
    let raw_status: String = row.get(5)?;
    let status = PostStatus::from_db_string(&raw_status)
        .ok_or_else(|| conversion_error(5, format!("unknown post status {}", raw_status)))?;

    Ok(PostRecord {
        id: uuid_column(row, 0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        summary: row.get(3)?,
        canonical_url: row.get(4)?,
        status,
        source_id: uuid_column(row, 6)?,
        published_at: timestamp_column(row, 7)?,
        created_at: timestamp_column(row, 8)?,
        updated_at: timestamp_column(row, 9)?,
    })
}

/// Maps unique and primary key violations to `Duplicate`
fn write_error(err: rusqlite::Error, entity: &'static str, detail: &str) -> StorageError {
    let duplicate = matches!(
        &err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && (failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
                    || failure.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
    );

    if duplicate {
        StorageError::Duplicate {
            entity,
            detail: detail.to_string(),
        }
    } else {
        StorageError::Sqlite(err)
    }
}

// ===== Source queries =====

fn insert_source(conn: &Connection, source: &Source) -> StorageResult<SourceRecord> {
    let at = now();
    let record = SourceRecord {
        id: Uuid::new_v4(),
        source: source.clone(),
        created_at: at,
        updated_at: at,
    };

    conn.execute(
        "INSERT INTO sources (id, name, code_name, type, url, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            record.id.to_string(),
            source.name,
            source.code_name,
            source.source_type.to_db_string(),
            source.url,
            format_timestamp(at),
            format_timestamp(at),
        ],
    )
    .map_err(|e| write_error(e, "source", &source.code_name))?;

    Ok(record)
}

fn select_source(conn: &Connection, id: Uuid) -> StorageResult<SourceRecord> {
    conn.query_row(
        &format!("SELECT {} FROM sources WHERE id = ?1", SOURCE_COLUMNS),
        params![id.to_string()],
        row_to_source,
    )
    .optional()?
    .ok_or_else(|| StorageError::NotFound {
        entity: "source",
        key: id.to_string(),
    })
}

// ===== Post queries =====

fn insert_post(conn: &Connection, post: &NewPost) -> StorageResult<PostRecord> {
    let at = now();

    conn.execute(
        "INSERT INTO posts (id, title, content, summary, canonical_url, status, source_id,
                            published_at, created_at, updated_at)
         VALUES (?1, ?2, ?3, NULL, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            post.id.to_string(),
            post.title,
            post.content,
            post.canonical_url,
            post.status.to_db_string(),
            post.source_id.to_string(),
            format_timestamp(post.published_at),
            format_timestamp(at),
            format_timestamp(at),
        ],
    )
    .map_err(|e| write_error(e, "post", &post.canonical_url))?;

    Ok(PostRecord {
        id: post.id,
        title: post.title.clone(),
        content: post.content.clone(),
        summary: None,
        canonical_url: post.canonical_url.clone(),
        status: post.status,
        source_id: post.source_id,
        published_at: post.published_at.trunc_subsecs(6),
        created_at: at,
        updated_at: at,
    })
}

fn select_post(conn: &Connection, id: Uuid) -> StorageResult<PostRecord> {
    conn.query_row(
        &format!("SELECT {} FROM posts WHERE id = ?1", POST_COLUMNS),
        params![id.to_string()],
        row_to_post,
    )
    .optional()?
    .ok_or_else(|| StorageError::NotFound {
        entity: "post",
        key: id.to_string(),
    })
}

impl SourceStorage for SqliteStorage {
    fn add_source(&self, source: &Source) -> StorageResult<SourceRecord> {
        self.transaction(|conn| insert_source(conn, source))
    }

    fn add_sources(&self, sources: &[Source]) -> StorageResult<Vec<SourceRecord>> {
        self.transaction(|conn| {
            sources
                .iter()
                .map(|source| insert_source(conn, source))
                .collect()
        })
    }

    fn get_source(&self, id: Uuid) -> StorageResult<SourceRecord> {
        let conn = self.connection()?;
        select_source(&conn, id)
    }

    fn get_sources(&self, filter: &SourceFilter) -> StorageResult<Vec<SourceRecord>> {
        let mut sql = format!("SELECT {} FROM sources WHERE 1 = 1", SOURCE_COLUMNS);
        let mut values: Vec<String> = Vec::new();

        if let Some(source_type) = filter.source_type {
            values.push(source_type.to_db_string().to_string());
            sql.push_str(&format!(" AND type = ?{}", values.len()));
        }
        if let Some(code_name) = &filter.code_name {
            values.push(code_name.clone());
            sql.push_str(&format!(" AND code_name = ?{}", values.len()));
        }
        sql.push_str(" ORDER BY name, code_name");

        let conn = self.connection()?;
        let mut stmt = conn.prepare(&sql)?;
        let sources = stmt
            .query_map(params_from_iter(values.iter()), row_to_source)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(sources)
    }

    fn update_source(&self, id: Uuid, update: &SourceUpdate) -> StorageResult<SourceRecord> {
        self.transaction(|conn| {
            let mut record = select_source(conn, id)?;

            if let Some(name) = &update.name {
                record.source.name = name.clone();
            }
            if let Some(source_type) = update.source_type {
                record.source.source_type = source_type;
            }
            if let Some(url) = &update.url {
                record.source.url = url.clone();
            }
            record.updated_at = now();

            conn.execute(
                "UPDATE sources SET name = ?1, type = ?2, url = ?3, updated_at = ?4 WHERE id = ?5",
                params![
                    record.source.name,
                    record.source.source_type.to_db_string(),
                    record.source.url,
                    format_timestamp(record.updated_at),
                    id.to_string(),
                ],
            )
            .map_err(|e| write_error(e, "source", &record.source.code_name))?;

            Ok(record)
        })
    }

    fn delete_source(&self, id: Uuid) -> StorageResult<()> {
        self.transaction(|conn| {
            let deleted = conn.execute("DELETE FROM sources WHERE id = ?1", params![id.to_string()])?;
            if deleted == 0 {
                return Err(StorageError::NotFound {
                    entity: "source",
                    key: id.to_string(),
                });
            }
            Ok(())
        })
    }
}

impl PostStorage for SqliteStorage {
    fn add_post(&self, post: &NewPost) -> StorageResult<PostRecord> {
        self.transaction(|conn| insert_post(conn, post))
    }

    fn add_posts(&self, posts: &[NewPost]) -> StorageResult<Vec<PostRecord>> {
        self.transaction(|conn| posts.iter().map(|post| insert_post(conn, post)).collect())
    }

    fn get_post(&self, id: Uuid) -> StorageResult<PostRecord> {
        let conn = self.connection()?;
        select_post(&conn, id)
    }

    fn get_posts(&self, filter: &PostFilter) -> StorageResult<Vec<PostRecord>> {
        let mut sql = format!("SELECT {} FROM posts WHERE 1 = 1", POST_COLUMNS);
        let mut values: Vec<String> = Vec::new();

        if let Some(status) = filter.status {
            values.push(status.to_db_string().to_string());
            sql.push_str(&format!(" AND status = ?{}", values.len()));
        }
        if let Some(source_id) = filter.source_id {
            values.push(source_id.to_string());
            sql.push_str(&format!(" AND source_id = ?{}", values.len()));
        }
        if let Some(canonical_url) = &filter.canonical_url {
            values.push(canonical_url.clone());
            sql.push_str(&format!(" AND canonical_url = ?{}", values.len()));
        }
        if let Some(created_after) = filter.created_after {
            values.push(format_timestamp(created_after));
            sql.push_str(&format!(" AND created_at >= ?{}", values.len()));
        }
        sql.push_str(" ORDER BY created_at, id");
        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        let conn = self.connection()?;
        let mut stmt = conn.prepare(&sql)?;
        let posts = stmt
            .query_map(params_from_iter(values.iter()), row_to_post)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(posts)
    }

    fn get_recent_posts(&self, days: u32) -> StorageResult<Vec<PostRecord>> {
        let filter = PostFilter {
            created_after: Some(Utc::now() - Duration::days(i64::from(days))),
            ..Default::default()
        };
        self.get_posts(&filter)
    }

    fn update_post(&self, id: Uuid, update: &PostUpdate) -> StorageResult<PostRecord> {
        self.transaction(|conn| {
            let mut record = select_post(conn, id)?;

            if let Some(next) = update.status {
                if !record.status.can_transition_to(next) {
                    return Err(StorageError::InvalidTransition {
                        id,
                        from: record.status,
                        to: next,
                    });
                }
                record.status = next;
            }
            if let Some(title) = &update.title {
                record.title = title.clone();
            }
            if let Some(content) = &update.content {
                record.content = content.clone();
            }
            if let Some(summary) = &update.summary {
                record.summary = Some(summary.clone());
            }
            record.updated_at = now();

            conn.execute(
                "UPDATE posts SET title = ?1, content = ?2, summary = ?3, status = ?4, updated_at = ?5
                 WHERE id = ?6",
                params![
                    record.title,
                    record.content,
                    record.summary,
                    record.status.to_db_string(),
                    format_timestamp(record.updated_at),
                    id.to_string(),
                ],
            )?;

            Ok(record)
        })
    }

    fn delete_post(&self, id: Uuid) -> StorageResult<()> {
        self.transaction(|conn| {
            let deleted = conn.execute("DELETE FROM posts WHERE id = ?1", params![id.to_string()])?;
            if deleted == 0 {
                return Err(StorageError::NotFound {
                    entity: "post",
                    key: id.to_string(),
                });
            }
            Ok(())
        })
    }

    fn count_posts_by_status(&self, status: PostStatus) -> StorageResult<u64> {
        let conn = self.connection()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM posts WHERE status = ?1",
            params![status.to_db_string()],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn count_posts(&self) -> StorageResult<u64> {
        let conn = self.connection()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EPOCH;
    use chrono::TimeZone;

    fn storage() -> SqliteStorage {
        SqliteStorage::new_in_memory().unwrap()
    }

    fn rt() -> Source {
        Source::new("RT", "rt::html", SourceType::Html, "https://russian.rt.com/news")
    }

    fn tass() -> Source {
        Source::new("TASS", "tass::html", SourceType::Html, "https://tass.ru/")
    }

    fn new_post(source_id: Uuid, url: &str) -> NewPost {
        NewPost {
            id: Uuid::new_v4(),
            title: "Title".to_string(),
            content: "Body".to_string(),
            canonical_url: url.to_string(),
            status: PostStatus::PendingSummary,
            source_id,
            published_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
        }
    }

    fn backdate(storage: &SqliteStorage, id: Uuid, days: i64) {
        let at = Utc::now() - Duration::days(days);
        storage
            .connection()
            .unwrap()
            .execute(
                "UPDATE posts SET created_at = ?1 WHERE id = ?2",
                params![format_timestamp(at), id.to_string()],
            )
            .unwrap();
    }

    #[test]
    fn test_create_in_memory() {
        let storage = storage();
        assert_eq!(storage.count_posts().unwrap(), 0);
    }

    #[test]
    fn test_file_backed_storage_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("briefex.db");

        let id = {
            let storage = SqliteStorage::new(&path).unwrap();
            storage.add_source(&rt()).unwrap().id
        };

        let reopened = SqliteStorage::new(&path).unwrap();
        assert_eq!(reopened.get_source(id).unwrap().source, rt());
    }

    #[test]
    fn test_add_and_get_source() {
        let storage = storage();
        let added = storage.add_source(&rt()).unwrap();

        let loaded = storage.get_source(added.id).unwrap();
        assert_eq!(loaded, added);
    }

    #[test]
    fn test_duplicate_source_code_name() {
        let storage = storage();
        storage.add_source(&rt()).unwrap();

        let mut clash = tass();
        clash.code_name = "rt::html".to_string();
        let err = storage.add_source(&clash).unwrap_err();
        assert!(err.is_duplicate(), "unexpected error: {:?}", err);
    }

    #[test]
    fn test_add_sources_is_atomic() {
        let storage = storage();
        let err = storage.add_sources(&[tass(), rt(), rt()]).unwrap_err();
        assert!(err.is_duplicate());
        assert!(storage.get_sources(&SourceFilter::default()).unwrap().is_empty());
    }

    #[test]
    fn test_get_sources_filters_and_orders() {
        let storage = storage();
        let feed = Source::new("Feed", "feed::rss", SourceType::Rss, "https://feed.example.com/rss");
        storage.add_sources(&[tass(), rt()]).unwrap();
        storage.add_source(&feed).unwrap();

        let all = storage.get_sources(&SourceFilter::default()).unwrap();
        let names: Vec<_> = all.iter().map(|r| r.source.name.as_str()).collect();
        assert_eq!(names, vec!["Feed", "RT", "TASS"]);

        let rss = storage
            .get_sources(&SourceFilter {
                source_type: Some(SourceType::Rss),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(rss.len(), 1);
        assert_eq!(rss[0].source, feed);

        let by_code = storage
            .get_sources(&SourceFilter {
                code_name: Some("tass::html".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_code[0].source, tass());
    }

    #[test]
    fn test_update_source() {
        let storage = storage();
        let added = storage.add_source(&rt()).unwrap();

        let updated = storage
            .update_source(
                added.id,
                &SourceUpdate {
                    name: Some("RT News".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.source.name, "RT News");
        assert_eq!(updated.source.url, rt().url);
        assert_eq!(storage.get_source(added.id).unwrap(), updated);
    }

    #[test]
    fn test_missing_source_is_not_found() {
        let storage = storage();
        assert!(storage.get_source(Uuid::new_v4()).unwrap_err().is_not_found());
        assert!(storage.delete_source(Uuid::new_v4()).unwrap_err().is_not_found());
        assert!(storage
            .update_source(Uuid::new_v4(), &SourceUpdate::default())
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_delete_source_cascades_to_posts() {
        let storage = storage();
        let source = storage.add_source(&rt()).unwrap();
        storage
            .add_post(&new_post(source.id, "https://russian.rt.com/news/1"))
            .unwrap();

        storage.delete_source(source.id).unwrap();
        assert_eq!(storage.count_posts().unwrap(), 0);
    }

    #[test]
    fn test_add_and_get_post() {
        let storage = storage();
        let source = storage.add_source(&rt()).unwrap();
        let added = storage
            .add_post(&new_post(source.id, "https://russian.rt.com/news/1"))
            .unwrap();

        let loaded = storage.get_post(added.id).unwrap();
        assert_eq!(loaded, added);
        assert_eq!(loaded.status, PostStatus::PendingSummary);
        assert!(loaded.summary.is_none());
    }

    #[test]
    fn test_epoch_published_at_round_trips() {
        let storage = storage();
        let source = storage.add_source(&rt()).unwrap();
        let mut post = new_post(source.id, "https://russian.rt.com/news/1");
        post.published_at = EPOCH;

        let added = storage.add_post(&post).unwrap();
        assert_eq!(storage.get_post(added.id).unwrap().published_at, EPOCH);
    }

    #[test]
    fn test_duplicate_canonical_url() {
        let storage = storage();
        let source = storage.add_source(&rt()).unwrap();
        storage
            .add_post(&new_post(source.id, "https://russian.rt.com/news/1"))
            .unwrap();

        let err = storage
            .add_post(&new_post(source.id, "https://russian.rt.com/news/1"))
            .unwrap_err();
        assert!(err.is_duplicate());
    }

    #[test]
    fn test_add_posts_is_atomic() {
        let storage = storage();
        let source = storage.add_source(&rt()).unwrap();

        let err = storage
            .add_posts(&[
                new_post(source.id, "https://russian.rt.com/news/1"),
                new_post(source.id, "https://russian.rt.com/news/1"),
            ])
            .unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(storage.count_posts().unwrap(), 0);
    }

    #[test]
    fn test_post_for_unknown_source_is_rejected() {
        let storage = storage();
        let err = storage
            .add_post(&new_post(Uuid::new_v4(), "https://russian.rt.com/news/1"))
            .unwrap_err();
        assert!(matches!(err, StorageError::Sqlite(_)));
    }

    #[test]
    fn test_get_recent_posts() {
        let storage = storage();
        let source = storage.add_source(&rt()).unwrap();
        let fresh = storage
            .add_post(&new_post(source.id, "https://russian.rt.com/news/1"))
            .unwrap();
        let stale = storage
            .add_post(&new_post(source.id, "https://russian.rt.com/news/2"))
            .unwrap();
        backdate(&storage, stale.id, 10);

        let recent = storage.get_recent_posts(3).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, fresh.id);

        assert_eq!(storage.get_recent_posts(30).unwrap().len(), 2);
    }

    #[test]
    fn test_get_posts_by_status_with_limit() {
        let storage = storage();
        let source = storage.add_source(&rt()).unwrap();
        for i in 0..3 {
            storage
                .add_post(&new_post(source.id, &format!("https://russian.rt.com/news/{}", i)))
                .unwrap();
        }

        let filter = PostFilter {
            limit: Some(2),
            ..PostFilter::with_status(PostStatus::PendingSummary)
        };
        assert_eq!(storage.get_posts(&filter).unwrap().len(), 2);
        assert!(storage
            .get_posts(&PostFilter::with_status(PostStatus::Published))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_update_post_valid_transition() {
        let storage = storage();
        let source = storage.add_source(&rt()).unwrap();
        let added = storage
            .add_post(&new_post(source.id, "https://russian.rt.com/news/1"))
            .unwrap();

        let updated = storage
            .update_post(
                added.id,
                &PostUpdate {
                    summary: Some("Short".to_string()),
                    status: Some(PostStatus::SummaryReady),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.status, PostStatus::SummaryReady);
        assert_eq!(updated.summary.as_deref(), Some("Short"));
        assert_eq!(storage.get_post(added.id).unwrap(), updated);
        assert_eq!(storage.count_posts_by_status(PostStatus::SummaryReady).unwrap(), 1);
        assert_eq!(storage.count_posts_by_status(PostStatus::PendingSummary).unwrap(), 0);
    }

    #[test]
    fn test_update_post_invalid_transition() {
        let storage = storage();
        let source = storage.add_source(&rt()).unwrap();
        let added = storage
            .add_post(&new_post(source.id, "https://russian.rt.com/news/1"))
            .unwrap();

        let err = storage
            .update_post(added.id, &PostUpdate::status(PostStatus::Published))
            .unwrap_err();
        assert!(matches!(
            err,
            StorageError::InvalidTransition {
                from: PostStatus::PendingSummary,
                to: PostStatus::Published,
                ..
            }
        ));
        assert_eq!(
            storage.get_post(added.id).unwrap().status,
            PostStatus::PendingSummary
        );
    }

    #[test]
    fn test_delete_post() {
        let storage = storage();
        let source = storage.add_source(&rt()).unwrap();
        let added = storage
            .add_post(&new_post(source.id, "https://russian.rt.com/news/1"))
            .unwrap();

        storage.delete_post(added.id).unwrap();
        assert!(storage.get_post(added.id).unwrap_err().is_not_found());
        assert!(storage.delete_post(added.id).unwrap_err().is_not_found());
    }
}
