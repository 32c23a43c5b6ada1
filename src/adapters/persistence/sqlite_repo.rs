//! SQLite-backed content store via libsql. Implements ContentRepository.
//!
//! One database file (data/blog.db). Timestamps are unix microseconds (UTC).
//! Referential rules live in the schema: deleting a user deletes their posts,
//! deleting a location or category clears the reference on its posts.
//! Foreign keys are per-connection in SQLite, so every connection enables them.

use crate::adapters::persistence::fixtures::{FixtureStats, Fixtures};
use crate::domain::{Category, DomainError, Location, Post, PostFilter, User};
use crate::ports::ContentRepository;
use chrono::{DateTime, Utc};
use libsql::params::Params;
use libsql::{params, Connection, Database, Row, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    first_name TEXT NOT NULL DEFAULT '',
    last_name TEXT NOT NULL DEFAULT ''
)"#;

const LOCATIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS locations (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL CHECK (length(name) <= 256),
    created_at INTEGER NOT NULL,
    is_published INTEGER NOT NULL DEFAULT 1
)"#;

const CATEGORIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL CHECK (length(title) <= 256),
    description TEXT NOT NULL DEFAULT '',
    slug TEXT NOT NULL UNIQUE,
    created_at INTEGER NOT NULL,
    is_published INTEGER NOT NULL DEFAULT 1
)"#;

const POSTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS posts (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL CHECK (length(title) <= 256),
    text TEXT NOT NULL DEFAULT '',
    pub_date INTEGER NOT NULL,
    created_at INTEGER NOT NULL,
    is_published INTEGER NOT NULL DEFAULT 1,
    author_id INTEGER NOT NULL REFERENCES users (id) ON DELETE CASCADE,
    location_id INTEGER REFERENCES locations (id) ON DELETE SET NULL,
    category_id INTEGER REFERENCES categories (id) ON DELETE SET NULL
)"#;
const POSTS_PUB_DATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_posts_pub_date ON posts (pub_date DESC)";
const POSTS_CATEGORY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_posts_category ON posts (category_id, pub_date DESC)";

/// Posts joined with everything the pages display, in one round trip.
/// Column order is what `post_from_row` reads.
const POST_SELECT: &str = r#"
SELECT p.id, p.title, p.text, p.pub_date, p.created_at, p.is_published,
       u.id, u.username, u.first_name, u.last_name,
       l.id, l.name, l.created_at, l.is_published,
       c.id, c.title, c.description, c.slug, c.created_at, c.is_published
FROM posts p
JOIN users u ON u.id = p.author_id
LEFT JOIN locations l ON l.id = p.location_id
LEFT JOIN categories c ON c.id = p.category_id"#;

/// Visibility in SQL. A NULL category fails `c.is_published = 1`, same as the domain rule.
const VISIBLE_CLAUSE: &str = "p.is_published = 1 AND c.is_published = 1 AND p.pub_date <= ?";

const CATEGORY_SELECT: &str =
    "SELECT id, title, description, slug, created_at, is_published FROM categories";

/// SQLite content store. Safe to share via Arc.
pub struct SqliteRepo {
    db: Database,
    db_path: PathBuf,
}

impl SqliteRepo {
    /// Connect to (or create) `blog.db` under `base_dir` and ensure the schema exists.
    pub async fn connect(base_dir: impl AsRef<Path>) -> Result<Self, DomainError> {
        let base = base_dir.as_ref();
        std::fs::create_dir_all(base).map_err(|e| DomainError::Repo(e.to_string()))?;
        let db_path = base.join("blog.db");
        let path_str = db_path.to_string_lossy();
        let db = libsql::Builder::new_local(path_str.as_ref())
            .build()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        let repo = Self { db, db_path };

        let conn = repo.connection().await?;
        // PRAGMA journal_mode returns a row; consume it (execute fails on rows).
        let mut wal_rows = conn
            .query("PRAGMA journal_mode=WAL", ())
            .await
            .map_err(|e| DomainError::Repo(format!("WAL pragma failed: {}", e)))?;
        while wal_rows
            .next()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?
            .is_some()
        {}

        for ddl in [
            USERS_TABLE,
            LOCATIONS_TABLE,
            CATEGORIES_TABLE,
            POSTS_TABLE,
            POSTS_PUB_DATE_INDEX,
            POSTS_CATEGORY_INDEX,
        ] {
            conn.execute(ddl, ())
                .await
                .map_err(|e| DomainError::Repo(e.to_string()))?;
        }

        info!(path = %repo.db_path.display(), "SQLite connected with WAL mode");
        Ok(repo)
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// New connection with foreign key enforcement on.
    pub async fn connection(&self) -> Result<Connection, DomainError> {
        let conn = self
            .db
            .connect()
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DomainError::Repo(format!("foreign_keys pragma failed: {}", e)))?;
        Ok(conn)
    }

    /// Upsert validated fixtures in one transaction. Existing rows with the same id are
    /// updated in place (never deleted), so cascades do not fire.
    pub async fn load_fixtures(&self, fixtures: &Fixtures) -> Result<FixtureStats, DomainError> {
        fixtures.validate()?;
        let loaded_at = Utc::now();
        let conn = self.connection().await?;
        let tx = conn
            .transaction()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;

        for u in &fixtures.users {
            tx.execute(
                r#"
                INSERT INTO users (id, username, first_name, last_name)
                VALUES (?1, ?2, ?3, ?4)
                ON CONFLICT (id) DO UPDATE SET
                    username = excluded.username,
                    first_name = excluded.first_name,
                    last_name = excluded.last_name
                "#,
                params![
                    u.id,
                    u.username.as_str(),
                    u.first_name.as_str(),
                    u.last_name.as_str()
                ],
            )
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        }
        for l in &fixtures.locations {
            let created_at = l.created_at.unwrap_or(loaded_at).timestamp_micros();
            tx.execute(
                r#"
                INSERT INTO locations (id, name, created_at, is_published)
                VALUES (?1, ?2, ?3, ?4)
                ON CONFLICT (id) DO UPDATE SET
                    name = excluded.name,
                    is_published = excluded.is_published
                "#,
                params![l.id, l.name.as_str(), created_at, l.is_published as i64],
            )
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        }
        for c in &fixtures.categories {
            let created_at = c.created_at.unwrap_or(loaded_at).timestamp_micros();
            tx.execute(
                r#"
                INSERT INTO categories (id, title, description, slug, created_at, is_published)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ON CONFLICT (id) DO UPDATE SET
                    title = excluded.title,
                    description = excluded.description,
                    slug = excluded.slug,
                    is_published = excluded.is_published
                "#,
                params![
                    c.id,
                    c.title.as_str(),
                    c.description.as_str(),
                    c.slug.as_str(),
                    created_at,
                    c.is_published as i64
                ],
            )
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        }
        for p in &fixtures.posts {
            let created_at = p.created_at.unwrap_or(loaded_at).timestamp_micros();
            tx.execute(
                r#"
                INSERT INTO posts (id, title, text, pub_date, created_at, is_published,
                                   author_id, location_id, category_id)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                ON CONFLICT (id) DO UPDATE SET
                    title = excluded.title,
                    text = excluded.text,
                    pub_date = excluded.pub_date,
                    is_published = excluded.is_published,
                    author_id = excluded.author_id,
                    location_id = excluded.location_id,
                    category_id = excluded.category_id
                "#,
                params![
                    p.id,
                    p.title.as_str(),
                    p.text.as_str(),
                    p.pub_date.timestamp_micros(),
                    created_at,
                    p.is_published as i64,
                    p.author_id,
                    p.location_id,
                    p.category_id
                ],
            )
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        }
        tx.commit()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;

        let stats = fixtures.stats();
        info!(
            users = stats.users,
            locations = stats.locations,
            categories = stats.categories,
            posts = stats.posts,
            "fixtures loaded"
        );
        Ok(stats)
    }
}

/// Builds the SQL for a post filter. Conditions are ANDed in a fixed order so the
/// positional parameters line up.
fn post_query(filter: &PostFilter) -> (String, Vec<Value>) {
    let mut conditions: Vec<&str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(v) = &filter.visibility {
        conditions.push(VISIBLE_CLAUSE);
        values.push(Value::Integer(v.now.timestamp_micros()));
    }
    if let Some(id) = filter.post_id {
        conditions.push("p.id = ?");
        values.push(Value::Integer(id));
    }
    if let Some(category_id) = filter.category_id {
        conditions.push("p.category_id = ?");
        values.push(Value::Integer(category_id));
    }

    let mut sql = String::from(POST_SELECT);
    if !conditions.is_empty() {
        sql.push_str("\nWHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str("\nORDER BY p.pub_date DESC, p.id DESC");
    if let Some(limit) = filter.limit {
        sql.push_str("\nLIMIT ?");
        values.push(Value::Integer(limit as i64));
    }
    (sql, values)
}

fn repo_err(e: libsql::Error) -> DomainError {
    DomainError::Repo(e.to_string())
}

fn timestamp(micros: i64) -> Result<DateTime<Utc>, DomainError> {
    DateTime::from_timestamp_micros(micros)
        .ok_or_else(|| DomainError::Repo(format!("timestamp out of range: {}", micros)))
}

fn opt_i64(row: &Row, idx: i32) -> Result<Option<i64>, DomainError> {
    match row.get_value(idx).map_err(repo_err)? {
        Value::Null => Ok(None),
        Value::Integer(i) => Ok(Some(i)),
        other => Err(DomainError::Repo(format!(
            "column {} is not an integer: {:?}",
            idx, other
        ))),
    }
}

fn flag(row: &Row, idx: i32) -> Result<bool, DomainError> {
    Ok(row.get::<i64>(idx).map_err(repo_err)? != 0)
}

fn category_at(row: &Row, base: i32) -> Result<Option<Category>, DomainError> {
    let Some(id) = opt_i64(row, base)? else {
        return Ok(None);
    };
    Ok(Some(Category {
        id,
        title: row.get(base + 1).map_err(repo_err)?,
        description: row.get(base + 2).map_err(repo_err)?,
        slug: row.get(base + 3).map_err(repo_err)?,
        created_at: timestamp(row.get(base + 4).map_err(repo_err)?)?,
        is_published: flag(row, base + 5)?,
    }))
}

fn post_from_row(row: &Row) -> Result<Post, DomainError> {
    let location = match opt_i64(row, 10)? {
        Some(id) => Some(Location {
            id,
            name: row.get(11).map_err(repo_err)?,
            created_at: timestamp(row.get(12).map_err(repo_err)?)?,
            is_published: flag(row, 13)?,
        }),
        None => None,
    };
    Ok(Post {
        id: row.get(0).map_err(repo_err)?,
        title: row.get(1).map_err(repo_err)?,
        text: row.get(2).map_err(repo_err)?,
        pub_date: timestamp(row.get(3).map_err(repo_err)?)?,
        created_at: timestamp(row.get(4).map_err(repo_err)?)?,
        is_published: flag(row, 5)?,
        author: User {
            id: row.get(6).map_err(repo_err)?,
            username: row.get(7).map_err(repo_err)?,
            first_name: row.get(8).map_err(repo_err)?,
            last_name: row.get(9).map_err(repo_err)?,
        },
        location,
        category: category_at(row, 14)?,
    })
}

#[async_trait::async_trait]
impl ContentRepository for SqliteRepo {
    async fn find_posts(&self, filter: &PostFilter) -> Result<Vec<Post>, DomainError> {
        let (sql, values) = post_query(filter);
        let conn = self.connection().await?;
        let mut rows = conn
            .query(&sql, Params::Positional(values))
            .await
            .map_err(repo_err)?;
        let mut posts = Vec::new();
        while let Some(row) = rows.next().await.map_err(repo_err)? {
            posts.push(post_from_row(&row)?);
        }
        debug!(?filter, count = posts.len(), "post query");
        Ok(posts)
    }

    async fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>, DomainError> {
        let conn = self.connection().await?;
        let mut rows = conn
            .query(&format!("{} WHERE slug = ?1", CATEGORY_SELECT), params![slug])
            .await
            .map_err(repo_err)?;
        match rows.next().await.map_err(repo_err)? {
            Some(row) => category_at(&row, 0),
            None => Ok(None),
        }
    }
}
