//! PostgreSQL note repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::NoteRow;
use crate::repo::{NoteRepository, UpsertNote};

/// PostgreSQL note repository
#[derive(Clone)]
pub struct PgNoteRepository {
    pool: PgPool,
}

impl PgNoteRepository {
    /// Create a new note repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn upsert(&self, note: UpsertNote) -> DbResult<Option<NoteRow>> {
        // The conflict update only fires when the existing row has the same
        // owner, so a colliding foreign id yields no row and no write.
        let row = sqlx::query_as::<_, NoteRow>(
            r#"
            INSERT INTO notes (id, owner_id, title, content, color)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
            SET title = EXCLUDED.title,
                content = EXCLUDED.content,
                color = EXCLUDED.color
            WHERE notes.owner_id = EXCLUDED.owner_id
            RETURNING id, owner_id, title, content, color, created_at
            "#,
        )
        .bind(note.id)
        .bind(note.owner_id)
        .bind(&note.title)
        .bind(&note.content)
        .bind(note.color)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> DbResult<Vec<NoteRow>> {
        let notes = sqlx::query_as::<_, NoteRow>(
            r#"
            SELECT id, owner_id, title, content, color, created_at
            FROM notes
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notes)
    }

    async fn delete_by_id_and_owner(&self, id: Uuid, owner_id: Uuid) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
