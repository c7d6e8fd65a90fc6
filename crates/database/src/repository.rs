use crate::DbError;
use core_types::{Drive, Game, NewDrive, NewGame, NewPlay, Play, Record, RecordKind};
use sqlx::sqlite::SqlitePool;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the record store. It encapsulates all SQL and data access logic.
///
/// Records are only ever created and read; nothing updates or deletes them.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: SqlitePool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Closes the pool, waiting for checked-out connections to be returned.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Inserts a game and commits it, returning the stored row.
    pub async fn save_game(&self, game: NewGame) -> Result<Game, DbError> {
        let mut tx = self.pool.begin().await?;
        let id = sqlx::query(
            "INSERT INTO game_info (home, away, date, time, weather, stadium) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&game.home)
        .bind(&game.away)
        .bind(&game.date)
        .bind(&game.time)
        .bind(&game.weather)
        .bind(&game.stadium)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();
        tx.commit().await?;

        tracing::info!(id, home = %game.home, away = %game.away, "Saved game.");
        Ok(game.with_id(id))
    }

    /// Inserts a drive and commits it, returning the stored row.
    pub async fn save_drive(&self, drive: NewDrive) -> Result<Drive, DbError> {
        let mut tx = self.pool.begin().await?;
        let id = sqlx::query(
            r#"
            INSERT INTO overall_drive (
                quarter, time_received, drive_began, how_ball_obtained,
                time_lost, last_snap, how_given_up
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&drive.quarter)
        .bind(&drive.time_received)
        .bind(&drive.drive_began)
        .bind(&drive.how_ball_obtained)
        .bind(&drive.time_lost)
        .bind(&drive.last_snap)
        .bind(&drive.how_given_up)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();
        tx.commit().await?;

        tracing::info!(id, "Saved drive.");
        Ok(drive.with_id(id))
    }

    /// Inserts a play and commits it, returning the stored row.
    pub async fn save_play(&self, play: NewPlay) -> Result<Play, DbError> {
        let mut tx = self.pool.begin().await?;
        let id = sqlx::query(
            r#"
            INSERT INTO plays (
                quarter, down, yards_to_go, field_pos_half, field_pos_yard,
                time, shotgun, play_description
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&play.quarter)
        .bind(&play.down)
        .bind(&play.yards_to_go)
        .bind(&play.field_pos_half)
        .bind(&play.field_pos_yard)
        .bind(&play.time)
        .bind(&play.shotgun)
        .bind(&play.play_description)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();
        tx.commit().await?;

        tracing::info!(id, "Saved play.");
        Ok(play.with_id(id))
    }

    /// Fetches every game in insertion order.
    pub async fn get_all_games(&self) -> Result<Vec<Game>, DbError> {
        let games = sqlx::query_as::<_, Game>(
            "SELECT id, home, away, date, time, weather, stadium FROM game_info ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(games)
    }

    /// Fetches every drive in insertion order.
    pub async fn get_all_drives(&self) -> Result<Vec<Drive>, DbError> {
        let drives = sqlx::query_as::<_, Drive>(
            r#"
            SELECT id, quarter, time_received, drive_began, how_ball_obtained,
                   time_lost, last_snap, how_given_up
            FROM overall_drive
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(drives)
    }

    /// Fetches every play in insertion order.
    pub async fn get_all_plays(&self) -> Result<Vec<Play>, DbError> {
        let plays = sqlx::query_as::<_, Play>(
            r#"
            SELECT id, quarter, down, yards_to_go, field_pos_half, field_pos_yard,
                   time, shotgun, play_description
            FROM plays
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(plays)
    }

    /// Fetches the game whose identifier is `id`.
    pub async fn get_game(&self, id: i64) -> Result<Game, DbError> {
        let game = sqlx::query_as::<_, Game>(
            "SELECT id, home, away, date, time, weather, stadium FROM game_info WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| if let sqlx::Error::RowNotFound = e { DbError::NotFound } else { e.into() })?;

        Ok(game)
    }

    /// Fetches every record of one kind, wrapped as [`Record`].
    pub async fn get_records(&self, kind: RecordKind) -> Result<Vec<Record>, DbError> {
        let records = match kind {
            RecordKind::Game => self.get_all_games().await?.into_iter().map(Record::from).collect(),
            RecordKind::Drive => self.get_all_drives().await?.into_iter().map(Record::from).collect(),
            RecordKind::Play => self.get_all_plays().await?.into_iter().map(Record::from).collect(),
        };
        Ok(records)
    }

    /// Fetches the full contents of all three tables: games, then drives, then plays.
    pub async fn get_all_records(&self) -> Result<Vec<Record>, DbError> {
        let mut records = Vec::new();
        for kind in RecordKind::ALL {
            records.extend(self.get_records(kind).await?);
        }
        Ok(records)
    }
}
