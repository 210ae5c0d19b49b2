//! Meetup repository implementation.

use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use capture_core::error::{AppError, ErrorKind};
use capture_core::result::AppResult;
use capture_entity::meetup::feedback::{FeedbackSubmission, MeetupFeedback};
use capture_entity::meetup::model::{CreateMeetup, Meetup, MeetupParticipant};
use capture_entity::meetup::status::MeetupStatus;
use capture_entity::notification::source::JoinedMeetup;

/// A meetup row joined with its host's nickname.
#[derive(Debug, Clone, FromRow)]
pub struct MeetupWithHost {
    /// The meetup row.
    #[sqlx(flatten)]
    pub meetup: Meetup,
    /// The host's display name.
    pub host_nickname: String,
}

/// Repository for meetups, participants, and feedback.
#[derive(Debug, Clone)]
pub struct MeetupRepository {
    pool: PgPool,
}

impl MeetupRepository {
    /// Create a new meetup repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a meetup by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Meetup>> {
        sqlx::query_as::<_, Meetup>("SELECT * FROM meetups WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find meetup", e))
    }

    /// Create a meetup and enroll the host as its first participant, in
    /// one transaction.
    pub async fn create(&self, host_id: Uuid, data: &CreateMeetup) -> AppResult<Meetup> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let meetup = sqlx::query_as::<_, Meetup>(
            "INSERT INTO meetups \
                 (host_id, title, description, sport, level, location_name, \
                  lat, lng, starts_at, ends_at, capacity) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING *",
        )
        .bind(host_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.sport)
        .bind(&data.level)
        .bind(&data.location_name)
        .bind(data.lat)
        .bind(data.lng)
        .bind(data.starts_at)
        .bind(data.ends_at)
        .bind(data.capacity)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create meetup", e))?;

        sqlx::query("INSERT INTO meetup_participants (meetup_id, user_id) VALUES ($1, $2)")
            .bind(meetup.id)
            .bind(host_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to enroll host", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit meetup creation", e)
        })?;

        Ok(meetup)
    }

    /// Every non-finished meetup joined with its host nickname, soonest
    /// first.
    ///
    /// Filtering and viewer-specific ordering happen in the service.
    /// Hosted-and-ended sessions stay `recruiting` until feedback closes
    /// them out, so they still come back here and land in the top tier.
    pub async fn list_with_host(&self) -> AppResult<Vec<MeetupWithHost>> {
        sqlx::query_as::<_, MeetupWithHost>(
            "SELECT m.*, u.nickname AS host_nickname \
             FROM meetups m JOIN users u ON u.id = m.host_id \
             WHERE m.status <> 'finished' \
             ORDER BY m.starts_at ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list meetups", e))
    }

    /// One meetup joined with its host nickname.
    pub async fn find_with_host(&self, id: Uuid) -> AppResult<Option<MeetupWithHost>> {
        sqlx::query_as::<_, MeetupWithHost>(
            "SELECT m.*, u.nickname AS host_nickname \
             FROM meetups m JOIN users u ON u.id = m.host_id \
             WHERE m.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find meetup", e))
    }

    /// Participant rows for a set of meetups, in one round trip.
    pub async fn participants_for(
        &self,
        meetup_ids: &[Uuid],
    ) -> AppResult<Vec<MeetupParticipant>> {
        sqlx::query_as::<_, MeetupParticipant>(
            "SELECT * FROM meetup_participants WHERE meetup_id = ANY($1) ORDER BY joined_at ASC",
        )
        .bind(meetup_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list participants", e))
    }

    /// Participant rows for a single meetup, join order.
    pub async fn participants_of(&self, meetup_id: Uuid) -> AppResult<Vec<MeetupParticipant>> {
        sqlx::query_as::<_, MeetupParticipant>(
            "SELECT * FROM meetup_participants WHERE meetup_id = $1 ORDER BY joined_at ASC",
        )
        .bind(meetup_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list participants", e))
    }

    /// Whether a user currently participates in a meetup.
    pub async fn is_participant(&self, meetup_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(\
                 SELECT 1 FROM meetup_participants WHERE meetup_id = $1 AND user_id = $2)",
        )
        .bind(meetup_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check participant", e))
    }

    /// Enroll a user, guarding capacity inside the insert itself so two
    /// concurrent joins cannot both take the last slot.
    ///
    /// Returns false when the meetup was already full (or the user was
    /// already enrolled).
    pub async fn insert_participant(&self, meetup_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO meetup_participants (meetup_id, user_id) \
             SELECT $1, $2 \
             WHERE (SELECT COUNT(*) FROM meetup_participants WHERE meetup_id = $1) < \
                   (SELECT capacity FROM meetups WHERE id = $1) \
             ON CONFLICT DO NOTHING",
        )
        .bind(meetup_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to enroll participant", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove a participant. Returns false when the user was not enrolled.
    pub async fn delete_participant(&self, meetup_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM meetup_participants WHERE meetup_id = $1 AND user_id = $2")
                .bind(meetup_id)
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to remove participant", e)
                })?;

        Ok(result.rows_affected() > 0)
    }

    /// Update a meetup's lifecycle status.
    pub async fn update_status(&self, meetup_id: Uuid, status: MeetupStatus) -> AppResult<Meetup> {
        sqlx::query_as::<_, Meetup>(
            "UPDATE meetups SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(meetup_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update status", e))?
        .ok_or_else(|| AppError::not_found(format!("Meetup {meetup_id} not found")))
    }

    /// Delete a meetup by ID.
    pub async fn delete(&self, meetup_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM meetups WHERE id = $1")
            .bind(meetup_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete meetup", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Whether the author already has a feedback row (real or skip) for
    /// the meetup.
    pub async fn feedback_exists(&self, meetup_id: Uuid, author_id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(\
                 SELECT 1 FROM meetup_feedback WHERE meetup_id = $1 AND author_id = $2)",
        )
        .bind(meetup_id)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check feedback", e))
    }

    /// Insert a feedback row and apply its badge votes in one
    /// transaction, so a crash can never count a vote without the
    /// feedback row that justifies it (or vice versa).
    ///
    /// When `finish` is set, the meetup's status moves to `finished` in
    /// the same transaction.
    pub async fn submit_feedback(
        &self,
        meetup_id: Uuid,
        author_id: Uuid,
        data: &FeedbackSubmission,
        finish: bool,
    ) -> AppResult<MeetupFeedback> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let feedback = sqlx::query_as::<_, MeetupFeedback>(
            "INSERT INTO meetup_feedback \
                 (meetup_id, author_id, star_user_id, manner_user_id, rating, comment) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(meetup_id)
        .bind(author_id)
        .bind(data.star_user_id)
        .bind(data.manner_user_id)
        .bind(data.rating)
        .bind(&data.comment)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("meetup_feedback_meetup_id_author_id_key") =>
            {
                AppError::conflict("Feedback already submitted for this meetup".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to insert feedback", e),
        })?;

        if let Some(star_user_id) = data.star_user_id {
            sqlx::query("UPDATE users SET star_count = star_count + 1 WHERE id = $1")
                .bind(star_user_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count star vote", e)
                })?;
        }
        if let Some(manner_user_id) = data.manner_user_id {
            sqlx::query("UPDATE users SET manner_count = manner_count + 1 WHERE id = $1")
                .bind(manner_user_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count manner vote", e)
                })?;
        }

        if finish {
            sqlx::query("UPDATE meetups SET status = 'finished' WHERE id = $1")
                .bind(meetup_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to finish meetup", e)
                })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit feedback", e)
        })?;

        Ok(feedback)
    }

    /// Meetups the user has joined, with a flag for whether their
    /// feedback row exists. Feeds the reminder and feedback-due
    /// notification sources.
    pub async fn joined_by_user(&self, user_id: Uuid) -> AppResult<Vec<JoinedMeetup>> {
        sqlx::query_as::<_, JoinedMeetup>(
            "SELECT m.id AS meetup_id, m.title, m.starts_at, m.ends_at, \
                    EXISTS(SELECT 1 FROM meetup_feedback f \
                           WHERE f.meetup_id = m.id AND f.author_id = $1) AS feedback_given \
             FROM meetups m \
             JOIN meetup_participants p ON p.meetup_id = m.id \
             WHERE p.user_id = $1 \
             ORDER BY m.starts_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list joined meetups", e)
        })
    }
}
