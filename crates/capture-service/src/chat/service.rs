//! Chat threads, direct messages, and realtime push.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use capture_core::error::AppError;
use capture_database::repositories::meetup::MeetupRepository;
use capture_database::repositories::message::MessageRepository;
use capture_database::repositories::user::UserRepository;
use capture_entity::message::model::{ConversationSummary, Message};
use capture_realtime::channel::names;
use capture_realtime::RealtimeHub;

use crate::context::RequestContext;

use super::conversations::group_conversations;

/// Longest accepted message body, in characters.
const MAX_BODY_CHARS: usize = 2000;

/// Handles meetup chat and direct messages.
#[derive(Clone)]
pub struct ChatService {
    message_repo: Arc<MessageRepository>,
    meetup_repo: Arc<MeetupRepository>,
    user_repo: Arc<UserRepository>,
    hub: Arc<RealtimeHub>,
}

impl ChatService {
    /// Creates a new chat service.
    pub fn new(
        message_repo: Arc<MessageRepository>,
        meetup_repo: Arc<MeetupRepository>,
        user_repo: Arc<UserRepository>,
        hub: Arc<RealtimeHub>,
    ) -> Self {
        Self {
            message_repo,
            meetup_repo,
            user_repo,
            hub,
        }
    }

    /// A meetup's chat thread, oldest first. Participants only.
    pub async fn meetup_thread(
        &self,
        ctx: &RequestContext,
        meetup_id: Uuid,
    ) -> Result<Vec<Message>, AppError> {
        self.require_participant(ctx.user_id, meetup_id).await?;
        self.message_repo.meetup_thread(meetup_id).await
    }

    /// Sends a message into a meetup thread and pushes it to subscribed
    /// sockets. The thread is read-only once the session's scheduled end
    /// has passed, whatever its status says.
    pub async fn send_meetup_message(
        &self,
        ctx: &RequestContext,
        meetup_id: Uuid,
        body: &str,
    ) -> Result<Message, AppError> {
        let body = validate_body(body)?;

        let meetup = self
            .meetup_repo
            .find_by_id(meetup_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Meetup {meetup_id} not found")))?;
        self.require_participant(ctx.user_id, meetup_id).await?;

        if meetup.has_ended(ctx.request_time) {
            return Err(AppError::conflict(
                "This session has ended and its chat is read-only",
            ));
        }

        let message = self
            .message_repo
            .insert_meetup_message(ctx.user_id, meetup_id, body)
            .await?;

        let delivered = self.hub.publish_message(&message);
        info!(message_id = %message.id, meetup_id = %meetup_id, delivered, "Meetup message sent");
        Ok(message)
    }

    /// The DM thread with one partner, oldest first.
    pub async fn direct_thread(
        &self,
        ctx: &RequestContext,
        partner_id: Uuid,
    ) -> Result<Vec<Message>, AppError> {
        self.message_repo.direct_thread(ctx.user_id, partner_id).await
    }

    /// Sends a direct message and pushes it to both sides' DM channels.
    pub async fn send_direct_message(
        &self,
        ctx: &RequestContext,
        recipient_id: Uuid,
        body: &str,
    ) -> Result<Message, AppError> {
        let body = validate_body(body)?;

        if recipient_id == ctx.user_id {
            return Err(AppError::validation("Cannot message yourself"));
        }
        if self.user_repo.find_by_id(recipient_id).await?.is_none() {
            return Err(AppError::not_found(format!(
                "User {recipient_id} not found"
            )));
        }

        let message = self
            .message_repo
            .insert_direct_message(ctx.user_id, recipient_id, body)
            .await?;

        let delivered = self.hub.publish_message(&message);
        info!(message_id = %message.id, recipient_id = %recipient_id, delivered, "Direct message sent");
        Ok(message)
    }

    /// The viewer's conversation list: one row per DM partner, holding
    /// the latest message, newest conversation first.
    pub async fn conversations(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<ConversationSummary>, AppError> {
        let messages = self.message_repo.direct_messages_of(ctx.user_id).await?;

        let partner_ids: Vec<Uuid> = messages
            .iter()
            .filter_map(|m| m.partner_of(ctx.user_id))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let nicknames: HashMap<Uuid, String> = self
            .user_repo
            .find_by_ids(&partner_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.nickname))
            .collect();

        Ok(group_conversations(ctx.user_id, messages, |id| {
            nicknames.get(&id).cloned()
        }))
    }

    /// Whether a user may subscribe to a realtime channel.
    ///
    /// Meetup channels require membership; a DM channel belongs only to
    /// the user it is named after.
    pub async fn can_subscribe(&self, user_id: Uuid, channel: &str) -> Result<bool, AppError> {
        if let Some(meetup_id) = names::parse_meetup_chat(channel) {
            return self.meetup_repo.is_participant(meetup_id, user_id).await;
        }
        if let Some(owner_id) = names::parse_direct_messages(channel) {
            return Ok(owner_id == user_id);
        }
        Ok(false)
    }

    async fn require_participant(&self, user_id: Uuid, meetup_id: Uuid) -> Result<(), AppError> {
        if !self.meetup_repo.is_participant(meetup_id, user_id).await? {
            return Err(AppError::forbidden(
                "Only participants can access this session's chat",
            ));
        }
        Ok(())
    }
}

fn validate_body(body: &str) -> Result<&str, AppError> {
    let body = body.trim();
    if body.is_empty() {
        return Err(AppError::validation("Message cannot be empty"));
    }
    if body.chars().count() > MAX_BODY_CHARS {
        return Err(AppError::validation("Message is too long"));
    }
    Ok(body)
}
