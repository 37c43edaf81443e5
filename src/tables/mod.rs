//! Shared table document: the single remote record both clients read and
//! write for one multiplayer game.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::Card;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::identity::UserProfile;
use crate::store::VersionedDoc;

/// Collection holding one document per table.
pub const TABLES_COLLECTION: &str = "tables";

pub const SEATS: usize = 2;
pub const HOST_SEAT: usize = 0;
pub const GUEST_SEAT: usize = 1;

/// Rendezvous status both clients derive from the same document fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableStatus {
    /// Table created, seats still filling.
    Waiting,
    /// Decks dealt, no card submitted for the current round.
    Dealt,
    /// Guest has submitted, host has not.
    WaitingForHost,
    /// Host has submitted, guest has not.
    WaitingForGuest,
    /// Both current cards are in; the next watcher to win the
    /// version-checked write resolves the round.
    BothReady,
    /// Round resolved; cards stay visible until cleared.
    RoundResolved { message: String },
    /// A deck ran out.
    GameOver { winner_uid: String, message: String },
}

impl TableStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TableStatus::GameOver { .. })
    }

    /// User-facing text for this status.
    pub fn status_line(&self) -> String {
        match self {
            TableStatus::Waiting => "waiting for players".to_string(),
            TableStatus::Dealt => "ready to play".to_string(),
            TableStatus::WaitingForHost => "waiting for host".to_string(),
            TableStatus::WaitingForGuest => "waiting for player 2".to_string(),
            TableStatus::BothReady => "both ready".to_string(),
            TableStatus::RoundResolved { message } => message.clone(),
            TableStatus::GameOver { message, .. } => message.clone(),
        }
    }
}

/// One player's share of the table document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub uid: String,
    pub display_name: String,
    #[serde(default)]
    pub deck: Vec<Card>,
    #[serde(default)]
    pub current_card: Option<Card>,
    #[serde(default)]
    pub score: u32,
}

impl Seat {
    pub fn new(profile: &UserProfile) -> Self {
        Self {
            uid: profile.uid.clone(),
            display_name: profile.display_name.clone(),
            deck: Vec::new(),
            current_card: None,
            score: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDoc {
    pub table_id: Uuid,
    pub status: TableStatus,
    /// Seat 0 is the host; seat 1 appears when a guest joins.
    pub players: Vec<Seat>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl TableDoc {
    pub fn new(table_id: Uuid, host: &UserProfile, now: OffsetDateTime) -> Self {
        Self {
            table_id,
            status: TableStatus::Waiting,
            players: vec![Seat::new(host)],
            created_at: now,
            updated_at: now,
        }
    }

    pub fn seat_index_of(&self, uid: &str) -> Option<usize> {
        self.players.iter().position(|seat| seat.uid == uid)
    }

    pub fn is_full(&self) -> bool {
        self.players.len() == SEATS
    }

    /// Derive the in-round rendezvous status from the two current-card
    /// fields. Pure: identical documents yield identical statuses on both
    /// clients.
    pub fn derive_status(&self) -> TableStatus {
        let host = self.players.get(HOST_SEAT).and_then(|s| s.current_card);
        let guest = self.players.get(GUEST_SEAT).and_then(|s| s.current_card);
        match (host, guest) {
            (Some(_), Some(_)) => TableStatus::BothReady,
            (Some(_), None) => TableStatus::WaitingForGuest,
            (None, Some(_)) => TableStatus::WaitingForHost,
            (None, None) => TableStatus::Dealt,
        }
    }

    /// Decode a store snapshot. A document that does not match the agreed
    /// schema is reported as corrupted; callers observing a table treat
    /// that as "not ready yet".
    pub fn decode(snapshot: &VersionedDoc) -> Result<Self, DomainError> {
        serde_json::from_value(snapshot.data.clone()).map_err(|err| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("table document does not match schema: {err}"),
            )
        })
    }

    pub fn encode(&self) -> Result<Value, DomainError> {
        serde_json::to_value(self).map_err(|err| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("table document failed to serialize: {err}"),
            )
        })
    }
}
