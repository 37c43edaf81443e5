//! Read-only projections of game state into renderable view data.

use serde::Serialize;

use crate::domain::state::{GameState, Phase};
use crate::domain::Card;
use crate::tables::{Seat, TableDoc};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatView {
    pub display_name: String,
    pub score: u32,
    pub deck_size: usize,
    pub current_card: Option<Card>,
}

impl From<&Seat> for SeatView {
    fn from(seat: &Seat) -> Self {
        Self {
            display_name: seat.display_name.clone(),
            score: seat.score,
            deck_size: seat.deck.len(),
            current_card: seat.current_card,
        }
    }
}

/// What one player sees of a multiplayer table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub you: SeatView,
    pub opponent: Option<SeatView>,
    pub status_line: String,
}

impl TableView {
    /// Project the table document from one player's perspective; `None`
    /// if the viewer is not seated.
    pub fn project(doc: &TableDoc, viewer_uid: &str) -> Option<Self> {
        let you_idx = doc.seat_index_of(viewer_uid)?;
        let you = SeatView::from(&doc.players[you_idx]);
        let opponent = doc
            .players
            .iter()
            .find(|seat| seat.uid != viewer_uid)
            .map(SeatView::from);
        Some(Self {
            you,
            opponent,
            status_line: doc.status.status_line(),
        })
    }
}

/// The local game, same shape as the table view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoloView {
    pub you: SeatView,
    pub opponent: SeatView,
    pub status_line: String,
    pub game_over: bool,
}

impl SoloView {
    pub fn project(state: &GameState, player_name: &str, bot_name: &str) -> Self {
        Self {
            you: SeatView {
                display_name: player_name.to_string(),
                score: state.player.score as u32,
                deck_size: state.player.deck.len(),
                current_card: state.player.current_card,
            },
            opponent: SeatView {
                display_name: bot_name.to_string(),
                score: state.bot.score as u32,
                deck_size: state.bot.deck.len(),
                current_card: state.bot.current_card,
            },
            status_line: state
                .last_message
                .clone()
                .unwrap_or_else(|| "Deal to start".to_string()),
            game_over: state.phase == Phase::GameOver,
        }
    }
}
