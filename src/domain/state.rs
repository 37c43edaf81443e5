//! Single-player game state container.

use std::collections::VecDeque;

use crate::domain::Card;

/// Overall game progression phases for the local engine.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    /// Game created but not yet dealt.
    NotStarted,
    /// Deck dealt, no round played yet.
    Dealt,
    /// At least one round resolved, both decks still populated.
    RoundInProgress,
    /// A deck ran out; only `restart`/`deal` leave this phase.
    GameOver,
}

/// One side's cards and derived score.
///
/// `score` always equals `deck.len()` after every mutation; it is stored
/// rather than computed so views and the shared table document read the
/// same shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerState {
    pub deck: VecDeque<Card>,
    pub current_card: Option<Card>,
    pub score: usize,
}

impl PlayerState {
    pub fn with_deck(cards: Vec<Card>) -> Self {
        let deck: VecDeque<Card> = cards.into();
        let score = deck.len();
        Self {
            deck,
            current_card: None,
            score,
        }
    }

    pub fn clear(&mut self) {
        self.deck.clear();
        self.current_card = None;
        self.score = 0;
    }

    pub fn sync_score(&mut self) {
        self.score = self.deck.len();
    }
}

/// Entire local game container, sufficient for the solo driver.
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: Phase,
    pub player: PlayerState,
    pub bot: PlayerState,
    /// Message of the most recent round, for display.
    pub last_message: Option<String>,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            phase: Phase::NotStarted,
            player: PlayerState::default(),
            bot: PlayerState::default(),
            last_message: None,
        }
    }

    /// Total cards currently held across both decks.
    pub fn cards_in_play(&self) -> usize {
        self.player.deck.len() + self.bot.deck.len()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
