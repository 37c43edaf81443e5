//! Single-player driver: local player versus bot, in-memory decks.

use tracing::debug;

use crate::domain::dealing::{deal_halves, fresh_seed, full_deck, shuffle_with_seed};
use crate::domain::rules::{resolve_round, RoundOutcome, SideNames};
use crate::domain::state::{GameState, Phase, PlayerState};

pub struct SoloGame {
    state: GameState,
    player_name: String,
    bot_name: String,
}

impl SoloGame {
    pub fn new() -> Self {
        Self::with_names("Player", "Bot")
    }

    pub fn with_names(player: impl Into<String>, bot: impl Into<String>) -> Self {
        Self {
            state: GameState::new(),
            player_name: player.into(),
            bot_name: bot.into(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Construct, shuffle, and split a fresh deck; the player takes the
    /// front half. Valid from any phase: dealing over a finished or
    /// running game starts over.
    pub fn deal(&mut self) -> u64 {
        let seed = fresh_seed();
        self.deal_seeded(seed);
        seed
    }

    pub fn deal_seeded(&mut self, seed: u64) {
        let mut deck = full_deck();
        shuffle_with_seed(&mut deck, seed);
        let (front, back) = deal_halves(deck);
        self.state.player = PlayerState::with_deck(front);
        self.state.bot = PlayerState::with_deck(back);
        self.state.phase = Phase::Dealt;
        self.state.last_message = None;
        debug!(seed, "deck dealt");
    }

    /// Play one round. Before dealing this reports "Game has not
    /// started!" and touches nothing; after game over it keeps reporting
    /// the terminal outcome without mutating either deck.
    pub fn play_round(&mut self) -> RoundOutcome {
        if self.state.phase == Phase::NotStarted {
            let outcome = RoundOutcome::not_started();
            self.state.last_message = Some(outcome.message.clone());
            return outcome;
        }

        let names = SideNames {
            a: &self.player_name,
            b: &self.bot_name,
        };
        let outcome = resolve_round(
            &mut self.state.player.deck,
            &mut self.state.bot.deck,
            names,
        );

        if let Some((player_card, bot_card)) = outcome.drawn {
            self.state.player.current_card = Some(player_card);
            self.state.bot.current_card = Some(bot_card);
        }
        self.state.player.sync_score();
        self.state.bot.sync_score();
        self.state.phase = if outcome.is_game_over() {
            Phase::GameOver
        } else {
            Phase::RoundInProgress
        };
        self.state.last_message = Some(outcome.message.clone());
        debug!(
            player_score = self.state.player.score,
            bot_score = self.state.bot.score,
            message = %outcome.message,
            "round played"
        );
        outcome
    }

    /// Clear decks, current cards, and scores; back to `NotStarted`.
    pub fn restart(&mut self) {
        self.state.player.clear();
        self.state.bot.clear();
        self.state.phase = Phase::NotStarted;
        self.state.last_message = None;
    }
}

impl Default for SoloGame {
    fn default() -> Self {
        Self::new()
    }
}
