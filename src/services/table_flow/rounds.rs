//! Turn submission and round resolution against the shared table document.

use std::collections::VecDeque;

use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::rules::{resolve_round, OutcomeKind, RoundOutcome, Side, SideNames};
use crate::domain::Card;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::services::table_flow::mutation::Step;
use crate::services::table_flow::TableFlowService;
use crate::tables::{TableStatus, GUEST_SEAT, HOST_SEAT};

/// Result of a turn submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The table has not been dealt yet; nothing changed.
    NotStarted,
    /// The card is in; `status` tells what the submitter now waits for.
    Submitted { status: TableStatus },
    /// The game already ended; nothing changed.
    GameOver { message: String },
}

impl SubmitOutcome {
    /// User-facing text for this submission.
    pub fn message(&self) -> String {
        match self {
            SubmitOutcome::NotStarted => "Game has not started!".to_string(),
            SubmitOutcome::Submitted { status } => status.status_line(),
            SubmitOutcome::GameOver { message } => message.clone(),
        }
    }
}

/// A round resolution that this client won the race to commit.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRound {
    pub outcome: RoundOutcome,
    /// Store version of the resolving write; the presentation timer
    /// clears the played cards only while this is still current.
    pub version: u64,
}

impl TableFlowService {
    /// Submit the caller's current card: pop the front of their deck into
    /// `current_card` and derive the rendezvous status. If the previous
    /// round's resolved cards are still displayed, the same atomic write
    /// clears them first, so correctness never depends on the
    /// presentation timer having fired.
    pub async fn submit_card(
        &self,
        table_id: Uuid,
        uid: &str,
    ) -> Result<SubmitOutcome, DomainError> {
        let uid = uid.to_string();
        let mutated = self
            .run_mutation(table_id, "submit card", |doc| {
                let Some(seat_idx) = doc.seat_index_of(&uid) else {
                    return Err(DomainError::validation(
                        ValidationKind::NotSeated,
                        format!("user {uid} is not seated at this table"),
                    ));
                };
                match &doc.status {
                    TableStatus::Waiting => return Ok(Step::Skip(SubmitOutcome::NotStarted)),
                    TableStatus::GameOver { message, .. } => {
                        return Ok(Step::Skip(SubmitOutcome::GameOver {
                            message: message.clone(),
                        }))
                    }
                    TableStatus::RoundResolved { .. } => {
                        for seat in &mut doc.players {
                            seat.current_card = None;
                        }
                    }
                    TableStatus::Dealt
                    | TableStatus::WaitingForHost
                    | TableStatus::WaitingForGuest
                    | TableStatus::BothReady => {}
                }

                let seat = &mut doc.players[seat_idx];
                if seat.current_card.is_some() {
                    return Err(DomainError::validation(
                        ValidationKind::AlreadySubmitted,
                        "current card already submitted for this round",
                    ));
                }
                if seat.deck.is_empty() {
                    return Err(DomainError::validation(
                        ValidationKind::PhaseMismatch,
                        "no cards left to play",
                    ));
                }
                let card = seat.deck.remove(0);
                seat.current_card = Some(card);
                seat.score = seat.deck.len() as u32;
                doc.status = doc.derive_status();
                Ok(Step::Write(SubmitOutcome::Submitted {
                    status: doc.status.clone(),
                }))
            })
            .await?;
        if mutated.wrote {
            debug!(%table_id, uid = %uid, status = %mutated.doc.status.status_line(), "card submitted");
        }
        Ok(mutated.result)
    }

    /// Resolve the round if the table is still at `BothReady`.
    ///
    /// Both clients' watchers race to call this; the version check lets
    /// exactly one write commit. The loser re-reads, finds the status
    /// already moved on, and returns `None` without touching anything.
    pub async fn resolve_if_ready(
        &self,
        table_id: Uuid,
    ) -> Result<Option<ResolvedRound>, DomainError> {
        let mutated = self
            .run_mutation(table_id, "resolve round", |doc| {
                if doc.status != TableStatus::BothReady || !doc.is_full() {
                    return Ok(Step::Skip(None));
                }
                let (Some(host_card), Some(guest_card)) = (
                    doc.players[HOST_SEAT].current_card,
                    doc.players[GUEST_SEAT].current_card,
                ) else {
                    debug!(%table_id, "both-ready table without both cards, treating as not ready");
                    return Ok(Step::Skip(None));
                };

                // The submitted cards rejoin their deck fronts so the
                // shared resolver draws exactly the contested pair.
                let mut host_deck: VecDeque<Card> =
                    doc.players[HOST_SEAT].deck.iter().copied().collect();
                let mut guest_deck: VecDeque<Card> =
                    doc.players[GUEST_SEAT].deck.iter().copied().collect();
                host_deck.push_front(host_card);
                guest_deck.push_front(guest_card);

                let host_name = doc.players[HOST_SEAT].display_name.clone();
                let guest_name = doc.players[GUEST_SEAT].display_name.clone();
                let outcome = resolve_round(
                    &mut host_deck,
                    &mut guest_deck,
                    SideNames {
                        a: &host_name,
                        b: &guest_name,
                    },
                );

                // Opponent's deck empty after this round's card transfer
                // is the terminal condition, detected here rather than on
                // the next submission.
                let terminal_winner = match outcome.kind {
                    OutcomeKind::GameOver { winner } => Some(winner),
                    _ if host_deck.is_empty() => Some(Side::B),
                    _ if guest_deck.is_empty() => Some(Side::A),
                    _ => None,
                };

                doc.players[HOST_SEAT].deck = host_deck.into_iter().collect();
                doc.players[GUEST_SEAT].deck = guest_deck.into_iter().collect();
                doc.players[HOST_SEAT].score = doc.players[HOST_SEAT].deck.len() as u32;
                doc.players[GUEST_SEAT].score = doc.players[GUEST_SEAT].deck.len() as u32;
                // Played cards stay visible until the presentation timer
                // (or the next submission) clears them.
                doc.players[HOST_SEAT].current_card = outcome.drawn.map(|(host, _)| host);
                doc.players[GUEST_SEAT].current_card = outcome.drawn.map(|(_, guest)| guest);

                doc.status = match terminal_winner {
                    Some(winner) => {
                        let (winner_seat, loser_seat) = match winner {
                            Side::A => (HOST_SEAT, GUEST_SEAT),
                            Side::B => (GUEST_SEAT, HOST_SEAT),
                        };
                        TableStatus::GameOver {
                            winner_uid: doc.players[winner_seat].uid.clone(),
                            message: format!(
                                "{} wins the game! {} ran out of cards :)",
                                doc.players[winner_seat].display_name,
                                doc.players[loser_seat].display_name
                            ),
                        }
                    }
                    None => TableStatus::RoundResolved {
                        message: outcome.message.clone(),
                    },
                };
                Ok(Step::Write(Some(outcome)))
            })
            .await?;

        match mutated.result {
            Some(outcome) if mutated.wrote => {
                info!(%table_id, message = %outcome.message, "round resolved");
                Ok(Some(ResolvedRound {
                    outcome,
                    version: mutated.version,
                }))
            }
            _ => Ok(None),
        }
    }
}
