use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::{mpsc, oneshot};

use crate::domain::round::{DealerPolicy, DuplicatePolicy, Phase, Round};
use crate::domain::strategy::recommend;
use crate::error::GameError;
use crate::models::{RoundSnapshot, Status};
use crate::shared::{BLACKJACK, COMMAND_CHANNEL_CAPACITY};

pub enum GameCommand {
    DetectedCard {
        label: String,
        reply: oneshot::Sender<Result<RoundSnapshot, GameError>>,
    },
    DealerCard {
        label: String,
        reply: oneshot::Sender<Result<RoundSnapshot, GameError>>,
    },
    Stand {
        reply: oneshot::Sender<Result<RoundSnapshot, GameError>>,
    },
    Reset {
        reply: oneshot::Sender<RoundSnapshot>,
    },
    GetState {
        reply: oneshot::Sender<RoundSnapshot>,
    },
}

/// Single-writer actor owning the table's round. All mutation flows through
/// the command channel, so concurrent requests can never interleave.
pub struct TableManager {
    round: Round,
    rng: StdRng,
}

impl TableManager {
    pub fn new(duplicate_policy: DuplicatePolicy, dealer_policy: DealerPolicy) -> Self {
        Self {
            round: Round::new(duplicate_policy, dealer_policy),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn start(
        duplicate_policy: DuplicatePolicy,
        dealer_policy: DealerPolicy,
    ) -> mpsc::Sender<GameCommand> {
        let (tx_cmd, rx_cmd) = mpsc::channel::<GameCommand>(COMMAND_CHANNEL_CAPACITY);
        let mut manager = TableManager::new(duplicate_policy, dealer_policy);
        tokio::spawn(async move { manager.run(rx_cmd).await });
        tx_cmd
    }

    async fn run(&mut self, mut rx: mpsc::Receiver<GameCommand>) {
        while let Some(cmd) = rx.recv().await {
            match cmd {
                GameCommand::DetectedCard { label, reply } => {
                    let res = self.handle_detected_card(&label);
                    let _ = reply.send(res);
                }
                GameCommand::DealerCard { label, reply } => {
                    let res = self.handle_dealer_card(&label);
                    let _ = reply.send(res);
                }
                GameCommand::Stand { reply } => {
                    let res = self.handle_stand();
                    let _ = reply.send(res);
                }
                GameCommand::Reset { reply } => {
                    let _ = reply.send(self.handle_reset());
                }
                GameCommand::GetState { reply } => {
                    let _ = reply.send(self.snapshot());
                }
            }
        }
        tracing::info!("TableManager actor exiting (command channel closed)");
    }

    fn handle_detected_card(&mut self, label: &str) -> Result<RoundSnapshot, GameError> {
        self.round.add_player_card(label, &mut self.rng)?;
        let snapshot = self.snapshot();
        tracing::info!(
            card = %label,
            player_hand = ?snapshot.player_hand,
            player_value = snapshot.player_value,
            recommendation = %snapshot.recommendation,
            "player card added"
        );
        Ok(snapshot)
    }

    fn handle_dealer_card(&mut self, label: &str) -> Result<RoundSnapshot, GameError> {
        self.round.add_dealer_card(label)?;
        let snapshot = self.snapshot();
        tracing::info!(
            card = %label,
            dealer_hand = ?snapshot.dealer_hand,
            dealer_value = snapshot.dealer_value,
            "dealer card added"
        );
        Ok(snapshot)
    }

    fn handle_stand(&mut self) -> Result<RoundSnapshot, GameError> {
        self.round.stand(&mut self.rng)?;
        Ok(self.snapshot())
    }

    fn handle_reset(&mut self) -> RoundSnapshot {
        self.round.reset();
        tracing::info!("game reset, scan a card to start");
        self.snapshot()
    }

    fn snapshot(&self) -> RoundSnapshot {
        let player_value = self.round.player_value();
        let status = if player_value > BLACKJACK {
            Status::Bust
        } else if self.round.phase() == Phase::PlayerTurn {
            Status::Active
        } else {
            Status::GameOver
        };

        RoundSnapshot {
            player_hand: self.round.player().to_vec(),
            player_value,
            dealer_hand: self.round.dealer().to_vec(),
            dealer_value: self.round.dealer_value(),
            dealer_upcard: self.round.dealer().first().cloned(),
            status,
            recommendation: recommend(player_value, self.round.upcard_value()),
            outcome: self.round.outcome().map(|o| o.message().to_string()),
        }
    }
}
