//! Single in-flight gate for server-mutating commands.

use crate::api::{Command, CommandKind, ManipulateAction};
use crate::drag::{DragContext, DropDecision, DropTarget};
use crate::error::DispatchError;

/// Proof that a command passed the gate. Hand it back to
/// [`ActionDispatcher::finish`] when the response arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTicket {
    id: u64,
    command: Command,
}

impl CommandTicket {
    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn kind(&self) -> CommandKind {
        self.command.kind()
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Debug, Default)]
pub struct ActionDispatcher {
    in_flight: Option<(u64, CommandKind)>,
    issued: u64,
}

impl ActionDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<CommandKind> {
        self.in_flight.map(|(_, kind)| kind)
    }

    /// Pass the gate, or refuse locally if another command is pending.
    pub fn try_begin(&mut self, command: Command) -> Result<CommandTicket, DispatchError> {
        if let Some((_, in_flight)) = self.in_flight {
            tracing::debug!(requested = %command.kind(), in_flight = %in_flight, "command refused");
            return Err(DispatchError::Busy {
                requested: command.kind(),
                in_flight,
            });
        }
        self.issued += 1;
        self.in_flight = Some((self.issued, command.kind()));
        Ok(CommandTicket {
            id: self.issued,
            command,
        })
    }

    /// Release the gate for `ticket`, whatever the outcome. A ticket that is
    /// not the one in flight is ignored.
    pub fn finish(&mut self, ticket: &CommandTicket) -> bool {
        match self.in_flight {
            Some((id, _)) if id == ticket.id => {
                self.in_flight = None;
                true
            }
            _ => false,
        }
    }

    /// Map a drop to the command it stands for.
    pub fn command_for_drop(decision: &DropDecision) -> Option<Command> {
        match (&decision.context, decision.target) {
            (DragContext::Hand { card, face_up }, DropTarget::Theater(theater)) => {
                Some(Command::PlayCard {
                    card_id: card.id,
                    theater,
                    face_up: *face_up,
                })
            }
            (DragContext::Hand { card, .. }, DropTarget::Trash) => {
                Some(Command::DestroyCard { card_id: card.id })
            }
            (DragContext::Theater { theater, played }, target) => {
                let action = match target {
                    DropTarget::Hand => ManipulateAction::Return,
                    DropTarget::Deck => ManipulateAction::Flip,
                    DropTarget::Trash => ManipulateAction::Destroy,
                    DropTarget::Theater(_) => return None,
                };
                Some(Command::Manipulate {
                    theater: *theater,
                    card_id: played.card.id,
                    action,
                })
            }
            (DragContext::Hand { .. }, DropTarget::Hand | DropTarget::Deck) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Card, PlayedCard, TheaterType};

    #[test]
    fn test_second_command_refused_until_finish() {
        let mut dispatcher = ActionDispatcher::new();
        let ticket = dispatcher.try_begin(Command::EndTurn).unwrap();
        assert!(dispatcher.is_busy());

        let err = dispatcher.try_begin(Command::DrawCard).unwrap_err();
        assert_eq!(
            err,
            DispatchError::Busy {
                requested: CommandKind::DrawCard,
                in_flight: CommandKind::EndTurn,
            }
        );

        assert!(dispatcher.finish(&ticket));
        assert!(!dispatcher.is_busy());
        assert!(!dispatcher.finish(&ticket));
        assert!(dispatcher.try_begin(Command::DrawCard).is_ok());
    }

    #[test]
    fn test_drop_mapping() {
        let card = Card::new(7, TheaterType::Air, 4, "Aerodrome");
        let hand = DragContext::Hand {
            card: card.clone(),
            face_up: false,
        };
        assert_eq!(
            ActionDispatcher::command_for_drop(&DropDecision {
                context: hand.clone(),
                target: DropTarget::Theater(TheaterType::Sea),
            }),
            Some(Command::PlayCard {
                card_id: 7,
                theater: TheaterType::Sea,
                face_up: false,
            })
        );
        assert_eq!(
            ActionDispatcher::command_for_drop(&DropDecision {
                context: hand.clone(),
                target: DropTarget::Trash,
            }),
            Some(Command::DestroyCard { card_id: 7 })
        );
        assert_eq!(
            ActionDispatcher::command_for_drop(&DropDecision {
                context: hand,
                target: DropTarget::Deck,
            }),
            None
        );

        let top = DragContext::Theater {
            theater: TheaterType::Land,
            played: PlayedCard::new(card, true, "a"),
        };
        assert_eq!(
            ActionDispatcher::command_for_drop(&DropDecision {
                context: top.clone(),
                target: DropTarget::Deck,
            }),
            Some(Command::Manipulate {
                theater: TheaterType::Land,
                card_id: 7,
                action: ManipulateAction::Flip,
            })
        );
        assert_eq!(
            ActionDispatcher::command_for_drop(&DropDecision {
                context: top,
                target: DropTarget::Theater(TheaterType::Air),
            }),
            None
        );
    }
}
