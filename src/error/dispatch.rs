//! Commands refused locally, before any network call.

use thiserror::Error;

use crate::api::CommandKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Another command is still awaiting its response.
    #[error("cannot {requested}: {in_flight} is still in flight")]
    Busy {
        requested: CommandKind,
        in_flight: CommandKind,
    },

    /// No snapshot has been loaded yet.
    #[error("cannot {requested}: no game state loaded")]
    NoSnapshot { requested: CommandKind },
}
