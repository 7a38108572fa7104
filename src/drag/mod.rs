//! Drag and drop: the active drag, target legality and hit-testing.
//!
//! - [`DragSession`] - at most one open [`DragContext`]
//! - [`ZoneTree`] - rectangles rendered this frame, with parents and target tags
//! - [`DropTargetResolver`] - point or element to legal [`DropTarget`]
//! - [`TouchDragOverlay`] - proxy and coordinate resolution for touch drags

mod context;
mod overlay;
mod resolver;
mod session;
mod zones;

pub use context::{DragContext, DropDecision, DropTarget, DropTargetSet, TurnView};
pub use overlay::TouchDragOverlay;
pub use resolver::DropTargetResolver;
pub use session::DragSession;
pub use zones::{Element, ElementId, ZoneTree};
