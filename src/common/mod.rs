pub mod commands;
pub mod error;
pub mod events;
pub mod types;

pub use commands::NetworkCommand;
pub use error::ChatError;
pub use events::{ChannelEvent, NetworkEvent};
pub use types::{ChatMessage, UserEntry};
