pub mod controller;
pub mod dispatcher;
pub mod loaders;
pub mod roster;
pub mod typing;

pub use controller::ChatController;
pub use dispatcher::MessageDispatcher;
pub use loaders::Loaders;
pub use roster::RoomMembershipTracker;
pub use typing::TypingIndicatorTimer;
