pub mod identity;
pub mod subscriptions;

pub use identity::IdentitySession;
pub use subscriptions::{RoutedEvent, SubscriptionRegistry};
