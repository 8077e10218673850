pub mod mock;
pub mod responder;
pub mod store;
pub mod types;

pub use responder::SimulatedResponder;
pub use store::ChatStore;
pub use types::{Chat, Message, Role, NEW_CHAT_TITLE};
