pub mod conversation;
pub mod drug;

pub use conversation::{Conversation, KeyboardAction, Reply, Step};
pub use drug::Drug;
