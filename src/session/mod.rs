//! Client-side session: who is logged in, and the operations that change it.

mod state;
mod store;

pub(crate) use state::{lock, SessionAction, SharedSession};
pub use state::Session;
pub use store::{AuthOutcome, SessionStore};
