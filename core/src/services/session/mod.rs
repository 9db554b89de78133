//! Client session context and its persistence seam

mod context;
mod store;

pub use context::{Session, SessionContext, SessionUser};
pub use store::{MemorySessionStore, SessionStore};
