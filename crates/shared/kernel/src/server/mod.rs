//! Axum plumbing shared by every slice.

mod error;
mod health;
mod index;
pub mod router;
mod state;

pub use error::ErrorBody;
pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateErrorExt, ApiStateInner};
