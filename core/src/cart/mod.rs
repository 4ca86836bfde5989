// core/src/cart/mod.rs

//! Cart reconciliation against a remote cart that only supports add and remove.
//!
//! Every quantity change is fetch, locate by name, then converge through delete and re-add.

pub mod contexts;
pub mod reconcile;
pub mod repository;

pub use contexts::{CartMutation, RemoteCall};
pub use reconcile::{plan_convergence, register_cart_flows};
pub use repository::{summarize, CartRepository, MutationOutcome};
