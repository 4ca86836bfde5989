// core/src/lib.rs

//! Eatzy: the client core of a food-ordering app.
//!
//! The crate covers:
//!  - A remote food/cart API client (`remote`).
//!  - Cart reconciliation against a cart that only supports add and remove (`cart`).
//!  - Promotion application, at most once per cart screen (`promotion`).
//!  - A local favorites store (`store`) and the catalog repository that joins it (`catalog`).
//!  - An auth/document backend abstraction (`cloud`) and the account repository over it (`account`).
//!  - An explicit session context (`session`) and state-and-intent screen controllers (`screens`).
//!
//! Orchestrations with more than one remote call run on the small step engine in `flow`.

pub mod account;
pub mod cart;
pub mod catalog;
pub mod cloud;
pub mod error;
pub mod flow;
pub mod format;
pub mod models;
pub mod promotion;
pub mod remote;
pub mod screens;
pub mod session;
pub mod store;
pub mod validation;

pub use crate::error::{EatzyError, Result};
pub use crate::flow::{ContextData, FlowError, FlowRegistry, Pipeline, PipelineControl, PipelineResult};
pub use crate::session::Session;
