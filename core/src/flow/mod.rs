// core/src/flow/mod.rs

//! A small async workflow engine: named steps, before/on/after handlers, early stop,
//! and a registry keyed by context type. Every multi-call orchestration in this crate
//! (cart reconciliation, clear-cart, promotion application) runs on it.

pub mod context_data;
pub mod control;
pub mod error;
pub mod execution;
pub mod handler;
pub mod pipeline;
pub mod registry;
pub mod step;

pub use context_data::ContextData;
pub use control::{PipelineControl, PipelineResult};
pub use error::{FlowError, FlowResult};
pub use handler::Handler;
pub use pipeline::Pipeline;
pub use registry::FlowRegistry;
pub use step::{SkipCondition, StepDef};
