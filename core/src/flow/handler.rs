// core/src/flow/handler.rs

//! The boxed async handler type stored per step.

use super::context_data::ContextData;
use super::control::PipelineControl;
use std::future::Future;
use std::pin::Pin;

/// An async step handler.
///
/// A handler receives a clone of the shared `ContextData<TData>`, takes the locks it needs,
/// drops them before awaiting anything, and resolves to `Continue` or `Stop`.
pub type Handler<TData, Err> = Box<
  dyn Fn(ContextData<TData>) -> Pin<Box<dyn Future<Output = Result<PipelineControl, Err>> + Send>>
    + Send
    + Sync,
>;
