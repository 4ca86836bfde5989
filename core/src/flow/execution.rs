// core/src/flow/execution.rs

//! `Pipeline::run()`: executes steps and their handlers in order.

use super::context_data::ContextData;
use super::control::{PipelineControl, PipelineResult};
use super::error::FlowError;
use super::handler::Handler;
use super::pipeline::Pipeline;
use super::step::StepDef;
use tracing::{event, instrument, span, Instrument, Level};

/// What a single step asks the run loop to do next.
enum StepOutcome {
  Next,
  Halt,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Executes the flow against the shared context `ctx_data`.
  ///
  /// Engine-level problems (a non-optional step with no handlers, a handler registered
  /// for an unknown step) are raised as `FlowError` and converted into `Err`.
  #[instrument(
    name = "Pipeline::run",
    skip_all,
    fields(
      context_type = %std::any::type_name::<TData>(),
      num_steps = self.steps.len(),
    ),
    err(Display)
  )]
  pub async fn run(&self, ctx_data: ContextData<TData>) -> Result<PipelineResult, Err> {
    if let Some(step_name) = self.unknown_steps.first() {
      return Err(Err::from(FlowError::StepNotFound {
        step_name: step_name.clone(),
      }));
    }
    event!(Level::DEBUG, "Flow execution starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_span = span!(
        Level::INFO,
        "pipeline_step_execution",
        step_name = step_def.name.as_str(),
        step_index = step_idx,
        optional = step_def.optional
      );
      match self.run_step(step_def, &ctx_data).instrument(step_span).await? {
        StepOutcome::Next => {}
        StepOutcome::Halt => return Ok(PipelineResult::Stopped),
      }
    }

    event!(Level::DEBUG, "Flow execution completed.");
    Ok(PipelineResult::Completed)
  }

  async fn run_step(&self, step_def: &StepDef<TData>, ctx_data: &ContextData<TData>) -> Result<StepOutcome, Err> {
    let step_name = step_def.name.as_str();

    if let Some(skip_cond_fn) = &step_def.skip_if {
      if skip_cond_fn(ctx_data.clone()) {
        event!(Level::INFO, "Step skipped due to 'skip_if' condition.");
        return Ok(StepOutcome::Next);
      }
    }

    let phases = [
      ("before", self.before.get(step_name)),
      ("on", self.on.get(step_name)),
      ("after", self.after.get(step_name)),
    ];

    let has_handlers = phases.iter().any(|(_, h)| h.map_or(false, |v| !v.is_empty()));
    if !has_handlers {
      if step_def.optional {
        event!(Level::DEBUG, "Optional step has no handlers, skipping.");
        return Ok(StepOutcome::Next);
      }
      event!(Level::ERROR, "Non-optional step has no handlers.");
      return Err(Err::from(FlowError::HandlerMissing {
        step_name: step_def.name.clone(),
      }));
    }

    for (phase, handlers) in phases {
      let Some(handlers) = handlers else { continue };
      if let StepOutcome::Halt = Self::run_phase(phase, handlers, ctx_data).await? {
        return Ok(StepOutcome::Halt);
      }
    }

    event!(Level::DEBUG, "Step finished.");
    Ok(StepOutcome::Next)
  }

  async fn run_phase(
    phase: &'static str,
    handlers: &[Handler<TData, Err>],
    ctx_data: &ContextData<TData>,
  ) -> Result<StepOutcome, Err> {
    for (handler_idx, handler_fn) in handlers.iter().enumerate() {
      let handler_span = span!(Level::DEBUG, "handler", phase, handler_index = handler_idx);
      match handler_fn(ctx_data.clone()).instrument(handler_span).await {
        Ok(PipelineControl::Continue) => {}
        Ok(PipelineControl::Stop) => {
          event!(Level::INFO, phase, "Flow stopped by a handler.");
          return Ok(StepOutcome::Halt);
        }
        Err(e) => {
          event!(Level::ERROR, phase, error = %e, "Handler failed.");
          return Err(e);
        }
      }
    }
    Ok(StepOutcome::Next)
  }
}
