use crate::example::{ExampleContext, ExecutionStatus};
use crate::format::ctx::Ctx;
use crate::format::factory::build_presenter;
use crate::format::styler::Styler;

/// Every reportable example in order, numbered from 1.
pub fn render_failures(examples: &[ExampleContext], ctx: &Ctx, styler: &dyn Styler) -> String {
    examples
        .iter()
        .filter(|example| example.status != ExecutionStatus::Passed)
        .filter_map(|example| build_presenter(example, ctx))
        .enumerate()
        .map(|(index, presenter)| presenter.fully_formatted(&(index + 1).to_string(), styler))
        .collect()
}

pub fn count_reportable(examples: &[ExampleContext]) -> usize {
    examples
        .iter()
        .filter(|example| example.status != ExecutionStatus::Passed)
        .filter(|example| example.reported_failure().is_some())
        .count()
}
