// vim: tw=80
use tracing::debug;

use crate::{Error, MatchArgs, Result, ReturnValue, SubstituteState};

/// Configures the result of the last call made to a substitute.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResultSetter;

impl ResultSetter {
    pub fn new() -> Self {
        Self
    }

    /// Make calls like the last one return `result`.
    ///
    /// The last call is popped from the call stack and stops counting as a
    /// received call.  It fails with [`Error::NoLastCall`] if no call is
    /// pending, and with [`Error::ReturnTypeMismatch`] if `result` holds a
    /// value the call could not return.  Nothing changes when it fails.
    pub fn set_result_for_last_call(&self,
                                    state: &SubstituteState,
                                    result: ReturnValue,
                                    match_args: MatchArgs) -> Result<()>
    {
        let call = state.call_stack().borrow().last()?;
        let rt = call.return_type();
        if let Some(v) = result.fixed_values().into_iter()
            .find(|v| !rt.accepts(*v))
        {
            return Err(Error::ReturnTypeMismatch {
                member: call.member().clone(),
                expected: rt.type_name(),
                actual: v.value_type_name()
            });
        }
        let spec = state.spec_factory().create_from(&call, match_args);
        debug!(substitute = %state.config().name, spec = %spec,
               result = ?result, "configured result");
        state.call_stack().borrow_mut().pop()?;
        state.call_results().borrow_mut().set_result(spec, result);
        state.received_calls().borrow_mut().mark_as_specifying(&call);
        Ok(())
    }
}
