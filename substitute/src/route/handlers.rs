// vim: tw=80
use std::rc::Rc;
use tracing::debug;

use crate::{
    Call,
    EventHandler,
    Error,
    MatchArgs,
    MemberKind,
    Quantity,
    Result,
    ReturnType,
    ReturnValue,
    SubstituteState,
    events
};
use super::{CallHandler, RouteAction};

/// Appends every call to the substitute's received calls.
#[derive(Clone, Copy, Debug, Default)]
pub struct RecordCallHandler;

impl CallHandler for RecordCallHandler {
    fn handle(&self, call: &Rc<Call>, state: &SubstituteState)
        -> Result<RouteAction>
    {
        state.received_calls().borrow_mut().record(call.clone());
        Ok(RouteAction::Continue)
    }

    fn name(&self) -> &'static str {
        "record"
    }
}

/// Returns the most recently configured result matching the call, if any.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReturnConfiguredResultHandler;

impl CallHandler for ReturnConfiguredResultHandler {
    fn handle(&self, call: &Rc<Call>, state: &SubstituteState)
        -> Result<RouteAction>
    {
        // Don't hold the borrow while producing; return functions may inspect
        // the substitute.
        let result = state.call_results().borrow().try_get_result(call);
        Ok(match result {
            Some(r) => RouteAction::Return(r.produce(call)?),
            None => RouteAction::Continue
        })
    }

    fn name(&self) -> &'static str {
        "configured result"
    }
}

/// Like [`ReturnConfiguredResultHandler`], but doesn't move a result that
/// returns values in turn on to its next value.
#[derive(Clone, Copy, Debug, Default)]
pub struct PeekConfiguredResultHandler;

impl CallHandler for PeekConfiguredResultHandler {
    fn handle(&self, call: &Rc<Call>, state: &SubstituteState)
        -> Result<RouteAction>
    {
        let result = state.call_results().borrow().try_get_result(call);
        Ok(match result {
            Some(r) => RouteAction::Return(r.peek(call)?),
            None => RouteAction::Continue
        })
    }

    fn name(&self) -> &'static str {
        "peek configured result"
    }
}

/// Returns the default value of the call's return type.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReturnDefaultHandler;

impl CallHandler for ReturnDefaultHandler {
    fn handle(&self, call: &Rc<Call>, _state: &SubstituteState)
        -> Result<RouteAction>
    {
        let rt = call.return_type();
        match rt.default_value() {
            Some(v) => Ok(RouteAction::Return(v)),
            None => Err(Error::NoDefaultValue {
                member: call.member().clone(),
                type_name: rt.type_name()
            })
        }
    }

    fn name(&self) -> &'static str {
        "default"
    }
}

/// Returns the default value of the call's return type, or finishes the route
/// without a value if the type has none.  For routes whose calls don't come
/// from the code under test.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReturnDefaultIfAnyHandler;

impl CallHandler for ReturnDefaultIfAnyHandler {
    fn handle(&self, call: &Rc<Call>, _state: &SubstituteState)
        -> Result<RouteAction>
    {
        Ok(match call.return_type().default_value() {
            Some(v) => RouteAction::Return(v),
            None => RouteAction::Handled
        })
    }

    fn name(&self) -> &'static str {
        "default if any"
    }
}

/// Hands the call over to the real implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct CallBaseHandler;

impl CallHandler for CallBaseHandler {
    fn handle(&self, _call: &Rc<Call>, _state: &SubstituteState)
        -> Result<RouteAction>
    {
        Ok(RouteAction::CallBase)
    }

    fn name(&self) -> &'static str {
        "call base"
    }
}

/// Makes a property's getter return whatever was last assigned through its
/// setter.  Indexer arguments must match as specified.
#[derive(Clone, Copy, Debug, Default)]
pub struct PropertySetterHandler;

impl CallHandler for PropertySetterHandler {
    fn handle(&self, call: &Rc<Call>, state: &SubstituteState)
        -> Result<RouteAction>
    {
        let getter = call.member().matching_getter();
        if let (Some(getter), Some((value, index))) =
            (getter, call.args().split_last())
        {
            let getter_call = index.iter()
                .fold(Call::new(getter, ReturnType::of_value(value.as_ref())),
                      |c, a| c.boxed_arg(a.clone_value()));
            let spec = state.spec_factory()
                .create_from(&getter_call, MatchArgs::AsSpecifiedInCall);
            debug!(substitute = %state.config().name, getter = %spec,
                   value = ?value, "property assigned");
            state.call_results().borrow_mut()
                .set_result(spec, ReturnValue::Const(value.clone_value()));
        }
        Ok(RouteAction::Continue)
    }

    fn name(&self) -> &'static str {
        "property setter"
    }
}

/// Tracks handlers added to and removed from events.
#[derive(Clone, Copy, Debug, Default)]
pub struct EventSubscriptionHandler;

impl CallHandler for EventSubscriptionHandler {
    fn handle(&self, call: &Rc<Call>, state: &SubstituteState)
        -> Result<RouteAction>
    {
        let event = call.member().name();
        let handler = call.arg_as::<EventHandler>(0);
        match (call.member().kind(), handler) {
            (MemberKind::Subscribe, Some(h)) => {
                state.event_handlers().borrow_mut().add(event, h.clone());
            },
            (MemberKind::Unsubscribe, Some(h)) => {
                state.event_handlers().borrow_mut().remove(event, h);
            },
            _ => ()
        }
        Ok(RouteAction::Continue)
    }

    fn name(&self) -> &'static str {
        "event subscription"
    }
}

/// Invokes the current subscribers of the event named by the call, passing
/// them the call's arguments.
#[derive(Clone, Copy, Debug, Default)]
pub struct RaiseEventHandler;

impl CallHandler for RaiseEventHandler {
    fn handle(&self, call: &Rc<Call>, state: &SubstituteState)
        -> Result<RouteAction>
    {
        let event = call.member().name();
        // Subscribers may subscribe or unsubscribe while being invoked
        let handlers = state.event_handlers().borrow().handlers(event);
        debug!(substitute = %state.config().name, event,
               subscribers = handlers.len(), "raising event");
        events::raise(event, &handlers, call.args())?;
        Ok(RouteAction::Continue)
    }

    fn name(&self) -> &'static str {
        "raise event"
    }
}

/// Verifies that calls like the routed one were received, instead of
/// treating it as a new invocation.
#[derive(Clone, Debug)]
pub struct CheckReceivedHandler {
    match_args: MatchArgs,
    quantity: Quantity
}

impl CheckReceivedHandler {
    pub fn new(match_args: MatchArgs, quantity: Quantity) -> Self {
        CheckReceivedHandler{match_args, quantity}
    }
}

impl CallHandler for CheckReceivedHandler {
    fn handle(&self, call: &Rc<Call>, state: &SubstituteState)
        -> Result<RouteAction>
    {
        check_received(state, call, self.match_args, &self.quantity)?;
        Ok(RouteAction::Continue)
    }

    fn name(&self) -> &'static str {
        "check received"
    }
}

/// Find the received calls matching `call`.  If their number is not allowed
/// by `quantity`, hand every call to the same member to the substitute's
/// [`ReceivedCallNotFoundThrower`](crate::ReceivedCallNotFoundThrower).
pub fn check_received(state: &SubstituteState,
                      call: &Call,
                      match_args: MatchArgs,
                      quantity: &Quantity) -> Result<Vec<Rc<Call>>>
{
    let factory = state.spec_factory();
    let spec = factory.create_from(call, match_args);
    let received = state.received_calls().borrow();
    let matching = received.find_matching(&spec);
    if quantity.matches(matching.len()) {
        Ok(matching)
    } else {
        let all_to_member = factory.create_from(call, MatchArgs::Any);
        let related = received.find_matching(&all_to_member);
        debug!(substitute = %state.config().name, spec = %spec,
               %quantity, matching = matching.len(), related = related.len(),
               "verification failed");
        Err(state.thrower().throw(&spec, quantity, &related))
    }
}
