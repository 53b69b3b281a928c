// vim: tw=80
//! Routing of intercepted calls through chains of handlers.
//!
//! Every call runs through a [`Route`]: an ordered list of [`CallHandler`]s
//! assembled afresh for the kind of operation being performed.  Each handler
//! either lets the call continue down the chain or decides its outcome.

use std::{
    fmt,
    rc::Rc
};
use tracing::trace;

use crate::{
    Call,
    Config,
    Error,
    MatchArgs,
    Quantity,
    Result,
    SubstituteState,
    Value
};

mod handlers;

pub use self::handlers::*;

/// What a [`CallHandler`] decided.
pub enum RouteAction {
    /// Let the next handler decide
    Continue,
    /// Stop and return this value
    Return(Box<dyn Value>),
    /// Stop and run the real implementation
    CallBase,
    /// Stop without a value to return
    Handled,
}

impl fmt::Debug for RouteAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RouteAction::Continue => f.write_str("Continue"),
            RouteAction::Return(v) => f.debug_tuple("Return").field(v).finish(),
            RouteAction::CallBase => f.write_str("CallBase"),
            RouteAction::Handled => f.write_str("Handled")
        }
    }
}

/// The final outcome of routing a call, handed back to the interception
/// boundary.
#[derive(Debug)]
pub enum Outcome {
    /// Return this value to the caller
    Return(Box<dyn Value>),
    /// Run the real implementation and return whatever it returns
    CallBase,
    /// The call did its job (a verification or a stub declaration), but its
    /// return type has no default value to hand back.  The proxy must return
    /// some placeholder of its own.
    Handled,
}

impl Outcome {
    /// Downcast the returned value.
    ///
    /// # Examples
    /// ```
    /// # use substitute::*;
    /// let sub = Substitute::new();
    /// let call = Call::new(MemberId::method("count"), ReturnType::of::<u32>());
    /// let n: u32 = sub.invoke(call).unwrap().into_value().unwrap();
    /// assert_eq!(n, 0);
    /// ```
    pub fn into_value<T: Value + Clone>(self) -> Result<T> {
        match self {
            Outcome::Return(v) => v.downcast_ref::<T>()
                .map(T::clone)
                .map_err(|_| Error::OutcomeTypeMismatch {
                    expected: std::any::type_name::<T>(),
                    actual: v.value_type_name()
                }),
            Outcome::CallBase => Err(Error::CalledBase),
            Outcome::Handled => Err(Error::NoValue)
        }
    }

    /// Like [`into_value`](#method.into_value), but return `placeholder` if
    /// the call was [`Handled`](#variant.Handled) without a value.
    ///
    /// # Examples
    /// ```
    /// # use substitute::*;
    /// # use std::time::SystemTime;
    /// let sub = Substitute::new();
    /// let now = || Call::new(MemberId::getter("now"),
    ///                        ReturnType::without_default::<SystemTime>());
    /// sub.configure().invoke(now()).unwrap()
    ///     .into_value_or(SystemTime::UNIX_EPOCH)
    ///     .unwrap();
    /// ```
    pub fn into_value_or<T: Value + Clone>(self, placeholder: T) -> Result<T> {
        match self {
            Outcome::Handled => Ok(placeholder),
            o => o.into_value()
        }
    }

    pub fn is_call_base(&self) -> bool {
        matches!(self, Outcome::CallBase)
    }
}

/// One step of a [`Route`].
///
/// New behaviour is added by writing a new handler and putting it in a route,
/// not by changing existing handlers.
pub trait CallHandler {
    fn handle(&self, call: &Rc<Call>, state: &SubstituteState)
        -> Result<RouteAction>;

    /// Short name for log output.
    fn name(&self) -> &'static str;
}

/// An ordered chain of handlers.
pub struct Route {
    handlers: Vec<Box<dyn CallHandler>>
}

impl Route {
    pub fn new(handlers: Vec<Box<dyn CallHandler>>) -> Self {
        Route{handlers}
    }

    /// Run `call` through each handler in turn until one of them decides the
    /// outcome.  Errors stop the chain immediately.
    pub fn handle(&self, call: &Rc<Call>, state: &SubstituteState)
        -> Result<Outcome>
    {
        for handler in self.handlers.iter() {
            let action = handler.handle(call, state)?;
            trace!(handler = handler.name(), action = ?action);
            match action {
                RouteAction::Continue => (),
                RouteAction::Return(v) => return Ok(Outcome::Return(v)),
                RouteAction::CallBase => return Ok(Outcome::CallBase),
                RouteAction::Handled => return Ok(Outcome::Handled)
            }
        }
        Err(Error::UnhandledCall{member: call.member().clone()})
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Names of the handlers, in order.
    pub fn handler_names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }
}

/// The kinds of operation a call can be routed for.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RouteKind {
    /// The code under test called a member
    Invocation,
    /// Find out what an invocation would return, without recording it
    QueryResult,
    /// The call only names the member and arguments of a stub that's about
    /// to be configured
    StubDeclaration,
    /// Verify that calls like this one were received
    CheckReceived {
        match_args: MatchArgs,
        quantity: Quantity
    },
    /// Invoke the handlers subscribed to an event
    RaiseEvent,
}

/// Assembles routes.
pub struct Router;

impl Router {
    /// Build the chain of handlers for `kind`.
    pub fn route_for(kind: &RouteKind, config: &Config) -> Route {
        let handlers: Vec<Box<dyn CallHandler>> = match kind {
            RouteKind::Invocation => {
                let mut v: Vec<Box<dyn CallHandler>> = vec![
                    Box::new(RecordCallHandler),
                    Box::new(EventSubscriptionHandler),
                ];
                if config.auto_property_values {
                    v.push(Box::new(PropertySetterHandler));
                }
                v.push(Box::new(ReturnConfiguredResultHandler));
                if config.call_base {
                    v.push(Box::new(CallBaseHandler));
                }
                v.push(Box::new(ReturnDefaultHandler));
                v
            },
            RouteKind::QueryResult => vec![
                Box::new(PeekConfiguredResultHandler),
                Box::new(ReturnDefaultHandler),
            ],
            RouteKind::StubDeclaration => vec![
                Box::new(ReturnDefaultIfAnyHandler),
            ],
            RouteKind::CheckReceived{match_args, quantity} => vec![
                Box::new(CheckReceivedHandler::new(*match_args,
                                                   quantity.clone())),
                Box::new(ReturnDefaultIfAnyHandler),
            ],
            RouteKind::RaiseEvent => vec![
                Box::new(RaiseEventHandler),
                Box::new(ReturnDefaultIfAnyHandler),
            ],
        };
        Route::new(handlers)
    }

    /// Route `call` as `kind` on behalf of the substitute owning `state`.
    pub fn route(kind: &RouteKind, call: &Rc<Call>, state: &SubstituteState)
        -> Result<Outcome>
    {
        trace!(substitute = %state.config().name, call = %call, route = ?kind,
               "routing call");
        Self::route_for(kind, state.config()).handle(call, state)
    }
}
