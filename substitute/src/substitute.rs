// vim: tw=80
use std::{
    cell::RefCell,
    rc::Rc
};
use tracing::debug;

use crate::{
    Call,
    Config,
    MatchArgs,
    MemberId,
    Outcome,
    Quantity,
    ReceivedCallNotFoundThrower,
    Result,
    ResultSetter,
    ReturnType,
    ReturnValue,
    RouteKind,
    Router,
    SubstituteState,
    Value,
    route::check_received
};

/// The state and behaviour behind one substitute object.
///
/// The interception boundary turns every invocation of the substituted
/// object into a [`Call`] and passes it to [`invoke`](#method.invoke).  Test
/// code uses the other methods to configure results and to verify calls.
pub struct Substitute {
    state: SubstituteState,
    next_route: RefCell<Option<RouteKind>>,
    result_setter: ResultSetter,
}

impl Substitute {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Substitute {
            state: SubstituteState::new(config),
            next_route: RefCell::new(None),
            result_setter: ResultSetter::new()
        }
    }

    /// Report failed verifications with `thrower` instead of the
    /// [`DescribingThrower`](crate::DescribingThrower).
    pub fn with_thrower<T>(mut self, thrower: T) -> Self
        where T: ReceivedCallNotFoundThrower + 'static
    {
        self.state.set_thrower(Box::new(thrower));
        self
    }

    pub fn state(&self) -> &SubstituteState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        self.state.config()
    }

    /// Handle an intercepted call.
    ///
    /// The call becomes "the last call", available to
    /// [`returns`](#method.returns).  Normally it is then recorded and
    /// answered from the configured results, but a preceding call to
    /// [`configure`](#method.configure), [`received`](#method.received) or
    /// similar selects a different route for this one call.
    pub fn invoke(&self, call: Call) -> Result<Outcome> {
        let call = Rc::new(call);
        self.state.call_stack().borrow_mut().push(call.clone());
        let kind = self.next_route.borrow_mut().take()
            .unwrap_or(RouteKind::Invocation);
        Router::route(&kind, &call, &self.state)
    }

    /// What [`invoke`](#method.invoke) would return for `call`, without
    /// recording it or making it the last call.
    pub fn query(&self, call: Call) -> Result<Outcome> {
        Router::route(&RouteKind::QueryResult, &Rc::new(call), &self.state)
    }

    fn set_next_route(&self, kind: RouteKind) -> &Self {
        *self.next_route.borrow_mut() = Some(kind);
        self
    }

    /// The next call only declares what is about to be configured.  It is
    /// neither recorded nor answered from configured results.
    pub fn configure(&self) -> &Self {
        self.set_next_route(RouteKind::StubDeclaration)
    }

    /// The next call will verify that a matching call was received at least
    /// once, rather than being a call itself.
    pub fn received(&self, match_args: MatchArgs) -> &Self {
        self.received_times(Quantity::at_least_once(), match_args)
    }

    /// Like [`received`](#method.received), but for a specific number of
    /// calls.
    pub fn received_times(&self, quantity: Quantity, match_args: MatchArgs)
        -> &Self
    {
        self.set_next_route(RouteKind::CheckReceived{match_args, quantity})
    }

    /// The next call will verify that no matching call was received.
    pub fn did_not_receive(&self, match_args: MatchArgs) -> &Self {
        self.received_times(Quantity::none(), match_args)
    }

    /// Verify directly that calls like `call` were received `quantity` times,
    /// returning the matching calls.
    pub fn check_received(&self,
                          call: &Call,
                          match_args: MatchArgs,
                          quantity: &Quantity) -> Result<Vec<Rc<Call>>>
    {
        check_received(&self.state, call, match_args, quantity)
    }

    /// Configure the result of the last call.
    pub fn returns(&self, result: ReturnValue, match_args: MatchArgs)
        -> Result<()>
    {
        self.result_setter
            .set_result_for_last_call(&self.state, result, match_args)
    }

    /// Make calls with the same arguments as the last one return `v`.
    pub fn returns_value<T: Value>(&self, v: T) -> Result<()> {
        self.returns(ReturnValue::value(v), MatchArgs::AsSpecifiedInCall)
    }

    /// Make every call to the last call's member return `v`, regardless of
    /// arguments.
    pub fn returns_value_for_any_args<T: Value>(&self, v: T) -> Result<()> {
        self.returns(ReturnValue::value(v), MatchArgs::Any)
    }

    /// Every call ever received, oldest first.  Includes calls that were
    /// later used to configure results.
    pub fn received_calls(&self) -> Vec<Rc<Call>> {
        self.state.received_calls().borrow().all()
    }

    /// Forget all received calls.  Configured results are unaffected.
    pub fn clear_received_calls(&self) {
        debug!(substitute = %self.config().name, "clearing received calls");
        self.state.received_calls().borrow_mut().clear();
    }

    /// Invoke every handler currently subscribed to `event` with `args`.
    pub fn raise<S>(&self, event: S, args: Vec<Box<dyn Value>>) -> Result<()>
        where S: Into<std::borrow::Cow<'static, str>>
    {
        let call = args.into_iter()
            .fold(Call::new(MemberId::event(event), ReturnType::unit()),
                  Call::boxed_arg);
        Router::route(&RouteKind::RaiseEvent, &Rc::new(call), &self.state)
            .map(drop)
    }
}

impl Default for Substitute {
    fn default() -> Self {
        Self::new()
    }
}
