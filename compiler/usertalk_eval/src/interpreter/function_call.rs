//! Function call evaluation methods for the Interpreter.

use usertalk_ir::{Argument, FunctionNode, Name, Positioned, TextPosition};
use usertalk_values::{
    call_budget_exceeded, misplaced_control, ControlAction, EvalResult, LangError, Value,
};
use usertalk_verbs::VerbParams;

use super::Interpreter;
use crate::diagnostics::CallFrame;
use crate::exec::call::{
    bind_arguments, bind_parameters_with_defaults, EvaluatedArg, EvaluatedArgs,
};
use crate::{LocalScope, Scope};

impl Interpreter {
    /// Evaluate a call by bare name.
    ///
    /// A user function visible from the current scope wins; otherwise the
    /// name goes to verb dispatch.
    pub(super) fn eval_call(
        &mut self,
        callee: &Name,
        args: &[Argument],
        position: TextPosition,
    ) -> EvalResult {
        match self.env.lookup_function(callee) {
            Some((function, defining)) => {
                self.eval_function_call(&function, defining, args, position)
            }
            None => self.eval_verb_call(callee, args, position),
        }
    }

    /// Evaluate argument expressions left to right.
    fn eval_arguments(&mut self, args: &[Argument]) -> Result<EvaluatedArgs, ControlAction> {
        let mut evaluated = EvaluatedArgs::with_capacity(args.len());
        for arg in args {
            evaluated.push(EvaluatedArg {
                name: arg.name.clone(),
                value: self.eval(&arg.value)?,
                position: arg.value.position(),
            });
        }
        Ok(evaluated)
    }

    /// Activate a user function.
    ///
    /// Arguments are evaluated and bound (defaults in the caller's scope)
    /// before the frame is pushed, so an arity error never enters the body.
    #[tracing::instrument(level = "debug", skip_all, fields(function = %function.name()))]
    fn eval_function_call(
        &mut self,
        function: &FunctionNode,
        defining: LocalScope<Scope>,
        args: &[Argument],
        call_position: TextPosition,
    ) -> EvalResult {
        let evaluated = self.eval_arguments(args)?;
        let slots = bind_arguments(function, evaluated)
            .map_err(|err| err.with_position_if_missing(call_position))?;
        let values = bind_parameters_with_defaults(self, function, slots)?;

        if let Err(exceeded) = self.mode_state.check_budget() {
            return Err(call_budget_exceeded(exceeded.budget)
                .with_position(call_position)
                .into());
        }
        self.call_stack
            .push(CallFrame {
                name: function.name().clone(),
                call_position,
            })
            .map_err(|err| err.with_position(call_position))?;

        let result = self.run_activation(function, defining, values, call_position);
        let result = result.map_err(|err| self.call_stack.attach_backtrace(err));
        self.call_stack.pop();
        result.map_err(ControlAction::from)
    }

    /// Run the body in a fresh activation scope rooted at the defining scope.
    fn run_activation(
        &mut self,
        function: &FunctionNode,
        defining: LocalScope<Scope>,
        values: Vec<Value>,
        call_position: TextPosition,
    ) -> Result<Value, LangError> {
        let env = self.env.activation(defining);
        let mut activation = self.activation(env);
        for (param, value) in function.params().iter().zip(values) {
            activation.env.define_local(param.name().clone(), value);
        }
        match activation.eval_block_statements(function.body()) {
            Ok(value) | Err(ControlAction::Return(value)) => Ok(value),
            Err(ControlAction::Error(err)) => Err(*err),
            Err(ControlAction::Break) => {
                Err(misplaced_control("break").with_position(call_position))
            }
            Err(ControlAction::Continue) => {
                Err(misplaced_control("continue").with_position(call_position))
            }
        }
    }

    /// Dispatch a verb through the registry.
    ///
    /// The registry's error passes through; it gets the call's position when
    /// the table attached none.
    pub(super) fn eval_verb_call(
        &mut self,
        verb: &Name,
        args: &[Argument],
        position: TextPosition,
    ) -> EvalResult {
        let mut params = VerbParams::new(verb.as_str());
        for arg in self.eval_arguments(args)? {
            match arg.name {
                Some(name) => params.push_named(name, arg.value, arg.position),
                None => params.push_positional(arg.value, arg.position),
            }
        }
        self.registry
            .dispatch(verb.as_str(), params, self.delegate.as_ref())
            .map_err(|err| err.with_position_if_missing(position).into())
    }
}
