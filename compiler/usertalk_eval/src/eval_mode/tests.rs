#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn interpret_is_default() {
    let mode = EvalMode::default();
    assert_eq!(mode, EvalMode::Interpret);
    assert_eq!(mode.max_recursion_depth(), DEFAULT_MAX_DEPTH);
    assert_eq!(mode.call_budget(), None);
}

#[test]
fn bounded_limits() {
    let mode = EvalMode::Bounded {
        max_depth: 16,
        call_budget: Some(100),
    };
    assert_eq!(mode.max_recursion_depth(), 16);
    assert_eq!(mode.call_budget(), Some(100));
}

#[test]
fn max_depth_var_parsing() {
    assert_eq!(EvalMode::from_max_depth_var(None), EvalMode::Interpret);
    assert_eq!(
        EvalMode::from_max_depth_var(Some(" 64 ")),
        EvalMode::Bounded {
            max_depth: 64,
            call_budget: None
        }
    );
    assert_eq!(
        EvalMode::from_max_depth_var(Some("deep")),
        EvalMode::Interpret
    );
    assert_eq!(EvalMode::from_max_depth_var(Some("0")), EvalMode::Interpret);
    assert_eq!(EvalMode::from_max_depth_var(Some("-3")), EvalMode::Interpret);
}

#[test]
fn budget_counts_every_call() {
    let mut state = ModeState::new(&EvalMode::Bounded {
        max_depth: 8,
        call_budget: Some(2),
    });
    assert!(state.check_budget().is_ok());
    assert!(state.check_budget().is_ok());
    let err = state.check_budget().unwrap_err();
    assert_eq!(err.budget, 2);
    assert_eq!(err.calls, 3);
}

#[test]
fn no_budget_never_fails() {
    let mut state = ModeState::new(&EvalMode::Interpret);
    for _ in 0..10_000 {
        assert!(state.check_budget().is_ok());
    }
    assert_eq!(state.call_count, 10_000);
}
