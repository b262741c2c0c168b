//! Evaluation modes for the UserTalk interpreter.
//!
//! An `EvalMode` fixes the resource policy of one interpreter: how deep user
//! functions may recurse and how many activations a script may perform in
//! total. Exceeding either limit is a `ResourceExhausted` error, never a
//! crash.

use tracing::warn;

/// Activation depth allowed when nothing else is configured.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Environment variable overriding the default depth limit.
pub const MAX_DEPTH_VAR: &str = "USERTALK_MAX_DEPTH";

/// Evaluation mode, determining resource limits via policy methods.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvalMode {
    /// Standard mode: `DEFAULT_MAX_DEPTH` activations, unlimited calls.
    #[default]
    Interpret,
    /// Explicit limits, for hosts running untrusted or test scripts.
    Bounded {
        /// Maximum number of nested activations.
        max_depth: usize,
        /// Maximum number of activations over the whole evaluation.
        call_budget: Option<usize>,
    },
}

impl EvalMode {
    /// `Interpret`, unless `USERTALK_MAX_DEPTH` holds a depth limit.
    pub fn from_env() -> Self {
        Self::from_max_depth_var(std::env::var(MAX_DEPTH_VAR).ok().as_deref())
    }

    fn from_max_depth_var(value: Option<&str>) -> Self {
        let Some(raw) = value else {
            return Self::Interpret;
        };
        match raw.trim().parse::<usize>() {
            Ok(max_depth) if max_depth > 0 => Self::Bounded {
                max_depth,
                call_budget: None,
            },
            _ => {
                warn!(
                    var = MAX_DEPTH_VAR,
                    value = raw,
                    "ignoring malformed depth limit"
                );
                Self::Interpret
            }
        }
    }

    /// Maximum number of nested activations.
    #[inline]
    pub fn max_recursion_depth(&self) -> usize {
        match self {
            Self::Interpret => DEFAULT_MAX_DEPTH,
            Self::Bounded { max_depth, .. } => *max_depth,
        }
    }

    /// Total activation budget, or `None` for unlimited.
    #[inline]
    pub fn call_budget(&self) -> Option<usize> {
        match self {
            Self::Interpret => None,
            Self::Bounded { call_budget, .. } => *call_budget,
        }
    }
}

/// Per-mode mutable state stored alongside `EvalMode`.
#[derive(Debug)]
pub struct ModeState {
    /// Activations performed so far.
    pub call_count: usize,
    budget: Option<usize>,
}

impl ModeState {
    pub fn new(mode: &EvalMode) -> Self {
        Self {
            call_count: 0,
            budget: mode.call_budget(),
        }
    }

    /// Count one activation against the budget.
    ///
    /// Always `Ok` when the mode has no budget.
    #[inline]
    pub fn check_budget(&mut self) -> Result<(), BudgetExceeded> {
        self.call_count = self.call_count.saturating_add(1);
        if let Some(budget) = self.budget {
            if self.call_count > budget {
                return Err(BudgetExceeded {
                    budget,
                    calls: self.call_count,
                });
            }
        }
        Ok(())
    }
}

/// Returned when the call budget is exceeded.
#[derive(Debug)]
pub struct BudgetExceeded {
    /// The configured budget limit.
    pub budget: usize,
    /// The number of calls made.
    pub calls: usize,
}

#[cfg(test)]
mod tests;
