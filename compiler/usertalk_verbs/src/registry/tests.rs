#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::any::Any;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use usertalk_values::{host_error, LangErrorKind, Value};

use super::*;
use crate::{NullDelegate, SharedVerbRegistry};

/// Answers every verb in its namespace with a fixed value.
struct ConstantVerbs {
    namespace: &'static str,
    answer: i64,
}

impl VerbTable for ConstantVerbs {
    fn namespace(&self) -> &str {
        self.namespace
    }

    fn verbs(&self) -> &[&str] {
        &["answer"]
    }

    fn evaluate(
        &self,
        verb: &str,
        _params: VerbParams,
        _delegate: &dyn VerbAppDelegate,
    ) -> Result<Value, LangError> {
        if verb == "answer" {
            Ok(Value::int(self.answer))
        } else {
            Err(verb_not_found(&format!("{}.{verb}", self.namespace)))
        }
    }
}

/// Fails through the host pass-through variant.
struct FailingVerbs;

impl VerbTable for FailingVerbs {
    fn namespace(&self) -> &str {
        "disk"
    }

    fn verbs(&self) -> &[&str] {
        &["eject"]
    }

    fn evaluate(
        &self,
        _verb: &str,
        params: VerbParams,
        _delegate: &dyn VerbAppDelegate,
    ) -> Result<Value, LangError> {
        params.expect_count(0, 0)?;
        Err(host_error("no disk in drive"))
    }
}

/// Replaces itself in the registry while it runs.
struct SelfReplacingVerbs {
    registry: SharedVerbRegistry,
}

impl VerbTable for SelfReplacingVerbs {
    fn namespace(&self) -> &str {
        "config"
    }

    fn verbs(&self) -> &[&str] {
        &["answer"]
    }

    fn evaluate(
        &self,
        _verb: &str,
        _params: VerbParams,
        _delegate: &dyn VerbAppDelegate,
    ) -> Result<Value, LangError> {
        self.registry.register(Arc::new(ConstantVerbs {
            namespace: "config",
            answer: 2,
        }));
        Ok(Value::int(1))
    }
}

fn no_params(verb: &str) -> VerbParams {
    VerbParams::new(verb)
}

#[test]
fn getpicture_is_recognized_but_not_found() {
    let registry = VerbRegistry::with_builtin_tables();
    let err = registry
        .dispatch("pict.getpicture", no_params("pict.getpicture"), &NullDelegate)
        .unwrap_err();
    assert_eq!(
        err.kind(),
        &LangErrorKind::VerbNotFound {
            verb: "pict.getpicture".to_string(),
            recognized: true
        }
    );
}

#[test]
fn every_pict_verb_fails_and_none_returns_a_value() {
    let registry = VerbRegistry::with_builtin_tables();
    for verb in ["scheduleUpdate", "EXPRESSION", "setpicture", "getPicture"] {
        let name = format!("pict.{verb}");
        let result = registry.dispatch(&name, no_params(&name), &NullDelegate);
        assert_eq!(
            result.unwrap_err().kind().variant_name(),
            "VerbNotFound",
            "{name}"
        );
    }
}

#[test]
fn unknown_pict_verb_is_not_recognized() {
    let registry = VerbRegistry::with_builtin_tables();
    let err = registry
        .dispatch("pict.rotate", no_params("pict.rotate"), &NullDelegate)
        .unwrap_err();
    assert_eq!(
        err.kind(),
        &LangErrorKind::VerbNotFound {
            verb: "pict.rotate".to_string(),
            recognized: false
        }
    );
}

#[test]
fn unregistered_namespace_is_verb_not_found() {
    let registry = VerbRegistry::with_builtin_tables();
    for name in ["clock.now", "getpicture", "a.b.c"] {
        let err = registry
            .dispatch(name, no_params(name), &NullDelegate)
            .unwrap_err();
        assert_eq!(
            err.kind(),
            &LangErrorKind::VerbNotFound {
                verb: name.to_string(),
                recognized: false
            }
        );
    }
}

#[test]
fn namespace_lookup_ignores_case() {
    let mut registry = VerbRegistry::new();
    registry.register(Arc::new(ConstantVerbs {
        namespace: "Math",
        answer: 42,
    }));
    let value = registry
        .dispatch("MATH.Answer", no_params("MATH.Answer"), &NullDelegate)
        .unwrap();
    assert_eq!(value, Value::int(42));
    assert_eq!(registry.namespaces(), vec!["math"]);
}

#[test]
fn namespace_lookup_folds_titlecase_and_sigma() {
    let mut registry = VerbRegistry::new();
    registry.register(Arc::new(ConstantVerbs {
        namespace: "ǅungla",
        answer: 1,
    }));
    registry.register(Arc::new(ConstantVerbs {
        namespace: "ΟΔΟΣ",
        answer: 2,
    }));
    for (name, answer) in [
        ("ǆungla.answer", 1),
        ("ǄUNGLA.Answer", 1),
        ("οδοσ.answer", 2),
        ("ΟΔΟΣ.ANSWER", 2),
    ] {
        let value = registry
            .dispatch(name, no_params(name), &NullDelegate)
            .unwrap();
        assert_eq!(value, Value::int(answer), "{name}");
    }
    assert!(registry.table("ǅUNGLA").is_some());
    assert!(registry.unregister("οδοσ").is_some());
    assert_eq!(registry.namespaces(), vec!["ǆungla"]);
}

#[test]
fn table_errors_pass_through_unchanged() {
    let mut registry = VerbRegistry::new();
    registry.register(Arc::new(FailingVerbs));

    let err = registry
        .dispatch("disk.eject", no_params("disk.eject"), &NullDelegate)
        .unwrap_err();
    assert_eq!(
        err.kind(),
        &LangErrorKind::Host {
            message: "no disk in drive".to_string()
        }
    );

    let params = VerbParams::from_values("disk.eject", [Value::int(1)]);
    let err = registry
        .dispatch("disk.eject", params, &NullDelegate)
        .unwrap_err();
    assert_eq!(err.kind().variant_name(), "ArgumentCountMismatch");
}

#[test]
fn re_registration_replaces_later_dispatch() {
    let mut registry = VerbRegistry::new();
    assert!(registry
        .register(Arc::new(ConstantVerbs {
            namespace: "pict",
            answer: 7,
        }))
        .is_none());
    assert_eq!(
        registry
            .dispatch("pict.answer", no_params("pict.answer"), &NullDelegate)
            .unwrap(),
        Value::int(7)
    );

    // The stub shadows the fuller table registered before it.
    let replaced = registry.register(Arc::new(PictVerbs));
    assert!(replaced.is_some());
    assert_eq!(registry.len(), 1);
    let err = registry
        .dispatch("pict.answer", no_params("pict.answer"), &NullDelegate)
        .unwrap_err();
    assert_eq!(err.kind().variant_name(), "VerbNotFound");
}

#[test]
fn replacement_does_not_affect_call_in_flight() {
    let shared = SharedVerbRegistry::new(VerbRegistry::new());
    shared.register(Arc::new(SelfReplacingVerbs {
        registry: shared.clone(),
    }));

    let first = shared
        .dispatch("config.answer", no_params("config.answer"), &NullDelegate)
        .unwrap();
    assert_eq!(first, Value::int(1));

    let second = shared
        .dispatch("config.answer", no_params("config.answer"), &NullDelegate)
        .unwrap();
    assert_eq!(second, Value::int(2));
}

#[test]
fn concurrent_dispatch_sees_whole_tables() {
    let shared = SharedVerbRegistry::new(VerbRegistry::new());
    shared.register(Arc::new(ConstantVerbs {
        namespace: "math",
        answer: 1,
    }));

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let shared = shared.clone();
            scope.spawn(move || {
                for _ in 0..200 {
                    let value = shared
                        .dispatch("math.answer", no_params("math.answer"), &NullDelegate)
                        .unwrap();
                    assert!(value == Value::int(1) || value == Value::int(2));
                }
            });
        }
        scope.spawn(|| {
            for _ in 0..50 {
                shared.register(Arc::new(ConstantVerbs {
                    namespace: "math",
                    answer: 2,
                }));
            }
        });
    });

    assert_eq!(shared.read().len(), 1);
}

#[test]
fn delegate_is_passed_through() {
    struct Host;
    impl VerbAppDelegate for Host {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn host_name(&self) -> &str {
            "test-host"
        }
    }

    struct HostNameVerbs;
    impl VerbTable for HostNameVerbs {
        fn namespace(&self) -> &str {
            "app"
        }
        fn verbs(&self) -> &[&str] {
            &["name"]
        }
        fn evaluate(
            &self,
            _verb: &str,
            _params: VerbParams,
            delegate: &dyn VerbAppDelegate,
        ) -> Result<Value, LangError> {
            assert!(delegate.as_any().is::<Host>());
            Ok(Value::string(delegate.host_name()))
        }
    }

    let mut registry = VerbRegistry::new();
    registry.register(Arc::new(HostNameVerbs));
    let value = registry
        .dispatch("app.name", no_params("app.name"), &Host)
        .unwrap();
    assert_eq!(value, Value::string("test-host"));
}
