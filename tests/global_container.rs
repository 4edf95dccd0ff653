//! Integration tests for the default global container.
//!
//! NOTE: All tests use #[serial] because they share the global container.
//! Each test starts with `reset()` so cached instances never leak between tests.

mod common;

use common::{
    Counted, GroupService, PersonService, COUNTED_BUILDS, GROUP_BUILDS, PERSON_BUILDS,
};
use serial_test::serial;
use singleton_inject::{
    inject, is_cached, is_registered, provide, reset, resolve, Arguments, ExplicitArguments,
    InjectError, Injectable, Signature, Singleton,
};
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[test]
#[serial]
fn test_singleton_identity() {
    reset();

    let first: Arc<PersonService> = resolve().unwrap();
    let second: Arc<PersonService> = resolve().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.person_name(), "John Doe");
}

#[test]
#[serial]
fn test_group_service_scenario() {
    reset();
    PERSON_BUILDS.store(0, Ordering::SeqCst);
    GROUP_BUILDS.store(0, Ordering::SeqCst);

    let group = GroupService::instance().unwrap();
    assert_eq!(group.group_with_person(), "Group with John Doe");

    let another = GroupService::instance().unwrap();
    assert!(Arc::ptr_eq(&group, &another));

    let person = PersonService::instance().unwrap();
    assert!(Arc::ptr_eq(&person, &group.person_service));
    assert_eq!(
        (
            PERSON_BUILDS.load(Ordering::SeqCst),
            GROUP_BUILDS.load(Ordering::SeqCst)
        ),
        (1, 1)
    );
}

#[test]
#[serial]
fn test_reset_clears_instances() {
    reset();
    COUNTED_BUILDS.store(0, Ordering::SeqCst);

    let before = Counted::instance().unwrap();
    assert_eq!(before.serial, 1);

    reset();
    assert!(!is_cached::<Counted>());
    assert!(is_registered::<Counted>());

    let after = Counted::instance().unwrap();
    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(after.serial, 2);
    assert_eq!(COUNTED_BUILDS.load(Ordering::SeqCst), 2);
}

#[test]
#[serial]
fn test_dependency_wiring_matches_direct_resolution() {
    reset();

    let person: Arc<PersonService> = resolve().unwrap();
    let group: Arc<GroupService> = resolve().unwrap();
    assert!(Arc::ptr_eq(&person, &group.person_service));
}

#[test]
#[serial]
fn test_inject_registers_without_constructing() {
    reset();
    COUNTED_BUILDS.store(0, Ordering::SeqCst);

    inject::<Counted>();
    inject::<Counted>();
    assert!(is_registered::<Counted>());
    assert!(!is_cached::<Counted>());
    assert_eq!(COUNTED_BUILDS.load(Ordering::SeqCst), 0);
}

#[test]
#[serial]
fn test_explicit_override_becomes_singleton() {
    reset();

    let custom = Arc::new(PersonService {
        name: "Jane Roe".to_string(),
    });
    let group = GroupService::instance_with(
        ExplicitArguments::new().named_arc("person_service", custom.clone()),
    )
    .unwrap();
    assert!(Arc::ptr_eq(&group.person_service, &custom));

    let again = GroupService::instance().unwrap();
    assert!(Arc::ptr_eq(&group, &again));

    // the override was for this call only; PersonService was never resolved
    assert!(!is_cached::<PersonService>());
}

#[test]
#[serial]
fn test_multiple_dependencies() {
    struct DependencyA {
        value: &'static str,
    }
    struct DependencyB {
        value: &'static str,
    }
    struct Service {
        a: Arc<DependencyA>,
        b: Arc<DependencyB>,
    }

    impl Injectable for DependencyA {
        fn construct(_: &Arguments) -> Result<Self, InjectError> {
            Ok(DependencyA { value: "A" })
        }
    }

    impl Injectable for DependencyB {
        fn construct(_: &Arguments) -> Result<Self, InjectError> {
            Ok(DependencyB { value: "B" })
        }
    }

    impl Injectable for Service {
        fn signature() -> Signature {
            Signature::new()
                .dependency::<DependencyA>("dependency_a")
                .dependency::<DependencyB>("dependency_b")
        }

        fn construct(args: &Arguments) -> Result<Self, InjectError> {
            Ok(Service {
                a: args.get("dependency_a")?,
                b: args.get("dependency_b")?,
            })
        }
    }

    reset();

    let service = Service::instance().unwrap();
    assert_eq!(service.a.value, "A");
    assert_eq!(service.b.value, "B");
    assert!(is_registered::<DependencyA>());
    assert!(is_registered::<DependencyB>());
}

#[test]
#[serial]
fn test_provide_replaces_dependency_for_tests() {
    reset();

    provide(PersonService {
        name: "Mock Person".to_string(),
    });

    let group = GroupService::instance().unwrap();
    assert_eq!(group.group_with_person(), "Group with Mock Person");

    reset();
    let group = GroupService::instance().unwrap();
    assert_eq!(group.group_with_person(), "Group with John Doe");
}
