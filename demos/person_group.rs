//! Person/group example for singleton-inject.
//!
//! Demonstrates:
//! - Declaring injectable types and their dependencies
//! - Transparent singleton construction on first use
//! - Explicit arguments and `reset` for tests
//!
//! Run with: `RUST_LOG=singleton_inject=debug cargo run --example person_group`

use singleton_inject::{
    reset, Arguments, ExplicitArguments, InjectError, Injectable, Signature, Singleton,
};
use std::sync::Arc;

struct PersonService;

impl PersonService {
    fn person_name(&self) -> &'static str {
        "John Doe"
    }
}

impl Injectable for PersonService {
    fn construct(_: &Arguments) -> Result<Self, InjectError> {
        println!("PersonService initialized");
        Ok(PersonService)
    }
}

struct GroupService {
    person_service: Arc<PersonService>,
    title: String,
}

impl GroupService {
    fn group_with_person(&self) -> String {
        format!("{} with {}", self.title, self.person_service.person_name())
    }
}

impl Injectable for GroupService {
    const NAME: Option<&'static str> = Some("GroupService");

    fn signature() -> Signature {
        Signature::new()
            .dependency::<PersonService>("person_service")
            .leaf_or::<String>("title", || "Group".to_string())
    }

    fn construct(args: &Arguments) -> Result<Self, InjectError> {
        let service = GroupService {
            person_service: args.get("person_service")?,
            title: args.get_cloned("title")?,
        };
        println!("GroupService initialized");
        Ok(service)
    }
}

fn main() -> Result<(), InjectError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== singleton-inject: Person & Group ===\n");

    // PersonService is constructed on demand as a dependency
    let group_service = GroupService::instance()?;
    println!("{}", group_service.group_with_person());

    let another_group_service = GroupService::instance()?;
    println!(
        "Same instance: {}",
        Arc::ptr_eq(&group_service, &another_group_service)
    );

    let person_service = PersonService::instance()?;
    println!(
        "Same person service: {}",
        Arc::ptr_eq(&person_service, &group_service.person_service)
    );

    // Explicit arguments construct a fresh singleton for this call
    let team =
        GroupService::instance_with(ExplicitArguments::new().named("title", "Team".to_string()))?;
    println!("{}", team.group_with_person());

    reset();
    let rebuilt = GroupService::instance()?;
    println!(
        "Rebuilt after reset: {}",
        !Arc::ptr_eq(&rebuilt, &group_service)
    );

    Ok(())
}
