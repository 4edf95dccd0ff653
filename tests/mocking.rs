//! Integration tests for swapping trait-object collaborators.
//!
//! A service that depends on `Arc<dyn Trait>` declares it as a leaf; tests
//! hand in a mock through a named explicit argument.

use singleton_inject::{
    define_container, Arguments, ExplicitArguments, InjectError, Injectable, Signature,
};
use std::sync::Arc;

trait Database: Send + Sync {
    fn get_user(&self, id: u32) -> String;
}

struct PostgresDatabase;

impl Database for PostgresDatabase {
    fn get_user(&self, id: u32) -> String {
        format!("User {id}")
    }
}

struct MockDatabase;

impl Database for MockDatabase {
    fn get_user(&self, _id: u32) -> String {
        "Mock User".to_string()
    }
}

struct UserService {
    database: Arc<dyn Database>,
}

impl UserService {
    fn user_name(&self, id: u32) -> String {
        self.database.get_user(id)
    }
}

impl Injectable for UserService {
    fn signature() -> Signature {
        Signature::new().leaf::<Arc<dyn Database>>("database")
    }

    fn construct(args: &Arguments) -> Result<Self, InjectError> {
        Ok(UserService {
            database: args.get_cloned::<Arc<dyn Database>>("database")?,
        })
    }
}

/// Same service shape, but falling back to the real database.
struct ReportService {
    database: Arc<dyn Database>,
}

impl Injectable for ReportService {
    fn signature() -> Signature {
        Signature::new().leaf_or::<Arc<dyn Database>>("database", || {
            Arc::new(PostgresDatabase) as Arc<dyn Database>
        })
    }

    fn construct(args: &Arguments) -> Result<Self, InjectError> {
        Ok(ReportService {
            database: args.get_cloned::<Arc<dyn Database>>("database")?,
        })
    }
}

#[test]
fn test_mock_database_through_named_argument() {
    define_container!(mocked);

    let mock = Arc::new(MockDatabase) as Arc<dyn Database>;
    let service: Arc<UserService> =
        mocked::resolve_with(ExplicitArguments::new().named("database", mock)).unwrap();

    assert_eq!(service.user_name(1), "Mock User");

    // the mocked instance is now the singleton
    let again: Arc<UserService> = mocked::resolve().unwrap();
    assert!(Arc::ptr_eq(&service, &again));
}

#[test]
fn test_trait_object_without_argument_is_missing() {
    define_container!(unmocked);

    let result = unmocked::resolve::<UserService>();
    assert!(matches!(
        result,
        Err(InjectError::MissingDependency { parameter: "database", .. })
    ));
    assert!(!unmocked::is_cached::<UserService>());
}

#[test]
fn test_mock_replaces_default_collaborator() {
    define_container!(reports);

    let real: Arc<ReportService> = reports::resolve().unwrap();
    assert_eq!(real.database.get_user(7), "User 7");

    let mock = Arc::new(MockDatabase) as Arc<dyn Database>;
    let mocked: Arc<ReportService> =
        reports::resolve_with(ExplicitArguments::new().named("database", mock)).unwrap();
    assert_eq!(mocked.database.get_user(7), "Mock User");
    assert!(!Arc::ptr_eq(&real, &mocked));

    reports::reset();
    let restored: Arc<ReportService> = reports::resolve().unwrap();
    assert_eq!(restored.database.get_user(7), "User 7");
}

#[test]
fn test_provide_swaps_whole_service() {
    define_container!(provided);

    provided::provide(UserService {
        database: Arc::new(MockDatabase),
    });

    let service: Arc<UserService> = provided::resolve().unwrap();
    assert_eq!(service.user_name(3), "Mock User");
}
