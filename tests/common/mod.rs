//! Injectable fixtures shared by the integration tests.

#![allow(dead_code)]

use singleton_inject::{Arguments, InjectError, Injectable, Signature};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub static PERSON_BUILDS: AtomicUsize = AtomicUsize::new(0);
pub static GROUP_BUILDS: AtomicUsize = AtomicUsize::new(0);

pub struct PersonService {
    pub name: String,
}

impl PersonService {
    pub fn person_name(&self) -> &str {
        &self.name
    }
}

impl Injectable for PersonService {
    fn construct(_: &Arguments) -> Result<Self, InjectError> {
        PERSON_BUILDS.fetch_add(1, Ordering::SeqCst);
        Ok(PersonService {
            name: "John Doe".to_string(),
        })
    }
}

pub struct GroupService {
    pub person_service: Arc<PersonService>,
}

impl GroupService {
    pub fn group_with_person(&self) -> String {
        format!("Group with {}", self.person_service.person_name())
    }
}

impl Injectable for GroupService {
    fn signature() -> Signature {
        Signature::new().dependency::<PersonService>("person_service")
    }

    fn construct(args: &Arguments) -> Result<Self, InjectError> {
        GROUP_BUILDS.fetch_add(1, Ordering::SeqCst);
        Ok(GroupService {
            person_service: args.get("person_service")?,
        })
    }
}

/// Counts how often its constructor runs.
pub struct Counted {
    pub serial: usize,
}

pub static COUNTED_BUILDS: AtomicUsize = AtomicUsize::new(0);

impl Injectable for Counted {
    fn construct(_: &Arguments) -> Result<Self, InjectError> {
        let serial = COUNTED_BUILDS.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Counted { serial })
    }
}
