pub mod grouping;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;

mod errors;

pub use errors::RegistrationError;
pub use grouping::{group, ParticipantUnit, TeamKey};
pub use handlers::{delete_registration, list_registrations, register, update_registration};
pub use models::{NewRecord, Prize, RecordUpdate, RegistrationRecord};
pub use repository::{
    InMemoryRegistrationRepository, PostgresRegistrationRepository, RegistrationRepository,
};
pub use service::{RegistrationService, MAX_REGISTRATIONS_PER_PHONE};
