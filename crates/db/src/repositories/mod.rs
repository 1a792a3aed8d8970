//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod appointment;
pub mod doctor;
mod error;
pub mod patient;
pub mod photo;

pub use appointment::{AppointmentRepository, CreateAppointmentInput};
pub use doctor::{CreateDoctorInput, DoctorRepository};
pub use error::RepositoryError;
pub use patient::{CreatePatientInput, PatientRepository};
pub use photo::EntityPhotoRepository;
