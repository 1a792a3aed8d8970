//! `SeaORM` entities for the clinic directory.

pub mod prelude;

pub mod appointments;
pub mod doctors;
pub mod patients;
