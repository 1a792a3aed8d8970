//! Entity re-exports.

pub use super::appointments::Entity as Appointments;
pub use super::doctors::Entity as Doctors;
pub use super::patients::Entity as Patients;
