pub mod config;
pub mod domain;
pub mod errors;
pub mod schema;

pub use domain::activity::{Activity, ActivityType};
pub use domain::company::Company;
pub use domain::contact::{Contact, ContactStatus};
pub use domain::deal::{Deal, DealStage};
pub use domain::product::Product;
pub use domain::user::User;
pub use errors::{ApplicationError, InterfaceError};
pub use schema::{Entity, EntitySchema, FieldViolation, ValidationError, ViolationKind};
