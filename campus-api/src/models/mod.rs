//! Record shapes and the value types shared by every layer
//!
//! All fourteen shapes implement [`Entity`]; the rest of the crate is written
//! once against that trait.

pub mod entity;
pub mod validation;
pub mod filter;
pub mod pagination;
pub mod academic;
pub mod people;
pub mod resources;

pub use entity::{Base, Entity, PgQuery};
pub use validation::ValidationError;
pub use filter::{Filter, FilterValue};
pub use pagination::{Page, Paginated, DEFAULT_LIMIT, MAX_LIMIT};
pub use academic::{Batch, Department, Session, University};
pub use people::{Role, Staff, Student, Teacher, User, Verification, VerificationStatus};
pub use resources::{Book, Note, Question, Syllabus, Transport};
