//! Institutional structure: universities, departments, sessions, batches

use uuid::Uuid;

use super::entity::entity;

entity! {
    /// A university
    pub struct University in "universities" as "university" {
        pub name: String,
        #[serde(default)]
        pub acronym: String,
        #[serde(default)]
        pub address: String,
        #[serde(default)]
        pub website: String,
        #[serde(default)]
        pub logo_url: String,
    }
}

entity! {
    /// A department within a university (e.g. CSE, EEE)
    pub struct Department in "departments" as "department" {
        pub name: String,
        #[serde(default)]
        pub code: String,
        pub university_id: Uuid,
        /// Total semesters in the programme
        #[serde(default)]
        pub semesters: i32,
    }
}

entity! {
    /// An academic session such as "2023-2024"
    pub struct Session in "sessions" as "session" {
        pub name: String,
        pub university_id: Uuid,
        #[serde(default = "crate::models::entity::default_true")]
        pub is_active: bool,
    }
}

entity! {
    /// A cohort of students in one department and session
    pub struct Batch in "batches" as "batch" {
        pub name: String,
        pub department_id: Uuid,
        pub session_id: Uuid,
    }
}
