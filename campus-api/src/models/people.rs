//! Accounts and per-role profiles

use uuid::Uuid;

use super::entity::{entity, text_enum};

text_enum! {
    /// Account role
    pub enum Role {
        SuperAdmin => "super_admin",
        UniversityAdmin => "university_admin",
        DepartmentAdmin => "department_admin",
        Teacher => "teacher",
        Student => "student",
        Staff => "staff",
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Student
    }
}

text_enum! {
    /// Review state of a verification request
    pub enum VerificationStatus {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
}

impl Default for VerificationStatus {
    fn default() -> Self {
        Self::Pending
    }
}

entity! {
    /// An account. Profiles (student, teacher, staff) link to it by `user_id`.
    pub struct User in "users" as "user" {
        pub email: String,
        #[serde(default)]
        pub role: Role,
        #[serde(default)]
        pub first_name: String,
        #[serde(default)]
        pub last_name: String,
        #[serde(default)]
        pub phone: String,
        #[serde(default)]
        pub avatar_url: String,
        #[serde(default = "crate::models::entity::default_true")]
        pub is_active: bool,
        /// Email verification
        #[serde(default)]
        pub is_verified: bool,
        /// For admins, staff and teachers
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub university_id: Option<Uuid>,
        /// For teachers, students and staff
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub department_id: Option<Uuid>,
    }
}

entity! {
    pub struct Student in "students" as "student" {
        pub user_id: Uuid,
        pub batch_id: Uuid,
        #[serde(default)]
        pub roll_number: String,
        #[serde(default)]
        pub reg_number: String,
        /// Class representative
        #[serde(default)]
        pub is_cr: bool,
    }
}

entity! {
    pub struct Teacher in "teachers" as "teacher" {
        pub user_id: Uuid,
        pub department_id: Uuid,
        /// e.g. Professor, Lecturer
        #[serde(default)]
        pub designation: String,
    }
}

entity! {
    pub struct Staff in "staffs" as "staff" {
        pub user_id: Uuid,
        pub university_id: Uuid,
        #[serde(default)]
        pub position: String,
    }
}

entity! {
    /// A request to verify a user, e.g. an uploaded ID card
    pub struct Verification in "verifications" as "verification" {
        pub user_id: Uuid,
        #[serde(default)]
        pub status: VerificationStatus,
        #[serde(default)]
        pub document_url: String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Entity, ValidationError};

    #[test]
    fn role_round_trips_through_text() {
        for role in [Role::SuperAdmin, Role::DepartmentAdmin, Role::Staff] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert_eq!(Role::UniversityAdmin.to_string(), "university_admin");
    }

    #[test]
    fn unknown_role_is_invalid_variant() {
        let err = "janitor".parse::<Role>().unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidVariant {
                field: "Role",
                value: "janitor".into()
            }
        );
    }

    #[test]
    fn user_defaults() {
        let user: User =
            serde_json::from_value(serde_json::json!({ "email": "a@uni.edu" })).unwrap();
        assert_eq!(user.role, Role::Student);
        assert!(user.is_active);
        assert!(!user.is_verified);
        assert!(user.university_id.is_none());
    }

    #[test]
    fn role_uses_snake_case_json() {
        let user: User = serde_json::from_value(serde_json::json!({
            "email": "admin@uni.edu",
            "role": "university_admin",
        }))
        .unwrap();
        assert_eq!(user.role, Role::UniversityAdmin);

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["role"], "university_admin");
    }

    #[test]
    fn verification_starts_pending() {
        let v: Verification = serde_json::from_value(serde_json::json!({
            "user_id": Uuid::new_v4(),
        }))
        .unwrap();
        assert_eq!(v.status, VerificationStatus::Pending);
        assert_eq!(Verification::COLUMNS, &["user_id", "status", "document_url"]);
    }

    #[test]
    fn filterable_columns() {
        assert!(Teacher::has_column("department_id"));
        assert!(!Teacher::has_column("batch_id"));
        assert!(Staff::has_column("id"));
    }
}
