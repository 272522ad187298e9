//! Study material and campus services

use uuid::Uuid;

use super::entity::entity;

entity! {
    pub struct Book in "books" as "book" {
        pub title: String,
        #[serde(default)]
        pub author: String,
        #[serde(default)]
        pub edition: String,
        #[serde(default)]
        pub department_id: Option<Uuid>,
        #[serde(default)]
        pub university_id: Option<Uuid>,
        #[serde(default)]
        pub download_url: String,
        /// Shelf location, for library copies
        #[serde(default)]
        pub physical_location: String,
    }
}

entity! {
    /// A past exam paper
    pub struct Question in "questions" as "question" {
        pub subject: String,
        #[serde(default)]
        pub year: i32,
        #[serde(default)]
        pub semester: String,
        #[serde(default)]
        pub department_id: Option<Uuid>,
        #[serde(default)]
        pub university_id: Option<Uuid>,
        #[serde(default)]
        pub download_url: String,
    }
}

entity! {
    pub struct Note in "notes" as "note" {
        pub title: String,
        #[serde(default)]
        pub subject: String,
        #[serde(default)]
        pub topic: String,
        /// Uploader
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub teacher_id: Option<Uuid>,
        #[serde(default)]
        pub department_id: Option<Uuid>,
        #[serde(default)]
        pub university_id: Option<Uuid>,
        #[serde(default)]
        pub download_url: String,
    }
}

entity! {
    pub struct Syllabus in "syllabuses" as "syllabus" {
        #[serde(default)]
        pub session_id: Option<Uuid>,
        #[serde(default)]
        pub department_id: Option<Uuid>,
        #[serde(default)]
        pub university_id: Option<Uuid>,
        #[serde(default)]
        pub download_url: String,
    }
}

entity! {
    /// A bus route
    pub struct Transport in "transports" as "transport" {
        pub university_id: Uuid,
        pub route_name: String,
        #[serde(default)]
        pub bus_number: String,
        /// Free text or JSON describing departures
        #[serde(default)]
        pub schedule: String,
        #[serde(default)]
        pub driver_contact: String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Entity;

    #[test]
    fn syllabus_has_no_required_fields() {
        let s: Syllabus = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(s.department_id.is_none());
        assert_eq!(s.download_url, "");
    }

    #[test]
    fn book_filters() {
        assert!(Book::has_column("department_id"));
        assert!(Book::has_column("university_id"));
        assert!(!Book::has_column("session_id"));
        assert!(Syllabus::has_column("session_id"));
    }

    #[test]
    fn transport_requires_route_name() {
        let result: Result<Transport, _> = serde_json::from_value(serde_json::json!({
            "university_id": Uuid::new_v4(),
        }));
        assert!(result.is_err());
    }
}
