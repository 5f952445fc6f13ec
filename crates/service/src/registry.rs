use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::errors::ServiceError;

/// Field names that must all be present when creating a record. The
/// validation error reports the full list, not only the missing ones.
pub const REQUIRED_FIELDS: [&str; 5] = ["name", "teacher", "schedule", "students", "room"];

/// One class entry in the registry.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClassRecord {
    pub id: i64,
    pub name: String,
    pub teacher: String,
    pub schedule: String,
    pub students: i64,
    pub room: String,
}

/// Create/update input model: no id, which is assigned by the registry.
///
/// Every field is optional so the same shape serves both operations: create
/// requires all five to be present, update merges whichever are supplied.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ClassInput {
    pub name: Option<String>,
    pub teacher: Option<String>,
    pub schedule: Option<String>,
    pub students: Option<i64>,
    pub room: Option<String>,
}

impl ClassInput {
    /// Create-time validation: all five fields must be supplied.
    fn validate_create(&self) -> Result<(), ServiceError> {
        let complete = self.name.is_some()
            && self.teacher.is_some()
            && self.schedule.is_some()
            && self.students.is_some()
            && self.room.is_some();
        if !complete {
            return Err(ServiceError::Validation(format!(
                "Missing required fields. Required fields are: {}",
                REQUIRED_FIELDS.join(", ")
            )));
        }
        Ok(())
    }
}

/// In-memory class registry.
///
/// Holds the ordered collection behind a single `RwLock`; each operation
/// takes the lock once, so id assignment and lookups stay atomic with
/// respect to concurrent requests. Insertion order is the order returned
/// by list and search.
#[derive(Clone)]
pub struct ClassRegistry {
    inner: Arc<RwLock<Vec<ClassRecord>>>,
}

impl ClassRegistry {
    /// An empty registry.
    pub fn new() -> Arc<Self> {
        Arc::new(Self { inner: Arc::new(RwLock::new(Vec::new())) })
    }

    /// A registry preloaded with the two demo records served at startup.
    pub fn seeded() -> Arc<Self> {
        let seed = vec![
            ClassRecord {
                id: 1,
                name: "Mathematics 101".into(),
                teacher: "Dr. Smith".into(),
                schedule: "Mon/Wed 9:00 AM".into(),
                students: 25,
                room: "A101".into(),
            },
            ClassRecord {
                id: 2,
                name: "Physics 101".into(),
                teacher: "Prof. Johnson".into(),
                schedule: "Tue/Thu 10:00 AM".into(),
                students: 20,
                room: "B202".into(),
            },
        ];
        Arc::new(Self { inner: Arc::new(RwLock::new(seed)) })
    }

    /// List all records in insertion order.
    pub async fn list(&self) -> Vec<ClassRecord> {
        self.inner.read().await.clone()
    }

    /// Get a record by id.
    pub async fn get(&self, id: i64) -> Result<ClassRecord, ServiceError> {
        let items = self.inner.read().await;
        items
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("class"))
    }

    /// Create a new record and append it to the collection.
    ///
    /// The id is recomputed from the current maximum on every call (1 on an
    /// empty collection). Deleting the highest-id record therefore makes
    /// that id eligible for reissue; this is contractual behavior.
    pub async fn create(&self, input: ClassInput) -> Result<ClassRecord, ServiceError> {
        input.validate_create()?;
        let mut items = self.inner.write().await;
        let new_id = items.iter().map(|c| c.id).max().map_or(1, |m| m + 1);
        let rec = ClassRecord {
            id: new_id,
            name: input.name.unwrap_or_default(),
            teacher: input.teacher.unwrap_or_default(),
            schedule: input.schedule.unwrap_or_default(),
            students: input.students.unwrap_or_default(),
            room: input.room.unwrap_or_default(),
        };
        items.push(rec.clone());
        Ok(rec)
    }

    /// Merge supplied fields into an existing record. Absent fields keep
    /// their prior values; the id is never altered.
    pub async fn update(&self, id: i64, input: ClassInput) -> Result<ClassRecord, ServiceError> {
        let mut items = self.inner.write().await;
        let existed = items
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ServiceError::not_found("class"))?;
        if let Some(name) = input.name {
            existed.name = name;
        }
        if let Some(teacher) = input.teacher {
            existed.teacher = teacher;
        }
        if let Some(schedule) = input.schedule {
            existed.schedule = schedule;
        }
        if let Some(students) = input.students {
            existed.students = students;
        }
        if let Some(room) = input.room {
            existed.room = room;
        }
        Ok(existed.clone())
    }

    /// Remove a record by id.
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let mut items = self.inner.write().await;
        let pos = items
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| ServiceError::not_found("class"))?;
        items.remove(pos);
        Ok(())
    }

    /// Filter by teacher and/or room, case-insensitive substring match.
    ///
    /// Filters compose conjunctively; an absent or empty filter is a no-op,
    /// so calling with neither returns the full collection. Order is
    /// preserved from the source collection.
    pub async fn search(&self, teacher: Option<&str>, room: Option<&str>) -> Vec<ClassRecord> {
        let items = self.inner.read().await;
        items
            .iter()
            .filter(|c| matches_filter(&c.teacher, teacher))
            .filter(|c| matches_filter(&c.room, room))
            .cloned()
            .collect()
    }
}

fn matches_filter(value: &str, filter: Option<&str>) -> bool {
    match filter {
        Some(f) if !f.is_empty() => value.to_lowercase().contains(&f.to_lowercase()),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_input(name: &str, teacher: &str, room: &str) -> ClassInput {
        ClassInput {
            name: Some(name.into()),
            teacher: Some(teacher.into()),
            schedule: Some("Fri 1PM".into()),
            students: Some(15),
            room: Some(room.into()),
        }
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids_from_one() {
        let reg = ClassRegistry::new();
        let a = reg.create(full_input("Chem", "Dr. Lee", "C303")).await.unwrap();
        let b = reg.create(full_input("Bio", "Dr. Lee", "C304")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn get_after_create_returns_equal_record() {
        let reg = ClassRegistry::seeded();
        let created = reg.create(full_input("Chem", "Dr. Lee", "C303")).await.unwrap();
        assert_eq!(created.id, 3);
        let found = reg.get(created.id).await.unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn id_is_recomputed_from_current_max() {
        // seed {1,2}, create -> 3, delete 1, create -> max(2,3)+1 = 4
        let reg = ClassRegistry::seeded();
        let c = reg.create(full_input("Chem", "Dr. Lee", "C303")).await.unwrap();
        assert_eq!(c.id, 3);
        reg.delete(1).await.unwrap();
        let d = reg.create(full_input("Chem", "Dr. Lee", "C303")).await.unwrap();
        assert_eq!(d.id, 4);
    }

    #[tokio::test]
    async fn deleting_the_max_id_makes_it_eligible_for_reissue() {
        let reg = ClassRegistry::seeded();
        reg.delete(2).await.unwrap();
        let c = reg.create(full_input("Chem", "Dr. Lee", "C303")).await.unwrap();
        assert_eq!(c.id, 2);
    }

    #[tokio::test]
    async fn create_with_missing_field_lists_all_required_and_leaves_collection_intact() {
        let reg = ClassRegistry::seeded();
        let mut input = full_input("Chem", "Dr. Lee", "C303");
        input.room = None;
        let err = reg.create(input).await.unwrap_err();
        match err {
            ServiceError::Validation(msg) => {
                for field in REQUIRED_FIELDS {
                    assert!(msg.contains(field), "message should name {}", field);
                }
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(reg.list().await.len(), 2);
    }

    #[tokio::test]
    async fn update_merges_only_supplied_fields() {
        let reg = ClassRegistry::seeded();
        let before = reg.get(1).await.unwrap();
        let patch = ClassInput { students: Some(30), ..Default::default() };
        let updated = reg.update(1, patch).await.unwrap();
        assert_eq!(updated.students, 30);
        assert_eq!(updated.id, before.id);
        assert_eq!(updated.name, before.name);
        assert_eq!(updated.teacher, before.teacher);
        assert_eq!(updated.schedule, before.schedule);
        assert_eq!(updated.room, before.room);
    }

    #[tokio::test]
    async fn update_and_delete_unknown_id_not_found() {
        let reg = ClassRegistry::seeded();
        assert!(matches!(reg.update(999, ClassInput::default()).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(reg.delete(999).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(reg.get(999).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let reg = ClassRegistry::seeded();
        reg.delete(1).await.unwrap();
        assert!(matches!(reg.get(1).await, Err(ServiceError::NotFound(_))));
        assert_eq!(reg.list().await.len(), 1);
    }

    #[tokio::test]
    async fn search_without_filters_returns_everything_in_order() {
        let reg = ClassRegistry::seeded();
        let all = reg.search(None, None).await;
        assert_eq!(all, reg.list().await);
        assert_eq!(all[0].id, 1);
        assert_eq!(all[1].id, 2);
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() {
        let reg = ClassRegistry::seeded();
        for q in ["smith", "SMITH", "Sm"] {
            let hits = reg.search(Some(q), None).await;
            assert_eq!(hits.len(), 1, "query {:?}", q);
            assert_eq!(hits[0].teacher, "Dr. Smith");
        }
        assert!(reg.search(Some("smithy-extra"), None).await.is_empty());
    }

    #[tokio::test]
    async fn search_filters_compose_conjunctively() {
        let reg = ClassRegistry::seeded();
        assert_eq!(reg.search(Some("smith"), Some("a101")).await.len(), 1);
        assert!(reg.search(Some("smith"), Some("b202")).await.is_empty());
        // empty filter strings behave as absent
        let all = reg.search(Some(""), Some("")).await;
        assert_eq!(all.len(), 2);
    }
}
