//! Actor entity model and DTOs.

use casting_core::types::DbId;
use casting_core::validation::{not_blank, MAX_AGE};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An actor row from the `actors` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Actor {
    pub id: DbId,
    pub name: String,
    pub age: i32,
    pub gender: String,
}

/// DTO for creating a new actor. All fields are required; `gender` is free text.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateActor {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(range(min = 0, max = MAX_AGE))]
    pub age: i32,
    pub gender: String,
}

/// DTO for patching an actor. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateActor {
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(range(min = 0, max = MAX_AGE))]
    pub age: Option<i32>,
    pub gender: Option<String>,
}

impl UpdateActor {
    /// Apply the present fields to `actor`.
    pub fn apply_to(&self, actor: &mut Actor) {
        if let Some(name) = &self.name {
            actor.name = name.clone();
        }
        if let Some(age) = self.age {
            actor.age = age;
        }
        if let Some(gender) = &self.gender {
            actor.gender = gender.clone();
        }
    }
}

/// Sort order for full actor listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorOrder {
    /// Insertion order; used for the listing returned after a mutation.
    Id,
    /// By name in byte order (uppercase before lowercase), ties broken by id.
    Name,
}

impl ActorOrder {
    pub(crate) fn order_by(self) -> &'static str {
        match self {
            ActorOrder::Id => "id",
            ActorOrder::Name => "name COLLATE \"C\", id",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_must_be_in_range() {
        let mut input = CreateActor {
            name: "Rachel McAdams".into(),
            age: 41,
            gender: "Female".into(),
        };
        assert!(input.validate().is_ok());

        input.age = -1;
        assert!(input.validate().is_err());

        input.age = MAX_AGE + 1;
        assert!(input.validate().is_err());
    }

    #[test]
    fn gender_is_unconstrained() {
        let input = CreateActor {
            name: "Sam".into(),
            age: 30,
            gender: String::new(),
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn missing_fields_fail_to_deserialize() {
        let result: Result<CreateActor, _> =
            serde_json::from_value(serde_json::json!({"name": "Dorris Bob", "age": 11}));
        assert!(result.is_err());
    }

    #[test]
    fn apply_leaves_absent_fields() {
        let mut actor = Actor {
            id: 3,
            name: "Dorris Bob".into(),
            age: 11,
            gender: "Male".into(),
        };
        let patch = UpdateActor {
            age: Some(12),
            ..Default::default()
        };
        patch.apply_to(&mut actor);
        assert_eq!(actor.age, 12);
        assert_eq!(actor.name, "Dorris Bob");
        assert_eq!(actor.gender, "Male");
    }
}
