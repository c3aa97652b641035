//! Movie entity model and DTOs.

use casting_core::types::DbId;
use casting_core::validation::{not_blank, valid_release_date};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A movie row from the `movies` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    /// `MM-DD-YYYY`, stored as given.
    pub release_date: String,
}

/// DTO for creating a new movie. Both fields are required.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMovie {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "valid_release_date"))]
    pub release_date: String,
}

/// DTO for patching a movie. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMovie {
    #[validate(custom(function = "not_blank"))]
    pub title: Option<String>,
    #[validate(custom(function = "valid_release_date"))]
    pub release_date: Option<String>,
}

impl UpdateMovie {
    /// Apply the present fields to `movie`.
    pub fn apply_to(&self, movie: &mut Movie) {
        if let Some(title) = &self.title {
            movie.title = title.clone();
        }
        if let Some(release_date) = &self.release_date {
            movie.release_date = release_date.clone();
        }
    }
}

/// Sort order for full movie listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieOrder {
    /// Insertion order; used for the listing returned after a mutation.
    Id,
    /// By title in byte order (uppercase before lowercase), ties broken by id.
    Title,
}

impl MovieOrder {
    pub(crate) fn order_by(self) -> &'static str {
        match self {
            MovieOrder::Id => "id",
            MovieOrder::Title => "title COLLATE \"C\", id",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_valid_fields() {
        let ok = CreateMovie {
            title: "Dr. Strange".into(),
            release_date: "10-20-2016".into(),
        };
        assert!(ok.validate().is_ok());

        let blank_title = CreateMovie {
            title: " ".into(),
            release_date: "10-20-2016".into(),
        };
        assert!(blank_title.validate().is_err());

        let bad_date = CreateMovie {
            title: "Dr. Strange".into(),
            release_date: "2016/10/20".into(),
        };
        assert!(bad_date.validate().is_err());
    }

    #[test]
    fn update_only_validates_present_fields() {
        assert!(UpdateMovie::default().validate().is_ok());

        let patch = UpdateMovie {
            title: None,
            release_date: Some("13-01-2015".into()),
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn apply_leaves_absent_fields() {
        let mut movie = Movie {
            id: 5,
            title: "Arrival".into(),
            release_date: "11-10-2016".into(),
        };
        let patch = UpdateMovie {
            title: None,
            release_date: Some("11-11-2015".into()),
        };
        patch.apply_to(&mut movie);
        assert_eq!(movie.title, "Arrival");
        assert_eq!(movie.release_date, "11-11-2015");
        assert_eq!(movie.id, 5);
    }
}
