//! Request inputs and partial-update patches
//!
//! Patch fields distinguish "not supplied" from "supplied": a missing key
//! leaves the stored value alone, while an explicit value (even `""`)
//! overwrites it. Optional columns additionally accept `null` to clear.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{BookId, DomainError, Rating, UserId};
use crate::models::{Book, Review};

/// Maps a present JSON key to `Some`, so `null` becomes `Some(None)`
/// and only a missing key stays `None` (via `#[serde(default)]`).
fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn required_text(value: Option<String>, field: &str) -> Result<String, DomainError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(DomainError::validation(format!("{} is required", field))),
    }
}

/// Raw body of a book creation request
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookInput {
    pub title: Option<String>,
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_year: Option<i32>,
}

/// Validated book ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub published_year: Option<i32>,
    pub added_by: UserId,
}

impl BookInput {
    pub fn validate(self, added_by: UserId) -> Result<NewBook, DomainError> {
        Ok(NewBook {
            title: required_text(self.title, "Title")?,
            author: required_text(self.author, "Author")?,
            description: self.description,
            genre: self.genre,
            published_year: self.published_year,
            added_by,
        })
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub genre: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub published_year: Option<Option<i32>>,
}

impl BookPatch {
    /// Apply supplied fields to `book`. Returns whether anything changed.
    /// Nothing is written when validation fails.
    pub fn apply_to(self, book: &mut Book) -> Result<bool, DomainError> {
        let title = self
            .title
            .map(|t| required_text(Some(t), "Title"))
            .transpose()?;
        let author = self
            .author
            .map(|a| required_text(Some(a), "Author"))
            .transpose()?;

        let mut changed = false;
        if let Some(title) = title {
            changed |= replace(&mut book.title, title);
        }
        if let Some(author) = author {
            changed |= replace(&mut book.author, author);
        }
        if let Some(description) = self.description {
            changed |= replace(&mut book.description, description);
        }
        if let Some(genre) = self.genre {
            changed |= replace(&mut book.genre, genre);
        }
        if let Some(year) = self.published_year {
            changed |= replace(&mut book.published_year, year);
        }
        Ok(changed)
    }
}

/// Raw body of a review creation request.
///
/// `rating` is kept as raw JSON and checked in `validate`, after the
/// ownership rules have run.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInput {
    pub rating: Option<Value>,
    pub review_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub book_id: BookId,
    pub user_id: UserId,
    pub rating: Rating,
    pub review_text: String,
}

impl ReviewInput {
    pub fn validate(self, book_id: BookId, user_id: UserId) -> Result<NewReview, DomainError> {
        let rating = self
            .rating
            .filter(|r| !r.is_null())
            .ok_or_else(|| DomainError::validation("Rating is required"))?;
        Ok(NewReview {
            book_id,
            user_id,
            rating: Rating::try_from(&rating)?,
            review_text: self.review_text.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_text: Option<String>,
}

impl ReviewPatch {
    pub fn apply_to(self, review: &mut Review) -> Result<bool, DomainError> {
        let rating = self
            .rating
            .as_ref()
            .map(Rating::try_from)
            .transpose()?;

        let mut changed = false;
        if let Some(rating) = rating {
            changed |= replace(&mut review.rating, rating);
        }
        if let Some(text) = self.review_text {
            changed |= replace(&mut review.review_text, text);
        }
        Ok(changed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Validated registration; the password is still in clear text here
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterInput {
    pub fn validate(self) -> Result<NewAccount, DomainError> {
        let name = required_text(self.name, "Name")?;
        let email = normalize_email(&required_text(self.email, "Email")?);
        if !email.contains('@') {
            return Err(DomainError::validation("Email is invalid"));
        }
        let password = self
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| DomainError::validation("Password is required"))?;
        Ok(NewAccount {
            name,
            email,
            password,
        })
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
