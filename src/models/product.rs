use axum::body::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FieldErrors;

// DB models

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price_in_cents: i64,
    pub file_path: String,
    pub image_path: String,
    pub is_available_for_purchase: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing row: product columns the overview table shows plus how many
/// orders reference the product.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProductListing {
    pub id: Uuid,
    pub name: String,
    pub price_in_cents: i64,
    pub is_available_for_purchase: bool,
    pub order_count: i64,
}

// Request types

#[derive(Debug, Deserialize)]
pub struct AvailabilityUpdate {
    pub is_available_for_purchase: bool,
}

/// One uploaded part of a multipart submission. A part submitted with an
/// empty body counts as "no file chosen".
#[derive(Debug, Clone)]
pub struct UploadedBlob {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadedBlob {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Empty blobs are exempt from the mime check so an untouched file
    /// input on the edit form does not fail validation.
    pub fn is_image(&self) -> bool {
        self.is_empty()
            || self
                .content_type
                .as_deref()
                .is_some_and(|t| t.starts_with("image/"))
    }
}

/// Raw product form as it arrives off the wire, before validation.
/// `price_in_cents` stays a string here so a non-numeric submission is a
/// validation error rather than a deserialization failure.
#[derive(Debug, Default)]
pub struct ProductForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_in_cents: Option<String>,
    pub file: Option<UploadedBlob>,
    pub image: Option<UploadedBlob>,
}

/// Scalar fields of a form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub price_in_cents: i64,
}

impl ProductForm {
    /// Checks every field and collects all failures, so the caller gets the
    /// complete field -> messages map in one round trip. No side effects:
    /// nothing is written anywhere until validation has passed.
    ///
    /// `require_uploads` is true for creation, where both blobs are
    /// mandatory; on edit an absent or empty blob means "keep the old one".
    pub fn validate(&self, require_uploads: bool) -> Result<ProductFields, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = self.name.clone().unwrap_or_default();
        if name.is_empty() {
            errors.entry("name".to_string()).or_default().push("Required".to_string());
        }

        let description = self.description.clone().unwrap_or_default();
        if description.is_empty() {
            errors
                .entry("description".to_string())
                .or_default()
                .push("Required".to_string());
        }

        let price_in_cents = match self.price_in_cents.as_deref() {
            None | Some("") => {
                errors
                    .entry("price_in_cents".to_string())
                    .or_default()
                    .push("Required".to_string());
                0
            }
            Some(raw) => match raw.parse::<i64>() {
                Ok(v) if v >= 1 => v,
                Ok(_) => {
                    errors
                        .entry("price_in_cents".to_string())
                        .or_default()
                        .push("Must be at least 1".to_string());
                    0
                }
                Err(_) => {
                    errors
                        .entry("price_in_cents".to_string())
                        .or_default()
                        .push("Must be an integer".to_string());
                    0
                }
            },
        };

        if require_uploads && self.file.as_ref().map_or(true, UploadedBlob::is_empty) {
            errors.entry("file".to_string()).or_default().push("Required".to_string());
        }

        if let Some(image) = &self.image {
            if !image.is_image() {
                errors
                    .entry("image".to_string())
                    .or_default()
                    .push("Invalid file type".to_string());
            }
        }
        if require_uploads && self.image.as_ref().map_or(true, UploadedBlob::is_empty) {
            errors.entry("image".to_string()).or_default().push("Required".to_string());
        }

        if errors.is_empty() {
            Ok(ProductFields {
                name,
                description,
                price_in_cents,
            })
        } else {
            Err(errors)
        }
    }

    /// The file blob, only when the submission actually carries one.
    pub fn file_replacement(&self) -> Option<&UploadedBlob> {
        self.file.as_ref().filter(|b| !b.is_empty())
    }

    pub fn image_replacement(&self) -> Option<&UploadedBlob> {
        self.image.as_ref().filter(|b| !b.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(name: &str, content_type: Option<&str>, data: &[u8]) -> UploadedBlob {
        UploadedBlob {
            file_name: name.to_string(),
            content_type: content_type.map(str::to_string),
            data: Bytes::copy_from_slice(data),
        }
    }

    fn valid_form() -> ProductForm {
        ProductForm {
            name: Some("Widget".to_string()),
            description: Some("A widget".to_string()),
            price_in_cents: Some("500".to_string()),
            file: Some(blob("f.pdf", Some("application/pdf"), b"pdf bytes")),
            image: Some(blob("i.png", Some("image/png"), b"png bytes")),
        }
    }

    #[test]
    fn valid_create_form_passes() {
        let fields = valid_form().validate(true).unwrap();
        assert_eq!(
            fields,
            ProductFields {
                name: "Widget".to_string(),
                description: "A widget".to_string(),
                price_in_cents: 500,
            }
        );
    }

    #[test]
    fn empty_name_and_description_are_rejected() {
        let mut form = valid_form();
        form.name = Some(String::new());
        form.description = None;

        let errors = form.validate(true).unwrap_err();
        assert_eq!(errors["name"], vec!["Required"]);
        assert_eq!(errors["description"], vec!["Required"]);
    }

    #[test]
    fn price_below_one_is_rejected() {
        let mut form = valid_form();
        form.price_in_cents = Some("0".to_string());

        let errors = form.validate(true).unwrap_err();
        assert_eq!(errors["price_in_cents"], vec!["Must be at least 1"]);
    }

    #[test]
    fn non_integer_price_is_rejected() {
        let mut form = valid_form();
        form.price_in_cents = Some("12.50".to_string());

        let errors = form.validate(true).unwrap_err();
        assert_eq!(errors["price_in_cents"], vec!["Must be an integer"]);
    }

    #[test]
    fn create_requires_both_uploads() {
        let mut form = valid_form();
        form.file = None;
        form.image = Some(blob("i.png", Some("image/png"), b""));

        let errors = form.validate(true).unwrap_err();
        assert_eq!(errors["file"], vec!["Required"]);
        assert_eq!(errors["image"], vec!["Required"]);
    }

    #[test]
    fn edit_allows_missing_uploads() {
        let mut form = valid_form();
        form.file = None;
        form.image = None;

        assert!(form.validate(false).is_ok());
    }

    #[test]
    fn non_image_mime_is_rejected_even_on_edit() {
        let mut form = valid_form();
        form.image = Some(blob("i.exe", Some("application/octet-stream"), b"payload"));

        let errors = form.validate(false).unwrap_err();
        assert_eq!(errors["image"], vec!["Invalid file type"]);
    }

    #[test]
    fn empty_image_blob_skips_the_mime_check() {
        let mut form = valid_form();
        form.image = Some(blob("i.exe", Some("application/octet-stream"), b""));

        assert!(form.validate(false).is_ok());
    }

    #[test]
    fn replacement_ignores_empty_blobs() {
        let mut form = valid_form();
        form.file = Some(blob("f.pdf", None, b""));

        assert!(form.file_replacement().is_none());
        assert!(form.image_replacement().is_some());
    }
}
