use axum::extract::multipart::{Multipart, MultipartError};

use crate::{
    error::{AppError, Result},
    models::{ProductForm, UploadedBlob},
};

/// Drains a multipart submission into a `ProductForm`. Unknown parts are
/// skipped; field-level validation happens later on the form itself.
pub async fn read_product_form(mut multipart: Multipart) -> Result<ProductForm> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "name" => form.name = Some(field.text().await.map_err(malformed)?),
            "description" => form.description = Some(field.text().await.map_err(malformed)?),
            "price_in_cents" => form.price_in_cents = Some(field.text().await.map_err(malformed)?),
            "file" | "image" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(malformed)?;

                let blob = UploadedBlob {
                    file_name,
                    content_type,
                    data,
                };

                if name == "file" {
                    form.file = Some(blob);
                } else {
                    form.image = Some(blob);
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

fn malformed(err: MultipartError) -> AppError {
    AppError::BadRequest(format!("Malformed multipart request: {}", err))
}
