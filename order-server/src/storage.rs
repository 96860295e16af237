//! Menu/category image storage (S3)
//!
//! Keys are namespaced `restaurants/{restaurant_id}/{entity}/{id}` so a
//! restaurant's objects can be listed and removed together.

use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::primitives::ByteStream;
use shared::error::{AppError, ErrorCode};

/// Image storage backed by an S3 bucket
#[derive(Clone)]
pub struct ImageStorage {
    s3: S3Client,
    bucket: String,
}

impl ImageStorage {
    pub fn new(s3: S3Client, bucket: String) -> Self {
        Self { s3, bucket }
    }

    /// Object key for an entity image
    pub fn key(restaurant_id: &str, entity: &str, id: &str) -> String {
        format!("restaurants/{restaurant_id}/{entity}/{id}")
    }

    /// Upload an image, returning its key
    pub async fn upload(
        &self,
        restaurant_id: &str,
        entity: &str,
        id: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError> {
        let key = Self::key(restaurant_id, entity, id);
        self.s3
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, key = %key, "S3 upload failed");
                AppError::new(ErrorCode::StorageError)
            })?;
        Ok(key)
    }

    /// Delete an image by key; missing objects are not an error
    pub async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.s3
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, key = %key, "S3 delete failed");
                AppError::new(ErrorCode::StorageError)
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_namespacing() {
        assert_eq!(
            ImageStorage::key("r-1", "menu_items", "m-9"),
            "restaurants/r-1/menu_items/m-9"
        );
    }
}
