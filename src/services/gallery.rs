//! Gallery service

use reqwest::multipart::Form;
use crate::api::{ApiClient, AuthScope, ListQuery, Page};
use crate::forms::{FieldSchema, FileUpload, FormData, FormSchema};
use crate::models::{GalleryItem, UpdateGalleryRequest};
use crate::utils::errors::Result;
use crate::utils::logging;

const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct GalleryService {
    client: ApiClient,
}

impl GalleryService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn upload_schema() -> FormSchema {
        FormSchema::new(vec![
            FieldSchema::new("image", "Image")
                .required()
                .max_file_size(MAX_IMAGE_BYTES)
                .accept(&["image/jpeg", "image/png", "image/webp"]),
            FieldSchema::new("caption", "Caption").length(0, 200),
        ])
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Page<GalleryItem>> {
        let url = query.apply(self.client.endpoints().gallery()?);
        self.client.get_page(url, AuthScope::Public).await
    }

    pub async fn upload(&self, image: FileUpload, caption: Option<&str>) -> Result<GalleryItem> {
        Self::upload_schema().check(
            &FormData::new()
                .file("image", Some(image.clone()))
                .text("caption", caption.unwrap_or_default()),
        )?;

        let mut form = Form::new().part("image", image.to_part()?);
        if let Some(caption) = caption.filter(|c| !c.trim().is_empty()) {
            form = form.text("caption", caption.trim().to_string());
        }

        let url = self.client.endpoints().gallery_upload()?;
        let item: GalleryItem = self.client.post_multipart(url, form, AuthScope::Admin).await?;
        logging::log_admin_action("gallery_upload", Some(&item.id), None);
        Ok(item)
    }

    pub async fn update_caption(&self, item_id: &str, caption: &str) -> Result<GalleryItem> {
        let request = UpdateGalleryRequest {
            caption: caption.trim().to_string(),
        };
        let url = self.client.endpoints().gallery_item(item_id)?;
        let item = self.client.put_json(url, &request, AuthScope::Admin).await?;
        logging::log_admin_action("gallery_update", Some(item_id), None);
        Ok(item)
    }

    pub async fn delete(&self, item_id: &str) -> Result<Option<String>> {
        let url = self.client.endpoints().gallery_item(item_id)?;
        let message = self.client.delete(url, AuthScope::Admin).await?;
        logging::log_admin_action("gallery_delete", Some(item_id), None);
        Ok(message)
    }
}
