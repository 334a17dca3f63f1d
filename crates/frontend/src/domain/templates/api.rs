use contracts::templates::{DocumentTemplate, UploadResponse};

use crate::shared::api_client::{ApiClient, RequestError};

pub async fn fetch_templates(client: &ApiClient) -> Result<Vec<DocumentTemplate>, RequestError> {
    client.get("/api/templates").await
}

pub async fn create_template(
    client: &ApiClient,
    template: &DocumentTemplate,
) -> Result<DocumentTemplate, RequestError> {
    client.post("/api/templates", template).await
}

pub async fn update_template(
    client: &ApiClient,
    id: i64,
    template: &DocumentTemplate,
) -> Result<DocumentTemplate, RequestError> {
    client.put(&format!("/api/templates/{}", id), template).await
}

pub async fn delete_template(client: &ApiClient, id: i64) -> Result<(), RequestError> {
    client.delete(&format!("/api/templates/{}", id)).await
}

/// Upload the template file. The selected file is passed through as a
/// multipart body; the server detects the fillable fields.
pub async fn upload_template_file(
    client: &ApiClient,
    id: i64,
    file: web_sys::File,
) -> Result<UploadResponse, RequestError> {
    let form = web_sys::FormData::new()
        .map_err(|e| RequestError::Unexpected(format!("failed to build form data: {:?}", e)))?;
    form.append_with_blob("file", &file)
        .map_err(|e| RequestError::Unexpected(format!("failed to attach file: {:?}", e)))?;
    client
        .post_form(&format!("/api/templates/{}/upload", id), form)
        .await
}
