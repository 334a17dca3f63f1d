use contracts::items::CatalogItem;

use crate::shared::api_client::{ApiClient, RequestError};

pub async fn fetch_items(client: &ApiClient) -> Result<Vec<CatalogItem>, RequestError> {
    client.get("/api/item-library").await
}

pub async fn create_item(
    client: &ApiClient,
    item: &CatalogItem,
) -> Result<CatalogItem, RequestError> {
    client.post("/api/item-library", item).await
}

pub async fn update_item(
    client: &ApiClient,
    id: i64,
    item: &CatalogItem,
) -> Result<CatalogItem, RequestError> {
    client.put(&format!("/api/item-library/{}", id), item).await
}

pub async fn delete_item(client: &ApiClient, id: i64) -> Result<(), RequestError> {
    client.delete(&format!("/api/item-library/{}", id)).await
}
