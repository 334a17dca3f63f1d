use contracts::scheduling::{
    AvailableSlots, ConsultationRequest, ConsultationRequestDto, FirstInvoiceCheck,
    ScheduleResponse,
};

use crate::shared::api_client::{ApiClient, RequestError};

pub async fn check_first_invoice(client: &ApiClient) -> Result<FirstInvoiceCheck, RequestError> {
    client.get("/api/ca-scheduling/check-first-invoice").await
}

pub async fn fetch_available_slots(client: &ApiClient) -> Result<AvailableSlots, RequestError> {
    client.get("/api/ca-scheduling/available-slots").await
}

pub async fn schedule_consultation(
    client: &ApiClient,
    request: &ConsultationRequestDto,
) -> Result<ScheduleResponse, RequestError> {
    client.post("/api/ca-scheduling/schedule", request).await
}

pub async fn fetch_my_requests(
    client: &ApiClient,
) -> Result<Vec<ConsultationRequest>, RequestError> {
    client.get("/api/ca-scheduling/my-requests").await
}
