use crate::normalize::{self, NormalizeError};
use crate::requests::VehicleBody;
use crate::{
    Auction, ErrorBody, ListingId, MultipartSubmission, Property, Resource,
    Vehicle,
};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for interfacing with the listings backend.
pub struct APIClient {
    /// Root of the backend API, e.g. `https://example.com/api`. Resource
    /// paths are appended to it.
    pub address: String,
    pub inner_client: reqwest::Client,
}

/// Helper methods for http actions
impl APIClient {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            inner_client: reqwest::Client::new(),
        }
    }

    fn format_url(&self, path: &str) -> String {
        format!("{}/{path}", self.address.trim_end_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let request = self.inner_client.request(method, self.format_url(path));

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request
    }

    async fn empty_get(&self, path: &str) -> ReqwestResult {
        self.request(Method::GET, path).send().await
    }

    async fn delete(&self, path: &str) -> ReqwestResult {
        self.request(Method::DELETE, path).send().await
    }

    async fn send_json(
        &self,
        method: Method,
        path: &str,
        body: &impl Serialize,
    ) -> ReqwestResult {
        tracing::debug!("{method} {path} (json)");
        self.request(method, path).json(body).send().await
    }

    async fn send_multipart(
        &self,
        method: Method,
        path: &str,
        submission: MultipartSubmission,
    ) -> ReqwestResult {
        tracing::debug!(
            "{method} {path} ({} fields, {} files under {:?})",
            submission.fields.len(),
            submission.files.len(),
            submission.file_field.name(),
        );
        self.request(method, path)
            .multipart(submission.into_form())
            .send()
            .await
    }
}

fn record_path(resource: Resource, id: &ListingId) -> String {
    format!("{resource}/{id}")
}

/// Methods on the backend API
impl APIClient {
    pub async fn health_check(&self) -> Result<(), ClientError> {
        let response = self.empty_get("health_check").await?;
        ok_empty(response).await
    }

    pub async fn list_properties(&self) -> Result<Vec<Property>, ClientError> {
        let response = self.empty_get(Resource::Inmobiliaria.path()).await?;
        ok_records(response).await
    }

    pub async fn get_property(
        &self,
        id: &ListingId,
    ) -> Result<Property, ClientError> {
        let path = record_path(Resource::Inmobiliaria, id);
        let response = self.empty_get(&path).await?;
        ok_record(response).await
    }

    /// Create a listing from a multipart submission with files under
    /// `archivos`. Returns the stored record when the backend echoes one.
    pub async fn create_property(
        &self,
        submission: MultipartSubmission,
    ) -> Result<Option<Property>, ClientError> {
        let response = self
            .send_multipart(
                Method::POST,
                Resource::Inmobiliaria.path(),
                submission,
            )
            .await?;
        ok_saved(response).await
    }

    /// Update a listing. Only newly added files are part of the submission;
    /// stored media is left as is.
    pub async fn update_property(
        &self,
        id: &ListingId,
        submission: MultipartSubmission,
    ) -> Result<Option<Property>, ClientError> {
        let path = record_path(Resource::Inmobiliaria, id);
        let response =
            self.send_multipart(Method::PUT, &path, submission).await?;
        ok_saved(response).await
    }

    pub async fn delete_property(
        &self,
        id: &ListingId,
    ) -> Result<(), ClientError> {
        let response =
            self.delete(&record_path(Resource::Inmobiliaria, id)).await?;
        ok_empty(response).await
    }

    pub async fn list_auctions(&self) -> Result<Vec<Auction>, ClientError> {
        let response = self.empty_get(Resource::Subastas.path()).await?;
        ok_records(response).await
    }

    pub async fn get_auction(
        &self,
        id: &ListingId,
    ) -> Result<Auction, ClientError> {
        let response =
            self.empty_get(&record_path(Resource::Subastas, id)).await?;
        ok_record(response).await
    }

    pub async fn create_auction(
        &self,
        submission: MultipartSubmission,
    ) -> Result<Option<Auction>, ClientError> {
        let response = self
            .send_multipart(Method::POST, Resource::Subastas.path(), submission)
            .await?;
        ok_saved(response).await
    }

    pub async fn update_auction(
        &self,
        id: &ListingId,
        submission: MultipartSubmission,
    ) -> Result<Option<Auction>, ClientError> {
        let path = record_path(Resource::Subastas, id);
        let response =
            self.send_multipart(Method::PUT, &path, submission).await?;
        ok_saved(response).await
    }

    pub async fn delete_auction(
        &self,
        id: &ListingId,
    ) -> Result<(), ClientError> {
        let response =
            self.delete(&record_path(Resource::Subastas, id)).await?;
        ok_empty(response).await
    }

    pub async fn list_vehicles(&self) -> Result<Vec<Vehicle>, ClientError> {
        let response = self.empty_get(Resource::Martillero.path()).await?;
        ok_records(response).await
    }

    pub async fn get_vehicle(
        &self,
        id: &ListingId,
    ) -> Result<Vehicle, ClientError> {
        let response =
            self.empty_get(&record_path(Resource::Martillero, id)).await?;
        ok_record(response).await
    }

    /// Vehicles are sent as JSON; they carry no uploads.
    pub async fn create_vehicle(
        &self,
        body: &VehicleBody,
    ) -> Result<Option<Vehicle>, ClientError> {
        let response = self
            .send_json(Method::POST, Resource::Martillero.path(), body)
            .await?;
        ok_saved(response).await
    }

    pub async fn update_vehicle(
        &self,
        id: &ListingId,
        body: &VehicleBody,
    ) -> Result<Option<Vehicle>, ClientError> {
        let path = record_path(Resource::Martillero, id);
        let response = self.send_json(Method::PUT, &path, body).await?;
        ok_saved(response).await
    }

    pub async fn delete_vehicle(
        &self,
        id: &ListingId,
    ) -> Result<(), ClientError> {
        let response =
            self.delete(&record_path(Resource::Martillero, id)).await?;
        ok_empty(response).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing response text.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
    #[error("Unexpected response from the server: {0}")]
    Malformed(#[from] NormalizeError),
}

impl ClientError {
    /// Message to show to the user, taken from the backend's error body when
    /// it has one.
    ///
    /// Priority: validation `detalles`, then `error`, then `message`, then
    /// `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::APIError(_, text) => ErrorBody::from_text(text)
                .and_then(|body| body.user_message())
                .unwrap_or_else(|| fallback.to_string()),
            Self::Network(_) | Self::Malformed(_) => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::APIError(status, _) => Some(*status),
            _ => None,
        }
    }
}

/// Fail with the response text unless the status is a success.
async fn ok_response(
    response: reqwest::Response,
) -> Result<reqwest::Response, ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(response)
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    Ok(ok_response(response).await?.json::<T>().await?)
}

/// Normalize a single record. Records wrapped as `{ "data": {...} }` are
/// unwrapped first.
pub async fn ok_record<T>(response: reqwest::Response) -> Result<T, ClientError>
where
    for<'a> T: TryFrom<&'a Value, Error = NormalizeError>,
{
    let value: Value = ok_body(response).await?;
    let record = match value.get("data") {
        Some(data) if data.is_object() => data,
        _ => &value,
    };
    Ok(T::try_from(record)?)
}

/// Outcome of a create or update. Any success status means the write
/// happened; a body that is not a record gives `None`.
pub async fn ok_saved<T>(
    response: reqwest::Response,
) -> Result<Option<T>, ClientError>
where
    for<'a> T: TryFrom<&'a Value, Error = NormalizeError>,
{
    let status = response.status();
    let text = ok_response(response).await?.text().await?;
    let value: Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Saved ({status}) with a non-JSON body: {e}");
            return Ok(None);
        }
    };
    let record = match value.get("data") {
        Some(data) if data.is_object() => data,
        _ => &value,
    };
    match T::try_from(record) {
        Ok(record) => Ok(Some(record)),
        Err(e) => {
            tracing::warn!("Saved ({status}) without a usable record: {e}");
            Ok(None)
        }
    }
}

/// Normalize a list of records, skipping malformed ones.
pub async fn ok_records<T>(
    response: reqwest::Response,
) -> Result<Vec<T>, ClientError>
where
    for<'a> T: TryFrom<&'a Value, Error = NormalizeError>,
{
    let value: Value = ok_body(response).await?;
    Ok(normalize::records(&value))
}

/// Check that an empty response is OK, returning a ClientError if not.
pub async fn ok_empty(response: reqwest::Response) -> Result<(), ClientError> {
    ok_response(response).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_from_error_body() {
        let error = ClientError::APIError(
            StatusCode::BAD_REQUEST,
            r#"{"error":"Error de validación","detalles":[{"message":"bad price"}]}"#
                .into(),
        );
        assert_eq!(error.user_message("fallback"), "bad price");
        assert_eq!(error.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn user_message_falls_back_for_plain_text() {
        let error = ClientError::APIError(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error".into(),
        );
        assert_eq!(error.user_message("Error al guardar"), "Error al guardar");

        let error = ClientError::Malformed(NormalizeError::MissingId);
        assert_eq!(error.user_message("Error al guardar"), "Error al guardar");
        assert_eq!(error.status(), None);
    }

    #[test]
    fn format_url_joins_paths() {
        let client = APIClient::new("http://localhost:8000/api/");
        assert_eq!(
            client.format_url("inmobiliaria/7"),
            "http://localhost:8000/api/inmobiliaria/7"
        );
        assert_eq!(
            record_path(Resource::Martillero, &ListingId::from("a1")),
            "martillero/a1"
        );
    }
}
