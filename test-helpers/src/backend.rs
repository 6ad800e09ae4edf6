//! In-memory stand-in for the external listings backend.
//!
//! Serves the same routes and JSON shapes as the real backend
//! (`/{resource}` and `/{resource}/{id}` for `inmobiliaria`, `martillero`
//! and `subastas`), keeps records in memory, and records every request it
//! receives so tests can assert on what was sent.

use actix_cors::Cors;
use actix_multipart::Multipart;
use actix_web::dev::Server;
use actix_web::http::StatusCode;
use actix_web::{
    App, HttpRequest, HttpResponse, HttpServer, ResponseError, body::BoxBody,
    delete, get, post, put, web,
};
use futures::TryStreamExt;
use payloads::{MAX_STAGED_FILES, MediaKind, Resource};
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Build the server, but not await it.
///
/// Returns the port that the server has bound to by modifying the config.
pub fn build(config: &mut Config, store: Store) -> std::io::Result<Server> {
    let store = web::Data::new(store);
    let allowed_origins = config.allowed_origins.clone();

    // OS assigns the port if binding to 0
    let listener = TcpListener::bind(format!("{}:{}", config.ip, config.port))?;
    config.port = listener.local_addr()?.port();
    let server = HttpServer::new(move || {
        let cors = if allowed_origins.contains(&"*".to_string()) {
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .supports_credentials()
        } else {
            let mut cors = Cors::default()
                .allow_any_method()
                .allow_any_header()
                .supports_credentials();
            for origin in &allowed_origins {
                cors = cors.allowed_origin(origin);
            }
            cors
        };

        App::new()
            .wrap(cors)
            .service(health_check)
            .service(get_upload)
            .service(list_records)
            .service(get_record)
            .service(create_record)
            .service(update_record)
            .service(delete_record)
            .app_data(store.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}

pub struct Config {
    /// set to "0.0.0.0" for public access, "127.0.0.1" for local dev
    pub ip: String,
    /// set to 0 to get an os-assigned port
    pub port: u16,
    /// List of allowed CORS origins. Use "*" to allow any origin.
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn local() -> Self {
        Self {
            ip: "127.0.0.1".into(),
            port: 0,
            allowed_origins: vec!["*".to_string()],
        }
    }

    /// Read `IP_ADDRESS`, `PORT` and `ALLOWED_ORIGINS`, falling back to
    /// [`Config::local`] for anything unset.
    pub fn from_env() -> anyhow::Result<Self> {
        use std::env::var;

        let defaults = Self::local();
        let allowed_origins = var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let port = match var("PORT") {
            Ok(port) => port.parse()?,
            Err(_) => defaults.port,
        };

        Ok(Config {
            ip: var("IP_ADDRESS").unwrap_or(defaults.ip),
            port,
            allowed_origins,
        })
    }
}

/// A request as received by the stand-in backend.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Text parts of a multipart body, in order.
    pub fields: Vec<(String, String)>,
    /// File parts of a multipart body, in order.
    pub files: Vec<RecordedFile>,
    /// Body of a JSON request.
    pub json: Option<Value>,
}

impl RecordedRequest {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFile {
    /// Multipart field name the file was sent under.
    pub field: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub len: usize,
}

struct StoredUpload {
    content_type: String,
    data: Vec<u8>,
}

#[derive(Default)]
struct StoreInner {
    records: HashMap<Resource, Vec<Value>>,
    uploads: HashMap<String, StoredUpload>,
    requests: Vec<RecordedRequest>,
    next_failure: Option<(StatusCode, Value)>,
    next_delay: Option<Duration>,
}

/// Shared state of the stand-in backend. Cheap to clone.
#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<Mutex<StoreInner>>,
}

impl Store {
    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        // a panicking test thread must not take the other tests down with it
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Insert a raw record, assigning an `_id` if it has none. Returns the
    /// id.
    pub fn insert(&self, resource: Resource, mut record: Value) -> String {
        let id = match record_id(&record) {
            Some(id) => id,
            None => {
                let id = uuid::Uuid::new_v4().simple().to_string();
                if let Some(map) = record.as_object_mut() {
                    map.insert("_id".into(), Value::String(id.clone()));
                }
                id
            }
        };
        self.lock()
            .records
            .entry(resource)
            .or_default()
            .push(record);
        id
    }

    pub fn records(&self, resource: Resource) -> Vec<Value> {
        self.lock()
            .records
            .get(&resource)
            .cloned()
            .unwrap_or_default()
    }

    pub fn get(&self, resource: Resource, id: &str) -> Option<Value> {
        self.lock()
            .records
            .get(&resource)?
            .iter()
            .find(|record| record_id(record).as_deref() == Some(id))
            .cloned()
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Requests other than reads.
    pub fn writes(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.method != "GET")
            .collect()
    }

    /// Answer the next create/update/delete with this status and JSON body
    /// instead of handling it.
    pub fn fail_next(&self, status: u16, body: Value) {
        let status = StatusCode::from_u16(status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.lock().next_failure = Some((status, body));
    }

    /// Hold the next response back for `delay`.
    pub fn delay_next(&self, delay: Duration) {
        self.lock().next_delay = Some(delay);
    }

    pub fn upload_count(&self) -> usize {
        self.lock().uploads.len()
    }

    fn record(&self, request: RecordedRequest) {
        tracing::debug!("{} {}", request.method, request.path);
        self.lock().requests.push(request);
    }

    fn take_failure(&self) -> Option<(StatusCode, Value)> {
        self.lock().next_failure.take()
    }

    async fn wait_if_delayed(&self) {
        let delay = self.lock().next_delay.take();
        if let Some(delay) = delay {
            actix_web::rt::time::sleep(delay).await;
        }
    }

    fn store_upload(
        &self,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> String {
        let key = format!("{}-{}", uuid::Uuid::new_v4().simple(), file_name);
        self.lock().uploads.insert(
            key.clone(),
            StoredUpload {
                content_type: content_type.to_string(),
                data,
            },
        );
        format!("/uploads/{key}")
    }

    fn replace(&self, resource: Resource, id: &str, record: Value) -> bool {
        let mut inner = self.lock();
        let Some(records) = inner.records.get_mut(&resource) else {
            return false;
        };
        match records
            .iter_mut()
            .find(|existing| record_id(existing).as_deref() == Some(id))
        {
            Some(existing) => {
                *existing = record;
                true
            }
            None => false,
        }
    }

    fn remove(&self, resource: Resource, id: &str) -> bool {
        let mut inner = self.lock();
        let Some(records) = inner.records.get_mut(&resource) else {
            return false;
        };
        let before = records.len();
        records.retain(|record| record_id(record).as_deref() != Some(id));
        records.len() != before
    }
}

fn record_id(record: &Value) -> Option<String> {
    match record.get("_id").or_else(|| record.get("id"))? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

fn parse_resource(path: &str) -> Result<Resource, MockError> {
    match path {
        "inmobiliaria" => Ok(Resource::Inmobiliaria),
        "martillero" => Ok(Resource::Martillero),
        "subastas" => Ok(Resource::Subastas),
        _ => Err(MockError::UnknownResource(path.to_string())),
    }
}

/// Fields the real backend stores as numbers.
const NUMERIC_FIELDS: &[&str] = &[
    "precio",
    "metros",
    "habitaciones",
    "precioInicial",
    "precioActual",
    "ofertas",
];

/// Decoded write request body.
struct Submission {
    fields: Vec<(String, String)>,
    files: Vec<(RecordedFile, Vec<u8>)>,
    json: Option<Value>,
}

impl Submission {
    async fn read(
        request: &HttpRequest,
        payload: web::Payload,
    ) -> Result<Self, MockError> {
        let is_multipart = request
            .headers()
            .get(actix_web::http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        if is_multipart {
            Self::read_multipart(Multipart::new(request.headers(), payload))
                .await
        } else {
            let mut payload = payload;
            let mut body = Vec::new();
            while let Some(chunk) = payload
                .try_next()
                .await
                .map_err(|e| MockError::BadRequest(anyhow::anyhow!("{e}")))?
            {
                body.extend_from_slice(&chunk);
            }
            let json = serde_json::from_slice(&body)
                .map_err(|e| MockError::BadRequest(e.into()))?;
            Ok(Self {
                fields: Vec::new(),
                files: Vec::new(),
                json: Some(json),
            })
        }
    }

    async fn read_multipart(mut payload: Multipart) -> Result<Self, MockError> {
        let mut fields = Vec::new();
        let mut files = Vec::new();
        while let Some(mut field) = payload
            .try_next()
            .await
            .map_err(|e| MockError::BadRequest(anyhow::anyhow!("{e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field
                .content_disposition()
                .and_then(|cd| cd.get_filename())
                .map(str::to_string);
            let content_type = field.content_type().map(|mime| mime.to_string());

            let mut data = Vec::new();
            while let Some(chunk) = field
                .try_next()
                .await
                .map_err(|e| MockError::BadRequest(anyhow::anyhow!("{e}")))?
            {
                data.extend_from_slice(&chunk);
            }

            match file_name {
                Some(file_name) => files.push((
                    RecordedFile {
                        field: name,
                        file_name,
                        content_type,
                        len: data.len(),
                    },
                    data,
                )),
                None => {
                    fields.push((name, String::from_utf8_lossy(&data).into()))
                }
            }
        }
        Ok(Self {
            fields,
            files,
            json: None,
        })
    }

    fn recorded(&self, request: &HttpRequest) -> RecordedRequest {
        RecordedRequest {
            method: request.method().to_string(),
            path: request.path().to_string(),
            fields: self.fields.clone(),
            files: self.files.iter().map(|(file, _)| file.clone()).collect(),
            json: self.json.clone(),
        }
    }

    /// Merge the submitted values into `record`. The uploaded files are
    /// handed back so they are only stored once the record is valid.
    fn merge(
        self,
        record: &mut Map<String, Value>,
    ) -> Vec<(RecordedFile, Vec<u8>)> {
        if let Some(Value::Object(json)) = self.json {
            record.extend(json);
        }
        for (name, value) in self.fields {
            let value = if NUMERIC_FIELDS.contains(&name.as_str()) {
                number_or_string(value)
            } else {
                Value::String(value)
            };
            record.insert(name, value);
        }
        self.files
    }
}

/// Store uploaded files, appending their urls to `imagenes`.
fn store_files(
    files: Vec<(RecordedFile, Vec<u8>)>,
    record: &mut Map<String, Value>,
    store: &Store,
) {
    for (file, data) in files {
        let content_type = file
            .content_type
            .clone()
            .unwrap_or_else(|| "application/octet-stream".into());
        let url = store.store_upload(&file.file_name, &content_type, data);
        let kind = MediaKind::from_mime(&content_type);
        push_array(record, "imagenes", Value::String(url));
        push_array(record, "tipos_archivos", json!(kind.as_str()));
    }
}

fn number_or_string(value: String) -> Value {
    value
        .trim()
        .parse::<serde_json::Number>()
        .map(Value::Number)
        .unwrap_or(Value::String(value))
}

fn push_array(record: &mut Map<String, Value>, key: &str, value: Value) {
    match record.get_mut(key) {
        Some(Value::Array(values)) => values.push(value),
        _ => {
            record.insert(key.to_string(), Value::Array(vec![value]));
        }
    }
}

/// The checks the real backend applies before storing a record.
fn validate(
    resource: Resource,
    record: &Map<String, Value>,
) -> Result<(), MockError> {
    let present = |key: &str| match record.get(key) {
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Null) | None => false,
        Some(_) => true,
    };
    let positive = |key: &str| {
        record
            .get(key)
            .and_then(payloads::normalize::decimal_from_value)
            .is_some_and(|value| value > rust_decimal::Decimal::ZERO)
    };

    let mut problems = Vec::new();
    match resource {
        Resource::Inmobiliaria => {
            if !present("titulo") {
                problems.push("El título es obligatorio");
            }
            if !positive("precio") {
                problems.push("El precio debe ser un número positivo");
            }
        }
        Resource::Subastas => {
            if !present("titulo") {
                problems.push("El título es obligatorio");
            }
            if !positive("precioInicial") {
                problems.push("El precio inicial debe ser un número positivo");
            }
        }
        Resource::Martillero => {
            if !present("marca") {
                problems.push("La marca es obligatoria");
            }
            if !present("modelo") {
                problems.push("El modelo es obligatorio");
            }
        }
    }
    if problems.is_empty() {
        Ok(())
    } else {
        Err(MockError::Validation(
            problems.into_iter().map(str::to_string).collect(),
        ))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MockError {
    #[error("Recurso desconocido: {0}")]
    UnknownResource(String),
    #[error("Registro no encontrado")]
    NotFound,
    #[error("Error de validación")]
    Validation(Vec<String>),
    #[error("Se permiten como máximo {MAX_STAGED_FILES} archivos")]
    TooManyFiles,
    #[error("Solicitud inválida")]
    BadRequest(#[source] anyhow::Error),
}

impl ResponseError for MockError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::UnknownResource(_) | Self::NotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::TooManyFiles | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let body = match self {
            Self::Validation(problems) => json!({
                "error": self.to_string(),
                "detalles": problems
                    .iter()
                    .map(|msg| json!({ "msg": msg }))
                    .collect::<Vec<_>>(),
            }),
            Self::BadRequest(e) => json!({ "message": format!("{self}: {e}") }),
            _ => json!({ "error": self.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[tracing::instrument(ret)]
#[get("/health_check")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().body("healthy")
}

#[tracing::instrument(skip(store))]
#[get("/uploads/{key}")]
pub async fn get_upload(
    key: web::Path<String>,
    store: web::Data<Store>,
) -> Result<HttpResponse, MockError> {
    let inner = store.lock();
    let upload = inner.uploads.get(key.as_str()).ok_or(MockError::NotFound)?;
    Ok(HttpResponse::Ok()
        .content_type(upload.content_type.as_str())
        .body(upload.data.clone()))
}

#[tracing::instrument(skip(request, store))]
#[get("/{resource}")]
pub async fn list_records(
    request: HttpRequest,
    resource: web::Path<String>,
    store: web::Data<Store>,
) -> Result<HttpResponse, MockError> {
    let resource = parse_resource(&resource)?;
    store.record(read_request(&request));
    store.wait_if_delayed().await;
    Ok(HttpResponse::Ok().json(store.records(resource)))
}

#[tracing::instrument(skip(request, store))]
#[get("/{resource}/{id}")]
pub async fn get_record(
    request: HttpRequest,
    path: web::Path<(String, String)>,
    store: web::Data<Store>,
) -> Result<HttpResponse, MockError> {
    let (resource, id) = path.into_inner();
    let resource = parse_resource(&resource)?;
    store.record(read_request(&request));
    store.wait_if_delayed().await;
    let record = store.get(resource, &id).ok_or(MockError::NotFound)?;
    Ok(HttpResponse::Ok().json(record))
}

#[tracing::instrument(skip(request, payload, store))]
#[post("/{resource}")]
pub async fn create_record(
    request: HttpRequest,
    resource: web::Path<String>,
    payload: web::Payload,
    store: web::Data<Store>,
) -> Result<HttpResponse, MockError> {
    let resource = parse_resource(&resource)?;
    let submission = Submission::read(&request, payload).await?;
    store.record(submission.recorded(&request));
    store.wait_if_delayed().await;
    if let Some((status, body)) = store.take_failure() {
        return Ok(HttpResponse::build(status).json(body));
    }
    if submission.files.len() > MAX_STAGED_FILES {
        return Err(MockError::TooManyFiles);
    }

    let mut record = Map::new();
    let files = submission.merge(&mut record);
    validate(resource, &record)?;
    store_files(files, &mut record, &store);
    let id = store.insert(resource, Value::Object(record));
    let stored = store.get(resource, &id).ok_or(MockError::NotFound)?;
    Ok(HttpResponse::Created().json(stored))
}

#[tracing::instrument(skip(request, payload, store))]
#[put("/{resource}/{id}")]
pub async fn update_record(
    request: HttpRequest,
    path: web::Path<(String, String)>,
    payload: web::Payload,
    store: web::Data<Store>,
) -> Result<HttpResponse, MockError> {
    let (resource, id) = path.into_inner();
    let resource = parse_resource(&resource)?;
    let submission = Submission::read(&request, payload).await?;
    store.record(submission.recorded(&request));
    store.wait_if_delayed().await;
    if let Some((status, body)) = store.take_failure() {
        return Ok(HttpResponse::build(status).json(body));
    }

    let existing = store.get(resource, &id).ok_or(MockError::NotFound)?;
    let Value::Object(mut record) = existing else {
        return Err(MockError::NotFound);
    };
    let stored_files = record
        .get("imagenes")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    if stored_files + submission.files.len() > MAX_STAGED_FILES {
        return Err(MockError::TooManyFiles);
    }
    let files = submission.merge(&mut record);
    validate(resource, &record)?;
    store_files(files, &mut record, &store);
    let record = Value::Object(record);
    store.replace(resource, &id, record.clone());
    Ok(HttpResponse::Ok().json(record))
}

#[tracing::instrument(skip(request, store))]
#[delete("/{resource}/{id}")]
pub async fn delete_record(
    request: HttpRequest,
    path: web::Path<(String, String)>,
    store: web::Data<Store>,
) -> Result<HttpResponse, MockError> {
    let (resource, id) = path.into_inner();
    let resource = parse_resource(&resource)?;
    store.record(read_request(&request));
    if let Some((status, body)) = store.take_failure() {
        return Ok(HttpResponse::build(status).json(body));
    }
    if !store.remove(resource, &id) {
        return Err(MockError::NotFound);
    }
    Ok(HttpResponse::NoContent().finish())
}

fn read_request(request: &HttpRequest) -> RecordedRequest {
    RecordedRequest {
        method: request.method().to_string(),
        path: request.path().to_string(),
        fields: Vec::new(),
        files: Vec::new(),
        json: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_fields_are_stored_as_numbers() {
        assert_eq!(number_or_string("150000".into()), json!(150000));
        assert_eq!(number_or_string("12.5".into()), json!(12.5));
        assert_eq!(number_or_string("doce".into()), json!("doce"));
    }

    #[test]
    fn validation_reports_every_problem() {
        let record = Map::new();
        match validate(Resource::Inmobiliaria, &record) {
            Err(MockError::Validation(problems)) => {
                assert_eq!(problems.len(), 2)
            }
            other => panic!("Expected validation error, got {other:?}"),
        }

        let Value::Object(record) = json!({"marca": "Ford", "modelo": "Ka"})
        else {
            unreachable!()
        };
        assert!(validate(Resource::Martillero, &record).is_ok());
    }

    #[test]
    fn store_assigns_ids() {
        let store = Store::default();
        let id = store.insert(Resource::Subastas, json!({"titulo": "x"}));
        let kept = store.insert(Resource::Subastas, json!({"id": 9}));
        assert_eq!(kept, "9");
        assert!(store.get(Resource::Subastas, &id).is_some());
        assert!(store.remove(Resource::Subastas, &id));
        assert!(store.get(Resource::Subastas, &id).is_none());
        assert_eq!(store.records(Resource::Subastas).len(), 1);
    }
}
