pub mod backend;
pub mod mock;
pub mod telemetry;

use backend::{Config, Store};
use payloads::requests::{AuctionForm, PropertyForm, VehicleForm};
use payloads::{Resource, UploadFile};
use reqwest::StatusCode;
use rust_decimal::dec;
use serde_json::Value;
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;

pub struct TestApp {
    pub port: u16,
    pub client: payloads::APIClient,
    /// State of the stand-in backend, for seeding and for inspecting the
    /// requests it received.
    pub store: Store,
}

impl TestApp {
    pub fn address(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// A second client pointed at the same backend.
    pub fn new_client(&self) -> payloads::APIClient {
        payloads::APIClient::new(self.address())
    }

    /// Insert a raw record the way the backend would have stored it.
    pub fn seed(&self, resource: Resource, record: Value) -> payloads::ListingId {
        payloads::ListingId(self.store.insert(resource, record))
    }

    /// Writes received for `path`, oldest first.
    pub fn writes_to(&self, path: &str) -> Vec<backend::RecordedRequest> {
        self.store
            .writes()
            .into_iter()
            .filter(|request| request.path == path)
            .collect()
    }
}

/// Start the stand-in backend with `config` on the current tokio runtime.
pub fn start(mut config: Config) -> std::io::Result<TestApp> {
    let store = Store::default();
    let server = backend::build(&mut config, store.clone())?;
    tokio::spawn(server);

    Ok(TestApp {
        port: config.port,
        client: payloads::APIClient::new(format!(
            "http://127.0.0.1:{}",
            config.port
        )),
        store,
    })
}

pub async fn spawn_app_on_port(port: u16) -> TestApp {
    let subscriber = telemetry::get_subscriber("error".into());
    let _ = LogTracer::init();
    let _ = subscriber.try_init();

    start(Config {
        port,
        ..Config::local()
    })
    .unwrap()
}

pub async fn spawn_app() -> TestApp {
    spawn_app_on_port(0).await
}

/// Assert that the result of an API action results in a specific status code.
pub fn assert_status_code<T>(
    result: Result<T, payloads::ClientError>,
    expected: StatusCode,
) {
    match result {
        Err(payloads::ClientError::APIError(code, _)) => {
            assert_eq!(code, expected)
        }
        _ => panic!("Expected APIError"),
    };
}

/// A small file standing in for a picked JPEG.
pub fn image_file(name: &str) -> UploadFile {
    UploadFile::new(name, "image/jpeg", name.as_bytes().to_vec())
}

/// A small file standing in for a picked MP4.
pub fn video_file(name: &str) -> UploadFile {
    UploadFile::new(name, "video/mp4", name.as_bytes().to_vec())
}

pub fn casa_x() -> PropertyForm {
    PropertyForm {
        titulo: "Casa X".into(),
        precio: Some(dec!(150000)),
        tipo: "casa".into(),
        operacion: "venta".into(),
        direccion: "Calle 1".into(),
        ..Default::default()
    }
}

pub fn lote_auction() -> AuctionForm {
    AuctionForm {
        titulo: "Lote 14 - Camioneta".into(),
        descripcion: "Subasta judicial".into(),
        inicio_fecha: Some("2025-06-01T13:00:00Z".parse().unwrap()),
        fin_fecha: Some("2025-06-08T13:00:00Z".parse().unwrap()),
        precio_inicial: Some(dec!(2500000)),
        categoria: "vehiculos".into(),
        ..Default::default()
    }
}

pub fn hilux() -> VehicleForm {
    VehicleForm {
        marca: "Toyota".into(),
        modelo: "Hilux".into(),
        anio: Some(2021),
        precio: Some(dec!(32000)),
        kilometraje: Some(40000),
        combustible: "diesel".into(),
        transmision: "manual".into(),
        tipo: "camioneta".into(),
        estado: "disponible".into(),
        ..Default::default()
    }
}
