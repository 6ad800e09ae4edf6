//! Sample listings for the dev server and for tests that need a populated
//! backend.
//!
//! Most records are created through the API client so they go through the
//! same multipart and JSON paths as the admin forms. A few are inserted
//! directly in the shapes older records were stored in (legacy `imagen`,
//! numbers as strings, vehicle details only under `detalles`).

use crate::{TestApp, casa_x, hilux, image_file, lote_auction, video_file};
use anyhow::{Context, Result};
use payloads::requests::{
    AuctionForm, FileField, MultipartSubmission, PropertyForm, VehicleForm,
};
use payloads::{Auction, Blanks, Property, Resource, Vehicle};
use rust_decimal::dec;
use serde_json::json;

const NOT_ECHOED: &str = "the backend did not return the created listing";

pub struct DevDataset {
    pub casa: Property,
    pub departamento: Property,
    pub legacy_property: Property,
    pub upcoming_auction: Auction,
    pub closed_auction: Auction,
    pub hilux: Vehicle,
    pub detalles_only_vehicle: Vehicle,
}

impl DevDataset {
    pub async fn create(app: &TestApp) -> Result<Self> {
        tracing::info!("🏠 Creating real-estate listings");
        let casa = app
            .client
            .create_property(MultipartSubmission::new(
                &casa_x(),
                FileField::Archivos,
                vec![image_file("frente.jpg"), video_file("recorrido.mp4")],
            ))
            .await?
            .context(NOT_ECHOED)?;

        let departamento_form = PropertyForm {
            titulo: "Departamento céntrico".into(),
            descripcion: "Dos ambientes con balcón".into(),
            precio: Some(dec!(450)),
            tipo: "departamento".into(),
            operacion: "alquiler".into(),
            direccion: "San Martín 1200".into(),
            metros: Some(dec!(48.5)),
            habitaciones: Some(1),
        };
        let departamento = app
            .client
            .create_property(MultipartSubmission::new(
                &departamento_form,
                FileField::Archivos,
                vec![image_file("living.jpg")],
            ))
            .await?
            .context(NOT_ECHOED)?;

        let legacy_id = app.seed(
            Resource::Inmobiliaria,
            json!({
                "titulo": "Terreno en esquina",
                "precio": "$ 38000",
                "tipo": "terreno",
                "operacion": "venta",
                "direccion": "Ruta 5 km 12",
                "imagen": "https://picsum.photos/seed/terreno/800/600",
            }),
        );
        let legacy_property = app.client.get_property(&legacy_id).await?;

        tracing::info!("🏛️ Creating auctions");
        let upcoming_auction = app
            .client
            .create_auction(MultipartSubmission::new(
                &lote_auction(),
                FileField::Imagenes,
                vec![image_file("lote14.jpg")],
            ))
            .await?
            .context(NOT_ECHOED)?;

        let closed_form = AuctionForm {
            titulo: "Remate de maquinaria agrícola".into(),
            inicio_fecha: Some("2024-03-01T12:00:00Z".parse()?),
            fin_fecha: Some("2024-03-15T12:00:00Z".parse()?),
            precio_inicial: Some(dec!(800000)),
            precio_actual: Some(dec!(1150000)),
            estado: "finalizada".into(),
            categoria: "maquinaria".into(),
            ofertas: 17,
            ..Default::default()
        };
        let closed_auction = app
            .client
            .create_auction(MultipartSubmission::new(
                &closed_form,
                FileField::Imagenes,
                Vec::new(),
            ))
            .await?
            .context(NOT_ECHOED)?;

        tracing::info!("🚗 Creating vehicles");
        let hilux = app
            .client
            .create_vehicle(&hilux().body(Blanks::Omit))
            .await?
            .context(NOT_ECHOED)?;

        let detalles_id = app.seed(
            Resource::Martillero,
            json!({
                "marca": "Ford",
                "modelo": "Ranger",
                "precio": 27500,
                "tipo": "camioneta",
                "estado": "reservado",
                "detalles": {
                    "año": 2019,
                    "km": "85000",
                    "combustible": "diesel",
                    "transmision": "automatica",
                    "color": "gris",
                },
            }),
        );
        let detalles_only_vehicle = app.client.get_vehicle(&detalles_id).await?;

        // one more so the list filters have something to hide
        let _ = app
            .client
            .create_vehicle(
                &VehicleForm {
                    marca: "Fiat".into(),
                    modelo: "Cronos".into(),
                    anio: Some(2023),
                    precio: Some(dec!(18900)),
                    tipo: "sedan".into(),
                    estado: "vendido".into(),
                    ..Default::default()
                }
                .body(Blanks::Omit),
            )
            .await?;

        Ok(Self {
            casa,
            departamento,
            legacy_property,
            upcoming_auction,
            closed_auction,
            hilux,
            detalles_only_vehicle,
        })
    }

    pub fn print_summary(&self) {
        tracing::info!("📋 Available test data:");
        tracing::info!("   🏠 inmobiliaria:");
        for property in
            [&self.casa, &self.departamento, &self.legacy_property]
        {
            tracing::info!(
                "      - {} ({}): {} / {}, {} media",
                property.titulo,
                property.id,
                property.tipo,
                property.operacion,
                property.media.items().len()
            );
        }
        tracing::info!("   🏛️ subastas:");
        for auction in [&self.upcoming_auction, &self.closed_auction] {
            tracing::info!(
                "      - {} ({}): {}, {} ofertas",
                auction.titulo,
                auction.id,
                auction.estado,
                auction.ofertas
            );
        }
        tracing::info!("   🚗 martillero:");
        for vehicle in [&self.hilux, &self.detalles_only_vehicle] {
            tracing::info!(
                "      - {} ({}): {}",
                vehicle.display_name(),
                vehicle.id,
                vehicle.estado.as_deref().unwrap_or("-")
            );
        }
    }
}
