use forms::{SubmitError, VehicleFormSession};
use payloads::{APIClient, Resource};
use rust_decimal::dec;
use serde_json::json;
use test_helpers::{hilux, spawn_app};

#[tokio::test]
async fn vehicle_is_sent_as_json_with_detalles() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let mut session = VehicleFormSession::new();
    session.form = hilux();

    let vehicle = session.submit(&app.client).await?
        .expect("stored record");

    let writes = app.writes_to("/martillero");
    assert_eq!(writes.len(), 1);
    let request = &writes[0];
    assert!(request.fields.is_empty());
    assert!(request.files.is_empty());
    let body = request.json.as_ref().expect("json body");
    assert_eq!(body["marca"], "Toyota");
    assert_eq!(body["detalles"]["anio"], 2021);
    assert_eq!(body["detalles"]["kilometraje"], 40000);
    assert_eq!(body["detalles"]["transmision"], "manual");

    assert_eq!(vehicle.display_name(), "Toyota Hilux 2021");
    assert_eq!(vehicle.anio, Some(2021));
    assert_eq!(vehicle.precio, dec!(32000));

    Ok(())
}

#[tokio::test]
async fn edit_reads_nested_details() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let id = app.seed(
        Resource::Martillero,
        json!({
            "marca": "Ford",
            "modelo": "Ranger",
            "precio": 27500,
            "detalles": {"año": 2019, "km": "85000", "color": "gris"},
        }),
    );

    let mut session = VehicleFormSession::new();
    session.load(&app.client, id.clone()).await?;
    assert_eq!(session.form.anio, Some(2019));
    assert_eq!(session.form.kilometraje, Some(85000));
    assert_eq!(session.form.color, "gris");

    session.form.precio = Some(dec!(28000));
    let vehicle = session.submit(&app.client).await?
        .expect("stored record");

    let writes = app.writes_to(&format!("/martillero/{id}"));
    assert_eq!(writes[0].method, "PUT");
    let body = writes[0].json.as_ref().expect("json body");
    assert_eq!(body["precio"], 28000.0);
    assert_eq!(body["detalles"]["anio"], 2019);
    assert_eq!(vehicle.precio, dec!(28000));
    assert_eq!(vehicle.kilometraje, Some(85000));

    Ok(())
}

#[tokio::test]
async fn backend_message_is_shown() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let mut session = VehicleFormSession::new();
    session.form = hilux();

    app.store
        .fail_next(500, json!({"message": "Servicio no disponible"}));
    let result = session.submit(&app.client).await;
    assert_eq!(
        result.err(),
        Some(SubmitError::Rejected("Servicio no disponible".into()))
    );

    Ok(())
}

#[tokio::test]
async fn unreachable_backend_uses_fallback() -> anyhow::Result<()> {
    // nothing listens on the discard port
    let client = APIClient::new("http://127.0.0.1:9");
    let mut session = VehicleFormSession::new();
    session.form = hilux();

    let result = session.submit(&client).await;
    assert_eq!(
        result.err(),
        Some(SubmitError::Rejected("Error al crear el vehículo".into()))
    );

    Ok(())
}
