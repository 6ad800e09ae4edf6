use payloads::{MediaKind, Resource};
use rust_decimal::dec;
use serde_json::json;
use test_helpers::spawn_app;

#[tokio::test]
async fn drifting_records_are_normalized() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed(
        Resource::Martillero,
        json!({
            "id": 41,
            "marca": " Peugeot ",
            "modelo": "208",
            "precio": "$ 14500.50",
            "year": 2020,
            "kilometros": 61000,
        }),
    );
    app.seed(
        Resource::Martillero,
        json!({
            "_id": "abc",
            "marca": "Renault",
            "modelo": "Kangoo",
            "detalles": {"anio": "2017", "kilometraje": 120000},
        }),
    );

    let vehicles = app.client.list_vehicles().await?;
    assert_eq!(vehicles.len(), 2);

    assert_eq!(vehicles[0].id.0, "41");
    assert_eq!(vehicles[0].marca, "Peugeot");
    assert_eq!(vehicles[0].precio, dec!(14500.50));
    assert_eq!(vehicles[0].anio, Some(2020));
    assert_eq!(vehicles[0].kilometraje, Some(61000));

    assert_eq!(vehicles[1].id.0, "abc");
    assert_eq!(vehicles[1].precio, dec!(0));
    assert_eq!(vehicles[1].anio, Some(2017));
    assert_eq!(vehicles[1].kilometraje, Some(120000));

    Ok(())
}

#[tokio::test]
async fn malformed_records_are_skipped() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed(Resource::Subastas, json!({"titulo": "Con id"}));
    app.store.insert(Resource::Subastas, json!("no es un objeto"));

    let auctions = app.client.list_auctions().await?;
    assert_eq!(auctions.len(), 1);
    assert_eq!(auctions[0].titulo, "Con id");
    assert_eq!(auctions[0].ofertas, 0);
    assert_eq!(auctions[0].precio_actual, None);

    Ok(())
}

#[tokio::test]
async fn media_kinds_and_dates() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let id = app.seed(
        Resource::Subastas,
        json!({
            "titulo": "Lote 9",
            "precioInicial": 100,
            "inicioFecha": "2025-02-01T10:00:00",
            "finFecha": "no es una fecha",
            "imagenes": ["/uploads/a.jpg", 7, "/uploads/b.mp4", "/uploads/c.jpg"],
            "tipos_archivos": ["image", "video"],
        }),
    );

    let auction = app.client.get_auction(&id).await?;
    assert_eq!(
        auction.inicio_fecha,
        Some("2025-02-01T10:00:00Z".parse::<jiff::Timestamp>()?)
    );
    assert_eq!(auction.fin_fecha, None);

    let items = auction.media.items();
    let summary: Vec<_> = items
        .iter()
        .map(|item| (item.name.as_str(), item.kind))
        .collect();
    assert_eq!(
        summary,
        [
            ("image_1", MediaKind::Image),
            ("video_2", MediaKind::Video),
            ("image_3", MediaKind::Image),
        ]
    );
    assert_eq!(
        auction.media.cover().map(|c| c.url).as_deref(),
        Some("/uploads/a.jpg")
    );

    Ok(())
}
