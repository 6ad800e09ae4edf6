use payloads::requests::{FileField, MultipartSubmission, PropertyForm};
use payloads::{Blanks, ListingFilter, Selection, StatusCode};
use rust_decimal::dec;
use test_helpers::{
    assert_status_code, casa_x, hilux, image_file, lote_auction, spawn_app,
};

#[tokio::test]
async fn create_read_update_delete_property() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let created = app
        .client
        .create_property(MultipartSubmission::new(
            &casa_x(),
            FileField::Archivos,
            vec![image_file("a.jpg")],
        ))
        .await?
        .expect("created property");
    assert_eq!(created.titulo, "Casa X");
    assert_eq!(created.media.urls.len(), 1);

    let fetched = app.client.get_property(&created.id).await?;
    assert_eq!(fetched, created);

    let form = PropertyForm {
        metros: Some(dec!(120.5)),
        habitaciones: Some(3),
        ..PropertyForm::from(&fetched)
    };
    let updated = app
        .client
        .update_property(
            &created.id,
            MultipartSubmission::update(&form, FileField::Archivos, vec![]),
        )
        .await?
        .expect("updated property");
    assert_eq!(updated.metros, Some(dec!(120.5)));
    assert_eq!(updated.habitaciones, Some(3));
    assert_eq!(updated.media.urls, created.media.urls);

    assert_eq!(app.client.list_properties().await?.len(), 1);

    app.client.delete_property(&created.id).await?;
    assert_status_code(
        app.client.get_property(&created.id).await,
        StatusCode::NOT_FOUND,
    );
    assert!(app.client.list_properties().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn create_read_delete_auction() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let created = app
        .client
        .create_auction(MultipartSubmission::new(
            &lote_auction(),
            FileField::Imagenes,
            vec![],
        ))
        .await?
        .expect("created auction");
    assert_eq!(created.estado, "activa");
    assert_eq!(created.categoria.as_deref(), Some("vehiculos"));
    assert!(created.fin_fecha > created.inicio_fecha);

    let auctions = app.client.list_auctions().await?;
    assert_eq!(auctions, [created.clone()]);

    app.client.delete_auction(&created.id).await?;
    assert_status_code(
        app.client.delete_auction(&created.id).await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}

#[tokio::test]
async fn create_update_delete_vehicle() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let created = app
        .client
        .create_vehicle(&hilux().body(Blanks::Omit))
        .await?
        .expect("created vehicle");
    assert_eq!(created.kilometraje, Some(40000));

    let mut form = hilux();
    form.estado = "vendido".into();
    let updated = app
        .client
        .update_vehicle(&created.id, &form.body(Blanks::Clear))
        .await?
        .expect("updated vehicle");
    assert_eq!(updated.estado.as_deref(), Some("vendido"));
    assert_eq!(app.client.get_vehicle(&created.id).await?, updated);

    app.client.delete_vehicle(&created.id).await?;
    assert!(app.client.list_vehicles().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn list_filter_over_fetched_listings() -> anyhow::Result<()> {
    let app = spawn_app().await;
    test_helpers::mock::DevDataset::create(&app).await?;

    let properties = app.client.list_properties().await?;
    assert_eq!(properties.len(), 3);

    let for_sale = ListingFilter {
        operation: Selection::from("VENTA"),
        ..Default::default()
    };
    let titles: Vec<_> = for_sale
        .apply(&properties)
        .into_iter()
        .map(|p| p.titulo.as_str())
        .collect();
    assert_eq!(titles, ["Casa X", "Terreno en esquina"]);

    let vehicles = app.client.list_vehicles().await?;
    let available = ListingFilter {
        status: "disponible".into(),
        ..Default::default()
    };
    assert_eq!(available.apply(&vehicles).len(), 1);
    assert_eq!(ListingFilter::default().apply(&vehicles).len(), 3);

    Ok(())
}
