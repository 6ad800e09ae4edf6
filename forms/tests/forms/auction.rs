use crate::previews;
use forms::AuctionFormSession;
use payloads::MediaKind;
use payloads::requests::FileField;
use rust_decimal::dec;
use test_helpers::{image_file, lote_auction, spawn_app, video_file};

#[tokio::test]
async fn auction_files_go_under_imagenes() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (previews, allocator) = previews();
    let mut session =
        AuctionFormSession::new(allocator).with_file_field(FileField::Imagenes);
    session.form = lote_auction();
    session.add_files([image_file("frente.jpg"), video_file("motor.mp4")])?;

    let auction = session.submit(&app.client).await?
        .expect("stored record");

    let writes = app.writes_to("/subastas");
    assert_eq!(writes.len(), 1);
    let request = &writes[0];
    assert!(request.files.iter().all(|f| f.field == "imagenes"));
    assert_eq!(request.files.len(), 2);
    assert_eq!(request.field("precioActual"), Some("2500000"));
    assert_eq!(request.field("estado"), Some("activa"));
    assert_eq!(request.field("ofertas"), Some("0"));
    assert_eq!(request.field("inicioFecha"), Some("2025-06-01T13:00:00Z"));

    assert_eq!(auction.precio_inicial, dec!(2500000));
    assert_eq!(auction.precio_actual, Some(dec!(2500000)));
    assert_eq!(auction.media.kinds, [MediaKind::Image, MediaKind::Video]);
    assert_eq!(auction.inicio_fecha, lote_auction().inicio_fecha);
    assert_eq!(previews.outstanding(), 0);

    Ok(())
}

#[tokio::test]
async fn auction_defaults_to_archivos() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (_, allocator) = previews();
    let mut session = AuctionFormSession::new(allocator);
    session.form = lote_auction();
    session.add_files([image_file("a.jpg")])?;
    session.submit(&app.client).await?;

    let writes = app.writes_to("/subastas");
    assert_eq!(writes[0].files[0].field, "archivos");

    Ok(())
}

#[tokio::test]
async fn edit_never_resends_stored_media() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (previews, allocator) = previews();
    let mut create = AuctionFormSession::new(allocator.clone());
    create.form = lote_auction();
    create.add_files([image_file("a.jpg"), video_file("b.mp4")])?;
    let created = create.submit(&app.client).await?
        .expect("stored record");

    let mut edit = AuctionFormSession::new(allocator);
    edit.load(&app.client, created.id.clone()).await?;
    let names: Vec<_> = edit
        .media
        .entries()
        .iter()
        .map(|e| e.display_name.as_str())
        .collect();
    assert_eq!(names, ["image_1", "video_2"]);
    assert_eq!(edit.form.precio_actual, Some(dec!(2500000)));

    // removing a stored entry has no preview to release
    let released = previews.released();
    assert_eq!(edit.media.remove_at(0).as_deref(), Some("image_1"));
    assert_eq!(previews.released(), released);

    edit.form.ofertas = 3;
    let updated = edit.submit(&app.client).await?
        .expect("stored record");

    let path = format!("/subastas/{}", created.id);
    let writes = app.writes_to(&path);
    assert_eq!(writes.len(), 1);
    assert!(writes[0].files.is_empty());
    assert_eq!(writes[0].field("ofertas"), Some("3"));
    assert_eq!(updated.ofertas, 3);
    assert_eq!(updated.media.urls.len(), 2);

    Ok(())
}
