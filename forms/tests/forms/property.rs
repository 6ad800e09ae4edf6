use crate::previews;
use forms::{LoadError, PropertyFormSession, SubmitError, SubmitState};
use payloads::requests::PropertyForm;
use payloads::{MediaKind, Resource};
use rust_decimal::dec;
use serde_json::json;
use std::time::Duration;
use test_helpers::{casa_x, image_file, spawn_app, video_file};

#[tokio::test]
async fn create_property_with_two_files() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (previews, allocator) = previews();
    let mut session = PropertyFormSession::new(allocator);
    session.form = casa_x();
    session.add_files([image_file("a.jpg"), image_file("b.jpg")])?;
    assert_eq!(previews.outstanding(), 2);

    let property = session.submit(&app.client).await?
        .expect("stored record");

    let writes = app.store.writes();
    assert_eq!(writes.len(), 1);
    let request = &writes[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/inmobiliaria");
    assert_eq!(
        request.field_names(),
        ["titulo", "precio", "tipo", "operacion", "direccion"]
    );
    assert_eq!(request.field("precio"), Some("150000"));
    let files: Vec<_> = request
        .files
        .iter()
        .map(|f| (f.field.as_str(), f.file_name.as_str()))
        .collect();
    assert_eq!(files, [("archivos", "a.jpg"), ("archivos", "b.jpg")]);

    assert_eq!(property.titulo, "Casa X");
    assert_eq!(property.precio, dec!(150000));
    assert_eq!(property.media.items().len(), 2);
    assert_eq!(app.store.records(Resource::Inmobiliaria).len(), 1);

    assert_eq!(previews.outstanding(), 0);
    assert_eq!(previews.released(), 2);
    assert_eq!(session.state(), &SubmitState::Succeeded);
    assert!(session.media.is_empty());

    Ok(())
}

#[tokio::test]
async fn successful_form_cannot_be_sent_again() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (_, allocator) = previews();
    let mut session = PropertyFormSession::new(allocator);
    session.form = casa_x();
    session.submit(&app.client).await?;

    let again = session.submit(&app.client).await;
    assert_eq!(again.err(), Some(SubmitError::AlreadySubmitted));
    assert_eq!(app.store.writes().len(), 1);

    Ok(())
}

#[tokio::test]
async fn failed_submit_keeps_files_for_retry() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (previews, allocator) = previews();
    let mut session = PropertyFormSession::new(allocator);
    session.form = casa_x();
    session.add_files([image_file("a.jpg"), video_file("b.mp4")])?;

    app.store.fail_next(
        400,
        json!({
            "error": "Error de validación",
            "detalles": [{"message": "Precio fuera de rango"}, {"msg": "Dirección inválida"}],
        }),
    );
    let result = session.submit(&app.client).await;
    let message = "Precio fuera de rango, Dirección inválida";
    assert_eq!(result.err(), Some(SubmitError::Rejected(message.into())));
    assert_eq!(session.state(), &SubmitState::Failed(message.into()));
    assert_eq!(previews.outstanding(), 2);
    assert_eq!(session.media.len(), 2);

    let property = session.submit(&app.client).await?
        .expect("stored record");
    assert_eq!(property.media.kinds, [MediaKind::Image, MediaKind::Video]);
    assert_eq!(app.store.writes().len(), 2);
    assert_eq!(previews.outstanding(), 0);

    Ok(())
}

#[tokio::test]
async fn invalid_form_sends_nothing() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (_, allocator) = previews();
    let mut session = PropertyFormSession::new(allocator);
    session.form = PropertyForm {
        precio: Some(dec!(0)),
        ..casa_x()
    };

    let result = session.submit(&app.client).await;
    assert!(matches!(result, Err(SubmitError::Invalid(_))));
    assert_eq!(
        session.state(),
        &SubmitState::Failed("El precio debe ser mayor a 0".into())
    );
    assert!(app.store.requests().is_empty());

    Ok(())
}

#[tokio::test]
async fn cancelled_submit_is_not_applied() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (previews, allocator) = previews();
    let mut session = PropertyFormSession::new(allocator);
    session.form = casa_x();
    session.add_files([image_file("a.jpg")])?;

    app.store.delay_next(Duration::from_millis(500));
    let cancellation = session.cancellation();
    let (result, cancelled) = tokio::join!(session.submit(&app.client), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancellation.cancel()
    });

    assert!(cancelled);
    assert_eq!(result.err(), Some(SubmitError::Cancelled));
    assert_eq!(session.state(), &SubmitState::Idle);
    assert_eq!(previews.outstanding(), 1);

    // the form can still be sent afterwards
    session.submit(&app.client).await?;
    assert_eq!(previews.outstanding(), 0);

    Ok(())
}

#[tokio::test]
async fn edit_loads_legacy_image() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let id = app.seed(
        Resource::Inmobiliaria,
        json!({
            "titulo": "Casa vieja",
            "precio": "95000",
            "tipo": "casa",
            "operacion": "venta",
            "direccion": "Calle 3",
            "imagen": "https://cdn.example.com/vieja.jpg",
        }),
    );

    let (previews, allocator) = previews();
    let mut session = PropertyFormSession::new(allocator);
    session.load(&app.client, id.clone()).await?;

    assert_eq!(session.editing(), Some(&id));
    assert_eq!(session.form.titulo, "Casa vieja");
    assert_eq!(session.form.precio, Some(dec!(95000)));
    let entries = session.media.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].display_name, "imagen_principal");
    assert_eq!(entries[0].kind, MediaKind::Image);
    assert_eq!(entries[0].locator(), "https://cdn.example.com/vieja.jpg");
    assert!(!entries[0].is_new());
    assert_eq!(previews.allocated(), 0);

    session.add_files([image_file("nueva.jpg")])?;
    session.form.titulo = "Casa renovada".into();
    let property = session.submit(&app.client).await?
        .expect("stored record");

    let writes = app.writes_to(&format!("/inmobiliaria/{id}"));
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].method, "PUT");
    assert_eq!(writes[0].files.len(), 1);
    assert_eq!(writes[0].files[0].file_name, "nueva.jpg");
    assert_eq!(property.titulo, "Casa renovada");
    assert_eq!(property.media.urls.len(), 1);

    Ok(())
}

#[tokio::test]
async fn load_failure_keeps_defaults() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (_, allocator) = previews();
    let mut session = PropertyFormSession::new(allocator);

    let result = session.load(&app.client, "no-existe".into()).await;
    assert_eq!(
        result,
        Err(LoadError::Failed("Registro no encontrado".into()))
    );
    assert_eq!(session.load_error(), Some("Registro no encontrado"));
    assert_eq!(session.form, PropertyForm::default());
    assert!(session.media.is_empty());

    Ok(())
}

#[tokio::test]
async fn success_without_record_body_still_completes() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (previews, allocator) = previews();
    let mut session = PropertyFormSession::new(allocator);
    session.form = casa_x();
    session.add_files([image_file("a.jpg")])?;

    app.store.fail_next(201, json!({"message": "Propiedad creada"}));
    let saved = session.submit(&app.client).await?;

    assert!(saved.is_none());
    assert_eq!(session.state(), &SubmitState::Succeeded);
    assert_eq!(previews.outstanding(), 0);
    assert_eq!(
        session.submit(&app.client).await.err(),
        Some(SubmitError::AlreadySubmitted)
    );

    Ok(())
}

#[tokio::test]
async fn edit_can_clear_optional_fields() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let id = app.seed(
        Resource::Inmobiliaria,
        json!({
            "titulo": "Casa con patio",
            "descripcion": "vieja",
            "precio": 120000,
            "tipo": "casa",
            "operacion": "venta",
            "direccion": "Calle 4",
            "metros": 90,
            "habitaciones": 3,
        }),
    );

    let (_, allocator) = previews();
    let mut session = PropertyFormSession::new(allocator);
    session.load(&app.client, id.clone()).await?;
    assert_eq!(session.form.descripcion, "vieja");

    session.form.descripcion.clear();
    session.form.metros = None;
    let property =
        session.submit(&app.client).await?.expect("stored record");

    let writes = app.writes_to(&format!("/inmobiliaria/{id}"));
    assert_eq!(writes[0].field("descripcion"), Some(""));
    assert_eq!(writes[0].field("metros"), Some(""));
    assert_eq!(writes[0].field("habitaciones"), Some("3"));
    assert_eq!(property.descripcion, None);
    assert_eq!(property.metros, None);
    assert_eq!(property.habitaciones, Some(3));
    let stored = app.client.get_property(&id).await?;
    assert_eq!(stored.descripcion, None);

    Ok(())
}
