use payloads::requests::{FileField, MultipartSubmission, PropertyForm};
use payloads::{ClientError, ListingId, StatusCode};
use serde_json::json;
use test_helpers::{assert_status_code, casa_x, image_file, spawn_app};

#[tokio::test]
async fn validation_details_are_joined() -> anyhow::Result<()> {
    let app = spawn_app().await;

    // skip the client-side checks to see what the backend answers
    let form = PropertyForm {
        tipo: "casa".into(),
        ..Default::default()
    };
    let result = app
        .client
        .create_property(MultipartSubmission::new(
            &form,
            FileField::Archivos,
            vec![],
        ))
        .await;

    let error = result.expect_err("backend should reject the listing");
    assert_eq!(error.status(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(
        error.user_message("Error al crear la propiedad"),
        "El título es obligatorio, El precio debe ser un número positivo"
    );

    Ok(())
}

#[tokio::test]
async fn too_many_files_are_refused() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let files = (0..11).map(|i| image_file(&format!("{i}.jpg"))).collect();

    let result = app
        .client
        .create_property(MultipartSubmission::new(
            &casa_x(),
            FileField::Archivos,
            files,
        ))
        .await;

    let error = result.expect_err("more than ten files");
    assert_eq!(
        error.user_message("Error al crear la propiedad"),
        "Se permiten como máximo 10 archivos"
    );
    assert_eq!(app.store.upload_count(), 0);

    Ok(())
}

#[tokio::test]
async fn missing_records_are_not_found() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let id = ListingId::from("desconocido");

    assert_status_code(app.client.get_vehicle(&id).await, StatusCode::NOT_FOUND);
    assert_status_code(
        app.client.delete_property(&id).await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}

#[tokio::test]
async fn plain_text_errors_use_fallback() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.store.fail_next(502, json!("Bad Gateway"));

    let error = app
        .client
        .delete_property(&ListingId::from("x"))
        .await
        .expect_err("forced failure");
    assert!(matches!(error, ClientError::APIError(..)));
    assert_eq!(error.status(), Some(StatusCode::BAD_GATEWAY));
    assert_eq!(error.user_message("Error al eliminar"), "Error al eliminar");

    Ok(())
}

#[tokio::test]
async fn rejected_listing_stores_no_uploads() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let form = PropertyForm {
        tipo: "casa".into(),
        ..Default::default()
    };

    let result = app
        .client
        .create_property(MultipartSubmission::new(
            &form,
            FileField::Archivos,
            vec![image_file("a.jpg"), image_file("b.jpg")],
        ))
        .await;

    assert_status_code(result, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.upload_count(), 0);
    assert!(app.store.records(payloads::Resource::Inmobiliaria).is_empty());

    Ok(())
}

#[tokio::test]
async fn odd_detalles_keep_error_message() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.store.fail_next(
        400,
        json!({"error": "Título duplicado", "detalles": "titulo"}),
    );

    let error = app
        .client
        .create_property(MultipartSubmission::new(
            &casa_x(),
            FileField::Archivos,
            vec![],
        ))
        .await
        .expect_err("forced failure");
    assert_eq!(
        error.user_message("Error al crear la propiedad"),
        "Título duplicado"
    );

    Ok(())
}
