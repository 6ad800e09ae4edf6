//! Typed records produced from backend responses.
//!
//! Backend JSON is loose (optional and renamed fields, numbers sent as
//! strings). [`crate::normalize`] reads it into the records below, which the
//! rest of the workspace uses.

use crate::{ListingId, MediaKind};
use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Media references of a stored record, as sent by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaRefs {
    /// `imagenes`
    pub urls: Vec<String>,
    /// `tipos_archivos`, parallel to `urls`. May be shorter.
    pub kinds: Vec<MediaKind>,
    /// Legacy singular `imagen`.
    pub legacy: Option<String>,
}

/// A displayable media entry of a stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub url: String,
    pub kind: MediaKind,
    pub name: String,
}

pub const LEGACY_IMAGE_NAME: &str = "imagen_principal";

impl MediaRefs {
    /// Expand the stored references into display entries.
    ///
    /// Kinds come from the parallel list and default to image when missing.
    /// Names are `{kind}_{n}` with a 1-based `n`. When there are no urls but
    /// a legacy `imagen` is set, a single entry named `imagen_principal` is
    /// produced.
    pub fn items(&self) -> Vec<MediaItem> {
        if self.urls.is_empty() {
            return match self.legacy.as_deref().map(str::trim) {
                Some(url) if !url.is_empty() => vec![MediaItem {
                    url: url.to_string(),
                    kind: MediaKind::Image,
                    name: LEGACY_IMAGE_NAME.to_string(),
                }],
                _ => Vec::new(),
            };
        }

        self.urls
            .iter()
            .enumerate()
            .map(|(index, url)| {
                let kind = self.kinds.get(index).copied().unwrap_or_default();
                MediaItem {
                    url: url.clone(),
                    kind,
                    name: format!("{kind}_{}", index + 1),
                }
            })
            .collect()
    }

    /// First image to use as a cover in listing cards.
    pub fn cover(&self) -> Option<MediaItem> {
        let items = self.items();
        items
            .iter()
            .find(|item| item.kind == MediaKind::Image)
            .or(items.first())
            .cloned()
    }
}

/// A real-estate listing (`inmobiliaria`).
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub id: ListingId,
    pub titulo: String,
    pub descripcion: Option<String>,
    pub precio: Decimal,
    /// casa, departamento, terreno, ...
    pub tipo: String,
    /// venta or alquiler.
    pub operacion: String,
    pub direccion: String,
    pub metros: Option<Decimal>,
    pub habitaciones: Option<u32>,
    pub media: MediaRefs,
}

/// A vehicle offered by the auctioneer (`martillero`).
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: ListingId,
    pub marca: String,
    pub modelo: String,
    pub anio: Option<i32>,
    pub precio: Decimal,
    pub kilometraje: Option<u64>,
    pub combustible: Option<String>,
    pub transmision: Option<String>,
    pub color: Option<String>,
    /// auto, camioneta, moto, ...
    pub tipo: Option<String>,
    pub estado: Option<String>,
    pub descripcion: Option<String>,
    pub media: MediaRefs,
}

impl Vehicle {
    pub fn display_name(&self) -> String {
        match self.anio {
            Some(anio) => format!("{} {} {anio}", self.marca, self.modelo),
            None => format!("{} {}", self.marca, self.modelo),
        }
    }
}

/// An auction (`subastas`).
#[derive(Debug, Clone, PartialEq)]
pub struct Auction {
    pub id: ListingId,
    pub titulo: String,
    pub descripcion: Option<String>,
    pub inicio_fecha: Option<Timestamp>,
    pub fin_fecha: Option<Timestamp>,
    pub precio_inicial: Decimal,
    pub precio_actual: Option<Decimal>,
    /// activa, finalizada, proxima, ...
    pub estado: String,
    pub categoria: Option<String>,
    pub ofertas: u32,
    pub media: MediaRefs,
}

/// Error object returned by the backend on a rejected request.
///
/// Each key is read on its own: one of unexpected shape is dropped without
/// losing the others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default, deserialize_with = "lenient")]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_details")]
    pub detalles: Option<Vec<ErrorDetail>>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Keeps the readable entries of a `detalles` array.
fn lenient_details<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<ErrorDetail>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_array().map(|entries| {
        entries
            .iter()
            .filter_map(|entry| ErrorDetail::deserialize(entry).ok())
            .collect()
    }))
}

/// One entry of a structured validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Text(String),
    Object {
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        msg: Option<String>,
    },
}

impl ErrorDetail {
    pub fn text(&self) -> Option<&str> {
        let text = match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Object { message, msg } => {
                message.as_deref().or(msg.as_deref())
            }
        };
        text.map(str::trim).filter(|t| !t.is_empty())
    }
}

impl ErrorBody {
    /// Decode a response body, returning `None` if it isn't the backend's
    /// error shape.
    pub fn from_text(text: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(text).ok()?;
        if !value.is_object() {
            return None;
        }
        Self::deserialize(value).ok()
    }

    /// Message to show to the user.
    ///
    /// Priority: `detalles` entries (joined), then `error`, then `message`.
    pub fn user_message(&self) -> Option<String> {
        let details: Vec<&str> = self
            .detalles
            .iter()
            .flatten()
            .filter_map(ErrorDetail::text)
            .collect();
        if !details.is_empty() {
            return Some(details.join(", "));
        }
        [self.error.as_deref(), self.message.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_items_default_kind_when_tags_are_short() {
        let refs = MediaRefs {
            urls: vec!["a.jpg".into(), "b.mp4".into(), "c.jpg".into()],
            kinds: vec![MediaKind::Image, MediaKind::Video],
            legacy: None,
        };
        let names: Vec<_> =
            refs.items().into_iter().map(|item| item.name).collect();
        assert_eq!(names, ["image_1", "video_2", "image_3"]);
    }

    #[test]
    fn media_items_legacy_fallback() {
        let refs = MediaRefs {
            urls: vec![],
            kinds: vec![],
            legacy: Some("http://x/y.jpg".into()),
        };
        let items = refs.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, LEGACY_IMAGE_NAME);
        assert_eq!(items[0].url, "http://x/y.jpg");

        let blank = MediaRefs {
            legacy: Some("  ".into()),
            ..Default::default()
        };
        assert!(blank.items().is_empty());
    }

    #[test]
    fn legacy_ignored_when_urls_present() {
        let refs = MediaRefs {
            urls: vec!["a.jpg".into()],
            kinds: vec![],
            legacy: Some("old.jpg".into()),
        };
        let items = refs.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].url, "a.jpg");
    }

    #[test]
    fn cover_prefers_images() {
        let refs = MediaRefs {
            urls: vec!["v.mp4".into(), "i.jpg".into()],
            kinds: vec![MediaKind::Video, MediaKind::Image],
            legacy: None,
        };
        assert_eq!(refs.cover().unwrap().url, "i.jpg");
    }

    #[test]
    fn error_message_prefers_details() {
        let body = ErrorBody::from_text(
            r#"{"error":"Validation failed","message":"nope",
                "detalles":[{"message":"bad price"}]}"#,
        )
        .unwrap();
        assert_eq!(body.user_message().as_deref(), Some("bad price"));
    }

    #[test]
    fn error_message_joins_msg_and_message_details() {
        let body = ErrorBody::from_text(
            r#"{"detalles":[{"msg":"titulo requerido"},{"message":"precio invalido"}]}"#,
        )
        .unwrap();
        assert_eq!(
            body.user_message().as_deref(),
            Some("titulo requerido, precio invalido")
        );
    }

    #[test]
    fn error_message_falls_back_to_error_then_message() {
        let body =
            ErrorBody::from_text(r#"{"error":"boom","message":"m"}"#).unwrap();
        assert_eq!(body.user_message().as_deref(), Some("boom"));

        let body = ErrorBody::from_text(r#"{"message":"m","detalles":[]}"#)
            .unwrap();
        assert_eq!(body.user_message().as_deref(), Some("m"));

        let body = ErrorBody::from_text("{}").unwrap();
        assert_eq!(body.user_message(), None);

        assert!(ErrorBody::from_text("Internal Server Error").is_none());
    }

    #[test]
    fn odd_detalles_do_not_hide_error() {
        let body = ErrorBody::from_text(
            r#"{"error":"Título duplicado","detalles":"titulo"}"#,
        )
        .unwrap();
        assert_eq!(body.user_message().as_deref(), Some("Título duplicado"));

        let body = ErrorBody::from_text(
            r#"{"message":"m","detalles":{"campo":"titulo"}}"#,
        )
        .unwrap();
        assert_eq!(body.user_message().as_deref(), Some("m"));

        let body = ErrorBody::from_text(
            r#"{"error":7,"detalles":[3,{"msg":"precio invalido"},null]}"#,
        )
        .unwrap();
        assert_eq!(body.user_message().as_deref(), Some("precio invalido"));

        assert!(ErrorBody::from_text(r#"["a","b"]"#).is_none());
    }
}
