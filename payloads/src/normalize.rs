//! Conversion of loosely-shaped backend JSON into typed records.
//!
//! Defaulting rules:
//! - ids come from `id` or `_id`, as a string or a number. A record without
//!   an id is rejected.
//! - numbers may arrive as JSON numbers or numeric strings. Anything else is
//!   treated as absent. Prices default to zero.
//! - strings are trimmed. Blank strings are treated as absent.
//! - vehicle fields are read from the record first and then from its nested
//!   `detalles` object. The year is looked up as `anio`, `año`, then `year`.
//! - `imagenes` entries that aren't strings are skipped. `tipos_archivos`
//!   tags that aren't `video` are images.

use crate::responses::{Auction, MediaRefs, Property, Vehicle};
use crate::{ListingId, MediaKind};
use jiff::Timestamp;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Expected a JSON object")]
    NotAnObject,
    #[error("Record has no id")]
    MissingId,
}

pub const YEAR_KEYS: &[&str] = &["anio", "año", "year"];
const MILEAGE_KEYS: &[&str] = &["kilometraje", "km", "kilometros"];

/// Read-only view over a JSON object with lenient typed getters.
#[derive(Clone, Copy)]
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    pub fn new(value: &'a Value) -> Result<Self, NormalizeError> {
        value
            .as_object()
            .map(|map| Self { map })
            .ok_or(NormalizeError::NotAnObject)
    }

    /// The nested object under `key`, if any.
    pub fn nested(&self, key: &str) -> Option<Fields<'a>> {
        self.map.get(key)?.as_object().map(|map| Fields { map })
    }

    fn first(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter()
            .filter_map(|key| self.map.get(*key))
            .find(|value| !value.is_null())
    }

    pub fn id(&self) -> Option<ListingId> {
        match self.first(&["id", "_id"])? {
            Value::String(s) if !s.trim().is_empty() => {
                Some(ListingId(s.trim().to_string()))
            }
            Value::Number(n) => Some(ListingId(n.to_string())),
            _ => None,
        }
    }

    /// First non-blank string among `keys`. Numbers are stringified.
    pub fn string(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|key| self.map.get(*key))
            .find_map(|value| match value {
                Value::String(s) if !s.trim().is_empty() => {
                    Some(s.trim().to_string())
                }
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }

    pub fn decimal(&self, keys: &[&str]) -> Option<Decimal> {
        keys.iter()
            .filter_map(|key| self.map.get(*key))
            .find_map(decimal_from_value)
    }

    pub fn integer(&self, keys: &[&str]) -> Option<i64> {
        keys.iter()
            .filter_map(|key| self.map.get(*key))
            .find_map(integer_from_value)
    }

    pub fn timestamp(&self, keys: &[&str]) -> Option<Timestamp> {
        keys.iter()
            .filter_map(|key| self.map.get(*key))
            .find_map(timestamp_from_value)
    }

    fn array(&self, key: &str) -> &'a [Value] {
        self.map
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Stored media. `imagenes` and `tipos_archivos` are parallel arrays:
    /// blank or non-string urls are dropped together with their tag.
    pub fn media(&self) -> MediaRefs {
        let tags = self.array("tipos_archivos");

        let mut refs = MediaRefs {
            legacy: self.string(&["imagen"]),
            ..Default::default()
        };
        for (index, url) in self.array("imagenes").iter().enumerate() {
            let url = url.as_str().map(str::trim).unwrap_or_default();
            if url.is_empty() {
                continue;
            }
            refs.urls.push(url.to_string());
            // tags run out before urls on older records
            if let Some(tag) = tags.get(index) {
                refs.kinds.push(
                    tag.as_str().map(MediaKind::from_tag).unwrap_or_default(),
                );
            }
        }
        refs
    }
}

/// A vehicle record reads its fields from the top level first, then from
/// the nested `detalles` object.
struct VehicleFields<'a> {
    flat: Fields<'a>,
    detalles: Option<Fields<'a>>,
}

impl VehicleFields<'_> {
    fn string(&self, keys: &[&str]) -> Option<String> {
        self.flat
            .string(keys)
            .or_else(|| self.detalles.and_then(|d| d.string(keys)))
    }

    fn decimal(&self, keys: &[&str]) -> Option<Decimal> {
        self.flat
            .decimal(keys)
            .or_else(|| self.detalles.and_then(|d| d.decimal(keys)))
    }

    fn integer(&self, keys: &[&str]) -> Option<i64> {
        self.flat
            .integer(keys)
            .or_else(|| self.detalles.and_then(|d| d.integer(keys)))
    }
}

pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Decimal::from(i))
            } else if let Some(u) = n.as_u64() {
                Some(Decimal::from(u))
            } else {
                n.as_f64().and_then(|f| Decimal::try_from(f).ok())
            }
        }
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

/// Parse a user or backend supplied amount. Accepts surrounding whitespace
/// and a leading `$`.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let trimmed = text.trim().trim_start_matches('$').trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

fn integer_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.is_finite())
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn timestamp_from_value(value: &Value) -> Option<Timestamp> {
    let text = value.as_str()?.trim();
    text.parse::<Timestamp>().ok().or_else(|| {
        // Datetimes without an offset are read as UTC.
        text.parse::<jiff::civil::DateTime>()
            .ok()
            .and_then(|dt| dt.to_zoned(jiff::tz::TimeZone::UTC).ok())
            .map(|zoned| zoned.timestamp())
    })
}

impl TryFrom<&Value> for Property {
    type Error = NormalizeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let fields = Fields::new(value)?;
        Ok(Property {
            id: fields.id().ok_or(NormalizeError::MissingId)?,
            titulo: fields.string(&["titulo"]).unwrap_or_default(),
            descripcion: fields.string(&["descripcion"]),
            precio: fields.decimal(&["precio"]).unwrap_or_default(),
            tipo: fields.string(&["tipo"]).unwrap_or_default(),
            operacion: fields.string(&["operacion"]).unwrap_or_default(),
            direccion: fields.string(&["direccion"]).unwrap_or_default(),
            metros: fields.decimal(&["metros"]),
            habitaciones: fields
                .integer(&["habitaciones"])
                .and_then(|n| u32::try_from(n).ok()),
            media: fields.media(),
        })
    }
}

impl TryFrom<&Value> for Vehicle {
    type Error = NormalizeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let flat = Fields::new(value)?;
        let fields = VehicleFields {
            flat,
            detalles: flat.nested("detalles"),
        };
        Ok(Vehicle {
            id: flat.id().ok_or(NormalizeError::MissingId)?,
            marca: fields.string(&["marca"]).unwrap_or_default(),
            modelo: fields.string(&["modelo"]).unwrap_or_default(),
            anio: fields
                .integer(YEAR_KEYS)
                .and_then(|n| i32::try_from(n).ok()),
            precio: fields.decimal(&["precio"]).unwrap_or_default(),
            kilometraje: fields
                .integer(MILEAGE_KEYS)
                .and_then(|n| u64::try_from(n).ok()),
            combustible: fields.string(&["combustible"]),
            transmision: fields.string(&["transmision"]),
            color: fields.string(&["color"]),
            tipo: fields.string(&["tipo"]),
            estado: fields.string(&["estado"]),
            descripcion: flat.string(&["descripcion"]),
            media: flat.media(),
        })
    }
}

impl TryFrom<&Value> for Auction {
    type Error = NormalizeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let fields = Fields::new(value)?;
        Ok(Auction {
            id: fields.id().ok_or(NormalizeError::MissingId)?,
            titulo: fields.string(&["titulo"]).unwrap_or_default(),
            descripcion: fields.string(&["descripcion"]),
            inicio_fecha: fields.timestamp(&["inicioFecha"]),
            fin_fecha: fields.timestamp(&["finFecha"]),
            precio_inicial: fields
                .decimal(&["precioInicial"])
                .unwrap_or_default(),
            precio_actual: fields.decimal(&["precioActual"]),
            estado: fields.string(&["estado"]).unwrap_or_default(),
            categoria: fields.string(&["categoria"]),
            ofertas: fields
                .integer(&["ofertas"])
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or_default(),
            media: fields.media(),
        })
    }
}

/// Normalize a list response, skipping records that can't be read.
///
/// Accepts either a bare array or an object wrapping it under `data`.
pub fn records<T>(value: &Value) -> Vec<T>
where
    for<'a> T: TryFrom<&'a Value, Error = NormalizeError>,
{
    let items = match value {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => map
            .get("data")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default(),
        _ => &[],
    };
    items
        .iter()
        .filter_map(|item| match T::try_from(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping malformed record: {e}");
                None
            }
        })
        .collect()
}
