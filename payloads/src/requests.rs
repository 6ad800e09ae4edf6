use crate::{Auction, Property, UploadFile, Vehicle};
use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const TITLE_MAX_LEN: usize = 200;
pub const MIN_VEHICLE_YEAR: i32 = 1900;

/// A client-side check that failed before anything was sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("El campo {0} es obligatorio")]
    MissingField(&'static str),
    #[error("El campo {0} es demasiado largo")]
    TooLong(&'static str),
    #[error("El {0} debe ser mayor a 0")]
    NonPositivePrice(&'static str),
    #[error("El {0} no puede ser negativo")]
    NegativeAmount(&'static str),
    #[error("La fecha de fin debe ser posterior a la fecha de inicio")]
    EndBeforeStart,
    #[error("El año {0} no es válido")]
    InvalidYear(i32),
}

/// How empty optional fields are sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Blanks {
    /// Left out, so the backend applies its defaults. Used on creation.
    #[default]
    Omit,
    /// Sent empty, so an update clears the stored value.
    Clear,
}

/// Scalar state of an admin form that is sent as individual form fields.
pub trait FormFields {
    fn validate(&self) -> Result<(), ValidationError>;

    fn write_fields(&self, fields: &mut FieldWriter);

    /// Named string values in the order they are sent.
    fn fields(&self, blanks: Blanks) -> Vec<(&'static str, String)> {
        let mut writer = FieldWriter::new(blanks);
        self.write_fields(&mut writer);
        writer.fields
    }
}

/// Collects the form fields of a submission.
pub struct FieldWriter {
    blanks: Blanks,
    fields: Vec<(&'static str, String)>,
}

impl FieldWriter {
    fn new(blanks: Blanks) -> Self {
        Self {
            blanks,
            fields: Vec::new(),
        }
    }

    pub fn text(&mut self, name: &'static str, value: &str) {
        let value = value.trim();
        if !value.is_empty() || self.blanks == Blanks::Clear {
            self.fields.push((name, value.to_string()));
        }
    }

    pub fn value(&mut self, name: &'static str, value: Option<impl ToString>) {
        match value {
            Some(value) => self.fields.push((name, value.to_string())),
            None if self.blanks == Blanks::Clear => {
                self.fields.push((name, String::new()))
            }
            None => {}
        }
    }
}

fn require(value: &str, name: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(name))
    } else {
        Ok(())
    }
}

fn require_title(value: &str) -> Result<(), ValidationError> {
    require(value, "título")?;
    if value.trim().chars().count() > TITLE_MAX_LEN {
        return Err(ValidationError::TooLong("título"));
    }
    Ok(())
}

fn require_positive(
    value: Option<Decimal>,
    name: &'static str,
) -> Result<(), ValidationError> {
    match value {
        Some(value) if value > Decimal::ZERO => Ok(()),
        _ => Err(ValidationError::NonPositivePrice(name)),
    }
}

/// Field name the file parts of a multipart submission are sent under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileField {
    #[default]
    Archivos,
    /// Accepted by the auctions endpoint only.
    Imagenes,
}

impl FileField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Archivos => "archivos",
            Self::Imagenes => "imagenes",
        }
    }
}

/// Create/edit state of a real-estate listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyForm {
    pub titulo: String,
    pub descripcion: String,
    pub precio: Option<Decimal>,
    pub tipo: String,
    pub operacion: String,
    pub direccion: String,
    pub metros: Option<Decimal>,
    pub habitaciones: Option<u32>,
}

impl From<&Property> for PropertyForm {
    fn from(property: &Property) -> Self {
        Self {
            titulo: property.titulo.clone(),
            descripcion: property.descripcion.clone().unwrap_or_default(),
            precio: Some(property.precio),
            tipo: property.tipo.clone(),
            operacion: property.operacion.clone(),
            direccion: property.direccion.clone(),
            metros: property.metros,
            habitaciones: property.habitaciones,
        }
    }
}

impl FormFields for PropertyForm {
    fn validate(&self) -> Result<(), ValidationError> {
        require_title(&self.titulo)?;
        require_positive(self.precio, "precio")?;
        require(&self.tipo, "tipo")?;
        require(&self.operacion, "operación")?;
        require(&self.direccion, "dirección")?;
        if self.metros.is_some_and(|m| m < Decimal::ZERO) {
            return Err(ValidationError::NegativeAmount("metraje"));
        }
        Ok(())
    }

    fn write_fields(&self, fields: &mut FieldWriter) {
        fields.text("titulo", &self.titulo);
        fields.text("descripcion", &self.descripcion);
        fields.value("precio", self.precio);
        fields.text("tipo", &self.tipo);
        fields.text("operacion", &self.operacion);
        fields.text("direccion", &self.direccion);
        fields.value("metros", self.metros);
        fields.value("habitaciones", self.habitaciones);
    }
}

/// Create/edit state of an auction.
#[derive(Debug, Clone, PartialEq)]
pub struct AuctionForm {
    pub titulo: String,
    pub descripcion: String,
    pub inicio_fecha: Option<Timestamp>,
    pub fin_fecha: Option<Timestamp>,
    pub precio_inicial: Option<Decimal>,
    /// Left empty on creation, in which case the initial price is sent.
    pub precio_actual: Option<Decimal>,
    pub estado: String,
    pub categoria: String,
    pub ofertas: u32,
}

pub const DEFAULT_AUCTION_STATUS: &str = "activa";

impl Default for AuctionForm {
    fn default() -> Self {
        Self {
            titulo: String::new(),
            descripcion: String::new(),
            inicio_fecha: None,
            fin_fecha: None,
            precio_inicial: None,
            precio_actual: None,
            estado: DEFAULT_AUCTION_STATUS.to_string(),
            categoria: String::new(),
            ofertas: 0,
        }
    }
}

impl From<&Auction> for AuctionForm {
    fn from(auction: &Auction) -> Self {
        Self {
            titulo: auction.titulo.clone(),
            descripcion: auction.descripcion.clone().unwrap_or_default(),
            inicio_fecha: auction.inicio_fecha,
            fin_fecha: auction.fin_fecha,
            precio_inicial: Some(auction.precio_inicial),
            precio_actual: auction.precio_actual,
            estado: auction.estado.clone(),
            categoria: auction.categoria.clone().unwrap_or_default(),
            ofertas: auction.ofertas,
        }
    }
}

impl FormFields for AuctionForm {
    fn validate(&self) -> Result<(), ValidationError> {
        require_title(&self.titulo)?;
        require_positive(self.precio_inicial, "precio inicial")?;
        if self.precio_actual.is_some_and(|p| p < Decimal::ZERO) {
            return Err(ValidationError::NegativeAmount("precio actual"));
        }
        let start = self
            .inicio_fecha
            .ok_or(ValidationError::MissingField("fecha de inicio"))?;
        let end = self
            .fin_fecha
            .ok_or(ValidationError::MissingField("fecha de fin"))?;
        if end <= start {
            return Err(ValidationError::EndBeforeStart);
        }
        require(&self.estado, "estado")
    }

    fn write_fields(&self, fields: &mut FieldWriter) {
        fields.text("titulo", &self.titulo);
        fields.text("descripcion", &self.descripcion);
        fields.value("inicioFecha", self.inicio_fecha);
        fields.value("finFecha", self.fin_fecha);
        fields.value("precioInicial", self.precio_inicial);
        fields.value("precioActual", self.precio_actual.or(self.precio_inicial));
        fields.text("estado", &self.estado);
        fields.text("categoria", &self.categoria);
        fields.value("ofertas", Some(self.ofertas));
    }
}

/// Create/edit state of a vehicle. Sent as JSON, not multipart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleForm {
    pub marca: String,
    pub modelo: String,
    pub anio: Option<i32>,
    pub precio: Option<Decimal>,
    pub kilometraje: Option<u64>,
    pub combustible: String,
    pub transmision: String,
    pub color: String,
    pub tipo: String,
    pub estado: String,
    pub descripcion: String,
}

impl From<&Vehicle> for VehicleForm {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            marca: vehicle.marca.clone(),
            modelo: vehicle.modelo.clone(),
            anio: vehicle.anio,
            precio: Some(vehicle.precio),
            kilometraje: vehicle.kilometraje,
            combustible: vehicle.combustible.clone().unwrap_or_default(),
            transmision: vehicle.transmision.clone().unwrap_or_default(),
            color: vehicle.color.clone().unwrap_or_default(),
            tipo: vehicle.tipo.clone().unwrap_or_default(),
            estado: vehicle.estado.clone().unwrap_or_default(),
            descripcion: vehicle.descripcion.clone().unwrap_or_default(),
        }
    }
}

fn non_blank(value: &str, blanks: Blanks) -> Option<String> {
    let value = value.trim();
    (!value.is_empty() || blanks == Blanks::Clear).then(|| value.to_string())
}

/// `Some(None)` is sent as null to clear a stored number.
fn number<T>(value: Option<T>, blanks: Blanks) -> Option<Option<T>> {
    match blanks {
        Blanks::Omit => value.map(Some),
        Blanks::Clear => Some(value),
    }
}

impl VehicleForm {
    /// Validate against the given current year. Years up to next year's
    /// models are accepted.
    pub fn validate(&self, current_year: i32) -> Result<(), ValidationError> {
        require(&self.marca, "marca")?;
        require(&self.modelo, "modelo")?;
        require_positive(self.precio, "precio")?;
        if let Some(anio) = self.anio
            && !(MIN_VEHICLE_YEAR..=current_year + 1).contains(&anio)
        {
            return Err(ValidationError::InvalidYear(anio));
        }
        Ok(())
    }

    /// JSON body. Technical fields are sent both flat and nested under
    /// `detalles`, which is where the backend reads them from.
    pub fn body(&self, blanks: Blanks) -> VehicleBody {
        let combustible = non_blank(&self.combustible, blanks);
        let transmision = non_blank(&self.transmision, blanks);
        let color = non_blank(&self.color, blanks);
        let anio = number(self.anio, blanks);
        let kilometraje = number(self.kilometraje, blanks);
        VehicleBody {
            marca: self.marca.trim().to_string(),
            modelo: self.modelo.trim().to_string(),
            anio,
            precio: self.precio.unwrap_or_default(),
            kilometraje,
            combustible: combustible.clone(),
            transmision: transmision.clone(),
            color: color.clone(),
            tipo: non_blank(&self.tipo, blanks),
            estado: non_blank(&self.estado, blanks),
            descripcion: non_blank(&self.descripcion, blanks),
            detalles: VehicleDetails {
                anio,
                kilometraje,
                combustible,
                transmision,
                color,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleBody {
    pub marca: String,
    pub modelo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anio: Option<Option<i32>>,
    #[serde(with = "rust_decimal::serde::float")]
    pub precio: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kilometraje: Option<Option<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combustible: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    pub detalles: VehicleDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anio: Option<Option<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kilometraje: Option<Option<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combustible: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Outbound multipart body: scalar fields plus the new files, in staging
/// order, under one field name.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartSubmission {
    pub fields: Vec<(&'static str, String)>,
    pub file_field: FileField,
    pub files: Vec<UploadFile>,
}

impl MultipartSubmission {
    /// Body of a create. Empty optional fields are left out.
    pub fn new(
        form: &impl FormFields,
        file_field: FileField,
        files: Vec<UploadFile>,
    ) -> Self {
        Self::with_blanks(form, Blanks::Omit, file_field, files)
    }

    /// Body of an update: every field is sent, empty ones included.
    pub fn update(
        form: &impl FormFields,
        file_field: FileField,
        files: Vec<UploadFile>,
    ) -> Self {
        Self::with_blanks(form, Blanks::Clear, file_field, files)
    }

    pub fn with_blanks(
        form: &impl FormFields,
        blanks: Blanks,
        file_field: FileField,
        files: Vec<UploadFile>,
    ) -> Self {
        Self {
            fields: form.fields(blanks),
            file_field,
            files,
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn into_form(self) -> reqwest::multipart::Form {
        let file_field = self.file_field.name();
        let form = self
            .fields
            .into_iter()
            .fold(reqwest::multipart::Form::new(), |form, (name, value)| {
                form.text(name, value)
            });
        self.files.into_iter().fold(form, |form, file| {
            form.part(file_field, file_part(file))
        })
    }
}

fn file_part(file: UploadFile) -> reqwest::multipart::Part {
    use reqwest::multipart::Part;

    let UploadFile {
        file_name,
        mime,
        data,
    } = file;
    // mime_str consumes the part, so the type is checked on an empty one
    // before the payload is moved in.
    let usable_mime =
        !mime.is_empty() && Part::bytes(Vec::new()).mime_str(&mime).is_ok();
    let part = Part::bytes(data).file_name(file_name);
    if !usable_mime {
        if !mime.is_empty() {
            tracing::warn!("Ignoring unusable media type {mime:?}");
        }
        return part;
    }
    part.mime_str(&mime)
        .unwrap_or_else(|_| Part::bytes(Vec::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    fn casa_x() -> PropertyForm {
        PropertyForm {
            titulo: "Casa X".into(),
            precio: Some(dec!(150000)),
            tipo: "casa".into(),
            operacion: "venta".into(),
            direccion: "Calle 1".into(),
            ..Default::default()
        }
    }

    #[test]
    fn property_fields_skip_empty_optionals() {
        let form = casa_x();
        assert_eq!(form.validate(), Ok(()));
        let fields = form.fields(Blanks::Omit);
        let names: Vec<_> = fields.iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            ["titulo", "precio", "tipo", "operacion", "direccion"]
        );
        assert_eq!(fields[1].1, "150000");
    }

    #[test]
    fn update_sends_cleared_fields_empty() {
        let submission =
            MultipartSubmission::update(&casa_x(), FileField::Archivos, vec![]);
        let names: Vec<_> =
            submission.fields.iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            [
                "titulo",
                "descripcion",
                "precio",
                "tipo",
                "operacion",
                "direccion",
                "metros",
                "habitaciones"
            ]
        );
        assert_eq!(submission.field("descripcion"), Some(""));
        assert_eq!(submission.field("metros"), Some(""));
        assert_eq!(submission.field("precio"), Some("150000"));
    }

    #[test]
    fn property_validation() {
        let mut form = casa_x();
        form.precio = Some(Decimal::ZERO);
        assert_eq!(
            form.validate(),
            Err(ValidationError::NonPositivePrice("precio"))
        );
        form.precio = None;
        assert!(form.validate().is_err());

        let mut form = casa_x();
        form.direccion = "   ".into();
        assert_eq!(
            form.validate(),
            Err(ValidationError::MissingField("dirección"))
        );

        let mut form = casa_x();
        form.titulo = "x".repeat(TITLE_MAX_LEN + 1);
        assert_eq!(form.validate(), Err(ValidationError::TooLong("título")));
    }

    #[test]
    fn auction_dates_are_checked() {
        let start: Timestamp = "2025-05-01T12:00:00Z".parse().unwrap();
        let end: Timestamp = "2025-05-08T12:00:00Z".parse().unwrap();
        let mut form = AuctionForm {
            titulo: "Lote 1".into(),
            precio_inicial: Some(dec!(1000)),
            inicio_fecha: Some(start),
            fin_fecha: Some(end),
            ..Default::default()
        };
        assert_eq!(form.validate(), Ok(()));
        assert_eq!(form.fields(Blanks::Omit).len(), 7);
        assert_eq!(form.fields(Blanks::Clear).len(), 9);

        form.fin_fecha = Some(start);
        assert_eq!(form.validate(), Err(ValidationError::EndBeforeStart));
        form.fin_fecha = None;
        assert_eq!(
            form.validate(),
            Err(ValidationError::MissingField("fecha de fin"))
        );
    }

    #[test]
    fn auction_fields_default_current_price() {
        let form = AuctionForm {
            titulo: "Lote 1".into(),
            precio_inicial: Some(dec!(1000)),
            inicio_fecha: Some("2025-05-01T12:00:00Z".parse().unwrap()),
            fin_fecha: Some("2025-05-08T12:00:00Z".parse().unwrap()),
            ..Default::default()
        };
        let submission =
            MultipartSubmission::new(&form, FileField::Imagenes, vec![]);
        assert_eq!(submission.field("precioActual"), Some("1000"));
        assert_eq!(
            submission.field("inicioFecha"),
            Some("2025-05-01T12:00:00Z")
        );
        assert_eq!(submission.field("estado"), Some(DEFAULT_AUCTION_STATUS));
        assert_eq!(submission.field("ofertas"), Some("0"));
        assert_eq!(submission.file_field.name(), "imagenes");
    }

    #[test]
    fn vehicle_body_duplicates_details() {
        let form = VehicleForm {
            marca: "Toyota".into(),
            modelo: "Hilux".into(),
            anio: Some(2021),
            precio: Some(dec!(32000)),
            kilometraje: Some(40000),
            combustible: "diesel".into(),
            ..Default::default()
        };
        assert_eq!(form.validate(2025), Ok(()));
        let json = serde_json::to_value(form.body(Blanks::Omit)).unwrap();
        assert_eq!(json["anio"], 2021);
        assert_eq!(json["detalles"]["anio"], 2021);
        assert_eq!(json["detalles"]["kilometraje"], 40000);
        assert_eq!(json["detalles"]["combustible"], "diesel");
        assert!(json["detalles"].get("color").is_none());
        assert!(json.get("descripcion").is_none());
        assert_eq!(json["precio"], 32000.0);
    }

    #[test]
    fn vehicle_update_clears_blank_fields() {
        let form = VehicleForm {
            marca: "Toyota".into(),
            modelo: "Hilux".into(),
            precio: Some(dec!(32000)),
            ..Default::default()
        };
        let json = serde_json::to_value(form.body(Blanks::Clear)).unwrap();
        assert_eq!(json["descripcion"], "");
        assert_eq!(json["color"], "");
        assert!(json["kilometraje"].is_null());
        assert!(json.get("kilometraje").is_some());
        assert!(json["detalles"]["anio"].is_null());
        assert!(json["detalles"].get("anio").is_some());
    }

    #[test]
    fn vehicle_year_range() {
        let mut form = VehicleForm {
            marca: "Fiat".into(),
            modelo: "600".into(),
            precio: Some(dec!(5000)),
            anio: Some(1899),
            ..Default::default()
        };
        assert_eq!(form.validate(2025), Err(ValidationError::InvalidYear(1899)));
        form.anio = Some(2026);
        assert_eq!(form.validate(2025), Ok(()));
        form.anio = Some(2027);
        assert!(form.validate(2025).is_err());
    }
}
