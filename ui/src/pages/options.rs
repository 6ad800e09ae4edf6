//! Choices offered by the filter selects and the admin forms, as
//! (value sent to the backend, label) pairs.

pub type Options = &'static [(&'static str, &'static str)];

pub const PROPERTY_KINDS: Options = &[
    ("casa", "Casa"),
    ("departamento", "Departamento"),
    ("terreno", "Terreno"),
    ("local", "Local comercial"),
    ("oficina", "Oficina"),
    ("campo", "Campo"),
];

pub const OPERATIONS: Options = &[("venta", "Venta"), ("alquiler", "Alquiler")];

pub const AUCTION_CATEGORIES: Options = &[
    ("inmuebles", "Inmuebles"),
    ("vehiculos", "Vehículos"),
    ("maquinaria", "Maquinaria"),
    ("otros", "Otros"),
];

pub const AUCTION_STATUSES: Options = &[
    ("activa", "Activa"),
    ("proxima", "Próxima"),
    ("finalizada", "Finalizada"),
];

pub const VEHICLE_KINDS: Options = &[
    ("auto", "Auto"),
    ("camioneta", "Camioneta"),
    ("moto", "Moto"),
    ("utilitario", "Utilitario"),
];

pub const VEHICLE_STATUSES: Options = &[
    ("disponible", "Disponible"),
    ("reservado", "Reservado"),
    ("vendido", "Vendido"),
];

pub const FUELS: Options = &[
    ("nafta", "Nafta"),
    ("diesel", "Diésel"),
    ("gnc", "GNC"),
    ("electrico", "Eléctrico"),
    ("hibrido", "Híbrido"),
];

pub const TRANSMISSIONS: Options =
    &[("manual", "Manual"), ("automatica", "Automática")];

/// Options for a form select, led by an empty choice.
pub fn with_blank(options: Options) -> Vec<(&'static str, &'static str)> {
    std::iter::once(("", "Seleccionar"))
        .chain(options.iter().copied())
        .collect()
}

/// Label of a stored value, or the value itself when it isn't listed.
pub fn label_of(options: Options, value: &str) -> String {
    options
        .iter()
        .find(|(v, _)| v.eq_ignore_ascii_case(value.trim()))
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| value.to_string())
}
