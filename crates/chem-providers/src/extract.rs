//! Estrategias de extracción sobre cuerpos HTML/JSON externos.
//!
//! Los resolutores no conocen la estrategia: reciben un `Box<dyn Extractor>`.
//! - `MarkerSpec`: búsqueda por marcadores fijos (ancla -> región acotada ->
//!   marcador de valor -> token). Es la estrategia por defecto.
//! - `StructuredSmiles`: parseo JSON del documento PUG-View buscando la
//!   sección "Canonical SMILES".
//! - `FirstMatch`: prueba varias estrategias en orden.

use serde_json::Value;

pub trait Extractor {
    /// `None` si el valor no está presente (o queda vacío).
    fn extract(&self, body: &str) -> Option<String>;
}

/// Especificación de extracción por marcadores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSpec {
    /// Marcador que abre la región de interés.
    pub anchor: String,
    /// Fin de la región (exclusivo). Sin él la región llega al final del cuerpo.
    pub region_end: Option<String>,
    /// Marcador, dentro de la región, tras el cual empieza el valor.
    pub value_marker: Option<String>,
    /// Delimitador del valor. Sin él el valor llega al final de la región.
    pub terminator: Option<String>,
    /// El valor es el contenido de un string JSON: termina en la primera
    /// comilla no escapada y se decodifican los escapes.
    pub json_string: bool,
}

impl MarkerSpec {
    /// Meta `og:url` de la página de búsqueda: `.../compound/<CID>`.
    pub fn og_url_compound() -> Self {
        MarkerSpec { anchor: "og:url\" content=\"".into(),
                     region_end: Some("\"".into()),
                     value_marker: Some("/compound/".into()),
                     terminator: Some("/".into()),
                     json_string: false }
    }

    /// `"Name": "Canonical SMILES"` seguido de `"StringValue": "..."` antes
    /// del cierre del objeto.
    pub fn canonical_smiles() -> Self {
        MarkerSpec { anchor: "\"Name\": \"Canonical SMILES\"".into(),
                     region_end: Some("}".into()),
                     value_marker: Some("\"StringValue\": \"".into()),
                     terminator: None,
                     json_string: true }
    }
}

/// Aplica `spec` sobre `body`.
pub fn extract(body: &str, spec: &MarkerSpec) -> Option<String> {
    let start = body.find(&spec.anchor)? + spec.anchor.len();
    let rest = &body[start..];
    let region = match &spec.region_end {
        Some(end) => &rest[..rest.find(end.as_str()).unwrap_or(rest.len())],
        None => rest,
    };
    let value = match &spec.value_marker {
        Some(marker) => {
            let at = region.find(marker.as_str())? + marker.len();
            &region[at..]
        }
        None => region,
    };
    let token = if spec.json_string {
        read_json_string(value)?
    } else {
        let end = spec.terminator
                      .as_deref()
                      .and_then(|t| value.find(t))
                      .unwrap_or(value.len());
        value[..end].to_string()
    };
    let token = token.trim().to_string();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Lee hasta la primera comilla no escapada y decodifica el contenido como
/// string JSON. Sin comilla de cierre => `None`.
fn read_json_string(value: &str) -> Option<String> {
    let mut escaped = false;
    let mut end = None;
    for (i, c) in value.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => {
                end = Some(i);
                break;
            }
            _ => {}
        }
    }
    let raw = &value[..end?];
    serde_json::from_str::<String>(&format!("\"{raw}\"")).ok()
                                                         .or_else(|| Some(raw.to_string()))
}

impl Extractor for MarkerSpec {
    fn extract(&self, body: &str) -> Option<String> {
        extract(body, self)
    }
}

/// Parseo estructurado de PUG-View: busca un objeto cuyo `Name` o
/// `TOCHeading` sea `heading` y lee `StringValue` o
/// `Value.StringWithMarkup[0].String` (directo o dentro de `Information`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredSmiles {
    pub heading: String,
}

impl Default for StructuredSmiles {
    fn default() -> Self {
        StructuredSmiles { heading: "Canonical SMILES".into() }
    }
}

impl StructuredSmiles {
    fn string_value(v: &Value) -> Option<String> {
        v.get("StringValue")
         .or_else(|| v.pointer("/Value/StringValue"))
         .or_else(|| v.pointer("/Value/StringWithMarkup/0/String"))
         .and_then(Value::as_str)
         .map(str::trim)
         .filter(|s| !s.is_empty())
         .map(str::to_string)
    }

    fn find(&self, v: &Value) -> Option<String> {
        match v {
            Value::Object(map) => {
                let named = ["Name", "TOCHeading"].iter()
                                                  .any(|k| map.get(*k).and_then(Value::as_str) == Some(self.heading.as_str()));
                if named {
                    let direct = Self::string_value(v);
                    let nested = || {
                        map.get("Information")
                           .and_then(Value::as_array)
                           .and_then(|items| items.iter().find_map(Self::string_value))
                    };
                    if let Some(found) = direct.or_else(nested) {
                        return Some(found);
                    }
                }
                map.values().find_map(|child| self.find(child))
            }
            Value::Array(items) => items.iter().find_map(|child| self.find(child)),
            _ => None,
        }
    }
}

impl Extractor for StructuredSmiles {
    fn extract(&self, body: &str) -> Option<String> {
        let doc: Value = serde_json::from_str(body).ok()?;
        self.find(&doc)
    }
}

/// Primera estrategia que produce valor.
pub struct FirstMatch(pub Vec<Box<dyn Extractor>>);

impl Extractor for FirstMatch {
    fn extract(&self, body: &str) -> Option<String> {
        self.0.iter().find_map(|e| e.extract(body))
    }
}
