//! Sustitución de placeholders en plantillas de URL.

use url::form_urlencoded::byte_serialize;

/// Reemplaza `{placeholder}` en `template` por `value` codificado como
/// componente de URL (`application/x-www-form-urlencoded`).
pub fn render(template: &str, placeholder: &str, value: &str) -> String {
    let encoded: String = byte_serialize(value.as_bytes()).collect();
    template.replace(&format!("{{{placeholder}}}"), &encoded)
}
