//! Esquema Diesel (declarado a mano). Reemplazable con `diesel print-schema`.
//! La tabla pertenece al inventario existente: este crate no la crea ni la
//! migra.

diesel::table! {
    inv_compounds (compound_id) {
        compound_id -> Int4,
        cas -> Nullable<Text>,
        substance_name -> Nullable<Text>,
        base64_cdx -> Nullable<Text>,
    }
}
