// Esquema Diesel del almacén de preferencias (SQLite).
// Tablas: preferences
diesel::table! {
    preferences (key) {
        key -> Text,
        value -> Text,
        updated_at -> Text,
    }
}
