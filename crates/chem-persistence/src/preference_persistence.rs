// Archivo: preference_persistence.rs
// Propósito: `PreferenceStore` respaldado por SQLite mediante Diesel y un
// pool r2d2. Las migraciones embebidas crean la tabla `preferences`.
use crate::errors::{PersistenceError, Result};
use crate::preference_store::PreferenceStore;
use crate::schema::preferences;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::result::Error as DieselError;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::Arc;
use std::time::Duration;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");
/// Ruta usada cuando `CHEMLENS_PREFS_URL` no está definida.
pub const DEFAULT_PREFS_URL: &str = "chemlens_prefs.db";
/// Espera máxima por una conexión del pool.
const POOL_TIMEOUT: Duration = Duration::from_secs(5);
type DbPool = Pool<ConnectionManager<SqliteConnection>>;

#[derive(Debug, Queryable, Insertable)]
#[diesel(table_name = preferences)]
struct PreferenceRow {
  pub key: String,
  pub value: String,
  pub updated_at: String,
}

fn map_pool_err(e: r2d2::Error) -> PersistenceError {
  PersistenceError::Storage(format!("pool: {}", e))
}

fn map_db_err<T>(res: std::result::Result<T, DieselError>) -> Result<T> {
  res.map_err(|e| PersistenceError::Storage(format!("db: {}", e)))
}

/// Almacén de preferencias sobre SQLite.
#[derive(Clone)]
pub struct DieselPreferenceStore {
  pool: Arc<DbPool>,
}

impl DieselPreferenceStore {
  /// Abre (o crea) la base de datos en `database_url` y aplica las
  /// migraciones pendientes.
  pub fn new(database_url: &str) -> Result<Self> {
    // Cada conexión a ":memory:" es una base distinta: se limita el pool a una.
    let max_size = if database_url.contains(":memory:") || database_url.contains("mode=memory") { 1 } else { 4 };
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = Pool::builder().max_size(max_size)
                              .connection_timeout(POOL_TIMEOUT)
                              .build(manager)
                              .map_err(map_pool_err)?;
    let store = DieselPreferenceStore { pool: Arc::new(pool) };
    let mut c = store.conn()?;
    let _ = diesel::sql_query("PRAGMA busy_timeout = 5000;").execute(&mut c);
    c.run_pending_migrations(MIGRATIONS)
     .map_err(|e| PersistenceError::Storage(format!("migrations: {}", e)))?;
    log::debug!("almacén de preferencias abierto en {}", database_url);
    drop(c);
    Ok(store)
  }

  /// Base de datos en memoria, útil en pruebas.
  pub fn in_memory() -> Result<Self> {
    Self::new(":memory:")
  }

  fn conn(&self) -> Result<PooledConnection<ConnectionManager<SqliteConnection>>> {
    self.pool.get().map_err(map_pool_err)
  }
}

impl PreferenceStore for DieselPreferenceStore {
  fn get(&self, key: &str) -> Result<Option<String>> {
    let mut conn = self.conn()?;
    map_db_err(preferences::table.filter(preferences::key.eq(key))
                                 .select(preferences::value)
                                 .first::<String>(&mut conn)
                                 .optional())
  }

  fn set(&self, key: &str, value: &str) -> Result<()> {
    let mut conn = self.conn()?;
    let row = PreferenceRow { key: key.to_string(),
                              value: value.to_string(),
                              updated_at: Utc::now().to_rfc3339() };
    map_db_err(diesel::replace_into(preferences::table).values(&row).execute(&mut conn))?;
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<()> {
    let mut conn = self.conn()?;
    map_db_err(diesel::delete(preferences::table.filter(preferences::key.eq(key))).execute(&mut conn))?;
    Ok(())
  }
}

/// Abre el almacén indicado por `CHEMLENS_PREFS_URL` (ruta SQLite), o
/// `chemlens_prefs.db` si no está definida.
pub fn new_from_env() -> Result<DieselPreferenceStore> {
  dotenvy::dotenv().ok();
  let url = std::env::var("CHEMLENS_PREFS_URL").ok()
                                               .filter(|u| !u.trim().is_empty())
                                               .unwrap_or_else(|| DEFAULT_PREFS_URL.into());
  DieselPreferenceStore::new(&url)
}
