use chem_persistence::{new_from_env, PersistentPreferences};
use std::sync::Arc;

fn main() {
  // Usa CHEMLENS_PREFS_URL o `chemlens_prefs.db` en el directorio actual.
  // Para una demo sin fichero:
  //   export CHEMLENS_PREFS_URL=":memory:"
  let store = new_from_env().expect("no se pudo abrir el almacén de preferencias");
  let prefs = PersistentPreferences::new(Arc::new(store));

  for q in ["Water", "aspirin", "water", "Ethanol"] {
    prefs.record_search(q).expect("record");
  }
  let history = prefs.history().expect("history");
  println!("historial: {:?}", history.entries());
  println!("última búsqueda: {:?}", prefs.last_query().expect("last"));

  let theme = prefs.toggle_theme().expect("theme");
  println!("tema ahora: {}", theme);

  match prefs.save_credential("   ") {
    Ok(_) => println!("credencial vacía aceptada (no debería)"),
    Err(e) => println!("credencial vacía rechazada: {}", e),
  }
}
