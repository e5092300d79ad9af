// Archivo: gateway.rs
// Propósito: `CompoundGateway`, la operación "traer todo" sobre
// `CompoundEndpoints`. Sólo la resolución del identificador es fatal; las
// cuatro lecturas restantes se ejecutan a la vez y cada fallo se degrada a
// un valor ausente.
use crate::endpoints::{extract_description, CompoundEndpoints};
use crate::errors::{ProviderError, Result};
use chem_domain::{CompoundIdentity, CompoundProperties, CompoundQuery, StructurePayload, SynonymSet};
use std::future::Future;
use std::sync::Arc;

/// Resultado agregado de las lecturas por compuesto.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundBundle {
    pub properties: Option<CompoundProperties>,
    pub synonyms: Option<SynonymSet>,
    pub structure: StructurePayload,
    pub description: Option<String>,
    /// Endpoints que fallaron y se degradaron a ausente.
    pub degraded: Vec<&'static str>,
}

impl CompoundBundle {
    pub fn is_complete(&self) -> bool {
        self.degraded.is_empty()
    }
}

/// Pasarela sobre la base de datos remota de compuestos.
#[derive(Clone)]
pub struct CompoundGateway {
    endpoints: Arc<dyn CompoundEndpoints>,
}

impl CompoundGateway {
    pub fn new(endpoints: Arc<dyn CompoundEndpoints>) -> Self {
        Self { endpoints }
    }

    /// Resuelve el identificador a partir del nombre. Cualquier fallo (red,
    /// estado, lista vacía) se reporta como `NotFound`.
    ///
    /// El nombre canónico queda provisionalmente igual a la búsqueda; se
    /// refina con los sinónimos tras `fetch_all`.
    pub async fn resolve_identity(&self, query: &CompoundQuery) -> Result<CompoundIdentity> {
        match self.endpoints.lookup_ids(query.as_str()).await {
            Ok(ids) => match ids.first() {
                Some(id) => {
                    log::debug!("'{}' resuelto a id {}", query, id);
                    Ok(CompoundIdentity::new(*id, query.as_str()))
                }
                None => Err(ProviderError::NotFound(query.to_string())),
            },
            Err(e) => {
                log::info!("no se pudo resolver '{}': {}", query, e);
                Err(ProviderError::NotFound(query.to_string()))
            }
        }
    }

    /// Lanza las cuatro lecturas a la vez y espera a que todas terminen,
    /// con o sin éxito. Nunca falla.
    pub async fn fetch_all(&self, id: i64) -> CompoundBundle {
        let e = &self.endpoints;
        let (properties, synonyms, structure, descriptions) =
            tokio::join!(settle("properties", id, e.properties(id)),
                         settle("synonyms", id, e.synonyms(id)),
                         settle("structure", id, e.structure_3d(id)),
                         settle("description", id, e.descriptions(id)));

        let mut degraded = Vec::new();
        for (name, failed) in [("properties", properties.is_none()),
                               ("synonyms", synonyms.is_none()),
                               ("structure", structure.is_none()),
                               ("description", descriptions.is_none())]
        {
            if failed {
                degraded.push(name);
            }
        }

        CompoundBundle { properties,
                         synonyms,
                         structure: StructurePayload { model_3d: structure,
                                                       image_2d: e.image_reference(id) },
                         description: descriptions.as_deref().and_then(extract_description),
                         degraded }
    }

    /// Descarga la imagen 2D.
    pub async fn download_image(&self, id: i64) -> Result<Vec<u8>> {
        self.endpoints.image_png(id).await
    }

    pub fn page_reference(&self, id: i64) -> String {
        self.endpoints.page_reference(id)
    }
}

async fn settle<T, F>(endpoint: &'static str, id: i64, call: F) -> Option<T>
    where F: Future<Output = Result<T>>
{
    match call.await {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("{} no disponible para id {}: {}", endpoint, id, e);
            None
        }
    }
}
