// Archivo: pubchem.rs
// Propósito: cliente REST de PubChem (PUG REST) que implementa
// `CompoundEndpoints`.
use crate::config::ProviderConfig;
use crate::endpoints::{CompoundEndpoints, DescriptionEntry};
use crate::errors::{ProviderError, Result};
use async_trait::async_trait;
use chem_domain::{CompoundIdentity, CompoundProperties, SynonymSet};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Campos pedidos al endpoint de propiedades.
pub const PROPERTY_FIELDS: &str = "MolecularFormula,MolecularWeight,IUPACName,SMILES,ConnectivitySMILES,InChIKey,Charge";

#[derive(Debug, Deserialize)]
struct IdentifierListResponse {
    #[serde(rename = "IdentifierList")]
    identifier_list: IdentifierList,
}

#[derive(Debug, Deserialize)]
struct IdentifierList {
    #[serde(rename = "CID", default)]
    cid: Vec<i64>,
}

#[derive(Debug, Deserialize)]
struct PropertyTableResponse {
    #[serde(rename = "PropertyTable")]
    property_table: PropertyTable,
}

#[derive(Debug, Deserialize)]
struct PropertyTable {
    #[serde(rename = "Properties", default)]
    properties: Vec<PropertyRecord>,
}

/// PubChem devuelve el peso molecular como texto, pero versiones antiguas
/// lo enviaban como número.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    fn into_text(self) -> String {
        match self {
            NumberOrText::Number(n) => n.to_string(),
            NumberOrText::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PropertyRecord {
    #[serde(rename = "MolecularFormula")]
    molecular_formula: Option<String>,
    #[serde(rename = "MolecularWeight")]
    molecular_weight: Option<NumberOrText>,
    #[serde(rename = "IUPACName")]
    iupac_name: Option<String>,
    #[serde(rename = "SMILES")]
    smiles: Option<String>,
    #[serde(rename = "ConnectivitySMILES")]
    connectivity_smiles: Option<String>,
    #[serde(rename = "InChIKey")]
    inchi_key: Option<String>,
    #[serde(rename = "Charge")]
    charge: Option<i64>,
}

impl PropertyRecord {
    fn into_properties(self) -> Result<CompoundProperties> {
        let formula = self.molecular_formula
                          .filter(|f| !f.trim().is_empty())
                          .ok_or_else(|| ProviderError::Malformed("propiedades sin MolecularFormula".into()))?;
        Ok(CompoundProperties { formula,
                                molecular_weight: self.molecular_weight.map(NumberOrText::into_text),
                                iupac_name: self.iupac_name,
                                connectivity_smiles: self.connectivity_smiles,
                                full_smiles: self.smiles,
                                inchi_key: self.inchi_key,
                                charge: self.charge })
    }
}

#[derive(Debug, Deserialize)]
struct InformationListResponse<T> {
    #[serde(rename = "InformationList")]
    information_list: InformationList<T>,
}

#[derive(Debug, Deserialize)]
struct InformationList<T> {
    #[serde(rename = "Information", default = "Vec::new")]
    information: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct SynonymInformation {
    #[serde(rename = "Synonym", default)]
    synonym: Vec<String>,
}

/// Cliente asíncrono de PubChem.
#[derive(Debug, Clone)]
pub struct PubChemClient {
    client: Client,
    base: Url,
    page_base: String,
}

impl PubChemClient {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout)
                                      .user_agent(concat!("chemlens/", env!("CARGO_PKG_VERSION")))
                                      .build()?;
        Self::with_client(client, config)
    }

    /// Constructor con un `reqwest::Client` ya configurado.
    pub fn with_client(client: Client, config: &ProviderConfig) -> Result<Self> {
        let base = Url::parse(&config.pubchem_base).map_err(|e| {
                                                         ProviderError::Config(format!("PUBCHEM_BASE_URL inválida: {}", e))
                                                     })?;
        if base.cannot_be_a_base() {
            return Err(ProviderError::Config(format!("PUBCHEM_BASE_URL no admite rutas: {}", base)));
        }
        Ok(Self { client, base, page_base: config.pubchem_page_base.clone() })
    }

    /// Construye `{base}/{segmentos...}` codificando cada segmento.
    pub fn endpoint_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, endpoint: &'static str, url: Url) -> Result<reqwest::Response> {
        log::debug!("GET {} ({})", url, endpoint);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status { endpoint, status: status.as_u16() });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &'static str, url: Url) -> Result<T> {
        let response = self.send(endpoint, url).await?;
        response.json::<T>()
                .await
                .map_err(|e| ProviderError::Malformed(format!("{}: {}", endpoint, e)))
    }
}

#[async_trait]
impl CompoundEndpoints for PubChemClient {
    async fn lookup_ids(&self, name: &str) -> Result<Vec<i64>> {
        let url = self.endpoint_url(&["compound", "name", name, "cids", "JSON"]);
        let body: IdentifierListResponse = self.get_json("cids", url).await?;
        Ok(body.identifier_list.cid)
    }

    async fn properties(&self, id: i64) -> Result<CompoundProperties> {
        let cid = id.to_string();
        let url = self.endpoint_url(&["compound", "cid", &cid, "property", PROPERTY_FIELDS, "JSON"]);
        let body: PropertyTableResponse = self.get_json("properties", url).await?;
        body.property_table
            .properties
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Malformed("tabla de propiedades vacía".into()))?
            .into_properties()
    }

    async fn synonyms(&self, id: i64) -> Result<SynonymSet> {
        let cid = id.to_string();
        let url = self.endpoint_url(&["compound", "cid", &cid, "synonyms", "JSON"]);
        let body: InformationListResponse<SynonymInformation> = self.get_json("synonyms", url).await?;
        let names = body.information_list
                        .information
                        .into_iter()
                        .next()
                        .map(|info| info.synonym)
                        .unwrap_or_default();
        Ok(SynonymSet::new(names))
    }

    async fn structure_3d(&self, id: i64) -> Result<String> {
        let cid = id.to_string();
        let mut url = self.endpoint_url(&["compound", "cid", &cid, "SDF"]);
        url.query_pairs_mut().append_pair("record_type", "3d");
        let text = self.send("structure", url).await?.text().await?;
        if text.trim().is_empty() {
            return Err(ProviderError::Malformed("estructura 3D vacía".into()));
        }
        Ok(text)
    }

    async fn descriptions(&self, id: i64) -> Result<Vec<DescriptionEntry>> {
        let cid = id.to_string();
        let url = self.endpoint_url(&["compound", "cid", &cid, "description", "JSON"]);
        let body: InformationListResponse<DescriptionEntry> = self.get_json("description", url).await?;
        Ok(body.information_list.information)
    }

    async fn image_png(&self, id: i64) -> Result<Vec<u8>> {
        let cid = id.to_string();
        let mut url = self.endpoint_url(&["compound", "cid", &cid, "PNG"]);
        url.query_pairs_mut().append_pair("image_size", "large");
        let bytes = self.send("image", url).await?.bytes().await?;
        Ok(bytes.to_vec())
    }

    fn image_reference(&self, id: i64) -> String {
        CompoundIdentity::new(id, "").image_reference(self.base.as_str())
    }

    fn page_reference(&self, id: i64) -> String {
        CompoundIdentity::new(id, "").page_reference(&self.page_base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn property_record_requires_formula() {
        let rec: PropertyRecord = serde_json::from_value(json!({"CID": 962, "MolecularWeight": "18.015"})).unwrap();
        assert!(matches!(rec.into_properties(), Err(ProviderError::Malformed(_))));
    }

    #[test]
    fn property_record_maps_fields() {
        let rec: PropertyRecord = serde_json::from_value(json!({
            "CID": 2244,
            "MolecularFormula": "C9H8O4",
            "MolecularWeight": 180.16,
            "IUPACName": "2-acetyloxybenzoic acid",
            "SMILES": "CC(=O)OC1=CC=CC=C1C(=O)O",
            "InChIKey": "BSYNRYMUTXBXSQ-UHFFFAOYSA-N",
            "Charge": 0
        })).unwrap();
        let p = rec.into_properties().unwrap();
        assert_eq!(p.formula, "C9H8O4");
        assert_eq!(p.molecular_weight.as_deref(), Some("180.16"));
        assert_eq!(p.connectivity_smiles, None);
        assert_eq!(p.connectivity_or_full(), Some("CC(=O)OC1=CC=CC=C1C(=O)O"));
        assert_eq!(p.charge, Some(0));
    }

    #[test]
    fn synonym_response_parses_first_information_block() {
        let body: InformationListResponse<SynonymInformation> = serde_json::from_value(json!({
            "InformationList": {"Information": [{"CID": 962, "Synonym": ["water", "oxidane"]}]}
        })).unwrap();
        assert_eq!(body.information_list.information[0].synonym, vec!["water", "oxidane"]);
    }
}
