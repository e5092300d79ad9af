// Archivo: generation.rs
// Propósito: cliente del endpoint de generación de texto (`generateContent`)
// y construcción del prompt de descripción.
use crate::config::ProviderConfig;
use crate::errors::{ProviderError, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

/// Prompt que pide una descripción breve centrada en los usos reales del
/// compuesto, con fórmulas delimitadas para el tipografiado matemático.
pub fn generation_prompt(chemical_name: &str) -> String {
    format!("Write a short description (approx 2-3 sentences) of the chemical \"{}\".\n\
             Crucial: Explicitly mention where it is mainly used in real-world applications.\n\
             Keep it concise and easy to read.\n\
             If using chemical formulas or math, please use standard LaTeX formatting (e.g. $H_2O$, $CO_2$) \
             enclosed in dollar signs.",
            chemical_name)
}

/// Generador de texto a partir de un prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Devuelve el texto generado. Credencial vacía, fallo de red, estado
    /// distinto de éxito o respuesta sin texto son errores.
    async fn generate(&self, credential: &str, prompt: &str) -> Result<String>;
}

#[derive(Debug, Serialize, Deserialize)]
struct GenerationPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GenerationContent {
    #[serde(default)]
    parts: Vec<GenerationPart>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<GenerationContent>,
}

#[derive(Debug, Deserialize)]
struct GenerationCandidate {
    content: Option<GenerationContent>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<GenerationCandidate>,
}

impl GenerateResponse {
    /// Texto de la primera parte del primer candidato.
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|t| !t.trim().is_empty())
    }
}

/// Cliente de la API `generateContent`.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    base: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: &ProviderConfig) -> Self {
        Self { client,
               base: config.gemini_base.trim_end_matches('/').to_string(),
               model: config.gemini_model.clone() }
    }

    fn request_url(&self) -> Result<Url> {
        Url::parse(&format!("{}/models/{}:generateContent", self.base, self.model))
            .map_err(|e| ProviderError::Config(format!("GEMINI_BASE_URL inválida: {}", e)))
    }
}

/// Cabecera que lleva la credencial; nunca va en la URL.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Error de transporte sin la URL de la petición.
fn transport_error(e: reqwest::Error) -> ProviderError {
    ProviderError::Http(e.without_url())
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, credential: &str, prompt: &str) -> Result<String> {
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(ProviderError::MissingCredential);
        }
        let body = GenerateRequest { contents: vec![GenerationContent { parts: vec![GenerationPart { text:
                                                                                                  Some(prompt.to_string()) }] }] };
        log::debug!("solicitando descripción generada al modelo {}", self.model);
        let response = self.client
                           .post(self.request_url()?)
                           .header(API_KEY_HEADER, credential)
                           .json(&body)
                           .send()
                           .await
                           .map_err(transport_error)?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("el endpoint de generación respondió {}", status);
            return Err(ProviderError::Status { endpoint: "generation", status: status.as_u16() });
        }
        let parsed: GenerateResponse =
            response.json()
                    .await
                    .map_err(|e| ProviderError::Malformed(format!("generation: {}", e.without_url())))?;
        parsed.first_text()
              .ok_or_else(|| ProviderError::Malformed("respuesta de generación sin texto".into()))
    }
}
