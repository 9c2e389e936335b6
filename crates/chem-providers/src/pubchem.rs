//! Resolutores PubChem.
//!
//! - `PubChemIdentifierResolver`: página de búsqueda por término (CAS) ->
//!   CID leído del meta `og:url`.
//! - `PubChemNotationResolver`: documento PUG-View del CID -> SMILES
//!   canónico.
//!
//! Política común de status HTTP: 2xx => extracción; 404 => `None`; otro
//! status o fallo de transporte => `PipelineError::LookupTransport` (fatal).

use chem_core::{IdentifierResolver, NotationResolver, PipelineError};
use chem_domain::RegistryNumber;
use log::{debug, info, warn};

use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::extract::{Extractor, FirstMatch, MarkerSpec, StructuredSmiles};
use crate::template::render;
use crate::transport::HttpTransport;

/// GET + interpretación del status. `Ok(None)` para 404.
fn fetch_body<T: HttpTransport>(transport: &T, url: &str) -> Result<Option<String>, ProviderError> {
    let resp = transport.get(url)?;
    if resp.is_success() {
        Ok(Some(resp.body))
    } else if resp.status == 404 {
        debug!("fetch:not found url={url}");
        Ok(None)
    } else {
        Err(ProviderError::Status { url: url.to_string(),
                                    status: resp.status })
    }
}

pub struct PubChemIdentifierResolver<T: HttpTransport> {
    transport: T,
    url_template: String,
    extractor: Box<dyn Extractor>,
}

impl<T: HttpTransport> PubChemIdentifierResolver<T> {
    pub fn new(transport: T, config: &ProviderConfig) -> Self {
        PubChemIdentifierResolver { transport,
                                    url_template: config.search_url_template.clone(),
                                    extractor: Box::new(MarkerSpec::og_url_compound()) }
    }

    /// Reemplaza la estrategia de extracción.
    pub fn with_extractor(mut self, extractor: impl Extractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }
}

impl<T: HttpTransport> IdentifierResolver for PubChemIdentifierResolver<T> {
    fn resolve_identifier(&self, registry_number: &str) -> Result<Option<String>, PipelineError> {
        let Some(registry) = RegistryNumber::parse(registry_number) else {
            debug!("identifier:skip empty registry number");
            return Ok(None);
        };
        if !registry.is_valid_cas() {
            warn!("identifier:registry {registry} is not a valid CAS number; looking it up anyway");
        }
        let url = render(&self.url_template, "registry", registry.as_str());
        let Some(body) = fetch_body(&self.transport, &url)? else {
            return Ok(None);
        };
        let cid = self.extractor.extract(&body);
        match cid {
            Some(cid) if cid.chars().all(|c| c.is_ascii_digit()) => {
                info!("identifier:resolved registry={registry} cid={cid}");
                Ok(Some(cid))
            }
            Some(other) => {
                warn!("identifier:ignoring non-numeric compound id {other:?} for registry={registry}");
                Ok(None)
            }
            None => Ok(None),
        }
    }
}

pub struct PubChemNotationResolver<T: HttpTransport> {
    transport: T,
    url_template: String,
    extractor: Box<dyn Extractor>,
}

impl<T: HttpTransport> PubChemNotationResolver<T> {
    /// Extracción por marcador con parseo estructurado como respaldo.
    pub fn new(transport: T, config: &ProviderConfig) -> Self {
        let chain = FirstMatch(vec![Box::new(MarkerSpec::canonical_smiles()) as Box<dyn Extractor>,
                                    Box::new(StructuredSmiles::default())]);
        PubChemNotationResolver { transport,
                                  url_template: config.compound_url_template.clone(),
                                  extractor: Box::new(chain) }
    }

    pub fn with_extractor(mut self, extractor: impl Extractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }
}

impl<T: HttpTransport> NotationResolver for PubChemNotationResolver<T> {
    fn resolve_notation(&self, external_compound_id: &str) -> Result<Option<String>, PipelineError> {
        let cid = external_compound_id.trim();
        if cid.is_empty() {
            return Ok(None);
        }
        let url = render(&self.url_template, "cid", cid);
        let Some(body) = fetch_body(&self.transport, &url)? else {
            return Ok(None);
        };
        let smiles = self.extractor.extract(&body);
        match &smiles {
            Some(s) => info!("notation:resolved cid={cid} smiles={s}"),
            None => info!("notation:not found cid={cid}"),
        }
        Ok(smiles)
    }
}
