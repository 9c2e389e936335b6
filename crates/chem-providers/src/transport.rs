//! Frontera HTTP de los resolutores.
//!
//! `HttpTransport::get` devuelve `Ok` para cualquier respuesta HTTP recibida
//! (incluidos 4xx/5xx); la interpretación del status es responsabilidad del
//! resolutor. `Err` queda reservado para fallos de transporte.

use std::io::Read;
use std::sync::{Arc, Mutex};

use log::debug;

use crate::config::ProviderConfig;
use crate::error::ProviderError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: &str) -> Self {
        HttpResponse { status: 200, body: body.to_string() }
    }
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

pub trait HttpTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, ProviderError>;
}

/// Transporte bloqueante sobre un `ureq::Agent` con timeouts acotados.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    max_body_bytes: u64,
}

impl UreqTransport {
    pub fn new(config: &ProviderConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout_connect(config.timeout)
                                             .timeout_read(config.timeout)
                                             .timeout_write(config.timeout)
                                             .user_agent(&config.user_agent)
                                             .build();
        UreqTransport { agent,
                        max_body_bytes: config.max_body_bytes }
    }

    /// Lee hasta `max_body_bytes`; bytes no UTF-8 se reemplazan por U+FFFD.
    fn read_body(&self, url: &str, resp: ureq::Response) -> Result<String, ProviderError> {
        let mut bytes = Vec::new();
        resp.into_reader()
            .take(self.max_body_bytes)
            .read_to_end(&mut bytes)
            .map_err(|e| ProviderError::Transport { url: url.to_string(),
                                                    reason: format!("read body: {e}") })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl HttpTransport for UreqTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, ProviderError> {
        debug!("http:get:start url={url}");
        let result = match self.agent.get(url).call() {
            Ok(resp) => {
                let status = resp.status();
                Ok(HttpResponse { status,
                                  body: self.read_body(url, resp)? })
            }
            Err(ureq::Error::Status(status, resp)) => {
                // El cuerpo de un error no es relevante; se descarta si falla la lectura.
                let body = self.read_body(url, resp).unwrap_or_default();
                Ok(HttpResponse { status, body })
            }
            Err(ureq::Error::Transport(transport)) => Err(ProviderError::Transport { url: url.to_string(),
                                                                                     reason: transport.to_string() }),
        };
        if let Ok(r) = &result {
            debug!("http:get:done url={url} status={} bytes={}", r.status, r.body.len());
        }
        result
    }
}

/// Transporte con respuestas fijas por URL que registra cada llamada.
/// Una URL sin respuesta registrada produce un 404.
#[derive(Clone, Default)]
pub struct StaticTransport {
    routes: Arc<Mutex<Vec<(String, Result<HttpResponse, ProviderError>)>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl StaticTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, url: &str, response: HttpResponse) -> Self {
        self.push(url, Ok(response));
        self
    }

    pub fn with_failure(self, url: &str, reason: &str) -> Self {
        self.push(url,
                  Err(ProviderError::Transport { url: url.to_string(),
                                                 reason: reason.to_string() }));
        self
    }

    fn push(&self, url: &str, r: Result<HttpResponse, ProviderError>) {
        if let Ok(mut routes) = self.routes.lock() {
            routes.push((url.to_string(), r));
        }
    }

    /// URLs solicitadas, en orden.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl HttpTransport for StaticTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(url.to_string());
        }
        let routes = self.routes.lock().map_err(|_| ProviderError::Transport { url: url.to_string(),
                                                                               reason: "poisoned".into() })?;
        routes.iter()
              .find(|(u, _)| u == url)
              .map(|(_, r)| r.clone())
              .unwrap_or_else(|| Ok(HttpResponse { status: 404,
                                                   body: String::new() }))
    }
}
