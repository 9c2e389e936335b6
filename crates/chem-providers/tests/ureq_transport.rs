// Resolutores sobre `UreqTransport` contra un servidor HTTP local (wiremock).
// ureq es bloqueante: las llamadas se hacen dentro de spawn_blocking.

use chem_core::{IdentifierResolver, NotationResolver, PipelineError};
use chem_providers::{ProviderConfig, PubChemIdentifierResolver, PubChemNotationResolver, UreqTransport};
use std::net::TcpListener;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> ProviderConfig {
    ProviderConfig { search_url_template: format!("{}/pccompound?term={{registry}}", server.uri()),
                     compound_url_template: format!("{}/rest/pug_view/data/compound/{{cid}}/JSON", server.uri()),
                     timeout: Duration::from_secs(5),
                     ..Default::default() }
}

#[tokio::test(flavor = "multi_thread")]
async fn resolves_cid_and_smiles_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET")).and(path("/pccompound"))
                              .and(query_param("term", "64-17-5"))
                              .respond_with(ResponseTemplate::new(200).set_body_string(
        r#"<html><head> <meta property="og:url" content="https://pubchem.ncbi.nlm.nih.gov/compound/702" /></head></html>"#,
    ))
                              .expect(1)
                              .mount(&server)
                              .await;
    Mock::given(method("GET")).and(path("/rest/pug_view/data/compound/702/JSON"))
                              .respond_with(ResponseTemplate::new(200).set_body_string(
        r#"{"Record": {"Section": [{"Name": "Canonical SMILES", "Value": {"StringValue": "CCO"}}]}}"#,
    ))
                              .mount(&server)
                              .await;

    let config = config_for(&server);
    let (cid, smiles) = tokio::task::spawn_blocking(move || {
                            let transport = UreqTransport::new(&config);
                            let ids = PubChemIdentifierResolver::new(transport.clone(), &config);
                            let notations = PubChemNotationResolver::new(transport, &config);
                            let cid = ids.resolve_identifier("64-17-5").expect("lookup ok");
                            let smiles = notations.resolve_notation(cid.as_deref().unwrap_or("")).expect("lookup ok");
                            (cid, smiles)
                        }).await
                          .expect("join");

    assert_eq!(cid.as_deref(), Some("702"));
    assert_eq!(smiles.as_deref(), Some("CCO"));
}

#[tokio::test(flavor = "multi_thread")]
async fn not_found_is_absent_and_server_error_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET")).and(path("/rest/pug_view/data/compound/1/JSON"))
                              .respond_with(ResponseTemplate::new(404))
                              .mount(&server)
                              .await;
    Mock::given(method("GET")).and(path("/rest/pug_view/data/compound/2/JSON"))
                              .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
                              .mount(&server)
                              .await;

    let config = config_for(&server);
    let (missing, failed) = tokio::task::spawn_blocking(move || {
                                let r = PubChemNotationResolver::new(UreqTransport::new(&config), &config);
                                (r.resolve_notation("1"), r.resolve_notation("2"))
                            }).await
                              .expect("join");

    assert_eq!(missing, Ok(None));
    match failed {
        Err(PipelineError::LookupTransport { reason, .. }) => assert!(reason.contains("500"), "reason={reason}"),
        other => panic!("se esperaba LookupTransport, llegó {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn non_utf8_body_still_resolves() {
    let server = MockServer::start().await;
    let mut body = b"<html><head><title>Ethanol caf".to_vec();
    body.push(0xe9); // Latin-1
    body.extend_from_slice(br#"</title><meta property="og:url" content="https://pubchem.ncbi.nlm.nih.gov/compound/702" /></head>"#);
    Mock::given(method("GET")).and(path("/pccompound"))
                              .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
                              .mount(&server)
                              .await;

    let config = config_for(&server);
    let res = tokio::task::spawn_blocking(move || {
                  PubChemIdentifierResolver::new(UreqTransport::new(&config), &config).resolve_identifier("64-17-5")
              }).await
                .expect("join");
    assert_eq!(res, Ok(Some("702".to_string())));
}

#[tokio::test(flavor = "multi_thread")]
async fn body_cut_inside_multibyte_char_is_not_an_error() {
    let server = MockServer::start().await;
    let marker = r#"<meta property="og:url" content="https://pubchem.ncbi.nlm.nih.gov/compound/702" />"#;
    Mock::given(method("GET")).and(path("/pccompound"))
                              .respond_with(ResponseTemplate::new(200).set_body_string(format!("{marker}é")))
                              .mount(&server)
                              .await;

    // El límite corta la "é" (2 bytes) por la mitad.
    let config = ProviderConfig { max_body_bytes: marker.len() as u64 + 1,
                                  ..config_for(&server) };
    let res = tokio::task::spawn_blocking(move || {
                  PubChemIdentifierResolver::new(UreqTransport::new(&config), &config).resolve_identifier("64-17-5")
              }).await
                .expect("join");
    assert_eq!(res, Ok(Some("702".to_string())));
}

#[test]
fn unreachable_host_is_transport_error() {
    // Puerto libre: se reserva y se suelta, la conexión es rechazada.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let config = ProviderConfig { search_url_template: format!("http://127.0.0.1:{port}/pccompound?term={{registry}}"),
                                  timeout: Duration::from_secs(2),
                                  ..Default::default() };
    let res = PubChemIdentifierResolver::new(UreqTransport::new(&config), &config).resolve_identifier("64-17-5");
    assert!(matches!(res, Err(PipelineError::LookupTransport { .. })), "{res:?}");
}
