//! End-to-end tests of the quote client against a mock SOAP service

use april_ws::{
    BufferedResponse, ClientConfig, Credentials, QuoteClient, QuoteError, SoapValue,
};
use chrono::NaiveDate;
use mockito::{Matcher, Server, ServerGuard};
use rstest::rstest;

fn envelope(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <soapenv:Body>{body}</soapenv:Body>
</soapenv:Envelope>"#
    )
}

fn fault(message: &str) -> String {
    envelope(&format!(
        "<soapenv:Fault><faultcode>soapenv:Server.userException</faultcode><faultstring>{message}</faultstring></soapenv:Fault>"
    ))
}

fn client_for(server: &ServerGuard) -> QuoteClient {
    let config = ClientConfig::new(format!("{}/webservice/services/CoreWebService2?wsdl", server.url()))
        .with_namespace("urn:april");
    QuoteClient::with_config(Credentials::new([("login", "agent"), ("password", "secret")]), &config)
}

#[test]
fn test_get_devis_sends_full_request() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/webservice/services/CoreWebService2")
        .match_header("SOAPAction", "\"urn:april#getDevis\"")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"<ns1:getDevis><login xsi:type="xsd:string">agent</login><password xsi:type="xsd:string">secret</password><idAssurance xsi:type="xsd:long">5</idAssurance><idFormule xsi:type="xsd:long">12</idFormule>"#.to_string()),
            Matcher::Regex(r#"<dateDepart><annee xsi:type="xsd:string">2023</annee><jour xsi:type="xsd:string">07</jour><mois xsi:type="xsd:string">04</mois></dateDepart>"#.to_string()),
            Matcher::Regex(r#"<idPays xsi:type="xsd:string">FR</idPays><idTypeVoyage xsi:type="xsd:string">OTH</idTypeVoyage>"#.to_string()),
            Matcher::Regex(r#"<nom xsi:type="xsd:string">Martin</nom><prenom xsi:type="xsd:string">Lea</prenom>"#.to_string()),
            Matcher::Regex(r#"<param14 xsi:type="xsd:boolean">false</param14><param15 xsi:type="xsd:string"></param15></ns1:getDevis>"#.to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "text/xml; charset=utf-8")
        .with_body(envelope(
            r#"<ns1:getDevisResponse xmlns:ns1="urn:april">
                 <getDevisReturn>
                   <idDevis xsi:type="xsd:int">4411</idDevis>
                   <prime xsi:type="xsd:double">87.5</prime>
                 </getDevisReturn>
               </ns1:getDevisResponse>"#,
        ))
        .create();

    let mut client = client_for(&server);
    client
        .add_traveler(true, "Martin", "Lea", 1200.0, true)
        .add_traveler(true, "Martin", "Hugo", 1200.0, false)
        .add_departure_date(&NaiveDate::from_ymd_opt(2023, 4, 7).unwrap())
        .add_arrival_date(&NaiveDate::from_ymd_opt(2023, 4, 21).unwrap());

    let quote = client.get_devis(5, 12).unwrap();

    mock.assert();
    assert_eq!(quote.get("idDevis"), Some(&SoapValue::Int(4411)));
    assert_eq!(quote.get("prime").and_then(SoapValue::as_f64), Some(87.5));
}

#[test]
fn test_get_devis_multi_ref_result() {
    let mut server = Server::new();
    server
        .mock("POST", "/webservice/services/CoreWebService2")
        .with_status(200)
        .with_header("content-type", "text/xml; charset=utf-8")
        .with_body(envelope(
            r##"<ns1:getDevisResponse xmlns:ns1="urn:april">
                 <getDevisReturn href="#id0"/>
               </ns1:getDevisResponse>
               <multiRef id="id0" xsi:type="ns2:Devis" xmlns:ns2="urn:april">
                 <idDevis xsi:type="xsd:int">4411</idDevis>
                 <prime xsi:type="xsd:double">87.5</prime>
               </multiRef>"##,
        ))
        .create();

    let mut client = client_for(&server);
    client
        .add_traveler(true, "Martin", "Lea", 1200.0, true)
        .add_departure_date(&NaiveDate::from_ymd_opt(2023, 4, 7).unwrap())
        .add_arrival_date(&NaiveDate::from_ymd_opt(2023, 4, 21).unwrap());

    let quote = client.get_devis(5, 12).unwrap();

    assert_eq!(quote.get("idDevis"), Some(&SoapValue::Int(4411)));
    assert_eq!(quote.get("prime").and_then(SoapValue::as_f64), Some(87.5));
}

#[test]
fn test_dangling_reference_is_transport_error() {
    let mut server = Server::new();
    server
        .mock("POST", "/webservice/services/CoreWebService2")
        .with_status(200)
        .with_body(envelope(
            r##"<ns1:getAssurancesResponse xmlns:ns1="urn:april"><getAssurancesReturn href="#id3"/></ns1:getAssurancesResponse>"##,
        ))
        .create();

    let err = client_for(&server).get_assurances().unwrap_err();

    assert!(matches!(err, QuoteError::Transport(_)));
}

#[rstest]
#[case("User.unknown", "Utilisateur invalide (login, mot de passe incorrect)")]
#[case("error.departSupRetour", "Départ > Retour")]
#[case("pays inconnu", "Pays inconnu")]
#[case("NoAssistanceForVouche", "Pas d’assistance pour ce contrat")]
fn test_known_faults_are_localized(#[case] code: &str, #[case] expected: &str) {
    let mut server = Server::new();
    server
        .mock("POST", "/webservice/services/CoreWebService2")
        .with_status(500)
        .with_header("content-type", "text/xml; charset=utf-8")
        .with_body(fault(code))
        .create();

    let err = client_for(&server).get_assurances().unwrap_err();

    assert!(matches!(err, QuoteError::KnownRemote { .. }));
    assert_eq!(err.message(), expected);
}

#[test]
fn test_unknown_fault_is_returned_verbatim() {
    let mut server = Server::new();
    server
        .mock("POST", "/webservice/services/CoreWebService2")
        .with_status(500)
        .with_body(fault("Some new backend error"))
        .create();

    let err = client_for(&server).get_formules(3).unwrap_err();

    assert!(matches!(err, QuoteError::UnknownRemote(_)));
    assert_eq!(err.to_string(), "Some new backend error");
}

#[test]
fn test_unreachable_service_is_transport_error() {
    let config = ClientConfig::new("http://127.0.0.1:9/services/Core?wsdl");
    let client = QuoteClient::with_config(Credentials::new([("login", "agent")]), &config);

    let err = client.get_assurances().unwrap_err();

    assert!(matches!(err, QuoteError::Transport(_)));
    assert!(!err.is_remote());
}

#[test]
fn test_voucher_is_streamed_to_response() {
    let mut server = Server::new();
    server
        .mock("POST", "/webservice/services/CoreWebService2")
        .match_body(Matcher::Regex(r#"<noDevis xsi:type="xsd:long">4411</noDevis>"#.to_string()))
        .with_status(200)
        .with_body(envelope(
            r#"<ns1:getVoucherPdfResponse xmlns:ns1="urn:april">
                 <getVoucherPdfReturn xsi:type="xsd:base64Binary">JVBERi0xLjQ=</getVoucherPdfReturn>
               </ns1:getVoucherPdfResponse>"#,
        ))
        .create();

    let mut response = BufferedResponse::new();
    let document = client_for(&server).get_voucher_pdf(4411, &mut response).unwrap();

    assert_eq!(document, b"%PDF-1.4");
    assert_eq!(response.header("Content-type"), Some("application/pdf"));
    assert_eq!(
        response.header("Content-Disposition"),
        Some("inline; filename=filename.pdf")
    );
    assert_eq!(response.body(), b"%PDF-1.4");
}
