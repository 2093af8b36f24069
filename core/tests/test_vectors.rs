//! Verify request building and listing behavior against JSON test vectors
//! stored in `test-vectors/`.
//!
//! Comparing parsed JSON (not raw strings) avoids false negatives from
//! field-ordering differences.

use std::sync::{Arc, Mutex};

use restconfig_core::types::FeatureTypeEnvelope;
use restconfig_core::{
    ApiError, ClientConfig, FeatureTypesApi, GeoServerClient, HttpMethod, HttpRequest, HttpResponse, NamedLink,
    Transport,
};

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn str_field<'a>(case: &'a serde_json::Value, key: &str) -> &'a str {
    case[key].as_str().unwrap_or_else(|| panic!("missing {key}"))
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

fn build(api: &FeatureTypesApi, case: &serde_json::Value) -> HttpRequest {
    let body = || -> FeatureTypeEnvelope { serde_json::from_value(case["body"].clone()).unwrap() };
    match str_field(case, "operation") {
        "create_on_default_store" => api
            .build_create_on_default_store(str_field(case, "workspace"), &body())
            .unwrap(),
        "create_on_store" => api
            .build_create_on_store(str_field(case, "workspace"), str_field(case, "store"), &body())
            .unwrap(),
        "get" => api.build_get(
            str_field(case, "workspace"),
            str_field(case, "store"),
            str_field(case, "feature_type"),
            true,
        ),
        "get_by_default_store" => {
            api.build_get_by_default_store(str_field(case, "workspace"), str_field(case, "feature_type"), true)
        }
        "modify" => api
            .build_modify(
                str_field(case, "workspace"),
                str_field(case, "store"),
                str_field(case, "feature_type"),
                &body(),
                &[],
            )
            .unwrap(),
        "list_by_store" => api.build_list_by_store(str_field(case, "workspace"), str_field(case, "store"), None, true),
        "delete" => api.build_delete(
            str_field(case, "workspace"),
            str_field(case, "store"),
            str_field(case, "feature_type"),
            true,
        ),
        other => panic!("unknown operation: {other}"),
    }
}

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();
    let base_url = str_field(&vectors, "base_url");
    let api = FeatureTypesApi::new(base_url).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = str_field(case, "name");
        let expected_req = &case["expected_request"];

        let req = build(&api, case);
        assert_eq!(req.method, parse_method(str_field(expected_req, "method")), "{name}: method");
        assert_eq!(req.url, format!("{base_url}{}", str_field(expected_req, "path")), "{name}: url");

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        match expected_req.get("body") {
            Some(expected_body) => {
                let req_body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
                assert_eq!(&req_body, expected_body, "{name}: body");
            }
            None => assert!(req.body.is_none(), "{name}: body should be None"),
        }
    }
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Answers every request with the same canned response.
struct CannedTransport {
    response: Mutex<Option<HttpResponse>>,
}

impl Transport for CannedTransport {
    fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
        Ok(self.response.lock().unwrap().take().expect("one request per case"))
    }
}

#[test]
fn list_response_test_vectors() {
    let raw = include_str!("../../test-vectors/list_responses.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = str_field(case, "name");
        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: str_field(sim, "body").to_string(),
        };
        let transport = Arc::new(CannedTransport {
            response: Mutex::new(Some(response)),
        });
        let client =
            GeoServerClient::with_transport(ClientConfig::new("http://localhost:8080/geoserver"), transport).unwrap();

        let links = client.feature_types().find_feature_types("topp", "pg").unwrap();
        let expected: Vec<NamedLink> = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(links, expected, "{name}: parsed result");
    }
}
