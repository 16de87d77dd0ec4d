//! Postman Collection v2.1 export

use std::collections::BTreeMap;

use serde::Serialize;

use super::ExportedRequest;
use crate::errors::Result;

const SCHEMA_URL: &str = "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

#[derive(Debug, Serialize)]
struct Collection<'a> {
    info: Info<'a>,
    item: Vec<Item<'a>>,
}

#[derive(Debug, Serialize)]
struct Info<'a> {
    name: &'a str,
    schema: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Item<'a> {
    Folder { name: &'a str, item: Vec<RequestItem<'a>> },
    Request(RequestItem<'a>),
}

#[derive(Debug, Serialize)]
struct RequestItem<'a> {
    name: &'a str,
    request: Request<'a>,
}

#[derive(Debug, Serialize)]
struct Request<'a> {
    method: &'a str,
    header: Vec<Header<'a>>,
    url: Url<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<Body<'a>>,
}

#[derive(Debug, Serialize)]
struct Header<'a> {
    key: &'a str,
    value: &'a str,
}

#[derive(Debug, Serialize)]
struct Url<'a> {
    raw: &'a str,
}

#[derive(Debug, Serialize)]
struct Body<'a> {
    mode: &'static str,
    raw: &'a str,
}

/// Folders come first in name order, then root requests in collection order.
/// Folder paths are single opaque group names, not nested.
pub(super) fn export(name: &str, requests: &[ExportedRequest]) -> Result<String> {
    let mut folders: BTreeMap<&str, Vec<RequestItem>> = BTreeMap::new();
    let mut root = Vec::new();

    for req in requests {
        let item = request_item(req);
        if req.folder.is_empty() {
            root.push(Item::Request(item));
        } else {
            folders.entry(req.folder.as_str()).or_default().push(item);
        }
    }

    let mut item: Vec<Item> = folders
        .into_iter()
        .map(|(name, item)| Item::Folder { name, item })
        .collect();
    item.extend(root);

    let collection = Collection {
        info: Info { name, schema: SCHEMA_URL },
        item,
    };

    Ok(serde_json::to_string_pretty(&collection)?)
}

fn request_item(req: &ExportedRequest) -> RequestItem<'_> {
    let doc = &req.document;
    RequestItem {
        name: &req.name,
        request: Request {
            method: &doc.method,
            header: doc
                .headers
                .iter()
                .map(|(key, value)| Header { key, value })
                .collect(),
            url: Url { raw: &doc.url },
            body: doc.has_body().then(|| Body {
                mode: "raw",
                raw: &doc.body,
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_document;
    use serde_json::{json, Value};

    fn export_json(requests: &[ExportedRequest]) -> Value {
        serde_json::from_str(&export("Demo API", requests).unwrap()).unwrap()
    }

    #[test]
    fn test_collection_info() {
        let out = export_json(&[ExportedRequest::new("", "ping", parse_document("GET /ping"))]);
        assert_eq!(out["info"]["name"], "Demo API");
        assert_eq!(out["info"]["schema"], SCHEMA_URL);
    }

    #[test]
    fn test_request_item_shape() {
        let doc = parse_document("POST {{base}}/users\nContent-Type: application/json\nX-Id: 1\n\n{\"a\":1}");
        let out = export_json(&[ExportedRequest::new("", "create", doc)]);
        assert_eq!(
            out["item"][0],
            json!({
                "name": "create",
                "request": {
                    "method": "POST",
                    "header": [
                        {"key": "Content-Type", "value": "application/json"},
                        {"key": "X-Id", "value": "1"}
                    ],
                    "url": {"raw": "{{base}}/users"},
                    "body": {"mode": "raw", "raw": "{\"a\":1}"}
                }
            })
        );
    }

    #[test]
    fn test_no_body_key_without_body() {
        let out = export_json(&[ExportedRequest::new("", "list", parse_document("GET /users"))]);
        assert!(out["item"][0]["request"].get("body").is_none());
        assert_eq!(out["item"][0]["request"]["header"], json!([]));
    }

    #[test]
    fn test_folder_grouping_and_order() {
        let requests = vec![
            ExportedRequest::new("", "root-1", parse_document("GET /a")),
            ExportedRequest::new("users", "list", parse_document("GET /users")),
            ExportedRequest::new("admin/keys", "rotate", parse_document("POST /keys")),
            ExportedRequest::new("users", "get", parse_document("GET /users/1")),
            ExportedRequest::new("", "root-2", parse_document("GET /b")),
        ];
        let out = export_json(&requests);
        let items = out["item"].as_array().unwrap();
        assert_eq!(items.len(), 4);

        assert_eq!(items[0]["name"], "admin/keys");
        assert_eq!(items[0]["item"][0]["name"], "rotate");
        assert_eq!(items[1]["name"], "users");
        assert_eq!(items[1]["item"][0]["name"], "list");
        assert_eq!(items[1]["item"][1]["name"], "get");
        assert_eq!(items[2]["name"], "root-1");
        assert_eq!(items[3]["name"], "root-2");
        assert!(items[2].get("item").is_none());
    }

    #[test]
    fn test_two_space_indent() {
        let out = export("x", &[ExportedRequest::new("", "a", parse_document("GET /"))]).unwrap();
        assert!(out.starts_with("{\n  \"info\": {\n    \"name\": \"x\""));
    }
}
