//! Insomnia v4 export

use indexmap::IndexMap;
use serde::Serialize;

use super::ExportedRequest;
use crate::errors::Result;

const WORKSPACE_ID: &str = "wrk_carmelia";

#[derive(Debug, Serialize)]
struct Export<'a> {
    #[serde(rename = "_type")]
    kind: &'static str,
    #[serde(rename = "__export_format")]
    export_format: u32,
    resources: Vec<Resource<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "_type", rename_all = "snake_case")]
enum Resource<'a> {
    Workspace {
        #[serde(rename = "_id")]
        id: &'static str,
        name: &'a str,
        #[serde(rename = "parentId")]
        parent_id: Option<&'a str>,
        scope: &'static str,
    },
    RequestGroup {
        #[serde(rename = "_id")]
        id: String,
        name: &'a str,
        #[serde(rename = "parentId")]
        parent_id: &'static str,
    },
    Request {
        #[serde(rename = "_id")]
        id: String,
        name: &'a str,
        method: &'a str,
        url: &'a str,
        headers: Vec<Header<'a>>,
        #[serde(rename = "parentId")]
        parent_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        body: Option<Body<'a>>,
    },
}

#[derive(Debug, Serialize)]
struct Header<'a> {
    name: &'a str,
    value: &'a str,
}

#[derive(Debug, Serialize)]
struct Body<'a> {
    #[serde(rename = "mimeType")]
    mime_type: &'static str,
    text: &'a str,
}

/// Request group id for a folder path
fn folder_id(folder: &str) -> String {
    format!("fld_{}", folder.replace('/', "_"))
}

/// One workspace, one request group per distinct folder (first-seen order),
/// then one request per document.
pub(super) fn export(name: &str, requests: &[ExportedRequest]) -> Result<String> {
    let mut resources = vec![Resource::Workspace {
        id: WORKSPACE_ID,
        name,
        parent_id: None,
        scope: "collection",
    }];

    let mut folder_ids: IndexMap<&str, String> = IndexMap::new();
    for req in requests.iter().filter(|r| !r.folder.is_empty()) {
        if !folder_ids.contains_key(req.folder.as_str()) {
            let id = folder_id(&req.folder);
            resources.push(Resource::RequestGroup {
                id: id.clone(),
                name: &req.folder,
                parent_id: WORKSPACE_ID,
            });
            folder_ids.insert(&req.folder, id);
        }
    }

    for (i, req) in requests.iter().enumerate() {
        let doc = &req.document;
        let parent_id = folder_ids
            .get(req.folder.as_str())
            .cloned()
            .unwrap_or_else(|| WORKSPACE_ID.to_string());

        resources.push(Resource::Request {
            id: format!("req_{}", i),
            name: &req.name,
            method: &doc.method,
            url: &doc.url,
            headers: doc
                .headers
                .iter()
                .map(|(name, value)| Header { name, value })
                .collect(),
            parent_id,
            body: doc.has_body().then(|| Body {
                mime_type: "application/json",
                text: &doc.body,
            }),
        });
    }

    let export = Export {
        kind: "export",
        export_format: 4,
        resources,
    };

    Ok(serde_json::to_string_pretty(&export)?)
}
