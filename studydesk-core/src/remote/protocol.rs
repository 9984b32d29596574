//! Defines the JSON protocol used for communication between studydesk
//! and provider binaries over stdin/stdout.
//!
//! A provider exposes per-user collections of JSON documents. The
//! protocol is deliberately small: list a collection, upsert one
//! document, remove one document. Any executable that speaks it can
//! back the remote side of a desk.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

pub trait ProviderCommand: Serialize {
    type Response: DeserializeOwned;
    fn command() -> Command;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    ListDocs,
    UpsertDoc,
    RemoveDoc,
}

/// Request sent from studydesk to provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response sent from provider to studydesk.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

impl<T: Serialize> Response<T> {
    pub fn success(data: T) -> String {
        serde_json::to_string(&Response::Success { data }).unwrap()
    }
}

impl Response<()> {
    pub fn error(msg: &str) -> String {
        serde_json::to_string(&Response::<()>::Error {
            error: msg.to_string(),
        })
        .unwrap()
    }
}

/// List every document in a user's collection.
///
/// For the `assignments` collection, providers return documents ordered
/// by `dueDate` ascending; documents without a parseable due date sort
/// last. Ties and undated documents are ordered by id so repeated lists
/// of an unchanged collection are byte-identical.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListDocs {
    pub user: String,
    pub collection: String,
}

impl ProviderCommand for ListDocs {
    type Response = Vec<serde_json::Value>;
    fn command() -> Command {
        Command::ListDocs
    }
}

/// Create or replace one document by id.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpsertDoc {
    pub user: String,
    pub collection: String,
    pub id: String,
    pub doc: serde_json::Value,
}

impl ProviderCommand for UpsertDoc {
    type Response = ();
    fn command() -> Command {
        Command::UpsertDoc
    }
}

/// Delete one document by id. Removing an absent document succeeds.
#[derive(Debug, Serialize, Deserialize)]
pub struct RemoveDoc {
    pub user: String,
    pub collection: String,
    pub id: String,
}

impl ProviderCommand for RemoveDoc {
    type Response = ();
    fn command() -> Command {
        Command::RemoveDoc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_round_trips_with_params() {
        let request = Request {
            command: Command::UpsertDoc,
            params: json!({"user": "amelia", "collection": "assignments"}),
        };
        let wire = serde_json::to_string(&request).unwrap();
        let parsed: Request = serde_json::from_str(&wire).unwrap();

        assert_eq!(parsed.command, Command::UpsertDoc);
        assert_eq!(parsed.params["user"], "amelia");
    }

    #[test]
    fn command_names_are_snake_case_on_the_wire() {
        let wire = serde_json::to_string(&Command::ListDocs).unwrap();
        assert_eq!(wire, r#""list_docs""#);
    }

    #[test]
    fn success_response_is_status_tagged() {
        let wire = Response::success(vec![json!({"id": "1"})]);
        let parsed: Response<Vec<serde_json::Value>> = serde_json::from_str(&wire).unwrap();

        match parsed {
            Response::Success { data } => assert_eq!(data.len(), 1),
            Response::Error { error } => panic!("unexpected error: {}", error),
        }
    }

    #[test]
    fn error_response_carries_the_message() {
        let wire = Response::error("collection unavailable");
        let parsed: Response<()> = serde_json::from_str(&wire).unwrap();

        match parsed {
            Response::Error { error } => assert_eq!(error, "collection unavailable"),
            Response::Success { .. } => panic!("expected an error response"),
        }
    }
}
