//! studydesk-provider-folder - local folder provider for studydesk
//!
//! This binary implements the studydesk provider protocol, communicating
//! with studydesk via JSON over stdin/stdout.
//!
//! Documents are stored as plain JSON files:
//!   {root}/{user}/{collection}/{id}.json
//!
//! The storage root defaults to ~/studydesk-remote and can be changed in
//!   ~/.config/studydesk/providers/folder/config.toml
//!
//! Pointing the root at a synced folder (Dropbox, Syncthing, a git
//! checkout) turns it into a shared backend for several desks.

mod config;
mod docs;

use std::io::{self, BufRead, Write};
use studydesk_core::remote::protocol::{Command, ListDocs, RemoveDoc, Request, Response, UpsertDoc};

fn main() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Failed to read stdin: {}", e);
                break;
            }
        };

        // Skip empty lines
        if line.trim().is_empty() {
            continue;
        }

        let request: Request = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                let response = Response::error(&format!("Failed to parse request: {}", e));
                writeln!(stdout, "{}", response).unwrap();
                stdout.flush().unwrap();
                continue;
            }
        };

        let response = handle_request(request);

        writeln!(stdout, "{}", response).unwrap();
        stdout.flush().unwrap();
    }
}

fn handle_request(request: Request) -> String {
    match request.command {
        Command::ListDocs => handle_list_docs(&request.params),
        Command::UpsertDoc => handle_upsert_doc(&request.params),
        Command::RemoveDoc => handle_remove_doc(&request.params),
    }
}

fn handle_list_docs(params: &serde_json::Value) -> String {
    let params: ListDocs = match serde_json::from_value(params.clone()) {
        Ok(p) => p,
        Err(e) => return Response::error(&format!("Invalid params: {}", e)),
    };

    let root = match config::storage_root() {
        Ok(r) => r,
        Err(e) => return Response::error(&format!("{:#}", e)),
    };

    match docs::list(&root, &params.user, &params.collection) {
        Ok(docs) => Response::success(docs),
        Err(e) => Response::error(&format!("{:#}", e)),
    }
}

fn handle_upsert_doc(params: &serde_json::Value) -> String {
    let params: UpsertDoc = match serde_json::from_value(params.clone()) {
        Ok(p) => p,
        Err(e) => return Response::error(&format!("Invalid params: {}", e)),
    };

    let root = match config::storage_root() {
        Ok(r) => r,
        Err(e) => return Response::error(&format!("{:#}", e)),
    };

    match docs::upsert(&root, &params.user, &params.collection, &params.id, &params.doc) {
        Ok(()) => Response::success(()),
        Err(e) => Response::error(&format!("{:#}", e)),
    }
}

fn handle_remove_doc(params: &serde_json::Value) -> String {
    let params: RemoveDoc = match serde_json::from_value(params.clone()) {
        Ok(p) => p,
        Err(e) => return Response::error(&format!("Invalid params: {}", e)),
    };

    let root = match config::storage_root() {
        Ok(r) => r,
        Err(e) => return Response::error(&format!("{:#}", e)),
    };

    match docs::remove(&root, &params.user, &params.collection, &params.id) {
        Ok(()) => Response::success(()),
        Err(e) => Response::error(&format!("{:#}", e)),
    }
}
