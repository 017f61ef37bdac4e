//! Parameter store example for geoparam-rs
//!
//! Shows the merge / delete semantics of per-user parameter maps, including
//! the error responses.

use geoparam_core::prelude::*;
use serde_json::json;

fn main() -> Result<()> {
    println!("=== geoparam-rs Parameter Store Example ===\n");

    let store = MemoryStore::new();
    store.create_user(1, ParameterMap::new())?;
    let svc = ParameterService::new(&store);

    println!("--- Example 1: Merge ---");
    let merged = svc.update(
        1,
        &UpdateParametersRequest {
            parameters: Some(json!({"theme": "dark", "notifications": true})),
        },
    )?;
    println!("parameters: {}", serde_json::Value::Object(merged));
    println!();

    println!("--- Example 2: Rejected patch ---");
    let resp = ApiResponse::from(svc.update(
        1,
        &UpdateParametersRequest {
            parameters: Some(json!("invalid_string")),
        },
    ));
    println!("{} {}", resp.status, resp.body);
    println!();

    println!("--- Example 3: Delete twice ---");
    for _ in 0..2 {
        let resp = ApiResponse::from(svc.delete(
            1,
            &DeleteParameterRequest {
                key: Some("theme".into()),
            },
        ));
        println!("{} {}", resp.status, resp.body);
    }

    Ok(())
}
