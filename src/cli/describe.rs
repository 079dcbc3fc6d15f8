//! Describe command implementation

use std::process::ExitCode;

use crate::engine::Eid;
use crate::models::{EntityClass, EntityKey};
use crate::render::{AnsiSink, Vector};

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Key of a description table entry from its command-line id.
fn parse_key(class: EntityClass, id: &str) -> Option<EntityKey> {
    if class == EntityClass::Entity {
        return id.parse().ok();
    }
    EntityKey::for_class(class, id.trim().parse().ok()?)
}

/// Execute the describe command
pub fn run_describe(mut eid: Eid, class: EntityClass, id: &str, json: bool, color: bool) -> ExitCode {
    let Some(key) = parse_key(class, id) else {
        eprintln!("Error: Invalid {} id '{}'", class, id);
        if class == EntityClass::Entity {
            eprintln!("Entity ids are written as type.variant.subtype, e.g. 5.100.-1");
        }
        return ExitCode::from(EXIT_INVALID_ARGS);
    };

    let obj = eid.describe(class, key);
    if obj.is_missing() {
        tracing::debug!(%class, %key, "No description registered");
    }

    if json {
        return match serde_json::to_string_pretty(&obj) {
            Ok(out) => {
                println!("{}", out);
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(e) => {
                eprintln!("Error: Cannot serialize description: {}", e);
                ExitCode::from(EXIT_ERROR)
            }
        };
    }

    // Terminal output has no pixel grid
    eid.display.position.set_base(Vector::default());
    let mut sink = AnsiSink::new(color).with_scale(eid.settings.scale);
    eid.render_description(&mut sink, &obj);
    print!("{}", sink.finish());
    ExitCode::from(EXIT_SUCCESS)
}
