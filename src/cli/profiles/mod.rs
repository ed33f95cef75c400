//! Profiles command - lists the built-in environment profile table

use serde_json::Value;

use crate::domain::ProfileRegistry;

/// Print every registered profile and its overlay fields
pub fn run() -> anyhow::Result<()> {
    let registry = ProfileRegistry::builtin();

    for name in registry.names() {
        if let Some(profile) = registry.get(name) {
            let fields = serde_json::to_string_pretty(&Value::Object(profile.fields().clone()))?;
            println!("{name}: {fields}");
        }
    }

    Ok(())
}
