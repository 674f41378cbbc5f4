pub mod inspect;
pub mod simulate;

use std::path::Path;

use rb_core::CombatantDefinition;

/// Read and validate a combatant definition from a JSON file.
fn load_definition(path: &Path) -> Result<CombatantDefinition, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    CombatantDefinition::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))
}
