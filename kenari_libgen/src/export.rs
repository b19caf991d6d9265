use kenari_ir::{DefRef, Visibility};

/// Whether a declaration's identity belongs to the cross-module linkage
/// surface. Names of non-exported declarations are still computed for
/// intra-module matching; they just never leave the module. An accessor has
/// no independent source declaration and defers to its property.
pub fn is_exported(def: DefRef<'_>) -> bool {
    if let Some(property) = def.resolved_accessor_property() {
        return is_exported(property);
    }
    matches!(def.visibility, Visibility::Public | Visibility::Protected)
}
