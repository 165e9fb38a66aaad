//! Deep merge for configuration trees.
//!
//! Later sources override earlier ones field by field. Mappings merge
//! recursively; every other value (scalars, sequences, null) replaces the
//! existing value wholesale.

use super::ConfigTree;
use serde_json::Value;

/// Deep merge two values, with `overlay` taking precedence over `base`.
///
/// - Objects are merged recursively: keys in overlay override keys in base
/// - Arrays, strings, numbers, booleans and nulls are replaced entirely
/// - An object replacing a scalar (or the reverse) replaces it wholesale
///
/// # Example
/// ```
/// use serde_json::json;
/// use config_merge::config::deep_merge;
///
/// let base = json!({
///     "database": { "host": "mysql", "port": 3306 },
///     "replicas": ["a", "b"]
/// });
/// let overlay = json!({
///     "database": { "host": "127.0.0.1" },
///     "replicas": ["c"]
/// });
/// let result = deep_merge(base, overlay);
/// assert_eq!(
///     result,
///     json!({ "database": { "host": "127.0.0.1", "port": 3306 }, "replicas": ["c"] })
/// );
/// ```
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            merge_tree(&mut base_map, overlay_map);
            Value::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}

/// Merge `overlay` into `base` in place.
pub fn merge_tree(base: &mut ConfigTree, overlay: ConfigTree) {
    for (key, overlay_value) in overlay {
        let merged_value = match base.remove(&key) {
            Some(base_value) => deep_merge(base_value, overlay_value),
            None => overlay_value,
        };
        base.insert(key, merged_value);
    }
}

/// Merge multiple trees in order, with later trees taking precedence.
pub fn merge_all(trees: impl IntoIterator<Item = ConfigTree>) -> ConfigTree {
    trees.into_iter().fold(ConfigTree::new(), |mut acc, tree| {
        merge_tree(&mut acc, tree);
        acc
    })
}
