//! Override-priority merge of custom mappings into a base theme.

use super::{CustomMappings, IconMap, ThemeDocument};

/// Union of `base` and `overrides`; on collision the override value wins.
///
/// Base keys keep their position; keys new to `base` are appended in override order.
pub fn merge_mappings(base: &IconMap, overrides: Option<&IconMap>) -> IconMap {
    let mut merged = base.clone();
    if let Some(overrides) = overrides {
        merged.extend(
            overrides
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
    }
    merged
}

/// Merge each override document, in order, into a copy of `base`.
///
/// The four mapping categories are merged independently. Icon definitions and
/// every untyped field of the base are carried over unchanged. Override values
/// are not checked against the icon definition table.
pub fn merge_theme(base: &ThemeDocument, overrides: &[CustomMappings]) -> ThemeDocument {
    overrides
        .iter()
        .fold(base.clone(), |theme, mappings| ThemeDocument {
            file_extensions: merge_mappings(
                &theme.file_extensions,
                mappings.file_extensions.as_ref(),
            ),
            file_names: merge_mappings(&theme.file_names, mappings.file_names.as_ref()),
            folder_names: merge_mappings(&theme.folder_names, mappings.folder_names.as_ref()),
            folder_names_expanded: merge_mappings(
                &theme.folder_names_expanded,
                mappings.folder_names_expanded.as_ref(),
            ),
            ..theme
        })
}
