// src/graph/resolver.rs
use crate::index::TemplateIndex;
use crate::types::{DanglingReference, DirectiveKind, DirectiveOccurrence, SlotDeclaration};

/// Outcome of resolving one occurrence. Every occurrence lands in exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Target found; `resolved` is set.
    Resolved(DirectiveOccurrence),
    /// Target names no enumerated template.
    Dangling(DanglingReference),
    /// `@yield` slot; never looked up.
    Slot(SlotDeclaration),
}

/// Converts a dot-notation logical name into a root-relative path.
///
/// `layouts.app` becomes `layouts/app.blade.php` for the default suffix.
#[must_use]
pub fn logical_to_path(name: &str, suffix: &str) -> String {
    let mut path = name.replace('.', "/");
    path.push_str(suffix);
    path
}

/// Resolves a single occurrence against the index.
#[must_use]
pub fn resolve(mut occurrence: DirectiveOccurrence, index: &TemplateIndex, suffix: &str) -> Resolution {
    if occurrence.kind == DirectiveKind::Yield {
        return Resolution::Slot(SlotDeclaration {
            source: occurrence.source,
            name: occurrence.raw_target,
            line: occurrence.line,
        });
    }

    let candidate = logical_to_path(&occurrence.raw_target, suffix);
    match index.get_id(&candidate) {
        Some(id) => {
            occurrence.resolved = Some(id);
            Resolution::Resolved(occurrence)
        }
        None => Resolution::Dangling(DanglingReference {
            source: occurrence.source,
            kind: occurrence.kind,
            raw_target: occurrence.raw_target,
            line: occurrence.line,
        }),
    }
}

/// Resolves every occurrence, preserving input order.
#[must_use]
pub fn resolve_all<I>(occurrences: I, index: &TemplateIndex, suffix: &str) -> Vec<Resolution>
where
    I: IntoIterator<Item = DirectiveOccurrence>,
{
    occurrences
        .into_iter()
        .map(|occ| resolve(occ, index, suffix))
        .collect()
}
