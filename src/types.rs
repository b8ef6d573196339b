// src/types.rs
//! Core value types shared across the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, densely assigned identifier of one template file within a run.
///
/// Ids start at 1 and follow enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub u32);

impl TemplateId {
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Structural directive recognised in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DirectiveKind {
    /// `@extends`: single-parent inheritance.
    Extends,
    /// `@include`: unconditional composition.
    Include,
    /// `@includeWhen`: conditional composition, same graph semantics as `Include`.
    IncludeWhen,
    /// `@component`: reusable sub-template.
    Component,
    /// `@yield`: named placeholder slot; never a dependency.
    Yield,
}

impl DirectiveKind {
    pub const ALL: [DirectiveKind; 5] = [
        DirectiveKind::Extends,
        DirectiveKind::Include,
        DirectiveKind::IncludeWhen,
        DirectiveKind::Component,
        DirectiveKind::Yield,
    ];

    /// The directive name as written after `@`.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Extends => "extends",
            Self::Include => "include",
            Self::IncludeWhen => "includeWhen",
            Self::Component => "component",
            Self::Yield => "yield",
        }
    }

    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.keyword() == keyword)
    }

    /// Include, `IncludeWhen` and Component share composition semantics.
    #[must_use]
    pub fn is_composition(self) -> bool {
        matches!(self, Self::Include | Self::IncludeWhen | Self::Component)
    }

    /// Whether an occurrence of this kind names another template.
    #[must_use]
    pub fn is_reference(self) -> bool {
        self != Self::Yield
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A directive as found in raw text, before it is tied to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub kind: DirectiveKind,
    pub raw_target: String,
    /// 1-based line of the `@` that opens the directive.
    pub line: usize,
}

/// A directive attributed to its source template, optionally resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectiveOccurrence {
    pub source: TemplateId,
    pub kind: DirectiveKind,
    pub raw_target: String,
    pub line: usize,
    pub resolved: Option<TemplateId>,
}

impl DirectiveOccurrence {
    #[must_use]
    pub fn new(source: TemplateId, directive: Directive) -> Self {
        Self {
            source,
            kind: directive.kind,
            raw_target: directive.raw_target,
            line: directive.line,
            resolved: None,
        }
    }
}

/// One edge of the dependency graph.
///
/// `Extends` edges run parent -> child; composition edges run
/// includer -> included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DependencyEdge {
    pub from: TemplateId,
    pub to: TemplateId,
    pub kind: DirectiveKind,
}

impl DependencyEdge {
    /// Orients a reference from `source` to `target` per the edge convention.
    #[must_use]
    pub fn oriented(source: TemplateId, target: TemplateId, kind: DirectiveKind) -> Self {
        if kind == DirectiveKind::Extends {
            Self { from: target, to: source, kind }
        } else {
            Self { from: source, to: target, kind }
        }
    }

    /// The template that contains the directive producing this edge.
    #[must_use]
    pub fn declaring(&self) -> TemplateId {
        if self.kind == DirectiveKind::Extends {
            self.to
        } else {
            self.from
        }
    }

    /// The template the directive names.
    #[must_use]
    pub fn referenced(&self) -> TemplateId {
        if self.kind == DirectiveKind::Extends {
            self.from
        } else {
            self.to
        }
    }
}

/// A reference whose target is not among the enumerated templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    pub source: TemplateId,
    pub kind: DirectiveKind,
    pub raw_target: String,
    pub line: usize,
}

/// A `@yield` slot declared by a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotDeclaration {
    pub source: TemplateId,
    pub name: String,
    pub line: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extends_points_parent_to_child() {
        let child = TemplateId(2);
        let parent = TemplateId(1);
        let edge = DependencyEdge::oriented(child, parent, DirectiveKind::Extends);
        assert_eq!(edge.from, parent);
        assert_eq!(edge.to, child);
        assert_eq!(edge.declaring(), child);
        assert_eq!(edge.referenced(), parent);
    }

    #[test]
    fn test_composition_points_includer_to_included() {
        for kind in [
            DirectiveKind::Include,
            DirectiveKind::IncludeWhen,
            DirectiveKind::Component,
        ] {
            let edge = DependencyEdge::oriented(TemplateId(5), TemplateId(9), kind);
            assert_eq!((edge.from, edge.to), (TemplateId(5), TemplateId(9)));
        }
    }

    #[test]
    fn test_keyword_round_trip() {
        for kind in DirectiveKind::ALL {
            assert_eq!(DirectiveKind::from_keyword(kind.keyword()), Some(kind));
        }
        assert_eq!(DirectiveKind::from_keyword("section"), None);
    }

    #[test]
    fn test_kind_serializes_camel_case() {
        let json = serde_json::to_string(&DirectiveKind::IncludeWhen).unwrap();
        assert_eq!(json, "\"includeWhen\"");
    }
}
