// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Navigation metadata for the console.
//!
//! Each collapsible section declares its leaf routes up front; the active
//! section is derived by exact segment match against the current route.
//! Substring heuristics are deliberately avoided so one route name being a
//! suffix of another can never expand the wrong section.

/// A navigable leaf route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuLeaf {
    /// Label shown to the operator.
    pub label: &'static str,
    /// The route's final path segment.
    pub route: &'static str,
}

/// A collapsible menu section owning a set of leaf routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuSection {
    /// Section title.
    pub title: &'static str,
    /// The section's leaves.
    pub leaves: &'static [MenuLeaf],
}

/// The console's menu sections.
pub const SECTIONS: &[MenuSection] = &[
    MenuSection {
        title: "Feedback",
        leaves: &[
            MenuLeaf {
                label: "Complaints",
                route: "complaints",
            },
            MenuLeaf {
                label: "Suggestions",
                route: "suggestions",
            },
        ],
    },
    MenuSection {
        title: "Reports",
        leaves: &[MenuLeaf {
            label: "TYFCB Summary",
            route: "tyfcb-summary",
        }],
    },
];

/// Returns the section whose leaf owns the given route, if any.
///
/// The route's query string is dropped and only its final path segment is
/// compared, exactly, against declared leaves.
#[must_use]
pub fn active_section(route: &str) -> Option<&'static MenuSection> {
    let path: &str = route.split('?').next().unwrap_or(route);
    let segment: &str = path.rsplit('/').find(|segment| !segment.is_empty())?;

    SECTIONS.iter().find(|section| {
        section
            .leaves
            .iter()
            .any(|leaf| leaf.route == segment)
    })
}
