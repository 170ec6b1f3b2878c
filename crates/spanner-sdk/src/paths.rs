// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Resource name templates.
//!
//! Every Spanner resource is addressed by a slash-separated name such as
//! `projects/my-project/instances/my-instance`. The templates here render
//! those names from ids and match ids back out of them.

use std::collections::HashMap;

/// A resource name template such as `projects/{project}/instances/{instance}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathTemplate {
    pattern: &'static str,
}

/// `projects/{project}`
pub const PROJECT: PathTemplate = PathTemplate::new("projects/{project}");

/// `projects/{project}/instanceConfigs/{instance_config}`
pub const INSTANCE_CONFIG: PathTemplate =
    PathTemplate::new("projects/{project}/instanceConfigs/{instance_config}");

/// `projects/{project}/instances/{instance}`
pub const INSTANCE: PathTemplate = PathTemplate::new("projects/{project}/instances/{instance}");

/// `projects/{project}/instances/{instance}/databases/{database}`
pub const DATABASE: PathTemplate =
    PathTemplate::new("projects/{project}/instances/{instance}/databases/{database}");

/// `projects/{project}/instances/{instance}/databases/{database}/sessions/{session}`
pub const SESSION: PathTemplate = PathTemplate::new(
    "projects/{project}/instances/{instance}/databases/{database}/sessions/{session}",
);

impl PathTemplate {
    pub const fn new(pattern: &'static str) -> Self {
        Self { pattern }
    }

    pub fn pattern(&self) -> &'static str {
        self.pattern
    }

    /// Render the template, substituting `{var}` segments in order.
    ///
    /// Missing values render as empty segments.
    pub fn render(&self, values: &[(&str, &str)]) -> String {
        self.pattern
            .split('/')
            .map(|segment| match variable(segment) {
                Some(var) => values
                    .iter()
                    .find(|(name, _)| *name == var)
                    .map(|(_, value)| *value)
                    .unwrap_or(""),
                None => segment,
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Match `name` against the template and return the bound variables.
    pub fn matches<'a>(&self, name: &'a str) -> Option<HashMap<&'static str, &'a str>> {
        let pattern: Vec<&'static str> = self.pattern.split('/').collect();
        let segments: Vec<&'a str> = name.split('/').collect();
        if pattern.len() != segments.len() {
            return None;
        }

        let mut bound = HashMap::new();
        for (expected, actual) in pattern.into_iter().zip(segments) {
            match variable(expected) {
                Some(_) if actual.is_empty() => return None,
                Some(var) => {
                    bound.insert(var, actual);
                }
                None if expected != actual => return None,
                None => {}
            }
        }
        Some(bound)
    }

    /// Extract a single variable from `name`.
    pub fn extract<'a>(&self, name: &'a str, var: &str) -> Option<&'a str> {
        self.matches(name)?.get(var).copied()
    }
}

fn variable(segment: &'static str) -> Option<&'static str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

pub fn project_path(project: &str) -> String {
    PROJECT.render(&[("project", project)])
}

pub fn instance_config_path(project: &str, instance_config: &str) -> String {
    INSTANCE_CONFIG.render(&[("project", project), ("instance_config", instance_config)])
}

pub fn instance_path(project: &str, instance: &str) -> String {
    INSTANCE.render(&[("project", project), ("instance", instance)])
}

pub fn database_path(project: &str, instance: &str, database: &str) -> String {
    DATABASE.render(&[
        ("project", project),
        ("instance", instance),
        ("database", database),
    ])
}

pub fn session_path(project: &str, instance: &str, database: &str, session: &str) -> String {
    SESSION.render(&[
        ("project", project),
        ("instance", instance),
        ("database", database),
        ("session", session),
    ])
}

/// Accept either a bare instance config id or its full path.
pub fn instance_config_path_or_id(project: &str, value: &str) -> String {
    if value.contains('/') {
        value.to_string()
    } else {
        instance_config_path(project, value)
    }
}

pub fn match_project_from_project_name(name: &str) -> Option<&str> {
    PROJECT.extract(name, "project")
}

pub fn match_project_from_instance_config_name(name: &str) -> Option<&str> {
    INSTANCE_CONFIG.extract(name, "project")
}

pub fn match_instance_config_from_instance_config_name(name: &str) -> Option<&str> {
    INSTANCE_CONFIG.extract(name, "instance_config")
}

pub fn match_project_from_instance_name(name: &str) -> Option<&str> {
    INSTANCE.extract(name, "project")
}

pub fn match_instance_from_instance_name(name: &str) -> Option<&str> {
    INSTANCE.extract(name, "instance")
}

pub fn match_project_from_database_name(name: &str) -> Option<&str> {
    DATABASE.extract(name, "project")
}

pub fn match_instance_from_database_name(name: &str) -> Option<&str> {
    DATABASE.extract(name, "instance")
}

pub fn match_database_from_database_name(name: &str) -> Option<&str> {
    DATABASE.extract(name, "database")
}

pub fn match_session_from_session_name(name: &str) -> Option<&str> {
    SESSION.extract(name, "session")
}
