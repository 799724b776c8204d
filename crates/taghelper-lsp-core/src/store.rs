//! Tag helper descriptors and the lookup cache consulted during resolution

use std::collections::HashSet;
use std::path::Path;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Compiler metadata for one tag helper type
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagHelperDescriptor {
    /// Fully qualified type name, the cache key
    pub type_name: String,
    /// Raw XML doc-comment block
    #[serde(default)]
    pub documentation: Option<String>,
    /// Element names this tag helper applies to
    #[serde(default)]
    pub tag_names: Vec<String>,
    #[serde(default)]
    pub bound_attributes: Vec<BoundAttributeDescriptor>,
}

/// An attribute bound to a tag helper property
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundAttributeDescriptor {
    /// Attribute name as written in markup
    pub name: String,
    pub property_name: String,
    /// Fully qualified property type
    pub type_name: String,
    /// `"<return type> <owner type>.<property>"`
    pub display_name: String,
    #[serde(default)]
    pub documentation: Option<String>,
}

/// A project's full descriptor set, sent whenever the project changes
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectChange {
    pub project: String,
    pub descriptors: Vec<TagHelperDescriptor>,
}

/// Sent when a project is unloaded and stops providing descriptors
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRemoved {
    pub project: String,
}

/// On-disk descriptor file: a project envelope or a bare descriptor array
#[derive(Deserialize)]
#[serde(untagged)]
enum DescriptorFile {
    Project(ProjectChange),
    Bare(Vec<TagHelperDescriptor>),
}

/// Read access to descriptors by fully qualified type name.
///
/// This is the only capability tooltip resolution depends on.
pub trait DescriptorLookup: Send + Sync {
    fn lookup(&self, type_name: &str) -> Option<TagHelperDescriptor>;
}

/// Each project's copy of one type, the most recently updated last
#[derive(Default)]
struct Contributions(Vec<(String, TagHelperDescriptor)>);

impl Contributions {
    fn current(&self) -> Option<&TagHelperDescriptor> {
        self.0.last().map(|(_, descriptor)| descriptor)
    }

    fn set(&mut self, project: &str, descriptor: TagHelperDescriptor) {
        self.0.retain(|(owner, _)| owner != project);
        self.0.push((project.to_string(), descriptor));
    }

    fn remove(&mut self, project: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|(owner, _)| owner != project);
        self.0.len() != before
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Thread-safe descriptor cache keyed by type name.
///
/// A type may be provided by several projects at once; it stays visible
/// until the last of them stops providing it.
#[derive(Default)]
pub struct DescriptorStore {
    descriptors: DashMap<String, Contributions>,
}

impl DescriptorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every descriptor contributed by `project` with `descriptors`.
    ///
    /// New descriptors are written before stale ones are dropped, so a type
    /// present in both sets never disappears from concurrent lookups.
    /// Returns the number of descriptors now held for the project.
    pub fn upsert_project(&self, project: &str, descriptors: Vec<TagHelperDescriptor>) -> usize {
        let mut current = HashSet::with_capacity(descriptors.len());
        for descriptor in descriptors {
            current.insert(descriptor.type_name.clone());
            self.descriptors
                .entry(descriptor.type_name.clone())
                .or_default()
                .set(project, descriptor);
        }

        self.descriptors.retain(|type_name, contributions| {
            if !current.contains(type_name) {
                contributions.remove(project);
            }
            !contributions.is_empty()
        });

        let count = current.len();
        tracing::debug!(project, count, "descriptors updated");
        count
    }

    pub fn apply(&self, change: ProjectChange) -> usize {
        self.upsert_project(&change.project, change.descriptors)
    }

    /// Forget everything `project` contributed.
    ///
    /// Returns how many descriptors the project was providing.
    pub fn remove_project(&self, project: &str) -> usize {
        let mut removed = 0;
        self.descriptors.retain(|_, contributions| {
            if contributions.remove(project) {
                removed += 1;
            }
            !contributions.is_empty()
        });

        tracing::debug!(project, removed, "project removed");
        removed
    }

    /// Load a JSON descriptor file.
    ///
    /// Bare arrays are registered under the file path as their project name.
    pub fn load_file(&self, path: &Path) -> Result<usize> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let change = match serde_json::from_str(&content)? {
            DescriptorFile::Project(change) => change,
            DescriptorFile::Bare(descriptors) => ProjectChange {
                project: path.display().to_string(),
                descriptors,
            },
        };

        Ok(self.apply(change))
    }

    /// Descriptors that apply to the element `tag_name` (ASCII case-insensitive),
    /// ordered by type name.
    pub fn descriptors_for_tag(&self, tag_name: &str) -> Vec<TagHelperDescriptor> {
        let mut matches: Vec<TagHelperDescriptor> = self
            .descriptors
            .iter()
            .filter_map(|entry| entry.current().cloned())
            .filter(|descriptor| {
                descriptor
                    .tag_names
                    .iter()
                    .any(|t| t.eq_ignore_ascii_case(tag_name))
            })
            .collect();
        matches.sort_by(|a, b| a.type_name.cmp(&b.type_name));
        matches
    }

    /// Every element name some descriptor applies to, sorted and deduplicated
    pub fn tag_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .descriptors
            .iter()
            .filter_map(|entry| entry.current().map(|d| d.tag_names.clone()))
            .flatten()
            .collect();
        names.sort();
        names.dedup();
        names
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl DescriptorLookup for DescriptorStore {
    fn lookup(&self, type_name: &str) -> Option<TagHelperDescriptor> {
        self.descriptors
            .get(type_name)
            .and_then(|entry| entry.current().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn descriptor(type_name: &str, tags: &[&str]) -> TagHelperDescriptor {
        TagHelperDescriptor {
            type_name: type_name.to_string(),
            documentation: None,
            tag_names: tags.iter().map(|t| t.to_string()).collect(),
            bound_attributes: Vec::new(),
        }
    }

    #[test]
    fn test_lookup_by_type_name() {
        let store = DescriptorStore::new();
        store.upsert_project("web", vec![descriptor("Ns.AnchorTagHelper", &["a"])]);

        assert!(store.lookup("Ns.AnchorTagHelper").is_some());
        assert!(store.lookup("AnchorTagHelper").is_none());
    }

    #[test]
    fn test_upsert_replaces_stale_descriptors() {
        let store = DescriptorStore::new();
        store.upsert_project(
            "web",
            vec![descriptor("Ns.Old", &["old"]), descriptor("Ns.Kept", &["kept"])],
        );
        store.upsert_project("web", vec![descriptor("Ns.Kept", &["kept"])]);

        assert!(store.lookup("Ns.Old").is_none());
        assert!(store.lookup("Ns.Kept").is_some());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_upsert_leaves_other_projects_alone() {
        let store = DescriptorStore::new();
        store.upsert_project("web", vec![descriptor("Ns.Web", &["web"])]);
        store.upsert_project("lib", vec![descriptor("Ns.Lib", &["lib"])]);
        store.upsert_project("web", Vec::new());

        assert!(store.lookup("Ns.Web").is_none());
        assert!(store.lookup("Ns.Lib").is_some());
    }

    #[test]
    fn test_remove_project() {
        let store = DescriptorStore::new();
        store.upsert_project("web", vec![descriptor("Ns.Web", &["web"])]);
        assert_eq!(store.remove_project("web"), 1);
        assert!(store.is_empty());
        assert_eq!(store.remove_project("web"), 0);
    }

    #[test]
    fn test_shared_type_survives_one_project_dropping_it() {
        let store = DescriptorStore::new();
        let shared = descriptor("Ns.Shared", &["shared"]);
        store.upsert_project("misc", vec![shared.clone()]);
        store.upsert_project("real", vec![shared]);

        store.upsert_project("real", Vec::new());
        assert!(store.lookup("Ns.Shared").is_some());

        store.remove_project("misc");
        assert!(store.lookup("Ns.Shared").is_none());
    }

    #[test]
    fn test_latest_contribution_wins() {
        let store = DescriptorStore::new();
        let mut misc = descriptor("Ns.Shared", &["shared"]);
        misc.documentation = Some("misc".to_string());
        let mut real = descriptor("Ns.Shared", &["shared"]);
        real.documentation = Some("real".to_string());

        store.upsert_project("misc", vec![misc]);
        store.upsert_project("real", vec![real]);
        assert_eq!(
            store.lookup("Ns.Shared").unwrap().documentation.as_deref(),
            Some("real")
        );

        store.remove_project("real");
        assert_eq!(
            store.lookup("Ns.Shared").unwrap().documentation.as_deref(),
            Some("misc")
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_lookup_never_misses_during_refresh() {
        let store = DescriptorStore::new();
        let batch: Vec<TagHelperDescriptor> = (0..200)
            .map(|i| descriptor(&format!("Ns.T{}", i), &["t"]))
            .collect();
        store.upsert_project("web", batch.clone());

        let done = AtomicBool::new(false);
        let misses = std::thread::scope(|scope| {
            scope.spawn(|| {
                for _ in 0..200 {
                    store.upsert_project("web", batch.clone());
                }
                done.store(true, Ordering::Release);
            });

            let mut misses = 0;
            while !done.load(Ordering::Acquire) {
                if store.lookup("Ns.T150").is_none() {
                    misses += 1;
                }
            }
            misses
        });

        assert_eq!(misses, 0);
        assert_eq!(store.len(), 200);
    }

    #[test]
    fn test_descriptors_for_tag_is_case_insensitive_and_sorted() {
        let store = DescriptorStore::new();
        store.upsert_project(
            "web",
            vec![
                descriptor("Ns.Zeta", &["input"]),
                descriptor("Ns.Alpha", &["INPUT", "select"]),
                descriptor("Ns.Other", &["form"]),
            ],
        );

        let names: Vec<String> = store
            .descriptors_for_tag("Input")
            .into_iter()
            .map(|d| d.type_name)
            .collect();
        assert_eq!(names, vec!["Ns.Alpha", "Ns.Zeta"]);
    }

    #[test]
    fn test_tag_names_deduplicated() {
        let store = DescriptorStore::new();
        store.upsert_project(
            "web",
            vec![descriptor("Ns.A", &["input", "a"]), descriptor("Ns.B", &["input"])],
        );
        assert_eq!(store.tag_names(), vec!["a", "input"]);
    }

    #[test]
    fn test_descriptor_json_shape() {
        let json = r#"{
            "typeName": "Ns.InputTagHelper",
            "documentation": "<summary>Input.</summary>",
            "tagNames": ["input"],
            "boundAttributes": [{
                "name": "asp-for",
                "propertyName": "For",
                "typeName": "Ns.ModelExpression",
                "displayName": "Ns.ModelExpression Ns.InputTagHelper.For"
            }]
        }"#;
        let parsed: TagHelperDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.bound_attributes[0].property_name, "For");
        assert!(parsed.bound_attributes[0].documentation.is_none());
    }
}
