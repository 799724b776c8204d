//! End-to-end tooltip tests
//!
//! These drive the full path a completion takes: descriptors loaded into the
//! store, candidates generated with their payloads, the payload carried
//! through JSON, and the tooltip resolved on demand.

use std::sync::Arc;

use taghelper_lsp_core::{
    attribute_completions, element_completions, CandidateDescription, DescriptionResolver,
    DescriptorStore, Error, ProjectChange,
};

const DESCRIPTORS: &str = r#"{
    "project": "WebApp",
    "descriptors": [
        {
            "typeName": "Microsoft.AspNetCore.Mvc.TagHelpers.AnchorTagHelper",
            "documentation": "<member name=\"T:Microsoft.AspNetCore.Mvc.TagHelpers.AnchorTagHelper\">\n    <summary>\n    <see cref=\"T:Microsoft.AspNetCore.Razor.TagHelpers.ITagHelper\"/> implementation targeting &lt;a&gt; elements.\n    </summary>\n</member>",
            "tagNames": ["a"],
            "boundAttributes": [
                {
                    "name": "asp-action",
                    "propertyName": "Action",
                    "typeName": "System.String",
                    "displayName": "System.String Microsoft.AspNetCore.Mvc.TagHelpers.AnchorTagHelper.Action",
                    "documentation": "<summary>\n    The name of the action method.\n    </summary>"
                },
                {
                    "name": "asp-all-route-data",
                    "propertyName": "RouteValues",
                    "typeName": "System.Collections.Generic.IDictionary<System.String, System.String>",
                    "displayName": "System.Collections.Generic.IDictionary<System.String, System.String> Microsoft.AspNetCore.Mvc.TagHelpers.AnchorTagHelper.RouteValues",
                    "documentation": "<summary>Additional parameters, see <see cref=\"P:Microsoft.AspNetCore.Mvc.TagHelpers.AnchorTagHelper.Action\"/>.</summary>"
                }
            ]
        },
        {
            "typeName": "Custom.Tags.TrackingTagHelper",
            "tagNames": ["a"]
        }
    ]
}"#;

fn loaded_store() -> Arc<DescriptorStore> {
    let change: ProjectChange = serde_json::from_str(DESCRIPTORS).unwrap();
    let store = DescriptorStore::new();
    store.apply(change);
    Arc::new(store)
}

#[test]
fn test_element_tooltip_for_shared_tag() {
    let store = loaded_store();
    let resolver = DescriptionResolver::builder()
        .lookup(store.clone())
        .build()
        .unwrap();

    let completions = element_completions(&store);
    assert_eq!(completions.len(), 1);

    let data = completions[0].description.to_data();
    let tooltip = resolver.resolve_data(data.as_ref()).unwrap();

    assert_eq!(
        tooltip,
        "**TrackingTagHelper**\n\n---\n\n**AnchorTagHelper**\n\n`ITagHelper` implementation targeting &lt;a&gt; elements."
    );
}

#[test]
fn test_attribute_tooltips() {
    let store = loaded_store();
    let resolver = DescriptionResolver::new(store.clone());

    let completions = attribute_completions(&store, "a");
    let labels: Vec<&str> = completions.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["asp-action", "asp-all-route-data"]);

    assert_eq!(
        resolver.resolve(&completions[0].description).unwrap(),
        "**string** AnchorTagHelper.**Action**\n\nThe name of the action method."
    );
    assert_eq!(
        resolver.resolve(&completions[1].description).unwrap(),
        "**IDictionary<System.String, System.String>** AnchorTagHelper.**RouteValues**\n\nAdditional parameters, see `AnchorTagHelper.Action`."
    );
}

#[test]
fn test_project_change_refreshes_documentation() {
    let store = loaded_store();
    let resolver = DescriptionResolver::new(store.clone());
    let description = element_completions(&store)[0].description.clone();
    let before = resolver.resolve(&description).unwrap();

    let mut change: ProjectChange = serde_json::from_str(DESCRIPTORS).unwrap();
    change.descriptors[0].documentation = Some("<summary>Updated.</summary>".to_string());
    store.apply(change);

    let after = resolver.resolve(&description).unwrap();
    assert_ne!(before, after);
    assert!(after.ends_with("**AnchorTagHelper**\n\nUpdated."));
}

#[test]
fn test_untyped_candidate_has_no_tooltip() {
    let resolver = DescriptionResolver::new(loaded_store());
    assert_eq!(resolver.resolve(&CandidateDescription::Untyped), None);
    assert_eq!(resolver.resolve_data(Some(&serde_json::json!("plain"))), None);
}

#[test]
fn test_load_missing_file_reports_path() {
    let store = DescriptorStore::new();
    let result = store.load_file(std::path::Path::new("/nonexistent/descriptors.json"));
    match result {
        Err(Error::Io { path, .. }) => assert!(path.ends_with("descriptors.json")),
        other => panic!("Expected Io error, got {:?}", other),
    }
}
