//! Property-based tests for template name derivation.

use std::sync::Arc;

use proptest::prelude::*;
use viewrend_gather::{
    derive_template_name, GlobGatherer, GlobGathererConfig, MemoryFileAccess, TemplateGatherer,
};

// ============================================================================
// Strategies
// ============================================================================

fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,7}"
}

fn relative_name() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..4).prop_map(|parts| parts.join("/"))
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// `{dir}/{name}{ext}` always derives back to `name`.
    #[test]
    fn derive_recovers_relative_name(
        name in relative_name(),
        ext in prop::sample::select(vec![".hbs", ".html", ".handlebars"]),
    ) {
        let path = format!("templates/views/{name}{ext}");
        prop_assert_eq!(derive_template_name(&path, "templates/views"), name);
    }

    /// Prefixing the directory back on gives `{dir}/{name}`.
    #[test]
    fn tld_key_is_dir_plus_name(name in relative_name()) {
        let fs = MemoryFileAccess::new().with_file(format!("site/{name}.hbs"), "x");
        let config = GlobGathererConfig::new("site")
            .extension(".hbs")
            .include_tld_in_key(true);
        let gatherer = GlobGatherer::with_file_access(config, Arc::new(fs));

        let templates = gatherer.gather().unwrap();

        prop_assert_eq!(templates.len(), 1);
        prop_assert_eq!(&templates[0].name, &format!("site/{name}"));
    }

    /// N top-level and M nested files produce N + M records, top-level first.
    #[test]
    fn flat_then_nested_count(
        flat in prop::collection::btree_set(segment(), 0..6),
        nested in prop::collection::btree_set(segment(), 0..6),
    ) {
        let mut fs = MemoryFileAccess::new();
        for name in &flat {
            fs = fs.with_file(format!("t/{name}.hbs"), name.as_str());
        }
        for name in &nested {
            fs = fs.with_file(format!("t/sub/{name}.hbs"), name.as_str());
        }
        let gatherer = GlobGatherer::with_file_access(
            GlobGathererConfig::new("t").extension(".hbs"),
            Arc::new(fs),
        );

        let templates = gatherer.gather().unwrap();

        prop_assert_eq!(templates.len(), flat.len() + nested.len());
        let leading: std::collections::BTreeSet<String> = templates[..flat.len()]
            .iter()
            .map(|t| t.name.clone())
            .collect();
        prop_assert_eq!(&leading, &flat);
        for template in &templates[flat.len()..] {
            prop_assert!(template.name.starts_with("sub/"));
        }
    }
}
