//! Tests for the extract subcommand.

use super::parse_extract;
use crate::cli::commands::effective_options;
use burpx_core::config::BurpxConfig;
use std::path::Path;

#[test]
fn cli_parse_extract_defaults() {
    let args = parse_extract(&["burpx", "extract"]);
    assert_eq!(args.input, Path::new("sitemap.xml"));
    assert_eq!(args.out, Path::new("."));
    assert!(!args.dup);
    assert!(!args.skip_non_success);
    assert!(!args.skip_non_get);
    assert!(args.manifest.is_none());
    assert!(args.mime_types.is_none());
}

#[test]
fn cli_parse_extract_short_flags() {
    let args = parse_extract(&["burpx", "extract", "-i", "burp.xml", "-o", "/tmp/site", "--dup"]);
    assert_eq!(args.input, Path::new("burp.xml"));
    assert_eq!(args.out, Path::new("/tmp/site"));
    assert!(args.dup);
}

#[test]
fn cli_parse_extract_filters_and_files() {
    let args = parse_extract(&[
        "burpx",
        "extract",
        "--input",
        "x.xml",
        "--skip-non-success",
        "--skip-non-get",
        "--manifest",
        "m.json",
        "--mime-types",
        "/etc/extra.types",
    ]);
    assert!(args.skip_non_success);
    assert!(args.skip_non_get);
    assert_eq!(args.manifest.as_deref(), Some(Path::new("m.json")));
    assert_eq!(args.mime_types.as_deref(), Some(Path::new("/etc/extra.types")));
}

#[test]
fn flags_turn_options_on_over_config() {
    let cfg = BurpxConfig {
        skip_non_get: true,
        ..BurpxConfig::default()
    };
    let args = parse_extract(&["burpx", "extract", "--dup"]);
    let opts = effective_options(&cfg, &args);
    assert!(opts.write_duplicates);
    assert!(!opts.skip_non_success);
    assert!(opts.skip_non_get);
}
