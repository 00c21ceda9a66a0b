//! `burpx extract` – mirror an export onto disk.

use anyhow::{bail, Context, Result};
use burpx_core::config::{self, BurpxConfig};
use burpx_core::export;
use burpx_core::extract::{ExtractOptions, Extractor};
use burpx_core::mime_ext::ExtensionResolver;
use std::path::{Path, PathBuf};

use crate::cli::{ExtractArgs, DEFAULT_INPUT};

pub fn run_extract(args: &ExtractArgs) -> Result<()> {
    if args.input == Path::new(DEFAULT_INPUT) && !args.input.exists() {
        bail!(
            "no {} in the current directory; pass -i <export.xml> or save the Burp export as {:?} (see `burpx extract --help`)",
            DEFAULT_INPUT,
            DEFAULT_INPUT
        );
    }

    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);

    let export = export::load_export(&args.input)?;
    tracing::info!(
        burp_version = export.burp_version.as_deref().unwrap_or(""),
        export_time = export.export_time.as_deref().unwrap_or(""),
        out = %args.out.display(),
        "extracting export to directory"
    );

    let mut extensions = ExtensionResolver::system();
    for path in cfg.mime_types.iter().chain(args.mime_types.iter()) {
        extensions = extensions.with_mime_types_file(path)?;
    }

    let extractor = Extractor::new(effective_options(&cfg, args), extensions);
    let report = extractor.extract(&export.records, &args.out);

    if let Some(path) = manifest_path(&cfg, args) {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create manifest dir: {}", parent.display()))?;
        }
        report.write_manifest(&path)?;
        println!("Manifest written to {}", path.display());
    }

    println!("{}", report.summary());
    Ok(())
}

/// Config defaults with command-line switches turned on over them.
pub(crate) fn effective_options(cfg: &BurpxConfig, args: &ExtractArgs) -> ExtractOptions {
    let base = cfg.extract_options();
    ExtractOptions {
        write_duplicates: base.write_duplicates || args.dup,
        skip_non_success: base.skip_non_success || args.skip_non_success,
        skip_non_get: base.skip_non_get || args.skip_non_get,
    }
}

fn manifest_path(cfg: &BurpxConfig, args: &ExtractArgs) -> Option<PathBuf> {
    args.manifest
        .clone()
        .or_else(|| cfg.manifest_name.as_ref().map(|name| args.out.join(name)))
}
