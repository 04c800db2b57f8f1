//! Command implementations for the `blit` tool.
//!
//! Handlers write their report to the given writer so that callers (and
//! tests) choose where output goes. Logs go to stderr.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

use blit_raster::{rop2_at, Rop2, Scan};
use blit_search::{
    search_data_files, write_search_data, MatchMode, SearchIndex, SearchOptions, Searcher,
};
use blit_types::{MatchModeSetting, Settings};

/// Load configuration and apply the global CLI overrides.
pub fn load_settings(config_path: Option<&str>, log_level_override: Option<&str>) -> Result<Settings> {
    let mut settings = Settings::load(config_path).context("Failed to load configuration")?;
    if let Some(log_level) = log_level_override {
        settings.log_level = log_level.to_string();
    }
    Ok(settings)
}

/// Install the stderr subscriber. `RUST_LOG` wins over the configured level.
pub fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

/// Index location: the `--index` flag, else the configured path.
fn index_path(settings: &Settings, index_override: Option<&str>) -> PathBuf {
    match index_override {
        Some(path) => PathBuf::from(path),
        None => settings.expanded_index_path(),
    }
}

fn open_index(path: &Path) -> Result<SearchIndex> {
    let index = SearchIndex::open(path)
        .with_context(|| format!("Failed to load search data from {}", path.display()))?;
    debug!(path = %path.display(), entries = index.len(), "Index ready");
    Ok(index)
}

fn match_mode(setting: MatchModeSetting) -> MatchMode {
    match setting {
        MatchModeSetting::Prefix => MatchMode::Prefix,
        MatchModeSetting::Substring => MatchMode::Substring,
    }
}

/// `blit search`
pub fn handle_search(
    settings: &Settings,
    query: &str,
    index_override: Option<&str>,
    substring: bool,
    limit: Option<usize>,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let limit = limit.unwrap_or(settings.search.limit);
    if limit == 0 {
        bail!("--limit must be greater than 0");
    }
    let index = open_index(&index_path(settings, index_override))?;

    let mode = if substring {
        MatchMode::Substring
    } else {
        match_mode(settings.search.match_mode)
    };
    let options = SearchOptions::new()
        .with_mode(mode)
        .with_limit(limit);
    let hits = Searcher::new(&index).search(query, &options);

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&hits)?)?;
        return Ok(());
    }
    if hits.is_empty() {
        writeln!(out, "No matches for '{}'", query.trim())?;
        return Ok(());
    }
    for hit in &hits {
        if hit.grouped {
            writeln!(out, "{}", hit.display)?;
            for target in hit.targets {
                let scope = target
                    .parsed_scope()
                    .map(|s| match s.file {
                        Some(file) => format!("{} ({file})", s.symbol),
                        None => s.symbol,
                    })
                    .unwrap_or_default();
                writeln!(out, "  {scope}  {}", target.url)?;
            }
        } else if let Some(target) = hit.targets.first() {
            writeln!(out, "{}  {}", hit.display, target.url)?;
        }
    }
    Ok(())
}

/// `blit validate`. Fails when the report holds any error.
pub fn handle_validate(
    settings: &Settings,
    index_override: Option<&str>,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let index = open_index(&index_path(settings, index_override))?;
    let report = index.validate();
    let errors = report.errors().count();
    let warnings = report.warnings().count();

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        for issue in &report.issues {
            writeln!(out, "{issue}")?;
        }
        writeln!(
            out,
            "{} entries, {} targets: {errors} errors, {warnings} warnings",
            report.entries,
            index.target_count()
        )?;
    }
    info!(entries = report.entries, errors, warnings, "Validation complete");

    if !report.is_valid() {
        bail!("search data failed validation with {errors} errors");
    }
    Ok(())
}

/// `blit fmt`. Without flags the loaded index is written back as search data.
pub fn handle_fmt(
    settings: &Settings,
    index_override: Option<&str>,
    check: bool,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let path = index_path(settings, index_override);

    if check {
        let files = if path.is_dir() {
            search_data_files(&path)
                .with_context(|| format!("Failed to list search data in {}", path.display()))?
        } else {
            vec![path]
        };
        let mut changed = 0;
        for file in &files {
            let text = fs::read_to_string(file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let index = SearchIndex::parse(&text)
                .with_context(|| format!("Failed to parse {}", file.display()))?;
            if write_search_data(index.entries()) == text {
                writeln!(out, "ok {}", file.display())?;
            } else {
                changed += 1;
                writeln!(out, "would reformat {}", file.display())?;
            }
        }
        if changed > 0 {
            bail!("{changed} of {} files do not round-trip", files.len());
        }
        return Ok(());
    }

    let index = open_index(&path)?;
    if json {
        writeln!(out, "{}", index.to_json()?)?;
    } else {
        out.write_all(index.to_search_data().as_bytes())?;
    }
    Ok(())
}

/// `blit show`
pub fn handle_show(
    settings: &Settings,
    key: &str,
    index_override: Option<&str>,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let index = open_index(&index_path(settings, index_override))?;
    let hit = Searcher::new(&index).get(key)?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&hit)?)?;
        return Ok(());
    }
    writeln!(out, "key:   {}", hit.key)?;
    writeln!(out, "label: {}", hit.display)?;
    for target in hit.targets {
        let kind = if target.local { "local" } else { "external" };
        writeln!(out, "  {} [{kind}]", target.url)?;
        if let Some(scope) = target.parsed_scope() {
            match scope.file {
                Some(file) => writeln!(out, "    {} in {file}", scope.symbol)?,
                None => writeln!(out, "    {}", scope.symbol)?,
            }
        }
    }
    Ok(())
}

/// `blit rop`
pub fn handle_rop(
    name: Option<&str>,
    source: Option<u8>,
    destination: Option<u8>,
    table: bool,
    out: &mut impl Write,
) -> Result<()> {
    if table {
        writeln!(out, "idx  table  name  aliases")?;
        for rop in Rop2::ALL {
            let aliases: Vec<_> = rop.aliases().collect();
            writeln!(
                out,
                "{:>3}  {:04b}   {:<5} {}",
                rop.index(),
                rop.truth_table(),
                rop.polish(),
                aliases.join(", ")
            )?;
        }
    }

    let Some(name) = name else {
        return Ok(());
    };
    let rop: Rop2 = name
        .parse()
        .with_context(|| format!("Failed to parse raster operation '{name}'"))?;
    writeln!(
        out,
        "{rop} (index {}, truth table {:04b})",
        rop.index(),
        rop.truth_table()
    )?;
    let aliases: Vec<_> = rop.aliases().collect();
    if !aliases.is_empty() {
        writeln!(out, "aliases: {}", aliases.join(", "))?;
    }
    writeln!(
        out,
        "uses source: {}, uses destination: {}",
        rop.uses_source(),
        rop.uses_destination()
    )?;

    if source.is_some() || destination.is_some() {
        let s = source.unwrap_or(0x00);
        let d = destination.unwrap_or(0x00);
        let r = rop.apply(s, d);
        writeln!(out, "S=0x{s:02x} D=0x{d:02x} -> 0x{r:02x} ({r:08b})")?;
    }
    Ok(())
}

/// `blit pattern`
pub fn handle_pattern(width: usize, height: usize, out: &mut impl Write) -> Result<()> {
    let w = i32::try_from(width).context("Width out of range")?;
    let h = i32::try_from(height).context("Height out of range")?;

    let checker = Scan::from_bytes(vec![0x40, 0x80], 2, 2, 1)?;
    let mut image = Scan::new(width, height);
    let mut blits = 0;
    for y in (0..h).step_by(2) {
        for x in (0..w).step_by(2) {
            if rop2_at(&mut image, (x, y), (2, 2), &checker, (0, 0), Rop2::COPY) {
                blits += 1;
            }
        }
    }
    debug!(width, height, blits, "Pattern tiled");

    out.write_all(image.to_ascii('#', '.').as_bytes())?;
    Ok(())
}
