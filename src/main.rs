//! Preview binary - resolves a content snapshot for one language and prints
//! the localized views as JSON.
//!
//! Usage:
//!   cargo run --bin preview -- content.json              # English
//!   cargo run --bin preview -- --lang mk content.json    # Macedonian
//!   cargo run --bin preview -- --lang de --coverage      # with coverage report
//!
//! Environment variables (optional `.env`):
//! - CONTENT_FILE (required unless a path argument is given)
//! - DISPLAY_LANGUAGE (defaults to en)
//! - COVERAGE_LANGUAGES (defaults to all registry languages)

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::{json, Value};
use site_content_i18n::config::Config;
use site_content_i18n::content::{latest_first, ContentEntity};
use site_content_i18n::i18n::{CoverageReport, LanguageCode, ResolutionMetrics, TranslationCoverage};
use site_content_i18n::{
    group_by_category, localize_sections, resolve_collection_with_metrics, ContentSnapshot,
    Localized,
};
use tracing::info;

/// Command line overrides for the environment config.
#[derive(Debug, Default)]
struct Args {
    language: Option<String>,
    coverage: bool,
    content_file: Option<String>,
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    let mut args = args;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--lang" | "-l" => {
                parsed.language = Some(args.next().context("--lang requires a language code")?);
            }
            "--coverage" => parsed.coverage = true,
            flag if flag.starts_with('-') => bail!("Unknown option: {}", flag),
            path => parsed.content_file = Some(path.to_string()),
        }
    }

    Ok(parsed)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CoverageEntry {
    kind: &'static str,
    id: i64,
    report: CoverageReport,
}

fn coverage_of<T: ContentEntity>(
    rows: &[T],
    languages: &[LanguageCode],
    entries: &mut Vec<CoverageEntry>,
) {
    for row in rows {
        let report = TranslationCoverage::check(row, languages, T::FIELDS);
        if !report.is_clean() {
            entries.push(CoverageEntry {
                kind: T::KIND,
                id: row.id(),
                report,
            });
        }
    }
}

fn localize<T: ContentEntity + Clone>(
    rows: &[T],
    language: &str,
    metrics: &ResolutionMetrics,
) -> Vec<Localized<T>> {
    resolve_collection_with_metrics(Some(rows), language, T::FIELDS, metrics)
}

fn render(snapshot: &ContentSnapshot, config: &Config, coverage: bool) -> Result<Value> {
    let language = config.display_language.as_str();
    let metrics = ResolutionMetrics::new();

    let brochure_groups =
        group_by_category(&snapshot.brochures, &snapshot.brochure_categories, language);

    let articles = latest_first(&snapshot.news);
    let news: Vec<Value> = resolve_collection_with_metrics(
        Some(articles.as_slice()),
        language,
        site_content_i18n::content::NewsArticle::FIELDS,
        &metrics,
    )
    .into_iter()
    .map(|article| -> Result<Value> {
        let sections = localize_sections(&article.sections, language);
        let mut value = serde_json::to_value(&article)?;
        value["localizedSections"] = serde_json::to_value(sections)?;
        Ok(value)
    })
    .collect::<Result<_>>()?;

    let active_positions: Vec<_> = snapshot.positions.iter().filter(|p| p.active).collect();

    let company_info = snapshot.company_info.as_ref().map(|info| {
        let fields: Vec<&str> = info
            .fields()
            .iter()
            .filter(|(key, value)| value.is_string() && key.as_str() != "defaultLanguage")
            .map(|(key, _)| key.as_str())
            .collect();
        resolve_collection_with_metrics(Some(std::slice::from_ref(info)), language, &fields, &metrics)
    });

    let mut output = json!({
        "language": language,
        "languageName": config.display_language.display_name(),
        "brochureGroups": brochure_groups,
        "news": news,
        "galleryCategories": localize(&snapshot.gallery_categories, language, &metrics),
        "positions": resolve_collection_with_metrics(
            Some(active_positions.as_slice()),
            language,
            site_content_i18n::content::Position::FIELDS,
            &metrics,
        ),
        "products": localize(&snapshot.products, language, &metrics),
        "certificates": localize(&snapshot.certificates, language, &metrics),
        "companyInfo": company_info.and_then(|mut rows| rows.pop()),
    });

    let report = metrics.report();
    info!("{}", report.format());
    output["metrics"] = serde_json::to_value(report)?;

    if coverage {
        let languages = &config.coverage_languages;
        let mut entries = Vec::new();
        coverage_of(&snapshot.brochures, languages, &mut entries);
        coverage_of(&snapshot.brochure_categories, languages, &mut entries);
        coverage_of(&snapshot.news, languages, &mut entries);
        coverage_of(&snapshot.gallery_categories, languages, &mut entries);
        coverage_of(&snapshot.positions, languages, &mut entries);
        coverage_of(&snapshot.products, languages, &mut entries);
        coverage_of(&snapshot.certificates, languages, &mut entries);

        info!("{} records with incomplete translations", entries.len());
        output["coverage"] = serde_json::to_value(entries)?;
    }

    Ok(output)
}

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging (stderr, so stdout stays valid JSON)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("site_content_i18n=info".parse()?),
        )
        .init();

    let args = parse_args(std::env::args().skip(1))?;

    let mut config = match &args.content_file {
        Some(path) => {
            let mut config = Config::new(path);
            if let Ok(language) = std::env::var("DISPLAY_LANGUAGE") {
                config.display_language = LanguageCode::new(&language);
            }
            config
        }
        None => Config::from_env()?,
    };
    if let Some(language) = &args.language {
        config.display_language = LanguageCode::new(language);
    }

    info!(
        "Previewing {} in {}",
        config.content_file.display(),
        config.display_language.display_name()
    );

    let snapshot = ContentSnapshot::load(&config.content_file)?;
    let output = render(&snapshot, &config, args.coverage)?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
