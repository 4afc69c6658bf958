//! Command-line front end: ingest a spreadsheet, store it, and print the
//! shaped chart series with its insights.
//!
//! ```text
//! sheetlytics <file> [x-column] [y-column] [--kind bar|line|pie|scatter|bar3d]
//!             [--limit N] [--export png|pdf --out DIR]
//! ```

use anyhow::{Context, Result, bail};
use sheetlytics::AnalyticsApp;
use sheetlytics::config::AnalyticsConfig;
use sheetlytics::data::{UploadedFile, format_row_count};
use sheetlytics::export::{DirectorySink, ExportFormat};
use sheetlytics::logging;
use sheetlytics::types::{CellValue, ChartKind};
use std::path::PathBuf;

struct Args {
    file: PathBuf,
    x_column: Option<String>,
    y_column: Option<String>,
    kind: ChartKind,
    limit: Option<String>,
    export: Option<(ExportFormat, PathBuf)>,
}

fn parse_args() -> Result<Args> {
    let mut positional = Vec::new();
    let mut kind = ChartKind::default();
    let mut limit = None;
    let mut export_format = None;
    let mut out_dir = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--kind" => {
                let value = args.next().context("--kind needs a value")?;
                kind = value.parse().map_err(anyhow::Error::msg)?;
            }
            "--limit" => limit = Some(args.next().context("--limit needs a value")?),
            "--export" => {
                export_format = Some(match args.next().as_deref() {
                    Some("png") => ExportFormat::Png,
                    Some("pdf") => ExportFormat::Pdf,
                    other => bail!("Unknown export format: {:?}", other),
                });
            }
            "--out" => out_dir = Some(PathBuf::from(args.next().context("--out needs a value")?)),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let file = positional
        .next()
        .map(PathBuf::from)
        .context("usage: sheetlytics <file> [x-column] [y-column] [--kind bar]")?;

    let export = match export_format {
        Some(format) => Some((format, out_dir.unwrap_or_else(|| PathBuf::from(".")))),
        None => None,
    };

    Ok(Args {
        file,
        x_column: positional.next(),
        y_column: positional.next(),
        kind,
        limit,
        export,
    })
}

fn main() -> Result<()> {
    logging::init();
    let args = parse_args()?;

    let config = AnalyticsConfig::load_default();
    let mut app = AnalyticsApp::open(config).context("Failed to open store")?;

    let upload = UploadedFile::from_path(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    app.upload(&upload)?;
    let columns = app.start_analysis()?;

    let rows = app.dataset().map(|d| d.row_count()).unwrap_or(0);
    println!("{}: {}", upload.name, format_row_count(rows));
    println!("Columns: {}", columns.join(", "));

    if let Some(limit) = &args.limit {
        app.apply_limit_input(limit)?;
    }

    let x = args.x_column.or_else(|| columns.first().cloned());
    let y = args.y_column.or_else(|| columns.get(1).cloned());
    let (Some(x), Some(y)) = (x, y) else {
        bail!("Need at least two columns to chart");
    };

    app.select_chart_kind(args.kind);
    let chart = app.generate_chart(&x, &y)?;

    println!();
    println!("{} ({})", chart.series.title(), chart.series.kind.label());
    for (label, value) in chart.series.x_labels.iter().zip(&chart.series.y_values) {
        let label = match label {
            CellValue::Empty => "-".to_string(),
            other => other.to_string(),
        };
        println!("  {:<20} {}", label, value);
    }
    println!();
    for statement in chart.insights.iter() {
        println!("{}", statement);
    }

    if let Some((format, dir)) = args.export {
        let mut sink = DirectorySink::new(&dir);
        let file = app.export_chart(format, &mut sink)?;
        println!();
        println!("Exported {}", sink.path_for(&file).display());
    }

    if let Some(toast) = app.toasts().latest() {
        println!("{} {}", toast.variant.icon(), toast.message);
    }

    Ok(())
}
