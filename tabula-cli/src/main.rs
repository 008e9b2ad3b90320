//! Tabula CLI
//!
//! Converts an HTML document into a spreadsheet grid and prints the result.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use tabula_dom::{parse_html, print_tree};
use tabula_grid::{Worksheet, column_label};
use tabula_reader::{HtmlReader, LoadedWorkbook, ReaderOptions, RuleMode};

/// Tabula: HTML to spreadsheet grid converter
#[derive(Parser, Debug)]
#[command(name = "tabula")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Convert a file and print the grid
    tabula report.html

    # Convert inline HTML
    tabula --html '<table><tr><td>a</td><td>b</td></tr></table>'

    # Dump the workbook as JSON
    tabula --json report.html

    # Write into the third sheet, rules as dashes
    tabula --sheet 2 --placeholder-rules report.html
"#)]
struct Cli {
    /// Path to the HTML file
    #[arg(value_name = "FILE", required_unless_present = "html")]
    path: Option<PathBuf>,

    /// Convert an HTML string instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Index of the sheet receiving the content
    #[arg(long, default_value = "0")]
    sheet: usize,

    /// Render <hr> as a row of dashes instead of a bottom border
    #[arg(long)]
    placeholder_rules: bool,

    /// Print the workbook as JSON
    #[arg(long)]
    json: bool,

    /// Print the parsed DOM tree before converting
    #[arg(long)]
    dom: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let options = ReaderOptions {
        sheet_index: cli.sheet,
        rule_mode: if cli.placeholder_rules {
            RuleMode::Placeholder
        } else {
            RuleMode::Border
        },
    };
    let reader = HtmlReader::new().with_options(options);

    if cli.dom {
        let html = match (&cli.html, &cli.path) {
            (Some(html), _) => html.clone(),
            (None, Some(path)) => fs::read_to_string(path)
                .with_context(|| format!("failed to read '{}'", path.display()))?,
            (None, None) => anyhow::bail!("--dom requires a file or --html"),
        };
        println!("{}", "=== DOM Tree ===".bold());
        let dom = parse_html(&html);
        print_tree(&dom, dom.root(), 0);
        println!();
    }

    let loaded = load(&reader, &cli)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&loaded.workbook)?);
    } else {
        print_sheet(loaded.workbook.active_sheet());
    }
    Ok(())
}

fn load(reader: &HtmlReader, cli: &Cli) -> Result<LoadedWorkbook> {
    if let Some(html) = &cli.html {
        Ok(reader.load_str(html)?)
    } else if let Some(path) = &cli.path {
        reader
            .load(path)
            .with_context(|| format!("failed to convert '{}'", path.display()))
    } else {
        anyhow::bail!("no input: pass a file or --html")
    }
}

/// Print a sheet as an aligned text grid followed by merges and images.
fn print_sheet(sheet: &Worksheet) {
    println!("{} {}", "Sheet:".bold(), sheet.title());

    let Some(range) = sheet.used_range() else {
        println!("{}", "(empty)".dimmed());
        return;
    };

    let last_column = range.end().column;
    let rows: Vec<(u32, Vec<String>)> = (1..=range.end().row)
        .map(|row| {
            let mut values: Vec<String> = sheet
                .row_values(row)
                .into_iter()
                .map(|value| value.replace('\n', "\\n"))
                .collect();
            values.resize(last_column as usize, String::new());
            (row, values)
        })
        .collect();

    let mut widths: Vec<usize> = (1..=last_column)
        .map(|column| column_label(column).len())
        .collect();
    for (_, values) in &rows {
        for (width, value) in widths.iter_mut().zip(values) {
            *width = (*width).max(value.chars().count());
        }
    }
    let gutter = range.end().row.to_string().len();

    let header: Vec<String> = widths
        .iter()
        .zip(1..=last_column)
        .map(|(width, column)| format!("{:<width$}", column_label(column)))
        .collect();
    println!("{:gutter$} | {}", "", header.join(" | ").cyan());

    for (row, values) in rows {
        let cells: Vec<String> = widths
            .iter()
            .zip(&values)
            .map(|(width, value)| format!("{value:<width$}"))
            .collect();
        println!("{:>gutter$} | {}", row.cyan(), cells.join(" | "));
    }

    if !sheet.merges().is_empty() {
        let merges: Vec<String> = sheet.merges().iter().map(ToString::to_string).collect();
        println!("{} {}", "Merged:".bold(), merges.join(", "));
    }
    for image in sheet.images() {
        println!(
            "{} {} at {} ({})",
            "Image:".bold(),
            image.path.display(),
            image.coordinate,
            if image.name.is_empty() { "no alt text" } else { image.name.as_str() }
        );
    }
}
