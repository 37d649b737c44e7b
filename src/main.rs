use clap::Parser;
use serde_json::{Map, Value};

use question_formatters::{Question, Registry, Row};

/// Compile a question's annotated headers and render result rows with them.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Question definition (JSON object with a `headers` list)
    question: String,
    /// Result rows (JSON array of objects keyed by original header names)
    rows: String,
    /// Theme identifier appended to generated item links (optional)
    #[arg(long)]
    theme: Option<String>,
}

fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut question: Question = match serde_json::from_str(&args.question) {
        Ok(q) => q,
        Err(e) => {
            eprintln!("Invalid question JSON: {e}");
            std::process::exit(1);
        }
    };
    let rows: Vec<Map<String, Value>> = match serde_json::from_str(&args.rows) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Invalid rows JSON: {e}");
            std::process::exit(1);
        }
    };

    let registry = Registry::with_builtins();
    if let Err(e) = question.process(&registry, args.theme.as_deref()) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    // One output object per row, keyed by the bare header names.
    let rendered: Vec<Map<String, Value>> = rows
        .iter()
        .map(|cells| {
            let row = Row::new(cells);
            question
                .headers
                .iter()
                .cloned()
                .zip(question.render_row(&row))
                .collect()
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&rendered).unwrap());
}
