use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use ui_prompt_mcp::components::ComponentCatalog;

/// Print Element Plus component suggestions for a UI description
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Text file to scan; stdin when omitted
    input: Option<PathBuf>,

    /// Component dictionary TOML (defaults to UIP_COMPONENTS_FILE or the built-in one)
    #[arg(long)]
    dictionary: Option<PathBuf>,

    /// Only print the matched keywords, one per line
    #[arg(long)]
    hits: bool,

    /// Print the dictionary (keyword, widget, tier) and exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let dictionary = args
        .dictionary
        .or_else(|| std::env::var("UIP_COMPONENTS_FILE").ok().map(PathBuf::from));
    let catalog = match dictionary {
        Some(path) => ComponentCatalog::from_path(&path)
            .with_context(|| format!("loading dictionary {}", path.display()))?,
        None => ComponentCatalog::builtin()?,
    };

    if args.list {
        let mut entries: Vec<_> = catalog.dictionary().iter().collect();
        entries.sort_by(|a, b| a.1.name.cmp(&b.1.name).then(a.0.cmp(b.0)));
        for (keyword, descriptor) in entries {
            println!("{}\t{}\t{}", keyword, descriptor.name, descriptor.importance);
        }
        return Ok(());
    }

    let text = match args.input {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    if args.hits {
        for hit in catalog.scan(&text) {
            println!("{}\t{}", hit.keyword, hit.descriptor.name);
        }
        return Ok(());
    }

    println!("{}", catalog.suggest(&text).to_pretty_json()?);
    Ok(())
}
