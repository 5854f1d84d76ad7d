use std::{
    env,
    io::{self, BufRead, Write},
    process::ExitCode,
};

use tag_recommender::{Recommender, RecommenderConfig};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: tag-recommender <catalog.csv> [config.toml]";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let Some(catalog_path) = args.next() else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    let config = match args.next() {
        Some(path) => match RecommenderConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                tracing::error!("{err}");
                return ExitCode::from(2);
            }
        },
        None => RecommenderConfig::default(),
    };

    let recommender = match Recommender::from_path(&catalog_path, &config) {
        Ok(recommender) => recommender,
        Err(err) => {
            tracing::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match prompt_loop(&recommender, io::stdin().lock(), io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

// one query per line until EOF
fn prompt_loop(recommender: &Recommender, input: impl BufRead, mut out: impl Write) -> io::Result<()> {
    write!(out, "Enter Movie Name: ")?;
    out.flush()?;
    for line in input.lines() {
        let query = line?;
        if query.trim().is_empty() {
            writeln!(out, "Please enter a movie name.")?;
        } else {
            match recommender.recommend_scored(&query, recommender.default_top_n()) {
                Ok(hits) if hits.is_empty() => {
                    writeln!(out, "No recommendations found.\nTry another movie.")?;
                }
                Ok(hits) => {
                    tracing::debug!(query = %query, "ranked neighbors:\n{hits}");
                    writeln!(out, "Recommended:")?;
                    for entry in hits.iter() {
                        writeln!(out, "{}", entry.key)?;
                    }
                }
                Err(err) => writeln!(out, "error: {err}")?,
            }
        }
        write!(out, "\nEnter Movie Name: ")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}
