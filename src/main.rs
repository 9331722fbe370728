#![forbid(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};
use std::process::exit;

use tracing::debug;
use tracing_subscriber::EnvFilter;

type Index = BTreeMap<String, BTreeSet<i64>>;

/// Parse lines of the form `key n1 n2 ...` into an index, merging repeated keys.
/// Blank lines are skipped. On failure returns the 1-based line number and a reason.
fn parse_index(content: &str) -> Result<Index, (usize, String)> {
    let mut index = Index::new();
    for (number, line) in content.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        let Some(key) = tokens.next() else {
            continue;
        };
        let values = index.entry(key.to_string()).or_default();
        for token in tokens {
            let value = token
                .parse::<i64>()
                .map_err(|err| (number + 1, format!("{token:?} is not an integer: {err}")))?;
            values.insert(value);
        }
    }
    Ok(index)
}

/// Group the numbers of each key in a text file and print them as a nested JSON object.
/// Arguments: input file, optional output file (stdout when omitted).
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let input = match args.next() {
        Some(path) => path,
        None => {
            eprintln!(
                "Usage: tree-json <INPUT> [OUTPUT]\n\
                 Reads lines of `key n1 n2 ...` and writes the numbers grouped by key as JSON."
            );
            exit(1);
        }
    };
    let output = args.next();

    let content = match std::fs::read_to_string(&input) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("Failed to read {input}: {err}");
            exit(2);
        }
    };

    let index = match parse_index(&content) {
        Ok(index) => index,
        Err((line, reason)) => {
            eprintln!("{input}:{line}: {reason}");
            exit(3);
        }
    };
    debug!(keys = index.len(), "parsed input");

    let result = match &output {
        Some(path) => tree_json::nested_object_to_path_with_options(
            &index,
            path,
            tree_json::ser_options! { trailing_newline: true },
        ),
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            tree_json::to_io_writer_with_options(
                &mut lock,
                &index,
                tree_json::ser_options! { trailing_newline: true },
            )
            .and_then(|()| lock.flush().map_err(tree_json::Error::from))
        }
    };

    if let Err(err) = result {
        eprintln!("Failed to write output: {err}");
        exit(4);
    }
}

#[cfg(test)]
mod tests {
    use super::parse_index;

    #[test]
    fn merges_repeated_keys() {
        let index = parse_index("b 3 1\n\na 2\nb 2 3\n").unwrap();
        let keys: Vec<&str> = index.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(index["b"].iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn key_without_numbers_is_empty() {
        let index = parse_index("lonely\n").unwrap();
        assert!(index["lonely"].is_empty());
    }

    #[test]
    fn reports_bad_line() {
        let (line, reason) = parse_index("a 1\nb x\n").unwrap_err();
        assert_eq!(line, 2);
        assert!(reason.contains("\"x\""), "{reason}");
    }
}
