use std::fs::File;
use std::io::{stdin, BufRead, BufReader, Cursor, Write};
use std::path::Path;

use anyhow::{anyhow, Result};
use paste::paste;
use ed_community::AbundanceVector;
use ed_community::SPIDX;

// ============================================================
//  Initial-condition label files
// ============================================================

/// Parse an initial-condition file: whitespace/newline separated species
/// labels, one per individual. Lines starting with '#' are comments.
pub fn read_labels<R: BufRead>(reader: R) -> Result<Vec<SPIDX>> {
    let mut labels = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        for token in line.split_whitespace() {
            let label: SPIDX = token.parse().map_err(|_| {
                anyhow!("Invalid species label '{}' on line {}", token, lineno + 1)
            })?;
            labels.push(label);
        }
    }
    if labels.is_empty() {
        return Err(anyhow!("Initial condition contains no labels"));
    }
    Ok(labels)
}

/// Expand an abundance vector into per-individual labels (species i
/// repeated n_i times) and write them to a file, one label per line.
/// The result is a valid initial-condition file for the drift binaries.
pub fn write_labels<P: AsRef<Path>>(path: P, sample: &AbundanceVector) -> Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "# J={} S={}", sample.total(), sample.richness())?;
    for (sp, n) in sample.iter_present() {
        for _ in 0..n {
            writeln!(file, "{}", sp)?;
        }
    }
    Ok(())
}

// ============================================================
//  Macro generating file/string/stdin/input helpers
// ============================================================

/// Generate input adapters for a base parser function `fn base<R: BufRead>(R) -> Result<T>`.
///
/// This expands into:
/// - `base_string(&str)`
/// - `base_file<P: AsRef<Path>>(P)`
/// - `base_stdin()`
/// - `base_input(&str)`  (dispatches "-" → stdin, otherwise → file)
macro_rules! define_input_variants {
    ($base:ident, $ret:ty) => {
        paste! {
            /// Read from a string buffer.
            pub fn [<$base _string>](s: &str) -> $ret {
                $base(Cursor::new(s))
            }

            /// Read from a file path.
            pub fn [<$base _file>]<P: AsRef<Path>>(path: P) -> $ret {
                let reader = BufReader::new(File::open(path)?);
                $base(reader)
            }

            /// Read from stdin.
            pub fn [<$base _stdin>]() -> $ret {
                let reader = BufReader::new(stdin());
                $base(reader)
            }

            /// Read either from stdin ("-") or a file path.
            pub fn [<$base _input>](s: &str) -> $ret {
                if s == "-" {
                    [<$base _stdin>]()
                } else {
                    [<$base _file>](s)
                }
            }
        }
    };
}

type LabelResult = Result<Vec<SPIDX>>;

define_input_variants!(read_labels, LabelResult);

// ============================================================
//  Unit tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_labels_basic() {
        let input = "0 1 2\n2 2\n";
        let labels = read_labels_string(input).unwrap();
        assert_eq!(labels, vec![0, 1, 2, 2, 2]);
    }

    #[test]
    fn test_read_labels_skips_comments() {
        let input = "# header\n3\n\n4\n";
        let labels = read_labels_string(input).unwrap();
        assert_eq!(labels, vec![3, 4]);
    }

    #[test]
    fn test_read_labels_rejects_garbage() {
        assert!(read_labels_string("1 two 3").is_err());
        assert!(read_labels_string("# only comments\n").is_err());
    }

    #[test]
    fn test_write_then_read_labels() {
        let av = AbundanceVector::from(vec![2, 0, 1]);
        let dir = std::env::temp_dir().join("ecodrift_input_parsers_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("labels.txt");

        write_labels(&path, &av).unwrap();
        let labels = read_labels_file(&path).unwrap();
        assert_eq!(labels, vec![0, 0, 2]);
        std::fs::remove_file(&path).unwrap();
    }
}
