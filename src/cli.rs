//! Command-line layer for the `kmeans` binary: positional-argument validation,
//! point loading from a text stream, and centroid formatting. All algorithmic
//! work lives in the library; this module only shuttles data in and out, with
//! a fixed set of diagnostic strings and `%.4f`-formatted output.

use crate::DEFAULT_MAX_ITER;
use std::fmt;
use std::io::{BufRead, Write};

/// Failures surfaced by the command-line layer. `Display` yields fixed
/// diagnostic strings; the binary prints them verbatim and exits non-zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CliError {
    InvalidPointCount,
    InvalidClusterCount,
    InvalidDimension,
    InvalidMaxIter,
    /// Catch-all for everything without a dedicated diagnostic: wrong argument
    /// count, malformed point data, I/O failures, engine aborts.
    Generic,
}
impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            CliError::InvalidPointCount => "Invalid number of points!",
            CliError::InvalidClusterCount => "Invalid number of clusters!",
            CliError::InvalidDimension => "Invalid dimension of point!",
            CliError::InvalidMaxIter => "Invalid maximum iteration!",
            CliError::Generic => "An Error Has Occurred",
        };
        f.write_str(msg)
    }
}
impl std::error::Error for CliError {}

/// Validated per-run parameters, parsed from the positional arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub cluster_cnt: usize,
    pub sample_cnt: usize,
    pub sample_dims: usize,
    pub max_iter: usize,
}
impl RunConfig {
    /// Parse and validate the positional arguments `K N d [max_iter]` (without argv[0]).
    ///
    /// Bounds: 1 < K < N, N > 1, d >= 1, 1 < max_iter < 1000 (default
    /// [`DEFAULT_MAX_ITER`] when omitted). The point count is validated before the
    /// cluster count, because the K < N bound needs N; this also fixes which
    /// diagnostic wins when both arguments are malformed.
    pub fn from_args(args: &[String]) -> Result<Self, CliError> {
        if args.len() < 3 || args.len() > 4 {
            return Err(CliError::Generic);
        }

        let sample_cnt = parse_integer(&args[1])
            .filter(|&n| n > 1)
            .ok_or(CliError::InvalidPointCount)?;
        let cluster_cnt = parse_integer(&args[0])
            .filter(|&k| k > 1 && k < sample_cnt)
            .ok_or(CliError::InvalidClusterCount)?;
        let sample_dims = parse_integer(&args[2])
            .filter(|&d| d >= 1)
            .ok_or(CliError::InvalidDimension)?;
        let max_iter = match args.get(3) {
            Some(arg) => parse_integer(arg)
                .filter(|&iter| iter > 1 && iter < 1000)
                .ok_or(CliError::InvalidMaxIter)?,
            None => DEFAULT_MAX_ITER as i64,
        };

        Ok(Self {
            cluster_cnt: cluster_cnt as usize,
            sample_cnt: sample_cnt as usize,
            sample_dims: sample_dims as usize,
            max_iter: max_iter as usize,
        })
    }
}

/// Integer parsing for positional arguments: the whole argument must be
/// consumed, so trailing garbage ("5x") and fractional values ("2.5") are rejected.
fn parse_integer(arg: &str) -> Option<i64> {
    arg.parse::<i64>().ok()
}

/// Read `sample_cnt * sample_dims` comma/whitespace-separated floating-point
/// values from a text stream, contiguous per point. Surplus trailing tokens are
/// ignored; missing or malformed tokens are a [`CliError::Generic`].
pub fn read_points<R: BufRead>(mut reader: R, sample_cnt: usize, sample_dims: usize) -> Result<Vec<f64>, CliError> {
    let expected = sample_cnt * sample_dims;
    let mut text = String::new();
    reader.read_to_string(&mut text).map_err(|_| CliError::Generic)?;

    let mut samples = Vec::with_capacity(expected);
    for token in text.split(|c: char| c == ',' || c.is_whitespace()).filter(|t| !t.is_empty()) {
        if samples.len() == expected {
            break;
        }
        samples.push(token.parse::<f64>().map_err(|_| CliError::Generic)?);
    }
    if samples.len() != expected {
        return Err(CliError::Generic);
    }
    Ok(samples)
}

/// Write the final centroids in cluster-index order: one line per centroid, every
/// coordinate formatted to exactly four decimal digits and followed by a single
/// space (the trailing space before the newline is part of the format).
pub fn write_centroids<W: Write>(mut writer: W, centroids: &[f64], sample_dims: usize) -> Result<(), CliError> {
    for centroid in centroids.chunks_exact(sample_dims) {
        for coord in centroid {
            write!(writer, "{:.4} ", coord).map_err(|_| CliError::Generic)?;
        }
        writeln!(writer).map_err(|_| CliError::Generic)?;
    }
    Ok(())
}
