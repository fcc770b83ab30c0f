use log::{debug, info};

use snafu::{prelude::*, Snafu};

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::json;
use serde_json::Value as JSValue;

use abc_rules::*;

pub mod io_json;
pub mod io_preflib;

pub use io_json::{profile_to_json, read_json_profile, write_profile_json, write_results_json};
pub use io_preflib::read_preflib_file;

#[derive(Debug, Snafu)]
pub enum IoError {
    #[snafu(display("Error opening file {path}"))]
    OpeningFile { source: std::io::Error, path: String },
    #[snafu(display("Error writing file {path}"))]
    WritingFile { source: std::io::Error, path: String },
    #[snafu(display("Error parsing the JSON document {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing to JSON"))]
    WritingJson { source: serde_json::Error },
    #[snafu(display("Cannot read a weight from {weight:?}"))]
    InvalidWeightFormat { weight: String },
    #[snafu(display("Line {lineno}: {message}"))]
    PreflibFormat { lineno: usize, message: String },
    #[snafu(display("Unknown profile format for file {path}"))]
    UnknownFormat { path: String },
    #[snafu(display("Invalid profile: {source}"))]
    InvalidProfile { source: AbcError },
    #[snafu(display("Computation failed: {source}"))]
    Computation { source: AbcError },
}

pub type IoResult<T> = Result<T, IoError>;

/// How ranking files are turned into approval ballots.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct ReadOptions {
    /// The number of top-ranked candidates that a voter approves. Candidates
    /// tied with the last one are approved as well.
    pub setsize: usize,
    /// When set, the multiplicity of a ranking becomes the weight of a single
    /// ballot instead of repeating the ballot.
    pub use_weights: bool,
}

impl ReadOptions {
    pub const DEFAULT: ReadOptions = ReadOptions {
        setsize: 1,
        use_weights: false,
    };
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions::DEFAULT
    }
}

const PREFLIB_EXTENSIONS: [&str; 4] = ["soi", "toi", "soc", "toc"];

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Reads a profile with the default options.
pub fn read_profile(path: &str) -> IoResult<Profile> {
    read_profile_with(path, &ReadOptions::DEFAULT)
}

/// Reads a profile, choosing the format from the file extension: `.json` for
/// JSON documents, `.soi`, `.toi`, `.soc` and `.toc` for PrefLib files.
pub fn read_profile_with(path: &str, options: &ReadOptions) -> IoResult<Profile> {
    let p = Path::new(path);
    match extension(p).as_deref() {
        Some("json") => read_json_profile(path),
        Some(e) if PREFLIB_EXTENSIONS.contains(&e) => {
            read_preflib_file(path, options.setsize, options.use_weights)
        }
        _ => UnknownFormatSnafu { path }.fail(),
    }
}

/// Reads all the PrefLib files of a directory, keyed by file name.
pub fn read_preflib_dir(dir: &str, options: &ReadOptions) -> IoResult<BTreeMap<String, Profile>> {
    let entries = fs::read_dir(dir).context(OpeningFileSnafu { path: dir })?;
    let mut res: BTreeMap<String, Profile> = BTreeMap::new();
    for entry in entries {
        let entry = entry.context(OpeningFileSnafu { path: dir })?;
        let p = entry.path();
        let is_preflib = extension(&p)
            .map(|e| PREFLIB_EXTENSIONS.contains(&e.as_str()))
            .unwrap_or(false);
        if !is_preflib {
            debug!("read_preflib_dir: skipping {:?}", p);
            continue;
        }
        let name = p
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let path_str = p.display().to_string();
        let profile = read_preflib_file(&path_str, options.setsize, options.use_weights)?;
        res.insert(name, profile);
    }
    info!("read_preflib_dir: read {} profiles from {}", res.len(), dir);
    Ok(res)
}

/// Runs a rule and describes the outcome as JSON: the rule, the committee size,
/// the resolute mode and the winning committees, both as indices and as names.
pub fn compute_to_json(
    rule_id: &str,
    profile: &Profile,
    committeesize: usize,
    options: &ComputeOptions,
) -> IoResult<JSValue> {
    let rule: RuleId = rule_id.parse().context(ComputationSnafu {})?;
    let committees =
        compute_rule(rule, profile, committeesize, options).context(ComputationSnafu {})?;
    let resolute = options
        .resolute
        .unwrap_or_else(|| rule.descriptor().default_resolute());
    let named: Vec<Vec<&str>> = committees
        .iter()
        .map(|c| c.iter().map(|x| profile.names()[*x].as_str()).collect())
        .collect();
    Ok(json!({
        "rule": rule.id(),
        "longname": rule.descriptor().longname,
        "committeesize": committeesize,
        "resolute": resolute,
        "committees": committees,
        "named_committees": named,
    }))
}
