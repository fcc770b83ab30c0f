// Reading and writing profiles as JSON documents.
//
// A profile document is either an object
//   {"num_cand": 4, "names": ["a", "b", "c", "d"], "ballots": [[0, 1], {"approved": [2], "weight": "3/2"}]}
// or a bare list of ballots, in which case the number of candidates is one more
// than the largest approved candidate. Weights are integers or strings "n/d".

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

use crate::fileio::*;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum JsonWeight {
    Integer(u64),
    Fraction(String),
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum JsonBallot {
    Approved(Vec<usize>),
    Weighted {
        approved: Vec<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        weight: Option<JsonWeight>,
    },
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
struct JsonProfile {
    num_cand: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    names: Option<Vec<String>>,
    ballots: Vec<JsonBallot>,
}

#[derive(Eq, PartialEq, Debug, Clone, Deserialize)]
#[serde(untagged)]
enum JsonDocument {
    Profile(JsonProfile),
    Ballots(Vec<JsonBallot>),
}

impl JsonBallot {
    fn approved(&self) -> &[usize] {
        match self {
            JsonBallot::Approved(a) => a,
            JsonBallot::Weighted { approved, .. } => approved,
        }
    }
}

fn parse_weight(w: &JsonWeight) -> IoResult<BigRational> {
    match w {
        JsonWeight::Integer(n) => Ok(BigRational::from_integer((*n).into())),
        JsonWeight::Fraction(s) => s
            .trim()
            .parse::<BigRational>()
            .ok()
            .context(InvalidWeightFormatSnafu { weight: s.clone() }),
    }
}

fn build_profile(doc: JsonProfile) -> IoResult<Profile> {
    let mut builder = ProfileBuilder::new(doc.num_cand).context(InvalidProfileSnafu {})?;
    if let Some(names) = doc.names.as_ref() {
        builder = builder.names(names).context(InvalidProfileSnafu {})?;
    }
    for ballot in doc.ballots.iter() {
        match ballot {
            JsonBallot::Weighted {
                approved,
                weight: Some(w),
            } => {
                let w = parse_weight(w)?;
                builder
                    .add_vote_weighted(approved, w)
                    .context(InvalidProfileSnafu {})?;
            }
            _ => builder
                .add_vote_simple(ballot.approved())
                .context(InvalidProfileSnafu {})?,
        }
    }
    Ok(builder.build())
}

/// Parses a profile from the text of a JSON document.
pub fn parse_json_profile(contents: &str, path: &str) -> IoResult<Profile> {
    let doc: JsonDocument = serde_json::from_str(contents).context(ParsingJsonSnafu { path })?;
    let doc = match doc {
        JsonDocument::Profile(p) => p,
        JsonDocument::Ballots(ballots) => {
            let num_cand = ballots
                .iter()
                .flat_map(|b| b.approved().iter())
                .max()
                .map(|c| c + 1)
                .unwrap_or(0);
            debug!("parse_json_profile: bare ballots, {} candidates", num_cand);
            JsonProfile {
                num_cand,
                names: None,
                ballots,
            }
        }
    };
    build_profile(doc)
}

pub fn read_json_profile(path: &str) -> IoResult<Profile> {
    info!("read_json_profile: reading {}", path);
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    parse_json_profile(&contents, path)
}

/// The JSON document of a profile. Unit-weight ballots are written as bare
/// lists, the others with their weight as a string.
pub fn profile_to_json(profile: &Profile) -> IoResult<JSValue> {
    let ballots: Vec<JsonBallot> = profile
        .iter()
        .map(|b| {
            if b.weight() == &integer(1) {
                JsonBallot::Approved(b.approved().to_vec())
            } else {
                JsonBallot::Weighted {
                    approved: b.approved().to_vec(),
                    weight: Some(JsonWeight::Fraction(b.weight().to_string())),
                }
            }
        })
        .collect();
    let doc = JsonProfile {
        num_cand: profile.num_cand(),
        names: Some(profile.names().to_vec()),
        ballots,
    };
    serde_json::to_value(doc).context(WritingJsonSnafu {})
}

fn write_json(path: &str, js: &JSValue) -> IoResult<()> {
    let pretty = serde_json::to_string_pretty(js).context(WritingJsonSnafu {})?;
    fs::write(path, pretty).context(WritingFileSnafu { path })
}

pub fn write_profile_json(profile: &Profile, path: &str) -> IoResult<()> {
    let js = profile_to_json(profile)?;
    write_json(path, &js)
}

/// Writes a list of results, as built by `compute_to_json`, into a JSON file.
pub fn write_results_json(path: &str, results: &[JSValue]) -> IoResult<()> {
    write_json(path, &json!({ "results": results }))
}
