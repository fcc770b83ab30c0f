// Primitives for reading PrefLib ranking files (.soi, .toi, .soc, .toc).
//
// Two layouts are understood. The classic one:
//   3
//   1,Alice
//   2,Bob
//   3,Carol
//   10,10,2
//   6,1,{2,3}
//   4,3,2
// and the current one, with '#' headers and "count: ranking" lines:
//   # NUMBER ALTERNATIVES: 3
//   # ALTERNATIVE NAME 1: Alice
//   6: 1,{2,3}
// Candidates are numbered from 1 in the files and from 0 in the profiles.

use crate::fileio::*;

#[derive(Eq, PartialEq, Debug, Clone)]
struct Ranking {
    count: u64,
    // Groups of tied candidates, best first.
    groups: Vec<Vec<usize>>,
}

fn format_err<T>(lineno: usize, message: String) -> IoResult<T> {
    PreflibFormatSnafu { lineno, message }.fail()
}

fn parse_int(s: &str, lineno: usize) -> IoResult<usize> {
    match s.trim().parse::<usize>() {
        Ok(x) => Ok(x),
        Err(_) => format_err(lineno, format!("expected an integer, found {:?}", s.trim())),
    }
}

fn parse_candidate(s: &str, num_cand: usize, lineno: usize) -> IoResult<usize> {
    let c = parse_int(s, lineno)?;
    if c == 0 || c > num_cand {
        return format_err(
            lineno,
            format!("candidate {} is not between 1 and {}", c, num_cand),
        );
    }
    Ok(c - 1)
}

/// Splits `1,{2,3},4` into the groups [0], [1, 2], [3].
fn parse_groups(s: &str, num_cand: usize, lineno: usize) -> IoResult<Vec<Vec<usize>>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut current: Option<Vec<usize>> = None;
    let mut token = String::new();
    for ch in s.chars().chain(std::iter::once(',')) {
        match ch {
            '{' => {
                if current.is_some() || !token.trim().is_empty() {
                    return format_err(lineno, "unexpected '{'".to_string());
                }
                current = Some(Vec::new());
            }
            '}' => {
                let Some(mut group) = current.take() else {
                    return format_err(lineno, "unexpected '}'".to_string());
                };
                if !token.trim().is_empty() {
                    group.push(parse_candidate(&token, num_cand, lineno)?);
                }
                token.clear();
                if !group.is_empty() {
                    groups.push(group);
                }
            }
            ',' => {
                if !token.trim().is_empty() {
                    let c = parse_candidate(&token, num_cand, lineno)?;
                    match current.as_mut() {
                        Some(group) => group.push(c),
                        None => groups.push(vec![c]),
                    }
                }
                token.clear();
            }
            x => token.push(x),
        }
    }
    if current.is_some() {
        return format_err(lineno, "missing '}'".to_string());
    }
    Ok(groups)
}

/// The approval set of a ranking: the best groups, until at least `setsize`
/// candidates are approved.
fn approval_set(groups: &[Vec<usize>], setsize: usize) -> Vec<usize> {
    let mut approved: Vec<usize> = Vec::new();
    for group in groups {
        if approved.len() >= setsize {
            break;
        }
        approved.extend(group.iter().cloned());
    }
    approved
}

fn parse_header(line: &str, num_cand: &mut Option<usize>, names: &mut BTreeMap<usize, String>) {
    let content = line.trim_start_matches('#').trim();
    let Some((key, value)) = content.split_once(':') else {
        return;
    };
    let key = key.trim();
    if key == "NUMBER ALTERNATIVES" {
        *num_cand = value.trim().parse::<usize>().ok();
    } else if let Some(idx) = key.strip_prefix("ALTERNATIVE NAME ") {
        if let Ok(idx) = idx.trim().parse::<usize>() {
            names.insert(idx, value.trim().to_string());
        }
    }
}

/// Parses the text of a PrefLib file into approval ballots.
pub fn parse_preflib(contents: &str, setsize: usize, use_weights: bool) -> IoResult<Profile> {
    let mut num_cand: Option<usize> = None;
    let mut names: BTreeMap<usize, String> = BTreeMap::new();
    let mut rankings: Vec<Ranking> = Vec::new();
    // In the classic layout, the candidate lines and the summary line that
    // follow the number of candidates.
    let mut pending_names = 0;
    let mut pending_summary = false;

    for (idx, line) in contents.lines().enumerate() {
        let lineno = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') {
            parse_header(line, &mut num_cand, &mut names);
            continue;
        }
        let Some(n) = num_cand else {
            let n = parse_int(line, lineno)?;
            num_cand = Some(n);
            pending_names = n;
            pending_summary = true;
            continue;
        };
        if pending_names > 0 {
            let Some((i, name)) = line.split_once(',') else {
                return format_err(lineno, format!("expected a candidate name, found {:?}", line));
            };
            names.insert(parse_int(i, lineno)?, name.trim().to_string());
            pending_names -= 1;
            continue;
        }
        if pending_summary {
            pending_summary = false;
            continue;
        }
        let (count, rest) = match line.split_once(':') {
            Some(x) => x,
            None => match line.split_once(',') {
                Some(x) => x,
                None => (line, ""),
            },
        };
        let count = parse_int(count, lineno)? as u64;
        let groups = parse_groups(rest, n, lineno)?;
        debug!("parse_preflib: line {} count {} groups {:?}", lineno, count, groups);
        rankings.push(Ranking { count, groups });
    }

    let Some(num_cand) = num_cand else {
        return format_err(0, "the number of candidates is missing".to_string());
    };
    let mut builder = ProfileBuilder::new(num_cand).context(InvalidProfileSnafu {})?;
    if !names.is_empty() {
        let all_names: Vec<String> = (1..=num_cand)
            .map(|i| names.get(&i).cloned().unwrap_or_else(|| (i - 1).to_string()))
            .collect();
        builder = builder.names(&all_names).context(InvalidProfileSnafu {})?;
    }
    for r in rankings.iter() {
        if r.count == 0 {
            continue;
        }
        let approved = approval_set(&r.groups, setsize);
        if use_weights {
            builder
                .add_vote(&approved, r.count)
                .context(InvalidProfileSnafu {})?;
        } else {
            builder
                .add_votes_repeated(&approved, r.count as usize)
                .context(InvalidProfileSnafu {})?;
        }
    }
    let profile = builder.build();
    info!(
        "parse_preflib: {} ballots over {} candidates",
        profile.len(),
        profile.num_cand()
    );
    Ok(profile)
}

pub fn read_preflib_file(path: &str, setsize: usize, use_weights: bool) -> IoResult<Profile> {
    info!("read_preflib_file: reading {} (setsize {})", path, setsize);
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    parse_preflib(&contents, setsize, use_weights)
}
