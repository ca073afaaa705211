//! Delimiter sniffing.

use csv::ReaderBuilder;

/// Delimiters tried by [`detect_delimiter`], in order of preference.
pub const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b'\t', b'|', b';'];

/// Number of leading records inspected per candidate.
const SNIFF_RECORDS: usize = 10;

#[derive(Debug, Clone, Copy)]
struct Candidate {
    delimiter: u8,
    delta: usize,
    average: f64,
}

/// Pick the delimiter that splits the leading records most consistently.
///
/// For every candidate the first few records are parsed (quote-aware). A
/// candidate must average at least two fields per record; among those, the
/// one with the smallest variation in field count wins, then the one with
/// more fields. Falls back to a comma.
pub fn detect_delimiter(text: &str) -> u8 {
    let mut best: Option<Candidate> = None;

    for &delimiter in &CANDIDATE_DELIMITERS {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(text.as_bytes());

        let mut counts = Vec::with_capacity(SNIFF_RECORDS);
        for record in reader.records().take(SNIFF_RECORDS) {
            let Ok(record) = record else {
                break;
            };
            counts.push(record.len());
        }
        if counts.is_empty() {
            continue;
        }

        let average = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
        if average < 2.0 {
            continue;
        }
        let delta = counts
            .windows(2)
            .map(|pair| pair[0].abs_diff(pair[1]))
            .sum::<usize>();

        let candidate = Candidate {
            delimiter,
            delta,
            average,
        };
        best = match best {
            Some(current)
                if current.delta < delta
                    || (current.delta == delta && current.average >= average) =>
            {
                Some(current)
            }
            _ => Some(candidate),
        };
    }

    let delimiter = best.map_or(b',', |candidate| candidate.delimiter);
    tracing::debug!(delimiter = %char::from(delimiter).escape_default(), "detected delimiter");
    delimiter
}
