use super::{Summarizer, SummaryError, SummaryRequest, SummaryResponse};

/// Offline summarizer that picks the headline lines out of a transcript:
/// wickets, boundaries, maidens, innings changes and the result.
#[derive(Debug, Clone)]
pub struct KeyMomentsSummarizer {
    /// Most recent moments kept in the summary
    pub max_moments: usize,
}

impl Default for KeyMomentsSummarizer {
    fn default() -> Self {
        Self { max_moments: 12 }
    }
}

const MARKERS: [&str; 7] = [
    "WICKET!",
    "FOUR!",
    "SIX!",
    "MAIDEN",
    "Innings ended",
    "--- Innings Break",
    "Match over!",
];

/// Drop the "HH:MM:SS: " transcript prefix if present.
fn strip_timestamp(line: &str) -> &str {
    let bytes = line.as_bytes();
    let stamped = bytes.len() > 10
        && bytes[..8].iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b':',
            _ => b.is_ascii_digit(),
        })
        && bytes[8] == b':'
        && bytes[9] == b' ';
    if stamped {
        &line[10..]
    } else {
        line
    }
}

impl Summarizer for KeyMomentsSummarizer {
    fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResponse, SummaryError> {
        let lines: Vec<&str> = request
            .commentary
            .lines()
            .map(|l| strip_timestamp(l.trim()))
            .filter(|l| !l.is_empty())
            .collect();
        if lines.is_empty() {
            return Err(SummaryError::EmptyCommentary);
        }

        let count = |marker: &str| lines.iter().filter(|l| l.contains(marker)).count();
        let (wickets, fours, sixes) = (count("WICKET!"), count("FOUR!"), count("SIX!"));

        let moments: Vec<&str> =
            lines.iter().copied().filter(|l| MARKERS.iter().any(|m| l.contains(m))).collect();
        let skip = moments.len().saturating_sub(self.max_moments);

        let mut summary = format!(
            "{} wicket{}, {} four{} and {} six{} in {} commentary lines.",
            wickets,
            if wickets == 1 { "" } else { "s" },
            fours,
            if fours == 1 { "" } else { "s" },
            sixes,
            if sixes == 1 { "" } else { "es" },
            lines.len()
        );
        if moments.is_empty() {
            summary.push_str(" A quiet passage of play with no standout moments yet.");
        } else {
            summary.push_str("\nKey moments:");
            for moment in &moments[skip..] {
                summary.push_str("\n- ");
                summary.push_str(moment);
            }
        }
        Ok(SummaryResponse { summary })
    }
}
