//! Candidate selection by duration.

use super::dto::LyricsRecord;
use crate::config::Options;

/// Which candidate of a response to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Chosen(usize),
    NotFound,
}

/// Pick a candidate for a file of `local_duration` seconds.
///
/// Without a local duration, or with `enforce_seconds` off, the first candidate
/// is taken whatever its duration. Otherwise the first candidate whose rounded
/// duration lies strictly within `second_difference` of the rounded local
/// duration wins. A chosen candidate without any lyric body is not a match.
pub fn select_candidate(
    candidates: &[LyricsRecord],
    local_duration: Option<f64>,
    options: &Options,
) -> Selection {
    let index = match local_duration {
        Some(local) if options.enforce_seconds => {
            let local = local.round();
            let tolerance = f64::from(options.second_difference);
            candidates.iter().position(|c| {
                c.duration
                    .map(|d| d.round())
                    .is_some_and(|d| d - tolerance < local && d + tolerance > local)
            })
        }
        _ => (!candidates.is_empty()).then_some(0),
    };

    match index {
        Some(i) if candidates[i].has_lyrics() => Selection::Chosen(i),
        _ => Selection::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(duration: f64) -> LyricsRecord {
        LyricsRecord {
            duration: Some(duration),
            plain_lyrics: Some("la la la".to_string()),
            ..Default::default()
        }
    }

    fn enforcing(second_difference: u32) -> Options {
        Options {
            enforce_seconds: true,
            second_difference,
            ..Default::default()
        }
    }

    #[test]
    fn test_first_duration_match_is_selected() {
        let candidates = vec![candidate(160.0), candidate(176.0), candidate(190.0)];
        assert_eq!(
            select_candidate(&candidates, Some(180.0), &enforcing(5)),
            Selection::Chosen(1)
        );
    }

    #[test]
    fn test_no_duration_match_is_not_found() {
        let candidates = vec![candidate(160.0), candidate(190.0)];
        assert_eq!(
            select_candidate(&candidates, Some(180.0), &enforcing(5)),
            Selection::NotFound
        );
    }

    #[test]
    fn test_interval_bounds_are_exclusive() {
        // 175 is exactly 5s away: outside the open interval
        let candidates = vec![candidate(175.0), candidate(185.0)];
        assert_eq!(
            select_candidate(&candidates, Some(180.0), &enforcing(5)),
            Selection::NotFound
        );
    }

    #[test]
    fn test_durations_are_rounded_before_comparison() {
        // 175.6 rounds to 176, local 179.6 rounds to 180
        let candidates = vec![candidate(175.6)];
        assert_eq!(
            select_candidate(&candidates, Some(179.6), &enforcing(5)),
            Selection::Chosen(0)
        );
    }

    #[test]
    fn test_unenforced_always_takes_first() {
        let candidates = vec![candidate(10.0), candidate(180.0)];
        let options = Options {
            enforce_seconds: false,
            ..Default::default()
        };
        assert_eq!(
            select_candidate(&candidates, Some(180.0), &options),
            Selection::Chosen(0)
        );
    }

    #[test]
    fn test_missing_local_duration_takes_first_even_when_enforced() {
        let candidates = vec![candidate(10.0), candidate(180.0)];
        assert_eq!(
            select_candidate(&candidates, None, &enforcing(5)),
            Selection::Chosen(0)
        );
    }

    #[test]
    fn test_chosen_candidate_without_lyrics_is_not_found() {
        let empty = LyricsRecord {
            duration: Some(180.0),
            ..Default::default()
        };
        let candidates = vec![empty, candidate(180.0)];
        assert_eq!(
            select_candidate(&candidates, None, &Options::default()),
            Selection::NotFound
        );
    }

    #[test]
    fn test_synced_only_candidate_counts() {
        let synced = LyricsRecord {
            duration: Some(180.0),
            synced_lyrics: Some("[00:01.00] la".to_string()),
            ..Default::default()
        };
        assert_eq!(
            select_candidate(&[synced], Some(180.0), &enforcing(2)),
            Selection::Chosen(0)
        );
    }

    #[test]
    fn test_no_candidates_is_not_found() {
        assert_eq!(
            select_candidate(&[], Some(180.0), &Options::default()),
            Selection::NotFound
        );
    }
}
