use super::error::SaveError;
use super::format::HistoryFile;
use super::HISTORY_VERSION;

/// Score text older files wrote for a side that never batted.
const LEGACY_DID_NOT_BAT: &str = "-1/0";

/// Migrate history data from older versions to current version
pub fn migrate_history(mut file: HistoryFile) -> Result<HistoryFile, SaveError> {
    let original_version = file.version;

    file = match file.version {
        0 => migrate_v0_to_v1(file)?,
        1 => file,
        v => {
            return Err(SaveError::VersionMismatch { found: v, expected: HISTORY_VERSION });
        }
    };

    file.version = HISTORY_VERSION;

    if original_version != HISTORY_VERSION {
        file.update_timestamp();
        log::info!("Migrated history from version {} to {}", original_version, HISTORY_VERSION);
    }

    Ok(file)
}

/// Version 0 leaked the "has not batted" run sentinel into score text and
/// kept no settings.
fn migrate_v0_to_v1(mut file: HistoryFile) -> Result<HistoryFile, SaveError> {
    log::info!("Migrating history from version 0 to 1");

    for record in &mut file.matches {
        if record.team2_score == LEGACY_DID_NOT_BAT {
            record.team2_score = "DNB".to_string();
        }
        if record.team1_score == LEGACY_DID_NOT_BAT {
            record.team1_score = "DNB".to_string();
        }
    }

    if let Some(settings) = &file.settings {
        if settings.check().is_err() {
            log::warn!("Dropping invalid stored match settings during migration");
            file.settings = None;
        }
    }

    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TeamInnings;
    use crate::save::MatchRecord;

    #[test]
    fn test_v0_sentinel_scores_become_dnb() {
        let alpha = TeamInnings::batting_first("Alpha");
        let bravo = TeamInnings::yet_to_bat("Bravo");
        let mut record = MatchRecord::new(&alpha, &bravo, "Match Tied!");
        record.team2_score = LEGACY_DID_NOT_BAT.to_string();

        let mut file = HistoryFile::new();
        file.version = 0;
        file.matches.push(record);

        let migrated = migrate_history(file).unwrap();
        assert_eq!(migrated.version, HISTORY_VERSION);
        assert_eq!(migrated.matches[0].team2_score, "DNB");
    }

    #[test]
    fn test_current_version_untouched() {
        let file = HistoryFile::new();
        let migrated = migrate_history(file.clone()).unwrap();
        assert_eq!(migrated, file);
    }
}
