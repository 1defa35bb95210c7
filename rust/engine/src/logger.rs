use serde::{Deserialize, Serialize};

use crate::game::{Game, Possession};
use crate::penalty::PenaltyName;
use crate::play::{Play, PlayType};

/// One resolved play as written to the play log.
/// Serialized one object per line (JSONL) for later analysis and replay checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayRecord {
    /// Unique identifier for this play (format: YYYYMMDD-NNNNNN)
    pub play_id: String,
    /// Seed of the random source the play was resolved with
    pub seed: Option<u64>,
    pub play_type: PlayType,
    pub possession: Possession,
    pub start_field_position: i32,
    pub end_field_position: i32,
    pub yards_gained: i32,
    /// One-line summary, as printed by the CLI
    pub summary: String,
    /// Accepted fouls only
    #[serde(default)]
    pub penalties: Vec<PenaltyName>,
    /// Score after the play was applied
    pub home_score: u32,
    pub away_score: u32,
    #[serde(default)]
    pub commentary: Vec<String>,
    /// Timestamp when the play was logged (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

impl PlayRecord {
    /// Builds the record for `play` once it has been applied to `game`.
    pub fn new(play_id: String, seed: Option<u64>, play: &Play, game: &Game) -> Self {
        Self {
            play_id,
            seed,
            play_type: play.play_type(),
            possession: play.possession,
            start_field_position: play.start_field_position,
            end_field_position: play.end_field_position,
            yards_gained: play.yards_gained,
            summary: play.summary(),
            penalties: play
                .penalties
                .iter()
                .filter(|p| p.accepted)
                .map(|p| p.name)
                .collect(),
            home_score: game.home_score,
            away_score: game.away_score,
            commentary: play.commentary.clone(),
            ts: None,
        }
    }
}

pub fn format_play_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct PlayLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl PlayLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_play_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &PlayRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_per_logger() {
        let mut log = PlayLogger::with_seq_for_test("20250101");
        assert_eq!(log.next_id(), "20250101-000001");
        assert_eq!(log.next_id(), "20250101-000002");
    }
}
