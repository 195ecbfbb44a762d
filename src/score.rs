use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use log::{error, info, warn};
use serde::Serialize;

use crate::config::{APP_DIR_NAME, SCORE_FILE_NAME};
use crate::error::{ParseEntryError, ScoreError};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One leaderboard record.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct HighScoreEntry {
    pub score: u32,
    pub name: String,
    pub date: NaiveDate,
}

impl FromStr for HighScoreEntry {
    type Err = ParseEntryError;

    /// Parses a `score,name,YYYY-MM-DD` record.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut fields = line.trim_end_matches('\r').split(',');
        let score = fields
            .next()
            .ok_or(ParseEntryError::MissingField("score"))?
            .trim()
            .parse::<u32>()?;
        let name = fields
            .next()
            .ok_or(ParseEntryError::MissingField("name"))?
            .trim();
        let date = fields.next().ok_or(ParseEntryError::MissingField("date"))?;
        if fields.next().is_some() {
            return Err(ParseEntryError::ExtraField);
        }
        if name.is_empty() {
            return Err(ParseEntryError::BlankName);
        }

        Ok(Self {
            score,
            name: name.to_owned(),
            date: NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)?,
        })
    }
}

impl fmt::Display for HighScoreEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{}",
            self.score,
            self.name,
            self.date.format(DATE_FORMAT)
        )
    }
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// Leaderboard backed by a flat text file, sorted by descending score.
///
/// Equal scores keep insertion order: a new entry goes after existing ones
/// with the same score.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
    entries: Vec<HighScoreEntry>,
}

impl HighScoreStore {
    /// Opens the store at `path`.
    ///
    /// A missing file is an empty leaderboard. Lines that fail to parse are
    /// logged and skipped; any other read failure is returned.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ScoreError> {
        let path = path.into();
        let entries = load_entries(&path)?;
        info!(
            "loaded {} high scores from {}",
            entries.len(),
            path.display()
        );

        Ok(Self { path, entries })
    }

    /// Records `score` for `name` dated today and rewrites the store.
    ///
    /// Returns the zero-based rank of the new entry.
    pub fn save(&mut self, score: i64, name: &str) -> Result<usize, ScoreError> {
        self.save_with_date(score, name, Local::now().date_naive())
    }

    /// Same as [`save`](Self::save) with an explicit date.
    ///
    /// Invalid submissions are rejected before anything is touched. The
    /// in-memory list only changes once the file has been written.
    pub fn save_with_date(
        &mut self,
        score: i64,
        name: &str,
        date: NaiveDate,
    ) -> Result<usize, ScoreError> {
        let entry = match validate_submission(score, name) {
            Ok((score, name)) => HighScoreEntry { score, name, date },
            Err(rejection) => {
                warn!("rejected high score submission: {rejection}");
                return Err(rejection);
            }
        };

        let rank = self.insertion_index(entry.score);
        let mut updated = self.entries.clone();
        updated.insert(rank, entry);

        if let Err(io_error) = write_entries(&self.path, &updated) {
            error!(
                "failed to write high scores to {}: {io_error}",
                self.path.display()
            );
            return Err(io_error.into());
        }

        self.entries = updated;
        info!("saved high score at rank {}", rank + 1);
        Ok(rank)
    }

    /// Index after every entry whose score is at least `score`.
    #[must_use]
    pub fn insertion_index(&self, score: u32) -> usize {
        self.entries.partition_point(|entry| entry.score >= score)
    }

    #[must_use]
    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// Best stored score, or 0 when the leaderboard is empty.
    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.entries.first().map_or(0, |entry| entry.score)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate_submission(score: i64, name: &str) -> Result<(u32, String), ScoreError> {
    if score < 0 {
        return Err(ScoreError::NegativeScore(score));
    }
    let score = u32::try_from(score).map_err(|_| ScoreError::ScoreOutOfRange(score))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(ScoreError::BlankName);
    }
    if name.contains([',', '\n', '\r']) {
        return Err(ScoreError::InvalidName);
    }

    Ok((score, name.to_owned()))
}

fn load_entries(path: &Path) -> io::Result<Vec<HighScoreEntry>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut entries: Vec<HighScoreEntry> = raw
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(index, line)| match line.parse() {
            Ok(entry) => Some(entry),
            Err(parse_error) => {
                warn!(
                    "skipping {} line {}: {parse_error}",
                    path.display(),
                    index + 1
                );
                None
            }
        })
        .collect();

    // Stable, so equal scores keep their file order.
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    Ok(entries)
}

fn write_entries(path: &Path, entries: &[HighScoreEntry]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut payload = String::new();
    for entry in entries {
        payload.push_str(&entry.to_string());
        payload.push('\n');
    }

    fs::write(path, payload)
}
