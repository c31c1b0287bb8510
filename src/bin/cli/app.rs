use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use mood_journal_lib::config::AppConfig;
use mood_journal_lib::mood::MoodEntry;
use mood_journal_lib::reports::{ConfigGate, ReportGenerator};
use mood_journal_lib::storage::JournalStorage;

/// Shared application state for CLI commands
pub struct App {
    pub data_dir: PathBuf,
    pub journal: JournalStorage,
    pub config: AppConfig,
}

impl App {
    /// Open the journal in `data_dir`, or in the default data directory
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => JournalStorage::default_data_dir().context("Failed to get data directory")?,
        };

        let journal = JournalStorage::new(data_dir.clone())
            .with_context(|| format!("Failed to open journal in {}", data_dir.display()))?;
        let config = AppConfig::load(&data_dir).context("Failed to load config")?;

        Ok(Self {
            data_dir,
            journal,
            config,
        })
    }

    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    /// Report generator over this journal; `seed` fixes weekly template choice
    pub fn generator(&self, seed: Option<u64>) -> ReportGenerator<&JournalStorage, ConfigGate> {
        let gate = ConfigGate::new(&self.config.features);
        let config = self.config.clone();
        match seed {
            Some(seed) => ReportGenerator::with_rng(&self.journal, gate, config, StdRng::seed_from_u64(seed)),
            None => ReportGenerator::new(&self.journal, gate, config),
        }
    }

    pub fn list_entries(&self) -> Result<Vec<MoodEntry>> {
        self.journal.list_entries().context("Failed to list entries")
    }

    /// Resolve a full ID or a unique prefix of one
    pub fn resolve_entry_id(&self, id: &str) -> Result<Uuid> {
        if let Ok(uuid) = Uuid::parse_str(id) {
            return Ok(uuid);
        }

        let needle = id.to_lowercase();
        let matches: Vec<Uuid> = self
            .list_entries()?
            .iter()
            .map(|e| e.id)
            .filter(|uuid| uuid.to_string().starts_with(&needle))
            .collect();

        match matches.len() {
            0 => anyhow::bail!("No entry with ID '{}'", id),
            1 => Ok(matches[0]),
            n => anyhow::bail!("Ambiguous entry ID '{}' ({} matches)", id, n),
        }
    }
}
