use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use std::fs;
use std::path::{Path, PathBuf};

/// `$BKRLDC_HOME`, else `~/.bkrldc`.
pub fn bkrldc_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("BKRLDC_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".bkrldc"))
}

pub fn ensure_bkrldc_home() -> Result<PathBuf> {
    let dir = bkrldc_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Today's date in an IANA timezone like "Asia/Taipei".
pub fn today_in(tz: &str) -> Result<NaiveDate> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
    Ok(Utc::now().with_timezone(&tz).date_naive())
}

/// Where downloaded texts and produced tables live.
#[derive(Debug, Clone)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn texts_dir(&self) -> PathBuf {
        self.root.join("texts")
    }

    pub fn tables_dir(&self) -> PathBuf {
        self.root.join("tables")
    }

    pub fn ensure(&self) -> Result<()> {
        for dir in [self.texts_dir(), self.tables_dir()] {
            fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
        }
        Ok(())
    }

    /// `texts/{stem}_{fetched_on}.txt`
    pub fn raw_text_path(&self, stem: &str, fetched_on: NaiveDate) -> PathBuf {
        self.texts_dir().join(format!("{stem}_{fetched_on}.txt"))
    }

    /// `tables/{stem}_{reference_date}.csv`
    pub fn table_path(&self, stem: &str, reference_date: NaiveDate) -> PathBuf {
        self.tables_dir().join(format!("{stem}_{reference_date}.csv"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
