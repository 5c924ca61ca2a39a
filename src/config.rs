use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::Path,
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::discord_helpers::Pacing;
use crate::hey;
use crate::menus::colour::{ColourEntry, Palette};
use crate::menus::engine::MenuOptions;

pub const CONFIG_PATH: &str = "./config.json";

/// Bot wide defaults for the menus it opens, kept in `config.json`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ConfigSettings {
    /// Seconds a menu waits for a click. `0` waits forever.
    pub timeout_secs: u64,
    pub delete_message_after: bool,
    pub public_menus: bool,
    /// Milliseconds between the messages of a multi-message post.
    pub pacing_millis: u64,
    /// Replaces the built-in colour table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palette: Option<Vec<ColourEntry>>,
}

impl Default for ConfigSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 120,
            delete_message_after: true,
            public_menus: false,
            pacing_millis: 1000,
            palette: None,
        }
    }
}

impl ConfigSettings {
    pub fn get() -> Self {
        Self::load(CONFIG_PATH)
    }

    /// Writes the defaults to `path` first if nothing is there yet.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            Self::generate(path);
            return Self::default();
        }

        let Ok(data) = fs::read_to_string(path) else {
            hey!("Failed to read {}, using default settings", path.display());
            return Self::default();
        };

        match Self::parse(&data) {
            Ok(cfg) => cfg,
            Err(e) => {
                hey!("Invalid config in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn parse(data: &str) -> serde_json::Result<Self> {
        serde_json::from_str(data)
    }

    fn generate(path: &Path) {
        if path.exists() {
            hey!("Config data already exists");
            return;
        };

        let Ok(mut file) = OpenOptions::new()
            .read(false)
            .write(true)
            .create(true)
            .append(false)
            .open(path)
        else {
            hey!("Failed to get file for config file.");
            return;
        };

        let Ok(data) = serde_json::to_string_pretty(&Self::default()) else {
            hey!("Failed to serialize config data.");
            return;
        };

        if let Err(e) = write!(file, "{}", data) {
            hey!("Failed to write to file for config: {}", e);
        }
    }

    pub fn menu_options(&self) -> MenuOptions {
        let timeout = (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs));
        MenuOptions::default()
            .timeout(timeout)
            .delete_message_after(self.delete_message_after)
            .public(self.public_menus)
    }

    pub fn pacing(&self) -> Pacing {
        Pacing::every(Duration::from_millis(self.pacing_millis))
    }

    pub fn palette(&self) -> Option<Palette> {
        let entries = self.palette.clone()?;
        match Palette::new(entries) {
            Ok(palette) => Some(palette),
            Err(e) => {
                hey!("Ignoring configured palette: {}", e);
                None
            }
        }
    }
}
