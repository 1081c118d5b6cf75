use cabinet_core::input::{Intent, KeyBindings};
use serde::Deserialize;

/// Optional user configuration, read from `cabinet/config.toml` under the
/// platform config directory. CLI flags win over the file and the file
/// wins over built-in defaults; a file that fails to parse degrades to
/// the defaults with a warning instead of stopping the run.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulator: Option<String>,
    pub scale: Option<u32>,
    pub keys: Keys,
}

/// Per-intent key-code lists. A present entry replaces every default
/// binding for that intent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Keys {
    pub left: Option<Vec<u32>>,
    pub up: Option<Vec<u32>>,
    pub right: Option<Vec<u32>>,
    pub down: Option<Vec<u32>>,
    pub button1: Option<Vec<u32>>,
    pub button2: Option<Vec<u32>>,
}

pub fn load() -> Config {
    let Some(dir) = dirs::config_dir() else {
        return Config::default();
    };
    let path = dir.join("cabinet").join("config.toml");
    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(_) => return Config::default(),
    };
    match toml::from_str(&text) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("ignoring {}: {err}", path.display());
            Config::default()
        }
    }
}

impl Config {
    /// Fold the `[keys]` table into the binding table.
    pub fn apply_keys(&self, bindings: &mut KeyBindings) {
        let entries = [
            (&self.keys.left, Intent::Left),
            (&self.keys.up, Intent::Up),
            (&self.keys.right, Intent::Right),
            (&self.keys.down, Intent::Down),
            (&self.keys.button1, Intent::Button1),
            (&self.keys.button2, Intent::Button2),
        ];
        for (codes, intent) in entries {
            if let Some(codes) = codes {
                bindings.unbind_intent(intent);
                for &code in codes {
                    bindings.bind(code, intent);
                }
            }
        }
    }
}
