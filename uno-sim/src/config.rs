use std::env::var;

use color_eyre::{eyre::WrapErr, Result};

/// Match settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub players: usize,
    pub seed: Option<u64>,
    pub human: bool,
    pub max_turns: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            players: 4,
            seed: None,
            human: false,
            max_turns: 2000,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(players) = lookup("UNO_PLAYERS") {
            settings.players = players
                .trim()
                .parse()
                .wrap_err("`UNO_PLAYERS` must be a number")?;
        }
        if let Some(seed) = lookup("UNO_SEED") {
            settings.seed = Some(seed.trim().parse().wrap_err("`UNO_SEED` must be a number")?);
        }
        if let Some(human) = lookup("UNO_HUMAN") {
            settings.human = matches!(
                human.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            );
        }
        if let Some(max_turns) = lookup("UNO_MAX_TURNS") {
            settings.max_turns = max_turns
                .trim()
                .parse()
                .wrap_err("`UNO_MAX_TURNS` must be a number")?;
        }

        Ok(settings)
    }
}
