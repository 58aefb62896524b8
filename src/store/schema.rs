use serde::{Deserialize, Serialize};

use crate::engine::word::WordId;

pub const SOLVED_KEY: &str = "solved";
pub const SETTINGS_KEY: &str = "settings";

/// Durable form of the solved set: a plain JSON array of identities.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SolvedSnapshot {
    pub words: Vec<WordId>,
}
