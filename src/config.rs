use crate::consts::{DEFAULT_MIN_SCORE, DEFAULT_SEARCH_NODE_BUDGET, PERMISSIVE_MIN_SCORE};
use crate::error::{MahjongError, MjResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub rules: RuleSet,
    #[command(flatten)]
    pub search: SearchParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Accept `a + b = c` with a single-digit sum.
    #[arg(long, default_value_t = false)]
    pub permissive_addition: bool,

    /// Qualifying score a hand needs to count as a win.
    #[arg(long, default_value_t = DEFAULT_MIN_SCORE)]
    pub min_score: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            permissive_addition: false,
            min_score: DEFAULT_MIN_SCORE,
        }
    }
}

impl RuleSet {
    /// Relaxed rules for new players: small sums allowed, no minimum score.
    pub fn beginner() -> Self {
        Self {
            permissive_addition: true,
            min_score: PERMISSIVE_MIN_SCORE,
        }
    }

    pub fn merge_from_cli(&mut self, cli_rules: &RuleSet, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli_rules.$field;
                }
            };
        }

        update_if_present!(permissive_addition, "permissive_addition");
        update_if_present!(min_score, "min_score");
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Validator calls plus recursion nodes one search may spend.
    #[arg(long, default_value_t = DEFAULT_SEARCH_NODE_BUDGET)]
    pub search_node_budget: u64,

    /// Probe readiness candidates on the rayon pool.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub parallel_readiness: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            search_node_budget: DEFAULT_SEARCH_NODE_BUDGET,
            parallel_readiness: true,
        }
    }
}

impl SearchParams {
    pub fn merge_from_cli(&mut self, cli_search: &SearchParams, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli_search.$field;
                }
            };
        }

        update_if_present!(search_node_budget, "search_node_budget");
        update_if_present!(parallel_readiness, "parallel_readiness");
    }
}

impl Config {
    pub fn beginner() -> Self {
        Self {
            rules: RuleSet::beginner(),
            search: SearchParams::default(),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> MjResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            MahjongError::Config(format!("failed to read '{}': {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Layers explicit command-line values on top of this (file) config.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        self.rules.merge_from_cli(&cli.rules, matches);
        self.search.merge_from_cli(&cli.search, matches);
    }

    pub fn validate(&self) -> MjResult<()> {
        if self.search.search_node_budget == 0 {
            return Err(MahjongError::Config(
                "search_node_budget must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
