use super::print_json;
use crate::reports;
use arith_mahjong::api::{self, MahjongState};
use arith_mahjong::config::Config;
use arith_mahjong::MjResult;
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(required = true, num_args = 1..)]
    pub hand: Vec<String>,
}

/// Scores every grammar that completes the hand, qualifying or not.
pub fn run(args: ScoreArgs, state: &MahjongState, json: bool) -> MjResult<()> {
    let report = api::score_hand(state, &args.hand.join(" "))?;
    if json {
        print_json(&report)
    } else {
        reports::print_score_report(&report);
        Ok(())
    }
}
