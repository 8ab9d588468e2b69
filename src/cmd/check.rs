use super::print_json;
use crate::reports;
use arith_mahjong::api::{self, MahjongState};
use arith_mahjong::config::Config;
use arith_mahjong::MjResult;
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub config: Config,

    /// Hand notation, e.g. "2 3 5 + | 4 4 4 4 | ..."
    #[arg(required = true, num_args = 1..)]
    pub hand: Vec<String>,
}

pub fn run(args: CheckArgs, state: &MahjongState, json: bool) -> MjResult<()> {
    let result = api::check_hand(state, &args.hand.join(" "))?;
    if json {
        print_json(&result)
    } else {
        reports::print_check(&result);
        Ok(())
    }
}
