use super::print_json;
use crate::reports;
use arith_mahjong::api::{self, MahjongState};
use arith_mahjong::config::Config;
use arith_mahjong::MjResult;
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct ReadyArgs {
    #[command(flatten)]
    pub config: Config,

    /// A hand one tile short of complete.
    #[arg(required = true, num_args = 1..)]
    pub hand: Vec<String>,
}

pub fn run(args: ReadyArgs, state: &MahjongState, json: bool) -> MjResult<()> {
    let result = api::ready_hand(state, &args.hand.join(" "))?;
    if json {
        print_json(&result)
    } else {
        reports::print_readiness(&result);
        Ok(())
    }
}
