use super::print_json;
use crate::reports;
use arith_mahjong::api::{self, MahjongState};
use arith_mahjong::config::Config;
use arith_mahjong::MjResult;
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct GroupArgs {
    #[command(flatten)]
    pub config: Config,

    /// Exactly four tiles.
    #[arg(required = true, num_args = 1..)]
    pub tiles: Vec<String>,
}

pub fn run(args: GroupArgs, state: &MahjongState, json: bool) -> MjResult<()> {
    let result = api::group_tiles(state, &args.tiles.join(" "))?;
    if json {
        print_json(&result)
    } else {
        reports::print_group(&result);
        Ok(())
    }
}
