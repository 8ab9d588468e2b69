pub mod check;
pub mod group;
pub mod ready;
pub mod score;

use arith_mahjong::MjResult;
use serde::Serialize;

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> MjResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
