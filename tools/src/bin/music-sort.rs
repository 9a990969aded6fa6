use anyhow::Result;
use assetxml_tools::{
    music_sort::{music_sort, MusicSortArgs, SortConfig},
    utils::{init_logger, parse_args},
};

fn main() -> Result<()> {
    let args: MusicSortArgs = parse_args();
    init_logger(args.verbose)?;

    music_sort(&SortConfig::from(args))
}
