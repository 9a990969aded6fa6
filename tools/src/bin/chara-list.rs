use anyhow::Result;
use assetxml_tools::{
    chara_list::{chara_list, CharaConfig, CharaListArgs},
    utils::{init_logger, parse_args},
};

fn main() -> Result<()> {
    let args: CharaListArgs = parse_args();
    init_logger(args.verbose)?;

    chara_list(&CharaConfig::from(args))
}
