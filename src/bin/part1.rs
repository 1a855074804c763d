use anyhow::{Context, Result};
use card_shuffle::{DirectArgs, Error};
use clap::Parser;
use log::info;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = DirectArgs::parse();
    let text = card_shuffle::read_techniques_text(&args.input_path)?;
    if args.strict {
        card_shuffle::check_techniques(&text).with_context(|| {
            format!(
                "Found unrecognized shuffle technique in given input({}).",
                args.input_path.display()
            )
        })?;
    }

    info!(
        "Simulate one shuffle on deck with {} cards, looking for card({}).",
        args.deck_size, args.card
    );
    let card_ind = card_shuffle::find_card_position(&text, args.deck_size, args.card)
        .ok_or(Error::CardNotFound(args.card, args.deck_size))?;
    println!(
        "After shuffle, card({}) is at #{} in deck.",
        args.card, card_ind
    );

    Ok(())
}
