use anyhow::{Context, Result};
use card_shuffle::ComposedArgs;
use clap::Parser;
use log::info;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = ComposedArgs::parse();
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
        "Compose shuffle on deck with {} cards, repeated {} times.",
        args.deck_size, args.repeat
    );
    let card =
        card_shuffle::card_at_after_repeats(&text, args.deck_size, args.repeat, args.position)?;
    println!(
        "After {} times shuffling, the card at [{}] in deck with {} cards is #{}.",
        args.repeat, args.position, args.deck_size, card
    );

    Ok(())
}
