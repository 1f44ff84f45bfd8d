use std::sync::Arc;

use star_practice::cli::{Args, Command, parse_window};
use star_practice::clock::{Clock, FixedClock, SystemClock};
use star_practice::dashboard::{build_dashboard, render};
use star_practice::practice;
use star_practice::seed;
use star_practice::store_factory::{StoreConfig, StoreFactory};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse_args();
    if args.no_color {
        colored::control::set_override(false);
    }

    let clock: Arc<dyn Clock> = match args.validate_override_date()? {
        Some(date) => Arc::new(FixedClock::from_date(date)),
        None => Arc::new(SystemClock),
    };

    let config = StoreConfig {
        is_test_mode: args.test,
        custom_path: args.db_path.as_ref().map(|p| p.display().to_string()),
    };
    let store = StoreFactory::create(config, clock.clone())?;

    match args.command {
        Command::Dashboard { child, window } => {
            let window = parse_window(&window)?;
            let report = build_dashboard(&store, clock.as_ref(), child, window)?;
            print!("{}", render(&report));
        }
        Command::Practice { child, level, limit } => {
            practice::run(&store, child, level, limit)?;
        }
        Command::Seed => {
            let counts = seed::load_demo_data(&store, clock.as_ref())?;
            println!(
                "Seeded {} children, {} levels, {} questions, {} activities.",
                counts.children, counts.levels, counts.questions, counts.activities
            );
        }
    }

    Ok(())
}
