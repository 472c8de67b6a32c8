use lifegrid::engine::{CaveGen, DenseLife, SmoothLife, SparseLife};
use lifegrid::error::Error;
use lifegrid::{Automaton, Pattern, Pos2};
use std::process::ExitCode;
use std::thread;

mod console;
mod options;
mod stats;

use options::{Args, EngineKind};
use stats::{Recorder, Recording};

fn load_pattern(args: &Args) -> Result<Pattern, Error> {
    match args.input_file() {
        Some(path) => {
            let pattern = Pattern::load(&path)?;
            log::info!("loaded {} cells from {}", pattern.len(), path.display());
            Ok(pattern)
        }
        None => Ok(Pattern::r_pentomino()),
    }
}

fn build_engine(args: &Args, kind: EngineKind) -> Result<Box<dyn Automaton>, Error> {
    let (width, height) = args.grid_size(kind)?;
    let seed = args.seed()?;
    log::info!("{kind:?} engine on a {width}x{height} grid");

    let engine: Box<dyn Automaton> = match kind {
        EngineKind::Dense => {
            let pattern = load_pattern(args)?;
            Box::new(DenseLife::with_rule(width, height, &pattern, args.rule()?))
        }
        EngineKind::Sparse => {
            let pattern = load_pattern(args)?;
            let anchor = Pos2::new((width / 2) as i32, (height / 2) as i32);
            Box::new(SparseLife::with_rule(anchor, &pattern, args.rule()?))
        }
        EngineKind::Smooth => {
            let config = args.smooth_config()?;
            Box::new(match seed {
                Some(seed) => SmoothLife::seeded(width, height, config, seed),
                None => SmoothLife::new(width, height, config),
            })
        }
        EngineKind::Cave => {
            let config = args.cave_config()?;
            Box::new(match seed {
                Some(seed) => CaveGen::seeded(width, height, config, seed),
                None => CaveGen::new(width, height, config),
            })
        }
    };
    Ok(engine)
}

fn run(args: Args) -> Result<(), Error> {
    if let Some(threads) = args.threads()? {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    let kind = args.engine()?;
    let mut game = build_engine(&args, kind)?;
    let generations = args.generations(kind)?;
    let sleep = args.sleep()?;
    let stats_file = args.stats_file();

    let mut console = if args.console() {
        Some(console::ConsoleRender::new(Pos2::zero())?)
    } else {
        None
    };

    let mut stats = Recording::new(game.alive_count(), stats_file.is_some());
    let mut paused = false;
    'generations: while game.generation() < generations {
        if let Some(ref mut console) = console {
            while let Some(cmd) = console.poll_events()? {
                match cmd {
                    console::ConsoleCommand::Exit => break 'generations,
                    console::ConsoleCommand::Pause => paused = !paused,
                    console::ConsoleCommand::Poke { pos, alive } => game.set_cell(pos, alive),
                    console::ConsoleCommand::Handled => {}
                }
            }
            console.render(&*game)?;
        }

        if stats.has_report() {
            let report = stats.report();
            match console {
                Some(ref mut console) => console.set_report(report),
                None => println!("{report}"),
            }
        }

        if !paused {
            game.step();
            stats.record(game.generation(), game.alive_count());
        }
        if let Some(time) = sleep {
            thread::sleep(time);
        }
    }
    if let Some(ref console) = console {
        console.render(&*game)?;
    }
    // restore the terminal before anything else is printed
    drop(console);

    log::info!(
        "stopped after {} generations with {} alive",
        game.generation(),
        game.alive_count()
    );
    if let Some(path) = stats_file {
        stats.save(&path)?;
        log::info!("wrote stats to {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match Args::from_env() {
        Ok(Some(args)) => args,
        Ok(None) => return ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
