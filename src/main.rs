use std::{thread, time::Duration};

mod options;
mod screen;
mod stats;

use anyhow::Result;
use lifeterm::{RuleScope, Simulation};
use options::{Args, Config};
use screen::{Command, Screen};
use stats::Throughput;

fn build_simulation(config: &Config) -> Simulation {
    let mut rng = rand::rng();
    let cells = config.fill.seed(config.grid, &mut rng);
    let scope = if config.unbounded {
        RuleScope::Unbounded
    } else {
        RuleScope::Viewport(config.grid)
    };
    Simulation::from_cells(cells, scope, config.history)
}

fn run_headless(config: &Config) -> Result<()> {
    let mut sim = build_simulation(config);
    println!("seeded alive:{}", sim.cells().len());

    let mut meter = Throughput::new();
    for _ in 0..config.gens {
        sim.step_forward();
        meter.record();
        if meter.has_sample() {
            println!(
                "{:.02}gen/s gen:{} alive:{}",
                meter.sample(),
                sim.generation(),
                sim.cells().len()
            );
        }
    }
    println!("done gen:{} alive:{}", sim.generation(), sim.cells().len());
    Ok(())
}

fn run_interactive(config: &Config) -> Result<()> {
    let mut rng = rand::rng();
    let mut sim = build_simulation(config);
    let mut screen = Screen::new(config.grid, config.cell_size, config.palette)?;
    let mut meter = Throughput::new();

    let mut rate = config.rates.initial;
    let mut speed = 0.0;
    // start paused so the seed can be inspected or edited first
    let mut paused = true;

    loop {
        if meter.has_sample() {
            speed = meter.sample();
        }
        let status = format!(
            "{speed:.02}gen/s gen:{} alive:{} rate:{rate}/s [{}]",
            sim.generation(),
            sim.cells().len(),
            if paused { "paused" } else { "running" }
        );
        screen.render(sim.cells(), &status)?;

        while let Some(command) = screen.poll_command()? {
            match command {
                Command::Quit => return Ok(()),
                Command::TogglePause => paused = !paused,
                Command::Randomize => sim.cells_mut().randomize(config.grid, 0.5, &mut rng),
                Command::Fill => sim.cells_mut().fill(config.grid),
                Command::Clear => sim.cells_mut().clear(),
                Command::Invert => sim.cells_mut().invert(config.grid),
                Command::StepForward if paused => {
                    sim.step_forward();
                    meter.record();
                }
                Command::StepBackward if paused => sim.step_backward(),
                Command::Activate(pos) if paused => sim.cells_mut().activate(pos),
                Command::Toggle(pos) if paused => sim.cells_mut().toggle(pos),
                Command::RaiseRate if !paused => rate = (rate + 1).min(config.rates.max),
                Command::LowerRate if !paused => rate = (rate - 1).max(config.rates.min),
                // editing and stepping while running, or rate changes
                // while paused, are ignored
                _ => {}
            }
        }

        if !paused {
            sim.step_forward();
            meter.record();
        }
        thread::sleep(Duration::from_secs_f64(1.0 / f64::from(rate)));
    }
}

fn main() -> Result<()> {
    let Some(args) = Args::from_env()? else {
        return Ok(());
    };
    let config = args.config()?;

    if config.headless {
        run_headless(&config)
    } else {
        run_interactive(&config)
    }
}
