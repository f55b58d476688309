//! Main application entry point.

use floorplan_app::{RunConfig, run};

fn main() {
    env_logger::init();
    log::info!("Starting floorplan");

    let result = RunConfig::from_args(std::env::args().skip(1)).and_then(|config| run(&config));
    match result {
        Ok(summary) => {
            for (floor, area) in summary.plan.floors.iter().zip(&summary.floor_areas_m2) {
                println!(
                    "{}: {} room(s), {}",
                    floor.name,
                    floor.rooms.len(),
                    floorplan_core::measure::format_area(*area)
                );
            }
            println!("{} commit(s), saved: {}", summary.commits, summary.saved);
        }
        Err(err) => {
            log::error!("{}", err);
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
