use std::env::args;
use std::thread::sleep;
use std::time::Instant;
use tabby::*;

/// Runs the patrol in real time without a window, logging every leg.
/// `RUST_LOG=debug` shows the phase changes.
fn main() {
	env_logger::init();

	let laps: usize = args().nth(1).map(|n| n.parse().unwrap()).unwrap_or(1).max(1);

	let settings = Settings {
		size: (200, 200),
		..Settings::default()
	};
	let mut stage = Stage::new(settings).unwrap();
	let mut frame = vec![rgb::RGBA8::default(); stage.frame_len()];
	let mut timeline = Timeline::new();
	let origin = Instant::now();
	let mut returns = 0;

	while timeline.next_tick() {
		if let Some(wait) = timeline.now().checked_sub(origin.elapsed()) {
			sleep(wait);
		}

		let before = stage.patrol().phase();
		stage.tick(&mut timeline);
		let after = stage.patrol().phase();

		if timeline.take_redraw() {
			stage.redraw(&mut frame).unwrap();
		}

		if before != after {
			log::info!("{:>8.3}s {}", origin.elapsed().as_secs_f32(), after.as_text());
			if after == Phase::Climb {
				returns += 1;
				if returns == laps {
					stage.patrol_mut().stop();
				}
			}
		}
	}

	println!("{} lap(s) in {:.2}s", laps, origin.elapsed().as_secs_f32());
}
