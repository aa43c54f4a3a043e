use std::env::args;
use std::fs::write;
use png::Encoder;
use png::ColorType::Rgba;
use png::BitDepth::Eight;
use tabby::*;
use std::time::Instant;
use rgb::ComponentBytes;

fn main() {
	env_logger::init();

	let mut args = args().skip(1);
	let prefix = args.next().unwrap_or("patrol".into());
	let ticks: usize = args.next().map(|n| n.parse().unwrap()).unwrap_or(771);
	let every: usize = args.next().map(|n| n.parse().unwrap()).unwrap_or(60);

	let settings = Settings {
		size: (500, 500),
		line_width: 1.5,
		..Settings::default()
	};
	let (w, h) = settings.size;
	let mut stage = Stage::new(settings).unwrap();
	stage.log_settings();

	let mut timeline = Timeline::new();
	let mut index = 0;
	let now = Instant::now();
	let frames = stage.run(&mut timeline, ticks, |frame, patrol| {
		if index % every == 0 {
			let png_name = format!("{}-{:04}.png", &prefix, index);
			let mut png_buf = Vec::new();
			{
				let mut encoder = Encoder::new(&mut png_buf, w as u32, h as u32);
				encoder.set_color(Rgba);
				encoder.set_depth(Eight);
				let mut writer = encoder.write_header().unwrap();
				writer.write_image_data(frame.as_bytes()).unwrap();
			}
			write(&png_name, &png_buf).unwrap();
			println!("{} ({}, {:?})", png_name, patrol.phase().as_text(), patrol.position().into_tuple());
		}
		index += 1;
		Ok(())
	}).unwrap();
	println!("rendered {} frames in {}ms.", frames, now.elapsed().as_millis());
}
