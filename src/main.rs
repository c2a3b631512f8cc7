use room_viewer::config::Config;

fn main() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let result = Config::from_args(std::env::args().skip(1))
		.map_err(anyhow::Error::from)
		.and_then(room_viewer::run);

	if let Err(e) = result {
		log::error!("{:#}", e);
		std::process::exit(1);
	}
}
