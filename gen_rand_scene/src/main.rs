use std::{env, error::Error, fs::File};

use miroir_plan::SceneConfig;
use miroir_plan_json::{serde_json, JsonSer};
use miroir_plan_random::{rand, random_scene};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = env::args().skip(1);

    let file_path = args
        .next()
        .ok_or("please provide a path to serialize the scene json data")?;

    let num_mirrors = args.next().and_then(|arg| arg.parse().ok()).unwrap_or(3);

    let num_objects = args.next().and_then(|arg| arg.parse().ok()).unwrap_or(2);

    let config = SceneConfig {
        multiple_mirrors: num_mirrors > 1,
        ..Default::default()
    };

    let scene = random_scene(&mut rand::thread_rng(), config, num_mirrors, num_objects);

    log::info!("writing a scene with {num_mirrors} mirrors and {num_objects} objects to {file_path}");

    serde_json::to_writer_pretty(File::create(file_path)?, &scene.to_json())?;

    Ok(())
}
