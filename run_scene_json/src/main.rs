use std::{env, error::Error, fs::File, io};

use log::info;
use miroir_plan::scene::Scene;
use miroir_plan_json::{serde_json, JsonDes, JsonSer};

/// Overrides the scene's display toggles with command line flags.
fn apply_flags(scene: &mut Scene, flags: impl IntoIterator<Item = String>) -> Result<(), Box<dyn Error>> {
    for flag in flags {
        match flag.as_str() {
            "--multiple-mirrors" => scene.set_multiple_mirrors(true),
            "--single-mirror" => scene.set_multiple_mirrors(false),
            "--show-rays" => scene.set_show_rays(true),
            "--hide-rays" => scene.set_show_rays(false),
            other => return Err(format!("unknown flag: {other}").into()),
        }
    }

    Ok(())
}

fn run_scene(
    json: &serde_json::Value,
    flags: impl IntoIterator<Item = String>,
) -> Result<serde_json::Value, Box<dyn Error>> {
    let mut scene = Scene::from_json(json)?;
    apply_flags(&mut scene, flags)?;

    info!(
        "evaluating {} mirror(s), {} object(s), {} viewer(s)",
        scene.mirrors().count(),
        scene.objects().count(),
        scene.viewers().count(),
    );

    let outcome = scene.evaluate();

    info!(
        "{} virtual image(s), {} ray path(s), {} skipped",
        outcome.images.len(),
        outcome.paths.len(),
        outcome.skipped,
    );

    Ok(outcome.to_json())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = env::args().skip(1);

    let file_path = args
        .next()
        .ok_or("expected a file path as a first argument.")?;

    let outcome = run_scene(&serde_json::from_reader(File::open(file_path)?)?, args)?;

    serde_json::to_writer_pretty(io::stdout().lock(), &outcome)?;
    println!();

    Ok(())
}
