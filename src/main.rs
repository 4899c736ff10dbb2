//! Orbit Table headless runner
//!
//! Runs a scripted session on the in-memory table and logs what happens.
//! Usage: `orbit-table [tuning.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use orbit_table::consts::FRAME_NANOS;
    use orbit_table::headless::HeadlessField;
    use orbit_table::{Field, TableSession, TableTuning, tick};

    env_logger::init();
    log::info!("Orbit Table (headless) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => {
            log::info!("Loading tuning from {}", path);
            TableTuning::from_json(&std::fs::read_to_string(path)?)?
        }
        None => TableTuning::default(),
    };
    let seed = match args.next() {
        Some(s) => s.parse()?,
        None => std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)?
            .as_nanos() as u64,
    };

    let mut field = HeadlessField::standard_table();
    let mut session = TableSession::start(&mut field, tuning, seed)?;
    field.launch_ball();

    // 60 seconds at 120 Hz; every two seconds the lead ball completes one planet
    let frames = 60 * 120;
    let beat = 2 * 120;
    for frame in 0..frames {
        for action in field.advance(FRAME_NANOS) {
            session.run_scheduled(&mut field, action);
        }
        tick(&mut session, &mut field, FRAME_NANOS);

        if frame % beat == beat - 1 {
            let planet = (frame / beat) % session.planets.len();
            play_planet(&mut session, &mut field, planet);
        }

        for event in session.take_events() {
            log::info!("t={:.2}s {:?}", orbit_table::nanos_to_secs(session.time_nanos), event);
        }
    }

    log::info!(
        "Finished: score {}, {} balls in play, multiball {:?}",
        field.score(),
        field.ball_count(),
        session.multiball_status()
    );
    println!("Final score: {}", field.score());
    Ok(())
}

/// Collect planet `index` with the lead ball, then make its qualifying shot
#[cfg(not(target_arch = "wasm32"))]
fn play_planet(
    session: &mut orbit_table::TableSession,
    field: &mut orbit_table::headless::HeadlessField,
    index: usize,
) {
    use orbit_table::Field;

    let Some(lead) = field.balls().first().map(|b| b.id) else {
        return;
    };
    let Some(ball) = field.ball(lead) else {
        return;
    };
    session.all_rollovers_activated(field, &format!("Planet{}", index + 1), &ball);

    let Some(ball) = field.ball(lead) else {
        return;
    };
    match index {
        0 => session.all_drop_targets_hit(field, "Planet1Targets", &ball),
        1 => session.all_rollovers_activated(field, "Planet2Rollovers", &ball),
        _ => {
            let Some(shot) = session
                .tuning
                .shots
                .iter()
                .find(|s| s.planet == Some(index))
                .cloned()
            else {
                return;
            };
            field.set_previous_sensor(lead, &shot.entry_sensor);
            if let Some(ball) = field.ball(lead) {
                session.ball_in_sensor_range(field, &shot.exit_sensor, &ball);
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on wasm; embed the library in a host instead
}
