use save_manager::config::AppConfig;
use save_manager::demo::{self, DemoContext};
use save_manager::game::{GameControl, GameManager, KeySet, Scheduler};
use save_manager::save::{SaveManager, SaveSlot};
use std::time::{Duration, Instant};

const FRAME_TIME: Duration = Duration::new(0, 1_000_000_000u32 / 60);

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::from_file(&path)
            .map_err(|e| format!("Failed to read config: {}", e))?,
        None => AppConfig::default(),
    };

    let mut game = GameManager::new(config.escape_exits_application);
    let save_manager = SaveManager::new(&config.save);
    let mut context = DemoContext::new(save_manager, SaveSlot::new(config.slot.clone()));

    context
        .start()
        .map_err(|e| format!("Failed to start save slot: {}", e))?;

    let mut scheduler: Scheduler<DemoContext> = Scheduler::new();
    if config.slot.run_save_load_test_on_start {
        scheduler.schedule_once(Duration::ZERO, |context| {
            match demo::run_save_load_test(context) {
                Ok(report) => log::info!("Save/load test finished: {:?}", report),
                Err(e) => log::error!("Save/load test failed: {}", e),
            }
        });
    }
    let external_delay = config
        .external_test_delay()
        .map_err(|e| format!("Invalid external_test_delay_secs: {}", e))?;
    scheduler.schedule_once(external_delay, |context| {
        if let Err(e) = demo::set_save_data_property_test(context) {
            log::error!("External save test failed: {}", e);
        }
    });

    // No windowing backend here; input stays empty and the loop ends once
    // every scheduled task has run.
    let input = KeySet::new();
    let mut last_frame = Instant::now();

    loop {
        let now = Instant::now();
        scheduler.advance(now - last_frame, &mut context);
        last_frame = now;

        if scheduler.is_empty() {
            game.request_quit();
        }

        if game.update(&input) == GameControl::Quit {
            break;
        }

        std::thread::sleep(FRAME_TIME);
    }

    match context.manager.list_saves() {
        Ok(saves) => {
            for save in saves {
                log::info!(
                    "{} ({}) {}",
                    save.file_name,
                    save.data_type,
                    save.modified_label()
                );
            }
        }
        Err(e) => log::warn!("Could not list saves: {}", e),
    }

    log::info!("Exited after {} frames", game.frame());
    Ok(())
}
