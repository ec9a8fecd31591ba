//! Begat entry point
//!
//! The game runs in the browser (see `bindings`). Natively this plays one
//! scripted level against in-memory storage and logs the outcome.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use begat::platform::MemoryStore;
    use begat::{CompletionInput, GameSession};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Begat (native) starting...");
    log::info!("Native mode has no UI - serve the web build to play");

    let mut session = GameSession::new(MemoryStore::new());
    let level_index = session.settings().last_level;
    let mut tally = match session.start_level(level_index) {
        Ok(tally) => tally,
        Err(e) => {
            log::error!("{}", e);
            return;
        }
    };

    // A fairly clean run: one miss, later redeemed
    for card in 0..14 {
        if card == 4 {
            tally.record_wrong_answer();
            tally.record_correct_answer(2);
        } else {
            tally.record_correct_answer(1);
        }
        tally.record_placement();
    }
    tally.record_redemption();

    let input = CompletionInput {
        base_score: tally.base_score(),
        net_mistakes: tally.net_mistakes(),
        elapsed_secs: 165,
    };
    match session.complete_level(level_index, input) {
        Ok(result) => {
            let report = &result.report;
            println!(
                "{} - {} points in {} ({}x, speed bonus {}%)",
                report.tier_label,
                report.final_score,
                report.time,
                report.multiplier,
                report.speed_bonus * 100.0
            );
            if result.is_high_score {
                match session.submit_high_score(level_index, "Native", report.final_score) {
                    Ok(board) => {
                        for (i, entry) in board.entries().iter().enumerate() {
                            println!("  {}. {} {}", i + 1, entry.name, entry.score);
                        }
                    }
                    Err(e) => log::error!("{}", e),
                }
            }
        }
        Err(e) => log::error!("{}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is bindings::wasm_main, this is just to satisfy the compiler
}
