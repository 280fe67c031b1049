//! Decrypto Device Engine
//!
//! Demo driver: plays a scripted game between two devices that share only
//! the seed, and checks that they stayed in sync.

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use decrypto::{
    loader::load_keywords_filtered,
    game::keywords::KeywordBank,
    DeviceConfig, Engine, RoundCode, Team, VERSION,
};

/// Bank used when `DECRYPTO_KEYWORDS` is not set.
const DEMO_BANK: [&str; 12] = [
    "castle", "dragon", "forest", "harbor",
    "eagle", "guitar", "bridge", "apple",
    "comet", "lantern", "mirror", "volcano",
];

/// Safety stop for the scripted game.
const MAX_ROUNDS: u32 = 8;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Decrypto Device Engine v{}", VERSION);

    let config = DeviceConfig::from_env();
    let bank = match &config.keywords_path {
        Some(path) => load_keywords_filtered(path, &config.keyword_filter())
            .with_context(|| format!("loading keywords from {}", path.display()))?,
        None => KeywordBank::new(DEMO_BANK)?,
    };
    info!("Seed: {:?}, bank: {} words", config.shared_seed, bank.len());

    demo_game(&config, bank)
}

/// Play a scripted game on both devices and verify they agree.
fn demo_game(config: &DeviceConfig, bank: KeywordBank) -> Result<()> {
    info!("=== Starting Demo Game ===");

    let mut local = Engine::from_config(config, bank.clone())?;
    let mut remote = Engine::new(config.shared_seed.clone(), local.team().opponent(), bank);

    info!("This device: {}", local.team());
    info!("Keywords: {}", local.keywords_display());

    loop {
        let round = local.round();
        info!("--- Round {} [sync {}] ---", round, local.sync_fingerprint());

        if local.sync_fingerprint() != remote.sync_fingerprint() {
            bail!("devices disagree on fingerprint in round {round}");
        }

        for encrypting in Team::ALL {
            let actual = local.round_code(encrypting);
            if actual != remote.round_code(encrypting) {
                bail!("devices disagree on {encrypting} code in round {round}");
            }

            let (guess, interception) = scripted_guesses(actual, round, encrypting);
            let clues = scripted_clues(&local, &remote, encrypting, actual);

            // Both devices get identical inputs
            for device in [&mut local, &mut remote] {
                let outcome = device.resolve_codes(&guess, &interception, &actual, encrypting);
                if device.team() == encrypting {
                    device.record_own_clues(clues.as_slice(), &actual.digits())?;
                } else {
                    device.record_opponent_clues(clues.as_slice(), &actual.digits())?;
                }
                if let Some(award) = outcome.award {
                    info!("{} device: {:?} token", device.team(), award);
                }
            }
            info!(
                "{} code {} | guess {} | interception {}",
                encrypting, actual, guess, interception
            );
        }

        let over: Vec<String> = [&local, &remote]
            .iter()
            .filter_map(|d| d.game_over_message())
            .collect();
        if !over.is_empty() {
            for message in over {
                info!("{}", message);
            }
            break;
        }

        if round >= MAX_ROUNDS {
            warn!("No result after {} rounds, stopping", MAX_ROUNDS);
            break;
        }
        local.advance_round();
        remote.advance_round();
    }

    info!("=== Results ===");
    for device in [&local, &remote] {
        let tokens = device.tokens();
        info!(
            "{}: {} miscommunication, {} interception, {} events",
            device.team(),
            tokens.miscommunication,
            tokens.interception,
            device.events().len()
        );
        for given in device.own_clues().rounds() {
            let said: Vec<String> = given
                .clues
                .iter()
                .map(|c| format!("{}->{}", c.clue, c.slot))
                .collect();
            info!("  round {} gave: {}", given.round, said.join(", "));
        }
        for (slot, clues) in device.opponent_clues().iter() {
            info!("  opponent slot {}: {}", slot, clues.join(", "));
        }
    }

    Ok(())
}

/// Deterministic stand-in for the players' guesses.
fn scripted_guesses(actual: RoundCode, round: u32, encrypting: Team) -> (RoundCode, RoundCode) {
    let [a, b, c] = actual.digits();
    let rotated = RoundCode::new([b, c, a]).unwrap_or(actual);

    let own_miss = encrypting == Team::Second && round % 2 == 0;
    let intercept = encrypting == Team::First && round >= 3;

    let guess = if own_miss { rotated } else { actual };
    let interception = if intercept { actual } else { rotated };
    (guess, interception)
}

/// Clues the encryptor would say aloud: a hint derived from each keyword.
fn scripted_clues(local: &Engine, remote: &Engine, encrypting: Team, code: RoundCode) -> Vec<String> {
    let encryptor = if local.team() == encrypting { local } else { remote };
    code.digits()
        .iter()
        .filter_map(|slot| encryptor.keywords().get(*slot))
        .map(|word| word.chars().rev().collect::<String>().to_lowercase())
        .collect()
}
