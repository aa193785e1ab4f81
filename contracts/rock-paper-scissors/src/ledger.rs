//! Contract storage: sessions, withdrawable balances and the deployment
//! config. Nothing here validates game rules; the entry points in `lib.rs`
//! check every precondition before writing.

use soroban_sdk::{Address, BytesN, Env};

use crate::types::{Config, DataKey, GameSession};
use crate::RpsError;

// Ledger rate is approximately 5 seconds per ledger on Stellar
const LEDGER_RATE_SECS: u32 = 5;

// Extend once an entry has less than ~30 days left
const TTL_THRESHOLD_SECONDS: u32 = 30 * 24 * 60 * 60; // 2,592,000 seconds
const TTL_THRESHOLD_LEDGERS: u32 = TTL_THRESHOLD_SECONDS / LEDGER_RATE_SECS; // 518,400 ledgers

// ...back up to ~120 days
const TTL_EXTEND_SECONDS: u32 = 120 * 24 * 60 * 60; // 10,368,000 seconds
const TTL_EXTEND_LEDGERS: u32 = TTL_EXTEND_SECONDS / LEDGER_RATE_SECS; // 2,073,600 ledgers

// ═══════════════════════════════════════════════════════════════════════════════
//  Config
// ═══════════════════════════════════════════════════════════════════════════════

pub fn save_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

pub fn load_config(env: &Env) -> Result<Config, RpsError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(RpsError::ConfigNotSet)
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD_LEDGERS, TTL_EXTEND_LEDGERS);
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Sessions
// ═══════════════════════════════════════════════════════════════════════════════

/// True if `commitment` was ever used, finished sessions included.
pub fn has_game(env: &Env, commitment: &BytesN<32>) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Game(commitment.clone()))
}

pub fn read_game(env: &Env, commitment: &BytesN<32>) -> Result<GameSession, RpsError> {
    let key = DataKey::Game(commitment.clone());
    let game: GameSession = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(RpsError::SessionNotFound)?;
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD_LEDGERS, TTL_EXTEND_LEDGERS);
    Ok(game)
}

pub fn write_game(env: &Env, commitment: &BytesN<32>, game: &GameSession) {
    let key = DataKey::Game(commitment.clone());
    env.storage().persistent().set(&key, game);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD_LEDGERS, TTL_EXTEND_LEDGERS);
    // Keep the config alive alongside active games
    bump_instance(env);
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Balances
// ═══════════════════════════════════════════════════════════════════════════════

pub fn balance_of(env: &Env, player: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(player.clone()))
        .unwrap_or(0)
}

pub fn credit(env: &Env, player: &Address, amount: i128) -> Result<(), RpsError> {
    if amount == 0 {
        return Ok(());
    }
    let updated = balance_of(env, player)
        .checked_add(amount)
        .ok_or(RpsError::Overflow)?;
    let key = DataKey::Balance(player.clone());
    env.storage().persistent().set(&key, &updated);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD_LEDGERS, TTL_EXTEND_LEDGERS);
    Ok(())
}

/// Zero `player`'s balance and return what it held.
pub fn take_balance(env: &Env, player: &Address) -> Result<i128, RpsError> {
    let amount = balance_of(env, player);
    if amount <= 0 {
        return Err(RpsError::ZeroBalance);
    }
    env.storage()
        .persistent()
        .remove(&DataKey::Balance(player.clone()));
    Ok(amount)
}

/// Withdraw `player`'s whole balance through `release`.
///
/// The balance is cleared before `release` runs, so anything `release`
/// calls back into sees an empty balance.
pub fn release_balance<F>(env: &Env, player: &Address, release: F) -> Result<i128, RpsError>
where
    F: FnOnce(&Env, &Address, i128),
{
    let amount = take_balance(env, player)?;
    release(env, player, amount);
    Ok(amount)
}
