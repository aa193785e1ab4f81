#![no_std]

//! # Rock Paper Scissors
//!
//! A two-player Rock-Paper-Scissors game with escrowed stakes. Player1 hides
//! their move behind a commitment so player2 cannot react to it.
//!
//! ## Game flow
//! 1. Player1 computes `commitment = keccak256(secret || move_u32_be)` (see
//!    `get_game_hash`) and calls `create_game` with the commitment, the
//!    invited player2 and a stake. The stake is escrowed by the contract.
//! 2. Player2 calls `join_game` with their cleartext move and exactly the
//!    same stake, before the join deadline.
//! 3. Player1 calls `reveal_and_finish` with `secret` and their move before
//!    the reveal deadline. The contract recomputes the commitment, resolves
//!    the round and credits the escrow to the players' balances.
//! 4. Players call `withdraw_winnings` to move their balance out.
//!
//! ## Timeouts
//! - Nobody joined by the join deadline: player1 may `cancel_game` and gets
//!   their stake back.
//! - Player1 did not reveal by the reveal deadline: the reveal is rejected
//!   from then on, and player2 may `claim_no_show` to take both stakes.
//!   Claiming is only available when the contract was deployed with
//!   `auto_win_fallback = true`; otherwise the stakes stay in escrow.
//!
//! Every session is kept after it finishes, so a commitment can never be
//! reused.

use soroban_sdk::{
    contract, contracterror, contractevent, contractimpl, log, panic_with_error, token, Address,
    Bytes, BytesN, Env,
};

mod ledger;
mod rules;
mod types;

pub use types::{Config, GameSession, Move, Outcome};

// ═══════════════════════════════════════════════════════════════════════════════
//  Contract Events
// ═══════════════════════════════════════════════════════════════════════════════

#[contractevent]
pub struct EvNewGameCreated {
    #[topic]
    pub commitment: BytesN<32>,
    pub player1: Address,
    pub player2: Address,
    pub buy_in: i128,
    pub join_deadline: u64,
}

#[contractevent]
pub struct EvPlayerTwoJoined {
    #[topic]
    pub commitment: BytesN<32>,
    pub player2: Address,
    pub move2: Move,
    pub reveal_deadline: u64,
}

#[contractevent]
pub struct EvRevealedAndFinished {
    #[topic]
    pub commitment: BytesN<32>,
    pub move1: Move,
    pub move2: Move,
    pub outcome: Outcome,
    pub player1_payout: i128,
    pub player2_payout: i128,
}

#[contractevent]
pub struct EvGameCancelled {
    #[topic]
    pub commitment: BytesN<32>,
    pub player1: Address,
    pub refund: i128,
}

/// Player1 missed the reveal deadline; player2 took both stakes.
#[contractevent]
pub struct EvNoShowClaimed {
    #[topic]
    pub commitment: BytesN<32>,
    pub player2: Address,
    pub amount: i128,
}

#[contractevent]
pub struct EvWithdrawWinnings {
    #[topic]
    pub player: Address,
    pub amount: i128,
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Errors
// ═══════════════════════════════════════════════════════════════════════════════

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum RpsError {
    DuplicateCommitment = 1,
    InvalidMove = 2,
    StakeMismatch = 3,
    NotAuthorized = 4,
    DeadlineExpired = 5,
    TooEarly = 6,
    AlreadyJoined = 7,
    NotJoined = 8,
    SessionFinished = 9,
    HashMismatch = 10,
    ZeroBalance = 11,
    SessionNotFound = 12,
    SelfPlayNotAllowed = 13,
    InvalidStake = 14,
    AutoWinDisabled = 15,
    ConfigNotSet = 16,
    InvalidTimeout = 17,
    Overflow = 18,
    OutcomePending = 19,
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Contract
// ═══════════════════════════════════════════════════════════════════════════════

#[contract]
pub struct RockPaperScissorsContract;

#[contractimpl]
impl RockPaperScissorsContract {
    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Constructor
    // ───────────────────────────────────────────────────────────────────────────

    pub fn __constructor(env: Env, token: Address, auto_win_fallback: bool, timeout_seconds: u64) {
        if timeout_seconds == 0 {
            panic_with_error!(&env, RpsError::InvalidTimeout);
        }
        ledger::save_config(
            &env,
            &Config {
                token,
                auto_win_fallback,
                timeout_seconds,
            },
        );
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Create & Join
    // ───────────────────────────────────────────────────────────────────────────

    /// Open a game against `player2`, escrowing `stake` from `player1`.
    ///
    /// `commitment` is `get_game_hash(secret, move1)`. It becomes the game's
    /// key and must never have been used before.
    pub fn create_game(
        env: Env,
        player1: Address,
        commitment: BytesN<32>,
        player2: Address,
        stake: i128,
    ) -> Result<(), RpsError> {
        player1.require_auth();

        if player1 == player2 {
            return Err(RpsError::SelfPlayNotAllowed);
        }
        if stake <= 0 {
            return Err(RpsError::InvalidStake);
        }
        if ledger::has_game(&env, &commitment) {
            return Err(RpsError::DuplicateCommitment);
        }

        let config = ledger::load_config(&env)?;
        let now = env.ledger().timestamp();
        let join_deadline = now
            .checked_add(config.timeout_seconds)
            .ok_or(RpsError::Overflow)?;

        Self::deposit(&env, &config, &player1, stake);

        let game = GameSession {
            buy_in: stake,
            player1: player1.clone(),
            player2: player2.clone(),
            move1: Move::None,
            move2: Move::None,
            created_at: now,
            join_deadline,
            joined_at: None,
            reveal_deadline: None,
            escrowed: stake,
            finished: false,
            outcome: Outcome::Pending,
        };
        ledger::write_game(&env, &commitment, &game);

        EvNewGameCreated {
            commitment,
            player1,
            player2,
            buy_in: stake,
            join_deadline,
        }
        .publish(&env);

        Ok(())
    }

    /// Join as the invited player2 with a cleartext move and a stake equal
    /// to the game's buy-in.
    pub fn join_game(
        env: Env,
        player2: Address,
        commitment: BytesN<32>,
        player_move: Move,
        stake: i128,
    ) -> Result<(), RpsError> {
        player2.require_auth();

        let mut game = ledger::read_game(&env, &commitment)?;
        Self::require_active(&game)?;
        if player2 != game.player2 {
            return Err(RpsError::NotAuthorized);
        }
        if game.has_joined() {
            return Err(RpsError::AlreadyJoined);
        }
        if !player_move.is_playable() {
            return Err(RpsError::InvalidMove);
        }
        let now = env.ledger().timestamp();
        if now > game.join_deadline {
            return Err(RpsError::DeadlineExpired);
        }
        if stake != game.buy_in {
            return Err(RpsError::StakeMismatch);
        }

        let config = ledger::load_config(&env)?;
        let reveal_deadline = now
            .checked_add(config.timeout_seconds)
            .ok_or(RpsError::Overflow)?;
        game.escrowed = game
            .escrowed
            .checked_add(stake)
            .ok_or(RpsError::Overflow)?;

        Self::deposit(&env, &config, &player2, stake);

        game.move2 = player_move;
        game.joined_at = Some(now);
        game.reveal_deadline = Some(reveal_deadline);
        ledger::write_game(&env, &commitment, &game);

        EvPlayerTwoJoined {
            commitment,
            player2,
            move2: player_move,
            reveal_deadline,
        }
        .publish(&env);

        Ok(())
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Reveal
    // ───────────────────────────────────────────────────────────────────────────

    /// Reveal player1's move and settle the game.
    ///
    /// The game is located by recomputing the commitment, so a wrong secret
    /// or move surfaces as `HashMismatch`.
    pub fn reveal_and_finish(
        env: Env,
        player1: Address,
        secret: Bytes,
        move1: Move,
    ) -> Result<Outcome, RpsError> {
        player1.require_auth();

        if !move1.is_playable() {
            return Err(RpsError::InvalidMove);
        }

        let commitment = rules::commitment(&env, &secret, move1);
        let mut game = match ledger::read_game(&env, &commitment) {
            Ok(game) => game,
            Err(RpsError::SessionNotFound) => return Err(RpsError::HashMismatch),
            Err(e) => return Err(e),
        };
        Self::require_active(&game)?;
        if player1 != game.player1 {
            return Err(RpsError::NotAuthorized);
        }
        if !game.has_joined() {
            return Err(RpsError::NotJoined);
        }

        let deadline = game.reveal_deadline.ok_or(RpsError::NotJoined)?;
        if env.ledger().timestamp() > deadline {
            return Err(RpsError::DeadlineExpired);
        }

        let outcome = rules::resolve(move1, game.move2);
        game.move1 = move1;
        let (player1_payout, player2_payout) = Self::settle(&env, &mut game, outcome)?;
        ledger::write_game(&env, &commitment, &game);

        log!(&env, "game revealed, outcome", outcome as u32);

        EvRevealedAndFinished {
            commitment,
            move1,
            move2: game.move2,
            outcome,
            player1_payout,
            player2_payout,
        }
        .publish(&env);

        Ok(outcome)
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Timeouts
    // ───────────────────────────────────────────────────────────────────────────

    /// Refund player1 once the join window has passed without a join.
    pub fn cancel_game(env: Env, player1: Address, commitment: BytesN<32>) -> Result<(), RpsError> {
        player1.require_auth();

        let mut game = ledger::read_game(&env, &commitment)?;
        Self::require_active(&game)?;
        if player1 != game.player1 {
            return Err(RpsError::NotAuthorized);
        }
        if game.has_joined() {
            return Err(RpsError::AlreadyJoined);
        }
        if env.ledger().timestamp() <= game.join_deadline {
            return Err(RpsError::TooEarly);
        }

        let (refund, _) = Self::settle(&env, &mut game, Outcome::Cancelled)?;
        ledger::write_game(&env, &commitment, &game);

        log!(&env, "game cancelled, refund", refund);

        EvGameCancelled {
            commitment,
            player1,
            refund,
        }
        .publish(&env);

        Ok(())
    }

    /// Award both stakes to player2 once player1 has missed the reveal
    /// deadline.
    pub fn claim_no_show(
        env: Env,
        player2: Address,
        commitment: BytesN<32>,
    ) -> Result<(), RpsError> {
        player2.require_auth();

        let mut game = ledger::read_game(&env, &commitment)?;
        Self::require_active(&game)?;
        if player2 != game.player2 {
            return Err(RpsError::NotAuthorized);
        }
        if !game.has_joined() {
            return Err(RpsError::NotJoined);
        }
        let config = ledger::load_config(&env)?;
        if !config.auto_win_fallback {
            return Err(RpsError::AutoWinDisabled);
        }
        let deadline = game.reveal_deadline.ok_or(RpsError::NotJoined)?;
        if env.ledger().timestamp() <= deadline {
            return Err(RpsError::TooEarly);
        }

        let (_, amount) = Self::settle(&env, &mut game, Outcome::NoShow)?;
        ledger::write_game(&env, &commitment, &game);

        log!(&env, "no-show claimed, amount", amount);

        EvNoShowClaimed {
            commitment,
            player2,
            amount,
        }
        .publish(&env);

        Ok(())
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Withdraw
    // ───────────────────────────────────────────────────────────────────────────

    /// Transfer the caller's whole balance out of the contract.
    pub fn withdraw_winnings(env: Env, player: Address) -> Result<i128, RpsError> {
        player.require_auth();

        let config = ledger::load_config(&env)?;
        let token = token::Client::new(&env, &config.token);
        let amount = ledger::release_balance(&env, &player, |env, to, amount| {
            token.transfer(&env.current_contract_address(), to, &amount);
        })?;

        EvWithdrawWinnings { player, amount }.publish(&env);

        Ok(amount)
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Read
    // ───────────────────────────────────────────────────────────────────────────

    pub fn get_game(env: Env, commitment: BytesN<32>) -> Result<GameSession, RpsError> {
        ledger::read_game(&env, &commitment)
    }

    pub fn get_balance(env: Env, player: Address) -> i128 {
        ledger::balance_of(&env, &player)
    }

    /// Commitment for `(secret, player_move)`. Meant to be simulated
    /// off-chain; submitting it in a transaction would publish the secret.
    pub fn get_game_hash(env: Env, secret: Bytes, player_move: Move) -> BytesN<32> {
        rules::commitment(&env, &secret, player_move)
    }

    pub fn get_config(env: Env) -> Result<Config, RpsError> {
        ledger::load_config(&env)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    //  Internal
    // ═══════════════════════════════════════════════════════════════════════════

    fn require_active(game: &GameSession) -> Result<(), RpsError> {
        if game.finished {
            return Err(RpsError::SessionFinished);
        }
        Ok(())
    }

    fn deposit(env: &Env, config: &Config, from: &Address, amount: i128) {
        let token = token::Client::new(env, &config.token);
        token.transfer(from, &env.current_contract_address(), &amount);
    }

    /// Single terminal transition: credit the escrow per `outcome` and mark
    /// the game finished. Returns the (player1, player2) credits.
    fn settle(
        env: &Env,
        game: &mut GameSession,
        outcome: Outcome,
    ) -> Result<(i128, i128), RpsError> {
        if game.finished {
            return Err(RpsError::SessionFinished);
        }

        let (to_player1, to_player2) = rules::split_escrow(outcome, game.buy_in, game.escrowed)?;
        ledger::credit(env, &game.player1, to_player1)?;
        ledger::credit(env, &game.player2, to_player2)?;

        let released = to_player1
            .checked_add(to_player2)
            .ok_or(RpsError::Overflow)?;
        game.escrowed = game
            .escrowed
            .checked_sub(released)
            .ok_or(RpsError::Overflow)?;
        game.finished = true;
        game.outcome = outcome;

        Ok((to_player1, to_player2))
    }
}
