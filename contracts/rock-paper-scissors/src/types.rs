use soroban_sdk::{contracttype, Address, BytesN};

/// A player's hand. `None` marks "not played yet" and is never accepted as a
/// move by any entry point.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Move {
    None = 0,
    Rock = 1,
    Paper = 2,
    Scissors = 3,
}

/// Terminal path a session took. `Pending` until the session is finished.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Outcome {
    Pending = 0,
    Player1Won = 1,
    Player2Won = 2,
    Draw = 3,
    Cancelled = 4,
    NoShow = 5,
}

/// Deployment-time settings. Written once by the constructor.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub token: Address,           // Stake token (SAC or any SEP-41 token)
    pub auto_win_fallback: bool,  // Enables claim_no_show and the reveal deadline
    pub timeout_seconds: u64,     // Join window and reveal window
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameSession {
    pub buy_in: i128,
    pub player1: Address,
    pub player2: Address,
    pub move1: Move,                   // Set only when player1 reveals
    pub move2: Move,                   // Set once, when player2 joins
    pub created_at: u64,
    pub join_deadline: u64,
    pub joined_at: Option<u64>,
    pub reveal_deadline: Option<u64>,
    pub escrowed: i128,                // buy_in per deposit, zeroed when finished
    pub finished: bool,
    pub outcome: Outcome,
}

impl GameSession {
    pub fn has_joined(&self) -> bool {
        self.move2 != Move::None
    }
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    Game(BytesN<32>),
    Balance(Address),
}
