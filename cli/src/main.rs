//! # 2048 CLI
//!
//! Command-line interface for playing 2048 interactively or running
//! headless simulations with configurable policies.

use std::collections::BTreeMap;
use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tile2048_core::{Direction, Game, Tile};

#[derive(Parser, Debug)]
#[command(name = "tile2048")]
#[command(author, version, about = "Play 2048 in the terminal or run simulations")]
struct Args {
    /// Run in interactive mode (default if no other mode specified)
    #[arg(short, long)]
    interactive: bool,

    /// Number of episodes to run in headless mode
    #[arg(short, long)]
    episodes: Option<u32>,

    /// Random seed for deterministic runs
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Maximum steps per episode (0 = unlimited)
    #[arg(short, long, default_value = "10000")]
    max_steps: u32,

    /// Policy for headless mode
    #[arg(short, long, value_enum, default_value = "random")]
    policy: Policy,

    /// Show board after each move in headless mode and log at debug level
    #[arg(long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Policy {
    /// Random legal moves
    Random,
    /// Cycle through directions: Left, Down, Right, Up
    Cycle,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    match args.episodes {
        Some(episodes) if !args.interactive => {
            let summary = run_headless(&args, episodes);
            print!("{}", summary.render(&args));
            Ok(())
        }
        _ => run_interactive(args.seed),
    }
}

// =============================================================================
// Interactive mode
// =============================================================================

const BANNER: &str = "=== 2048 ===\nControls: WASD or Arrow Keys | Q to quit | R to restart\n";

/// Run interactive mode where the user plays with the keyboard.
fn run_interactive(seed: u64) -> Result<()> {
    let _raw = RawMode::enable().context("failed to switch terminal to raw mode")?;

    let mut game = Game::new(seed);
    let mut stdin = io::stdin();
    let mut buffer = [0u8; 3];

    redraw(&game, None)?;

    loop {
        let bytes_read = stdin.read(&mut buffer).context("failed to read stdin")?;
        if bytes_read == 0 {
            // EOF
            break;
        }

        match parse_input(&buffer[..bytes_read]) {
            InputAction::Move(direction) => {
                if game.is_over() {
                    continue;
                }
                let result = game.step(direction);
                if result.moved {
                    redraw(&game, Some(result.reward))?;
                }
            }
            InputAction::Restart => {
                info!("restarting with seed {}", seed);
                game.reset(seed);
                redraw(&game, None)?;
            }
            InputAction::Quit => break,
            InputAction::None => {}
        }
    }

    println!("\nGoodbye!");
    Ok(())
}

fn redraw(game: &Game, reward: Option<u32>) -> Result<()> {
    let mut out = io::stdout().lock();
    write!(out, "\x1b[2J\x1b[H")?; // Clear screen
    writeln!(out, "{BANNER}")?;
    write!(out, "{game}")?;

    if let Some(points) = reward.filter(|&p| p > 0) {
        writeln!(out, "  +{} points!", points)?;
    }

    if game.is_over() {
        if game.is_won() {
            writeln!(out, "\n  *** YOU WIN ***")?;
        } else {
            writeln!(out, "\n  *** GAME OVER ***")?;
        }
        writeln!(out, "  Final Score: {}", game.score())?;
        writeln!(out, "  Max Tile: {}", game.max_tile())?;
        writeln!(out, "\n  Press R to restart or Q to quit")?;
    }
    out.flush().context("failed to flush stdout")
}

#[derive(Debug, PartialEq, Eq)]
enum InputAction {
    Move(Direction),
    Restart,
    Quit,
    None,
}

fn parse_input(bytes: &[u8]) -> InputAction {
    match bytes {
        // Arrow keys (escape sequences)
        [27, 91, 65] => InputAction::Move(Direction::Up),
        [27, 91, 66] => InputAction::Move(Direction::Down),
        [27, 91, 67] => InputAction::Move(Direction::Right),
        [27, 91, 68] => InputAction::Move(Direction::Left),

        // Control keys
        [b'q'] | [b'Q'] | [3] | [27] => InputAction::Quit, // q, Q, Ctrl+C, Esc
        [b'r'] | [b'R'] => InputAction::Restart,

        // WASD keys
        [key] => std::str::from_utf8(std::slice::from_ref(key))
            .ok()
            .and_then(|s| s.parse::<Direction>().ok())
            .map_or(InputAction::None, InputAction::Move),

        _ => InputAction::None,
    }
}

/// Puts the terminal in non-canonical, no-echo mode until dropped.
struct RawMode {
    #[cfg(unix)]
    original: libc::termios,
}

#[cfg(unix)]
impl RawMode {
    fn enable() -> io::Result<Self> {
        use std::os::unix::io::AsRawFd;

        let fd = io::stdin().as_raw_fd();
        // SAFETY: termios is plain data; tcgetattr fully initializes it on success.
        let mut original: libc::termios = unsafe { std::mem::zeroed() };
        if unsafe { libc::tcgetattr(fd, &mut original) } != 0 {
            return Err(io::Error::last_os_error());
        }

        let mut raw = original;
        raw.c_lflag &= !(libc::ICANON | libc::ECHO);
        raw.c_cc[libc::VMIN] = 1;
        raw.c_cc[libc::VTIME] = 0;
        if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &raw) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(RawMode { original })
    }
}

#[cfg(unix)]
impl Drop for RawMode {
    fn drop(&mut self) {
        use std::os::unix::io::AsRawFd;

        let fd = io::stdin().as_raw_fd();
        unsafe {
            libc::tcsetattr(fd, libc::TCSANOW, &self.original);
        }
    }
}

// On non-Unix systems, just continue without raw mode.
// Interactive mode will require Enter after each key.
#[cfg(not(unix))]
impl RawMode {
    fn enable() -> io::Result<Self> {
        Ok(RawMode {})
    }
}

// =============================================================================
// Headless mode
// =============================================================================

#[derive(Debug, Default)]
struct Summary {
    scores: Vec<u32>,
    max_tiles: Vec<Tile>,
    wins: u32,
}

impl Summary {
    fn record(&mut self, game: &Game) {
        self.scores.push(game.score());
        self.max_tiles.push(game.max_tile());
        if game.is_won() {
            self.wins += 1;
        }
    }

    fn average_score(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        self.scores.iter().map(|&s| f64::from(s)).sum::<f64>() / self.scores.len() as f64
    }

    fn median_score(&self) -> f64 {
        let mut sorted = self.scores.clone();
        sorted.sort_unstable();
        let n = sorted.len();
        match n {
            0 => 0.0,
            _ if n % 2 == 0 => (f64::from(sorted[n / 2 - 1]) + f64::from(sorted[n / 2])) / 2.0,
            _ => f64::from(sorted[n / 2]),
        }
    }

    fn tile_distribution(&self) -> BTreeMap<Tile, u32> {
        let mut counts = BTreeMap::new();
        for &tile in &self.max_tiles {
            *counts.entry(tile).or_insert(0) += 1;
        }
        counts
    }

    /// Results in a parseable `key=value` format.
    fn render(&self, args: &Args) -> String {
        let distribution = self
            .tile_distribution()
            .iter()
            .map(|(tile, count)| format!("{}:{}", tile, count))
            .collect::<Vec<_>>()
            .join(",");

        let mut out = String::from("=== Simulation Results ===\n");
        out += &format!("episodes={}\n", self.scores.len());
        out += &format!("policy={:?}\n", args.policy);
        out += &format!("seed={}\n", args.seed);
        out += &format!("max_steps={}\n", args.max_steps);
        out += &format!("avg_score={:.2}\n", self.average_score());
        out += &format!("median_score={:.2}\n", self.median_score());
        out += &format!("min_score={}\n", self.scores.iter().min().unwrap_or(&0));
        out += &format!("max_score={}\n", self.scores.iter().max().unwrap_or(&0));
        out += &format!("wins={}\n", self.wins);
        out += &format!(
            "max_tile_overall={}\n",
            self.max_tiles.iter().max().unwrap_or(&0)
        );
        out += &format!("tile_distribution={}\n", distribution);
        out
    }
}

/// Run headless simulation mode. Episode `k` is seeded with `seed + k`.
fn run_headless(args: &Args, episodes: u32) -> Summary {
    let mut summary = Summary::default();

    // Separate RNG for direction selection so spawns stay tied to the episode seed.
    let mut policy_rng = SmallRng::seed_from_u64(args.seed.wrapping_add(1000));

    for episode in 0..episodes {
        let mut game = Game::new(args.seed.wrapping_add(u64::from(episode)));
        let mut steps = 0;
        let mut cycle = 0;

        while !game.is_over() && (args.max_steps == 0 || steps < args.max_steps) {
            let direction = match args.policy {
                Policy::Random => select_random_direction(&game, &mut policy_rng),
                Policy::Cycle => select_cycle_direction(&game, &mut cycle),
            };
            let Some(direction) = direction else {
                break; // No legal directions
            };

            game.step(direction);
            steps += 1;

            if args.verbose {
                println!("Episode {} Step {}: {}", episode + 1, steps, direction);
                print!("{}", game);
            }
        }

        debug!(
            "episode {}: score={} max_tile={} steps={} won={}",
            episode + 1,
            game.score(),
            game.max_tile(),
            steps,
            game.is_won()
        );
        summary.record(&game);
    }

    info!("finished {} episodes", episodes);
    summary
}

/// Select a random legal direction.
fn select_random_direction<R: Rng>(game: &Game, rng: &mut R) -> Option<Direction> {
    let legal = game.legal_directions();
    let candidates: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|&d| legal[d as usize])
        .collect();

    if candidates.is_empty() {
        None
    } else {
        Some(candidates[rng.gen_range(0..candidates.len())])
    }
}

/// Select directions in a cycle: Left, Down, Right, Up, skipping illegal ones.
fn select_cycle_direction(game: &Game, cycle: &mut usize) -> Option<Direction> {
    const ORDER: [Direction; 4] = [
        Direction::Left,
        Direction::Down,
        Direction::Right,
        Direction::Up,
    ];
    let legal = game.legal_directions();

    for _ in 0..ORDER.len() {
        let direction = ORDER[*cycle % ORDER.len()];
        *cycle += 1;
        if legal[direction as usize] {
            return Some(direction);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tile2048_core::Board;

    fn headless_args(policy: &str) -> Args {
        Args::parse_from(["tile2048", "--episodes", "3", "--seed", "7", "--policy", policy])
    }

    #[rstest]
    #[case(&[27, 91, 65], InputAction::Move(Direction::Up))]
    #[case(&[27, 91, 66], InputAction::Move(Direction::Down))]
    #[case(&[27, 91, 67], InputAction::Move(Direction::Right))]
    #[case(&[27, 91, 68], InputAction::Move(Direction::Left))]
    #[case(b"w", InputAction::Move(Direction::Up))]
    #[case(b"S", InputAction::Move(Direction::Down))]
    #[case(b"a", InputAction::Move(Direction::Left))]
    #[case(b"D", InputAction::Move(Direction::Right))]
    #[case(b"q", InputAction::Quit)]
    #[case(&[3], InputAction::Quit)]
    #[case(&[27], InputAction::Quit)]
    #[case(b"r", InputAction::Restart)]
    #[case(b"x", InputAction::None)]
    #[case(b"ab", InputAction::None)]
    fn test_parse_input(#[case] bytes: &[u8], #[case] expected: InputAction) {
        assert_eq!(parse_input(bytes), expected);
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["tile2048"]);
        assert_eq!(args.seed, 42);
        assert_eq!(args.max_steps, 10000);
        assert_eq!(args.policy, Policy::Random);
        assert!(args.episodes.is_none());
    }

    #[test]
    fn test_cycle_skips_illegal_directions() {
        // Tile in the top-left corner: Left and Up never move it.
        let board = Board::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let game = Game::from_board(board, 0);
        let mut cycle = 0;
        assert_eq!(select_cycle_direction(&game, &mut cycle), Some(Direction::Down));
        assert_eq!(select_cycle_direction(&game, &mut cycle), Some(Direction::Right));
        assert_eq!(select_cycle_direction(&game, &mut cycle), Some(Direction::Down));
    }

    #[test]
    fn test_random_only_picks_legal_directions() {
        let board = Board::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let game = Game::from_board(board, 0);
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..50 {
            let direction = select_random_direction(&game, &mut rng).unwrap();
            assert!(matches!(direction, Direction::Down | Direction::Right));
        }
    }

    #[test]
    fn test_no_direction_on_stalemate() {
        let board = Board::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        let game = Game::from_board(board, 0);
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(select_random_direction(&game, &mut rng), None);
        assert_eq!(select_cycle_direction(&game, &mut 0), None);
    }

    #[rstest]
    #[case("random")]
    #[case("cycle")]
    fn test_headless_is_deterministic(#[case] policy: &str) {
        let args = headless_args(policy);
        let first = run_headless(&args, 3);
        let second = run_headless(&args, 3);
        assert_eq!(first.scores, second.scores);
        assert_eq!(first.max_tiles, second.max_tiles);
        assert_eq!(first.scores.len(), 3);
    }

    #[test]
    fn test_summary_render() {
        let summary = Summary {
            scores: vec![100, 300, 200, 400],
            max_tiles: vec![64, 128, 64, 256],
            wins: 0,
        };
        let out = summary.render(&headless_args("cycle"));
        assert!(out.contains("episodes=4\n"));
        assert!(out.contains("avg_score=250.00\n"));
        assert!(out.contains("median_score=250.00\n"));
        assert!(out.contains("min_score=100\n"));
        assert!(out.contains("max_score=400\n"));
        assert!(out.contains("max_tile_overall=256\n"));
        assert!(out.contains("tile_distribution=64:2,128:1,256:1\n"));
        assert!(out.contains("policy=Cycle\n"));
    }
}
